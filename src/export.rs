//! Export: every frame rasterized at full resolution, PNG-encoded and
//! bundled into a single zip archive.

use std::io::{Cursor, Write};
use std::path::Path;

use thiserror::Error;
use zip::write::SimpleFileOptions;

use crate::model::{Project, CANONICAL_WIDTH};
use crate::render::{FrameRenderer, RenderError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("frame {frame_number} failed to render: {source}")]
    FrameRender {
        /// 1-based position of the failing frame
        frame_number: usize,
        source: RenderError,
    },

    #[error("failed to encode frame {frame_number} as PNG: {source}")]
    Encode {
        frame_number: usize,
        source: image::ImageError,
    },

    #[error("failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Archive entry name for the 1-based frame number; zero-padded so the
/// entries sort in frame order.
pub fn entry_name(frame_number: usize) -> String {
    format!("frame_{frame_number:02}.png")
}

/// Renders every frame at the project's full resolution and bundles the
/// PNGs into one zip archive, in frame order.
///
/// Any single frame failure aborts the whole export; a partial archive
/// is never produced.
pub fn export_project(
    project: &Project,
    renderer: &FrameRenderer<'_>,
) -> Result<Vec<u8>, ExportError> {
    log::info!(
        "exporting project {:?}: {} frame(s) at {}",
        project.name,
        project.frames.len(),
        project.dimensions
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    for (index, frame) in project.frames.iter().enumerate() {
        let frame_number = index + 1;
        let surface = renderer
            .render(project, frame, CANONICAL_WIDTH)
            .map_err(|source| {
                log::error!("export aborted at frame {frame_number}: {source}");
                ExportError::FrameRender {
                    frame_number,
                    source,
                }
            })?;

        let mut png = Vec::new();
        surface
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|source| ExportError::Encode {
                frame_number,
                source,
            })?;

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        writer.start_file(entry_name(frame_number), options)?;
        writer.write_all(&png)?;
    }

    let cursor = writer.finish()?;
    log::info!("export finished: {} bytes", cursor.get_ref().len());
    Ok(cursor.into_inner())
}

/// Renders and writes the archive to `path`.
pub fn export_to_file(
    project: &Project,
    renderer: &FrameRenderer<'_>,
    path: &Path,
) -> Result<(), ExportError> {
    let archive = export_project(project, renderer)?;
    std::fs::write(path, archive)?;
    Ok(())
}
