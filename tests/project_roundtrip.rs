use carousel_studio::model::{
    Dimensions, FrameElement, Project, SignaturePosition, TextAlign, VerticalAlign,
};
use carousel_studio::persistence::{
    deserialize_project, load_project, save_project, serialize_project, LocalStore, ProjectStore,
    StoreError,
};

/// A project exercising every serialized field.
fn full_project() -> Project {
    let mut project = Project::new("Launch deck");
    project.dimensions = Dimensions::Portrait;
    project.background_color = "#fafafa".parse().unwrap();
    project.text_color = "#202020".parse().unwrap();
    project.font_family = "Lora".to_owned();
    project.margin_enabled = true;
    project.margin_horizontal = 80;
    project.margin_vertical = 120;
    project.signature_image = Some("assets/signature.png".to_owned());
    project.signature_position = SignaturePosition::TopCenter;
    project.signature_size = 128;

    let frame = &mut project.frames[0];
    frame.text = "Hello\nworld".to_owned();
    frame.font_size = 48;
    frame.text_align = TextAlign::Right;
    frame.vertical_align = VerticalAlign::Bottom;
    frame.is_bold = true;
    frame.is_underline = true;
    frame.line_height = 1.2;
    frame.letter_spacing = -0.5;
    frame.font_family = Some("Inter".to_owned());
    frame.background_color = Some("#123123".parse().unwrap());
    frame.background_image = Some("assets/bg.jpg".to_owned());
    frame
        .elements
        .push(FrameElement::image(10.0, 20.0, 300.0, 200.0, "assets/logo.png"));
    frame
        .elements
        .push(FrameElement::circle(500.0, 500.0, 80.0, 80.0, "#ff8800".parse().unwrap()));

    project
}

#[test]
fn serialize_then_deserialize_is_identity() {
    // P3
    let project = full_project();
    let blob = serialize_project(&project).unwrap();
    let restored = deserialize_project(&blob).unwrap();
    assert_eq!(restored, project);
}

#[test]
fn blob_uses_the_documented_field_names() {
    let blob = serialize_project(&full_project()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

    assert_eq!(value["dimensions"], "1080x1350");
    assert_eq!(value["marginEnabled"], true);
    assert_eq!(value["signaturePosition"], "top-center");
    let frame = &value["frames"][0];
    assert_eq!(frame["fontSize"], 48);
    assert_eq!(frame["textAlign"], "right");
    assert_eq!(frame["verticalAlign"], "bottom");
    assert_eq!(frame["isBold"], true);
    assert_eq!(frame["elements"][0]["type"], "image");
    assert_eq!(frame["elements"][1]["type"], "shape");
    assert_eq!(frame["elements"][1]["shape"], "circle");
}

#[test]
fn malformed_blob_is_an_error_not_a_panic() {
    assert!(matches!(
        deserialize_project("{ not json"),
        Err(StoreError::Deserialize(_))
    ));
    assert!(matches!(
        deserialize_project("{\"id\": 7}"),
        Err(StoreError::Deserialize(_))
    ));
}

#[test]
fn unsupported_dimensions_are_rejected() {
    let mut blob = serialize_project(&full_project()).unwrap();
    blob = blob.replace("1080x1350", "640x480");
    assert!(matches!(
        deserialize_project(&blob),
        Err(StoreError::Deserialize(_))
    ));
}

#[test]
fn frame_bound_is_revalidated_on_load() {
    let mut project = full_project();
    let blob = {
        // Bypass the editor session to fabricate an invalid blob.
        project.frames.clear();
        serialize_project(&project).unwrap()
    };
    assert!(matches!(
        deserialize_project(&blob),
        Err(StoreError::FrameCountOutOfRange(0))
    ));
}

#[test]
fn save_project_stamps_updated_at_in_the_stored_blob() {
    let root = std::env::temp_dir().join(format!("carousel_save_{}", uuid::Uuid::new_v4()));
    let store = LocalStore::new(&root);
    let mut project = full_project();
    project.updated_at = 0;

    let stamp = save_project(&store, "owner-1", &project).unwrap();
    assert!(stamp >= project.created_at);
    // The caller applies the stamp after a successful save.
    project.updated_at = stamp;

    let loaded = load_project(&store, "owner-1", &project.name)
        .unwrap()
        .unwrap();
    assert_eq!(loaded, project);

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn round_trip_through_a_store() {
    let root = std::env::temp_dir().join(format!("carousel_rt_{}", uuid::Uuid::new_v4()));
    let store = LocalStore::new(&root);
    let project = full_project();

    let blob = serialize_project(&project).unwrap();
    store.save("owner-1", &project.name, &blob).unwrap();

    let loaded = store.load("owner-1", &project.name).unwrap().unwrap();
    assert_eq!(deserialize_project(&loaded).unwrap(), project);

    let _ = std::fs::remove_dir_all(root);
}
