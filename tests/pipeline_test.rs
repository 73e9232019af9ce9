use slidedeck::{
    Config, DeckBuffer, DeckConfig, DeckError, DeckRenderer, EmptyDeckPolicy, Geometry, Pipeline,
    SlideRecord,
};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Records every render call and answers with a fixed buffer, or fails
struct RecordingRenderer {
    calls: RefCell<Vec<(Vec<SlideRecord>, DeckConfig)>>,
    fail: bool,
}

impl RecordingRenderer {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl DeckRenderer for RecordingRenderer {
    fn render(&self, slides: &[SlideRecord], config: &DeckConfig) -> slidedeck::Result<DeckBuffer> {
        self.calls
            .borrow_mut()
            .push((slides.to_vec(), config.clone()));
        if self.fail {
            return Err(DeckError::render("layout engine crashed"));
        }
        Ok(DeckBuffer::new(b"PK-rendered-deck".to_vec()))
    }
}

fn write_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        fs::write(dir.join(name), content).expect("Failed to write file");
    }
}

#[test]
fn test_scenario_hello_world() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(
        temp_dir.path(),
        &[
            ("slide1.html", "Hello"),
            ("slide2.html", "World"),
            ("styles.css", "body{color:red}"),
        ],
    );

    let renderer = RecordingRenderer::new();
    let config = Config::new(temp_dir.path()).with_geometry(Geometry::new(10.0, 5.625).unwrap());
    let output = Pipeline::new(config, &renderer).run().expect("Pipeline failed");

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1, "Renderer must be called exactly once");
    let (slides, deck_config) = &calls[0];
    assert_eq!(
        slides,
        &vec![SlideRecord::new("Hello"), SlideRecord::new("World")]
    );
    assert_eq!(
        deck_config,
        &DeckConfig {
            width: 10.0,
            height: 5.625,
            css: "body{color:red}".to_string()
        }
    );

    assert_eq!(output, temp_dir.path().join("slides.pptx"));
    assert_eq!(fs::read(&output).unwrap(), b"PK-rendered-deck");
}

#[test]
fn test_missing_stylesheet_fails_before_render() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(temp_dir.path(), &[("slide1.html", "Hello")]);

    let renderer = RecordingRenderer::new();
    let err = Pipeline::new(Config::new(temp_dir.path()), &renderer)
        .run()
        .unwrap_err();

    match err {
        DeckError::Io { path, .. } => assert_eq!(path, temp_dir.path().join("styles.css")),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(renderer.calls.borrow().is_empty());
    assert!(!temp_dir.path().join("slides.pptx").exists());
}

#[test]
fn test_render_failure_leaves_existing_output_untouched() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(
        temp_dir.path(),
        &[
            ("slide1.html", "Hello"),
            ("styles.css", "body{}"),
            ("slides.pptx", "previous deck"),
        ],
    );

    let renderer = RecordingRenderer::failing();
    let err = Pipeline::new(Config::new(temp_dir.path()), &renderer)
        .run()
        .unwrap_err();

    assert!(err.is_render(), "Expected render error, got {:?}", err);
    assert_eq!(err.to_string(), "Rendering engine error: layout engine crashed");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("slides.pptx")).unwrap(),
        "previous deck"
    );
}

#[test]
fn test_lexicographic_order_is_kept() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(
        temp_dir.path(),
        &[
            ("slide2.html", "two"),
            ("slide10.html", "ten"),
            ("styles.css", ""),
        ],
    );

    let renderer = RecordingRenderer::new();
    let pipeline = Pipeline::new(Config::new(temp_dir.path()), &renderer);

    let plan = pipeline.plan().unwrap();
    assert_eq!(
        plan,
        vec![
            temp_dir.path().join("slide10.html"),
            temp_dir.path().join("slide2.html")
        ]
    );

    pipeline.run().unwrap();
    let calls = renderer.calls.borrow();
    assert_eq!(
        calls[0].0,
        vec![SlideRecord::new("ten"), SlideRecord::new("two")]
    );
}

#[test]
fn test_empty_directory_renders_empty_deck_by_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(temp_dir.path(), &[("styles.css", "body{}")]);

    let renderer = RecordingRenderer::new();
    Pipeline::new(Config::new(temp_dir.path()), &renderer)
        .run()
        .unwrap();

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.is_empty());
    assert!(temp_dir.path().join("slides.pptx").exists());
}

#[test]
fn test_empty_directory_rejected_when_configured() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(temp_dir.path(), &[("styles.css", "body{}")]);

    let renderer = RecordingRenderer::new();
    let config = Config::new(temp_dir.path()).with_empty_policy(EmptyDeckPolicy::Reject);
    let err = Pipeline::new(config, &renderer).run().unwrap_err();

    assert!(matches!(err, DeckError::EmptyDeck { .. }));
    assert!(renderer.calls.borrow().is_empty());
    assert!(!temp_dir.path().join("slides.pptx").exists());
}

#[test]
fn test_repeated_runs_produce_identical_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_files(
        temp_dir.path(),
        &[("slide1.html", "<p>a</p>"), ("styles.css", "p { margin: 0 }\n")],
    );

    let renderer = RecordingRenderer::new();
    let pipeline = Pipeline::new(Config::new(temp_dir.path()), &renderer);
    pipeline.run().unwrap();
    pipeline.run().unwrap();

    let calls = renderer.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn test_missing_slides_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope");

    let renderer = RecordingRenderer::new();
    let err = Pipeline::new(Config::new(&missing), &renderer)
        .run()
        .unwrap_err();

    assert!(err.is_io());
    assert!(renderer.calls.borrow().is_empty());
}
