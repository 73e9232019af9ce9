use slidedeck::{DeckConfig, DeckRenderer, PptxRenderer, SlideRecord};
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn render(slides: &[SlideRecord], width: f64, height: f64) -> ZipArchive<Cursor<Vec<u8>>> {
    let config = DeckConfig {
        width,
        height,
        css: "body { color: red; }".to_string(),
    };
    let buffer = PptxRenderer::new("Workshop & Friends")
        .render(slides, &config)
        .expect("Failed to render deck");
    ZipArchive::new(Cursor::new(buffer.into_inner())).expect("Failed to read PPTX as ZIP")
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("Missing part {}", name));
    let mut content = String::new();
    part.read_to_string(&mut content).expect("Part is not UTF-8");
    content
}

#[test]
fn test_pptx_contains_one_slide_part_per_record_in_order() {
    let slides = vec![
        SlideRecord::new("<h1>First</h1><p>Hello</p>"),
        SlideRecord::new("<h1>Second</h1><p>World</p>"),
        SlideRecord::new("Third"),
    ];
    let mut archive = render(&slides, 10.0, 5.625);

    let mut slide_files: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|name| name.to_string())
        .collect();
    slide_files.sort();
    assert_eq!(
        slide_files,
        vec![
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml"
        ]
    );

    assert!(read_part(&mut archive, "ppt/slides/slide1.xml").contains("<a:t>First</a:t>"));
    assert!(read_part(&mut archive, "ppt/slides/slide2.xml").contains("<a:t>World</a:t>"));
    assert!(read_part(&mut archive, "ppt/slides/slide3.xml").contains("<a:t>Third</a:t>"));

    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    let first = presentation.find(r#"<p:sldId id="256" r:id="rId3"/>"#).unwrap();
    let last = presentation.find(r#"<p:sldId id="258" r:id="rId5"/>"#).unwrap();
    assert!(first < last);

    let rels = read_part(&mut archive, "ppt/_rels/presentation.xml.rels");
    assert!(rels.contains(r#"Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide3.xml""#));
}

#[test]
fn test_pptx_slide_size_matches_geometry() {
    let mut archive = render(&[SlideRecord::new("x")], 10.0, 5.625);
    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));

    let mut archive = render(&[SlideRecord::new("x")], 13.333, 7.5);
    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));
}

#[test]
fn test_pptx_escapes_text_and_title() {
    let mut archive = render(&[SlideRecord::new("<p>a &lt; b &amp; \"c\"</p>")], 10.0, 5.625);

    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:t>a &lt; b &amp; &quot;c&quot;</a:t>"));

    let core = read_part(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Workshop &amp; Friends</dc:title>"));
}

#[test]
fn test_pptx_drops_characters_xml_forbids() {
    let slides = [SlideRecord::new("<h1>T\u{FFFE}itle</h1><p>x&#xFFFE;y\u{FFFF}z</p>")];
    let config = DeckConfig {
        width: 10.0,
        height: 5.625,
        css: String::new(),
    };
    let buffer = PptxRenderer::new("Deck\u{FFFF}")
        .render(&slides, &config)
        .expect("Failed to render deck");
    let mut archive = ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();

    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:t>xyz</a:t>"));
    assert!(slide.contains(r#"name="Title""#));
    assert!(!slide.contains('\u{FFFE}') && !slide.contains('\u{FFFF}'));

    let core = read_part(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Deck</dc:title>"));
}

#[test]
fn test_pptx_has_required_package_parts() {
    let mut archive = render(&[SlideRecord::new("x")], 10.0, 5.625);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/app.xml",
        "docProps/core.xml",
        "ppt/presentation.xml",
        "ppt/_rels/presentation.xml.rels",
        "ppt/theme/theme1.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        "ppt/slides/_rels/slide1.xml.rels",
    ] {
        assert!(archive.by_name(part).is_ok(), "Missing part {}", part);
    }

    let content_types = read_part(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"PartName="/ppt/slides/slide1.xml""#));
}

#[test]
fn test_pptx_empty_deck_is_valid_package() {
    let mut archive = render(&[], 10.0, 5.625);

    assert!(!archive.file_names().any(|name| name.starts_with("ppt/slides/")));
    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(!presentation.contains("<p:sldIdLst>"));
    let app = read_part(&mut archive, "docProps/app.xml");
    assert!(app.contains("<Slides>0</Slides>"));
}

#[test]
fn test_pptx_rejects_unsupported_size() {
    let config = DeckConfig {
        width: 100.0,
        height: 5.625,
        css: String::new(),
    };
    let err = PptxRenderer::default()
        .render(&[SlideRecord::new("x")], &config)
        .unwrap_err();
    assert!(err.is_render());
}
