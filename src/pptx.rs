// ABOUTME: PPTX generation module for the slidedeck application
// ABOUTME: Built-in renderer that writes each slide's text into a PowerPoint package

use crate::errors::{DeckError, Result};
use crate::html::{self, Paragraph};
use crate::loader::SlideRecord;
use crate::render::{DeckBuffer, DeckConfig, DeckRenderer};
use log::{debug, info};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::{write::FileOptions, ZipWriter};

/// English Metric Units per inch
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Smallest slide edge PowerPoint accepts (1 inch)
pub const MIN_SLIDE_EMU: i64 = 914_400;

/// Largest slide edge PowerPoint accepts (56 inches)
pub const MAX_SLIDE_EMU: i64 = 51_206_400;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Renderer that lays the visible text of each slide into one text box per slide.
///
/// It does not apply the stylesheet or any HTML layout; it exists so a deck can
/// be produced without an external rendering engine.
#[derive(Debug, Clone)]
pub struct PptxRenderer {
    pub title: String,
}

impl Default for PptxRenderer {
    fn default() -> Self {
        Self {
            title: "Presentation".to_string(),
        }
    }
}

impl PptxRenderer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl DeckRenderer for PptxRenderer {
    fn render(&self, slides: &[SlideRecord], config: &DeckConfig) -> Result<DeckBuffer> {
        let cx = to_emu("width", config.width)?;
        let cy = to_emu("height", config.height)?;
        debug!(
            "Stylesheet of {} bytes is not applied by the text renderer",
            config.css.len()
        );

        let mut package = Package::new();

        info!("Creating PPTX structure");
        package.add("[Content_Types].xml", &content_types_xml(slides.len()))?;
        package.add("_rels/.rels", &package_rels_xml())?;
        package.add("docProps/app.xml", &app_xml(slides.len()))?;
        package.add("docProps/core.xml", &core_xml(&self.title))?;
        package.add("ppt/presentation.xml", &presentation_xml(slides.len(), cx, cy)?)?;
        package.add(
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(slides.len()),
        )?;
        package.add("ppt/theme/theme1.xml", THEME_XML)?;
        package.add("ppt/slideMasters/slideMaster1.xml", &slide_master_xml())?;
        package.add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &relationships_xml(&[
                ("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml"),
                ("rId2", "theme", "../theme/theme1.xml"),
            ]),
        )?;
        package.add("ppt/slideLayouts/slideLayout1.xml", &slide_layout_xml())?;
        package.add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &relationships_xml(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]),
        )?;

        for (i, slide) in slides.iter().enumerate() {
            let slide_num = i + 1;
            let paragraphs = html::extract_paragraphs(&slide.html);
            debug!(
                "Slide {}: {} paragraphs of text",
                slide_num,
                paragraphs.len()
            );

            package.add(
                &format!("ppt/slides/slide{}.xml", slide_num),
                &slide_xml(&paragraphs, cx, cy),
            )?;
            package.add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
                &relationships_xml(&[("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml")]),
            )?;
        }

        info!("Finalizing PPTX package");
        package.finish()
    }
}

/// In-memory zip archive being filled with package parts
struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl Package {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn add(&mut self, name: &str, content: &str) -> Result<()> {
        debug!("Adding part {}", name);
        self.zip.start_file(name, FileOptions::default())?;
        self.zip
            .write_all(content.as_bytes())
            .map_err(|e| DeckError::Render {
                message: format!("Failed to write part {}: {}", name, e),
                source: Some(Box::new(e)),
            })
    }

    fn finish(mut self) -> Result<DeckBuffer> {
        let cursor = self.zip.finish()?;
        Ok(DeckBuffer::new(cursor.into_inner()))
    }
}

/// Convert inches to EMU, rejecting sizes PowerPoint cannot open
pub fn to_emu(name: &str, inches: f64) -> Result<i64> {
    let emu = (inches * EMU_PER_INCH).round();
    if !emu.is_finite() || emu < MIN_SLIDE_EMU as f64 || emu > MAX_SLIDE_EMU as f64 {
        return Err(DeckError::render(format!(
            "slide {} of {} inches is outside the supported range of 1 to 56 inches",
            name, inches
        )));
    }
    Ok(emu as i64)
}

fn fmt_err(e: std::fmt::Error) -> DeckError {
    DeckError::render(format!("Failed to build XML: {}", e))
}

fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    for i in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            i
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_RELS}"><Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

fn app_xml(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>slidedeck</Application><Slides>{slide_count}</Slides></Properties>"#
    )
}

fn core_xml(title: &str) -> String {
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>slidedeck</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created><cp:revision>1</cp:revision></cp:coreProperties>"#,
        escape(&html::xml_safe(title)),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )
}

/// Slides take relationship ids after the master (rId1) and theme (rId2)
fn slide_rel_id(index: usize) -> String {
    format!("rId{}", index + 3)
}

fn presentation_xml(slide_count: usize, cx: i64, cy: i64) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    write!(
        xml,
        r#"{XML_DECL}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                256 + i,
                slide_rel_id(i)
            )
            .map_err(fmt_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, cx, cy).map_err(fmt_err)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_RELS}">"#);
    xml.push_str(&relationship("rId1", "slideMaster", "slideMasters/slideMaster1.xml"));
    xml.push_str(&relationship("rId2", "theme", "theme/theme1.xml"));
    for i in 0..slide_count {
        let target = format!("slides/slide{}.xml", i + 1);
        xml.push_str(&relationship(&slide_rel_id(i), "slide", &target));
    }
    xml.push_str("</Relationships>");
    xml
}

fn relationship(id: &str, kind: &str, target: &str) -> String {
    format!(r#"<Relationship Id="{id}" Type="{REL_BASE}/{kind}" Target="{target}"/>"#)
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(r#"{XML_DECL}<Relationships xmlns="{NS_RELS}">"#);
    for (id, kind, target) in rels {
        xml.push_str(&relationship(id, kind, target));
    }
    xml.push_str("</Relationships>");
    xml
}

const EMPTY_SP_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#;

fn slide_master_xml() -> String {
    format!(
        r#"{XML_DECL}<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{EMPTY_SP_TREE}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn slide_layout_xml() -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="blank" preserve="1"><p:cSld name="Blank">{EMPTY_SP_TREE}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

/// Font size in hundredths of a point
fn font_size(paragraph: &Paragraph) -> u32 {
    match paragraph.heading {
        Some(1) => 3600,
        Some(2) => 2800,
        Some(_) => 2200,
        None => 1800,
    }
}

fn slide_xml(paragraphs: &[Paragraph], cx: i64, cy: i64) -> String {
    let margin = (cx.min(cy) / 8).min(457_200);
    let name = html::first_heading(paragraphs)
        .map(|p| p.text.as_str())
        .unwrap_or("Text");

    let mut body = String::new();
    if paragraphs.is_empty() {
        body.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }
    for paragraph in paragraphs {
        let bold = if paragraph.is_heading() { r#" b="1""# } else { "" };
        body.push_str(&format!(
            r#"<a:p><a:r><a:rPr lang="en-US" sz="{}"{} dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
            font_size(paragraph),
            bold,
            escape(paragraph.text.as_str())
        ));
    }

    format!(
        r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr><p:sp><p:nvSpPr><p:cNvPr id="2" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{margin}" y="{margin}"/><a:ext cx="{w}" cy="{h}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody></p:sp></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        name = escape(name),
        margin = margin,
        w = cx - 2 * margin,
        h = cy - 2 * margin,
        body = body
    )
}

const THEME_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;
