// ABOUTME: HTML text extraction for the slidedeck application
// ABOUTME: Pulls the visible text of a slide fragment out as a list of paragraphs

use std::borrow::Cow;

/// Elements whose content is never visible text
const SKIPPED_ELEMENTS: &[&str] = &[
    "head", "noscript", "script", "style", "svg", "template", "title",
];

/// Elements that start a new paragraph when opened or closed
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// One paragraph of visible slide text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    /// Heading level 1-6, `None` for body text
    pub heading: Option<u8>,
}

impl Paragraph {
    pub fn is_heading(&self) -> bool {
        self.heading.is_some()
    }
}

struct Tag<'a> {
    name: Cow<'a, str>,
    closing: bool,
    self_closing: bool,
}

impl<'a> Tag<'a> {
    /// Parse the inside of `<...>`; `None` for doctypes and other declarations
    fn parse(inner: &'a str) -> Option<Self> {
        let (closing, body) = match inner.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, inner),
        };
        let end = body
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(body.len());
        let raw_name = &body[..end];
        if raw_name.is_empty() || !raw_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let name = if raw_name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(raw_name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(raw_name)
        };
        Some(Self {
            name,
            closing,
            self_closing: inner.trim_end().ends_with('/'),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn heading_level(&self) -> Option<u8> {
        match self.name() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ParagraphBuilder {
    text: String,
    heading: Option<u8>,
    pending_space: bool,
}

impl ParagraphBuilder {
    fn push_text(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.pending_space = !self.text.is_empty();
            } else if !c.is_control() && is_xml_char(c) {
                if self.pending_space {
                    self.text.push(' ');
                    self.pending_space = false;
                }
                self.text.push(c);
            }
        }
    }

    fn flush(&mut self, out: &mut Vec<Paragraph>) {
        let builder = std::mem::take(self);
        if !builder.text.is_empty() {
            out.push(Paragraph {
                text: builder.text,
                heading: builder.heading,
            });
        }
    }
}

/// Extract the visible text of an HTML fragment as paragraphs.
///
/// This is not an HTML parser: tags are dropped, block-level elements break
/// paragraphs, and whitespace is collapsed the way a browser would.
pub fn extract_paragraphs(html: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current = ParagraphBuilder::default();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map(|i| &after[i + 3..]).unwrap_or("");
            continue;
        }

        if starts_markup(rest) {
            let Some(end) = rest.find('>') else {
                // Unterminated tag, nothing visible follows
                break;
            };
            let inner = &rest[1..end];
            rest = &rest[end + 1..];

            let Some(tag) = Tag::parse(inner) else {
                continue;
            };

            if !tag.closing && !tag.self_closing && SKIPPED_ELEMENTS.contains(&tag.name()) {
                rest = skip_element(rest, tag.name());
                continue;
            }

            if BLOCK_ELEMENTS.contains(&tag.name()) {
                current.flush(&mut paragraphs);
                if !tag.closing {
                    current.heading = tag.heading_level();
                }
            }
            continue;
        }

        // A '<' that does not open markup is plain text
        let skip = usize::from(rest.starts_with('<'));
        let next = rest[skip..]
            .find('<')
            .map(|i| i + skip)
            .unwrap_or(rest.len());
        current.push_text(&decode_entities(&rest[..next]));
        rest = &rest[next..];
    }

    current.flush(&mut paragraphs);
    paragraphs
}

/// First heading among extracted paragraphs
pub fn first_heading(paragraphs: &[Paragraph]) -> Option<&Paragraph> {
    paragraphs.iter().find(|p| p.is_heading())
}

/// Characters allowed by the XML 1.0 `Char` production
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drop characters XML 1.0 cannot carry
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn starts_markup(text: &str) -> bool {
    let mut chars = text.chars();
    if chars.next() != Some('<') {
        return false;
    }
    matches!(
        chars.next(),
        Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!' || c == '?'
    )
}

/// Skip past the closing tag of `name`, or to the end if it is never closed
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let bytes = rest.as_bytes();
    let mut from = 0;
    while let Some(offset) = rest[from..].find("</") {
        let start = from + offset;
        let name_end = start + 2 + name.len();
        let is_match = bytes
            .get(start + 2..name_end)
            .map_or(false, |candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
        if is_match {
            return match rest[start..].find('>') {
                Some(end) => &rest[start + end + 1..],
                None => "",
            };
        }
        from = start + 2;
    }
    ""
}

/// Decode character references. Unknown names are left as they are.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&after[..semi]).map(|c| (semi, c)));
        match decoded {
            Some((semi, c)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }

    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "bull" => '\u{2022}',
        "middot" => '\u{00B7}',
        "times" => '\u{00D7}',
        "deg" => '\u{00B0}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "larr" => '\u{2190}',
        "rarr" => '\u{2192}',
        "uarr" => '\u{2191}',
        "darr" => '\u{2193}',
        "check" => '\u{2713}',
        _ => return None,
    })
}
