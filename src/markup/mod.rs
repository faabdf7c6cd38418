//! Proof markup: math delimiters and headings.
//!
//! Proof content is plain text with three recognized forms:
//! - `$$ ... $$` - display (block) math
//! - `$ ... $` - inline math, looked for only outside block math
//! - `## Title` at the start of a line - a section heading; `\r`, U+2028 and
//!   U+2029 end and start lines here too
//!
//! Everything else is literal text, with newlines turned into line breaks.
//! There is no escape for a literal `$`; an unmatched delimiter inside text
//! stays text, while a matched pair always opens math.

mod typeset;

pub use typeset::{MathError, MathMode, Typesetter, UnicodeTypesetter};

/// A renderable piece of proof content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Heading(String),
    LineBreak,
    InlineMath(String),
    BlockMath(String),
}

impl Segment {
    /// Web form of the segment: heading and line break substitutions only,
    /// no sanitization of the text itself.
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Heading(title) => format!("<h2 class=\"proof-heading\">{title}</h2>"),
            Self::LineBreak => "<br/>".to_string(),
            Self::InlineMath(expr) => format!("<span class=\"math-inline\">{expr}</span>"),
            Self::BlockMath(expr) => format!("<div class=\"math-block\">{expr}</div>"),
        }
    }
}

/// Split content into segments.
///
/// Block math is extracted first; inline math and headings are only looked
/// for in what remains. Both delimiter scans pair each opening marker with
/// the nearest closing one.
pub fn render(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for piece in split_delimited(content, "$$") {
        match piece {
            Piece::Math(expr) => segments.push(Segment::BlockMath(expr.to_string())),
            Piece::Plain(text) => push_inline(&mut segments, text),
        }
    }
    segments
}

/// Concatenated web form of [`render`].
pub fn render_html(content: &str) -> String {
    render(content).iter().map(Segment::to_html).collect()
}

/// Typeset segments into plain terminal text.
///
/// The first math error aborts rendering.
pub fn render_plain(segments: &[Segment], typesetter: &impl Typesetter) -> Result<String, MathError> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Heading(title) => {
                out.push_str("\u{258c} ");
                out.push_str(title);
            }
            Segment::LineBreak => out.push('\n'),
            Segment::InlineMath(expr) => out.push_str(&typesetter.typeset(expr, MathMode::Inline)?),
            Segment::BlockMath(expr) => {
                let typeset = typesetter.typeset(expr, MathMode::Block)?;
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                for line in typeset.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
    }
    Ok(out)
}

enum Piece<'a> {
    Plain(&'a str),
    Math(&'a str),
}

/// Pair `delim` markers left to right, each opener with the nearest closer.
/// An opener without a closer leaves the rest of the input as plain text,
/// unless that rest both starts and ends with `delim` (`$`, `$$`, `$$$`):
/// it then counts as an empty math piece.
fn split_delimited<'a>(text: &'a str, delim: &str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(delim) {
        let body_start = open + delim.len();
        let Some(close) = rest[body_start..].find(delim) else {
            break;
        };
        if open > 0 {
            pieces.push(Piece::Plain(&rest[..open]));
        }
        pieces.push(Piece::Math(&rest[body_start..body_start + close]));
        rest = &rest[body_start + close + delim.len()..];
    }

    if rest.starts_with(delim) && rest.ends_with(delim) {
        pieces.push(Piece::Math(""));
    } else if !rest.is_empty() {
        pieces.push(Piece::Plain(rest));
    }
    pieces
}

fn push_inline(segments: &mut Vec<Segment>, text: &str) {
    for piece in split_delimited(text, "$") {
        match piece {
            Piece::Math(expr) => segments.push(Segment::InlineMath(expr.to_string())),
            Piece::Plain(text) => push_text(segments, text),
        }
    }
}

/// Characters that end a line for heading detection without producing a
/// line break of their own.
const LINE_TERMINATORS: [char; 3] = ['\r', '\u{2028}', '\u{2029}'];

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            segments.push(Segment::LineBreak);
        }
        push_line(segments, line);
    }
}

/// A heading title stops at the first terminator, which stays as text.
fn push_line(segments: &mut Vec<Segment>, line: &str) {
    let mut text = String::new();
    let mut rest = line;
    loop {
        let end = rest.find(LINE_TERMINATORS).unwrap_or(rest.len());
        let (row, tail) = rest.split_at(end);
        if let Some(title) = heading(row) {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Heading(title.to_string()));
        } else {
            text.push_str(row);
        }

        let mut chars = tail.chars();
        let Some(terminator) = chars.next() else {
            break;
        };
        text.push(terminator);
        rest = chars.as_str();
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
}

/// `## ` followed by at least one character.
fn heading(row: &str) -> Option<&str> {
    row.strip_prefix("## ").filter(|title| !title.is_empty())
}
