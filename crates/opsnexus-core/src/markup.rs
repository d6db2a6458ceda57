//! HTML emitter for rendered display blocks.
//!
//! Produces a self-contained fragment the dashboard page drops into a result panel.
//! All text is escaped; the theme only changes class names.

use crate::markdown::{DisplayBlock, InlineSegment};
use serde::{Deserialize, Serialize};

/// Colour scheme of a result panel. The analytics report uses the dark one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn class(self) -> &'static str {
        match self {
            Theme::Light => "md md-light",
            Theme::Dark => "md md-dark",
        }
    }
}

/// Emits `blocks` as one `<div>` fragment.
pub fn to_html(blocks: &[DisplayBlock], theme: Theme) -> String {
    let mut out = format!(r#"<div class="{}">"#, theme.class());
    for block in blocks {
        write_block(&mut out, block);
    }
    out.push_str("</div>");
    out
}

fn write_block(out: &mut String, block: &DisplayBlock) {
    match block {
        DisplayBlock::Heading { level, text } => {
            out.push_str(&format!(r#"<h{0} class="md-h{0}">"#, level));
            write_inline(out, text);
            out.push_str(&format!("</h{}>", level));
        }
        DisplayBlock::BulletItem { text } => {
            out.push_str(r#"<div class="md-bullet"><span class="md-dot"></span><span>"#);
            write_inline(out, text);
            out.push_str("</span></div>");
        }
        DisplayBlock::OrderedItem { ordinal, text } => {
            out.push_str(r#"<div class="md-ordered"><span class="md-ordinal">"#);
            out.push_str(&html_escape(ordinal));
            out.push_str("</span><span>");
            write_inline(out, text);
            out.push_str("</span></div>");
        }
        DisplayBlock::Paragraph { text } => {
            out.push_str("<p>");
            write_inline(out, text);
            out.push_str("</p>");
        }
        DisplayBlock::Blank => out.push_str(r#"<div class="md-gap"></div>"#),
    }
}

fn write_inline(out: &mut String, run: &[InlineSegment]) {
    for segment in run {
        match segment {
            InlineSegment::Plain(s) => out.push_str(&html_escape(s)),
            InlineSegment::Bold(s) => {
                out.push_str("<strong>");
                out.push_str(&html_escape(s));
                out.push_str("</strong>");
            }
        }
    }
}

/// Escapes text for element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
