//! Line-oriented Markdown renderer for generated drafts and reports.
//!
//! Understands a deliberately small subset: `#`/`##`/`###` headings, `*`/`-` bullets,
//! `N.` ordered items, and `**bold**` spans. Every physical line becomes exactly one
//! [`DisplayBlock`]; there is no cross-line state, so lists are never grouped and
//! paragraphs are never merged. Anything unrecognized degrades to a paragraph.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `N.` followed by one whitespace character. ASCII digits only. The item text stops at the
/// first line terminator (`\r`, U+2028, U+2029); NEL is not whitespace here.
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+\.)(?:[\s&&[^\x{85}]]|\x{FEFF})([^\r\n\x{2028}\x{2029}]*)")
        .expect("ordered item pattern compiles")
});

/// Shortest `**...**` span that does not cross a line terminator.
static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*[^\r\n\x{2028}\x{2029}]*?\*\*").expect("bold span pattern compiles")
});

/// One piece of inline text inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineSegment {
    Plain(String),
    Bold(String),
}

impl InlineSegment {
    pub fn text(&self) -> &str {
        match self {
            InlineSegment::Plain(s) | InlineSegment::Bold(s) => s,
        }
    }
}

/// Ordered plain/bold segments of one block.
pub type InlineRun = Vec<InlineSegment>;

/// Renderer output unit; one per input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    /// `level` is always 1, 2 or 3.
    Heading { level: u8, text: InlineRun },
    BulletItem { text: InlineRun },
    /// `ordinal` is the matched token verbatim, e.g. `"12."`.
    OrderedItem { ordinal: String, text: InlineRun },
    Paragraph { text: InlineRun },
    Blank,
}

impl DisplayBlock {
    /// Inline run of the block, `None` for [`DisplayBlock::Blank`].
    pub fn inline(&self) -> Option<&[InlineSegment]> {
        match self {
            DisplayBlock::Heading { text, .. }
            | DisplayBlock::BulletItem { text }
            | DisplayBlock::OrderedItem { text, .. }
            | DisplayBlock::Paragraph { text } => Some(text),
            DisplayBlock::Blank => None,
        }
    }

    /// Text of the block with emphasis flattened away.
    pub fn plain_text(&self) -> String {
        self.inline().map(flatten).unwrap_or_default()
    }
}

/// Concatenates segment text, dropping the bold/plain distinction.
pub fn flatten(run: &[InlineSegment]) -> String {
    run.iter().map(InlineSegment::text).collect()
}

/// Renderer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Recognize `# ` as a level-1 heading. When off such lines are paragraphs.
    pub level_one_headings: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            level_one_headings: true,
        }
    }
}

/// Renders `content` with the full syntax (level-1 headings enabled).
pub fn render(content: &str) -> Vec<DisplayBlock> {
    render_with(content, RenderOptions::default())
}

/// Renders `content`, one block per `\n`-separated line. Never fails.
pub fn render_with(content: &str, options: RenderOptions) -> Vec<DisplayBlock> {
    content
        .split('\n')
        .map(|line| render_line(line, options))
        .collect()
}

fn render_line(line: &str, options: RenderOptions) -> DisplayBlock {
    let trimmed = trim_line(line);
    if trimmed.is_empty() {
        return DisplayBlock::Blank;
    }

    if let Some(rest) = trimmed.strip_prefix("### ") {
        return heading(3, rest);
    }
    if let Some(rest) = trimmed.strip_prefix("## ") {
        return heading(2, rest);
    }
    if options.level_one_headings {
        if let Some(rest) = trimmed.strip_prefix("# ") {
            return heading(1, rest);
        }
    }

    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return DisplayBlock::BulletItem {
            text: parse_inline(rest),
        };
    }

    if let Some(caps) = ORDERED_ITEM.captures(trimmed) {
        let ordinal = caps.get(1).map_or("", |m| m.as_str());
        let remainder = caps.get(2).map_or("", |m| m.as_str());
        return DisplayBlock::OrderedItem {
            ordinal: ordinal.to_string(),
            text: parse_inline(remainder),
        };
    }

    DisplayBlock::Paragraph {
        text: parse_inline(trimmed),
    }
}

fn heading(level: u8, rest: &str) -> DisplayBlock {
    DisplayBlock::Heading {
        level,
        text: parse_inline(rest),
    }
}

/// Whitespace trim that also strips a stray byte-order mark. NEL (U+0085) is kept.
fn trim_line(line: &str) -> &str {
    line.trim_matches(is_trim_char)
}

fn is_trim_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Splits `text` into plain and bold segments. Empty plain segments are dropped;
/// an unmatched `**` stays in the plain text.
pub fn parse_inline(text: &str) -> InlineRun {
    let mut run = Vec::new();
    let mut cursor = 0;
    for m in BOLD_SPAN.find_iter(text) {
        push_plain(&mut run, &text[cursor..m.start()]);
        let span = m.as_str();
        run.push(InlineSegment::Bold(span[2..span.len() - 2].to_string()));
        cursor = m.end();
    }
    push_plain(&mut run, &text[cursor..]);
    run
}

fn push_plain(run: &mut InlineRun, text: &str) {
    if !text.is_empty() {
        run.push(InlineSegment::Plain(text.to_string()));
    }
}
