//! Column layout and word wrapping for help listings.
//!
//! A listing row is `name [padding] [tags] : summary`. All rows of a listing
//! share one summary column derived from the longest name plus tags, and
//! wrapped summaries hang under that column.

use crate::output::HelpWriter;
use std::io::{self, Write};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

pub const FIRST_LINE_PREFIX: &str = " : ";
pub const REQUIRED_TAG: &str = "[Required]";
const INDENT_WIDTH: usize = 4;
const TAB_WIDTH: usize = 8;

pub fn line_len(name: &str, tags_len: usize) -> usize {
    name.chars().count() + tags_len + if tags_len > 0 { 2 } else { 1 }
}

pub fn padding_len(max_len: usize, line_len: usize, has_tags: bool) -> usize {
    let pad = max_len.saturating_sub(line_len);
    if has_tags {
        pad + 1
    } else {
        pad
    }
}

/// Column at which wrapped summary lines continue.
pub fn hanging_indent(max_len: usize, indent: usize) -> usize {
    max_len + indent * INDENT_WIDTH + FIRST_LINE_PREFIX.len() - 1
}

pub fn join_tags(tags: &[&str]) -> String {
    tags.iter()
        .filter(|tag| !tag.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct Row {
    pub name: String,
    pub tags: String,
    pub summary: String,
    line_len: usize,
}

impl Row {
    pub fn new(name: &str, tags: String, summary: &str) -> Self {
        Self {
            line_len: line_len(name, tags.chars().count()),
            name: name.to_string(),
            tags,
            summary: summary.replace('\n', " "),
        }
    }

    pub fn line_len(&self) -> usize {
        self.line_len
    }

    pub fn format(&self, max_len: usize) -> String {
        let padding = padding_len(max_len, self.line_len, !self.tags.is_empty());
        let separator = if self.summary.is_empty() {
            ""
        } else {
            FIRST_LINE_PREFIX
        };
        format!(
            "{}{}{}{}{}",
            self.name,
            " ".repeat(padding),
            self.tags,
            separator,
            self.summary
        )
    }
}

pub fn max_line_len(rows: &[Row]) -> usize {
    rows.iter().map(Row::line_len).max().unwrap_or(0)
}

/// Wrap each `\n` separated paragraph of `text`.
///
/// Tabs are expanded to 8-column stops and lines may break after a hyphen
/// inside a word. The first line of a paragraph is indented by `indent` levels; later lines
/// by `hanging` spaces when given, else by the same indent.
pub fn fill(text: &str, indent: usize, hanging: Option<usize>, width: usize) -> Vec<String> {
    let initial = " ".repeat(indent * INDENT_WIDTH);
    let subsequent = match hanging {
        Some(spaces) => " ".repeat(spaces),
        None => initial.clone(),
    };
    text.split('\n')
        .map(|paragraph| {
            if paragraph.trim().is_empty() {
                return String::new();
            }
            let paragraph = expand_tabs(paragraph);
            let options = Options::new(width)
                .initial_indent(&initial)
                .subsequent_indent(&subsequent)
                .word_separator(WordSeparator::AsciiSpace)
                .word_splitter(WordSplitter::HyphenSplitter)
                .wrap_algorithm(WrapAlgorithm::FirstFit)
                .break_words(true);
            textwrap::fill(&paragraph, options)
        })
        .collect()
}

fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH - column % TAB_WIDTH;
            out.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

pub fn print_indent<W: Write>(
    out: &mut HelpWriter<W>,
    text: &str,
    indent: usize,
    hanging: Option<usize>,
    width: usize,
) -> io::Result<()> {
    for paragraph in fill(text, indent, hanging, width) {
        out.line(&paragraph)?;
    }
    Ok(())
}
