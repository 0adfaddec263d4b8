//! Runner-script templates
//!
//! A runner template is the engine-specific bootstrap that wraps a program, catches
//! whatever it throws and prints the result line. Templates carry three named slots:
//!
//! - `#{source}` - the program text, verbatim
//! - `#{encoded_source}` - the program wrapped in an IIFE, non-ASCII escaped, as a JSON string
//! - `#{json2_source}` - a JSON polyfill for engines without a native `JSON` object
//!
//! The template is split into text and slot segments once, so rendering never rescans
//! substituted text and a program containing `#{source}` is inserted as-is.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::LazyLock;

/// Regex pattern matching the slot tokens understood by [`RunnerTemplate`].
pub const SLOT_PATTERN: &str = r"#\{(source|encoded_source|json2_source)\}";

static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLOT_PATTERN).expect("valid regex"));

/// JSON encode/decode fragment injected through `#{json2_source}`.
pub const JSON2_SOURCE: &str = include_str!("runtime/runners/json2.js");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Source,
    EncodedSource,
    Json2Source,
}

impl Slot {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "source" => Some(Slot::Source),
            "encoded_source" => Some(Slot::EncodedSource),
            "json2_source" => Some(Slot::Json2Source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed runner template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerTemplate {
    segments: Vec<Segment>,
}

impl RunnerTemplate {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in SLOT_RE.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(slot) = Slot::from_name(name.as_str()) else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(template[last..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(slot));
            last = whole.end();
        }
        if last < template.len() {
            segments.push(Segment::Text(template[last..].to_string()));
        }

        Self { segments }
    }

    /// Slots present in the template, in order of appearance
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(slot) => Some(*slot),
            Segment::Text(_) => None,
        })
    }

    /// Fill every slot with `source` and produce the script to run.
    pub fn render(&self, source: &str) -> String {
        let mut encoded = None;
        let mut out = String::with_capacity(source.len() * 2);

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(Slot::Source) => out.push_str(source),
                Segment::Slot(Slot::EncodedSource) => {
                    out.push_str(encoded.get_or_insert_with(|| encode_source(source)))
                }
                Segment::Slot(Slot::Json2Source) => out.push_str(JSON2_SOURCE),
            }
        }
        out
    }
}

impl From<&str> for RunnerTemplate {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

/// `(function(){ <source> })()` as a JSON string literal, ASCII only.
fn encode_source(source: &str) -> String {
    let wrapped = format!("(function(){{ {} }})()", encode_unicode_codepoints(source));
    serde_json::Value::String(wrapped).to_string()
}

/// Replace every character above U+007F with `\uXXXX` escapes (UTF-16 code units).
pub fn encode_unicode_codepoints(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut units = [0u16; 2];
    for ch in input.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}
