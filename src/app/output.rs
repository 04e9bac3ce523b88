//! Result printing
//!
//! Text output prints `path:line`, the matching line, then a blank line. JSON output
//! prints one `MatchEvent` object per line.

use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};

use crate::core::styles::StyleRole;
use crate::scanner::api::{find, MatchEvent};

/// How matches are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown output format '{}' (expected text or json)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Writes match events in the selected format
pub struct MatchWriter<W: Write> {
    out: W,
    format: OutputFormat,
    color: bool,
}

impl<W: Write> MatchWriter<W> {
    pub fn new(out: W, format: OutputFormat, color: bool) -> Self {
        Self { out, format, color }
    }

    pub fn write_match(&mut self, event: &MatchEvent) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(event),
            OutputFormat::Json => self.write_json(event),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_text(&mut self, event: &MatchEvent) -> io::Result<()> {
        let path = event.file_path.display().to_string();
        writeln!(
            self.out,
            "{}{}{}",
            StyleRole::Path.paint(&path, self.color),
            StyleRole::Separator.paint(":", self.color),
            StyleRole::LineNumber.paint(&event.line_number.to_string(), self.color)
        )?;
        writeln!(self.out, "{}", self.highlight(&event.line_text))?;
        writeln!(self.out)
    }

    fn write_json(&mut self, event: &MatchEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)
    }

    // Paint the first literal on the line; other text keeps the Text role
    fn highlight(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match find(text) {
            Some(literal) => format!(
                "{}{}{}",
                StyleRole::Text.paint(&text[..literal.span.start], true),
                StyleRole::Literal.paint(literal.as_str(text), true),
                StyleRole::Text.paint(&text[literal.span.end..], true)
            ),
            None => StyleRole::Text.paint(text, true),
        }
    }
}
