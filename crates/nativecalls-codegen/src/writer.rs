//! Indentation-tracking line writer.
//!
//! Structure is declared explicitly: callers open and close blocks around
//! nested regions instead of the writer guessing nesting from the text of
//! each line. A file is only complete
//! when every opened level has been closed again.

use serde::{Deserialize, Serialize};

const INDENT: &str = "    ";

/// Line terminator used for generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Structural errors detected by the writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriterError {
    /// A block close without a matching open.
    #[error("indentation popped below zero")]
    Underflow,

    /// Output finished with open levels.
    #[error("output ended with {depth} unclosed indentation level(s)")]
    Unbalanced { depth: usize },
}

/// Accumulates generated text one line at a time.
#[derive(Debug, Default)]
pub struct CodeWriter {
    out: String,
    indent: usize,
    line_ending: LineEnding,
}

impl CodeWriter {
    /// An empty writer at depth zero.
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            line_ending,
        }
    }

    fn push_indent(&mut self) {
        self.indent += 1;
    }

    fn pop_indent(&mut self) -> Result<(), WriterError> {
        self.indent = self.indent.checked_sub(1).ok_or(WriterError::Underflow)?;
        Ok(())
    }

    /// Write one line at the current depth. Empty text yields a bare line break.
    pub fn line(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push_str(self.line_ending.as_str());
        self
    }

    /// Write `{` and nest subsequent lines.
    pub fn open_block(&mut self) -> &mut Self {
        self.line("{");
        self.push_indent();
        self
    }

    /// Leave the current nesting level and write `}`.
    pub fn close_block(&mut self) -> Result<&mut Self, WriterError> {
        self.pop_indent()?;
        Ok(self.line("}"))
    }

    /// Return the accumulated text, failing if any level is still open.
    pub fn finish(self) -> Result<String, WriterError> {
        if self.indent != 0 {
            return Err(WriterError::Unbalanced { depth: self.indent });
        }
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_indent_contents() {
        let mut w = CodeWriter::new(LineEnding::Lf);
        w.line("namespace A").open_block();
        w.line("class B").open_block();
        w.line("int x;");
        w.close_block().unwrap();
        w.close_block().unwrap();
        assert_eq!(
            w.finish().unwrap(),
            "namespace A\n{\n    class B\n    {\n        int x;\n    }\n}\n"
        );
    }

    #[test]
    fn closing_returns_to_outer_depth() {
        let mut w = CodeWriter::new(LineEnding::Lf);
        w.open_block().line("a");
        w.close_block().unwrap().line("b");
        assert_eq!(w.finish().unwrap(), "{\n    a\n}\nb\n");
    }

    #[test]
    fn empty_line_has_no_trailing_spaces() {
        let mut w = CodeWriter::new(LineEnding::Lf);
        w.open_block();
        w.line("");
        w.close_block().unwrap();
        assert_eq!(w.finish().unwrap(), "{\n\n}\n");
    }

    #[test]
    fn crlf_line_endings() {
        let mut w = CodeWriter::new(LineEnding::Crlf);
        w.open_block();
        w.close_block().unwrap();
        assert_eq!(w.finish().unwrap(), "{\r\n}\r\n");
    }

    #[test]
    fn underflow_is_an_error() {
        let mut w = CodeWriter::new(LineEnding::Lf);
        assert_eq!(w.close_block().unwrap_err(), WriterError::Underflow);
        assert_eq!(w.finish().unwrap(), "");
    }

    #[test]
    fn unclosed_block_fails_finish() {
        let mut w = CodeWriter::new(LineEnding::Lf);
        w.open_block().open_block();
        assert_eq!(w.finish().unwrap_err(), WriterError::Unbalanced { depth: 2 });
    }
}
