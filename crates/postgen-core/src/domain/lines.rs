//! Line-preserving text buffer.
//!
//! Files are split into lines that keep their terminators, so writing the
//! buffer back reproduces every byte that was not touched. Inserted lines
//! take the terminator of the line they follow, so CRLF files stay CRLF.

const LF: &str = "\n";
const CRLF: &str = "\r\n";

/// Ordered lines of a text file, each carrying its own terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// Split `content` after every `\n`.
    ///
    /// A trailing line without terminator is kept as-is; an empty input
    /// yields an empty buffer.
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last line satisfying `pred`.
    pub fn rposition(&self, pred: impl Fn(&str) -> bool) -> Option<usize> {
        self.lines.iter().rposition(|l| pred(l))
    }

    /// Insert `line` directly after index `idx`, terminating line `idx` first.
    ///
    /// `line` is given without terminator. Returns the index of the inserted
    /// line.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn insert_after(&mut self, idx: usize, line: &str) -> usize {
        let eol = self.terminator_of(idx);
        self.terminate(idx, eol);
        self.lines.insert(idx + 1, format!("{line}{eol}"));
        idx + 1
    }

    /// Append `line` at end-of-file, terminating the current last line first.
    ///
    /// Returns the index of the appended line.
    pub fn append(&mut self, line: &str) -> usize {
        let eol = match self.lines.len().checked_sub(1) {
            Some(last) => {
                let eol = self.terminator_of(last);
                self.terminate(last, eol);
                eol
            }
            None => LF,
        };
        self.lines.push(format!("{line}{eol}"));
        self.lines.len() - 1
    }

    /// Join the lines back into file content.
    pub fn to_content(&self) -> String {
        self.lines.concat()
    }

    /// Terminator of line `idx`; an unterminated line takes the file's first one.
    fn terminator_of(&self, idx: usize) -> &'static str {
        ending(&self.lines[idx])
            .or_else(|| self.lines.iter().find_map(|l| ending(l)))
            .unwrap_or(LF)
    }

    fn terminate(&mut self, idx: usize, eol: &str) {
        let line = &mut self.lines[idx];
        if !line.ends_with('\n') {
            line.push_str(eol);
        }
    }
}

fn ending(line: &str) -> Option<&'static str> {
    if line.ends_with(CRLF) {
        Some(CRLF)
    } else if line.ends_with(LF) {
        Some(LF)
    } else {
        None
    }
}
