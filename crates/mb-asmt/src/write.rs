//! Indented ASMT output.

use std::fmt::Write as _;

/// Line sink that writes values at an indentation level (one tab per level).
///
/// Doubles use Rust's shortest round-trip formatting, so a value written here
/// and decoded with [`crate::read::read_double`] comes back bit-identical.
#[derive(Debug, Default, Clone)]
pub struct AsmtWriter {
    buf: String,
}

impl AsmtWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_string(&mut self, level: usize, value: &str) {
        self.indent(level);
        self.buf.push_str(value);
        self.buf.push('\n');
    }

    pub fn store_double(&mut self, level: usize, value: f64) {
        self.indent(level);
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{value}");
        self.buf.push('\n');
    }

    pub fn store_row(&mut self, level: usize, values: &[f64]) {
        self.indent(level);
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push('\t');
            }
            let _ = write!(self.buf, "{value}");
        }
        self.buf.push('\n');
    }

    /// `keyword` at `level`, `value` at `level + 1`.
    pub fn store_keyword_string(&mut self, level: usize, keyword: &str, value: &str) {
        self.store_string(level, keyword);
        self.store_string(level + 1, value);
    }

    /// `keyword` at `level`, `value` at `level + 1`.
    pub fn store_keyword_double(&mut self, level: usize, keyword: &str, value: f64) {
        self.store_string(level, keyword);
        self.store_double(level + 1, value);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn indent(&mut self, level: usize) {
        self.buf.extend(std::iter::repeat_n('\t', level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_tabs() {
        let mut w = AsmtWriter::new();
        w.store_string(1, "RackPinionJoint");
        w.store_keyword_double(2, "pitchRadius", 12.5);
        assert_eq!(w.as_str(), "\tRackPinionJoint\n\t\tpitchRadius\n\t\t\t12.5\n");
    }

    #[test]
    fn rows_are_tab_separated() {
        let mut w = AsmtWriter::new();
        w.store_row(0, &[1.0, 0.0, -2.5]);
        assert_eq!(w.into_string(), "1\t0\t-2.5\n");
    }

    #[test]
    fn zero_is_written_plainly() {
        let mut w = AsmtWriter::new();
        w.store_double(0, 0.0);
        assert_eq!(w.as_str(), "0\n");
    }
}
