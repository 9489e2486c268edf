//! Explicit cursor over the unparsed lines of an ASMT document.
//!
//! Every parse step borrows the cursor mutably and advances it by exactly the
//! lines it consumed. Readers are atomic: on error the cursor has not moved, so
//! a caller can report the failing position and nothing is half-consumed.

use crate::error::{AsmtError, AsmtResult, FormatError};
use crate::read;

/// Saved cursor position, see [`LineCursor::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    /// Non-blank lines with their 1-based line number in the source text.
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Build a cursor over `text`. Empty lines are dropped but line numbers
    /// still refer to the original text. A line holding only indentation is
    /// kept: it is how an empty string value is written.
    pub fn new(text: &'a str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines = lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| (i + 1, line))
            .collect();
        Self { lines, pos: 0 }
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// 1-based source line number of the next unconsumed line.
    ///
    /// At end of input this is one past the last line.
    pub fn line_number(&self) -> usize {
        match self.lines.get(self.pos) {
            Some((n, _)) => *n,
            None => self.lines.last().map_or(1, |(n, _)| n + 1),
        }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.pos + offset).map(|(_, line)| *line)
    }

    fn line_number_at(&self, offset: usize) -> usize {
        self.lines
            .get(self.pos + offset)
            .map_or_else(|| self.line_number(), |(n, _)| *n)
    }

    /// Indentation depth of the next line.
    pub fn peek_indent(&self) -> Option<usize> {
        self.peek().map(read::indent_of)
    }

    /// True when the next line carries `keyword` as a token. Consumes nothing.
    pub fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|line| read::has_keyword(line, keyword))
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0.min(self.lines.len());
    }

    /// Lines consumed since `checkpoint` was taken.
    pub fn consumed_since(&self, checkpoint: Checkpoint) -> usize {
        self.pos.saturating_sub(checkpoint.0)
    }

    /// Consume and return the next line.
    pub fn next_line(&mut self, expected: &'static str) -> AsmtResult<&'a str> {
        let line = self
            .peek()
            .ok_or(AsmtError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(line)
    }

    /// Consume a line that must carry `keyword`.
    pub fn expect_keyword(&mut self, keyword: &'static str) -> AsmtResult<()> {
        self.check_keyword_at(0, keyword)?;
        self.pos += 1;
        Ok(())
    }

    /// Skip every following line indented deeper than `level`.
    /// Returns the number of lines skipped.
    pub fn skip_block(&mut self, level: usize) -> usize {
        let start = self.pos;
        while self.peek_indent().is_some_and(|indent| indent > level) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// `keyword` line followed by a string value line.
    pub fn read_keyword_string(&mut self, keyword: &'static str) -> AsmtResult<String> {
        self.check_keyword_at(0, keyword)?;
        let value = self.value_line(1, keyword)?;
        self.pos += 2;
        Ok(read::read_string(value))
    }

    /// `keyword` line followed by a numeric value line.
    pub fn read_keyword_double(&mut self, keyword: &'static str) -> AsmtResult<f64> {
        self.check_keyword_at(0, keyword)?;
        let value = self.decode_at(1, keyword, read::read_double)?;
        self.pos += 2;
        Ok(value)
    }

    /// `keyword` line followed by `rows` value lines of `N` numbers each.
    pub fn read_keyword_rows<const N: usize>(
        &mut self,
        keyword: &'static str,
        rows: usize,
    ) -> AsmtResult<Vec<[f64; N]>> {
        self.check_keyword_at(0, keyword)?;
        let decoded = (1..=rows)
            .map(|offset| self.decode_at(offset, keyword, read::read_fixed_row::<N>))
            .collect::<AsmtResult<Vec<_>>>()?;
        self.pos += rows + 1;
        Ok(decoded)
    }

    /// Optional parameter: when the next line carries `keyword`, consume it and
    /// the value line after it (two lines); otherwise consume nothing and
    /// return `None`.
    pub fn read_optional_double(&mut self, keyword: &'static str) -> AsmtResult<Option<f64>> {
        if !self.peek_keyword(keyword) {
            return Ok(None);
        }
        let value = self.decode_at(1, keyword, read::read_double)?;
        self.pos += 2;
        Ok(Some(value))
    }

    fn check_keyword_at(&self, offset: usize, keyword: &'static str) -> AsmtResult<()> {
        match self.peek_at(offset) {
            Some(line) if read::has_keyword(line, keyword) => Ok(()),
            Some(line) => Err(AsmtError::MissingKeyword {
                line: self.line_number_at(offset),
                expected: keyword,
                found: line.trim().to_string(),
            }),
            None => Err(AsmtError::UnexpectedEnd { expected: keyword }),
        }
    }

    fn value_line(&self, offset: usize, keyword: &'static str) -> AsmtResult<&'a str> {
        self.peek_at(offset)
            .ok_or(AsmtError::UnexpectedEnd { expected: keyword })
    }

    fn decode_at<T>(
        &self,
        offset: usize,
        keyword: &'static str,
        decode: impl Fn(&str) -> Result<T, FormatError>,
    ) -> AsmtResult<T> {
        let line = self.value_line(offset, keyword)?;
        decode(line).map_err(|source| AsmtError::Format {
            line: self.line_number_at(offset),
            source,
        })
    }
}
