//! Stateless decoders for single ASMT value lines.

use crate::error::FormatError;

/// Decode the leading numeric token of a value line.
///
/// Leading indentation is ignored, as is anything after the first token.
/// Non-finite values are rejected.
pub fn read_double(line: &str) -> Result<f64, FormatError> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| FormatError::new("a number", line))?;
    parse_token(token)
}

/// Decode a value line as a string.
///
/// Only the indentation tabs are removed; spaces belong to the value. Values
/// that start with a tab or span lines cannot be written back faithfully.
pub fn read_string(line: &str) -> String {
    line.trim_start_matches('\t').to_string()
}

/// Decode every whitespace-delimited token of a line as a number.
pub fn read_row_of_doubles(line: &str) -> Result<Vec<f64>, FormatError> {
    let row = line
        .split_whitespace()
        .map(parse_token)
        .collect::<Result<Vec<_>, _>>()?;
    if row.is_empty() {
        return Err(FormatError::new("a row of numbers", line));
    }
    Ok(row)
}

/// Decode a row that must hold exactly `N` numbers.
pub fn read_fixed_row<const N: usize>(line: &str) -> Result<[f64; N], FormatError> {
    let row = read_row_of_doubles(line)?;
    <[f64; N]>::try_from(row.as_slice()).map_err(|_| FormatError::new("a row of fixed width", line))
}

/// Number of leading indentation characters (tabs or spaces).
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| *c == '\t' || *c == ' ').count()
}

/// True when `keyword` appears as a whitespace-delimited token of `line`.
pub fn has_keyword(line: &str, keyword: &str) -> bool {
    line.split_whitespace().any(|token| token == keyword)
}

fn parse_token(token: &str) -> Result<f64, FormatError> {
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormatError::new("a finite number", token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_indented_double() {
        assert_eq!(read_double("\t\t\t12.5").unwrap(), 12.5);
        assert_eq!(read_double("-0").unwrap().to_bits(), (-0.0_f64).to_bits());
        assert_eq!(read_double("1e-3 trailing").unwrap(), 1e-3);
    }

    #[test]
    fn rejects_non_numeric_and_empty() {
        assert!(read_double("\t\tpitchRadius").is_err());
        assert!(read_double("").is_err());
        assert!(read_double("\t\t").is_err());
        assert!(read_double("inf").is_err());
        assert!(read_double("NaN").is_err());
    }

    #[test]
    fn string_keeps_inner_and_trailing_spaces() {
        assert_eq!(read_string("\t\t\tJoint 1 "), "Joint 1 ");
        assert_eq!(read_string("\t\t\t /a"), " /a");
        assert_eq!(read_string("\t\t\t"), "");
    }

    #[test]
    fn reads_rows() {
        assert_eq!(
            read_row_of_doubles("\t\t1\t2.5\t-3").unwrap(),
            vec![1.0, 2.5, -3.0]
        );
        assert_eq!(read_fixed_row::<3>("0 0 1").unwrap(), [0.0, 0.0, 1.0]);
        assert!(read_fixed_row::<3>("0 1").is_err());
        assert!(read_row_of_doubles("1 x 3").is_err());
    }

    #[test]
    fn keyword_is_token_match() {
        assert!(has_keyword("\t\tpitchRadius", "pitchRadius"));
        assert!(!has_keyword("\t\tpitchRadiusX", "pitchRadius"));
        assert!(!has_keyword("", "pitchRadius"));
    }

    #[test]
    fn indentation_counts_tabs() {
        assert_eq!(indent_of("\t\tName"), 2);
        assert_eq!(indent_of("Joints"), 0);
    }
}
