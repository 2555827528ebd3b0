//! Comma-separated parameter files
//!
//! One parameter per line, one column per month where a parameter varies
//! through the year. Lines that are empty or start with `#` are skipped, values
//! are trimmed and empty fields are dropped.

use crate::error::ConfigError;
use std::path::Path;
use std::str::FromStr;

const DELIMITER: char = ',';
const COMMENT: char = '#';

/// Parsed parameter file: one record per non-comment line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterRecords {
    records: Vec<Vec<String>>,
}

impl ParameterRecords {
    /// Split parameter text into records
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let records = text
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with(COMMENT))
            .map(|line| {
                line.split(DELIMITER)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .collect();
        ParameterRecords { records }
    }

    /// Read and parse a parameter file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail unless there are exactly `expected` records
    ///
    /// # Errors
    /// Returns [`ConfigError::LineCount`] on a mismatch.
    pub fn expect_lines(&self, what: &'static str, expected: usize) -> Result<(), ConfigError> {
        if self.records.len() == expected {
            Ok(())
        } else {
            Err(ConfigError::LineCount {
                what,
                expected,
                found: self.records.len(),
            })
        }
    }

    /// Fail unless every record has exactly `expected` columns
    ///
    /// # Errors
    /// Returns [`ConfigError::ColumnCount`] naming the first short or long line.
    pub fn expect_columns(&self, what: &'static str, expected: usize) -> Result<(), ConfigError> {
        for (index, record) in self.records.iter().enumerate() {
            if record.len() != expected {
                return Err(ConfigError::ColumnCount {
                    what,
                    line: index + 1,
                    expected,
                    found: record.len(),
                });
            }
        }
        Ok(())
    }

    /// First value of record `line`, parsed as `T`
    ///
    /// # Errors
    /// Returns [`ConfigError::ColumnCount`] for an empty or missing record and
    /// [`ConfigError::Parse`] if the value is not a `T`.
    pub fn scalar<T: FromStr>(&self, line: usize, what: &str) -> Result<T, ConfigError> {
        self.value(line, 0, what)
    }

    /// Value at `column` of record `line`, parsed as `T`
    ///
    /// # Errors
    /// See [`ParameterRecords::scalar`].
    pub fn value<T: FromStr>(
        &self,
        line: usize,
        column: usize,
        what: &str,
    ) -> Result<T, ConfigError> {
        let raw = self
            .records
            .get(line)
            .and_then(|record| record.get(column))
            .ok_or_else(|| ConfigError::ColumnCount {
                what: "parameter record",
                line: line + 1,
                expected: column + 1,
                found: self.records.get(line).map_or(0, Vec::len),
            })?;
        parse_value(raw, what)
    }
}

/// Parse one trimmed token
///
/// # Errors
/// Returns [`ConfigError::Parse`] with `what` describing the value.
pub fn parse_value<T: FromStr>(raw: &str, what: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Parse {
        what: what.to_owned(),
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# landscape\n\n100\n  80 , 90,\n#comment\n0.5,0.25\n";

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let records = ParameterRecords::parse(SAMPLE);
        assert_eq!(records.len(), 3);
        assert_eq!(records.scalar::<i32>(0, "width").unwrap(), 100);
        assert_eq!(records.value::<i32>(1, 1, "height").unwrap(), 90);
        assert_eq!(records.value::<f32>(2, 1, "share").unwrap(), 0.25);
    }

    #[test]
    fn trailing_delimiters_do_not_add_columns() {
        let monthly = ParameterRecords::parse("1,2,\n3, 4 ,\n");
        assert!(monthly.expect_columns("sample", 2).is_ok());
        let records = ParameterRecords::parse(SAMPLE);
        assert!(matches!(
            records.expect_columns("sample", 2),
            Err(ConfigError::ColumnCount { line: 1, found: 1, .. })
        ));
        assert!(matches!(
            records.expect_lines("sample", 4),
            Err(ConfigError::LineCount {
                expected: 4,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn unparsable_value_names_the_parameter() {
        let records = ParameterRecords::parse("abc\n");
        let err = records.scalar::<f32>(0, "cell size").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref what, .. } if what == "cell size"));
    }

    #[test]
    fn missing_column_is_reported() {
        let records = ParameterRecords::parse("1,2\n");
        assert!(matches!(
            records.value::<f32>(0, 5, "x"),
            Err(ConfigError::ColumnCount { line: 1, .. })
        ));
        assert!(matches!(
            records.scalar::<f32>(3, "x"),
            Err(ConfigError::ColumnCount { found: 0, .. })
        ));
    }

    #[test]
    fn reading_a_missing_file_is_an_io_error() {
        let err = ParameterRecords::read(Path::new("/nonexistent/params.csv")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
