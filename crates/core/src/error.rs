//! Configuration and input errors
//!
//! Every failure a caller can trigger with bad input surfaces as a
//! [`ConfigError`] before the spread engine runs. Numeric degeneracy inside the
//! fire model is handled where it occurs and never reaches this type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error raised while reading parameters, grids or run configuration
#[derive(Debug)]
pub enum ConfigError {
    /// A file could not be opened, read or written
    Io { path: PathBuf, source: io::Error },
    /// A parameter file has the wrong number of records
    LineCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A record has the wrong number of columns
    ColumnCount {
        what: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A value could not be parsed as a number
    Parse { what: String, value: String },
    /// ASCII grid header is missing a required key or is malformed
    GridHeader { message: String },
    /// Grid data does not match the declared or expected dimensions
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Ground-cover code outside the known vegetation classes
    UnknownGroundCover { code: i32, index: usize },
    /// Month abbreviation not in `JAN..DEC`
    UnknownMonth(String),
    /// A numeric setting lies outside its valid range
    InvalidValue { name: &'static str, message: String },
    /// Wind-direction probabilities for a month can never select a blowing octant
    UnreachableWindDirection { month: usize },
}

impl ConfigError {
    /// Wrap an I/O error with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-value error
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Cannot access '{}': {source}", path.display())
            }
            ConfigError::LineCount {
                what,
                expected,
                found,
            } => write!(
                f,
                "Invalid {what}: expected {expected} parameter lines, found {found}"
            ),
            ConfigError::ColumnCount {
                what,
                line,
                expected,
                found,
            } => write!(
                f,
                "Invalid {what}: line {line} has {found} values, expected {expected}"
            ),
            ConfigError::Parse { what, value } => {
                write!(f, "Cannot parse {what} from '{value}'")
            }
            ConfigError::GridHeader { message } => write!(f, "Invalid ASCII grid header: {message}"),
            ConfigError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Dimensions of {what} differ: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            ConfigError::UnknownGroundCover { code, index } => {
                write!(f, "Unknown ground cover code {code} at cell {index}")
            }
            ConfigError::UnknownMonth(name) => {
                write!(f, "Unknown month '{name}' (expected JAN..DEC)")
            }
            ConfigError::InvalidValue { name, message } => write!(f, "Invalid {name}: {message}"),
            ConfigError::UnreachableWindDirection { month } => write!(
                f,
                "Wind direction probabilities for month {} never select a non-zero octant",
                month + 1
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_keeps_source_and_path() {
        let err = ConfigError::io(
            "weather.csv",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("weather.csv"));
    }

    #[test]
    fn messages_name_the_offending_input() {
        let err = ConfigError::LineCount {
            what: "landscape parameters",
            expected: 10,
            found: 9,
        };
        assert_eq!(
            err.to_string(),
            "Invalid landscape parameters: expected 10 parameter lines, found 9"
        );
        assert!(ConfigError::UnknownMonth("XYZ".into())
            .to_string()
            .contains("XYZ"));
        assert!(ConfigError::invalid("timestep", "must be positive").source().is_none());
    }
}
