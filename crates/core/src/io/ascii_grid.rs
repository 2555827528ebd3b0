//! ESRI ASCII grids
//!
//! ```text
//! NCOLS 4
//! NROWS 3
//! XLLCORNER 0
//! YLLCORNER 0
//! CELLSIZE 30
//! NODATA_VALUE -9999
//! 2 2 3 0
//! ...
//! ```
//!
//! Header keys are matched case-insensitively and may appear in any order.
//! Only `NCOLS` and `NROWS` are required.

use super::params::parse_value;
use crate::error::ConfigError;
use std::io::{self, Write};
use std::path::Path;

/// Value written for cells without data
pub const NODATA_VALUE: f32 = -9999.0;

/// Header block of an ASCII grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsciiGridHeader {
    pub ncols: usize,
    pub nrows: usize,
    pub xll_corner: f32,
    pub yll_corner: f32,
    /// `None` when the file carries no `CELLSIZE` key
    pub cell_size: Option<f32>,
    pub nodata_value: f32,
}

impl AsciiGridHeader {
    /// Header for a grid of `ncols × nrows` cells anchored at the origin
    #[must_use]
    pub fn new(ncols: usize, nrows: usize, cell_size: f32) -> Self {
        AsciiGridHeader {
            ncols,
            nrows,
            xll_corner: 0.0,
            yll_corner: 0.0,
            cell_size: Some(cell_size),
            nodata_value: NODATA_VALUE,
        }
    }

    /// Write the six header lines
    ///
    /// # Errors
    /// Propagates write failures.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "NCOLS {}", self.ncols)?;
        writeln!(out, "NROWS {}", self.nrows)?;
        writeln!(out, "XLLCORNER {}", self.xll_corner)?;
        writeln!(out, "YLLCORNER {}", self.yll_corner)?;
        writeln!(out, "CELLSIZE {}", self.cell_size.unwrap_or(1.0))?;
        writeln!(out, "NODATA_VALUE {}", self.nodata_value)
    }
}

/// A parsed grid: header plus values in file order
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiGrid {
    pub header: AsciiGridHeader,
    pub values: Vec<f32>,
}

impl AsciiGrid {
    /// Parse grid text
    ///
    /// # Errors
    /// [`ConfigError::GridHeader`] for a missing `NCOLS`/`NROWS` or an unknown
    /// key, [`ConfigError::Parse`] for a non-numeric token and
    /// [`ConfigError::InvalidValue`] when the value count differs from
    /// `NCOLS × NROWS`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut ncols = None;
        let mut nrows = None;
        let mut xll_corner = 0.0;
        let mut yll_corner = 0.0;
        let mut cell_size = None;
        let mut nodata_value = NODATA_VALUE;

        let mut lines = text.lines().peekable();
        while let Some(&line) = lines.peek() {
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                lines.next();
                continue;
            };
            if !key.starts_with(|c: char| c.is_ascii_alphabetic()) {
                break;
            }
            let value = tokens.next().ok_or_else(|| ConfigError::GridHeader {
                message: format!("key '{key}' has no value"),
            })?;
            match key.to_ascii_uppercase().as_str() {
                "NCOLS" => ncols = Some(parse_value::<usize>(value, "NCOLS")?),
                "NROWS" => nrows = Some(parse_value::<usize>(value, "NROWS")?),
                "XLLCORNER" | "XLLCENTER" => xll_corner = parse_value(value, "XLLCORNER")?,
                "YLLCORNER" | "YLLCENTER" => yll_corner = parse_value(value, "YLLCORNER")?,
                "CELLSIZE" => cell_size = Some(parse_value(value, "CELLSIZE")?),
                "NODATA_VALUE" => nodata_value = parse_value(value, "NODATA_VALUE")?,
                other => {
                    return Err(ConfigError::GridHeader {
                        message: format!("unknown key '{other}'"),
                    })
                }
            }
            lines.next();
        }

        let header = AsciiGridHeader {
            ncols: ncols.ok_or_else(|| ConfigError::GridHeader {
                message: "missing NCOLS".into(),
            })?,
            nrows: nrows.ok_or_else(|| ConfigError::GridHeader {
                message: "missing NROWS".into(),
            })?,
            xll_corner,
            yll_corner,
            cell_size,
            nodata_value,
        };

        let values = lines
            .flat_map(str::split_whitespace)
            .map(|token| parse_value::<f32>(token, "grid value"))
            .collect::<Result<Vec<_>, _>>()?;

        let expected = header.ncols * header.nrows;
        if values.len() != expected {
            return Err(ConfigError::invalid(
                "grid values",
                format!(
                    "header declares {}x{} = {expected} cells, found {} values",
                    header.ncols,
                    header.nrows,
                    values.len()
                ),
            ));
        }

        Ok(AsciiGrid { header, values })
    }

    /// Read and parse a grid file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`AsciiGrid::parse`].
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::parse(&text)
    }

    /// Grid dimensions as `(ncols, nrows)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.header.ncols, self.header.nrows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_in_any_case_and_order() {
        let text = "nrows 2\nNCols 3\ncellsize 25\nxllcorner 10\n1 2 3\n4 5 6\n";
        let grid = AsciiGrid::parse(text).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.header.cell_size, Some(25.0));
        assert_eq!(grid.header.xll_corner, 10.0);
        assert_eq!(grid.values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn values_may_wrap_across_lines() {
        let grid = AsciiGrid::parse("NCOLS 2\nNROWS 2\n1 2 3\n4\n").unwrap();
        assert_eq!(grid.values.len(), 4);
        assert_eq!(grid.header.cell_size, None);
    }

    #[test]
    fn missing_dimensions_are_rejected() {
        assert!(matches!(
            AsciiGrid::parse("NROWS 2\n1 2\n"),
            Err(ConfigError::GridHeader { .. })
        ));
    }

    #[test]
    fn value_count_must_match_header() {
        assert!(matches!(
            AsciiGrid::parse("NCOLS 2\nNROWS 2\n1 2 3\n"),
            Err(ConfigError::InvalidValue { name: "grid values", .. })
        ));
        assert!(matches!(
            AsciiGrid::parse("NCOLS 1\nNROWS 1\n1.5.2\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn header_round_trips_through_writer() {
        let mut buffer = Vec::new();
        AsciiGridHeader::new(4, 3, 30.0).write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("NCOLS 4\nNROWS 3\n"));
        assert!(text.contains("NODATA_VALUE -9999\n"));
        let grid = AsciiGrid::parse(&(text + "0 0 0 0\n0 0 0 0\n0 0 0 0\n")).unwrap();
        assert_eq!(grid.header, AsciiGridHeader::new(4, 3, 30.0));
    }
}
