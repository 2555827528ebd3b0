//! File formats: parameter files, ASCII grids and run output

pub mod ascii_grid;
pub mod output;
pub mod params;

pub use ascii_grid::{AsciiGrid, AsciiGridHeader, NODATA_VALUE};
pub use params::ParameterRecords;
