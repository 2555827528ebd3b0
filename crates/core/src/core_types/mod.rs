//! Core types: cells, octant geometry, units and weather

pub mod cell;
pub mod octant;
pub mod units;
pub mod weather;

pub use cell::{Cell, CellState, VegetationType};
pub use octant::{Octant, VertexCorner, OCTANT_COUNT, SLOTS_PER_CELL};
pub use units::{Celsius, MetersPerSecond, Percent};
pub use weather::{Month, MonthTable, WeatherSnapshot};
