//! In-memory landscape and ASCII grid import

use super::Landscape;
use crate::core_types::{Cell, CellState, VegetationType};
use crate::error::ConfigError;
use crate::io::ascii_grid::AsciiGrid;
use std::path::Path;
use tracing::info;

/// Ground-cover grid read by [`GridLandscape::from_directory`]
pub const GROUND_COVER_FILE: &str = "GroundCover.asc";
/// Dead grass biomass grid (g/m²)
pub const DEAD_BIOMASS_FILE: &str = "dead-biomass.asc";
/// Live grass biomass grid (g/m²)
pub const LIVE_BIOMASS_FILE: &str = "live-biomass.asc";

/// Cell size used when the ground-cover grid has no `CELLSIZE` key
pub const DEFAULT_CELL_SIZE: f32 = 30.0;

/// Row-major grid of cells, index `y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct GridLandscape {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl GridLandscape {
    /// Landscape where every cell is a copy of `cell`
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for an empty grid or a non-positive cell size.
    pub fn uniform(
        width: usize,
        height: usize,
        cell_size: f32,
        cell: Cell,
    ) -> Result<Self, ConfigError> {
        Self::from_cells(width, height, cell_size, vec![cell; width * height])
    }

    /// Wrap an existing cell vector
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for an empty grid or a non-positive cell
    /// size, [`ConfigError::DimensionMismatch`] if `cells` is not `width × height` long.
    pub fn from_cells(
        width: usize,
        height: usize,
        cell_size: f32,
        cells: Vec<Cell>,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::invalid(
                "landscape size",
                format!("{width}x{height} has no cells"),
            ));
        }
        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(ConfigError::invalid(
                "cell size",
                format!("must be positive, got {cell_size}"),
            ));
        }
        if cells.len() != width * height {
            return Err(ConfigError::DimensionMismatch {
                what: "cell data",
                expected: (width, height),
                found: (cells.len(), 1),
            });
        }
        Ok(GridLandscape {
            width,
            height,
            cell_size,
            cells,
        })
    }

    /// Build a landscape from ground-cover, dead-biomass and live-biomass grids
    ///
    /// Ground-cover codes 2, 3 and 4 are grass; 0, 1, 5 and 6 cannot burn.
    /// Values are taken in file order, so the `i`-th value is cell
    /// `(i % width, i / width)`.
    ///
    /// # Errors
    /// [`ConfigError::DimensionMismatch`] when the biomass grids differ in
    /// size from the ground cover, [`ConfigError::UnknownGroundCover`] for any
    /// other code.
    pub fn from_ascii_grids(
        ground_cover: &AsciiGrid,
        dead_biomass: &AsciiGrid,
        live_biomass: &AsciiGrid,
    ) -> Result<Self, ConfigError> {
        let dimensions = ground_cover.dimensions();
        for (what, grid) in [("dead biomass grid", dead_biomass), ("live biomass grid", live_biomass)] {
            if grid.dimensions() != dimensions {
                return Err(ConfigError::DimensionMismatch {
                    what,
                    expected: dimensions,
                    found: grid.dimensions(),
                });
            }
        }

        let cells = ground_cover
            .values
            .iter()
            .zip(dead_biomass.values.iter().zip(&live_biomass.values))
            .enumerate()
            .map(|(index, (&code, (&dead, &live)))| {
                Ok(Cell {
                    vegetation: vegetation_from_code(code, index)?,
                    live_biomass: live,
                    dead_biomass: dead,
                    state: CellState::Unburned,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let cell_size = ground_cover.header.cell_size.unwrap_or(DEFAULT_CELL_SIZE);
        Self::from_cells(dimensions.0, dimensions.1, cell_size, cells)
    }

    /// Import [`GROUND_COVER_FILE`], [`DEAD_BIOMASS_FILE`] and [`LIVE_BIOMASS_FILE`] from `directory`
    ///
    /// # Errors
    /// I/O and parse failures of any of the three grids, plus everything
    /// [`GridLandscape::from_ascii_grids`] rejects.
    pub fn from_directory(directory: &Path) -> Result<Self, ConfigError> {
        let ground_cover = AsciiGrid::read(&directory.join(GROUND_COVER_FILE))?;
        let dead_biomass = AsciiGrid::read(&directory.join(DEAD_BIOMASS_FILE))?;
        let live_biomass = AsciiGrid::read(&directory.join(LIVE_BIOMASS_FILE))?;
        let landscape = Self::from_ascii_grids(&ground_cover, &dead_biomass, &live_biomass)?;
        info!(
            "Imported {}x{} landscape from {} (cell size {} m, {} flammable cells)",
            landscape.width,
            landscape.height,
            directory.display(),
            landscape.cell_size,
            landscape.count_flammable()
        );
        Ok(landscape)
    }

    /// All cells in index order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells currently in `state`
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state == state).count()
    }

    /// Number of cells that can carry fire
    pub fn count_flammable(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.vegetation.is_flammable())
            .count()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} landscape",
            self.width,
            self.height
        );
        y * self.width + x
    }
}

impl Landscape for GridLandscape {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn cell(&self, x: usize, y: usize) -> &Cell {
        let index = self.index(x, y);
        &self.cells[index]
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let index = self.index(x, y);
        &mut self.cells[index]
    }
}

fn vegetation_from_code(code: f32, index: usize) -> Result<VegetationType, ConfigError> {
    let integer = code as i32;
    let exact = integer as f32 == code;
    match integer {
        2..=4 if exact => Ok(VegetationType::Grass),
        0 | 1 | 5 | 6 if exact => Ok(VegetationType::NonFlammable),
        _ => Err(ConfigError::UnknownGroundCover {
            code: integer,
            index,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> AsciiGrid {
        AsciiGrid::parse(text).unwrap()
    }

    #[test]
    fn ground_cover_codes_map_to_vegetation() {
        let cover = grid("NCOLS 4\nNROWS 2\nCELLSIZE 25\n0 1 2 3\n4 5 6 2\n");
        let dead = grid("NCOLS 4\nNROWS 2\n600 600 600 600\n600 600 600 600\n");
        let live = grid("NCOLS 4\nNROWS 2\n400 400 400 400\n400 400 400 100\n");
        let landscape = GridLandscape::from_ascii_grids(&cover, &dead, &live).unwrap();

        assert_eq!(landscape.cell_size(), 25.0);
        let flammable: Vec<bool> = landscape
            .cells()
            .iter()
            .map(|cell| cell.vegetation.is_flammable())
            .collect();
        assert_eq!(
            flammable,
            vec![false, false, true, true, true, false, false, true]
        );
        // file order: second line is y = 1
        assert_eq!(landscape.cell(3, 1).live_biomass, 100.0);
        assert_eq!(landscape.count_state(CellState::Unburned), 8);
    }

    #[test]
    fn cell_size_defaults_to_thirty_metres() {
        let cover = grid("NCOLS 1\nNROWS 1\n2\n");
        let biomass = grid("NCOLS 1\nNROWS 1\n300\n");
        let landscape = GridLandscape::from_ascii_grids(&cover, &biomass, &biomass).unwrap();
        assert_eq!(landscape.cell_size(), DEFAULT_CELL_SIZE);
    }

    #[test]
    fn unknown_ground_cover_is_rejected() {
        let cover = grid("NCOLS 2\nNROWS 1\n2 7\n");
        let biomass = grid("NCOLS 2\nNROWS 1\n1 1\n");
        assert!(matches!(
            GridLandscape::from_ascii_grids(&cover, &biomass, &biomass),
            Err(ConfigError::UnknownGroundCover { code: 7, index: 1 })
        ));
        let fractional = grid("NCOLS 1\nNROWS 1\n2.5\n");
        let single = grid("NCOLS 1\nNROWS 1\n1\n");
        assert!(GridLandscape::from_ascii_grids(&fractional, &single, &single).is_err());
    }

    #[test]
    fn biomass_grids_must_match_ground_cover() {
        let cover = grid("NCOLS 2\nNROWS 2\n2 2\n2 2\n");
        let dead = grid("NCOLS 2\nNROWS 1\n1 1\n");
        let live = grid("NCOLS 2\nNROWS 2\n1 1\n1 1\n");
        assert!(matches!(
            GridLandscape::from_ascii_grids(&cover, &dead, &live),
            Err(ConfigError::DimensionMismatch {
                what: "dead biomass grid",
                expected: (2, 2),
                found: (2, 1),
            })
        ));
    }

    #[test]
    fn contains_checks_signed_bounds() {
        let landscape = GridLandscape::uniform(3, 2, 30.0, Cell::grass(1.0, 1.0)).unwrap();
        assert!(landscape.contains(0, 0));
        assert!(landscape.contains(2, 1));
        assert!(!landscape.contains(3, 1));
        assert!(!landscape.contains(-1, 0));
        assert!(!landscape.contains(0, 2));
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(GridLandscape::uniform(0, 5, 30.0, Cell::default()).is_err());
        assert!(GridLandscape::uniform(5, 5, 0.0, Cell::default()).is_err());
        assert!(GridLandscape::uniform(5, 5, f32::NAN, Cell::default()).is_err());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_access_panics() {
        let landscape = GridLandscape::uniform(2, 2, 30.0, Cell::default()).unwrap();
        let _ = landscape.cell(2, 0);
    }
}
