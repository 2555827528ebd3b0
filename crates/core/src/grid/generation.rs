//! Random savanna landscapes: grass with clustered non-flammable patches

use super::landscape::GridLandscape;
use crate::core_types::{Cell, VegetationType};
use crate::error::ConfigError;
use crate::io::params::ParameterRecords;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Number of lines in a landscape parameter file
pub const LANDSCAPE_PARAMETER_COUNT: usize = 10;

/// Parameters for [`GridLandscape::generate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeParameters {
    pub width: usize,
    pub height: usize,
    /// Cell edge length (m)
    pub cell_size: f32,
    /// Share of grass cells (0-1); a value of 1 disables patch placement
    pub grass_share: f32,
    /// Target share of non-flammable cells (0-1)
    pub non_flammable_share: f32,
    /// Grass fuel load at equilibrium (g/m²)
    pub equilibrium_fuel_load: f32,
    /// Dead share of the grass load (0-1)
    pub degree_of_curing: f32,
    /// Spatial variation of curing. Read for file compatibility; generation
    /// applies uniform curing.
    pub curing_variation: f32,
    /// Probability that a cell inside a patch is non-flammable (0-1)
    pub cluster_density: f32,
    /// Edge length of a square patch (cells)
    pub mean_cluster_size: usize,
}

impl Default for LandscapeParameters {
    fn default() -> Self {
        LandscapeParameters {
            width: 100,
            height: 100,
            cell_size: 30.0,
            grass_share: 1.0,
            non_flammable_share: 0.0,
            equilibrium_fuel_load: 1000.0,
            degree_of_curing: 0.6,
            curing_variation: 0.0,
            cluster_density: 0.5,
            mean_cluster_size: 5,
        }
    }
}

impl LandscapeParameters {
    /// Decode the ten parameter lines
    ///
    /// # Errors
    /// Wrong line count, unparsable values and anything [`LandscapeParameters::validate`] rejects.
    pub fn from_records(records: &ParameterRecords) -> Result<Self, ConfigError> {
        records.expect_lines("landscape parameters", LANDSCAPE_PARAMETER_COUNT)?;
        let parameters = LandscapeParameters {
            width: records.scalar(0, "landscape width")?,
            height: records.scalar(1, "landscape height")?,
            cell_size: records.scalar(2, "cell size")?,
            grass_share: records.scalar(3, "grass share")?,
            non_flammable_share: records.scalar(4, "non-flammable share")?,
            equilibrium_fuel_load: records.scalar(5, "equilibrium grass fuel load")?,
            degree_of_curing: records.scalar(6, "degree of curing")?,
            curing_variation: records.scalar(7, "variation of curing")?,
            cluster_density: records.scalar(8, "cluster density")?,
            mean_cluster_size: records.scalar(9, "mean cluster size")?,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// Read a landscape parameter file
    ///
    /// # Errors
    /// See [`LandscapeParameters::from_records`].
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        Self::from_records(&ParameterRecords::read(path)?)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "landscape size",
                format!("{}x{} has no cells", self.width, self.height),
            ));
        }
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return Err(ConfigError::invalid(
                "cell size",
                format!("must be positive, got {}", self.cell_size),
            ));
        }
        for (name, value) in [
            ("grass share", self.grass_share),
            ("non-flammable share", self.non_flammable_share),
            ("degree of curing", self.degree_of_curing),
            ("cluster density", self.cluster_density),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(
                    name,
                    format!("must lie in [0, 1], got {value}"),
                ));
            }
        }
        if self.equilibrium_fuel_load.is_nan() || self.equilibrium_fuel_load < 0.0 {
            return Err(ConfigError::invalid(
                "equilibrium grass fuel load",
                format!("must not be negative, got {}", self.equilibrium_fuel_load),
            ));
        }
        if self.places_patches() && (self.cluster_density == 0.0 || self.mean_cluster_size == 0) {
            return Err(ConfigError::invalid(
                "cluster density",
                "patches need a positive density and cluster size",
            ));
        }
        Ok(())
    }

    /// Whether generation places non-flammable patches at all
    pub fn places_patches(&self) -> bool {
        self.grass_share < 1.0
    }

    /// Number of square patches needed to reach the non-flammable share
    ///
    /// ```text
    /// n = round(share · cells / (density · size²))
    /// ```
    pub fn cluster_count(&self) -> usize {
        if !self.places_patches() {
            return 0;
        }
        let cells = (self.width * self.height) as f32;
        let patch_area = (self.mean_cluster_size * self.mean_cluster_size) as f32;
        ((self.non_flammable_share * cells) / (self.cluster_density * patch_area)).round() as usize
    }

    /// Grass cell carrying the equilibrium load split by curing
    pub fn grass_cell(&self) -> Cell {
        Cell::grass(
            self.equilibrium_fuel_load * (1.0 - self.degree_of_curing),
            self.equilibrium_fuel_load * self.degree_of_curing,
        )
    }
}

impl GridLandscape {
    /// Generate a landscape from `parameters`
    ///
    /// Every cell starts as grass. When the grass share is below 1, square
    /// patches are centred on random cells; patches wrap around the grid edges.
    /// Each patch cell turns non-flammable with probability `cluster_density`,
    /// failing that with probability `non_flammable_share`. Finally grass cells
    /// get the equilibrium load and non-flammable cells none.
    ///
    /// # Errors
    /// Anything [`LandscapeParameters::validate`] rejects.
    pub fn generate<R: Rng + ?Sized>(
        parameters: &LandscapeParameters,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        parameters.validate()?;
        let (width, height) = (parameters.width, parameters.height);
        let mut vegetation = vec![VegetationType::Grass; width * height];

        let clusters = parameters.cluster_count();
        let size = parameters.mean_cluster_size;
        for _ in 0..clusters {
            let centre_x = rng.random_range(0..width);
            let centre_y = rng.random_range(0..height);
            let xs: Vec<usize> = patch_offsets(size).map(|d| wrap(centre_x, d, width)).collect();
            let ys: Vec<usize> = patch_offsets(size).map(|d| wrap(centre_y, d, height)).collect();
            for &x in &xs {
                for &y in &ys {
                    if rng.random::<f32>() < parameters.cluster_density
                        || rng.random::<f32>() < parameters.non_flammable_share
                    {
                        vegetation[y * width + x] = VegetationType::NonFlammable;
                    }
                }
            }
        }

        let grass = parameters.grass_cell();
        let cells: Vec<Cell> = vegetation
            .into_iter()
            .map(|kind| match kind {
                VegetationType::Grass => grass,
                VegetationType::NonFlammable => Cell::non_flammable(),
            })
            .collect();

        let landscape = GridLandscape::from_cells(width, height, parameters.cell_size, cells)?;
        debug!("Placed {} non-flammable patches of size {}", clusters, size);
        info!(
            "Generated {}x{} landscape ({} flammable cells)",
            width,
            height,
            landscape.count_flammable()
        );
        Ok(landscape)
    }
}

/// Offsets of a patch around its centre: `0, 1, .., size/2 - 1, -(size - size/2), .., -1`
fn patch_offsets(size: usize) -> impl Iterator<Item = i64> {
    let half = size / 2;
    (0..size).map(move |i| {
        if i < half {
            i as i64
        } else {
            i as i64 - size as i64
        }
    })
}

/// Toroidal coordinate
fn wrap(centre: usize, offset: i64, extent: usize) -> usize {
    (centre as i64 + offset).rem_euclid(extent as i64) as usize
}
