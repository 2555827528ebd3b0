//! Raster Huygens fire spread
//!
//! Every burning cell carries a [`BurningCellFront`] that grows from the vertex
//! the fire entered at toward the cell's other three corners, at the
//! directional rate of spread of the fire ellipse. A front reaching a corner
//! turns that vertex into a point ignition source which may ignite the up to
//! four cells sharing it. Each step runs three passes:
//!
//! 1. **Propagation**: advance every open slot and collect point sources.
//! 2. **Burn-out**: retire cells whose corners are all reached or whose fire
//!    has become too weak to sustain itself.
//! 3. **Ignition**: try to ignite the neighbours of every point source. New
//!    fronts start with the part of the step left after the source arrived.

use super::config::IgnitionPolicy;
use super::front::{BurningCellFront, PointIgnitionSource};
use crate::core_types::{CellState, VertexCorner, WeatherSnapshot, SLOTS_PER_CELL};
use crate::grid::Landscape;
use crate::physics::{
    cell_moisture, directional_rate_of_spread, fireline_intensity, initial_ignition_probability,
    secondary_ignition_probability, FuelConditions,
};
use rand::Rng;
use std::f32::consts::SQRT_2;
use tracing::{debug, info};

/// Mean fireline intensity at or below which a cell's fire goes out (kJ/s/m)
pub const SELF_EXTINCTION_INTENSITY: f32 = 20.0;

/// Counts of what happened during one [`FireSpreadEngine::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Vertices reached by a front this step
    pub point_sources: usize,
    /// Cells ignited by point sources
    pub ignited: usize,
    /// Cells that burned out
    pub burned_out: usize,
}

/// Owner of the active fire fronts
#[derive(Debug, Clone, Default)]
pub struct FireSpreadEngine {
    fronts: Vec<BurningCellFront>,
    burning_cells: usize,
    policy: IgnitionPolicy,
    /// Point sources of the last step
    sources: Vec<PointIgnitionSource>,
}

impl FireSpreadEngine {
    /// Engine without fire, seeding under `policy`
    pub fn new(policy: IgnitionPolicy) -> Self {
        FireSpreadEngine {
            fronts: Vec::new(),
            burning_cells: 0,
            policy,
            sources: Vec::new(),
        }
    }

    /// Active fronts, one per burning cell
    pub fn fronts(&self) -> &[BurningCellFront] {
        &self.fronts
    }

    /// Number of burning cells
    pub fn burning_cell_count(&self) -> usize {
        self.burning_cells
    }

    /// Whether no cell is burning
    pub fn is_extinguished(&self) -> bool {
        self.burning_cells == 0
    }

    /// `(x, y, mean fireline intensity)` of every burning cell
    pub fn burning_cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.fronts
            .iter()
            .map(|front| (front.x, front.y, front.mean_intensity))
    }

    /// Vertices reached during the last [`advance`](Self::advance), in the
    /// order their ignitions were tried
    pub fn point_sources(&self) -> &[PointIgnitionSource] {
        &self.sources
    }

    /// Mean of the burning cells' mean intensities, 0 without fire
    pub fn mean_intensity(&self) -> f32 {
        if self.fronts.is_empty() {
            return 0.0;
        }
        let total: f32 = self.fronts.iter().map(|front| front.mean_intensity).sum();
        total / self.fronts.len() as f32
    }

    /// Start a fire at a uniformly random interior vertex
    ///
    /// Clears any previous fire. Returns the number of cells ignited, which
    /// may be zero.
    pub fn ignite_random_vertex<L, R>(
        &mut self,
        landscape: &mut L,
        weather: &WeatherSnapshot,
        rng: &mut R,
    ) -> usize
    where
        L: Landscape + ?Sized,
        R: Rng + ?Sized,
    {
        let u = rng.random_range(1..landscape.width().max(2)) as i32;
        let v = rng.random_range(1..landscape.height().max(2)) as i32;
        let min_fuel = self.policy.random_min_fuel;
        self.ignite_vertex(landscape, weather, (u, v), min_fuel, rng)
    }

    /// Start a fire at vertex `(width / 2, height / 2)`
    ///
    /// Clears any previous fire. Returns the number of cells ignited.
    pub fn ignite_center_vertex<L, R>(
        &mut self,
        landscape: &mut L,
        weather: &WeatherSnapshot,
        rng: &mut R,
    ) -> usize
    where
        L: Landscape + ?Sized,
        R: Rng + ?Sized,
    {
        let u = (landscape.width() / 2) as i32;
        let v = (landscape.height() / 2) as i32;
        let min_fuel = self.policy.centered_min_fuel;
        self.ignite_vertex(landscape, weather, (u, v), min_fuel, rng)
    }

    /// Try to ignite the cells around `vertex` with the initial ignition probability
    ///
    /// Cells that are off the grid, not flammable, already burning or carrying
    /// less than `min_fuel` are skipped without a draw.
    pub fn ignite_vertex<L, R>(
        &mut self,
        landscape: &mut L,
        weather: &WeatherSnapshot,
        vertex: (i32, i32),
        min_fuel: f32,
        rng: &mut R,
    ) -> usize
    where
        L: Landscape + ?Sized,
        R: Rng + ?Sized,
    {
        self.fronts.clear();
        self.sources.clear();
        self.burning_cells = 0;

        let (u, v) = vertex;
        for corner in VertexCorner::ALL {
            let (x, y) = corner.cell_at(u, v);
            if !landscape.contains(x, y) {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            let cell = landscape.cell(x, y);
            if !cell.vegetation.is_flammable()
                || cell.state != CellState::Unburned
                || cell.fuel_load() < min_fuel
            {
                continue;
            }
            let moisture = cell_moisture(cell, weather);
            if rng.random::<f32>() < initial_ignition_probability(moisture) {
                landscape.cell_mut(x, y).transition(CellState::Burning);
                self.fronts.push(BurningCellFront::new(x, y, vertex, corner));
                self.burning_cells += 1;
            }
        }

        info!(
            "Ignition at vertex ({}, {}): {} cells burning",
            u, v, self.burning_cells
        );
        self.burning_cells
    }

    /// Advance the fire by `timestep_seconds`
    pub fn advance<L, R>(
        &mut self,
        landscape: &mut L,
        weather: &WeatherSnapshot,
        timestep_seconds: u32,
        rng: &mut R,
    ) -> StepOutcome
    where
        L: Landscape + ?Sized,
        R: Rng + ?Sized,
    {
        let cell_size = landscape.cell_size();
        let boundary = [cell_size, cell_size * SQRT_2, cell_size];

        let sources = self.propagate(landscape, weather, timestep_seconds as f32, &boundary);
        let burned_out = self.burn_out(landscape);
        let ignited = self.ignite_from_sources(landscape, weather, &sources, &boundary, rng);

        debug_assert_eq!(
            self.burning_cells,
            self.fronts.len(),
            "burning cell counter out of sync with fronts"
        );

        let outcome = StepOutcome {
            point_sources: sources.len(),
            ignited,
            burned_out,
        };
        debug!(
            "Step: {} point sources, {} ignited, {} burned out, {} burning",
            outcome.point_sources, outcome.ignited, outcome.burned_out, self.burning_cells
        );
        self.sources = sources;
        outcome
    }

    /// Propagation pass
    fn propagate<L: Landscape + ?Sized>(
        &mut self,
        landscape: &L,
        weather: &WeatherSnapshot,
        timestep: f32,
        boundary: &[f32; SLOTS_PER_CELL],
    ) -> Vec<PointIgnitionSource> {
        let wind_speed = weather.wind_speed.value();
        let mut sources = Vec::new();

        for front in &mut self.fronts {
            let fuel = FuelConditions::evaluate(landscape.cell(front.x, front.y), weather);
            let mut intensity_sum = 0.0;

            for k in 0..SLOTS_PER_CELL {
                let slot = front.slots()[k];
                let rate = directional_rate_of_spread(
                    wind_speed,
                    weather.wind_direction,
                    fuel.headfire_rate,
                    slot.direction,
                );
                let intensity = fireline_intensity(rate, fuel.available_fuel);
                intensity_sum += intensity;

                if slot.is_complete() {
                    continue;
                }
                let progress = ((rate * timestep) / boundary[k]).max(0.0);
                let raw = progress + slot.burn_status;
                if raw >= 1.0 {
                    let remaining = (((raw - 1.0) * boundary[k]) / rate).round();
                    sources.push(PointIgnitionSource {
                        vertex: front.target_vertex(k),
                        intensity,
                        remaining_seconds: remaining as u32,
                    });
                    front.slots_mut()[k].burn_status = 1.0;
                } else {
                    front.slots_mut()[k].burn_status = raw;
                }
            }

            front.mean_intensity = intensity_sum / SLOTS_PER_CELL as f32;
        }

        sources
    }

    /// Burn-out pass
    fn burn_out<L: Landscape + ?Sized>(&mut self, landscape: &mut L) -> usize {
        let before = self.fronts.len();
        self.fronts.retain(|front| {
            let done = front.total_burn_status() >= SLOTS_PER_CELL as f32
                || front.mean_intensity <= SELF_EXTINCTION_INTENSITY;
            if done {
                landscape
                    .cell_mut(front.x, front.y)
                    .transition(CellState::BurnedOut);
            }
            !done
        });
        let burned_out = before - self.fronts.len();
        self.burning_cells -= burned_out;
        burned_out
    }

    /// Ignition pass
    fn ignite_from_sources<L, R>(
        &mut self,
        landscape: &mut L,
        weather: &WeatherSnapshot,
        sources: &[PointIgnitionSource],
        boundary: &[f32; SLOTS_PER_CELL],
        rng: &mut R,
    ) -> usize
    where
        L: Landscape + ?Sized,
        R: Rng + ?Sized,
    {
        let wind_speed = weather.wind_speed.value();
        let mut ignited = 0;

        for source in sources {
            let (u, v) = source.vertex;
            for corner in VertexCorner::ALL {
                let (x, y) = corner.cell_at(u, v);
                if !landscape.contains(x, y) {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                let cell = landscape.cell(x, y);
                if cell.state != CellState::Unburned || !cell.vegetation.is_flammable() {
                    continue;
                }

                let fuel = FuelConditions::evaluate(cell, weather);
                let probability = secondary_ignition_probability(source.intensity, fuel.moisture);
                // A NaN probability must fail the draw
                if rng.random::<f32>() < probability {
                    landscape.cell_mut(x, y).transition(CellState::Burning);
                    let mut front = BurningCellFront::new(x, y, source.vertex, corner);
                    let remaining = source.remaining_seconds as f32;
                    for (k, slot) in front.slots_mut().iter_mut().enumerate() {
                        let rate = directional_rate_of_spread(
                            wind_speed,
                            weather.wind_direction,
                            fuel.headfire_rate,
                            slot.direction,
                        );
                        slot.burn_status = ((rate * remaining) / boundary[k]).clamp(0.0, 1.0);
                    }
                    self.fronts.push(front);
                    self.burning_cells += 1;
                    ignited += 1;
                }
            }
        }

        ignited
    }
}
