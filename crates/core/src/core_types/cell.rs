//! Landscape cell: vegetation, biomass and burn state

use serde::{Deserialize, Serialize};

/// Vegetation covering a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VegetationType {
    /// Savanna grass layer, the only fuel the spread model burns
    #[default]
    Grass,
    /// Bare ground, rock, water or anything else that cannot carry fire
    NonFlammable,
}

impl VegetationType {
    /// Integer code used in map outputs (`0` grass, `1` non-flammable)
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            VegetationType::Grass => 0,
            VegetationType::NonFlammable => 1,
        }
    }

    /// Whether fire can enter a cell of this type
    #[must_use]
    pub const fn is_flammable(self) -> bool {
        matches!(self, VegetationType::Grass)
    }
}

/// Burn state of a cell
///
/// The only legal transitions are `Unburned → Burning → BurnedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unburned,
    Burning,
    /// Terminal
    BurnedOut,
}

impl CellState {
    /// Integer code used in burn maps (`0`, `1`, `2`)
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            CellState::Unburned => 0,
            CellState::Burning => 1,
            CellState::BurnedOut => 2,
        }
    }

    /// Whether `next` is a legal successor of this state
    #[must_use]
    pub const fn can_transition_to(self, next: CellState) -> bool {
        matches!(
            (self, next),
            (CellState::Unburned, CellState::Burning) | (CellState::Burning, CellState::BurnedOut)
        )
    }
}

/// One grid cell of the landscape
///
/// Biomass values are in g/m². They are set while the landscape is built and
/// never touched by the spread engine, which only moves `state` forward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub vegetation: VegetationType,
    /// Live (green) grass biomass (g/m²)
    pub live_biomass: f32,
    /// Dead (cured) grass biomass (g/m²)
    pub dead_biomass: f32,
    pub state: CellState,
}

impl Cell {
    /// Unburned grass cell with the given biomass
    #[must_use]
    pub fn grass(live_biomass: f32, dead_biomass: f32) -> Self {
        Cell {
            vegetation: VegetationType::Grass,
            live_biomass,
            dead_biomass,
            state: CellState::Unburned,
        }
    }

    /// Unburned cell that cannot carry fire
    #[must_use]
    pub fn non_flammable() -> Self {
        Cell {
            vegetation: VegetationType::NonFlammable,
            live_biomass: 0.0,
            dead_biomass: 0.0,
            state: CellState::Unburned,
        }
    }

    /// Total fuel load (live + dead, g/m²)
    #[inline]
    #[must_use]
    pub fn fuel_load(&self) -> f32 {
        self.live_biomass + self.dead_biomass
    }

    /// Move the cell to `next`, asserting the transition is legal
    #[inline]
    pub(crate) fn transition(&mut self, next: CellState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal cell state transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }
}
