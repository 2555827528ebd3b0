//! Compass octants and the vertex/corner geometry of the raster fire model
//!
//! Fire spreads inside a cell from the vertex it was ignited at toward the three
//! other corners of the cell. Directions are sampled at 45° steps ("octants").
//! Wind direction and spread direction share the numbering, so the angular
//! offset between them is simply `(wind - spread) × 45°`.
//!
//! ```text
//!   0(NW)  1(N)  2(NE)
//!      \    |    /
//!   7(W) — vertex — 3(E)
//!      /    |    \
//!   6(SW)  5(S)  4(SE)
//! ```
//!
//! Vertex `(u, v)` is the lower-left corner of cell `(u, v)`. North is `+v`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of compass octants
pub const OCTANT_COUNT: u8 = 8;

/// Number of spread slots per burning cell (the three corners not holding the source)
pub const SLOTS_PER_CELL: usize = 3;

/// One of eight compass directions at 45° increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Octant(u8);

impl Octant {
    pub const NORTH_WEST: Octant = Octant(0);
    pub const NORTH: Octant = Octant(1);
    pub const NORTH_EAST: Octant = Octant(2);
    pub const EAST: Octant = Octant(3);
    pub const SOUTH_EAST: Octant = Octant(4);
    pub const SOUTH: Octant = Octant(5);
    pub const SOUTH_WEST: Octant = Octant(6);
    pub const WEST: Octant = Octant(7);

    /// Angular width of one octant in radians
    pub const WIDTH_RADIANS: f32 = std::f32::consts::FRAC_PI_4;

    /// Octant from its index, `None` outside `0..8`
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < OCTANT_COUNT {
            Some(Octant(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All octants in index order
    pub fn all() -> impl Iterator<Item = Octant> {
        (0..OCTANT_COUNT).map(Octant)
    }

    /// Vertex offset `(du, dv)` from a cell's source vertex to the corner this octant targets
    #[must_use]
    pub const fn corner_offset(self) -> (i32, i32) {
        match self.0 {
            1 => (0, 1),
            2 => (1, 1),
            3 => (1, 0),
            4 => (1, -1),
            5 => (0, -1),
            6 => (-1, -1),
            7 => (-1, 0),
            _ => (-1, 1),
        }
    }

    /// Whether the target corner lies across the cell diagonal
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.0 % 2 == 0
    }

    /// Signed angle between the wind octant and a spread octant, `(wind - spread) × 45°`
    ///
    /// Not normalised; only ever fed to `sin` and `cos`.
    #[must_use]
    pub fn angular_offset(wind: Octant, spread: Octant) -> f32 {
        let difference = i32::from(wind.0) - i32::from(spread.0);
        difference as f32 * 45.0 * (std::f32::consts::PI / 180.0)
    }
}

impl TryFrom<u8> for Octant {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Octant::from_index(value).ok_or_else(|| format!("octant must be in 0..8, got {value}"))
    }
}

impl From<Octant> for u8 {
    fn from(octant: Octant) -> u8 {
        octant.0
    }
}

impl fmt::Display for Octant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a cell relative to a shared vertex `(u, v)`
///
/// Each corner carries the cell offset from the vertex and the three octants the
/// fire spreads toward once the cell ignites from that vertex. The middle slot is
/// always the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexCorner {
    /// Cell `(u, v)`: the vertex is its south-west corner
    NorthEast,
    /// Cell `(u, v - 1)`: the vertex is its north-west corner
    SouthEast,
    /// Cell `(u - 1, v - 1)`: the vertex is its north-east corner
    SouthWest,
    /// Cell `(u - 1, v)`: the vertex is its south-east corner
    NorthWest,
}

impl VertexCorner {
    /// The four cells around a vertex, in the order ignition is attempted
    pub const ALL: [VertexCorner; 4] = [
        VertexCorner::NorthEast,
        VertexCorner::SouthEast,
        VertexCorner::SouthWest,
        VertexCorner::NorthWest,
    ];

    /// Offset from vertex `(u, v)` to the cell's grid coordinates
    #[must_use]
    pub const fn cell_offset(self) -> (i32, i32) {
        match self {
            VertexCorner::NorthEast => (0, 0),
            VertexCorner::SouthEast => (0, -1),
            VertexCorner::SouthWest => (-1, -1),
            VertexCorner::NorthWest => (-1, 0),
        }
    }

    /// Spread octants of the three slots of a cell ignited from this corner
    #[must_use]
    pub const fn spread_directions(self) -> [Octant; SLOTS_PER_CELL] {
        match self {
            VertexCorner::NorthEast => [Octant::NORTH, Octant::NORTH_EAST, Octant::EAST],
            VertexCorner::SouthEast => [Octant::EAST, Octant::SOUTH_EAST, Octant::SOUTH],
            VertexCorner::SouthWest => [Octant::SOUTH, Octant::SOUTH_WEST, Octant::WEST],
            VertexCorner::NorthWest => [Octant::WEST, Octant::NORTH_WEST, Octant::NORTH],
        }
    }

    /// Grid coordinates of this corner's cell around vertex `(u, v)`
    #[must_use]
    pub const fn cell_at(self, u: i32, v: i32) -> (i32, i32) {
        let (dx, dy) = self.cell_offset();
        (u + dx, v + dy)
    }
}
