//! Fire fronts inside burning cells and the point ignitions they spawn

use crate::core_types::{Octant, VertexCorner, SLOTS_PER_CELL};

/// One spread direction of a burning cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadSlot {
    /// Share of the distance to the target corner covered so far, `0..=1`
    pub burn_status: f32,
    /// Octant from the source vertex toward the target corner
    pub direction: Octant,
}

impl SpreadSlot {
    /// Whether the front has reached this slot's corner
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.burn_status >= 1.0
    }
}

/// Active fire front inside one burning cell
///
/// The fire entered the cell at `source_vertex` and spreads toward the other
/// three corners. Slot 1 is always the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct BurningCellFront {
    pub x: usize,
    pub y: usize,
    /// Vertex `(u, v)` the cell was ignited from
    pub source_vertex: (i32, i32),
    slots: [SpreadSlot; SLOTS_PER_CELL],
    /// Mean fireline intensity over the three slots in the last step (kJ/s/m)
    pub mean_intensity: f32,
}

impl BurningCellFront {
    /// Front with all slots at zero for the cell at `corner` of `source_vertex`
    pub fn new(x: usize, y: usize, source_vertex: (i32, i32), corner: VertexCorner) -> Self {
        let slots = corner.spread_directions().map(|direction| SpreadSlot {
            burn_status: 0.0,
            direction,
        });
        BurningCellFront {
            x,
            y,
            source_vertex,
            slots,
            mean_intensity: 0.0,
        }
    }

    pub fn slots(&self) -> &[SpreadSlot; SLOTS_PER_CELL] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [SpreadSlot; SLOTS_PER_CELL] {
        &mut self.slots
    }

    /// Sum of the three burn statuses, 3.0 once every corner is reached
    pub fn total_burn_status(&self) -> f32 {
        self.slots.iter().map(|slot| slot.burn_status).sum()
    }

    /// Vertex targeted by slot `index`
    pub fn target_vertex(&self, index: usize) -> (i32, i32) {
        let (du, dv) = self.slots[index].direction.corner_offset();
        (self.source_vertex.0 + du, self.source_vertex.1 + dv)
    }
}

/// A vertex the fire reached during the current step
///
/// Produced by the propagation pass and consumed by the ignition pass of the
/// same step; the engine keeps the last step's sources for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointIgnitionSource {
    pub vertex: (i32, i32),
    /// Fireline intensity of the arriving front (kJ/s/m)
    pub intensity: f32,
    /// Whole seconds of the step left after the front arrived
    pub remaining_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_front_targets_the_other_three_corners() {
        let front = BurningCellFront::new(4, 4, (5, 5), VertexCorner::SouthWest);
        // Cell (4, 4) has corners (4,4) (5,4) (4,5) (5,5); the fire entered at (5,5)
        let targets: Vec<_> = (0..SLOTS_PER_CELL).map(|k| front.target_vertex(k)).collect();
        assert_eq!(targets, vec![(5, 4), (4, 4), (4, 5)]);
        assert_eq!(front.total_burn_status(), 0.0);
        assert!(front.slots().iter().all(|slot| !slot.is_complete()));
    }

    #[test]
    fn diagonal_slot_is_in_the_middle() {
        for corner in VertexCorner::ALL {
            let front = BurningCellFront::new(0, 0, (0, 0), corner);
            assert!(front.slots()[1].direction.is_diagonal());
        }
    }
}
