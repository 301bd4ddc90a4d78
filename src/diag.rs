use log::warn;
use thiserror::Error;

use crate::entities::Occupant;

/// Closed set of simulation invariant violations. These mean a logic
/// bug in movement or spawn bookkeeping, never a reason to stop the
/// frame loop; they are logged and counted, and the tick carries on.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SimWarning {
    #[error("erasing cell ({cell_x}, {cell_y}): expected {expected:?}, found {found:?}")]
    GridEraseMismatch {
        cell_x: u16,
        cell_y: u16,
        expected: Occupant,
        found: Occupant,
    },
    #[error("overwriting {found:?} at cell ({cell_x}, {cell_y}) with {writer:?}")]
    GridOverwrite {
        cell_x: u16,
        cell_y: u16,
        writer: Occupant,
        found: Occupant,
    },
    #[error("projectile pool exhausted, shot dropped")]
    PoolExhausted,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Diagnostics {
    pub grid_conflicts: u32,
    pub dropped_shots: u32,
}

impl Diagnostics {
    pub fn report(&mut self, warning: SimWarning) {
        warn!("{warning}");
        match warning {
            SimWarning::GridEraseMismatch { .. } | SimWarning::GridOverwrite { .. } => {
                self.grid_conflicts += 1;
            }
            SimWarning::PoolExhausted => self.dropped_shots += 1,
        }
    }
}
