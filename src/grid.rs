//! Collision-cell occupancy index. Every live entity owns at most one
//! 8x8 cell; every cell references at most one entity. Moves go through
//! [`try_move_by`], which erases the old cell and writes the new one so
//! the invariant survives each accepted axis move.

use crate::config::{
    COLLISION_LOOKUP_X, COLLISION_LOOKUP_Y, COLLISION_SIZE, ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y,
    MAP_HEIGHT, MAP_MARGIN_TILES, MAP_TILE_SIZE, MAP_WIDTH, PLAYER_BOB_SIZE_X, PLAYER_BOB_SIZE_Y,
};
use crate::diag::{Diagnostics, SimWarning};
use crate::entities::{Coord, Occupant};

pub struct CollisionGrid {
    cells: Vec<Option<Occupant>>,
}

impl CollisionGrid {
    pub fn new() -> Self {
        Self {
            cells: vec![None; usize::from(COLLISION_LOOKUP_X) * usize::from(COLLISION_LOOKUP_Y)],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn index(cell_x: u16, cell_y: u16) -> usize {
        usize::from(cell_x) * usize::from(COLLISION_LOOKUP_Y) + usize::from(cell_y)
    }

    pub fn occupant_at_cell(&self, cell_x: u16, cell_y: u16) -> Option<Occupant> {
        if cell_x >= COLLISION_LOOKUP_X || cell_y >= COLLISION_LOOKUP_Y {
            return None;
        }
        self.cells[Self::index(cell_x, cell_y)]
    }

    /// Neighbor-cell probe: looks up the cell containing `(x, y)` offset
    /// by whole cells. Out-of-range lookups (including the wrapped -1
    /// underflow) come back empty.
    pub fn occupant_near(&self, x: u16, add_x: i16, y: u16, add_y: i16) -> Option<Occupant> {
        let cell_x = (x / COLLISION_SIZE).wrapping_add(add_x as u16);
        let cell_y = (y / COLLISION_SIZE).wrapping_add(add_y as u16);
        self.occupant_at_cell(cell_x, cell_y)
    }

    pub fn cell_of(pos: Coord) -> (u16, u16) {
        (pos.x / COLLISION_SIZE, pos.y / COLLISION_SIZE)
    }

    pub fn is_free_at(&self, pos: Coord) -> bool {
        let (cx, cy) = Self::cell_of(pos);
        self.occupant_at_cell(cx, cy).is_none()
    }

    /// Clears the cell under `pos`, warning when someone else was
    /// registered there.
    pub fn erase(&mut self, pos: Coord, expected: Occupant, diag: &mut Diagnostics) {
        let (cx, cy) = Self::cell_of(pos);
        let slot = &mut self.cells[Self::index(cx, cy)];
        if let Some(found) = *slot {
            if found != expected {
                diag.report(SimWarning::GridEraseMismatch {
                    cell_x: cx,
                    cell_y: cy,
                    expected,
                    found,
                });
            }
        }
        *slot = None;
    }

    /// Writes `occupant` into the cell under `pos`, warning when it
    /// stomps a different occupant.
    pub fn write(&mut self, pos: Coord, occupant: Occupant, diag: &mut Diagnostics) {
        let (cx, cy) = Self::cell_of(pos);
        let slot = &mut self.cells[Self::index(cx, cy)];
        if let Some(found) = *slot {
            if found != occupant {
                diag.report(SimWarning::GridOverwrite {
                    cell_x: cx,
                    cell_y: cy,
                    writer: occupant,
                    found,
                });
            }
        }
        *slot = Some(occupant);
    }
}

impl Default for CollisionGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn bob_size(mover: Occupant) -> (u16, u16) {
    match mover {
        Occupant::Player => (PLAYER_BOB_SIZE_X, PLAYER_BOB_SIZE_Y),
        Occupant::Enemy(_) => (ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y),
        Occupant::Pickup => (COLLISION_SIZE, COLLISION_SIZE),
    }
}

/// Coarse overlap test on cell-granularity distances. Deliberately not
/// an exact pixel AABB intersection; gameplay balance depends on this
/// approximation, so it stays.
fn overlaps(candidate: Coord, other: Coord) -> bool {
    let dx = candidate.x as i16 - other.x as i16;
    let dy = candidate.y as i16 - other.y as i16;
    let size = COLLISION_SIZE as i16;
    (-size..=size).contains(&dx) && (-size..=size).contains(&dy)
}

fn blocked_by(mover: Occupant, occupant: Occupant) -> bool {
    if occupant == mover {
        return false;
    }
    // The player walks over pickups to collect them.
    !(mover == Occupant::Player && occupant == Occupant::Pickup)
}

fn sign(delta: i16) -> i16 {
    match delta.cmp(&0) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Axis-independent move attempt: X first, then Y, each axis accepted
/// or rejected on its own. Rejection reasons per axis: crossing the
/// map-margin boundary, or the coarse overlap test against the (up to
/// two) neighbor cells in the direction of travel. Returns whether any
/// axis moved; on success the grid cell has been migrated.
pub fn try_move_by<F>(
    grid: &mut CollisionGrid,
    mover: Occupant,
    pos: &mut Coord,
    delta_x: i16,
    delta_y: i16,
    occupant_pos: F,
    diag: &mut Diagnostics,
) -> bool
where
    F: Fn(Occupant) -> Coord,
{
    let (bob_w, bob_h) = bob_size(mover);
    let mut good_pos = *pos;
    let mut moved = false;

    if delta_x != 0 {
        let new_x = good_pos.x.wrapping_add(delta_x as u16);
        let min_x = MAP_MARGIN_TILES * MAP_TILE_SIZE;
        let max_x = MAP_WIDTH - MAP_MARGIN_TILES * MAP_TILE_SIZE - bob_w;
        let mut colliding = new_x < min_x || new_x > max_x;

        // Corner on the cell row we are in.
        if !colliding {
            if let Some(occupant) = grid.occupant_near(good_pos.x, sign(delta_x), good_pos.y, 0) {
                if blocked_by(mover, occupant) {
                    colliding = overlaps(
                        Coord::new(new_x, good_pos.y),
                        occupant_pos(occupant),
                    );
                }
            }
        }
        // Lower corner, when straddling a cell boundary vertically.
        if !colliding && good_pos.y % COLLISION_SIZE != 0 {
            if let Some(occupant) = grid.occupant_near(good_pos.x, sign(delta_x), good_pos.y, 1) {
                if blocked_by(mover, occupant) {
                    colliding = overlaps(
                        Coord::new(new_x, good_pos.y),
                        occupant_pos(occupant),
                    );
                }
            }
        }

        if !colliding {
            moved = true;
            good_pos.x = new_x;
        }
    }

    if delta_y != 0 {
        let new_y = good_pos.y.wrapping_add(delta_y as u16);
        let min_y = MAP_MARGIN_TILES * MAP_TILE_SIZE;
        let max_y = MAP_HEIGHT - MAP_MARGIN_TILES * MAP_TILE_SIZE - bob_h;
        let mut colliding = new_y < min_y || new_y > max_y;

        if !colliding {
            if let Some(occupant) = grid.occupant_near(good_pos.x, 0, good_pos.y, sign(delta_y)) {
                if blocked_by(mover, occupant) {
                    colliding = overlaps(
                        Coord::new(good_pos.x, new_y),
                        occupant_pos(occupant),
                    );
                }
            }
        }
        // Right corner, when straddling a cell boundary horizontally.
        if !colliding && good_pos.x % COLLISION_SIZE != 0 {
            if let Some(occupant) = grid.occupant_near(good_pos.x, 1, good_pos.y, sign(delta_y)) {
                if blocked_by(mover, occupant) {
                    colliding = overlaps(
                        Coord::new(good_pos.x, new_y),
                        occupant_pos(occupant),
                    );
                }
            }
        }

        if !colliding {
            moved = true;
            good_pos.y = new_y;
        }
    }

    if moved {
        grid.erase(*pos, mover, diag);
        *pos = good_pos;
        grid.write(*pos, mover, diag);
    }

    moved
}
