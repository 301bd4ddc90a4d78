use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::{
    COLLISION_LOOKUP_X, COLLISION_LOOKUP_Y, COLLISION_SIZE, ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y,
    HUD_HEIGHT, MAIN_VPORT_HEIGHT, MAIN_VPORT_WIDTH, MAP_HEIGHT, MAP_MARGIN_TILES, MAP_TILES_X,
    MAP_TILES_Y, MAP_TILE_SIZE, MAP_WIDTH, RESPAWN_SLOTS_PER_POSITION,
};
use crate::entities::Coord;
use crate::gfx::Bitmap;

#[derive(Clone, Copy, Debug, Default)]
pub struct Camera {
    pub pos: Coord,
}

fn clamp_u16(value: i32, min: u16, max: u16) -> u16 {
    value.clamp(i32::from(min), i32::from(max)) as u16
}

impl Camera {
    pub fn center_at(&mut self, center_x: u16, center_y: u16) {
        let left = i32::from(center_x) - i32::from(MAIN_VPORT_WIDTH) / 2;
        let top = i32::from(center_y) - i32::from(MAIN_VPORT_HEIGHT - HUD_HEIGHT) / 2;
        self.pos.x = clamp_u16(
            left,
            MAP_MARGIN_TILES * MAP_TILE_SIZE,
            (MAP_TILES_X - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_WIDTH,
        );
        self.pos.y = clamp_u16(
            top,
            MAP_MARGIN_TILES * MAP_TILE_SIZE,
            (MAP_TILES_Y - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_HEIGHT,
        );
    }
}

/// Precomputed enemy respawn candidates: for every collision cell the
/// player could stand in, four positions just outside the viewport that
/// would be shown from there. Built once at level start, read-only
/// afterwards.
pub struct RespawnSlots {
    slots: Vec<[Coord; RESPAWN_SLOTS_PER_POSITION]>,
}

impl RespawnSlots {
    pub fn build() -> Self {
        let mut slots =
            Vec::with_capacity(usize::from(COLLISION_LOOKUP_X) * usize::from(COLLISION_LOOKUP_Y));
        for cell_x in 0..COLLISION_LOOKUP_X {
            for cell_y in 0..COLLISION_LOOKUP_Y {
                let center_x = i32::from(cell_x * COLLISION_SIZE);
                let center_y = i32::from(cell_y * COLLISION_SIZE);
                let left = clamp_u16(
                    center_x - i32::from(MAIN_VPORT_WIDTH) / 2,
                    MAP_MARGIN_TILES * MAP_TILE_SIZE,
                    (MAP_TILES_X - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_WIDTH,
                );
                let top = clamp_u16(
                    center_y - i32::from(MAIN_VPORT_HEIGHT - HUD_HEIGHT) / 2,
                    MAP_MARGIN_TILES * MAP_TILE_SIZE,
                    (MAP_TILES_Y - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_HEIGHT,
                );
                let left = i32::from(left);
                let top = i32::from(top);
                slots.push([
                    Coord::new(
                        clamp_u16(
                            left - i32::from(ENEMY_BOB_SIZE_X),
                            ENEMY_BOB_SIZE_X,
                            MAP_WIDTH - ENEMY_BOB_SIZE_X,
                        ),
                        center_y as u16,
                    ),
                    Coord::new(
                        clamp_u16(
                            left + i32::from(MAIN_VPORT_WIDTH + ENEMY_BOB_SIZE_X),
                            ENEMY_BOB_SIZE_X,
                            MAP_WIDTH - ENEMY_BOB_SIZE_X,
                        ),
                        center_y as u16,
                    ),
                    Coord::new(
                        center_x as u16,
                        clamp_u16(
                            top - i32::from(ENEMY_BOB_SIZE_Y),
                            ENEMY_BOB_SIZE_Y,
                            MAP_HEIGHT - ENEMY_BOB_SIZE_Y,
                        ),
                    ),
                    Coord::new(
                        center_x as u16,
                        clamp_u16(
                            top + i32::from(MAIN_VPORT_HEIGHT + ENEMY_BOB_SIZE_Y),
                            ENEMY_BOB_SIZE_Y,
                            MAP_HEIGHT - ENEMY_BOB_SIZE_Y,
                        ),
                    ),
                ]);
            }
        }
        Self { slots }
    }

    pub fn for_position(&self, pos: Coord) -> &[Coord; RESPAWN_SLOTS_PER_POSITION] {
        let cell_x = usize::from(pos.x / COLLISION_SIZE);
        let cell_y = usize::from(pos.y / COLLISION_SIZE);
        &self.slots[cell_x * usize::from(COLLISION_LOOKUP_Y) + cell_y]
    }
}

fn set_tile(
    tileset: &Bitmap,
    tile_index: u16,
    tile_x: u16,
    tile_y: u16,
    buffers: &mut [&mut Bitmap],
) {
    for buffer in buffers.iter_mut() {
        buffer.blit_copy(
            tileset,
            0,
            tile_index * MAP_TILE_SIZE,
            tile_x * MAP_TILE_SIZE,
            tile_y * MAP_TILE_SIZE,
            MAP_TILE_SIZE,
            MAP_TILE_SIZE,
        );
    }
}

/// Paints the level: decorated corners, edge strips, then a random fill
/// of interior floor variants. Lands identically in front, back and
/// pristine buffers so undraw has a consistent background to restore.
pub fn paint_map(
    rng: &mut SmallRng,
    tileset: &Bitmap,
    front: &mut Bitmap,
    back: &mut Bitmap,
    pristine: &mut Bitmap,
) {
    let last_x = MAP_TILES_X - 1 - MAP_MARGIN_TILES;
    let last_y = MAP_TILES_Y - 1 - MAP_MARGIN_TILES;

    let mut buffers = [front, back, pristine];
    set_tile(tileset, 0, MAP_MARGIN_TILES, MAP_MARGIN_TILES, &mut buffers);
    set_tile(tileset, 1, last_x, MAP_MARGIN_TILES, &mut buffers);
    set_tile(tileset, 2, MAP_MARGIN_TILES, last_y, &mut buffers);
    set_tile(tileset, 3, last_x, last_y, &mut buffers);

    for tile_x in MAP_MARGIN_TILES + 1..last_x {
        set_tile(tileset, rng.gen_range(4..=6), tile_x, MAP_MARGIN_TILES, &mut buffers);
        set_tile(tileset, rng.gen_range(13..=15), tile_x, last_y, &mut buffers);
    }
    for tile_y in MAP_MARGIN_TILES + 1..last_y {
        set_tile(tileset, rng.gen_range(7..=9), MAP_MARGIN_TILES, tile_y, &mut buffers);
        set_tile(tileset, rng.gen_range(10..=12), last_x, tile_y, &mut buffers);
    }
    for tile_x in MAP_MARGIN_TILES + 1..last_x {
        for tile_y in MAP_MARGIN_TILES + 1..last_y {
            set_tile(tileset, rng.gen_range(16..=24), tile_x, tile_y, &mut buffers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_clamps_to_margin_bounds() {
        let mut camera = Camera::default();
        camera.center_at(0, 0);
        assert_eq!(camera.pos.x, MAP_MARGIN_TILES * MAP_TILE_SIZE);
        assert_eq!(camera.pos.y, MAP_MARGIN_TILES * MAP_TILE_SIZE);

        camera.center_at(MAP_WIDTH, MAP_HEIGHT);
        assert_eq!(
            camera.pos.x,
            (MAP_TILES_X - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_WIDTH
        );
        assert_eq!(
            camera.pos.y,
            (MAP_TILES_Y - MAP_MARGIN_TILES) * MAP_TILE_SIZE - MAIN_VPORT_HEIGHT
        );
    }

    #[test]
    fn respawn_slots_stay_inside_map() {
        let slots = RespawnSlots::build();
        for cell_x in (0..COLLISION_LOOKUP_X).step_by(7) {
            for cell_y in (0..COLLISION_LOOKUP_Y).step_by(7) {
                let pos = Coord::new(cell_x * COLLISION_SIZE, cell_y * COLLISION_SIZE);
                for slot in slots.for_position(pos) {
                    assert!(slot.x >= ENEMY_BOB_SIZE_X && slot.x <= MAP_WIDTH - ENEMY_BOB_SIZE_X);
                    assert!(slot.y >= ENEMY_BOB_SIZE_Y && slot.y <= MAP_HEIGHT - ENEMY_BOB_SIZE_Y);
                }
            }
        }
    }

    #[test]
    fn respawn_slots_flank_the_viewport() {
        let slots = RespawnSlots::build();
        // Player mid-map: slots should sit left/right/above/below the view.
        let pos = Coord::new(MAP_WIDTH / 2, MAP_HEIGHT / 2);
        let [left, right, top, bottom] = *slots.for_position(pos);
        assert!(left.x < right.x);
        assert!(top.y < bottom.y);
    }
}
