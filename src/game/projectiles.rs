//! Projectile pool and the spread machinery. Positions and velocities
//! are 10.6 fixed-point; flying off the map shows up as a wrapped
//! coordinate far outside the buffer, which is exactly the despawn
//! test.

use crate::config::{
    COLLISION_SIZE, COLOR_BULLET, ENEMY_BOB_OFFSET_X, ENEMY_BOB_OFFSET_Y, MAP_HEIGHT, MAP_WIDTH,
    PROJECTILE_COUNT, PROJECTILE_LIFETIME, PROJECTILE_SPEED,
};
use crate::diag::SimWarning;
use crate::entities::{Occupant, PickupState, SpreadKind};
use crate::math::{fix_add, fix_cos, fix_from_int, fix_scale, fix_sin, fix_to_int, Fix10p6};

use super::sfx::Sfx;
use super::Game;

const SPREAD_NARROW: [i8; 40] = [
    0, 1, -1, 0, 0, 1, 0, -1, 1, 0, -1, 0, 1, -1, 0, 1, 0, 0, -1, 1, 0, -1, 1, 0, 0, -1, 0, 1, -1,
    0, 1, 0, -1, 0, 1, -1, 0, 0, 1, -1,
];
const SPREAD_MEDIUM: [i8; 40] = [
    0, 2, -1, 1, -2, 0, 1, -1, 2, 0, -2, 1, 0, -1, 2, -2, 0, 1, -1, 0, 2, -1, -2, 1, 0, 2, -1, 0,
    1, -2, 0, -1, 2, 1, 0, -2, 1, -1, 0, 2,
];
const SPREAD_WIDE: [i8; 40] = [
    0, 3, -2, 1, -3, 2, 0, -1, 3, -2, 1, 0, -3, 2, -1, 3, 0, -2, 1, -1, 2, -3, 0, 3, -1, 2, 0, -2,
    3, -3, 1, 0, 2, -1, -2, 3, 0, 1, -3, 2,
];
const SPREAD_SCATTER: [i8; 40] = [
    0, 7, -4, 10, -8, 2, -10, 5, -2, 8, -6, 3, 9, -9, 1, -5, 6, -3, 10, -7, 4, -1, 8, -10, 2, 5,
    -8, 9, -4, 7, -2, 10, -6, 1, -9, 3, 6, -5, -3, 4,
];

fn spread_table(kind: SpreadKind) -> &'static [i8; 40] {
    match kind {
        SpreadKind::Narrow => &SPREAD_NARROW,
        SpreadKind::Medium => &SPREAD_MEDIUM,
        SpreadKind::Wide => &SPREAD_WIDE,
        SpreadKind::Scatter => &SPREAD_SCATTER,
    }
}

#[derive(Clone, Copy, Default)]
struct UndrawPixel {
    offset: usize,
    active: bool,
}

#[derive(Clone, Copy)]
pub struct Projectile {
    pub x: Fix10p6,
    pub y: Fix10p6,
    pub vx: Fix10p6,
    pub vy: Fix10p6,
    /// Ticks left; zero marks a free slot.
    pub life: u8,
    undraw: [UndrawPixel; 2],
}

impl Projectile {
    fn free() -> Self {
        Self {
            x: 0,
            y: 0,
            vx: 0,
            vy: 0,
            life: 0,
            undraw: [UndrawPixel::default(); 2],
        }
    }
}

/// The spread cursor and shot stagger live here, shared by every slot,
/// so consecutive pellets walk the table instead of re-rolling it.
pub struct ProjectilePool {
    pub slots: [Projectile; PROJECTILE_COUNT],
    spread_cursor: usize,
    stagger: u8,
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self {
            slots: [Projectile::free(); PROJECTILE_COUNT],
            spread_cursor: 0,
            stagger: 0,
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.life > 0).count()
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Spawns one pellet volley from `(from_x, from_y)` toward `angle`.
    /// Each pellet takes the next spread-table entry; the three-step
    /// stagger nudges consecutive spawn points by zero, plus or minus
    /// one velocity step so rapid fire doesn't stack pixels.
    pub fn shoot(&mut self, from_x: u16, from_y: u16, angle: u8) {
        let weapon = self.player.weapon;
        let table = spread_table(weapon.spread());
        for _ in 0..weapon.pellets() {
            let offset = table[self.projectiles.spread_cursor];
            self.projectiles.spread_cursor =
                (self.projectiles.spread_cursor + 1) % table.len();
            let pellet_angle = (angle as i16 + i16::from(offset)) as u8;

            let vx = fix_scale(fix_cos(pellet_angle), PROJECTILE_SPEED);
            let vy = fix_scale(fix_sin(pellet_angle), PROJECTILE_SPEED);
            let stagger = self.projectiles.stagger;
            self.projectiles.stagger = (stagger + 1) % 3;
            let (mut x, mut y) = (fix_from_int(from_x), fix_from_int(from_y));
            match stagger {
                1 => {
                    x = fix_add(x, vx);
                    y = fix_add(y, vy);
                }
                2 => {
                    x = x.wrapping_sub(vx);
                    y = y.wrapping_sub(vy);
                }
                _ => {}
            }

            let Some(slot) = self
                .projectiles
                .slots
                .iter_mut()
                .find(|slot| slot.life == 0)
            else {
                self.diag.report(SimWarning::PoolExhausted);
                return;
            };
            slot.x = x;
            slot.y = y;
            slot.vx = vx;
            slot.vy = vy;
            slot.life = PROJECTILE_LIFETIME;
        }
        self.sfx.push(Sfx::Shoot);
    }

    /// Restores the background under every pixel this parity drew two
    /// ticks ago. Runs for every slot, live or not, so a freed
    /// projectile still gets its last pixel cleaned up.
    pub(super) fn projectiles_undraw(&mut self) {
        let buffer = &mut self.buffers[self.parity];
        for slot in &mut self.projectiles.slots {
            let undraw = &mut slot.undraw[self.parity];
            if undraw.active {
                buffer.restore_at_offset(&self.pristine, undraw.offset);
                undraw.active = false;
            }
        }
    }

    /// Advances, collides and draws every live projectile.
    pub(super) fn projectiles_process(&mut self) {
        let mut enemy_hits: [Option<(usize, u16)>; PROJECTILE_COUNT] = [None; PROJECTILE_COUNT];
        let damage = self.player.weapon.damage();

        for index in 0..PROJECTILE_COUNT {
            let slot = &mut self.projectiles.slots[index];
            if slot.life == 0 {
                continue;
            }
            slot.life -= 1;
            slot.x = fix_add(slot.x, slot.vx);
            slot.y = fix_add(slot.y, slot.vy);
            let x = fix_to_int(slot.x);
            let y = fix_to_int(slot.y);
            // Wrapped coordinates land far outside the map.
            if x >= MAP_WIDTH || y >= MAP_HEIGHT {
                slot.life = 0;
                continue;
            }

            let (cell_x, cell_y) = (x / COLLISION_SIZE, y / COLLISION_SIZE);
            match self.grid.occupant_at_cell(cell_x, cell_y) {
                Some(Occupant::Enemy(enemy_index)) => {
                    slot.life = 0;
                    enemy_hits[index] = Some((enemy_index, damage));
                    continue;
                }
                Some(Occupant::Pickup) => {
                    // Stray fire destroys the drop.
                    slot.life = 0;
                    if self.pickup.state == PickupState::Active {
                        self.pickup_despawn();
                    }
                    continue;
                }
                _ => {}
            }

            let buffer = &mut self.buffers[self.parity];
            let offset = buffer.offset_of(x, y);
            buffer.put_at_offset(offset, COLOR_BULLET);
            slot.undraw[self.parity] = UndrawPixel {
                offset,
                active: true,
            };
        }

        let mut any_hit = false;
        for hit in enemy_hits.into_iter().flatten() {
            let (enemy_index, damage) = hit;
            self.enemy_hit(enemy_index, damage);
            any_hit = true;
        }
        if any_hit {
            self.sfx.push(Sfx::Impact);
        }
    }

    /// Where an enemy's collision box lands for projectile purposes:
    /// the grid already answers that, this is the matching stain
    /// anchor.
    pub(super) fn enemy_stain_anchor(&self, enemy_index: usize) -> (u16, u16) {
        let pos = self.enemies[enemy_index].pos;
        (
            pos.x.saturating_sub(ENEMY_BOB_OFFSET_X),
            pos.y.saturating_sub(ENEMY_BOB_OFFSET_Y / 2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SPREAD_SIDE_COUNT;

    #[test]
    fn spread_tables_respect_their_envelopes() {
        for (table, limit) in [
            (&SPREAD_NARROW, 1i8),
            (&SPREAD_MEDIUM, 2),
            (&SPREAD_WIDE, 3),
            (&SPREAD_SCATTER, 10),
        ] {
            assert_eq!(table.len(), SPREAD_SIDE_COUNT);
            assert!(table.iter().all(|&v| (-limit..=limit).contains(&v)));
        }
    }

    #[test]
    fn shoot_fills_slots_and_exhaustion_is_reported() {
        let mut game = Game::new(5);
        for _ in 0..PROJECTILE_COUNT {
            game.shoot(200, 200, 0);
        }
        assert_eq!(game.projectiles.live_count(), PROJECTILE_COUNT);
        game.shoot(200, 200, 0);
        assert_eq!(game.diag.dropped_shots, 1);
    }

    #[test]
    fn shotgun_volley_spawns_ten_pellets() {
        let mut game = Game::new(5);
        game.player.weapon = crate::entities::WeaponKind::Shotgun;
        game.shoot(200, 200, 64);
        assert_eq!(game.projectiles.live_count(), 10);
    }

    #[test]
    fn projectiles_expire_after_lifetime() {
        let mut game = Game::new(5);
        game.shoot(200, 200, 0);
        for _ in 0..PROJECTILE_LIFETIME {
            game.projectiles_undraw();
            game.projectiles_process();
        }
        assert_eq!(game.projectiles.live_count(), 0);
    }

    #[test]
    fn offscreen_shot_frees_early() {
        let mut game = Game::new(5);
        // Aim left from near the left edge; wraps off-map quickly.
        game.shoot(6, 200, 128);
        for _ in 0..5 {
            game.projectiles_undraw();
            game.projectiles_process();
        }
        assert_eq!(game.projectiles.live_count(), 0);
    }

    #[test]
    fn undraw_restores_background_pixels() {
        let mut game = Game::new(5);
        game.shoot(200, 200, 0);
        game.projectiles_process();
        let drawn = game.projectiles.slots[0].undraw[game.parity];
        assert!(drawn.active);
        game.projectiles_undraw();
        assert_eq!(
            game.buffers[game.parity].get_at_offset(drawn.offset),
            game.pristine.get_at_offset(drawn.offset)
        );
    }
}
