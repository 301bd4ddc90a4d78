//! Bob (sprite) pipeline and blood stains. Bobs draw into the current
//! back buffer after saving nothing: the background is static, so
//! undraw is a rect copy from the pristine buffer two ticks later, on
//! the same parity. Stains are permanent; they merge into the pristine
//! buffer and then ripple into both back buffers over two frames.

use crate::assets::{Assets, PICKUP_ICON_SIZE, STAIN_FRAME_PRESETS};
use crate::config::{
    ENEMY_BOB_OFFSET_X, ENEMY_BOB_OFFSET_Y, ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y,
    PLAYER_BOB_OFFSET_X, PLAYER_BOB_OFFSET_Y, PLAYER_BOB_SIZE_X, PLAYER_BOB_SIZE_Y,
    STAINS_MAX, STAIN_SIZE,
};
use crate::entities::{EnemyState, Occupant, PickupState};
use crate::gfx::Bitmap;

use super::Game;

#[derive(Clone, Copy, Default)]
pub struct UndrawSlot {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    active: bool,
}

#[derive(Clone, Copy)]
struct StainRect {
    x: u16,
    y: u16,
    frame: u16,
}

/// Two-stage stain propagation: `pending` entries have not touched any
/// buffer yet; `wait` entries are already in the pristine buffer and
/// one back buffer and still owe the other parity a copy.
pub struct StainRing {
    pending: Vec<StainRect>,
    wait: Vec<StainRect>,
}

impl StainRing {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(STAINS_MAX),
            wait: Vec::with_capacity(STAINS_MAX),
        }
    }

    /// Queues a stain; overflow past the fixed pool drops the request.
    pub fn spawn(&mut self, x: u16, y: u16, roll: u8) {
        if self.pending.len() >= STAINS_MAX {
            return;
        }
        let frame = STAIN_FRAME_PRESETS[usize::from(roll) % STAIN_FRAME_PRESETS.len()];
        self.pending.push(StainRect { x, y, frame });
    }

    pub fn backlog(&self) -> usize {
        self.pending.len() + self.wait.len()
    }
}

impl Default for StainRing {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BobPipeline {
    player: [UndrawSlot; 2],
    enemies: Vec<[UndrawSlot; 2]>,
    pickup: [UndrawSlot; 2],
    /// Draw order, nudged toward y-sorted by one bubble compare per
    /// tick. Deliberately never fully sorted in one frame.
    pub order: Vec<Occupant>,
    cursor: usize,
}

impl BobPipeline {
    pub fn new() -> Self {
        let mut order = vec![Occupant::Pickup];
        order.extend((0..crate::config::ENEMY_COUNT).map(Occupant::Enemy));
        order.push(Occupant::Player);
        Self {
            player: [UndrawSlot::default(); 2],
            enemies: vec![[UndrawSlot::default(); 2]; crate::config::ENEMY_COUNT],
            pickup: [UndrawSlot::default(); 2],
            order,
            cursor: 0,
        }
    }
}

impl Default for BobPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn undraw_slot(buffer: &mut Bitmap, pristine: &Bitmap, slot: &mut UndrawSlot) {
    if slot.active {
        buffer.blit_copy(pristine, slot.x, slot.y, slot.x, slot.y, slot.w, slot.h);
        slot.active = false;
    }
}

impl Game {
    /// Restores the background under every bob this parity drew two
    /// ticks ago.
    pub(super) fn bobs_undraw(&mut self) {
        let buffer = &mut self.buffers[self.parity];
        undraw_slot(buffer, &self.pristine, &mut self.bobs.player[self.parity]);
        undraw_slot(buffer, &self.pristine, &mut self.bobs.pickup[self.parity]);
        for slots in &mut self.bobs.enemies {
            undraw_slot(buffer, &self.pristine, &mut slots[self.parity]);
        }
    }

    /// One adjacent-pair compare of the draw-order list per tick. Over
    /// a handful of frames the list settles into y-order, which is all
    /// the overlap artefacts need.
    pub(super) fn bobs_order_step(&mut self) {
        if self.bobs.order.len() < 2 {
            return;
        }
        let i = self.bobs.cursor;
        let a = self.occupant_pos(self.bobs.order[i]).yx_key();
        let b = self.occupant_pos(self.bobs.order[i + 1]).yx_key();
        if a > b {
            self.bobs.order.swap(i, i + 1);
        }
        self.bobs.cursor = (self.bobs.cursor + 1) % (self.bobs.order.len() - 1);
    }

    /// Draws every visible bob in list order, recording undraw rects
    /// for this parity.
    pub(super) fn bobs_draw(&mut self) {
        for index in 0..self.bobs.order.len() {
            match self.bobs.order[index] {
                Occupant::Player => self.draw_player_bob(),
                Occupant::Enemy(enemy_index) => self.draw_enemy_bob(enemy_index),
                Occupant::Pickup => self.draw_pickup_bob(),
            }
        }
    }

    fn draw_player_bob(&mut self) {
        // Hit flash: skip every other frame while blinking.
        if self.player.blink_cooldown > 0 && self.tick % 2 == 1 {
            return;
        }
        let (sx, sy) = Assets::frame_origin(
            PLAYER_BOB_SIZE_X,
            PLAYER_BOB_SIZE_Y,
            self.player.direction,
            self.player.frame,
        );
        let dx = self.player.pos.x.saturating_sub(PLAYER_BOB_OFFSET_X);
        let dy = self.player.pos.y.saturating_sub(PLAYER_BOB_OFFSET_Y);
        let buffer = &mut self.buffers[self.parity];
        buffer.blit_masked(
            &self.assets.player_sheet,
            &self.assets.player_mask,
            sx,
            sy,
            dx,
            dy,
            PLAYER_BOB_SIZE_X,
            PLAYER_BOB_SIZE_Y,
        );
        self.bobs.player[self.parity] = UndrawSlot {
            x: dx,
            y: dy,
            w: PLAYER_BOB_SIZE_X,
            h: PLAYER_BOB_SIZE_Y,
            active: true,
        };
    }

    fn draw_enemy_bob(&mut self, enemy_index: usize) {
        let enemy = &self.enemies[enemy_index];
        if !matches!(enemy.state, EnemyState::Alive | EnemyState::DeathAnim) {
            return;
        }
        let (sx, sy) = Assets::frame_origin(
            ENEMY_BOB_SIZE_X,
            ENEMY_BOB_SIZE_Y,
            enemy.direction,
            enemy.frame,
        );
        let dx = enemy.pos.x.saturating_sub(ENEMY_BOB_OFFSET_X);
        let dy = enemy.pos.y.saturating_sub(ENEMY_BOB_OFFSET_Y);
        let buffer = &mut self.buffers[self.parity];
        buffer.blit_masked(
            &self.assets.enemy_sheet,
            &self.assets.enemy_mask,
            sx,
            sy,
            dx,
            dy,
            ENEMY_BOB_SIZE_X,
            ENEMY_BOB_SIZE_Y,
        );
        self.bobs.enemies[enemy_index][self.parity] = UndrawSlot {
            x: dx,
            y: dy,
            w: ENEMY_BOB_SIZE_X,
            h: ENEMY_BOB_SIZE_Y,
            active: true,
        };
    }

    fn draw_pickup_bob(&mut self) {
        if self.pickup.state != PickupState::Active || !self.pickup.is_displayed {
            return;
        }
        let sy = self.pickup.kind.index() as u16 * PICKUP_ICON_SIZE;
        let (dx, dy) = (self.pickup.pos.x, self.pickup.pos.y);
        let buffer = &mut self.buffers[self.parity];
        buffer.blit_masked(
            &self.assets.pickup_sheet,
            &self.assets.pickup_mask,
            0,
            sy,
            dx,
            dy,
            PICKUP_ICON_SIZE,
            PICKUP_ICON_SIZE,
        );
        self.bobs.pickup[self.parity] = UndrawSlot {
            x: dx,
            y: dy,
            w: PICKUP_ICON_SIZE,
            h: PICKUP_ICON_SIZE,
            active: true,
        };
    }

    /// Advances the stain rings: finishes last tick's stains on this
    /// parity, then merges fresh ones into the pristine buffer and this
    /// back buffer.
    pub(super) fn stains_process(&mut self) {
        let parity = self.parity;
        for stain in self.stains.wait.drain(..) {
            self.buffers[parity].blit_copy(
                &self.pristine,
                stain.x,
                stain.y,
                stain.x,
                stain.y,
                STAIN_SIZE,
                STAIN_SIZE,
            );
        }

        let fresh: Vec<StainRect> = self.stains.pending.drain(..).collect();
        for stain in &fresh {
            self.pristine.blit_masked(
                &self.assets.stain_sheet,
                &self.assets.stain_mask,
                0,
                stain.frame * STAIN_SIZE,
                stain.x,
                stain.y,
                STAIN_SIZE,
                STAIN_SIZE,
            );
            self.buffers[parity].blit_copy(
                &self.pristine,
                stain.x,
                stain.y,
                stain.x,
                stain.y,
                STAIN_SIZE,
                STAIN_SIZE,
            );
        }
        self.stains.wait.extend(fresh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coord;

    #[test]
    fn order_step_settles_toward_y_order() {
        let mut game = Game::new(9);
        // Force a known inversion: player above an alive enemy but
        // listed after it.
        game.enemies[0].state = EnemyState::Alive;
        game.enemies[0].pos = Coord::new(100, 300);
        game.player.pos = Coord::new(100, 100);
        let len = game.bobs.order.len();
        for _ in 0..len * len {
            game.bobs_order_step();
        }
        let player_at = game
            .bobs
            .order
            .iter()
            .position(|&o| o == Occupant::Player)
            .unwrap();
        let enemy_at = game
            .bobs
            .order
            .iter()
            .position(|&o| o == Occupant::Enemy(0))
            .unwrap();
        assert!(player_at < enemy_at);
    }

    #[test]
    fn stain_lands_in_pristine_and_both_buffers() {
        let mut game = Game::new(9);
        let (x, y) = (120, 140);
        let before = game.pristine.get(x + STAIN_SIZE / 2, y + STAIN_SIZE / 2);
        game.stains.spawn(x, y, 0);
        game.stains_process();
        let stained = game.pristine.get(x + STAIN_SIZE / 2, y + STAIN_SIZE / 2);
        assert_ne!(before, stained);
        assert_eq!(game.buffers[game.parity].get(x + 8, y + 8), stained);
        // Flip parity; the wait ring finishes the other buffer.
        game.parity ^= 1;
        game.stains_process();
        assert_eq!(game.buffers[game.parity].get(x + 8, y + 8), stained);
        assert_eq!(game.stains.backlog(), 0);
    }

    #[test]
    fn stain_overflow_drops_quietly() {
        let mut game = Game::new(9);
        for i in 0..STAINS_MAX + 5 {
            game.stains.spawn(i as u16, 100, 3);
        }
        assert_eq!(game.stains.backlog(), STAINS_MAX);
    }

    #[test]
    fn undraw_restores_player_background() {
        let mut game = Game::new(9);
        game.bobs_draw();
        let x = game.player.pos.x.saturating_sub(PLAYER_BOB_OFFSET_X) + 4;
        let y = game.player.pos.y.saturating_sub(PLAYER_BOB_OFFSET_Y) + 4;
        game.bobs_undraw();
        assert_eq!(
            game.buffers[game.parity].get(x, y),
            game.pristine.get(x, y)
        );
    }
}
