//! One simulation tick, in the order the renderer depends on: flip
//! parity, clean this parity's leftovers, advance the world, draw, then
//! one HUD step. The display layer presents the buffer this tick drew.

use super::input::InputSnapshot;
use super::Game;
use crate::config::COLLISION_SIZE;
use crate::gfx::Bitmap;

impl Game {
    pub fn update(&mut self, input: &InputSnapshot) {
        self.parity ^= 1;

        self.projectiles_undraw();
        self.bobs_undraw();
        self.stains_process();

        self.player_process(input);
        self.enemies_process();
        self.pickups_process();
        self.projectiles_process();

        self.bobs_order_step();
        self.bobs_draw();

        self.camera.center_at(
            self.player.pos.x + COLLISION_SIZE / 2,
            self.player.pos.y + COLLISION_SIZE / 2,
        );
        self.hud_process();
        self.tick += 1;
    }

    /// The buffer finished by the most recent `update`.
    pub fn front_buffer(&self) -> &Bitmap {
        &self.buffers[self.parity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EnemyState;

    #[test]
    fn a_quiet_second_of_simulation_holds_its_invariants() {
        let mut game = Game::new(12);
        let input = InputSnapshot::default();
        for _ in 0..25 {
            game.update(&input);
        }
        assert_eq!(game.tick, 25);
        assert_eq!(game.diag.grid_conflicts, 0);
        assert!(game.player.health > 0);
        let alive = game
            .enemies
            .iter()
            .filter(|e| e.state == EnemyState::Alive)
            .count();
        assert!(alive > 0);
    }

    #[test]
    fn walking_moves_the_camera_with_the_player() {
        let mut game = Game::new(12);
        let input = InputSnapshot {
            right: true,
            down: true,
            ..InputSnapshot::default()
        };
        let before = game.player.pos;
        for _ in 0..10 {
            game.update(&input);
        }
        assert!(game.player.pos.x >= before.x);
        assert!(game.player.pos.y >= before.y);
        // Camera stays inside the margin frame.
        assert!(game.camera.pos.x >= crate::config::MAP_MARGIN_TILES * crate::config::MAP_TILE_SIZE);
    }

    #[test]
    fn update_flips_parity_every_tick() {
        let mut game = Game::new(12);
        let input = InputSnapshot::default();
        let p0 = game.parity;
        game.update(&input);
        assert_ne!(game.parity, p0);
        game.update(&input);
        assert_eq!(game.parity, p0);
    }
}
