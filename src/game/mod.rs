//! Simulation root. `Game` owns every pool, buffer and counter; the
//! per-concern submodules hang their logic off it in `impl Game`
//! extension blocks.

pub mod bobs;
pub mod enemies;
pub mod hud;
pub mod input;
pub mod perks;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod sfx;
pub mod states;
pub mod update;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::assets::Assets;
use crate::config::{
    ENEMY_COUNT, HUD_HEIGHT, MAIN_VPORT_WIDTH, MAP_HEIGHT, MAP_WIDTH,
    SCORE_LEVEL_FIRST_THRESHOLD,
};
use crate::diag::Diagnostics;
use crate::entities::{Coord, Enemy, Occupant, Pickup, Player};
use crate::gfx::Bitmap;
use crate::grid::CollisionGrid;
use crate::world::{paint_map, Camera, RespawnSlots};

use bobs::{BobPipeline, StainRing};
use hud::HudMachine;
use perks::Perks;
use projectiles::ProjectilePool;
use sfx::SfxQueue;

pub struct Game {
    pub rng: SmallRng,
    pub diag: Diagnostics,
    pub assets: Assets,

    /// Double-buffered playfield; `parity` indexes the buffer being
    /// drawn this tick.
    pub buffers: [Bitmap; 2],
    /// Static background (map plus merged-in stains); undraw restores
    /// from here.
    pub pristine: Bitmap,
    pub hud_bitmap: Bitmap,
    pub parity: usize,

    pub camera: Camera,
    pub grid: CollisionGrid,
    pub respawn_slots: RespawnSlots,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub pickup: Pickup,
    pub projectiles: ProjectilePool,
    pub stains: StainRing,
    pub bobs: BobPipeline,

    pub hud: HudMachine,
    pub perks: Perks,

    pub score: u32,
    pub next_level_score: u32,
    pub level: u16,
    pub kills: u32,
    pub tick: u32,
    pub game_over: bool,

    pub sfx: SfxQueue,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            rng: SmallRng::seed_from_u64(seed),
            diag: Diagnostics::default(),
            assets: Assets::placeholder(),
            buffers: [
                Bitmap::new(MAP_WIDTH, MAP_HEIGHT),
                Bitmap::new(MAP_WIDTH, MAP_HEIGHT),
            ],
            pristine: Bitmap::new(MAP_WIDTH, MAP_HEIGHT),
            hud_bitmap: Bitmap::new(MAIN_VPORT_WIDTH, HUD_HEIGHT),
            parity: 0,
            camera: Camera::default(),
            grid: CollisionGrid::new(),
            respawn_slots: RespawnSlots::build(),
            player: Player::new(),
            enemies: Vec::new(),
            pickup: Pickup::inactive(),
            projectiles: ProjectilePool::new(),
            stains: StainRing::new(),
            bobs: BobPipeline::new(),
            hud: HudMachine::new(),
            perks: Perks::new(),
            score: 0,
            next_level_score: SCORE_LEVEL_FIRST_THRESHOLD,
            level: 1,
            kills: 0,
            tick: 0,
            game_over: false,
            sfx: SfxQueue::default(),
        };
        game.start();
        game
    }

    /// Resets to a fresh run on the same seed stream: repaints the map,
    /// re-seats the player and queues every enemy for an edge respawn.
    pub fn start(&mut self) {
        self.grid.clear();
        self.diag = Diagnostics::default();
        self.perks = Perks::new();
        self.player = Player::new();
        self.player.max_ammo = self.perks_magazine_size(self.player.weapon);
        self.player.ammo = self.player.max_ammo;
        self.pickup = Pickup::inactive();
        self.projectiles = ProjectilePool::new();
        self.stains = StainRing::new();
        self.hud = HudMachine::new();
        self.score = 0;
        self.next_level_score = SCORE_LEVEL_FIRST_THRESHOLD;
        self.level = 1;
        self.kills = 0;
        self.tick = 0;
        self.game_over = false;
        self.parity = 0;

        let [front, back] = &mut self.buffers;
        paint_map(&mut self.rng, &self.assets.tileset, front, back, &mut self.pristine);

        // Opening wave in a loose grid across the top of the map; the
        // despawn/respawn cycle takes over from there.
        self.enemies = (0..ENEMY_COUNT)
            .map(|i| {
                Enemy::at(Coord::new(
                    32 + (i as u16 % 8) * 32,
                    32 + (i as u16 / 8) * 32,
                ))
            })
            .collect();

        self.bobs = BobPipeline::new();
        self.grid.write(self.player.pos, Occupant::Player, &mut self.diag);
        for (index, enemy) in self.enemies.iter().enumerate() {
            self.grid
                .write(enemy.pos, Occupant::Enemy(index), &mut self.diag);
        }
        self.camera.center_at(self.player.pos.x, self.player.pos.y);
        self.hud_full_redraw();
    }

    pub fn occupant_pos(&self, occupant: Occupant) -> Coord {
        match occupant {
            Occupant::Player => self.player.pos,
            Occupant::Enemy(index) => self.enemies[index].pos,
            Occupant::Pickup => self.pickup.pos,
        }
    }

    /// Score bump from a single event (kill, small perk payout). One
    /// threshold check; events are too small to cross two levels.
    pub fn score_add_small(&mut self, amount: u32) {
        self.score += amount;
        if self.score >= self.next_level_score {
            self.level_up();
        }
    }

    /// Score bump that may cross several thresholds at once (lottery
    /// payouts); credits one pending perk per level crossed.
    pub fn score_add_large(&mut self, amount: u32) {
        self.score += amount;
        while self.score >= self.next_level_score {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.next_level_score *= 2;
        self.perks.pending_choices += 1;
        self.perks.prompt_deferred = false;
        self.perks.unlock_for_level(self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds_double() {
        let mut game = Game::new(1);
        game.score_add_small(SCORE_LEVEL_FIRST_THRESHOLD);
        assert_eq!(game.level, 2);
        assert_eq!(game.next_level_score, 2 * SCORE_LEVEL_FIRST_THRESHOLD);
        assert_eq!(game.perks.pending_choices, 1);
    }

    #[test]
    fn large_payout_credits_each_level_crossed() {
        let mut game = Game::new(1);
        game.score_add_large(SCORE_LEVEL_FIRST_THRESHOLD * 3 + 1);
        // Crosses 1024 and 2048.
        assert_eq!(game.level, 3);
        assert_eq!(game.perks.pending_choices, 2);
    }

    #[test]
    fn start_seats_everyone_in_the_grid() {
        let game = Game::new(7);
        let (cx, cy) = CollisionGrid::cell_of(game.player.pos);
        assert_eq!(game.grid.occupant_at_cell(cx, cy), Some(Occupant::Player));
        assert_eq!(game.diag.grid_conflicts, 0);
        for (index, enemy) in game.enemies.iter().enumerate() {
            let (ex, ey) = CollisionGrid::cell_of(enemy.pos);
            assert_eq!(
                game.grid.occupant_at_cell(ex, ey),
                Some(Occupant::Enemy(index))
            );
        }
    }
}
