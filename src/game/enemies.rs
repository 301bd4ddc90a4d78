//! Enemy lifecycle: straight-line chase, bite, off-screen despawn and
//! edge respawn. No pathfinding; a zombie walks the sign of the
//! player delta on each axis and lets the collision grid sort out the
//! pile-ups.

use rand::Rng;

use crate::config::{
    DEATH_FRAME_FIRST, DEATH_FRAME_LAST, ENEMY_ATTACK_COOLDOWN, ENEMY_BITE_DAMAGE,
    ENEMY_BITE_RANGE, ENEMY_DESPAWN_MARGIN, ENEMY_HEALTH_ADD_PER_LEVEL, ENEMY_HEALTH_BASE,
    ENEMY_SCORE, ENEMY_SPEEDY_CHANCE_ADD_PER_LEVEL, ENEMY_SPEEDY_CHANCE_MAX, HUD_HEIGHT,
    MAIN_VPORT_HEIGHT, MAIN_VPORT_WIDTH, PERK_DODGE_CHANCE, PERK_RETALIATION_DAMAGE,
    WALK_FRAME_LAST,
};
use crate::entities::{Coord, Direction, EnemyState, Occupant, SpawnEdge};
use crate::grid::try_move_by;

use super::sfx::Sfx;
use super::Game;

fn chase_facing(dx: i16, dy: i16, previous: Direction) -> Direction {
    match (dx.signum(), dy.signum()) {
        (1, 1) | (1, 0) => Direction::SouthEast,
        (0, 1) => Direction::South,
        (-1, 1) | (-1, 0) => Direction::SouthWest,
        (-1, -1) => Direction::NorthWest,
        (0, -1) => Direction::North,
        (1, -1) => Direction::NorthEast,
        _ => previous,
    }
}

impl Game {
    pub(super) fn enemies_process(&mut self) {
        for index in 0..self.enemies.len() {
            match self.enemies[index].state {
                EnemyState::Alive => self.enemy_process_alive(index),
                EnemyState::DeathAnim => self.enemy_process_death_anim(index),
                EnemyState::Offscreen => {
                    self.enemies[index].state = EnemyState::AwaitingRespawn;
                }
                EnemyState::AwaitingRespawn => self.enemy_try_respawn(index),
            }
        }
    }

    /// Projectile or retaliation damage. Kills clear the grid cell,
    /// bank the score, splash a stain and maybe seed the pickup slot.
    pub(super) fn enemy_hit(&mut self, index: usize, damage: u16) {
        let enemy = &mut self.enemies[index];
        if enemy.state != EnemyState::Alive {
            return;
        }
        enemy.health = enemy.health.saturating_sub(damage);
        if enemy.health > 0 {
            return;
        }

        enemy.state = EnemyState::DeathAnim;
        enemy.frame = DEATH_FRAME_FIRST;
        enemy.frame_cooldown = 0;
        let pos = enemy.pos;
        self.grid.erase(pos, Occupant::Enemy(index), &mut self.diag);

        self.kills += 1;
        self.add_exp(ENEMY_SCORE);
        let (stain_x, stain_y) = self.enemy_stain_anchor(index);
        let roll = self.rng.gen::<u8>();
        self.stains.spawn(stain_x, stain_y, roll & 0x0f);
        self.pickup_maybe_seed(pos);
    }

    fn enemy_process_alive(&mut self, index: usize) {
        if let Some(edge) = self.enemy_offscreen_edge(index) {
            let pos = self.enemies[index].pos;
            self.grid.erase(pos, Occupant::Enemy(index), &mut self.diag);
            let enemy = &mut self.enemies[index];
            enemy.state = EnemyState::Offscreen;
            enemy.preferred_spawn = Some(edge);
            return;
        }

        let player_pos = self.player.pos;
        let enemy = &self.enemies[index];
        let speed = enemy.speed;
        let to_player_x = player_pos.x as i16 - enemy.pos.x as i16;
        let to_player_y = player_pos.y as i16 - enemy.pos.y as i16;

        // Bite before walking, so a zombie in range doesn't shuffle
        // around the player first.
        if to_player_x.unsigned_abs() <= ENEMY_BITE_RANGE
            && to_player_y.unsigned_abs() <= ENEMY_BITE_RANGE
        {
            if self.enemies[index].attack_cooldown == 0 {
                self.enemy_bite(index);
            } else {
                self.enemies[index].attack_cooldown -= 1;
            }
            return;
        }
        if self.enemies[index].attack_cooldown > 0 {
            self.enemies[index].attack_cooldown -= 1;
        }

        let dx = to_player_x.signum() * speed;
        let dy = to_player_y.signum() * speed;
        let direction = chase_facing(dx, dy, self.enemies[index].direction);
        {
            let enemy = &mut self.enemies[index];
            enemy.direction = direction;
            enemy.frame_cooldown ^= 1;
            if enemy.frame_cooldown == 0 {
                enemy.frame = if enemy.frame >= WALK_FRAME_LAST {
                    0
                } else {
                    enemy.frame + 1
                };
            }
        }

        let mut pos = self.enemies[index].pos;
        let pickup_pos = self.pickup.pos;
        let enemies = &self.enemies;
        try_move_by(
            &mut self.grid,
            Occupant::Enemy(index),
            &mut pos,
            dx,
            dy,
            |occupant| match occupant {
                Occupant::Player => player_pos,
                Occupant::Enemy(other) => enemies[other].pos,
                Occupant::Pickup => pickup_pos,
            },
            &mut self.diag,
        );
        self.enemies[index].pos = pos;
    }

    fn enemy_bite(&mut self, index: usize) {
        self.enemies[index].attack_cooldown = ENEMY_ATTACK_COOLDOWN;
        if self.perks.dodger && self.rng.gen_range(0u8..128) < PERK_DODGE_CHANCE {
            return;
        }
        self.sfx.push(Sfx::Bite);
        let connected = self.player_take_damage(ENEMY_BITE_DAMAGE as u16);
        if connected && self.perks.retaliation {
            self.enemy_hit(index, PERK_RETALIATION_DAMAGE);
        }
    }

    fn enemy_process_death_anim(&mut self, index: usize) {
        let enemy = &mut self.enemies[index];
        enemy.frame_cooldown ^= 1;
        if enemy.frame_cooldown != 0 {
            return;
        }
        if enemy.frame < DEATH_FRAME_LAST {
            enemy.frame += 1;
        } else {
            enemy.state = EnemyState::AwaitingRespawn;
            // Failsafe parking spot while the corpse waits for a slot.
            enemy.pos = Coord::default();
        }
    }

    fn enemy_try_respawn(&mut self, index: usize) {
        let slots = *self.respawn_slots.for_position(self.player.pos);
        let preferred = self.enemies[index].preferred_spawn;
        let order: [usize; 4] = match preferred {
            Some(edge) => {
                let first = edge.index();
                [first, (first + 1) % 4, (first + 2) % 4, (first + 3) % 4]
            }
            None => [0, 1, 2, 3],
        };
        let Some(&slot) = order
            .iter()
            .map(|&i| &slots[i])
            .find(|slot| self.grid.is_free_at(**slot))
        else {
            return;
        };

        let health =
            ENEMY_HEALTH_BASE + ENEMY_HEALTH_ADD_PER_LEVEL * (self.level.saturating_sub(1));
        let speedy_chance = (u16::from(ENEMY_SPEEDY_CHANCE_ADD_PER_LEVEL) * self.level)
            .min(u16::from(ENEMY_SPEEDY_CHANCE_MAX)) as u8;
        let speedy = self.rng.gen_range(0u8..=ENEMY_SPEEDY_CHANCE_MAX) < speedy_chance;

        let enemy = &mut self.enemies[index];
        enemy.pos = slot;
        enemy.state = EnemyState::Alive;
        enemy.health = health;
        enemy.frame = 0;
        enemy.frame_cooldown = 0;
        enemy.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
        enemy.speed = if speedy { 2 } else { 1 };
        enemy.preferred_spawn = None;
        self.grid.write(slot, Occupant::Enemy(index), &mut self.diag);
    }

    /// Which edge, if any, the enemy has drifted past. The test window
    /// is the camera viewport grown by the despawn margin.
    fn enemy_offscreen_edge(&self, index: usize) -> Option<SpawnEdge> {
        let pos = self.enemies[index].pos;
        let view_x = self.camera.pos.x;
        let view_y = self.camera.pos.y;
        let view_w = MAIN_VPORT_WIDTH;
        let view_h = MAIN_VPORT_HEIGHT - HUD_HEIGHT;

        if pos.x + ENEMY_DESPAWN_MARGIN < view_x {
            Some(SpawnEdge::Left)
        } else if pos.x > view_x + view_w + ENEMY_DESPAWN_MARGIN {
            Some(SpawnEdge::Right)
        } else if pos.y + ENEMY_DESPAWN_MARGIN < view_y {
            Some(SpawnEdge::Top)
        } else if pos.y > view_y + view_h + ENEMY_DESPAWN_MARGIN {
            Some(SpawnEdge::Bottom)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Enemy;

    fn place_alive_enemy(game: &mut Game, index: usize, pos: Coord) {
        let mut enemy = Enemy::at(pos);
        enemy.attack_cooldown = ENEMY_ATTACK_COOLDOWN;
        game.enemies[index] = enemy;
        game.grid.write(pos, Occupant::Enemy(index), &mut game.diag);
    }

    #[test]
    fn enemy_closes_distance_and_bites_within_100_ticks() {
        let mut game = Game::new(4);
        // Enemy 100px to the right of the player, inside the viewport.
        let start = Coord::new(game.player.pos.x + 100, game.player.pos.y);
        place_alive_enemy(&mut game, 0, start);
        let health_before = game.player.health;
        for _ in 0..100 {
            game.camera.center_at(game.player.pos.x, game.player.pos.y);
            game.enemies_process();
        }
        assert!(game.enemies[0].pos.x < start.x);
        assert!(game.player.health < health_before);
    }

    #[test]
    fn kill_banks_score_and_seeds_the_death_anim() {
        let mut game = Game::new(4);
        place_alive_enemy(&mut game, 3, Coord::new(300, 300));
        game.enemy_hit(3, ENEMY_HEALTH_BASE);
        assert_eq!(game.enemies[3].state, EnemyState::DeathAnim);
        assert_eq!(game.kills, 1);
        assert_eq!(game.score, ENEMY_SCORE);
        assert!(game.grid.is_free_at(Coord::new(300, 300)));
        assert_eq!(game.stains.backlog(), 1);
    }

    #[test]
    fn death_anim_runs_its_frames_then_awaits_respawn() {
        let mut game = Game::new(4);
        place_alive_enemy(&mut game, 0, Coord::new(300, 300));
        game.enemy_hit(0, 100);
        // 8 death frames at half tick rate.
        for _ in 0..2 * u8::from(DEATH_FRAME_LAST - DEATH_FRAME_FIRST) + 2 {
            game.enemy_process_death_anim(0);
        }
        assert_eq!(game.enemies[0].state, EnemyState::AwaitingRespawn);
    }

    #[test]
    fn respawn_prefers_the_exit_edge() {
        let mut game = Game::new(4);
        game.enemies[0].state = EnemyState::AwaitingRespawn;
        game.enemies[0].preferred_spawn = Some(SpawnEdge::Right);
        game.enemy_try_respawn(0);
        let enemy = &game.enemies[0];
        assert_eq!(enemy.state, EnemyState::Alive);
        let expected = game.respawn_slots.for_position(game.player.pos)[SpawnEdge::Right.index()];
        assert_eq!(enemy.pos, expected);
        let (cx, cy) = crate::grid::CollisionGrid::cell_of(enemy.pos);
        assert_eq!(
            game.grid.occupant_at_cell(cx, cy),
            Some(Occupant::Enemy(0))
        );
    }

    #[test]
    fn occupied_slots_defer_the_respawn() {
        let mut game = Game::new(4);
        let slots = *game.respawn_slots.for_position(game.player.pos);
        for slot in slots {
            game.grid.write(slot, Occupant::Enemy(9), &mut game.diag);
        }
        game.enemies[0].state = EnemyState::AwaitingRespawn;
        game.enemy_try_respawn(0);
        assert_eq!(game.enemies[0].state, EnemyState::AwaitingRespawn);
    }

    #[test]
    fn wandering_past_the_margin_despawns_with_the_edge_remembered() {
        let mut game = Game::new(4);
        game.camera.center_at(game.player.pos.x, game.player.pos.y);
        let far_right = Coord::new(
            game.camera.pos.x + MAIN_VPORT_WIDTH + ENEMY_DESPAWN_MARGIN + 1,
            game.player.pos.y,
        );
        place_alive_enemy(&mut game, 0, far_right);
        game.enemies_process();
        assert_eq!(game.enemies[0].state, EnemyState::Offscreen);
        assert_eq!(game.enemies[0].preferred_spawn, Some(SpawnEdge::Right));
        // Next tick it queues for respawn.
        game.enemies_process();
        assert_eq!(game.enemies[0].state, EnemyState::AwaitingRespawn);
    }

    #[test]
    fn retaliation_punches_back() {
        let mut game = Game::new(4);
        game.perks.retaliation = true;
        let pos = Coord::new(game.player.pos.x + 8, game.player.pos.y);
        place_alive_enemy(&mut game, 0, pos);
        game.enemies[0].attack_cooldown = 0;
        game.enemies[0].health = PERK_RETALIATION_DAMAGE;
        game.enemy_bite(0);
        assert_eq!(game.enemies[0].state, EnemyState::DeathAnim);
    }
}
