//! Per-tick player bookkeeping: death animation, reload and fire
//! timers, movement and aiming. The branch order matters; reload
//! progress and cooldowns tick even on frames the player stands still.

use crate::config::{
    BLINK_COOLDOWN, COLLISION_SIZE, DEATH_FRAME_FIRST, DEATH_FRAME_LAST, PLAYER_DEATH_COOLDOWN,
    PLAYER_SPEED, WALK_FRAME_LAST,
};
use crate::entities::{Direction, Occupant, WeaponKind};
use crate::grid::try_move_by;
use crate::math::angle_between_points;

use super::input::InputSnapshot;
use super::sfx::Sfx;
use super::Game;

fn facing(dx: i16, dy: i16, previous: Direction) -> Direction {
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

const WEAPON_SLOTS: [WeaponKind; 5] = [
    WeaponKind::BaseRifle,
    WeaponKind::Smg,
    WeaponKind::AssaultRifle,
    WeaponKind::Shotgun,
    WeaponKind::Sawoff,
];

impl Game {
    pub(super) fn player_process(&mut self, input: &InputSnapshot) {
        if self.player.health <= 0 {
            self.player_process_death();
            return;
        }

        if self.player.blink_cooldown > 0 {
            self.player.blink_cooldown -= 1;
        }

        if let Some(ticks) = self.perks.death_clock {
            if ticks <= 1 {
                self.perks.death_clock = None;
                self.player_die();
                return;
            }
            self.perks.death_clock = Some(ticks - 1);
        }

        self.player_process_reload(input);
        self.player_process_movement(input);
        self.player_process_fire(input);
        self.player_process_weapon_keys(input);

        // Manual reload; a full magazine or a running reload ignores it.
        if input.reload && self.player.reload_cooldown == 0 && self.player.ammo < self.player.max_ammo
        {
            self.player.ammo = 0;
            self.player.reload_cooldown = self.player.weapon.reload_cooldown();
        }
    }

    /// Damage funnel for everything that hurts the player. Returns
    /// whether the hit connected (death-clock immortality swallows it).
    pub fn player_take_damage(&mut self, amount: u16) -> bool {
        if self.perks.death_clock.is_some() {
            return false;
        }
        let scaled = u32::from(amount) * u32::from(self.perks.damage_taken_pct) / 100;
        self.player.health -= scaled as i16;
        self.player.blink_cooldown = BLINK_COOLDOWN;
        if self.player.health <= 0 {
            self.player_die();
        }
        true
    }

    pub(super) fn player_die(&mut self) {
        self.player.health = self.player.health.min(0);
        self.player.death_cooldown = PLAYER_DEATH_COOLDOWN;
        self.player.frame = DEATH_FRAME_FIRST;
        self.player.frame_cooldown = 0;
    }

    fn player_process_death(&mut self) {
        self.player.frame_cooldown ^= 1;
        if self.player.frame_cooldown == 0 && self.player.frame < DEATH_FRAME_LAST {
            self.player.frame += 1;
        }
        if self.player.death_cooldown > 0 {
            self.player.death_cooldown -= 1;
            if self.player.death_cooldown == 0 {
                self.game_over = true;
            }
        }
    }

    fn player_process_reload(&mut self, input: &InputSnapshot) {
        if self.player.reload_cooldown <= 0 {
            return;
        }
        let mut decrements = 1;
        if self.perks.anxious_loader && input.fire {
            decrements += 1;
        }
        if self.perks.stationary_reloader && !input.wants_movement() {
            decrements += 1;
        }
        self.player.reload_cooldown -= decrements;
        if self.player.reload_cooldown <= 0 {
            self.player.ammo = self.player.max_ammo;
            self.sfx.push(Sfx::Reload);
        }
    }

    fn player_process_movement(&mut self, input: &InputSnapshot) {
        let mut dx = 0i16;
        let mut dy = 0i16;
        if input.left {
            dx -= PLAYER_SPEED;
        }
        if input.right {
            dx += PLAYER_SPEED;
        }
        if input.up {
            dy -= PLAYER_SPEED;
        }
        if input.down {
            dy += PLAYER_SPEED;
        }
        if dx == 0 && dy == 0 {
            self.player.frame = 0;
            return;
        }

        self.player.direction = facing(dx, dy, self.player.direction);
        // Walk animation at half the tick rate.
        self.player.frame_cooldown ^= 1;
        if self.player.frame_cooldown == 0 {
            self.player.frame = if self.player.frame >= WALK_FRAME_LAST {
                0
            } else {
                self.player.frame + 1
            };
        }

        let mut pos = self.player.pos;
        let enemies = &self.enemies;
        let pickup_pos = self.pickup.pos;
        let player_pos = self.player.pos;
        try_move_by(
            &mut self.grid,
            Occupant::Player,
            &mut pos,
            dx,
            dy,
            |occupant| match occupant {
                Occupant::Player => player_pos,
                Occupant::Enemy(index) => enemies[index].pos,
                Occupant::Pickup => pickup_pos,
            },
            &mut self.diag,
        );
        self.player.pos = pos;
    }

    fn player_process_fire(&mut self, input: &InputSnapshot) {
        if self.player.attack_cooldown > 0 {
            self.player.attack_cooldown -= 1;
            return;
        }
        if self.player.reload_cooldown > 0 {
            return;
        }

        if self.player.ammo == 0 {
            if self.perks.bloody_ammo && input.fire {
                // Empty magazine: pay in blood instead of waiting.
                self.player.health -= 1;
                if self.player.health <= 0 {
                    self.player_die();
                    return;
                }
                self.fire_volley(input);
            } else {
                self.player.reload_cooldown = self.player.weapon.reload_cooldown();
            }
            return;
        }

        if input.fire {
            self.player.ammo -= 1;
            self.fire_volley(input);
        }
    }

    fn fire_volley(&mut self, input: &InputSnapshot) {
        let muzzle_x = self.player.pos.x + COLLISION_SIZE / 2;
        let muzzle_y = self.player.pos.y + COLLISION_SIZE / 2;
        let angle = angle_between_points(muzzle_x, muzzle_y, input.aim_x, input.aim_y);
        self.shoot(muzzle_x, muzzle_y, angle);
        self.player.attack_cooldown = self.player.weapon.fire_cooldown();
    }

    fn player_process_weapon_keys(&mut self, input: &InputSnapshot) {
        let Some(slot) = input.weapon_slot else {
            return;
        };
        let Some(&weapon) = WEAPON_SLOTS.get(usize::from(slot)) else {
            return;
        };
        if weapon == self.player.weapon {
            return;
        }
        self.equip_weapon(weapon);
    }

    pub(super) fn equip_weapon(&mut self, weapon: WeaponKind) {
        self.player.weapon = weapon;
        self.player.max_ammo = self.perks_magazine_size(weapon);
        self.player.ammo = self.player.max_ammo;
        self.player.reload_cooldown = 0;
        self.player.attack_cooldown = weapon.fire_cooldown();
        self.hud_weapon_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PLAYER_HEALTH_MAX, PLAYER_START_X, PLAYER_START_Y};

    fn firing_input(game: &Game) -> InputSnapshot {
        InputSnapshot {
            fire: true,
            aim_x: game.player.pos.x + 100,
            aim_y: game.player.pos.y,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn rifle_empties_then_auto_reloads_without_a_click() {
        let mut game = Game::new(2);
        assert_eq!(game.player.ammo, 10);
        let input = firing_input(&game);
        // Each shot costs one ammo; cooldown is 15 ticks between shots.
        let mut ticks = 0;
        while game.player.ammo > 0 {
            game.player_process(&input);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(game.player.ammo, 0);
        // Keep ticking with no fire press: reload starts by itself.
        let idle = InputSnapshot::default();
        while game.player.attack_cooldown > 0 {
            game.player_process(&idle);
        }
        game.player_process(&idle);
        assert!(game.player.reload_cooldown > 0);
        while game.player.ammo == 0 {
            game.player_process(&idle);
        }
        assert_eq!(game.player.ammo, game.player.max_ammo);
    }

    #[test]
    fn diagonal_movement_is_unnormalized() {
        let mut game = Game::new(2);
        let input = InputSnapshot {
            right: true,
            down: true,
            ..InputSnapshot::default()
        };
        game.player_process(&input);
        assert_eq!(game.player.pos.x, PLAYER_START_X + PLAYER_SPEED as u16);
        assert_eq!(game.player.pos.y, PLAYER_START_Y + PLAYER_SPEED as u16);
        assert_eq!(game.player.direction, Direction::SouthEast);
    }

    #[test]
    fn thick_skin_scales_incoming_damage() {
        let mut game = Game::new(2);
        game.perks.damage_taken_pct = 80;
        game.player_take_damage(10);
        assert_eq!(game.player.health, PLAYER_HEALTH_MAX - 8);
        assert_eq!(game.player.blink_cooldown, BLINK_COOLDOWN);
    }

    #[test]
    fn death_clock_shrugs_off_bites_then_kills() {
        let mut game = Game::new(2);
        game.perks.death_clock = Some(3);
        assert!(!game.player_take_damage(200));
        assert_eq!(game.player.health, PLAYER_HEALTH_MAX);
        let idle = InputSnapshot::default();
        for _ in 0..3 {
            game.player_process(&idle);
        }
        assert!(game.player.health <= 0);
    }

    #[test]
    fn death_runs_the_anim_then_flags_game_over() {
        let mut game = Game::new(2);
        game.player_take_damage(200);
        assert!(game.player.health <= 0);
        let idle = InputSnapshot::default();
        for _ in 0..u32::from(PLAYER_DEATH_COOLDOWN) {
            assert!(!game.game_over);
            game.player_process(&idle);
        }
        assert!(game.game_over);
        assert_eq!(game.player.frame, DEATH_FRAME_LAST);
    }

    #[test]
    fn stationary_reloader_shortens_the_wait() {
        let mut game = Game::new(2);
        game.perks.stationary_reloader = true;
        game.player.reload_cooldown = 30;
        game.player_process(&InputSnapshot::default());
        assert_eq!(game.player.reload_cooldown, 28);
        let moving = InputSnapshot {
            up: true,
            ..InputSnapshot::default()
        };
        game.player_process(&moving);
        assert_eq!(game.player.reload_cooldown, 27);
    }

    #[test]
    fn manual_reload_dumps_the_magazine_and_starts_the_timer() {
        let mut game = Game::new(2);
        game.player.ammo = 4;
        let input = InputSnapshot {
            reload: true,
            ..InputSnapshot::default()
        };
        game.player_process(&input);
        assert_eq!(game.player.ammo, 0);
        assert_eq!(
            game.player.reload_cooldown,
            game.player.weapon.reload_cooldown()
        );
        // Pressing again mid-reload does not restart the timer.
        game.player_process(&input);
        assert!(game.player.reload_cooldown < game.player.weapon.reload_cooldown());
    }

    #[test]
    fn weapon_keys_swap_and_refill() {
        let mut game = Game::new(2);
        let input = InputSnapshot {
            weapon_slot: Some(3),
            ..InputSnapshot::default()
        };
        game.player_process(&input);
        assert_eq!(game.player.weapon, WeaponKind::Shotgun);
        assert_eq!(game.player.ammo, WeaponKind::Shotgun.base_magazine());
    }
}
