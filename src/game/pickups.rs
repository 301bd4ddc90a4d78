//! The single shared pickup slot. An enemy kill rolls for a drop; the
//! drop sits where the corpse fell, blinks out its last seconds and
//! re-arms the slot only after despawning.

use rand::Rng;

use crate::assets::PICKUP_ICON_SIZE;
use crate::config::{
    COLLISION_SIZE, MAP_HEIGHT, MAP_WIDTH, PICKUP_BLINK_PERIOD, PICKUP_BLINK_TICKS,
    PICKUP_DROP_ROLL, PICKUP_HEAL_AMOUNT, PICKUP_LIFETIME, PLAYER_HEALTH_MAX,
};
use crate::entities::{Coord, Occupant, PickupKind, PickupState};

use super::Game;

impl Game {
    /// Drop roll on an enemy kill: roughly one in eight corpses leaves
    /// something behind, and only while the slot is idle.
    pub(super) fn pickup_maybe_seed(&mut self, pos: Coord) {
        if self.pickup.state != PickupState::Inactive {
            return;
        }
        if self.rng.gen_range(0..PICKUP_DROP_ROLL) != 0 {
            return;
        }
        self.pickup.kind = self.pickup_roll_kind();
        self.pickup.pos = Coord::new(
            pos.x.min(MAP_WIDTH - PICKUP_ICON_SIZE),
            pos.y.min(MAP_HEIGHT - PICKUP_ICON_SIZE),
        );
        self.pickup.state = PickupState::ReadyToSpawn;
    }

    /// Weighted kind roll out of 16; the Favourite Weapon perk vetoes
    /// weapon drops entirely.
    fn pickup_roll_kind(&mut self) -> PickupKind {
        if self.perks.favourite_weapon {
            return if self.rng.gen::<bool>() {
                PickupKind::Bandage
            } else {
                PickupKind::AmmoCrate
            };
        }
        match self.rng.gen_range(0u8..16) {
            0..=4 => PickupKind::Bandage,
            5..=9 => PickupKind::AmmoCrate,
            10 | 11 => PickupKind::WeaponSmg,
            12 | 13 => PickupKind::WeaponAssaultRifle,
            14 => PickupKind::WeaponShotgun,
            _ => PickupKind::WeaponSawoff,
        }
    }

    pub(super) fn pickups_process(&mut self) {
        match self.pickup.state {
            PickupState::Inactive => {}
            PickupState::ReadyToSpawn => self.pickup_activate(),
            PickupState::Active => self.pickup_process_active(),
        }
    }

    fn pickup_activate(&mut self) {
        // Wait for the corpse cell to clear before materialising.
        if !self.grid.is_free_at(self.pickup.pos) {
            return;
        }
        self.grid
            .write(self.pickup.pos, Occupant::Pickup, &mut self.diag);
        self.pickup.state = PickupState::Active;
        self.pickup.life = PICKUP_LIFETIME;
        self.pickup.blink_cooldown = 0;
        self.pickup.is_displayed = true;
    }

    fn pickup_process_active(&mut self) {
        let dx = self.player.pos.x as i16 - self.pickup.pos.x as i16;
        let dy = self.player.pos.y as i16 - self.pickup.pos.y as i16;
        let reach = COLLISION_SIZE as i16;
        if (-reach..=reach).contains(&dx) && (-reach..=reach).contains(&dy) {
            self.pickup_collect();
            return;
        }

        if self.pickup.life == 0 {
            self.pickup_despawn();
            return;
        }
        self.pickup.life -= 1;

        if self.pickup.life < PICKUP_BLINK_TICKS {
            if self.pickup.blink_cooldown == 0 {
                self.pickup.blink_cooldown = PICKUP_BLINK_PERIOD;
                self.pickup.is_displayed = !self.pickup.is_displayed;
            }
            self.pickup.blink_cooldown -= 1;
        }
    }

    fn pickup_collect(&mut self) {
        match self.pickup.kind {
            PickupKind::Bandage => {
                self.player.health =
                    (self.player.health + PICKUP_HEAL_AMOUNT).min(PLAYER_HEALTH_MAX);
            }
            PickupKind::AmmoCrate => {
                self.player.ammo = self.player.max_ammo;
                self.player.reload_cooldown = 0;
            }
            kind => {
                if let Some(weapon) = kind.weapon() {
                    self.equip_weapon(weapon);
                }
            }
        }
        self.pickup_despawn();
    }

    pub(super) fn pickup_despawn(&mut self) {
        self.grid
            .erase(self.pickup.pos, Occupant::Pickup, &mut self.diag);
        self.pickup.state = PickupState::Inactive;
        self.pickup.is_displayed = false;
    }
}
