//! Perk catalog and application. Perks mutate simulation parameters
//! (magazine size, damage taken, reload speed) or fire a one-shot
//! effect; some lock or re-unlock others, so availability lives in a
//! table evaluated when a perk is taken, not in the declarations.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::config::{
    PERK_BANDAGE_HEAL, PERK_CHOICE_COUNT, PERK_DEATH_CLOCK_TICKS, PERK_FATAL_LOTTERY_EXP,
    PERK_INSTANT_WINNER_EXP, PLAYER_HEALTH_MAX, WEAPON_MAX_BULLETS_IN_MAGAZINE,
};
use crate::entities::WeaponKind;

use super::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerkId {
    GrimDeal,
    FatalLottery,
    InstantWinner,
    Bandage,
    ThickSkinned,
    DeathClock,
    Retaliation,
    AmmoManiac,
    MyFavouriteWeapon,
    AnxiousLoader,
    StationaryReloader,
    BloodyAmmo,
    Dodger,
}

pub const PERK_COUNT: usize = 13;

pub const ALL_PERKS: [PerkId; PERK_COUNT] = [
    PerkId::GrimDeal,
    PerkId::FatalLottery,
    PerkId::InstantWinner,
    PerkId::Bandage,
    PerkId::ThickSkinned,
    PerkId::DeathClock,
    PerkId::Retaliation,
    PerkId::AmmoManiac,
    PerkId::MyFavouriteWeapon,
    PerkId::AnxiousLoader,
    PerkId::StationaryReloader,
    PerkId::BloodyAmmo,
    PerkId::Dodger,
];

impl PerkId {
    pub fn index(self) -> usize {
        ALL_PERKS.iter().position(|&p| p == self).unwrap_or(0)
    }

    /// Perks that may be taken again after being picked.
    pub fn is_multi_use(self) -> bool {
        matches!(
            self,
            PerkId::FatalLottery | PerkId::InstantWinner | PerkId::Bandage
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            PerkId::GrimDeal => "GRIM DEAL",
            PerkId::FatalLottery => "FATAL LOTTERY",
            PerkId::InstantWinner => "INSTANT WINNER",
            PerkId::Bandage => "BANDAGE",
            PerkId::ThickSkinned => "THICK SKINNED",
            PerkId::DeathClock => "DEATH CLOCK",
            PerkId::Retaliation => "RETALIATION",
            PerkId::AmmoManiac => "AMMO MANIAC",
            PerkId::MyFavouriteWeapon => "MY FAVOURITE WEAPON",
            PerkId::AnxiousLoader => "ANXIOUS LOADER",
            PerkId::StationaryReloader => "STATIONARY RELOADER",
            PerkId::BloodyAmmo => "BLOODY AMMO",
            PerkId::Dodger => "DODGER",
        }
    }

    fn unlock_level(self) -> u16 {
        match self {
            PerkId::BloodyAmmo => 3,
            PerkId::FatalLottery => 5,
            PerkId::DeathClock => 7,
            _ => 0,
        }
    }

    /// Taking the perk on the left locks every perk on the right.
    fn excludes(self) -> &'static [PerkId] {
        match self {
            PerkId::DeathClock => &[
                PerkId::FatalLottery,
                PerkId::GrimDeal,
                PerkId::Bandage,
                PerkId::BloodyAmmo,
            ],
            PerkId::BloodyAmmo => &[PerkId::DeathClock],
            _ => &[],
        }
    }
}

/// Availability table plus the accumulated passive modifiers.
pub struct Perks {
    available: [bool; PERK_COUNT],
    pub pending_choices: u8,
    pub choice: [Option<PerkId>; PERK_CHOICE_COUNT],
    /// The rolled choice survives closing the menu; reopening must not
    /// reroll it.
    pub choice_prepared: bool,
    /// Set when the player backs out of the menu; keeps the play state
    /// from pushing it right back.
    pub prompt_deferred: bool,

    pub exp_bonus_pct: u32,
    pub damage_taken_pct: u16,
    pub death_clock: Option<u16>,
    pub retaliation: bool,
    pub favourite_weapon: bool,
    pub ammo_maniac: bool,
    pub anxious_loader: bool,
    pub stationary_reloader: bool,
    pub bloody_ammo: bool,
    pub dodger: bool,
}

impl Perks {
    pub fn new() -> Self {
        let mut perks = Self {
            available: [false; PERK_COUNT],
            pending_choices: 0,
            choice: [None; PERK_CHOICE_COUNT],
            choice_prepared: false,
            prompt_deferred: false,
            exp_bonus_pct: 0,
            damage_taken_pct: 100,
            death_clock: None,
            retaliation: false,
            favourite_weapon: false,
            ammo_maniac: false,
            anxious_loader: false,
            stationary_reloader: false,
            bloody_ammo: false,
            dodger: false,
        };
        perks.unlock_for_level(1);
        perks
    }

    pub fn is_available(&self, perk: PerkId) -> bool {
        self.available[perk.index()]
    }

    pub fn unlock(&mut self, perk: PerkId) {
        self.available[perk.index()] = true;
    }

    pub fn lock(&mut self, perk: PerkId) {
        self.available[perk.index()] = false;
    }

    pub fn unlock_for_level(&mut self, level: u16) {
        for perk in ALL_PERKS {
            if perk.unlock_level() <= level && !self.is_taken_exclusive(perk) {
                self.unlock(perk);
            }
        }
    }

    fn is_taken_exclusive(&self, perk: PerkId) -> bool {
        // Locked-by-exclusion perks must not come back on level-up.
        match perk {
            PerkId::DeathClock => self.bloody_ammo,
            PerkId::FatalLottery | PerkId::GrimDeal | PerkId::Bandage | PerkId::BloodyAmmo => {
                self.death_clock.is_some()
            }
            PerkId::ThickSkinned => self.damage_taken_pct < 100,
            PerkId::Retaliation => self.retaliation,
            PerkId::AmmoManiac => self.ammo_maniac,
            PerkId::MyFavouriteWeapon => self.favourite_weapon,
            PerkId::AnxiousLoader => self.anxious_loader,
            PerkId::StationaryReloader => self.stationary_reloader,
            PerkId::Dodger => self.dodger,
            _ => false,
        }
    }

    /// Rolls up to four distinct perks from the available set by
    /// rejection sampling.
    pub fn prepare_choice(&mut self, rng: &mut SmallRng) {
        self.choice = [None; PERK_CHOICE_COUNT];
        self.choice_prepared = true;
        let available_count = self.available.iter().filter(|&&a| a).count();
        let want = PERK_CHOICE_COUNT.min(available_count);
        let mut picked = 0;
        while picked < want {
            let candidate = ALL_PERKS[rng.gen_range(0..PERK_COUNT)];
            if !self.is_available(candidate) {
                continue;
            }
            if self.choice[..picked].contains(&Some(candidate)) {
                continue;
            }
            self.choice[picked] = Some(candidate);
            picked += 1;
        }
    }
}

impl Default for Perks {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Effective magazine size for `weapon` with perk bonuses applied.
    pub fn perks_magazine_size(&self, weapon: WeaponKind) -> u8 {
        let mut size = u16::from(weapon.base_magazine());
        if self.perks.favourite_weapon {
            size += 2;
        }
        if self.perks.ammo_maniac {
            size = size * 6 / 5;
        }
        size.min(u16::from(WEAPON_MAX_BULLETS_IN_MAGAZINE)) as u8
    }

    /// Consumes one pending choice and mutates state per the chosen
    /// perk. Single-use perks lock themselves; exclusive perks lock
    /// their counterparts.
    pub fn apply_perk(&mut self, perk: PerkId) {
        self.perks.pending_choices = self.perks.pending_choices.saturating_sub(1);
        self.perks.choice_prepared = false;
        self.perks.prompt_deferred = false;
        if !perk.is_multi_use() {
            self.perks.lock(perk);
        }
        for &locked in perk.excludes() {
            self.perks.lock(locked);
        }

        match perk {
            PerkId::GrimDeal => {
                self.perks.exp_bonus_pct += 20;
                let bonus = self.score / 5;
                self.score_add_large(bonus);
                self.player_die();
            }
            PerkId::FatalLottery => {
                if self.rng.gen::<bool>() {
                    self.score_add_large(PERK_FATAL_LOTTERY_EXP);
                } else {
                    self.player_die();
                }
            }
            PerkId::InstantWinner => {
                self.score_add_large(PERK_INSTANT_WINNER_EXP);
            }
            PerkId::Bandage => {
                self.player.health =
                    (self.player.health + PERK_BANDAGE_HEAL).min(PLAYER_HEALTH_MAX);
            }
            PerkId::ThickSkinned => {
                self.player.health -= PLAYER_HEALTH_MAX / 4;
                self.perks.damage_taken_pct = 80;
            }
            PerkId::DeathClock => {
                self.perks.death_clock = Some(PERK_DEATH_CLOCK_TICKS);
            }
            PerkId::Retaliation => self.perks.retaliation = true,
            PerkId::AmmoManiac => {
                self.perks.ammo_maniac = true;
                self.player.max_ammo = self.perks_magazine_size(self.player.weapon);
            }
            PerkId::MyFavouriteWeapon => {
                self.perks.favourite_weapon = true;
                self.player.max_ammo = self.perks_magazine_size(self.player.weapon);
            }
            PerkId::AnxiousLoader => self.perks.anxious_loader = true,
            PerkId::StationaryReloader => self.perks.stationary_reloader = true,
            PerkId::BloodyAmmo => self.perks.bloody_ammo = true,
            PerkId::Dodger => self.perks.dodger = true,
        }
    }

    /// Score gain with the Grim Deal experience bonus folded in.
    pub fn add_exp(&mut self, base: u32) {
        let amount = base + base * self.perks.exp_bonus_pct / 100;
        self.score_add_small(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_clock_locks_its_exclusions() {
        let mut game = Game::new(3);
        game.perks.unlock_for_level(7);
        game.apply_perk(PerkId::DeathClock);
        assert!(game.perks.death_clock.is_some());
        for perk in [
            PerkId::FatalLottery,
            PerkId::GrimDeal,
            PerkId::Bandage,
            PerkId::BloodyAmmo,
        ] {
            assert!(!game.perks.is_available(perk));
        }
        // Level-up must not resurrect them.
        game.perks.unlock_for_level(9);
        assert!(!game.perks.is_available(PerkId::Bandage));
    }

    #[test]
    fn bandage_stays_available_after_use() {
        let mut game = Game::new(3);
        game.player.health = 50;
        game.apply_perk(PerkId::Bandage);
        assert_eq!(game.player.health, 50 + PERK_BANDAGE_HEAL);
        assert!(game.perks.is_available(PerkId::Bandage));
    }

    #[test]
    fn bandage_never_overheals() {
        let mut game = Game::new(3);
        game.player.health = PLAYER_HEALTH_MAX - 1;
        game.apply_perk(PerkId::Bandage);
        assert_eq!(game.player.health, PLAYER_HEALTH_MAX);
    }

    #[test]
    fn magazine_bonuses_stack_and_clamp() {
        let mut game = Game::new(3);
        game.apply_perk(PerkId::MyFavouriteWeapon);
        // Rifle: 10 + 2 favourite = 12.
        assert_eq!(game.perks_magazine_size(WeaponKind::BaseRifle), 12);
        game.apply_perk(PerkId::AmmoManiac);
        // 12 * 1.2 = 14; SMG would overflow the pip row and clamps.
        assert_eq!(game.perks_magazine_size(WeaponKind::BaseRifle), 14);
        assert_eq!(
            game.perks_magazine_size(WeaponKind::Smg),
            WEAPON_MAX_BULLETS_IN_MAGAZINE
        );
    }

    #[test]
    fn prepare_choice_yields_distinct_available_perks() {
        let mut game = Game::new(11);
        game.perks.prepare_choice(&mut game.rng);
        let picks: Vec<PerkId> = game.perks.choice.iter().flatten().copied().collect();
        assert_eq!(picks.len(), PERK_CHOICE_COUNT);
        for (i, a) in picks.iter().enumerate() {
            assert!(game.perks.is_available(*a));
            assert!(!picks[i + 1..].contains(a));
        }
    }

    #[test]
    fn level_gated_perks_arrive_on_time() {
        let perks = Perks::new();
        assert!(!perks.is_available(PerkId::FatalLottery));
        assert!(!perks.is_available(PerkId::DeathClock));
        assert!(perks.is_available(PerkId::Bandage));
        let mut perks = Perks::new();
        perks.unlock_for_level(5);
        assert!(perks.is_available(PerkId::FatalLottery));
        assert!(!perks.is_available(PerkId::DeathClock));
    }

    #[test]
    fn grim_deal_pays_then_kills() {
        let mut game = Game::new(3);
        game.score = 1000;
        game.apply_perk(PerkId::GrimDeal);
        assert_eq!(game.score, 1200);
        assert!(game.player.health <= 0);
        // Later exp gains keep the 20% bonus.
        game.player.health = 1;
        game.add_exp(100);
        assert_eq!(game.score, 1320);
    }
}
