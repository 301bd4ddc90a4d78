//! Incremental HUD redraw. The HUD strip is its own small bitmap and
//! only one piece of it changes per call: the machine walks its states,
//! draws the first thing that is out of date and comes back next tick.
//! A full repaint every tick would eat redraw time the playfield needs.

use crate::config::{
    COLOR_BAR_BG, COLOR_BULLET, COLOR_HUD_BG, COLOR_HUD_HP, COLOR_HUD_SCORE, HUD_AMMO_BULLET_SIZE_X,
    HUD_AMMO_BULLET_SIZE_Y, HUD_AMMO_FIELD_OFFSET_X, HUD_AMMO_FIELD_OFFSET_Y,
    HUD_AMMO_MAX_PIPS_PER_VISIT, HUD_AMMO_ROWS, HUD_BADGE_OFFSET_X, HUD_BADGE_OFFSET_Y,
    HUD_BADGE_SIZE, HUD_HEALTH_BAR_OFFSET_X, HUD_HEALTH_BAR_OFFSET_Y, HUD_HEALTH_BAR_SIZE_Y,
    HUD_HEIGHT, HUD_LEVEL_DIGITS, HUD_SCORE_BAR_OFFSET_X, HUD_SCORE_BAR_OFFSET_Y,
    HUD_SCORE_BAR_SIZE_X, HUD_SCORE_BAR_SIZE_Y, HUD_SCORE_DIGITS, HUD_SCORE_TEXT_X,
    HUD_SCORE_TEXT_Y, HUD_WEAPON_SIZE_X, HUD_WEAPON_SIZE_Y, PLAYER_HEALTH_MAX,
};
use crate::entities::WeaponKind;
use crate::gfx::draw_number;

use super::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HudState {
    LevelUpBadge,
    HealthBar,
    WeaponIcon,
    AmmoPips,
    PrepareExpText,
    DrawExpText,
    ExpBar,
    PrepareLevelText,
    DrawLevelText,
}

const HUD_STATE_COUNT: usize = 9;

impl HudState {
    fn next(self) -> Self {
        match self {
            HudState::LevelUpBadge => HudState::HealthBar,
            HudState::HealthBar => HudState::WeaponIcon,
            HudState::WeaponIcon => HudState::AmmoPips,
            HudState::AmmoPips => HudState::PrepareExpText,
            HudState::PrepareExpText => HudState::DrawExpText,
            HudState::DrawExpText => HudState::ExpBar,
            HudState::ExpBar => HudState::PrepareLevelText,
            HudState::PrepareLevelText => HudState::DrawLevelText,
            HudState::DrawLevelText => HudState::LevelUpBadge,
        }
    }
}

pub struct HudMachine {
    state: HudState,
    shown_badge: bool,
    shown_health: i16,
    shown_weapon: Option<WeaponKind>,
    shown_pips: u8,
    pending_score: u32,
    shown_score: Option<u32>,
    shown_exp_px: u16,
    pending_level: u16,
    shown_level: Option<u16>,
}

impl HudMachine {
    pub fn new() -> Self {
        Self {
            state: HudState::LevelUpBadge,
            shown_badge: false,
            shown_health: -1,
            shown_weapon: None,
            shown_pips: 0,
            pending_score: 0,
            shown_score: None,
            shown_exp_px: u16::MAX,
            pending_level: 0,
            shown_level: None,
        }
    }
}

impl Default for HudMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Wipes the strip and invalidates every cache; the machine then
    /// repaints one piece per tick over the next few frames.
    pub(super) fn hud_full_redraw(&mut self) {
        self.hud_bitmap
            .fill_rect(0, 0, self.hud_bitmap.width(), HUD_HEIGHT, COLOR_HUD_BG);
        self.hud = HudMachine::new();
    }

    pub(super) fn hud_weapon_changed(&mut self) {
        self.hud.shown_weapon = None;
    }

    /// One HUD step. Returns whether anything was drawn; with nothing
    /// out of date the machine walks its full cycle and reports quiet.
    pub fn hud_process(&mut self) -> bool {
        for _ in 0..HUD_STATE_COUNT {
            let drew = match self.hud.state {
                HudState::LevelUpBadge => self.hud_step_badge(),
                HudState::HealthBar => self.hud_step_health(),
                HudState::WeaponIcon => self.hud_step_weapon(),
                HudState::AmmoPips => self.hud_step_ammo(),
                HudState::PrepareExpText => self.hud_step_prepare_exp(),
                HudState::DrawExpText => self.hud_step_draw_exp(),
                HudState::ExpBar => self.hud_step_exp_bar(),
                HudState::PrepareLevelText => self.hud_step_prepare_level(),
                HudState::DrawLevelText => self.hud_step_draw_level(),
            };
            if drew {
                return true;
            }
            self.hud.state = self.hud.state.next();
        }
        false
    }

    fn hud_step_badge(&mut self) -> bool {
        let want = self.perks.pending_choices > 0;
        if want == self.hud.shown_badge {
            return false;
        }
        if want {
            self.hud_bitmap.blit_copy(
                &self.assets.badge,
                0,
                0,
                HUD_BADGE_OFFSET_X,
                HUD_BADGE_OFFSET_Y,
                HUD_BADGE_SIZE,
                HUD_BADGE_SIZE,
            );
        } else {
            self.hud_bitmap.fill_rect(
                HUD_BADGE_OFFSET_X,
                HUD_BADGE_OFFSET_Y,
                HUD_BADGE_SIZE,
                HUD_BADGE_SIZE,
                COLOR_HUD_BG,
            );
        }
        self.hud.shown_badge = want;
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_health(&mut self) -> bool {
        let health = self.player.health.clamp(0, PLAYER_HEALTH_MAX);
        if health == self.hud.shown_health {
            return false;
        }
        let filled = health as u16;
        self.hud_bitmap.fill_rect(
            HUD_HEALTH_BAR_OFFSET_X,
            HUD_HEALTH_BAR_OFFSET_Y,
            filled,
            HUD_HEALTH_BAR_SIZE_Y,
            COLOR_HUD_HP,
        );
        self.hud_bitmap.fill_rect(
            HUD_HEALTH_BAR_OFFSET_X + filled,
            HUD_HEALTH_BAR_OFFSET_Y,
            PLAYER_HEALTH_MAX as u16 - filled,
            HUD_HEALTH_BAR_SIZE_Y,
            COLOR_BAR_BG,
        );
        self.hud.shown_health = health;
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_weapon(&mut self) -> bool {
        let weapon = self.player.weapon;
        if self.hud.shown_weapon == Some(weapon) {
            return false;
        }
        self.hud_bitmap.blit_copy(
            &self.assets.weapon_icons,
            0,
            weapon.index() as u16 * HUD_WEAPON_SIZE_Y,
            0,
            0,
            HUD_WEAPON_SIZE_X,
            HUD_WEAPON_SIZE_Y,
        );
        self.hud.shown_weapon = Some(weapon);
        // Every pip belongs to the new weapon now.
        self.hud.shown_pips = 0;
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_ammo(&mut self) -> bool {
        let target = self.player.ammo;
        if target == self.hud.shown_pips {
            return false;
        }
        let mut changed = 0;
        while self.hud.shown_pips != target && changed < HUD_AMMO_MAX_PIPS_PER_VISIT {
            let (pip, lit) = if self.hud.shown_pips < target {
                (self.hud.shown_pips, true)
            } else {
                (self.hud.shown_pips - 1, false)
            };
            let col = u16::from(pip) / HUD_AMMO_ROWS;
            let row = u16::from(pip) % HUD_AMMO_ROWS;
            self.hud_bitmap.fill_rect(
                HUD_AMMO_FIELD_OFFSET_X + col * (HUD_AMMO_BULLET_SIZE_X + 1),
                HUD_AMMO_FIELD_OFFSET_Y + row * (HUD_AMMO_BULLET_SIZE_Y + 1),
                HUD_AMMO_BULLET_SIZE_X,
                HUD_AMMO_BULLET_SIZE_Y,
                if lit { COLOR_BULLET } else { COLOR_HUD_BG },
            );
            if lit {
                self.hud.shown_pips += 1;
            } else {
                self.hud.shown_pips -= 1;
            }
            changed += 1;
        }
        // Stay on this state while pips remain; the cap keeps a full
        // magazine swap from hogging the frame.
        if self.hud.shown_pips == target {
            self.hud.state = self.hud.state.next();
        }
        true
    }

    fn hud_step_prepare_exp(&mut self) -> bool {
        if self.hud.shown_score == Some(self.score) {
            return false;
        }
        self.hud.pending_score = self.score;
        self.hud_bitmap.fill_rect(
            HUD_SCORE_TEXT_X,
            HUD_SCORE_TEXT_Y,
            HUD_SCORE_DIGITS * 6,
            7,
            COLOR_HUD_BG,
        );
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_draw_exp(&mut self) -> bool {
        draw_number(
            &mut self.hud_bitmap,
            HUD_SCORE_TEXT_X,
            HUD_SCORE_TEXT_Y,
            self.hud.pending_score,
            COLOR_HUD_SCORE,
        );
        self.hud.shown_score = Some(self.hud.pending_score);
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_exp_bar(&mut self) -> bool {
        let span_start = if self.level <= 1 {
            0
        } else {
            self.next_level_score / 2
        };
        let span = self.next_level_score - span_start;
        let into = self.score.saturating_sub(span_start).min(span);
        let filled = (into * u32::from(HUD_SCORE_BAR_SIZE_X) / span.max(1)) as u16;
        if filled == self.hud.shown_exp_px {
            return false;
        }
        self.hud_bitmap.fill_rect(
            HUD_SCORE_BAR_OFFSET_X,
            HUD_SCORE_BAR_OFFSET_Y,
            filled,
            HUD_SCORE_BAR_SIZE_Y,
            COLOR_HUD_SCORE,
        );
        self.hud_bitmap.fill_rect(
            HUD_SCORE_BAR_OFFSET_X + filled,
            HUD_SCORE_BAR_OFFSET_Y,
            HUD_SCORE_BAR_SIZE_X - filled,
            HUD_SCORE_BAR_SIZE_Y,
            COLOR_BAR_BG,
        );
        self.hud.shown_exp_px = filled;
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_prepare_level(&mut self) -> bool {
        if self.hud.shown_level == Some(self.level) {
            return false;
        }
        self.hud.pending_level = self.level;
        self.hud_bitmap.fill_rect(
            HUD_SCORE_TEXT_X + HUD_SCORE_DIGITS * 6 + 4,
            HUD_SCORE_TEXT_Y,
            HUD_LEVEL_DIGITS * 6,
            7,
            COLOR_HUD_BG,
        );
        self.hud.state = self.hud.state.next();
        true
    }

    fn hud_step_draw_level(&mut self) -> bool {
        draw_number(
            &mut self.hud_bitmap,
            HUD_SCORE_TEXT_X + HUD_SCORE_DIGITS * 6 + 4,
            HUD_SCORE_TEXT_Y,
            u32::from(self.hud.pending_level),
            COLOR_HUD_SCORE,
        );
        self.hud.shown_level = Some(self.hud.pending_level);
        self.hud.state = self.hud.state.next();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_goes_quiet_once_everything_is_drawn() {
        let mut game = Game::new(8);
        let mut budget = 0;
        while game.hud_process() {
            budget += 1;
            assert!(budget < 100, "hud never settled");
        }
        // Quiescent: a full pass with no game change draws nothing.
        assert!(!game.hud_process());
        assert!(!game.hud_process());
    }

    #[test]
    fn one_piece_redraws_per_call() {
        let mut game = Game::new(8);
        while game.hud_process() {}
        game.player.health = 57;
        game.score_add_small(30);
        // Health and score are both stale, but a single call only
        // touches one of them.
        assert!(game.hud_process());
        assert!(game.hud_process());
        assert!(game.hud_process());
        while game.hud_process() {}
        assert!(!game.hud_process());
    }

    #[test]
    fn magazine_swap_lights_pips_in_batches() {
        let mut game = Game::new(8);
        while game.hud_process() {}
        game.player.ammo = 0;
        while game.hud_process() {}
        game.player.ammo = 10;
        let mut visits = 0;
        while game.hud.shown_pips != 10 {
            assert!(game.hud_process());
            visits += 1;
            assert!(visits <= 4);
        }
        assert_eq!(visits, 3);
    }

    #[test]
    fn badge_appears_with_a_pending_perk_and_clears_after() {
        let mut game = Game::new(8);
        while game.hud_process() {}
        game.perks.pending_choices = 1;
        assert!(game.hud_process());
        assert!(game.hud.shown_badge);
        game.perks.pending_choices = 0;
        while game.hud_process() {}
        assert!(!game.hud.shown_badge);
    }
}
