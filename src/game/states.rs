//! The concrete mode states: play, pause, perk choice and game over.
//! Pause and perk choice sit on top of play, so resuming never rebuilds
//! the world.

use std::path::PathBuf;

use log::{info, warn};

use crate::config::PERK_CHOICE_COUNT;
use crate::hiscore::HiscoreTable;
use crate::state::{State, Transition};

use super::input::InputSnapshot;
use super::perks::PerkId;
use super::Game;

pub const HISCORE_FILE: &str = "hiscore.json";

pub struct PlayState;

impl State for PlayState {
    fn on_tick(&mut self, game: &mut Game, input: &InputSnapshot) -> Transition {
        if input.quit {
            return Transition::Quit;
        }
        if input.pause {
            return Transition::Push(Box::new(PauseState));
        }

        game.update(input);

        if game.game_over {
            return Transition::Switch(Box::new(GameOverState::new()));
        }
        if game.perks.pending_choices > 0 && !game.perks.prompt_deferred {
            return Transition::Push(Box::new(PerkChoiceState::new()));
        }
        // A deferred choice reopens on confirm while the badge shows.
        if game.perks.pending_choices > 0 && input.confirm {
            game.perks.prompt_deferred = false;
        }
        Transition::Stay
    }

    fn on_resume(&mut self, game: &mut Game) {
        // Whatever covered us scribbled over both buffers.
        game.hud_full_redraw();
    }
}

pub struct PauseState;

impl State for PauseState {
    fn on_tick(&mut self, _game: &mut Game, input: &InputSnapshot) -> Transition {
        if input.quit {
            return Transition::Quit;
        }
        if input.pause || input.confirm {
            return Transition::Pop;
        }
        Transition::Stay
    }
}

pub struct PerkChoiceState {
    pub selected: usize,
}

impl PerkChoiceState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    fn selected_perk(&self, game: &Game) -> Option<PerkId> {
        game.perks.choice.get(self.selected).copied().flatten()
    }
}

impl Default for PerkChoiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for PerkChoiceState {
    fn on_enter(&mut self, game: &mut Game) {
        if !game.perks.choice_prepared {
            game.perks.unlock_for_level(game.level);
            game.perks.prepare_choice(&mut game.rng);
        }
    }

    fn on_tick(&mut self, game: &mut Game, input: &InputSnapshot) -> Transition {
        if let Some(pick) = input.choice {
            if usize::from(pick) < PERK_CHOICE_COUNT {
                self.selected = usize::from(pick);
            }
        }
        if input.pause {
            // Back out; the badge keeps nagging and the roll is kept.
            game.perks.prompt_deferred = true;
            return Transition::Pop;
        }
        if input.confirm {
            if let Some(perk) = self.selected_perk(game) {
                info!("perk taken: {}", perk.title());
                game.apply_perk(perk);
                return Transition::Pop;
            }
        }
        Transition::Stay
    }
}

pub struct GameOverState {
    hiscore_path: PathBuf,
    table: HiscoreTable,
    qualified: bool,
    pub entry_name: String,
    saved: bool,
}

impl GameOverState {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(HISCORE_FILE))
    }

    pub fn with_path(hiscore_path: PathBuf) -> Self {
        Self {
            hiscore_path,
            table: HiscoreTable::default(),
            qualified: false,
            entry_name: String::from("PLAYER"),
            saved: false,
        }
    }

    pub fn is_entering_new_record(&self) -> bool {
        self.qualified && !self.saved
    }
}

impl Default for GameOverState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for GameOverState {
    fn on_enter(&mut self, game: &mut Game) {
        self.table = HiscoreTable::load(&self.hiscore_path);
        self.qualified = self.table.qualifies(game.score);
        info!(
            "game over: score {} level {} kills {} (hiscore: {})",
            game.score, game.level, game.kills, self.qualified
        );
    }

    fn on_tick(&mut self, game: &mut Game, input: &InputSnapshot) -> Transition {
        if input.quit {
            return Transition::Quit;
        }
        if !input.confirm {
            return Transition::Stay;
        }
        if self.is_entering_new_record() {
            let rank = self.table.insert(&self.entry_name, game.score, game.level);
            if let Err(err) = self.table.save(&self.hiscore_path) {
                warn!("could not persist hiscore table: {err}");
            }
            info!("hiscore rank {}", rank + 1);
            self.saved = true;
            return Transition::Stay;
        }
        game.start();
        Transition::Switch(Box::new(PlayState))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateStack;

    fn confirm() -> InputSnapshot {
        InputSnapshot {
            confirm: true,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn level_up_pushes_the_perk_menu_and_choice_applies() {
        let mut game = Game::new(21);
        let mut stack = StateStack::new(Box::new(PlayState), &mut game);
        game.score_add_small(2000);
        assert_eq!(game.perks.pending_choices, 1);
        // Next play tick pushes the menu and prepares a roll.
        assert!(stack.tick(&mut game, &InputSnapshot::default()));
        assert!(game.perks.choice_prepared);
        // Confirming the default pick spends the pending choice.
        assert!(stack.tick(&mut game, &confirm()));
        assert_eq!(game.perks.pending_choices, 0);
    }

    #[test]
    fn backing_out_keeps_the_roll_and_defers_the_prompt() {
        let mut game = Game::new(21);
        let mut stack = StateStack::new(Box::new(PlayState), &mut game);
        game.score_add_small(2000);
        stack.tick(&mut game, &InputSnapshot::default());
        let rolled = game.perks.choice;
        let escape = InputSnapshot {
            pause: true,
            ..InputSnapshot::default()
        };
        stack.tick(&mut game, &escape);
        assert!(game.perks.prompt_deferred);
        assert_eq!(game.perks.pending_choices, 1);
        // Play resumes without the menu bouncing straight back.
        stack.tick(&mut game, &InputSnapshot::default());
        assert_eq!(game.perks.choice, rolled);
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut game = Game::new(21);
        let mut stack = StateStack::new(Box::new(PlayState), &mut game);
        let pause = InputSnapshot {
            pause: true,
            ..InputSnapshot::default()
        };
        stack.tick(&mut game, &pause);
        let tick_before = game.tick;
        stack.tick(&mut game, &InputSnapshot::default());
        stack.tick(&mut game, &InputSnapshot::default());
        assert_eq!(game.tick, tick_before);
        stack.tick(&mut game, &pause);
        stack.tick(&mut game, &InputSnapshot::default());
        assert_eq!(game.tick, tick_before + 1);
    }

    #[test]
    fn game_over_restarts_into_a_fresh_run() {
        let dir = std::env::temp_dir().join("survivor-gameover-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(HISCORE_FILE);
        std::fs::remove_file(&path).ok();

        let mut game = Game::new(21);
        game.score = 0;
        game.game_over = true;
        let mut over = GameOverState::with_path(path.clone());
        over.on_enter(&mut game);
        // Score zero never qualifies; confirm restarts immediately.
        assert!(!over.is_entering_new_record());
        match over.on_tick(&mut game, &confirm()) {
            Transition::Switch(_) => {}
            _ => panic!("expected a restart"),
        }
        assert!(!game.game_over);
        assert_eq!(game.tick, 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn qualifying_score_saves_before_restarting() {
        let dir = std::env::temp_dir().join("survivor-record-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(HISCORE_FILE);
        std::fs::remove_file(&path).ok();

        let mut game = Game::new(21);
        game.score = 777;
        let mut over = GameOverState::with_path(path.clone());
        over.on_enter(&mut game);
        assert!(over.is_entering_new_record());
        over.entry_name = String::from("ACE");
        match over.on_tick(&mut game, &confirm()) {
            Transition::Stay => {}
            _ => panic!("first confirm should save the record"),
        }
        let reloaded = HiscoreTable::load(&path);
        assert_eq!(reloaded.entries()[0].name, "ACE");
        assert_eq!(reloaded.entries()[0].score, 777);
        std::fs::remove_file(&path).ok();
    }
}
