//! Stack-based mode machine for the outer loop (play, pause, perk
//! choice, game over). States are boxed trait objects; a pushed state
//! shadows the one below it until popped, at which point the covered
//! state gets an `on_resume`.

use crate::game::input::InputSnapshot;
use crate::game::Game;

pub enum Transition {
    Stay,
    Push(Box<dyn State>),
    Pop,
    Switch(Box<dyn State>),
    Quit,
}

#[allow(unused_variables)]
pub trait State {
    fn on_enter(&mut self, game: &mut Game) {}
    fn on_exit(&mut self, game: &mut Game) {}
    /// Called when the state above this one pops off.
    fn on_resume(&mut self, game: &mut Game) {}
    fn on_tick(&mut self, game: &mut Game, input: &InputSnapshot) -> Transition;
}

pub struct StateStack {
    stack: Vec<Box<dyn State>>,
}

impl StateStack {
    pub fn new(mut initial: Box<dyn State>, game: &mut Game) -> Self {
        initial.on_enter(game);
        Self {
            stack: vec![initial],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Ticks the topmost state and applies its transition. Returns
    /// `false` once the stack empties or a state requests quit.
    pub fn tick(&mut self, game: &mut Game, input: &InputSnapshot) -> bool {
        let Some(top) = self.stack.last_mut() else {
            return false;
        };
        match top.on_tick(game, input) {
            Transition::Stay => true,
            Transition::Push(mut next) => {
                next.on_enter(game);
                self.stack.push(next);
                true
            }
            Transition::Pop => {
                if let Some(mut done) = self.stack.pop() {
                    done.on_exit(game);
                }
                if let Some(below) = self.stack.last_mut() {
                    below.on_resume(game);
                }
                !self.stack.is_empty()
            }
            Transition::Switch(mut next) => {
                if let Some(mut done) = self.stack.pop() {
                    done.on_exit(game);
                }
                next.on_enter(game);
                self.stack.push(next);
                true
            }
            Transition::Quit => {
                while let Some(mut done) = self.stack.pop() {
                    done.on_exit(game);
                }
                false
            }
        }
    }
}
