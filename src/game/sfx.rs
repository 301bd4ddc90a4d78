//! Sound requests raised by the simulation. The core never touches an
//! audio device; it queues events with a channel and priority and the
//! display layer drains them after each tick.

use crate::config::{
    SFX_CHANNEL_BITE, SFX_CHANNEL_IMPACT, SFX_CHANNEL_RELOAD, SFX_CHANNEL_SHOOT,
    SFX_PRIORITY_BITE, SFX_PRIORITY_IMPACT, SFX_PRIORITY_RELOAD, SFX_PRIORITY_SHOOT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    Shoot,
    Reload,
    Bite,
    Impact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SfxEvent {
    pub sfx: Sfx,
    pub channel: u8,
    pub priority: u8,
}

#[derive(Default)]
pub struct SfxQueue {
    events: Vec<SfxEvent>,
}

impl SfxQueue {
    pub fn push(&mut self, sfx: Sfx) {
        let (channel, priority) = match sfx {
            Sfx::Shoot => (SFX_CHANNEL_SHOOT, SFX_PRIORITY_SHOOT),
            Sfx::Reload => (SFX_CHANNEL_RELOAD, SFX_PRIORITY_RELOAD),
            Sfx::Bite => (SFX_CHANNEL_BITE, SFX_PRIORITY_BITE),
            Sfx::Impact => (SFX_CHANNEL_IMPACT, SFX_PRIORITY_IMPACT),
        };
        self.events.push(SfxEvent {
            sfx,
            channel,
            priority,
        });
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SfxEvent> {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
