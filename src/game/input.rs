//! Device-independent input snapshot, sampled once per simulation tick.
//! Directional and fire fields carry held state; everything else is
//! edge-triggered by the sampler (true only on the tick the key went
//! down).

#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Cursor position in world coordinates; firing aims here.
    pub aim_x: u16,
    pub aim_y: u16,
    /// Weapon slot key pressed this tick, 0..5.
    pub weapon_slot: Option<u8>,
    /// Manual reload key pressed this tick.
    pub reload: bool,
    /// Perk menu pick, 0..4.
    pub choice: Option<u8>,
    pub pause: bool,
    pub confirm: bool,
    pub quit: bool,
}

impl InputSnapshot {
    pub fn wants_movement(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}
