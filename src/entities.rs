use crate::config::{
    ENEMY_HEALTH_BASE, PLAYER_ATTACK_COOLDOWN, PLAYER_HEALTH_MAX, PLAYER_START_X, PLAYER_START_Y,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Y-major, X-minor sort key; matches the packed word-pair the
    /// draw-order bubble step compares.
    pub fn yx_key(self) -> u32 {
        (u32::from(self.y) << 16) | u32::from(self.x)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    SouthEast,
    South,
    SouthWest,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        match self {
            Direction::SouthEast => 0,
            Direction::South => 1,
            Direction::SouthWest => 2,
            Direction::NorthWest => 3,
            Direction::North => 4,
            Direction::NorthEast => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    BaseRifle,
    Smg,
    AssaultRifle,
    Shotgun,
    Sawoff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadKind {
    Narrow,
    Medium,
    Wide,
    Scatter,
}

impl WeaponKind {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            WeaponKind::BaseRifle => 0,
            WeaponKind::Smg => 1,
            WeaponKind::AssaultRifle => 2,
            WeaponKind::Shotgun => 3,
            WeaponKind::Sawoff => 4,
        }
    }

    pub fn damage(self) -> u16 {
        match self {
            WeaponKind::BaseRifle => 6,
            WeaponKind::Smg => 5,
            WeaponKind::AssaultRifle => 7,
            WeaponKind::Shotgun => 7,
            WeaponKind::Sawoff => 9,
        }
    }

    pub fn fire_cooldown(self) -> u8 {
        match self {
            WeaponKind::BaseRifle => 15,
            WeaponKind::Smg => 3,
            WeaponKind::AssaultRifle => 4,
            WeaponKind::Shotgun => 18,
            WeaponKind::Sawoff => 18,
        }
    }

    pub fn base_magazine(self) -> u8 {
        match self {
            WeaponKind::BaseRifle => 10,
            WeaponKind::Smg => 30,
            WeaponKind::AssaultRifle => 25,
            WeaponKind::Shotgun => 12,
            WeaponKind::Sawoff => 12,
        }
    }

    pub fn reload_cooldown(self) -> i16 {
        match self {
            WeaponKind::BaseRifle => 30,
            WeaponKind::Smg => 40,
            WeaponKind::AssaultRifle => 40,
            WeaponKind::Shotgun => 80,
            WeaponKind::Sawoff => 80,
        }
    }

    pub fn pellets(self) -> u8 {
        match self {
            WeaponKind::Shotgun | WeaponKind::Sawoff => 10,
            _ => 1,
        }
    }

    pub fn spread(self) -> SpreadKind {
        match self {
            WeaponKind::BaseRifle => SpreadKind::Narrow,
            WeaponKind::AssaultRifle => SpreadKind::Medium,
            WeaponKind::Smg | WeaponKind::Shotgun => SpreadKind::Wide,
            WeaponKind::Sawoff => SpreadKind::Scatter,
        }
    }

    pub fn uses_shells(self) -> bool {
        matches!(self, WeaponKind::Shotgun | WeaponKind::Sawoff)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Coord,
    pub direction: Direction,
    pub frame: u8,
    pub frame_cooldown: u8,
    pub health: i16,
    pub weapon: WeaponKind,
    pub attack_cooldown: u8,
    pub ammo: u8,
    pub max_ammo: u8,
    /// Signed: perk speed-ups may decrement past zero in one tick.
    pub reload_cooldown: i16,
    pub blink_cooldown: u8,
    pub death_cooldown: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Coord::new(PLAYER_START_X, PLAYER_START_Y),
            direction: Direction::South,
            frame: 0,
            frame_cooldown: 0,
            health: PLAYER_HEALTH_MAX,
            weapon: WeaponKind::BaseRifle,
            attack_cooldown: PLAYER_ATTACK_COOLDOWN,
            ammo: 0,
            max_ammo: 0,
            reload_cooldown: 0,
            blink_cooldown: 0,
            death_cooldown: 0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Which edge of the viewport an enemy slipped out of; doubles as the
/// respawn-slot index to retry first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl SpawnEdge {
    pub fn index(self) -> usize {
        match self {
            SpawnEdge::Left => 0,
            SpawnEdge::Right => 1,
            SpawnEdge::Top => 2,
            SpawnEdge::Bottom => 3,
        }
    }
}

/// Explicit lifecycle instead of sentinel health values; `health`
/// stays a plain counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    DeathAnim,
    Offscreen,
    AwaitingRespawn,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Coord,
    pub state: EnemyState,
    pub health: u16,
    pub direction: Direction,
    pub frame: u8,
    pub frame_cooldown: u8,
    pub attack_cooldown: u8,
    pub speed: i16,
    pub preferred_spawn: Option<SpawnEdge>,
}

impl Enemy {
    pub fn at(pos: Coord) -> Self {
        Self {
            pos,
            state: EnemyState::Alive,
            health: ENEMY_HEALTH_BASE,
            direction: Direction::South,
            frame: 0,
            frame_cooldown: 0,
            attack_cooldown: 0,
            speed: 1,
            preferred_spawn: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    WeaponSmg,
    WeaponAssaultRifle,
    WeaponShotgun,
    WeaponSawoff,
    Bandage,
    AmmoCrate,
}

impl PickupKind {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        match self {
            PickupKind::WeaponSmg => 0,
            PickupKind::WeaponAssaultRifle => 1,
            PickupKind::WeaponShotgun => 2,
            PickupKind::WeaponSawoff => 3,
            PickupKind::Bandage => 4,
            PickupKind::AmmoCrate => 5,
        }
    }

    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            PickupKind::WeaponSmg
                | PickupKind::WeaponAssaultRifle
                | PickupKind::WeaponShotgun
                | PickupKind::WeaponSawoff
        )
    }

    pub fn weapon(self) -> Option<WeaponKind> {
        match self {
            PickupKind::WeaponSmg => Some(WeaponKind::Smg),
            PickupKind::WeaponAssaultRifle => Some(WeaponKind::AssaultRifle),
            PickupKind::WeaponShotgun => Some(WeaponKind::Shotgun),
            PickupKind::WeaponSawoff => Some(WeaponKind::Sawoff),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupState {
    Inactive,
    ReadyToSpawn,
    Active,
}

/// The single shared pickup slot.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub pos: Coord,
    pub kind: PickupKind,
    pub state: PickupState,
    pub life: u16,
    pub blink_cooldown: u16,
    pub is_displayed: bool,
}

impl Pickup {
    pub fn inactive() -> Self {
        Self {
            pos: Coord::default(),
            kind: PickupKind::Bandage,
            state: PickupState::Inactive,
            life: 0,
            blink_cooldown: 0,
            is_displayed: false,
        }
    }
}

/// Handle stored in the collision grid and the draw-order list;
/// index-based so pools stay free of self-referential pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Player,
    Enemy(usize),
    Pickup,
}
