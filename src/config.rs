pub const MAP_TILES_X: u16 = 32;
pub const MAP_TILES_Y: u16 = 32;
pub const MAP_MARGIN_TILES: u16 = 2;
pub const MAP_TILE_SIZE: u16 = 16;
pub const MAP_WIDTH: u16 = MAP_TILES_X * MAP_TILE_SIZE;
pub const MAP_HEIGHT: u16 = MAP_TILES_Y * MAP_TILE_SIZE;

pub const MAIN_VPORT_WIDTH: u16 = 320;
pub const MAIN_VPORT_HEIGHT: u16 = 240;
pub const HUD_HEIGHT: u16 = 16;
pub const GAME_FPS: u32 = 25;

pub const COLLISION_SIZE: u16 = 8;
pub const COLLISION_LOOKUP_X: u16 = MAP_WIDTH / COLLISION_SIZE;
pub const COLLISION_LOOKUP_Y: u16 = MAP_HEIGHT / COLLISION_SIZE;
pub const RESPAWN_SLOTS_PER_POSITION: usize = 4;

pub const PLAYER_BOB_SIZE_X: u16 = 32;
pub const PLAYER_BOB_SIZE_Y: u16 = 32;
// From the top-left of the collision rectangle.
pub const PLAYER_BOB_OFFSET_X: u16 = 12;
pub const PLAYER_BOB_OFFSET_Y: u16 = 19;
pub const PLAYER_HEALTH_MAX: i16 = 100;
pub const PLAYER_ATTACK_COOLDOWN: u8 = 12;
pub const PLAYER_SPEED: i16 = 3;
pub const PLAYER_DEATH_COOLDOWN: u8 = 50;
pub const PLAYER_START_X: u16 = 180;
pub const PLAYER_START_Y: u16 = 180;

pub const ENEMY_COUNT: usize = 25;
pub const ENEMY_BOB_SIZE_X: u16 = 16;
pub const ENEMY_BOB_SIZE_Y: u16 = 24;
pub const ENEMY_BOB_OFFSET_X: u16 = 4;
pub const ENEMY_BOB_OFFSET_Y: u16 = 15;
pub const ENEMY_ATTACK_COOLDOWN: u8 = 15;
pub const ENEMY_BITE_DAMAGE: i16 = 5;
pub const ENEMY_BITE_RANGE: u16 = 10;
pub const ENEMY_HEALTH_BASE: u16 = 5;
pub const ENEMY_HEALTH_ADD_PER_LEVEL: u16 = 5;
pub const ENEMY_SCORE: u32 = 25;
pub const ENEMY_SPEEDY_CHANCE_MAX: u8 = 127;
pub const ENEMY_SPEEDY_CHANCE_ADD_PER_LEVEL: u8 = 10;
pub const ENEMY_DESPAWN_MARGIN: u16 = 32;

pub const PROJECTILE_COUNT: usize = 20;
pub const PROJECTILE_LIFETIME: u8 = 25;
pub const PROJECTILE_SPEED: i16 = 5;
pub const SPREAD_SIDE_COUNT: usize = 40;

pub const STAINS_MAX: usize = 20;
pub const STAIN_FRAME_COUNT: u16 = 3;
pub const STAIN_FRAME_PRESET_COUNT: usize = 16;
pub const STAIN_SIZE: u16 = 16;

pub const CHARACTER_FRAME_COUNT: u8 = 8;
pub const WALK_FRAME_LAST: u8 = CHARACTER_FRAME_COUNT - 1;
pub const DEATH_FRAME_FIRST: u8 = CHARACTER_FRAME_COUNT;
pub const DEATH_FRAME_LAST: u8 = 2 * CHARACTER_FRAME_COUNT - 1;

pub const SCORE_LEVEL_FIRST_THRESHOLD: u32 = 1024;

pub const PICKUP_LIFETIME: u16 = 500;
pub const PICKUP_BLINK_TICKS: u16 = 75;
pub const PICKUP_BLINK_PERIOD: u16 = 8;
pub const PICKUP_DROP_ROLL: u8 = 8;
pub const PICKUP_HEAL_AMOUNT: i16 = 20;

pub const WEAPON_MAX_BULLETS_IN_MAGAZINE: u8 = 30;

pub const PERK_CHOICE_COUNT: usize = 4;
pub const PERK_DEATH_CLOCK_TICKS: u16 = 625;
pub const PERK_RETALIATION_DAMAGE: u16 = 10;
pub const PERK_DODGE_CHANCE: u8 = 32;
pub const PERK_BANDAGE_HEAL: i16 = PLAYER_HEALTH_MAX / 10;
pub const PERK_INSTANT_WINNER_EXP: u32 = 2000;
pub const PERK_FATAL_LOTTERY_EXP: u32 = 20_000;

pub const BLINK_COOLDOWN: u8 = 6;

// HUD geometry, in HUD-buffer pixels.
pub const HUD_WEAPON_SIZE_X: u16 = 48;
pub const HUD_WEAPON_SIZE_Y: u16 = 15;
pub const HUD_AMMO_FIELD_OFFSET_X: u16 = HUD_WEAPON_SIZE_X + 2;
pub const HUD_AMMO_FIELD_OFFSET_Y: u16 = 2;
pub const HUD_AMMO_ROWS: u16 = 2;
pub const HUD_AMMO_COLS: u16 =
    (WEAPON_MAX_BULLETS_IN_MAGAZINE as u16 + HUD_AMMO_ROWS - 1) / HUD_AMMO_ROWS;
pub const HUD_AMMO_BULLET_SIZE_X: u16 = 2;
pub const HUD_AMMO_BULLET_SIZE_Y: u16 = 6;
pub const HUD_AMMO_FIELD_SIZE_X: u16 = HUD_AMMO_COLS * (HUD_AMMO_BULLET_SIZE_X + 1) - 1;
pub const HUD_AMMO_FIELD_SIZE_Y: u16 = HUD_AMMO_ROWS * (HUD_AMMO_BULLET_SIZE_Y + 1) - 1;
pub const HUD_AMMO_MAX_PIPS_PER_VISIT: u8 = 4;
pub const HUD_HEALTH_BAR_OFFSET_X: u16 = 200;
pub const HUD_HEALTH_BAR_OFFSET_Y: u16 = 12;
pub const HUD_HEALTH_BAR_SIZE_Y: u16 = 3;
pub const HUD_SCORE_DIGITS: u16 = 10;
pub const HUD_SCORE_TEXT_X: u16 = 200;
pub const HUD_SCORE_TEXT_Y: u16 = 0;
pub const HUD_SCORE_BAR_OFFSET_X: u16 = 200;
pub const HUD_SCORE_BAR_OFFSET_Y: u16 = 8;
pub const HUD_SCORE_BAR_SIZE_X: u16 = 100;
pub const HUD_SCORE_BAR_SIZE_Y: u16 = 3;
pub const HUD_LEVEL_DIGITS: u16 = 3;
pub const HUD_BADGE_OFFSET_X: u16 = 310;
pub const HUD_BADGE_OFFSET_Y: u16 = 2;
pub const HUD_BADGE_SIZE: u16 = 8;

// Palette indices.
pub const COLOR_HUD_BG: u8 = 6;
pub const COLOR_BAR_BG: u8 = 10;
pub const COLOR_RED: u8 = 16;
pub const COLOR_HUD_HP: u8 = 23;
pub const COLOR_HUD_SCORE: u8 = 20;
pub const COLOR_BULLET: u8 = 31;

pub const SFX_CHANNEL_SHOOT: u8 = 0;
pub const SFX_PRIORITY_SHOOT: u8 = 0;
pub const SFX_CHANNEL_RELOAD: u8 = 0;
pub const SFX_PRIORITY_RELOAD: u8 = 1;
pub const SFX_CHANNEL_BITE: u8 = 2;
pub const SFX_PRIORITY_BITE: u8 = 0;
pub const SFX_CHANNEL_IMPACT: u8 = 1;
pub const SFX_PRIORITY_IMPACT: u8 = 0;
