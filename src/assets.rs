//! Procedurally painted placeholder art. Every sheet keeps the layout
//! the blit code expects (frames stacked in a fixed grid with a
//! parallel cookie-cut mask), so swapping in drawn graphics later only
//! touches this module.

use crate::config::{
    CHARACTER_FRAME_COUNT, DEATH_FRAME_FIRST, ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y,
    HUD_WEAPON_SIZE_X, HUD_WEAPON_SIZE_Y, HUD_BADGE_SIZE, MAP_TILE_SIZE, PLAYER_BOB_SIZE_X,
    PLAYER_BOB_SIZE_Y, STAIN_FRAME_COUNT, STAIN_FRAME_PRESET_COUNT, STAIN_SIZE,
};
use crate::entities::{Direction, PickupKind, WeaponKind};
use crate::gfx::Bitmap;

pub const TILESET_TILE_COUNT: u16 = 25;
pub const SHEET_FRAMES_PER_ROW: u16 = 2 * CHARACTER_FRAME_COUNT as u16;

/// Maps a 4-bit random roll to one of the three stain shapes; the
/// uneven weighting favours the small splat.
pub const STAIN_FRAME_PRESETS: [u16; STAIN_FRAME_PRESET_COUNT] =
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2];

pub struct Assets {
    pub tileset: Bitmap,
    pub player_sheet: Bitmap,
    pub player_mask: Bitmap,
    pub enemy_sheet: Bitmap,
    pub enemy_mask: Bitmap,
    pub stain_sheet: Bitmap,
    pub stain_mask: Bitmap,
    pub pickup_sheet: Bitmap,
    pub pickup_mask: Bitmap,
    pub weapon_icons: Bitmap,
    pub badge: Bitmap,
}

pub const PICKUP_ICON_SIZE: u16 = 16;

impl Assets {
    pub fn placeholder() -> Self {
        let (player_sheet, player_mask) =
            character_sheet(PLAYER_BOB_SIZE_X, PLAYER_BOB_SIZE_Y, 24, 26);
        let (enemy_sheet, enemy_mask) =
            character_sheet(ENEMY_BOB_SIZE_X, ENEMY_BOB_SIZE_Y, 12, 14);
        let (stain_sheet, stain_mask) = stain_sheets();
        let (pickup_sheet, pickup_mask) = pickup_sheets();
        Self {
            tileset: tileset(),
            player_sheet,
            player_mask,
            enemy_sheet,
            enemy_mask,
            stain_sheet,
            stain_mask,
            pickup_sheet,
            pickup_mask,
            weapon_icons: weapon_icons(),
            badge: badge(),
        }
    }

    /// Top-left of a character frame inside its sheet. Walk frames sit
    /// in columns 0..8, death frames in 8..16; one row per facing.
    pub fn frame_origin(frame_w: u16, frame_h: u16, direction: Direction, frame: u8) -> (u16, u16) {
        (u16::from(frame) * frame_w, direction.index() as u16 * frame_h)
    }
}

fn tileset() -> Bitmap {
    let mut sheet = Bitmap::new(MAP_TILE_SIZE, TILESET_TILE_COUNT * MAP_TILE_SIZE);
    for tile in 0..TILESET_TILE_COUNT {
        let base = 1 + (tile % 8) as u8;
        let top = tile * MAP_TILE_SIZE;
        sheet.fill_rect(0, top, MAP_TILE_SIZE, MAP_TILE_SIZE, base);
        // Checker the corners so scrolling is visible even on flat fills.
        sheet.fill_rect(0, top, 2, 2, base + 1);
        sheet.fill_rect(MAP_TILE_SIZE - 2, top + MAP_TILE_SIZE - 2, 2, 2, base + 1);
    }
    sheet
}

fn character_sheet(frame_w: u16, frame_h: u16, body_color: u8, marker_color: u8) -> (Bitmap, Bitmap) {
    let mut sheet = Bitmap::new(SHEET_FRAMES_PER_ROW * frame_w, Direction::COUNT as u16 * frame_h);
    let mut mask = Bitmap::new(sheet.width(), sheet.height());

    for dir_row in 0..Direction::COUNT as u16 {
        for frame in 0..SHEET_FRAMES_PER_ROW {
            let x0 = frame * frame_w;
            let y0 = dir_row * frame_h;
            let dying = frame >= u16::from(DEATH_FRAME_FIRST);
            // Death frames shrink toward the ground line.
            let squash = if dying {
                (frame - u16::from(DEATH_FRAME_FIRST)) * frame_h / (2 * u16::from(CHARACTER_FRAME_COUNT))
            } else {
                0
            };
            let body_top = y0 + 2 + squash;
            let body_h = frame_h.saturating_sub(4 + squash);
            sheet.fill_rect(x0 + 2, body_top, frame_w - 4, body_h, body_color);
            mask.fill_rect(x0 + 2, body_top, frame_w - 4, body_h, 1);
            if !dying {
                // Facing marker plus a two-phase walk wobble.
                let wobble = (frame % 2) * 2;
                sheet.fill_rect(x0 + frame_w / 2 - 1, y0 + 2 + wobble, 2, 3, marker_color);
                mask.fill_rect(x0 + frame_w / 2 - 1, y0 + 2 + wobble, 2, 3, 1);
            }
        }
    }
    (sheet, mask)
}

fn stain_sheets() -> (Bitmap, Bitmap) {
    let mut sheet = Bitmap::new(STAIN_SIZE, STAIN_FRAME_COUNT * STAIN_SIZE);
    let mut mask = Bitmap::new(STAIN_SIZE, STAIN_FRAME_COUNT * STAIN_SIZE);
    for frame in 0..STAIN_FRAME_COUNT {
        let top = frame * STAIN_SIZE;
        let inset = 2 + frame * 2;
        let side = STAIN_SIZE - 2 * inset;
        sheet.fill_rect(inset, top + inset, side, side, crate::config::COLOR_RED);
        mask.fill_rect(inset, top + inset, side, side, 1);
    }
    (sheet, mask)
}

fn pickup_sheets() -> (Bitmap, Bitmap) {
    let mut sheet = Bitmap::new(PICKUP_ICON_SIZE, PickupKind::COUNT as u16 * PICKUP_ICON_SIZE);
    let mut mask = Bitmap::new(sheet.width(), sheet.height());
    for index in 0..PickupKind::COUNT as u16 {
        let top = index * PICKUP_ICON_SIZE;
        sheet.fill_rect(3, top + 3, PICKUP_ICON_SIZE - 6, PICKUP_ICON_SIZE - 6, 18 + index as u8);
        mask.fill_rect(3, top + 3, PICKUP_ICON_SIZE - 6, PICKUP_ICON_SIZE - 6, 1);
    }
    (sheet, mask)
}

fn weapon_icons() -> Bitmap {
    let mut sheet = Bitmap::new(HUD_WEAPON_SIZE_X, WeaponKind::COUNT as u16 * HUD_WEAPON_SIZE_Y);
    for index in 0..WeaponKind::COUNT as u16 {
        let top = index * HUD_WEAPON_SIZE_Y;
        sheet.fill_rect(0, top, HUD_WEAPON_SIZE_X, HUD_WEAPON_SIZE_Y, 2);
        // Barrel length distinguishes the five silhouettes.
        let barrel = 12 + index * 7;
        sheet.fill_rect(2, top + 6, barrel, 3, 28 + index as u8);
        sheet.fill_rect(4, top + 9, 5, 4, 28 + index as u8);
    }
    sheet
}

fn badge() -> Bitmap {
    let mut bmp = Bitmap::new(HUD_BADGE_SIZE, HUD_BADGE_SIZE);
    for row in 0..HUD_BADGE_SIZE {
        let half = (row.min(HUD_BADGE_SIZE - 1 - row)) + 1;
        let mid = HUD_BADGE_SIZE / 2;
        bmp.fill_rect(mid - half.min(mid), row, 2 * half.min(mid), 1, crate::config::COLOR_HUD_SCORE);
    }
    bmp
}
