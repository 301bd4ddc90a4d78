//! Raylib presentation layer: palette expansion, input sampling and the
//! 50Hz vblank counter that clocks the 25Hz simulation.

use log::debug;
use raylib::prelude::*;

use crate::config::{HUD_HEIGHT, MAIN_VPORT_HEIGHT, MAIN_VPORT_WIDTH};
use crate::game::input::InputSnapshot;
use crate::game::states::PlayState;
use crate::game::Game;
use crate::state::StateStack;

const WINDOW_SCALE: i32 = 2;
const VIEW_W: usize = MAIN_VPORT_WIDTH as usize;
const VIEW_H: usize = MAIN_VPORT_HEIGHT as usize;

/// 32-entry palette, expanded to RGBA on every presented frame.
const PALETTE: [(u8, u8, u8); 32] = [
    (16, 24, 16),
    (52, 72, 40),
    (60, 80, 44),
    (68, 88, 48),
    (76, 96, 52),
    (84, 104, 56),
    (40, 40, 48),
    (92, 112, 60),
    (100, 120, 64),
    (108, 128, 68),
    (64, 64, 72),
    (116, 136, 72),
    (124, 144, 76),
    (132, 152, 80),
    (140, 160, 84),
    (148, 168, 88),
    (152, 24, 24),
    (180, 40, 32),
    (96, 72, 48),
    (120, 92, 56),
    (216, 200, 80),
    (144, 112, 64),
    (168, 132, 72),
    (72, 200, 88),
    (192, 152, 80),
    (216, 172, 88),
    (228, 188, 120),
    (240, 204, 152),
    (120, 120, 128),
    (160, 160, 168),
    (200, 200, 208),
    (255, 255, 224),
];

pub fn run(seed: u64) {
    let (mut rl, thread) = raylib::init()
        .size(
            MAIN_VPORT_WIDTH as i32 * WINDOW_SCALE,
            MAIN_VPORT_HEIGHT as i32 * WINDOW_SCALE,
        )
        .title("Survivor")
        .build();
    rl.set_target_fps(50);

    let mut game = Game::new(seed);
    let mut stack = StateStack::new(Box::new(PlayState), &mut game);

    let image = Image::gen_image_color(VIEW_W as i32, VIEW_H as i32, Color::BLACK);
    let mut texture = rl
        .load_texture_from_image(&thread, &image)
        .expect("frame texture");
    let mut frame = vec![0u8; VIEW_W * VIEW_H * 4];

    // The display runs at 50Hz; the simulation takes every other
    // vblank.
    let mut vblank_counter: u32 = 0;
    let mut tick_target: u32 = 0;

    while !rl.window_should_close() {
        vblank_counter += 1;
        if vblank_counter >= tick_target {
            tick_target += 2;
            let input = sample_input(&rl, &game);
            if !stack.tick(&mut game, &input) {
                break;
            }
            for event in game.sfx.drain() {
                debug!(
                    "sfx {:?} on channel {} priority {}",
                    event.sfx, event.channel, event.priority
                );
            }
        }

        compose_frame(&game, &mut frame);
        let _ = texture.update_texture(&frame);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_ex(&texture, Vector2::zero(), 0.0, WINDOW_SCALE as f32, Color::WHITE);
    }
}

fn sample_input(rl: &RaylibHandle, game: &Game) -> InputSnapshot {
    let mouse_x = (rl.get_mouse_x() / WINDOW_SCALE).max(0) as u16;
    let mouse_y = (rl.get_mouse_y() / WINDOW_SCALE).max(0) as u16;
    let aim_x = game.camera.pos.x.saturating_add(mouse_x);
    let aim_y = game
        .camera
        .pos
        .y
        .saturating_add(mouse_y.saturating_sub(HUD_HEIGHT));

    let number_keys = [
        KeyboardKey::KEY_ONE,
        KeyboardKey::KEY_TWO,
        KeyboardKey::KEY_THREE,
        KeyboardKey::KEY_FOUR,
        KeyboardKey::KEY_FIVE,
    ];
    let pressed_number = number_keys
        .iter()
        .position(|&key| rl.is_key_pressed(key))
        .map(|slot| slot as u8);

    InputSnapshot {
        up: rl.is_key_down(KeyboardKey::KEY_W) || rl.is_key_down(KeyboardKey::KEY_UP),
        down: rl.is_key_down(KeyboardKey::KEY_S) || rl.is_key_down(KeyboardKey::KEY_DOWN),
        left: rl.is_key_down(KeyboardKey::KEY_A) || rl.is_key_down(KeyboardKey::KEY_LEFT),
        right: rl.is_key_down(KeyboardKey::KEY_D) || rl.is_key_down(KeyboardKey::KEY_RIGHT),
        fire: rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
        aim_x,
        aim_y,
        weapon_slot: pressed_number,
        reload: rl.is_key_pressed(KeyboardKey::KEY_R),
        choice: pressed_number,
        pause: rl.is_key_pressed(KeyboardKey::KEY_ESCAPE)
            || rl.is_key_pressed(KeyboardKey::KEY_P),
        confirm: rl.is_key_pressed(KeyboardKey::KEY_ENTER)
            || rl.is_key_pressed(KeyboardKey::KEY_SPACE),
        quit: false,
    }
}

/// HUD strip on top, camera window below, both palette-expanded into
/// one RGBA frame.
fn compose_frame(game: &Game, frame: &mut [u8]) {
    let hud = &game.hud_bitmap;
    for y in 0..usize::from(HUD_HEIGHT) {
        for x in 0..VIEW_W {
            let color = hud.get(x as u16, y as u16);
            put_rgba(frame, x, y, color);
        }
    }

    let playfield = game.front_buffer();
    let cam_x = game.camera.pos.x;
    let cam_y = game.camera.pos.y;
    for y in 0..VIEW_H - usize::from(HUD_HEIGHT) {
        for x in 0..VIEW_W {
            let color = playfield.get(cam_x + x as u16, cam_y + y as u16);
            put_rgba(frame, x, y + usize::from(HUD_HEIGHT), color);
        }
    }
}

fn put_rgba(frame: &mut [u8], x: usize, y: usize, color: u8) {
    let (r, g, b) = PALETTE[usize::from(color) % PALETTE.len()];
    let offset = (y * VIEW_W + x) * 4;
    frame[offset] = r;
    frame[offset + 1] = g;
    frame[offset + 2] = b;
    frame[offset + 3] = 255;
}
