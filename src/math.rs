//! 10.6 fixed-point helpers and the 256-step angle wheel used by aiming
//! and projectile motion. Values are `u16` with two's-complement
//! semantics so negative velocities wrap exactly like the positions
//! they get added to.

use once_cell::sync::Lazy;

pub type Fix10p6 = u16;

pub const ANGLE_360: u16 = 256;
pub const ANGLE_180: u8 = 128;
pub const ANGLE_90: u8 = 64;
pub const ANGLE_45: u8 = 32;

static SIN_10P6: Lazy<[Fix10p6; ANGLE_360 as usize]> = Lazy::new(|| {
    let mut table = [0u16; ANGLE_360 as usize];
    for (angle, entry) in table.iter_mut().enumerate() {
        let radians = angle as f32 * std::f32::consts::TAU / ANGLE_360 as f32;
        *entry = ((radians.sin() * 64.0).round() as i16) as u16;
    }
    table
});

pub fn fix_from_int(value: u16) -> Fix10p6 {
    value << 6
}

pub fn fix_to_int(value: Fix10p6) -> u16 {
    value >> 6
}

pub fn fix_add(a: Fix10p6, b: Fix10p6) -> Fix10p6 {
    a.wrapping_add(b)
}

pub fn fix_sub(a: Fix10p6, b: Fix10p6) -> Fix10p6 {
    a.wrapping_sub(b)
}

pub fn fix_scale(value: Fix10p6, factor: i16) -> Fix10p6 {
    value.wrapping_mul(factor as u16)
}

pub fn fix_sin(angle: u8) -> Fix10p6 {
    SIN_10P6[angle as usize]
}

pub fn fix_cos(angle: u8) -> Fix10p6 {
    if angle < 3 * ANGLE_90 {
        fix_sin(ANGLE_90.wrapping_add(angle))
    } else {
        fix_sin(angle - 3 * ANGLE_90)
    }
}

/// Angle on the 256-step wheel from `(from_x, from_y)` to `(to_x, to_y)`.
/// 0 points right and the wheel runs clockwise (screen y grows down).
pub fn angle_between_points(from_x: u16, from_y: u16, to_x: u16, to_y: u16) -> u8 {
    let dx = i32::from(to_x) - i32::from(from_x);
    let dy = i32::from(to_y) - i32::from(from_y);
    let radians = (dy as f32).atan2(dx as f32);
    let steps = (radians / std::f32::consts::TAU * ANGLE_360 as f32).round() as i32;
    steps.rem_euclid(i32::from(ANGLE_360)) as u8
}

/// Octagonal magnitude approximation, good to ~11% and division-free.
pub fn fast_magnitude(dx: u16, dy: u16) -> u16 {
    let (hi, lo) = if dx > dy { (dx, dy) } else { (dy, dx) };
    hi.saturating_add(lo / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn fix_round_trips_integers() {
        for value in [0u16, 1, 180, 511] {
            assert_eq!(fix_to_int(fix_from_int(value)), value);
        }
    }

    #[test]
    fn fix_add_wraps_negative_velocity() {
        let pos = fix_from_int(100);
        let minus_one = 0u16.wrapping_sub(fix_from_int(1));
        assert_eq!(fix_to_int(fix_add(pos, minus_one)), 99);
    }

    #[rstest]
    #[case(0, 64)]
    #[case(ANGLE_90, 0)]
    #[case(ANGLE_180, -64)]
    #[case(ANGLE_90 + ANGLE_180, 0)]
    fn cos_cardinal_points(#[case] angle: u8, #[case] expected: i16) {
        assert_eq!(fix_cos(angle) as i16, expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(ANGLE_90, 64)]
    #[case(ANGLE_180, 0)]
    #[case(ANGLE_90 + ANGLE_180, -64)]
    fn sin_cardinal_points(#[case] angle: u8, #[case] expected: i16) {
        assert_eq!(fix_sin(angle) as i16, expected);
    }

    #[rstest]
    #[case(100, 100, 200, 100, 0)]
    #[case(100, 100, 100, 200, ANGLE_90)]
    #[case(100, 100, 0, 100, ANGLE_180)]
    #[case(100, 100, 100, 0, ANGLE_90 + ANGLE_180)]
    fn angle_between_cardinal_directions(
        #[case] fx: u16,
        #[case] fy: u16,
        #[case] tx: u16,
        #[case] ty: u16,
        #[case] expected: u8,
    ) {
        assert_eq!(angle_between_points(fx, fy, tx, ty), expected);
    }

    #[test]
    fn fast_magnitude_bounds() {
        assert_eq!(fast_magnitude(10, 0), 10);
        assert_eq!(fast_magnitude(0, 10), 10);
        // 3-4-5 triangle: the approximation lands on 5 exactly.
        assert_eq!(fast_magnitude(3, 4), 5);
    }
}
