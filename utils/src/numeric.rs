/*
 * Copyright (c):
 * 2024 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of gt7-tuner.
 *
 * gt7-tuner is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gt7-tuner is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gt7-tuner. If not, see <https://www.gnu.org/licenses/>.
 */

pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// Round `val` to the nearest multiple of `increment` i.e. an increment of 0.5
/// turns 12.3 into 12.5 and 12.2 into 12.0
pub fn round_to_increment(val: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return val;
    }
    let steps_per_unit = (1.0 / increment).round();
    (val * steps_per_unit).round() / steps_per_unit
}

pub fn clamp_float(val: f64, min: f64, max: f64) -> f64 {
    f64::min(max, f64::max(min, val))
}

pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use crate::numeric::{clamp_float, round_float_to, round_to_increment};

    #[test]
    fn round_float_to_tests() {
        assert_eq!(round_float_to(3.82749, 3), 3.827);
        assert_eq!(round_float_to(3.8276, 2), 3.83);
        assert_eq!(round_float_to(67.94, 1), 67.9);
        assert_eq!(round_float_to(0.0, 2), 0.0);
        assert_eq!(round_float_to(12.6, 0), 13.0);
    }

    #[test]
    fn round_increment_tests()  {
        assert_eq!(round_to_increment(9.96, 0.1), 10.0);
        assert_eq!(round_to_increment(9.94, 0.1), 9.9);
        assert_eq!(round_to_increment(29.7, 0.5), 29.5);
        assert_eq!(round_to_increment(29.8, 0.5), 30.0);
        assert_eq!(round_to_increment(12.2, 0.5), 12.0);
        assert_eq!(round_to_increment(30.4, 1.0), 30.0);
        assert_eq!(round_to_increment(30.6, 1.0), 31.0);
        assert_eq!(round_to_increment(5.0, 0.0), 5.0);
    }

    #[test]
    fn clamp_float_tests() {
        assert_eq!(clamp_float(0.2, 1.0, 10.0), 1.0);
        assert_eq!(clamp_float(4.5, 1.0, 10.0), 4.5);
        assert_eq!(clamp_float(12.0, 1.0, 10.0), 10.0);
    }
}
