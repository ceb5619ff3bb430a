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

use tracing::debug;
use utils::numeric::round_float_to;
use crate::constants::*;
use crate::transmission::gear_set::GearSet;

/// Scaling for how well 1st and 2nd gear are spaced. A 1st/2nd ratio between
/// 1.5 and 2.0 is ideal; closer or wider spacing is penalised linearly.
pub fn gear_spacing_factor(first_gear: f64, second_gear: f64) -> f64 {
    if first_gear <= 0.0 || second_gear <= 0.0 {
        return 1.0;
    }
    let spacing = first_gear / second_gear;
    if spacing < CLOSE_GEAR_SPACING_LIMIT {
        GEAR_SPACING_PENALTY_BASE + (spacing - CLOSE_GEAR_SPACING_ORIGIN) * GEAR_SPACING_PENALTY_SLOPE
    } else if spacing > WIDE_GEAR_SPACING_LIMIT {
        GEAR_SPACING_PENALTY_BASE + (WIDE_GEAR_SPACING_ORIGIN - spacing) * GEAR_SPACING_PENALTY_SLOPE
    } else {
        1.0
    }
}

/// Penalty for a 1st gear too tall (> 3.5) or too short (< 2.5) to launch well
pub fn launch_factor(first_gear: f64) -> f64 {
    if first_gear > TALL_FIRST_GEAR_LIMIT {
        1.0 + (first_gear - TALL_FIRST_GEAR_LIMIT) * TALL_FIRST_GEAR_PENALTY
    } else if first_gear < SHORT_FIRST_GEAR_LIMIT {
        1.0 + (SHORT_FIRST_GEAR_LIMIT - first_gear) * SHORT_FIRST_GEAR_PENALTY
    } else {
        1.0
    }
}

/// Estimated 0-60mph time in seconds, rounded to 1 decimal place.
///
/// This is a calibrated heuristic driven by power to weight and the spacing of
/// the first two gears. `final_drive` and `tyre_diameter_in` are accepted so
/// the signature stays stable if the model starts using them.
pub fn estimate_acceleration(power_hp: f64,
                             weight_kg: f64,
                             gears: &GearSet,
                             _final_drive: f64,
                             _tyre_diameter_in: f64) -> f64
{
    let power_to_weight = power_hp / weight_kg;
    let first_gear = gears.first_ratio().unwrap_or(DEFAULT_FIRST_GEAR_RATIO);
    let second_gear = gears.second_ratio().unwrap_or(first_gear * SECOND_GEAR_FALLBACK_FACTOR);

    let gear_factor = gear_spacing_factor(first_gear, second_gear);
    let estimate = (ACCEL_BASE_SECONDS / (power_to_weight * gear_factor)) * ACCEL_SCALE * launch_factor(first_gear);
    let estimate = round_float_to(estimate, 1);
    debug!("Estimated 0-60 mph acceleration: {} seconds", estimate);
    estimate
}
