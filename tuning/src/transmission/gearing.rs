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

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::numeric::{clamp_float, round_float_to};
use utils::units::{inches_to_meters, METERS_PER_SECOND_PER_MPH};
use crate::constants::*;
use crate::error::Result;
use crate::transmission::gear_set::{generate_gear_ratios, GearSet};

/// What a gearbox should achieve: reach the top speed at max rpm and pull
/// cleanly out of the slowest corner in 1st
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearingTargets {
    pub gear_count: usize,
    pub top_speed_mph: f64,
    pub min_corner_speed_mph: f64,
    pub max_rpm: f64,
    pub min_rpm: f64,
    pub tyre_diameter_in: f64,
    pub power_hp: f64,
    pub max_power_rpm: f64
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Gearing {
    pub gears: GearSet,
    pub final_drive: f64
}

/// More powerful cars can pull a taller final drive
pub fn final_drive_for_power(power_hp: f64) -> f64 {
    clamp_float(BASE_FINAL_DRIVE - (FINAL_DRIVE_PER_HP * power_hp), MIN_FINAL_DRIVE, MAX_FINAL_DRIVE)
}

pub fn optimal_gearing(targets: &GearingTargets) -> Result<Gearing> {
    debug!("Calculating gear ratios for {} gears, top speed {} mph, min corner speed {} mph",
           targets.gear_count, targets.top_speed_mph, targets.min_corner_speed_mph);
    let final_drive = final_drive_for_power(targets.power_hp);
    let rolling_distance = PI * inches_to_meters(targets.tyre_diameter_in);

    let top_speed_mps = targets.top_speed_mph * METERS_PER_SECOND_PER_MPH;
    let top_gear = (targets.max_rpm * rolling_distance) / (60.0 * top_speed_mps * final_drive);

    // Sit 40% of the way up the power band at the corner apex
    let corner_rpm = targets.min_rpm + (targets.max_power_rpm - targets.min_rpm) * CORNER_RPM_POWER_BAND_FRACTION;
    let corner_mps = targets.min_corner_speed_mph * METERS_PER_SECOND_PER_MPH / 2.0;
    let first_gear = f64::min(MAX_FIRST_GEAR_RATIO,
                              (corner_rpm * rolling_distance) / (60.0 * corner_mps * final_drive));

    let gears = generate_gear_ratios(targets.gear_count, first_gear, top_gear)?;
    Ok(Gearing { gears, final_drive: round_float_to(final_drive, 3) })
}
