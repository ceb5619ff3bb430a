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

use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::numeric::round_float_to;
use utils::units::{kph_to_mps, mph_to_kph, mps_to_kph, KPH_PER_MPH};
use crate::transmission::gear_set::{GearLabel, GearSet};
use crate::tyres::tyre_circumference_m;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedResult {
    pub mph: f64,
    pub kph: f64
}

impl SpeedResult {
    /// Both values rounded to 1 decimal place
    pub fn from_kph(kph: f64) -> SpeedResult {
        SpeedResult {
            mph: round_float_to(kph / KPH_PER_MPH, 1),
            kph: round_float_to(kph, 1)
        }
    }
}

/// Road speed in m/s at an engine speed for the given gearing
pub fn wheel_speed_mps(rpm: f64, gear_ratio: f64, final_drive: f64, tyre_diameter_in: f64) -> f64 {
    (rpm * tyre_circumference_m(tyre_diameter_in)) / (gear_ratio * final_drive * 60.0)
}

pub fn speed_at_rpm(rpm: f64, gear_ratio: f64, final_drive: f64, tyre_diameter_in: f64) -> SpeedResult {
    SpeedResult::from_kph(mps_to_kph(wheel_speed_mps(rpm, gear_ratio, final_drive, tyre_diameter_in)))
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GearSpeed {
    pub gear: GearLabel,
    pub ratio: f64,
    pub speed: SpeedResult
}

/// Speed reached in every gear of `gears` at `rpm`
pub fn gear_speeds(gears: &GearSet, final_drive: f64, rpm: f64, tyre_diameter_in: f64) -> Vec<GearSpeed> {
    let speeds: Vec<GearSpeed> = gears.iter().map(|gear| {
        GearSpeed {
            gear: gear.label,
            ratio: gear.ratio,
            speed: speed_at_rpm(rpm, gear.ratio, final_drive, tyre_diameter_in)
        }
    }).collect();
    debug!("Generated {} gear speeds at {}rpm", speeds.len(), rpm);
    speeds
}

/// Final drive that puts `target_top_speed_mph` at the redline in the last gear.
/// The inverse of [`speed_at_rpm`], rounded to 2 decimal places.
pub fn optimize_final_drive(target_top_speed_mph: f64,
                            redline_rpm: f64,
                            last_gear_ratio: f64,
                            tyre_diameter_in: f64) -> f64
{
    let target_mps = kph_to_mps(mph_to_kph(target_top_speed_mph));
    let ideal_final_drive = (redline_rpm * tyre_circumference_m(tyre_diameter_in))
        / (last_gear_ratio * target_mps * 60.0);
    let ideal_final_drive = round_float_to(ideal_final_drive, 2);
    debug!("Optimized final drive ratio: {}", ideal_final_drive);
    ideal_final_drive
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use utils::numeric::round_float_to;
    use crate::transmission::gear_set::GearSet;
    use crate::transmission::speed::{gear_speeds, optimize_final_drive, speed_at_rpm};

    #[test]
    fn speed_matches_formula() {
        let mps = 6000.0 * (PI * 26.0 * 0.0254) / (1.0 * 3.545 * 60.0);
        let kph = mps * 3.6;
        let speed = speed_at_rpm(6000.0, 1.0, 3.545, 26.0);
        assert_eq!(speed.kph, round_float_to(kph, 1));
        assert_eq!(speed.mph, round_float_to(kph / 1.60934, 1));
        assert_eq!(speed.mph, 130.9);
        assert_eq!(speed.kph, 210.7);
    }

    #[test]
    fn mph_and_kph_agree() {
        for rpm in [3000.0, 5500.0, 8200.0] {
            let speed = speed_at_rpm(rpm, 1.8, 3.9, 25.0);
            assert!((speed.kph * 0.621371 - speed.mph).abs() < 0.1);
        }
    }

    #[test]
    fn final_drive_round_trip() {
        let targets = [(150.0, 8000.0, 0.8, 26.0), (120.0, 7000.0, 0.9, 24.5), (190.0, 9000.0, 0.75, 27.0)];
        for (target_mph, redline, last_gear, tyre) in targets {
            let final_drive = optimize_final_drive(target_mph, redline, last_gear, tyre);
            let speed = speed_at_rpm(redline, last_gear, final_drive, tyre);
            assert!((speed.mph - target_mph).abs() <= 0.5, "{} vs {}", speed.mph, target_mph);
        }
    }

    #[test]
    fn optimized_final_drive_value() {
        assert_eq!(optimize_final_drive(150.0, 8000.0, 0.8, 26.0), 5.16);
    }

    #[test]
    fn gear_speeds_rise_through_the_box() {
        let gears = GearSet::from_ratios(&[3.2, 2.1, 1.5, 1.15, 0.92, 0.78]);
        let speeds = gear_speeds(&gears, 3.9, 7000.0, 26.0);
        assert_eq!(speeds.len(), 6);
        assert_eq!(speeds[0].gear.to_string(), "1st");
        assert_eq!(speeds[2].ratio, 1.5);
        assert!(speeds.windows(2).all(|w| w[0].speed.mph < w[1].speed.mph));
    }
}
