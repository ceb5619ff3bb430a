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
use crate::constants::*;
use crate::vehicle::{AxlePair, TyreCompound, VehicleParameters};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DamperSetting {
    pub compression: i32,
    pub extension: i32
}

/// Multipliers applied to the baseline damping for a corner phase
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CornerPhaseMultipliers {
    pub front_compression: f64,
    pub front_rebound: f64,
    pub rear_compression: f64,
    pub rear_rebound: f64
}

impl CornerPhaseMultipliers {
    const fn new(front_compression: f64, front_rebound: f64, rear_compression: f64, rear_rebound: f64) -> Self {
        CornerPhaseMultipliers { front_compression, front_rebound, rear_compression, rear_rebound }
    }

    pub const NEUTRAL: CornerPhaseMultipliers = CornerPhaseMultipliers::new(1.0, 1.0, 1.0, 1.0);

    /// Negative adjustments treat understeer on entry, positive ones oversteer
    pub fn corner_entry(adjustment: i32) -> CornerPhaseMultipliers {
        match adjustment {
            -5 => CornerPhaseMultipliers::new(0.80, 1.20, 1.20, 0.80),
            -4 => CornerPhaseMultipliers::new(0.85, 1.15, 1.15, 0.85),
            -3 => CornerPhaseMultipliers::new(0.90, 1.10, 1.10, 0.90),
            -2 => CornerPhaseMultipliers::new(0.95, 1.05, 1.05, 0.95),
            -1 => CornerPhaseMultipliers::new(0.98, 1.02, 1.02, 0.98),
            1 => CornerPhaseMultipliers::new(1.02, 0.98, 0.98, 1.02),
            2 => CornerPhaseMultipliers::new(1.05, 0.95, 0.95, 1.05),
            3 => CornerPhaseMultipliers::new(1.10, 0.90, 0.90, 1.10),
            4 => CornerPhaseMultipliers::new(1.15, 0.85, 0.85, 1.15),
            5 => CornerPhaseMultipliers::new(1.20, 0.80, 0.80, 1.20),
            _ => CornerPhaseMultipliers::NEUTRAL
        }
    }

    /// Negative adjustments treat understeer on exit, positive ones oversteer
    pub fn corner_exit(adjustment: i32) -> CornerPhaseMultipliers {
        match adjustment {
            -5 => CornerPhaseMultipliers::new(1.05, 1.20, 0.80, 0.95),
            -4 => CornerPhaseMultipliers::new(1.04, 1.15, 0.85, 0.96),
            -3 => CornerPhaseMultipliers::new(1.03, 1.10, 0.90, 0.97),
            -2 => CornerPhaseMultipliers::new(1.02, 1.05, 0.95, 0.98),
            -1 => CornerPhaseMultipliers::new(1.01, 1.02, 0.98, 0.99),
            1 => CornerPhaseMultipliers::new(0.99, 0.98, 0.95, 1.01),
            2 => CornerPhaseMultipliers::new(0.98, 0.95, 0.90, 1.02),
            3 => CornerPhaseMultipliers::new(0.97, 0.90, 0.85, 1.03),
            4 => CornerPhaseMultipliers::new(0.96, 0.85, 0.80, 1.04),
            5 => CornerPhaseMultipliers::new(0.95, 0.80, 0.75, 1.05),
            _ => CornerPhaseMultipliers::NEUTRAL
        }
    }
}

/// Compression and extension settings for both axles
///
/// Baseline damping is half the critical damping of each axle's mass on its
/// spring. Entry and exit adjustments are evaluated separately and averaged.
pub fn damper_settings(spring_rates: &AxlePair<f64>,
                       vehicle: &VehicleParameters,
                       corner_entry_adjustment: i32,
                       corner_exit_adjustment: i32,
                       tyres: &AxlePair<TyreCompound>) -> AxlePair<DamperSetting>
{
    let masses = vehicle.axle_masses();
    let entry = CornerPhaseMultipliers::corner_entry(corner_entry_adjustment);
    let exit = CornerPhaseMultipliers::corner_exit(corner_exit_adjustment);
    let settings = AxlePair::new(
        axle_damper_setting(spring_rates.front,
                            masses.front,
                            tyres.front.damper_multiplier(),
                            (entry.front_compression, entry.front_rebound),
                            (exit.front_compression, exit.front_rebound)),
        axle_damper_setting(spring_rates.rear,
                            masses.rear,
                            tyres.rear.damper_multiplier(),
                            (entry.rear_compression, entry.rear_rebound),
                            (exit.rear_compression, exit.rear_rebound))
    );
    debug!("Calculated damper settings: Front = {:?}, Rear = {:?}", settings.front, settings.rear);
    settings
}

fn axle_damper_setting(spring_rate: f64,
                       axle_mass: f64,
                       tyre_multiplier: f64,
                       entry: (f64, f64),
                       exit: (f64, f64)) -> DamperSetting
{
    let critical_damping = 2.0 * (spring_rate * 1000.0 * axle_mass).sqrt();
    let baseline = critical_damping * CRITICAL_DAMPING_FRACTION;
    let compression = (COMPRESSION_BASE + baseline / COMPRESSION_DIVISOR) * tyre_multiplier;
    let extension = (EXTENSION_BASE + baseline / EXTENSION_DIVISOR) * tyre_multiplier;

    let compression_entry = (compression * entry.0) as i32;
    let compression_exit = (compression * exit.0) as i32;
    let extension_entry = (extension * entry.1) as i32;
    let extension_exit = (extension * exit.1) as i32;

    DamperSetting {
        compression: ((compression_entry + compression_exit) / 2).clamp(MIN_COMPRESSION, MAX_COMPRESSION),
        extension: ((extension_entry + extension_exit) / 2).clamp(MIN_EXTENSION, MAX_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use crate::suspension::dampers::{damper_settings, CornerPhaseMultipliers, DamperSetting};
    use crate::vehicle::{AxlePair, Drivetrain, TyreCompound, VehicleParameters};

    fn sport_medium() -> AxlePair<TyreCompound> {
        AxlePair::new(TyreCompound::SportMedium, TyreCompound::SportMedium)
    }

    #[test]
    fn neutral_dampers() {
        let vehicle = VehicleParameters::new(1200.0, 50.0, Drivetrain::FR);
        let settings = damper_settings(&AxlePair::new(45.0, 45.0), &vehicle, 0, 0, &sport_medium());
        assert_eq!(settings.front, DamperSetting { compression: 25, extension: 36 });
        assert_eq!(settings.rear, DamperSetting { compression: 25, extension: 36 });
    }

    #[test]
    fn entry_understeer_softens_front_compression() {
        let vehicle = VehicleParameters::new(1200.0, 50.0, Drivetrain::FR);
        let settings = damper_settings(&AxlePair::new(45.0, 45.0), &vehicle, -5, 0, &sport_medium());
        assert_eq!(settings.front, DamperSetting { compression: 22, extension: 39 });
        assert!(settings.rear.compression >= 25);
    }

    #[test]
    fn dampers_are_clamped() {
        let vehicle = VehicleParameters::new(1600.0, 50.0, Drivetrain::FR);
        let settings = damper_settings(&AxlePair::new(400.0, 0.0), &vehicle, 0, 0, &sport_medium());
        assert_eq!(settings.front, DamperSetting { compression: 37, extension: 50 });
        assert_eq!(settings.rear, DamperSetting { compression: 20, extension: 30 });
    }

    #[test]
    fn out_of_range_adjustment_is_neutral() {
        assert_eq!(CornerPhaseMultipliers::corner_entry(9), CornerPhaseMultipliers::NEUTRAL);
        assert_eq!(CornerPhaseMultipliers::corner_exit(-6), CornerPhaseMultipliers::NEUTRAL);
        assert_eq!(CornerPhaseMultipliers::corner_exit(5).rear_compression, 0.75);
    }
}
