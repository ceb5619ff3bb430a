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
use utils::numeric::round_to_increment;
use crate::constants::*;
use crate::vehicle::{AxlePair, SuspensionInput, TyreCompound, VehicleParameters};

/// Spring rate (N/mm) for one axle using the fixed 45kg unsprung mass.
///
/// - `weight_kg`: Total vehicle weight
/// - `weight_distribution`: Percentage (0-100) of the weight carried by this axle
///
/// A zero lever ratio is a caller error; check it before calling.
pub fn spring_rate(weight_kg: f64, weight_distribution: f64, suspension: &SuspensionInput) -> f64 {
    corner_spring_rate(weight_kg, weight_distribution, suspension, UNSPRUNG_MASS_KG, 1.0)
}

pub fn corner_spring_rate(weight_kg: f64,
                          weight_distribution: f64,
                          suspension: &SuspensionInput,
                          unsprung_mass_kg: f64,
                          compound_multiplier: f64) -> f64
{
    let sprung_mass = weight_kg * (weight_distribution / 100.0)
        + (suspension.downforce / 2.0)
        - unsprung_mass_kg;
    // Rates are never negative
    let load_n = (f64::max(0.0, sprung_mass) / suspension.lever_ratio) * GRAVITY;
    let ride_height_m = f64::max(MIN_RIDE_HEIGHT_MM, suspension.ride_height_mm) / 1000.0;
    let rate_n_per_m = (load_n / ride_height_m) * suspension.stiffness_multiplier * compound_multiplier;
    round_spring_rate(rate_n_per_m / 1000.0)
}

/// Round a spring rate (N/mm) to the increments the game allows:
/// 0.1 below 10, 0.5 up to 30 and whole numbers above that
pub fn round_spring_rate(rate: f64) -> f64 {
    if rate < SPRING_RATE_FINE_LIMIT {
        round_to_increment(rate, SPRING_RATE_FINE_INCREMENT)
    } else if rate < SPRING_RATE_MEDIUM_LIMIT {
        round_to_increment(rate, SPRING_RATE_MEDIUM_INCREMENT)
    } else {
        round_to_increment(rate, SPRING_RATE_COARSE_INCREMENT)
    }
}

/// Front and rear spring rates (N/mm) taking the drivetrain's unsprung mass
/// and each axle's tyre compound into account
pub fn axle_spring_rates(vehicle: &VehicleParameters,
                         suspension: &AxlePair<SuspensionInput>,
                         tyres: &AxlePair<TyreCompound>) -> AxlePair<f64>
{
    debug!("Calculating spring rates for {}kg, {}% front, ride heights F:{}mm R:{}mm",
           vehicle.weight_kg, vehicle.front_weight_distribution,
           suspension.front.ride_height_mm, suspension.rear.ride_height_mm);
    let unsprung_mass = vehicle.drivetrain.unsprung_mass_kg();
    let rates = AxlePair::new(
        corner_spring_rate(vehicle.weight_kg,
                           vehicle.front_weight_distribution,
                           &suspension.front,
                           unsprung_mass,
                           tyres.front.spring_multiplier()),
        corner_spring_rate(vehicle.weight_kg,
                           vehicle.rear_weight_distribution(),
                           &suspension.rear,
                           unsprung_mass,
                           tyres.rear.spring_multiplier())
    );
    debug!("Calculated spring rates: Front = {} N/mm, Rear = {} N/mm", rates.front, rates.rear);
    rates
}

#[cfg(test)]
mod tests {
    use crate::suspension::springs::{axle_spring_rates, round_spring_rate, spring_rate};
    use crate::vehicle::{AxlePair, Drivetrain, SuspensionInput, TyreCompound, VehicleParameters};

    #[test]
    fn rounding_tiers() {
        assert_eq!(round_spring_rate(9.96), 10.0);
        assert_eq!(round_spring_rate(8.93), 8.9);
        assert_eq!(round_spring_rate(29.7), 29.5);
        assert_eq!(round_spring_rate(22.32), 22.5);
        assert_eq!(round_spring_rate(30.4), 30.0);
        assert_eq!(round_spring_rate(44.64), 45.0);
    }

    #[test]
    fn basic_spring_rate() {
        // (500 - 45) * 9.81 / 0.1m = 44.6355 N/mm
        let suspension = SuspensionInput::new(100.0, 1.0);
        assert_eq!(spring_rate(1000.0, 50.0, &suspension), 45.0);
        assert_eq!(spring_rate(1000.0, 50.0, &suspension.clone().with_stiffness_multiplier(0.5)), 22.5);
        assert_eq!(spring_rate(1000.0, 50.0, &suspension.clone().with_stiffness_multiplier(0.2)), 8.9);
    }

    #[test]
    fn downforce_and_lever_ratio() {
        // (500 + 90/2 - 45) / 2.0 * 9.81 / 0.1m = 24.525 N/mm
        let suspension = SuspensionInput::new(100.0, 2.0).with_downforce(90.0);
        assert_eq!(spring_rate(1000.0, 50.0, &suspension), 24.5);
    }

    #[test]
    fn ride_height_is_clamped_to_one_mm() {
        let zero_height = SuspensionInput::new(0.0, 1.0);
        let one_mm = SuspensionInput::new(1.0, 1.0);
        let rate = spring_rate(1000.0, 50.0, &zero_height);
        assert!(rate.is_finite());
        assert_eq!(rate, spring_rate(1000.0, 50.0, &one_mm));
    }

    #[test]
    fn never_negative() {
        let suspension = SuspensionInput::new(100.0, 1.0);
        assert_eq!(spring_rate(60.0, 50.0, &suspension), 0.0);
        for weight in [100.0, 500.0, 900.0, 1400.0, 2000.0] {
            for distribution in [0.0, 10.0, 35.0, 50.0, 65.0, 100.0] {
                assert!(spring_rate(weight, distribution, &suspension) >= 0.0);
            }
        }
    }

    #[test]
    fn axle_rates_use_drivetrain_and_tyres() {
        let suspension = AxlePair::new(SuspensionInput::new(100.0, 1.0), SuspensionInput::new(100.0, 1.0));
        let tyres = AxlePair::new(TyreCompound::RacingMedium, TyreCompound::RacingMedium);

        let fr = VehicleParameters::new(1200.0, 55.0, Drivetrain::FR);
        let rates = axle_spring_rates(&fr, &suspension, &tyres);
        assert_eq!(rates.front, 62.0);
        assert_eq!(rates.rear, 50.0);

        let ff = VehicleParameters::new(1200.0, 55.0, Drivetrain::FF);
        let rates = axle_spring_rates(&ff, &suspension, &tyres);
        assert_eq!(rates.front, 61.0);
        assert_eq!(rates.rear, 49.0);
    }
}
