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
use tracing::debug;
use utils::numeric::round_float_to;
use crate::constants::{DEFAULT_CAR_TYPE_MULTIPLIER, DEFAULT_OFFSET_MULTIPLIER};
use crate::vehicle::{AxlePair, CarCategory, VehicleParameters};

/// Natural frequency (Hz) of a sprung mass on its spring
///
/// - `spring_rate`: Spring rate in N/mm
/// - `weight_kg`: The mass the spring carries. Must be greater than zero
pub fn spring_frequency(spring_rate: f64,
                        weight_kg: f64,
                        car_type_multiplier: f64,
                        offset_multiplier: f64) -> f64
{
    let angular = ((spring_rate * 1000.0) / weight_kg).sqrt();
    round_float_to((1.0 / (2.0 * PI)) * angular * car_type_multiplier * offset_multiplier, 2)
}

pub fn default_spring_frequency(spring_rate: f64, weight_kg: f64) -> f64 {
    spring_frequency(spring_rate, weight_kg, DEFAULT_CAR_TYPE_MULTIPLIER, DEFAULT_OFFSET_MULTIPLIER)
}

pub fn car_type_multiplier(category: &CarCategory) -> f64 {
    match category {
        CarCategory::Road => 1.3,
        CarCategory::Gr4 => 1.333,
        CarCategory::Race => 1.333,
        CarCategory::Vgt => 1.666,
        CarCategory::Fan => 2.0,
        CarCategory::Gr3 | CarCategory::Other(_) => DEFAULT_CAR_TYPE_MULTIPLIER
    }
}

/// The in-game frequency offset setting (-5 to 6) as a multiplier
pub fn frequency_offset_multiplier(offset: i32) -> f64 {
    match offset {
        -5 => 0.5,
        -4 => 0.6,
        -3 => 0.7,
        -2 => 0.8,
        -1 => 0.9,
        0 => 1.0,
        1 => 1.1,
        2 => 1.2,
        3 => 1.3,
        4 => 1.4,
        5 => 1.5,
        6 => 1.6,
        _ => DEFAULT_OFFSET_MULTIPLIER
    }
}

pub fn axle_spring_frequencies(spring_rates: &AxlePair<f64>,
                               vehicle: &VehicleParameters,
                               category: &CarCategory,
                               frequency_offset: i32) -> AxlePair<f64>
{
    let car_multiplier = car_type_multiplier(category);
    let offset_multiplier = frequency_offset_multiplier(frequency_offset);
    let masses = vehicle.axle_masses();
    let frequencies = AxlePair::new(
        spring_frequency(spring_rates.front, masses.front, car_multiplier, offset_multiplier),
        spring_frequency(spring_rates.rear, masses.rear, car_multiplier, offset_multiplier)
    );
    debug!("Calculated spring frequencies: Front = {} Hz, Rear = {} Hz", frequencies.front, frequencies.rear);
    frequencies
}

#[cfg(test)]
mod tests {
    use crate::suspension::frequency::*;
    use crate::vehicle::{AxlePair, CarCategory, Drivetrain, VehicleParameters};

    #[test]
    fn frequency_with_defaults() {
        // sqrt(45000 / 600) / 2pi = 1.3783 Hz
        assert_eq!(default_spring_frequency(45.0, 600.0), 1.84);
        assert_eq!(spring_frequency(45.0, 600.0, 1.0, 1.0), 1.38);
    }

    #[test]
    fn frequency_with_multipliers() {
        let road = car_type_multiplier(&CarCategory::Road);
        assert_eq!(spring_frequency(45.0, 600.0, road, frequency_offset_multiplier(2)), 2.15);
    }

    #[test]
    fn car_type_table() {
        assert_eq!(car_type_multiplier(&CarCategory::Road), 1.3);
        assert_eq!(car_type_multiplier(&CarCategory::Vgt), 1.666);
        assert_eq!(car_type_multiplier(&CarCategory::Fan), 2.0);
        assert_eq!(car_type_multiplier(&CarCategory::Gr3), 1.333);
        assert_eq!(car_type_multiplier(&CarCategory::Other("KART".to_string())), 1.333);
    }

    #[test]
    fn offset_table() {
        assert_eq!(frequency_offset_multiplier(-5), 0.5);
        assert_eq!(frequency_offset_multiplier(0), 1.0);
        assert_eq!(frequency_offset_multiplier(6), 1.6);
        assert_eq!(frequency_offset_multiplier(7), 1.0);
        assert_eq!(frequency_offset_multiplier(-6), 1.0);
    }

    #[test]
    fn axle_frequencies_use_axle_mass() {
        let vehicle = VehicleParameters::new(1200.0, 50.0, Drivetrain::FR);
        let rates = AxlePair::new(45.0, 45.0);
        let frequencies = axle_spring_frequencies(&rates, &vehicle, &CarCategory::Gr4, 0);
        assert_eq!(frequencies.front, 1.84);
        assert_eq!(frequencies.rear, 1.84);
    }
}
