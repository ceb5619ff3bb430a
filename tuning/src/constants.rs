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

//! Physical constants and the empirical coefficients used by the tuning formulas.
//!
//! The acceleration coefficients are calibration values matched against in-game
//! results rather than derived quantities. Replace them as a set if a better
//! model is validated against real game data.

pub const GRAVITY: f64 = 9.81; // m/s^2

/// Mass (kg) per corner not carried by the springs when nothing better is known
pub const UNSPRUNG_MASS_KG: f64 = 45.0;
pub const UNSPRUNG_MASS_FRONT_DRIVEN_KG: f64 = 55.0;

pub const MIN_RIDE_HEIGHT_MM: f64 = 1.0;

// Spring rate rounding tiers (N/mm)
pub const SPRING_RATE_FINE_LIMIT: f64 = 10.0;
pub const SPRING_RATE_MEDIUM_LIMIT: f64 = 30.0;
pub const SPRING_RATE_FINE_INCREMENT: f64 = 0.1;
pub const SPRING_RATE_MEDIUM_INCREMENT: f64 = 0.5;
pub const SPRING_RATE_COARSE_INCREMENT: f64 = 1.0;

pub const DEFAULT_CAR_TYPE_MULTIPLIER: f64 = 1.333;
pub const DEFAULT_OFFSET_MULTIPLIER: f64 = 1.0;

pub const MIN_TYRE_DIAMETER_IN: f64 = 15.0;
pub const MAX_TYRE_DIAMETER_IN: f64 = 35.0;
pub const DEFAULT_TYRE_DIAMETER_IN: f64 = 26.0;

// 0-60 estimate calibration
pub const ACCEL_BASE_SECONDS: f64 = 5.0;
pub const ACCEL_SCALE: f64 = 2.5;
pub const DEFAULT_FIRST_GEAR_RATIO: f64 = 3.545;
pub const SECOND_GEAR_FALLBACK_FACTOR: f64 = 0.6;
pub const GEAR_SPACING_PENALTY_BASE: f64 = 0.9;
pub const GEAR_SPACING_PENALTY_SLOPE: f64 = 0.1;
pub const CLOSE_GEAR_SPACING_LIMIT: f64 = 1.5;
pub const WIDE_GEAR_SPACING_LIMIT: f64 = 2.0;
pub const CLOSE_GEAR_SPACING_ORIGIN: f64 = 1.0;
pub const WIDE_GEAR_SPACING_ORIGIN: f64 = 2.5;
pub const TALL_FIRST_GEAR_LIMIT: f64 = 3.5;
pub const SHORT_FIRST_GEAR_LIMIT: f64 = 2.5;
pub const TALL_FIRST_GEAR_PENALTY: f64 = 0.03;
pub const SHORT_FIRST_GEAR_PENALTY: f64 = 0.05;

// Target-based gearing
pub const BASE_FINAL_DRIVE: f64 = 4.5;
pub const FINAL_DRIVE_PER_HP: f64 = 0.0015;
pub const MIN_FINAL_DRIVE: f64 = 3.0;
pub const MAX_FINAL_DRIVE: f64 = 5.0;
pub const MAX_FIRST_GEAR_RATIO: f64 = 5.0;
pub const CORNER_RPM_POWER_BAND_FRACTION: f64 = 0.4;

// Dampers
pub const CRITICAL_DAMPING_FRACTION: f64 = 0.5;
pub const COMPRESSION_BASE: f64 = 20.0;
pub const COMPRESSION_DIVISOR: f64 = 1000.0;
pub const EXTENSION_BASE: f64 = 30.0;
pub const EXTENSION_DIVISOR: f64 = 800.0;
pub const MIN_COMPRESSION: i32 = 20;
pub const MAX_COMPRESSION: i32 = 40;
pub const MIN_EXTENSION: i32 = 30;
pub const MAX_EXTENSION: i32 = 50;

pub const MIN_ROLL_BAR: f64 = 1.0;
pub const MAX_ROLL_BAR: f64 = 10.0;

// Alignment
pub const CAMBER_SCALE: f64 = 1.2;
pub const TOE_TRACK_SCALE: f64 = 3.0;
pub const FRONT_TOE_STABILITY_DIVISOR: f64 = 40.0;
pub const REAR_TOE_STABILITY_SCALE: f64 = 0.05;
pub const REAR_TOE_BASE: f64 = 0.2;
pub const MAX_TYRE_WEAR_REDUCTION: f64 = 0.3;
pub const MAX_TYRE_WEAR_MULTIPLIER: u32 = 50;

// Simulated torque curve
pub const MAX_TORQUE_RPM_FRACTION: f64 = 0.6;
pub const DEFAULT_TORQUE_CURVE_POINTS: usize = 20;
