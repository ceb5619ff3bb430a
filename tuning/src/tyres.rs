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
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utils::numeric::round_float_to;
use utils::units::{inches_to_meters, INCHES_PER_METER};
use crate::constants::{DEFAULT_TYRE_DIAMETER_IN, MAX_TYRE_DIAMETER_IN, MIN_TYRE_DIAMETER_IN};
use crate::vehicle::{AxlePair, CarCategory};

/// Rolling circumference (m) of a tyre of the given diameter (inches)
pub fn tyre_circumference_m(diameter_in: f64) -> f64 {
    PI * inches_to_meters(diameter_in)
}

/// Raised when a tyre diameter estimate falls outside the plausible range
/// and the default was used instead
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TyreDiameterWarning {
    pub rejected_diameter_in: f64
}

impl Display for TyreDiameterWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Calculated tyre diameter {:.2}in is outside {}-{}in. Using {}in",
               self.rejected_diameter_in, MIN_TYRE_DIAMETER_IN, MAX_TYRE_DIAMETER_IN, DEFAULT_TYRE_DIAMETER_IN)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TyreDiameterEstimate {
    pub diameter_in: f64,
    pub warning: Option<TyreDiameterWarning>
}

impl TyreDiameterEstimate {
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Work back from an observed speed (km/h) at a given rpm in a known gear to
/// the diameter (inches) of the driven tyres.
///
/// Anything outside 15-35 inches is treated as bad input (e.g. a misread
/// screenshot) and replaced with the 26 inch default plus a warning.
pub fn estimate_tyre_diameter(gear_ratio: f64, rpm: f64, speed_kph: f64, final_drive: f64) -> TyreDiameterEstimate {
    let wheel_revs_per_hour = (rpm / (gear_ratio * final_drive)) * 60.0;
    let diameter_in = ((speed_kph * 1000.0) / (wheel_revs_per_hour * PI)) * INCHES_PER_METER;
    if (MIN_TYRE_DIAMETER_IN..=MAX_TYRE_DIAMETER_IN).contains(&diameter_in) {
        return TyreDiameterEstimate { diameter_in: round_float_to(diameter_in, 2), warning: None };
    }
    let warning = TyreDiameterWarning { rejected_diameter_in: diameter_in };
    warn!("{}", warning);
    TyreDiameterEstimate { diameter_in: DEFAULT_TYRE_DIAMETER_IN, warning: Some(warning) }
}

/// Recommended front/rear tyre diameters (inches) for a vehicle class
pub fn recommended_tyre_sizes(category: &CarCategory, model_year: i32) -> AxlePair<f64> {
    let (front, rear) = match category {
        CarCategory::Road if model_year < 1990 => (22.5, 23.0),
        CarCategory::Road => (24.0, 24.5),
        CarCategory::Gr4 => (26.0, 26.0),
        CarCategory::Gr3 => (27.0, 27.0),
        CarCategory::Race => (28.0, 28.5),
        CarCategory::Vgt => (26.5, 27.0),
        CarCategory::Fan | CarCategory::Other(_) => (DEFAULT_TYRE_DIAMETER_IN, DEFAULT_TYRE_DIAMETER_IN)
    };
    AxlePair::new(front, rear)
}
