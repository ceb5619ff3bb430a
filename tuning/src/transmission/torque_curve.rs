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
use crate::constants::{DEFAULT_TORQUE_CURVE_POINTS, MAX_TORQUE_RPM_FRACTION};
use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TorqueCurveParams {
    pub min_rpm: f64,
    pub max_rpm: f64,
    pub max_power_rpm: f64,
    pub peak_torque_kgfm: f64,
    #[serde(default = "default_points")]
    pub points: usize
}

fn default_points() -> usize {
    DEFAULT_TORQUE_CURVE_POINTS
}

impl TorqueCurveParams {
    pub fn new(min_rpm: f64, max_rpm: f64, max_power_rpm: f64, peak_torque_kgfm: f64) -> TorqueCurveParams {
        TorqueCurveParams { min_rpm, max_rpm, max_power_rpm, peak_torque_kgfm, points: DEFAULT_TORQUE_CURVE_POINTS }
    }

    pub fn max_torque_rpm(&self) -> f64 {
        self.min_rpm + (self.max_power_rpm - self.min_rpm) * MAX_TORQUE_RPM_FRACTION
    }

    fn validate(&self) -> Result<()> {
        if self.points < 2 {
            return Err(Error::new(ErrorKind::ArgumentError,
                                  format!("A torque curve needs at least 2 points. Got {}", self.points)));
        }
        if !(self.min_rpm < self.max_power_rpm && self.max_power_rpm <= self.max_rpm) {
            return Err(Error::new(ErrorKind::ArgumentError,
                                  format!("Invalid rpm range: min {}, max power {}, max {}",
                                          self.min_rpm, self.max_power_rpm, self.max_rpm)));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TorquePoint {
    pub rpm: f64,
    pub torque_kgfm: f64
}

/// Evenly spaced (rpm, torque) samples of an approximated torque curve that
/// rises to a peak part way to max power then falls away to zero at max rpm
pub fn torque_curve(params: &TorqueCurveParams) -> Result<Vec<TorquePoint>> {
    params.validate()?;
    let rpm_range = params.max_rpm - params.min_rpm;
    let max_torque_rpm = params.max_torque_rpm();
    let curve: Vec<TorquePoint> = (0..params.points).map(|idx| {
        let rpm = params.min_rpm + (idx as f64 * rpm_range / (params.points - 1) as f64);
        let torque_kgfm = if rpm <= max_torque_rpm {
            let factor = (rpm - params.min_rpm) / (max_torque_rpm - params.min_rpm);
            params.peak_torque_kgfm * (1.0 - (1.0 - factor).powf(1.5))
        } else {
            let factor = (rpm - max_torque_rpm) / (params.max_rpm - max_torque_rpm);
            let power_modifier = 1.0 - ((rpm - params.max_power_rpm) / rpm_range).powi(2);
            params.peak_torque_kgfm * (1.0 - factor.powf(1.2)) * f64::max(0.5, power_modifier * 1.5)
        };
        TorquePoint { rpm, torque_kgfm }
    }).collect();
    debug!("Generated torque curve with {} points", curve.len());
    Ok(curve)
}
