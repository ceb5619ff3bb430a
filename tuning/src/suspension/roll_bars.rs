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
use utils::numeric::clamp_float;
use crate::constants::{MAX_ROLL_BAR, MIN_ROLL_BAR};
use crate::vehicle::AxlePair;

/// Rotational G readings taken from the in-game telemetry at three speeds
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationalG {
    pub at_40_mph: f64,
    pub at_75_mph: f64,
    pub at_150_mph: f64
}

impl RotationalG {
    pub fn new(at_40_mph: f64, at_75_mph: f64, at_150_mph: f64) -> RotationalG {
        RotationalG { at_40_mph, at_75_mph, at_150_mph }
    }

    pub fn sum(&self) -> f64 {
        self.at_40_mph + self.at_75_mph + self.at_150_mph
    }
}

/// Front/rear scaling for the oversteer (+) / understeer (-) preference (-5 to 5)
pub fn oversteer_understeer_multipliers(adjustment: i32) -> AxlePair<f64> {
    let (front, rear) = match adjustment {
        -5 => (1.5, 0.5),
        -4 => (1.4, 0.6),
        -3 => (1.3, 0.7),
        -2 => (1.2, 0.8),
        -1 => (1.1, 0.9),
        1 => (0.9, 1.1),
        2 => (0.8, 1.2),
        3 => (0.7, 1.3),
        4 => (0.6, 1.4),
        5 => (0.5, 1.5),
        _ => (1.0, 1.0)
    };
    AxlePair::new(front, rear)
}

/// Anti-roll bar stiffness (1-10) for both axles
pub fn roll_bar_stiffness(rotational_g: &RotationalG,
                          low_speed_stability: f64,
                          high_speed_stability: f64,
                          arb_stiffness_multiplier: f64,
                          oversteer_understeer: i32) -> AxlePair<f64>
{
    let balance = oversteer_understeer_multipliers(oversteer_understeer);
    let g_sum = rotational_g.sum();

    let front = g_sum * -high_speed_stability * arb_stiffness_multiplier * balance.front;
    let rear = g_sum * -(low_speed_stability + high_speed_stability) * arb_stiffness_multiplier * balance.rear;

    let roll_bars = AxlePair::new(
        clamp_float(front, MIN_ROLL_BAR, MAX_ROLL_BAR),
        clamp_float(rear, MIN_ROLL_BAR, MAX_ROLL_BAR)
    );
    debug!("Calculated roll bar stiffness: Front = {}, Rear = {}", roll_bars.front, roll_bars.rear);
    roll_bars
}
