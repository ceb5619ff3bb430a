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
use crate::constants::*;
use crate::vehicle::{AxlePair, Drivetrain, TrackType, TyreCompound};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentInput {
    pub rotational_g_75mph: f64,
    pub drivetrain: Drivetrain,
    /// In-game tyre wear multiplier (0-50)
    pub tyre_wear_multiplier: u32,
    pub track_type: TrackType,
    pub front_weight_distribution: f64,
    pub low_speed_stability: f64,
    /// Must not be zero
    pub high_speed_stability: f64,
    pub tyres: AxlePair<TyreCompound>
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSettings {
    pub camber: AxlePair<f64>,
    pub toe: AxlePair<f64>
}

/// Higher tyre wear settings reduce the alignment aggressiveness by up to 30%
pub fn tyre_wear_factor(tyre_wear_multiplier: u32) -> f64 {
    if (1..=MAX_TYRE_WEAR_MULTIPLIER).contains(&tyre_wear_multiplier) {
        1.0 - (MAX_TYRE_WEAR_REDUCTION * tyre_wear_multiplier as f64 / MAX_TYRE_WEAR_MULTIPLIER as f64)
    } else {
        1.0
    }
}

pub fn alignment_settings(input: &AlignmentInput) -> AlignmentSettings {
    let front_dt = input.drivetrain.front_camber_factor();
    let rear_dt = input.drivetrain.rear_camber_factor();
    let track = input.track_type.alignment_factor();
    let wear = tyre_wear_factor(input.tyre_wear_multiplier);
    let front_ratio = input.front_weight_distribution / 100.0;
    let half_g = input.rotational_g_75mph / 2.0;

    let front_camber = ((half_g * front_dt * track * wear) + front_ratio)
        * CAMBER_SCALE
        * input.tyres.front.damper_multiplier();
    let rear_camber = ((half_g * rear_dt * track * wear) - front_ratio + 1.0)
        * CAMBER_SCALE
        * input.tyres.rear.damper_multiplier();

    let front_toe = (input.low_speed_stability / -(input.high_speed_stability * FRONT_TOE_STABILITY_DIVISOR))
        * front_dt
        * wear
        * (track * TOE_TRACK_SCALE)
        * input.tyres.front.toe_multiplier();
    let rear_toe = (-(input.high_speed_stability * input.low_speed_stability * REAR_TOE_STABILITY_SCALE)
        * rear_dt
        * wear
        * (track * TOE_TRACK_SCALE)
        + REAR_TOE_BASE)
        * input.tyres.rear.toe_multiplier();

    let settings = AlignmentSettings {
        camber: AxlePair::new(round_float_to(front_camber, 1), round_float_to(rear_camber, 1)),
        toe: AxlePair::new(round_float_to(front_toe, 2), round_float_to(rear_toe, 2))
    };
    debug!("Calculated alignment settings: camber {:?}, toe {:?}", settings.camber, settings.toe);
    settings
}
