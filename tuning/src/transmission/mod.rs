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

pub mod gear_set;
pub mod speed;
pub mod acceleration;
pub mod gearing;
pub mod torque_curve;

pub use gear_set::{generate_gear_ratios, Gear, GearLabel, GearSet};
pub use speed::{gear_speeds, optimize_final_drive, speed_at_rpm, GearSpeed, SpeedResult};
pub use acceleration::estimate_acceleration;
pub use gearing::{final_drive_for_power, optimal_gearing, Gearing, GearingTargets};
pub use torque_curve::{torque_curve, TorqueCurveParams, TorquePoint};
