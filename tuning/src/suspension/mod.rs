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

pub mod springs;
pub mod frequency;
pub mod dampers;
pub mod roll_bars;
pub mod alignment;

pub use springs::{axle_spring_rates, corner_spring_rate, round_spring_rate, spring_rate};
pub use frequency::{axle_spring_frequencies, default_spring_frequency, spring_frequency};
pub use dampers::{damper_settings, DamperSetting};
pub use roll_bars::{roll_bar_stiffness, RotationalG};
pub use alignment::{alignment_settings, AlignmentInput, AlignmentSettings};
