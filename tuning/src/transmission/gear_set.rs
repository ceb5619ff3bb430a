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

use std::fmt::{Display, Formatter};
use itertools::Itertools;
use serde::{Serialize, Serializer};
use tracing::debug;
use utils::numeric::round_float_to;
use crate::error::{Error, ErrorKind, Result};

/// Position of a gear in the gearbox, indexed from 0 and displayed as an ordinal (1st, 2nd, ...)
#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GearLabel {
    idx: usize
}

impl GearLabel {
    pub fn new(idx: usize) -> GearLabel {
        GearLabel { idx }
    }

    pub fn index(&self) -> usize {
        self.idx
    }

    pub fn gear_number(&self) -> usize {
        self.idx + 1
    }
}

impl Display for GearLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let number = self.gear_number();
        let suffix = match (number % 10, number % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th"
        };
        write!(f, "{}{}", number, suffix)
    }
}

impl Serialize for GearLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Gear {
    pub label: GearLabel,
    pub ratio: f64
}

/// Gear ratios in gearbox order. Position matters: the first and second
/// entries are always 1st and 2nd gear.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GearSet {
    gears: Vec<Gear>
}

impl GearSet {
    pub fn new() -> GearSet {
        GearSet { gears: Vec::new() }
    }

    pub fn from_ratios(ratios: &[f64]) -> GearSet {
        GearSet {
            gears: ratios.iter()
                .enumerate()
                .map(|(idx, ratio)| Gear { label: GearLabel::new(idx), ratio: *ratio })
                .collect()
        }
    }

    pub fn push(&mut self, ratio: f64) {
        let label = GearLabel::new(self.gears.len());
        self.gears.push(Gear { label, ratio });
    }

    pub fn len(&self) -> usize {
        self.gears.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gears.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Gear> {
        self.gears.iter()
    }

    pub fn ratios(&self) -> Vec<f64> {
        self.gears.iter().map(|gear| gear.ratio).collect()
    }

    pub fn ratio(&self, label: GearLabel) -> Option<f64> {
        self.gears.get(label.index()).map(|gear| gear.ratio)
    }

    pub fn first_ratio(&self) -> Option<f64> {
        self.gears.first().map(|gear| gear.ratio)
    }

    pub fn second_ratio(&self) -> Option<f64> {
        self.gears.get(1).map(|gear| gear.ratio)
    }

    pub fn last_ratio(&self) -> Option<f64> {
        self.gears.last().map(|gear| gear.ratio)
    }

    pub fn is_strictly_decreasing(&self) -> bool {
        self.gears.iter().tuple_windows().all(|(a, b)| a.ratio > b.ratio)
    }
}

/// Spread `gear_count` ratios between `first_gear_ratio` and `last_gear_ratio`
/// in a geometric progression, rounded to 3 decimal places as the game does
pub fn generate_gear_ratios(gear_count: usize, first_gear_ratio: f64, last_gear_ratio: f64) -> Result<GearSet> {
    if gear_count < 2 {
        return Err(Error::new(ErrorKind::ArgumentError,
                              format!("At least 2 gears are needed to spread ratios. Got {}", gear_count)));
    }
    let step = (last_gear_ratio / first_gear_ratio).powf(1.0 / (gear_count - 1) as f64);
    let mut gear_set = GearSet::new();
    for idx in 0..gear_count {
        gear_set.push(round_float_to(first_gear_ratio * step.powi(idx as i32), 3));
    }
    debug!("Generated gear ratios: {}", gear_set.iter().map(|g| format!("{}={}", g.label, g.ratio)).join(", "));
    Ok(gear_set)
}
