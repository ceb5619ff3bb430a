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
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::constants::{UNSPRUNG_MASS_FRONT_DRIVEN_KG, UNSPRUNG_MASS_KG};
use crate::error::PropertyParseError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Drivetrain {
    FF,
    FR,
    MR,
    RR,
    #[serde(rename = "4WD")]
    AWD
}

impl Drivetrain {
    pub const FF_VALUE: &'static str = "FF";
    pub const FR_VALUE: &'static str = "FR";
    pub const MR_VALUE: &'static str = "MR";
    pub const RR_VALUE: &'static str = "RR";
    pub const AWD_VALUE: &'static str = "4WD";

    pub fn as_str(&self) -> &'static str {
        match self {
            Drivetrain::FF => { Drivetrain::FF_VALUE }
            Drivetrain::FR => { Drivetrain::FR_VALUE }
            Drivetrain::MR => { Drivetrain::MR_VALUE }
            Drivetrain::RR => { Drivetrain::RR_VALUE }
            Drivetrain::AWD => { Drivetrain::AWD_VALUE }
        }
    }

    /// Unsprung mass (kg) assumed at each corner. Cars driving the front axle
    /// carry the heavier hubs.
    pub fn unsprung_mass_kg(&self) -> f64 {
        match self {
            Drivetrain::FF | Drivetrain::AWD => { UNSPRUNG_MASS_FRONT_DRIVEN_KG }
            Drivetrain::FR | Drivetrain::MR | Drivetrain::RR => { UNSPRUNG_MASS_KG }
        }
    }

    pub fn front_camber_factor(&self) -> f64 {
        match self {
            Drivetrain::AWD => 2.5,
            Drivetrain::FF => 1.5,
            Drivetrain::FR => 3.0,
            Drivetrain::MR => 2.0,
            Drivetrain::RR => 2.0
        }
    }

    pub fn rear_camber_factor(&self) -> f64 {
        match self {
            Drivetrain::AWD => 2.5,
            Drivetrain::FF => 3.0,
            Drivetrain::FR => 1.5,
            Drivetrain::MR => 2.5,
            Drivetrain::RR => 2.5
        }
    }
}

impl FromStr for Drivetrain {
    type Err = PropertyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            Drivetrain::FF_VALUE => Ok(Drivetrain::FF),
            Drivetrain::FR_VALUE => Ok(Drivetrain::FR),
            Drivetrain::MR_VALUE => Ok(Drivetrain::MR),
            Drivetrain::RR_VALUE => Ok(Drivetrain::RR),
            Drivetrain::AWD_VALUE | "AWD" => Ok(Drivetrain::AWD),
            _ => Err(PropertyParseError::new(s))
        }
    }
}

impl Display for Drivetrain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle class as used by the in-game tuning menus. Anything unrecognised
/// is kept as [`CarCategory::Other`] so lookups fall back to their defaults.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CarCategory {
    Road,
    Gr4,
    Gr3,
    Race,
    Vgt,
    Fan,
    Other(String)
}

impl CarCategory {
    pub const ROAD_VALUE: &'static str = "ROAD";
    pub const GR4_VALUE: &'static str = "GR4";
    pub const GR3_VALUE: &'static str = "GR3";
    pub const RACE_VALUE: &'static str = "RACE";
    pub const VGT_VALUE: &'static str = "VGT";
    pub const FAN_VALUE: &'static str = "FAN";

    pub fn as_str(&self) -> &str {
        match self {
            CarCategory::Road => CarCategory::ROAD_VALUE,
            CarCategory::Gr4 => CarCategory::GR4_VALUE,
            CarCategory::Gr3 => CarCategory::GR3_VALUE,
            CarCategory::Race => CarCategory::RACE_VALUE,
            CarCategory::Vgt => CarCategory::VGT_VALUE,
            CarCategory::Fan => CarCategory::FAN_VALUE,
            CarCategory::Other(name) => name.as_str()
        }
    }
}

impl From<&str> for CarCategory {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            CarCategory::ROAD_VALUE => CarCategory::Road,
            CarCategory::GR4_VALUE => CarCategory::Gr4,
            CarCategory::GR3_VALUE => CarCategory::Gr3,
            CarCategory::RACE_VALUE => CarCategory::Race,
            CarCategory::VGT_VALUE => CarCategory::Vgt,
            CarCategory::FAN_VALUE => CarCategory::Fan,
            _ => CarCategory::Other(value.to_string())
        }
    }
}

impl From<String> for CarCategory {
    fn from(value: String) -> Self {
        CarCategory::from(value.as_str())
    }
}

impl From<CarCategory> for String {
    fn from(value: CarCategory) -> Self {
        value.as_str().to_string()
    }
}

impl Display for CarCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TyreCompound {
    #[serde(rename = "CH")]
    ComfortHard,
    #[serde(rename = "CM")]
    ComfortMedium,
    #[serde(rename = "CS")]
    ComfortSoft,
    #[serde(rename = "SH")]
    SportHard,
    #[serde(rename = "SM")]
    SportMedium,
    #[serde(rename = "SS")]
    SportSoft,
    #[serde(rename = "RH")]
    RacingHard,
    #[default]
    #[serde(rename = "RM")]
    RacingMedium,
    #[serde(rename = "RS")]
    RacingSoft,
    #[serde(rename = "RI")]
    RacingIntermediate,
    #[serde(rename = "RW")]
    RacingHeavyWet
}

impl TyreCompound {
    pub fn as_str(&self) -> &'static str {
        match self {
            TyreCompound::ComfortHard => "CH",
            TyreCompound::ComfortMedium => "CM",
            TyreCompound::ComfortSoft => "CS",
            TyreCompound::SportHard => "SH",
            TyreCompound::SportMedium => "SM",
            TyreCompound::SportSoft => "SS",
            TyreCompound::RacingHard => "RH",
            TyreCompound::RacingMedium => "RM",
            TyreCompound::RacingSoft => "RS",
            TyreCompound::RacingIntermediate => "RI",
            TyreCompound::RacingHeavyWet => "RW"
        }
    }

    /// Spring rate scaling relative to Sport Medium (1% steps)
    pub fn spring_multiplier(&self) -> f64 {
        match self {
            TyreCompound::ComfortHard => 0.96,
            TyreCompound::ComfortMedium => 0.97,
            TyreCompound::ComfortSoft => 0.98,
            TyreCompound::SportHard => 0.99,
            TyreCompound::SportMedium => 1.0,
            TyreCompound::SportSoft => 1.01,
            TyreCompound::RacingHard => 1.01,
            TyreCompound::RacingMedium => 1.02,
            TyreCompound::RacingSoft => 1.03,
            TyreCompound::RacingIntermediate => 1.0,
            TyreCompound::RacingHeavyWet => 0.98
        }
    }

    /// Damper, anti-roll bar and camber scaling (0.5% steps)
    pub fn damper_multiplier(&self) -> f64 {
        match self {
            TyreCompound::ComfortHard => 0.98,
            TyreCompound::ComfortMedium => 0.985,
            TyreCompound::ComfortSoft => 0.99,
            TyreCompound::SportHard => 0.995,
            TyreCompound::SportMedium => 1.0,
            TyreCompound::SportSoft => 1.005,
            TyreCompound::RacingHard => 1.005,
            TyreCompound::RacingMedium => 1.01,
            TyreCompound::RacingSoft => 1.015,
            TyreCompound::RacingIntermediate => 1.0,
            TyreCompound::RacingHeavyWet => 0.99
        }
    }

    /// Toe scaling (0.1% steps)
    pub fn toe_multiplier(&self) -> f64 {
        match self {
            TyreCompound::ComfortHard => 0.996,
            TyreCompound::ComfortMedium => 0.997,
            TyreCompound::ComfortSoft => 0.998,
            TyreCompound::SportHard => 0.999,
            TyreCompound::SportMedium => 1.0,
            TyreCompound::SportSoft => 1.001,
            TyreCompound::RacingHard => 1.001,
            TyreCompound::RacingMedium => 1.002,
            TyreCompound::RacingSoft => 1.003,
            TyreCompound::RacingIntermediate => 1.0,
            TyreCompound::RacingHeavyWet => 0.998
        }
    }
}

impl FromStr for TyreCompound {
    type Err = PropertyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CH" => Ok(TyreCompound::ComfortHard),
            "CM" => Ok(TyreCompound::ComfortMedium),
            "CS" => Ok(TyreCompound::ComfortSoft),
            "SH" => Ok(TyreCompound::SportHard),
            "SM" => Ok(TyreCompound::SportMedium),
            "SS" => Ok(TyreCompound::SportSoft),
            "RH" => Ok(TyreCompound::RacingHard),
            "RM" => Ok(TyreCompound::RacingMedium),
            "RS" => Ok(TyreCompound::RacingSoft),
            "RI" => Ok(TyreCompound::RacingIntermediate),
            "RW" => Ok(TyreCompound::RacingHeavyWet),
            _ => Err(PropertyParseError::new(s))
        }
    }
}

impl Display for TyreCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TrackType {
    Fast,
    Technical
}

impl TrackType {
    pub fn alignment_factor(&self) -> f64 {
        match self {
            TrackType::Fast => 0.9,
            TrackType::Technical => 1.1
        }
    }
}

impl FromStr for TrackType {
    type Err = PropertyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(TrackType::Fast),
            "technical" => Ok(TrackType::Technical),
            _ => Err(PropertyParseError::new(s))
        }
    }
}

/// Front/rear pair of any per-axle value
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxlePair<T> {
    pub front: T,
    pub rear: T
}

impl<T> AxlePair<T> {
    pub fn new(front: T, rear: T) -> AxlePair<T> {
        AxlePair { front, rear }
    }

    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> AxlePair<U> {
        AxlePair { front: f(&self.front), rear: f(&self.rear) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleParameters {
    pub weight_kg: f64,
    /// Percentage of the weight over the front axle (0-100)
    pub front_weight_distribution: f64,
    pub drivetrain: Drivetrain
}

impl VehicleParameters {
    pub fn new(weight_kg: f64, front_weight_distribution: f64, drivetrain: Drivetrain) -> VehicleParameters {
        VehicleParameters { weight_kg, front_weight_distribution, drivetrain }
    }

    pub fn rear_weight_distribution(&self) -> f64 {
        100.0 - self.front_weight_distribution
    }

    pub fn weight_distribution(&self) -> AxlePair<f64> {
        AxlePair::new(self.front_weight_distribution, self.rear_weight_distribution())
    }

    /// Mass (kg) carried by each axle
    pub fn axle_masses(&self) -> AxlePair<f64> {
        self.weight_distribution().map(|share| self.weight_kg * (share / 100.0))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspensionInput {
    pub ride_height_mm: f64,
    pub lever_ratio: f64,
    #[serde(default)]
    pub downforce: f64,
    #[serde(default = "default_stiffness_multiplier")]
    pub stiffness_multiplier: f64
}

fn default_stiffness_multiplier() -> f64 {
    1.0
}

impl SuspensionInput {
    pub fn new(ride_height_mm: f64, lever_ratio: f64) -> SuspensionInput {
        SuspensionInput {
            ride_height_mm,
            lever_ratio,
            downforce: 0.0,
            stiffness_multiplier: default_stiffness_multiplier()
        }
    }

    pub fn with_downforce(mut self, downforce: f64) -> SuspensionInput {
        self.downforce = downforce;
        self
    }

    pub fn with_stiffness_multiplier(mut self, multiplier: f64) -> SuspensionInput {
        self.stiffness_multiplier = multiplier;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::vehicle::{CarCategory, Drivetrain, TrackType, TyreCompound, VehicleParameters};

    #[test]
    fn drivetrain_parsing() {
        assert_eq!(Drivetrain::from_str("FR").unwrap(), Drivetrain::FR);
        assert_eq!(Drivetrain::from_str("ff").unwrap(), Drivetrain::FF);
        assert_eq!(Drivetrain::from_str("4WD").unwrap(), Drivetrain::AWD);
        assert_eq!(Drivetrain::from_str("AWD").unwrap(), Drivetrain::AWD);
        assert!(Drivetrain::from_str("RWD").is_err());
        assert_eq!(Drivetrain::AWD.to_string(), "4WD");
    }

    #[test]
    fn unsprung_mass_by_drivetrain() {
        assert_eq!(Drivetrain::FF.unsprung_mass_kg(), 55.0);
        assert_eq!(Drivetrain::AWD.unsprung_mass_kg(), 55.0);
        assert_eq!(Drivetrain::FR.unsprung_mass_kg(), 45.0);
        assert_eq!(Drivetrain::MR.unsprung_mass_kg(), 45.0);
        assert_eq!(Drivetrain::RR.unsprung_mass_kg(), 45.0);
    }

    #[test]
    fn car_category_parsing_keeps_unknown_names() {
        assert_eq!(CarCategory::from("road"), CarCategory::Road);
        assert_eq!(CarCategory::from("GR3"), CarCategory::Gr3);
        assert_eq!(CarCategory::from("UNKNOWN"), CarCategory::Other("UNKNOWN".to_string()));
        assert_eq!(CarCategory::from("UNKNOWN").to_string(), "UNKNOWN");
    }

    #[test]
    fn tyre_compound_parsing() {
        assert_eq!(TyreCompound::from_str("rs").unwrap(), TyreCompound::RacingSoft);
        assert_eq!(TyreCompound::default(), TyreCompound::RacingMedium);
        assert!(TyreCompound::from_str("XX").is_err());
        assert_eq!(TyreCompound::ComfortMedium.spring_multiplier(), 0.97);
        assert_eq!(TyreCompound::RacingSoft.damper_multiplier(), 1.015);
        assert_eq!(TyreCompound::RacingHeavyWet.toe_multiplier(), 0.998);
    }

    #[test]
    fn track_type_parsing() {
        assert_eq!(TrackType::from_str("Fast").unwrap(), TrackType::Fast);
        assert_eq!(TrackType::from_str("technical").unwrap(), TrackType::Technical);
        assert!(TrackType::from_str("oval").is_err());
    }

    #[test]
    fn axle_masses_follow_distribution() {
        let vehicle = VehicleParameters::new(1200.0, 55.0, Drivetrain::FR);
        let masses = vehicle.axle_masses();
        assert!((masses.front - 660.0).abs() < 1e-9);
        assert!((masses.rear - 540.0).abs() < 1e-9);
        assert_eq!(vehicle.rear_weight_distribution(), 45.0);
    }
}
