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

use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use tuning::suspension::RotationalG;
use tuning::transmission::{generate_gear_ratios, GearSet, GearingTargets, TorqueCurveParams};
use tuning::{AxlePair, CarCategory, Drivetrain, SuspensionInput, TrackType, TyreCompound, VehicleParameters};
use crate::tuner::TuneError;

/// Used for the tyre size recommendation when no model year is given
pub const DEFAULT_MODEL_YEAR: i32 = 2000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleSection {
    pub weight_kg: f64,
    pub front_weight_distribution: f64,
    pub drivetrain: Drivetrain,
    #[serde(default = "default_category")]
    pub category: CarCategory,
    #[serde(default)]
    pub model_year: Option<i32>,
    #[serde(default)]
    pub power_hp: Option<f64>
}

fn default_category() -> CarCategory {
    CarCategory::Other(String::from("Other"))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuspensionSection {
    pub front: SuspensionInput,
    pub rear: SuspensionInput,
    #[serde(default)]
    pub front_tyres: Option<TyreCompound>,
    #[serde(default)]
    pub rear_tyres: Option<TyreCompound>,
    #[serde(default)]
    pub frequency_offset: i32
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandlingSection {
    pub rotational_g: RotationalG,
    pub low_speed_stability: f64,
    pub high_speed_stability: f64,
    #[serde(default = "unit_multiplier")]
    pub arb_multiplier: f64,
    #[serde(default)]
    pub oversteer_understeer: i32,
    #[serde(default)]
    pub corner_entry: i32,
    #[serde(default)]
    pub corner_exit: i32,
    #[serde(default = "default_tyre_wear")]
    pub tyre_wear_multiplier: u32,
    #[serde(default = "default_track_type")]
    pub track_type: TrackType
}

fn unit_multiplier() -> f64 {
    1.0
}

fn default_tyre_wear() -> u32 {
    1
}

fn default_track_type() -> TrackType {
    TrackType::Fast
}

/// Speed read off the in-game telemetry, used to work out the tyre size
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObservedSpeed {
    /// 1-based gear number
    pub gear: usize,
    pub rpm: f64,
    pub speed_kph: f64
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransmissionSection {
    #[serde(default)]
    pub gear_ratios: Vec<f64>,
    #[serde(default)]
    pub gear_count: Option<usize>,
    #[serde(default)]
    pub first_gear: Option<f64>,
    #[serde(default)]
    pub last_gear: Option<f64>,
    pub final_drive: f64,
    pub redline_rpm: f64,
    #[serde(default)]
    pub target_top_speed_mph: Option<f64>,
    #[serde(default)]
    pub tyre_diameter_in: Option<f64>,
    #[serde(default)]
    pub observed: Option<ObservedSpeed>,
    #[serde(default)]
    pub targets: Option<GearingTargets>
}

impl TransmissionSection {
    /// Explicit ratios win over a generated spread
    pub fn gear_set(&self) -> Result<GearSet, TuneError> {
        if !self.gear_ratios.is_empty() {
            return Ok(GearSet::from_ratios(&self.gear_ratios));
        }
        match (self.gear_count, self.first_gear, self.last_gear) {
            (Some(count), Some(first), Some(last)) => Ok(generate_gear_ratios(count, first, last)?),
            _ => Err(TuneError::ValidationError(
                String::from("transmission needs either gear_ratios or gear_count, first_gear and last_gear")
            ))
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TuneRequest {
    pub vehicle: VehicleSection,
    pub suspension: SuspensionSection,
    #[serde(default)]
    pub handling: Option<HandlingSection>,
    #[serde(default)]
    pub transmission: Option<TransmissionSection>,
    #[serde(default)]
    pub engine: Option<TorqueCurveParams>
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<(), TuneError> {
    match condition {
        true => Ok(()),
        false => Err(TuneError::ValidationError(message()))
    }
}

fn check_finite(value: f64, name: &str) -> Result<(), TuneError> {
    check(value.is_finite(), || format!("{} must be a finite number. Got {}", name, value))
}

fn check_positive(value: f64, name: &str) -> Result<(), TuneError> {
    check_finite(value, name)?;
    check(value > 0.0, || format!("{} must be greater than 0. Got {}", name, value))
}

impl TuneRequest {
    pub fn from_toml_str(data: &str) -> Result<TuneRequest, TuneError> {
        let request: TuneRequest = toml::from_str(data)?;
        request.validate()?;
        Ok(request)
    }

    pub fn load(path: &Path) -> Result<TuneRequest, TuneError> {
        info!("Loading tuning request from {}", path.display());
        TuneRequest::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), TuneError> {
        check_positive(self.vehicle.weight_kg, "weight_kg")?;
        // Both axles must carry some of the weight
        let distribution = self.vehicle.front_weight_distribution;
        check(distribution > 0.0 && distribution < 100.0,
              || format!("front_weight_distribution must be between 0 and 100 exclusive. Got {}", distribution))?;
        if let Some(power) = self.vehicle.power_hp {
            check_positive(power, "power_hp")?;
        }
        for (axle, input) in [("front", &self.suspension.front), ("rear", &self.suspension.rear)] {
            check_positive(input.ride_height_mm, &format!("{} ride_height_mm", axle))?;
            check_positive(input.lever_ratio, &format!("{} lever_ratio", axle))?;
            check_positive(input.stiffness_multiplier, &format!("{} stiffness_multiplier", axle))?;
            check_finite(input.downforce, &format!("{} downforce", axle))?;
            check(input.downforce >= 0.0,
                  || format!("{} downforce must not be negative. Got {}", axle, input.downforce))?;
        }
        if let Some(handling) = &self.handling {
            let g = &handling.rotational_g;
            for (value, name) in [(g.at_40_mph, "rotational_g.at_40_mph"),
                                  (g.at_75_mph, "rotational_g.at_75_mph"),
                                  (g.at_150_mph, "rotational_g.at_150_mph"),
                                  (handling.low_speed_stability, "low_speed_stability"),
                                  (handling.high_speed_stability, "high_speed_stability"),
                                  (handling.arb_multiplier, "arb_multiplier")] {
                check_finite(value, name)?;
            }
            check(handling.high_speed_stability != 0.0,
                  || String::from("high_speed_stability must not be 0"))?;
        }
        if let Some(transmission) = &self.transmission {
            self.validate_transmission(transmission)?;
        }
        if let Some(engine) = &self.engine {
            check_positive(engine.peak_torque_kgfm, "engine peak_torque_kgfm")?;
            check_finite(engine.min_rpm, "engine min_rpm")?;
            check_finite(engine.max_rpm, "engine max_rpm")?;
            check_finite(engine.max_power_rpm, "engine max_power_rpm")?;
        }
        Ok(())
    }

    fn validate_transmission(&self, transmission: &TransmissionSection) -> Result<(), TuneError> {
        if let Some(count) = transmission.gear_count {
            check(count >= 2, || format!("gear_count must be at least 2. Got {}", count))?;
        }
        for ratio in transmission.gear_ratios.iter()
            .chain(transmission.first_gear.iter())
            .chain(transmission.last_gear.iter()) {
            check_positive(*ratio, "gear ratio")?;
        }
        let gears = transmission.gear_set()?;
        check_positive(transmission.final_drive, "final_drive")?;
        check_positive(transmission.redline_rpm, "redline_rpm")?;
        if let Some(speed) = transmission.target_top_speed_mph {
            check_positive(speed, "target_top_speed_mph")?;
        }
        if let Some(diameter) = transmission.tyre_diameter_in {
            check_positive(diameter, "tyre_diameter_in")?;
        }
        if let Some(observed) = &transmission.observed {
            let gear_count = gears.len();
            check((1..=gear_count).contains(&observed.gear),
                  || format!("observed gear {} is not one of the {} gears", observed.gear, gear_count))?;
            check_positive(observed.rpm, "observed rpm")?;
            check_positive(observed.speed_kph, "observed speed_kph")?;
        }
        if let Some(targets) = &transmission.targets {
            check(targets.gear_count >= 2, || format!("targets.gear_count must be at least 2. Got {}", targets.gear_count))?;
            check_positive(targets.top_speed_mph, "targets.top_speed_mph")?;
            check_positive(targets.min_corner_speed_mph, "targets.min_corner_speed_mph")?;
            check_positive(targets.tyre_diameter_in, "targets.tyre_diameter_in")?;
            check(targets.min_rpm < targets.max_power_rpm && targets.max_power_rpm <= targets.max_rpm,
                  || String::from("targets rpm must satisfy min_rpm < max_power_rpm <= max_rpm"))?;
        }
        Ok(())
    }

    pub fn vehicle_parameters(&self) -> VehicleParameters {
        VehicleParameters::new(self.vehicle.weight_kg,
                               self.vehicle.front_weight_distribution,
                               self.vehicle.drivetrain)
    }

    pub fn suspension_inputs(&self) -> AxlePair<SuspensionInput> {
        AxlePair::new(self.suspension.front.clone(), self.suspension.rear.clone())
    }

    pub fn tyres(&self, default_compound: TyreCompound) -> AxlePair<TyreCompound> {
        AxlePair::new(self.suspension.front_tyres.unwrap_or(default_compound),
                      self.suspension.rear_tyres.unwrap_or(default_compound))
    }

    pub fn model_year(&self) -> i32 {
        self.vehicle.model_year.unwrap_or(DEFAULT_MODEL_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use tuning::{CarCategory, Drivetrain, TyreCompound};
    use crate::tuner::request::TuneRequest;
    use crate::tuner::TuneError;

    const MINIMAL: &str = r#"
[vehicle]
weight_kg = 1250
front_weight_distribution = 55
drivetrain = "FR"

[suspension.front]
ride_height_mm = 100
lever_ratio = 1.0

[suspension.rear]
ride_height_mm = 105
lever_ratio = 1.0
"#;

    fn with_extra(extra: &str) -> String {
        format!("{}\n{}", MINIMAL, extra)
    }

    #[test]
    fn minimal_request_parses() {
        let request = TuneRequest::from_toml_str(MINIMAL).unwrap();
        assert_eq!(request.vehicle.drivetrain, Drivetrain::FR);
        assert_eq!(request.vehicle.category, CarCategory::Other(String::from("Other")));
        assert_eq!(request.suspension.front.stiffness_multiplier, 1.0);
        assert_eq!(request.suspension.rear.downforce, 0.0);
        assert_eq!(request.model_year(), 2000);
        assert!(request.handling.is_none());
        assert!(request.transmission.is_none());
        let tyres = request.tyres(TyreCompound::SportSoft);
        assert_eq!(tyres.front, TyreCompound::SportSoft);
    }

    #[test]
    fn handling_defaults() {
        let request = TuneRequest::from_toml_str(&with_extra(r#"
[handling]
low_speed_stability = 0.2
high_speed_stability = 0.3

[handling.rotational_g]
at_40_mph = 1.0
at_75_mph = 1.1
at_150_mph = 1.2
"#)).unwrap();
        let handling = request.handling.unwrap();
        assert_eq!(handling.arb_multiplier, 1.0);
        assert_eq!(handling.tyre_wear_multiplier, 1);
        assert_eq!(handling.corner_entry, 0);
    }

    #[test]
    fn generated_gear_set() {
        let request = TuneRequest::from_toml_str(&with_extra(r#"
[transmission]
gear_count = 6
first_gear = 3.5
last_gear = 0.8
final_drive = 3.9
redline_rpm = 8000
"#)).unwrap();
        let gears = request.transmission.unwrap().gear_set().unwrap();
        assert_eq!(gears.len(), 6);
        assert_eq!(gears.first_ratio(), Some(3.5));
        assert_eq!(gears.last_ratio(), Some(0.8));
    }

    fn assert_invalid(data: &str) {
        match TuneRequest::from_toml_str(data) {
            Err(TuneError::ValidationError(_)) => {}
            other => panic!("expected a validation error, got {:?}", other)
        }
    }

    #[test]
    fn rejects_bad_vehicle() {
        assert_invalid(&MINIMAL.replace("weight_kg = 1250", "weight_kg = 0"));
        assert_invalid(&MINIMAL.replace("front_weight_distribution = 55", "front_weight_distribution = 101"));
        assert_invalid(&MINIMAL.replace("front_weight_distribution = 55", "front_weight_distribution = 0"));
        assert_invalid(&MINIMAL.replace("front_weight_distribution = 55", "front_weight_distribution = 100"));
        assert_invalid(&MINIMAL.replace("weight_kg = 1250", "weight_kg = inf"));
        assert_invalid(&MINIMAL.replace("weight_kg = 1250", "weight_kg = nan"));
        assert_invalid(&MINIMAL.replace("ride_height_mm = 100", "ride_height_mm = 100\ndownforce = -50"));
        assert_invalid(&MINIMAL.replace("lever_ratio = 1.0", "lever_ratio = 0.0"));
        assert_invalid(&MINIMAL.replace("ride_height_mm = 105", "ride_height_mm = -5"));
    }

    #[test]
    fn rejects_bad_transmission() {
        assert_invalid(&with_extra("[transmission]\ngear_count = 1\nfirst_gear = 3.5\nlast_gear = 0.8\nfinal_drive = 3.9\nredline_rpm = 8000"));
        assert_invalid(&with_extra("[transmission]\ngear_ratios = [3.5, 0.0]\nfinal_drive = 3.9\nredline_rpm = 8000"));
        assert_invalid(&with_extra("[transmission]\ngear_ratios = [3.5, 2.0]\nfinal_drive = 3.9\nredline_rpm = 8000\n[transmission.observed]\ngear = 3\nrpm = 6000\nspeed_kph = 100"));
        assert_invalid(&with_extra("[transmission]\nfinal_drive = 3.9\nredline_rpm = 8000"));
    }

    #[test]
    fn rejects_zero_high_speed_stability() {
        assert_invalid(&with_extra("[handling]\nlow_speed_stability = 0.2\nhigh_speed_stability = 0\n[handling.rotational_g]\nat_40_mph = 1.0\nat_75_mph = 1.1\nat_150_mph = 1.2"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(TuneRequest::from_toml_str("[vehicle"), Err(TuneError::RequestParseError(_))));
    }
}
