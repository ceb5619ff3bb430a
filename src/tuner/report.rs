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
use serde::Serialize;
use tracing::{info, warn};
use tuning::suspension::{alignment_settings, axle_spring_frequencies, axle_spring_rates, damper_settings,
                         roll_bar_stiffness, AlignmentInput, AlignmentSettings, DamperSetting};
use tuning::transmission::{estimate_acceleration, gear_speeds, optimal_gearing, optimize_final_drive,
                           torque_curve, GearLabel, GearSet, GearSpeed, Gearing, TorquePoint};
use tuning::tyres::{estimate_tyre_diameter, recommended_tyre_sizes, TyreDiameterWarning};
use tuning::{AxlePair, CarCategory, Drivetrain, TyreCompound};
use utils::units::{inches_to_mm, n_per_mm_to_lb_per_in};
use crate::settings::{GlobalSettings, OutputFormat, UnitSystem};
use crate::tuner::request::{TransmissionSection, TuneRequest};
use crate::tuner::TuneError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TyreDiameterSource {
    Given,
    Estimated,
    Fallback,
    ClassRecommendation
}

impl Display for TyreDiameterSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TyreDiameterSource::Given => write!(f, "given"),
            TyreDiameterSource::Estimated => write!(f, "estimated from observed speed"),
            TyreDiameterSource::Fallback => write!(f, "default after a rejected estimate"),
            TyreDiameterSource::ClassRecommendation => write!(f, "recommended for the car category")
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TyreDiameterUsed {
    pub diameter_in: f64,
    pub source: TyreDiameterSource,
    pub warning: Option<TyreDiameterWarning>
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransmissionReport {
    pub gears: GearSet,
    pub final_drive: f64,
    pub redline_rpm: f64,
    pub gear_speeds: Vec<GearSpeed>,
    pub zero_to_sixty_mph_s: Option<f64>,
    pub ideal_final_drive: Option<f64>,
    pub tyre_diameter: TyreDiameterUsed
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TuneReport {
    pub category: CarCategory,
    pub drivetrain: Drivetrain,
    pub tyres: AxlePair<TyreCompound>,
    pub springs: AxlePair<f64>,
    pub frequencies: AxlePair<f64>,
    pub dampers: AxlePair<DamperSetting>,
    pub roll_bars: Option<AxlePair<f64>>,
    pub alignment: Option<AlignmentSettings>,
    pub recommended_tyre_diameter_in: AxlePair<f64>,
    pub transmission: Option<TransmissionReport>,
    pub optimal_gearing: Option<Gearing>,
    pub torque_curve: Option<Vec<TorquePoint>>
}

fn resolve_tyre_diameter(transmission: &TransmissionSection,
                         gears: &GearSet,
                         drivetrain: Drivetrain,
                         recommended: &AxlePair<f64>) -> Result<TyreDiameterUsed, TuneError>
{
    if let Some(diameter_in) = transmission.tyre_diameter_in {
        return Ok(TyreDiameterUsed { diameter_in, source: TyreDiameterSource::Given, warning: None });
    }
    if let Some(observed) = &transmission.observed {
        let label = GearLabel::new(observed.gear.saturating_sub(1));
        let ratio = gears.ratio(label).ok_or_else(|| {
            TuneError::ValidationError(format!("no ratio for observed gear {}", observed.gear))
        })?;
        let estimate = estimate_tyre_diameter(ratio, observed.rpm, observed.speed_kph, transmission.final_drive);
        let source = match estimate.is_fallback() {
            true => TyreDiameterSource::Fallback,
            false => TyreDiameterSource::Estimated
        };
        return Ok(TyreDiameterUsed { diameter_in: estimate.diameter_in, source, warning: estimate.warning });
    }
    let diameter_in = match drivetrain {
        Drivetrain::FF => recommended.front,
        _ => recommended.rear
    };
    Ok(TyreDiameterUsed { diameter_in, source: TyreDiameterSource::ClassRecommendation, warning: None })
}

fn transmission_report(request: &TuneRequest,
                       transmission: &TransmissionSection,
                       recommended: &AxlePair<f64>) -> Result<TransmissionReport, TuneError>
{
    let gears = transmission.gear_set()?;
    let tyre_diameter = resolve_tyre_diameter(transmission, &gears, request.vehicle.drivetrain, recommended)?;
    let speeds = gear_speeds(&gears, transmission.final_drive, transmission.redline_rpm, tyre_diameter.diameter_in);
    let zero_to_sixty_mph_s = request.vehicle.power_hp.map(|power_hp| {
        estimate_acceleration(power_hp,
                              request.vehicle.weight_kg,
                              &gears,
                              transmission.final_drive,
                              tyre_diameter.diameter_in)
    });
    let ideal_final_drive = match (transmission.target_top_speed_mph, gears.last_ratio()) {
        (Some(target_mph), Some(last_ratio)) => {
            Some(optimize_final_drive(target_mph, transmission.redline_rpm, last_ratio, tyre_diameter.diameter_in))
        }
        _ => None
    };
    Ok(TransmissionReport {
        gears,
        final_drive: transmission.final_drive,
        redline_rpm: transmission.redline_rpm,
        gear_speeds: speeds,
        zero_to_sixty_mph_s,
        ideal_final_drive,
        tyre_diameter
    })
}

pub fn build_report(request: &TuneRequest, settings: &GlobalSettings) -> Result<TuneReport, TuneError> {
    info!("Building tune for {} {} at {}kg", request.vehicle.category, request.vehicle.drivetrain, request.vehicle.weight_kg);
    let vehicle = request.vehicle_parameters();
    let tyres = request.tyres(settings.default_tyre_compound());

    let springs = axle_spring_rates(&vehicle, &request.suspension_inputs(), &tyres);
    let frequencies = axle_spring_frequencies(&springs,
                                              &vehicle,
                                              &request.vehicle.category,
                                              request.suspension.frequency_offset);
    let (entry, exit) = request.handling.as_ref()
        .map(|handling| (handling.corner_entry, handling.corner_exit))
        .unwrap_or((0, 0));
    let dampers = damper_settings(&springs, &vehicle, entry, exit, &tyres);

    let roll_bars = request.handling.as_ref().map(|handling| {
        roll_bar_stiffness(&handling.rotational_g,
                           handling.low_speed_stability,
                           handling.high_speed_stability,
                           handling.arb_multiplier,
                           handling.oversteer_understeer)
    });
    let alignment = request.handling.as_ref().map(|handling| {
        alignment_settings(&AlignmentInput {
            rotational_g_75mph: handling.rotational_g.at_75_mph,
            drivetrain: vehicle.drivetrain,
            tyre_wear_multiplier: handling.tyre_wear_multiplier,
            track_type: handling.track_type,
            front_weight_distribution: vehicle.front_weight_distribution,
            low_speed_stability: handling.low_speed_stability,
            high_speed_stability: handling.high_speed_stability,
            tyres
        })
    });

    let recommended = recommended_tyre_sizes(&request.vehicle.category, request.model_year());
    let transmission = match &request.transmission {
        Some(section) => Some(transmission_report(request, section, &recommended)?),
        None => None
    };
    if let Some(TransmissionReport { tyre_diameter: TyreDiameterUsed { warning: Some(w), .. }, .. }) = &transmission {
        warn!("Gear speeds use a fallback tyre diameter. {}", w);
    }
    let optimal_gearing = match request.transmission.as_ref().and_then(|t| t.targets.as_ref()) {
        Some(targets) => Some(optimal_gearing(targets)?),
        None => None
    };
    let torque_curve = match &request.engine {
        Some(params) => Some(torque_curve(params)?),
        None => None
    };

    Ok(TuneReport {
        category: request.vehicle.category.clone(),
        drivetrain: vehicle.drivetrain,
        tyres,
        springs,
        frequencies,
        dampers,
        roll_bars,
        alignment,
        recommended_tyre_diameter_in: recommended,
        transmission,
        optimal_gearing,
        torque_curve
    })
}

/// Human readable rendering of a [`TuneReport`]
pub struct TextReport<'a> {
    report: &'a TuneReport,
    units: UnitSystem
}

impl<'a> TextReport<'a> {
    pub fn new(report: &'a TuneReport, units: UnitSystem) -> TextReport<'a> {
        TextReport { report, units }
    }

    fn spring_rate(&self, rate: f64) -> String {
        match self.units {
            UnitSystem::Metric => format!("{:.1} N/mm", rate),
            UnitSystem::Imperial => format!("{:.1} lb/in", n_per_mm_to_lb_per_in(rate))
        }
    }

    fn diameter(&self, diameter_in: f64) -> String {
        match self.units {
            UnitSystem::Metric => format!("{:.0} mm", inches_to_mm(diameter_in)),
            UnitSystem::Imperial => format!("{:.1} in", diameter_in)
        }
    }

    fn speed(&self, speed: &GearSpeed) -> String {
        match self.units {
            UnitSystem::Metric => format!("{:.1} km/h", speed.speed.kph),
            UnitSystem::Imperial => format!("{:.1} mph", speed.speed.mph)
        }
    }
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let report = self.report;
        writeln!(f, "{} {} on {}/{} tyres", report.category, report.drivetrain, report.tyres.front, report.tyres.rear)?;
        writeln!(f)?;
        writeln!(f, "Springs       F: {:<14} R: {}", self.spring_rate(report.springs.front), self.spring_rate(report.springs.rear))?;
        writeln!(f, "Frequency     F: {:<14} R: {:.2} Hz", format!("{:.2} Hz", report.frequencies.front), report.frequencies.rear)?;
        writeln!(f, "Compression   F: {:<14} R: {}%", format!("{}%", report.dampers.front.compression), report.dampers.rear.compression)?;
        writeln!(f, "Extension     F: {:<14} R: {}%", format!("{}%", report.dampers.front.extension), report.dampers.rear.extension)?;
        if let Some(roll_bars) = &report.roll_bars {
            writeln!(f, "Anti-roll bar F: {:<14.1} R: {:.1}", roll_bars.front, roll_bars.rear)?;
        }
        if let Some(alignment) = &report.alignment {
            writeln!(f, "Camber        F: {:<14} R: {:.1}°", format!("{:.1}°", alignment.camber.front), alignment.camber.rear)?;
            writeln!(f, "Toe           F: {:<14} R: {:.2}°", format!("{:.2}°", alignment.toe.front), alignment.toe.rear)?;
        }
        writeln!(f, "Tyre size     F: {:<14} R: {}",
                 self.diameter(report.recommended_tyre_diameter_in.front),
                 self.diameter(report.recommended_tyre_diameter_in.rear))?;

        if let Some(transmission) = &report.transmission {
            writeln!(f)?;
            writeln!(f, "Transmission (final drive {}, {} rpm, tyre {} {})",
                     transmission.final_drive,
                     transmission.redline_rpm,
                     self.diameter(transmission.tyre_diameter.diameter_in),
                     transmission.tyre_diameter.source)?;
            if let Some(warning) = &transmission.tyre_diameter.warning {
                writeln!(f, "  Warning: {}", warning)?;
            }
            for speed in &transmission.gear_speeds {
                writeln!(f, "  {:<5} {:>6.3}  {}", speed.gear, speed.ratio, self.speed(speed))?;
            }
            if let Some(seconds) = transmission.zero_to_sixty_mph_s {
                writeln!(f, "  0-60 mph: {:.1} s", seconds)?;
            }
            if let Some(final_drive) = transmission.ideal_final_drive {
                writeln!(f, "  Ideal final drive: {:.2}", final_drive)?;
            }
        }

        if let Some(gearing) = &report.optimal_gearing {
            writeln!(f)?;
            writeln!(f, "Suggested gearing (final drive {:.3})", gearing.final_drive)?;
            for gear in gearing.gears.iter() {
                writeln!(f, "  {:<5} {:>6.3}", gear.label, gear.ratio)?;
            }
        }

        if let Some(curve) = &report.torque_curve {
            writeln!(f)?;
            writeln!(f, "Torque curve")?;
            for point in curve {
                writeln!(f, "  {:>6.0} rpm  {:>5.1} kgf·m", point.rpm, point.torque_kgfm)?;
            }
        }
        Ok(())
    }
}

pub fn render(report: &TuneReport, format: OutputFormat, units: UnitSystem) -> Result<String, TuneError> {
    match format {
        OutputFormat::Text => Ok(TextReport::new(report, units).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use tuning::suspension::axle_spring_rates;
    use tuning::transmission::GearSet;
    use crate::settings::{GlobalSettings, OutputFormat, UnitSystem};
    use crate::tuner::report::{build_report, render, TyreDiameterSource};
    use crate::tuner::request::TuneRequest;

    const BASE: &str = r#"
[vehicle]
weight_kg = 1250
front_weight_distribution = 55
drivetrain = "FR"
category = "Gr3"
power_hp = 480

[suspension]
front_tyres = "RH"

[suspension.front]
ride_height_mm = 100
lever_ratio = 1.0

[suspension.rear]
ride_height_mm = 105
lever_ratio = 1.0
downforce = 200
"#;

    const HANDLING: &str = r#"
[handling]
low_speed_stability = 0.2
high_speed_stability = 0.3
track_type = "Technical"

[handling.rotational_g]
at_40_mph = 1.0
at_75_mph = 1.1
at_150_mph = 1.2
"#;

    const TRANSMISSION: &str = r#"
[transmission]
gear_ratios = [3.372, 2.578, 1.971, 1.508, 1.153, 0.881]
final_drive = 3.9
redline_rpm = 8000
target_top_speed_mph = 180
"#;

    fn report_for(extra: &str) -> crate::tuner::report::TuneReport {
        let request = TuneRequest::from_toml_str(&format!("{}\n{}", BASE, extra)).unwrap();
        build_report(&request, &GlobalSettings::default()).unwrap()
    }

    #[test]
    fn suspension_only() {
        let request = TuneRequest::from_toml_str(BASE).unwrap();
        let report = build_report(&request, &GlobalSettings::default()).unwrap();
        let expected = axle_spring_rates(&request.vehicle_parameters(),
                                         &request.suspension_inputs(),
                                         &request.tyres(tuning::TyreCompound::RacingMedium));
        assert_eq!(report.springs, expected);
        assert_eq!(report.tyres.front, tuning::TyreCompound::RacingHard);
        assert_eq!(report.tyres.rear, tuning::TyreCompound::RacingMedium);
        assert_eq!(report.recommended_tyre_diameter_in.front, 27.0);
        assert!(report.roll_bars.is_none());
        assert!(report.alignment.is_none());
        assert!(report.transmission.is_none());
    }

    #[test]
    fn lopsided_distribution_stays_finite() {
        let data = BASE.replace("front_weight_distribution = 55", "front_weight_distribution = 99")
            .replace("drivetrain = \"FR\"", "drivetrain = \"FF\"");
        let request = TuneRequest::from_toml_str(&data).unwrap();
        let report = build_report(&request, &GlobalSettings::default()).unwrap();
        assert!(report.frequencies.front.is_finite());
        assert!(report.frequencies.rear.is_finite());
        let json = render(&report, OutputFormat::Json, UnitSystem::Metric).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["frequencies"]["rear"].is_number());
    }

    #[test]
    fn handling_adds_roll_bars_and_alignment() {
        let report = report_for(HANDLING);
        assert!(report.roll_bars.is_some());
        assert!(report.alignment.is_some());
    }

    #[test]
    fn transmission_uses_class_tyre_size() {
        let report = report_for(TRANSMISSION);
        let transmission = report.transmission.unwrap();
        assert_eq!(transmission.tyre_diameter.source, TyreDiameterSource::ClassRecommendation);
        assert_eq!(transmission.tyre_diameter.diameter_in, 27.0);
        assert_eq!(transmission.gear_speeds.len(), 6);
        assert!(transmission.zero_to_sixty_mph_s.is_some());
        assert!(transmission.ideal_final_drive.is_some());
        let speeds: Vec<f64> = transmission.gear_speeds.iter().map(|s| s.speed.kph).collect();
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn implausible_observation_falls_back() {
        let report = report_for(&format!("{}\n[transmission.observed]\ngear = 1\nrpm = 6000\nspeed_kph = 5", TRANSMISSION));
        let tyre = report.transmission.unwrap().tyre_diameter;
        assert_eq!(tyre.source, TyreDiameterSource::Fallback);
        assert_eq!(tyre.diameter_in, 26.0);
        assert!(tyre.warning.is_some());
    }

    #[test]
    fn targets_and_engine_sections() {
        let report = report_for(&format!("{}{}", TRANSMISSION, r#"
[transmission.targets]
gear_count = 6
top_speed_mph = 180
min_corner_speed_mph = 40
max_rpm = 8000
min_rpm = 1000
tyre_diameter_in = 26
power_hp = 400
max_power_rpm = 7000

[engine]
min_rpm = 1000
max_rpm = 8000
max_power_rpm = 7000
peak_torque_kgfm = 45
"#));
        let gearing = report.optimal_gearing.unwrap();
        assert_eq!(gearing.final_drive, 3.9);
        assert_eq!(gearing.gears, GearSet::from_ratios(&[3.372, 2.578, 1.971, 1.508, 1.153, 0.881]));
        assert_eq!(report.torque_curve.unwrap().len(), 20);
    }

    #[test]
    fn text_output_follows_units() {
        let report = report_for(TRANSMISSION);
        let metric = render(&report, OutputFormat::Text, UnitSystem::Metric).unwrap();
        assert!(metric.contains("N/mm"));
        assert!(metric.contains("km/h"));
        assert!(metric.contains("1st"));
        let imperial = render(&report, OutputFormat::Text, UnitSystem::Imperial).unwrap();
        assert!(imperial.contains("lb/in"));
        assert!(imperial.contains("mph"));
    }

    #[test]
    fn json_output() {
        let report = report_for(&format!("{}{}", HANDLING, TRANSMISSION));
        let json = render(&report, OutputFormat::Json, UnitSystem::Metric).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "GR3");
        assert_eq!(value["drivetrain"], "FR");
        assert_eq!(value["transmission"]["gear_speeds"][0]["gear"], "1st");
        assert_eq!(value["transmission"]["tyre_diameter"]["source"], "class_recommendation");
        assert!(value["springs"]["front"].is_number());
    }
}
