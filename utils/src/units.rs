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

pub const MM_PER_INCH: f64 = 25.4;
pub const METERS_PER_INCH: f64 = 0.0254;
pub const INCHES_PER_METER: f64 = 39.37;
pub const KPH_PER_MPH: f64 = 1.60934;
pub const MPH_PER_KPH: f64 = 0.621371;
pub const KPH_PER_MPS: f64 = 3.6;
pub const METERS_PER_SECOND_PER_MPH: f64 = 0.44704;
pub const LB_PER_KG: f64 = 2.20462;
pub const KG_PER_LB: f64 = 0.453592;
pub const NEWTONS_PER_LBF: f64 = 4.44822;
pub const LBF_PER_NEWTON: f64 = 0.224809;
pub const N_PER_MM_PER_LB_PER_IN: f64 = 0.175127;
pub const LB_PER_IN_PER_N_PER_MM: f64 = 5.71014;

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn inches_to_meters(inches: f64) -> f64 {
    inches * METERS_PER_INCH
}

pub fn kph_to_mph(kph: f64) -> f64 {
    kph * MPH_PER_KPH
}

pub fn mph_to_kph(mph: f64) -> f64 {
    mph * KPH_PER_MPH
}

pub fn mps_to_kph(mps: f64) -> f64 {
    mps * KPH_PER_MPS
}

pub fn kph_to_mps(kph: f64) -> f64 {
    kph / KPH_PER_MPS
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

pub fn newtons_to_lbf(newtons: f64) -> f64 {
    newtons * LBF_PER_NEWTON
}

pub fn lbf_to_newtons(lbf: f64) -> f64 {
    lbf * NEWTONS_PER_LBF
}

/// Spring rate in N/mm to lb/in
pub fn n_per_mm_to_lb_per_in(rate: f64) -> f64 {
    rate * LB_PER_IN_PER_N_PER_MM
}

/// Spring rate in lb/in to N/mm
pub fn lb_per_in_to_n_per_mm(rate: f64) -> f64 {
    rate * N_PER_MM_PER_LB_PER_IN
}

#[cfg(test)]
mod tests {
    use crate::numeric::approx_eq;
    use crate::units::*;

    #[test]
    fn length_conversions() {
        assert!(approx_eq(mm_to_inches(254.0), 10.0, 1e-9));
        assert!(approx_eq(inches_to_mm(26.0), 660.4, 1e-9));
        assert!(approx_eq(inches_to_meters(26.0), 0.6604, 1e-9));
    }

    #[test]
    fn speed_conversions() {
        assert!(approx_eq(mph_to_kph(60.0), 96.5604, 1e-9));
        assert!(approx_eq(kph_to_mph(100.0), 62.1371, 1e-9));
        assert!(approx_eq(mps_to_kph(10.0), 36.0, 1e-9));
        assert!(approx_eq(kph_to_mps(36.0), 10.0, 1e-9));
        // the two factors are each other's inverse to 5 significant figures
        assert!(approx_eq(kph_to_mph(mph_to_kph(100.0)), 100.0, 1e-3));
    }

    #[test]
    fn mass_and_force_conversions() {
        assert!(approx_eq(kg_to_lb(1000.0), 2204.62, 1e-9));
        assert!(approx_eq(lb_to_kg(1000.0), 453.592, 1e-9));
        assert!(approx_eq(newtons_to_lbf(100.0), 22.4809, 1e-9));
        assert!(approx_eq(lbf_to_newtons(100.0), 444.822, 1e-9));
    }

    #[test]
    fn spring_rate_conversions() {
        assert!(approx_eq(n_per_mm_to_lb_per_in(10.0), 57.1014, 1e-9));
        assert!(approx_eq(lb_per_in_to_n_per_mm(100.0), 17.5127, 1e-9));
        assert!(approx_eq(lb_per_in_to_n_per_mm(n_per_mm_to_lb_per_in(25.0)), 25.0, 1e-3));
    }
}
