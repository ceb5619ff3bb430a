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

pub mod request;
pub mod report;

use std::io;

pub use request::TuneRequest;
pub use report::{build_report, render};

#[derive(thiserror::Error, Debug)]
pub enum TuneError {
    #[error("io error")]
    IoError(#[from] io::Error),
    #[error("failed to parse tuning request. `{0}`")]
    RequestParseError(#[from] toml::de::Error),
    #[error("json encoding error")]
    JsonError(#[from] serde_json::Error),
    #[error("settings error")]
    SettingsError(#[from] config::ConfigError),
    #[error("calculation error: `{0}`")]
    CalculationError(#[from] tuning::Error),
    #[error("Request validation failure. `{0}`")]
    ValidationError(String)
}
