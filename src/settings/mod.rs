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
use std::fs;
use std::path::PathBuf;
use config::{Config, ConfigError};
use config::builder::{ConfigBuilder, DefaultState};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tuning::TyreCompound;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Imperial
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial")
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalSettings {
    output_format: OutputFormat,
    units: UnitSystem,
    default_tyre_compound: TyreCompound
}

impl GlobalSettings {
    const OUTPUT_FORMAT: &'static str = "output_format";
    const UNITS: &'static str = "units";
    const DEFAULT_TYRE_COMPOUND: &'static str = "default_tyre_compound";
    const CONFIG_FILENAME: &'static str = "gt7-tuner-conf";
    const ENV_PREFIX: &'static str = "GT7";

    pub fn default() -> Self {
        GlobalSettings {
            output_format: OutputFormat::Text,
            units: UnitSystem::Metric,
            default_tyre_compound: TyreCompound::default()
        }
    }

    fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default(GlobalSettings::OUTPUT_FORMAT, "text")?
            .set_default(GlobalSettings::UNITS, "metric")?
            .set_default(GlobalSettings::DEFAULT_TYRE_COMPOUND, TyreCompound::default().as_str())
    }

    /// Settings file in the platform config directory. A file of the same
    /// name in the working directory takes precedence.
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "zephyrj", "gt7-tuner").map(|dirs| {
            dirs.config_dir().join(format!("{}.toml", GlobalSettings::CONFIG_FILENAME))
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = GlobalSettings::with_defaults(Config::builder())?;
        if let Some(path) = GlobalSettings::user_config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let loaded = builder
            .add_source(config::File::with_name(GlobalSettings::CONFIG_FILENAME).required(false))
            .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
            .build()
            .and_then(|settings| settings.try_deserialize::<GlobalSettings>());
        match loaded {
            Ok(settings) => {
                info!("Loaded settings: {:?}", settings);
                Ok(settings)
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                let ret = GlobalSettings::default();
                ret.write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
                Ok(ret)
            }
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
    }

    pub fn default_tyre_compound(&self) -> TyreCompound {
        self.default_tyre_compound
    }

    pub fn write(&self) -> std::io::Result<()> {
        fs::write(format!("{}.toml", GlobalSettings::CONFIG_FILENAME), toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}
