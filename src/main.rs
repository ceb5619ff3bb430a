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

mod settings;
mod tuner;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing_subscriber;
use tracing_appender;
use tracing::{error, info};

use crate::settings::{GlobalSettings, OutputFormat, UnitSystem};
use crate::tuner::{build_report, render, TuneError, TuneRequest};

#[derive(Parser, Debug)]
#[command(name = "gt7-tuner")]
#[command(about = "Suspension and gearing recommendations for Gran Turismo 7", long_about = None)]
struct Cli {
    /// Tuning request (TOML)
    request: PathBuf,
    /// Print the report as JSON
    #[arg(long, conflicts_with = "text")]
    json: bool,
    /// Print the report as text
    #[arg(long)]
    text: bool,
    /// Show metric units
    #[arg(long, conflicts_with = "imperial")]
    metric: bool,
    /// Show imperial units
    #[arg(long)]
    imperial: bool
}

impl Cli {
    /// Flags override whatever the settings file says
    fn apply_to(&self, settings: &mut GlobalSettings) {
        if self.json {
            settings.set_output_format(OutputFormat::Json);
        } else if self.text {
            settings.set_output_format(OutputFormat::Text);
        }
        if self.metric {
            settings.set_units(UnitSystem::Metric);
        } else if self.imperial {
            settings.set_units(UnitSystem::Imperial);
        }
    }
}

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "gt7_tuner.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn run(cli: &Cli) -> Result<String, TuneError> {
    let mut settings = GlobalSettings::load()?;
    cli.apply_to(&mut settings);
    let request = TuneRequest::load(&cli.request)?;
    let report = build_report(&request, &settings)?;
    info!("Rendering report as {:?} in {} units", settings.output_format(), settings.units());
    render(&report, settings.output_format(), settings.units())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Tuning failed. {}", e.to_string());
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use clap::Parser;
    use crate::Cli;
    use crate::settings::{GlobalSettings, OutputFormat, UnitSystem};

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from(["gt7-tuner", "setup.toml", "--json", "--imperial"]).unwrap();
        assert_eq!(cli.request, PathBuf::from("setup.toml"));
        let mut settings = GlobalSettings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings.output_format(), OutputFormat::Json);
        assert_eq!(settings.units(), UnitSystem::Imperial);
    }

    #[test]
    fn settings_kept_without_flags() {
        let cli = Cli::try_parse_from(["gt7-tuner", "setup.toml"]).unwrap();
        let mut settings = GlobalSettings::default();
        settings.set_units(UnitSystem::Imperial);
        cli.apply_to(&mut settings);
        assert_eq!(settings.output_format(), OutputFormat::Text);
        assert_eq!(settings.units(), UnitSystem::Imperial);
    }

    #[test]
    fn bad_usage() {
        assert!(Cli::try_parse_from(["gt7-tuner"]).is_err());
        assert!(Cli::try_parse_from(["gt7-tuner", "a.toml", "--yaml"]).is_err());
        assert!(Cli::try_parse_from(["gt7-tuner", "a.toml", "b.toml"]).is_err());
        assert!(Cli::try_parse_from(["gt7-tuner", "a.toml", "--json", "--text"]).is_err());
        assert!(Cli::try_parse_from(["gt7-tuner", "a.toml", "--metric", "--imperial"]).is_err());
    }
}
