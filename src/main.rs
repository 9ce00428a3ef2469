// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Anthem-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Anthem and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Anthem CLI entrypoint.
//!
//! By default this runs the interactive TUI over the bundled demo dataset or a CSV file.
//!
//! Use `--json` to print the scene snapshot of every view instead (after an optional `--select`).

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anthem::dashboard::{Dashboard, DashboardConfig, MapProjection};
use anthem::format::{load_demo_store, load_fight_songs};
use anthem::logging;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<csv-path>] [--json] [--select <school>] [--log-level <level>] [--log-dir <dir>]\n  {program} [--data <csv-path>] [--json] [--select <school>] [--log-level <level>] [--log-dir <dir>]\n  {program} --demo [--json] [--select <school>] [--log-level <level>] [--log-dir <dir>]\n\nWithout a csv-path the bundled demo dataset is used (same as --demo).\n--json prints the scene snapshot of every view instead of starting the TUI.\n--select toggles the named school before starting.\n\nLogs go to files only: --log-level/{level_env} (trace|debug|info|warn|error),\n--log-dir/{dir_env} (default: <temp>/anthem-logs).",
        level_env = logging::LEVEL_ENV,
        dir_env = logging::DIR_ENV,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    json: bool,
    data: Option<String>,
    select: Option<String>,
    log_level: Option<String>,
    log_dir: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        *slot = Some(value.ok_or(())?);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--data" => set_once(&mut options.data, args.next())?,
            "--select" => set_once(&mut options.select, args.next())?,
            "--log-level" => set_once(&mut options.log_level, args.next())?,
            "--log-dir" => set_once(&mut options.log_dir, args.next())?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.data, Some(arg))?,
        }
    }

    if options.demo && options.data.is_some() {
        return Err(());
    }

    Ok(options)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "anthem".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let level = options
            .log_level
            .clone()
            .or_else(|| env_value(logging::LEVEL_ENV))
            .unwrap_or_else(|| logging::default_log_level().to_owned());
        let log_dir = match options.log_dir.clone().or_else(|| env_value(logging::DIR_ENV)) {
            Some(dir) => std::env::current_dir()?.join(PathBuf::from(dir)),
            None => logging::default_log_dir(),
        };
        logging::init_logging(&level, &log_dir)?;

        let store = match options.data.as_deref() {
            Some(path) => load_fight_songs(path)?,
            None => load_demo_store()?,
        };

        // The terminal map draws lon/lat coastlines, so marks use the matching projection there.
        let projection =
            if options.json { MapProjection::AlbersUsa } else { MapProjection::Equirectangular };
        let config = DashboardConfig { projection, ..DashboardConfig::default() };
        let dashboard = Dashboard::new(store, config)?;

        if let Some(name) = options.select.as_deref() {
            dashboard.select_by_name(name, Instant::now())?;
        }

        if options.json {
            let settled = Instant::now() + config.geometry.transition;
            println!("{}", dashboard.snapshot_json(settled)?);
            return Ok(());
        }

        anthem::tui::run(dashboard)
    })();

    if let Err(err) = result {
        log::error!("event=app_exit module=main status=error error={err}");
        eprintln!("anthem: {err}");
        std::process::exit(1);
    }
}
