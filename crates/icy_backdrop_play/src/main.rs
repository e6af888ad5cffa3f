#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::module_name_repetitions)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod player;

use std::path::PathBuf;

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, Naming};
use icy_backdrop::{ActivationDates, BackdropSettings, BindingMode, Divider};
use semver::Version;

lazy_static::lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
    pub static ref DEFAULT_TITLE: String = format!("iCY BACKDROP {}", *VERSION);
}

#[derive(Parser, Debug)]
#[command(version, about = "Shows a diagonally scrolling pattern backdrop.", long_about = None)]
pub struct Args {
    /// Pattern image shown in every cell
    #[arg(value_name = "IMAGE")]
    pattern: Option<PathBuf>,

    /// Settings file to use instead of the one in the configuration directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scroll speed divider, larger is slower
    #[arg(long)]
    divider: Option<f64>,

    /// Only animate on these days (YYYY/MM/dd), may be given multiple times
    #[arg(long = "date", value_name = "YYYY/MM/dd")]
    dates: Vec<String>,

    /// Mirror the animated offset back into the displayed position
    #[arg(long, default_value_t = false)]
    two_way: bool,

    /// Write the effective settings to the configuration directory
    #[arg(long, default_value_t = false)]
    save: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<BackdropSettings> {
        let mut settings = match &self.config {
            Some(path) => BackdropSettings::load(path)?,
            None => BackdropSettings::load_or_default(),
        };

        if let Some(pattern) = &self.pattern {
            settings.pattern = Some(pattern.clone());
        }
        if let Some(divider) = self.divider {
            settings.divider = Divider::new(divider)?;
        }
        if !self.dates.is_empty() {
            let dates = ActivationDates::new(self.dates.iter().cloned());
            dates.validate()?;
            settings.activation_dates = dates;
        }
        if self.two_way {
            settings.binding_mode = BindingMode::TwoWay;
        }
        Ok(settings)
    }
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = BackdropSettings::get_config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = match get_log_dir() {
        Some(log_dir) => Some(
            Logger::try_with_env_or_str("info, iced=error, icy_ui=error, wgpu_hal=error, wgpu_core=error")?
                .log_to_file(FileSpec::default().directory(&log_dir).basename("icy_backdrop").suffix("log").suppress_timestamp())
                .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
                .create_symlink(log_dir.join("icy_backdrop.log"))
                .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
                .start()?,
        ),
        None => {
            eprintln!("Failed to create log file");
            None
        }
    };

    log::info!("Starting iCY BACKDROP {}", *VERSION);

    let settings = args.settings()?;
    if args.save {
        settings.store_default();
    }

    icy_ui::application(move || player::BackdropPlayer::new(&settings), player::BackdropPlayer::update, player::BackdropPlayer::view)
        .title(player::BackdropPlayer::title)
        .subscription(player::BackdropPlayer::subscription)
        .run()?;

    log::info!("Shutting down.");
    Ok(())
}
