use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{ActivationDates, BackdropError, BackdropResult, BindingMode, Divider, OffsetBinder, OffsetBinding, PatternImage, TiledScroller};

const SETTINGS_FILE: &str = "backdrop.toml";

/// Persisted backdrop configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    pub divider: Divider,
    pub activation_dates: ActivationDates,
    /// Image file shown in every cell. Missing means empty cells.
    pub pattern: Option<PathBuf>,
    pub binding_mode: BindingMode,
}

impl BackdropSettings {
    pub fn from_toml(txt: &str) -> BackdropResult<Self> {
        let settings: BackdropSettings = toml::from_str(txt)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> BackdropResult<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> BackdropResult<()> {
        self.activation_dates.validate()
    }

    pub fn load(path: &Path) -> BackdropResult<Self> {
        let txt = fs::read_to_string(path).map_err(|source| BackdropError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&txt)
    }

    pub fn store(&self, path: &Path) -> BackdropResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Loads the settings from the user configuration directory, falling back
    /// to defaults if there is no file or it can't be used.
    pub fn load_or_default() -> Self {
        let Some(file) = Self::settings_file() else {
            return Self::default();
        };
        if !file.exists() {
            return Self::default();
        }
        match Self::load(&file) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Error reading settings file: {}", err);
                Self::default()
            }
        }
    }

    pub fn store_default(&self) {
        let Some(file) = Self::settings_file() else {
            log::error!("Can't determine configuration directory");
            return;
        };
        if let Err(err) = self.store(&file) {
            log::error!("Error writing settings file: {}", err);
        }
    }

    pub fn get_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "icy_backdrop").map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }

    pub fn settings_file() -> Option<PathBuf> {
        Self::get_config_dir().map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Decodes the configured pattern. A pattern that fails to load is logged
    /// and treated as absent.
    pub fn load_pattern(&self) -> Option<PatternImage> {
        let path = self.pattern.as_ref()?;
        match PatternImage::from_path(path) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    pub fn build_scroller(&self) -> TiledScroller {
        TiledScroller::new(self.load_pattern(), self.divider, self.activation_dates.clone())
    }

    pub fn build_binder(&self, binding: OffsetBinding) -> OffsetBinder {
        OffsetBinder::from_scroller(self.build_scroller(), binding).with_mode(self.binding_mode)
    }
}
