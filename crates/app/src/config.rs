//! User settings from `settings.toml` plus command-line overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stride_media::frame_accessor::STANDARD_DISPLAY_HEIGHT;
use stride_media::MediaLayout;
use stride_state::session::{DEFAULT_SPEED, DEFAULT_STEP_FRAMES};
use tracing::{info, warn};

use crate::error::Result;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "StrideCompare";

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 33;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub display_height: u32,
    pub refresh_interval_ms: u64,
    pub default_speed: f64,
    pub step_frames: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            display_height: STANDARD_DISPLAY_HEIGHT,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            default_speed: DEFAULT_SPEED,
            step_frames: DEFAULT_STEP_FRAMES,
        }
    }
}

impl AppConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn layout(&self) -> MediaLayout {
        MediaLayout::new(&self.data_dir)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        Ok(Self {
            verbose: args.contains(["-v", "--verbose"]),
            config: args.opt_value_from_str("--config")?,
            data_dir: args.opt_value_from_str("--data-dir")?,
        })
    }

    /// Settings file (explicit or default location) with CLI values on top.
    /// A missing or broken file falls back to defaults.
    pub fn resolve_config(&self) -> AppConfig {
        let path = self.config.clone().or_else(default_config_path);
        let mut config = match path {
            Some(path) if path.is_file() => match load_from_path(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded settings");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), "using default settings: {e}");
                    AppConfig::default()
                }
            },
            Some(path) if self.config.is_some() => {
                warn!(path = %path.display(), "settings file not found, using defaults");
                AppConfig::default()
            }
            _ => AppConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn args(list: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(list.iter().map(OsString::from).collect())
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "display_height = 360\ndefault_speed = 0.5\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.display_height, 360);
        assert_eq!(config.default_speed, 0.5);
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "display_height = \"tall\"").unwrap();
        assert!(load_from_path(&path).is_err());
    }

    #[test]
    fn cli_data_dir_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "data_dir = \"/srv/from-file\"\nstep_frames = 5\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let cli = CliArgs::parse(args(&[
            "--config",
            &path_arg,
            "--data-dir",
            "/srv/from-cli",
            "--verbose",
        ]))
        .unwrap();
        assert!(cli.verbose);

        let config = cli.resolve_config();
        assert_eq!(config.data_dir, PathBuf::from("/srv/from-cli"));
        assert_eq!(config.step_frames, 5);
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let cli = CliArgs::parse(args(&["--config", "/no/such/settings.toml"])).unwrap();
        assert_eq!(cli.resolve_config(), AppConfig::default());
    }
}
