/// CLI configuration
use crate::error::{CliError, Result};
use keepsake_slideshow::SlideshowConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "slideshow.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub slideshow: SlideshowConfig,

    #[serde(default = "default_audio")]
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudioSettings {
    /// Simulated time the backend takes to load a track
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
}

impl AudioSettings {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        default_audio()
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `slideshow.toml` is read when
    /// present. `KEEPSAKE_`-prefixed variables override the file, with `__`
    /// between sections, e.g. `KEEPSAKE_SLIDESHOW__ADVANCE_INTERVAL_MS=2000`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings.add_source(config::File::from(path.to_path_buf()))
            }
            None => settings
                .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("KEEPSAKE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.slideshow.validate()?;
        Ok(())
    }
}

fn default_audio() -> AudioSettings {
    AudioSettings {
        load_delay_ms: default_load_delay_ms(),
    }
}

fn default_load_delay_ms() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_slideshow::EndOfSlidesPolicy;

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert_eq!(config.slideshow, SlideshowConfig::default());
        assert_eq!(config.audio.load_delay(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_partial_sections() {
        let config: CliConfig = serde_json::from_str(
            r#"{"slideshow": {"end_of_slides": "pause"}}"#,
        )
        .unwrap();

        assert_eq!(config.slideshow.end_of_slides, EndOfSlidesPolicy::Pause);
        assert_eq!(config.slideshow.advance_interval_ms, 4_000);
        assert_eq!(config.audio.load_delay_ms, 300);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = CliConfig::default();
        config.slideshow.advance_interval_ms = 0;
        assert!(matches!(config.validate(), Err(CliError::Slideshow(_))));
    }
}
