use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::visibility::ObserveOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default)]
    pub limiter: LimiterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (holds the consent flag)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Counter animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Total count-up time in milliseconds
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
    /// Interval between display updates in milliseconds
    #[serde(default = "default_counter_tick")]
    pub tick_ms: u64,
    /// Visible fraction (0.0-1.0) that starts the count
    #[serde(default = "default_counter_threshold")]
    pub threshold: f64,
    /// Pixels added to each side of the viewport before intersecting
    #[serde(default)]
    pub root_margin_px: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
            tick_ms: default_counter_tick(),
            threshold: default_counter_threshold(),
            root_margin_px: 0.0,
        }
    }
}

/// Fade-in settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Visible fraction (0.0-1.0) that starts the fade
    #[serde(default = "default_fade_threshold")]
    pub threshold: f64,
    /// Pixels added to each side of the viewport before intersecting
    #[serde(default)]
    pub root_margin_px: f64,
    /// Delay between applying the hidden style and the shown style
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Vertical offset of the hidden state in pixels
    #[serde(default = "default_fade_offset")]
    pub offset_px: f64,
    /// CSS transition length in milliseconds
    #[serde(default = "default_transition")]
    pub transition_ms: u64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            threshold: default_fade_threshold(),
            root_margin_px: 0.0,
            settle_delay_ms: default_settle_delay(),
            offset_px: default_fade_offset(),
            transition_ms: default_transition(),
        }
    }
}

/// Rate limits applied to raw scroll input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Minimum milliseconds between viewport checks while scrolling
    #[serde(default = "default_scroll_throttle")]
    pub scroll_throttle_ms: u64,
    /// Quiet period after the last scroll before a final viewport check
    #[serde(default = "default_scroll_settle")]
    pub scroll_settle_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: default_scroll_throttle(),
            scroll_settle_ms: default_scroll_settle(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("viewfx")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_tick() -> u64 {
    16 // ~60fps
}

fn default_counter_threshold() -> f64 {
    0.5
}

fn default_fade_threshold() -> f64 {
    0.1
}

fn default_settle_delay() -> u64 {
    100
}

fn default_fade_offset() -> f64 {
    20.0
}

fn default_transition() -> u64 {
    600
}

fn default_scroll_throttle() -> u64 {
    100
}

fn default_scroll_settle() -> u64 {
    150
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Tick interval, falling back to 16ms when unset
    pub fn tick(&self) -> Duration {
        if self.tick_ms == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(self.tick_ms)
        }
    }

    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions::new(self.threshold, self.root_margin_px)
    }
}

impl FadeConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions::new(self.threshold, self.root_margin_px)
    }
}

impl LimiterConfig {
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// when the file does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/viewfx/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("viewfx")
            .join("config.toml")
    }

    /// Get the consent flag file path
    pub fn consent_path(&self) -> PathBuf {
        self.data_dir().join("consent.json")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.counter.duration(), Duration::from_millis(2000));
        assert_eq!(config.counter.tick(), Duration::from_millis(16));
        assert_eq!(config.counter.threshold, 0.5);
        assert_eq!(config.fade.threshold, 0.1);
        assert_eq!(config.fade.settle_delay(), Duration::from_millis(100));
        assert_eq!(config.counter.root_margin_px, 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [counter]
            duration_ms = 500

            [fade]
            offset_px = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(config.counter.duration_ms, 500);
        assert_eq!(config.counter.tick_ms, 16);
        assert_eq!(config.fade.offset_px, 40.0);
        assert_eq!(config.fade.settle_delay_ms, 100);
        assert_eq!(config.limiter.scroll_throttle_ms, 100);
    }

    #[test]
    fn test_zero_tick_falls_back() {
        let counter = CounterConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(counter.tick(), Duration::from_millis(16));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.counter.duration_ms, 2000);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[counter\nduration_ms = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewfx").join("config.toml");

        let mut config = AppConfig::default();
        config.counter.tick_ms = 33;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.counter.tick_ms, 33);
        assert_eq!(loaded.fade.transition_ms, 600);
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let path = PathBuf::from("/var/lib/viewfx");
        assert_eq!(expand_tilde(&path), path);
    }
}
