//! Paging configuration
//!
//! Plain numeric tunables with compiled defaults from [`crate::constants`].
//! Hosts build one in code or load a TOML fragment; every omitted key falls
//! back to its default.

use pageflow_contracts::surface::Easing;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{geometry, snap};

/// How a distance-based page offset that lands exactly between two pages is
/// rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Ties resolve in the direction the finger travelled (away from zero).
    #[default]
    TowardTravel,
    /// Ties always resolve toward the higher index.
    AlwaysUp,
}

impl TieBreak {
    /// Round a signed page count according to this policy.
    pub fn round(self, pages: f32) -> f32 {
        match self {
            TieBreak::TowardTravel => pages.round(),
            TieBreak::AlwaysUp => (pages + 0.5).floor(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse paging config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Gap between cards; also the leading inset of the first card.
    pub gutter: f32,
    /// Page width = viewport width - `viewport_inset_gutters * gutter`.
    pub viewport_inset_gutters: f32,
    /// Fraction of a page width a drag must exceed to change page.
    pub crossing_fraction: f32,
    /// Enables the short-but-fast swipe heuristic.
    pub fast_swipe: bool,
    /// Speed (units/s) above which a short drag flips one page.
    pub swipe_speed_threshold: f32,
    pub tie_break: TieBreak,
    /// Loop flag used by pages that do not set their own.
    pub loop_by_default: bool,
    pub snap_duration_ms: u64,
    pub snap_easing: Easing,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            gutter: geometry::GUTTER,
            viewport_inset_gutters: geometry::VIEWPORT_INSET_GUTTERS,
            crossing_fraction: snap::CROSSING_FRACTION,
            fast_swipe: true,
            swipe_speed_threshold: snap::SWIPE_SPEED_THRESHOLD,
            tie_break: TieBreak::default(),
            loop_by_default: false,
            snap_duration_ms: snap::DURATION_MS,
            snap_easing: Easing::EaseOut,
        }
    }
}

impl PagingConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PagingConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded paging config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gutter.is_finite() && self.gutter >= 0.0) {
            return Err(invalid("gutter", "must be a finite value >= 0"));
        }
        if !(self.viewport_inset_gutters.is_finite()
            && self.viewport_inset_gutters >= 0.0)
        {
            return Err(invalid(
                "viewport_inset_gutters",
                "must be a finite value >= 0",
            ));
        }
        if !(self.crossing_fraction > 0.0 && self.crossing_fraction <= 1.0) {
            return Err(invalid("crossing_fraction", "must lie in (0, 1]"));
        }
        if !(self.swipe_speed_threshold.is_finite()
            && self.swipe_speed_threshold >= 0.0)
        {
            return Err(invalid(
                "swipe_speed_threshold",
                "must be a finite value >= 0",
            ));
        }
        if self.snap_duration_ms == 0 {
            return Err(invalid("snap_duration_ms", "must be non-zero"));
        }
        Ok(())
    }

    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PagingConfig::from_toml_str(
            "swipe_speed_threshold = 450.0\ntie_break = \"always_up\"\n",
        )
        .expect("valid config");

        assert_eq!(config.swipe_speed_threshold, 450.0);
        assert_eq!(config.tie_break, TieBreak::AlwaysUp);
        assert_eq!(config.gutter, geometry::GUTTER);
        assert_eq!(config.snap_easing, Easing::EaseOut);
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        let err = PagingConfig::from_toml_str("crossing_fraction = 1.5")
            .expect_err("fraction above one");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "crossing_fraction",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = PagingConfig::from_toml_str("snap_duration_ms = 0")
            .expect_err("zero duration");
        assert!(err.to_string().contains("snap_duration_ms"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "loop_by_default = true\ngutter = 12.0").expect("write");

        let config = PagingConfig::load(file.path()).expect("load");
        assert!(config.loop_by_default);
        assert_eq!(config.gutter, 12.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PagingConfig::load("/definitely/not/here/paging.toml")
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn tie_break_differs_only_on_negative_ties() {
        assert_eq!(TieBreak::TowardTravel.round(1.5), 2.0);
        assert_eq!(TieBreak::AlwaysUp.round(1.5), 2.0);
        assert_eq!(TieBreak::TowardTravel.round(-1.5), -2.0);
        assert_eq!(TieBreak::AlwaysUp.round(-1.5), -1.0);
        assert_eq!(TieBreak::AlwaysUp.round(-1.4), -1.0);
        assert_eq!(TieBreak::AlwaysUp.round(-1.6), -2.0);
    }
}
