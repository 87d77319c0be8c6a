//! Engine configuration.
//!
//! One `FxConfig` replaces the hand-copied per-theme constants: palettes,
//! counts, timings and feature toggles are all data. Every field has a default
//! so a page can override only what it needs.

use crate::constants::*;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("palette `{0}` is empty")]
    EmptyPalette(&'static str),
    #[error("`{0}` must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("`{name}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },
    #[error("stars are enabled but no star glyphs are configured")]
    NoStarGlyphs,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub confetti: Vec<String>,
    pub particles: Vec<String>,
    pub heart: String,
    pub star_glyphs: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            confetti: DEFAULT_CONFETTI_COLORS.iter().map(|c| c.to_string()).collect(),
            particles: DEFAULT_PARTICLE_COLORS.iter().map(|c| c.to_string()).collect(),
            heart: DEFAULT_HEART_COLOR.to_string(),
            star_glyphs: DEFAULT_STAR_GLYPHS.iter().map(|g| g.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Features {
    pub music_visualizer: bool,
    pub smoke: bool,
    pub ambient_hearts: bool,
    pub ambient_stars: bool,
    pub parallax: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            music_visualizer: true,
            smoke: true,
            ambient_hearts: true,
            ambient_stars: true,
            parallax: true,
        }
    }
}

/// Count, stagger and sweep for one burst kind. Overrides must give all three.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BurstParams {
    pub count: usize,
    pub stagger_ms: u64,
    pub sweep_ms: u64,
}

impl BurstParams {
    #[inline]
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
    #[inline]
    pub fn sweep(&self) -> Duration {
        Duration::from_millis(self.sweep_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FxConfig {
    pub palette: Palette,
    pub features: Features,

    pub confetti: BurstParams,
    pub particles: BurstParams,

    pub loading_ms: u64,
    pub entrance_delay_ms: u64,

    pub heart_interval_ms: u64,
    pub heart_chance: f32,
    pub star_interval_ms: u64,
    pub star_chance: f32,

    pub visualizer_interval_ms: u64,
    pub bar_min_px: f32,
    pub bar_span_px: f32,
    pub bar_default_px: f32,

    pub scrolled_threshold_px: f64,
    pub navbar_offset_px: f64,
    pub key_scroll_step_px: f64,
    pub celebrate_scroll_delay_ms: u64,
    pub resize_debounce_ms: u32,

    pub candle_relight_ms: u64,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            features: Features::default(),
            confetti: BurstParams {
                count: CONFETTI_COUNT,
                stagger_ms: CONFETTI_STAGGER_MS,
                sweep_ms: CONFETTI_SWEEP_MS,
            },
            particles: BurstParams {
                count: PARTICLE_COUNT,
                stagger_ms: PARTICLE_STAGGER_MS,
                // Particles are swept as soon as the longest one finishes.
                sweep_ms: 0,
            },
            loading_ms: LOADING_SCREEN_MS,
            entrance_delay_ms: ENTRANCE_DELAY_MS,
            heart_interval_ms: HEART_INTERVAL_MS,
            heart_chance: HEART_CHANCE,
            star_interval_ms: STAR_INTERVAL_MS,
            star_chance: STAR_CHANCE,
            visualizer_interval_ms: VISUALIZER_INTERVAL_MS,
            bar_min_px: BAR_HEIGHT_MIN_PX,
            bar_span_px: BAR_HEIGHT_SPAN_PX,
            bar_default_px: BAR_HEIGHT_DEFAULT_PX,
            scrolled_threshold_px: NAVBAR_SCROLLED_THRESHOLD_PX,
            navbar_offset_px: NAVBAR_OFFSET_PX,
            key_scroll_step_px: KEY_SCROLL_STEP_PX,
            celebrate_scroll_delay_ms: CELEBRATE_SCROLL_DELAY_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            candle_relight_ms: CANDLE_RELIGHT_MS,
        }
    }
}

impl FxConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.confetti.is_empty() {
            return Err(ConfigError::EmptyPalette("confetti"));
        }
        if self.palette.particles.is_empty() {
            return Err(ConfigError::EmptyPalette("particles"));
        }
        if self.features.ambient_stars && self.palette.star_glyphs.is_empty() {
            return Err(ConfigError::NoStarGlyphs);
        }
        for (name, value) in [
            ("heart_interval_ms", self.heart_interval_ms),
            ("star_interval_ms", self.star_interval_ms),
            ("visualizer_interval_ms", self.visualizer_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        for (name, value) in [
            ("heart_chance", self.heart_chance),
            ("star_chance", self.star_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn visualizer_interval(&self) -> Duration {
        Duration::from_millis(self.visualizer_interval_ms)
    }
}
