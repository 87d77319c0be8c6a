//! Ephemeral decorative elements.
//!
//! Every effect is a short-lived `div` whose look is decided here, up front,
//! from the palette and the RNG. The web layer only turns a `VisualSpec` into a
//! node; it never rolls dice itself, so the whole catalogue is testable on the
//! host.

use crate::config::FxConfig;
use crate::constants::*;
use rand::prelude::*;
use std::fmt::Write as _;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Confetti,
    Particle,
    Heart,
    Star,
    Ripple,
    Smoke,
    SoundWave,
}

impl EffectKind {
    /// CSS animation name the node runs.
    pub fn animation(self) -> &'static str {
        match self {
            EffectKind::Confetti => "confettiDrop",
            EffectKind::Particle => "particleFloat",
            EffectKind::Heart => "heartFloat",
            EffectKind::Star => "starFloat",
            EffectKind::Ripple => "ripple",
            EffectKind::Smoke => "smokeRise",
            EffectKind::SoundWave => "soundWave",
        }
    }

    /// Class tagged on the node so page CSS and sweeps can find it.
    pub fn class_name(self) -> &'static str {
        match self {
            EffectKind::Confetti => "fx-confetti",
            EffectKind::Particle => "fx-particle",
            EffectKind::Heart => "floating-heart-particle",
            EffectKind::Star => "floating-star-particle",
            EffectKind::Ripple => "fx-ripple",
            EffectKind::Smoke => "fx-smoke",
            EffectKind::SoundWave => "fx-sound-wave",
        }
    }

    /// Ambient floaters that a resize invalidates.
    #[inline]
    pub fn is_floating(self) -> bool {
        matches!(self, EffectKind::Heart | EffectKind::Particle)
    }
}

/// Where a node sits relative to its mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Absolute, just above the mount, `left` in percent of its width.
    DropFromTop { left_pct: f32 },
    /// Absolute, at the mount's bottom edge, `left` in percent.
    RiseFromBottom { left_pct: f32 },
    /// Fixed, below the viewport, `left` in viewport widths.
    RiseFromViewport { left_vw: f32 },
    /// Absolute, centered inside the mount.
    CenterOfMount,
    /// Fixed, centered on the viewport.
    CenterOfViewport,
    /// Fixed, on top of flame `index`; the caller supplies its screen point.
    AboveFlame { index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisualSpec {
    pub kind: EffectKind,
    pub placement: Placement,
    pub width_px: f32,
    pub height_px: f32,
    pub color: String,
    pub rotation_deg: f32,
    pub round: bool,
    pub opacity: f32,
    pub duration: Duration,
    pub delay: Duration,
    pub glyph: Option<String>,
}

impl VisualSpec {
    /// Time from attachment until the animation has fully played.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.delay + self.duration
    }

    /// Inline style for the node. `anchor` is the screen point used by
    /// `Placement::AboveFlame`; other placements ignore it.
    pub fn css_text(&self, anchor: Option<(f64, f64)>) -> String {
        let mut css = String::with_capacity(320);
        let secs = self.duration.as_secs_f32();
        match self.placement {
            Placement::DropFromTop { left_pct } => {
                _ = write!(css, "position:absolute;top:-10px;left:{left_pct:.2}%;");
            }
            Placement::RiseFromBottom { left_pct } => {
                _ = write!(css, "position:absolute;top:100%;left:{left_pct:.2}%;");
            }
            Placement::RiseFromViewport { left_vw } => {
                _ = write!(css, "position:fixed;top:100vh;left:{left_vw:.2}vw;");
            }
            Placement::CenterOfMount => {
                let half = self.width_px / 2.0;
                _ = write!(
                    css,
                    "position:absolute;left:50%;top:50%;margin-left:-{half}px;margin-top:-{half}px;"
                );
            }
            Placement::CenterOfViewport => {
                css.push_str("position:fixed;top:50%;left:50%;");
            }
            Placement::AboveFlame { .. } => {
                let (x, y) = anchor.unwrap_or((0.0, 0.0));
                _ = write!(css, "position:fixed;left:{x:.1}px;top:{y:.1}px;");
            }
        }
        if self.glyph.is_some() {
            _ = write!(css, "font-size:{:.1}px;", self.width_px);
        } else {
            _ = write!(
                css,
                "width:{:.1}px;height:{:.1}px;",
                self.width_px, self.height_px
            );
        }
        match self.kind {
            EffectKind::SoundWave => {
                _ = write!(
                    css,
                    "border:3px solid {};border-radius:50%;transform:translate(-50%, -50%) scale(0);",
                    self.color
                );
            }
            EffectKind::Ripple => {
                _ = write!(
                    css,
                    "background:{};border-radius:50%;transform:scale(0);",
                    self.color
                );
            }
            EffectKind::Star => {}
            EffectKind::Heart => {
                _ = write!(
                    css,
                    "background:{};transform:rotate({}deg);",
                    self.color, self.rotation_deg
                );
            }
            _ => {
                let radius = if self.round { "50%" } else { "2px" };
                _ = write!(
                    css,
                    "background:{};border-radius:{radius};transform:rotate({:.0}deg);",
                    self.color, self.rotation_deg
                );
            }
        }
        match self.kind {
            EffectKind::Confetti => css.push_str("box-shadow:0 0 6px rgba(0,0,0,0.1);"),
            EffectKind::Particle => {
                _ = write!(css, "box-shadow:0 0 10px {}30;", self.color);
            }
            _ => {}
        }
        let z = match self.kind {
            EffectKind::Particle | EffectKind::Heart | EffectKind::Star => 1,
            EffectKind::Ripple => 0,
            _ => 1000,
        };
        if z > 0 {
            _ = write!(css, "z-index:{z};");
        }
        _ = write!(css, "opacity:{};pointer-events:none;", self.opacity);
        let timing = match self.kind {
            EffectKind::Smoke | EffectKind::SoundWave => "ease-out forwards",
            EffectKind::Ripple => "linear",
            _ => "linear forwards",
        };
        _ = write!(css, "animation:{} {secs:.2}s {timing};", self.kind.animation());
        if !self.delay.is_zero() {
            _ = write!(css, "animation-delay:{:.2}s;", self.delay.as_secs_f32());
        }
        css
    }

    /// Child markup for effects that need more than one box.
    pub fn inner_html(&self) -> Option<String> {
        match self.kind {
            EffectKind::Heart => {
                let lobe = |top: i32, left: i32| {
                    format!(
                        "<div style=\"position:absolute;width:16px;height:16px;background:{};border-radius:50%;top:{top}px;left:{left}px;\"></div>",
                        self.color
                    )
                };
                Some(format!("{}{}", lobe(-8, 0), lobe(0, -8)))
            }
            EffectKind::Star => self.glyph.clone(),
            _ => None,
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [String], fallback: &'a str) -> &'a str {
    items.choose(rng).map(String::as_str).unwrap_or(fallback)
}

fn random_ms<R: Rng + ?Sized>(rng: &mut R, min_ms: u64, span_ms: u64) -> Duration {
    Duration::from_millis(min_ms + rng.gen_range(0..=span_ms))
}

pub fn confetti_piece<R: Rng + ?Sized>(cfg: &FxConfig, rng: &mut R) -> VisualSpec {
    let size = CONFETTI_SIZE_MIN_PX + rng.gen::<f32>() * CONFETTI_SIZE_SPAN_PX;
    VisualSpec {
        kind: EffectKind::Confetti,
        placement: Placement::DropFromTop {
            left_pct: rng.gen::<f32>() * 100.0,
        },
        width_px: size,
        height_px: size,
        color: pick(rng, &cfg.palette.confetti, DEFAULT_HEART_COLOR).to_string(),
        rotation_deg: rng.gen::<f32>() * 360.0,
        round: rng.gen_bool(0.5),
        opacity: 1.0,
        duration: random_ms(rng, CONFETTI_DURATION_MIN_MS, CONFETTI_DURATION_SPAN_MS),
        delay: Duration::ZERO,
        glyph: None,
    }
}

pub fn welcome_particle<R: Rng + ?Sized>(cfg: &FxConfig, rng: &mut R) -> VisualSpec {
    let size = PARTICLE_SIZE_MIN_PX + rng.gen::<f32>() * PARTICLE_SIZE_SPAN_PX;
    VisualSpec {
        kind: EffectKind::Particle,
        placement: Placement::RiseFromBottom {
            left_pct: rng.gen::<f32>() * 100.0,
        },
        width_px: size,
        height_px: size,
        color: pick(rng, &cfg.palette.particles, DEFAULT_HEART_COLOR).to_string(),
        rotation_deg: 0.0,
        round: true,
        opacity: 0.6,
        duration: random_ms(rng, PARTICLE_DURATION_MIN_MS, PARTICLE_DURATION_SPAN_MS),
        delay: Duration::ZERO,
        glyph: None,
    }
}

pub fn floating_heart<R: Rng + ?Sized>(cfg: &FxConfig, rng: &mut R) -> VisualSpec {
    VisualSpec {
        kind: EffectKind::Heart,
        placement: Placement::RiseFromViewport {
            left_vw: rng.gen::<f32>() * 100.0,
        },
        width_px: 16.0,
        height_px: 14.0,
        color: cfg.palette.heart.clone(),
        rotation_deg: 45.0,
        round: false,
        opacity: 0.5,
        duration: Duration::from_millis(HEART_DURATION_MS),
        delay: Duration::ZERO,
        glyph: None,
    }
}

pub fn floating_star<R: Rng + ?Sized>(cfg: &FxConfig, rng: &mut R) -> VisualSpec {
    let glyph = pick(rng, &cfg.palette.star_glyphs, "✨").to_string();
    VisualSpec {
        kind: EffectKind::Star,
        placement: Placement::RiseFromViewport {
            left_vw: rng.gen::<f32>() * 100.0,
        },
        width_px: STAR_FONT_MIN_PX + rng.gen::<f32>() * STAR_FONT_SPAN_PX,
        height_px: 0.0,
        color: String::new(),
        rotation_deg: 0.0,
        round: false,
        opacity: 0.7,
        duration: Duration::from_millis(STAR_DURATION_MS),
        delay: Duration::ZERO,
        glyph: Some(glyph),
    }
}

pub fn ripple() -> VisualSpec {
    VisualSpec {
        kind: EffectKind::Ripple,
        placement: Placement::CenterOfMount,
        width_px: 20.0,
        height_px: 20.0,
        color: "rgba(255, 255, 255, 0.6)".to_string(),
        rotation_deg: 0.0,
        round: true,
        opacity: 1.0,
        duration: Duration::from_millis(RIPPLE_DURATION_MS),
        delay: Duration::ZERO,
        glyph: None,
    }
}

pub fn smoke_puff(flame_index: usize) -> VisualSpec {
    VisualSpec {
        kind: EffectKind::Smoke,
        placement: Placement::AboveFlame { index: flame_index },
        width_px: 4.0,
        height_px: 4.0,
        color: "rgba(150, 150, 150, 0.6)".to_string(),
        rotation_deg: 0.0,
        round: true,
        opacity: 1.0,
        duration: Duration::from_millis(SMOKE_DURATION_MS),
        delay: Duration::ZERO,
        glyph: None,
    }
}

const RING_STAGGER: Duration = Duration::from_millis(SOUND_WAVE_RING_STAGGER_MS);

/// Ring 0 is the coral lead ring; rings 1.. fade in mint with a growing delay.
pub fn sound_wave_ring(ring: usize) -> VisualSpec {
    let color = if ring == 0 {
        "rgba(255, 107, 157, 0.8)".to_string()
    } else {
        let alpha = (0.8 - ring as f32 * 0.2).max(0.0);
        format!("rgba(38, 222, 129, {alpha:.1})")
    };
    VisualSpec {
        kind: EffectKind::SoundWave,
        placement: Placement::CenterOfViewport,
        width_px: 100.0,
        height_px: 100.0,
        color,
        rotation_deg: 0.0,
        round: true,
        opacity: 1.0,
        duration: Duration::from_millis(SOUND_WAVE_DURATION_MS),
        delay: RING_STAGGER * ring as u32,
        glyph: None,
    }
}
