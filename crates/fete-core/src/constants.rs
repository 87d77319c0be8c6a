// Default timing, sizing and palette values for the celebration page.
// `FxConfig::default()` is built from these; the page may override any of them.

// Start-up
pub const LOADING_SCREEN_MS: u64 = 2500;
pub const ENTRANCE_DELAY_MS: u64 = 500;

// Confetti burst
pub const CONFETTI_COUNT: usize = 120;
pub const CONFETTI_STAGGER_MS: u64 = 12;
pub const CONFETTI_SWEEP_MS: u64 = 4000;
pub const CONFETTI_SIZE_MIN_PX: f32 = 4.0;
pub const CONFETTI_SIZE_SPAN_PX: f32 = 8.0;
pub const CONFETTI_DURATION_MIN_MS: u64 = 3000;
pub const CONFETTI_DURATION_SPAN_MS: u64 = 2000;

// Welcome particles
pub const PARTICLE_COUNT: usize = 25;
pub const PARTICLE_STAGGER_MS: u64 = 120;
pub const PARTICLE_SIZE_MIN_PX: f32 = 3.0;
pub const PARTICLE_SIZE_SPAN_PX: f32 = 6.0;
pub const PARTICLE_DURATION_MIN_MS: u64 = 4000;
pub const PARTICLE_DURATION_SPAN_MS: u64 = 6000;

// Ambient spawners
pub const HEART_INTERVAL_MS: u64 = 3500;
pub const HEART_CHANCE: f32 = 0.25;
pub const HEART_DURATION_MS: u64 = 7000;
pub const STAR_INTERVAL_MS: u64 = 5000;
pub const STAR_CHANCE: f32 = 0.15;
pub const STAR_DURATION_MS: u64 = 9000;
pub const STAR_FONT_MIN_PX: f32 = 15.0;
pub const STAR_FONT_SPAN_PX: f32 = 10.0;

// Single-shot effects
pub const RIPPLE_DURATION_MS: u64 = 600;
pub const SMOKE_DURATION_MS: u64 = 1200;
pub const SOUND_WAVE_DURATION_MS: u64 = 1000;
pub const SOUND_WAVE_RINGS: usize = 3;
pub const SOUND_WAVE_RING_STAGGER_MS: u64 = 200;

// Music visualizer (purely visual, nothing is played)
pub const VISUALIZER_INTERVAL_MS: u64 = 180;
pub const BAR_HEIGHT_MIN_PX: f32 = 15.0;
pub const BAR_HEIGHT_SPAN_PX: f32 = 40.0;
pub const BAR_HEIGHT_DEFAULT_PX: f32 = 20.0;

// Scrolling and navigation
pub const NAVBAR_SCROLLED_THRESHOLD_PX: f64 = 50.0;
pub const NAVBAR_OFFSET_PX: f64 = 80.0;
pub const KEY_SCROLL_STEP_PX: f64 = 100.0;
pub const CELEBRATE_SCROLL_DELAY_MS: u64 = 1500;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

// Cake, candles and balloons
pub const CAKE_BOUNCE_RESTART_MS: u64 = 10;
pub const CANDLE_FAST_FLICKER_MS: u64 = 2000;
pub const CANDLE_RELIGHT_MS: u64 = 2000;
pub const CANDLE_STAGGER_MS: u64 = 150;
pub const BALLOON_STAGGER_MS: u64 = 200;
pub const BALLOON_HOLD_MS: u64 = 800;

// Parallax speed per layer: (base, per-index step)
pub const PARALLAX_BALLOONS: (f64, f64) = (0.2, 0.1);
pub const PARALLAX_HEARTS: (f64, f64) = (0.1, 0.05);
pub const PARALLAX_STARS: (f64, f64) = (0.15, 0.08);

// Coral & mint palette
pub const DEFAULT_CONFETTI_COLORS: [&str; 6] = [
    "#FF6B9D", "#26de81", "#a55eea", "#fdcb6e", "#74b9ff", "#ff7675",
];
pub const DEFAULT_PARTICLE_COLORS: [&str; 4] = ["#FF6B9D", "#26de81", "#a55eea", "#fdcb6e"];
pub const DEFAULT_HEART_COLOR: &str = "#FF6B9D";
pub const DEFAULT_STAR_GLYPHS: [&str; 3] = ["✨", "⭐", "🌟"];
