//! The effects controller.
//!
//! Operations and `tick` never touch a document. They update state, queue
//! deferred work on a virtual clock, and push `FxCommand`s that the platform
//! layer applies in order.

use crate::config::FxConfig;
use crate::constants::*;
use crate::effects::{self, EffectKind, VisualSpec};
use crate::inventory::{ElementKey, PageInventory};
use crate::keys::KeyAction;
use crate::nav;
use crate::state::{AppState, BurstKind};
use crate::timers::{Interval, TimerQueue};
use fnv::FnvHashMap;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

const CAKE_BOUNCE: &str = "bounce 0.6s ease-in-out 3";
const FLAME_FAST_SECS: f32 = 0.2;
const FLAME_NORMAL_SECS: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Parent of a spawned node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mount {
    Body,
    Element(ElementKey),
    CelebrationCard(usize),
}

pub type BarHeights = SmallVec<[f32; 8]>;

#[derive(Clone, Debug, PartialEq)]
pub enum FxCommand {
    Spawn {
        id: NodeId,
        mount: Mount,
        spec: VisualSpec,
    },
    Remove(NodeId),
    /// Drop every child of a container.
    ClearMount(ElementKey),
    /// Hide the loading overlay and unlock body scrolling.
    HideLoadingScreen,
    /// Button labels and equalizer `active` class for the audio toggle.
    SetAudioUi { playing: bool },
    SetBarHeights(BarHeights),
    SetNavScrolled(bool),
    /// One flag per nav link, in inventory order.
    SetActiveNav(Vec<bool>),
    ScrollToSection { id: String, navbar_offset_px: f64 },
    ScrollBy(f64),
    /// `None` clears the cake animation so the next one restarts.
    SetCakeAnimation(Option<&'static str>),
    SetFlameSpeed { secs: f32 },
    FlameFlicker { index: usize, delay_secs: f32, duration_secs: f32 },
    SetFlameLit { index: usize, lit: bool },
    SetBalloonLifted { index: usize, lifted: bool },
    ToggleMobileMenu,
    Parallax { scroll_y: f64 },
    DisconnectObservers,
}

#[derive(Clone, Debug)]
enum Deferred {
    Spawn {
        mount: Mount,
        spec: VisualSpec,
        burst: Option<BurstKind>,
    },
    EndBurst(BurstKind),
    RevealContent,
    Entrance,
    CakeBounce,
    FlameSpeed(f32),
    FlameFlicker(usize),
    BalloonLift(usize),
    BalloonRest(usize),
    Relight(usize),
    ScrollTo(String),
}

#[derive(Clone, Copy, Debug)]
struct LiveNode {
    kind: EffectKind,
    expires_at: Duration,
    burst: Option<BurstKind>,
}

pub struct EffectsController {
    pub config: FxConfig,
    pub inventory: PageInventory,
    state: AppState,
    rng: StdRng,
    now: Duration,
    timers: TimerQueue<Deferred>,
    live: FnvHashMap<NodeId, LiveNode>,
    next_node: u64,
    hearts: Option<Interval>,
    stars: Option<Interval>,
    visualizer: Option<Interval>,
    initialized: bool,
    torn_down: bool,
}

impl EffectsController {
    pub fn new(config: FxConfig, inventory: PageInventory, seed: u64) -> Self {
        Self {
            config,
            inventory,
            state: AppState::default(),
            rng: StdRng::seed_from_u64(seed),
            now: Duration::ZERO,
            timers: TimerQueue::default(),
            live: FnvHashMap::default(),
            next_node: 0,
            hearts: None,
            stars: None,
            visualizer: None,
            initialized: false,
            torn_down: false,
        }
    }

    // ---------------- Introspection ----------------

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_in_burst(&self, kind: BurstKind) -> usize {
        self.live.values().filter(|n| n.burst == Some(kind)).count()
    }

    pub fn live_of_kind(&self, kind: EffectKind) -> usize {
        self.live.values().filter(|n| n.kind == kind).count()
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    pub fn visualizer_running(&self) -> bool {
        self.visualizer.is_some()
    }

    /// Any repeating timer still scheduled.
    pub fn has_running_intervals(&self) -> bool {
        self.visualizer.is_some() || self.hearts.is_some() || self.stars.is_some()
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ---------------- Lifecycle ----------------

    /// Start ambient spawners and the loading sequence. Runs once.
    pub fn initialize(&mut self, out: &mut Vec<FxCommand>) {
        if self.initialized || self.torn_down {
            return;
        }
        self.initialized = true;
        let missing = self.inventory.missing();
        if !missing.is_empty() {
            log::warn!("[fx] missing page elements, related effects disabled: {missing:?}");
        }
        let features = &self.config.features;
        if features.ambient_hearts {
            self.hearts = Some(Interval::starting_at(
                self.now,
                Duration::from_millis(self.config.heart_interval_ms),
            ));
        }
        if features.ambient_stars {
            self.stars = Some(Interval::starting_at(
                self.now,
                Duration::from_millis(self.config.star_interval_ms),
            ));
        }
        self.after(self.config.loading_ms, Deferred::RevealContent);
        self.run_due(out);
        log::info!("[fx] initialized");
    }

    /// Stop every timer, forget pending work and remove all live nodes.
    pub fn teardown(&mut self, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.visualizer = None;
        self.hearts = None;
        self.stars = None;
        self.timers.clear();
        self.state.is_music_playing = false;
        self.state.end_all_bursts();
        let mut ids: Vec<NodeId> = self.live.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        out.extend(ids.into_iter().map(FxCommand::Remove));
        out.push(FxCommand::DisconnectObservers);
        log::info!("[fx] torn down");
    }

    /// Advance the virtual clock, firing deferred work, expiring nodes, and
    /// running the ambient and visualizer intervals.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        self.now += dt;
        self.run_due(out);

        let now = self.now;
        // At most one roll per loop per tick.
        let heart_fires = self.hearts.as_mut().map_or(0, |iv| iv.fire(now));
        if heart_fires > 0 && self.rng.gen::<f32>() < self.config.heart_chance {
            let spec = effects::floating_heart(&self.config, &mut self.rng);
            self.spawn(Mount::Body, spec, None, now, out);
        }
        let star_fires = self.stars.as_mut().map_or(0, |iv| iv.fire(now));
        if star_fires > 0 && self.rng.gen::<f32>() < self.config.star_chance {
            let spec = effects::floating_star(&self.config, &mut self.rng);
            self.spawn(Mount::Body, spec, None, now, out);
        }
        let bar_fires = self.visualizer.as_mut().map_or(0, |iv| iv.fire(now));
        if bar_fires > 0 {
            let heights = self.random_bar_heights();
            out.push(FxCommand::SetBarHeights(heights));
        }
    }

    // ---------------- Bursts ----------------

    /// Spawn a staggered batch of `kind`. Returns false, changing nothing, when
    /// a batch of the same kind is in flight or its mount is missing.
    pub fn launch_burst(&mut self, kind: BurstKind, out: &mut Vec<FxCommand>) -> bool {
        if self.torn_down {
            return false;
        }
        if self.state.burst_active(kind) {
            log::debug!("[fx] {kind:?} burst already in flight");
            return false;
        }
        let (mount, specs, sweep) = match kind {
            BurstKind::Confetti => {
                let Some(key) = self.inventory.confetti_mount() else {
                    return false;
                };
                let params = self.config.confetti.clone();
                let specs: Vec<_> = (0..params.count)
                    .map(|i| {
                        let spec = effects::confetti_piece(&self.config, &mut self.rng);
                        (params.stagger() * i as u32, spec)
                    })
                    .collect();
                out.push(FxCommand::ClearMount(key));
                (Mount::Element(key), specs, params.sweep())
            }
            BurstKind::Welcome => {
                if !self.inventory.has(ElementKey::HeroSection) {
                    return false;
                }
                let params = self.config.particles.clone();
                let specs: Vec<_> = (0..params.count)
                    .map(|i| {
                        let spec = effects::welcome_particle(&self.config, &mut self.rng);
                        (params.stagger() * i as u32, spec)
                    })
                    .collect();
                (
                    Mount::Element(ElementKey::HeroSection),
                    specs,
                    params.sweep(),
                )
            }
            BurstKind::SoundWave => {
                let stagger = Duration::from_millis(SOUND_WAVE_RING_STAGGER_MS);
                let specs: Vec<_> = (0..=SOUND_WAVE_RINGS)
                    .map(|ring| (stagger * ring as u32, effects::sound_wave_ring(ring)))
                    .collect();
                (Mount::Body, specs, Duration::ZERO)
            }
        };
        self.state.begin_burst(kind);

        // Never sweep before the last element has finished animating.
        let last_done = specs
            .iter()
            .map(|(delay, spec)| *delay + spec.ttl())
            .max()
            .unwrap_or_default();
        let total = sweep.max(last_done);
        log::debug!(
            "[fx] {kind:?} burst: {} elements over {:?}",
            specs.len(),
            total
        );
        let start = self.now;
        for (delay, spec) in specs {
            self.timers.schedule(
                start + delay,
                Deferred::Spawn {
                    mount,
                    spec,
                    burst: Some(kind),
                },
            );
        }
        self.timers.schedule(start + total, Deferred::EndBurst(kind));
        self.run_due(out);
        true
    }

    pub fn launch_confetti(&mut self, out: &mut Vec<FxCommand>) -> bool {
        let launched = self.launch_burst(BurstKind::Confetti, out);
        if launched {
            self.ripple(Mount::Element(ElementKey::ConfettiButton), out);
        }
        launched
    }

    /// Ripple, confetti, cake, balloons and sound rings, then scroll to the
    /// wishes once the show has started.
    pub fn trigger_main_celebration(&mut self, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        self.ripple(Mount::Element(ElementKey::CelebrateButton), out);
        self.launch_confetti(out);
        self.celebrate_cake(out);
        self.animate_balloons();
        self.launch_burst(BurstKind::SoundWave, out);
        self.after(
            self.config.celebrate_scroll_delay_ms,
            Deferred::ScrollTo("wishes".to_string()),
        );
        self.run_due(out);
    }

    // ---------------- Single effects ----------------

    pub fn ripple(&mut self, mount: Mount, out: &mut Vec<FxCommand>) {
        if self.torn_down || !self.mount_exists(mount) {
            return;
        }
        let now = self.now;
        self.spawn(mount, effects::ripple(), None, now, out);
    }

    pub fn blow_out_candle(&mut self, index: usize, out: &mut Vec<FxCommand>) {
        if self.torn_down || index >= self.inventory.flame_count {
            return;
        }
        out.push(FxCommand::SetFlameLit { index, lit: false });
        if self.config.features.smoke {
            let now = self.now;
            self.spawn(Mount::Body, effects::smoke_puff(index), None, now, out);
        }
        self.after(self.config.candle_relight_ms, Deferred::Relight(index));
    }

    pub fn celebrate_cake(&mut self, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        if self.inventory.has(ElementKey::Cake) {
            out.push(FxCommand::SetCakeAnimation(None));
            self.after(CAKE_BOUNCE_RESTART_MS, Deferred::CakeBounce);
        }
        if self.inventory.flame_count > 0 {
            out.push(FxCommand::SetFlameSpeed {
                secs: FLAME_FAST_SECS,
            });
            self.after(
                CANDLE_FAST_FLICKER_MS,
                Deferred::FlameSpeed(FLAME_NORMAL_SECS),
            );
        }
    }

    fn animate_balloons(&mut self) {
        for index in 0..self.inventory.balloon_count {
            self.after(
                BALLOON_STAGGER_MS * index as u64,
                Deferred::BalloonLift(index),
            );
        }
    }

    fn animate_candles(&mut self) {
        for index in 0..self.inventory.flame_count {
            self.after(
                CANDLE_STAGGER_MS * index as u64,
                Deferred::FlameFlicker(index),
            );
        }
    }

    // ---------------- Audio visual ----------------

    /// Flip the (purely visual) music state. Returns the new state.
    pub fn toggle_ambient_audio(&mut self, out: &mut Vec<FxCommand>) -> bool {
        if self.torn_down {
            return false;
        }
        let playing = !self.state.is_music_playing;
        self.state.is_music_playing = playing;
        if playing {
            if self.config.features.music_visualizer && self.inventory.bar_count > 0 {
                // Replacing the slot drops any previous schedule.
                self.visualizer = Some(Interval::starting_at(
                    self.now,
                    self.config.visualizer_interval(),
                ));
            }
        } else {
            if self.visualizer.take().is_some() {
                log::debug!("[fx] visualizer stopped");
            }
            if self.inventory.bar_count > 0 {
                let heights = self.default_bar_heights();
                out.push(FxCommand::SetBarHeights(heights));
            }
        }
        out.push(FxCommand::SetAudioUi { playing });
        log::info!("[fx] music visual playing={playing}");
        if let Some(key) = self.inventory.audio_ripple_target() {
            self.ripple(Mount::Element(key), out);
        }
        playing
    }

    /// Stop the audio visual if it is running. Returns whether it was.
    pub fn stop_ambient_audio(&mut self, out: &mut Vec<FxCommand>) -> bool {
        if !self.state.is_music_playing {
            return false;
        }
        self.toggle_ambient_audio(out);
        true
    }

    // ---------------- Navigation ----------------

    pub fn scroll_to_section(&mut self, id: &str, out: &mut Vec<FxCommand>) {
        if self.torn_down || !self.inventory.has_section(id) {
            return;
        }
        out.push(FxCommand::ScrollToSection {
            id: id.to_string(),
            navbar_offset_px: self.config.navbar_offset_px,
        });
    }

    /// Called when section `id` crosses the visibility threshold.
    pub fn update_active_section(&mut self, id: &str, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        self.state.active_section = id.to_string();
        out.push(FxCommand::SetActiveNav(nav::active_flags(
            &self.inventory.nav_hrefs,
            id,
        )));
    }

    /// Work for one throttled scroll frame.
    pub fn on_scroll_frame(&mut self, scroll_y: f64, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        let scrolled = nav::is_scrolled(scroll_y, self.config.scrolled_threshold_px);
        if scrolled != self.state.nav_scrolled {
            self.state.nav_scrolled = scrolled;
            if self.inventory.has(ElementKey::Navbar) {
                out.push(FxCommand::SetNavScrolled(scrolled));
            }
        }
        if self.config.features.parallax {
            out.push(FxCommand::Parallax { scroll_y });
        }
    }

    pub fn toggle_mobile_menu(&mut self, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        if self.inventory.has(ElementKey::NavMenu) || self.inventory.has(ElementKey::MobileToggle) {
            out.push(FxCommand::ToggleMobileMenu);
        }
    }

    // ---------------- Browser signals ----------------

    pub fn handle_key(&mut self, action: KeyAction, out: &mut Vec<FxCommand>) {
        match action {
            KeyAction::Celebrate => self.trigger_main_celebration(out),
            KeyAction::Confetti => {
                self.launch_confetti(out);
            }
            KeyAction::ToggleAudio => {
                self.toggle_ambient_audio(out);
            }
            KeyAction::StopAudio => {
                self.stop_ambient_audio(out);
            }
            KeyAction::ScrollBy(dy) => {
                if !self.torn_down {
                    out.push(FxCommand::ScrollBy(dy));
                }
            }
        }
    }

    /// Debounced resize: floating decorations are positioned for the old
    /// viewport, so drop them.
    pub fn on_resize_settled(&mut self, out: &mut Vec<FxCommand>) {
        if self.torn_down {
            return;
        }
        let mut ids: Vec<NodeId> = self
            .live
            .iter()
            .filter(|(_, n)| n.kind.is_floating())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in ids {
            self.live.remove(&id);
            out.push(FxCommand::Remove(id));
        }
    }

    pub fn on_visibility_hidden(&mut self, out: &mut Vec<FxCommand>) {
        self.stop_ambient_audio(out);
    }

    // ---------------- Internals ----------------

    fn mount_exists(&self, mount: Mount) -> bool {
        match mount {
            Mount::Body => true,
            Mount::Element(key) => self.inventory.has(key),
            Mount::CelebrationCard(i) => i < self.inventory.celebration_card_count,
        }
    }

    fn after(&mut self, delay_ms: u64, item: Deferred) {
        self.timers
            .schedule(self.now + Duration::from_millis(delay_ms), item);
    }

    /// Attach a node; it expires `ttl` after its scheduled start.
    fn spawn(
        &mut self,
        mount: Mount,
        spec: VisualSpec,
        burst: Option<BurstKind>,
        scheduled_at: Duration,
        out: &mut Vec<FxCommand>,
    ) {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.live.insert(
            id,
            LiveNode {
                kind: spec.kind,
                expires_at: scheduled_at + spec.ttl(),
                burst,
            },
        );
        out.push(FxCommand::Spawn { id, mount, spec });
    }

    fn expire(&mut self, out: &mut Vec<FxCommand>) {
        let now = self.now;
        let mut ids: Vec<NodeId> = self
            .live
            .iter()
            .filter(|(_, n)| n.expires_at <= now)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        for id in ids {
            self.live.remove(&id);
            out.push(FxCommand::Remove(id));
        }
    }

    fn run_due(&mut self, out: &mut Vec<FxCommand>) {
        while let Some((at, item)) = self.timers.pop_due(self.now) {
            self.fire(at, item, out);
        }
        self.expire(out);
    }

    fn fire(&mut self, at: Duration, item: Deferred, out: &mut Vec<FxCommand>) {
        match item {
            Deferred::Spawn { mount, spec, burst } => {
                self.spawn(mount, spec, burst, at, out);
            }
            Deferred::EndBurst(kind) => {
                let mut stragglers: Vec<NodeId> = self
                    .live
                    .iter()
                    .filter(|(_, n)| n.burst == Some(kind))
                    .map(|(id, _)| *id)
                    .collect();
                stragglers.sort_unstable();
                for id in stragglers {
                    self.live.remove(&id);
                    out.push(FxCommand::Remove(id));
                }
                if kind == BurstKind::Confetti {
                    if let Some(key) = self.inventory.confetti_mount() {
                        out.push(FxCommand::ClearMount(key));
                    }
                }
                self.state.end_burst(kind);
                log::debug!("[fx] {kind:?} burst finished");
            }
            Deferred::RevealContent => {
                if self.inventory.has(ElementKey::LoadingScreen) {
                    out.push(FxCommand::HideLoadingScreen);
                }
                self.state.is_loaded = true;
                log::info!("[fx] content revealed");
                self.after(self.config.entrance_delay_ms, Deferred::Entrance);
            }
            Deferred::Entrance => {
                self.animate_candles();
                self.animate_balloons();
                self.launch_burst(BurstKind::Welcome, out);
            }
            Deferred::CakeBounce => {
                out.push(FxCommand::SetCakeAnimation(Some(CAKE_BOUNCE)));
            }
            Deferred::FlameSpeed(secs) => {
                out.push(FxCommand::SetFlameSpeed { secs });
            }
            Deferred::FlameFlicker(index) => {
                let delay_secs = self.rng.gen::<f32>() * 0.4;
                let duration_secs = 0.4 + self.rng.gen::<f32>() * 0.3;
                out.push(FxCommand::FlameFlicker {
                    index,
                    delay_secs,
                    duration_secs,
                });
            }
            Deferred::BalloonLift(index) => {
                out.push(FxCommand::SetBalloonLifted {
                    index,
                    lifted: true,
                });
                self.after(
                    BALLOON_HOLD_MS,
                    Deferred::BalloonRest(index),
                );
            }
            Deferred::BalloonRest(index) => {
                out.push(FxCommand::SetBalloonLifted {
                    index,
                    lifted: false,
                });
            }
            Deferred::Relight(index) => {
                out.push(FxCommand::SetFlameLit { index, lit: true });
            }
            Deferred::ScrollTo(id) => self.scroll_to_section(&id, out),
        }
    }

    fn random_bar_heights(&mut self) -> BarHeights {
        let (min, span) = (self.config.bar_min_px, self.config.bar_span_px);
        (0..self.inventory.bar_count)
            .map(|_| min + self.rng.gen::<f32>() * span)
            .collect()
    }

    fn default_bar_heights(&self) -> BarHeights {
        smallvec::smallvec![self.config.bar_default_px; self.inventory.bar_count]
    }
}
