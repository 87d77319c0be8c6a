//! Application state owned by the controller.

use fnv::FnvHashSet;

/// Batches of elements spawned and swept together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BurstKind {
    Confetti,
    Welcome,
    SoundWave,
}

/// Only the controller writes this; it resets with the page.
#[derive(Clone, Debug)]
pub struct AppState {
    pub is_loaded: bool,
    pub is_music_playing: bool,
    pub active_section: String,
    pub nav_scrolled: bool,
    active_bursts: FnvHashSet<BurstKind>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            is_loaded: false,
            is_music_playing: false,
            active_section: "home".to_string(),
            nav_scrolled: false,
            active_bursts: FnvHashSet::default(),
        }
    }
}

impl AppState {
    #[inline]
    pub fn confetti_active(&self) -> bool {
        self.burst_active(BurstKind::Confetti)
    }

    #[inline]
    pub fn burst_active(&self, kind: BurstKind) -> bool {
        self.active_bursts.contains(&kind)
    }

    /// Single-flight guard: returns false if `kind` is already in flight.
    pub(crate) fn begin_burst(&mut self, kind: BurstKind) -> bool {
        self.active_bursts.insert(kind)
    }

    pub(crate) fn end_burst(&mut self, kind: BurstKind) {
        self.active_bursts.remove(&kind);
    }

    pub(crate) fn end_all_bursts(&mut self) {
        self.active_bursts.clear();
    }
}
