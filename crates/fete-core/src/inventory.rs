//! Logical names for the page elements the controller drives.
//!
//! The web layer resolves each key once at start-up and hands the controller a
//! `PageInventory` describing what was found. Features whose elements are
//! missing are skipped; the missing list is reported once instead of being
//! discovered silently on every event.

use fnv::FnvHashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKey {
    LoadingScreen,
    Navbar,
    NavMenu,
    MobileToggle,
    CelebrateButton,
    WishesButton,
    ConfettiButton,
    MusicButton,
    PlayButton,
    ConfettiBurst,
    ConfettiArea,
    MusicPlayer,
    Equalizer,
    HeroSection,
    Cake,
}

/// How a key is looked up in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Id(&'static str),
    Selector(&'static str),
}

impl ElementKey {
    pub const ALL: [ElementKey; 15] = [
        ElementKey::LoadingScreen,
        ElementKey::Navbar,
        ElementKey::NavMenu,
        ElementKey::MobileToggle,
        ElementKey::CelebrateButton,
        ElementKey::WishesButton,
        ElementKey::ConfettiButton,
        ElementKey::MusicButton,
        ElementKey::PlayButton,
        ElementKey::ConfettiBurst,
        ElementKey::ConfettiArea,
        ElementKey::MusicPlayer,
        ElementKey::Equalizer,
        ElementKey::HeroSection,
        ElementKey::Cake,
    ];

    pub fn lookup(self) -> Lookup {
        match self {
            ElementKey::LoadingScreen => Lookup::Id("loadingScreen"),
            ElementKey::Navbar => Lookup::Id("navbar"),
            ElementKey::NavMenu => Lookup::Selector(".nav-menu"),
            ElementKey::MobileToggle => Lookup::Id("mobileToggle"),
            ElementKey::CelebrateButton => Lookup::Id("celebrateBtn"),
            ElementKey::WishesButton => Lookup::Id("wishesBtn"),
            ElementKey::ConfettiButton => Lookup::Id("confettiBtn"),
            ElementKey::MusicButton => Lookup::Id("musicBtn"),
            ElementKey::PlayButton => Lookup::Id("playButton"),
            ElementKey::ConfettiBurst => Lookup::Id("confettiBurst"),
            ElementKey::ConfettiArea => Lookup::Id("confettiArea"),
            ElementKey::MusicPlayer => Lookup::Id("musicPlayer"),
            ElementKey::Equalizer => Lookup::Selector(".equalizer"),
            ElementKey::HeroSection => Lookup::Selector(".hero-section"),
            ElementKey::Cake => Lookup::Selector(".cake"),
        }
    }
}

/// Element groups resolved with `querySelectorAll`.
pub mod selectors {
    pub const NAV_LINKS: &str = ".nav-link";
    pub const SECTIONS: &str = "section[id]";
    pub const WISH_CARDS: &str = ".wish-card";
    pub const CELEBRATION_CARDS: &str = ".celebration-card";
    pub const MEMORY_ITEMS: &str = ".memory-item";
    pub const BALLOONS: &str = ".balloon";
    pub const FLAMES: &str = ".flame";
    pub const EQUALIZER_BARS: &str = ".equalizer .bar";
    pub const HEARTS: &str = ".heart";
    pub const STARS: &str = ".star";
}

/// What the element cache found on the page.
#[derive(Clone, Debug, Default)]
pub struct PageInventory {
    present: FnvHashSet<ElementKey>,
    /// `href` of every `.nav-link`, in document order.
    pub nav_hrefs: Vec<String>,
    /// Ids of every observed `section[id]`.
    pub section_ids: Vec<String>,
    pub bar_count: usize,
    pub balloon_count: usize,
    pub flame_count: usize,
    pub celebration_card_count: usize,
}

impl PageInventory {
    pub fn new(present: impl IntoIterator<Item = ElementKey>) -> Self {
        Self {
            present: present.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Inventory of a page where every keyed element exists.
    pub fn complete() -> Self {
        Self::new(ElementKey::ALL)
    }

    #[inline]
    pub fn has(&self, key: ElementKey) -> bool {
        self.present.contains(&key)
    }

    /// Keys that were expected but not found, in declaration order.
    pub fn missing(&self) -> Vec<ElementKey> {
        ElementKey::ALL
            .iter()
            .copied()
            .filter(|k| !self.present.contains(k))
            .collect()
    }

    #[inline]
    pub fn has_section(&self, id: &str) -> bool {
        self.section_ids.iter().any(|s| s == id)
    }

    /// Confetti goes into the dedicated burst layer, falling back to the area.
    pub fn confetti_mount(&self) -> Option<ElementKey> {
        [ElementKey::ConfettiBurst, ElementKey::ConfettiArea]
            .into_iter()
            .find(|k| self.has(*k))
    }

    /// Ripple target for the audio toggle.
    pub fn audio_ripple_target(&self) -> Option<ElementKey> {
        [ElementKey::MusicButton, ElementKey::PlayButton]
            .into_iter()
            .find(|k| self.has(*k))
    }
}
