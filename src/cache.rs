//! Element cache: every handle the page needs, resolved once at start-up.

use crate::dom;
use fete_core::inventory::selectors;
use fete_core::{ElementKey, Lookup, PageInventory};
use fnv::FnvHashMap;
use web_sys as web;

pub struct ElementCache {
    keyed: FnvHashMap<ElementKey, web::Element>,
    pub body: Option<web::HtmlElement>,
    pub nav_links: Vec<web::Element>,
    pub sections: Vec<web::Element>,
    pub wish_cards: Vec<web::Element>,
    pub celebration_cards: Vec<web::Element>,
    pub memory_items: Vec<web::Element>,
    pub balloons: Vec<web::Element>,
    pub flames: Vec<web::Element>,
    pub bars: Vec<web::Element>,
}

impl ElementCache {
    pub fn resolve(document: &web::Document) -> Self {
        let keyed = ElementKey::ALL
            .iter()
            .filter_map(|&key| {
                let found = match key.lookup() {
                    Lookup::Id(id) => document.get_element_by_id(id),
                    Lookup::Selector(sel) => document.query_selector(sel).ok().flatten(),
                };
                found.map(|el| (key, el))
            })
            .collect();
        Self {
            keyed,
            body: document.body(),
            nav_links: dom::query_all(document, selectors::NAV_LINKS),
            sections: dom::query_all(document, selectors::SECTIONS),
            wish_cards: dom::query_all(document, selectors::WISH_CARDS),
            celebration_cards: dom::query_all(document, selectors::CELEBRATION_CARDS),
            memory_items: dom::query_all(document, selectors::MEMORY_ITEMS),
            balloons: dom::query_all(document, selectors::BALLOONS),
            flames: dom::query_all(document, selectors::FLAMES),
            bars: dom::query_all(document, selectors::EQUALIZER_BARS),
        }
    }

    #[inline]
    pub fn get(&self, key: ElementKey) -> Option<&web::Element> {
        self.keyed.get(&key)
    }

    /// Summary handed to the controller so it can skip absent features.
    pub fn inventory(&self) -> PageInventory {
        let mut inv = PageInventory::new(self.keyed.keys().copied());
        inv.nav_hrefs = self
            .nav_links
            .iter()
            .map(|a| a.get_attribute("href").unwrap_or_default())
            .collect();
        inv.section_ids = self.sections.iter().map(|s| s.id()).collect();
        inv.bar_count = self.bars.len();
        inv.balloon_count = self.balloons.len();
        inv.flame_count = self.flames.len();
        inv.celebration_card_count = self.celebration_cards.len();
        inv
    }
}
