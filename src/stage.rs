//! Applies controller commands to the document.

use crate::cache::ElementCache;
use crate::constants::*;
use crate::dom;
use crate::overlay;
use fete_core::constants::{PARALLAX_BALLOONS, PARALLAX_HEARTS, PARALLAX_STARS};
use fete_core::inventory::selectors;
use fete_core::nav;
use fete_core::{EffectKind, ElementKey, FxCommand, Mount, NodeId, Placement, VisualSpec};
use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Stage {
    document: web::Document,
    cache: ElementCache,
    nodes: FnvHashMap<NodeId, web::Element>,
    observers: Vec<web::IntersectionObserver>,
}

impl Stage {
    pub fn new(document: web::Document, cache: ElementCache) -> Self {
        Self {
            document,
            cache,
            nodes: FnvHashMap::default(),
            observers: Vec::new(),
        }
    }

    #[inline]
    pub fn cache(&self) -> &ElementCache {
        &self.cache
    }

    pub fn keep_observer(&mut self, observer: web::IntersectionObserver) {
        self.observers.push(observer);
    }

    pub fn apply(&mut self, commands: Vec<FxCommand>) {
        for cmd in commands {
            self.apply_one(cmd);
        }
    }

    fn apply_one(&mut self, cmd: FxCommand) {
        match cmd {
            FxCommand::Spawn { id, mount, spec } => self.spawn(id, mount, &spec),
            FxCommand::Remove(id) => {
                if let Some(el) = self.nodes.remove(&id) {
                    el.remove();
                }
            }
            FxCommand::ClearMount(key) => {
                if let Some(el) = self.cache.get(key) {
                    el.set_inner_html("");
                }
            }
            FxCommand::HideLoadingScreen => {
                overlay::hide_loading(
                    self.cache.get(ElementKey::LoadingScreen),
                    self.cache.body.as_ref(),
                );
            }
            FxCommand::SetAudioUi { playing } => {
                overlay::set_audio_labels(
                    self.cache.get(ElementKey::MusicButton),
                    self.cache.get(ElementKey::PlayButton),
                    playing,
                );
                if let Some(eq) = self.cache.get(ElementKey::Equalizer) {
                    _ = eq.class_list().toggle_with_force("active", playing);
                }
            }
            FxCommand::SetBarHeights(heights) => {
                for (bar, h) in self.cache.bars.iter().zip(heights.iter()) {
                    dom::set_style(bar, "height", &format!("{h:.0}px"));
                }
            }
            FxCommand::SetNavScrolled(scrolled) => {
                if let Some(nav) = self.cache.get(ElementKey::Navbar) {
                    _ = nav.class_list().toggle_with_force("scrolled", scrolled);
                }
            }
            FxCommand::SetActiveNav(flags) => {
                for (link, active) in self.cache.nav_links.iter().zip(flags) {
                    _ = link.class_list().toggle_with_force("active", active);
                }
            }
            FxCommand::ScrollToSection {
                id,
                navbar_offset_px,
            } => self.scroll_to_section(&id, navbar_offset_px),
            FxCommand::ScrollBy(dy) => {
                if let Some(w) = web::window() {
                    w.scroll_by_with_x_and_y(0.0, dy);
                }
            }
            FxCommand::SetCakeAnimation(animation) => {
                if let Some(cake) = self.cache.get(ElementKey::Cake) {
                    dom::set_style(cake, "animation", animation.unwrap_or("none"));
                }
            }
            FxCommand::SetFlameSpeed { secs } => {
                let value = format!("{secs}s");
                for flame in &self.cache.flames {
                    dom::set_style(flame, "animation-duration", &value);
                }
            }
            FxCommand::FlameFlicker {
                index,
                delay_secs,
                duration_secs,
            } => {
                if let Some(flame) = self.cache.flames.get(index) {
                    dom::set_style(flame, "animation-delay", &format!("{delay_secs:.2}s"));
                    dom::set_style(flame, "animation-duration", &format!("{duration_secs:.2}s"));
                }
            }
            FxCommand::SetFlameLit { index, lit } => {
                if let Some(flame) = self.cache.flames.get(index) {
                    let (opacity, scale) = if lit { ("1", 1) } else { ("0", 0) };
                    dom::set_style(flame, "opacity", opacity);
                    dom::set_style(
                        flame,
                        "transform",
                        &format!("translateX(-50%) scale({scale})"),
                    );
                }
            }
            FxCommand::SetBalloonLifted { index, lifted } => {
                if let Some(balloon) = self.cache.balloons.get(index) {
                    if lifted {
                        dom::set_style(balloon, "transition", BALLOON_TRANSITION);
                        dom::set_style(balloon, "transform", BALLOON_LIFT_TRANSFORM);
                    } else {
                        dom::set_style(balloon, "transform", "");
                    }
                }
            }
            FxCommand::ToggleMobileMenu => {
                if let Some(menu) = self.cache.get(ElementKey::NavMenu) {
                    _ = menu.class_list().toggle("mobile-active");
                }
                if let Some(toggle) = self.cache.get(ElementKey::MobileToggle) {
                    _ = toggle.class_list().toggle("active");
                }
            }
            FxCommand::Parallax { scroll_y } => self.parallax(scroll_y),
            FxCommand::DisconnectObservers => {
                for observer in self.observers.drain(..) {
                    observer.disconnect();
                }
            }
        }
    }

    fn mount_element(&self, mount: Mount) -> Option<web::Element> {
        match mount {
            Mount::Body => self.cache.body.clone().map(Into::into),
            Mount::Element(key) => self.cache.get(key).cloned(),
            Mount::CelebrationCard(i) => self.cache.celebration_cards.get(i).cloned(),
        }
    }

    fn spawn(&mut self, id: NodeId, mount: Mount, spec: &VisualSpec) {
        let Some(parent) = self.mount_element(mount) else {
            return;
        };
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        let anchor = match spec.placement {
            Placement::AboveFlame { index } => self.cache.flames.get(index).map(|flame| {
                let rect = flame.get_bounding_client_rect();
                (rect.left() + rect.width() / 2.0, rect.top())
            }),
            _ => None,
        };
        el.set_class_name(spec.kind.class_name());
        _ = el.set_attribute("style", &spec.css_text(anchor));
        _ = el.set_attribute(FX_ID_ATTR, &id.0.to_string());
        if let Some(html) = spec.inner_html() {
            el.set_inner_html(&html);
        }
        if spec.kind == EffectKind::Ripple {
            dom::set_style(&parent, "position", "relative");
            dom::set_style(&parent, "overflow", "hidden");
        }
        if parent.append_child(&el).is_ok() {
            self.nodes.insert(id, el);
        }
    }

    fn scroll_to_section(&self, id: &str, navbar_offset_px: f64) {
        let Some(target) = self.document.get_element_by_id(id) else {
            return;
        };
        let offset_top = target
            .dyn_ref::<web::HtmlElement>()
            .map(|h| h.offset_top() as f64)
            .unwrap_or(0.0);
        if let Some(w) = web::window() {
            let opts = web::ScrollToOptions::new();
            opts.set_top(nav::scroll_target(offset_top, navbar_offset_px));
            opts.set_behavior(web::ScrollBehavior::Smooth);
            w.scroll_to_with_scroll_to_options(&opts);
        }
    }

    fn parallax(&self, scroll_y: f64) {
        let hearts = dom::query_all(&self.document, selectors::HEARTS);
        let stars = dom::query_all(&self.document, selectors::STARS);
        let layers = [
            (&self.cache.balloons, PARALLAX_BALLOONS),
            (&hearts, PARALLAX_HEARTS),
            (&stars, PARALLAX_STARS),
        ];
        for (elements, speed) in layers {
            for (i, el) in elements.iter().enumerate() {
                let y = nav::parallax_offset(scroll_y, speed, i);
                dom::set_style(el, "translate", &format!("0 {y:.1}px"));
            }
        }
    }
}
