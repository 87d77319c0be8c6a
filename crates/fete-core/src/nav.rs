//! Scroll and navigation helpers.

/// The navbar switches to its compact look strictly above the threshold.
#[inline]
pub fn is_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

/// Top position to scroll to so a section clears the fixed navbar.
#[inline]
pub fn scroll_target(offset_top: f64, navbar_offset_px: f64) -> f64 {
    (offset_top - navbar_offset_px).max(0.0)
}

/// `#wishes` -> `wishes`. Anything that is not an in-page fragment is ignored.
#[inline]
pub fn section_id_from_href(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// One flag per nav link: set exactly for links whose href targets `id`.
pub fn active_flags<S: AsRef<str>>(hrefs: &[S], id: &str) -> Vec<bool> {
    hrefs
        .iter()
        .map(|h| section_id_from_href(h.as_ref()) == Some(id))
        .collect()
}

/// Vertical parallax shift for item `index` of a layer with `(base, step)` speed.
#[inline]
pub fn parallax_offset(scroll_y: f64, layer: (f64, f64), index: usize) -> f64 {
    let (base, step) = layer;
    scroll_y * (base + index as f64 * step)
}

/// Coalesces scroll events so work runs at most once per rendered frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollThrottle {
    ticking: bool,
    latest_y: f64,
}

impl ScrollThrottle {
    /// Record a scroll position. Returns true when the caller must request a
    /// frame; false when one is already pending.
    pub fn note(&mut self, scroll_y: f64) -> bool {
        self.latest_y = scroll_y;
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Called from the frame callback: yields the latest position once.
    pub fn take(&mut self) -> Option<f64> {
        if !self.ticking {
            return None;
        }
        self.ticking = false;
        Some(self.latest_y)
    }
}
