/// Modifier and focus context of a keydown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub ctrl: bool,
    pub meta: bool,
    /// The event target is the page body rather than a control or input.
    pub target_is_body: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Celebrate,
    Confetti,
    ToggleAudio,
    StopAudio,
    ScrollBy(f64),
}

impl KeyAction {
    /// Whether the browser default for the key must be suppressed.
    #[inline]
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyAction::Celebrate | KeyAction::ScrollBy(_))
    }
}

#[inline]
pub fn action_for_key(key: &str, ctx: KeyContext, scroll_step_px: f64) -> Option<KeyAction> {
    match key {
        " " if ctx.target_is_body => Some(KeyAction::Celebrate),
        // leave Ctrl+C / Cmd+C to the clipboard
        "c" | "C" if !(ctx.ctrl || ctx.meta) => Some(KeyAction::Confetti),
        "m" | "M" => Some(KeyAction::ToggleAudio),
        "Escape" => Some(KeyAction::StopAudio),
        "ArrowUp" => Some(KeyAction::ScrollBy(-scroll_step_px)),
        "ArrowDown" => Some(KeyAction::ScrollBy(scroll_step_px)),
        _ => None,
    }
}
