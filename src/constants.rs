// Markup-facing names and inline style values used by the web layer.

// Data attribute carrying the controller's node id on spawned effects
pub const FX_ID_ATTR: &str = "data-fx-id";

// Optional JSON config override embedded in the page
pub const CONFIG_SCRIPT_ID: &str = "fx-config";

// Balloon lift
pub const BALLOON_TRANSITION: &str = "all 0.8s cubic-bezier(0.4, 0, 0.2, 1)";
pub const BALLOON_LIFT_TRANSFORM: &str = "translateY(-25px) scale(1.1)";

// Scroll-reveal for cards
pub const REVEAL_TRANSITION: &str = "all 0.6s cubic-bezier(0.4, 0, 0.2, 1)";
pub const REVEAL_HIDDEN_TRANSFORM: &str = "translateY(30px)";
pub const REVEAL_SHOWN_TRANSFORM: &str = "translateY(0)";

// Wish card hover
pub const CARD_HOVER_TRANSFORM: &str = "translateY(-10px) scale(1.02)";

// IntersectionObserver options
pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";
