pub mod config;
pub mod constants;
pub mod controller;
pub mod effects;
pub mod inventory;
pub mod keys;
pub mod nav;
pub mod state;
pub mod timers;

pub use config::*;
pub use controller::*;
pub use effects::{EffectKind, Placement, VisualSpec};
pub use inventory::*;
pub use keys::*;
pub use state::*;
