use crate::stage::Stage;
use fete_core::{EffectsController, FxCommand};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller plus the document it drives. Owned by the bootstrap and shared
/// with the listeners it installs.
pub struct App {
    pub controller: EffectsController,
    pub stage: Stage,
}

pub type SharedApp = Rc<RefCell<App>>;

/// Run one controller operation and apply what it produced.
pub fn dispatch<R>(
    app: &SharedApp,
    op: impl FnOnce(&mut EffectsController, &mut Vec<FxCommand>) -> R,
) -> R {
    let mut guard = app.borrow_mut();
    let App { controller, stage } = &mut *guard;
    let mut out = Vec::new();
    let result = op(controller, &mut out);
    stage.apply(out);
    result
}
