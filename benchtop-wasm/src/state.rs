use std::cell::RefCell;
use std::rc::Rc;

use benchtop_core::{Catalog, FeatureStore, LoadTracker, PointerHandler};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
///
/// The store's observer holds its own DOM handles and never borrows this
/// state, so mutating `store` while `State` is borrowed is safe.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub store: FeatureStore,
    pub pointer: PointerHandler,
    pub catalog: Option<Catalog>,
    pub loads: LoadTracker,
    /// Set once a drag moved something, so the trailing click is ignored.
    pub dragged: bool,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

/// Run `f` against the installed state, if any.
pub fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> Option<R> {
    STATE.with(|st| {
        let st = st.borrow().as_ref().cloned()?;
        let mut s = st.borrow_mut();
        Some(f(&mut s))
    })
}
