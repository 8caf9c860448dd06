//! Glue between the synchronizer and the Yew component tree.

use crate::host::{GlooTimer, TauriHost};
use input_portal_ui::reveal::{self, Section, SectionVisibility};
use input_portal_ui::{ConfigSynchronizer, Configuration, Presentation, Reflect};
use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

pub type PanelSync = ConfigSynchronizer<TauriHost, ShellBridge, GlooTimer>;

/// Shared synchronizer, compared by identity so it can travel in props.
#[derive(Clone)]
pub struct SyncHandle(pub Rc<PanelSync>);

impl PartialEq for SyncHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SyncHandle {
    type Target = PanelSync;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Everything the panel renders that is not owned by a single control.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub config: Option<Configuration>,
    /// Inputs start locked and stay so until the first load completes.
    pub locked: bool,
    pub sections: SectionVisibility,
    pub failure: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            config: None,
            locked: true,
            sections: SectionVisibility::default(),
            failure: None,
        }
    }
}

pub enum PanelAction {
    Lock(bool),
    Reflect(Configuration),
    Section(Section, bool),
    Failed(String),
}

impl Reducible for PanelState {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PanelAction::Lock(locked) => next.locked = locked,
            PanelAction::Reflect(config) => next.config = Some(config),
            PanelAction::Section(section, visible) => next.sections.set(section, visible),
            PanelAction::Failed(message) => next.failure = Some(message),
        }
        next.into()
    }
}

/// `Presentation` implementation that feeds the panel reducer.
pub struct ShellBridge {
    dispatch: UseReducerDispatcher<PanelState>,
    reveal_generation: Rc<Cell<u64>>,
}

impl ShellBridge {
    pub fn new(dispatch: UseReducerDispatcher<PanelState>) -> Self {
        Self {
            dispatch,
            reveal_generation: Rc::new(Cell::new(0)),
        }
    }
}

impl Presentation for ShellBridge {
    fn disable_all(&self) {
        self.dispatch.dispatch(PanelAction::Lock(true));
    }

    fn enable_all(&self) {
        self.dispatch.dispatch(PanelAction::Lock(false));
    }

    fn reflect(&self, committed: &Configuration, cause: Reflect) {
        self.dispatch.dispatch(PanelAction::Reflect(committed.clone()));

        let steps = reveal::plan(committed, cause);
        if steps.is_empty() {
            return;
        }
        // a newer reveal supersedes whatever is still staggering
        let generation = self.reveal_generation.get().wrapping_add(1);
        self.reveal_generation.set(generation);
        let current = self.reveal_generation.clone();
        let dispatch = self.dispatch.clone();
        wasm_bindgen_futures::spawn_local(async move {
            reveal::play(&steps, &GlooTimer, |section, visible| {
                if current.get() == generation {
                    dispatch.dispatch(PanelAction::Section(section, visible));
                }
            })
            .await;
        });
    }
}
