//! Routes the active stage to its collaborator and applies the actions it
//! hands back.

use serde::{Deserialize, Serialize};

use super::error::{Callback, WizardError};
use super::record::StepData;
use super::stage::Stage;
use super::state::{Transition, WizardState};

/// Capabilities handed to the collaborator of one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageContract<'a> {
    pub stage: Stage,
    /// Continue with a submission (every stage except status)
    pub on_next: bool,
    /// Go back one stage (every stage except the entry stage)
    pub on_back: bool,
    /// Accumulated record, only given to the status stage
    pub record: Option<&'a StepData>,
}

impl<'a> StageContract<'a> {
    pub fn for_stage(stage: Stage, record: &'a StepData) -> Self {
        Self {
            stage,
            on_next: !stage.is_terminal(),
            on_back: !stage.is_initial(),
            record: stage.is_terminal().then_some(record),
        }
    }

    pub fn offers(&self, callback: Callback) -> bool {
        match callback {
            Callback::Next => self.on_next,
            Callback::Back => self.on_back,
        }
    }
}

/// What a collaborator asks for after handling user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageAction {
    Next(StepData),
    Back,
}

impl StageAction {
    pub fn callback(&self) -> Callback {
        match self {
            StageAction::Next(_) => Callback::Next,
            StageAction::Back => Callback::Back,
        }
    }
}

/// One collaborator per stage, looked up by stage
#[derive(Debug, Clone)]
pub struct StageRegistry<V> {
    slots: [V; Stage::COUNT],
}

impl<V> StageRegistry<V> {
    pub fn from_fn(mut build: impl FnMut(Stage) -> V) -> Self {
        let stages = Stage::all();
        Self {
            slots: std::array::from_fn(|i| build(stages[i])),
        }
    }

    pub fn get_mut(&mut self, stage: Stage) -> &mut V {
        &mut self.slots[stage.slot()]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Stage, &mut V)> {
        Stage::all().iter().copied().zip(self.slots.iter_mut())
    }
}

/// Owns one session and its stage collaborators
#[derive(Debug, Clone)]
pub struct Dispatcher<V> {
    state: WizardState,
    registry: StageRegistry<V>,
}

impl Dispatcher<()> {
    /// Dispatcher with no collaborators, driven directly through
    /// [`Dispatcher::dispatch`]
    pub fn headless() -> Self {
        Self::new(StageRegistry::from_fn(|_| ()))
    }
}

impl<V> Dispatcher<V> {
    pub fn new(registry: StageRegistry<V>) -> Self {
        Self {
            state: WizardState::new(),
            registry,
        }
    }

    pub fn current(&self) -> Stage {
        self.state.current()
    }

    pub fn record(&self) -> &StepData {
        self.state.record()
    }

    pub fn contract(&self) -> StageContract<'_> {
        StageContract::for_stage(self.state.current(), self.state.record())
    }

    /// The active collaborator together with the contract it is given
    pub fn active(&mut self) -> (&mut V, StageContract<'_>) {
        let stage = self.state.current();
        let contract = StageContract::for_stage(stage, self.state.record());
        (self.registry.get_mut(stage), contract)
    }

    pub fn registry_mut(&mut self) -> &mut StageRegistry<V> {
        &mut self.registry
    }

    /// Apply an action from the active collaborator.
    ///
    /// Actions the current stage was not offered are rejected and leave the
    /// session untouched.
    pub fn dispatch(&mut self, action: StageAction) -> Result<Transition, WizardError> {
        let stage = self.state.current();
        let callback = action.callback();

        if !self.contract().offers(callback) {
            tracing::warn!(stage = stage.index(), %callback, "rejected stage action");
            return Err(WizardError::CallbackNotOffered { stage, callback });
        }

        match action {
            StageAction::Next(submission) => self.state.advance_with(submission),
            StageAction::Back => self.state.retreat_one(),
        }
    }

    /// Drop the session and start again at the entry stage
    pub fn reset(&mut self) {
        tracing::info!("wizard session reset");
        self.state.reset();
    }
}
