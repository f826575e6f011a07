//! Interaction state blender: picks the parameter set the uniforms mirror.

use crate::store::{ParameterSet, ParameterStore};
use crate::uniforms::UniformSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering,
}

/// State change caused by one frame's hit flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Entered,
    Exited,
}

/// Two-state machine with an immediate snap between sets
#[derive(Debug, Clone, Default)]
pub struct InteractionBlender {
    state: InteractionState,
}

impl InteractionBlender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Recompute the state from this frame's hit flag
    pub fn update(&mut self, hit: bool) -> Transition {
        let next = if hit {
            InteractionState::Hovering
        } else {
            InteractionState::Idle
        };
        let transition = match (self.state, next) {
            (InteractionState::Idle, InteractionState::Hovering) => Transition::Entered,
            (InteractionState::Hovering, InteractionState::Idle) => Transition::Exited,
            _ => Transition::None,
        };
        self.state = next;
        transition
    }

    /// Active wave set for the current state
    pub fn select<'a>(&self, store: &'a ParameterStore) -> (&'a ParameterSet, UniformSource) {
        match self.state {
            InteractionState::Idle => (store.live(), UniformSource::Live),
            InteractionState::Hovering => (store.hover_override(), UniformSource::HoverOverride),
        }
    }
}
