use tabula_core::Move;

use crate::{ActionSpec, CompiledMdp, MdpError, MdpSpec, OutcomeSpec, StateSpec};

/// Incremental construction of an `MdpSpec` from code.
#[derive(Debug, Clone, Default)]
pub struct MdpBuilder {
    start: Option<String>,
    states: Vec<StateSpec>,
}

impl MdpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, state: impl Into<String>) -> &mut Self {
        self.start = Some(state.into());
        self
    }

    pub fn state(&mut self, id: impl Into<String>, terminal: bool) -> &mut Self {
        self.states.push(StateSpec {
            id: id.into(),
            terminal,
            actions: Vec::new(),
        });
        self
    }

    /// Declare `action` on `state`; call order is the tie-break order.
    pub fn action(&mut self, state: &str, action: Move) -> Result<&mut Self, MdpError> {
        self.find_state(state)?.actions.push(ActionSpec {
            action,
            outcomes: Vec::new(),
        });
        Ok(self)
    }

    pub fn outcome(
        &mut self,
        state: &str,
        action: Move,
        next: impl Into<String>,
        prob: f64,
        reward: f64,
    ) -> Result<&mut Self, MdpError> {
        let spec = self
            .find_state(state)?
            .actions
            .iter_mut()
            .find(|a| a.action == action)
            .ok_or_else(|| MdpError::BuilderUnknownAction {
                state: state.to_string(),
                action,
            })?;
        spec.outcomes.push(OutcomeSpec {
            next: next.into(),
            prob,
            reward,
        });
        Ok(self)
    }

    fn find_state(&mut self, state: &str) -> Result<&mut StateSpec, MdpError> {
        self.states
            .iter_mut()
            .find(|s| s.id == state)
            .ok_or_else(|| MdpError::BuilderUnknownState {
                state: state.to_string(),
            })
    }

    /// Finish and validate the collected `MdpSpec`.
    pub fn build_spec(self) -> Result<MdpSpec, MdpError> {
        let spec = MdpSpec {
            version: Some(1),
            start: self.start.ok_or(MdpError::MissingStart)?,
            states: self.states,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<CompiledMdp, MdpError> {
        self.build_spec()?.compile()
    }
}
