use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tabula_core::{Move, Transition, TransitionModel};

use crate::{CompiledMdp, StateKey};

/// One sampled step of a compiled MDP.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledStep {
    pub next: StateKey,
    pub reward: f64,
    pub terminal: bool,
}

/// Seeded sampler over a compiled MDP.
///
/// As a `TransitionModel` it answers each query with one sampled successor
/// at probability 1.0, so repeated queries for the same pair may differ.
#[derive(Debug, Clone)]
pub struct MdpSimulator {
    mdp: CompiledMdp,
    rng: ChaCha8Rng,
}

impl MdpSimulator {
    pub fn new(mdp: CompiledMdp, seed: u64) -> Self {
        MdpSimulator {
            mdp,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn mdp(&self) -> &CompiledMdp {
        &self.mdp
    }

    /// Sample one step. `None` when `action` is not declared in `state`.
    pub fn step(&mut self, state: StateKey, action: Move) -> Option<SampledStep> {
        let sample: f64 = self.rng.gen_range(0.0..1.0);
        let transition = self.mdp.sample(state, action, sample)?;
        Some(SampledStep {
            next: transition.next,
            reward: transition.reward,
            terminal: self.mdp.is_terminal(transition.next).unwrap_or(true),
        })
    }
}

impl TransitionModel for MdpSimulator {
    type State = StateKey;

    fn legal_actions(&self, state: &StateKey) -> Vec<Move> {
        self.mdp.declared_actions(*state)
    }

    fn transitions(&mut self, state: &StateKey, action: Move) -> Vec<Transition<StateKey>> {
        self.step(*state, action)
            .map(|step| Transition {
                next: step.next,
                probability: 1.0,
                reward: step.reward,
            })
            .into_iter()
            .collect()
    }
}
