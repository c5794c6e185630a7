use crate::agent::{
    action::Move,
    model::{Transition, TransitionModel},
    tables::ValueFunction,
};

/// `Σ p · (r + γ · V(s'))` over `transitions`, reading `values` only.
pub(crate) fn expected_return<S>(
    transitions: &[Transition<S>],
    values: &ValueFunction<S>,
    gamma: f64,
) -> f64
where
    S: Clone + Eq + std::hash::Hash,
{
    transitions
        .iter()
        .map(|t| t.probability * (t.reward + gamma * values.get_or_default(&t.next)))
        .sum()
}

/// Bellman-optimality backup of one state.
///
/// Actions with no transitions are skipped. The first action with a strictly
/// larger expected return wins. Returns `None` when no action qualifies, which
/// callers treat as terminal (value 0, neutral move).
pub(crate) fn greedy_backup<M: TransitionModel>(
    model: &mut M,
    state: &M::State,
    values: &ValueFunction<M::State>,
    gamma: f64,
) -> Option<(Move, f64)> {
    let mut best: Option<(Move, f64)> = None;

    for action in model.legal_actions(state) {
        let transitions = model.transitions(state, action);
        if transitions.is_empty() {
            continue;
        }
        let value = expected_return(&transitions, values, gamma);
        best = match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((action, value)),
        };
    }

    best
}

/// Bellman-expectation backup of one state under a fixed `action`.
pub(crate) fn policy_backup<M: TransitionModel>(
    model: &mut M,
    state: &M::State,
    action: Move,
    values: &ValueFunction<M::State>,
    gamma: f64,
) -> f64 {
    if model.legal_actions(state).is_empty() {
        return 0.0;
    }
    let transitions = model.transitions(state, action);
    expected_return(&transitions, values, gamma)
}
