use tabula_core::{Controller, Environment, Opponent};
use tracing::{debug, info};

/// Step cap applied to evaluation games unless the caller picks another.
pub const DEFAULT_MAX_STEPS: usize = 2000;

/// Outcome of one evaluation game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub score: i64,
    pub steps: usize,
    /// `false` when the step cap cut the game short.
    pub finished: bool,
}

/// Let `controller` play `env` against `opponent` until it ends or `max_steps` pass.
///
/// The controller only reads; nothing is learned while playing.
pub fn play_game<E, C, O>(
    controller: &C,
    mut env: E,
    opponent: &mut O,
    max_steps: usize,
) -> GameRecord
where
    E: Environment,
    C: Controller,
    O: Opponent<E>,
{
    let mut steps = 0;
    while !env.is_terminal() && steps < max_steps {
        let action = controller.act_in(&env);
        let response = opponent.respond(&env);
        env.advance(action, &response);
        steps += 1;
    }

    let record = GameRecord {
        score: env.score(),
        steps,
        finished: env.is_terminal(),
    };
    debug!(
        score = record.score,
        steps,
        finished = record.finished,
        "evaluation game over"
    );
    record
}

/// Mean score of `games` evaluation games, each on a fresh environment and opponent.
/// Zero games average to 0.0.
pub fn average_score<E, C, O, FEnv, FOpp>(
    controller: &C,
    games: usize,
    mut new_env: FEnv,
    mut new_opponent: FOpp,
    max_steps: usize,
) -> f64
where
    E: Environment,
    C: Controller,
    O: Opponent<E>,
    FEnv: FnMut() -> E,
    FOpp: FnMut() -> O,
{
    if games == 0 {
        return 0.0;
    }

    let mut total = 0i64;
    for game in 0..games {
        let mut opponent = new_opponent();
        let record = play_game(controller, new_env(), &mut opponent, max_steps);
        info!(
            game,
            score = record.score,
            steps = record.steps,
            "evaluation game finished"
        );
        total += record.score;
    }

    let average = total as f64 / games as f64;
    info!(games, average, "evaluation finished");
    average
}
