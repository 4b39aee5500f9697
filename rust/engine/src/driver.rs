//! Drives a round from an external source of player actions.
//!
//! The console prompt and the auto-player both implement [`ActionSource`];
//! the round logic itself lives only in [`Game`].

use crate::deck::ShuffleSource;
use crate::engine::{Game, RoundSnapshot};
use crate::errors::GameError;
use crate::player::PlayerAction;
use crate::strategy::recommend;

/// Supplies the player's next action. This is the only point where a round
/// waits on the outside world.
pub trait ActionSource {
    /// Next action for the table shown in `snapshot`, or `None` to quit.
    fn next_action(&mut self, snapshot: &RoundSnapshot) -> Option<PlayerAction>;

    /// Called when the engine refuses the action just returned.
    fn rejected(&mut self, _error: &GameError) {}
}

/// How [`play_round`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    /// The round reached `Resolved`
    Resolved(RoundSnapshot),
    /// The source returned `None` while the round was still open
    Quit(RoundSnapshot),
}

impl RoundEnd {
    pub fn snapshot(&self) -> &RoundSnapshot {
        match self {
            RoundEnd::Resolved(s) | RoundEnd::Quit(s) => s,
        }
    }
}

/// Deals a new round and feeds it actions from `source` until it resolves or
/// the source quits.
pub fn play_round<S, A>(game: &mut Game<S>, source: &mut A) -> Result<RoundEnd, GameError>
where
    S: ShuffleSource,
    A: ActionSource + ?Sized,
{
    game.start_round();
    let mut snapshot = game.snapshot().ok_or(GameError::NoRoundInProgress)?;

    while !snapshot.is_resolved() {
        let Some(action) = source.next_action(&snapshot) else {
            return Ok(RoundEnd::Quit(snapshot));
        };
        match game.submit_action(action) {
            Ok(next) => snapshot = next,
            Err(e) => source.rejected(&e),
        }
    }

    Ok(RoundEnd::Resolved(snapshot))
}

/// Plays every decision by the basic-strategy table.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicStrategySource;

impl ActionSource for BasicStrategySource {
    fn next_action(&mut self, snapshot: &RoundSnapshot) -> Option<PlayerAction> {
        let up = snapshot.dealer_up_card()?;
        Some(recommend(&snapshot.player_hand, up))
    }
}

/// Replays a fixed list of actions, then quits.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    actions: std::collections::VecDeque<PlayerAction>,
    rejections: Vec<GameError>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = PlayerAction>>(actions: I) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    /// Errors the engine returned for actions from this script.
    pub fn rejections(&self) -> &[GameError] {
        &self.rejections
    }
}

impl ActionSource for ScriptedSource {
    fn next_action(&mut self, _snapshot: &RoundSnapshot) -> Option<PlayerAction> {
        self.actions.pop_front()
    }

    fn rejected(&mut self, error: &GameError) {
        self.rejections.push(error.clone());
    }
}
