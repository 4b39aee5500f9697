use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::{Shoe, ShuffleSource};
use crate::errors::GameError;
use crate::hand::{Hand, BLACKJACK};
use crate::logger::{DecisionRecord, RoundRecord};
use crate::player::PlayerAction;
use crate::rules::{self, resolve_outcome, Outcome, RoundState, DEALER_STANDS_AT};
use crate::strategy::{Tally, Verdict};

/// What the player sees right after the initial deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealView {
    pub player_hand: Vec<Card>,
    pub dealer_up_card: Card,
    pub state: RoundState,
}

/// Table state after an action.
///
/// `dealer_hand` holds only the up-card until the dealer's hand is revealed,
/// and `dealer_score` is the score of the visible dealer cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_score: u32,
    pub dealer_score: u32,
    pub dealer_revealed: bool,
    pub state: RoundState,
    pub outcome: Option<Outcome>,
    pub tally: Tally,
    /// Grade of the decision that produced this snapshot, if any
    pub last_verdict: Option<Verdict>,
}

impl RoundSnapshot {
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer_hand.first().copied()
    }

    pub fn is_resolved(&self) -> bool {
        self.state == RoundState::Resolved
    }
}

#[derive(Debug, Clone)]
struct Round {
    player: Hand,
    dealer: Hand,
    dealer_up: Card,
    state: RoundState,
    outcome: Option<Outcome>,
    dealer_revealed: bool,
    decisions: Vec<DecisionRecord>,
    last_verdict: Option<Verdict>,
}

impl Round {
    /// Reveals the dealer and fixes the outcome from the current totals.
    fn resolve(&mut self) -> Outcome {
        self.dealer_revealed = true;
        let outcome = resolve_outcome(self.player.score(), self.dealer.score());
        self.outcome = Some(outcome);
        self.state = RoundState::Resolved;
        outcome
    }
}

/// Dealer draws until reaching 17 or more. No special case for soft 17.
fn play_dealer<S: ShuffleSource>(shoe: &mut Shoe<S>, dealer: &mut Hand) {
    while dealer.score() < DEALER_STANDS_AT {
        let card = shoe.deal();
        dealer.push(card);
        tracing::debug!(card = %card, dealer_score = dealer.score(), "dealer hits");
    }
}

/// One player's blackjack session: the shoe, the decision tally and the
/// current round.
///
/// A `Game` is plain owned state. Front-ends keep it and call
/// [`Game::start_round`] and [`Game::submit_action`] on it.
///
/// # Examples
///
/// ```
/// use bjcoach_engine::engine::Game;
/// use bjcoach_engine::player::PlayerAction;
///
/// let mut game = Game::new(Some(7));
/// let deal = game.start_round();
/// assert_eq!(deal.player_hand.len(), 2);
///
/// let snapshot = game.submit_action(PlayerAction::Stand).unwrap();
/// assert!(snapshot.is_resolved());
/// assert_eq!(game.tally().correct_decisions + game.tally().mistakes, 1);
/// ```
#[derive(Debug)]
pub struct Game<S = ChaCha20Rng> {
    /// Shared shoe, reshuffled in place as it runs low
    shoe: Shoe<S>,
    /// Decision grades across every round of this game
    tally: Tally,
    /// Round in progress or the last resolved round
    round: Option<Round>,
    rounds_played: u32,
    /// Seed behind the shoe's RNG, when known
    seed: Option<u64>,
}

impl Game<ChaCha20Rng> {
    /// New game with a freshly shuffled shoe. A random seed is drawn when
    /// `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut game = Self::with_shoe(Shoe::new_with_seed(seed));
        game.seed = Some(seed);
        game
    }
}

impl<S: ShuffleSource> Game<S> {
    /// New game dealing from `shoe`.
    pub fn with_shoe(shoe: Shoe<S>) -> Self {
        Self {
            shoe,
            tally: Tally::default(),
            round: None,
            rounds_played: 0,
            seed: None,
        }
    }

    /// Deals a fresh round: two cards to the player, then two to the dealer.
    ///
    /// Any unfinished round is abandoned without touching the tally.
    pub fn start_round(&mut self) -> DealView {
        if let Some(round) = &self.round {
            if round.state != RoundState::Resolved {
                tracing::warn!(state = ?round.state, "abandoning unfinished round");
            }
        }

        let mut player = Hand::new();
        let mut dealer = Hand::new();
        player.push(self.shoe.deal());
        player.push(self.shoe.deal());
        let dealer_up = self.shoe.deal();
        dealer.push(dealer_up);
        dealer.push(self.shoe.deal());

        tracing::debug!(
            player_score = player.score(),
            dealer_up = %dealer_up,
            dealt = self.shoe.dealt_count(),
            "initial deal"
        );

        let view = DealView {
            player_hand: player.cards().to_vec(),
            dealer_up_card: dealer_up,
            state: RoundState::PlayerTurn,
        };
        self.round = Some(Round {
            player,
            dealer,
            dealer_up,
            state: RoundState::PlayerTurn,
            outcome: None,
            dealer_revealed: false,
            decisions: Vec::new(),
            last_verdict: None,
        });
        view
    }

    /// Applies one player action.
    ///
    /// The action is graded against basic strategy before it changes the hand.
    ///
    /// # Errors
    ///
    /// Returns a [`GameError`] and leaves everything unchanged when no round has
    /// been dealt, the round is already resolved, or a double down is attempted
    /// after the first two cards.
    pub fn submit_action(&mut self, action: PlayerAction) -> Result<RoundSnapshot, GameError> {
        let round = self.round.as_mut().ok_or(GameError::NoRoundInProgress)?;
        let action = rules::validate_action(round.state, round.player.len(), action)
            .inspect_err(|e| tracing::warn!(%action, error = %e, "action rejected"))?;

        let verdict = self
            .tally
            .evaluate(action, round.player.cards(), round.dealer_up);
        round.decisions.push(DecisionRecord {
            player_score: round.player.score(),
            soft: round.player.is_soft(),
            dealer_up: round.dealer_up,
            verdict,
        });
        round.last_verdict = Some(verdict);
        tracing::debug!(
            %action,
            recommended = %verdict.recommended,
            correct = verdict.correct,
            "decision graded"
        );

        match action {
            PlayerAction::Hit => {
                round.player.push(self.shoe.deal());
                if round.player.score() >= BLACKJACK {
                    round.resolve();
                }
            }
            PlayerAction::Stand => {
                round.state = RoundState::DealerTurn;
                round.dealer_revealed = true;
                play_dealer(&mut self.shoe, &mut round.dealer);
                round.resolve();
            }
            PlayerAction::DoubleDown => {
                round.player.push(self.shoe.deal());
                // the dealer plays out even when the doubled hand busts
                round.state = RoundState::DealerTurn;
                round.dealer_revealed = true;
                play_dealer(&mut self.shoe, &mut round.dealer);
                round.resolve();
            }
        }

        if let Some(outcome) = round.outcome {
            self.rounds_played += 1;
            tracing::info!(
                ?outcome,
                player_score = round.player.score(),
                dealer_score = round.dealer.score(),
                correct = self.tally.correct_decisions,
                mistakes = self.tally.mistakes,
                "round resolved"
            );
        }

        self.snapshot().ok_or(GameError::NoRoundInProgress)
    }

    /// Current table state, or `None` before the first deal.
    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        let round = self.round.as_ref()?;
        let dealer_hand = if round.dealer_revealed {
            round.dealer.cards().to_vec()
        } else {
            vec![round.dealer_up]
        };
        let dealer_score = crate::hand::score(&dealer_hand);
        Some(RoundSnapshot {
            player_hand: round.player.cards().to_vec(),
            dealer_hand,
            player_score: round.player.score(),
            dealer_score,
            dealer_revealed: round.dealer_revealed,
            state: round.state,
            outcome: round.outcome,
            tally: self.tally,
            last_verdict: round.last_verdict,
        })
    }

    /// History entry for the current round, with every card revealed.
    pub fn round_record(&self, round_id: String) -> Option<RoundRecord> {
        let round = self.round.as_ref()?;
        Some(RoundRecord {
            round_id,
            seed: self.seed,
            decisions: round.decisions.clone(),
            player_hand: round.player.cards().to_vec(),
            dealer_hand: round.dealer.cards().to_vec(),
            player_score: round.player.score(),
            dealer_score: round.dealer.score(),
            outcome: round.outcome,
            tally: self.tally,
            ts: None,
        })
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn state(&self) -> Option<RoundState> {
        self.round.as_ref().map(|r| r.state)
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn shoe(&self) -> &Shoe<S> {
        &self.shoe
    }
}
