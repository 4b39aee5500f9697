use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// Number of standard decks combined into the shoe.
pub const DECKS_PER_SHOE: usize = 2;

/// Source of the random indices used by [`Shoe::shuffle`].
///
/// Every [`rand::Rng`] is a shuffle source. Tests implement the trait directly
/// to script the exact permutation.
pub trait ShuffleSource {
    /// Returns an index uniformly distributed over `0..=upper`.
    fn pick_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> ShuffleSource for R {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.random_range(0..=upper)
    }
}

/// The shoe every card is dealt from: two standard decks and a cursor.
///
/// The shoe reshuffles itself once more than three quarters of it has been
/// dealt.
///
/// # Examples
///
/// ```
/// use bjcoach_engine::deck::Shoe;
///
/// let mut shoe = Shoe::new_with_seed(42);
/// assert_eq!(shoe.len(), 104);
/// let _card = shoe.deal();
/// assert_eq!(shoe.dealt_count(), 1);
/// ```
#[derive(Debug)]
pub struct Shoe<S = ChaCha20Rng> {
    cards: Vec<Card>,
    dealt: usize,
    reshuffles: u32,
    source: S,
}

impl Shoe<ChaCha20Rng> {
    /// Builds a shuffled two-deck shoe driven by a seeded ChaCha20 RNG.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_source(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<S: ShuffleSource> Shoe<S> {
    /// Builds a two-deck shoe and shuffles it with `source`.
    pub fn with_source(source: S) -> Self {
        let mut shoe = Self::stacked(double_deck(), source);
        shoe.shuffle();
        // the opening shuffle is part of construction
        shoe.reshuffles = 0;
        shoe
    }

    /// Builds a shoe that deals `cards` in the given order until its first
    /// reshuffle.
    pub fn stacked(cards: Vec<Card>, source: S) -> Self {
        assert!(!cards.is_empty(), "a shoe needs at least one card");
        Self {
            cards,
            dealt: 0,
            reshuffles: 0,
            source,
        }
    }

    /// Fisher-Yates over the whole shoe, then rewinds the cursor.
    pub fn shuffle(&mut self) {
        for i in (1..self.cards.len()).rev() {
            let j = self.source.pick_index(i);
            debug_assert!(j <= i, "shuffle source returned {j} for upper bound {i}");
            self.cards.swap(i, j);
        }
        self.dealt = 0;
        self.reshuffles += 1;
        tracing::debug!(
            cards = self.cards.len(),
            reshuffles = self.reshuffles,
            "shoe shuffled"
        );
    }

    /// Deals the next card, reshuffling first when the shoe is more than 75% used.
    ///
    /// # Panics
    ///
    /// Panics if the cursor runs past the end of the shoe. The reshuffle
    /// threshold keeps that unreachable for rounds of normal length.
    pub fn deal(&mut self) -> Card {
        if self.needs_reshuffle() {
            tracing::debug!(
                dealt = self.dealt,
                len = self.cards.len(),
                "reshuffle threshold passed"
            );
            self.shuffle();
        }
        assert!(
            self.dealt < self.cards.len(),
            "shoe exhausted: dealt {} of {}",
            self.dealt,
            self.cards.len()
        );
        let card = self.cards[self.dealt];
        self.dealt += 1;
        card
    }

    /// `dealt / len > 0.75`, kept in integers.
    fn needs_reshuffle(&self) -> bool {
        self.dealt * 4 > self.cards.len() * 3
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn dealt_count(&self) -> usize {
        self.dealt
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.dealt)
    }

    /// Reshuffles performed since the shoe was built.
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Current card order, dealt and undealt.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Two standard decks back to back, each card present exactly twice.
pub fn double_deck() -> Vec<Card> {
    let deck = full_deck();
    let mut cards = Vec::with_capacity(deck.len() * DECKS_PER_SHOE);
    for _ in 0..DECKS_PER_SHOE {
        cards.extend_from_slice(&deck);
    }
    cards
}
