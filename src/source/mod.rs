//! Demo card sources.
//!
//! Cards come from a JSON deck file or from a generator. The deck is read
//! once; every later batch (refills, surfaced cards) is generated, numbered
//! after the deck.

use crate::model::DeckError;
use std::path::PathBuf;

pub mod card;
pub mod deck;
pub mod generator;

pub use card::{DemoCard, Stamp, TextCardView};
pub use deck::{load_deck, parse_deck};
pub use generator::CardGenerator;

/// Where the host gets its cards.
#[derive(Debug)]
pub struct CardSource {
    deck: Option<Vec<DemoCard>>,
    generator: CardGenerator,
    batch_size: usize,
}

impl CardSource {
    /// Generated cards only, `batch_size` per batch.
    pub fn generated(batch_size: usize) -> Self {
        Self {
            deck: None,
            generator: CardGenerator::default(),
            batch_size,
        }
    }

    /// Deck cards first, then generated batches of `batch_size`.
    pub fn from_deck(cards: Vec<DemoCard>, batch_size: usize) -> Self {
        let first_generated = cards.iter().map(|card| card.id + 1).max().unwrap_or(0);
        Self {
            deck: Some(cards),
            generator: CardGenerator::starting_at(first_generated),
            batch_size,
        }
    }

    /// The cards to start with: the whole deck, or one generated batch.
    ///
    /// Deck cards are handed out only once.
    pub fn initial_cards(&mut self) -> Vec<DemoCard> {
        match self.deck.take() {
            Some(cards) => cards,
            None => self.refill_batch(),
        }
    }

    /// A fresh generated batch.
    pub fn refill_batch(&mut self) -> Vec<DemoCard> {
        self.generator.next_batch(self.batch_size)
    }

    /// A single generated card.
    pub fn next_card(&mut self) -> DemoCard {
        self.generator.next_card()
    }
}

/// Build the card source for an optional deck path.
///
/// # Errors
///
/// Propagates deck loading failures.
pub fn detect_card_source(
    deck_path: Option<PathBuf>,
    batch_size: usize,
) -> Result<CardSource, DeckError> {
    match deck_path {
        Some(path) => Ok(CardSource::from_deck(load_deck(&path)?, batch_size)),
        None => Ok(CardSource::generated(batch_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_source_starts_with_one_batch() {
        let mut source = CardSource::generated(4);
        assert_eq!(source.initial_cards().len(), 4);
        assert_eq!(source.refill_batch()[0].id, 4);
    }

    #[test]
    fn deck_source_hands_out_deck_once_then_generates() {
        let deck = vec![DemoCard::new(0, "A", ""), DemoCard::new(1, "B", "")];
        let mut source = CardSource::from_deck(deck.clone(), 3);

        assert_eq!(source.initial_cards(), deck);
        let next = source.initial_cards();
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].id, 2);
        assert_eq!(source.next_card().id, 5);
    }

    #[test]
    fn detect_without_deck_generates() {
        let mut source = detect_card_source(None, 2).expect("no deck needed");
        assert_eq!(source.initial_cards().len(), 2);
    }

    #[test]
    fn detect_with_missing_deck_fails() {
        let result = detect_card_source(Some(PathBuf::from("/nonexistent/deck.json")), 2);
        assert!(matches!(result, Err(DeckError::FileNotFound { .. })));
    }
}
