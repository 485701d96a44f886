use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::error::EngineError;

/// Completion state of a hand within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandState {
    Open,
    Finished,
}

/// Blackjack value of a set of cards: aces count 11, then drop to 1
/// one at a time while the total is over 21.
pub fn hand_value(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        if card.rank() == Rank::Ace {
            aces += 1;
        }
        total += card.value();
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// A hand of cards plus its wager and completion state. Cards stay in
/// deal order; once finished, neither cards nor bet may change until
/// the hand is reset for the next round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    bet: u32,
    state: HandState,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            bet: 0,
            state: HandState::Open,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == HandState::Finished
    }

    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Exactly twenty-one, with any number of cards.
    pub fn is_twenty_one(&self) -> bool {
        self.value() == 21
    }

    /// Append a drawn card. Rejected once the hand is finished.
    pub fn add_card(&mut self, card: Card) -> Result<(), EngineError> {
        if self.is_finished() {
            return Err(EngineError::HandFinished);
        }
        self.cards.push(card);
        Ok(())
    }

    /// Add to the wager. The initial bet, doubling, and splitting all
    /// go through this additive path.
    pub fn place_bet(&mut self, amount: u32) -> Result<(), EngineError> {
        if self.is_finished() {
            return Err(EngineError::HandFinished);
        }
        self.bet += amount;
        Ok(())
    }

    /// Mark the hand finished. Idempotent.
    pub fn finish(&mut self) {
        self.state = HandState::Finished;
    }

    /// Remove and return the card at `index`. Used by the split
    /// operation to transfer a card into the new hand.
    pub fn take_card(&mut self, index: usize) -> Result<Card, EngineError> {
        if self.is_finished() {
            return Err(EngineError::HandFinished);
        }
        if index >= self.cards.len() {
            return Err(EngineError::NoSuchCard {
                index,
                len: self.cards.len(),
            });
        }
        Ok(self.cards.remove(index))
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        self.bet = 0;
        self.state = HandState::Open;
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bet != 0 {
            write!(f, "({}) ", self.bet)?;
        }
        for card in &self.cards {
            write!(f, "{} ", card)?;
        }
        let value = self.value();
        if value == 21 {
            write!(f, "<<{}>>", value)
        } else if value > 21 {
            write!(f, ">{}<", value)
        } else {
            write!(f, "{}", value)
        }
    }
}
