use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::EngineError;
use crate::hand::Hand;

/// The player's bankroll and open hands. Hand 0 is the original hand;
/// splitting appends further hands behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAccount {
    bankroll: u32,
    hands: Vec<Hand>,
}

impl PlayerAccount {
    pub fn new() -> Self {
        Self {
            bankroll: 0,
            hands: vec![Hand::new()],
        }
    }

    pub fn bankroll(&self) -> u32 {
        self.bankroll
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hand(&self, index: usize) -> Result<&Hand, EngineError> {
        self.hands.get(index).ok_or(EngineError::NoSuchHand(index))
    }

    pub(crate) fn hand_mut(&mut self, index: usize) -> Result<&mut Hand, EngineError> {
        self.hands
            .get_mut(index)
            .ok_or(EngineError::NoSuchHand(index))
    }

    /// Append an empty, unfunded hand. Used when splitting.
    pub fn add_hand(&mut self) {
        self.hands.push(Hand::new());
    }

    pub fn credit(&mut self, amount: u32) {
        self.bankroll += amount;
    }

    /// Debits never drive the bankroll negative; an over-debit is
    /// rejected without touching it.
    pub fn debit(&mut self, amount: u32) -> Result<(), EngineError> {
        self.bankroll =
            self.bankroll
                .checked_sub(amount)
                .ok_or(EngineError::InsufficientBankroll {
                    available: self.bankroll,
                    required: amount,
                })?;
        Ok(())
    }

    /// Add `amount` to the named hand's bet.
    pub fn place_bet(&mut self, amount: u32, hand_index: usize) -> Result<(), EngineError> {
        self.hand_mut(hand_index)?.place_bet(amount)
    }

    pub fn all_hands_finished(&self) -> bool {
        self.hands.iter().all(Hand::is_finished)
    }

    /// Back to a single fresh hand. The bankroll carries over.
    pub fn reset(&mut self) {
        self.hands.clear();
        self.hands.push(Hand::new());
    }
}

impl Default for PlayerAccount {
    fn default() -> Self {
        Self::new()
    }
}

/// The dealer's seat: a single hand plus the face-down hole card held
/// out of the hand until revealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerAccount {
    hand: Hand,
    hole: Option<Card>,
}

impl DealerAccount {
    pub fn new() -> Self {
        Self {
            hand: Hand::new(),
            hole: None,
        }
    }

    /// The dealer's visible hand. The hole card is not part of it
    /// until `reveal`.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn has_hole_card(&self) -> bool {
        self.hole.is_some()
    }

    /// Store the face-down card. At most one may be held at a time.
    pub fn hold_card(&mut self, card: Card) -> Result<(), EngineError> {
        if self.hole.is_some() {
            return Err(EngineError::HoleCardOccupied);
        }
        self.hole = Some(card);
        Ok(())
    }

    /// Move the held card into the hand. No-op when nothing is held.
    pub fn reveal(&mut self) -> Result<(), EngineError> {
        if let Some(card) = self.hole.take() {
            self.hand.add_card(card)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.hand.reset();
        self.hole = None;
    }
}

impl Default for DealerAccount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Clubs)
    }

    #[test]
    fn test_new_player_has_one_empty_hand() {
        let player = PlayerAccount::new();
        assert_eq!(player.bankroll(), 0);
        assert_eq!(player.hands().len(), 1);
        assert_eq!(player.hands()[0].bet(), 0);
    }

    #[test]
    fn test_credit_and_debit() {
        let mut player = PlayerAccount::new();
        player.credit(100);
        player.debit(30).unwrap();
        assert_eq!(player.bankroll(), 70);
    }

    #[test]
    fn test_over_debit_rejected() {
        let mut player = PlayerAccount::new();
        player.credit(20);
        assert_eq!(
            player.debit(25),
            Err(EngineError::InsufficientBankroll {
                available: 20,
                required: 25
            })
        );
        assert_eq!(player.bankroll(), 20);
    }

    #[test]
    fn test_place_bet_on_missing_hand() {
        let mut player = PlayerAccount::new();
        assert_eq!(player.place_bet(10, 3), Err(EngineError::NoSuchHand(3)));
    }

    #[test]
    fn test_add_hand_appends_empty() {
        let mut player = PlayerAccount::new();
        player.add_hand();
        assert_eq!(player.hands().len(), 2);
        assert!(player.hands()[1].cards().is_empty());
    }

    #[test]
    fn test_all_hands_finished() {
        let mut player = PlayerAccount::new();
        player.add_hand();
        assert!(!player.all_hands_finished());
        player.hand_mut(0).unwrap().finish();
        assert!(!player.all_hands_finished());
        player.hand_mut(1).unwrap().finish();
        assert!(player.all_hands_finished());
    }

    #[test]
    fn test_reset_keeps_bankroll() {
        let mut player = PlayerAccount::new();
        player.credit(80);
        player.add_hand();
        player.place_bet(10, 1).unwrap();

        player.reset();
        assert_eq!(player.bankroll(), 80);
        assert_eq!(player.hands().len(), 1);
        assert_eq!(player.hands()[0].bet(), 0);
    }

    #[test]
    fn test_dealer_holds_at_most_one_card() {
        let mut dealer = DealerAccount::new();
        dealer.hold_card(card(Rank::King)).unwrap();
        assert_eq!(
            dealer.hold_card(card(Rank::Two)),
            Err(EngineError::HoleCardOccupied)
        );
    }

    #[test]
    fn test_reveal_moves_card_into_hand() {
        let mut dealer = DealerAccount::new();
        dealer.hand_mut().add_card(card(Rank::Six)).unwrap();
        dealer.hold_card(card(Rank::King)).unwrap();
        assert_eq!(dealer.hand().value(), 6);

        dealer.reveal().unwrap();
        assert!(!dealer.has_hole_card());
        assert_eq!(dealer.hand().value(), 16);
    }

    #[test]
    fn test_reveal_with_nothing_held_is_noop() {
        let mut dealer = DealerAccount::new();
        dealer.reveal().unwrap();
        assert!(dealer.hand().cards().is_empty());
    }

    #[test]
    fn test_dealer_reset_clears_hole() {
        let mut dealer = DealerAccount::new();
        dealer.hand_mut().add_card(card(Rank::Six)).unwrap();
        dealer.hold_card(card(Rank::King)).unwrap();

        dealer.reset();
        assert!(dealer.hand().cards().is_empty());
        assert!(!dealer.has_hole_card());
    }
}
