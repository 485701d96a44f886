use serde::{Deserialize, Serialize};

use crate::account::{DealerAccount, PlayerAccount};
use crate::error::EngineError;
use crate::hand::Hand;
use crate::rules::{self, TableRules};
use crate::shoe::Shoe;

/// The dealer draws until reaching this value.
const DEALER_STAND: u8 = 17;

/// A player decision offered on an open hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

/// A single blackjack table: one shoe, one player seat, the dealer.
///
/// The table drives one round at a time. A presentation layer places a
/// bet with `lock_bet`, deals with `start`, applies the player's
/// decisions, then runs `dealer_play`, `settle`, and `restart`. Every
/// command validates its preconditions before mutating, so an illegal
/// call leaves the table untouched.
#[derive(Debug)]
pub struct Table {
    rules: TableRules,
    shoe: Shoe,
    player: PlayerAccount,
    dealer: DealerAccount,
}

impl Table {
    pub fn new(rules: TableRules) -> Self {
        Self::with_shoe(rules, Shoe::new())
    }

    /// Table with a deterministic shoe, for reproducible play.
    pub fn with_seed(rules: TableRules, seed: u64) -> Self {
        Self::with_shoe(rules, Shoe::with_seed(seed))
    }

    fn with_shoe(rules: TableRules, shoe: Shoe) -> Self {
        Self {
            rules,
            shoe,
            player: PlayerAccount::new(),
            dealer: DealerAccount::new(),
        }
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn bankroll(&self) -> u32 {
        self.player.bankroll()
    }

    pub fn player_hands(&self) -> &[Hand] {
        self.player.hands()
    }

    pub fn player_hand(&self, hand_index: usize) -> Result<&Hand, EngineError> {
        self.player.hand(hand_index)
    }

    /// The dealer's visible hand; the hole card is excluded until
    /// `dealer_play` reveals it.
    pub fn dealer_hand(&self) -> &Hand {
        self.dealer.hand()
    }

    pub fn hole_card_held(&self) -> bool {
        self.dealer.has_hole_card()
    }

    pub fn shoe_size(&self) -> usize {
        self.shoe.size()
    }

    /// True once every player hand is finished; dealer play and
    /// settlement only happen after this.
    pub fn round_finished(&self) -> bool {
        self.player.all_hands_finished()
    }

    /// True once the bankroll can no longer cover the table minimum.
    pub fn is_broke(&self) -> bool {
        self.player.bankroll() < self.rules.min_bet
    }

    pub fn credit_initial_bankroll(&mut self, amount: u32) {
        self.player.credit(amount);
    }

    /// Debit the bankroll and move the amount onto a hand's wager. The
    /// initial bet, doubling, and splitting all funnel through here,
    /// so bankroll decrease always equals the bet increase.
    pub fn lock_bet(&mut self, amount: u32, hand_index: usize) -> Result<(), EngineError> {
        if self.player.hand(hand_index)?.is_finished() {
            return Err(EngineError::HandFinished);
        }
        self.player.debit(amount)?;
        self.player.place_bet(amount, hand_index)?;
        Ok(())
    }

    /// Deal the round: two cards to the player's hand, one visible
    /// card to the dealer, and one further card held face-down as the
    /// hole card.
    pub fn start(&mut self) -> Result<(), EngineError> {
        for card in self.shoe.draw(2) {
            self.player.hand_mut(0)?.add_card(card)?;
        }
        let up_card = self.shoe.draw_one();
        self.dealer.hand_mut().add_card(up_card)?;
        let hole = self.shoe.draw_one();
        self.dealer.hold_card(hole)?;
        log::debug!(
            "dealt round, player {} vs dealer {}",
            self.player.hands()[0],
            self.dealer.hand()
        );
        Ok(())
    }

    /// The subset of actions legal on the named hand. Empty for a bust
    /// hand; Double and Split are only offered while the hand's bet
    /// still fits inside the bankroll.
    pub fn available_options(&self, hand_index: usize) -> Result<Vec<Action>, EngineError> {
        let hand = self.player.hand(hand_index)?;
        let mut options = Vec::new();
        if hand.is_bust() {
            return Ok(options);
        }
        options.push(Action::Hit);
        options.push(Action::Stand);
        if hand.bet() <= self.player.bankroll() {
            if self.double_allowed(hand) {
                options.push(Action::Double);
            }
            if Self::split_allowed(hand) {
                options.push(Action::Split);
            }
        }
        Ok(options)
    }

    // Doubling is gated on the table-wide hand count: once any split
    // has happened, no hand may double.
    fn double_allowed(&self, hand: &Hand) -> bool {
        hand.cards().len() == 2
            && matches!(hand.value(), 9..=11)
            && self.player.hands().len() == 1
    }

    fn split_allowed(hand: &Hand) -> bool {
        match hand.cards() {
            [first, second] => first.rank() == second.rank(),
            _ => false,
        }
    }

    /// Draw one card into the hand; a hand that busts is finished
    /// automatically.
    pub fn hit(&mut self, hand_index: usize) -> Result<(), EngineError> {
        if self.player.hand(hand_index)?.is_finished() {
            return Err(EngineError::HandFinished);
        }
        let card = self.shoe.draw_one();
        let hand = self.player.hand_mut(hand_index)?;
        hand.add_card(card)?;
        if hand.is_bust() {
            hand.finish();
        }
        Ok(())
    }

    /// Finish the hand without drawing.
    pub fn stand(&mut self, hand_index: usize) -> Result<(), EngineError> {
        let hand = self.player.hand_mut(hand_index)?;
        if hand.is_finished() {
            return Err(EngineError::HandFinished);
        }
        hand.finish();
        Ok(())
    }

    /// Draw exactly one card, double the wager, and finish the hand
    /// whatever the outcome of the draw.
    pub fn double_down(&mut self, hand_index: usize) -> Result<(), EngineError> {
        let hand = self.player.hand(hand_index)?;
        if hand.is_finished() {
            return Err(EngineError::HandFinished);
        }
        if !self.double_allowed(hand) {
            return Err(EngineError::DoubleNotAllowed);
        }
        let stake = hand.bet();
        if stake > self.player.bankroll() {
            return Err(EngineError::InsufficientBankroll {
                available: self.player.bankroll(),
                required: stake,
            });
        }

        let card = self.shoe.draw_one();
        self.player.hand_mut(hand_index)?.add_card(card)?;
        self.lock_bet(stake, hand_index)?;
        self.player.hand_mut(hand_index)?.finish();
        Ok(())
    }

    /// Split a pair: append a new hand, lock a matching wager on it,
    /// then move the second card of the source hand across. Both hands
    /// play on independently afterwards.
    pub fn split(&mut self, hand_index: usize) -> Result<(), EngineError> {
        let hand = self.player.hand(hand_index)?;
        if hand.is_finished() {
            return Err(EngineError::HandFinished);
        }
        if !Self::split_allowed(hand) {
            return Err(EngineError::SplitNotAllowed);
        }
        let stake = hand.bet();
        if stake > self.player.bankroll() {
            return Err(EngineError::InsufficientBankroll {
                available: self.player.bankroll(),
                required: stake,
            });
        }

        self.player.add_hand();
        let new_index = self.player.hands().len() - 1;
        self.lock_bet(stake, new_index)?;
        let moved = self.player.hand_mut(hand_index)?.take_card(1)?;
        self.player.hand_mut(new_index)?.add_card(moved)?;
        Ok(())
    }

    /// Reveal the hole card, then draw until the dealer's value
    /// reaches 17. Rejected while any player hand is still open.
    pub fn dealer_play(&mut self) -> Result<(), EngineError> {
        if !self.round_finished() {
            return Err(EngineError::RoundStillOpen);
        }
        self.dealer.reveal()?;
        while self.dealer.hand().value() < DEALER_STAND {
            let card = self.shoe.draw_one();
            self.dealer.hand_mut().add_card(card)?;
        }
        log::debug!("dealer stands at {}", self.dealer.hand().value());
        Ok(())
    }

    /// Pay out every player hand against the dealer's final value. A
    /// bust hand forfeits its bet; a win returns twice the bet, or
    /// 5/2 truncated when the winning hand sits at exactly twenty-one;
    /// a push returns the bet.
    pub fn settle(&mut self) -> Result<(), EngineError> {
        if !self.round_finished() {
            return Err(EngineError::RoundStillOpen);
        }
        let dealer_value = self.dealer.hand().value();
        let dealer_bust = self.dealer.hand().is_bust();

        let mut payout = 0;
        for hand in self.player.hands() {
            if hand.is_bust() {
                continue;
            }
            let bet = hand.bet();
            if dealer_bust || hand.value() > dealer_value {
                payout += if hand.is_twenty_one() {
                    rules::twenty_one_payout(bet)
                } else {
                    rules::win_payout(bet)
                };
            } else if hand.value() == dealer_value {
                payout += rules::push_payout(bet);
            }
        }
        self.player.credit(payout);
        log::debug!("round settled, {} credited", payout);
        Ok(())
    }

    /// Clear both seats back to a single empty hand for the next
    /// round. The shoe keeps its remaining cards.
    pub fn restart(&mut self) {
        self.player.reset();
        self.dealer.reset();
    }
}
