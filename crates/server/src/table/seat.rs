// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table seat types.
use holdem_core::{
    message::TableError,
    poker::{Chips, HandValue, PlayerCards, PlayerId},
    snapshot::SeatStatus,
};

/// A table seat, empty or owned by one player.
#[derive(Debug, Clone, Default)]
pub struct Seat {
    /// The seat owner.
    pub player_id: Option<PlayerId>,
    /// The owner nickname.
    pub nickname: String,
    /// The seat status.
    pub status: SeatStatus,
    /// The owner chips.
    pub chips: Chips,
    /// The hole cards.
    pub cards: PlayerCards,
    /// Chips committed in this betting round.
    pub bet: Chips,
    /// Chips committed in this hand.
    pub total_bet: Chips,
    /// The player acted in this betting round.
    pub has_acted: bool,
    /// The player is ready for the next hand.
    pub is_ready: bool,
    /// The owner disconnected during a hand.
    pub is_away: bool,
    /// The best hand once revealed.
    pub hand: Option<HandValue>,
    /// The chips won in the last hand.
    pub payout: Chips,
}

impl Seat {
    /// Checks if nobody sits here.
    pub fn is_empty(&self) -> bool {
        self.status == SeatStatus::Empty
    }

    /// Checks if this seat is owned by the given player.
    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.player_id == Some(player_id)
    }

    /// Checks if this seat is still contending the pot.
    pub fn in_hand(&self) -> bool {
        matches!(self.status, SeatStatus::Sitting | SeatStatus::AllIn)
    }

    /// Checks if this seat can take a betting action.
    pub fn can_act(&self) -> bool {
        self.status == SeatStatus::Sitting && !self.has_acted
    }

    /// A player takes this seat with a fresh stack.
    pub fn sit_down(&mut self, player_id: PlayerId, nickname: &str, chips: Chips) {
        *self = Seat {
            player_id: Some(player_id),
            nickname: nickname.to_string(),
            status: SeatStatus::Sitting,
            chips,
            ..Seat::default()
        };
    }

    /// Empties this seat.
    pub fn reset(&mut self) {
        *self = Seat::default();
    }

    /// Sets the ready flag, a player needs chips to get ready.
    pub fn set_ready(&mut self, ready: bool) -> Result<(), TableError> {
        if ready && self.chips == Chips::ZERO {
            return Err(TableError::InsufficientChips);
        }

        self.is_ready = ready;
        Ok(())
    }

    /// Clears the hand state, a player with no chips sits the hand out.
    pub fn start_hand(&mut self) {
        self.status = if self.chips > Chips::ZERO {
            SeatStatus::Sitting
        } else {
            SeatStatus::Folded
        };

        self.cards = PlayerCards::None;
        self.bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.has_acted = false;
        self.hand = None;
        self.payout = Chips::ZERO;
    }

    /// Returns the hand bets to the stack and clears the hand state.
    pub fn refund(&mut self) {
        self.chips += self.total_bet;
        self.start_hand();
        self.is_ready = false;
    }

    /// Clears the betting round state.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.has_acted = false;
    }

    /// Posts a forced blind, returns the chips committed.
    pub fn post_blind(&mut self, amount: Chips) -> Chips {
        self.commit(amount)
    }

    /// Bets `amount` more chips, returns the chips committed.
    pub fn bet(&mut self, amount: Chips) -> Chips {
        self.has_acted = true;
        self.commit(amount)
    }

    /// Folds this seat hand.
    pub fn fold(&mut self) {
        self.status = SeatStatus::Folded;
        self.has_acted = true;
    }

    fn commit(&mut self, amount: Chips) -> Chips {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.bet += amount;
        self.total_bet += amount;

        if self.chips == Chips::ZERO {
            self.status = SeatStatus::AllIn;
        }

        amount
    }
}
