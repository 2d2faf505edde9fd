// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state as seen by an observer and finished hands summaries.
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::poker::{Card, Chips, HandValue, PlayerCards, PlayerId, TableId};

/// The table status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    /// Between hands, players can sit, leave and get ready.
    #[default]
    Waiting,
    /// A hand is in progress.
    Playing,
}

/// The hand phase, only meaningful while a hand is playing or to show the
/// results of the last hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// No hand has been played yet.
    #[default]
    None,
    /// Betting before the flop.
    PreFlop,
    /// Betting after the flop.
    Flop,
    /// Betting after the turn.
    Turn,
    /// Betting after the river.
    River,
    /// Players are revealing their hands one at a time.
    ShowdownReveal,
    /// The hand has been settled.
    Showdown,
}

/// A seat status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Nobody sits here.
    #[default]
    Empty,
    /// A player sits here and is in the hand if there is one.
    Sitting,
    /// The player folded or sits the hand out.
    Folded,
    /// The player committed all the chips.
    AllIn,
}

impl SeatStatus {
    /// The status label.
    pub fn label(&self) -> &'static str {
        match self {
            SeatStatus::Empty => "EMPTY",
            SeatStatus::Sitting => "SITTING",
            SeatStatus::Folded => "FOLDED",
            SeatStatus::AllIn => "ALL-IN",
        }
    }
}

/// A seat as seen by an observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// The seat owner.
    pub player_id: Option<PlayerId>,
    /// The seat owner nickname.
    pub nickname: String,
    /// The seat status.
    pub status: SeatStatus,
    /// The seat chips stack.
    pub chips: Chips,
    /// The hole cards, covered for observers other than the owner.
    pub cards: PlayerCards,
    /// Chips committed in this betting round.
    pub bet: Chips,
    /// Chips committed in this hand.
    pub total_bet: Chips,
    /// The player acted in this betting round.
    pub has_acted: bool,
    /// The player is ready for the next hand.
    pub is_ready: bool,
    /// The player disconnected and is folded on its turn.
    pub is_away: bool,
    /// The best hand once revealed at showdown.
    pub hand: Option<HandValue>,
    /// The chips won in the last settled hand.
    pub payout: Chips,
}

impl SeatSnapshot {
    /// Checks if this seat is owned by the given player.
    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.player_id == Some(player_id)
    }
}

/// An immutable copy of the table state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// The table id.
    pub table_id: TableId,
    /// The table status.
    pub status: TableStatus,
    /// The hand phase.
    pub phase: Phase,
    /// The table seats in index order.
    pub seats: Vec<SeatSnapshot>,
    /// The community cards.
    pub board: Vec<Card>,
    /// The chips committed in this hand.
    pub pot: Chips,
    /// The highest commitment in this betting round.
    pub current_bet: Chips,
    /// The small blind amount.
    pub small_blind: Chips,
    /// The big blind amount.
    pub big_blind: Chips,
    /// The dealer seat.
    pub dealer: Option<u8>,
    /// The small blind seat.
    pub small_blind_pos: Option<u8>,
    /// The big blind seat.
    pub big_blind_pos: Option<u8>,
    /// The seat that has to act.
    pub current_player: Option<u8>,
    /// The seats revealing their hands in order.
    pub showdown_order: Vec<u8>,
    /// The position of the next seat to reveal in the showdown order.
    pub showdown_cursor: Option<u8>,
}

impl TableSnapshot {
    /// Returns the seat index of the given player.
    pub fn seat_of(&self, player_id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.is_owned_by(player_id))
    }

    /// Returns the first empty seat index.
    pub fn first_empty_seat(&self) -> Option<usize> {
        self.seats
            .iter()
            .position(|s| s.status == SeatStatus::Empty)
    }

    /// Checks if the given player has to act.
    pub fn is_turn(&self, player_id: PlayerId) -> bool {
        self.current_player
            .and_then(|idx| self.seats.get(idx as usize))
            .is_some_and(|s| s.is_owned_by(player_id))
    }

    /// The chips the given seat needs to call.
    pub fn to_call(&self, seat: usize) -> Chips {
        self.seats
            .get(seat)
            .map(|s| self.current_bet - s.bet)
            .unwrap_or_default()
    }

    /// The minimum commitment level for a raise.
    pub fn min_raise(&self) -> Chips {
        self.current_bet + self.big_blind
    }
}

/// A seat in a finished hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSummary {
    /// The seat index.
    pub seat: u8,
    /// The seat owner.
    pub player_id: PlayerId,
    /// The seat owner nickname.
    pub nickname: String,
    /// The chips after the payout.
    pub chips: Chips,
    /// The chips committed in the hand.
    pub total_bet: Chips,
    /// The final seat status.
    pub status: SeatStatus,
    /// The hole cards.
    pub cards: PlayerCards,
    /// The hand category name if the hand was revealed.
    pub hand: Option<String>,
}

/// A winner of a finished hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerSummary {
    /// The seat index.
    pub seat: u8,
    /// The winner id.
    pub player_id: PlayerId,
    /// The winner nickname.
    pub nickname: String,
    /// The chips won.
    pub amount: Chips,
    /// The winning hand description, none if all the other players folded.
    pub hand: Option<String>,
    /// The winner hole cards.
    pub cards: PlayerCards,
}

/// The summary of a finished hand handed to the round recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSummary {
    /// Seconds since the unix epoch when the hand was settled.
    pub played_at: u64,
    /// The table id.
    pub table_id: TableId,
    /// The dealer seat.
    pub dealer: Option<u8>,
    /// The small blind seat.
    pub small_blind_pos: Option<u8>,
    /// The big blind seat.
    pub big_blind_pos: Option<u8>,
    /// The final pot.
    pub pot: Chips,
    /// The community cards.
    pub board: Vec<Card>,
    /// The players that took part in the hand.
    pub seats: Vec<SeatSummary>,
    /// The winners and their payouts.
    pub winners: Vec<WinnerSummary>,
}

impl HandSummary {
    /// Serializes this summary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a summary.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(buf)?)
    }

    /// Returns a copy that covers the hole cards of players that didn't reveal
    /// their hand.
    pub fn redacted(&self) -> Self {
        let mut summary = self.clone();
        for seat in &mut summary.seats {
            if seat.hand.is_none() {
                seat.cards = seat.cards.covered();
            }
        }

        for winner in &mut summary.winners {
            if winner.hand.is_none() {
                winner.cards = winner.cards.covered();
            }
        }

        summary
    }
}
