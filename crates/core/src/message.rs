// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages between the client and server.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    poker::{Chips, PlayerId, TableId},
    snapshot::{HandSummary, TableSnapshot},
};

/// Message exchanged by a client and a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// Join the room with a nickname.
    JoinRoom {
        /// The player nickname.
        nickname: String,
    },
    /// Room joined confirmation.
    RoomJoined {
        /// The id assigned to the player.
        player_id: PlayerId,
        /// The room table.
        table_id: TableId,
        /// The number of seats at the table.
        seats: u8,
    },
    /// A player intent for the table.
    Command(Command),
    /// The table state after a transition.
    Snapshot(Box<TableSnapshot>),
    /// The last command was rejected.
    Rejected(TableError),
    /// A hand has been settled.
    HandFinished(Box<HandSummary>),
    /// Request the most recent hands.
    GetHistory {
        /// The maximum number of hands.
        limit: u16,
    },
    /// The most recent hands, newest first.
    History(Vec<HandSummary>),
    /// An error message.
    Error(String),
}

impl Message {
    /// Serializes this message.
    pub fn serialize(&self) -> Vec<u8> {
        bincode::serialize(self).expect("Should serialize message")
    }

    /// Deserializes a message.
    pub fn deserialize(buf: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize::<Message>(buf)?)
    }
}

/// A player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Take the seat at the given index.
    SitDown {
        /// The seat index.
        seat: u8,
    },
    /// Leave the seat at the given index.
    LeaveSeat {
        /// The seat index.
        seat: u8,
    },
    /// Set the ready flag for the next hand.
    SetReady(bool),
    /// Start a hand.
    StartGame,
    /// A betting action.
    Action(PlayerAction),
}

/// A player betting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Give up the hand.
    Fold,
    /// Match the current bet, all-in if short.
    Call,
    /// Pass with no bet outstanding.
    Check,
    /// Raise the commitment for this round to `amount`.
    Raise {
        /// The total commitment level for this round.
        amount: Chips,
    },
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Fold => "FOLD",
            PlayerAction::Call => "CALL",
            PlayerAction::Check => "CHECK",
            PlayerAction::Raise { .. } => "RAISE",
        }
    }
}

/// A rejected table transition.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TableError {
    /// The seat is occupied, out of range or the player already sits.
    #[error("seat unavailable")]
    SeatUnavailable,
    /// The command is not valid in the current table status or phase.
    #[error("wrong phase or status")]
    WrongPhaseOrStatus,
    /// Another player has to act.
    #[error("not your turn")]
    NotYourTurn,
    /// The player already acted, folded or is all-in.
    #[error("cannot act")]
    CannotAct,
    /// Check with a bet outstanding.
    #[error("cannot check, there is a bet outstanding")]
    IllegalCheck,
    /// The raise is below the minimum.
    #[error("raise below the minimum of {min}")]
    BelowMinimumRaise {
        /// The minimum raise level.
        min: Chips,
    },
    /// The player doesn't have enough chips.
    #[error("insufficient chips")]
    InsufficientChips,
    /// Fewer than two ready players with chips.
    #[error("insufficient players")]
    InsufficientPlayers,
    /// The player doesn't own a seat.
    #[error("not seated")]
    NotSeated,
    /// Some seated player with chips is not ready.
    #[error("players not ready")]
    PlayersNotReady,
    /// The table state is inconsistent, the hand is aborted.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl TableError {
    /// Checks if this error aborts the hand.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TableError::InvariantViolation(_))
    }
}
