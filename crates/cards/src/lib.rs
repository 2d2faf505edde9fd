// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.rank().value(), 14);
//! assert_eq!(ah.to_string(), "AH");
//! assert_eq!("AH".parse::<Card>().unwrap(), ah);
//! ```
//!
//! and a [Deck] type for shuffling and dealing the cards of a hand:
//!
//! ```
//! # use holdem_cards::Deck;
//! let mut rng = rand::rng();
//! let mut deck = Deck::shuffled(&mut rng);
//! let hole = (deck.deal(), deck.deal());
//! assert!(hole.0.is_some() && hole.1.is_some());
//! assert_eq!(deck.len(), Deck::SIZE - 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit};
