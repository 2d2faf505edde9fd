// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table hand evaluator.
//!
//! Evaluates 5, 6 and 7 cards hands by enumerating every 5 cards subset and
//! classifying it, the best subset gives the hand value. A 7 cards hand has 21
//! subsets so an evaluation is cheap enough for a showdown but not meant for
//! odds computation.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use holdem_eval::*;
//! // 2H, 3H, .., JH
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]).unwrap();
//! let v2 = HandValue::eval(&cards[5..]).unwrap();
//! assert!(v2 > v1);
//! assert_eq!(v2.category(), HandCategory::StraightFlush);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandCategory, HandValue};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, Rank, Suit};
