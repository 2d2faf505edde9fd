// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used at a Holdem table.
use serde::{Deserialize, Serialize};
use std::{fmt, iter, ops, sync::atomic};

pub use holdem_eval::{Card, Deck, HandCategory, HandValue, Rank, Suit};

/// A unique table identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableId(u32);

impl TableId {
    /// A table id for an unassigned table.
    pub const NO_TABLE: TableId = TableId(0);

    /// Create a new unique table id.
    pub fn new_id() -> TableId {
        static LAST_ID: atomic::AtomicU32 = atomic::AtomicU32::new(1);
        TableId(LAST_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque player identifier assigned by the server when a client joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Create a new unique player id.
    pub fn new_id() -> PlayerId {
        static LAST_ID: atomic::AtomicU64 = atomic::AtomicU64::new(1);
        PlayerId(LAST_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:04}", self.0)
    }
}

/// Chips amount.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Chips {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl ops::Div<u32> for Chips {
    type Output = Self;

    fn div(self, rhs: u32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl ops::Rem<u32> for Chips {
    type Output = Self;

    fn rem(self, rhs: u32) -> Self::Output {
        Self(self.0 % rhs)
    }
}

impl iter::Sum for Chips {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        if amount >= 10_000_000 {
            write!(f, "{:.1}M", amount as f64 / 1e6)
        } else if amount >= 1_000_000 {
            write!(
                f,
                "{},{:03},{:03}",
                amount / 1_000_000,
                amount % 1_000_000 / 1_000,
                amount % 1000
            )
        } else if amount >= 1_000 {
            write!(f, "{},{:03}", amount / 1000, amount % 1000)
        } else {
            write!(f, "{}", amount)
        }
    }
}

/// The player cards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCards {
    /// The player has no cards.
    #[default]
    None,
    /// The player has cards but their values are covered.
    Covered,
    /// The player cards.
    Cards(Card, Card),
}

impl PlayerCards {
    /// Returns the cards if they are visible.
    pub fn cards(&self) -> Option<[Card; 2]> {
        match self {
            PlayerCards::Cards(c1, c2) => Some([*c1, *c2]),
            _ => None,
        }
    }

    /// Hides the cards values, no cards stay no cards.
    pub fn covered(&self) -> PlayerCards {
        match self {
            PlayerCards::None => PlayerCards::None,
            _ => PlayerCards::Covered,
        }
    }
}

impl fmt::Display for PlayerCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerCards::None => write!(f, "--"),
            PlayerCards::Covered => write!(f, "XX XX"),
            PlayerCards::Cards(c1, c2) => write!(f, "{c1} {c2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chips_formatting() {
        assert_eq!(Chips(123).to_string(), "123");
        assert_eq!(Chips(1_000).to_string(), "1,000");
        assert_eq!(Chips(1_234).to_string(), "1,234");
        assert_eq!(Chips(123_456).to_string(), "123,456");
        assert_eq!(Chips(1_234_567).to_string(), "1,234,567");
        assert_eq!(Chips(123_456_789).to_string(), "123.5M");
    }

    #[test]
    fn chips_arithmetic() {
        let c = Chips::new(100);
        assert_eq!(c - Chips::new(150), Chips::ZERO);
        assert_eq!(Chips::new(u32::MAX) + c, Chips::new(u32::MAX));
        assert_eq!(c / 3, Chips::new(33));
        assert_eq!(c % 3, Chips::new(1));

        let total = [10, 20, 30].into_iter().map(Chips::new).sum::<Chips>();
        assert_eq!(total, Chips::new(60));

        let mut total = [u32::MAX, 1].into_iter().map(Chips::new).sum::<Chips>();
        assert_eq!(total, Chips::new(u32::MAX));
        total += c;
        assert_eq!(total, Chips::new(u32::MAX));
    }

    #[test]
    fn unique_ids() {
        let p1 = PlayerId::new_id();
        let p2 = PlayerId::new_id();
        assert_ne!(p1, p2);
        assert_ne!(TableId::new_id(), TableId::NO_TABLE);
    }

    #[test]
    fn player_cards_cover() {
        let cards = PlayerCards::Cards("AH".parse().unwrap(), "KD".parse().unwrap());
        assert_eq!(cards.covered(), PlayerCards::Covered);
        assert_eq!(PlayerCards::None.covered(), PlayerCards::None);
        assert_eq!(cards.to_string(), "AH KD");
        assert!(PlayerCards::Covered.cards().is_none());
    }
}
