// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! A [HandValue] is a hand category plus the list of ranks that break ties
//! between hands of the same category, most significant first. Two values
//! compare by category and then element-wise on the tie breakers, values that
//! compare equal split a pot.
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use holdem_cards::{Card, Rank};

/// The category of a five cards hand, from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pair.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
    /// An ace high straight flush.
    RoyalFlush,
}

impl HandCategory {
    /// The category display name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of the best five cards hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandValue {
    category: HandCategory,
    tie_breakers: Vec<Rank>,
    cards: [Card; 5],
}

impl HandValue {
    /// Evaluates the best five cards hand out of 5, 6 or 7 cards.
    ///
    /// Returns an error if the number of cards is outside this range.
    pub fn eval(cards: &[Card]) -> Result<Self> {
        ensure!(
            (5..=7).contains(&cards.len()),
            "Cannot evaluate a hand with {} cards",
            cards.len()
        );

        let mut best: Option<HandValue> = None;
        for idx in Subsets::new(cards.len()) {
            let value = Self::eval5(idx.map(|i| cards[i]));

            // Keep the first best hand for deterministic results.
            if best.as_ref().is_none_or(|b| value > *b) {
                best = Some(value);
            }
        }

        // Subsets returns at least one subset for 5 or more cards.
        best.ok_or_else(|| anyhow::anyhow!("No five cards subset"))
    }

    /// Classifies exactly five cards.
    pub fn eval5(mut cards: [Card; 5]) -> Self {
        cards.sort_by(|c1, c2| c2.cmp(c1));

        // Group equal ranks, sorting by count and rank so that the group ranks
        // are the tie breakers for all the pairs based categories.
        let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
        for card in &cards {
            match groups.iter_mut().find(|(_, r)| *r == card.rank()) {
                Some((count, _)) => *count += 1,
                None => groups.push((1, card.rank())),
            }
        }
        groups.sort_by(|g1, g2| g2.cmp(g1));

        let ranks = groups.iter().map(|(_, r)| *r).collect::<Vec<_>>();
        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_high = Self::straight_high(&ranks);

        let (category, tie_breakers) = match (straight_high, groups[0].0, groups[1].0) {
            (Some(Rank::Ace), _, _) if is_flush => (HandCategory::RoyalFlush, vec![Rank::Ace]),
            (Some(high), _, _) if is_flush => (HandCategory::StraightFlush, vec![high]),
            (_, 4, _) => (HandCategory::FourOfAKind, ranks),
            (_, 3, 2) => (HandCategory::FullHouse, ranks),
            _ if is_flush => (HandCategory::Flush, ranks),
            (Some(high), _, _) => (HandCategory::Straight, vec![high]),
            (_, 3, _) => (HandCategory::ThreeOfAKind, ranks),
            (_, 2, 2) => (HandCategory::TwoPair, ranks),
            (_, 2, _) => (HandCategory::OnePair, ranks),
            _ => (HandCategory::HighCard, ranks),
        };

        Self {
            category,
            tie_breakers,
            cards,
        }
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The ranks used to compare hands of the same category.
    pub fn tie_breakers(&self) -> &[Rank] {
        &self.tie_breakers
    }

    /// The five cards that make this hand, sorted by descending rank.
    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    /// A human readable description like "Pair of Aces".
    pub fn description(&self) -> String {
        let tb = &self.tie_breakers;
        match self.category {
            HandCategory::RoyalFlush => "Royal Flush".to_string(),
            HandCategory::StraightFlush => format!("Straight Flush, {} high", tb[0].name()),
            HandCategory::FourOfAKind => format!("Four of a Kind, {}", plural(tb[0])),
            HandCategory::FullHouse => {
                format!("Full House, {} full of {}", plural(tb[0]), plural(tb[1]))
            }
            HandCategory::Flush => format!("Flush, {} high", tb[0].name()),
            HandCategory::Straight => format!("Straight, {} high", tb[0].name()),
            HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", plural(tb[0])),
            HandCategory::TwoPair => {
                format!("Two Pair, {} and {}", plural(tb[0]), plural(tb[1]))
            }
            HandCategory::OnePair => format!("Pair of {}", plural(tb[0])),
            HandCategory::HighCard => format!("High Card, {}", tb[0].name()),
        }
    }

    /// Returns the straight high card given five distinct ranks sorted in
    /// descending order, the A-2-3-4-5 wheel is a five high straight.
    fn straight_high(ranks: &[Rank]) -> Option<Rank> {
        if ranks.len() != 5 {
            return None;
        }

        if ranks[0].value() - ranks[4].value() == 4 {
            Some(ranks[0])
        } else if ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce] {
            Some(Rank::Five)
        } else {
            None
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tie_breakers.cmp(&other.tie_breakers))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

fn plural(rank: Rank) -> String {
    match rank {
        Rank::Six => "Sixes".to_string(),
        r => format!("{}s", r.name()),
    }
}

/// Iterator over the indices of all the 5 elements subsets of `n` elements in
/// lexicographic order.
struct Subsets {
    n: usize,
    idx: [usize; 5],
    done: bool,
}

impl Subsets {
    fn new(n: usize) -> Self {
        Self {
            n,
            idx: [0, 1, 2, 3, 4],
            done: n < 5,
        }
    }
}

impl Iterator for Subsets {
    type Item = [usize; 5];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.idx;

        // Find the rightmost index that can move forward and reset the ones
        // after it to consecutive positions.
        let mut i = 5;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }

            i -= 1;
            if self.idx[i] < self.n - 5 + i {
                self.idx[i] += 1;
                for j in i + 1..5 {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;
    use holdem_cards::Deck;
    use rand::prelude::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&cards(s)).unwrap()
    }

    fn ranks(values: &[u8]) -> Vec<Rank> {
        values.iter().map(|v| Rank::try_from(*v).unwrap()).collect()
    }

    #[test]
    fn subsets_count() {
        assert_eq!(Subsets::new(5).count(), 1);
        assert_eq!(Subsets::new(6).count(), 6);
        assert_eq!(Subsets::new(7).count(), 21);
        assert_eq!(Subsets::new(4).count(), 0);

        let unique = Subsets::new(7).collect::<AHashSet<_>>();
        assert_eq!(unique.len(), 21);
        assert!(unique.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
    }

    #[test]
    fn invalid_hand_size() {
        assert!(HandValue::eval(&cards("AH KH QH JH")).is_err());
        assert!(HandValue::eval(&cards("AH KH QH JH TH 9H 8H 7H")).is_err());
    }

    #[test]
    fn categories() {
        let hv = eval("AH KH QH JH TH 2C 3D");
        assert_eq!(hv.category(), HandCategory::RoyalFlush);

        let hv = eval("9S KS QS JS TS 2C 3D");
        assert_eq!(hv.category(), HandCategory::StraightFlush);
        assert_eq!(hv.tie_breakers(), ranks(&[13]));

        let hv = eval("9S 9H 9D 9C KS 2C 3D");
        assert_eq!(hv.category(), HandCategory::FourOfAKind);
        assert_eq!(hv.tie_breakers(), ranks(&[9, 13]));

        let hv = eval("9S 9H 9D KC KS 2C 2D");
        assert_eq!(hv.category(), HandCategory::FullHouse);
        assert_eq!(hv.tie_breakers(), ranks(&[9, 13]));

        let hv = eval("2H 7H 9H JH KH QC 3D");
        assert_eq!(hv.category(), HandCategory::Flush);
        assert_eq!(hv.tie_breakers(), ranks(&[13, 11, 9, 7, 2]));

        let hv = eval("5C 6D 7H 8S 9C KD 2H");
        assert_eq!(hv.category(), HandCategory::Straight);
        assert_eq!(hv.tie_breakers(), ranks(&[9]));

        let hv = eval("5C 5D 5H 8S 9C KD 2H");
        assert_eq!(hv.category(), HandCategory::ThreeOfAKind);
        assert_eq!(hv.tie_breakers(), ranks(&[5, 13, 9]));

        let hv = eval("5C 5D 8H 8S 9C KD 2H");
        assert_eq!(hv.category(), HandCategory::TwoPair);
        assert_eq!(hv.tie_breakers(), ranks(&[8, 5, 13]));

        let hv = eval("5C 5D 7H 8S 9C KD 2H");
        assert_eq!(hv.category(), HandCategory::OnePair);
        assert_eq!(hv.tie_breakers(), ranks(&[5, 13, 9, 8]));

        let hv = eval("5C 3D 7H 8S 9C KD 2H");
        assert_eq!(hv.category(), HandCategory::HighCard);
        assert_eq!(hv.tie_breakers(), ranks(&[13, 9, 8, 7, 5]));
    }

    #[test]
    fn category_order_is_total() {
        let hands = [
            "5C 3D 7H 8S 9C KD 2H",
            "5C 5D 7H 8S 9C KD 2H",
            "5C 5D 8H 8S 9C KD 2H",
            "5C 5D 5H 8S 9C KD 2H",
            "5C 6D 7H 8S 9C KD 2H",
            "2H 7H 9H JH KH QC 3D",
            "9S 9H 9D KC KS 2C 2D",
            "9S 9H 9D 9C KS 2C 3D",
            "9S KS QS JS TS 2C 3D",
            "AH KH QH JH TH 2C 3D",
        ];

        let values = hands.iter().map(|h| eval(h)).collect::<Vec<_>>();
        for w in values.windows(2) {
            assert!(w[0] < w[1], "{} < {}", w[0], w[1]);
            assert!(w[0].category() < w[1].category());
        }
    }

    #[test]
    fn wheel_is_five_high() {
        let wheel = eval("AC 2D 3H 4S 5C KD 9H");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert_eq!(wheel.tie_breakers(), ranks(&[5]));

        let six_high = eval("6C 2D 3H 4S 5C KD 9H");
        assert!(six_high > wheel);

        let steel_wheel = eval("AC 2C 3C 4C 5C KD 9H");
        assert_eq!(steel_wheel.category(), HandCategory::StraightFlush);
        assert_eq!(steel_wheel.tie_breakers(), ranks(&[5]));

        // A-K-Q-J-T is a straight but K-A-2-3-4 is not.
        let broadway = eval("AC KD QH JS TC 2D 9H");
        assert_eq!(broadway.tie_breakers(), ranks(&[14]));
        let no_straight = eval("KC AD 2H 3S 4C 8D 9H");
        assert_eq!(no_straight.category(), HandCategory::HighCard);
    }

    #[test]
    fn best_subset_wins() {
        // The board pairs but the flush is better.
        let hv = eval("AH 2H KH KD 7H 9H KC");
        assert_eq!(hv.category(), HandCategory::Flush);
        assert_eq!(hv.tie_breakers(), ranks(&[14, 13, 9, 7, 2]));

        // Two trips make a full house with the higher trips.
        let hv = eval("7H 7D 7C 9H 9D 9C 2S");
        assert_eq!(hv.category(), HandCategory::FullHouse);
        assert_eq!(hv.tie_breakers(), ranks(&[9, 7]));

        // Three pairs keep the best two and the best kicker.
        let hv = eval("7H 7D 9C 9H 2D 2C KS");
        assert_eq!(hv.category(), HandCategory::TwoPair);
        assert_eq!(hv.tie_breakers(), ranks(&[9, 7, 13]));
    }

    #[test]
    fn kicker_breaks_tie() {
        // Board AH KD QC 4S 3H.
        let p0 = eval("AS 9C AH KD QC 4S 3H");
        let p1 = eval("AD 8C AH KD QC 4S 3H");
        assert_eq!(p0.category(), HandCategory::OnePair);
        assert_eq!(p0.tie_breakers(), ranks(&[14, 13, 12, 9]));
        assert_eq!(p1.tie_breakers(), ranks(&[14, 13, 12, 8]));
        assert!(p0 > p1);
    }

    #[test]
    fn disjoint_hands_split() {
        let h1 = eval("AS KS QD JC 9H 3D 2C");
        let h2 = eval("AH KH QC JD 9S 4C 2D");
        assert_eq!(h1.category(), HandCategory::HighCard);
        assert_eq!(h1, h2);
        assert_eq!(h1.cmp(&h2), Ordering::Equal);

        let s1 = eval("5S 6H 7D 8C 9S 2D 2C");
        let s2 = eval("5H 6D 7C 8S 9D KC KH");
        assert_eq!(s1.category(), HandCategory::Straight);
        assert_eq!(s1, s2);
    }

    #[test]
    fn eval_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..200 {
            let hand = Deck::shuffled(&mut rng)
                .into_iter()
                .take(7)
                .collect::<Vec<_>>();

            let v1 = HandValue::eval(&hand).unwrap();
            let v2 = HandValue::eval(&hand).unwrap();
            assert_eq!(v1, v2);
            assert_eq!(v1.cards(), v2.cards());

            // The order of the cards doesn't change the value.
            let mut reversed = hand.clone();
            reversed.reverse();
            assert_eq!(HandValue::eval(&reversed).unwrap(), v1);

            // The best cards are a subset of the hand.
            assert!(v1.cards().iter().all(|c| hand.contains(c)));
        }
    }

    #[test]
    fn descriptions() {
        assert_eq!(eval("AS 9C AH KD QC 4S 3H").description(), "Pair of Aces");
        assert_eq!(
            eval("AC 2D 3H 4S 5C KD 9H").description(),
            "Straight, Five high"
        );
        assert_eq!(
            eval("6S 6H 6D KC KS 2C 3D").description(),
            "Full House, Sixes full of Kings"
        );
        assert_eq!(eval("AH KH QH JH TH 2C 3D").to_string(), "Royal Flush");
        assert_eq!(HandCategory::TwoPair.to_string(), "Two Pair");
    }
}
