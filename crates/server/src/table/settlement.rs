// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot settlement.
use holdem_core::poker::{Chips, HandValue};

/// Returns the seats with the best hand in showdown order.
///
/// `hands` pairs each seat in showdown order with its revealed hand, seats
/// that compare equal to the best hand all win.
pub fn winners(hands: &[(usize, &HandValue)]) -> Vec<usize> {
    let Some(best) = hands.iter().map(|(_, hv)| *hv).max() else {
        return vec![];
    };

    hands
        .iter()
        .filter(|(_, hv)| *hv == best)
        .map(|(seat, _)| *seat)
        .collect()
}

/// Splits the pot between winners.
///
/// Each winner gets the integer share, the remainder chips go one each to the
/// first winners in the given order.
pub fn split_pot(pot: Chips, winners: &[usize]) -> Vec<(usize, Chips)> {
    if winners.is_empty() {
        return vec![];
    }

    let count = winners.len() as u32;
    let share = pot / count;
    let remainder = (pot % count).amount() as usize;

    winners
        .iter()
        .enumerate()
        .map(|(idx, seat)| {
            let extra = if idx < remainder {
                Chips::new(1)
            } else {
                Chips::ZERO
            };

            (*seat, share + extra)
        })
        .collect()
}
