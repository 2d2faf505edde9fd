// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Deals random hands and prints the showdown results:
//
// ```bash
// $ cargo r --example showdown -- --players 4 --hands 3 --seed 42
// ```
use clap::{Parser, value_parser};
use rand::prelude::*;

use holdem_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players at the table.
    #[clap(long, short, default_value_t = 3, value_parser = value_parser!(u8).range(2..=7))]
    players: u8,
    /// Number of hands to deal.
    #[clap(long, default_value_t = 5)]
    hands: usize,
    /// Optional seed for reproducible deals.
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    for n in 1..=cli.hands {
        let mut deck = Deck::shuffled(&mut rng);
        let mut deal = || deck.deal().ok_or_else(|| anyhow::anyhow!("Empty deck"));

        let mut pairs = Vec::with_capacity(cli.players as usize);
        for _ in 0..cli.players {
            pairs.push([deal()?, deal()?]);
        }

        let board = [deal()?, deal()?, deal()?, deal()?, deal()?];
        println!(
            "Hand {n}: board {}",
            board.map(|c| c.to_string()).join(" ")
        );

        let mut values = Vec::with_capacity(pairs.len());
        for (idx, pair) in pairs.iter().enumerate() {
            let mut hand = pair.to_vec();
            hand.extend_from_slice(&board);
            let value = HandValue::eval(&hand)?;
            println!("  P{idx} {} {}  {}", pair[0], pair[1], value);
            values.push(value);
        }

        if let Some(best) = values.iter().max() {
            let winners = values
                .iter()
                .enumerate()
                .filter(|(_, v)| *v == best)
                .map(|(idx, _)| format!("P{idx}"))
                .collect::<Vec<_>>();
            println!("  Winners: {}\n", winners.join(", "));
        }
    }

    Ok(())
}
