// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot strategy.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use holdem_bot::{
    Strategy,
    core::{
        message::PlayerAction,
        poker::{Chips, PlayerCards},
        snapshot::{Phase, TableSnapshot},
    },
};

struct RaisePairs;

impl Strategy for RaisePairs {
    fn execute(&mut self, snapshot: &TableSnapshot, seat: usize) -> PlayerAction {
        // Some randomness.
        let p = rand::random::<f64>();

        let state = &snapshot.seats[seat];
        let to_call = snapshot.to_call(seat);

        if let PlayerCards::Cards(c1, c2) = state.cards {
            // Raise preflop with a pair if we haven't raised yet.
            let min_raise = snapshot.min_raise();
            if c1.rank() == c2.rank()
                && snapshot.phase == Phase::PreFlop
                && state.bet <= snapshot.big_blind
                && min_raise - state.bet <= state.chips
                && p > 0.2
            {
                return PlayerAction::Raise { amount: min_raise };
            }
        }

        if p < 0.1 && to_call > Chips::ZERO {
            PlayerAction::Fold
        } else if to_call > Chips::ZERO {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        }
    }
}

#[derive(Debug, Parser)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Number of clients to run.
    #[clap(long, short, value_parser = clap::value_parser!(u8).range(1..=7))]
    clients: u8,
    /// The server WebSocket url (eg. ws://127.0.0.1:9871).
    #[clap(long, short, default_value = "ws://127.0.0.1:9871")]
    url: String,
    /// Help long flag.
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = holdem_bot::Config {
        clients: cli.clients,
        url: cli.url,
    };

    holdem_bot::run(config, || RaisePairs).await
}
