// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem table bots.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use holdem_bot::{
    Strategy,
    core::{message::PlayerAction, poker::Chips, snapshot::TableSnapshot},
};

struct AlwaysCallOrCheck;

impl Strategy for AlwaysCallOrCheck {
    fn execute(&mut self, snapshot: &TableSnapshot, seat: usize) -> PlayerAction {
        if snapshot.to_call(seat) > Chips::ZERO {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of clients to run.
    #[clap(long, short, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=7))]
    clients: u8,
    /// The server WebSocket url (eg. ws://127.0.0.1:9871).
    #[clap(long, short, default_value = "ws://127.0.0.1:9871")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = holdem_bot::Config {
        clients: cli.clients,
        url: cli.url,
    };

    holdem_bot::run(config, || AlwaysCallOrCheck).await
}
