// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Result, anyhow};
use clap::Parser;
use directories::ProjectDirs;
use holdem_core::poker::Chips;
use holdem_server::{server, table::TableConfig};
use log::error;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 9871)]
    port: u16,
    /// The hands database path, defaults to the user data directory.
    #[clap(long)]
    db: Option<PathBuf>,
    /// The chips a player gets when sitting down.
    #[clap(long, default_value_t = 1_000, value_parser = clap::value_parser!(u32).range(1..))]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    big_blind: u32,
    /// Seconds before a hand starts once all players are ready.
    #[clap(long, default_value_t = 3)]
    countdown_secs: u64,
    /// Milliseconds between showdown reveals.
    #[clap(long, default_value_t = 1_500, value_parser = clap::value_parser!(u64).range(1..))]
    reveal_ms: u64,
}

fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "holdem")
        .ok_or_else(|| anyhow!("Cannot find the user data directory"))?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("holdem.db"))
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => match default_db_path() {
            Ok(path) => path,
            Err(e) => {
                error!("{e}");
                return;
            }
        },
    };

    let config = holdem_server::Config {
        address: cli.address,
        port: cli.port,
        db_path,
        table: TableConfig {
            small_blind: Chips::new(cli.small_blind),
            big_blind: Chips::new(cli.big_blind),
            starting_chips: Chips::new(cli.chips),
            countdown: Duration::from_secs(cli.countdown_secs),
            reveal_interval: Duration::from_millis(cli.reveal_ms),
        },
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
