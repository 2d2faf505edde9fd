// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Holdem server entry point.
use anyhow::{Result, anyhow, bail};
use log::{error, info};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::{
    net::{TcpListener, TcpStream},
    signal,
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use holdem_core::{
    connection::{self, Connection},
    message::{Message, TableError},
    poker::PlayerId,
    snapshot::HandSummary,
};

use crate::{
    db::Db,
    table::{Table, TableConfig, TableMessage},
};

/// Maximum number of hands returned by a history request.
const MAX_HISTORY: u16 = 100;

/// Server config.
#[derive(Debug)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// The hands database path.
    pub db_path: PathBuf,
    /// The table configuration.
    pub table: TableConfig,
}

/// The server that handles client connections.
struct Server {
    /// The server room table.
    table: Table,
    /// The hands database.
    db: Db,
    /// The server listener.
    listener: TcpListener,
    /// Shutdown notification channel.
    shutdown_broadcast_tx: broadcast::Sender<()>,
    /// Shutdown sender cloned by each connection.
    shutdown_complete_tx: mpsc::Sender<()>,
}

/// Client connection handler.
struct Handler {
    /// The room table.
    table: Table,
    /// The hands database.
    db: Db,
    /// This handler player id once joined.
    player_id: Option<PlayerId>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this connection is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

/// Server entry point.
pub async fn run(config: Config) -> Result<()> {
    config.table.validate()?;

    info!("Opening hands database {}", config.db_path.display());
    let db = Db::open(&config.db_path)?;

    let addr = format!("{}:{}", config.address, config.port);
    info!("Starting server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    let shutdown_signal = signal::ctrl_c();
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);
    let mut server = Server::new(listener, db, config.table, shutdown_complete_tx);

    tokio::select! {
        res = server.run() => {
            res.map_err(|e| anyhow!("Tcp listener accept error: {e}"))?;
        }
        _ = shutdown_signal => {
            info!("Received shutdown signal...");
        }
    }

    // Wait for all connection to shutdown.
    let Server {
        shutdown_broadcast_tx,
        shutdown_complete_tx,
        ..
    } = server;

    // Notify all connections to start shutdown then wait for all connections to
    // terminate and drop their shutdown channel.
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    Ok(())
}

impl Server {
    fn new(
        listener: TcpListener,
        db: Db,
        config: TableConfig,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        let (shutdown_broadcast_tx, _) = broadcast::channel(1);

        let table = Table::new(
            config,
            Arc::new(db.clone()),
            shutdown_broadcast_tx.subscribe(),
            shutdown_complete_tx.clone(),
        );

        Self {
            table,
            db,
            listener,
            shutdown_broadcast_tx,
            shutdown_complete_tx,
        }
    }

    /// Runs the server.
    async fn run(&mut self) -> Result<()> {
        loop {
            let (socket, addr) = self.accept_with_retry().await?;
            info!("Accepted connection from {addr}");

            let mut handler = Handler {
                table: self.table.clone(),
                db: self.db.clone(),
                player_id: None,
                shutdown_broadcast_rx: self.shutdown_broadcast_tx.subscribe(),
                _shutdown_complete_tx: self.shutdown_complete_tx.clone(),
            };

            // Spawn a task to handle connection messages.
            tokio::spawn(async move {
                if let Err(err) = handler.run(socket).await {
                    error!("Connection to {addr} {err}");
                }

                info!("Connection to {addr} closed");
            });
        }
    }

    /// Accepts a connection with retries.
    async fn accept_with_retry(&self) -> Result<(TcpStream, SocketAddr)> {
        let mut retry = 0;
        loop {
            match self.listener.accept().await {
                Ok((socket, addr)) => {
                    return Ok((socket, addr));
                }
                Err(err) => {
                    if retry == 5 {
                        return Err(err.into());
                    }
                }
            }

            time::sleep(Duration::from_secs(1 << retry)).await;
            retry += 1;
        }
    }
}

impl Handler {
    /// Handle connection messages.
    async fn run(&mut self, socket: TcpStream) -> Result<()> {
        let mut conn = connection::accept_async(socket).await?;
        let (table_tx, mut table_rx) = mpsc::channel(128);

        let res = loop {
            tokio::select! {
                _ = self.shutdown_broadcast_rx.recv() => {
                    break Ok(());
                }
                // A message from the client.
                res = conn.recv() => match res {
                    Some(Ok(msg)) => {
                        let res = self.handle_message(&mut conn, msg, &table_tx).await;
                        if res.is_err() {
                            break res;
                        }
                    },
                    Some(Err(err)) => break Err(err),
                    None => break Ok(()),
                },
                // A message from the table.
                res = table_rx.recv() => match res {
                    Some(TableMessage::Send(msg)) => {
                        if let Err(err) = conn.send(&msg).await {
                            break Err(err);
                        }
                    }
                    Some(TableMessage::Close) | None => break Ok(()),
                },
            }
        };

        conn.close().await;

        if let Some(player_id) = self.player_id {
            self.table.leave(player_id).await;
        }

        res
    }

    async fn handle_message(
        &mut self,
        conn: &mut Connection,
        msg: Message,
        table_tx: &mpsc::Sender<TableMessage>,
    ) -> Result<()> {
        match msg {
            Message::JoinRoom { nickname } => {
                let nickname = nickname.trim();
                if nickname.is_empty() {
                    conn.send(&Message::Error("Empty nickname".to_string()))
                        .await?;
                    return Ok(());
                }

                if self.player_id.is_some() {
                    conn.send(&Message::Error("Already joined".to_string()))
                        .await?;
                    return Ok(());
                }

                let player_id = PlayerId::new_id();
                self.table
                    .join(player_id, nickname, table_tx.clone())
                    .await?;
                self.player_id = Some(player_id);
            }
            Message::Command(command) => {
                let Some(player_id) = self.player_id else {
                    bail!("Invalid command, the player didn't join the room");
                };

                if let Err(err) = self.table.command(player_id, command).await {
                    match err.downcast::<TableError>() {
                        Ok(err) => conn.send(&Message::Rejected(err)).await?,
                        Err(err) => return Err(err),
                    }
                }
            }
            Message::GetHistory { limit } => {
                let limit = limit.min(MAX_HISTORY) as usize;
                let hands = self.db.load_hands(limit).await?;
                let hands = hands.iter().map(HandSummary::redacted).collect();
                conn.send(&Message::History(hands)).await?;
            }
            msg => bail!("Unexpected client message {msg:?}"),
        }

        Ok(())
    }
}
