// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table types.
//!
//! A table runs in its own task that processes player commands and timer
//! ticks one at a time, every accepted transition is broadcast to the table
//! observers as a [TableSnapshot](holdem_core::snapshot::TableSnapshot).
use ahash::AHashMap;
use anyhow::{Result, bail, ensure};
use log::{error, info, warn};
use std::{sync::Arc, time::Duration};
use tokio::sync::{broadcast, mpsc, oneshot};

use holdem_core::{
    message::{Command, Message, TableError},
    poker::{Chips, PlayerId, TableId},
};

use crate::db::RoundRecorder;

mod seat;
mod settlement;
mod state;
mod timer;

use state::State;
use timer::{Timer, TimerEvent};

/// The number of seats at a table.
pub const SEATS: usize = 7;

/// Table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind, also the minimum raise increment.
    pub big_blind: Chips,
    /// The chips a player gets when sitting down.
    pub starting_chips: Chips,
    /// Delay before a hand starts once all players are ready.
    pub countdown: Duration,
    /// Interval between showdown reveals.
    pub reveal_interval: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            starting_chips: Chips::new(1_000),
            countdown: Duration::from_secs(3),
            reveal_interval: Duration::from_millis(1_500),
        }
    }
}

impl TableConfig {
    /// Checks the blinds and that a full table of starting stacks fits the
    /// chips range.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.small_blind > Chips::ZERO,
            "The small blind must be positive"
        );
        ensure!(
            self.small_blind <= self.big_blind,
            "The small blind {} is greater than the big blind {}",
            self.small_blind,
            self.big_blind
        );
        ensure!(
            self.starting_chips >= self.big_blind,
            "The starting chips must cover the big blind"
        );
        ensure!(
            self.starting_chips
                .amount()
                .checked_mul(SEATS as u32)
                .is_some(),
            "The starting chips {} are too many for {SEATS} seats",
            self.starting_chips
        );

        Ok(())
    }
}

/// A table shared by all players who joined the room.
#[derive(Debug, Clone)]
pub struct Table {
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
}

/// A message sent to player connections.
#[derive(Debug)]
pub enum TableMessage {
    /// Sends a message to a client.
    Send(Message),
    /// Close a client connection.
    Close,
}

/// Command for the table task.
#[derive(Debug)]
enum TableCommand {
    /// Join this table as an observer.
    Join {
        player_id: PlayerId,
        nickname: String,
        table_tx: mpsc::Sender<TableMessage>,
        resp_tx: oneshot::Sender<Result<()>>,
    },
    /// Leave this table.
    Leave(PlayerId),
    /// Handle a player command.
    Command {
        player_id: PlayerId,
        command: Command,
        resp_tx: oneshot::Sender<Result<(), TableError>>,
    },
    /// A timer fired.
    Tick { event: TimerEvent, generation: u64 },
}

impl Table {
    /// Creates a new table that manages players and game state.
    pub fn new(
        config: TableConfig,
        recorder: Arc<dyn RoundRecorder>,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(128);
        let table_id = TableId::new_id();

        let mut task = TableTask {
            state: State::new(table_id, config.clone()),
            config,
            observers: AHashMap::default(),
            recorder,
            countdown: Timer::new(TimerEvent::Countdown),
            pacer: Timer::new(TimerEvent::Reveal),
            commands_tx: commands_tx.downgrade(),
            commands_rx,
            shutdown_broadcast_rx,
            _shutdown_complete_tx: shutdown_complete_tx,
        };

        tokio::spawn(async move {
            if let Err(err) = task.run().await {
                error!("Table {table_id} error {err}");
            }

            info!("Table task for table {table_id} stopped");
        });

        Self { commands_tx }
    }

    /// A player joins this table.
    ///
    /// Returns error if the player has already joined.
    pub async fn join(
        &self,
        player_id: PlayerId,
        nickname: &str,
        table_tx: mpsc::Sender<TableMessage>,
    ) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(TableCommand::Join {
                player_id,
                nickname: nickname.to_string(),
                table_tx,
                resp_tx,
            })
            .await?;

        resp_rx.await?
    }

    /// A player leaves the table.
    pub async fn leave(&self, player_id: PlayerId) {
        let _ = self.commands_tx.send(TableCommand::Leave(player_id)).await;
    }

    /// Handle a command from a player.
    ///
    /// A rejected command returns a [TableError].
    pub async fn command(&self, player_id: PlayerId, command: Command) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.commands_tx
            .send(TableCommand::Command {
                player_id,
                command,
                resp_tx,
            })
            .await?;

        resp_rx.await??;
        Ok(())
    }
}

/// A player connection that receives table updates.
#[derive(Debug)]
struct Observer {
    nickname: String,
    table_tx: mpsc::Sender<TableMessage>,
}

struct TableTask {
    /// The game state.
    state: State,
    /// Table configuration.
    config: TableConfig,
    /// Connected players.
    observers: AHashMap<PlayerId, Observer>,
    /// Settled hands recorder.
    recorder: Arc<dyn RoundRecorder>,
    /// Starts a hand when all players are ready.
    countdown: Timer,
    /// Paces the showdown reveals.
    pacer: Timer,
    /// Sender for the timers, weak so that the task stops when all tables
    /// handles are dropped.
    commands_tx: mpsc::WeakSender<TableCommand>,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
    /// Channel for listening shutdown notification.
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    /// Sender that drops when this table is done.
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl TableTask {
    async fn run(&mut self) -> Result<()> {
        let res = loop {
            tokio::select! {
                // Server is shutting down exit this task.
                _ = self.shutdown_broadcast_rx.recv() => break Ok(()),
                // We have received a command.
                res = self.commands_rx.recv() => match res {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break Ok(()),
                },
            }
        };

        self.countdown.cancel();
        self.pacer.cancel();

        for observer in self.observers.values() {
            let _ = observer.table_tx.send(TableMessage::Close).await;
        }

        res
    }

    async fn handle_command(&mut self, cmd: TableCommand) {
        match cmd {
            TableCommand::Join {
                player_id,
                nickname,
                table_tx,
                resp_tx,
            } => {
                let res = self.join(player_id, nickname, table_tx).await;
                let _ = resp_tx.send(res);
            }
            TableCommand::Leave(player_id) => {
                if let Some(observer) = self.observers.remove(&player_id) {
                    info!("Player {player_id} {} left the room", observer.nickname);
                }

                let res = self.state.disconnect(player_id);
                self.after_transition(res).await;
            }
            TableCommand::Command {
                player_id,
                command,
                resp_tx,
            } => {
                let res = self.command(player_id, command);
                let _ = resp_tx.send(res.clone());
                self.after_transition(res).await;
            }
            TableCommand::Tick { event, generation } => {
                self.tick(event, generation).await;
            }
        }
    }

    async fn join(
        &mut self,
        player_id: PlayerId,
        nickname: String,
        table_tx: mpsc::Sender<TableMessage>,
    ) -> Result<()> {
        if self.observers.contains_key(&player_id) {
            bail!("Player {player_id} has already joined");
        }

        info!("Player {player_id} {nickname} joined the room");

        let msg = Message::RoomJoined {
            player_id,
            table_id: self.state.table_id(),
            seats: SEATS as u8,
        };
        let _ = table_tx.send(TableMessage::Send(msg)).await;

        let snapshot = self.state.snapshot(Some(player_id));
        let msg = Message::Snapshot(Box::new(snapshot));
        let _ = table_tx.send(TableMessage::Send(msg)).await;

        self.observers
            .insert(player_id, Observer { nickname, table_tx });

        Ok(())
    }

    fn command(&mut self, player_id: PlayerId, command: Command) -> Result<(), TableError> {
        match command {
            Command::SitDown { seat } => {
                let nickname = self
                    .observers
                    .get(&player_id)
                    .map(|o| o.nickname.clone())
                    .unwrap_or_default();
                self.state.sit_down(player_id, &nickname, seat as usize)
            }
            Command::LeaveSeat { seat } => self.state.leave_seat(player_id, seat as usize),
            Command::SetReady(ready) => self.state.set_ready(player_id, ready),
            Command::StartGame => self.state.start_game(player_id),
            Command::Action(action) => self.state.act(player_id, action),
        }
    }

    async fn tick(&mut self, event: TimerEvent, generation: u64) {
        let res = match event {
            TimerEvent::Countdown => {
                if !self.countdown.accepts(generation) {
                    return;
                }

                self.countdown.cancel();
                self.state.start_hand()
            }
            TimerEvent::Reveal => {
                if !self.pacer.accepts(generation) {
                    return;
                }

                self.state.advance_showdown()
            }
        };

        self.after_transition(res).await;
    }

    async fn after_transition(&mut self, res: Result<(), TableError>) {
        match res {
            Ok(()) => {}
            Err(err) if err.is_fatal() => {
                error!("Table {} {err}, aborting hand", self.state.table_id());
                self.state.abort_hand();
                self.countdown.cancel();
                self.pacer.cancel();
            }
            Err(err) => {
                warn!("Table {} rejected command {err}", self.state.table_id());
                return;
            }
        }

        if let Some(summary) = self.state.take_summary() {
            let msg = Message::HandFinished(Box::new(summary.redacted()));
            self.recorder.record(summary);
            self.broadcast(msg).await;
        }

        self.sync_timers();
        self.broadcast_snapshots().await;
    }

    /// Starts or stops the timers to follow the table state.
    fn sync_timers(&mut self) {
        let Some(commands_tx) = self.commands_tx.upgrade() else {
            return;
        };

        if self.state.is_revealing() {
            if !self.pacer.is_started() {
                self.pacer
                    .start_interval(self.config.reveal_interval, commands_tx.clone());
            }
        } else {
            self.pacer.cancel();
        }

        // Any change restarts the countdown.
        self.countdown.cancel();
        if self.state.can_start() {
            self.countdown
                .start_once(self.config.countdown, commands_tx);
        }
    }

    async fn broadcast(&self, msg: Message) {
        for observer in self.observers.values() {
            let _ = observer
                .table_tx
                .send(TableMessage::Send(msg.clone()))
                .await;
        }
    }

    async fn broadcast_snapshots(&self) {
        for (player_id, observer) in &self.observers {
            let snapshot = self.state.snapshot(Some(*player_id));
            let msg = Message::Snapshot(Box::new(snapshot));
            let _ = observer.table_tx.send(TableMessage::Send(msg)).await;
        }
    }
}
