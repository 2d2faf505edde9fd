// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated holdem client.
use anyhow::Result;
use log::{info, warn};
use rand::prelude::*;
use tokio::{
    sync::{broadcast, mpsc},
    time::{self, Duration},
};

use holdem_core::{
    connection::{self, Connection},
    message::{Command, Message, PlayerAction},
    poker::{Chips, PlayerId},
    snapshot::{TableSnapshot, TableStatus},
};

/// A holdem bot strategy.
pub trait Strategy: Send + 'static {
    /// Returns the action for `seat` when it is the seat turn to act.
    fn execute(&mut self, snapshot: &TableSnapshot, seat: usize) -> PlayerAction;
}

/// Holdem client.
pub struct Client<S: Strategy> {
    player: Player<S>,
    conn: Connection,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl<S: Strategy> Client<S> {
    /// Creates a new client that joins the room at `addr`.
    pub async fn new(
        strategy: S,
        nickname: String,
        addr: &str,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        _shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Result<Self> {
        let mut conn = connection::connect_async(addr).await?;

        // Request to join the room with the given nickname.
        conn.send(&Message::JoinRoom {
            nickname: nickname.clone(),
        })
        .await?;

        Ok(Self {
            player: Player::new(strategy, nickname),
            conn,
            shutdown_broadcast_rx,
            _shutdown_complete_tx,
        })
    }

    /// Runs the client message loop.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let msg = tokio::select! {
                res = self.conn.recv() => match res {
                    Some(Ok(msg)) => msg,
                    Some(Err(err)) => return Err(err),
                    None => return Ok(()),
                },
                _ = self.shutdown_broadcast_rx.recv() => {
                    self.conn.close().await;
                    return Ok(());
                }
            };

            if let Some(command) = self.player.handle_message(msg) {
                if matches!(command, Command::Action(_)) {
                    let delay = rand::rng().random_range(500..1500);
                    time::sleep(Duration::from_millis(delay)).await;
                }

                self.conn.send(&Message::Command(command)).await?;
            }
        }
    }
}

/// The client decisions given the server messages.
struct Player<S> {
    strategy: S,
    nickname: String,
    player_id: Option<PlayerId>,
}

impl<S: Strategy> Player<S> {
    fn new(strategy: S, nickname: String) -> Self {
        Self {
            strategy,
            nickname,
            player_id: None,
        }
    }

    /// Returns the command to send in response to a server message.
    fn handle_message(&mut self, msg: Message) -> Option<Command> {
        match msg {
            Message::RoomJoined { player_id, .. } => {
                info!("{} joined as {player_id}", self.nickname);
                self.player_id = Some(player_id);
                None
            }
            Message::Snapshot(snapshot) => self.next_command(&snapshot),
            Message::Rejected(err) => {
                warn!("{} command rejected {err}", self.nickname);
                None
            }
            Message::HandFinished(summary) => {
                for winner in &summary.winners {
                    info!("{} wins {}", winner.nickname, winner.amount);
                }

                None
            }
            Message::Error(err) => {
                warn!("{} server error {err}", self.nickname);
                None
            }
            _ => None,
        }
    }

    fn next_command(&mut self, snapshot: &TableSnapshot) -> Option<Command> {
        let player_id = self.player_id?;

        let Some(seat) = snapshot.seat_of(player_id) else {
            // Sit at the first empty seat between hands.
            if snapshot.status != TableStatus::Waiting {
                return None;
            }

            return snapshot
                .first_empty_seat()
                .map(|seat| Command::SitDown { seat: seat as u8 });
        };

        let state = &snapshot.seats[seat];
        if snapshot.status == TableStatus::Waiting && !state.is_ready && state.chips > Chips::ZERO
        {
            return Some(Command::SetReady(true));
        }

        if snapshot.is_turn(player_id) {
            let action = self.strategy.execute(snapshot, seat);
            return Some(Command::Action(action));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::{
        poker::{PlayerCards, TableId},
        snapshot::{Phase, SeatSnapshot, SeatStatus},
    };

    struct Caller;

    impl Strategy for Caller {
        fn execute(&mut self, snapshot: &TableSnapshot, seat: usize) -> PlayerAction {
            if snapshot.to_call(seat) > Chips::ZERO {
                PlayerAction::Call
            } else {
                PlayerAction::Check
            }
        }
    }

    fn seat(player_id: Option<PlayerId>, is_ready: bool) -> SeatSnapshot {
        SeatSnapshot {
            player_id,
            nickname: String::default(),
            status: if player_id.is_some() {
                SeatStatus::Sitting
            } else {
                SeatStatus::Empty
            },
            chips: Chips::new(1_000),
            cards: PlayerCards::None,
            bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            has_acted: false,
            is_ready,
            is_away: false,
            hand: None,
            payout: Chips::ZERO,
        }
    }

    fn snapshot(seats: Vec<SeatSnapshot>) -> TableSnapshot {
        TableSnapshot {
            table_id: TableId::new_id(),
            status: TableStatus::Waiting,
            phase: Phase::None,
            seats,
            board: vec![],
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            dealer: None,
            small_blind_pos: None,
            big_blind_pos: None,
            current_player: None,
            showdown_order: vec![],
            showdown_cursor: None,
        }
    }

    fn joined_player() -> (PlayerId, Player<Caller>) {
        let player_id = PlayerId::new_id();
        let mut player = Player::new(Caller, "Alice".to_string());
        let msg = Message::RoomJoined {
            player_id,
            table_id: TableId::new_id(),
            seats: 7,
        };
        assert!(player.handle_message(msg).is_none());
        (player_id, player)
    }

    #[test]
    fn sits_at_first_empty_seat() {
        let (_, mut player) = joined_player();
        let other = Some(PlayerId::new_id());
        let snapshot = snapshot(vec![seat(other, true), seat(None, false)]);

        let cmd = player.handle_message(Message::Snapshot(Box::new(snapshot.clone())));
        assert_eq!(cmd, Some(Command::SitDown { seat: 1 }));

        // No seats while a hand is playing.
        let mut playing = snapshot;
        playing.status = TableStatus::Playing;
        assert!(player.next_command(&playing).is_none());
    }

    #[test]
    fn ready_then_act() {
        let (player_id, mut player) = joined_player();
        let other = Some(PlayerId::new_id());

        let mut snapshot = snapshot(vec![seat(other, true), seat(Some(player_id), false)]);
        assert_eq!(
            player.next_command(&snapshot),
            Some(Command::SetReady(true))
        );

        snapshot.seats[1].is_ready = true;
        assert!(player.next_command(&snapshot).is_none());

        snapshot.status = TableStatus::Playing;
        snapshot.phase = Phase::PreFlop;
        snapshot.current_bet = Chips::new(20);
        snapshot.current_player = Some(1);
        assert_eq!(
            player.next_command(&snapshot),
            Some(Command::Action(PlayerAction::Call))
        );

        snapshot.current_player = Some(0);
        assert!(player.next_command(&snapshot).is_none());
    }

    #[test]
    fn no_commands_before_joining() {
        let mut player = Player::new(Caller, "Bob".to_string());
        let snapshot = snapshot(vec![seat(None, false)]);
        assert!(player.next_command(&snapshot).is_none());
    }
}
