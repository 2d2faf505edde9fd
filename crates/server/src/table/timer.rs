// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table timers.
//!
//! Timers never touch the table state, they send a tick command to the table
//! task queue so that timer events are serialized with player commands.
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Duration, Instant},
};

use super::TableCommand;

/// The event a timer delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Start a hand after the countdown.
    Countdown,
    /// Reveal the next showdown hand.
    Reveal,
}

/// A cancelable timer that sends [TableCommand::Tick] commands.
#[derive(Debug)]
pub struct Timer {
    event: TimerEvent,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    /// Creates a stopped timer.
    pub fn new(event: TimerEvent) -> Self {
        Self {
            event,
            generation: 0,
            handle: None,
        }
    }

    /// Sends one tick after `delay`, restarts the timer if running.
    pub fn start_once(&mut self, delay: Duration, commands_tx: mpsc::Sender<TableCommand>) {
        let (event, generation) = self.restart();
        self.handle = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = commands_tx
                .send(TableCommand::Tick { event, generation })
                .await;
        }));
    }

    /// Sends a tick every `period`, restarts the timer if running.
    pub fn start_interval(&mut self, period: Duration, commands_tx: mpsc::Sender<TableCommand>) {
        let (event, generation) = self.restart();
        self.handle = Some(tokio::spawn(async move {
            let mut ticks = time::interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                let cmd = TableCommand::Tick { event, generation };
                if commands_tx.send(cmd).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Stops the timer, it is safe to cancel a stopped or fired timer.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Checks if the timer has been started and not canceled.
    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    /// Checks if a tick comes from the current timer run, ticks from a
    /// canceled or restarted run may still be in the queue.
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_started() && generation == self.generation
    }

    fn restart(&mut self) -> (TimerEvent, u64) {
        self.cancel();
        self.generation += 1;
        (self.event, self.generation)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_generation(cmd: TableCommand) -> u64 {
        match cmd {
            TableCommand::Tick { generation, .. } => generation,
            _ => panic!("Unexpected command {cmd:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn once_timer_fires() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new(TimerEvent::Countdown);
        assert!(!timer.is_started());

        timer.start_once(Duration::from_secs(3), tx);
        assert!(timer.is_started());

        let start = Instant::now();
        let generation = tick_generation(rx.recv().await.unwrap());
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(timer.accepts(generation));

        // The task is done and dropped its sender.
        assert!(rx.recv().await.is_none());

        timer.cancel();
        timer.cancel();
        assert!(!timer.accepts(generation));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_old_ticks() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new(TimerEvent::Countdown);

        timer.start_once(Duration::from_secs(1), tx.clone());
        let first = timer.generation;
        timer.start_once(Duration::from_secs(1), tx.clone());
        drop(tx);

        let generation = tick_generation(rx.recv().await.unwrap());
        assert_ne!(generation, first);
        assert!(timer.accepts(generation));
        assert!(!timer.accepts(first));

        // The first run was aborted and never fired.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn interval_until_canceled() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut timer = Timer::new(TimerEvent::Reveal);
        timer.start_interval(Duration::from_millis(1500), tx);

        for _ in 0..3 {
            let cmd = rx.recv().await.unwrap();
            assert!(matches!(
                cmd,
                TableCommand::Tick {
                    event: TimerEvent::Reveal,
                    ..
                }
            ));
        }

        timer.cancel();
        assert!(!timer.is_started());
        assert!(rx.recv().await.is_none());
    }
}
