// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state machine.
//!
//! Every public transition runs on a copy of the state that replaces the
//! current state only if the transition succeeds and the table invariants
//! hold, a rejected command never leaves a partial update.
use ahash::AHashSet;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};

use holdem_core::{
    message::{PlayerAction, TableError},
    poker::{Card, Chips, Deck, HandValue, PlayerCards, PlayerId, TableId},
    snapshot::{
        HandSummary, Phase, SeatSnapshot, SeatStatus, SeatSummary, TableSnapshot, TableStatus,
        WinnerSummary,
    },
};

use super::{SEATS, TableConfig, seat::Seat, settlement};

/// Internal table state.
#[derive(Debug, Clone)]
pub struct State {
    table_id: TableId,
    config: TableConfig,
    status: TableStatus,
    phase: Phase,
    seats: [Seat; SEATS],
    deck: Deck,
    board: Vec<Card>,
    burned: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    dealer: Option<usize>,
    small_blind_pos: Option<usize>,
    big_blind_pos: Option<usize>,
    current_player: Option<usize>,
    showdown_order: Vec<usize>,
    showdown_cursor: Option<usize>,
    /// Chips at the table when the hand started.
    hand_chips: Chips,
    summary: Option<HandSummary>,
    stacked_deck: Option<Vec<Card>>,
    rng: StdRng,
}

impl State {
    /// Create a new state.
    pub fn new(table_id: TableId, config: TableConfig) -> Self {
        Self::with_rng(table_id, config, StdRng::from_os_rng())
    }

    /// Create a new state with user initialized randomness.
    pub fn with_rng(table_id: TableId, config: TableConfig, rng: StdRng) -> Self {
        Self {
            table_id,
            config,
            status: TableStatus::Waiting,
            phase: Phase::None,
            seats: Default::default(),
            deck: Deck::default(),
            board: Vec::default(),
            burned: Vec::default(),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            dealer: None,
            small_blind_pos: None,
            big_blind_pos: None,
            current_player: None,
            showdown_order: Vec::default(),
            showdown_cursor: None,
            hand_chips: Chips::ZERO,
            summary: None,
            stacked_deck: None,
            rng,
        }
    }

    /// The table id.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// The table status.
    pub fn status(&self) -> TableStatus {
        self.status
    }

    /// The hand phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the seat owned by a player.
    pub fn seat_of(&self, player_id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.is_owned_by(player_id))
    }

    /// Checks if players are revealing their hands.
    pub fn is_revealing(&self) -> bool {
        self.status == TableStatus::Playing && self.phase == Phase::ShowdownReveal
    }

    /// Checks if a hand can start.
    pub fn can_start(&self) -> bool {
        self.check_start().is_ok()
    }

    /// Takes the summary of the last settled hand.
    pub fn take_summary(&mut self) -> Option<HandSummary> {
        self.summary.take()
    }

    /// A player takes an empty seat.
    pub fn sit_down(
        &mut self,
        player_id: PlayerId,
        nickname: &str,
        seat: usize,
    ) -> Result<(), TableError> {
        self.transaction(|state| {
            if state.status != TableStatus::Waiting {
                return Err(TableError::WrongPhaseOrStatus);
            }

            if state.seat_of(player_id).is_some() {
                return Err(TableError::SeatUnavailable);
            }

            let chips = state.config.starting_chips;
            state
                .seats
                .get_mut(seat)
                .filter(|s| s.is_empty())
                .ok_or(TableError::SeatUnavailable)?
                .sit_down(player_id, nickname, chips);

            info!("Player {player_id} {nickname} sits at seat {seat} with {chips} chips");
            Ok(())
        })
    }

    /// A player leaves its seat.
    pub fn leave_seat(&mut self, player_id: PlayerId, seat: usize) -> Result<(), TableError> {
        self.transaction(|state| {
            if !state
                .seats
                .get(seat)
                .is_some_and(|s| s.is_owned_by(player_id))
            {
                return Err(TableError::NotSeated);
            }

            if state.status == TableStatus::Playing {
                return Err(TableError::WrongPhaseOrStatus);
            }

            state.free_seat(seat);
            Ok(())
        })
    }

    /// Sets a player ready flag.
    pub fn set_ready(&mut self, player_id: PlayerId, ready: bool) -> Result<(), TableError> {
        self.transaction(|state| {
            let idx = state.seat_of(player_id).ok_or(TableError::NotSeated)?;

            if state.status == TableStatus::Playing && state.phase != Phase::Showdown {
                return Err(TableError::WrongPhaseOrStatus);
            }

            state.seats[idx].set_ready(ready)?;
            info!("Seat {idx} ready {ready}");
            Ok(())
        })
    }

    /// A seated player asks to start a hand.
    pub fn start_game(&mut self, player_id: PlayerId) -> Result<(), TableError> {
        self.transaction(|state| {
            state.seat_of(player_id).ok_or(TableError::NotSeated)?;
            state.enter_start_hand()
        })
    }

    /// Starts a hand.
    pub fn start_hand(&mut self) -> Result<(), TableError> {
        self.transaction(Self::enter_start_hand)
    }

    /// A player betting action.
    pub fn act(&mut self, player_id: PlayerId, action: PlayerAction) -> Result<(), TableError> {
        self.transaction(|state| {
            if state.status != TableStatus::Playing || !state.is_betting() {
                return Err(TableError::WrongPhaseOrStatus);
            }

            let idx = state.seat_of(player_id).ok_or(TableError::NotSeated)?;
            if state.current_player != Some(idx) {
                return Err(TableError::NotYourTurn);
            }

            if !state.seats[idx].can_act() {
                return Err(TableError::CannotAct);
            }

            state.apply_action(idx, action)?;
            state.current_player = state.next_to_act(idx);
            state.advance()
        })
    }

    /// Reveals the next hand at showdown, settles the pot once all hands have
    /// been revealed.
    pub fn advance_showdown(&mut self) -> Result<(), TableError> {
        self.transaction(|state| {
            if !state.is_revealing() {
                return Err(TableError::WrongPhaseOrStatus);
            }

            let cursor = state
                .showdown_cursor
                .ok_or_else(|| violation("Showdown without cursor"))?;

            match state.showdown_order.get(cursor).copied() {
                Some(idx) => {
                    state.reveal(idx)?;
                    state.showdown_cursor = Some(cursor + 1);
                    Ok(())
                }
                None => {
                    let hands = state
                        .showdown_order
                        .iter()
                        .filter_map(|&idx| state.seats[idx].hand.as_ref().map(|hv| (idx, hv)))
                        .collect::<Vec<_>>();
                    let winners = settlement::winners(&hands);
                    state.settle(&winners)
                }
            }
        })
    }

    /// A player disconnected.
    ///
    /// Between hands the seat is freed, during a hand the player is folded
    /// when it has to act and the seat is freed after the hand.
    pub fn disconnect(&mut self, player_id: PlayerId) -> Result<(), TableError> {
        self.transaction(|state| {
            let Some(idx) = state.seat_of(player_id) else {
                return Ok(());
            };

            if state.status == TableStatus::Waiting {
                state.free_seat(idx);
                return Ok(());
            }

            info!("Seat {idx} {} is away", state.seats[idx].nickname);
            state.seats[idx].is_away = true;

            if state.is_betting() {
                state.advance()
            } else {
                Ok(())
            }
        })
    }

    /// Aborts the hand in progress returning the hand bets to the players.
    pub fn abort_hand(&mut self) {
        for seat in self.seats.iter_mut().filter(|s| !s.is_empty()) {
            seat.refund();
        }

        self.reset_hand();
        self.status = TableStatus::Waiting;
        self.phase = Phase::None;
        self.summary = None;
        self.free_away_seats();
    }

    /// Returns the table state as seen by the given observer.
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> TableSnapshot {
        let seats = self
            .seats
            .iter()
            .map(|seat| {
                let is_owner = viewer.is_some_and(|id| seat.is_owned_by(id));
                let cards = if is_owner || seat.hand.is_some() {
                    seat.cards
                } else {
                    seat.cards.covered()
                };

                SeatSnapshot {
                    player_id: seat.player_id,
                    nickname: seat.nickname.clone(),
                    status: seat.status,
                    chips: seat.chips,
                    cards,
                    bet: seat.bet,
                    total_bet: seat.total_bet,
                    has_acted: seat.has_acted,
                    is_ready: seat.is_ready,
                    is_away: seat.is_away,
                    hand: seat.hand.clone(),
                    payout: seat.payout,
                }
            })
            .collect();

        let pos = |p: Option<usize>| p.map(|idx| idx as u8);

        TableSnapshot {
            table_id: self.table_id,
            status: self.status,
            phase: self.phase,
            seats,
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            dealer: pos(self.dealer),
            small_blind_pos: pos(self.small_blind_pos),
            big_blind_pos: pos(self.big_blind_pos),
            current_player: pos(self.current_player),
            showdown_order: self.showdown_order.iter().map(|&idx| idx as u8).collect(),
            showdown_cursor: pos(self.showdown_cursor),
        }
    }

    /// Checks the start hand guard.
    pub fn check_start(&self) -> Result<(), TableError> {
        if self.status != TableStatus::Waiting {
            return Err(TableError::WrongPhaseOrStatus);
        }

        let with_chips = || {
            self.seats
                .iter()
                .filter(|s| !s.is_empty() && s.chips > Chips::ZERO)
        };

        if with_chips().filter(|s| s.is_ready).count() < 2 {
            return Err(TableError::InsufficientPlayers);
        }

        if with_chips().any(|s| !s.is_ready) {
            return Err(TableError::PlayersNotReady);
        }

        Ok(())
    }

    fn transaction<T, F>(&mut self, f: F) -> Result<T, TableError>
    where
        F: FnOnce(&mut State) -> Result<T, TableError>,
    {
        let mut next = self.clone();
        let res = f(&mut next)?;
        next.verify()?;
        *self = next;
        Ok(res)
    }

    fn enter_start_hand(&mut self) -> Result<(), TableError> {
        self.check_start()?;

        self.reset_hand();
        self.deck = match self.stacked_deck.take() {
            Some(cards) => Deck::stacked(cards),
            None => Deck::shuffled(&mut self.rng),
        };

        for seat in self.seats.iter_mut().filter(|s| !s.is_empty()) {
            seat.start_hand();
        }

        self.hand_chips = self.seats.iter().map(|s| s.chips).sum();

        // Rotate dealer and blinds.
        self.dealer = self.next_active(self.dealer);
        self.small_blind_pos = self.next_active(self.small_blind_pos);
        self.big_blind_pos = self.next_active(self.small_blind_pos);

        let (Some(dealer), Some(sb), Some(bb)) =
            (self.dealer, self.small_blind_pos, self.big_blind_pos)
        else {
            return Err(violation("No active seats for the blinds"));
        };

        // Deal one card at a time starting from the small blind.
        let order = self.active_from(sb);
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(self.deal_card()?);
        }

        for (&idx, c1) in order.iter().zip(first) {
            let c2 = self.deal_card()?;
            self.seats[idx].cards = PlayerCards::Cards(c1, c2);
        }

        self.pot += self.seats[sb].post_blind(self.config.small_blind);
        self.pot += self.seats[bb].post_blind(self.config.big_blind);
        self.current_bet = self.config.big_blind;

        self.status = TableStatus::Playing;
        self.phase = Phase::PreFlop;

        info!(
            "Table {} hand started with {} players dealer {dealer} small blind {sb} big blind {bb}",
            self.table_id,
            order.len()
        );

        // Heads up the small blind acts first, otherwise the seat after the
        // big blind.
        let first_to_act = if order.len() == 2 {
            sb
        } else {
            let pos = order.iter().position(|&idx| idx == bb).unwrap_or_default();
            order[(pos + 1) % order.len()]
        };

        self.current_player = self.first_can_act_from(first_to_act);
        self.advance()
    }

    fn apply_action(&mut self, idx: usize, action: PlayerAction) -> Result<(), TableError> {
        let seat = &mut self.seats[idx];
        match action {
            PlayerAction::Fold => seat.fold(),
            PlayerAction::Check => {
                if seat.bet != self.current_bet {
                    return Err(TableError::IllegalCheck);
                }

                seat.has_acted = true;
            }
            PlayerAction::Call => {
                let to_call = self.current_bet - seat.bet;
                self.pot += seat.bet(to_call);
            }
            PlayerAction::Raise { amount } => {
                let min = self.current_bet + self.config.big_blind;
                if amount < min {
                    return Err(TableError::BelowMinimumRaise { min });
                }

                let needed = amount - seat.bet;
                if needed > seat.chips {
                    return Err(TableError::InsufficientChips);
                }

                self.pot += seat.bet(needed);
                self.current_bet = amount;

                // Other players have to respond to the raise.
                for (other_idx, other) in self.seats.iter_mut().enumerate() {
                    if other_idx != idx && other.status == SeatStatus::Sitting {
                        other.has_acted = false;
                    }
                }
            }
        }

        let seat = &self.seats[idx];
        info!(
            "Seat {idx} {} {} bet {} chips {} pot {}",
            seat.nickname,
            action.label(),
            seat.bet,
            seat.chips,
            self.pot
        );

        Ok(())
    }

    /// Completes rounds and folds away players until a player has to act or
    /// the hand moves to showdown.
    fn advance(&mut self) -> Result<(), TableError> {
        loop {
            if self.is_round_complete() {
                self.end_round()?;
            }

            if self.status != TableStatus::Playing || !self.is_betting() {
                return Ok(());
            }

            match self.current_player {
                Some(idx) if self.seats[idx].is_away => {
                    info!("Seat {idx} {} is away and folds", self.seats[idx].nickname);
                    self.seats[idx].fold();
                    self.current_player = self.next_to_act(idx);
                }
                _ => return Ok(()),
            }
        }
    }

    fn is_round_complete(&self) -> bool {
        let mut live = self.seats.iter().filter(|s| s.in_hand());
        live.clone().count() <= 1
            || live.all(|s| s.has_acted || s.status == SeatStatus::AllIn)
    }

    fn end_round(&mut self) -> Result<(), TableError> {
        let live = self.seats.iter().filter(|s| s.in_hand()).count();
        let with_chips = self
            .seats
            .iter()
            .filter(|s| s.status == SeatStatus::Sitting)
            .count();

        // Nobody can bet anymore, run out the board.
        if live <= 1 || with_chips <= 1 {
            while self.board.len() < 5 {
                self.deal_street()?;
            }

            return self.enter_showdown();
        }

        if self.phase == Phase::River {
            return self.enter_showdown();
        }

        for seat in self.seats.iter_mut().filter(|s| s.in_hand()) {
            seat.start_round();
        }

        self.current_bet = Chips::ZERO;
        self.phase = self.deal_street()?;

        let start = self.small_blind_pos.unwrap_or_default();
        self.current_player = self.first_can_act_from(start);
        Ok(())
    }

    fn deal_street(&mut self) -> Result<Phase, TableError> {
        let (count, phase) = match self.board.len() {
            0 => (3, Phase::Flop),
            3 => (1, Phase::Turn),
            4 => (1, Phase::River),
            n => return Err(violation(format!("Cannot deal on a {n} cards board"))),
        };

        let burn = self.deal_card()?;
        self.burned.push(burn);

        for _ in 0..count {
            let card = self.deal_card()?;
            self.board.push(card);
        }

        let board = self
            .board
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        info!("Dealt {phase:?} board {}", board.join(" "));

        Ok(phase)
    }

    fn enter_showdown(&mut self) -> Result<(), TableError> {
        self.current_player = None;
        self.current_bet = Chips::ZERO;
        for seat in &mut self.seats {
            seat.bet = Chips::ZERO;
        }

        let live = (0..SEATS)
            .filter(|&idx| self.seats[idx].in_hand())
            .collect::<Vec<_>>();

        if live.len() > 1 {
            info!("Showdown between seats {live:?}");
            self.phase = Phase::ShowdownReveal;
            self.showdown_order = live;
            self.showdown_cursor = Some(0);
            Ok(())
        } else {
            // The last player wins without showing.
            self.settle(&live)
        }
    }

    fn reveal(&mut self, idx: usize) -> Result<(), TableError> {
        let seat = &self.seats[idx];
        let [c1, c2] = seat
            .cards
            .cards()
            .ok_or_else(|| violation(format!("Seat {idx} has no cards at showdown")))?;

        let mut cards = vec![c1, c2];
        cards.extend_from_slice(&self.board);
        let hand = HandValue::eval(&cards).map_err(|e| violation(e.to_string()))?;

        info!("Seat {idx} {} shows {c1} {c2} {hand}", seat.nickname);
        self.seats[idx].hand = Some(hand);
        Ok(())
    }

    fn settle(&mut self, winners: &[usize]) -> Result<(), TableError> {
        if winners.is_empty() {
            return Err(violation("Hand settled without winners"));
        }

        let total_bets = self.seats.iter().map(|s| s.total_bet).sum::<Chips>();
        if self.pot != total_bets {
            return Err(violation(format!(
                "Pot {} doesn't match total bets {total_bets}",
                self.pot
            )));
        }

        let pot = self.pot;
        for (idx, amount) in settlement::split_pot(pot, winners) {
            let seat = &mut self.seats[idx];
            seat.chips += amount;
            seat.payout = amount;
            info!("Seat {idx} {} wins {amount}", seat.nickname);
        }

        self.pot = Chips::ZERO;

        let chips = self.seats.iter().map(|s| s.chips).sum::<Chips>();
        if chips != self.hand_chips {
            return Err(violation(format!(
                "Table has {chips} chips after settlement, {} at hand start",
                self.hand_chips
            )));
        }

        self.summary = Some(self.hand_summary(pot, winners));

        // Keep board, cards and hands for observers until the next hand.
        self.status = TableStatus::Waiting;
        self.phase = Phase::Showdown;
        self.current_player = None;
        self.current_bet = Chips::ZERO;
        self.showdown_order.clear();
        self.showdown_cursor = None;
        self.deck = Deck::default();
        self.burned.clear();

        for seat in self.seats.iter_mut().filter(|s| !s.is_empty()) {
            seat.is_ready = false;
        }

        self.free_away_seats();
        Ok(())
    }

    fn hand_summary(&self, pot: Chips, winners: &[usize]) -> HandSummary {
        let played_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let seats = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, seat)| seat.cards != PlayerCards::None)
            .filter_map(|(idx, seat)| {
                Some(SeatSummary {
                    seat: idx as u8,
                    player_id: seat.player_id?,
                    nickname: seat.nickname.clone(),
                    chips: seat.chips,
                    total_bet: seat.total_bet,
                    status: seat.status,
                    cards: seat.cards,
                    hand: seat.hand.as_ref().map(|hv| hv.category().name().to_string()),
                })
            })
            .collect();

        let winners = winners
            .iter()
            .filter_map(|&idx| {
                let seat = &self.seats[idx];
                Some(WinnerSummary {
                    seat: idx as u8,
                    player_id: seat.player_id?,
                    nickname: seat.nickname.clone(),
                    amount: seat.payout,
                    hand: seat.hand.as_ref().map(HandValue::description),
                    cards: seat.cards,
                })
            })
            .collect();

        HandSummary {
            played_at,
            table_id: self.table_id,
            dealer: self.dealer.map(|idx| idx as u8),
            small_blind_pos: self.small_blind_pos.map(|idx| idx as u8),
            big_blind_pos: self.big_blind_pos.map(|idx| idx as u8),
            pot,
            board: self.board.clone(),
            seats,
            winners,
        }
    }

    fn reset_hand(&mut self) {
        self.deck = Deck::default();
        self.board.clear();
        self.burned.clear();
        self.pot = Chips::ZERO;
        self.current_bet = Chips::ZERO;
        self.current_player = None;
        self.showdown_order.clear();
        self.showdown_cursor = None;
    }

    /// Empties a seat moving the dealer and blinds markers back to the
    /// previous occupied seat so that the next rotation is not affected.
    fn free_seat(&mut self, idx: usize) {
        info!(
            "Player {} leaves seat {idx}",
            self.seats[idx].nickname.as_str()
        );

        self.seats[idx].reset();

        let prev = self.prev_occupied(idx);
        for marker in [
            &mut self.dealer,
            &mut self.small_blind_pos,
            &mut self.big_blind_pos,
        ] {
            if *marker == Some(idx) {
                *marker = prev;
            }
        }
    }

    fn free_away_seats(&mut self) {
        for idx in 0..SEATS {
            if self.seats[idx].is_away {
                self.free_seat(idx);
            }
        }
    }

    fn deal_card(&mut self) -> Result<Card, TableError> {
        self.deck.deal().ok_or_else(|| violation("Deck underflow"))
    }

    fn is_betting(&self) -> bool {
        matches!(
            self.phase,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River
        )
    }

    /// The first seat in the hand after `from`, or from the first seat.
    fn next_active(&self, from: Option<usize>) -> Option<usize> {
        let start = from.map(|idx| idx + 1).unwrap_or_default();
        (0..SEATS)
            .map(|d| (start + d) % SEATS)
            .find(|&idx| self.seats[idx].status == SeatStatus::Sitting)
    }

    /// The seats in the hand clockwise from `start`.
    fn active_from(&self, start: usize) -> Vec<usize> {
        (0..SEATS)
            .map(|d| (start + d) % SEATS)
            .filter(|&idx| self.seats[idx].status == SeatStatus::Sitting)
            .collect()
    }

    fn prev_occupied(&self, idx: usize) -> Option<usize> {
        (1..SEATS)
            .map(|d| (idx + SEATS - d) % SEATS)
            .find(|&i| !self.seats[i].is_empty())
    }

    fn first_can_act_from(&self, start: usize) -> Option<usize> {
        (0..SEATS)
            .map(|d| (start + d) % SEATS)
            .find(|&idx| self.seats[idx].can_act())
    }

    fn next_to_act(&self, idx: usize) -> Option<usize> {
        self.first_can_act_from(idx + 1)
    }

    fn verify(&self) -> Result<(), TableError> {
        for (idx, seat) in self.seats.iter().enumerate() {
            if seat.is_empty()
                && (seat.chips != Chips::ZERO
                    || seat.cards != PlayerCards::None
                    || seat.player_id.is_some())
            {
                return Err(violation(format!("Empty seat {idx} is not clear")));
            }
        }

        let positions = [
            ("dealer", self.dealer),
            ("small blind", self.small_blind_pos),
            ("big blind", self.big_blind_pos),
            ("current player", self.current_player),
        ];

        for (name, pos) in positions {
            if let Some(idx) = pos {
                if self.seats.get(idx).is_none_or(Seat::is_empty) {
                    return Err(violation(format!("The {name} is on empty seat {idx}")));
                }
            }
        }

        if let Some(idx) = self.current_player {
            if !self.seats[idx].can_act() {
                return Err(violation(format!("Current player {idx} cannot act")));
            }
        }

        if self.status == TableStatus::Playing {
            let total_bets = self.seats.iter().map(|s| s.total_bet).sum::<Chips>();
            if self.pot != total_bets {
                return Err(violation(format!(
                    "Pot {} doesn't match total bets {total_bets}",
                    self.pot
                )));
            }

            let chips = self.seats.iter().map(|s| s.chips).sum::<Chips>();
            if chips + self.pot != self.hand_chips {
                return Err(violation(format!(
                    "Table has {} chips, {} at hand start",
                    chips + self.pot,
                    self.hand_chips
                )));
            }

            let mut count = 0;
            let mut cards = AHashSet::with_capacity(Deck::SIZE);
            let holes = self.seats.iter().filter_map(|s| s.cards.cards()).flatten();
            for card in self
                .deck
                .iter()
                .chain(&self.board)
                .chain(&self.burned)
                .copied()
                .chain(holes)
            {
                count += 1;
                cards.insert(card);
            }

            if count != Deck::SIZE || cards.len() != Deck::SIZE {
                return Err(violation(format!(
                    "Cards not conserved {count} cards {} unique",
                    cards.len()
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    fn stack_deck(&mut self, cards: Vec<Card>) {
        self.stacked_deck = Some(cards);
    }
}

fn violation(msg: impl Into<String>) -> TableError {
    TableError::InvariantViolation(msg.into())
}
