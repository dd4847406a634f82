use crate::config::{ConfigError, SeatId, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::events::{Blind, EventSink, GameEvent};
use crate::hand::{Board, HandError, HoleCards};
use crate::settlement::{self, Contender, SeatOrder, Settlement, SettlementError, SidePot};
use core::fmt;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    pub const ALL: [Stage; 6] =
        [Stage::Waiting, Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River, Stage::Showdown];

    /// The following stage; `None` after showdown.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Waiting => Some(Stage::Preflop),
            Stage::Preflop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Showdown => None,
        }
    }

    /// Community cards revealed when this stage begins.
    pub fn community_cards(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Waiting => "waiting",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Waiting => "Waiting",
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a player last did in the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastAction {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl LastAction {
    pub fn is_blind(self) -> bool {
        matches!(self, LastAction::SmallBlind | LastAction::BigBlind)
    }

    pub fn label(self) -> &'static str {
        match self {
            LastAction::SmallBlind => "SB",
            LastAction::BigBlind => "BB",
            LastAction::Fold => "Fold",
            LastAction::Check => "Check",
            LastAction::Call => "Call",
            LastAction::Raise => "Raise",
            LastAction::AllIn => "All-in",
        }
    }
}

/// An action submitted for the current player.
///
/// `Raise` carries the chips added by this action, not a "raise to" total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    CheckCall,
    Raise(u64),
}

/// How an action was resolved: the recorded kind and the chips it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub seat: SeatId,
    pub action: LastAction,
    pub amount: u64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("seat {0} does not exist")]
    UnknownPlayer(SeatId),
    #[error("seat {0} is not active")]
    InactivePlayer(SeatId),
    #[error("seat {seat} acted out of turn (seat {current} is to act)")]
    NotPlayersTurn { seat: SeatId, current: SeatId },
    #[error("seat {seat} cannot put in {requested} chips with {available} behind")]
    InsufficientChips { seat: SeatId, requested: u64, available: u64 },
    #[error("seat {0} must raise a positive amount")]
    InvalidRaise(SeatId),
    #[error("seat {seat} has bet {bet}, above the table bet of {table_bet}")]
    BetAboveTable { seat: SeatId, bet: u64, table_bet: u64 },
    #[error("cannot {op} during {stage}")]
    InvalidStage { op: &'static str, stage: Stage },
    #[error("betting on {stage} is not complete")]
    RoundNotComplete { stage: Stage },
    #[error("no stage follows showdown")]
    StageOverflow,
    #[error("need at least two players with chips, found {0}")]
    NotEnoughPlayers(usize),
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("no round is in progress")]
    NoRoundInProgress,
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: SeatId,
    pub(crate) name: String,
    pub(crate) chips: u64,
    pub(crate) current_bet: u64,
    pub(crate) committed: u64,
    pub(crate) is_active: bool,
    pub(crate) is_all_in: bool,
    pub(crate) hand: Option<HoleCards>,
    pub(crate) last_action: Option<LastAction>,
    pub(crate) is_winner: bool,
    pub(crate) win_amount: u64,
}

impl Player {
    pub(crate) fn new(id: SeatId, chips: u64) -> Self {
        Self {
            id,
            name: format!("Player {id}"),
            chips,
            current_bet: 0,
            committed: 0,
            is_active: chips > 0,
            is_all_in: false,
            hand: None,
            last_action: None,
            is_winner: false,
            win_amount: 0,
        }
    }

    fn reset_for_round(&mut self) {
        self.hand = None;
        self.current_bet = 0;
        self.committed = 0;
        self.is_all_in = false;
        self.last_action = None;
        self.is_winner = false;
        self.win_amount = 0;
        self.is_active = self.chips > 0;
    }

    /// Seat number, fixed for the life of the table.
    pub fn id(&self) -> SeatId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chips behind (not yet committed).
    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips put in during the current stage.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Chips put in during the whole round.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    /// Still contesting the pot: neither folded nor sitting out.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_all_in(&self) -> bool {
        self.is_all_in
    }

    pub fn hand(&self) -> Option<HoleCards> {
        self.hand
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    pub fn win_amount(&self) -> u64 {
        self.win_amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct TableState {
    pub(crate) deck: Deck,
    pub(crate) community: Board,
    pub(crate) pot: u64,
    /// Filled by settlement for display; cleared when the next round starts.
    pub(crate) side_pots: Vec<SidePot>,
    pub(crate) current_bet: u64,
    pub(crate) raise_count: u32,
    pub(crate) stage: Stage,
    /// 0 until the first round picks a dealer.
    pub(crate) dealer: SeatId,
    pub(crate) current_player: SeatId,
    pub(crate) small_blind: u64,
    pub(crate) big_blind: u64,
    pub(crate) blinds: Option<(SeatId, SeatId)>,
    pub(crate) in_progress: bool,
}

impl TableState {
    fn new(small_blind: u64, big_blind: u64) -> Self {
        Self {
            deck: Deck::standard(),
            community: Board::default(),
            pot: 0,
            side_pots: Vec::new(),
            current_bet: 0,
            raise_count: 0,
            stage: Stage::Waiting,
            dealer: 0,
            current_player: 0,
            small_blind,
            big_blind,
            blinds: None,
            in_progress: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn community(&self) -> &Board {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn side_pots(&self) -> &[SidePot] {
        &self.side_pots
    }

    /// Highest bet made in the current stage.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Raises that lifted the table bet in the current stage.
    pub fn raise_count(&self) -> u32 {
        self.raise_count
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn dealer(&self) -> SeatId {
        self.dealer
    }

    pub fn current_player(&self) -> SeatId {
        self.current_player
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    /// Small and big blind seats once posted this round.
    pub fn blinds(&self) -> Option<(SeatId, SeatId)> {
        self.blinds
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }
}

/// Everything needed to resume a session mid-round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: TableConfig,
    pub table: TableState,
    pub players: Vec<Player>,
    pub round: u64,
}

impl SessionSnapshot {
    /// Check that the snapshot describes a state the session could have reached.
    ///
    /// Seats and turn pointers must exist, every card of the deck must be
    /// accounted for exactly once, the board may not run ahead of the stage,
    /// and during a round the pot must equal the chips committed to it.
    pub fn validate(&self) -> Result<(), GameError> {
        self.config.validate()?;
        let invalid = |msg: String| Err(GameError::InvalidSnapshot(msg));
        let n = self.config.table_size;
        if self.players.len() != n {
            return invalid(format!("{} players for a table of {n}", self.players.len()));
        }
        if let Some((i, p)) = self.players.iter().enumerate().find(|(i, p)| p.id != i + 1) {
            return invalid(format!("player at index {i} claims seat {}", p.id));
        }

        let t = &self.table;
        let seat_ok = |seat: SeatId| (1..=n).contains(&seat);
        if t.in_progress {
            if !seat_ok(t.dealer) {
                return invalid(format!("dealer seat {} outside 1..={n}", t.dealer));
            }
            if !seat_ok(t.current_player) {
                return invalid(format!("current seat {} outside 1..={n}", t.current_player));
            }
        } else if t.dealer > n || t.current_player > n {
            return invalid(format!("seat pointers ({}, {}) outside 0..={n}", t.dealer, t.current_player));
        }
        if let Some((sb, bb)) = t.blinds {
            if !seat_ok(sb) || !seat_ok(bb) {
                return invalid(format!("blind seats ({sb}, {bb}) outside 1..={n}"));
            }
        }

        let revealed = match t.stage {
            Stage::Waiting | Stage::Preflop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River | Stage::Showdown => 5,
        };
        let on_board = t.community.len();
        if on_board > revealed || !matches!(on_board, 0 | 3 | 4 | 5) {
            return invalid(format!("{on_board} community cards during {}", t.stage));
        }

        let mut seen = HashSet::with_capacity(Deck::SIZE);
        let hands = self.players.iter().filter_map(|p| p.hand).flat_map(|h| h.as_array());
        for card in t.deck.as_slice().iter().chain(t.community.as_slice()).copied().chain(hands) {
            if !seen.insert(card) {
                return invalid(format!("{card} appears more than once"));
            }
        }
        if seen.len() != Deck::SIZE {
            return invalid(format!("{} cards accounted for, expected {}", seen.len(), Deck::SIZE));
        }

        if t.in_progress {
            let committed: u64 = self.players.iter().map(|p| p.committed).sum();
            if committed != t.pot {
                return invalid(format!("pot {} but {committed} chips committed", t.pot));
            }
        }
        Ok(())
    }
}

/// One table: owns the table and player state and runs the betting rounds.
pub struct GameSession {
    config: TableConfig,
    table: TableState,
    players: Vec<Player>,
    rng: Box<dyn RngCore + Send>,
    history: Vec<GameEvent>,
    sink: Option<Box<dyn EventSink + Send>>,
    round: u64,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("table", &self.table)
            .field("players", &self.players)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Seat players per `config`, shuffling with a freshly seeded generator.
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        let rng = ChaCha8Rng::from_rng(&mut rand::rng());
        Self::with_rng(config, rng)
    }

    /// Reproducible session: the same seed deals the same cards.
    ///
    /// ```
    /// use holdem_engine::config::TableConfig;
    /// use holdem_engine::game::GameSession;
    ///
    /// let mut a = GameSession::with_seed(TableConfig::default(), 7).unwrap();
    /// let mut b = GameSession::with_seed(TableConfig::default(), 7).unwrap();
    /// a.start_round().unwrap();
    /// b.start_round().unwrap();
    /// assert_eq!(a.table().deck(), b.table().deck());
    /// ```
    pub fn with_seed(config: TableConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng<R>(config: TableConfig, rng: R) -> Result<Self, GameError>
    where
        R: RngCore + Send + 'static,
    {
        config.validate()?;
        let mut players: Vec<Player> =
            (1..=config.table_size).map(|id| Player::new(id, 0)).collect();
        for seat in config.seating_order() {
            players[seat - 1] = Player::new(seat, config.starting_chips);
        }
        let table = TableState::new(config.small_blind, config.big_blind);
        Ok(Self {
            config,
            table,
            players,
            rng: Box::new(rng),
            history: Vec::new(),
            sink: None,
            round: 0,
        })
    }

    /// Resume a session from a snapshot. The deck order is taken from the snapshot.
    /// Snapshots failing [`SessionSnapshot::validate`] are rejected.
    pub fn restore<R>(snapshot: SessionSnapshot, rng: R) -> Result<Self, GameError>
    where
        R: RngCore + Send + 'static,
    {
        snapshot.validate()?;
        let SessionSnapshot { config, table, players, round } = snapshot;
        Ok(Self { config, table, players, rng: Box::new(rng), history: Vec::new(), sink: None, round })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            table: self.table.clone(),
            players: self.players.clone(),
            round: self.round,
        }
    }

    /// Forward every event to `sink` as well as the in-session history.
    pub fn set_sink<S>(&mut self, sink: S)
    where
        S: EventSink + Send + 'static,
    {
        self.sink = Some(Box::new(sink));
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: SeatId) -> Option<&Player> {
        seat.checked_sub(1).and_then(|i| self.players.get(i))
    }

    /// Number of rounds started so far.
    pub fn round_number(&self) -> u64 {
        self.round
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// Chips `seat` must add to match the table bet.
    pub fn to_call(&self, seat: SeatId) -> u64 {
        self.player(seat).map_or(0, |p| self.table.current_bet.saturating_sub(p.current_bet))
    }

    pub fn history_recent(&self, n: usize) -> Vec<GameEvent> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Re-buy every seated player to the starting stack.
    pub fn reset_stacks(&mut self) -> Result<(), GameError> {
        if self.table.in_progress {
            return Err(GameError::RoundInProgress);
        }
        for seat in self.config.seating_order() {
            let p = &mut self.players[seat - 1];
            p.chips = self.config.starting_chips;
            p.is_active = true;
        }
        log::info!("stacks reset to {}", self.config.starting_chips);
        Ok(())
    }

    /// Shuffle a fresh deck, move the button and reset every player for a new round.
    /// The table is left in `Waiting`; advancing the stage begins preflop.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        if self.table.in_progress {
            return Err(GameError::RoundInProgress);
        }
        let funded = self.players.iter().filter(|p| p.chips > 0).count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers(funded));
        }
        let dealer = self
            .next_seat(self.table.dealer, |p| p.chips > 0)
            .ok_or(GameError::NotEnoughPlayers(funded))?;

        let mut deck = Deck::standard();
        deck.shuffle_with(&mut self.rng);

        let t = &mut self.table;
        t.deck = deck;
        t.community = Board::default();
        t.pot = 0;
        t.side_pots.clear();
        t.current_bet = 0;
        t.raise_count = 0;
        t.stage = Stage::Waiting;
        t.dealer = dealer;
        t.current_player = dealer;
        t.blinds = None;
        t.in_progress = true;
        for p in &mut self.players {
            p.reset_for_round();
        }

        self.round += 1;
        self.history.clear();
        self.emit(GameEvent::RoundStarted { round: self.round, dealer });
        Ok(())
    }

    /// Post both blinds at preflop. Short stacks post what they have.
    /// Returns the small and big blind seats.
    pub fn post_blinds(&mut self) -> Result<(SeatId, SeatId), GameError> {
        self.ensure_in_progress()?;
        if self.table.stage != Stage::Preflop || self.table.blinds.is_some() {
            return Err(GameError::InvalidStage { op: "post blinds", stage: self.table.stage });
        }
        let active = self.active_count();
        let sb = self
            .next_seat(self.table.dealer, |p| p.is_active)
            .ok_or(GameError::NotEnoughPlayers(active))?;
        let bb = self.next_seat(sb, |p| p.is_active).ok_or(GameError::NotEnoughPlayers(active))?;
        if sb == bb {
            return Err(GameError::NotEnoughPlayers(active));
        }

        let sb_paid = self.commit_chips(sb - 1, self.table.small_blind);
        self.players[sb - 1].last_action = Some(LastAction::SmallBlind);
        self.emit(GameEvent::BlindPosted { seat: sb, blind: Blind::Small, amount: sb_paid });

        let bb_paid = self.commit_chips(bb - 1, self.table.big_blind);
        self.players[bb - 1].last_action = Some(LastAction::BigBlind);
        self.emit(GameEvent::BlindPosted { seat: bb, blind: Blind::Big, amount: bb_paid });

        self.table.current_bet = sb_paid.max(bb_paid);
        self.table.blinds = Some((sb, bb));
        self.table.current_player = self.next_seat(bb, |p| p.is_active).unwrap_or(bb);
        Ok((sb, bb))
    }

    /// Deal what the current stage calls for: two hole cards to each active
    /// player at preflop, three community cards on the flop, one on turn and river.
    pub fn deal_for_stage(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        let stage = self.table.stage;
        match stage {
            Stage::Preflop => {
                if self.players.iter().any(|p| p.hand.is_some()) {
                    return Err(GameError::InvalidStage { op: "deal hole cards twice", stage });
                }
                let seats: Vec<SeatId> =
                    self.players.iter().filter(|p| p.is_active).map(|p| p.id).collect();
                let needed = seats.len() * 2;
                if needed > self.table.deck.len() {
                    return Err(DeckError::Exhausted {
                        requested: needed,
                        remaining: self.table.deck.len(),
                    }
                    .into());
                }
                for seat in seats {
                    let cards = self.table.deck.draw_n(2)?;
                    self.players[seat - 1].hand = Some(HoleCards::from_slice(&cards)?);
                    self.emit(GameEvent::HoleCardsDealt { seat });
                }
                Ok(())
            }
            Stage::Flop | Stage::Turn | Stage::River => {
                let before = match stage {
                    Stage::Flop => 0,
                    Stage::Turn => 3,
                    _ => 4,
                };
                if self.table.community.len() != before {
                    return Err(GameError::InvalidStage { op: "deal community cards twice", stage });
                }
                let cards = self.table.deck.draw_n(stage.community_cards())?;
                self.table.community.extend(cards.iter().copied());
                self.emit(GameEvent::CommunityDealt { stage, cards });
                Ok(())
            }
            _ => Err(GameError::InvalidStage { op: "deal", stage }),
        }
    }

    /// Move the turn to the next active seat by seat number, wrapping around.
    pub fn advance_turn(&mut self) -> Result<SeatId, GameError> {
        self.ensure_in_progress()?;
        let next = self
            .next_seat(self.table.current_player, |p| p.is_active)
            .ok_or(GameError::NotEnoughPlayers(0))?;
        self.table.current_player = next;
        Ok(next)
    }

    /// Whether betting on the current stage is closed, judged at the current player.
    ///
    /// Closed when one active player remains, or when the current player has
    /// acted voluntarily this stage and owes nothing. A current bet above the
    /// table bet is an invariant violation.
    pub fn is_round_complete(&self) -> Result<bool, GameError> {
        self.ensure_in_progress()?;
        if matches!(self.table.stage, Stage::Waiting | Stage::Showdown) {
            return Ok(true);
        }
        let seat = self.table.current_player;
        let p = self.player(seat).ok_or(GameError::UnknownPlayer(seat))?;
        if !p.is_active {
            return Ok(false);
        }
        if p.current_bet > self.table.current_bet {
            return Err(GameError::BetAboveTable {
                seat: p.id,
                bet: p.current_bet,
                table_bet: self.table.current_bet,
            });
        }
        if self.active_count() <= 1 {
            return Ok(true);
        }
        match p.last_action {
            None => Ok(false),
            Some(a) if a.is_blind() => Ok(false),
            Some(_) => Ok(p.current_bet == self.table.current_bet),
        }
    }

    /// Apply `action` for `seat`, which must be the current player.
    ///
    /// Nothing is changed when the action is rejected.
    pub fn apply_action(
        &mut self,
        seat: SeatId,
        action: PlayerAction,
    ) -> Result<ActionOutcome, GameError> {
        self.ensure_in_progress()?;
        let stage = self.table.stage;
        if matches!(stage, Stage::Waiting | Stage::Showdown) {
            return Err(GameError::InvalidStage { op: "act", stage });
        }
        let idx = seat.checked_sub(1).filter(|&i| i < self.players.len());
        let idx = idx.ok_or(GameError::UnknownPlayer(seat))?;
        let p = &self.players[idx];
        if !p.is_active {
            return Err(GameError::InactivePlayer(seat));
        }
        if seat != self.table.current_player {
            return Err(GameError::NotPlayersTurn { seat, current: self.table.current_player });
        }
        if p.current_bet > self.table.current_bet {
            return Err(GameError::BetAboveTable {
                seat,
                bet: p.current_bet,
                table_bet: self.table.current_bet,
            });
        }

        let (kind, amount) = match action {
            PlayerAction::Fold => (LastAction::Fold, 0),
            PlayerAction::CheckCall => {
                let gap = self.table.current_bet - p.current_bet;
                if gap == 0 {
                    (LastAction::Check, 0)
                } else if gap < p.chips {
                    (LastAction::Call, gap)
                } else {
                    (LastAction::AllIn, p.chips)
                }
            }
            PlayerAction::Raise(0) => return Err(GameError::InvalidRaise(seat)),
            PlayerAction::Raise(amount) if amount > p.chips => {
                return Err(GameError::InsufficientChips {
                    seat,
                    requested: amount,
                    available: p.chips,
                });
            }
            PlayerAction::Raise(amount) if amount == p.chips => (LastAction::AllIn, amount),
            PlayerAction::Raise(amount) => (LastAction::Raise, amount),
        };

        if kind == LastAction::Fold {
            self.players[idx].is_active = false;
        } else {
            self.commit_chips(idx, amount);
        }
        self.players[idx].last_action = Some(kind);

        let new_bet = self.players[idx].current_bet;
        if new_bet > self.table.current_bet {
            self.table.current_bet = new_bet;
            if matches!(action, PlayerAction::Raise(_)) {
                self.table.raise_count += 1;
            }
        }
        self.emit(GameEvent::ActionTaken { seat, action: kind, amount });
        Ok(ActionOutcome { seat, action: kind, amount })
    }

    /// Close the current stage and move to the next one.
    pub fn advance_stage(&mut self) -> Result<Stage, GameError> {
        self.ensure_in_progress()?;
        let stage = self.table.stage;
        let next = stage.next().ok_or(GameError::StageOverflow)?;
        if !self.is_round_complete()? {
            return Err(GameError::RoundNotComplete { stage });
        }
        for p in &mut self.players {
            p.current_bet = 0;
            p.last_action = None;
        }
        self.table.current_bet = 0;
        self.table.raise_count = 0;
        self.table.stage = next;
        self.table.current_player =
            self.next_seat(self.table.dealer, |p| p.is_active).unwrap_or(self.table.dealer);
        self.emit(GameEvent::StageAdvanced { stage: next });
        Ok(next)
    }

    /// Pay out the pot and end the round.
    ///
    /// Legal at showdown, or earlier once a single active player remains, in
    /// which case that player takes the pot without any hand being evaluated.
    pub fn settle(&mut self) -> Result<Settlement, GameError> {
        self.ensure_in_progress()?;
        let stage = self.table.stage;
        if stage != Stage::Showdown && self.active_count() > 1 {
            return Err(GameError::InvalidStage { op: "settle", stage });
        }
        let contenders: Vec<Contender> = self
            .players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| Contender { seat: p.id, committed: p.committed, hole: p.hand })
            .collect();
        let order = SeatOrder { dealer: self.table.dealer, seat_count: self.players.len() };
        let result = settlement::settle(
            &contenders,
            self.table.community.as_slice(),
            self.table.pot,
            order,
        )?;

        for payout in &result.payouts {
            let p = &mut self.players[payout.seat - 1];
            p.chips += payout.amount;
            p.win_amount += payout.amount;
            p.is_winner = true;
        }
        for award in &result.awards {
            self.emit(GameEvent::PotAwarded {
                pot_index: award.pot_index,
                seat: award.seat,
                amount: award.amount,
            });
        }

        self.table.side_pots = result.pots.clone();
        self.table.pot = 0;
        self.table.current_bet = 0;
        self.table.in_progress = false;
        let winners = result.payouts.iter().map(|p| p.seat).collect();
        self.emit(GameEvent::RoundEnded { round: self.round, winners });
        Ok(result)
    }

    /// Abandon the current round: every player takes back the chips they
    /// committed and the table returns to `Waiting` with nothing awarded.
    ///
    /// Returns the chips refunded. Any pot surplus over the committed total is
    /// discarded with a warning.
    pub fn abort_round(&mut self) -> Result<u64, GameError> {
        self.ensure_in_progress()?;
        let mut refunded = 0;
        for p in &mut self.players {
            p.chips += p.committed;
            refunded += p.committed;
            p.committed = 0;
            p.current_bet = 0;
            p.is_all_in = false;
            p.is_active = false;
            p.is_winner = false;
            p.win_amount = 0;
        }
        if self.table.pot != refunded {
            log::warn!("aborted round {}: pot {} but {refunded} committed", self.round, self.table.pot);
        }
        let t = &mut self.table;
        t.pot = 0;
        t.side_pots.clear();
        t.current_bet = 0;
        t.raise_count = 0;
        t.stage = Stage::Waiting;
        t.in_progress = false;
        self.emit(GameEvent::RoundEnded { round: self.round, winners: Vec::new() });
        Ok(refunded)
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.table.in_progress {
            Ok(())
        } else {
            Err(GameError::NoRoundInProgress)
        }
    }

    /// First seat after `from` (wrapping by seat number) matching `pred`.
    fn next_seat(&self, from: SeatId, pred: impl Fn(&Player) -> bool) -> Option<SeatId> {
        let n = self.players.len();
        if n == 0 {
            return None;
        }
        let mut seat = from;
        for _ in 0..n {
            seat = seat % n + 1;
            if pred(&self.players[seat - 1]) {
                return Some(seat);
            }
        }
        None
    }

    /// Move up to `amount` chips from the player at `idx` into the pot.
    fn commit_chips(&mut self, idx: usize, amount: u64) -> u64 {
        let p = &mut self.players[idx];
        let paid = amount.min(p.chips);
        p.chips -= paid;
        p.current_bet += paid;
        p.committed += paid;
        p.is_all_in = p.chips == 0;
        self.table.pot += paid;
        paid
    }

    fn emit(&mut self, event: GameEvent) {
        match &event {
            GameEvent::BlindPosted { .. }
            | GameEvent::HoleCardsDealt { .. }
            | GameEvent::ActionTaken { .. } => log::debug!("{event}"),
            _ => log::info!("{event}"),
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.on_event(&event);
        }
        self.history.push(event);
    }
}
