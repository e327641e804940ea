//! The authoritative copy of one match.

use log::{debug, info, warn};

use crate::cards::CardId;
use crate::core::{
    GameResult, GameState, HeroDescriptor, Intent, LogEntry, MatchConfig, Notification, PlayerId,
};
use crate::error::{EngineError, IllegalAction, Result};
use crate::rules::{view_for, PlayerView, RulesEngine};

use super::ports::{DeckSource, MatchId, MatchRecorder, MatchSummary, Transport};
use super::snapshot::Snapshot;

/// A running match.
///
/// Owns the state and is the single writer for it: intents go through
/// `deliver_intent`, which takes `&mut self`, so at most one is ever in
/// flight. After every accepted intent both seats get their redacted view.
/// When the game ends the summary is recorded once; an invariant violation
/// abandons the match and records it as abandoned.
pub struct Match<E, T, R>
where
    E: RulesEngine,
    T: Transport,
    R: MatchRecorder,
{
    id: MatchId,
    engine: E,
    transport: T,
    recorder: R,
    state: GameState,
    users: [String; 2],
    heroes: [HeroDescriptor; 2],
    decks: [Vec<CardId>; 2],
    last_log: Vec<LogEntry>,
    intents: usize,
    recorded: bool,
    abandoned: bool,
}

impl<E, T, R> Match<E, T, R>
where
    E: RulesEngine,
    T: Transport,
    R: MatchRecorder,
{
    /// Load both seats through `decks`, set the match up and send the
    /// opening views.
    pub fn start<D: DeckSource>(
        id: MatchId,
        engine: E,
        users: [&str; 2],
        decks: &D,
        config: MatchConfig,
        transport: T,
        recorder: R,
    ) -> Result<Self> {
        let loaded = [decks.load_deck(users[0])?, decks.load_deck(users[1])?];
        let heroes = [decks.load_hero(users[0])?, decks.load_hero(users[1])?];
        let state = engine.new_match(
            [loaded[0].as_slice(), loaded[1].as_slice()],
            [&heroes[0], &heroes[1]],
            config,
        )?;
        info!("match {} starts: {} vs {}", id, users[0], users[1]);

        let mut this = Self {
            id,
            engine,
            transport,
            recorder,
            last_log: state.log.iter().cloned().collect(),
            state,
            users: [users[0].to_owned(), users[1].to_owned()],
            heroes,
            decks: loaded,
            intents: 0,
            recorded: false,
            abandoned: false,
        };
        this.broadcast()?;
        Ok(this)
    }

    /// Resume from a snapshot. Nothing is loaded and nothing is sent.
    #[allow(clippy::too_many_arguments)]
    pub fn resume(
        id: MatchId,
        engine: E,
        users: [&str; 2],
        heroes: [HeroDescriptor; 2],
        decks: [Vec<CardId>; 2],
        snapshot: Snapshot,
        transport: T,
        recorder: R,
    ) -> Self {
        let state = snapshot.restore();
        Self {
            id,
            engine,
            transport,
            recorder,
            state,
            users: [users[0].to_owned(), users[1].to_owned()],
            heroes,
            decks,
            last_log: Vec::new(),
            intents: 0,
            recorded: false,
            abandoned: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Log lines produced by the last accepted intent.
    #[must_use]
    pub fn last_log(&self) -> &[LogEntry] {
        &self.last_log
    }

    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        self.state.outcome
    }

    #[must_use]
    pub fn view(&self, player: PlayerId) -> PlayerView {
        view_for(&self.state, player)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Resolve one intent from `player`.
    ///
    /// Returns the notification for this intent, if any. An illegal intent
    /// is not an error here: the state is kept, the player is told why and
    /// the notification is returned. Errors are fatal ones (the match is
    /// now abandoned) and port failures.
    pub fn deliver_intent(
        &mut self,
        player: PlayerId,
        intent: &Intent,
    ) -> Result<Option<Notification>> {
        if self.abandoned {
            return self.reject(player, &IllegalAction::GameAlreadyOver);
        }

        let res = match self.engine.apply(&self.state, player, intent) {
            Ok(res) => res,
            Err(EngineError::Illegal(illegal)) => return self.reject(player, &illegal),
            Err(err) => {
                warn!("match {} abandoned: {}", self.id, err);
                self.abandoned = true;
                self.record()?;
                return Err(err);
            }
        };

        debug!("match {}: {} {}", self.id, player, intent.verb());
        self.intents += 1;
        self.state = res.state;
        self.last_log = res.log;

        self.broadcast()?;
        if let Some(note) = &res.notification {
            self.transport.notify(self.id, note)?;
        }
        if res.outcome.is_some() {
            self.record()?;
        }
        Ok(res.notification)
    }

    fn reject(
        &mut self,
        player: PlayerId,
        illegal: &IllegalAction,
    ) -> Result<Option<Notification>> {
        debug!("match {}: rejected {} ({})", self.id, player, illegal);
        let note = illegal.notification(player);
        self.transport.notify(self.id, &note)?;
        Ok(Some(note))
    }

    fn broadcast(&mut self) -> Result<()> {
        for player in PlayerId::both() {
            let view = view_for(&self.state, player);
            self.transport.broadcast_state(self.id, &view)?;
        }
        Ok(())
    }

    /// Hand the summary to the recorder, at most once per match.
    fn record(&mut self) -> Result<()> {
        if self.recorded {
            return Ok(());
        }
        self.recorded = true;
        let summary = self.summary();
        info!("match {} recorded: {:?}", self.id, summary.result);
        self.recorder.record_match_result(&summary)
    }

    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.id,
            users: self.users.clone(),
            heroes: self.heroes.clone(),
            result: if self.abandoned { None } else { self.state.outcome },
            turns: self.state.turn,
            intents: self.intents,
            decks: self.decks.clone(),
            abandoned: self.abandoned,
        }
    }
}
