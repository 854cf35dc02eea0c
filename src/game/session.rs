use log::{debug, error, info, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

use super::bot_reveal::{BotReveal, RevealStep};
use super::settings::Settings;
use super::stats_manager::StatsManager;
use super::timer_queue::TimerQueue;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventHandler, EventObserver, Unsubscriber};
use crate::model::{
    tour_length, CitySet, Difficulty, ReplayChoice, RoundOutcome, RoundResult, SessionCommand,
    SessionEvent, SessionState, SessionStats, Tour, TourError,
};
use crate::solver::solve;

/// Player and solver lengths closer than this count as equal.
pub const LENGTH_EPSILON: f64 = 1e-6;

/// One player's game: the current cities, the tour being clicked, the score,
/// and the optional bot reveal. All mutation happens through [`SessionCommand`]s
/// and every visible change is published as a [`SessionEvent`].
pub struct Session {
    settings: Settings,
    difficulty: Difficulty,
    cities: Rc<CitySet>,
    player_tour: Tour,
    score: i32,
    state: SessionState,
    rng: StdRng,
    round_id: Uuid,
    timers: TimerQueue,
    reveal: Option<BotReveal>,
    stats: StatsManager,
    subscription: Option<Unsubscriber<SessionCommand>>,
    event_emitter: EventEmitter<SessionEvent>,
}

impl Destroyable for Session {
    fn destroy(&mut self) {
        self.cancel_reveal();
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl EventHandler<SessionCommand> for Session {
    fn handle_event(&mut self, event: &SessionCommand) {
        self.handle_command(event);
    }
}

impl Session {
    /// Creates a session listening on `command_observer` and starts the first round.
    ///
    /// Listeners on the event channel run while the session is borrowed; a
    /// command emitted synchronously from one of them is dropped.
    pub fn new(
        command_observer: EventObserver<SessionCommand>,
        event_emitter: EventEmitter<SessionEvent>,
        settings: Settings,
    ) -> Result<Rc<RefCell<Self>>, TourError> {
        if !settings.bounds().fits_margin(settings.margin) {
            return Err(TourError::BoundsTooSmall {
                width: settings.width,
                height: settings.height,
                margin: settings.margin,
            });
        }

        let seed = settings.seed.unwrap_or_else(|| rand::rng().next_u64());
        debug!(target: "session", "Session seed: {}", seed);
        let mut session = Self {
            difficulty: settings.difficulty,
            settings,
            cities: Rc::new(CitySet::default()),
            player_tour: Tour::default(),
            score: 0,
            state: SessionState::default(),
            rng: StdRng::seed_from_u64(seed),
            round_id: Uuid::new_v4(),
            timers: TimerQueue::new(),
            reveal: None,
            stats: StatsManager::new(),
            subscription: None,
            event_emitter,
        };
        session.reset_game();

        let session = Rc::new(RefCell::new(session));
        Session::wire_subscription(session.clone(), command_observer);
        Ok(session)
    }

    fn wire_subscription(
        session: Rc<RefCell<Self>>,
        command_observer: EventObserver<SessionCommand>,
    ) {
        let handler = session.clone();
        let subscription = command_observer.subscribe(move |command| {
            match handler.try_borrow_mut() {
                Ok(mut session) => session.handle_event(command),
                Err(_) => error!(
                    target: "session",
                    "Dropping re-entrant command {:?}", command
                ),
            }
        });
        session.borrow_mut().subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: &SessionCommand) {
        trace!(target: "session", "Handling command: {:?}", command);
        match command {
            SessionCommand::StartRound { difficulty, seed } => self.start_round(*difficulty, *seed),
            SessionCommand::LoadRound(cities) => self.load_round(cities),
            SessionCommand::SelectCity(index) => self.select_city(*index),
            SessionCommand::RevealOptimal => self.reveal_optimal(),
            SessionCommand::Decide(choice) => self.decide(*choice),
            SessionCommand::ChangeDifficulty(difficulty) => self.change_difficulty(*difficulty),
            SessionCommand::ResetGame => self.reset_game(),
            SessionCommand::AdvanceTime(elapsed) => self.advance_time(*elapsed),
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cities(&self) -> Rc<CitySet> {
        self.cities.clone()
    }

    pub fn player_tour(&self) -> &Tour {
        &self.player_tour
    }

    pub fn stats(&self) -> &SessionStats {
        self.stats.stats()
    }

    pub fn stats_json(&self) -> Result<String, serde_json::Error> {
        self.stats.to_json()
    }

    pub fn reveal_interval(&self) -> Duration {
        self.settings.reveal_interval()
    }

    fn emit(&self, event: SessionEvent) {
        self.event_emitter.emit(&event);
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            trace!(target: "session", "State {:?} -> {:?}", self.state, state);
            self.state = state;
            self.emit(SessionEvent::StateChanged(state));
        }
    }

    fn set_score(&mut self, score: i32) {
        self.score = score;
        self.emit(SessionEvent::ScoreChanged(score));
    }

    fn start_round(&mut self, difficulty: Option<Difficulty>, seed: Option<u64>) {
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        let round_seed = seed.unwrap_or_else(|| self.rng.next_u64());
        let mut round_rng = StdRng::seed_from_u64(round_seed);
        match CitySet::generate(
            self.difficulty.city_count(),
            self.settings.bounds(),
            self.settings.margin,
            &mut round_rng,
        ) {
            Ok(cities) => self.begin_round(cities, Some(round_seed)),
            Err(err) => error!(target: "session", "Could not generate cities: {}", err),
        }
    }

    fn load_round(&mut self, cities: &CitySet) {
        if cities.is_empty() {
            warn!(target: "session", "Ignoring empty city set");
            return;
        }
        self.begin_round(cities.clone(), None);
    }

    fn begin_round(&mut self, cities: CitySet, seed: Option<u64>) {
        self.cancel_reveal();
        self.cities = Rc::new(cities);
        self.player_tour.clear();
        self.round_id = Uuid::new_v4();
        info!(
            target: "session",
            "New round {}; difficulty: {}; cities: {}; seed: {:?}",
            self.round_id,
            self.difficulty,
            self.cities.len(),
            seed
        );
        self.set_state(SessionState::Playing);
        self.emit(SessionEvent::RoundStarted {
            cities: self.cities.clone(),
            difficulty: self.difficulty,
            seed,
        });
        self.emit(SessionEvent::DistancesReset);
    }

    fn select_city(&mut self, index: usize) {
        if self.state != SessionState::Playing {
            trace!(target: "session", "Ignoring city {} while {:?}", index, self.state);
            return;
        }
        if index >= self.cities.len() || self.player_tour.contains(index) {
            trace!(target: "session", "Ignoring city {}; tour: {:?}", index, self.player_tour);
            return;
        }

        let previous = self.player_tour.last();
        self.player_tour.push(index);
        if let Some(from) = previous {
            self.emit(SessionEvent::EdgeAdded { from, to: index });
        }

        if self.player_tour.len() == self.cities.len() {
            if let Some(first) = self.player_tour.first() {
                self.emit(SessionEvent::EdgeAdded {
                    from: index,
                    to: first,
                });
            }
            self.evaluate();
        }
    }

    fn evaluate(&mut self) {
        self.set_state(SessionState::Evaluating);

        let (optimal_tour, optimal_length) = match solve(&self.cities) {
            Ok(solution) => solution,
            Err(err) => {
                error!(target: "session", "Cannot grade round {}: {}", self.round_id, err);
                self.set_state(SessionState::Playing);
                return;
            }
        };
        // an unfinished tour is graded as an invalid submission
        let player_length = if self.player_tour.len() == self.cities.len() {
            tour_length(&self.cities, self.player_tour.as_slice()).ok()
        } else {
            None
        };
        let is_optimal = player_length
            .is_some_and(|length| (length - optimal_length).abs() < LENGTH_EPSILON);

        if is_optimal {
            self.finish_round(optimal_tour, optimal_length, player_length, RoundOutcome::Win);
            self.start_round(None, None);
        } else if self.score - 1 < 0 {
            self.finish_round(optimal_tour, optimal_length, player_length, RoundOutcome::GameOver);
            self.start_round(None, None);
        } else {
            self.finish_round(optimal_tour, optimal_length, player_length, RoundOutcome::Loss);
            self.set_state(SessionState::AwaitingDecision);
            self.emit(SessionEvent::DecisionRequested);
        }
    }

    fn finish_round(
        &mut self,
        optimal_tour: Tour,
        optimal_length: f64,
        player_length: Option<f64>,
        outcome: RoundOutcome,
    ) {
        let score = match outcome {
            RoundOutcome::Win => self.score + 1,
            RoundOutcome::Loss => self.score - 1,
            RoundOutcome::GameOver => 0,
        };
        let result = RoundResult {
            player_length,
            optimal_length,
            optimal_tour,
            outcome,
        };
        info!(
            target: "session",
            "Round {} finished: {:?}; player: {:?}; optimal: {:.3}; score: {}",
            self.round_id,
            outcome,
            player_length,
            optimal_length,
            score
        );
        self.stats
            .record_round(self.round_id, self.difficulty, &result, score);
        self.emit(SessionEvent::RoundCompleted(result));
        self.set_score(score);
    }

    fn decide(&mut self, choice: ReplayChoice) {
        if self.state != SessionState::AwaitingDecision {
            trace!(target: "session", "Ignoring {:?} while {:?}", choice, self.state);
            return;
        }
        match choice {
            ReplayChoice::ReplaySameCities => {
                self.player_tour.clear();
                self.set_state(SessionState::Playing);
                self.emit(SessionEvent::RoundReplayed {
                    cities: self.cities.clone(),
                });
            }
            ReplayChoice::NewRound => self.start_round(None, None),
        }
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset_game();
    }

    fn reset_game(&mut self) {
        self.set_score(0);
        self.start_round(None, None);
    }

    fn reveal_optimal(&mut self) {
        if self.cities.is_empty() {
            trace!(target: "session", "Nothing to reveal before the first round");
            return;
        }
        self.cancel_reveal();

        let (tour, length) = match solve(&self.cities) {
            Ok(solution) => solution,
            Err(err) => {
                error!(target: "session", "Cannot reveal round {}: {}", self.round_id, err);
                return;
            }
        };
        self.emit(SessionEvent::OptimalLengthRevealed(length));

        let timer = self.timers.add_repeating(self.settings.reveal_interval());
        debug!(target: "session", "Revealing {} on {:?}", tour, timer);
        self.reveal = Some(BotReveal::new(tour, timer));
        self.set_state(SessionState::BotRevealing);
    }

    fn cancel_reveal(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            self.timers.cancel(reveal.timer());
            debug!(target: "session", "Cancelled reveal of {}", reveal.tour());
        }
    }

    fn advance_time(&mut self, elapsed: Duration) {
        self.timers.advance(elapsed);
        while let Some(timer) = self.timers.poll() {
            let is_reveal_timer = self
                .reveal
                .as_ref()
                .is_some_and(|reveal| reveal.timer() == timer);
            if is_reveal_timer {
                self.reveal_tick();
            } else {
                warn!(target: "session", "Cancelling orphaned {:?}", timer);
                self.timers.cancel(timer);
            }
        }
    }

    fn reveal_tick(&mut self) {
        let Some(reveal) = self.reveal.as_mut() else {
            return;
        };
        match reveal.step() {
            Some(RevealStep::Edge { from, to }) => {
                self.emit(SessionEvent::RevealEdge { from, to });
            }
            Some(RevealStep::Closing { from, to }) => {
                self.emit(SessionEvent::RevealEdge { from, to });
                self.finish_reveal();
            }
            None => self.finish_reveal(),
        }
    }

    fn finish_reveal(&mut self) {
        if let Some(reveal) = self.reveal.take() {
            self.timers.cancel(reveal.timer());
        }
        self.emit(SessionEvent::RevealCompleted);
        self.evaluate();
    }
}
