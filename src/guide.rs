use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cue::CueSink;
use crate::input::Action;
use crate::recipe::{Method, ShotSize};
use crate::scheduler::Scheduler;
use crate::session::{FlowError, Session, Snapshot, Step};
use crate::timer::Cue;

/// Owns the session together with the tick source and the cue sink, and is
/// the only way a front end changes anything.
///
/// Every operation returns whether it changed the session. Out-of-order
/// operations are dropped with a debug log. After each operation the
/// scheduler is armed exactly when the countdown is running.
pub struct Guide<S: Scheduler, C: CueSink> {
    session: Session,
    scheduler: S,
    cues: C,
}

impl<S: Scheduler, C: CueSink> Guide<S, C> {
    pub fn new(scheduler: S, cues: C) -> Self {
        let mut guide = Self {
            session: Session::new(),
            scheduler,
            cues,
        };
        guide.scheduler.disarm();
        guide
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Direct access for hand-driven schedulers in tests and headless runs.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    /// Begin a new walkthrough, dropping any countdown in progress.
    pub fn start(&mut self) {
        self.stop_countdown();
        self.session.start();
        debug!("session started");
    }

    /// Return to the first screen and forget every choice.
    pub fn reset(&mut self) {
        let from = self.session.step();
        self.stop_countdown();
        self.session.reset();
        info!(%from, "session reset");
    }

    pub fn select_method(&mut self, method: Method) -> bool {
        let result = self.session.select_method(method);
        self.accept(result).is_some()
    }

    pub fn select_shot(&mut self, size: ShotSize) -> bool {
        let result = self.session.select_shot(size);
        self.accept(result).is_some()
    }

    pub fn select_cup_count(&mut self, cups: u8) -> bool {
        let result = self.session.select_cup_count(cups);
        self.accept(result).is_some()
    }

    pub fn adjust_grams(&mut self, value: i64) -> bool {
        let result = self.session.adjust_grams(value);
        self.accept(result).is_some()
    }

    pub fn nudge_grams(&mut self, steps: i32) -> bool {
        let result = self.session.nudge_grams(steps);
        self.accept(result).is_some()
    }

    pub fn confirm_coldbrew(&mut self) -> bool {
        let result = self.session.confirm_coldbrew();
        self.accept(result).is_some()
    }

    pub fn confirm_filter_slider(&mut self) -> bool {
        let result = self.session.confirm_filter_slider();
        self.accept(result).is_some()
    }

    /// Start the countdown for the current step.
    pub fn confirm_and_brew(&mut self) -> bool {
        let result = self.session.confirm_and_brew();
        let Some(cue) = self.accept(result) else {
            return false;
        };

        // at most one tick source: drop the old schedule before arming anew
        self.scheduler.disarm();
        info!(
            step = %self.session.step(),
            secs = self.session.timer().initial_seconds(),
            "brew started"
        );
        self.emit(cue);
        self.sync_scheduler();
        true
    }

    /// Confirm whatever the current step asks for.
    pub fn confirm(&mut self) -> bool {
        match self.session.step() {
            Step::EspressoInstruction | Step::FilterReady => self.confirm_and_brew(),
            Step::FilterSlider => self.confirm_filter_slider(),
            Step::ColdbrewGrams => self.confirm_coldbrew(),
            step => {
                debug!(%step, "nothing to confirm");
                false
            }
        }
    }

    /// Apply a front-end action. Returns whether the session changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SelectMethod(method) => self.select_method(method),
            Action::SelectShot(size) => self.select_shot(size),
            Action::SelectCups(cups) => self.select_cup_count(cups),
            Action::AdjustGrams(value) => self.adjust_grams(value),
            Action::NudgeGrams(steps) => self.nudge_grams(steps),
            Action::Confirm => self.confirm(),
            Action::Reset => {
                self.reset();
                true
            }
            Action::Quit => false,
        }
    }

    /// Feed elapsed seconds from the scheduler into the countdown. Returns
    /// the number of ticks applied.
    pub fn pump(&mut self, now: Instant) -> u32 {
        let due = self.scheduler.due(now);
        let mut applied = 0;

        for _ in 0..due {
            if !self.session.timer().is_running() {
                break;
            }
            let cue = self.session.tick();
            applied += 1;
            self.emit(cue);
        }

        if applied > 0 && self.session.timer().is_finished() {
            info!(step = %self.session.step(), "brew finished");
        }
        self.sync_scheduler();
        applied
    }

    /// Advance the countdown by one second without consulting the scheduler.
    pub fn tick(&mut self) -> Option<Cue> {
        let cue = self.session.tick();
        self.emit(cue);
        self.sync_scheduler();
        cue
    }

    fn accept<T>(&self, result: Result<T, FlowError>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!(step = %self.session.step(), "transition applied");
                Some(value)
            }
            Err(err) => {
                debug!(%err, "ignored");
                None
            }
        }
    }

    fn emit(&mut self, cue: Option<Cue>) {
        let Some(cue) = cue else {
            return;
        };
        if cue == Cue::Finish {
            self.cues.silence();
        }
        if let Err(err) = self.cues.play(cue) {
            warn!(%cue, error = %err, "cue playback failed");
        }
    }

    fn stop_countdown(&mut self) {
        self.scheduler.disarm();
        self.cues.silence();
    }

    fn sync_scheduler(&mut self) {
        let running = self.session.timer().is_running();
        if running && !self.scheduler.is_armed() {
            self.scheduler.arm();
        } else if !running && self.scheduler.is_armed() {
            self.scheduler.disarm();
        }
    }
}
