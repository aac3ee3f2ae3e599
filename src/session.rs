use serde::Serialize;
use thiserror::Error;

use crate::recipe::{
    self, GramRange, Method, ShotSize, DEFAULT_CUPS, DEFAULT_GRAMS, ESPRESSO_BREW_SECS,
    FILTER_BREW_SECS,
};
use crate::timer::{BrewTimer, Cue};

/// A screen of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Step {
    Start,
    EspressoShot,
    EspressoInstruction,
    FilterCups,
    FilterSlider,
    FilterReady,
    FilterBrew,
    ColdbrewGrams,
    ColdbrewInstruction,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Start,
        Step::EspressoShot,
        Step::EspressoInstruction,
        Step::FilterCups,
        Step::FilterSlider,
        Step::FilterReady,
        Step::FilterBrew,
        Step::ColdbrewGrams,
        Step::ColdbrewInstruction,
    ];

    /// The brewing path this step belongs to, `None` for the start screen.
    pub fn method(self) -> Option<Method> {
        match self {
            Step::Start => None,
            Step::EspressoShot | Step::EspressoInstruction => Some(Method::Espresso),
            Step::FilterCups | Step::FilterSlider | Step::FilterReady | Step::FilterBrew => {
                Some(Method::Filter)
            }
            Step::ColdbrewGrams | Step::ColdbrewInstruction => Some(Method::ColdBrew),
        }
    }

    /// Countdown started by confirming this step, if any.
    pub fn brew_secs(self) -> Option<u32> {
        match self {
            Step::EspressoInstruction => Some(ESPRESSO_BREW_SECS),
            Step::FilterReady => Some(FILTER_BREW_SECS),
            _ => None,
        }
    }

    /// Steps whose content depends on the countdown.
    pub fn is_timed(self) -> bool {
        matches!(self, Step::EspressoInstruction | Step::FilterBrew)
    }
}

impl Method {
    pub fn first_step(self) -> Step {
        match self {
            Method::Espresso => Step::EspressoShot,
            Method::Filter => Step::FilterCups,
            Method::ColdBrew => Step::ColdbrewGrams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{action} is not available on the {step} step")]
    InvalidTransition { step: Step, action: &'static str },
}

/// Which part of a timed step is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Prepare,
    Brewing { remaining: u32, progress: f64 },
    Done,
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: Step,
    pub shot_size: Option<ShotSize>,
    pub cup_count: u8,
    pub grams: u32,
    pub remaining_seconds: u32,
    pub running: bool,
    pub finished: bool,
    pub progress: f64,
    pub water_ml: Option<u32>,
    pub dose_g: Option<u32>,
    pub yield_g: Option<u32>,
}

/// One brewing walkthrough: the active step, the user's choices and the
/// countdown. All mutation goes through the transition methods below, each
/// of which leaves the session untouched when called out of order.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    step: Step,
    shot_size: Option<ShotSize>,
    cup_count: u8,
    grams: u32,
    timer: BrewTimer,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            step: Step::Start,
            shot_size: None,
            cup_count: DEFAULT_CUPS,
            grams: DEFAULT_GRAMS,
            timer: BrewTimer::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn shot_size(&self) -> Option<ShotSize> {
        self.shot_size
    }

    pub fn cup_count(&self) -> u8 {
        self.cup_count
    }

    pub fn grams(&self) -> u32 {
        self.grams
    }

    pub fn timer(&self) -> &BrewTimer {
        &self.timer
    }

    pub fn method(&self) -> Option<Method> {
        self.step.method()
    }

    /// Begin a fresh walkthrough.
    pub fn start(&mut self) {
        *self = Self::default();
    }

    /// Abandon the walkthrough: stop the countdown and forget every choice.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.start();
    }

    pub fn select_method(&mut self, method: Method) -> Result<(), FlowError> {
        self.expect_step(&[Step::Start], "select_method")?;

        self.step = method.first_step();
        if method == Method::ColdBrew {
            // the default 20 g is below the cold brew slider
            self.grams = GramRange::COLDBREW.snap(i64::from(self.grams));
        }
        Ok(())
    }

    pub fn select_shot(&mut self, size: ShotSize) -> Result<(), FlowError> {
        self.expect_step(&[Step::EspressoShot], "select_shot")?;

        self.shot_size = Some(size);
        self.step = Step::EspressoInstruction;
        Ok(())
    }

    pub fn select_cup_count(&mut self, cups: u8) -> Result<(), FlowError> {
        self.expect_step(&[Step::FilterCups], "select_cup_count")?;

        let cups = recipe::clamp_cups(cups);
        self.cup_count = cups;
        self.grams = recipe::filter_default_grams(cups);
        self.step = Step::FilterSlider;
        Ok(())
    }

    /// Store `value` after clamping it onto the active slider. Returns the
    /// stored amount.
    pub fn adjust_grams(&mut self, value: i64) -> Result<u32, FlowError> {
        self.expect_step(&[Step::ColdbrewGrams, Step::FilterSlider], "adjust_grams")?;

        let range = self.slider_range();
        self.grams = range.snap(value);
        Ok(self.grams)
    }

    /// Move the slider by whole steps; negative moves down.
    pub fn nudge_grams(&mut self, steps: i32) -> Result<u32, FlowError> {
        self.expect_step(&[Step::ColdbrewGrams, Step::FilterSlider], "nudge_grams")?;

        let range = self.slider_range();
        let target = i64::from(self.grams) + i64::from(steps) * i64::from(range.step);
        self.grams = range.snap(target);
        Ok(self.grams)
    }

    /// Start the countdown belonging to the current step. From the filter
    /// "ready" screen this first moves on to the brewing screen.
    pub fn confirm_and_brew(&mut self) -> Result<Option<Cue>, FlowError> {
        let secs = self
            .step
            .brew_secs()
            .filter(|_| self.timer.is_idle())
            .ok_or(FlowError::InvalidTransition {
                step: self.step,
                action: "confirm_and_brew",
            })?;

        if self.step == Step::FilterReady {
            self.step = Step::FilterBrew;
        }
        Ok(self.timer.start(secs))
    }

    pub fn confirm_coldbrew(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[Step::ColdbrewGrams], "confirm_coldbrew")?;
        self.step = Step::ColdbrewInstruction;
        Ok(())
    }

    pub fn confirm_filter_slider(&mut self) -> Result<(), FlowError> {
        self.expect_step(&[Step::FilterSlider], "confirm_filter_slider")?;
        self.step = Step::FilterReady;
        Ok(())
    }

    /// One second of countdown has elapsed.
    pub fn tick(&mut self) -> Option<Cue> {
        self.timer.tick()
    }

    /// The gram range that applies to the current path, if it has one.
    pub fn gram_range(&self) -> Option<GramRange> {
        match self.method()? {
            Method::ColdBrew => Some(GramRange::COLDBREW),
            Method::Filter if self.step != Step::FilterCups => {
                Some(GramRange::for_cups(self.cup_count))
            }
            Method::Filter | Method::Espresso => None,
        }
    }

    pub fn water_ml(&self) -> Option<u32> {
        match self.method()? {
            Method::ColdBrew => Some(recipe::coldbrew_water_ml(self.grams)),
            Method::Filter if self.step != Step::FilterCups => {
                Some(recipe::filter_water_ml(self.grams))
            }
            Method::Filter | Method::Espresso => None,
        }
    }

    pub fn dose_grams(&self) -> Option<u32> {
        self.shot_size.map(ShotSize::dose_grams)
    }

    pub fn yield_grams(&self) -> Option<u32> {
        self.shot_size.map(ShotSize::yield_grams)
    }

    pub fn phase(&self) -> Phase {
        if self.timer.is_running() {
            Phase::Brewing {
                remaining: self.timer.remaining_seconds(),
                progress: self.timer.progress(),
            }
        } else if self.timer.is_finished() {
            Phase::Done
        } else {
            Phase::Prepare
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step,
            shot_size: self.shot_size,
            cup_count: self.cup_count,
            grams: self.grams,
            remaining_seconds: self.timer.remaining_seconds(),
            running: self.timer.is_running(),
            finished: self.timer.is_finished(),
            progress: self.timer.progress(),
            water_ml: self.water_ml(),
            dose_g: self.dose_grams(),
            yield_g: self.yield_grams(),
        }
    }

    fn slider_range(&self) -> GramRange {
        if self.step == Step::ColdbrewGrams {
            GramRange::COLDBREW
        } else {
            GramRange::for_cups(self.cup_count)
        }
    }

    fn expect_step(&self, allowed: &[Step], action: &'static str) -> Result<(), FlowError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }
}
