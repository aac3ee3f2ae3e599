//! Recipe arithmetic: dose, yield, water volume and the gram ranges each
//! brewing path allows. Everything here is a pure function of its inputs.

use serde::Serialize;

/// Countdown length for pulling an espresso shot.
pub const ESPRESSO_BREW_SECS: u32 = 30;
/// Countdown length for the whole pour-over, bloom included.
pub const FILTER_BREW_SECS: u32 = 180;

/// Grams every new session starts with.
pub const DEFAULT_GRAMS: u32 = 20;
pub const DEFAULT_CUPS: u8 = 1;
pub const MAX_CUPS: u8 = 3;

pub const COLDBREW_WATER_RATIO: u32 = 8;
pub const FILTER_WATER_RATIO: u32 = 16;

/// Grams of coffee to grind and discard before the first shot of the day.
pub const PURGE_GRAMS: (u32, u32) = (4, 5);
/// Starting dose for a double shot when the beans are older than a month.
pub const STALE_BEANS_DOUBLE_DOSE: u32 = 19;
/// Gap between the shower screen and the tamped puck, in millimetres.
pub const PUCK_GAP_MM: (u32, u32) = (3, 4);

pub const BLOOM_WATER_GRAMS: u32 = 50;
pub const BLOOM_WAIT_SECS: u32 = 10;
pub const POUR_PORTION_ML: u32 = 100;

pub const COLDBREW_RECOMMENDED_GRAMS: (u32, u32) = (60, 80);
pub const COLDBREW_STEEP_HOURS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum Method {
    Espresso,
    Filter,
    #[strum(serialize = "Cold brew")]
    ColdBrew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum ShotSize {
    Single,
    Double,
}

impl ShotSize {
    /// Ground coffee that goes into the basket.
    pub fn dose_grams(self) -> u32 {
        match self {
            ShotSize::Single => 9,
            ShotSize::Double => 18,
        }
    }

    /// Expected weight of the finished drink.
    pub fn yield_grams(self) -> u32 {
        match self {
            ShotSize::Single => 18,
            ShotSize::Double => 36,
        }
    }
}

/// Water temperature advice for pour-over, by roast level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Roast {
    Light,
    Medium,
    Dark,
}

impl Roast {
    pub const ALL: [Roast; 3] = [Roast::Light, Roast::Medium, Roast::Dark];

    /// Inclusive temperature band in degrees Celsius.
    pub fn water_temp_celsius(self) -> (u32, u32) {
        match self {
            Roast::Light => (100, 100),
            Roast::Medium => (90, 95),
            Roast::Dark => (80, 90),
        }
    }
}

/// Slider bounds for a brewing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl GramRange {
    pub const COLDBREW: GramRange = GramRange {
        min: 40,
        max: 80,
        step: 2,
    };
    pub const FILTER_ONE_CUP: GramRange = GramRange {
        min: 10,
        max: 20,
        step: 2,
    };
    pub const FILTER_MANY_CUPS: GramRange = GramRange {
        min: 20,
        max: 40,
        step: 2,
    };

    pub fn for_cups(cups: u8) -> GramRange {
        if cups <= 1 {
            GramRange::FILTER_ONE_CUP
        } else {
            GramRange::FILTER_MANY_CUPS
        }
    }

    /// Clamp into `[min, max]` and snap to the nearest step counted from
    /// `min`. Halfway values round up.
    pub fn snap(&self, value: i64) -> u32 {
        let min = i64::from(self.min);
        let max = i64::from(self.max);
        let step = i64::from(self.step.max(1));

        if value <= min {
            return self.min;
        }
        if value >= max {
            return self.max;
        }

        let steps = (value - min + step / 2) / step;
        // max - min is a whole number of steps for every range above, but keep
        // the result inside the bounds regardless
        (min + steps * step).min(max) as u32
    }

    pub fn contains(&self, grams: u32) -> bool {
        grams >= self.min && grams <= self.max && (grams - self.min) % self.step.max(1) == 0
    }

    /// Position of `grams` inside the range as a fraction in `[0, 1]`.
    pub fn fraction(&self, grams: u32) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let clamped = grams.clamp(self.min, self.max);
        f64::from(clamped - self.min) / f64::from(self.max - self.min)
    }
}

/// Cup count is always one of 1, 2 or 3.
pub fn clamp_cups(cups: u8) -> u8 {
    cups.clamp(DEFAULT_CUPS, MAX_CUPS)
}

/// Grams preselected on the slider right after choosing the cup count.
pub fn filter_default_grams(cups: u8) -> u32 {
    if cups <= 1 {
        10
    } else {
        20
    }
}

pub fn coldbrew_water_ml(grams: u32) -> u32 {
    grams * COLDBREW_WATER_RATIO
}

/// Hot water needed for a pour-over, `round(grams * 16)`. Grams are whole
/// numbers so the product is already exact.
pub fn filter_water_ml(grams: u32) -> u32 {
    grams * FILTER_WATER_RATIO
}

/// Share of a countdown that has elapsed. Zero for a zero-length timer.
pub fn progress_fraction(initial_secs: u32, remaining_secs: u32) -> f64 {
    if initial_secs == 0 {
        return 0.0;
    }
    let remaining = remaining_secs.min(initial_secs);
    f64::from(initial_secs - remaining) / f64::from(initial_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_size_dose_and_yield() {
        assert_eq!(ShotSize::Single.dose_grams(), 9);
        assert_eq!(ShotSize::Double.dose_grams(), 18);
        assert_eq!(ShotSize::Single.yield_grams(), 18);
        assert_eq!(ShotSize::Double.yield_grams(), 36);
    }

    #[test]
    fn test_water_volumes() {
        assert_eq!(coldbrew_water_ml(40), 320);
        assert_eq!(coldbrew_water_ml(80), 640);
        assert_eq!(filter_water_ml(40), 640);
        assert_eq!(filter_water_ml(10), 160);
    }

    #[test]
    fn test_snap_clamps_below_and_above() {
        assert_eq!(GramRange::COLDBREW.snap(33), 40);
        assert_eq!(GramRange::COLDBREW.snap(-5), 40);
        assert_eq!(GramRange::COLDBREW.snap(1000), 80);
        assert_eq!(GramRange::FILTER_MANY_CUPS.snap(100), 40);
        assert_eq!(GramRange::FILTER_ONE_CUP.snap(0), 10);
    }

    #[test]
    fn test_snap_rounds_to_step() {
        assert_eq!(GramRange::COLDBREW.snap(50), 50);
        assert_eq!(GramRange::COLDBREW.snap(51), 52);
        assert_eq!(GramRange::FILTER_ONE_CUP.snap(13), 14);
        assert_eq!(GramRange::FILTER_ONE_CUP.snap(12), 12);
    }

    #[test]
    fn test_range_for_cups() {
        assert_eq!(GramRange::for_cups(1), GramRange::FILTER_ONE_CUP);
        assert_eq!(GramRange::for_cups(2), GramRange::FILTER_MANY_CUPS);
        assert_eq!(GramRange::for_cups(3), GramRange::FILTER_MANY_CUPS);
    }

    #[test]
    fn test_contains() {
        assert!(GramRange::COLDBREW.contains(40));
        assert!(GramRange::COLDBREW.contains(62));
        assert!(!GramRange::COLDBREW.contains(41));
        assert!(!GramRange::COLDBREW.contains(82));
    }

    #[test]
    fn test_filter_default_grams() {
        assert_eq!(filter_default_grams(1), 10);
        assert_eq!(filter_default_grams(2), 20);
        assert_eq!(filter_default_grams(3), 20);
    }

    #[test]
    fn test_clamp_cups() {
        assert_eq!(clamp_cups(0), 1);
        assert_eq!(clamp_cups(2), 2);
        assert_eq!(clamp_cups(9), 3);
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(progress_fraction(0, 0), 0.0);
        assert_eq!(progress_fraction(30, 30), 0.0);
        assert_eq!(progress_fraction(30, 15), 0.5);
        assert_eq!(progress_fraction(30, 0), 1.0);
    }

    #[test]
    fn test_range_fraction() {
        assert_eq!(GramRange::COLDBREW.fraction(40), 0.0);
        assert_eq!(GramRange::COLDBREW.fraction(60), 0.5);
        assert_eq!(GramRange::COLDBREW.fraction(90), 1.0);
    }

    #[test]
    fn test_roast_temperatures() {
        assert_eq!(Roast::Light.water_temp_celsius(), (100, 100));
        assert_eq!(Roast::Medium.water_temp_celsius(), (90, 95));
        assert_eq!(Roast::Dark.water_temp_celsius(), (80, 90));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Espresso.to_string(), "Espresso");
        assert_eq!(Method::ColdBrew.to_string(), "Cold brew");
    }
}
