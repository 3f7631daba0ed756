//! Behaviour profiles for the chaos monkey
//!
//! A profile describes one way of perturbing a canned response. Profiles are
//! chosen per request by cumulative interval selection over their
//! frequencies: in declaration order each profile owns the interval
//! `(lower, lower + frequency]`, and a single uniform draw picks the profile
//! whose interval contains it. Probability mass not covered by any profile
//! means the response goes out untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One fault-injection recipe with its probability weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BehaviourProfile {
    /// Extra latency in milliseconds
    #[serde(default)]
    pub delay: u64,
    /// Share of the probability space, in `[0, 1]`
    #[serde(default)]
    pub frequency: f64,
    /// Status code override; `0` keeps the canned status
    #[serde(default)]
    pub status: u16,
    /// Body override; empty keeps the canned body
    #[serde(default)]
    pub body: String,
    /// Number of garbage bytes appended to the body
    #[serde(default)]
    pub garbage: usize,
}

/// Source of uniform draws in `[0, 1)`.
///
/// Closures returning `f64` implement this, which keeps interval edges easy
/// to pin down in tests.
pub trait RandomSource {
    /// Returns the next draw.
    fn next_f64(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Picks the profile whose cumulative interval contains one draw from
/// `random`.
///
/// Returns `None` when the draw falls outside every interval. Frequencies are
/// not validated: a list summing past 1.0 simply has intervals no draw in
/// `[0, 1)` can reach.
pub fn select<'a, R>(profiles: &'a [BehaviourProfile], random: &mut R) -> Option<&'a BehaviourProfile>
where
    R: RandomSource + ?Sized,
{
    let draw = random.next_f64();
    let mut lower = 0.0;

    for profile in profiles {
        let upper = lower + profile.frequency;
        if draw > lower && draw <= upper {
            return Some(profile);
        }
        lower = upper;
    }

    None
}

impl BehaviourProfile {
    /// True when applying the profile would leave a response unchanged.
    pub fn is_noop(&self) -> bool {
        self.delay == 0 && self.status == 0 && self.body.is_empty() && self.garbage == 0
    }
}

/// Renders like a Go `time.Duration`: `250ms`, `1.5s`, `1m30s`, `1h0m0s`.
fn format_delay(millis: u64) -> String {
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let hours = millis / 3_600_000;
    let minutes = millis / 60_000 % 60;
    let seconds = format_seconds(millis % 60_000);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn format_seconds(millis: u64) -> String {
    let (whole, fraction) = (millis / 1000, millis % 1000);
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:03}", fraction);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

impl fmt::Display for BehaviourProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:2.0}% of the time |", self.frequency * 100.0)?;

        if self.delay != 0 {
            write!(f, " Delay: {}", format_delay(self.delay))?;
        }
        if self.status != 0 {
            write!(f, " Status: {}", self.status)?;
        }
        if !self.body.is_empty() {
            write!(f, " Body: {}", self.body)?;
        }
        if self.garbage != 0 {
            write!(f, " Garbage bytes: {}", self.garbage)?;
        }

        Ok(())
    }
}
