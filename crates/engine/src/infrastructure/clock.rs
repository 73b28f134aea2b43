//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Deterministic UUIDs for testing: 1, 2, 3, ...
#[cfg(test)]
#[derive(Default)]
pub struct SequentialRandom(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl RandomPort for SequentialRandom {
    fn gen_uuid(&self) -> Uuid {
        let next = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(next))
    }
}
