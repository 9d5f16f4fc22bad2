use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

/// The service operations, each with its own simulated round-trip time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn base_latency(self) -> Duration {
        let millis = match self {
            Operation::GetAll => 300,
            Operation::GetById => 200,
            Operation::Create => 400,
            Operation::Update => 350,
            Operation::Delete => 250,
        };
        Duration::from_millis(millis)
    }
}

/// Time source for the service layer: the simulated network pause that
/// precedes every operation, and the calendar date used to stamp new records.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn pause(&self, op: Operation);

    fn today(&self) -> NaiveDate;
}

/// Sleeps on the tokio timer and reads the local calendar.
#[derive(Debug, Clone)]
pub struct SystemClock {
    latency_scale: f64,
}

impl SystemClock {
    /// A scale of `0.0` disables the pause entirely. Negative scales are treated as zero.
    pub fn new(latency_scale: f64) -> Self {
        Self {
            latency_scale: latency_scale.max(0.0),
        }
    }

    /// Saturates at `Duration::MAX` when the scaled latency does not fit.
    pub fn latency(&self, op: Operation) -> Duration {
        Duration::try_from_secs_f64(op.base_latency().as_secs_f64() * self.latency_scale)
            .unwrap_or(Duration::MAX)
    }
}

#[async_trait]
impl Clock for SystemClock {
    async fn pause(&self, op: Operation) {
        let latency = self.latency(op);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Never sleeps, always reports the same day, and remembers every pause.
    pub struct ManualClock {
        today: NaiveDate,
        pauses: Mutex<Vec<Operation>>,
    }

    impl ManualClock {
        pub fn new(today: NaiveDate) -> Self {
            Self {
                today,
                pauses: Mutex::new(Vec::new()),
            }
        }

        pub fn pauses(&self) -> Vec<Operation> {
            self.pauses.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Clock for ManualClock {
        async fn pause(&self, op: Operation) {
            self.pauses.lock().unwrap().push(op);
        }

        fn today(&self) -> NaiveDate {
            self.today
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_multiplies_base_latency() {
        let clock = SystemClock::new(0.5);
        assert_eq!(clock.latency(Operation::Create), Duration::from_millis(200));
        assert_eq!(SystemClock::new(-3.0).latency(Operation::GetAll), Duration::ZERO);
    }

    #[test]
    fn oversized_scale_saturates() {
        assert_eq!(SystemClock::new(f64::INFINITY).latency(Operation::GetAll), Duration::MAX);
        assert_eq!(SystemClock::new(1e20).latency(Operation::Delete), Duration::MAX);
        assert_eq!(SystemClock::new(f64::NAN).latency(Operation::Delete), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn system_clock_sleeps_for_the_operation_latency() {
        let clock = SystemClock::new(1.0);
        let started = tokio::time::Instant::now();
        clock.pause(Operation::Update).await;
        assert!(started.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_scale_does_not_sleep() {
        let clock = SystemClock::new(0.0);
        let started = tokio::time::Instant::now();
        clock.pause(Operation::Create).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
