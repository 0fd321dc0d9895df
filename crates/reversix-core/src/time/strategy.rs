//! Depth scheduling for iterative deepening.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;

use crate::time::regression::linear_regression;

/// Decides, round by round, whether iterative deepening should compute
/// one more tree and at which depth.
///
/// Limits of zero mean "no limit". The driver feeds back the total
/// elapsed time per move (`set_move_duration`) and the duration of each
/// completed tree (`add_computation_metrics`); `reset` clears all
/// per-move data.
pub trait TimeStrategy {
    /// The next depth to search, or 0 to stop and play the best move
    /// found so far.
    fn next_search_depth(&mut self) -> u32;

    fn set_time_limit(&mut self, time_limit: Duration);

    fn set_max_depth(&mut self, max_depth: u32);

    fn set_move_duration(&mut self, duration: Duration);

    /// Registers how long the tree of the given maximum depth took.
    fn add_computation_metrics(&mut self, duration: Duration, depth: u32);

    fn reset(&mut self);
}

/// Always proposes the next higher depth while the time and depth
/// budgets hold.
#[derive(Debug, Clone)]
pub struct SimpleTimeStrategy {
    min_depth: u32,
    max_depth: u32,
    time_limit: Duration,
    move_duration: Duration,
    current_depth: u32,
}

impl SimpleTimeStrategy {
    pub fn new(min_depth: u32) -> SimpleTimeStrategy {
        debug_assert!(min_depth >= 1);

        SimpleTimeStrategy {
            min_depth,
            max_depth: min_depth,
            time_limit: Duration::ZERO,
            move_duration: Duration::ZERO,
            current_depth: min_depth - 1,
        }
    }
}

impl TimeStrategy for SimpleTimeStrategy {
    fn next_search_depth(&mut self) -> u32 {
        let time_ok = self.time_limit.is_zero() || self.time_limit > self.move_duration;
        let depth_ok = self.max_depth == 0 || self.max_depth > self.current_depth;

        if time_ok && depth_ok {
            self.current_depth += 1;

            self.current_depth
        } else {
            0
        }
    }

    fn set_time_limit(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
    }

    fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    fn set_move_duration(&mut self, duration: Duration) {
        self.move_duration = duration;
    }

    fn add_computation_metrics(&mut self, _duration: Duration, _depth: u32) {}

    fn reset(&mut self) {
        self.move_duration = Duration::ZERO;
        self.current_depth = self.min_depth - 1;
    }
}

/// Extrapolates the duration of the next-deeper tree from previous
/// rounds and refuses to start one that would not finish in time.
///
/// Tree computation time grows roughly exponentially with depth, so a
/// line is fitted through (depth, log duration) pairs. Two samples are
/// enough to extrapolate; no variance or confidence checking is done,
/// the estimate is knowingly fragile.
#[derive(Debug, Clone)]
pub struct PredictiveTimeStrategy {
    min_depth: u32,
    max_depth: u32,
    time_limit: Duration,
    move_duration: Duration,
    current_depth: u32,
    /// Multiplier damping (or boosting) the fitted slope.
    threshold: f64,
    /// Truncated natural log of each completed tree's duration in
    /// nanoseconds, keyed by depth.
    log_durations: HashMap<u32, i64>,
    predicted_duration: f64,
}

impl PredictiveTimeStrategy {
    pub fn new(min_depth: u32) -> PredictiveTimeStrategy {
        debug_assert!(min_depth >= 1);

        PredictiveTimeStrategy {
            min_depth,
            max_depth: min_depth,
            time_limit: Duration::ZERO,
            move_duration: Duration::ZERO,
            current_depth: min_depth - 1,
            threshold: 1.0,
            log_durations: HashMap::new(),
            predicted_duration: 0.0,
        }
    }
}

impl TimeStrategy for PredictiveTimeStrategy {
    fn next_search_depth(&mut self) -> u32 {
        let mut expected_finish = 0.0;

        // The fit needs at least two samples.
        if self.log_durations.len() >= 2 {
            let mut depths = Vec::with_capacity(self.log_durations.len());
            let mut logs = Vec::with_capacity(self.log_durations.len());

            for (depth, log_duration) in &self.log_durations {
                depths.push(f64::from(*depth));
                logs.push(*log_duration as f64);
            }

            let (a, b) = linear_regression(&depths, &logs);

            let duration = (a + self.threshold * b * f64::from(self.current_depth + 1)).exp();

            self.predicted_duration = duration;
            expected_finish = self.move_duration.as_nanos() as f64 + duration;

            debug!("predicted execution time of {:.0} µs", duration / 1000.0);
        }

        let time_ok = self.time_limit.is_zero() || self.time_limit > self.move_duration;
        let depth_ok = self.max_depth == 0 || self.max_depth > self.current_depth;
        let prediction_ok = self.time_limit.as_nanos() as f64 > expected_finish;

        if time_ok && depth_ok && prediction_ok {
            self.current_depth += 1;

            self.current_depth
        } else {
            0
        }
    }

    fn set_time_limit(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
    }

    fn set_max_depth(&mut self, max_depth: u32) {
        self.max_depth = max_depth;
    }

    fn set_move_duration(&mut self, duration: Duration) {
        self.move_duration = duration;
    }

    fn add_computation_metrics(&mut self, duration: Duration, depth: u32) {
        if depth >= self.min_depth + 2 {
            debug!(
                "execution time delta of {:.0} µs",
                (self.predicted_duration - duration.as_nanos() as f64) / 1000.0
            );
        }

        self.log_durations
            .insert(depth, (duration.as_nanos() as f64).ln() as i64);
    }

    fn reset(&mut self) {
        self.move_duration = Duration::ZERO;
        self.log_durations.clear();
        self.current_depth = self.min_depth - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_strategy_counts_up_from_min_depth() {
        let mut strategy = SimpleTimeStrategy::new(2);

        assert_eq!(strategy.next_search_depth(), 2);
        assert_eq!(strategy.next_search_depth(), 3);
    }

    #[test]
    fn simple_strategy_respects_the_depth_limit() {
        let mut strategy = SimpleTimeStrategy::new(1);
        strategy.set_max_depth(2);

        assert_eq!(strategy.next_search_depth(), 1);
        assert_eq!(strategy.next_search_depth(), 2);
        assert_eq!(strategy.next_search_depth(), 0);
    }

    #[test]
    fn simple_strategy_stops_once_the_time_budget_is_spent() {
        let mut strategy = SimpleTimeStrategy::new(1);
        strategy.set_time_limit(Duration::from_millis(100));

        assert_eq!(strategy.next_search_depth(), 1);

        strategy.set_move_duration(Duration::from_millis(150));
        assert_eq!(strategy.next_search_depth(), 0);
    }

    #[test]
    fn simple_strategy_reset_restarts_the_count() {
        let mut strategy = SimpleTimeStrategy::new(1);
        strategy.next_search_depth();
        strategy.next_search_depth();

        strategy.reset();
        assert_eq!(strategy.next_search_depth(), 1);
    }

    #[test]
    fn predictive_strategy_needs_a_time_limit() {
        // Without a limit there is nothing to compare the prediction
        // against and the strategy never proposes a depth.
        let mut strategy = PredictiveTimeStrategy::new(1);

        assert_eq!(strategy.next_search_depth(), 0);
    }

    #[test]
    fn predictive_strategy_deepens_until_the_forecast_exceeds_the_limit() {
        let mut strategy = PredictiveTimeStrategy::new(1);
        strategy.set_time_limit(Duration::from_secs(1));

        assert_eq!(strategy.next_search_depth(), 1);
        strategy.add_computation_metrics(Duration::from_millis(1), 1);

        assert_eq!(strategy.next_search_depth(), 2);
        strategy.add_computation_metrics(Duration::from_millis(10), 2);

        // Each depth costs 10x its predecessor; depth 3 is still within
        // the second, depth 4 is predicted to blow the budget.
        strategy.set_move_duration(Duration::from_millis(11));
        assert_eq!(strategy.next_search_depth(), 3);
        strategy.add_computation_metrics(Duration::from_millis(100), 3);

        strategy.set_move_duration(Duration::from_millis(111));
        assert_eq!(strategy.next_search_depth(), 0);
    }
}
