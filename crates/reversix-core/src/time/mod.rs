//! Time management for iterative deepening.

mod regression;
mod strategy;

pub use regression::{arithmetic_mean, covariance, linear_regression, variance};
pub use strategy::{PredictiveTimeStrategy, SimpleTimeStrategy, TimeStrategy};
