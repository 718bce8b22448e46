#![warn(missing_docs)]
//! Sortsweep Statistical Reduction
//!
//! Reduces the repeated samples of one configuration into summary
//! statistics: per-dimension mean and standard deviation over elapsed, user,
//! and system time. Failed samples are filtered out before reduction; a
//! sample set with no survivors aggregates to nothing rather than to NaN.

mod aggregate;

pub use aggregate::{aggregate, AggregateStat};
