//! Synthetic reputation metrics generation.
//!
//! Turns a (name, location) pair into an internally consistent analytics
//! record: rating, review volume, sentiment split, headline, suggestion set,
//! and a six-month review trend. Pure computation over an injected uniform
//! randomness source: no I/O, no stored state.

pub mod error;
pub mod generator;
pub mod headline;
pub mod rng;
pub mod tiers;

pub use error::MetricsError;
pub use generator::{balance_sentiment, generate};
pub use headline::headline_for;
pub use rng::{EntropySource, SequenceSource, UniformSource};
pub use tiers::{RatingTier, SentimentBand};
