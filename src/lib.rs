#![doc = include_str!("../README.md")]
mod error;
mod rating;
mod registry;
mod report;

pub use error::{Error, Result};
pub use rating::{Average, Overflow, Rating};
pub use registry::{Generator, Reports, AVERAGE_RATING};
pub use report::{average_rating, RankedEntry, Ratings, Report};
