//! Waterflow
//!
//! A masonry ("waterfall") layout engine with a union-rect spatial index,
//! and a terminal feed viewer built on it.
//!
//! The engine in [`layout`] is pure: it computes frames from a
//! [`layout::MetricsProvider`] and answers rectangle queries. The viewer in
//! [`view`] wraps it with card sizing ([`card`]), a paged feed ([`feed`]),
//! configuration ([`config`]) and logging ([`logging`]).

pub mod card;
pub mod config;
pub mod error;
pub mod feed;
pub mod layout;
pub mod logging;
pub mod view;

pub use error::AppError;

#[cfg(test)]
mod test_harness;
