//! quantdash — quantitative analytics engine behind a strategy and
//! portfolio dashboard (EUR/USD strategies, CAC 40 portfolios).
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], CLI wiring in
//! [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
