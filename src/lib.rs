//! drawdown: quarterly retirement withdrawal engine.
//!
//! A momentum score over monthly index history picks which asset funds the
//! withdrawal; Guyton-Klinger rules decide how much. Hexagonal architecture:
//! domain logic in [`domain`], port traits in [`ports`], concrete implementations
//! in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
