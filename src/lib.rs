//! Game logic for a rising-bubble laser game.
//!
//! Everything here is free of terminal I/O: `entities` holds the data,
//! `compute` the pure transitions, and `session` ties them to the
//! cooperative `scheduler` and the pointer `input` disambiguator.

pub mod compute;
pub mod entities;
pub mod input;
pub mod scheduler;
pub mod session;
