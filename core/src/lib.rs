//! Minesweeper board engine.
//!
//! Boards are immutable snapshots: [`reveal`] and [`toggle_flag`] take a `&Board` and return a new one, so callers
//! can keep previous boards around without defensive copies. [`Session`] layers the game status, the clock and
//! best times on top.

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod types;
