//! Headless billiards table driver.
//!
//! Owns a [`state::TableState`], ticks it on a fixed-rate tokio loop and
//! streams frames and contact events to whoever is listening. A front end
//! (or the built-in shot bot) feeds drag gestures back in.

pub mod bot;
pub mod config;
pub mod protocol;
pub mod state;
pub mod table_loop;
