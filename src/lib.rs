//! # huiwei
//!
//! Hui position tables for the seven-string guqin.
//!
//! Given the pitches of the seven open strings, the `table` module computes
//! the note sounded at every stopped position and every harmonic node. The
//! `session` module wraps the two tables in a modal, keyboard driven browser
//! with cursor movement, note search and highlighting, and `view` describes
//! the session as a pure value for a terminal front end to draw.

pub mod command;
pub mod error;
pub mod export;
pub mod interval;
pub mod navigation;
pub mod note;
mod parser;
pub mod preset;
pub mod search;
pub mod session;
pub mod table;
pub mod view;

pub use error::{Error, Result};
