//! Rosefield CLI library.
//!
//! Configuration loading and the command implementations behind the
//! `rosefield` binary.

pub mod commands;
pub mod input;
