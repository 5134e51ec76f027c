// censorfilter/src/lib.rs
//! # CensorFilter CLI
//!
//! This crate provides the command-line host for the `censorfilter-core` engine.

pub mod cli;
pub mod commands;
pub mod logger;
