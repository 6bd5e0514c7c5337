//! Core types and definitions for the INVADERS simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! bodies, entity components, commands, snapshots, events, constants and
//! configuration. It has no dependency on any runtime or I/O framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
