//! Core types and definitions for the skydrone simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates, movement intent, vehicle events, control commands,
//! scene components, constants, configuration and errors.
//! It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
