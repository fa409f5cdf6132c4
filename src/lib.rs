//! Seekers Server Library
//!
//! A simulation core for the seekers arena: seekers steer and switch magnets,
//! goals drift in the resulting field, and camps score goals held long enough.
//! The world is a torus; every tick is deterministic for a given seed.
//!
//! # Layout
//!
//! - `game` - entities, systems and the tick loop
//! - `net` - controller sessions, wire protocol and the session runner
//! - `config` - validated match configuration

pub mod config;
pub mod game;
pub mod net;
pub mod util;
