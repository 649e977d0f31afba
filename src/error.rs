//! Centralized error type for the midigroup umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] midigroup_core::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] midigroup_midi::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
