//! Shared speech synthesis client library for the read-aloud workspace
//!
//! Provides a unified interface over local speech engines:
//! - espeak-ng (Linux and most Unixes, subprocess)
//! - say (macOS, subprocess)
//! - a scriptable mock for driving playback logic in tests

pub mod engines;
pub mod error;
pub mod synth;

pub use engines::{CliSynth, EngineKind, MockSynth, get_engine};
pub use error::{Result, SpeechError};
pub use synth::{SpeakOutcome, SpeakRequest, SpeechSynth, Voice};
