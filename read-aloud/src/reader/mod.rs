//! Playback control: the reader session and its state machine.

mod controller;
mod state;

pub use controller::Reader;
pub use state::{Controls, PlaybackState};
