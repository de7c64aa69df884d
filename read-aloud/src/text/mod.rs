//! Text processing for speech playback: sentence splitting and chunking.

pub mod chunker;
mod sentences;

pub use chunker::{DEFAULT_MAX_CHUNK, chunk_text};
