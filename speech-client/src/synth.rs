use async_trait::async_trait;

use crate::error::Result;

/// A voice offered by a speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Identifier accepted by the engine's voice selector
    pub id: String,
    /// Human-readable voice name
    pub name: String,
    /// Language or locale code
    pub language: String,
}

/// One utterance to speak
#[derive(Debug, Clone)]
pub struct SpeakRequest {
    pub text: String,
    /// Voice id; the engine default when `None` or unknown
    pub voice: Option<String>,
}

/// How an utterance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// The engine spoke the full text
    Finished,
    /// The utterance was cancelled mid-flight
    Cancelled,
}

/// Trait for speech synthesis engines
#[async_trait]
pub trait SpeechSynth: Send + Sync {
    /// Speak one utterance, resolving on completion or cancellation.
    ///
    /// A paused utterance stays in flight; the returned future resolves
    /// only after the engine is resumed and finishes, or is cancelled.
    async fn speak(&self, request: SpeakRequest) -> Result<SpeakOutcome>;

    /// Enumerate the voices this engine offers
    async fn voices(&self) -> Result<Vec<Voice>>;

    /// Suspend the in-flight utterance; no-op when nothing is speaking
    async fn pause(&self) -> Result<()>;

    /// Continue a suspended utterance; no-op when nothing is suspended
    async fn resume(&self) -> Result<()>;

    /// Cancel the in-flight utterance; no-op when nothing is speaking
    async fn cancel(&self) -> Result<()>;

    /// Get the engine name for display
    fn name(&self) -> &'static str;

    /// Check if the engine is usable (binary installed, etc.)
    fn is_available(&self) -> Result<()>;
}
