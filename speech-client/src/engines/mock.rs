//! Mock speech engine for testing
//!
//! Deterministic engine used to exercise playback control flow without
//! real speech hardware. In immediate mode every utterance finishes as
//! soon as it is spoken; in manual mode an utterance stays in flight until
//! the test driver completes it, and a completion that arrives while the
//! engine is paused is held back until resume, like a suspended process.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::synth::{SpeakOutcome, SpeakRequest, SpeechSynth, Voice};

/// A scriptable speech engine for tests
pub struct MockSynth {
    state: Mutex<MockState>,
    events: watch::Sender<()>,
    manual: bool,
    voices: Vec<Voice>,
}

#[derive(Default)]
struct MockState {
    spoken: Vec<String>,
    next_id: u64,
    active_id: Option<u64>,
    paused: bool,
    completed: HashSet<u64>,
    cancelled: HashSet<u64>,
    pause_count: usize,
    resume_count: usize,
    cancel_count: usize,
}

impl MockSynth {
    /// Create an engine where every utterance completes immediately
    pub fn immediate() -> Self {
        Self::new(false)
    }

    /// Create an engine where utterances stay in flight until
    /// `complete_utterance` is called
    pub fn manual() -> Self {
        Self::new(true)
    }

    fn new(manual: bool) -> Self {
        let (events, _) = watch::channel(());
        Self {
            state: Mutex::new(MockState::default()),
            events,
            manual,
            voices: Vec::new(),
        }
    }

    /// Set the voices reported by `voices()`
    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }

    /// Texts spoken so far, in order
    pub fn spoken(&self) -> Vec<String> {
        self.state.lock().unwrap().spoken.clone()
    }

    /// Number of times pause() was called
    pub fn pause_count(&self) -> usize {
        self.state.lock().unwrap().pause_count
    }

    /// Number of times resume() was called
    pub fn resume_count(&self) -> usize {
        self.state.lock().unwrap().resume_count
    }

    /// Number of times cancel() was called
    pub fn cancel_count(&self) -> usize {
        self.state.lock().unwrap().cancel_count
    }

    /// Finish the in-flight utterance (manual mode).
    ///
    /// If the engine is paused the completion is delivered after resume.
    pub fn complete_utterance(&self) {
        {
            let mut state = self.state.lock().unwrap();
            if let Some(id) = state.active_id {
                state.completed.insert(id);
            }
        }
        let _ = self.events.send(());
    }

    /// Wait until at least `n` utterances have been started
    pub async fn wait_for_started(&self, n: usize) {
        let mut events = self.events.subscribe();
        loop {
            if self.state.lock().unwrap().spoken.len() >= n {
                return;
            }
            if events.changed().await.is_err() {
                return;
            }
        }
    }
}

#[async_trait]
impl SpeechSynth for MockSynth {
    async fn speak(&self, request: SpeakRequest) -> Result<SpeakOutcome> {
        let mut events = self.events.subscribe();
        let id = {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id;
            state.next_id += 1;
            state.active_id = Some(id);
            state.spoken.push(request.text);
            id
        };
        let _ = self.events.send(());

        if !self.manual {
            let mut state = self.state.lock().unwrap();
            if state.active_id == Some(id) {
                state.active_id = None;
            }
            if state.cancelled.remove(&id) {
                return Ok(SpeakOutcome::Cancelled);
            }
            return Ok(SpeakOutcome::Finished);
        }

        loop {
            {
                let mut state = self.state.lock().unwrap();
                if state.cancelled.remove(&id) {
                    if state.active_id == Some(id) {
                        state.active_id = None;
                    }
                    return Ok(SpeakOutcome::Cancelled);
                }
                if state.completed.contains(&id) && !state.paused {
                    state.completed.remove(&id);
                    if state.active_id == Some(id) {
                        state.active_id = None;
                    }
                    return Ok(SpeakOutcome::Finished);
                }
            }
            if events.changed().await.is_err() {
                return Ok(SpeakOutcome::Cancelled);
            }
        }
    }

    async fn voices(&self) -> Result<Vec<Voice>> {
        Ok(self.voices.clone())
    }

    async fn pause(&self) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.paused = true;
            state.pause_count += 1;
        }
        let _ = self.events.send(());
        Ok(())
    }

    async fn resume(&self) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.paused = false;
            state.resume_count += 1;
        }
        let _ = self.events.send(());
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.cancel_count += 1;
            state.paused = false;
            if let Some(id) = state.active_id.take() {
                state.cancelled.insert(id);
            }
        }
        let _ = self.events.send(());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn request(text: &str) -> SpeakRequest {
        SpeakRequest {
            text: text.to_string(),
            voice: None,
        }
    }

    #[tokio::test]
    async fn test_immediate_speak_finishes() {
        let synth = MockSynth::immediate();
        let outcome = synth.speak(request("hello")).await.unwrap();
        assert_eq!(outcome, SpeakOutcome::Finished);
        assert_eq!(synth.spoken(), vec!["hello"]);
    }

    #[tokio::test]
    async fn test_manual_speak_waits_for_completion() {
        let synth = Arc::new(MockSynth::manual());
        let speaking = synth.clone();
        let task = tokio::spawn(async move { speaking.speak(request("hello")).await });

        synth.wait_for_started(1).await;
        synth.complete_utterance();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, SpeakOutcome::Finished);
    }

    #[tokio::test]
    async fn test_cancel_resolves_in_flight_utterance() {
        let synth = Arc::new(MockSynth::manual());
        let speaking = synth.clone();
        let task = tokio::spawn(async move { speaking.speak(request("hello")).await });

        synth.wait_for_started(1).await;
        synth.cancel().await.unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, SpeakOutcome::Cancelled);
        assert_eq!(synth.cancel_count(), 1);
    }

    #[tokio::test]
    async fn test_pause_holds_completion_until_resume() {
        let synth = Arc::new(MockSynth::manual());
        let speaking = synth.clone();
        let task = tokio::spawn(async move { speaking.speak(request("hello")).await });

        synth.wait_for_started(1).await;
        synth.pause().await.unwrap();
        synth.complete_utterance();

        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished(), "completion should be held while paused");

        synth.resume().await.unwrap();
        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, SpeakOutcome::Finished);
        assert_eq!(synth.pause_count(), 1);
        assert_eq!(synth.resume_count(), 1);
    }

    #[tokio::test]
    async fn test_configured_voices() {
        let synth = MockSynth::immediate().with_voices(vec![Voice {
            id: "en".into(),
            name: "English".into(),
            language: "en".into(),
        }]);
        let voices = synth.voices().await.unwrap();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].id, "en");
    }
}
