//! Sequential chunked playback with pause/resume/stop control.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use speech_client::{SpeakOutcome, SpeakRequest, SpeechSynth};
use tokio::sync::watch;

use super::state::{Controls, PlaybackState};
use crate::display::Surface;
use crate::highlight;
use crate::text::chunk_text;

/// Drives sequential utterance playback over a chunk list.
///
/// Cheaply cloneable: control handlers and the playback loop share the
/// same session state. At most one read loop is live at a time; starting
/// a new read bumps the session generation, which retires any previous
/// loop the next time it observes the state.
#[derive(Clone)]
pub struct Reader {
    synth: Arc<dyn SpeechSynth>,
    surface: Arc<dyn Surface>,
    max_chunk: usize,
    session: Arc<Mutex<Session>>,
    control: Arc<watch::Sender<()>>,
}

struct Session {
    text: String,
    chunks: Vec<String>,
    index: usize,
    paused: bool,
    state: PlaybackState,
    generation: u64,
}

/// What the playback loop should do next.
enum Step {
    Retired,
    Finished,
    WaitWhilePaused,
    Speak(usize),
}

impl Reader {
    pub fn new(
        synth: Arc<dyn SpeechSynth>,
        surface: Arc<dyn Surface>,
        max_chunk: usize,
    ) -> Self {
        let (control, _) = watch::channel(());
        Self {
            synth,
            surface,
            max_chunk: max_chunk.max(1),
            session: Arc::new(Mutex::new(Session {
                text: String::new(),
                chunks: Vec::new(),
                index: 0,
                paused: false,
                state: PlaybackState::Idle,
                generation: 0,
            })),
            control: Arc::new(control),
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.session.lock().unwrap().state
    }

    /// (current chunk index, chunk count) for the current session.
    pub fn progress(&self) -> (usize, usize) {
        let session = self.session.lock().unwrap();
        (session.index, session.chunks.len())
    }

    /// Install new document text, retiring any in-flight session.
    pub async fn load_text(&self, text: String) -> Result<()> {
        let markup = {
            let mut session = self.session.lock().unwrap();
            session.generation += 1;
            session.text = text;
            session.chunks.clear();
            session.index = 0;
            session.paused = false;
            session.state = PlaybackState::Idle;
            highlight::render_plain(&session.text)
        };
        self.synth.cancel().await?;
        self.notify();
        self.surface.set_markup(&markup);
        self.surface.set_controls(Controls::ready());
        Ok(())
    }

    /// Run one read session until completion, stop, or supersession by a
    /// newer read.
    ///
    /// A no-op when no document text is loaded. Any previous session is
    /// cancelled and the playback state reset before the first utterance.
    pub async fn read(&self, voice: Option<String>) -> Result<()> {
        let (generation, chunks) = {
            let mut session = self.session.lock().unwrap();
            if session.text.trim().is_empty() {
                return Ok(());
            }
            session.generation += 1;
            session.chunks = chunk_text(&session.text, self.max_chunk);
            session.index = 0;
            session.paused = false;
            session.state = PlaybackState::Idle;
            (session.generation, session.chunks.clone())
        };

        // Retire any utterance still in flight from a previous session.
        self.synth.cancel().await?;
        self.notify();

        let total = chunks.len();
        let mut control = self.control.subscribe();

        loop {
            let step = {
                let mut session = self.session.lock().unwrap();
                if session.generation != generation
                    || session.state == PlaybackState::Stopped
                {
                    // stop() or a newer read already published its side
                    // effects.
                    Step::Retired
                } else if session.index >= total {
                    session.state = PlaybackState::Done;
                    Step::Finished
                } else if session.paused {
                    Step::WaitWhilePaused
                } else {
                    let index = session.index;
                    session.state = PlaybackState::Speaking(index);
                    Step::Speak(index)
                }
            };

            match step {
                Step::Retired => return Ok(()),
                Step::Finished => {
                    let text = self.session.lock().unwrap().text.clone();
                    self.surface.set_status("Done!");
                    self.surface.set_controls(Controls::ready());
                    self.surface.set_markup(&highlight::render_plain(&text));
                    return Ok(());
                }
                Step::WaitWhilePaused => {
                    if control.changed().await.is_err() {
                        return Ok(());
                    }
                }
                Step::Speak(index) => {
                    self.surface.set_status(&format!(
                        "Reading chunk {}/{}...",
                        index + 1,
                        total
                    ));
                    self.surface.set_controls(Controls::speaking());
                    self.surface
                        .set_markup(&highlight::highlight_chunk(&chunks, index));

                    let outcome = self
                        .synth
                        .speak(SpeakRequest {
                            text: chunks[index].clone(),
                            voice: voice.clone(),
                        })
                        .await?;

                    let mut session = self.session.lock().unwrap();
                    if session.generation != generation
                        || session.state == PlaybackState::Stopped
                    {
                        return Ok(());
                    }
                    match outcome {
                        SpeakOutcome::Finished => {
                            // A pause that raced the end of the utterance
                            // keeps the index put; resume re-enters here.
                            if !session.paused {
                                session.index = index + 1;
                            }
                        }
                        SpeakOutcome::Cancelled => return Ok(()),
                    }
                }
            }
        }
    }

    /// Suspend the in-flight utterance. A no-op unless speaking.
    pub async fn pause(&self) -> Result<()> {
        {
            let mut session = self.session.lock().unwrap();
            match session.state {
                PlaybackState::Speaking(index) => {
                    session.paused = true;
                    session.state = PlaybackState::Paused(index);
                }
                _ => return Ok(()),
            }
        }
        self.synth.pause().await?;
        self.notify();
        self.surface.set_status("Paused.");
        self.surface.set_controls(Controls::paused());
        Ok(())
    }

    /// Resume a paused session from the same chunk. A no-op unless paused.
    pub async fn resume(&self) -> Result<()> {
        {
            let mut session = self.session.lock().unwrap();
            match session.state {
                PlaybackState::Paused(index) => {
                    session.paused = false;
                    session.state = PlaybackState::Speaking(index);
                }
                _ => return Ok(()),
            }
        }
        self.surface.set_status("Resuming...");
        self.surface.set_controls(Controls::speaking());
        self.synth.resume().await?;
        self.notify();
        Ok(())
    }

    /// Stop the session: cancel speech, exhaust the index, clear the
    /// highlight. Idempotent; a no-op when nothing is active.
    pub async fn stop(&self) -> Result<()> {
        let text = {
            let mut session = self.session.lock().unwrap();
            if !session.state.is_active() {
                return Ok(());
            }
            session.paused = false;
            session.index = session.chunks.len();
            session.state = PlaybackState::Stopped;
            session.text.clone()
        };
        self.synth.cancel().await?;
        self.notify();
        self.surface.set_status("Stopped.");
        self.surface.set_controls(Controls::ready());
        self.surface.set_markup(&highlight::render_plain(&text));
        Ok(())
    }

    fn notify(&self) {
        let _ = self.control.send(());
    }
}
