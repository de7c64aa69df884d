//! CLI-backed speech engines (espeak-ng, say)
//!
//! Each utterance is one subprocess invocation that runs until the engine
//! has finished speaking. Pause and resume deliver SIGSTOP/SIGCONT to the
//! active process, so a suspended utterance continues exactly where it
//! left off; cancel terminates the process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Result, SpeechError};
use crate::synth::{SpeakOutcome, SpeakRequest, SpeechSynth, Voice};

/// Which CLI tool backs the engine; selects argument and voice-list shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliFlavor {
    Espeak,
    Say,
}

/// Speech engine backed by a command-line synthesizer
pub struct CliSynth {
    binary: PathBuf,
    flavor: CliFlavor,
    active: Mutex<ActiveUtterance>,
}

#[derive(Default)]
struct ActiveUtterance {
    pid: Option<u32>,
    cancelled: bool,
}

/// How one subprocess invocation ended
enum RunResult {
    Finished,
    Cancelled,
    Failed(String),
}

impl CliSynth {
    /// Create an espeak-ng engine (falls back to the older `espeak` name).
    ///
    /// Returns an error if neither binary is installed.
    pub fn espeak() -> Result<Self> {
        let binary = which::which("espeak-ng")
            .or_else(|_| which::which("espeak"))
            .map_err(|_| {
                SpeechError::EngineUnavailable(
                    "espeak-ng not found. Install it with your package manager \
                     (e.g. apt install espeak-ng)."
                        .into(),
                )
            })?;

        Ok(Self {
            binary,
            flavor: CliFlavor::Espeak,
            active: Mutex::new(ActiveUtterance::default()),
        })
    }

    /// Create a `say` engine (macOS).
    pub fn say() -> Result<Self> {
        let binary = which::which("say").map_err(|_| {
            SpeechError::EngineUnavailable("say not found (macOS only).".into())
        })?;

        Ok(Self {
            binary,
            flavor: CliFlavor::Say,
            active: Mutex::new(ActiveUtterance::default()),
        })
    }

    fn active_pid(&self) -> Option<u32> {
        self.active.lock().unwrap().pid
    }

    /// Run one engine invocation to completion, cancellation, or failure.
    async fn run_once(&self, text: &str, voice: Option<&str>) -> Result<RunResult> {
        let mut cmd = Command::new(&self.binary);
        if let Some(v) = voice {
            cmd.args(["-v", v]);
        }
        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = cmd.spawn()?;

        {
            let mut active = self.active.lock().unwrap();
            active.pid = child.id();
            active.cancelled = false;
        }

        let output = child.wait_with_output().await?;

        {
            let mut active = self.active.lock().unwrap();
            active.pid = None;
            if active.cancelled {
                active.cancelled = false;
                return Ok(RunResult::Cancelled);
            }
        }

        if output.status.success() {
            Ok(RunResult::Finished)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Ok(RunResult::Failed(stderr))
        }
    }
}

#[async_trait]
impl SpeechSynth for CliSynth {
    async fn speak(&self, request: SpeakRequest) -> Result<SpeakOutcome> {
        let voice = request.voice.as_deref();
        match self.run_once(&request.text, voice).await? {
            RunResult::Finished => Ok(SpeakOutcome::Finished),
            RunResult::Cancelled => Ok(SpeakOutcome::Cancelled),
            RunResult::Failed(err) => {
                let Some(v) = voice else {
                    return Err(SpeechError::EngineFailed(err));
                };
                // Unknown voices make the engine exit nonzero; retry once
                // with the engine default.
                log::warn!("{} rejected voice {:?} ({}), using default", self.name(), v, err);
                match self.run_once(&request.text, None).await? {
                    RunResult::Finished => Ok(SpeakOutcome::Finished),
                    RunResult::Cancelled => Ok(SpeakOutcome::Cancelled),
                    RunResult::Failed(err) => Err(SpeechError::EngineFailed(err)),
                }
            }
        }
    }

    async fn voices(&self) -> Result<Vec<Voice>> {
        let output = match self.flavor {
            CliFlavor::Espeak => Command::new(&self.binary).arg("--voices").output().await?,
            CliFlavor::Say => Command::new(&self.binary).args(["-v", "?"]).output().await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SpeechError::EngineFailed(format!(
                "voice listing failed: {}",
                stderr
            )));
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        Ok(match self.flavor {
            CliFlavor::Espeak => parse_espeak_voices(&listing),
            CliFlavor::Say => parse_say_voices(&listing),
        })
    }

    async fn pause(&self) -> Result<()> {
        if let Some(pid) = self.active_pid() {
            signal(pid, "-STOP").await?;
        }
        Ok(())
    }

    async fn resume(&self) -> Result<()> {
        if let Some(pid) = self.active_pid() {
            signal(pid, "-CONT").await?;
        }
        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        let pid = {
            let mut active = self.active.lock().unwrap();
            match active.pid.take() {
                Some(pid) => {
                    active.cancelled = true;
                    pid
                }
                None => return Ok(()),
            }
        };
        // A stopped process holds SIGTERM pending until continued.
        signal(pid, "-CONT").await?;
        signal(pid, "-TERM").await
    }

    fn name(&self) -> &'static str {
        match self.flavor {
            CliFlavor::Espeak => "espeak-ng",
            CliFlavor::Say => "say",
        }
    }

    fn is_available(&self) -> Result<()> {
        // Availability was checked in the constructor
        Ok(())
    }
}

/// Deliver a signal to a process via kill(1).
///
/// A dead pid is not an error: the utterance may finish between the state
/// check and the signal.
async fn signal(pid: u32, sig: &str) -> Result<()> {
    if !cfg!(unix) {
        return Err(SpeechError::UnsupportedControl);
    }
    let status = Command::new("kill")
        .arg(sig)
        .arg(pid.to_string())
        .status()
        .await?;
    if !status.success() {
        log::debug!("kill {} {} exited nonzero", sig, pid);
    }
    Ok(())
}

/// Parse `espeak-ng --voices` output.
///
/// Columns: Pty Language Age/Gender VoiceName File Other-Languages.
fn parse_espeak_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(Voice {
                id: fields[1].to_string(),
                name: fields[3].replace('_', " "),
                language: fields[1].to_string(),
            })
        })
        .collect()
}

/// Parse `say -v ?` output: a padded name, a locale, then a `#` comment.
/// Voice names may contain spaces.
fn parse_say_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let entry = line.split('#').next().unwrap_or("").trim_end();
            let (name, locale) = entry.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() || locale.is_empty() {
                return None;
            }
            Some(Voice {
                id: name.to_string(),
                name: name.to_string(),
                language: locale.to_string(),
            })
        })
        .collect()
}
