//! Speech engine implementations

mod cli;
pub mod mock;

pub use cli::CliSynth;
pub use mock::MockSynth;

use crate::error::{Result, SpeechError};
use crate::synth::SpeechSynth;

/// Supported engine types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Espeak,
    Say,
}

impl EngineKind {
    /// Parse engine kind from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "espeak" | "espeak-ng" | "espeakng" => Ok(Self::Espeak),
            "say" => Ok(Self::Say),
            _ => Err(SpeechError::UnknownEngine(s.to_string())),
        }
    }
}

/// Create an engine instance by name, or auto-detect one.
///
/// Auto-detection prefers `say` on macOS and falls back to espeak-ng
/// everywhere.
pub fn get_engine(name: Option<&str>) -> Result<Box<dyn SpeechSynth>> {
    match name {
        Some(s) => match EngineKind::from_str(s)? {
            EngineKind::Espeak => Ok(Box::new(CliSynth::espeak()?)),
            EngineKind::Say => Ok(Box::new(CliSynth::say()?)),
        },
        None => {
            if cfg!(target_os = "macos") {
                if let Ok(synth) = CliSynth::say() {
                    return Ok(Box::new(synth));
                }
            }
            Ok(Box::new(CliSynth::espeak()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_kind_from_str() {
        assert_eq!(EngineKind::from_str("espeak").unwrap(), EngineKind::Espeak);
        assert_eq!(
            EngineKind::from_str("espeak-ng").unwrap(),
            EngineKind::Espeak
        );
        assert_eq!(EngineKind::from_str("Say").unwrap(), EngineKind::Say);
    }

    #[test]
    fn test_engine_kind_unknown() {
        let err = EngineKind::from_str("festival").unwrap_err();
        assert!(matches!(err, SpeechError::UnknownEngine(_)));
    }
}
