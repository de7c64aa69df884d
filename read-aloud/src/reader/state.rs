//! Playback session state types.

/// Where a read session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No session started.
    Idle,
    /// Speaking the chunk at this index.
    Speaking(usize),
    /// Suspended at this index; the utterance is not cancelled.
    Paused(usize),
    /// Explicitly stopped; the session is exhausted.
    Stopped,
    /// All chunks were spoken to completion.
    Done,
}

impl PlaybackState {
    /// True while a session holds an utterance (speaking or suspended).
    pub fn is_active(&self) -> bool {
        matches!(self, PlaybackState::Speaking(_) | PlaybackState::Paused(_))
    }
}

/// Which user controls are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub read: bool,
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
}

impl Controls {
    /// Document loaded, nothing playing.
    pub fn ready() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }

    /// Mid-utterance.
    pub fn speaking() -> Self {
        Self {
            read: true,
            pause: true,
            stop: true,
            ..Self::default()
        }
    }

    /// Suspended.
    pub fn paused() -> Self {
        Self {
            read: true,
            resume: true,
            stop: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(PlaybackState::Speaking(0).is_active());
        assert!(PlaybackState::Paused(3).is_active());
        assert!(!PlaybackState::Idle.is_active());
        assert!(!PlaybackState::Stopped.is_active());
        assert!(!PlaybackState::Done.is_active());
    }

    #[test]
    fn test_control_sets() {
        assert!(Controls::speaking().pause);
        assert!(!Controls::speaking().resume);
        assert!(Controls::paused().resume);
        assert!(!Controls::paused().pause);
        assert!(Controls::paused().stop);
        assert!(!Controls::ready().stop);
    }
}
