/// Recording session state machine.
///
/// State transitions:
/// ```text
/// idle → recording → stopped
///   ↑                   │
///   └──── next start ───┘
/// ```
///
/// A new start from `Stopped` discards the held buffer
/// ("last recording wins"); callers export first if they want to keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording,
    Stopped,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
