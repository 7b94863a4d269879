use std::fmt;

/// Phase of the launch/unlaunch sequence.
///
/// Stable states: `Unlaunched`, `Ready`.
/// Transition states: `Launching`, `Unlaunching`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum LaunchState {
    #[default]
    Unlaunched,
    Launching,
    Ready,
    Unlaunching,
}

impl LaunchState {
    /// Stable, human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            LaunchState::Unlaunched => "unlaunched",
            LaunchState::Launching => "launching",
            LaunchState::Ready => "ready",
            LaunchState::Unlaunching => "unlaunching",
        }
    }

    /// True only in `Ready`, the one state where snapshot accessors succeed.
    pub const fn is_ready(self) -> bool {
        matches!(self, LaunchState::Ready)
    }

    /// True while a launch or teardown is in flight.
    pub const fn is_transitioning(self) -> bool {
        matches!(self, LaunchState::Launching | LaunchState::Unlaunching)
    }
}

impl fmt::Display for LaunchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
