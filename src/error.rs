//! Recoverable startup errors.
//!
//! Precondition violations are not represented here, they panic.

/// Hardware failure while bringing the switch up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchError<L, A> {
    /// An output line rejected a write
    Line(L),
    /// A trigger line could not be attached to its interrupt
    Arm(A),
}

impl<L, A> SwitchError<L, A> {
    /// Short stage name for log output
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Line(_) => "output line",
            Self::Arm(_) => "trigger arm",
        }
    }
}

impl<L: core::fmt::Debug, A: core::fmt::Debug> core::fmt::Display for SwitchError<L, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Line(e) => write!(f, "{} failed: {:?}", self.stage(), e),
            Self::Arm(e) => write!(f, "{} failed: {:?}", self.stage(), e),
        }
    }
}

impl<L: core::fmt::Debug, A: core::fmt::Debug> std::error::Error for SwitchError<L, A> {}
