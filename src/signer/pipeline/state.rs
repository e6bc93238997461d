//! Pipeline state machine.

use std::fmt;

/// Progress of one [`Pipeline`](super::Pipeline).
///
/// ```text
/// Init -> Validated -> Built -> Signed -> Done
///   \________\___________\________\_____> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet
    Init,
    /// Toolchain configuration validated and source directory checked
    Validated,
    /// Unsigned artifact built
    Built,
    /// Final artifact signed
    Signed,
    /// Report produced
    Done,
    /// A step failed; the pipeline cannot continue
    Failed,
}

impl PipelineState {
    /// True for `Done` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Init, Validated) | (Validated, Built) | (Built, Signed) | (Signed, Done)
        ) || (!self.is_terminal() && next == Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Init => "init",
            PipelineState::Validated => "validated",
            PipelineState::Built => "built",
            PipelineState::Signed => "signed",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        assert!(Init.can_advance_to(Validated));
        assert!(Validated.can_advance_to(Built));
        assert!(Built.can_advance_to(Signed));
        assert!(Signed.can_advance_to(Done));
    }

    #[test]
    fn every_non_terminal_state_can_fail() {
        for state in [Init, Validated, Built, Signed] {
            assert!(state.can_advance_to(Failed), "{} -> failed", state);
        }
        assert!(!Done.can_advance_to(Failed));
        assert!(!Failed.can_advance_to(Failed));
    }

    #[test]
    fn stages_cannot_be_skipped_or_repeated() {
        assert!(!Init.can_advance_to(Built));
        assert!(!Validated.can_advance_to(Signed));
        assert!(!Done.can_advance_to(Init));
        assert!(!Built.can_advance_to(Built));
    }
}
