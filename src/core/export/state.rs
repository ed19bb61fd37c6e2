//! Export run lifecycle

use serde::Serialize;
use std::fmt;

/// Why a run stopped before touching the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// No document was open
    NoActiveDocument,
    /// The document has no layers at all
    NoBaseLayer,
    /// The bottom layer is not a background layer
    BaseLayerNotBackground,
}

impl AbortReason {
    /// Message shown to the user
    pub fn user_message(self) -> &'static str {
        match self {
            AbortReason::NoActiveDocument => "There is no active document to export",
            AbortReason::NoBaseLayer => "The document has no layers",
            AbortReason::BaseLayerNotBackground => {
                "The bottom layer of the document must be a background layer"
            }
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Where a run is in its lifecycle
///
/// `Idle -> Collecting -> Hidden -> Exporting(i) -> Restoring -> Done`, or
/// `Idle -> Aborted` when a precondition fails. Once `Hidden` is reached, `Restoring`
/// always follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum RunState {
    Idle,
    Collecting,
    Hidden,
    /// Index of the leaf being exported
    Exporting(usize),
    Restoring,
    Done,
    Aborted(AbortReason),
}

impl RunState {
    /// True for `Done` and `Aborted`
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted(_))
    }

    /// Legal successor check for the lifecycle above
    pub fn can_advance_to(self, next: RunState) -> bool {
        use RunState::*;
        match (self, next) {
            // Every precondition is checked before collection starts.
            (Idle, Collecting) | (Idle, Aborted(_)) => true,
            // An empty collection skips the hide and restore phases.
            (Collecting, Hidden) | (Collecting, Done) => true,
            (Hidden, Exporting(0)) | (Hidden, Restoring) => true,
            (Exporting(i), Exporting(j)) => j == i + 1,
            (Exporting(_), Restoring) => true,
            (Restoring, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Collecting => write!(f, "collecting"),
            RunState::Hidden => write!(f, "hidden"),
            RunState::Exporting(index) => write!(f, "exporting #{index}"),
            RunState::Restoring => write!(f, "restoring"),
            RunState::Done => write!(f, "done"),
            RunState::Aborted(reason) => write!(f, "aborted: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RunState::Idle, RunState::Collecting, true ; "idle starts collecting")]
    #[test_case(RunState::Idle, RunState::Aborted(AbortReason::NoActiveDocument), true ; "idle aborts without document")]
    #[test_case(RunState::Idle, RunState::Aborted(AbortReason::NoBaseLayer), true ; "idle aborts without layers")]
    #[test_case(RunState::Idle, RunState::Aborted(AbortReason::BaseLayerNotBackground), true ; "idle aborts without background")]
    #[test_case(RunState::Collecting, RunState::Aborted(AbortReason::NoBaseLayer), false ; "collection never aborts")]
    #[test_case(RunState::Collecting, RunState::Done, true ; "empty collection finishes")]
    #[test_case(RunState::Hidden, RunState::Exporting(0), true ; "first leaf")]
    #[test_case(RunState::Exporting(2), RunState::Exporting(3), true ; "next leaf")]
    #[test_case(RunState::Exporting(2), RunState::Exporting(4), false ; "no skipping indices")]
    #[test_case(RunState::Exporting(1), RunState::Done, false ; "restore cannot be skipped")]
    #[test_case(RunState::Restoring, RunState::Done, true ; "restore then done")]
    #[test_case(RunState::Done, RunState::Idle, false ; "done is terminal")]
    fn test_transitions(from: RunState, to: RunState, legal: bool) {
        assert_eq!(from.can_advance_to(to), legal);
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunState::Done.is_terminal());
        assert!(RunState::Aborted(AbortReason::NoBaseLayer).is_terminal());
        assert!(!RunState::Exporting(0).is_terminal());
    }

    #[test]
    fn test_state_serializes_with_detail() {
        let json = serde_json::to_string(&RunState::Aborted(AbortReason::BaseLayerNotBackground))
            .unwrap();
        assert_eq!(
            json,
            r#"{"state":"aborted","detail":"base_layer_not_background"}"#
        );
        assert_eq!(
            serde_json::to_string(&RunState::Done).unwrap(),
            r#"{"state":"done"}"#
        );
    }
}
