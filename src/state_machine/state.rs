use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a tour for one identity.
///
/// `Inactive → Active ⇄ Paused`, `Active → Skipped`, `Active → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    #[default]
    Inactive,
    Active,
    Paused,
    Skipped,
    Completed,
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TourStatus::Inactive => write!(f, "INACTIVE"),
            TourStatus::Active => write!(f, "ACTIVE"),
            TourStatus::Paused => write!(f, "PAUSED"),
            TourStatus::Skipped => write!(f, "SKIPPED"),
            TourStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl TourStatus {
    /// No automatic resumption happens from these.
    pub fn is_terminal(self) -> bool {
        matches!(self, TourStatus::Skipped | TourStatus::Completed)
    }
}

/// A status change requested of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Enter (or re-enter) `Active`, from `start` or `resume`.
    Activate,
    /// Move to the following step.
    Advance,
    Pause,
    Skip,
    Complete,
}

impl Transition {
    /// The status a transition leads to from `from`, or `None` when the
    /// transition is not meaningful there.
    ///
    /// `Activate` is the explicit control surface (`start`/`resume`) and is
    /// accepted from any status, including terminal ones.
    pub fn target(self, from: TourStatus) -> Option<TourStatus> {
        match (self, from) {
            (Transition::Activate, _) => Some(TourStatus::Active),
            (Transition::Advance, TourStatus::Active) => Some(TourStatus::Active),
            (Transition::Complete, TourStatus::Active) => Some(TourStatus::Completed),
            (Transition::Pause, TourStatus::Active | TourStatus::Paused) => Some(TourStatus::Paused),
            (Transition::Skip, s) if !s.is_terminal() => Some(TourStatus::Skipped),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_inactive() {
        assert_eq!(TourStatus::default(), TourStatus::Inactive);
    }

    #[test]
    fn advance_only_from_active() {
        assert_eq!(
            Transition::Advance.target(TourStatus::Active),
            Some(TourStatus::Active)
        );
        assert_eq!(Transition::Advance.target(TourStatus::Paused), None);
        assert_eq!(Transition::Advance.target(TourStatus::Completed), None);
    }

    #[test]
    fn activate_is_always_allowed() {
        for from in [
            TourStatus::Inactive,
            TourStatus::Active,
            TourStatus::Paused,
            TourStatus::Skipped,
            TourStatus::Completed,
        ] {
            assert_eq!(
                Transition::Activate.target(from),
                Some(TourStatus::Active)
            );
        }
    }

    #[test]
    fn complete_only_from_active() {
        assert_eq!(
            Transition::Complete.target(TourStatus::Active),
            Some(TourStatus::Completed)
        );
        for from in [
            TourStatus::Inactive,
            TourStatus::Paused,
            TourStatus::Skipped,
            TourStatus::Completed,
        ] {
            assert_eq!(Transition::Complete.target(from), None);
        }
    }

    #[test]
    fn terminal_states_cannot_be_skipped_again() {
        assert_eq!(Transition::Skip.target(TourStatus::Completed), None);
        assert_eq!(Transition::Skip.target(TourStatus::Skipped), None);
        assert_eq!(
            Transition::Skip.target(TourStatus::Paused),
            Some(TourStatus::Skipped)
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TourStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn status_display() {
        assert_eq!(TourStatus::Active.to_string(), "ACTIVE");
        assert_eq!(TourStatus::Paused.to_string(), "PAUSED");
    }
}
