//! Transient add-to-cart acknowledgment on the triggering button.
//!
//! After a successful add the button shows the acknowledgment label and is
//! disabled; once the duration elapses the original label comes back. Time
//! is passed in by the caller, so nothing here sleeps or spawns.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Identifier of a control on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonId(String);

impl ButtonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ButtonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Displayed state of a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

impl ButtonState {
    /// An enabled button with `label`.
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Pending {
    original_label: String,
    deadline: Instant,
}

/// Tracks buttons currently showing the acknowledgment.
#[derive(Debug, Clone)]
pub struct AddFeedback {
    duration: Duration,
    added_label: String,
    pending: BTreeMap<ButtonId, Pending>,
}

impl AddFeedback {
    pub fn new(duration: Duration, added_label: impl Into<String>) -> Self {
        Self {
            duration,
            added_label: added_label.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Start the acknowledgment on `button`.
    ///
    /// A button already acknowledging keeps its original label and deadline.
    pub fn start(&mut self, button: ButtonId, current_label: &str, now: Instant) -> ButtonState {
        let deadline = now + self.duration;
        self.pending.entry(button).or_insert_with(|| Pending {
            original_label: current_label.to_string(),
            deadline,
        });
        ButtonState {
            label: self.added_label.clone(),
            disabled: true,
        }
    }

    /// Remove every acknowledgment whose deadline is at or before `now` and
    /// return the states to restore.
    pub fn expire(&mut self, now: Instant) -> Vec<(ButtonId, ButtonState)> {
        let due: Vec<ButtonId> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();

        due.into_iter()
            .filter_map(|id| {
                self.pending
                    .remove(&id)
                    .map(|p| (id, ButtonState::enabled(p.original_label)))
            })
            .collect()
    }

    /// Whether `button` is acknowledging.
    pub fn is_active(&self, button: &ButtonId) -> bool {
        self.pending.contains_key(button)
    }

    /// Earliest pending deadline, for scheduling the next tick.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback() -> AddFeedback {
        AddFeedback::new(Duration::from_millis(1000), "Added!")
    }

    #[test]
    fn test_reverts_after_duration() {
        let mut fb = feedback();
        let t0 = Instant::now();
        let button = ButtonId::new("add-p1");

        let state = fb.start(button.clone(), "Add to Cart", t0);
        assert_eq!(state.label, "Added!");
        assert!(state.disabled);

        assert!(fb.expire(t0 + Duration::from_millis(999)).is_empty());
        assert!(fb.is_active(&button));

        let restored = fb.expire(t0 + Duration::from_millis(1000));
        assert_eq!(restored, vec![(button.clone(), ButtonState::enabled("Add to Cart"))]);
        assert!(!fb.is_active(&button));
        assert!(fb.next_deadline().is_none());
    }

    #[test]
    fn test_second_start_keeps_first_deadline() {
        let mut fb = feedback();
        let t0 = Instant::now();
        let button = ButtonId::new("add-p1");

        fb.start(button.clone(), "Add to Cart", t0);
        fb.start(button.clone(), "Added!", t0 + Duration::from_millis(500));

        assert_eq!(fb.next_deadline(), Some(t0 + Duration::from_millis(1000)));
        let restored = fb.expire(t0 + Duration::from_millis(1000));
        assert_eq!(restored[0].1.label, "Add to Cart");
    }

    #[test]
    fn test_independent_buttons() {
        let mut fb = feedback();
        let t0 = Instant::now();
        fb.start(ButtonId::new("a"), "Add", t0);
        fb.start(ButtonId::new("b"), "Add", t0 + Duration::from_millis(300));

        assert_eq!(fb.next_deadline(), Some(t0 + Duration::from_millis(1000)));
        let restored = fb.expire(t0 + Duration::from_millis(1000));
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].0.as_str(), "a");
        assert!(fb.is_active(&ButtonId::new("b")));
    }
}
