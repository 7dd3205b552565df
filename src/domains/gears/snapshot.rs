//! Observable records published while the gears turn.

use schemars::JsonSchema;
use serde::Serialize;

/// State of one digit position right after it was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct StepSnapshot {
    /// Digit position, 0 being the units gear.
    pub position: usize,
    /// Place name of the position ("Units", "Tens", ...).
    pub place: String,
    /// New digit shown by the gear.
    pub digit: u8,
    /// Cumulative rotation of the gear.
    pub rotation: i64,
    /// Cumulative rotation in degrees.
    pub angle: i64,
    /// Carry (positive) or borrow (negative) generated for the next gear.
    pub carry: i64,
    /// Whole register, most significant digit first.
    pub register: String,
    /// Human readable description of the step.
    pub status: String,
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Every carry or borrow was absorbed by the register.
    Complete,
    /// A carry ran past the last gear; the register shows the wrapped value.
    Overflow,
    /// A borrow ran past the last gear. Steps already taken are kept.
    Underflow,
}

/// Terminal record of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// Carry or borrow still pending when propagation stopped.
    pub carry: i64,
    /// Register after the last committed step, most significant first.
    pub register: String,
    /// Final status message.
    pub status: String,
}

impl Outcome {
    pub(crate) fn complete(register: String) -> Self {
        let status = format!("Operation complete. Final Result: {}.", register);
        Self {
            kind: OutcomeKind::Complete,
            carry: 0,
            register,
            status,
        }
    }

    pub(crate) fn overflow(register: String, carry: i64) -> Self {
        let status = format!(
            "Operation complete. WARNING: Result ({}) exceeded machine capacity. Overflow: {}",
            register, carry
        );
        Self {
            kind: OutcomeKind::Overflow,
            carry,
            register,
            status,
        }
    }

    pub(crate) fn underflow(register: String, borrow: i64) -> Self {
        Self {
            kind: OutcomeKind::Underflow,
            carry: borrow,
            register,
            status: "Error: Result is negative! Cannot borrow from the next column.".to_string(),
        }
    }

    /// True unless the run aborted on underflow. Overflow still succeeds.
    pub fn is_success(&self) -> bool {
        self.kind != OutcomeKind::Underflow
    }

    /// Leftover carry if the result exceeded capacity.
    pub fn overflow_carry(&self) -> Option<i64> {
        (self.kind == OutcomeKind::Overflow).then_some(self.carry)
    }
}

/// One item of an operation's event sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GearEvent {
    /// A digit position was processed.
    Step(StepSnapshot),
    /// The operation is over; always the last event.
    Finished(Outcome),
}

/// Everything a finished operation published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RunReport {
    pub steps: Vec<StepSnapshot>,
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_status_lines() {
        assert_eq!(
            Outcome::complete("005".into()).status,
            "Operation complete. Final Result: 005."
        );
        assert_eq!(
            Outcome::overflow("000".into(), 1).status,
            "Operation complete. WARNING: Result (000) exceeded machine capacity. Overflow: 1"
        );
        assert!(!Outcome::underflow("999".into(), -1).is_success());
    }

    #[test]
    fn test_outcome_serialization() {
        let value = serde_json::to_value(Outcome::overflow("001".into(), 1)).unwrap();
        assert_eq!(value["kind"], json!("overflow"));
        assert_eq!(value["carry"], json!(1));
        assert_eq!(value["register"], json!("001"));
    }
}
