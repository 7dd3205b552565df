//! Digit and rotation registers, plus the request types that drive them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::error::GearError;
use super::snapshot::StepSnapshot;

/// Number of gears on a freshly built machine.
pub const DEFAULT_GEAR_COUNT: usize = 3;

/// Largest supported gear train; keeps the capacity inside an `i64`.
pub const MAX_GEAR_COUNT: usize = 9;

/// Degrees a gear turns for one unit of rotation (ten teeth per revolution).
pub const DEGREES_PER_STEP: i64 = 36;

/// Status shown after initialization and after every reset.
pub const RESET_STATUS: &str = "Gears initialized and set to 0. Ready to calculate!";

/// Human name of a digit position, 0 being the least significant.
pub fn place_name(index: usize) -> String {
    match index {
        0 => "Units".to_string(),
        1 => "Tens".to_string(),
        2 => "Hundreds".to_string(),
        3 => "Thousands".to_string(),
        4 => "Ten Thousands".to_string(),
        _ => format!("10^{}", index),
    }
}

/// Largest value a register of `gear_count` digits can show.
pub fn capacity(gear_count: usize) -> u64 {
    10u64.pow(gear_count as u32) - 1
}

/// Lock the shared state, recovering from poisoning.
///
/// Every mutation leaves the register consistent before the guard drops,
/// so a panic elsewhere never exposes a half-written gear.
pub(crate) fn lock(state: &Mutex<GearState>) -> MutexGuard<'_, GearState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Register state
// ============================================================================

/// The mutable heart of the machine.
///
/// `digits` and `rotation` are stored least-significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearState {
    digits: Vec<u8>,
    rotation: Vec<i64>,
    busy: bool,
    status: String,
}

impl GearState {
    /// Build an all-zero register with `gear_count` positions.
    pub fn new(gear_count: usize) -> Self {
        Self {
            digits: vec![0; gear_count],
            rotation: vec![0; gear_count],
            busy: false,
            status: RESET_STATUS.to_string(),
        }
    }

    pub fn gear_count(&self) -> usize {
        self.digits.len()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn rotation(&self) -> &[i64] {
        &self.rotation
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn digit(&self, position: usize) -> u8 {
        self.digits[position]
    }

    /// Visual angle of a gear in degrees.
    pub fn angle(&self, position: usize) -> i64 {
        self.rotation[position] * DEGREES_PER_STEP
    }

    /// The register read most-significant first, zero padded.
    pub fn display(&self) -> String {
        self.digits
            .iter()
            .rev()
            .map(|d| char::from(b'0' + d))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.digits.iter_mut().for_each(|d| *d = 0);
        self.rotation.iter_mut().for_each(|r| *r = 0);
        self.status = RESET_STATUS.to_string();
    }

    /// Commit one step: the normalized digit and the signed rotation applied.
    pub(crate) fn commit(&mut self, position: usize, digit: u8, rotation_change: i64) {
        debug_assert!(digit <= 9, "digit out of range at rest: {digit}");
        self.digits[position] = digit;
        self.rotation[position] += rotation_change;
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Describe one position after it has been processed.
    pub(crate) fn snapshot(&self, position: usize, carry: i64) -> StepSnapshot {
        StepSnapshot {
            position,
            place: place_name(position),
            digit: self.digits[position],
            rotation: self.rotation[position],
            angle: self.angle(position),
            carry,
            register: self.display(),
            status: self.status.clone(),
        }
    }

    /// A serializable copy of everything an observer may read.
    pub fn reading(&self) -> GearReading {
        GearReading {
            gear_count: self.gear_count(),
            digits: self.digits.clone(),
            rotation: self.rotation.clone(),
            angles: (0..self.gear_count()).map(|i| self.angle(i)).collect(),
            busy: self.busy,
            status: self.status.clone(),
            value: self.display(),
            capacity: capacity(self.gear_count()),
        }
    }
}

/// Read-only view of the register for tools and resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct GearReading {
    /// Number of digit positions.
    pub gear_count: usize,
    /// Digits, least significant first.
    pub digits: Vec<u8>,
    /// Cumulative rotation per gear, least significant first.
    pub rotation: Vec<i64>,
    /// Gear angles in degrees, least significant first.
    pub angles: Vec<i64>,
    /// Whether an operation is currently stepping.
    pub busy: bool,
    /// Latest status message.
    pub status: String,
    /// Register read most-significant first.
    pub value: String,
    /// Largest representable value.
    pub capacity: u64,
}

// ============================================================================
// Requests
// ============================================================================

/// Which way the gears turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Turn forward; overflow carries into the next gear.
    #[default]
    Add,
    /// Turn backward; underflow borrows from the next gear.
    Subtract,
}

impl OperationKind {
    pub fn sign(self) -> i64 {
        match self {
            Self::Add => 1,
            Self::Subtract => -1,
        }
    }

    /// Verb used in the "in progress" status line.
    pub fn gerund(self) -> &'static str {
        match self {
            Self::Add => "Adding",
            Self::Subtract => "Subtracting",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Subtract => f.write_str("subtract"),
        }
    }
}

/// An operation as requested by a client. Not yet checked against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationRequest {
    pub amount: i64,
    pub kind: OperationKind,
}

impl OperationRequest {
    pub fn new(amount: i64, kind: OperationKind) -> Self {
        Self { amount, kind }
    }

    pub fn add(amount: i64) -> Self {
        Self::new(amount, OperationKind::Add)
    }

    pub fn subtract(amount: i64) -> Self {
        Self::new(amount, OperationKind::Subtract)
    }

    /// Build a request from a loosely typed JSON amount.
    ///
    /// Accepts integers, whole floats and numeric strings. Whole positive
    /// amounts too large for an `i64` can never fit `capacity` and are
    /// rejected as over capacity here. Otherwise the sign is not checked;
    /// the engine rejects non-positive amounts.
    pub fn from_value(
        amount: &serde_json::Value,
        kind: OperationKind,
        capacity: u64,
    ) -> Result<Self, GearError> {
        match parse_amount(amount) {
            Some(ParsedAmount::Fits(value)) => Ok(Self::new(value, kind)),
            Some(ParsedAmount::TooLarge(text)) => Err(GearError::capacity_exceeded(text, capacity)),
            None => Err(GearError::invalid_amount(amount.to_string())),
        }
    }

    /// Decimal digits of the amount, least significant first.
    pub(crate) fn input_digits(&self) -> Vec<i64> {
        let mut rest = self.amount.unsigned_abs();
        let mut digits = Vec::new();
        while rest > 0 {
            digits.push((rest % 10) as i64);
            rest /= 10;
        }
        digits
    }
}

/// A whole amount read from JSON.
enum ParsedAmount {
    Fits(i64),
    /// Positive and beyond `i64::MAX`, in decimal.
    TooLarge(String),
}

fn parse_amount(amount: &serde_json::Value) -> Option<ParsedAmount> {
    match amount {
        serde_json::Value::Number(n) => {
            if let Some(value) = n.as_i64() {
                return Some(ParsedAmount::Fits(value));
            }
            if let Some(value) = n.as_u64() {
                return Some(ParsedAmount::TooLarge(value.to_string()));
            }
            let f = n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)?;
            if f.abs() < i64::MAX as f64 {
                Some(ParsedAmount::Fits(f as i64))
            } else if f > 0.0 {
                Some(ParsedAmount::TooLarge(format!("{}", f)))
            } else {
                None
            }
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(value) = s.parse::<i64>() {
                return Some(ParsedAmount::Fits(value));
            }
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                let digits = s.trim_start_matches('0');
                return Some(ParsedAmount::TooLarge(digits.to_string()));
            }
            None
        }
        _ => None,
    }
}
