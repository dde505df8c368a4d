use core::str::FromStr;
use serde::{Deserialize, Serialize};

use cinema_core::{DomainError, DomainResult, ValueObject};

/// Seat identifier within a show (e.g. `"A1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatNumber(String);

impl SeatNumber {
    pub fn new(number: impl AsRef<str>) -> DomainResult<Self> {
        let number = number.as_ref().trim();
        if number.is_empty() {
            return Err(DomainError::validation("seat number cannot be empty"));
        }
        Ok(Self(number.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeatNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Self::new(s)
    }
}

impl core::fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat availability. Only two states exist; there is no "sold" or "held".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
}

/// One seat of a show and its reservation status.
///
/// Seats do not validate transitions themselves; the show aggregate checks the
/// current status before asking for a `reserved()` or `available()` copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    number: SeatNumber,
    status: SeatStatus,
}

impl ValueObject for Seat {}

impl Seat {
    pub fn new(number: SeatNumber, status: SeatStatus) -> Self {
        Self { number, status }
    }

    pub fn number(&self) -> &SeatNumber {
        &self.number
    }

    pub fn status(&self) -> SeatStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        matches!(self.status, SeatStatus::Available)
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self.status, SeatStatus::Reserved)
    }

    /// Copy of this seat marked as reserved.
    pub fn reserved(&self) -> Self {
        Self {
            number: self.number.clone(),
            status: SeatStatus::Reserved,
        }
    }

    /// Copy of this seat marked as available.
    pub fn available(&self) -> Self {
        Self {
            number: self.number.clone(),
            status: SeatStatus::Available,
        }
    }
}
