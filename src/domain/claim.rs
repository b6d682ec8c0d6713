use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{FoodId, ReceiverId};

/// Unique identifier for a claim (`Claim_ID`).
pub type ClaimId = i64;

/// Outcome of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClaimStatus {
    Completed,
    #[default]
    Pending,
    Cancelled,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Pending => write!(f, "Pending"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COMPLETED" | "DONE" => Ok(Self::Completed),
            "PENDING" => Ok(Self::Pending),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown claim status: {s}")),
        }
    }
}

/// A receiver's claim on a food listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub food_id: FoodId,
    pub receiver_id: ReceiverId,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}
