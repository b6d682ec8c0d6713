use serde::{Deserialize, Serialize};

/// Unique identifier for a provider (`Provider_ID`).
pub type ProviderId = i64;

/// Unique identifier for a receiver (`Receiver_ID`).
pub type ReceiverId = i64;

/// An organisation that offers surplus food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    /// Free-form category, e.g. "Restaurant" or "Supermarket".
    pub provider_type: String,
    pub address: Option<String>,
    pub city: String,
    pub contact: Option<String>,
}

/// An organisation or individual that claims food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub id: ReceiverId,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: Option<String>,
}
