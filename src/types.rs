//! Core types and data structures for the expense splitting system

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Description stored for expenses registered without one
pub const DEFAULT_EXPENSE_DESCRIPTION: &str = "No description";

/// A member of the group who can pay for expenses and receive transfers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Unique identifier for the participant
    pub id: String,
    /// Display name, not required to be unique
    pub name: String,
    /// Optional PIX key used to route payments to this participant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}

impl Participant {
    /// Create a new participant
    pub fn new(id: String, name: String, pix_key: Option<String>) -> Self {
        Self { id, name, pix_key }
    }
}

/// A single payment made by one participant on behalf of the whole group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Participant who paid
    pub participant_id: String,
    /// Amount paid, currency-agnostic
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Creation time in milliseconds since the Unix epoch
    pub date: i64,
}

impl Expense {
    /// Create a new expense stamped with the current time
    pub fn new(id: String, participant_id: String, amount: f64, description: String) -> Self {
        Self {
            id,
            participant_id,
            amount,
            description,
            date: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Whether this expense was paid by the given participant
    pub fn is_paid_by(&self, participant_id: &str) -> bool {
        self.participant_id == participant_id
    }
}

/// Net position of one participant: what they paid minus their fair share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub participant_id: String,
    /// Total paid by the participant
    pub paid: f64,
    /// Positive when the group owes the participant, negative when they owe the group
    pub net: f64,
}

/// One payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Name of the paying participant
    pub from: String,
    /// Name of the receiving participant
    pub to: String,
    pub amount: f64,
    /// Receiver's PIX key, if they registered one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
    pub from_id: String,
    pub to_id: String,
}

/// Result of running the settlement engine over a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Sum of all expense amounts
    pub total: f64,
    /// Amount each participant is expected to cover
    pub fair_share: f64,
    /// One balance per participant, in participant order
    pub balances: Vec<Balance>,
    /// Transfers in the order they were matched
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    /// Net balance of a participant, if present
    pub fn balance_of(&self, participant_id: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|b| b.participant_id == participant_id)
            .map(|b| b.net)
    }

    /// Balances keyed by participant id
    pub fn balance_map(&self) -> HashMap<String, f64> {
        self.balances
            .iter()
            .map(|b| (b.participant_id.clone(), b.net))
            .collect()
    }

    /// True when nobody needs to pay anybody
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Sum of all transfer amounts
    pub fn total_transferred(&self) -> f64 {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

/// Complete snapshot of a group, in the shape applications persist it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupState {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Errors that can occur while managing a group
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for group operations
pub type SplitResult<T> = Result<T, SplitError>;
