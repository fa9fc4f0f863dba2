//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for group state
///
/// Lets the group work with any backend (in-memory, SQLite, a browser
/// bridge, etc.). Listing methods must return records in insertion order,
/// since the settlement engine walks participants in that order.
#[async_trait]
pub trait GroupStorage: Send + Sync {
    /// Get the event name
    async fn get_event_name(&self) -> SplitResult<String>;

    /// Set the event name
    async fn set_event_name(&mut self, name: &str) -> SplitResult<()>;

    /// Save a participant
    async fn save_participant(&mut self, participant: &Participant) -> SplitResult<()>;

    /// Get a participant by ID
    async fn get_participant(&self, participant_id: &str) -> SplitResult<Option<Participant>>;

    /// List all participants in insertion order
    async fn list_participants(&self) -> SplitResult<Vec<Participant>>;

    /// Delete a participant together with every expense it paid.
    ///
    /// Both removals must happen atomically. Returns the number of expenses
    /// removed.
    async fn delete_participant(&mut self, participant_id: &str) -> SplitResult<usize>;

    /// Save an expense
    async fn save_expense(&mut self, expense: &Expense) -> SplitResult<()>;

    /// Get an expense by ID
    async fn get_expense(&self, expense_id: &str) -> SplitResult<Option<Expense>>;

    /// List all expenses in insertion order
    async fn list_expenses(&self) -> SplitResult<Vec<Expense>>;

    /// List expenses paid by one participant
    async fn get_participant_expenses(&self, participant_id: &str) -> SplitResult<Vec<Expense>>;

    /// Delete an expense
    async fn delete_expense(&mut self, expense_id: &str) -> SplitResult<()>;

    /// Remove all data
    async fn clear(&mut self) -> SplitResult<()>;
}

/// Trait for implementing custom participant validation rules
pub trait ParticipantValidator: Send + Sync {
    /// Validate a participant before saving
    fn validate_participant(&self, participant: &Participant) -> SplitResult<()>;
}

/// Trait for implementing custom expense validation rules
pub trait ExpenseValidator: Send + Sync {
    /// Validate an expense before saving
    fn validate_expense(&self, expense: &Expense) -> SplitResult<()>;
}

/// Default participant validator with basic rules
pub struct DefaultParticipantValidator;

impl ParticipantValidator for DefaultParticipantValidator {
    fn validate_participant(&self, participant: &Participant) -> SplitResult<()> {
        if participant.id.trim().is_empty() {
            return Err(SplitError::Validation(
                "Participant ID cannot be empty".to_string(),
            ));
        }

        if participant.name.trim().is_empty() {
            return Err(SplitError::Validation(
                "Participant name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default expense validator: a payer and a positive, finite amount
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SplitResult<()> {
        if expense.participant_id.trim().is_empty() {
            return Err(SplitError::Validation(
                "Expense must have a payer".to_string(),
            ));
        }

        crate::utils::validate_positive_amount(expense.amount)
    }
}
