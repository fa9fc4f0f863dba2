//! Expense registration and management

use tracing::{info, warn};

use crate::traits::*;
use crate::types::*;
use crate::utils::parse_amount;

/// Expense manager for registering and removing expenses
pub struct ExpenseManager<S: GroupStorage> {
    storage: S,
    validator: Box<dyn ExpenseValidator>,
}

impl<S: GroupStorage> ExpenseManager<S> {
    /// Create a new expense manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultExpenseValidator),
        }
    }

    /// Create a new expense manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ExpenseValidator>) -> Self {
        Self { storage, validator }
    }

    /// Register an expense paid by an existing participant
    pub async fn register_expense(
        &mut self,
        payer_id: &str,
        amount: f64,
        description: &str,
    ) -> SplitResult<Expense> {
        let description = match description.trim() {
            "" => DEFAULT_EXPENSE_DESCRIPTION.to_string(),
            trimmed => trimmed.to_string(),
        };
        let expense = Expense::new(
            uuid::Uuid::new_v4().to_string(),
            payer_id.to_string(),
            amount,
            description,
        );

        self.validate(&expense)?;

        if self.storage.get_participant(payer_id).await?.is_none() {
            warn!(payer_id, "rejected expense for unknown payer");
            return Err(SplitError::ParticipantNotFound(payer_id.to_string()));
        }

        self.storage.save_expense(&expense).await?;
        info!(
            expense_id = %expense.id,
            payer_id,
            amount = expense.amount,
            "expense registered"
        );

        Ok(expense)
    }

    /// Run an expense through the configured validator
    pub fn validate(&self, expense: &Expense) -> SplitResult<()> {
        self.validator
            .validate_expense(expense)
            .inspect_err(|err| warn!(error = %err, expense_id = %expense.id, "rejected expense"))
    }

    /// Register an expense from a user-typed amount such as "12,50"
    pub async fn register_expense_input(
        &mut self,
        payer_id: &str,
        amount_input: &str,
        description: &str,
    ) -> SplitResult<Expense> {
        let amount = parse_amount(amount_input).inspect_err(|err| {
            warn!(error = %err, input = amount_input, "rejected expense amount");
        })?;
        self.register_expense(payer_id, amount, description).await
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SplitResult<Option<Expense>> {
        self.storage.get_expense(expense_id).await
    }

    /// List expenses with the most recently registered first
    pub async fn list_expenses(&self) -> SplitResult<Vec<Expense>> {
        let mut expenses = self.storage.list_expenses().await?;
        expenses.reverse();
        Ok(expenses)
    }

    /// List expenses paid by one participant
    pub async fn get_participant_expenses(&self, participant_id: &str) -> SplitResult<Vec<Expense>> {
        self.storage.get_participant_expenses(participant_id).await
    }

    /// Remove an expense
    pub async fn remove_expense(&mut self, expense_id: &str) -> SplitResult<()> {
        self.storage.delete_expense(expense_id).await?;
        info!(expense_id, "expense removed");
        Ok(())
    }
}
