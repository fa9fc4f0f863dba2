//! Group session that owns the state and feeds it to the settlement engine

use tracing::info;

use crate::group::{ExpenseManager, ParticipantManager};
use crate::settlement;
use crate::traits::*;
use crate::types::*;

/// Shared-expense group: event name, participants and the expenses they paid
pub struct Group<S: GroupStorage> {
    participant_manager: ParticipantManager<S>,
    expense_manager: ExpenseManager<S>,
}

impl<S: GroupStorage + Clone> Group<S> {
    /// Create a new group with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            participant_manager: ParticipantManager::new(storage.clone()),
            expense_manager: ExpenseManager::new(storage),
        }
    }

    /// Create a new group with custom validators
    pub fn with_validators(
        storage: S,
        participant_validator: Box<dyn ParticipantValidator>,
        expense_validator: Box<dyn ExpenseValidator>,
    ) -> Self {
        Self {
            participant_manager: ParticipantManager::with_validator(
                storage.clone(),
                participant_validator,
            ),
            expense_manager: ExpenseManager::with_validator(storage, expense_validator),
        }
    }

    /// Get the event name
    pub async fn event_name(&self) -> SplitResult<String> {
        self.participant_manager.storage.get_event_name().await
    }

    /// Rename the event
    pub async fn set_event_name(&mut self, name: &str) -> SplitResult<()> {
        self.participant_manager
            .storage
            .set_event_name(name.trim())
            .await
    }

    // Participant operations
    /// Add a participant
    pub async fn add_participant(
        &mut self,
        name: &str,
        pix_key: Option<&str>,
    ) -> SplitResult<Participant> {
        self.participant_manager
            .add_participant(name, pix_key)
            .await
    }

    /// Get a participant by ID
    pub async fn get_participant(&self, participant_id: &str) -> SplitResult<Option<Participant>> {
        self.participant_manager.get_participant(participant_id).await
    }

    /// List all participants
    pub async fn list_participants(&self) -> SplitResult<Vec<Participant>> {
        self.participant_manager.list_participants().await
    }

    /// Remove a participant and their expenses
    pub async fn remove_participant(&mut self, participant_id: &str) -> SplitResult<usize> {
        self.participant_manager
            .remove_participant(participant_id)
            .await
    }

    // Expense operations
    /// Register an expense
    pub async fn register_expense(
        &mut self,
        payer_id: &str,
        amount: f64,
        description: &str,
    ) -> SplitResult<Expense> {
        self.expense_manager
            .register_expense(payer_id, amount, description)
            .await
    }

    /// Register an expense from a user-typed amount
    pub async fn register_expense_input(
        &mut self,
        payer_id: &str,
        amount_input: &str,
        description: &str,
    ) -> SplitResult<Expense> {
        self.expense_manager
            .register_expense_input(payer_id, amount_input, description)
            .await
    }

    /// Get an expense by ID
    pub async fn get_expense(&self, expense_id: &str) -> SplitResult<Option<Expense>> {
        self.expense_manager.get_expense(expense_id).await
    }

    /// List expenses, most recent first
    pub async fn list_expenses(&self) -> SplitResult<Vec<Expense>> {
        self.expense_manager.list_expenses().await
    }

    /// List expenses paid by one participant
    pub async fn get_participant_expenses(&self, participant_id: &str) -> SplitResult<Vec<Expense>> {
        self.expense_manager
            .get_participant_expenses(participant_id)
            .await
    }

    /// Remove an expense
    pub async fn remove_expense(&mut self, expense_id: &str) -> SplitResult<()> {
        self.expense_manager.remove_expense(expense_id).await
    }

    // Settlement operations
    /// Sum of every registered expense
    pub async fn total_amount(&self) -> SplitResult<f64> {
        let expenses = self.participant_manager.storage.list_expenses().await?;
        Ok(settlement::total_amount(&expenses))
    }

    /// What each participant should cover
    pub async fn fair_share(&self) -> SplitResult<f64> {
        let (participants, expenses) = self.current_lists().await?;
        Ok(settlement::fair_share(&participants, &expenses))
    }

    /// Balances and the transfers that settle the group right now
    pub async fn settle(&self) -> SplitResult<Settlement> {
        let (participants, expenses) = self.current_lists().await?;
        Ok(settlement::settle(&participants, &expenses))
    }

    async fn current_lists(&self) -> SplitResult<(Vec<Participant>, Vec<Expense>)> {
        let storage = &self.participant_manager.storage;
        let participants = storage.list_participants().await?;
        let expenses = storage.list_expenses().await?;
        Ok((participants, expenses))
    }

    // State operations
    /// Forget the event name, all participants and all expenses
    pub async fn reset(&mut self) -> SplitResult<()> {
        self.participant_manager.storage.clear().await?;
        info!("group reset");
        Ok(())
    }

    /// Export the whole group state
    pub async fn snapshot(&self) -> SplitResult<GroupState> {
        let (participants, expenses) = self.current_lists().await?;
        Ok(GroupState {
            event_name: self.event_name().await?,
            participants,
            expenses,
        })
    }

    /// Replace the current state with a snapshot.
    ///
    /// Every record goes through the configured validators first; a rejected
    /// snapshot leaves the current state untouched. Expenses whose payer is
    /// not part of the snapshot are dropped. Returns how many were dropped.
    pub async fn restore(&mut self, state: GroupState) -> SplitResult<usize> {
        for participant in &state.participants {
            self.participant_manager.validate(participant)?;
        }
        for expense in &state.expenses {
            self.expense_manager.validate(expense)?;
        }

        let storage = &mut self.participant_manager.storage;
        storage.clear().await?;
        storage.set_event_name(state.event_name.trim()).await?;

        for participant in &state.participants {
            storage.save_participant(participant).await?;
        }

        let mut dropped = 0;
        for expense in &state.expenses {
            if state
                .participants
                .iter()
                .any(|p| expense.is_paid_by(&p.id))
            {
                storage.save_expense(expense).await?;
            } else {
                dropped += 1;
            }
        }

        info!(
            participants = state.participants.len(),
            expenses = state.expenses.len() - dropped,
            dropped,
            "group restored"
        );
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    #[tokio::test]
    async fn test_group_basic_operations() {
        let mut group = Group::new(MemoryStorage::new());
        group.set_event_name("  Sunday barbecue ").await.unwrap();

        let ana = group.add_participant("Ana", Some("ana@pix.com")).await.unwrap();
        let bia = group.add_participant("Bia", None).await.unwrap();
        let caio = group.add_participant("Caio", None).await.unwrap();

        group.register_expense(&ana.id, 90.0, "Meat").await.unwrap();
        group.register_expense_input(&caio.id, "30,00", "Charcoal").await.unwrap();

        assert_eq!(group.event_name().await.unwrap(), "Sunday barbecue");
        assert_eq!(group.total_amount().await.unwrap(), 120.0);
        assert_eq!(group.fair_share().await.unwrap(), 40.0);

        let settlement = group.settle().await.unwrap();
        assert_eq!(settlement.balance_of(&ana.id), Some(50.0));
        assert_eq!(settlement.balance_of(&bia.id), Some(-40.0));
        assert_eq!(settlement.balance_of(&caio.id), Some(-10.0));

        assert_eq!(settlement.transfers.len(), 2);
        assert_eq!(settlement.transfers[0].from, "Bia");
        assert_eq!(settlement.transfers[0].to, "Ana");
        assert_eq!(settlement.transfers[0].amount, 40.0);
        assert_eq!(settlement.transfers[0].pix_key.as_deref(), Some("ana@pix.com"));
        assert_eq!(settlement.transfers[1].from, "Caio");
        assert_eq!(settlement.transfers[1].amount, 10.0);
    }

    #[tokio::test]
    async fn test_remove_participant_cascades_to_expenses() {
        let mut group = Group::new(MemoryStorage::new());
        let ana = group.add_participant("Ana", None).await.unwrap();
        let bia = group.add_participant("Bia", None).await.unwrap();

        group.register_expense(&ana.id, 10.0, "Water").await.unwrap();
        group.register_expense(&ana.id, 15.0, "Ice").await.unwrap();
        let kept = group.register_expense(&bia.id, 8.0, "Bread").await.unwrap();

        let removed = group.remove_participant(&ana.id).await.unwrap();
        assert_eq!(removed, 2);

        let expenses = group.list_expenses().await.unwrap();
        assert_eq!(expenses, vec![kept]);
        assert!(group.settle().await.unwrap().transfers.is_empty());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut group = Group::new(MemoryStorage::new());
        group.set_event_name("Trip").await.unwrap();
        let ana = group.add_participant("Ana", None).await.unwrap();
        group.register_expense(&ana.id, 10.0, "Fuel").await.unwrap();

        group.reset().await.unwrap();

        assert_eq!(group.snapshot().await.unwrap(), GroupState::default());
    }

    #[tokio::test]
    async fn test_restore_drops_orphan_expenses() {
        let mut group = Group::new(MemoryStorage::new());
        let state = GroupState {
            event_name: "Beach".to_string(),
            participants: vec![Participant::new("p1".to_string(), "Ana".to_string(), None)],
            expenses: vec![
                Expense::new("e1".to_string(), "p1".to_string(), 20.0, "Umbrella".to_string()),
                Expense::new("e2".to_string(), "gone".to_string(), 5.0, "Snacks".to_string()),
            ],
        };

        let dropped = group.restore(state).await.unwrap();
        assert_eq!(dropped, 1);

        let snapshot = group.snapshot().await.unwrap();
        assert_eq!(snapshot.event_name, "Beach");
        assert_eq!(snapshot.participants.len(), 1);
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.expenses[0].id, "e1");
    }

    #[tokio::test]
    async fn test_restore_rejects_invalid_records_and_keeps_state() {
        let mut group = Group::new(MemoryStorage::new());
        group.set_event_name("Current").await.unwrap();
        let bia = group.add_participant("Bia", None).await.unwrap();
        group.register_expense(&bia.id, 12.0, "Bread").await.unwrap();
        let before = group.snapshot().await.unwrap();

        let blank_name = GroupState {
            event_name: "Blank".to_string(),
            participants: vec![Participant::new("p1".to_string(), "   ".to_string(), None)],
            expenses: vec![],
        };
        assert!(matches!(
            group.restore(blank_name).await,
            Err(SplitError::Validation(_))
        ));

        let negative_amount = GroupState {
            event_name: "Negative".to_string(),
            participants: vec![
                Participant::new("p1".to_string(), "Ana".to_string(), None),
                Participant::new("p2".to_string(), "Bia".to_string(), None),
            ],
            expenses: vec![Expense::new(
                "e1".to_string(),
                "p1".to_string(),
                -40.0,
                "Refund".to_string(),
            )],
        };
        assert!(matches!(
            group.restore(negative_amount).await,
            Err(SplitError::InvalidAmount(_))
        ));

        assert_eq!(group.snapshot().await.unwrap(), before);
    }
}
