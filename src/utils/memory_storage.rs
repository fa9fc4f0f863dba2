//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct GroupData {
    event_name: String,
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

/// In-memory storage implementation for testing and development
///
/// Participants and expenses live behind one lock, so cascading deletes
/// are atomic.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    data: Arc<RwLock<GroupData>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(GroupData::default())),
        }
    }

    fn read(&self) -> SplitResult<RwLockReadGuard<'_, GroupData>> {
        self.data
            .read()
            .map_err(|e| SplitError::Storage(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> SplitResult<RwLockWriteGuard<'_, GroupData>> {
        self.data
            .write()
            .map_err(|e| SplitError::Storage(format!("lock poisoned: {e}")))
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupStorage for MemoryStorage {
    async fn get_event_name(&self) -> SplitResult<String> {
        Ok(self.read()?.event_name.clone())
    }

    async fn set_event_name(&mut self, name: &str) -> SplitResult<()> {
        self.write()?.event_name = name.to_string();
        Ok(())
    }

    async fn save_participant(&mut self, participant: &Participant) -> SplitResult<()> {
        let mut data = self.write()?;
        match data.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant.clone(),
            None => data.participants.push(participant.clone()),
        }
        Ok(())
    }

    async fn get_participant(&self, participant_id: &str) -> SplitResult<Option<Participant>> {
        Ok(self
            .read()?
            .participants
            .iter()
            .find(|p| p.id == participant_id)
            .cloned())
    }

    async fn list_participants(&self) -> SplitResult<Vec<Participant>> {
        Ok(self.read()?.participants.clone())
    }

    async fn delete_participant(&mut self, participant_id: &str) -> SplitResult<usize> {
        let mut data = self.write()?;
        let before = data.participants.len();
        data.participants.retain(|p| p.id != participant_id);
        if data.participants.len() == before {
            return Err(SplitError::ParticipantNotFound(participant_id.to_string()));
        }

        let expenses_before = data.expenses.len();
        data.expenses.retain(|e| !e.is_paid_by(participant_id));
        Ok(expenses_before - data.expenses.len())
    }

    async fn save_expense(&mut self, expense: &Expense) -> SplitResult<()> {
        let mut data = self.write()?;
        match data.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense.clone(),
            None => data.expenses.push(expense.clone()),
        }
        Ok(())
    }

    async fn get_expense(&self, expense_id: &str) -> SplitResult<Option<Expense>> {
        Ok(self
            .read()?
            .expenses
            .iter()
            .find(|e| e.id == expense_id)
            .cloned())
    }

    async fn list_expenses(&self) -> SplitResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    async fn get_participant_expenses(&self, participant_id: &str) -> SplitResult<Vec<Expense>> {
        Ok(self
            .read()?
            .expenses
            .iter()
            .filter(|e| e.is_paid_by(participant_id))
            .cloned()
            .collect())
    }

    async fn delete_expense(&mut self, expense_id: &str) -> SplitResult<()> {
        let mut data = self.write()?;
        let before = data.expenses.len();
        data.expenses.retain(|e| e.id != expense_id);
        if data.expenses.len() == before {
            Err(SplitError::ExpenseNotFound(expense_id.to_string()))
        } else {
            Ok(())
        }
    }

    async fn clear(&mut self) -> SplitResult<()> {
        *self.write()? = GroupData::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> Participant {
        Participant::new(id.to_string(), id.to_uppercase(), None)
    }

    fn expense(id: &str, payer: &str, amount: f64) -> Expense {
        Expense::new(id.to_string(), payer.to_string(), amount, "test".to_string())
    }

    #[tokio::test]
    async fn test_delete_participant_cascades() {
        let mut storage = MemoryStorage::new();
        storage.save_participant(&participant("a")).await.unwrap();
        storage.save_participant(&participant("b")).await.unwrap();
        storage.save_expense(&expense("e1", "a", 10.0)).await.unwrap();
        storage.save_expense(&expense("e2", "b", 20.0)).await.unwrap();
        storage.save_expense(&expense("e3", "a", 5.0)).await.unwrap();

        let removed = storage.delete_participant("a").await.unwrap();
        assert_eq!(removed, 2);

        let expenses = storage.list_expenses().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, "e2");
        assert!(storage.get_participant("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_records() {
        let mut storage = MemoryStorage::new();
        assert!(matches!(
            storage.delete_participant("ghost").await,
            Err(SplitError::ParticipantNotFound(_))
        ));
        assert!(matches!(
            storage.delete_expense("ghost").await,
            Err(SplitError::ExpenseNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_insertion_order_and_shared_clones() {
        let mut storage = MemoryStorage::new();
        let view = storage.clone();
        for id in ["c", "a", "b"] {
            storage.save_participant(&participant(id)).await.unwrap();
        }

        let ids: Vec<String> = view
            .list_participants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        storage.clear().await.unwrap();
        assert!(view.list_participants().await.unwrap().is_empty());
    }
}
