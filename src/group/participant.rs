//! Participant management functionality

use tracing::{info, warn};

use crate::traits::*;
use crate::types::*;

/// Participant manager for adding, listing and removing group members
pub struct ParticipantManager<S: GroupStorage> {
    pub(crate) storage: S,
    validator: Box<dyn ParticipantValidator>,
}

impl<S: GroupStorage> ParticipantManager<S> {
    /// Create a new participant manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultParticipantValidator),
        }
    }

    /// Create a new participant manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn ParticipantValidator>) -> Self {
        Self { storage, validator }
    }

    /// Add a participant with a freshly generated id.
    ///
    /// The name and PIX key are trimmed; a blank PIX key is stored as `None`.
    pub async fn add_participant(
        &mut self,
        name: &str,
        pix_key: Option<&str>,
    ) -> SplitResult<Participant> {
        let pix_key = pix_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        let participant = Participant::new(
            uuid::Uuid::new_v4().to_string(),
            name.trim().to_string(),
            pix_key,
        );

        self.validate(&participant)?;

        self.storage.save_participant(&participant).await?;
        info!(participant_id = %participant.id, name = %participant.name, "participant added");

        Ok(participant)
    }

    /// Run a participant through the configured validator
    pub fn validate(&self, participant: &Participant) -> SplitResult<()> {
        self.validator
            .validate_participant(participant)
            .inspect_err(|err| warn!(error = %err, participant_id = %participant.id, "rejected participant"))
    }

    /// Get a participant by ID
    pub async fn get_participant(&self, participant_id: &str) -> SplitResult<Option<Participant>> {
        self.storage.get_participant(participant_id).await
    }

    /// Get a participant by ID, returning an error if not found
    pub async fn get_participant_required(&self, participant_id: &str) -> SplitResult<Participant> {
        self.storage
            .get_participant(participant_id)
            .await?
            .ok_or_else(|| SplitError::ParticipantNotFound(participant_id.to_string()))
    }

    /// List all participants in the order they joined
    pub async fn list_participants(&self) -> SplitResult<Vec<Participant>> {
        self.storage.list_participants().await
    }

    /// Remove a participant and every expense they paid.
    ///
    /// Returns the number of expenses removed along with the participant.
    pub async fn remove_participant(&mut self, participant_id: &str) -> SplitResult<usize> {
        self.get_participant_required(participant_id).await?;

        let removed = self.storage.delete_participant(participant_id).await?;
        info!(participant_id, removed_expenses = removed, "participant removed");

        Ok(removed)
    }
}
