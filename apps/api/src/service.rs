//! # Pet Record Service
//!
//! Orchestrates the store and the notifier. Holds no mutable state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per-identifier lifecycle                                               │
//! │                                                                         │
//! │            create                                                       │
//! │   absent ──────────► present ──┐ update / get                          │
//! │      ▲                  │  ▲   │                                        │
//! │      └──── delete ──────┘  └───┘                                        │
//! │                                                                         │
//! │  update / delete on an absent id → PetNotFound, nothing written        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use petvax_core::{CoreError, CoreResult, Notifier, Pet, PetId, PetStore};
use tracing::{debug, info, warn};

/// Business operations on pet records.
#[derive(Clone)]
pub struct PetService {
    store: Arc<dyn PetStore>,
    notifier: Arc<dyn Notifier>,
}

impl PetService {
    /// Creates a service over the given store and notifier.
    pub fn new(store: Arc<dyn PetStore>, notifier: Arc<dyn Notifier>) -> Self {
        PetService { store, notifier }
    }

    /// Registers a new pet and notifies its owner.
    ///
    /// Any caller-supplied id is discarded. The notification is attempted
    /// after the write commits; its outcome never affects the result.
    pub async fn create(&self, mut pet: Pet) -> CoreResult<Pet> {
        debug!(name = %pet.name, "Creating pet");
        pet.id = None;

        let saved = self.store.save(pet).await?;
        info!(pet_id = ?saved.id, name = %saved.name, "Pet registered");

        let delivered = self
            .notifier
            .notify_registration(&saved.owner_email, &saved.name)
            .await;
        if !delivered {
            warn!(pet_id = ?saved.id, "Registration notification was not delivered");
        }

        Ok(saved)
    }

    /// Every registered pet.
    pub async fn get_all(&self) -> CoreResult<Vec<Pet>> {
        let pets = self.store.find_all().await?;
        debug!(count = pets.len(), "Fetched all pets");
        Ok(pets)
    }

    /// The pet with this id, or `None`.
    pub async fn get_by_id(&self, id: PetId) -> CoreResult<Option<Pet>> {
        debug!(pet_id = id, "Fetching pet");
        self.store.find_by_id(id).await
    }

    /// Replaces every field of an existing pet except its id.
    ///
    /// ## Errors
    /// * `CoreError::PetNotFound` - no pet with `id`; nothing is written
    pub async fn update(&self, id: PetId, replacement: Pet) -> CoreResult<Pet> {
        debug!(pet_id = id, "Updating pet");

        if !self.store.exists_by_id(id).await? {
            return Err(CoreError::not_found(id));
        }

        let saved = self.store.save(replacement.with_id(id)).await?;
        info!(pet_id = id, "Pet updated");
        Ok(saved)
    }

    /// Deletes a pet and its vaccination history.
    ///
    /// ## Errors
    /// * `CoreError::PetNotFound` - no pet with `id`
    pub async fn delete(&self, id: PetId) -> CoreResult<()> {
        debug!(pet_id = id, "Deleting pet");

        if !self.store.exists_by_id(id).await? {
            return Err(CoreError::not_found(id));
        }

        self.store.delete_by_id(id).await?;
        info!(pet_id = id, "Pet deleted");
        Ok(())
    }

    /// Pets vaccinated with `name`, ignoring case. Empty when none match.
    pub async fn get_by_vaccination_name(&self, name: &str) -> CoreResult<Vec<Pet>> {
        let pets = self.store.find_by_vaccination_name(name).await?;
        debug!(vaccine = %name, count = pets.len(), "Fetched pets by vaccination");
        Ok(pets)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
