//! # Ports
//!
//! Traits the pet record service depends on. Adapters live elsewhere:
//! `petvax-db` implements [`PetStore`], `apps/api` implements [`Notifier`].
//!
//! ```text
//! PetService ──► dyn PetStore  ──► PetRepository (SQLite)
//!            └─► dyn Notifier  ──► SmtpNotifier | LogNotifier
//! ```

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Pet, PetId};

/// Durable storage for pets and their vaccinations.
#[async_trait]
pub trait PetStore: Send + Sync {
    /// Every stored pet, in identifier order.
    async fn find_all(&self) -> CoreResult<Vec<Pet>>;

    /// The pet with this identifier, if any.
    async fn find_by_id(&self, id: PetId) -> CoreResult<Option<Pet>>;

    async fn exists_by_id(&self, id: PetId) -> CoreResult<bool>;

    /// Persists `pet`.
    ///
    /// With `id == None` a new pet is inserted and assigned an identifier.
    /// With `id == Some(_)` the stored pet is replaced, vaccinations included;
    /// a missing row is [`crate::CoreError::PetNotFound`].
    async fn save(&self, pet: Pet) -> CoreResult<Pet>;

    /// Removes the pet and its vaccinations.
    async fn delete_by_id(&self, id: PetId) -> CoreResult<()>;

    /// Pets holding at least one vaccination named `name`, ignoring case.
    /// Each pet appears once.
    async fn find_by_vaccination_name(&self, name: &str) -> CoreResult<Vec<Pet>>;
}

/// Outbound registration confirmations.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tells `contact_address` that `pet_name` was registered.
    ///
    /// Returns whether delivery succeeded. Never fails the caller.
    async fn notify_registration(&self, contact_address: &str, pet_name: &str) -> bool;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify_registration(&self, contact_address: &str, pet_name: &str) -> bool {
            self.sent
                .lock()
                .unwrap()
                .push((contact_address.to_string(), pet_name.to_string()));
            true
        }
    }

    #[tokio::test]
    async fn test_notifier_is_object_safe() {
        let recorder = Arc::new(RecordingNotifier::default());
        let notifier: Arc<dyn Notifier> = recorder.clone();

        assert!(notifier.notify_registration("a@x.com", "Rex").await);
        assert_eq!(
            recorder.sent.lock().unwrap().as_slice(),
            &[("a@x.com".to_string(), "Rex".to_string())]
        );
    }
}
