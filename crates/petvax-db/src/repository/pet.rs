//! # Pet Repository
//!
//! Database operations for pets and their vaccination history.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Pet, Two Tables                                  │
//! │                                                                         │
//! │  pets                              pet_vaccinations                    │
//! │  ┌────┬───────┬─────────┬───┐      ┌────────┬──────────┬────────┬───┐ │
//! │  │ id │ name  │ species │ … │      │ pet_id │ position │ name   │ … │ │
//! │  ├────┼───────┼─────────┼───┤      ├────────┼──────────┼────────┼───┤ │
//! │  │ 1  │ Rex   │ DOG     │   │◄─────│ 1      │ 0        │ Rabies │   │ │
//! │  │    │       │         │   │◄─────│ 1      │ 1        │ DHPP   │   │ │
//! │  └────┴───────┴─────────┴───┘      └────────┴──────────┴────────┴───┘ │
//! │                                                                         │
//! │  Writes touch both tables inside one transaction.                      │
//! │  Deleting a pet cascades to its vaccinations.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Vaccine Search
//! Matching is exact but case-insensitive. Each vaccination row stores a
//! Unicode-folded `name_folded` ([`fold_vaccine_name`]) and the search key is
//! folded the same way before comparison, backed by an index on that column.
//!
//! ## Reads
//! Reads that touch both tables run inside one transaction so a concurrent
//! update or delete can never produce a record mixing two versions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use petvax_core::{fold_vaccine_name, CoreResult, Pet, PetId, PetStore, Species, Vaccination};

// =============================================================================
// Row Types
// =============================================================================

/// A row of `pets`.
#[derive(Debug, Clone, sqlx::FromRow)]
struct PetRow {
    id: PetId,
    name: String,
    species: Species,
    breed: Option<String>,
    owner_name: String,
    owner_contact: String,
    owner_email: String,
}

/// A row of `pet_vaccinations`.
#[derive(Debug, Clone, sqlx::FromRow)]
struct VaccinationRow {
    pet_id: PetId,
    name: String,
    date_given: NaiveDate,
}

impl PetRow {
    fn into_pet(self, vaccinations: Vec<Vaccination>) -> Pet {
        Pet {
            id: Some(self.id),
            name: self.name,
            species: self.species,
            breed: self.breed,
            owner_name: self.owner_name,
            owner_contact: self.owner_contact,
            owner_email: self.owner_email,
            vaccinations,
        }
    }
}

const PET_COLUMNS: &str = "id, name, species, breed, owner_name, owner_contact, owner_email";

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for pet database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PetRepository::new(pool);
///
/// let rex = repo.insert(&pet).await?;
/// let found = repo.get_by_id(rex.id.unwrap()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PetRepository {
    pool: SqlitePool,
}

impl PetRepository {
    /// Creates a new PetRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PetRepository { pool }
    }

    /// Lists every pet in identifier order.
    pub async fn list_all(&self) -> DbResult<Vec<Pet>> {
        let mut tx = self.begin().await?;

        let rows = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM pets ORDER BY id"
        ))
        .fetch_all(&mut *tx)
        .await?;

        let vaccinations = sqlx::query_as::<_, VaccinationRow>(
            r#"
            SELECT pet_id, name, date_given
            FROM pet_vaccinations
            ORDER BY pet_id, position
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        commit(tx).await?;

        debug!(count = rows.len(), "Listed pets");
        Ok(assemble(rows, vaccinations))
    }

    /// Gets a pet by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Pet))` - Pet found, vaccinations in stored order
    /// * `Ok(None)` - Pet not found
    pub async fn get_by_id(&self, id: PetId) -> DbResult<Option<Pet>> {
        let mut tx = self.begin().await?;

        let row = sqlx::query_as::<_, PetRow>(&format!(
            "SELECT {PET_COLUMNS} FROM pets WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            // read-only; dropping tx rolls back
            return Ok(None);
        };

        let vaccinations = sqlx::query_as::<_, VaccinationRow>(
            r#"
            SELECT pet_id, name, date_given
            FROM pet_vaccinations
            WHERE pet_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|v| Vaccination::new(v.name, v.date_given))
        .collect();
        commit(tx).await?;

        Ok(Some(row.into_pet(vaccinations)))
    }

    /// Checks whether a pet with this ID exists.
    pub async fn exists(&self, id: PetId) -> DbResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pets WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }

    /// Inserts a new pet and its vaccinations.
    ///
    /// Any `id` already on `pet` is ignored; the database assigns one.
    ///
    /// ## Returns
    /// The pet as stored, carrying its new ID.
    pub async fn insert(&self, pet: &Pet) -> DbResult<Pet> {
        let mut tx = self.begin().await?;

        let now = now_rfc3339();
        let id = sqlx::query(
            r#"
            INSERT INTO pets (
                name, species, breed, owner_name, owner_contact, owner_email,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&pet.name)
        .bind(pet.species)
        .bind(&pet.breed)
        .bind(&pet.owner_name)
        .bind(&pet.owner_contact)
        .bind(&pet.owner_email)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        insert_vaccinations(&mut tx, id, &pet.vaccinations).await?;
        commit(tx).await?;

        debug!(pet_id = id, vaccinations = pet.vaccinations.len(), "Inserted pet");
        Ok(pet.clone().with_id(id))
    }

    /// Replaces a stored pet, vaccinations included.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - `pet.id` is `None` or no such row exists;
    ///   nothing is written
    pub async fn update(&self, pet: &Pet) -> DbResult<Pet> {
        let id = pet
            .id
            .ok_or_else(|| DbError::not_found("Pet", "unassigned"))?;

        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE pets SET
                name = ?2,
                species = ?3,
                breed = ?4,
                owner_name = ?5,
                owner_contact = ?6,
                owner_email = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&pet.name)
        .bind(pet.species)
        .bind(&pet.breed)
        .bind(&pet.owner_name)
        .bind(&pet.owner_contact)
        .bind(&pet.owner_email)
        .bind(now_rfc3339())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // tx rolls back on drop
            return Err(DbError::pet_not_found(id));
        }

        sqlx::query("DELETE FROM pet_vaccinations WHERE pet_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_vaccinations(&mut tx, id, &pet.vaccinations).await?;
        commit(tx).await?;

        debug!(pet_id = id, vaccinations = pet.vaccinations.len(), "Updated pet");
        Ok(pet.clone())
    }

    /// Deletes a pet. Its vaccinations go with it (ON DELETE CASCADE).
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no such pet
    pub async fn delete(&self, id: PetId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM pets WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::pet_not_found(id));
        }

        debug!(pet_id = id, "Deleted pet");
        Ok(())
    }

    /// Finds pets holding a vaccination named `name`, ignoring case.
    ///
    /// Each pet appears once however many matching records it has, with its
    /// full vaccination history.
    pub async fn find_by_vaccination(&self, name: &str) -> DbResult<Vec<Pet>> {
        debug!(vaccine = %name, "Searching pets by vaccination");
        let key = fold_vaccine_name(name);
        let mut tx = self.begin().await?;

        let rows = sqlx::query_as::<_, PetRow>(&format!(
            r#"
            SELECT {PET_COLUMNS}
            FROM pets
            WHERE id IN (
                SELECT pet_id FROM pet_vaccinations WHERE name_folded = ?1
            )
            ORDER BY id
            "#
        ))
        .bind(&key)
        .fetch_all(&mut *tx)
        .await?;

        let vaccinations = sqlx::query_as::<_, VaccinationRow>(
            r#"
            SELECT pet_id, name, date_given
            FROM pet_vaccinations
            WHERE pet_id IN (
                SELECT pet_id FROM pet_vaccinations WHERE name_folded = ?1
            )
            ORDER BY pet_id, position
            "#,
        )
        .bind(&key)
        .fetch_all(&mut *tx)
        .await?;
        commit(tx).await?;

        debug!(count = rows.len(), "Vaccination search returned pets");
        Ok(assemble(rows, vaccinations))
    }

    /// Counts stored vaccination records across all pets.
    pub async fn count_vaccinations(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pet_vaccinations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

async fn commit(tx: Transaction<'static, Sqlite>) -> DbResult<()> {
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))
}

async fn insert_vaccinations(
    tx: &mut Transaction<'static, Sqlite>,
    pet_id: PetId,
    vaccinations: &[Vaccination],
) -> DbResult<()> {
    for (position, vaccination) in vaccinations.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO pet_vaccinations (pet_id, position, name, name_folded, date_given)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(pet_id)
        .bind(position as i64)
        .bind(&vaccination.name)
        .bind(vaccination.folded_name())
        .bind(vaccination.date_given)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Attaches vaccination rows to their pets, keeping pet order.
fn assemble(rows: Vec<PetRow>, vaccinations: Vec<VaccinationRow>) -> Vec<Pet> {
    let mut by_pet: HashMap<PetId, Vec<Vaccination>> = HashMap::new();
    for v in vaccinations {
        by_pet
            .entry(v.pet_id)
            .or_default()
            .push(Vaccination::new(v.name, v.date_given));
    }

    rows.into_iter()
        .map(|row| {
            let vaccinations = by_pet.remove(&row.id).unwrap_or_default();
            row.into_pet(vaccinations)
        })
        .collect()
}

// =============================================================================
// PetStore Port
// =============================================================================

#[async_trait]
impl PetStore for PetRepository {
    async fn find_all(&self) -> CoreResult<Vec<Pet>> {
        Ok(self.list_all().await?)
    }

    async fn find_by_id(&self, id: PetId) -> CoreResult<Option<Pet>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn exists_by_id(&self, id: PetId) -> CoreResult<bool> {
        Ok(self.exists(id).await?)
    }

    async fn save(&self, pet: Pet) -> CoreResult<Pet> {
        let saved = if pet.is_persisted() {
            self.update(&pet).await?
        } else {
            self.insert(&pet).await?
        };
        Ok(saved)
    }

    async fn delete_by_id(&self, id: PetId) -> CoreResult<()> {
        Ok(self.delete(id).await?)
    }

    async fn find_by_vaccination_name(&self, name: &str) -> CoreResult<Vec<Pet>> {
        Ok(self.find_by_vaccination(name).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use petvax_core::CoreError;

    async fn setup() -> PetRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().pets()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pet(name: &str, vaccines: &[&str]) -> Pet {
        Pet {
            id: None,
            name: name.to_string(),
            species: Species::Dog,
            breed: None,
            owner_name: "Alice".to_string(),
            owner_contact: "1234567890".to_string(),
            owner_email: "a@x.com".to_string(),
            vaccinations: vaccines
                .iter()
                .map(|v| Vaccination::new(*v, date(2024, 1, 1)))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = setup().await;

        let first = repo.insert(&pet("Rex", &["Rabies"])).await.unwrap();
        let second = repo.insert(&pet("Fido", &[])).await.unwrap();

        let (a, b) = (first.id.unwrap(), second.id.unwrap());
        assert!(b > a);
        assert_eq!(first.name, "Rex");
    }

    #[tokio::test]
    async fn test_insert_ignores_supplied_id() {
        let repo = setup().await;
        let saved = repo.insert(&pet("Rex", &[]).with_id(500)).await.unwrap();
        assert_ne!(saved.id, Some(500));
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let repo = setup().await;
        let mut input = pet("Rex", &["Rabies", "DHPP", "Rabies"]);
        input.species = Species::SmallMammal;
        input.breed = Some("Holland Lop".to_string());
        input.vaccinations[1].date_given = date(2023, 12, 31);

        let saved = repo.insert(&input).await.unwrap();
        let found = repo.get_by_id(saved.id.unwrap()).await.unwrap().unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.vaccinations.len(), 3);
        assert_eq!(found.vaccinations[1].name, "DHPP");
        assert_eq!(found.vaccinations[1].date_given, date(2023, 12, 31));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = setup().await;
        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(!repo.exists(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_attaches_vaccinations() {
        let repo = setup().await;
        repo.insert(&pet("Rex", &["Rabies"])).await.unwrap();
        repo.insert(&pet("Fido", &[])).await.unwrap();
        repo.insert(&pet("Bella", &["DHPP", "Lepto"])).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let summary: Vec<(&str, usize)> = all
            .iter()
            .map(|p| (p.name.as_str(), p.vaccinations.len()))
            .collect();
        assert_eq!(summary, vec![("Rex", 1), ("Fido", 0), ("Bella", 2)]);
    }

    #[tokio::test]
    async fn test_update_replaces_vaccinations() {
        let repo = setup().await;
        let saved = repo.insert(&pet("Rex", &["Rabies", "DHPP"])).await.unwrap();
        let id = saved.id.unwrap();

        let mut changed = pet("Rex II", &["Lepto"]).with_id(id);
        changed.owner_contact = "5555555555".to_string();
        repo.update(&changed).await.unwrap();

        let found = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Rex II");
        assert_eq!(found.owner_contact, "5555555555");
        assert_eq!(found.vaccinations, vec![Vaccination::new("Lepto", date(2024, 1, 1))]);
        assert_eq!(repo.count_vaccinations().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_writes_nothing() {
        let repo = setup().await;

        let err = repo.update(&pet("Ghost", &["Rabies"]).with_id(42)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(repo.count_vaccinations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let repo = setup().await;
        let id = repo.insert(&pet("Rex", &["Rabies", "DHPP"])).await.unwrap().id.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.count_vaccinations().await.unwrap(), 0);
        assert!(matches!(repo.delete(id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = setup().await;
        let first = repo.insert(&pet("Rex", &[])).await.unwrap().id.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.insert(&pet("Fido", &[])).await.unwrap().id.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_find_by_vaccination_ignores_case_and_dedupes() {
        let repo = setup().await;
        repo.insert(&pet("Rex", &["Rabies", "rabies"])).await.unwrap();
        repo.insert(&pet("Fido", &["DHPP"])).await.unwrap();
        repo.insert(&pet("Bella", &["RABIES", "Lepto"])).await.unwrap();

        let found = repo.find_by_vaccination("rAbIeS").await.unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rex", "Bella"]);
        // full history is returned, not only the matching records
        assert_eq!(found[1].vaccinations.len(), 2);

        assert!(repo.find_by_vaccination("Rab").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_vaccination_folds_non_ascii() {
        let repo = setup().await;
        repo.insert(&pet("Minou", &["Énterite"])).await.unwrap();

        for query in ["Énterite", "énterite", "ÉNTERITE"] {
            let found = repo.find_by_vaccination(query).await.unwrap();
            assert_eq!(found.len(), 1, "query {query:?}");
            assert_eq!(found[0].vaccinations[0].name, "Énterite");
        }
    }

    #[tokio::test]
    async fn test_update_keeps_search_key_in_step() {
        let repo = setup().await;
        let saved = repo.insert(&pet("Rex", &["Rabies"])).await.unwrap();

        let changed = Pet {
            vaccinations: vec![Vaccination::new("Leptospirose", date(2024, 2, 1))],
            ..saved
        };
        repo.update(&changed).await.unwrap();

        assert!(repo.find_by_vaccination("rabies").await.unwrap().is_empty());
        assert_eq!(repo.find_by_vaccination("LEPTOSPIROSE").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reads_see_whole_updates() {
        // several pooled connections need a file-backed database
        let path = std::env::temp_dir().join(format!("petvax-reads-{}.db", std::process::id()));
        let db = Database::new(DbConfig::new(&path).max_connections(4))
            .await
            .unwrap();
        let repo = db.pets();
        let saved = repo.insert(&pet("Rex", &["Rabies"])).await.unwrap();
        let id = saved.id.unwrap();

        let writer = {
            let repo = repo.clone();
            let saved = saved.clone();
            tokio::spawn(async move {
                for round in 0..25 {
                    let name = format!("Rex{round}");
                    let vaccine = format!("Vaccine{round}");
                    let next = Pet {
                        name,
                        vaccinations: vec![Vaccination::new(vaccine, date(2024, 1, 1))],
                        ..saved.clone()
                    };
                    repo.update(&next).await.unwrap();
                }
            })
        };

        for _ in 0..25 {
            let found = repo.get_by_id(id).await.unwrap().unwrap();
            // every write pairs RexN with VaccineN (or the original Rex/Rabies)
            let expected = match found.name.strip_prefix("Rex") {
                Some("") => "Rabies".to_string(),
                Some(round) => format!("Vaccine{round}"),
                None => panic!("unexpected name {}", found.name),
            };
            assert_eq!(found.vaccinations.len(), 1);
            assert_eq!(found.vaccinations[0].name, expected);
        }

        writer.await.unwrap();
        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn test_store_port_save_and_not_found() {
        let repo = setup().await;
        let store: &dyn PetStore = &repo;

        let saved = store.save(pet("Rex", &[])).await.unwrap();
        assert!(saved.is_persisted());

        let renamed = Pet {
            name: "Max".to_string(),
            ..saved.clone()
        };
        let updated = store.save(renamed).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(store.find_all().await.unwrap().len(), 1);

        let err = store.save(pet("Ghost", &[]).with_id(77)).await.unwrap_err();
        assert!(matches!(err, CoreError::PetNotFound { id: 77 }));

        let err = store.delete_by_id(77).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
