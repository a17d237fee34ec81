//! # Repository Module
//!
//! Database repository implementations for PetVax.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  PetService (apps/api)                                                 │
//! │       │                                                                 │
//! │       │  store.find_by_vaccination_name("rabies")                      │
//! │       ▼                                                                 │
//! │  dyn PetStore  (petvax-core port)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PetRepository                                                         │
//! │  ├── list_all / get_by_id / exists                                     │
//! │  ├── insert / update / delete                                          │
//! │  └── find_by_vaccination                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`pet::PetRepository`] - Pet and vaccination persistence

pub mod pet;
