//! Row structs and write DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the DTO accepted by its repository.

pub mod note;
