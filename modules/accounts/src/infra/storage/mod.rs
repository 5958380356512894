//! Infrastructure storage layer for accounts.
//!
//! All SeaORM-specific code lives here: the `accounts` entity, the
//! repository, and the schema migrations. The domain layer never imports
//! SeaORM types other than `DatabaseConnection`.

pub mod accounts_repo;
pub mod entity;
pub mod mapper;
pub mod migrations;
