//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod provisioned_user_repo;

pub use provisioned_user_repo::ProvisionedUserRepo;
