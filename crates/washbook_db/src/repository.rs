//! Repository traits for database access
//!
//! Repositories are built from a shared [`DbClient`](crate::DbClient) through a
//! factory, so callers never depend on a concrete repository constructor.

/// A trait for database repository factories
///
/// Generic over the repository type and whatever the repository is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
