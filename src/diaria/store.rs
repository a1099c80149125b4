//! Defines the record store trait.

use crate::diaria::{Diaria, DiariaId, MilitarNome};

/// Errors returned by a [DiariaStore].
///
/// The display text is shown to the user as is, so it should make sense
/// without any further context.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// An unhandled/unexpected SQL error.
    #[error("erro inesperado no banco de dados: {0}")]
    Sql(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("não foi possível acessar o banco de dados")]
    DatabaseLock,

    /// Tried to update a diária that does not exist.
    #[error("a diária {0} não existe no banco de dados")]
    UpdateMissing(DiariaId),

    /// Tried to delete a diária that does not exist.
    #[error("a diária {0} não existe no banco de dados, talvez já tenha sido excluída")]
    DeleteMissing(DiariaId),
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {error}");
        StoreError::Sql(error)
    }
}

/// Creates, retrieves, updates and deletes diárias.
///
/// The store owns the `id` and `created_at` of each record.
pub trait DiariaStore: Send + Sync {
    /// Get all diárias, newest first.
    fn list(&self) -> Result<Vec<Diaria>, StoreError>;

    /// Create a diária and return it with its generated id and creation time.
    fn insert(&self, militar_nome: &MilitarNome, valor: f64) -> Result<Diaria, StoreError>;

    /// Overwrite the name and value of the diária with `id`.
    ///
    /// # Errors
    /// Returns [StoreError::UpdateMissing] if there is no diária with `id`.
    fn update(&self, id: DiariaId, militar_nome: &MilitarNome, valor: f64)
    -> Result<(), StoreError>;

    /// Delete the diária with `id`.
    ///
    /// # Errors
    /// Returns [StoreError::DeleteMissing] if there is no diária with `id`.
    fn delete(&self, id: DiariaId) -> Result<(), StoreError>;
}
