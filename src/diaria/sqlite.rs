//! Implements a SQLite backed diária store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params};
use time::OffsetDateTime;

use crate::diaria::{Diaria, DiariaId, DiariaStore, MilitarNome, StoreError};

/// Creates, retrieves, updates and deletes diárias in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteDiariaStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteDiariaStore {
    /// Create a new diária store with a SQLite database.
    ///
    /// The `diaria` table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            StoreError::DatabaseLock
        })
    }
}

impl DiariaStore for SQLiteDiariaStore {
    fn list(&self) -> Result<Vec<Diaria>, StoreError> {
        let connection = self.lock()?;
        get_all_diarias(&connection)
    }

    fn insert(&self, militar_nome: &MilitarNome, valor: f64) -> Result<Diaria, StoreError> {
        let connection = self.lock()?;
        insert_diaria(militar_nome, valor, OffsetDateTime::now_utc(), &connection)
    }

    fn update(
        &self,
        id: DiariaId,
        militar_nome: &MilitarNome,
        valor: f64,
    ) -> Result<(), StoreError> {
        let rows_affected = self.lock()?.execute(
            "UPDATE diaria SET militar_nome = ?1, valor = ?2 WHERE id = ?3",
            params![militar_nome.as_ref(), valor, id],
        )?;

        if rows_affected == 0 {
            return Err(StoreError::UpdateMissing(id));
        }

        Ok(())
    }

    fn delete(&self, id: DiariaId) -> Result<(), StoreError> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM diaria WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(StoreError::DeleteMissing(id));
        }

        Ok(())
    }
}

/// Initialize the diária table and indexes.
pub fn create_diaria_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS diaria (
            id INTEGER PRIMARY KEY,
            militar_nome TEXT NOT NULL,
            valor REAL NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_diaria_created_at ON diaria(created_at);",
    )?;

    Ok(())
}

/// Insert a diária created at `created_at` and return it with its generated id.
pub(crate) fn insert_diaria(
    militar_nome: &MilitarNome,
    valor: f64,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Diaria, StoreError> {
    connection.execute(
        "INSERT INTO diaria (militar_nome, valor, created_at) VALUES (?1, ?2, ?3)",
        params![militar_nome.as_ref(), valor, created_at],
    )?;

    let id = connection.last_insert_rowid();

    Ok(Diaria {
        id,
        militar_nome: militar_nome.clone(),
        valor,
        created_at,
    })
}

fn get_all_diarias(connection: &Connection) -> Result<Vec<Diaria>, StoreError> {
    connection
        .prepare(
            "SELECT id, militar_nome, valor, created_at FROM diaria \
            ORDER BY created_at DESC, id DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_diaria| maybe_diaria.map_err(StoreError::from))
        .collect()
}

fn map_row(row: &Row) -> Result<Diaria, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let valor = row.get(2)?;
    let created_at = row.get(3)?;

    Ok(Diaria {
        id,
        militar_nome: MilitarNome::new_unchecked(&raw_name),
        valor,
        created_at,
    })
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use super::create_diaria_table;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), create_diaria_table(&connection));
    }
}
