/*! Sets up the application's SQLite database. */

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::diaria::create_diaria_table;

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_diaria_table(&transaction)?;

    transaction.commit()
}
