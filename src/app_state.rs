//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    diaria::{DiariaStore, SQLiteDiariaStore, StoreError, ViewState},
    timezone::get_local_offset,
};

/// Settings that control how the page displays the records.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// The fixed monthly allowance that the spending is measured against.
    pub saldo_mensal: f64,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The record store that persists the diárias.
    pub store: Arc<dyn DiariaStore>,

    /// The state of the single page: records, form fields, filters and edit mode.
    pub view_state: Arc<Mutex<ViewState>>,

    /// How to display records and totals.
    pub display: DisplayConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or if `local_timezone` is not a
    /// known timezone.
    pub fn new(
        db_connection: Connection,
        saldo_mensal: f64,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection).map_err(StoreError::from)?;

        let store = SQLiteDiariaStore::new(Arc::new(Mutex::new(db_connection)));

        Self::with_store(
            Arc::new(store),
            DisplayConfig {
                saldo_mensal,
                local_timezone: local_timezone.to_owned(),
            },
        )
    }

    /// Create a new [AppState] backed by an existing record store.
    ///
    /// # Errors
    /// Returns an error if the timezone in `display` is not a known timezone.
    pub fn with_store(store: Arc<dyn DiariaStore>, display: DisplayConfig) -> Result<Self, Error> {
        if get_local_offset(&display.local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(display.local_timezone));
        }

        Ok(Self {
            store,
            view_state: Arc::new(Mutex::new(ViewState::default())),
            display,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{AppState, Error};

    #[test]
    fn new_initializes_database() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(connection, 60_000.0, "America/Sao_Paulo").unwrap();

        assert_eq!(state.store.list(), Ok(vec![]));
        assert_eq!(state.display.saldo_mensal, 60_000.0);
    }

    #[test]
    fn new_fails_on_unknown_timezone() {
        let connection = Connection::open_in_memory().unwrap();

        let result = AppState::new(connection, 60_000.0, "Not/AZone");

        assert!(matches!(
            result,
            Err(Error::InvalidTimezoneError(timezone)) if timezone == "Not/AZone"
        ));
    }
}
