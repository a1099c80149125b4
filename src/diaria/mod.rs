//! Diárias: the allowance records, their store, the page state and the page itself.

mod domain;
mod handlers;
mod page;
mod sqlite;
mod store;
mod summary;
mod view_state;

pub use domain::{DEFAULT_SALDO_MENSAL, Diaria, DiariaId, MilitarNome, parse_valor};
pub use handlers::{
    begin_edit_endpoint, cancel_edit_endpoint, clear_filters_endpoint, delete_diaria_endpoint,
    get_diarias_page, insert_diaria_endpoint, load_diarias_endpoint, save_edit_endpoint,
    set_filters_endpoint,
};
pub use sqlite::{SQLiteDiariaStore, create_diaria_table};
pub use store::{DiariaStore, StoreError};
pub use view_state::ViewState;

#[cfg(test)]
pub(crate) use view_state::test_store;
