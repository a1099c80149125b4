//! The state behind the diárias page and the operations that change it.
//!
//! [ViewState] plays the part of the page's controller: it holds the last
//! fetched records, the loading flag and the contents of the forms. Every
//! successful mutation is followed by a full reload from the store, so the
//! records are always replaced as a whole and never patched in place.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    Error,
    diaria::{
        Diaria, DiariaId, DiariaStore, MilitarNome,
        domain::{parse_valor, valor_input_text},
        summary::{DiariasView, Filters},
    },
};

/// The raw contents of a name and value form, used both for inserting and
/// for editing a diária.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiariaForm {
    #[serde(default)]
    pub militar_nome: String,
    #[serde(default)]
    pub valor: String,
}

/// The diária being edited in place and the current contents of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: DiariaId,
    pub militar_nome: String,
    pub valor: String,
}

/// What happened to an insert request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The name or the value was blank, nothing was done.
    Ignored,
    /// The diária was created.
    Inserted,
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user did not confirm, nothing was done.
    NotConfirmed,
    /// The diária was deleted.
    Deleted,
}

/// The state of the diárias page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    records: Arc<[Diaria]>,
    loading: bool,
    new_record: DiariaForm,
    filters: Filters,
    editing: Option<EditDraft>,
}

impl Default for ViewState {
    /// The state of a freshly opened page: no records yet and waiting for
    /// the first load.
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
            loading: true,
            new_record: DiariaForm::default(),
            filters: Filters::default(),
            editing: None,
        }
    }
}

impl ViewState {
    /// The last successfully loaded records, newest first.
    pub fn records(&self) -> &[Diaria] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn new_record(&self) -> &DiariaForm {
        &self.new_record
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Derive the filtered list, the totals and the summary.
    pub fn view(&self, saldo_mensal: f64) -> DiariasView<'_> {
        DiariasView::compute(&self.records, &self.filters, saldo_mensal)
    }

    /// Replace the records with a fresh list from `store`.
    ///
    /// A failure is logged and otherwise ignored, leaving the previous
    /// records in place.
    pub fn load(&mut self, store: &dyn DiariaStore) {
        self.loading = true;

        match store.list() {
            Ok(records) => {
                tracing::debug!("Loaded {} diárias", records.len());
                self.records = Arc::from(records);
            }
            Err(error) => tracing::error!("Erro ao carregar: {error}"),
        }

        self.loading = false;
    }

    /// Create a diária from the new record form.
    ///
    /// Does nothing when the name is blank or the value is empty. On success
    /// the form is cleared and the records are reloaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a number or the store fails. The
    /// form keeps the submitted contents so that the user can try again.
    pub fn insert(
        &mut self,
        store: &dyn DiariaStore,
        form: DiariaForm,
    ) -> Result<InsertOutcome, Error> {
        if form.militar_nome.trim().is_empty() || form.valor.trim().is_empty() {
            return Ok(InsertOutcome::Ignored);
        }

        self.new_record = form;

        let militar_nome = MilitarNome::new(&self.new_record.militar_nome);
        let valor = parse_valor(&self.new_record.valor)?;
        let diaria = store.insert(&militar_nome, valor)?;

        tracing::info!("Inserted diária {} for {militar_nome}", diaria.id);
        self.new_record = DiariaForm::default();
        self.load(store);

        Ok(InsertOutcome::Inserted)
    }

    /// Delete the diária with `id` if the user `confirmed` the deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn delete(
        &mut self,
        store: &dyn DiariaStore,
        id: DiariaId,
        confirmed: bool,
    ) -> Result<DeleteOutcome, Error> {
        if !confirmed {
            return Ok(DeleteOutcome::NotConfirmed);
        }

        store.delete(id)?;

        tracing::info!("Deleted diária {id}");
        self.load(store);

        Ok(DeleteOutcome::Deleted)
    }

    /// Start editing the diária with `id`, replacing any edit in progress.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if `id` is not among the loaded records.
    pub fn begin_edit(&mut self, id: DiariaId) -> Result<(), Error> {
        let diaria = self
            .records
            .iter()
            .find(|diaria| diaria.id == id)
            .ok_or(Error::NotFound)?;

        self.editing = Some(EditDraft {
            id,
            militar_nome: diaria.militar_nome.to_string(),
            valor: valor_input_text(diaria.valor),
        });

        Ok(())
    }

    /// Save the edited name and value of the diária with `id`.
    ///
    /// On success edit mode ends and the records are reloaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a number or the store fails. Edit
    /// mode stays on with the submitted draft.
    pub fn save_edit(
        &mut self,
        store: &dyn DiariaStore,
        id: DiariaId,
        form: DiariaForm,
    ) -> Result<(), Error> {
        let militar_nome = MilitarNome::new(&form.militar_nome);
        let valor = parse_valor(&form.valor);
        self.editing = Some(EditDraft {
            id,
            militar_nome: form.militar_nome,
            valor: form.valor,
        });

        store.update(id, &militar_nome, valor?)?;

        tracing::info!("Updated diária {id}");
        self.editing = None;
        self.load(store);

        Ok(())
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
    }
}

#[cfg(test)]
pub(crate) mod test_store {
    use std::sync::Mutex;

    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::diaria::{Diaria, DiariaId, DiariaStore, MilitarNome, StoreError};

    /// A call made to a [SpyStore].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        List,
        Insert(String, f64),
        Update(DiariaId, String, f64),
        Delete(DiariaId),
    }

    /// An in-memory store that records every call and can be told to fail.
    #[derive(Debug, Default)]
    pub(crate) struct SpyStore {
        records: Mutex<Vec<Diaria>>,
        calls: Mutex<Vec<Call>>,
        failing: Mutex<bool>,
    }

    impl SpyStore {
        pub(crate) fn with_records(records: Vec<Diaria>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        /// Make every following call fail with [StoreError::DatabaseLock].
        pub(crate) fn fail(&self) {
            *self.failing.lock().unwrap() = true;
        }

        fn record(&self, call: Call) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push(call);

            if *self.failing.lock().unwrap() {
                Err(StoreError::DatabaseLock)
            } else {
                Ok(())
            }
        }
    }

    impl DiariaStore for SpyStore {
        fn list(&self) -> Result<Vec<Diaria>, StoreError> {
            self.record(Call::List)?;

            Ok(self.records.lock().unwrap().clone())
        }

        fn insert(&self, militar_nome: &MilitarNome, valor: f64) -> Result<Diaria, StoreError> {
            self.record(Call::Insert(militar_nome.to_string(), valor))?;

            let mut records = self.records.lock().unwrap();
            let id = records.iter().map(|diaria| diaria.id).max().unwrap_or(0) + 1;
            let created_at: OffsetDateTime =
                datetime!(2025-01-01 00:00 UTC) + Duration::minutes(id);
            let diaria = Diaria {
                id,
                militar_nome: militar_nome.clone(),
                valor,
                created_at,
            };
            records.insert(0, diaria.clone());

            Ok(diaria)
        }

        fn update(
            &self,
            id: DiariaId,
            militar_nome: &MilitarNome,
            valor: f64,
        ) -> Result<(), StoreError> {
            self.record(Call::Update(id, militar_nome.to_string(), valor))?;

            let mut records = self.records.lock().unwrap();
            let diaria = records
                .iter_mut()
                .find(|diaria| diaria.id == id)
                .ok_or(StoreError::UpdateMissing(id))?;
            diaria.militar_nome = militar_nome.clone();
            diaria.valor = valor;

            Ok(())
        }

        fn delete(&self, id: DiariaId) -> Result<(), StoreError> {
            self.record(Call::Delete(id))?;

            let mut records = self.records.lock().unwrap();
            let count_before = records.len();
            records.retain(|diaria| diaria.id != id);

            if records.len() == count_before {
                return Err(StoreError::DeleteMissing(id));
            }

            Ok(())
        }
    }
}




#[cfg(test)]
mod edit_tests {
    use crate::{
        Error, StoreError,
        diaria::summary::test_data::diarias,
    };

    use super::{
        DiariaForm, EditDraft, ViewState,
        test_store::{Call, SpyStore},
    };

    fn loaded(entries: &[(&str, f64)]) -> (SpyStore, ViewState) {
        let store = SpyStore::with_records(diarias(entries));
        let mut state = ViewState::default();
        state.load(&store);
        store.clear_calls();
        (store, state)
    }

    #[test]
    fn begin_edit_copies_name_and_value() {
        let (_, mut state) = loaded(&[("ALICE", 150.0)]);

        state.begin_edit(1).unwrap();

        assert_eq!(
            state.editing(),
            Some(&EditDraft {
                id: 1,
                militar_nome: "ALICE".to_owned(),
                valor: "150".to_owned(),
            })
        );
    }

    #[test]
    fn begin_edit_replaces_previous_target() {
        let (_, mut state) = loaded(&[("ALICE", 150.0), ("BOB", 12.5)]);
        state.begin_edit(2).unwrap();

        state.begin_edit(1).unwrap();

        assert_eq!(
            state.editing(),
            Some(&EditDraft {
                id: 1,
                militar_nome: "BOB".to_owned(),
                valor: "12.5".to_owned(),
            })
        );
    }

    #[test]
    fn begin_edit_of_unknown_id_fails() {
        let (_, mut state) = loaded(&[("ALICE", 150.0)]);

        assert_eq!(state.begin_edit(42), Err(Error::NotFound));
        assert!(state.editing().is_none());
    }

    #[test]
    fn save_edit_updates_and_leaves_edit_mode() {
        let (store, mut state) = loaded(&[("ALICE", 150.0)]);
        state.begin_edit(1).unwrap();

        state
            .save_edit(
                &store,
                1,
                DiariaForm {
                    militar_nome: " alice santos ".to_owned(),
                    valor: "175.25".to_owned(),
                },
            )
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![
                Call::Update(1, "ALICE SANTOS".to_owned(), 175.25),
                Call::List
            ]
        );
        assert!(state.editing().is_none());
        assert_eq!(state.records()[0].militar_nome.as_ref(), "ALICE SANTOS");
        assert_eq!(state.records()[0].valor, 175.25);
    }

    #[test]
    fn failed_save_stays_in_edit_mode() {
        let (store, mut state) = loaded(&[("ALICE", 150.0)]);
        state.begin_edit(1).unwrap();
        store.fail();
        let form = DiariaForm {
            militar_nome: "alice".to_owned(),
            valor: "200".to_owned(),
        };

        let result = state.save_edit(&store, 1, form);

        assert_eq!(result, Err(Error::Store(StoreError::DatabaseLock)));
        assert_eq!(
            state.editing(),
            Some(&EditDraft {
                id: 1,
                militar_nome: "alice".to_owned(),
                valor: "200".to_owned(),
            })
        );
        assert_eq!(state.records()[0].valor, 150.0);
    }

    #[test]
    fn invalid_value_stays_in_edit_mode() {
        let (store, mut state) = loaded(&[("ALICE", 150.0)]);
        state.begin_edit(1).unwrap();

        let result = state.save_edit(
            &store,
            1,
            DiariaForm {
                militar_nome: "alice".to_owned(),
                valor: String::new(),
            },
        );

        assert_eq!(result, Err(Error::InvalidValor(String::new())));
        assert!(state.editing().is_some());
        assert!(store.calls().is_empty());
    }

    #[test]
    fn cancel_edit_does_not_touch_store() {
        let (store, mut state) = loaded(&[("ALICE", 150.0)]);
        state.begin_edit(1).unwrap();

        state.cancel_edit();

        assert!(state.editing().is_none());
        assert!(store.calls().is_empty());
    }
}

#[cfg(test)]
mod filter_state_tests {
    use crate::diaria::summary::{Filters, test_data::diarias};

    use super::{ViewState, test_store::SpyStore};

    #[test]
    fn filters_change_view_but_not_records() {
        let store = SpyStore::with_records(diarias(&[("A", 50.0), ("B", 150.0), ("C", 250.0)]));
        let mut state = ViewState::default();
        state.load(&store);

        state.set_filters(Filters {
            valor_min: "100".to_owned(),
            valor_max: "200".to_owned(),
            ..Default::default()
        });

        let view = state.view(60_000.0);
        assert_eq!(view.filtered.len(), 1);
        assert_eq!(view.filtered[0].valor, 150.0);
        assert_eq!(view.total_gasto, 450.0);
        assert_eq!(state.records().len(), 3);
    }

    #[test]
    fn clear_filters_resets_every_field() {
        let mut state = ViewState::default();
        state.set_filters(Filters {
            militar: "x".to_owned(),
            valor_min: "1".to_owned(),
            valor_max: "2".to_owned(),
        });

        state.clear_filters();

        assert!(state.filters().is_empty());
    }
}
