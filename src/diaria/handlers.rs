//! Route handlers for the diárias page.
//!
//! Every handler locks the shared [ViewState], runs one operation on it and
//! answers with the re-rendered part of the page. Failures are answered with
//! an error alert.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Form,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::UtcOffset;

use crate::{
    AppState, Error,
    diaria::{
        DiariaId, DiariaStore,
        page::{app_contents, diarias_page, filtered_results},
        summary::Filters,
        view_state::{DeleteOutcome, DiariaForm, InsertOutcome, ViewState},
    },
    timezone::get_local_offset,
};

/// The state needed by the diárias route handlers.
#[derive(Clone)]
pub struct DiariasState {
    /// The record store that persists the diárias.
    pub store: Arc<dyn DiariaStore>,
    /// The state of the page shared across requests.
    pub view_state: Arc<Mutex<ViewState>>,
    /// The monthly allowance.
    pub saldo_mensal: f64,
    /// The canonical name of the timezone to display dates in.
    pub local_timezone: String,
}

impl FromRef<AppState> for DiariasState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            view_state: state.view_state.clone(),
            saldo_mensal: state.display.saldo_mensal,
            local_timezone: state.display.local_timezone.clone(),
        }
    }
}

impl DiariasState {
    fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))
    }

    fn lock_view_state(&self) -> Result<MutexGuard<'_, ViewState>, Error> {
        self.view_state
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire view state lock: {error}"))
            .map_err(|_| Error::StateLockError)
    }

    /// Lock the view state and resolve the local timezone.
    fn prepare(&self) -> Result<(MutexGuard<'_, ViewState>, UtcOffset), Error> {
        let local_offset = self.local_offset()?;
        let view_state = self.lock_view_state()?;

        Ok((view_state, local_offset))
    }

    fn render_app(&self, view_state: &ViewState, local_offset: UtcOffset) -> Response {
        app_contents(view_state, self.saldo_mensal, local_offset).into_response()
    }
}

/// Renders the page shell with a fresh view state.
///
/// The shell requests the records as soon as it is loaded.
pub async fn get_diarias_page(State(state): State<DiariasState>) -> Result<Response, Error> {
    let (mut view_state, local_offset) = state.prepare()?;
    *view_state = ViewState::default();

    Ok(diarias_page(&view_state, state.saldo_mensal, local_offset).into_response())
}

/// A route handler that reloads the records and renders the contents of `#app`.
pub async fn load_diarias_endpoint(State(state): State<DiariasState>) -> Response {
    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response("Erro ao carregar"),
    };

    view_state.load(state.store.as_ref());

    state.render_app(&view_state, local_offset)
}

/// A route handler for creating a diária.
///
/// Responds with `204 No Content` when the name or the value is blank.
pub async fn insert_diaria_endpoint(
    State(state): State<DiariasState>,
    Form(form): Form<DiariaForm>,
) -> Response {
    const CONTEXT: &str = "Erro ao inserir";

    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response(CONTEXT),
    };

    match view_state.insert(state.store.as_ref(), form) {
        Ok(InsertOutcome::Inserted) => state.render_app(&view_state, local_offset),
        Ok(InsertOutcome::Ignored) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_alert_response(CONTEXT),
    }
}

/// The query parameters of a delete request.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    /// Whether the user confirmed the deletion.
    #[serde(default)]
    pub confirmado: bool,
}

/// A route handler for deleting a diária.
///
/// Nothing is deleted unless the request carries `confirmado=true`.
pub async fn delete_diaria_endpoint(
    State(state): State<DiariasState>,
    Path(diaria_id): Path<DiariaId>,
    Query(params): Query<DeleteParams>,
) -> Response {
    const CONTEXT: &str = "Erro ao excluir";

    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response(CONTEXT),
    };

    match view_state.delete(state.store.as_ref(), diaria_id, params.confirmado) {
        Ok(DeleteOutcome::Deleted) => state.render_app(&view_state, local_offset),
        Ok(DeleteOutcome::NotConfirmed) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_alert_response(CONTEXT),
    }
}

/// A route handler that switches the row of a diária into edit mode.
pub async fn begin_edit_endpoint(
    State(state): State<DiariasState>,
    Path(diaria_id): Path<DiariaId>,
) -> Response {
    const CONTEXT: &str = "Erro ao editar";

    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response(CONTEXT),
    };

    match view_state.begin_edit(diaria_id) {
        Ok(()) => state.render_app(&view_state, local_offset),
        Err(error) => error.into_alert_response(CONTEXT),
    }
}

/// A route handler that saves the edited name and value of a diária.
pub async fn save_edit_endpoint(
    State(state): State<DiariasState>,
    Path(diaria_id): Path<DiariaId>,
    Form(form): Form<DiariaForm>,
) -> Response {
    const CONTEXT: &str = "Erro ao atualizar";

    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response(CONTEXT),
    };

    match view_state.save_edit(state.store.as_ref(), diaria_id, form) {
        Ok(()) => state.render_app(&view_state, local_offset),
        Err(error) => {
            tracing::warn!("Could not update diária {diaria_id}: {error}");
            error.into_alert_response(CONTEXT)
        }
    }
}

/// A route handler that leaves edit mode without saving.
pub async fn cancel_edit_endpoint(State(state): State<DiariasState>) -> Response {
    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response("Erro ao cancelar"),
    };

    view_state.cancel_edit();

    state.render_app(&view_state, local_offset)
}

/// A route handler that applies the filters and renders the contents of `#resultados`.
pub async fn set_filters_endpoint(
    State(state): State<DiariasState>,
    Form(filters): Form<Filters>,
) -> Response {
    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response("Erro ao filtrar"),
    };

    view_state.set_filters(filters);

    filtered_results(&view_state, state.saldo_mensal, local_offset).into_response()
}

/// A route handler that clears the filters and renders the contents of `#app`.
pub async fn clear_filters_endpoint(State(state): State<DiariasState>) -> Response {
    let (mut view_state, local_offset) = match state.prepare() {
        Ok(prepared) => prepared,
        Err(error) => return error.into_alert_response("Erro ao limpar filtros"),
    };

    view_state.clear_filters();

    state.render_app(&view_state, local_offset)
}
