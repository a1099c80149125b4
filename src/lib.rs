//! Controle de Diárias is a web app for tracking a fixed monthly allowance
//! ("diárias") spent across the personnel of a unit.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod diaria;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;

pub use app_state::{AppState, DisplayConfig};
pub use db::initialize as initialize_db;
pub use diaria::{
    Diaria, DiariaId, DiariaStore, MilitarNome, SQLiteDiariaStore, StoreError,
    DEFAULT_SALDO_MENSAL,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

use crate::{
    alert::Alert,
    internal_server_error::{InternalServerError, get_internal_server_error_redirect},
    not_found::NotFound,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The record store failed to carry out a request.
    ///
    /// The message of the inner error is shown verbatim to the user.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The value typed into a form could not be parsed as a decimal number.
    #[error("valor inválido: \"{0}\"")]
    InvalidValor(String),

    /// The requested diária is not in the current list of records.
    ///
    /// For HTTP request handlers, the client should refresh the page since
    /// the record may have been deleted in the meantime.
    #[error("a diária não foi encontrada")]
    NotFound,

    /// Could not acquire the lock on the shared view state.
    #[error("could not acquire the view state lock")]
    StateLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFound.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Não foi possível obter o fuso horário \"{timezone}\". Verifique a \
                    configuração do servidor e use um nome canônico, por exemplo \
                    \"America/Sao_Paulo\"."
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for htmx requests.
    ///
    /// `context` describes the failed action, e.g. "Erro ao inserir". The
    /// alert reads "`context`: `error message`".
    fn into_alert_response(self, context: &str) -> Response {
        let status = match &self {
            Error::InvalidValor(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => {
                return Alert::Error {
                    message: format!("{context}: {self}"),
                    details: "Atualize a página para ver a lista mais recente.".to_owned(),
                }
                .into_response_with_status(StatusCode::NOT_FOUND);
            }
            Error::Store(StoreError::UpdateMissing(_) | StoreError::DeleteMissing(_)) => {
                StatusCode::NOT_FOUND
            }
            Error::StateLockError => {
                tracing::error!("{context}: {self}");
                return get_internal_server_error_redirect();
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Alert::ErrorSimple {
            message: format!("{context}: {self}"),
        }
        .into_response_with_status(status)
    }
}

#[cfg(test)]
mod alert_response_tests {
    use axum::http::StatusCode;

    use crate::{
        Error, StoreError, endpoints,
        test_utils::{assert_hx_redirect, assert_valid_html, html_text, parse_html_fragment},
    };

    #[tokio::test]
    async fn alert_contains_context_and_raw_message() {
        let response = Error::Store(StoreError::DeleteMissing(7)).into_alert_response("Erro ao excluir");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html_text(&html);
        assert!(
            text.contains(&format!("Erro ao excluir: {}", StoreError::DeleteMissing(7))),
            "alert text {text:?} does not contain the raw error message"
        );
    }

    #[tokio::test]
    async fn invalid_value_is_a_bad_request() {
        let response = Error::InvalidValor("abc".to_owned()).into_alert_response("Erro ao inserir");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_record_asks_for_refresh() {
        let response = Error::NotFound.into_alert_response("Erro ao editar");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let text = html_text(&html);
        assert!(text.contains("Erro ao editar: a diária não foi encontrada"));
        assert!(text.contains("Atualize a página"));
    }

    #[test]
    fn lock_error_redirects_to_error_page() {
        let response = Error::StateLockError.into_alert_response("Erro ao inserir");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_hx_redirect(&response, endpoints::INTERNAL_ERROR_VIEW);
    }
}
