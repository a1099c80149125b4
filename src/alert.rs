//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element of the page
//! shell, usually through the `hx-target-error` attribute of the htmx
//! response-targets extension. They block the page until dismissed.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message to show to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error with a headline and an explanation.
    Error { message: String, details: String },
    /// An error with just a message.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/60"
                role="alertdialog"
                aria-modal="true"
                data-alert="error"
            {
                div class="w-full max-w-md mx-4 p-5 rounded-xl border-2 border-red-700 bg-[#2d0a0a] text-red-100 shadow-lg"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        p class="mt-2 text-sm text-red-300" { (details) }
                    }

                    div class="mt-4 text-right"
                    {
                        button
                            type="button"
                            class="bg-red-700 hover:bg-red-600 text-white font-semibold px-6 py-2 rounded-lg"
                            onclick="this.closest('[data-alert]').remove()"
                        {
                            "OK"
                        }
                    }
                }
            }
        }
    }

    /// Render the alert with `status`.
    ///
    /// htmx only swaps the alert into the page via `hx-target-error` when
    /// `status` is a 4xx or 5xx code.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}
