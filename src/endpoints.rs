//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/diarias/{diaria_id}', use [format_endpoint].

/// The root route which serves the diárias page.
pub const ROOT: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to list and create diárias.
pub const DIARIAS_API: &str = "/api/diarias";
/// The route to update or delete a single diária.
pub const DIARIA: &str = "/api/diarias/{diaria_id}";
/// The route to start editing a diária.
pub const EDIT_DIARIA: &str = "/api/diarias/{diaria_id}/edit";
/// The route to stop editing without saving.
pub const CANCEL_EDIT: &str = "/api/diarias/edit/cancel";
/// The route to set or clear the list filters.
pub const FILTERS_API: &str = "/api/filtros";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/diarias/{diaria_id}', '{diaria_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
