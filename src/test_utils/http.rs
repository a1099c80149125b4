use axum::{
    http::{HeaderName, header::CONTENT_TYPE},
    response::Response,
};
use axum_htmx::HX_REDIRECT;

#[track_caller]
fn header_value<'a>(response: &'a Response, name: &HeaderName) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("response has no {name} header"))
        .to_str()
        .unwrap_or_else(|error| panic!("{name} header is not valid text: {error}"))
}

/// Maud pages and partials are sent as `text/html; charset=utf-8`.
#[track_caller]
pub(crate) fn assert_content_type(response: &Response, content_type: &str) {
    assert_eq!(header_value(response, &CONTENT_TYPE), content_type);
}

/// htmx follows `HX-Redirect` with a full page load.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response, endpoint: &str) {
    assert_eq!(header_value(response, &HX_REDIRECT), endpoint);
}
