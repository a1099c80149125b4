use axum::response::Response;
use scraper::Html;

async fn response_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse a full page, e.g. from `GET /` or the error pages.
pub(crate) async fn parse_html_document(response: Response) -> Html {
    Html::parse_document(&response_text(response).await)
}

/// Parse an htmx partial such as `#app` contents or an alert.
pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

/// All text nodes of `html` joined together.
pub(crate) fn html_text(html: &Html) -> String {
    html.root_element().text().collect()
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
