use reqwest::header::{self, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::redirect::Policy;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;

/// Client for JSON APIs that sees redirects itself instead of letting reqwest follow them.
/// reqwest drops the `Authorization` header when a redirect leaves the original host.
pub fn new_json_api_client() -> anyhow::Result<ClientWithMiddleware> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(Policy::none())
        .build()?;

    Ok(reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .build())
}

/// `Authorization` header value for a bearer token, marked sensitive so it never shows up in
/// debug output of the request.
pub fn bearer_auth(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut auth_value = HeaderValue::from_str(format!("Bearer {}", token).as_str())?;
    auth_value.set_sensitive(true);
    Ok(auth_value)
}
