//! Classification of transport failures into gateway errors.

use crate::traits::GatewayError;

/// Classify a reqwest error into a [`GatewayError`].
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout(format!("{} ({})", err, url))
    } else if err.is_connect() {
        GatewayError::ConnectionFailed(format!("{}: {}", extract_host_from_url(url), err))
    } else if err.is_decode() {
        GatewayError::InvalidResponse(format!("Failed to decode response: {}", err))
    } else if let Some(status) = err.status() {
        GatewayError::ServerError {
            status: status.as_u16(),
            message: err.to_string(),
        }
    } else {
        GatewayError::Other(err.to_string())
    }
}

/// Classify a non-success HTTP status with its response body.
pub fn classify_status(status: u16, body: String) -> GatewayError {
    match status {
        401 => GatewayError::NotAuthenticated(body),
        _ => GatewayError::ServerError {
            status,
            message: body,
        },
    }
}

/// Extract the host portion from a URL string.
fn extract_host_from_url(url: &str) -> String {
    let url_lower = url.to_lowercase();
    let without_scheme = if url_lower.starts_with("https://") {
        &url[8..]
    } else if url_lower.starts_with("http://") {
        &url[7..]
    } else {
        url
    };

    without_scheme
        .split(&['/', ':'][..])
        .next()
        .unwrap_or(url)
        .to_string()
}
