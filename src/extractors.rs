use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Absolute origin of the site as seen by the current request, used to turn
/// post paths into links that work outside the browser (e.g. in email).
#[derive(Debug, Clone)]
pub struct SiteUrl(Url);

impl SiteUrl {
    /// Prefer the configured base URL, then the Host header, then the bind address.
    pub fn resolve(
        base_url: Option<&str>,
        host: Option<&str>,
        fallback_host: &str,
    ) -> Result<Self, AppError> {
        let base = match (base_url, host) {
            (Some(base), _) => base.to_string(),
            (None, Some(host)) => {
                if host.is_empty() || host.contains(['/', '?', '#', '@', ' ']) {
                    return Err(AppError::BadRequest(format!("Invalid Host header: {host}")));
                }
                format!("http://{host}/")
            }
            (None, None) => format!("http://{fallback_host}/"),
        };

        Url::parse(&base)
            .map(SiteUrl)
            .map_err(|e| AppError::BadRequest(format!("Invalid site URL {base}: {e}")))
    }

    pub fn absolute(&self, path: &str) -> Result<String, AppError> {
        self.0
            .join(path)
            .map(String::from)
            .map_err(|e| AppError::Internal(format!("Cannot build URL for {path}: {e}")))
    }
}

impl FromRequestParts<AppState> for SiteUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok());
        let fallback = format!("{}:{}", state.config.server.host, state.config.server.port);

        SiteUrl::resolve(state.config.site.base_url.as_deref(), host, &fallback)
    }
}
