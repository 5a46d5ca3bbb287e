use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::Redirect,
};

use crate::auth::repo::User;
use crate::auth::session::SESSION_COOKIE;
use crate::state::AppState;

/// The access-control gate: resolves the session cookie to an authenticated
/// identity. Every task route takes this extractor; a request without a live
/// session is redirected to the login form and never reaches the handler.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_cookie(&parts.headers).ok_or_else(|| Redirect::to("/login"))?;
        let user = state
            .sessions
            .get(&token)
            .await
            .ok_or_else(|| Redirect::to("/login"))?;
        Ok(CurrentUser(user))
    }
}

/// Pull the session token out of the Cookie header, if any.
pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|kv| kv.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn finds_the_session_cookie_among_others() {
        let headers = headers_with_cookie("theme=dark; sid=abc123; lang=en");
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert!(session_cookie(&HeaderMap::new()).is_none());
    }

    #[test]
    fn other_cookies_do_not_match() {
        let headers = headers_with_cookie("sidecar=xyz; theme=dark");
        assert!(session_cookie(&headers).is_none());
    }
}
