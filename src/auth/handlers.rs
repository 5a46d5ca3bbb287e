use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        extractors::session_cookie,
        password::{hash_password, verify_password},
        repo::User,
        session::{generate_token, SESSION_COOKIE},
    },
    error::AppError,
    state::AppState,
    views,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login", post(login))
        .route("/register", get(register_page))
        .route("/register", post(register))
        .route("/logout", get(logout))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn set_session_cookie(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // Token is hex, so the value is always a valid header.
    let value = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&value).expect("hex token"));
    headers
}

fn clear_session_cookie() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    headers.insert(header::SET_COOKIE, HeaderValue::from_str(&value).expect("static value"));
    headers
}

pub async fn login_page() -> Html<String> {
    Html(views::render_login(None))
}

pub async fn register_page() -> Html<String> {
    Html(views::render_register(None))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(mut form): Form<LoginForm>,
) -> Result<Response, AppError> {
    form.email = form.email.trim().to_string();

    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "login with malformed email");
        return Err(AppError::NotFound);
    }

    let user = match User::find_by_email(&state.db, &form.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %form.email, "login unknown email");
            return Err(AppError::NotFound);
        }
    };

    let ok = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::Hash(e.to_string()))?;
    if !ok {
        warn!(email = %form.email, user_id = %user.id, "login invalid password");
        return Err(AppError::BadCredential);
    }

    let token = generate_token();
    state.sessions.insert(&token, user.clone()).await;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((set_session_cookie(&token), Redirect::to("/")).into_response())
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    form.name = form.name.trim().to_string();
    form.email = form.email.trim().to_string();

    if form.name.is_empty() {
        return Ok(Html(views::render_register(Some("Name is required."))).into_response());
    }
    if !is_valid_email(&form.email) {
        warn!(email = %form.email, "invalid email");
        return Ok(Html(views::render_register(Some("Invalid email address."))).into_response());
    }
    if form.password.len() < 8 {
        warn!("password too short");
        return Ok(Html(views::render_register(Some(
            "Password must be at least 8 characters.",
        )))
        .into_response());
    }

    // Existence check before insert. The two statements are not atomic; a
    // concurrent registration of the same email can slip between them.
    if User::find_by_email(&state.db, &form.email).await?.is_some() {
        warn!(email = %form.email, "email already registered");
        return Err(AppError::AlreadyExists);
    }

    let hash = hash_password(&form.password).map_err(|e| AppError::Hash(e.to_string()))?;
    let user = User::create(&state.db, &form.name, &form.email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    // Registration does not log the user in; they go through /login.
    Ok(Redirect::to("/login").into_response())
}

#[instrument(skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_cookie(&headers) {
        state.sessions.remove(&token).await;
        info!("session destroyed");
    }
    (clear_session_cookie(), Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn session_cookie_headers_are_well_formed() {
        let headers = set_session_cookie("deadbeef");
        let value = headers[header::SET_COOKIE].to_str().unwrap();
        assert!(value.starts_with("sid=deadbeef;"));
        assert!(value.contains("HttpOnly"));

        let cleared = clear_session_cookie();
        let value = cleared[header::SET_COOKIE].to_str().unwrap();
        assert!(value.contains("Max-Age=0"));
    }
}
