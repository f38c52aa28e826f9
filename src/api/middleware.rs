use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tower_cookies::{Cookie, Cookies, Key};

use super::error::ApiError;

pub const SESSION_COOKIE: &str = "shelter_session";

/// Signed-in user id from the signed session cookie, if any.
pub fn session_user(cookies: &Cookies, key: &Key) -> Option<i32> {
    cookies
        .signed(key)
        .get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i32>().ok())
}

pub fn start_session(cookies: &Cookies, key: &Key, user_id: i32) {
    let mut cookie = Cookie::new(SESSION_COOKIE, user_id.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.signed(key).add(cookie);
}

pub fn end_session(cookies: &Cookies, key: &Key) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.signed(key).remove(cookie);
}

/// Guards routes that need an account; puts the user id into extensions.
pub async fn auth_middleware(
    Extension(key): Extension<Key>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&cookies, &key) {
        Some(user_id) => {
            tracing::Span::current().record("user_id", user_id);
            request.extensions_mut().insert(user_id);
            next.run(request).await
        }
        None => ApiError::Unauthorized.into_response(),
    }
}

/// Extractor for pages that work for visitors and signed-in users alike.
pub struct MaybeUser(pub Option<i32>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let user_id = parts
            .extensions
            .get::<Key>()
            .and_then(|key| session_user(&cookies, key));

        if let Some(user_id) = user_id {
            tracing::Span::current().record("user_id", user_id);
        }
        Ok(Self(user_id))
    }
}
