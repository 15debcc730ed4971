//! Bearer token extractor for admin.
//!
//! The REST API authorizes writes with `Authorization: Bearer {token}`. The
//! token is kept in the `access_token` cookie, set by the login form.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use secrecy::SecretString;

/// Cookie holding the API bearer token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Extractor that requires an API access token.
///
/// If the cookie is missing or empty, redirects to `/admin/login`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(AccessToken(token): AccessToken) -> impl IntoResponse {
///     state.api().delete_product(&token, &id).await
/// }
/// ```
pub struct AccessToken(pub SecretString);

/// Returned when no access token cookie is present.
pub struct AccessTokenRejection;

impl IntoResponse for AccessTokenRejection {
    fn into_response(self) -> Response {
        Redirect::to("/admin/login").into_response()
    }
}

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = AccessTokenRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(Cookie::value)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Self(SecretString::from(token.to_owned())))
            .ok_or(AccessTokenRejection)
    }
}

/// Build the cookie that stores the access token.
#[must_use]
pub fn access_token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Build a removal cookie matching [`access_token_cookie`]'s path.
#[must_use]
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(ACCESS_TOKEN_COOKIE).path("/").build()
}
