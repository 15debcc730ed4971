//! Access token login and logout.
//!
//! There are no admin accounts here. The REST API issues the bearer token;
//! the login form only stores it in the `access_token` cookie.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tower_sessions::Session;

use stay_young_core::Toast;

use crate::error::Result;
use crate::middleware::{access_token_cookie, removal_cookie};
use crate::state::AppState;
use crate::toast;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub toasts: Vec<Toast>,
    pub error: Option<String>,
}

/// Build the login router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", post(logout))
}

/// GET /admin/login
async fn login_page(session: Session) -> Result<Html<String>> {
    let template = LoginTemplate {
        toasts: toast::take(&session).await,
        error: None,
    };
    Ok(Html(template.render()?))
}

/// POST /admin/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let token = form.token.trim();
    if token.is_empty() {
        let template = LoginTemplate {
            toasts: Vec::new(),
            error: Some("Access token is required".to_string()),
        };
        return Ok(Html(template.render()?).into_response());
    }

    let jar = jar.add(access_token_cookie(
        token.to_owned(),
        state.config().is_secure(),
    ));
    toast::push(&session, Toast::success("Signed in")).await?;
    tracing::info!("Admin access token stored");

    Ok((jar, Redirect::to("/admin/products")).into_response())
}

/// POST /admin/logout
async fn logout(session: Session, jar: CookieJar) -> Result<impl IntoResponse> {
    toast::push(&session, Toast::success("Signed out")).await?;
    Ok((jar.remove(removal_cookie()), Redirect::to("/admin/login")))
}
