//! Cart route handlers.
//!
//! The cart lives in the session. Mutations redirect back to a page, which
//! renders the toast they queued.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stay_young_core::{Cart, CartError, Slug, Toast};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::layout::{Layout, page_title};
use crate::models::{load_cart, save_cart};
use crate::state::AppState;
use crate::toast;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub slug: String,
    /// Page to return to when the add is rejected.
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub slug: String,
    /// Raw input; parsed in the handler so bad values become a toast.
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub slug: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub title: String,
    pub layout: Layout,
    pub cart: Cart,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(layout, session))]
pub async fn show(layout: Layout, session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;

    Ok(CartShowTemplate {
        title: page_title("Cart"),
        layout,
        cart,
    })
}

/// Add one unit of a product to the cart.
///
/// On success redirects to `/cart` with "Added to cart". If the line is
/// already at the maximum quantity, redirects back with "Max quantity selected".
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let slug = parse_slug(&form.slug)?;
    let product = state.api().get_product_by_slug(slug.as_str()).await?;

    let mut cart = load_cart(&session).await?;
    match cart.add_product(&product) {
        Ok(quantity) => {
            save_cart(&session, &cart).await?;
            toast::push(&session, Toast::success("Added to cart")).await?;
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("slug", slug.as_str()), ("quantity", &quantity.to_string())]),
            );
            Ok(Redirect::to("/cart"))
        }
        Err(e) => {
            toast::push(&session, Toast::error(e.to_string())).await?;
            Ok(Redirect::to(&return_path(form.return_to.as_deref())))
        }
    }
}

/// Set a line's quantity. Zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let Some(quantity) = parse_quantity(&form.quantity) else {
        toast::push(&session, Toast::error(INVALID_QUANTITY)).await?;
        return Ok(Redirect::to("/cart"));
    };

    let mut cart = load_cart(&session).await?;

    match cart.update_quantity(&form.slug, quantity) {
        Ok(()) => save_cart(&session, &cart).await?,
        Err(e) => toast::push(&session, Toast::error(cart_error_message(&e))).await?,
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;

    match cart.remove(&form.slug) {
        Ok(_) => save_cart(&session, &cart).await?,
        Err(e) => toast::push(&session, Toast::error(cart_error_message(&e))).await?,
    }

    Ok(Redirect::to("/cart"))
}

/// Cart count badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

const INVALID_QUANTITY: &str = "Quantity must be a whole number";

/// Whole, non-negative quantities only.
fn parse_quantity(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_slug(raw: &str) -> Result<Slug> {
    Slug::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn cart_error_message(err: &CartError) -> String {
    match err {
        CartError::NotInCart(_) => "Item is no longer in your cart".to_string(),
        other => other.to_string(),
    }
}

/// Only same-site absolute paths are allowed as redirect targets.
fn return_path(raw: Option<&str>) -> String {
    match raw {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
