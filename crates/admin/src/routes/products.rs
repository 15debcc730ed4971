//! Product management route handlers.
//!
//! The product form serves both create and edit. Validation failures and API
//! errors re-render the submitted form; nothing the admin typed is lost.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stay_young_core::{
    Category, DetailTag, FieldErrors, Product, ProductFormInput, ProductId, Toast, format_rupees,
};

use crate::components::InputField;
use crate::error::Result;
use crate::middleware::AccessToken;
use crate::state::AppState;
use crate::toast;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(index).post(create))
        .route("/admin/products/new", get(new_product))
        .route("/admin/products/preview", post(preview))
        .route("/admin/products/{id}", post(update))
        .route("/admin/products/{id}/edit", get(edit))
        .route("/admin/products/{id}/delete", post(delete))
}

// =============================================================================
// Views
// =============================================================================

/// Product row for the products table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub sub_name: String,
    pub image: Option<String>,
    pub price: String,
    pub discounted_price: String,
    pub stock_available: i64,
}

impl ProductRow {
    #[must_use]
    pub fn edit_href(&self) -> String {
        format!("/admin/products/{}/edit", self.id)
    }

    #[must_use]
    pub fn delete_action(&self) -> String {
        format!("/admin/products/{}/delete", self.id)
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            sub_name: product.sub_name.clone(),
            image: product.primary_image().map(str::to_owned),
            price: format_rupees(product.price),
            discounted_price: format_rupees(product.discounted_price),
            stock_available: product.stock_available,
        }
    }
}

/// A checkbox in the category or detail tag group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Whether the form adds a new product or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(ProductId),
}

impl FormMode {
    fn from_query(id: Option<String>) -> Self {
        id.filter(|id| !id.trim().is_empty())
            .map_or(Self::Create, |id| Self::Update(ProductId::new(id)))
    }

    const fn verb(&self) -> &'static str {
        match self {
            Self::Create => "add",
            Self::Update(_) => "update",
        }
    }

    /// Submit button label.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self {
            Self::Create => "Launch Product",
            Self::Update(_) => "Update Product",
        }
    }

    /// Where the form posts.
    #[must_use]
    pub fn action(&self) -> String {
        match self {
            Self::Create => "/admin/products".to_string(),
            Self::Update(id) => format!("/admin/products/{id}"),
        }
    }

    /// Where the preview button posts, keeping the mode.
    #[must_use]
    pub fn preview_action(&self) -> String {
        match self {
            Self::Create => "/admin/products/preview".to_string(),
            Self::Update(id) => format!("/admin/products/preview?id={id}"),
        }
    }

    /// Intro line under the form heading.
    #[must_use]
    pub fn intro(&self) -> String {
        format!(
            "Enter the details of the product to {} it to stay young's collection.",
            self.verb()
        )
    }
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub toasts: Vec<Toast>,
    pub products: Vec<ProductRow>,
}

/// Product create/edit form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub toasts: Vec<Toast>,
    pub intro: String,
    pub submit_label: &'static str,
    pub action: String,
    pub preview_action: String,
    pub text_fields: Vec<InputField>,
    pub categories: Vec<CheckboxOption>,
    pub category_error: Option<String>,
    pub detail_tags: Vec<CheckboxOption>,
    pub image_fields: Vec<InputField>,
    pub number_fields: Vec<InputField>,
    pub description: String,
    pub description_error: Option<String>,
}

impl ProductFormTemplate {
    /// Build the form view from the current input and its errors.
    #[must_use]
    pub fn new(
        mode: &FormMode,
        input: &ProductFormInput,
        errors: &FieldErrors,
        categories: &[Category],
        toasts: Vec<Toast>,
    ) -> Self {
        let categories = categories
            .iter()
            .map(|category| CheckboxOption {
                value: category.id.to_string(),
                label: category.name.clone(),
                checked: input.has_category(category.id.as_str()),
            })
            .collect();
        let detail_tags = DetailTag::ALL
            .into_iter()
            .map(|tag| CheckboxOption {
                value: tag.value().to_owned(),
                label: tag.label().to_owned(),
                checked: input.has_detail_tag(tag.value()),
            })
            .collect();

        Self {
            toasts,
            intro: mode.intro(),
            submit_label: mode.submit_label(),
            action: mode.action(),
            preview_action: mode.preview_action(),
            text_fields: InputField::text_fields(input, errors),
            categories,
            category_error: errors.get("category").map(str::to_owned),
            detail_tags,
            image_fields: InputField::image_fields(input, errors),
            number_fields: InputField::number_fields(input, errors),
            description: input.description.clone(),
            description_error: errors.get("description").map(str::to_owned),
        }
    }
}

/// Query for the preview route.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /admin/products
#[instrument(skip_all)]
pub async fn index(
    _token: AccessToken,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let mut toasts = toast::take(&session).await;

    let products = match state.api().list_products().await {
        Ok(products) => products.iter().map(ProductRow::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            toasts.push(Toast::error(e.user_message()));
            Vec::new()
        }
    };

    let template = ProductsIndexTemplate { toasts, products };
    Ok(Html(template.render()?))
}

/// GET /admin/products/new
#[instrument(skip_all)]
pub async fn new_product(
    _token: AccessToken,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>> {
    let toasts = toast::take(&session).await;
    render_form(
        &state,
        &FormMode::Create,
        &ProductFormInput::default(),
        &FieldErrors::default(),
        toasts,
    )
    .await
}

/// POST /admin/products
///
/// On success the form is reset so the next product can be entered.
#[instrument(skip_all)]
pub async fn create(
    AccessToken(token): AccessToken,
    State(state): State<AppState>,
    Form(input): Form<ProductFormInput>,
) -> Result<Response> {
    let mode = FormMode::Create;
    let draft = match input.validate_draft() {
        Ok(draft) => draft,
        Err(errors) => return invalid_form(&state, &mode, &input, &errors).await,
    };

    match state.api().create_product(&token, &draft).await {
        Ok(()) => {
            tracing::info!(name = %draft.name, "Product created");
            let html = render_form(
                &state,
                &mode,
                &ProductFormInput::default(),
                &FieldErrors::default(),
                vec![Toast::success("Product Added Successfully")],
            )
            .await?;
            Ok(html.into_response())
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            let html = render_form(
                &state,
                &mode,
                &input,
                &FieldErrors::default(),
                vec![Toast::error(e.user_message())],
            )
            .await?;
            Ok(html.into_response())
        }
    }
}

/// GET /admin/products/{id}/edit
#[instrument(skip_all)]
pub async fn edit(
    _token: AccessToken,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let id = ProductId::new(id);
    let product = state.api().get_product(&id).await?;
    let toasts = toast::take(&session).await;

    render_form(
        &state,
        &FormMode::Update(id),
        &ProductFormInput::from_product(&product),
        &FieldErrors::default(),
        toasts,
    )
    .await
}

/// POST /admin/products/{id}
#[instrument(skip_all)]
pub async fn update(
    AccessToken(token): AccessToken,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(input): Form<ProductFormInput>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let mode = FormMode::Update(id.clone());
    let draft = match input.validate_draft() {
        Ok(draft) => draft,
        Err(errors) => return invalid_form(&state, &mode, &input, &errors).await,
    };

    match state.api().update_product(&token, &id, &draft).await {
        Ok(()) => {
            tracing::info!(id = %id, "Product updated");
            toast::push(&session, Toast::success("Product Updated Successfully")).await?;
            Ok(Redirect::to("/admin/products").into_response())
        }
        Err(e) => {
            tracing::error!("Failed to update product {id}: {e}");
            let html = render_form(
                &state,
                &mode,
                &input,
                &FieldErrors::default(),
                vec![Toast::error(e.user_message())],
            )
            .await?;
            Ok(html.into_response())
        }
    }
}

/// POST /admin/products/{id}/delete
#[instrument(skip_all)]
pub async fn delete(
    AccessToken(token): AccessToken,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);

    let toast = match state.api().delete_product(&token, &id).await {
        Ok(()) => {
            tracing::info!(id = %id, "Product deleted");
            Toast::success("Product Deleted Successfully")
        }
        Err(e) => {
            tracing::error!("Failed to delete product {id}: {e}");
            Toast::error(e.user_message())
        }
    };
    toast::push(&session, toast).await?;

    Ok(Redirect::to("/admin/products"))
}

/// POST /admin/products/preview
///
/// Re-renders the submitted form with image previews without saving.
#[instrument(skip_all)]
pub async fn preview(
    _token: AccessToken,
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
    Form(input): Form<ProductFormInput>,
) -> Result<Html<String>> {
    render_form(
        &state,
        &FormMode::from_query(query.id),
        &input,
        &FieldErrors::default(),
        Vec::new(),
    )
    .await
}

// =============================================================================
// Helpers
// =============================================================================

/// Render the form, fetching the category options.
///
/// A category fetch failure still renders the form, with an error toast.
async fn render_form(
    state: &AppState,
    mode: &FormMode,
    input: &ProductFormInput,
    errors: &FieldErrors,
    mut toasts: Vec<Toast>,
) -> Result<Html<String>> {
    let categories = match state.api().list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            toasts.push(Toast::error(e.user_message()));
            Vec::new()
        }
    };

    let template = ProductFormTemplate::new(mode, input, errors, &categories, toasts);
    Ok(Html(template.render()?))
}

async fn invalid_form(
    state: &AppState,
    mode: &FormMode,
    input: &ProductFormInput,
    errors: &FieldErrors,
) -> Result<Response> {
    tracing::debug!(fields = errors.len(), "Product form failed validation");
    let html = render_form(state, mode, input, errors, Vec::new()).await?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
}
