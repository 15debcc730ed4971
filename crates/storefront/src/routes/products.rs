//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use stay_young_core::{Category, CategoryRef, Product, Slug, format_rupees};

use crate::error::{AppError, Result};
use crate::layout::{Layout, page_title};
use crate::product_card::ProductCardView;
use crate::state::AppState;

/// Product detail display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub slug: String,
    pub name: String,
    pub sub_name: String,
    pub images: Vec<String>,
    pub price: String,
    pub discounted_price: String,
    pub discount_percentage: u32,
    pub detail_tags: Vec<&'static str>,
    pub in_stock: bool,
    pub stock_available: i64,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            sub_name: product.sub_name.clone(),
            images: product.images.clone(),
            price: format_rupees(product.price),
            discounted_price: format_rupees(product.discounted_price),
            discount_percentage: product.discount_percentage(),
            detail_tags: product.known_detail_tags().map(|tag| tag.label()).collect(),
            in_stock: product.in_stock(),
            stock_available: product.stock_available,
            description: product.description.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub title: String,
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
    pub return_to: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub title: String,
    pub layout: Layout,
    pub product: ProductView,
    pub categories: Vec<String>,
}

/// Display the home page (all products).
#[instrument(skip(state, layout))]
pub async fn home(State(state): State<AppState>, layout: Layout) -> Result<impl IntoResponse> {
    listing(&state, layout, "", "/").await
}

/// Display product listing page.
#[instrument(skip(state, layout))]
pub async fn index(State(state): State<AppState>, layout: Layout) -> Result<impl IntoResponse> {
    listing(&state, layout, "Products", "/products").await
}

async fn listing(
    state: &AppState,
    layout: Layout,
    title: &str,
    path: &str,
) -> Result<ProductsIndexTemplate> {
    let products = state.api().list_products().await?;

    Ok(ProductsIndexTemplate {
        title: page_title(title),
        layout,
        products: products.iter().map(ProductCardView::from).collect(),
        return_to: path.to_string(),
    })
}

/// Display product detail page.
///
/// The page title is the slug itself.
#[instrument(skip(state, layout))]
pub async fn show(
    State(state): State<AppState>,
    layout: Layout,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("product {slug}")))?;
    let product = state.api().get_product_by_slug(slug.as_str()).await?;

    // Bare category ids need the category list for their names
    let listed = if product.category.iter().any(|c| c.name().is_none()) {
        state.api().list_categories().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        })
    } else {
        Vec::new()
    };

    Ok(ProductShowTemplate {
        title: page_title(slug.as_str()),
        layout,
        product: ProductView::from(&product),
        categories: category_labels(&product.category, &listed),
    })
}

/// Names for a product's categories, in product order.
///
/// Ids missing from `listed` are skipped.
fn category_labels(refs: &[CategoryRef], listed: &[Category]) -> Vec<String> {
    refs.iter()
        .filter_map(|r| {
            r.name().map(str::to_owned).or_else(|| {
                listed
                    .iter()
                    .find(|c| &c.id == r.id())
                    .map(|c| c.name.clone())
            })
        })
        .collect()
}
