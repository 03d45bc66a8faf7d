//! Browse page route handlers.
//!
//! The product grid updates through HTMX fragments: "load more" appends
//! the next page, filter changes replace the grid. The accumulated state
//! lives in the session (see `store::BrowseStore`); handlers load it,
//! apply one transition, and write it back, so a fetch failure simply
//! leaves the previous state on screen.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{RawForm, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use gearhouse_core::{BrowseState, Category, FilterCriteria, PRICE_RANGES, Product};

use crate::filters;
use crate::state::AppState;
use crate::store::BrowseStore;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price_or_zero().display(),
        }
    }
}

/// Category checkbox display data.
#[derive(Clone)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
        }
    }
}

/// Price radio display data.
#[derive(Clone)]
pub struct PriceRangeView {
    pub index: usize,
    pub label: &'static str,
}

/// Browse page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryView>,
    pub price_ranges: Vec<PriceRangeView>,
    pub has_more: bool,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductCardView>,
    pub has_more: bool,
}

fn grid(state: &BrowseState) -> ProductGridTemplate {
    ProductGridTemplate {
        products: state.products.iter().map(ProductCardView::from).collect(),
        has_more: state.has_more(),
    }
}

fn price_range_views() -> Vec<PriceRangeView> {
    PRICE_RANGES
        .iter()
        .enumerate()
        .map(|(index, range)| PriceRangeView {
            index,
            label: range.label,
        })
        .collect()
}

/// Display the browse page.
///
/// A full page load is a fresh mount: categories, total count, and page 1
/// replace whatever the session held. Failed fetches degrade to an empty
/// section rather than an error page.
#[instrument(skip(app, session))]
pub async fn home(State(app): State<AppState>, session: Session) -> impl IntoResponse {
    let catalog = app.catalog();

    let categories = match catalog.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        }
    };

    let total = match catalog.product_count().await {
        Ok(total) => total,
        Err(e) => {
            tracing::warn!("Failed to fetch product count: {e}");
            0
        }
    };

    let first_page = match catalog.product_page(1).await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Failed to fetch first product page: {e}");
            Vec::new()
        }
    };

    let mut state = BrowseState::default();
    state.start(categories, total, first_page);

    if let Err(e) = BrowseStore::new(&session).save(&state).await {
        tracing::error!("Failed to save browse state: {e}");
    }

    HomeTemplate {
        products: state.products.iter().map(ProductCardView::from).collect(),
        categories: state.categories.iter().map(CategoryView::from).collect(),
        price_ranges: price_range_views(),
        has_more: state.has_more(),
    }
}

/// Load the next product page and append it (HTMX).
///
/// Does nothing while a filter is active or everything is loaded; the
/// fetch only fires with a valid next cursor.
#[instrument(skip(app, session))]
pub async fn load_more(State(app): State<AppState>, session: Session) -> impl IntoResponse {
    let store = BrowseStore::new(&session);
    let mut state = store.load().await;

    if let Some(cursor) = state.next_cursor() {
        match app.catalog().product_page(cursor).await {
            Ok(page) => {
                state.apply_page(cursor, page);
                if let Err(e) = store.save(&state).await {
                    tracing::error!("Failed to save browse state: {e}");
                }
            }
            Err(e) => {
                // Prior state stays on screen; the button remains for a retry.
                tracing::warn!("Failed to fetch page {cursor}: {e}");
            }
        }
    }

    grid(&state)
}

/// Parse the filter form: repeated `category` keys and an optional `price`
/// radio index into the static price ranges.
fn parse_filter_form(body: &[u8]) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "category" => criteria.categories.push(value.as_ref().into()),
            "price" => {
                criteria.price = value
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| PRICE_RANGES.get(index))
                    .map(|range| range.bounds);
            }
            _ => {}
        }
    }
    criteria
}

/// Apply filter criteria and replace the grid (HTMX).
///
/// Empty criteria fall back to unfiltered browsing: the accumulated list
/// is dropped and page 1 refetched, so nothing shows up twice.
#[instrument(skip(app, session, form))]
pub async fn filter(
    State(app): State<AppState>,
    session: Session,
    RawForm(form): RawForm,
) -> impl IntoResponse {
    let criteria = parse_filter_form(&form);
    let store = BrowseStore::new(&session);
    let mut state = store.load().await;

    if criteria.is_empty() {
        match app.catalog().product_page(1).await {
            Ok(first_page) => {
                state.reset_to_first_page(first_page);
                if let Err(e) = store.save(&state).await {
                    tracing::error!("Failed to save browse state: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("Failed to refetch first page: {e}");
            }
        }
    } else {
        match app.catalog().filtered_products(&criteria).await {
            Ok(products) => {
                state.apply_filtered(criteria, products);
                if let Err(e) = store.save(&state).await {
                    tracing::error!("Failed to save browse state: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("Failed to fetch filtered products: {e}");
            }
        }
    }

    grid(&state)
}

/// Clear all filters and return to the unfiltered first page (HTMX).
#[instrument(skip(app, session))]
pub async fn reset(State(app): State<AppState>, session: Session) -> impl IntoResponse {
    let store = BrowseStore::new(&session);
    let mut state = store.load().await;

    match app.catalog().product_page(1).await {
        Ok(first_page) => {
            state.reset_to_first_page(first_page);
            if let Err(e) = store.save(&state).await {
                tracing::error!("Failed to save browse state: {e}");
            }
        }
        Err(e) => {
            tracing::warn!("Failed to refetch first page: {e}");
        }
    }

    grid(&state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_form_multi_category() {
        let criteria = parse_filter_form(b"category=cat-1&category=cat-2");
        assert_eq!(criteria.categories.len(), 2);
        assert!(criteria.price.is_none());
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_parse_filter_form_price_index() {
        let criteria = parse_filter_form(b"price=0");
        assert_eq!(criteria.price, Some([0, 49_999]));
    }

    #[test]
    fn test_parse_filter_form_out_of_range_price_ignored() {
        let criteria = parse_filter_form(b"price=99");
        assert!(criteria.price.is_none());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_parse_filter_form_empty() {
        let criteria = parse_filter_form(b"");
        assert!(criteria.is_empty());
    }
}
