//! Product browsing state: incremental pagination and filtering.
//!
//! Browsing runs in exactly one of two modes. `Browsing` accumulates pages
//! behind a 1-based cursor ("load more"); `Filtered` replaces the whole
//! list with the filtered result and suspends pagination. Keeping the mode
//! explicit means a page fetch can never fire while a filter is active,
//! and clearing filters always resets the cursor to 1.

use serde::{Deserialize, Serialize};

use super::catalog::{Category, Product};
use super::id::CategoryId;

/// A selectable price band. Static, single-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Display label.
    pub label: &'static str,
    /// Inclusive `[min, max]` bounds in whole rupees.
    pub bounds: [i64; 2],
}

/// Price bands offered in the filter sidebar.
pub const PRICE_RANGES: &[PriceRange] = &[
    PriceRange {
        label: "Under ₹50,000",
        bounds: [0, 49_999],
    },
    PriceRange {
        label: "₹50,000 to ₹99,999",
        bounds: [50_000, 99_999],
    },
    PriceRange {
        label: "₹1,00,000 to ₹1,99,999",
        bounds: [100_000, 199_999],
    },
    PriceRange {
        label: "₹2,00,000 to ₹4,99,999",
        bounds: [200_000, 499_999],
    },
    PriceRange {
        label: "₹5,00,000 and above",
        bounds: [500_000, 99_999_999],
    },
];

/// The combination of selected category ids and an optional price band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Multi-select category ids.
    pub categories: Vec<CategoryId>,
    /// Single-select price bounds, `[min, max]` inclusive.
    pub price: Option<[i64; 2]>,
}

impl FilterCriteria {
    /// True when neither dimension is selected; empty criteria mean
    /// unfiltered browsing, not "filter matching everything".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.price.is_none()
    }
}

/// Which fetch mode the browse page is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseMode {
    /// Unfiltered incremental loading; `cursor` is the highest page loaded.
    Browsing {
        /// 1-based page index, monotonically incremented by "load more".
        cursor: u32,
    },
    /// Filter results replace the list; pagination is suspended.
    Filtered(FilterCriteria),
}

impl Default for BrowseMode {
    fn default() -> Self {
        Self::Browsing { cursor: 1 }
    }
}

/// Accumulated browse-page state.
///
/// Transitions are pure; fetching is the caller's job. Every mutator takes
/// the already-fetched data, so a failed fetch simply never reaches the
/// state and leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseState {
    /// Products currently shown, in arrival order.
    pub products: Vec<Product>,
    /// Categories for the filter sidebar, fetched once per page lifetime.
    pub categories: Vec<Category>,
    /// Total unfiltered product count reported by the backend.
    pub total: u64,
    /// Current fetch mode.
    pub mode: BrowseMode,
}

impl BrowseState {
    /// Initial mount: categories, total count, and page 1 replace whatever
    /// was there (the list starts empty on a fresh session).
    pub fn start(&mut self, categories: Vec<Category>, total: u64, first_page: Vec<Product>) {
        self.categories = categories;
        self.total = total;
        self.products = first_page;
        self.mode = BrowseMode::Browsing { cursor: 1 };
    }

    /// The page to fetch next, or `None` when "load more" must not fire:
    /// a filter is active, or everything is already loaded.
    #[must_use]
    pub fn next_cursor(&self) -> Option<u32> {
        match self.mode {
            BrowseMode::Browsing { cursor } if self.has_more() => Some(cursor + 1),
            _ => None,
        }
    }

    /// Append a fetched page and advance the cursor.
    pub fn apply_page(&mut self, cursor: u32, page: Vec<Product>) {
        self.products.extend(page);
        self.mode = BrowseMode::Browsing { cursor };
    }

    /// Replace the list with filtered results and suspend pagination.
    pub fn apply_filtered(&mut self, criteria: FilterCriteria, products: Vec<Product>) {
        self.products = products;
        self.mode = BrowseMode::Filtered(criteria);
    }

    /// Leave filtered mode: drop the accumulated list, reset the cursor to
    /// 1, and show the fetched first page. Clearing before replacing is
    /// what prevents duplicate entries after a filter round-trip.
    pub fn reset_to_first_page(&mut self, first_page: Vec<Product>) {
        self.products = first_page;
        self.mode = BrowseMode::Browsing { cursor: 1 };
    }

    /// Whether the "load more" control should be offered.
    #[must_use]
    pub fn has_more(&self) -> bool {
        matches!(self.mode, BrowseMode::Browsing { .. })
            && (self.products.len() as u64) < self.total
    }

    /// Whether a filter is currently active.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        matches!(self.mode, BrowseMode::Filtered(_))
    }
}
