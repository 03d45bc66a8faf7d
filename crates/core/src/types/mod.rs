//! Core types for GearHouse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod id;
pub mod money;

pub use browse::{BrowseMode, BrowseState, FilterCriteria, PriceRange, PRICE_RANGES};
pub use cart::{Cart, CartItem};
pub use catalog::{Category, Product};
pub use id::*;
pub use money::Rupees;
