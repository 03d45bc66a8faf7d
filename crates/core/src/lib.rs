//! GearHouse Core - Shared types library.
//!
//! This crate provides the domain types used by the GearHouse storefront:
//! the cart, catalog entities, money, and the browse-mode state machine.
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, rupee amounts, catalog entities, cart
//!   operations, and browse state transitions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
