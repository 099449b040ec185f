//! Heartwood storefront client core.
//!
//! This crate is the state layer a storefront UI embeds: it owns the cart and
//! wishlist, talks to the remote REST backend, and persists the guest cart in
//! durable local storage. The UI shell (rendering, routing, notifications) is
//! a separate concern layered on top.
//!
//! # Architecture
//!
//! - [`cart::CartState`] is the single source of truth for cart contents. It
//!   selects a guest (local-storage) or authenticated (remote) backing store
//!   once per auth-state change and exposes a uniform operation set.
//! - [`wishlist::WishlistState`] is the authenticated-only favorites list.
//!   There is no guest wishlist and no transfer logic.
//! - [`catalog::Catalog`] is a read-only, cached client for product listings.
//! - The remote gateways sit behind the [`cart::CartApi`] and
//!   [`wishlist::WishlistApi`] traits so the state containers can be driven
//!   against in-memory backends in tests.
//!
//! All containers are created once at the composition root and injected into
//! consuming views; nothing in this crate uses ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod storage;
pub mod wishlist;

pub use error::{Result, StoreError};
pub use identity::Identity;
