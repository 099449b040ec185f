//! Shopping cart: guest persistence, remote gateway, and the state facade.
//!
//! # Architecture
//!
//! - [`GuestCart`] persists an unauthenticated visitor's cart as a JSON array
//!   in durable client storage. Fully synchronous, no network.
//! - [`RemoteCart`] is the authenticated gateway: thin, authenticated REST
//!   calls translated into the local [`CartItem`] shape. It implements
//!   [`CartApi`], the seam the facade (and tests) depend on.
//! - [`sync`] transfers the guest cart into the server cart once, at the
//!   login boundary.
//! - [`CartState`] is the facade the UI holds: it picks the backing store per
//!   auth state and exposes a uniform operation set.

mod guest;
mod remote;
mod state;
pub mod sync;
mod types;

pub use guest::{GUEST_CART_KEY, GuestCart};
pub use remote::{CartApi, CartPayload, LineItemPayload, RemoteCart};
pub use state::{CartBackend, CartState};
pub use types::{CartItem, CartSnapshot, NewCartItem, cart_total};
