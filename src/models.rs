//! Domain models for game deals, stores, and user sessions.
//!
//! These entities are provider-agnostic: no REST field spelling or
//! identity-provider vocabulary leaks into them. Raw external shapes
//! live in [`crate::dto`] and are normalized into these types.

mod deal;
mod ids;
mod store;
mod user;

pub use deal::Deal;
pub use ids::{DealId, GameId, StoreId, UserId};
pub use store::Store;
pub use user::User;
