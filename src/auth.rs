//! Hosted identity provider integration.
//!
//! [`IdentityClient`] speaks the provider's REST surface;
//! [`AuthRepository`] is the domain-level contract the rest of the
//! crate depends on, including the push-based session stream.

mod client;
mod repository;

pub use client::{IdentityClient, IdentityClientBuilder};
pub use repository::{AuthRepository, ProviderAuthRepository, SessionStream};
