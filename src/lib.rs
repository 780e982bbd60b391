//! Rust client library for browsing game storefront deals.
//!
//! This crate provides a typed, layered client for a game-discount
//! listing service and its companion hosted identity provider:
//!
//! - [`client`] and [`auth`] speak the raw REST surfaces,
//! - [`dto`] normalizes the external record shapes into the [`models`]
//!   domain entities,
//! - [`repository`] and [`usecases`] expose provider-agnostic contracts
//!   with the business rules attached,
//! - [`viewmodel`] holds the reactive session and search/listing state
//!   that rendering surfaces subscribe to,
//! - [`context`] wires everything together once at process start.

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod usecases;
pub mod viewmodel;
