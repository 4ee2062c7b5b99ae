//! Service boundary - the operations behind every route.
//!
//! `ButterflyService<B>` owns the document store and the id generator.
//! With the `http` feature, [`router`] and [`serve`] expose it over axum.

mod butterfly_service;
mod error;
#[cfg(feature = "http")]
mod http;

pub use butterfly_service::ButterflyService;
pub use error::ServiceError;
#[cfg(feature = "http")]
pub use http::{router, serve, RatingResponse};
