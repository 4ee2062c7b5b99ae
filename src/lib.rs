//! Butterfly catalogue API.
//!
//! Butterflies and users live in one JSON document (see [`store`]), loaded
//! into memory at startup and flushed back after every mutation. Users rate
//! butterflies from 0 to 5; each user holds at most one rating per butterfly
//! and can list what they rated, best first.

pub mod config;
mod error;
pub mod id;
pub mod logging;
pub mod models;
pub mod ratings;
pub mod seed;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{Config, ConfigError};
pub use error::StoreError;
pub use id::{IdGenerator, UuidGenerator};
pub use models::{Butterfly, NewButterfly, NewUser, RateButterfly, RatedButterfly, Rating, User};
pub use service::{ButterflyService, ServiceError};
pub use store::{Backend, Collection, Document, DocumentStore, FileBackend, MemoryBackend, Model};
pub use validation::{Validate, ValidationError};

#[cfg(feature = "http")]
pub use service::{router, serve, RatingResponse};
