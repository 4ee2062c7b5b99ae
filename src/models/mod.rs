//! Entities persisted in the document and the request shapes that create them.

mod butterfly;
mod user;

pub use butterfly::{Butterfly, NewButterfly, RateButterfly, RatedButterfly, Rating};
pub use user::{NewUser, User};

use crate::store::Model;

/// Every collection the service keeps in its document.
pub const COLLECTIONS: [&str; 2] = [Butterfly::COLLECTION, User::COLLECTION];
