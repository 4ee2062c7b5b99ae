//! ButterflyService - every operation the API exposes, over one document store.
//!
//! Handlers never touch the store or its file directly; they go through this
//! type, which owns the [`DocumentStore`] and the [`IdGenerator`].

use tracing::{debug, info, warn};

use super::error::ServiceError;
use crate::error::StoreError;
use crate::id::{IdGenerator, UuidGenerator};
use crate::models::{
    Butterfly, NewButterfly, NewUser, RateButterfly, RatedButterfly, Rating, User, COLLECTIONS,
};
use crate::ratings::{apply_rating, rank_for_user};
use crate::store::{Backend, DocumentStore, Model};
use crate::validation::Validate;

pub struct ButterflyService<B> {
    store: DocumentStore<B>,
    ids: Box<dyn IdGenerator>,
}

impl<B: Backend> ButterflyService<B> {
    /// Open the store on this backend with random ids.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        Ok(Self::new(DocumentStore::open(backend, &COLLECTIONS)?))
    }

    pub fn new(store: DocumentStore<B>) -> Self {
        Self {
            store,
            ids: Box::new(UuidGenerator),
        }
    }

    /// Replace the id generator.
    ///
    /// Uses builder pattern, returns `self` for chaining.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Access the underlying store.
    pub fn store(&self) -> &DocumentStore<B> {
        &self.store
    }

    pub fn get_butterfly(&self, id: &str) -> Result<Butterfly, ServiceError> {
        self.store
            .collection::<Butterfly>()
            .find_by_id(id)?
            .ok_or_else(|| not_found::<Butterfly>(id))
    }

    pub fn create_butterfly(&self, input: NewButterfly) -> Result<Butterfly, ServiceError> {
        input.validate()?;
        let butterfly = Butterfly::new(self.ids.generate(), input);
        self.store.collection::<Butterfly>().append(&butterfly)?;

        info!(id = %butterfly.id, common_name = %butterfly.common_name, "butterfly created");
        Ok(butterfly)
    }

    pub fn get_user(&self, id: &str) -> Result<User, ServiceError> {
        self.store
            .collection::<User>()
            .find_by_id(id)?
            .ok_or_else(|| not_found::<User>(id))
    }

    pub fn create_user(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        let user = User::new(self.ids.generate(), input);
        self.store.collection::<User>().append(&user)?;

        info!(id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Insert or overwrite one user's rating of a butterfly.
    ///
    /// Returns only the applied rating, never other users' entries. The user
    /// is not required to exist.
    pub fn rate_butterfly(
        &self,
        butterfly_id: &str,
        input: RateButterfly,
    ) -> Result<Rating, ServiceError> {
        if let Err(err) = input.validate() {
            warn!(butterfly_id, error = %err, "rating rejected");
            return Err(err.into());
        }

        let rating = Rating::from(input);
        let applied = self
            .store
            .collection::<Butterfly>()
            .update(butterfly_id, |butterfly| apply_rating(butterfly, rating))?;

        debug!(butterfly_id, user_id = %applied.user_id, rating = applied.rating, "rating applied");
        Ok(applied)
    }

    /// Butterflies rated by this user, highest first. Empty if none.
    pub fn rated_butterflies(&self, user_id: &str) -> Result<Vec<RatedButterfly>, ServiceError> {
        let butterflies = self.store.collection::<Butterfly>().all()?;
        Ok(rank_for_user(&butterflies, user_id))
    }
}

fn not_found<M: Model>(id: &str) -> ServiceError {
    ServiceError::NotFound {
        collection: M::COLLECTION.to_string(),
        id: id.to_string(),
    }
}
