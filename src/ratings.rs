//! Per-user butterfly ratings: upsert on one butterfly, ranked view per user.

use crate::models::{Butterfly, RatedButterfly, Rating};

/// Insert or overwrite `rating.user_id`'s rating on this butterfly.
///
/// An existing entry keeps its position; a new one goes to the end.
pub fn apply_rating(butterfly: &mut Butterfly, rating: Rating) -> Rating {
    match butterfly
        .ratings
        .iter()
        .position(|entry| entry.user_id == rating.user_id)
    {
        Some(index) => butterfly.ratings[index].rating = rating.rating,
        None => butterfly.ratings.push(rating.clone()),
    }
    rating
}

/// Every butterfly this user rated, highest rating first.
///
/// Equal ratings keep collection order.
pub fn rank_for_user(butterflies: &[Butterfly], user_id: &str) -> Vec<RatedButterfly> {
    let mut rated: Vec<RatedButterfly> = butterflies
        .iter()
        .filter_map(|butterfly| {
            butterfly.rating_by(user_id).map(|rating| RatedButterfly {
                id: butterfly.id.clone(),
                common_name: butterfly.common_name.clone(),
                rating,
            })
        })
        .collect();

    rated.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    rated
}
