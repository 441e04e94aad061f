use crate::{
    error::AppResult,
    store::{Movie, MovieStore},
};

/// Ranks movies already sorted by ascending rating: the best rated movie gets
/// `n`, the worst (or an unrated one) gets `1`.
pub fn assign_rankings(movies: &mut [Movie]) {
    for (i, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(i as i32 + 1);
    }
}

/// Recomputes and persists the ranking of every stored movie.
///
/// Returns the movies best first, ready for the list view.
pub async fn rerank(store: &MovieStore) -> AppResult<Vec<Movie>> {
    let mut movies = store.list_all().await?;
    assign_rankings(&mut movies);
    store.save_rankings(&movies).await?;

    tracing::debug!(count = movies.len(), "rankings recomputed");

    movies.reverse();
    Ok(movies)
}
