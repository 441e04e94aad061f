use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
    sea_query::{Expr, NullOrdering},
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieChanges, NewMovie},
};

pub use crate::entities::movie::Model as Movie;

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All movies, lowest rated first. Unrated movies sort before any rated one.
    pub async fn list_all(&self) -> AppResult<Vec<Movie>> {
        let movies = movie::Entity::find()
            .order_by_with_nulls(movie::Column::Rating, Order::Asc, NullOrdering::First)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Movie> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie {id}")))
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<Movie> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title.clone()),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        match model.insert(&self.db).await {
            Ok(movie) => {
                tracing::info!(movie_id = movie.id, title = %movie.title, "movie added");
                Ok(movie)
            },
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::ConstraintViolation(new.title))
            },
            Err(err) => Err(err.into()),
        }
    }

    pub async fn update(&self, id: i32, changes: MovieChanges) -> AppResult<Movie> {
        let movie = self.get(id).await?;
        if changes.is_empty() {
            return Ok(movie);
        }

        let mut active: movie::ActiveModel = movie.into();
        if let Some(rating) = changes.rating {
            active.rating = Set(Some(rating));
        }
        if let Some(review) = changes.review {
            active.review = Set(Some(review));
        }

        let updated = active.update(&self.db).await?;
        tracing::info!(movie_id = id, rating = ?updated.rating, "movie updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("movie {id}")));
        }
        tracing::info!(movie_id = id, "movie deleted");
        Ok(())
    }

    /// Writes the `ranking` column of every given movie in one transaction.
    pub async fn save_rankings(&self, movies: &[Movie]) -> AppResult<()> {
        let txn = self.db.begin().await?;

        for m in movies {
            movie::Entity::update_many()
                .col_expr(movie::Column::Ranking, Expr::value(m.ranking))
                .filter(movie::Column::Id.eq(m.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
