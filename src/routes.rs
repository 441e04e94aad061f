use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    forms::{AddForm, EditForm},
    models::{MovieChanges, NewMovie},
    ranking, templates,
};

/// `?id=` as sent by links and browsers. Blank counts as absent; anything
/// that is not a number names no movie.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

impl IdQuery {
    fn value(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    fn require(&self) -> AppResult<i32> {
        let raw = self.value().ok_or_else(|| AppError::NotFound("movie id".into()))?;
        raw.parse().map_err(|_| AppError::NotFound(format!("movie {raw}")))
    }
}

pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = ranking::rerank(&state.store).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn edit_page(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let movie = state.store.get(q.require()?).await?;
    let (jar, token) = csrf::issue(jar);
    Ok((jar, Html(templates::edit_page(&movie, &token, None, None))).into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    csrf::verify(&jar, &form.csrf_token)?;
    let movie = state.store.get(q.require()?).await?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(err) if err.is_form_error() => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::edit_page(&movie, &token, Some(&form), Some(&err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response());
        },
        Err(err) => return Err(err),
    };

    state
        .store
        .update(
            movie.id,
            MovieChanges { rating: Some(input.rating), review: Some(input.review) },
        )
        .await?;

    Ok(Redirect::to("/").into_response())
}

pub async fn add_page(jar: SignedCookieJar) -> Response {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&token, "", None))).into_response()
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    csrf::verify(&jar, &form.csrf_token)?;

    let title = match form.validate() {
        Ok(title) => title,
        Err(err) if err.is_form_error() => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::add_page(&token, &form.title, Some(&err.to_string()));
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response());
        },
        Err(err) => return Err(err),
    };

    let candidates = state.tmdb.search(&title).await?;
    let body = templates::select_page(&title, &candidates, &state.config.tmdb_image_base_url);
    Ok(Html(body).into_response())
}

/// Adds the movie picked on the selection page, then sends the user on to rate it.
/// Without an id there is nothing to add and the list is shown instead.
pub async fn find(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> AppResult<Response> {
    if q.value().is_none() {
        return Ok(home(State(state)).await?.into_response());
    }
    let tmdb_id = q.require()?;

    let details = state.tmdb.fetch_details(tmdb_id).await?;
    let img_url = state.tmdb.poster_url(details.poster_path.as_deref());
    let movie = state.store.insert(NewMovie::from_details(details, img_url)).await?;

    tracing::debug!(tmdb_id = tmdb_id, movie_id = movie.id, "movie resolved from lookup");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.require()?).await?;
    Ok(Redirect::to("/"))
}
