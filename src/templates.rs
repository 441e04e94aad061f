use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    forms::EditForm,
    models::{MovieCandidate, release_year},
    store::Movie,
    tmdb,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[Movie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "These are my all time favourite movies." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to start your list." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

/// `submitted` carries a rejected form back so the user's input is kept.
pub fn edit_page(
    movie: &Movie,
    csrf_token: &str,
    submitted: Option<&EditForm>,
    error: Option<&str>,
) -> String {
    let (rating, review) = match submitted {
        Some(form) => (form.rating.clone(), form.review.clone()),
        None => (
            movie.rating.map(format_rating).unwrap_or_default(),
            movie.review.clone().unwrap_or_default(),
        ),
    };

    form_shell(
        "Edit Movie",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
            p class="mt-2 text-gray-600" { "Edit Movie Rating" }
            (error_banner(error))

            form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                input type="hidden" name="csrf_token" value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10 e.g. 7.5" }
                    input class=(INPUT_CLASS) name="rating" id="rating" value=(rating) required;
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                    input class=(INPUT_CLASS) name="review" id="review" value=(review) required;
                }
                button class=(BUTTON_CLASS) type="submit" { "Done" }
            }
        },
    )
}

pub fn add_page(csrf_token: &str, title: &str, error: Option<&str>) -> String {
    form_shell(
        "Add Movie",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
            (error_banner(error))

            form class="mt-8 space-y-6" method="post" action="/add" {
                input type="hidden" name="csrf_token" value=(csrf_token);
                div {
                    label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                    input class=(INPUT_CLASS) name="title" id="title" value=(title) required;
                }
                button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[MovieCandidate], image_base_url: &str) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                            p class="mt-2 text-gray-600" { "Results for \"" (query) "\"" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                    }

                    @if candidates.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No matching movies found." }
                        }
                    } @else {
                        ul class="mt-10 space-y-3" {
                            @for candidate in candidates {
                                li class="bg-white shadow rounded-lg p-4" {
                                    a class="flex items-center gap-4 hover:text-blue-700" href=(format!("/find?id={}", candidate.id)) {
                                        img class="h-16 w-11 rounded object-cover" alt=(candidate.title)
                                            src=(tmdb::image_url(image_base_url, candidate.poster_path.as_deref()));
                                        div {
                                            span class="font-semibold text-gray-900" { (candidate.title) }
                                            @if let Some(year) = candidate.release_year() {
                                                span class="ml-2 text-gray-500" { "(" (year) ")" }
                                            }
                                            @if let Some(overview) = &candidate.overview {
                                                p class="mt-1 text-sm text-gray-500 line-clamp-2" { (overview) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" {
                            (status.canonical_reason().unwrap_or("Error"))
                        }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_shell(title: &str, inner: Markup) -> String {
    page(
        title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        (inner)
                    }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                }
            }
        },
    )
}

fn error_banner(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="mt-4 rounded-md bg-red-50 px-4 py-2 text-sm text-red-700" role="alert" { (message) }
        }
    }
}

fn movie_card(movie: &Movie) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-6" {
                img class="h-40 w-28 rounded object-cover" src=(movie.img_url) alt=(movie.title);
                div class="flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            @if let Some(ranking) = movie.ranking {
                                span class="mr-2 text-blue-600" { "#" (ranking) }
                            }
                            (movie.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (display_year(&movie.year)) ")" }
                        }
                        @if let Some(rating) = movie.rating {
                            span class="text-lg font-bold text-gray-900" { (format_rating(rating)) }
                        }
                    }
                    @if let Some(review) = &movie.review {
                        p class="mt-2 italic text-gray-700" { "\"" (review) "\"" }
                    }
                    p class="mt-2 text-sm text-gray-600" { (movie.description) }
                    div class="mt-4 flex gap-4 text-sm" {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Update" }
                        a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                    }
                }
            }
        }
    }
}

fn display_year(raw: &str) -> String {
    match release_year(raw) {
        Some(year) => year.to_string(),
        None if raw.trim().is_empty() => "unknown".to_string(),
        None => raw.trim().to_string(),
    }
}

fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}
