use jiff::civil::Date;
use serde::Deserialize;

/// One candidate returned by a title search against the movie database.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieCandidate {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MovieCandidate {
    pub fn release_year(&self) -> Option<i16> {
        self.release_date.as_deref().and_then(release_year)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: String,
    pub overview: String,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub description: String,
    pub img_url: String,
}

impl NewMovie {
    pub fn from_details(details: MovieDetails, img_url: String) -> Self {
        Self {
            title: details.title,
            year: details.release_date,
            description: details.overview,
            img_url,
        }
    }
}

/// Partial update of a stored movie. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieChanges {
    pub rating: Option<f64>,
    pub review: Option<String>,
}

impl MovieChanges {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.review.is_none()
    }
}

/// Year part of a raw `YYYY-MM-DD` release date.
pub fn release_year(raw: &str) -> Option<i16> {
    raw.trim().parse::<Date>().ok().map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::{MovieCandidate, MovieChanges, release_year};

    #[test]
    fn release_year_parses_full_dates() {
        assert_eq!(release_year("2021-10-22"), Some(2021));
        assert_eq!(release_year(" 1999-03-31 "), Some(1999));
    }

    #[test]
    fn release_year_ignores_blank_and_garbage() {
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn candidate_tolerates_missing_optional_fields() {
        let candidate: MovieCandidate =
            serde_json::from_str(r#"{"id": 7, "title": "Untitled", "poster_path": null}"#)
                .expect("candidate should decode");
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.release_year(), None);
        assert!(candidate.poster_path.is_none());
    }

    #[test]
    fn empty_changes_are_detected() {
        assert!(MovieChanges::default().is_empty());
        assert!(!MovieChanges { review: Some("ok".into()), ..Default::default() }.is_empty());
    }
}
