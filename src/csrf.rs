use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use rand::{Rng, distributions::Alphanumeric};

use crate::error::{AppError, AppResult};

pub const COOKIE_NAME: &str = "csrf";
const TOKEN_LEN: usize = 32;

/// Returns the form token for this browser, minting and signing a new one if
/// the jar has none yet.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let token = cookie.value().to_string();
        return (jar, token);
    }

    let token: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(TOKEN_LEN).map(char::from).collect();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12));

    (jar.add(cookie), token)
}

/// Checks a submitted form token against the signed cookie.
pub fn verify(jar: &SignedCookieJar, submitted: &str) -> AppResult<()> {
    let Some(cookie) = jar.get(COOKIE_NAME) else {
        return Err(AppError::Csrf);
    };
    if submitted.is_empty() || cookie.value() != submitted {
        return Err(AppError::Csrf);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::{Key, SignedCookieJar};

    use super::{TOKEN_LEN, issue, verify};
    use crate::error::AppError;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::generate())
    }

    #[test]
    fn issue_mints_token_once() {
        let (jar, first) = issue(jar());
        assert_eq!(first.len(), TOKEN_LEN);

        let (_, second) = issue(jar);
        assert_eq!(first, second);
    }

    #[test]
    fn verify_accepts_matching_token() {
        let (jar, token) = issue(jar());
        verify(&jar, &token).expect("token should match");
    }

    #[test]
    fn verify_rejects_missing_or_wrong_token() {
        let (jar, _) = issue(jar());
        assert!(matches!(verify(&jar, ""), Err(AppError::Csrf)));
        assert!(matches!(verify(&jar, "forged"), Err(AppError::Csrf)));
    }

    #[test]
    fn verify_rejects_when_no_cookie_was_issued() {
        assert!(matches!(verify(&jar(), "anything"), Err(AppError::Csrf)));
    }
}
