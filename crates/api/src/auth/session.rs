//! Identity provider sessions.
//!
//! The hosted identity provider issues HS256 access tokens with audience
//! `authenticated` and stores them in an `sb-access-token` (or
//! `sb-<project>-access-token`) cookie. API clients may send the same token
//! as `Authorization: Bearer <token>`.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;
use cookie::Cookie;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Audience claim on signed-in user tokens.
pub const SESSION_AUDIENCE: &str = "authenticated";

/// Cookie name used by the identity provider's default client.
pub const SESSION_COOKIE: &str = "sb-access-token";

/// Claims read from an identity provider access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Provider-side user id; matched against `users.supabase_id`.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    pub exp: i64,
}

/// Whether a cookie name carries an identity provider access token.
pub fn is_session_cookie_name(name: &str) -> bool {
    name == SESSION_COOKIE || (name.starts_with("sb-") && name.ends_with("-access-token"))
}

/// Session cookies across all `Cookie` headers, percent-decoded.
fn session_cookies(headers: &HeaderMap) -> impl Iterator<Item = Cookie<'static>> + '_ {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| Cookie::split_parse_encoded(v.to_owned()))
        .filter_map(Result::ok)
        .filter(|c| is_session_cookie_name(c.name()))
}

/// Value of the first non-empty session cookie, with RFC 6265 quotes removed.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    session_cookies(headers)
        .map(|c| c.value_trimmed().to_string())
        .find(|value| !value.is_empty())
}

/// Whether the request carries a session cookie at all. An empty value
/// still counts; the token itself is checked by the API extractors.
pub fn has_session_cookie(headers: &HeaderMap) -> bool {
    session_cookies(headers).next().is_some()
}

/// Bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Session token from the bearer header, falling back to the cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers)
        .map(str::to_owned)
        .or_else(|| session_cookie(headers))
}

/// Validate an access token against the provider's signing secret.
pub fn validate_session_token(
    token: &str,
    secret: &str,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&[SESSION_AUDIENCE]);
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "identity-provider-secret";

    fn token(aud: &str, exp_offset: i64) -> String {
        let claims = SessionClaims {
            sub: "user-123".into(),
            email: Some("a@example.com".into()),
            aud: aud.into(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn cookie_names() {
        assert!(is_session_cookie_name("sb-access-token"));
        assert!(is_session_cookie_name("sb-abcdefgh-access-token"));
        assert!(!is_session_cookie_name("sb-refresh-token"));
        assert!(!is_session_cookie_name("access-token"));
    }

    #[test]
    fn finds_cookie_among_others() {
        let h = headers(&[("cookie", "theme=dark; sb-proj-access-token=abc; x=y")]);
        assert_eq!(session_cookie(&h).as_deref(), Some("abc"));
        assert!(has_session_cookie(&h));
        assert!(!has_session_cookie(&headers(&[("cookie", "theme=dark")])));
    }

    #[test]
    fn cookie_values_are_unquoted_and_decoded() {
        let h = headers(&[("cookie", "sb-access-token=\"abc.def\"")]);
        assert_eq!(session_cookie(&h).as_deref(), Some("abc.def"));
        let h = headers(&[("cookie", "sb-access-token=a%2Eb%3Dc")]);
        assert_eq!(session_cookie(&h).as_deref(), Some("a.b=c"));
    }

    #[test]
    fn empty_cookie_passes_the_gate_but_yields_no_token() {
        let h = headers(&[("cookie", "sb-access-token=")]);
        assert!(has_session_cookie(&h));
        assert_eq!(session_cookie(&h), None);
        assert_eq!(session_token(&h), None);
    }

    #[test]
    fn bearer_wins_over_cookie() {
        let h = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "sb-access-token=from-cookie"),
        ]);
        assert_eq!(session_token(&h).as_deref(), Some("from-header"));
        let h = headers(&[("cookie", "sb-access-token=from-cookie")]);
        assert_eq!(session_token(&h).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn validates_audience_and_expiry() {
        let claims = validate_session_token(&token(SESSION_AUDIENCE, 600), SECRET).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(validate_session_token(&token("anon", 600), SECRET).is_err());
        assert!(validate_session_token(&token(SESSION_AUDIENCE, -600), SECRET).is_err());
        assert!(validate_session_token(&token(SESSION_AUDIENCE, 600), "wrong").is_err());
    }
}
