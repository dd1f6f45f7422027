use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::config::ControlConfig;
use crate::error::{DispatchError, json_error};
use crate::state::AppState;
use crate::store::accounts;

pub const SESSION_COOKIE_NAME: &str = "session";

const ISSUER: &str = "itaudit";
const AUDIENCE: &str = "itaudit-web";

/// Identity carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: String,
    pub role: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == accounts::ADMIN_ROLE
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    exp: u64,
    iat: u64,
    iss: String,
    aud: String,
}

fn unix_seconds(at: time::OffsetDateTime) -> anyhow::Result<u64> {
    Ok(u64::try_from(at.unix_timestamp())?)
}

pub fn issue_session(config: &ControlConfig, session: &Session) -> anyhow::Result<String> {
    let now = time::OffsetDateTime::now_utc();
    let claims = Claims {
        sub: session.username.clone(),
        role: session.role.clone(),
        exp: unix_seconds(now + config.session_ttl)?,
        iat: unix_seconds(now)?,
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
    };

    Ok(jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(&config.session_secret),
    )?)
}

pub fn validate_session(config: &ControlConfig, token: &str) -> anyhow::Result<Session> {
    let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.set_audience(&[AUDIENCE]);
    validation.set_issuer(&[ISSUER]);

    let data = jsonwebtoken::decode::<Claims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&config.session_secret),
        &validation,
    )?;

    Ok(Session {
        username: data.claims.sub,
        role: data.claims.role,
    })
}

fn session_cookie(token: String, config: &ControlConfig) -> Cookie<'static> {
    let mut c = Cookie::new(SESSION_COOKIE_NAME, token);
    c.set_http_only(true);
    c.set_same_site(SameSite::Lax);
    c.set_path("/");
    c.set_max_age(config.session_ttl);
    c
}

fn clear_cookie() -> Cookie<'static> {
    let mut c = Cookie::new(SESSION_COOKIE_NAME, "");
    c.set_path("/");
    c.make_removal();
    c
}

/// Without a username the shared audit password opens an `auditor`
/// session; with one, the `auth_users` credentials decide.
async fn authenticate(state: &AppState, input: &LoginRequest) -> Result<Option<Session>, Response> {
    let Some(username) = input.username.as_deref().filter(|u| !u.is_empty()) else {
        if input.password == state.config.audit_password {
            return Ok(Some(Session {
                username: "auditor".to_string(),
                role: "auditor".to_string(),
            }));
        }
        return Ok(None);
    };

    match accounts::verify(&state.db, username, &input.password).await {
        Ok(found) => Ok(found.map(|a| Session {
            username: a.username,
            role: a.role.unwrap_or_else(|| "user".to_string()),
        })),
        Err(e) => {
            tracing::error!(%e, "login lookup failed");
            Err(DispatchError::store("Error verifying user", e).into_response())
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> Response {
    let session = match authenticate(&state, &input).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            tracing::info!(username = ?input.username, "login rejected");
            return json_error(StatusCode::UNAUTHORIZED, "Invalid password");
        }
        Err(resp) => return resp,
    };

    let token = match issue_session(&state.config, &session) {
        Ok(t) => t,
        Err(e) => {
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, format!("session error: {e}"));
        }
    };

    tracing::info!(username = %session.username, role = %session.role, "session opened");
    let jar = jar.add(session_cookie(token, &state.config));
    (jar, Json(session)).into_response()
}

pub async fn whoami(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = match jar.get(SESSION_COOKIE_NAME) {
        Some(c) => c.value().to_string(),
        None => return json_error(StatusCode::UNAUTHORIZED, "missing session"),
    };

    match validate_session(&state.config, &token) {
        Ok(me) => (StatusCode::OK, Json(me)).into_response(),
        Err(_) => json_error(StatusCode::UNAUTHORIZED, "invalid session"),
    }
}

pub async fn logout(jar: CookieJar) -> Response {
    (jar.remove(clear_cookie()), StatusCode::NO_CONTENT).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_config;

    #[test]
    fn session_tokens_round_trip() {
        let cfg = test_config();
        let s = Session {
            username: "auditor".into(),
            role: "auditor".into(),
        };
        let token = issue_session(&cfg, &s).unwrap();
        assert_eq!(validate_session(&cfg, &token).unwrap(), s);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let cfg = test_config();
        let mut other = test_config();
        other.session_secret = b"a-different-secret".to_vec();

        let token = issue_session(
            &other,
            &Session {
                username: "x".into(),
                role: "admin".into(),
            },
        )
        .unwrap();
        assert!(validate_session(&cfg, &token).is_err());
        assert!(validate_session(&cfg, "not-a-jwt").is_err());
    }

    #[test]
    fn session_lifetime_follows_config() {
        let cfg = test_config();
        let token = issue_session(
            &cfg,
            &Session {
                username: "auditor".into(),
                role: "auditor".into(),
            },
        )
        .unwrap();

        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);
        let claims = jsonwebtoken::decode::<Claims>(
            &token,
            &jsonwebtoken::DecodingKey::from_secret(&cfg.session_secret),
            &validation,
        )
        .unwrap()
        .claims;
        assert_eq!(
            claims.exp - claims.iat,
            cfg.session_ttl.whole_seconds() as u64
        );
        assert!(unix_seconds(time::OffsetDateTime::UNIX_EPOCH - time::Duration::SECOND).is_err());
    }
}
