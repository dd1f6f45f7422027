use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://itaudit.sqlite?mode=rwc";

/// Runtime settings, read once from the environment at startup.
#[derive(Clone)]
pub struct ControlConfig {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub read_only: bool,
    pub require_session: bool,
    pub audit_password: String,
    pub session_secret: Vec<u8>,
    pub session_ttl: time::Duration,
    pub admin_user: String,
    pub admin_pass: String,
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for ControlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlConfig")
            .field("listen_addr", &self.listen_addr)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("read_only", &self.read_only)
            .field("require_session", &self.require_session)
            .field("session_ttl", &self.session_ttl)
            .field("admin_user", &self.admin_user)
            .field("allowed_origins", &self.allowed_origins)
            .finish_non_exhaustive()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn random_secret() -> Vec<u8> {
    use rand::RngCore;
    let mut buf = vec![0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    buf
}

impl ControlConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str, default: bool| {
            lookup(key)
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(default)
        };

        let listen_addr = lookup("ITAUDIT_LISTEN_ADDR")
            .and_then(|v| v.trim().parse::<SocketAddr>().ok())
            .unwrap_or_else(|| ([0, 0, 0, 0], 8080).into());

        let db_max_connections = lookup("ITAUDIT_DB_MAX_CONNECTIONS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, 32);

        let ttl_minutes = lookup("ITAUDIT_SESSION_TTL_MINUTES")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(480)
            .clamp(5, 7 * 24 * 60);

        // A per-process secret invalidates sessions on restart, which is
        // acceptable for a single-node deployment.
        let session_secret = lookup("ITAUDIT_SESSION_SECRET")
            .filter(|v| !v.trim().is_empty())
            .map(String::into_bytes)
            .unwrap_or_else(random_secret);

        Self {
            listen_addr,
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections,
            read_only: flag("ITAUDIT_READ_ONLY", false),
            require_session: flag("ITAUDIT_REQUIRE_SESSION", true),
            audit_password: lookup("ITAUDIT_AUDIT_PASSWORD").unwrap_or_else(|| "2024".to_string()),
            session_secret,
            session_ttl: time::Duration::minutes(ttl_minutes),
            admin_user: lookup("ITAUDIT_ADMIN_USER").unwrap_or_else(|| "admin".to_string()),
            admin_pass: lookup("ITAUDIT_ADMIN_PASS").unwrap_or_else(|| "p@ssw0rd".to_string()),
            allowed_origins: parse_origins(
                &lookup("ITAUDIT_ALLOWED_ORIGINS").unwrap_or_else(|| {
                    "http://localhost:3000,http://127.0.0.1:3000".to_string()
                }),
            ),
        }
    }
}
