use std::env;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;
const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    /// JSON catalog to serve instead of the built-in destinations.
    pub catalog_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            catalog_path: None,
            allowed_origins: normalize_origins(DEFAULT_ALLOWED_ORIGINS),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = env::var("WANDER_BIND")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.bind);
        let catalog_path = env::var("WANDER_CATALOG_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let allowed_origins = env::var("WANDER_ALLOWED_ORIGINS")
            .ok()
            .map(|value| normalize_origins(value.split(',')))
            .unwrap_or(defaults.allowed_origins);
        let max_body_bytes = env::var("WANDER_MAX_BODY_BYTES")
            .ok()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_body_bytes);

        Self {
            bind,
            catalog_path,
            allowed_origins,
            max_body_bytes,
        }
    }
}

fn normalize_origins<'a>(origins: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    origins
        .into_iter()
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
