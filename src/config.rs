use std::env;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://greenglocleaners.github.io",
    "https://greenglocleaners.co.uk",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    /// Prefix-matched against the request `Origin`. The first entry doubles as
    /// the CORS origin for requests that match nothing.
    pub allowed_origins: Vec<String>,
    pub site_url: String,
    pub service_map_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(default_origins),
            site_url: env::var("SITE_URL")
                .or_else(|_| env::var("URL"))
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://greenglocleaners.co.uk".to_string()),
            service_map_path: env::var("SERVICE_MAP_PATH").ok().filter(|p| !p.is_empty()),
        }
    }
}

pub fn default_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}
