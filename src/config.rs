use std::env;

const DEFAULT_ORIGINS: &str = "https://www.bluroyalrides.com,https://bluroyalrides.com,https://djblubloods.wixsite.com,https://blu-royal-rides.com,http://localhost:3000,http://127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub currency: String,
    pub allowed_origins: Vec<String>,
    pub service_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3002),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "bookings.db".to_string()),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string()),
            ),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "Blu Royal Rides Payment Server".to_string()),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}
