use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Store base URL, e.g. https://shop.example.com
    pub store_url: String,

    /// WooCommerce REST API consumer key
    pub consumer_key: String,

    /// WooCommerce REST API consumer secret
    pub consumer_secret: String,

    /// Directory used to stage training/model artifacts
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,

    /// Items requested per catalog/order page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Recommendations kept per source product
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_artifact_dir() -> String {
    "artifacts".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_top_n() -> usize {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("WOO_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
