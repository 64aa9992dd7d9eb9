use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the comma-delimited movie corpus
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    /// Redis connection URL; poster lookups are not cached when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// OMDb API key; without it every poster resolves to the placeholder
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// Poster lookup API base URL
    #[serde(default = "default_poster_api_url")]
    pub poster_api_url: String,

    /// Timeout applied to each poster lookup request
    #[serde(default = "default_poster_timeout_ms")]
    pub poster_timeout_ms: u64,

    /// Image reference returned when no poster is available
    #[serde(default = "default_poster_placeholder_url")]
    pub poster_placeholder_url: String,

    /// Number of recommendations returned when the request does not say
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound on requested recommendations
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_corpus_path() -> String {
    "BollywoodMovieDetail.csv".to_string()
}

fn default_poster_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_poster_timeout_ms() -> u64 {
    3000
}

fn default_poster_placeholder_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_max_top_n() -> usize {
    50
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            redis_url: None,
            omdb_api_key: None,
            poster_api_url: default_poster_api_url(),
            poster_timeout_ms: default_poster_timeout_ms(),
            poster_placeholder_url: default_poster_placeholder_url(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let vars: Vec<(String, String)> = Vec::new();
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.corpus_path, "BollywoodMovieDetail.csv");
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("CORPUS_PATH".to_string(), "/data/movies.csv".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("OMDB_API_KEY".to_string(), "secret".to_string()),
            ("MAX_TOP_N".to_string(), "10".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.corpus_path, "/data/movies.csv");
        assert_eq!(config.port, 8080);
        assert_eq!(config.omdb_api_key.as_deref(), Some("secret"));
        assert_eq!(config.max_top_n, 10);
    }
}
