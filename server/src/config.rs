use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub db_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_env")]
    pub env: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Whether the server runs in a production-like deployment mode.
    /// Error responses omit stack details in production.
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}

fn default_port() -> u16 {
    5000
}

fn default_env() -> String {
    "development".to_string()
}
