use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub store: StoreConfig,
    pub chunking: ChunkingSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct ChunkingSection {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("STUDYFORGE_BIND") {
            self.server.bind = v;
        }
        if let Ok(v) = std::env::var("STUDYFORGE_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
        if let Ok(v) = std::env::var("STUDYFORGE_AUTH_TOKEN") {
            self.server.auth_token = Some(v);
        }
        if let Ok(v) = std::env::var("STUDYFORGE_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("STUDYFORGE_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("STUDYFORGE_API_KEY") {
            self.llm.api_key = v;
        }
        if let Ok(v) = std::env::var("STUDYFORGE_STORE_PATH") {
            self.store.path = v;
        }
    }

    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 8000,
                auth_token: None,
            },
            llm: LlmConfig {
                base_url: studyforge_llm::groq::DEFAULT_BASE_URL.into(),
                model: studyforge_llm::groq::DEFAULT_MODEL.into(),
                api_key: String::new(),
            },
            store: StoreConfig {
                path: "./data/chunks.json".into(),
            },
            chunking: ChunkingSection {
                chunk_size: 500,
                overlap: 50,
            },
        }
    }
}
