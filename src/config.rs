use anyhow::Context;
use serde::Deserialize;

/// Default ceiling on bytes consumed by a request line plus headers.
pub const DEFAULT_HEADER_LIMIT: u64 = 1 << 20;

/// Default capacity of the per-connection reader and writer buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 4 << 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Header-phase byte ceiling, re-armed for every request on a connection.
    pub header_limit: u64,
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            header_limit: DEFAULT_HEADER_LIMIT,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Loads configuration from the YAML file named by `WICKET_CONFIG`
    /// (defaults when unset), then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("WICKET_CONFIG") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                Self::from_yaml(&raw).with_context(|| format!("invalid config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        if cfg.buffer_size == 0 {
            anyhow::bail!("buffer_size must be greater than zero");
        }
        if cfg.header_limit == 0 {
            anyhow::bail!("header_limit must be greater than zero");
        }
        Ok(cfg)
    }
}
