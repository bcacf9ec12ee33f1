//! Defines the configuration of a `Semantizer`: how resources are fetched.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;
use std::time::Duration;

fn default_accept() -> Vec<String> {
    [
        "text/turtle",
        "application/n-quads",
        "application/trig",
        "application/n-triples",
        "application/rdf+xml",
        "text/n3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    // offline mode (does not fetch remote resources)
    #[serde(default)]
    pub offline: bool,
    // timeout applied to each HTTP request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    // media types to negotiate, highest priority first
    #[serde(default = "default_accept")]
    pub accept: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            offline: false,
            timeout_secs: default_timeout_secs(),
            accept: default_accept(),
        }
    }
}

impl Config {
    pub fn offline() -> Self {
        Config {
            offline: true,
            ..Config::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds a weighted `Accept` header honoring the configured priority order.
    pub fn accept_header(&self) -> String {
        if self.accept.is_empty() {
            return "*/*".to_string();
        }
        let mut parts = Vec::new();
        let mut q = 1.0f32;
        for t in &self.accept {
            parts.push(format!("{t}; q={:.1}", q));
            q = (q - 0.1f32).max(0.1f32);
        }
        parts.push("*/*; q=0.1".to_string());
        parts.join(", ")
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Offline: {}", self.offline);
        println!("  Timeout: {}s", self.timeout_secs);
        println!("  Accept:");
        for media_type in &self.accept {
            println!("    - {}", media_type);
        }
    }
}
