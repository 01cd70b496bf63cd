//! Configuration loading and validation
//!
//! Configuration is read from a TOML file, deserialized with serde, and
//! validated before any crawl work starts. A SHA-256 hash of the file is
//! recorded with the crawl statistics so runs can be tied back to the
//! exact configuration that produced them.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
