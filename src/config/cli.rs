use crate::config::toml_config::TomlConfig;
use crate::domain::ports::AnchorStrategy;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "nearby-eats")]
#[command(about = "Find and rank eateries around an address")]
pub struct CliConfig {
    /// Free-text address to search around
    pub address: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Places API key (overrides the config file and GOOGLE_MAPS_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Search radius in meters
    #[arg(long)]
    pub radius: Option<f64>,

    /// Place categories to keep
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// How the search center is chosen: first or centroid
    #[arg(long)]
    pub anchor: Option<AnchorStrategy>,

    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    /// Print the ranking as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列參數
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.provider.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.provider.base_url = base_url.clone();
        }
        if let Some(radius) = self.radius {
            config.search.radius = radius;
        }
        if !self.types.is_empty() {
            config.search.types = self.types.clone();
        }
        if let Some(anchor) = self.anchor {
            config.search.anchor = anchor;
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.search.concurrent_requests = concurrent;
        }
        config.logging.verbose |= self.verbose;

        Ok(config)
    }
}
