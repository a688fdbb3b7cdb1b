use crate::config::toml_config::TomlConfig;
use crate::config::DashboardConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "quake-map")]
#[command(about = "Fetch recent earthquakes and plate boundaries and build the map layers")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub earthquakes_url: Option<String>,

    #[arg(long)]
    pub plates_url: Option<String>,

    /// Layers to hide after loading, e.g. `minor,plates`
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,

    #[arg(long, help = "Print the legend and layers as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// Loads the config file, if any, then applies command-line overrides.
    pub fn load(&self) -> Result<(DashboardConfig, TomlConfig)> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut config = file.to_dashboard_config();
        if let Some(url) = &self.earthquakes_url {
            config.feeds.earthquakes_url = url.clone();
        }
        if let Some(url) = &self.plates_url {
            config.feeds.plates_url = url.clone();
        }

        Ok((config, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_overrides_defaults() {
        let args = CliArgs::parse_from([
            "quake-map",
            "--earthquakes-url",
            "http://localhost:8080/quakes",
            "--hide",
            "minor,plates",
        ]);

        let (config, _) = args.load().unwrap();
        assert_eq!(config.feeds.earthquakes_url, "http://localhost:8080/quakes");
        assert_eq!(args.hide, vec!["minor", "plates"]);
    }
}
