use clap::{Args, Subcommand, ValueEnum};

use crate::api::ClassifierClient;
use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that the classification service is reachable
    Test,
}

impl ConfigCommand {
    pub async fn run(
        &self,
        config: &Config,
        client: &ClassifierClient,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");
                        println!("database_path: {}", config.database_path.display());
                        println!("api_url: {}", config.api_url);
                        println!("user: {}", config.user);
                    }
                }
                Ok(())
            }
            ConfigSubcommand::Test => {
                let message = client.test_connection().await?;
                println!("Service at {}: {}", config.api_url, message);
                Ok(())
            }
        }
    }
}
