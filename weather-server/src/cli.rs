use clap::{Parser, Subcommand};
use cwa_weather_core::Config;
use inquire::{CustomType, Password, PasswordDisplayMode};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cwa-weather", version, about = "CWA 36-hour forecast proxy")]
pub struct Cli {
    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen port; overrides PORT and the config file.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Store the CWA API key and listen port in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve { port: None }) {
            Command::Serve { port } => {
                let mut config = Config::from_env()?;
                if let Some(port) = port {
                    config.port = port;
                }
                server::serve(config).await
            }
            Command::Configure => configure(),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("CWA API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Issued at https://opendata.cwa.gov.tw/user/authkey")
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());

    config.port = CustomType::<u16>::new("Listen port:")
        .with_default(config.port)
        .with_error_message("Please enter a port number between 0 and 65535")
        .prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
