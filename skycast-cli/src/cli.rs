use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::validator::Validation;
use inquire::{InquireError, Text};

use skycast_core::provider::visualcrossing::{self, VisualCrossingProvider};
use skycast_core::{DisplayUnit, Preferences, RenderStateController};

use crate::view::ConsoleView;

/// Top-level CLI struct.
///
/// With no subcommand, drops into the interactive prompt loop.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather widget for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the 3-day forecast for a location.
    Show {
        /// Location name, e.g. "London" or "New York".
        location: String,
    },

    /// Set the display unit ("imperial" or "metric").
    Unit {
        /// Unit to apply to future renders.
        unit: String,
    },

    /// Store a Visual Crossing API key, replacing the bundled demo key.
    Key {
        /// API key obtained from visualcrossing.com.
        api_key: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Show { location }) => {
                let mut controller = build_controller()?;
                controller.submit(&location).await;
            }
            Some(Command::Unit { unit }) => {
                let unit = DisplayUnit::try_from(unit.as_str())?;
                let mut prefs = Preferences::load()?;
                prefs.unit = unit;
                prefs.save()?;
                println!("Display unit set to {unit}");
            }
            Some(Command::Key { api_key }) => {
                let mut prefs = Preferences::load()?;
                prefs.api_key = Some(api_key);
                prefs.save()?;
                println!("API key saved");
            }
            None => interactive_loop().await?,
        }

        Ok(())
    }
}

fn build_controller() -> Result<RenderStateController> {
    let prefs = Preferences::load()?;
    let api_key = prefs
        .api_key
        .clone()
        .unwrap_or_else(|| visualcrossing::DEFAULT_API_KEY.to_string());

    let provider = VisualCrossingProvider::new(api_key);
    Ok(RenderStateController::new(
        Box::new(provider),
        Box::new(prefs),
        Box::new(ConsoleView::default()),
    ))
}

async fn interactive_loop() -> Result<()> {
    let mut controller = build_controller()?;

    println!("skycast: type a location, 'u' to toggle units, 'q' to quit");

    loop {
        let answer = Text::new("Location:")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("Please enter a location.".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt();

        let input = match answer {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match input.trim() {
            "q" => break,
            "u" => {
                let unit = controller.toggle_unit();
                println!("Display unit is now {unit}");
            }
            location => controller.submit(location).await,
        }
    }

    Ok(())
}
