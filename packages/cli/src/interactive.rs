//! Interactive menu for the `SignalScope` toolchain.
//!
//! Lets users pick a tool and answer a few prompts instead of memorizing
//! CLI flags.

use dialoguer::{Input, Select};
use signal_scope_coverage::DEFAULT_RADIUS_KM;
use signal_scope_coverage_models::Carrier;

use crate::commands::{self, Location, parse_carrier_list};

/// Top-level tool selection.
enum Tool {
    Compare,
    Resolve,
    Distance,
    Nearest,
    Analytics,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Compare,
        Self::Resolve,
        Self::Distance,
        Self::Nearest,
        Self::Analytics,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Compare => "Compare carriers at a location",
            Self::Resolve => "Look up a location",
            Self::Distance => "Measure distance between two locations",
            Self::Nearest => "Find nearest towers",
            Self::Analytics => "Show analytics summary",
            Self::Server => "Start server",
        }
    }
}

fn prompt_location(prompt: &str) -> Result<Location, Box<dyn std::error::Error>> {
    let query: String = Input::new()
        .with_prompt(prompt)
        .interact_text()?;
    Ok(Location::Query(query))
}

/// Runs the interactive tool menu.
///
/// # Errors
///
/// Returns an error if user input fails, a location does not resolve, or
/// the server fails to start.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("SignalScope Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Compare => {
            let location = prompt_location("Location (place name or \"lat, lng\")")?;
            let radius: f64 = Input::new()
                .with_prompt("Radius (km)")
                .default(DEFAULT_RADIUS_KM)
                .interact_text()?;
            let carriers: String = Input::new()
                .with_prompt("Carriers (comma-separated, leave empty for all)")
                .allow_empty(true)
                .interact_text()?;
            let carriers = parse_carrier_list(Some(&carriers))?;
            print!("{}", commands::compare(&location, radius, &carriers)?);
        }
        Tool::Resolve => {
            let query: String = Input::new().with_prompt("Location").interact_text()?;
            println!("{}", commands::resolve(&query)?);
        }
        Tool::Distance => {
            let from = prompt_location("From")?;
            let to = prompt_location("To")?;
            println!("{}", commands::distance(&from, &to)?);
        }
        Tool::Nearest => {
            let location = prompt_location("Location (place name or \"lat, lng\")")?;
            let limit: usize = Input::new()
                .with_prompt("How many towers?")
                .default(5)
                .interact_text()?;

            let mut carrier_labels = vec!["All carriers".to_string()];
            carrier_labels.extend(Carrier::all().iter().map(ToString::to_string));
            let choice = Select::new()
                .with_prompt("Carrier")
                .items(&carrier_labels)
                .default(0)
                .interact()?;
            let carrier = choice.checked_sub(1).map(|i| Carrier::all()[i]);

            print!("{}", commands::nearest(&location, limit, carrier)?);
        }
        Tool::Analytics => {
            print!("{}", commands::analytics());
        }
        Tool::Server => {
            crate::run_on_actix(signal_scope_server::interactive::run).await?;
        }
    }

    Ok(())
}
