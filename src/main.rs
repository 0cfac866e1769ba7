//! Jamulus dashboard - CLI entry point
//!
//! Connects to a Jamulus server's event feed and shows the connected
//! participants until the user quits with `q` or Ctrl-C.

use clap::Parser;
use jamulus_dashboard::{config::ConfigLoader, logging, tui::app::App, DashboardOptions};
use std::process::ExitCode;

/// Live terminal dashboard for a Jamulus server
#[derive(Parser)]
#[command(name = "jamdash")]
#[command(version, about = "Live terminal dashboard for a Jamulus server")]
struct Cli {
    /// Server host (and optional port) publishing the event feed
    host: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match logging::init() {
        Ok(Some(path)) => tracing::info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let options = match ConfigLoader::load_default()
        .and_then(|config| DashboardOptions::from_config(&cli.host, &config))
    {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(async {
        let mut app = App::new(options);
        app.run().await
    }) {
        eprintln!("TUI error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_host_is_required() {
        assert!(Cli::try_parse_from(["jamdash"]).is_err());
    }

    #[test]
    fn test_host_is_taken_verbatim() {
        let cli = Cli::try_parse_from(["jamdash", "jamulus.example.org:8000"]).expect("parse");
        assert_eq!(cli.host, "jamulus.example.org:8000");
    }

    #[test]
    fn test_no_extra_arguments() {
        assert!(Cli::try_parse_from(["jamdash", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["jamdash", "--socket", "x", "a"]).is_err());
    }
}
