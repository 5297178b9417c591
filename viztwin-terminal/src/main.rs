/// VizTwin Terminal - scan-to-BIM demo in the terminal
///
/// Controls:
///   - 1-4: Home, Dashboard, Library, About
///   - [ / ]: Back / Forward
///   - Mouse drag, Left/Right, W/S: Rotate the model
///   - Click: Show element properties
///   - Q/ESC: Quit
use clap::Parser;
use std::io;
use std::path::PathBuf;
use viztwin_core::{Page, ViewerConfig};
use viztwin_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "viztwin-terminal", version, about = "VizTwin scan-to-BIM demo")]
struct Cli {
    /// RON file overriding the viewer defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page to open, by name (`library`) or path (`/library`)
    #[arg(long, default_value = "home")]
    page: String,
}

fn start_page(arg: &str) -> Page {
    if arg.starts_with('/') {
        Page::from_path(arg)
    } else {
        Page::from_name(arg).unwrap_or_else(|| {
            log::warn!("unknown page {:?}, opening home", arg);
            Page::Home
        })
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?,
        None => ViewerConfig::default(),
    };

    println!("VizTwin Terminal - Loading...");
    let mut app = TerminalApp::new(config, start_page(&cli.page));
    app.run()?;

    println!("Thank you for using VizTwin!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_page() {
        assert_eq!(start_page("library"), Page::Library);
        assert_eq!(start_page("/about"), Page::About);
        assert_eq!(start_page("/nowhere"), Page::Home);
        assert_eq!(start_page("nowhere"), Page::Home);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["viztwin-terminal", "--page", "dashboard"]);
        assert_eq!(cli.page, "dashboard");
        assert!(cli.config.is_none());
    }
}
