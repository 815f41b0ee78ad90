//! Recall CLI
//!
//! Inspect and change the persisted UI theme from a terminal. The binary runs
//! the same theme store the UI uses: it hydrates from the configured storage,
//! applies the command and flushes pending writes before exiting.

mod config;
mod logging;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::RecallConfig;
use recall_app::{icons, FeatureFlags, ThemeToggle};
use recall_theme::{derive_palette, ThemeName, ThemeStore};
use std::path::PathBuf;
use storage::open_theme_store;

/// Recall preferences tool
#[derive(Parser, Debug)]
#[command(name = "recall")]
#[command(about = "Inspect and change Recall's persisted theme")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./recall.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show or change the active theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Print the palette for a theme
    Palette {
        /// Theme to derive (defaults to the active theme)
        #[arg(long)]
        theme: Option<String>,

        /// Print a CSS rule instead of a token table
        #[arg(long)]
        css: bool,
    },

    /// Print the feature flags read from the environment
    Flags,

    /// Resolve a subject icon name
    Icon {
        /// Icon name, e.g. BookOpen
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Print the active theme
    Show,
    /// Set the theme (light or dark)
    Set { name: String },
    /// Switch to the opposite theme
    Toggle,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RecallConfig::load(cli.config.as_deref())?;
    logging::init(cli.verbose, config.logging.filter.as_deref())?;

    match cli.command {
        Commands::Flags => cmd_flags(),
        Commands::Icon { name } => cmd_icon(&name),
        Commands::Theme { action } => {
            let store = open_theme_store(&config).await;
            let result = cmd_theme(&store, action);
            store.flush().await;
            result
        }
        Commands::Palette { theme, css } => {
            let theme = match theme {
                Some(name) => name.parse::<ThemeName>()?,
                None => open_theme_store(&config).await.get_theme(),
            };
            cmd_palette(theme, css);
            Ok(())
        }
    }
}

fn cmd_theme(store: &ThemeStore, action: ThemeCommand) -> Result<()> {
    match action {
        ThemeCommand::Show => {}
        ThemeCommand::Set { name } => store.set_theme_named(&name)?,
        ThemeCommand::Toggle => {
            ThemeToggle::for_store(store).click(store);
        }
    }

    let toggle = ThemeToggle::for_store(store);
    println!("{}", toggle.current);
    tracing::info!(theme = %toggle.current, next = %toggle.next(), "theme");
    Ok(())
}

fn cmd_palette(theme: ThemeName, css: bool) {
    let palette = derive_palette(theme);
    if css {
        let selector = format!("[data-theme=\"{theme}\"]");
        println!("{}", palette.to_css_block(&selector));
        return;
    }

    for (name, value) in palette.css_variables() {
        println!("{name:<22} {value}");
    }
}

fn cmd_flags() -> Result<()> {
    let flags = FeatureFlags::global();
    println!("subjects_read  = {}", flags.subjects_read);
    println!("subjects_write = {}", flags.subjects_write);
    Ok(())
}

fn cmd_icon(name: &str) -> Result<()> {
    let icon = icons::resolve_icon(name);
    if icon.name == name {
        println!("{} ({})", icon.name, icon.label);
    } else {
        println!("{} ({}) [fallback for {name:?}]", icon.name, icon.label);
    }
    Ok(())
}
