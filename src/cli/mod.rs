//! Command-line interface for tagview
//!
//! Defines the CLI structure using clap derive macros and the interactive
//! panel loop over the console surface.

use std::io::{BufReader, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::{GitClient, RepositoryClient};
use crate::config::Config;
use crate::error::Result;
use crate::panel::{self, TagPanel};
use crate::report;
use crate::surface::{ConsoleSurface, DisplaySurface};

/// tagview - Git tag panel
///
/// Lists local and per-remote tags as an addressable text report and runs
/// batch operations (create, delete, push, view commit) over selections.
#[derive(Parser, Debug)]
#[command(name = "tagview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the repository (defaults to current directory)
    #[arg(long, global = true, env = "TAGVIEW_REPO")]
    pub repo: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive tag panel
    Panel,

    /// Print the tag report once and exit
    List {
        /// Output the tag listing as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let client = GitClient::open(self.repo.as_deref())?;

        match self.command {
            Commands::List { json } => run_list(&client, json),
            Commands::Panel => run_panel(client),
        }
    }
}

fn run_list(client: &GitClient, json: bool) -> Result<()> {
    let tags = client.list_tags()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    let header = panel::header_info(client)?;
    let snapshot = report::render(&header, &tags);
    print!("{}", snapshot.text);
    std::io::stdout().flush()?;
    Ok(())
}

fn run_panel(client: GitClient) -> Result<()> {
    let config = Config::load_from_repo(&client.repo_root()?);
    let surface = ConsoleSurface::new(BufReader::new(std::io::stdin()), std::io::stdout());
    let mut panel = TagPanel::new(client, surface, config);

    panel.refresh()?;

    loop {
        let Some(line) = panel.surface_mut().read_line("tags> ") else {
            break;
        };

        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };

        let outcome = match command {
            "r" => panel.refresh(),
            "s" => {
                let lines: Vec<usize> = parts.filter_map(|p| p.parse().ok()).collect();
                panel.surface_mut().select_lines(lines);
                Ok(())
            }
            "c" => panel.create_tag(),
            "d" => panel.delete_selected().map(|_| ()),
            "p" => panel.push(false),
            "P" => panel.push(true),
            "l" => panel.show_log_for_selection(),
            "q" => break,
            other => {
                let message = format!("unknown command: {other}");
                panel.surface_mut().show_status(&message);
                Ok(())
            }
        };

        // Operation failures are recoverable; report and keep the panel open.
        if let Err(err) = outcome {
            panel.surface_mut().show_status(&format!("error: {err}"));
        }
    }

    Ok(())
}
