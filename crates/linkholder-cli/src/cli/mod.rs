//! CLI for linkholder.

mod commands;
mod control_socket;
mod prompt;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use linkholder_core::config::{self, StatePaths};
use linkholder_core::links::{Category, LinkId, ListKey};
use linkholder_core::store::LinkStore;

use commands::{
    run_agent, run_assign, run_badge, run_capture, run_clear, run_clear_all, run_discard,
    run_download, run_folder, run_install, run_list, run_remove,
};

/// Top-level CLI for linkholder.
#[derive(Debug, Parser)]
#[command(name = "linkholder")]
#[command(about = "Collect links, sort them into model/footprint/symbol, download them in bulk", long_about = None)]
pub struct Cli {
    /// Use this store database instead of the one in the XDG state dir.
    /// Its control socket, badge and menu files are kept beside it.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Register the context-menu item, seed the store and publish the badge.
    Install,

    /// Run the background agent: captures links sent over the control socket
    /// and keeps the badge up to date.
    Agent {
        /// Run the install/update steps before entering the loop.
        #[arg(long)]
        installed: bool,
    },

    /// Send a link to the pending list (through the agent when it is running).
    Capture {
        /// Link URL, stored verbatim.
        url: String,
    },

    /// Show all four lists.
    List {
        /// Add a column with the full URL.
        #[arg(long)]
        full: bool,
    },

    /// Move a pending link into a category.
    Assign {
        /// Pending entry id.
        id: LinkId,
        /// model, footprint or symbol.
        category: Category,
    },

    /// Delete a link from the pending list.
    Discard {
        /// Pending entry id.
        id: LinkId,
    },

    /// Delete a link from any list.
    Remove {
        /// pending, model, footprint or symbol.
        list: ListKey,
        /// Entry id.
        id: LinkId,
    },

    /// Empty one list.
    Clear {
        /// pending, model, footprint or symbol.
        list: ListKey,
    },

    /// Empty the model, footprint and symbol lists (pending is kept).
    ClearAll {
        /// Do not ask for confirmation.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show or set the download folder name.
    Folder {
        /// New folder name; omit to print the current one.
        name: Option<String>,
    },

    /// Download every categorized link into `<download-dir>/<folder>/`.
    Download {
        /// Root directory (default: config `download_dir`, else the current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Replace existing files instead of saving as `name (1).ext`.
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the current badge (pending count).
    Badge,

    /// Generate shell completions.
    Completions {
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "linkholder", &mut std::io::stdout());
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let paths = StatePaths::resolve(cli.store.as_deref())?;
        let store = LinkStore::open_at(&paths.store).await?;

        match cli.command {
            CliCommand::Install => run_install(&store, &paths).await?,
            CliCommand::Agent { installed } => run_agent(&store, &cfg, &paths, installed).await?,
            CliCommand::Capture { url } => run_capture(&store, &paths, &url).await?,
            CliCommand::List { full } => run_list(&store, &cfg, full).await?,
            CliCommand::Assign { id, category } => {
                run_assign(&store, &cfg, &paths, id, category).await?
            }
            CliCommand::Discard { id } => run_discard(&store, &cfg, &paths, id).await?,
            CliCommand::Remove { list, id } => run_remove(&store, &cfg, &paths, list, id).await?,
            CliCommand::Clear { list } => run_clear(&store, &cfg, &paths, list).await?,
            CliCommand::ClearAll { yes } => run_clear_all(&store, &cfg, yes).await?,
            CliCommand::Folder { name } => run_folder(&store, &cfg, name.as_deref()).await?,
            CliCommand::Download {
                download_dir,
                overwrite,
            } => run_download(&store, &cfg, download_dir, overwrite).await?,
            CliCommand::Badge => run_badge(&paths).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
