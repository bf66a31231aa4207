use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(author, version, about)]
#[command(long_about = "A markdown editor with live preview and slide presentation mode.\n\n\
    Separate slides with a line of three or more dashes (---).\n\n\
    Examples:\n  \
    mdpress                       Launch the editor\n  \
    mdpress notes.md              Launch and load a file (watched for changes)\n  \
    mdpress export notes.md       Write a paged, print-ready slide deck")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to open
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export slides as a paged HTML deck (print to PDF from any browser)
    Export {
        /// Markdown file to export
        file: PathBuf,

        /// Output file (defaults to <file>.deck.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. editor.render_debounce_ms, defaults.show_preview)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Export { file, output }) => crate::commands::export::run(file, output),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("mdpress {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(ref file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                crate::app::run(self.file)
            }
        }
    }
}
