//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run multi-agent research on a topic and keep bookmarks of the results.
#[derive(Parser, Debug)]
#[command(name = "research", version, about)]
pub struct Cli {
    /// Project root containing `.research-kit/`.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Print machine-readable JSON instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Use the built-in offline research service instead of HTTP.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the agent pipeline for a topic.
    Run {
        topic: String,

        /// Bookmark the result when the run succeeds.
        #[arg(long)]
        bookmark: bool,
    },

    /// Manage saved bookmarks.
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Generate research ideas for a topic.
    Ideas { topic: String },

    /// Create `.research-kit/` with a default configuration.
    Init {
        /// Overwrite an existing `config.toml`.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum BookmarkAction {
    /// List bookmarks in insertion order.
    List,
    /// Remove the bookmark with the given id.
    Remove { id: String },
    /// Remove the bookmark for the given topic.
    RemoveTopic { topic: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = Cli::try_parse_from([
            "research",
            "run",
            "quantum computing",
            "--bookmark",
            "--json",
            "--root",
            "/tmp/project",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Run {
                topic: "quantum computing".to_string(),
                bookmark: true,
            }
        );
        assert!(cli.json);
        assert!(!cli.offline);
        assert_eq!(cli.root, PathBuf::from("/tmp/project"));
    }

    #[test]
    fn test_parse_bookmark_actions() {
        let cli = Cli::try_parse_from(["research", "bookmarks", "remove-topic", "graphs"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Bookmarks {
                action: BookmarkAction::RemoveTopic {
                    topic: "graphs".to_string()
                }
            }
        );
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_run_requires_topic() {
        assert!(Cli::try_parse_from(["research", "run"]).is_err());
    }
}
