use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snipz", version)]
#[command(about = "Keep your code snippets at hand", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets, most recently updated first
    #[command(alias = "ls")]
    List,

    /// Show one or more snippets in full
    #[command(alias = "v")]
    View {
        /// List numbers or ids of the snippets (e.g. 1 3 9f2c)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Add a snippet (opens the editor unless title and code are given)
    #[command(alias = "n")]
    Add {
        #[command(flatten)]
        fields: SnippetFields,
    },

    /// Edit a snippet (opens the editor unless a field is given)
    #[command(alias = "e")]
    Edit {
        /// List number or id of the snippet
        selector: String,

        #[command(flatten)]
        fields: SnippetFields,
    },

    /// Delete a snippet
    #[command(alias = "rm")]
    Delete {
        /// List number or id of the snippet
        selector: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show which storage backend is in use
    Backend,
}

#[derive(Args, Debug, Default)]
pub struct SnippetFields {
    /// Snippet title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Code body
    #[arg(short, long, conflicts_with = "code_file")]
    pub code: Option<String>,

    /// Read the code body from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub code_file: Option<PathBuf>,
}

impl SnippetFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.code.is_none()
            && self.code_file.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_fields() {
        let cli = Cli::parse_from(["snipz", "add", "-t", "Reverse", "-c", "x[::-1]"]);
        match cli.command {
            Some(Commands::Add { fields }) => {
                assert_eq!(fields.title.as_deref(), Some("Reverse"));
                assert_eq!(fields.code.as_deref(), Some("x[::-1]"));
                assert!(fields.description.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_delete_alias() {
        let cli = Cli::parse_from(["snipz", "rm", "2", "--yes"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { ref selector, yes: true }) if selector == "2"
        ));
    }

    #[test]
    fn code_and_code_file_conflict() {
        let parsed = Cli::try_parse_from(["snipz", "add", "-c", "x", "--code-file", "a.py"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn no_subcommand_means_list() {
        let cli = Cli::parse_from(["snipz"]);
        assert!(cli.command.is_none());
    }
}
