use super::complete::sections_completer;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "kodb",
    bin_name = "kodb",
    version,
    disable_help_subcommand = true,
    after_help = "Commands that change the project print nothing on success; use -v to see what changed.\n\nEnable shell completions:\n  eval \"$(kodb completions bash)\"  # add to ~/.bashrc\n  eval \"$(kodb completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Write documents as ordered Markdown sections", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (confirmations on stdout, debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Builds the clap Command for use with CompleteEnv.
pub fn build_command() -> clap::Command {
    Cli::command()
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn the current directory into a kodb project
    #[command(display_order = 1)]
    Init {
        /// Also create the default report sections
        #[arg(long)]
        default: bool,
    },

    /// Create a new project in DIR
    #[command(display_order = 2)]
    New {
        dir: String,

        /// Also create the default report sections
        #[arg(long)]
        default: bool,
    },

    /// Add a section, appending it unless a position is given
    #[command(
        display_order = 10,
        after_help = "Without a position, adding a name that already exists leaves the project unchanged.\nGive a position to add a second section with the same name."
    )]
    Add {
        name: String,

        /// Position to insert at; later sections move down. Allows duplicate names
        position: Option<String>,
    },

    /// Remove sections by index or name
    #[command(alias = "rm", display_order = 11)]
    Remove {
        #[arg(required = true, num_args = 1.., add = sections_completer())]
        tokens: Vec<String>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Swap the positions of two sections
    #[command(alias = "swap", display_order = 12)]
    Switch {
        #[arg(add = sections_completer())]
        first: String,

        #[arg(add = sections_completer())]
        second: String,
    },

    /// Move a section to a new position
    #[command(alias = "mv", display_order = 13)]
    Move {
        #[arg(add = sections_completer())]
        token: String,

        position: String,
    },

    /// Open a section, the metadata (`kodb.yaml`) or the source folder in the editor
    #[command(alias = "e", display_order = 14)]
    Edit {
        #[arg(add = sections_completer())]
        token: Option<String>,
    },

    /// List sections in document order
    #[command(alias = "ls", display_order = 15)]
    List,

    /// Build the document with the converter and TeX engine
    #[command(display_order = 20)]
    Build,

    /// Count the words and characters of the document
    #[command(display_order = 16)]
    Stats,

    /// Check that the build programs are installed
    #[command(display_order = 21)]
    Check,

    /// Generate shell completions
    #[command(display_order = 30)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kodb").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn add_with_and_without_position() {
        match parse(&["add", "intro"]).command {
            Commands::Add { name, position } => {
                assert_eq!(name, "intro");
                assert!(position.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse(&["add", "intro", "2"]).command {
            Commands::Add { position, .. } => assert_eq!(position.as_deref(), Some("2")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn remove_takes_several_tokens() {
        match parse(&["remove", "1", "results", "-y"]).command {
            Commands::Remove { tokens, yes } => {
                assert_eq!(tokens, vec!["1", "results"]);
                assert!(yes);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn remove_needs_a_token() {
        assert!(Cli::try_parse_from(["kodb", "remove"]).is_err());
    }

    #[test]
    fn switch_needs_two_tokens() {
        assert!(Cli::try_parse_from(["kodb", "switch", "a"]).is_err());
        assert!(matches!(
            parse(&["switch", "a", "b"]).command,
            Commands::Switch { .. }
        ));
    }

    #[test]
    fn edit_token_is_optional() {
        assert!(matches!(parse(&["edit"]).command, Commands::Edit { token: None }));
    }

    #[test]
    fn verbose_is_global() {
        assert!(parse(&["list", "-v"]).verbose);
        assert!(parse(&["--verbose", "build"]).verbose);
    }

    #[test]
    fn new_takes_a_directory() {
        match parse(&["new", "thesis", "--default"]).command {
            Commands::New { dir, default } => {
                assert_eq!(dir, "thesis");
                assert!(default);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stats_takes_no_arguments() {
        assert!(matches!(parse(&["stats"]).command, Commands::Stats));
        assert!(Cli::try_parse_from(["kodb", "stats", "extra"]).is_err());
    }
}
