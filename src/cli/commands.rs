//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - generate: run the LLM pipeline and write the project
//! - materialize: write a project from existing markdown
//! - tree: print a directory tree
//! - run-steps: print how to run a project

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scaffoldr - Generate code with an LLM and write it out as a project
#[derive(Parser, Debug)]
#[command(name = "scaffoldr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a project from a task description
    Generate {
        /// Task description
        task: String,

        /// Directory to create the project in (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep asking for modifications after the first project is written
        #[arg(short, long)]
        interactive: bool,
    },

    /// Write a project from markdown that was already generated
    Materialize {
        /// Markdown file to read, or - for stdin
        input: PathBuf,

        /// Task description used to name the project folder
        #[arg(short, long)]
        task: Option<String>,

        /// Directory to create the project in (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the directory tree of a project
    Tree {
        /// Project directory
        dir: PathBuf,
    },

    /// Print suggested commands for running a project
    RunSteps {
        /// Project directory
        dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["scaffoldr"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["scaffoldr", "tree", ".", "-v", "-c", "/etc/scaffoldr.yml"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/etc/scaffoldr.yml")));
    }

    #[test]
    fn test_generate_command() {
        let cli = Cli::try_parse_from(["scaffoldr", "generate", "Build a todo app"]).unwrap();
        match cli.command {
            Commands::Generate {
                task,
                output,
                interactive,
            } => {
                assert_eq!(task, "Build a todo app");
                assert!(output.is_none());
                assert!(!interactive);
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let cli = Cli::try_parse_from(["scaffoldr", "generate", "snake", "-o", "/tmp/out", "-i"]).unwrap();
        match cli.command {
            Commands::Generate {
                output, interactive, ..
            } => {
                assert_eq!(output, Some(PathBuf::from("/tmp/out")));
                assert!(interactive);
            }
            _ => panic!("Expected generate command"),
        }
    }

    #[test]
    fn test_materialize_command() {
        let cli = Cli::try_parse_from(["scaffoldr", "materialize", "-", "--task", "My app"]).unwrap();
        match cli.command {
            Commands::Materialize { input, task, output } => {
                assert_eq!(input, PathBuf::from("-"));
                assert_eq!(task.as_deref(), Some("My app"));
                assert!(output.is_none());
            }
            _ => panic!("Expected materialize command"),
        }
    }

    #[test]
    fn test_tree_command() {
        let cli = Cli::try_parse_from(["scaffoldr", "tree", "projects/app"]).unwrap();
        match cli.command {
            Commands::Tree { dir } => assert_eq!(dir, PathBuf::from("projects/app")),
            _ => panic!("Expected tree command"),
        }
    }

    #[test]
    fn test_run_steps_command() {
        let cli = Cli::try_parse_from(["scaffoldr", "run-steps", "app"]).unwrap();
        assert!(matches!(cli.command, Commands::RunSteps { .. }));
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
