//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug tracing on stderr
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//! - `--instance-url` / `--api-version`: Override the org connection

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// flexipatch - Patch component properties in Salesforce page layouts
#[derive(Parser, Debug)]
#[command(name = "flexipatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Org instance URL, overriding config and environment
    #[arg(long, global = true, value_name = "URL")]
    pub instance_url: Option<String>,

    /// REST API version, overriding config
    #[arg(long, global = true, value_name = "VERSION")]
    pub api_version: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set a component property from a literal, a query, or a session variable
    #[command(
        name = "set",
        long_about = "Set one property of one component in a FlexiPage JSON file.\n\n\
            The component is found by its id. The new value comes from exactly one \
            of --value, --query or --variable. With --subproperty, the property is \
            treated as a JSON object encoded in a string and only that key is changed.\n\n\
            Without --commit the patched document is printed and the file is left \
            untouched. With --commit the file is rewritten and the new property \
            value is printed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Preview a literal title change
    flexipatch set Account.flexipage.json --id hdr_1 --property title --value 'Account Overview'

    # Write it
    flexipatch set Account.flexipage.json --id hdr_1 --property title --value 'Account Overview' --commit

    # Point a report chart at a report looked up by name, using the 15-char id
    flexipatch set Account.flexipage.json --id chart_1 --property reportName \\
        --query \"SELECT Id FROM Report WHERE DeveloperName = 'Pipeline'\" --truncate --commit

    # Change one key of an embedded JSON property
    flexipatch set Account.flexipage.json --id lwc_1 --property config --subproperty orgId \\
        --variable OrgId --commit

VARIABLES:
    OrgId, InstanceUrl, Username"
    )]
    Set {
        /// FlexiPage JSON file
        file: PathBuf,

        /// Id of the component to edit
        #[arg(long, value_name = "ID")]
        id: String,

        /// Property of the component to set
        #[arg(long, value_name = "NAME")]
        property: String,

        /// Key inside a property holding embedded JSON
        #[arg(long, value_name = "NAME")]
        subproperty: Option<String>,

        /// Literal value
        #[arg(long, value_name = "VALUE")]
        value: Option<String>,

        /// SOQL query returning exactly one record
        #[arg(long, value_name = "SOQL")]
        query: Option<String>,

        /// Field to read from the query result (default: Id)
        #[arg(long, value_name = "FIELD")]
        field: Option<String>,

        /// Run the query against the Tooling API
        #[arg(long)]
        tooling: bool,

        /// Session variable (OrgId, InstanceUrl, Username)
        #[arg(long, value_name = "NAME")]
        variable: Option<String>,

        /// Keep only the first 15 characters of the value
        #[arg(long)]
        truncate: bool,

        /// Write the file instead of printing a preview
        #[arg(long)]
        commit: bool,
    },

    /// Show the regions and components of a page
    #[command(
        name = "show",
        long_about = "Show the layout of a FlexiPage JSON file.\n\n\
            Without --id, lists each region with the ids of its components. With \
            --id, prints that component's attributes, decoding properties that hold \
            embedded JSON.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Find component ids
    flexipatch show Account.flexipage.json

    # Inspect one component before editing it
    flexipatch show Account.flexipage.json --id lwc_1"
    )]
    Show {
        /// FlexiPage JSON file
        file: PathBuf,

        /// Show the attributes of this component
        #[arg(long, value_name = "ID")]
        id: Option<String>,
    },

    /// Store an org access token
    #[command(
        name = "auth",
        long_about = "Store an access token for the configured org.\n\n\
            The token is kept in ~/.flexipatch/secrets.toml with owner-only \
            permissions, keyed by instance URL. It is never printed. \
            FLEXIPATCH_ACCESS_TOKEN takes precedence over the stored token.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Configure the org, then store a token (prompts with hidden input)
    flexipatch config set org.instance_url https://acme.my.salesforce.com
    flexipatch auth

    # Non-interactive
    flexipatch auth --token \"$SF_ACCESS_TOKEN\"

    # Check if a token is stored
    flexipatch auth --status

    # Remove the stored token
    flexipatch auth --logout"
    )]
    Auth {
        /// Access token (prompted for if omitted)
        #[arg(long)]
        token: Option<String>,

        /// Show current authentication status
        #[arg(long)]
        status: bool,

        /// Remove stored authentication
        #[arg(long)]
        logout: bool,
    },

    /// Get or set configuration values
    #[command(
        name = "config",
        long_about = "Get or set configuration values.\n\n\
            Configuration is stored in ~/.flexipatch/config.toml. Use this \
            command to inspect or change the org connection settings.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List all configuration values
    flexipatch config list

    # Get a specific value
    flexipatch config get org.instance_url

    # Set a value
    flexipatch config set org.api_version 61.0

KEYS:
    org.instance_url, org.api_version, org.username, org.org_id, org.timeout_secs"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    flexipatch completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    flexipatch completion zsh >> ~/.zshrc

    # Fish
    flexipatch completion fish > ~/.config/fish/completions/flexipatch.fish

    # PowerShell
    flexipatch completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_set_with_query() {
        let cli = Cli::try_parse_from([
            "flexipatch",
            "set",
            "page.json",
            "--id",
            "chart_1",
            "--property",
            "reportName",
            "--query",
            "SELECT Id FROM Report",
            "--tooling",
            "--truncate",
        ])
        .unwrap();

        match cli.command {
            Command::Set {
                file,
                id,
                query,
                tooling,
                truncate,
                commit,
                value,
                ..
            } => {
                assert_eq!(file, PathBuf::from("page.json"));
                assert_eq!(id, "chart_1");
                assert_eq!(query.as_deref(), Some("SELECT Id FROM Report"));
                assert!(tooling);
                assert!(truncate);
                assert!(!commit);
                assert!(value.is_none());
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn set_requires_id_and_property() {
        assert!(Cli::try_parse_from(["flexipatch", "set", "page.json", "--value", "x"]).is_err());
    }

    #[test]
    fn conflicting_sources_still_parse() {
        // Source exclusivity is checked when the inputs are validated.
        let cli = Cli::try_parse_from([
            "flexipatch",
            "set",
            "page.json",
            "--id",
            "a",
            "--property",
            "p",
            "--value",
            "x",
            "--variable",
            "OrgId",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "flexipatch",
            "show",
            "page.json",
            "--debug",
            "--instance-url",
            "https://acme.my.salesforce.com",
        ])
        .unwrap();
        assert!(cli.debug);
        assert_eq!(
            cli.instance_url.as_deref(),
            Some("https://acme.my.salesforce.com")
        );
    }

    #[test]
    fn quiet_disables_interactive() {
        let cli = Cli::try_parse_from(["flexipatch", "-q", "config", "list"]).unwrap();
        assert!(!cli.interactive());
    }
}
