mod client;
mod commands;
mod config;
mod domain;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::hub::Tab;
use domain::filter::ComplianceSelection;

#[derive(Parser)]
#[command(name = "fleetmon", version, about = "Monitor hub/spoke cluster fleets: status, inventory, and policy compliance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fleet overview across all hubs
    Hubs {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Detail view for one hub
    Hub {
        /// Hub name (falls back to default_hub from the config)
        name: Option<String>,

        /// Which tab to show
        #[arg(long, value_enum, default_value_t = Tab::Overview)]
        tab: Tab,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Spoke clusters of a hub, with live-style filters
    Spokes {
        /// Hub name (falls back to default_hub from the config)
        #[arg(long)]
        hub: Option<String>,

        /// Filter by cluster name (substring, case-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Filter by OpenShift version
        #[arg(long)]
        version: Option<String>,

        /// Filter by configuration label
        #[arg(long)]
        configuration: Option<String>,

        /// Expand the detail panel for this spoke
        #[arg(long)]
        expand: Option<String>,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Policies of a hub (or one of its spokes), wave-sorted
    Policies {
        /// Hub name (falls back to default_hub from the config)
        #[arg(long)]
        hub: Option<String>,

        /// Scope to this spoke cluster instead of the hub
        #[arg(long)]
        spoke: Option<String>,

        /// Filter by policy name (substring, case-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Filter by compliance state
        #[arg(long, value_enum, default_value_t = ComplianceSelection::All)]
        compliance: ComplianceSelection,

        /// Show the detail block under each policy
        #[arg(long)]
        details: bool,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Download or enforce a single policy
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },

    /// Operators installed on a spoke cluster
    Operators {
        /// Hub name (falls back to default_hub from the config)
        #[arg(long)]
        hub: Option<String>,

        /// Spoke cluster name
        #[arg(long)]
        spoke: String,

        /// Filter by operator name (substring, case-insensitive)
        #[arg(long)]
        name: Option<String>,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Register an external hub with the backend
    AddHub {
        /// Hub name (lowercase alphanumeric with hyphens)
        name: String,

        /// Path to a kubeconfig file for the hub
        #[arg(long, conflicts_with_all = ["api_endpoint", "token", "username", "password"])]
        kubeconfig: Option<PathBuf>,

        /// API server endpoint (e.g. https://api.cluster.example.com:6443)
        #[arg(long)]
        api_endpoint: Option<String>,

        /// Bearer token for the endpoint
        #[arg(long)]
        token: Option<String>,

        /// Username for the endpoint
        #[arg(long)]
        username: Option<String>,

        /// Password for the endpoint
        #[arg(long)]
        password: Option<String>,
    },

    /// Deregister a hub and delete its stored credentials
    RemoveHub {
        /// Hub name
        name: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Backend health check
    Health {
        /// Which probe to hit
        #[arg(long, value_enum, default_value_t = commands::health::Probe::Health)]
        probe: commands::health::Probe,

        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Manage the stored bearer token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
enum PolicyCommands {
    /// Download a policy manifest as YAML
    Yaml {
        /// Policy namespace
        namespace: String,

        /// Fully-qualified policy name
        name: String,

        /// Fetch through this hub (for spoke policies)
        #[arg(long)]
        hub: Option<String>,

        /// Output path (defaults to the server-suggested filename)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Create a remediation (CGU) to enforce a non-compliant policy
    Enforce {
        /// Fully-qualified policy name
        name: String,

        /// Hub the target cluster is managed through
        #[arg(long)]
        hub: String,

        /// Target cluster name
        #[arg(long)]
        cluster: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store a bearer token
    Set {
        /// Token value
        token: String,
    },
    /// Remove the stored token
    Clear,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hubs { format } => commands::hubs::run(&format),
        Commands::Hub { name, tab, format } => commands::hub::run(name, tab, &format),
        Commands::Spokes {
            hub,
            name,
            version,
            configuration,
            expand,
            format,
        } => commands::spokes::run(commands::spokes::SpokesArgs {
            hub,
            name,
            version,
            configuration,
            expand,
            format,
        }),
        Commands::Policies {
            hub,
            spoke,
            name,
            compliance,
            details,
            format,
        } => commands::policies::run(commands::policies::PoliciesArgs {
            hub,
            spoke,
            name,
            compliance,
            details,
            format,
        }),
        Commands::Policy { command } => match command {
            PolicyCommands::Yaml {
                namespace,
                name,
                hub,
                output,
            } => commands::policy::yaml(&namespace, &name, hub.as_deref(), output),
            PolicyCommands::Enforce {
                name,
                hub,
                cluster,
                yes,
            } => commands::policy::enforce(&hub, &cluster, &name, yes),
        },
        Commands::Operators {
            hub,
            spoke,
            name,
            format,
        } => commands::operators::run(commands::operators::OperatorsArgs {
            hub,
            spoke,
            name,
            format,
        }),
        Commands::AddHub {
            name,
            kubeconfig,
            api_endpoint,
            token,
            username,
            password,
        } => commands::add_hub::run(commands::add_hub::AddHubArgs {
            name,
            kubeconfig,
            api_endpoint,
            token,
            username,
            password,
        }),
        Commands::RemoveHub { name, yes } => commands::remove_hub::run(&name, yes),
        Commands::Health { probe, format } => commands::health::run(probe, &format),
        Commands::Token { command } => match command {
            TokenCommands::Set { token } => commands::token::set(&token),
            TokenCommands::Clear => commands::token::clear(),
        },
    }
}
