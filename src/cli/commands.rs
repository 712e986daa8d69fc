// CLI command definitions

use super::context::Context;
use super::resources::{
    account::AccountCommand, block_storage::BlockStorageCommand, database::DatabaseCommand,
    dns::DnsCommand, inference::InferenceCommand, instance::InstanceCommand, iso::IsoCommand,
    kubernetes::KubernetesCommand, load_balancer::LoadBalancerCommand,
    object_storage::ObjectStorageCommand, plans::PlansCommand, regions::RegionsCommand,
    reserved_ip::ReservedIpCommand, user::UserCommand, vpc::VpcCommand, vpc2::Vpc2Command,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "vultr-cli",
    version,
    about = "Command line interface for the Vultr API",
    long_about = "vultr-cli manages compute, storage, networking and Kubernetes resources through the Vultr v2 API"
)]
pub struct CliArgs {
    /// Config file (default is $HOME/.vultr-cli.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format: json, yaml or empty for a table
    #[arg(short = 'o', long, global = true, value_name = "FORMAT")]
    pub output: Option<String>,

    /// API key; overrides VULTR_API_KEY and the config file
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Retrieve information about your account
    #[command(visible_alias = "a")]
    Account(AccountCommand),

    /// Commands to interact with instances
    #[command(visible_alias = "i")]
    Instance(InstanceCommand),

    /// Commands to interact with block storage
    #[command(visible_alias = "bs")]
    BlockStorage(BlockStorageCommand),

    /// Commands to manage object storage
    #[command(visible_alias = "objstorage")]
    ObjectStorage(ObjectStorageCommand),

    /// Commands to control DNS records
    Dns(DnsCommand),

    /// Commands to manage load balancers
    #[command(visible_alias = "lb")]
    LoadBalancer(LoadBalancerCommand),

    /// Commands to manage Kubernetes clusters
    #[command(visible_alias = "k")]
    Kubernetes(KubernetesCommand),

    /// Commands to interact with reserved IPs
    #[command(visible_alias = "rip")]
    ReservedIp(ReservedIpCommand),

    /// Commands to manage VPCs
    Vpc(VpcCommand),

    /// Commands to manage VPC 2.0 networks
    Vpc2(Vpc2Command),

    /// Commands to manage ISOs
    Iso(IsoCommand),

    /// Commands to manage serverless inference
    #[command(visible_alias = "inf")]
    Inference(InferenceCommand),

    /// Commands to manage account users
    #[command(visible_alias = "u")]
    User(UserCommand),

    /// Commands to manage managed databases
    #[command(visible_alias = "db")]
    Database(DatabaseCommand),

    /// Display regions information
    #[command(visible_alias = "r")]
    Regions(RegionsCommand),

    /// Display plan information
    #[command(visible_alias = "p")]
    Plans(PlansCommand),
}

impl Commands {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        match self {
            Self::Account(cmd) => cmd.execute(ctx).await,
            Self::Instance(cmd) => cmd.execute(ctx).await,
            Self::BlockStorage(cmd) => cmd.execute(ctx).await,
            Self::ObjectStorage(cmd) => cmd.execute(ctx).await,
            Self::Dns(cmd) => cmd.execute(ctx).await,
            Self::LoadBalancer(cmd) => cmd.execute(ctx).await,
            Self::Kubernetes(cmd) => cmd.execute(ctx).await,
            Self::ReservedIp(cmd) => cmd.execute(ctx).await,
            Self::Vpc(cmd) => cmd.execute(ctx).await,
            Self::Vpc2(cmd) => cmd.execute(ctx).await,
            Self::Iso(cmd) => cmd.execute(ctx).await,
            Self::Inference(cmd) => cmd.execute(ctx).await,
            Self::User(cmd) => cmd.execute(ctx).await,
            Self::Database(cmd) => cmd.execute(ctx).await,
            Self::Regions(cmd) => cmd.execute(ctx).await,
            Self::Plans(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        CliArgs::command().debug_assert();
    }

    /// Aliases must not shadow a sibling's name or another sibling's alias.
    #[test]
    fn test_aliases_are_unique_among_siblings() {
        fn walk(cmd: &clap::Command, path: &str) {
            let mut seen: Vec<String> = Vec::new();
            for sub in cmd.get_subcommands() {
                let names = std::iter::once(sub.get_name()).chain(sub.get_all_aliases());
                for name in names {
                    assert!(
                        !seen.iter().any(|s| s == name),
                        "duplicate command name '{}' under '{}'",
                        name,
                        path
                    );
                    seen.push(name.to_string());
                }
                walk(sub, &format!("{} {}", path, sub.get_name()));
            }
        }
        walk(&CliArgs::command(), "vultr-cli");
    }

    #[test]
    fn test_visible_aliases_parse() {
        let args = CliArgs::try_parse_from(["vultr-cli", "bs", "list"]).unwrap();
        assert!(matches!(args.command, Commands::BlockStorage(_)));

        let args = CliArgs::try_parse_from(["vultr-cli", "k", "np", "list", "cluster-1"]).unwrap();
        assert!(matches!(args.command, Commands::Kubernetes(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["vultr-cli", "account", "get", "--output", "json", "-vv"])
                .unwrap();
        assert_eq!(args.output.as_deref(), Some("json"));
        assert_eq!(args.verbose, 2);
    }
}
