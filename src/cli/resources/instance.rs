use super::{footer, list_cell, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{Instance, InstanceCreate, InstanceReinstall, InstanceUpdate};
use crate::domain::paging::Meta;
use crate::shared::CliError;
use anyhow::Context as _;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{ArgGroup, Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InstanceCommand {
    #[command(subcommand)]
    command: InstanceSubcommand,
}

#[derive(Subcommand, Debug)]
enum InstanceSubcommand {
    /// List all available instances
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get info about one instance
    #[command(visible_alias = "g")]
    Get(InstanceId),

    /// Create an instance
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update an instance
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete an instance
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(InstanceId),

    /// Start a stopped instance
    Start(InstanceId),

    /// Stop a running instance
    #[command(visible_alias = "halt")]
    Stop(InstanceId),

    /// Restart an instance
    #[command(visible_alias = "reboot")]
    Restart(InstanceId),

    /// Reinstall the operating system of an instance
    Reinstall(ReinstallArgs),
}

#[derive(Args, Debug)]
struct InstanceId {
    #[arg(value_name = "INSTANCE-ID")]
    id: String,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["os", "iso", "snapshot", "app", "image"])
))]
struct CreateArgs {
    /// Region to deploy in
    #[arg(short, long, required = true)]
    region: String,

    /// Plan to deploy
    #[arg(short, long, required = true)]
    plan: String,

    /// Operating system ID
    #[arg(long)]
    os: Option<u32>,

    /// ISO ID to boot from
    #[arg(long)]
    iso: Option<String>,

    /// Snapshot ID to restore
    #[arg(long)]
    snapshot: Option<String>,

    /// Marketplace application ID
    #[arg(short, long)]
    app: Option<u32>,

    /// Marketplace image ID
    #[arg(long)]
    image: Option<String>,

    /// Startup script ID
    #[arg(long)]
    script_id: Option<String>,

    /// Label for the instance
    #[arg(short, long)]
    label: Option<String>,

    /// Hostname for the instance
    #[arg(long)]
    host: Option<String>,

    /// Comma separated tags
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Comma separated SSH key IDs
    #[arg(short, long, value_delimiter = ',')]
    ssh_keys: Vec<String>,

    /// Enable IPv6
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    ipv6: Option<bool>,

    /// Enable automatic backups
    #[arg(short = 'b', long, num_args = 0..=1, default_missing_value = "true")]
    auto_backup: Option<bool>,

    /// Plain text cloud-init user data
    #[arg(short, long)]
    userdata: Option<String>,

    /// Enable DDoS protection
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    ddos: Option<bool>,

    /// Send an activation email when ready
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    notify: Option<bool>,

    /// Firewall group to assign
    #[arg(long)]
    firewall_group: Option<String>,

    /// Reserved IPv4 to assign
    #[arg(long)]
    reserved_ipv4: Option<String>,

    /// Comma separated VPC IDs to attach
    #[arg(long, value_delimiter = ',')]
    vpc_ids: Vec<String>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "INSTANCE-ID")]
    id: String,

    /// New label
    #[arg(short, long)]
    label: Option<String>,

    /// Replace the instance tags with this comma separated list
    #[arg(long, value_delimiter = ',')]
    tags: Option<Vec<String>>,

    /// Upgrade to this plan
    #[arg(short, long)]
    plan: Option<String>,

    /// Firewall group to assign
    #[arg(long)]
    firewall_group: Option<String>,

    /// Enable IPv6
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    ipv6: Option<bool>,

    /// Enable automatic backups
    #[arg(short = 'b', long, num_args = 0..=1, default_missing_value = "true")]
    auto_backup: Option<bool>,

    /// Enable DDoS protection
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    ddos: Option<bool>,
}

#[derive(Args, Debug)]
struct ReinstallArgs {
    #[arg(value_name = "INSTANCE-ID")]
    id: String,

    /// New hostname
    #[arg(long)]
    host: Option<String>,
}

fn backups(enabled: Option<bool>) -> Option<String> {
    enabled.map(|on| if on { "enabled" } else { "disabled" }.to_string())
}

impl InstanceCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.instances();
        match self.command {
            InstanceSubcommand::List(_) => {
                let (instances, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving instance list")?;
                ctx.display(&InstancesPrinter { instances, meta })?;
            }
            InstanceSubcommand::Get(args) => {
                let instance = service
                    .get(&args.id)
                    .await
                    .context("error getting instance")?;
                ctx.display(&InstancePrinter { instance })?;
            }
            InstanceSubcommand::Create(args) => {
                let req = InstanceCreate {
                    region: args.region,
                    plan: args.plan,
                    os_id: args.os,
                    iso_id: args.iso,
                    snapshot_id: args.snapshot,
                    app_id: args.app,
                    image_id: args.image,
                    script_id: args.script_id,
                    label: args.label,
                    hostname: args.host,
                    tags: args.tags,
                    sshkey_id: args.ssh_keys,
                    enable_ipv6: args.ipv6,
                    backups: backups(args.auto_backup),
                    user_data: args.userdata.map(|data| STANDARD.encode(data)),
                    ddos_protection: args.ddos,
                    activation_email: args.notify,
                    firewall_group_id: args.firewall_group,
                    reserved_ipv4: args.reserved_ipv4,
                    attach_vpc: args.vpc_ids,
                };
                let instance = service
                    .create(&req)
                    .await
                    .context("error creating instance")?;
                ctx.display(&InstancePrinter { instance })?;
            }
            InstanceSubcommand::Update(args) => {
                let req = InstanceUpdate {
                    label: args.label,
                    tags: args.tags,
                    plan: args.plan,
                    firewall_group_id: args.firewall_group,
                    enable_ipv6: args.ipv6,
                    backups: backups(args.auto_backup),
                    ddos_protection: args.ddos,
                };
                if req.is_empty() {
                    return Err(CliError::usage("no instance fields to update were given"))
                        .context("error updating instance");
                }
                let instance = service
                    .update(&args.id, &req)
                    .await
                    .context("error updating instance")?;
                ctx.display(&InstancePrinter { instance })?;
            }
            InstanceSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting instance")?;
                ctx.message("instance has been deleted")?;
            }
            InstanceSubcommand::Start(args) => {
                service
                    .start(&args.id)
                    .await
                    .context("error starting instance")?;
                ctx.message("instance has been started")?;
            }
            InstanceSubcommand::Stop(args) => {
                service
                    .halt(&args.id)
                    .await
                    .context("error stopping instance")?;
                ctx.message("instance has been stopped")?;
            }
            InstanceSubcommand::Restart(args) => {
                service
                    .reboot(&args.id)
                    .await
                    .context("error restarting instance")?;
                ctx.message("instance has been restarted")?;
            }
            InstanceSubcommand::Reinstall(args) => {
                let req = InstanceReinstall {
                    hostname: args.host,
                };
                let instance = service
                    .reinstall(&args.id, &req)
                    .await
                    .context("error reinstalling instance")?;
                ctx.display(&InstancePrinter { instance })?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 10] = [
    "ID", "IP", "LABEL", "OS", "STATUS", "REGION", "CPU", "RAM", "DISK", "BANDWIDTH",
];

#[derive(Debug, Serialize)]
pub struct InstancesPrinter {
    pub instances: Vec<Instance>,
    pub meta: Meta,
}

impl Renderable for InstancesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.instances, COLUMNS.len(), |i| {
            vec![
                i.id.clone(),
                i.main_ip.clone(),
                text_cell(&i.label),
                i.os.clone(),
                i.status.clone(),
                i.region.clone(),
                i.vcpu_count.to_string(),
                i.ram.to_string(),
                i.disk.to_string(),
                i.allowed_bandwidth.to_string(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct InstancePrinter {
    pub instance: Instance,
}

impl Renderable for InstancePrinter {
    fn data(&self) -> Vec<Row> {
        let i = &self.instance;
        vec![
            kv("ID", &i.id),
            kv("OS", &i.os),
            kv("RAM", i.ram),
            kv("DISK", i.disk),
            kv("MAIN IP", &i.main_ip),
            kv("VCPU COUNT", i.vcpu_count),
            kv("REGION", &i.region),
            kv("PLAN", &i.plan),
            kv("DATE CREATED", &i.date_created),
            kv("STATUS", &i.status),
            kv("ALLOWED BANDWIDTH", i.allowed_bandwidth),
            kv("NETMASK V4", &i.netmask_v4),
            kv("GATEWAY V4", &i.gateway_v4),
            kv("POWER STATUS", &i.power_status),
            kv("SERVER STATE", &i.server_status),
            kv("V6 NETWORK", text_cell(&i.v6_network)),
            kv("V6 MAIN IP", text_cell(&i.v6_main_ip)),
            kv("V6 NETWORK SIZE", i.v6_network_size),
            kv("LABEL", text_cell(&i.label)),
            kv("INTERNAL IP", text_cell(&i.internal_ip)),
            kv("KVM", &i.kvm),
            kv("HOSTNAME", &i.hostname),
            kv("OS ID", i.os_id),
            kv("APP ID", i.app_id),
            kv("IMAGE ID", text_cell(&i.image_id)),
            kv("FIREWALL GROUP ID", text_cell(&i.firewall_group_id)),
            kv("FEATURES", list_cell(&i.features)),
            kv("TAGS", list_cell(&i.tags)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backups_flag() {
        assert_eq!(backups(Some(true)).as_deref(), Some("enabled"));
        assert_eq!(backups(Some(false)).as_deref(), Some("disabled"));
        assert_eq!(backups(None), None);
    }
}
