use super::{footer, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{
    ReservedIp, ReservedIpAttach, ReservedIpConvert, ReservedIpCreate, ReservedIpUpdate,
};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ReservedIpCommand {
    #[command(subcommand)]
    command: ReservedIpSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReservedIpSubcommand {
    /// List all reserved IPs
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a reserved IP
    #[command(visible_alias = "g")]
    Get(ReservedIpId),

    /// Create a reserved IP
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Set the label of a reserved IP
    #[command(visible_alias = "label")]
    Update(UpdateArgs),

    /// Delete a reserved IP
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(ReservedIpId),

    /// Attach a reserved IP to an instance
    Attach(AttachArgs),

    /// Detach a reserved IP from its instance
    Detach(ReservedIpId),

    /// Convert an instance IP into a reserved IP
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ReservedIpId {
    #[arg(value_name = "RESERVED-IP-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Region to reserve the IP in
    #[arg(short, long, required = true)]
    region: String,

    /// IP type, 'v4' or 'v6'
    #[arg(short, long = "type", required = true)]
    ip_type: String,

    /// Label for the reserved IP
    #[arg(short, long)]
    label: Option<String>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "RESERVED-IP-ID")]
    id: String,

    /// New label
    #[arg(short, long, required = true)]
    label: String,
}

#[derive(Args, Debug)]
struct AttachArgs {
    #[arg(value_name = "RESERVED-IP-ID")]
    id: String,

    /// Instance to attach to
    #[arg(short, long, required = true)]
    instance_id: String,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Instance IP address to convert
    #[arg(short, long, required = true)]
    ip: String,

    /// Label for the reserved IP
    #[arg(short, long)]
    label: Option<String>,
}

impl ReservedIpCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.reserved_ips();
        match self.command {
            ReservedIpSubcommand::List(_) => {
                let (reserved_ips, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving reserved ip list")?;
                ctx.display(&ReservedIpsPrinter { reserved_ips, meta })?;
            }
            ReservedIpSubcommand::Get(args) => {
                let reserved_ip = service
                    .get(&args.id)
                    .await
                    .context("error getting reserved ip")?;
                ctx.display(&ReservedIpPrinter { reserved_ip })?;
            }
            ReservedIpSubcommand::Create(args) => {
                let req = ReservedIpCreate {
                    region: args.region,
                    ip_type: args.ip_type,
                    label: args.label,
                };
                let reserved_ip = service
                    .create(&req)
                    .await
                    .context("error creating reserved ip")?;
                ctx.display(&ReservedIpPrinter { reserved_ip })?;
            }
            ReservedIpSubcommand::Update(args) => {
                let reserved_ip = service
                    .update(&args.id, &ReservedIpUpdate { label: args.label })
                    .await
                    .context("error updating reserved ip")?;
                ctx.display(&ReservedIpPrinter { reserved_ip })?;
            }
            ReservedIpSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting reserved ip")?;
                ctx.message("reserved ip has been deleted")?;
            }
            ReservedIpSubcommand::Attach(args) => {
                let req = ReservedIpAttach {
                    instance_id: args.instance_id,
                };
                service
                    .attach(&args.id, &req)
                    .await
                    .context("error attaching reserved ip")?;
                ctx.message("reserved ip has been attached")?;
            }
            ReservedIpSubcommand::Detach(args) => {
                service
                    .detach(&args.id)
                    .await
                    .context("error detaching reserved ip")?;
                ctx.message("reserved ip has been detached")?;
            }
            ReservedIpSubcommand::Convert(args) => {
                let req = ReservedIpConvert {
                    ip_address: args.ip,
                    label: args.label,
                };
                let reserved_ip = service
                    .convert(&req)
                    .await
                    .context("error converting ip to reserved ip")?;
                ctx.display(&ReservedIpPrinter { reserved_ip })?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 7] = [
    "ID",
    "REGION",
    "IP TYPE",
    "SUBNET",
    "SUBNET SIZE",
    "LABEL",
    "ATTACHED TO",
];

fn reserved_ip_row(r: &ReservedIp) -> Row {
    vec![
        r.id.clone(),
        r.region.clone(),
        r.ip_type.clone(),
        r.subnet.clone(),
        r.subnet_size.to_string(),
        text_cell(&r.label),
        text_cell(&r.instance_id),
    ]
}

#[derive(Debug, Serialize)]
pub struct ReservedIpsPrinter {
    pub reserved_ips: Vec<ReservedIp>,
    pub meta: Meta,
}

impl Renderable for ReservedIpsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.reserved_ips, COLUMNS.len(), reserved_ip_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct ReservedIpPrinter {
    pub reserved_ip: ReservedIp,
}

impl Renderable for ReservedIpPrinter {
    fn data(&self) -> Vec<Row> {
        COLUMNS
            .iter()
            .zip(reserved_ip_row(&self.reserved_ip))
            .map(|(label, value)| kv(label, value))
            .collect()
    }
}
