use super::{footer, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{Vpc2, Vpc2Create, Vpc2Node, Vpc2Nodes, Vpc2Update};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct Vpc2Command {
    #[command(subcommand)]
    command: Vpc2Subcommand,
}

#[derive(Subcommand, Debug)]
enum Vpc2Subcommand {
    /// List all VPC 2.0 networks
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a VPC 2.0 network
    #[command(visible_alias = "g")]
    Get(Vpc2Id),

    /// Create a VPC 2.0 network
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update the description of a VPC 2.0 network
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete a VPC 2.0 network
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(Vpc2Id),

    /// Commands to manage the nodes attached to a VPC 2.0 network
    #[command(visible_alias = "n")]
    Nodes(NodesCommand),
}

#[derive(Args, Debug)]
struct Vpc2Id {
    #[arg(value_name = "VPC2-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Region to create the network in
    #[arg(short, long, required = true)]
    region: String,

    /// Description of the network
    #[arg(short, long)]
    description: Option<String>,

    /// IP type of the network, only 'v4' is supported
    #[arg(long)]
    ip_type: Option<String>,

    /// Subnet IP address of the network
    #[arg(long)]
    ip_block: Option<String>,

    /// Number of bits of the netmask in CIDR notation
    #[arg(short, long)]
    prefix_length: Option<u32>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "VPC2-ID")]
    id: String,

    /// New description
    #[arg(short, long, required = true)]
    description: String,
}

#[derive(Args, Debug)]
struct NodesCommand {
    #[command(subcommand)]
    command: NodesSubcommand,
}

#[derive(Subcommand, Debug)]
enum NodesSubcommand {
    /// List the nodes attached to a network
    #[command(visible_alias = "l")]
    List(NodesListArgs),

    /// Attach nodes to a network
    #[command(visible_alias = "a")]
    Attach(NodesArgs),

    /// Detach nodes from a network
    #[command(visible_alias = "d")]
    Detach(NodesArgs),
}

#[derive(Args, Debug)]
struct NodesListArgs {
    #[arg(value_name = "VPC2-ID")]
    id: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct NodesArgs {
    #[arg(value_name = "VPC2-ID")]
    id: String,

    /// Instance IDs, comma separated
    #[arg(short, long, required = true, value_delimiter = ',')]
    nodes: Vec<String>,
}

impl Vpc2Command {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.vpc2();
        match self.command {
            Vpc2Subcommand::List(_) => {
                let (vpcs, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving vpc2 list")?;
                ctx.display(&Vpc2sPrinter { vpcs, meta })?;
            }
            Vpc2Subcommand::Get(args) => {
                let vpc = service.get(&args.id).await.context("error getting vpc2")?;
                ctx.display(&Vpc2Printer { vpc })?;
            }
            Vpc2Subcommand::Create(args) => {
                let req = Vpc2Create {
                    region: args.region,
                    description: args.description,
                    ip_type: args.ip_type,
                    ip_block: args.ip_block,
                    prefix_length: args.prefix_length,
                };
                let vpc = service.create(&req).await.context("error creating vpc2")?;
                ctx.display(&Vpc2Printer { vpc })?;
            }
            Vpc2Subcommand::Update(args) => {
                let req = Vpc2Update {
                    description: args.description,
                };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating vpc2")?;
                ctx.message("vpc2 has been updated")?;
            }
            Vpc2Subcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting vpc2")?;
                ctx.message("vpc2 has been deleted")?;
            }
            Vpc2Subcommand::Nodes(cmd) => match cmd.command {
                NodesSubcommand::List(args) => {
                    let (nodes, meta) = service
                        .list_nodes(&args.id, &ctx.paging)
                        .await
                        .context("error retrieving vpc2 node list")?;
                    ctx.display(&NodesPrinter { nodes, meta })?;
                }
                NodesSubcommand::Attach(args) => {
                    let req = Vpc2Nodes { nodes: args.nodes };
                    service
                        .attach_nodes(&args.id, &req)
                        .await
                        .context("error attaching nodes to vpc2")?;
                    ctx.message("nodes have been attached")?;
                }
                NodesSubcommand::Detach(args) => {
                    let req = Vpc2Nodes { nodes: args.nodes };
                    service
                        .detach_nodes(&args.id, &req)
                        .await
                        .context("error detaching nodes from vpc2")?;
                    ctx.message("nodes have been detached")?;
                }
            },
        }
        Ok(())
    }
}

const VPC2_COLUMNS: [&str; 6] = [
    "ID",
    "DATE CREATED",
    "REGION",
    "DESCRIPTION",
    "IP BLOCK",
    "PREFIX LENGTH",
];

fn vpc2_row(v: &Vpc2) -> Row {
    vec![
        v.id.clone(),
        v.date_created.clone(),
        v.region.clone(),
        text_cell(&v.description),
        v.ip_block.clone(),
        v.prefix_length.to_string(),
    ]
}

#[derive(Debug, Serialize)]
pub struct Vpc2sPrinter {
    pub vpcs: Vec<Vpc2>,
    pub meta: Meta,
}

impl Renderable for Vpc2sPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(VPC2_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.vpcs, VPC2_COLUMNS.len(), vpc2_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct Vpc2Printer {
    pub vpc: Vpc2,
}

impl Renderable for Vpc2Printer {
    fn data(&self) -> Vec<Row> {
        VPC2_COLUMNS
            .iter()
            .zip(vpc2_row(&self.vpc))
            .map(|(label, value)| kv(label, value))
            .collect()
    }
}

const NODE_COLUMNS: [&str; 6] = [
    "ID",
    "IP ADDRESS",
    "MAC ADDRESS",
    "DESCRIPTION",
    "TYPE",
    "STATUS",
];

#[derive(Debug, Serialize)]
pub struct NodesPrinter {
    pub nodes: Vec<Vpc2Node>,
    pub meta: Meta,
}

impl Renderable for NodesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(NODE_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.nodes, NODE_COLUMNS.len(), |n| {
            vec![
                n.id.clone(),
                n.ip_address.clone(),
                n.mac_address.to_string(),
                text_cell(&n.description),
                n.node_type.clone(),
                n.node_status.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::CliArgs;
    use clap::Parser;

    #[test]
    fn test_nodes_split_on_commas() {
        let args =
            CliArgs::try_parse_from(["vultr-cli", "vpc2", "nodes", "attach", "v1", "-n", "a,b"])
                .unwrap();
        let rendered = format!("{args:?}");
        assert!(rendered.contains(r#"nodes: ["a", "b"]"#), "{rendered}");
    }
}
