use super::{footer, list_cell, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{
    NatGateway, NatGatewayReq, PortForwardingRule, PortForwardingRuleReq, Vpc, VpcCreate,
    VpcUpdate,
};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VpcCommand {
    #[command(subcommand)]
    command: VpcSubcommand,
}

#[derive(Subcommand, Debug)]
enum VpcSubcommand {
    /// List all VPCs
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a VPC
    #[command(visible_alias = "g")]
    Get(VpcId),

    /// Create a VPC
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update the description of a VPC
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete a VPC
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(VpcId),

    /// Commands to manage the NAT gateways of a VPC
    #[command(visible_alias = "ng")]
    NatGateway(NatGatewayCommand),
}

#[derive(Args, Debug)]
struct VpcId {
    #[arg(value_name = "VPC-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Region to create the VPC in
    #[arg(short, long, required = true)]
    region: String,

    /// Description of the VPC
    #[arg(short, long)]
    description: Option<String>,

    /// IPv4 network of the VPC
    #[arg(short, long)]
    subnet: Option<String>,

    /// Prefix length of the IPv4 network
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "VPC-ID")]
    id: String,

    /// New description
    #[arg(short, long, required = true)]
    description: String,
}

#[derive(Args, Debug)]
struct NatGatewayCommand {
    #[command(subcommand)]
    command: NatGatewaySubcommand,
}

#[derive(Subcommand, Debug)]
enum NatGatewaySubcommand {
    /// List the NAT gateways of a VPC
    #[command(visible_alias = "l")]
    List(NatGatewayListArgs),

    /// Get a NAT gateway
    #[command(visible_alias = "g")]
    Get(NatGatewayId),

    /// Create a NAT gateway
    #[command(visible_alias = "c")]
    Create(NatGatewayCreateArgs),

    /// Update a NAT gateway
    #[command(visible_alias = "u")]
    Update(NatGatewayUpdateArgs),

    /// Delete a NAT gateway
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(NatGatewayId),

    /// Commands to manage NAT gateway port forwarding rules
    #[command(visible_alias = "pfr")]
    PortForwardingRule(PortForwardingRuleCommand),
}

#[derive(Args, Debug)]
struct NatGatewayListArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct NatGatewayId {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct NatGatewayCreateArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    /// Label for the NAT gateway
    #[arg(short, long)]
    label: Option<String>,

    /// Tag for the NAT gateway
    #[arg(short, long)]
    tag: Option<String>,
}

#[derive(Args, Debug)]
struct NatGatewayUpdateArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    id: String,

    /// New label
    #[arg(short, long)]
    label: Option<String>,

    /// New tag
    #[arg(short, long)]
    tag: Option<String>,
}

#[derive(Args, Debug)]
struct PortForwardingRuleCommand {
    #[command(subcommand)]
    command: PortForwardingRuleSubcommand,
}

#[derive(Subcommand, Debug)]
enum PortForwardingRuleSubcommand {
    /// List the port forwarding rules of a NAT gateway
    #[command(visible_alias = "l")]
    List(RuleListArgs),

    /// Get a port forwarding rule
    #[command(visible_alias = "g")]
    Get(RuleId),

    /// Create a port forwarding rule
    #[command(visible_alias = "c")]
    Create(RuleCreateArgs),

    /// Update a port forwarding rule
    #[command(visible_alias = "u")]
    Update(RuleUpdateArgs),

    /// Delete a port forwarding rule
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(RuleId),
}

#[derive(Args, Debug)]
struct RuleListArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    gateway_id: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct RuleId {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    gateway_id: String,

    #[arg(value_name = "RULE-ID")]
    id: String,
}

/// Port forwarding rule fields shared by create and update.
#[derive(Args, Debug)]
struct RuleFields {
    /// Name of the rule
    #[arg(short, long)]
    name: Option<String>,

    /// Description of the rule
    #[arg(short, long)]
    description: Option<String>,

    /// Internal IP to forward to
    #[arg(long)]
    internal_ip: Option<String>,

    /// Protocol, 'tcp', 'udp' or 'both'
    #[arg(short, long)]
    protocol: Option<String>,

    /// External port
    #[arg(long)]
    external_port: Option<u32>,

    /// Internal port
    #[arg(long)]
    internal_port: Option<u32>,

    /// Whether the rule is enabled
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    enabled: Option<bool>,
}

impl From<RuleFields> for PortForwardingRuleReq {
    fn from(f: RuleFields) -> Self {
        Self {
            name: f.name,
            description: f.description,
            internal_ip: f.internal_ip,
            protocol: f.protocol,
            external_port: f.external_port,
            internal_port: f.internal_port,
            enabled: f.enabled,
        }
    }
}

#[derive(Args, Debug)]
struct RuleCreateArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    gateway_id: String,

    #[command(flatten)]
    fields: RuleFields,
}

#[derive(Args, Debug)]
struct RuleUpdateArgs {
    #[arg(value_name = "VPC-ID")]
    vpc_id: String,

    #[arg(value_name = "NAT-GATEWAY-ID")]
    gateway_id: String,

    #[arg(value_name = "RULE-ID")]
    id: String,

    #[command(flatten)]
    fields: RuleFields,
}

impl VpcCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.vpcs();
        match self.command {
            VpcSubcommand::List(_) => {
                let (vpcs, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving vpc list")?;
                ctx.display(&VpcsPrinter { vpcs, meta })?;
            }
            VpcSubcommand::Get(args) => {
                let vpc = service.get(&args.id).await.context("error getting vpc")?;
                ctx.display(&VpcPrinter { vpc })?;
            }
            VpcSubcommand::Create(args) => {
                let req = VpcCreate {
                    region: args.region,
                    description: args.description,
                    v4_subnet: args.subnet,
                    v4_subnet_mask: args.size,
                };
                let vpc = service.create(&req).await.context("error creating vpc")?;
                ctx.display(&VpcPrinter { vpc })?;
            }
            VpcSubcommand::Update(args) => {
                let req = VpcUpdate {
                    description: args.description,
                };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating vpc")?;
                ctx.message("vpc has been updated")?;
            }
            VpcSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting vpc")?;
                ctx.message("vpc has been deleted")?;
            }
            VpcSubcommand::NatGateway(cmd) => return cmd.execute(ctx).await,
        }
        Ok(())
    }
}

impl NatGatewayCommand {
    async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.vpcs();
        match self.command {
            NatGatewaySubcommand::List(args) => {
                let (nat_gateways, meta) = service
                    .list_nat_gateways(&args.vpc_id, &ctx.paging)
                    .await
                    .context("error retrieving nat gateway list")?;
                ctx.display(&NatGatewaysPrinter { nat_gateways, meta })?;
            }
            NatGatewaySubcommand::Get(args) => {
                let nat_gateway = service
                    .get_nat_gateway(&args.vpc_id, &args.id)
                    .await
                    .context("error getting nat gateway")?;
                ctx.display(&NatGatewayPrinter { nat_gateway })?;
            }
            NatGatewaySubcommand::Create(args) => {
                let req = NatGatewayReq {
                    label: args.label,
                    tag: args.tag,
                };
                let nat_gateway = service
                    .create_nat_gateway(&args.vpc_id, &req)
                    .await
                    .context("error creating nat gateway")?;
                ctx.display(&NatGatewayPrinter { nat_gateway })?;
            }
            NatGatewaySubcommand::Update(args) => {
                let req = NatGatewayReq {
                    label: args.label,
                    tag: args.tag,
                };
                let nat_gateway = service
                    .update_nat_gateway(&args.vpc_id, &args.id, &req)
                    .await
                    .context("error updating nat gateway")?;
                ctx.display(&NatGatewayPrinter { nat_gateway })?;
            }
            NatGatewaySubcommand::Delete(args) => {
                service
                    .delete_nat_gateway(&args.vpc_id, &args.id)
                    .await
                    .context("error deleting nat gateway")?;
                ctx.message("nat gateway has been deleted")?;
            }
            NatGatewaySubcommand::PortForwardingRule(cmd) => return cmd.execute(ctx).await,
        }
        Ok(())
    }
}

impl PortForwardingRuleCommand {
    async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.vpcs();
        match self.command {
            PortForwardingRuleSubcommand::List(args) => {
                let (port_forwarding_rules, meta) = service
                    .list_port_forwarding_rules(&args.vpc_id, &args.gateway_id, &ctx.paging)
                    .await
                    .context("error retrieving port forwarding rule list")?;
                ctx.display(&PortForwardingRulesPrinter {
                    port_forwarding_rules,
                    meta,
                })?;
            }
            PortForwardingRuleSubcommand::Get(args) => {
                let port_forwarding_rule = service
                    .get_port_forwarding_rule(&args.vpc_id, &args.gateway_id, &args.id)
                    .await
                    .context("error getting port forwarding rule")?;
                ctx.display(&PortForwardingRulePrinter {
                    port_forwarding_rule,
                })?;
            }
            PortForwardingRuleSubcommand::Create(args) => {
                let req = PortForwardingRuleReq::from(args.fields);
                let port_forwarding_rule = service
                    .create_port_forwarding_rule(&args.vpc_id, &args.gateway_id, &req)
                    .await
                    .context("error creating port forwarding rule")?;
                ctx.display(&PortForwardingRulePrinter {
                    port_forwarding_rule,
                })?;
            }
            PortForwardingRuleSubcommand::Update(args) => {
                let req = PortForwardingRuleReq::from(args.fields);
                let port_forwarding_rule = service
                    .update_port_forwarding_rule(&args.vpc_id, &args.gateway_id, &args.id, &req)
                    .await
                    .context("error updating port forwarding rule")?;
                ctx.display(&PortForwardingRulePrinter {
                    port_forwarding_rule,
                })?;
            }
            PortForwardingRuleSubcommand::Delete(args) => {
                service
                    .delete_port_forwarding_rule(&args.vpc_id, &args.gateway_id, &args.id)
                    .await
                    .context("error deleting port forwarding rule")?;
                ctx.message("port forwarding rule has been deleted")?;
            }
        }
        Ok(())
    }
}

const VPC_COLUMNS: [&str; 6] = [
    "ID",
    "REGION",
    "DESCRIPTION",
    "V4 SUBNET",
    "V4 SUBNET MASK",
    "DATE CREATED",
];

fn vpc_row(v: &Vpc) -> Row {
    vec![
        v.id.clone(),
        v.region.clone(),
        text_cell(&v.description),
        v.v4_subnet.clone(),
        v.v4_subnet_mask.to_string(),
        v.date_created.clone(),
    ]
}

#[derive(Debug, Serialize)]
pub struct VpcsPrinter {
    pub vpcs: Vec<Vpc>,
    pub meta: Meta,
}

impl Renderable for VpcsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(VPC_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.vpcs, VPC_COLUMNS.len(), vpc_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct VpcPrinter {
    pub vpc: Vpc,
}

impl Renderable for VpcPrinter {
    fn data(&self) -> Vec<Row> {
        VPC_COLUMNS
            .iter()
            .zip(vpc_row(&self.vpc))
            .map(|(label, value)| kv(label, value))
            .collect()
    }
}

const NAT_COLUMNS: [&str; 7] = [
    "ID",
    "DATE CREATED",
    "STATUS",
    "LABEL",
    "TAG",
    "PUBLIC IPS",
    "PRIVATE IPS",
];

#[derive(Debug, Serialize)]
pub struct NatGatewaysPrinter {
    pub nat_gateways: Vec<NatGateway>,
    pub meta: Meta,
}

impl Renderable for NatGatewaysPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(NAT_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.nat_gateways, NAT_COLUMNS.len(), |n| {
            vec![
                n.id.clone(),
                n.date_created.clone(),
                n.status.clone(),
                text_cell(&n.label),
                text_cell(&n.tag),
                list_cell(&n.public_ips),
                list_cell(&n.private_ips),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct NatGatewayPrinter {
    pub nat_gateway: NatGateway,
}

impl Renderable for NatGatewayPrinter {
    fn data(&self) -> Vec<Row> {
        let n = &self.nat_gateway;
        vec![
            kv("ID", &n.id),
            kv("VPC ID", &n.vpc_id),
            kv("DATE CREATED", &n.date_created),
            kv("STATUS", &n.status),
            kv("LABEL", text_cell(&n.label)),
            kv("TAG", text_cell(&n.tag)),
            kv("PUBLIC IPS", list_cell(&n.public_ips)),
            kv("PUBLIC IPS V6", list_cell(&n.public_ips_v6)),
            kv("PRIVATE IPS", list_cell(&n.private_ips)),
            vec!["BILLING".to_string()],
            kv("CHARGES", format!("{:.2}", n.billing.charges)),
            kv("MONTHLY", format!("{:.2}", n.billing.monthly)),
        ]
    }
}

const RULE_COLUMNS: [&str; 8] = [
    "ID",
    "NAME",
    "DESCRIPTION",
    "INTERNAL IP",
    "PROTOCOL",
    "EXTERNAL PORT",
    "INTERNAL PORT",
    "ENABLED",
];

fn rule_row(r: &PortForwardingRule) -> Row {
    vec![
        r.id.clone(),
        r.name.clone(),
        text_cell(&r.description),
        r.internal_ip.clone(),
        r.protocol.clone(),
        r.external_port.to_string(),
        r.internal_port.to_string(),
        r.enabled.to_string(),
    ]
}

#[derive(Debug, Serialize)]
pub struct PortForwardingRulesPrinter {
    pub port_forwarding_rules: Vec<PortForwardingRule>,
    pub meta: Meta,
}

impl Renderable for PortForwardingRulesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(RULE_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.port_forwarding_rules, RULE_COLUMNS.len(), rule_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct PortForwardingRulePrinter {
    pub port_forwarding_rule: PortForwardingRule,
}

impl Renderable for PortForwardingRulePrinter {
    fn data(&self) -> Vec<Row> {
        RULE_COLUMNS
            .iter()
            .zip(rule_row(&self.port_forwarding_rule))
            .map(|(label, value)| kv(label, value))
            .collect()
    }
}
