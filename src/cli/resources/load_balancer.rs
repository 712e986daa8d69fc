use super::{footer, list_cell, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::compose::{compose_firewall_rules, compose_forwarding_rules};
use crate::domain::models::{
    ForwardingRule, HealthCheckReq, LbFirewallRule, LoadBalancer, LoadBalancerReq,
    StickySessions,
};
use crate::domain::paging::Meta;
use crate::shared::error::CliError;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct LoadBalancerCommand {
    #[command(subcommand)]
    command: LoadBalancerSubcommand,
}

#[derive(Subcommand, Debug)]
enum LoadBalancerSubcommand {
    /// List all load balancers
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a load balancer
    #[command(visible_alias = "g")]
    Get(LoadBalancerId),

    /// Create a load balancer
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update a load balancer
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete a load balancer
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(LoadBalancerId),

    /// Commands to manage the forwarding rules of a load balancer
    #[command(visible_alias = "rule")]
    ForwardingRule(ForwardingRuleCommand),

    /// Commands to view the firewall rules of a load balancer
    #[command(visible_alias = "fw")]
    FirewallRule(FirewallRuleCommand),
}

#[derive(Args, Debug)]
struct LoadBalancerId {
    #[arg(value_name = "LOAD-BALANCER-ID")]
    id: String,
}

/// Settings shared by create and update.
#[derive(Args, Debug)]
struct LoadBalancerFields {
    /// Label for the load balancer
    #[arg(short, long)]
    label: Option<String>,

    /// Balancing algorithm, 'roundrobin' or 'leastconn'
    #[arg(short, long)]
    balancing_algorithm: Option<String>,

    /// Redirect HTTP traffic to HTTPS
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    ssl_redirect: Option<bool>,

    /// Enable HTTP/2
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    http2: Option<bool>,

    /// Enable the proxy protocol
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    proxy_protocol: Option<bool>,

    /// Number of load balancer nodes, must be odd
    #[arg(short, long)]
    nodes: Option<u32>,

    /// Health check protocol
    #[arg(long)]
    protocol: Option<String>,

    /// Health check port
    #[arg(long)]
    port: Option<u32>,

    /// Health check HTTP path
    #[arg(long)]
    path: Option<String>,

    /// Seconds between health checks
    #[arg(long)]
    check_interval: Option<u32>,

    /// Seconds to wait for a health check response
    #[arg(long)]
    response_timeout: Option<u32>,

    /// Failed checks before an instance is unhealthy
    #[arg(long)]
    unhealthy_threshold: Option<u32>,

    /// Successful checks before an instance is healthy
    #[arg(long)]
    healthy_threshold: Option<u32>,

    /// Cookie name for sticky sessions
    #[arg(short, long)]
    cookie_name: Option<String>,

    /// Forwarding rules, e.g.
    /// "frontend_protocol:http,frontend_port:80,backend_protocol:http,backend_port:80"
    /// with groups separated by '/'
    #[arg(short, long)]
    forwarding_rules: Option<String>,

    /// Firewall rules, e.g. "port:80,ip_type:v4,source:0.0.0.0/0"
    /// with groups separated by '/'
    #[arg(short = 'w', long)]
    firewall_rules: Option<String>,

    /// Attached instance IDs, comma separated
    #[arg(short, long, value_delimiter = ',')]
    instances: Vec<String>,

    /// VPC to attach the load balancer to
    #[arg(long)]
    vpc: Option<String>,
}

impl LoadBalancerFields {
    /// Build the request body. Rule strings are parsed before anything is
    /// sent.
    fn into_request(self, region: Option<String>) -> Result<LoadBalancerReq, CliError> {
        let forwarding_rules = match self.forwarding_rules.as_deref() {
            Some(spec) => compose_forwarding_rules(spec)?,
            None => Vec::new(),
        };
        let firewall_rules = match self.firewall_rules.as_deref() {
            Some(spec) => compose_firewall_rules(spec)?,
            None => Vec::new(),
        };

        let health_check = HealthCheckReq {
            protocol: self.protocol,
            port: self.port,
            path: self.path,
            check_interval: self.check_interval,
            response_timeout: self.response_timeout,
            unhealthy_threshold: self.unhealthy_threshold,
            healthy_threshold: self.healthy_threshold,
        };

        Ok(LoadBalancerReq {
            region,
            label: self.label,
            balancing_algorithm: self.balancing_algorithm,
            ssl_redirect: self.ssl_redirect,
            http2: self.http2,
            proxy_protocol: self.proxy_protocol,
            nodes: self.nodes,
            health_check: (!health_check.is_empty()).then_some(health_check),
            sticky_session: self
                .cookie_name
                .map(|cookie_name| StickySessions { cookie_name }),
            forwarding_rules,
            firewall_rules,
            instances: self.instances,
            vpc: self.vpc,
        })
    }
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Region to create the load balancer in
    #[arg(short, long, required = true)]
    region: String,

    #[command(flatten)]
    fields: LoadBalancerFields,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "LOAD-BALANCER-ID")]
    id: String,

    #[command(flatten)]
    fields: LoadBalancerFields,
}

#[derive(Args, Debug)]
struct ForwardingRuleCommand {
    #[command(subcommand)]
    command: ForwardingRuleSubcommand,
}

#[derive(Subcommand, Debug)]
enum ForwardingRuleSubcommand {
    /// List the forwarding rules of a load balancer
    #[command(visible_alias = "l")]
    List(RuleListArgs),

    /// Get a forwarding rule
    #[command(visible_alias = "g")]
    Get(RuleId),

    /// Create a forwarding rule
    #[command(visible_alias = "c")]
    Create(RuleCreateArgs),

    /// Delete a forwarding rule
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(RuleId),
}

#[derive(Args, Debug)]
struct FirewallRuleCommand {
    #[command(subcommand)]
    command: FirewallRuleSubcommand,
}

#[derive(Subcommand, Debug)]
enum FirewallRuleSubcommand {
    /// List the firewall rules of a load balancer
    #[command(visible_alias = "l")]
    List(RuleListArgs),

    /// Get a firewall rule
    #[command(visible_alias = "g")]
    Get(RuleId),
}

#[derive(Args, Debug)]
struct RuleListArgs {
    #[arg(value_name = "LOAD-BALANCER-ID")]
    id: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct RuleId {
    #[arg(value_name = "LOAD-BALANCER-ID")]
    id: String,

    #[arg(value_name = "RULE-ID")]
    rule_id: String,
}

#[derive(Args, Debug)]
struct RuleCreateArgs {
    #[arg(value_name = "LOAD-BALANCER-ID")]
    id: String,

    /// Frontend protocol, 'http', 'https' or 'tcp'
    #[arg(short, long, required = true)]
    frontend_protocol: String,

    /// Frontend port
    #[arg(short = 'p', long, required = true)]
    frontend_port: u32,

    /// Backend protocol, 'http', 'https' or 'tcp'
    #[arg(short, long, required = true)]
    backend_protocol: String,

    /// Backend port
    #[arg(short = 'q', long, required = true)]
    backend_port: u32,
}

impl LoadBalancerCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.load_balancers();
        match self.command {
            LoadBalancerSubcommand::List(_) => {
                let (load_balancers, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving load balancer list")?;
                ctx.display(&LoadBalancersPrinter {
                    load_balancers,
                    meta,
                })?;
            }
            LoadBalancerSubcommand::Get(args) => {
                let load_balancer = service
                    .get(&args.id)
                    .await
                    .context("error getting load balancer")?;
                ctx.display(&LoadBalancerPrinter { load_balancer })?;
            }
            LoadBalancerSubcommand::Create(args) => {
                let req = args.fields.into_request(Some(args.region))?;
                let load_balancer = service
                    .create(&req)
                    .await
                    .context("error creating load balancer")?;
                ctx.display(&LoadBalancerPrinter { load_balancer })?;
            }
            LoadBalancerSubcommand::Update(args) => {
                let req = args.fields.into_request(None)?;
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating load balancer")?;
                ctx.message("load balancer has been updated")?;
            }
            LoadBalancerSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting load balancer")?;
                ctx.message("load balancer has been deleted")?;
            }
            LoadBalancerSubcommand::ForwardingRule(cmd) => match cmd.command {
                ForwardingRuleSubcommand::List(args) => {
                    let (forwarding_rules, meta) = service
                        .list_forwarding_rules(&args.id, &ctx.paging)
                        .await
                        .context("error retrieving forwarding rule list")?;
                    ctx.display(&ForwardingRulesPrinter {
                        forwarding_rules,
                        meta,
                    })?;
                }
                ForwardingRuleSubcommand::Get(args) => {
                    let forwarding_rule = service
                        .get_forwarding_rule(&args.id, &args.rule_id)
                        .await
                        .context("error getting forwarding rule")?;
                    ctx.display(&ForwardingRulePrinter { forwarding_rule })?;
                }
                ForwardingRuleSubcommand::Create(args) => {
                    let rule = ForwardingRule {
                        id: String::new(),
                        frontend_protocol: args.frontend_protocol,
                        frontend_port: args.frontend_port,
                        backend_protocol: args.backend_protocol,
                        backend_port: args.backend_port,
                    };
                    let forwarding_rule = service
                        .create_forwarding_rule(&args.id, &rule)
                        .await
                        .context("error creating forwarding rule")?;
                    ctx.display(&ForwardingRulePrinter { forwarding_rule })?;
                }
                ForwardingRuleSubcommand::Delete(args) => {
                    service
                        .delete_forwarding_rule(&args.id, &args.rule_id)
                        .await
                        .context("error deleting forwarding rule")?;
                    ctx.message("forwarding rule has been deleted")?;
                }
            },
            LoadBalancerSubcommand::FirewallRule(cmd) => match cmd.command {
                FirewallRuleSubcommand::List(args) => {
                    let (firewall_rules, meta) = service
                        .list_firewall_rules(&args.id, &ctx.paging)
                        .await
                        .context("error retrieving firewall rule list")?;
                    ctx.display(&FirewallRulesPrinter {
                        firewall_rules,
                        meta,
                    })?;
                }
                FirewallRuleSubcommand::Get(args) => {
                    let firewall_rule = service
                        .get_firewall_rule(&args.id, &args.rule_id)
                        .await
                        .context("error getting firewall rule")?;
                    ctx.display(&FirewallRulePrinter { firewall_rule })?;
                }
            },
        }
        Ok(())
    }
}

const LB_COLUMNS: [&str; 8] = [
    "ID",
    "DATE CREATED",
    "REGION",
    "LABEL",
    "STATUS",
    "IPV4",
    "IPV6",
    "NODES",
];

fn lb_row(lb: &LoadBalancer) -> Row {
    vec![
        lb.id.clone(),
        lb.date_created.clone(),
        lb.region.clone(),
        text_cell(&lb.label),
        lb.status.clone(),
        lb.ipv4.clone(),
        text_cell(&lb.ipv6),
        lb.nodes.to_string(),
    ]
}

#[derive(Debug, Serialize)]
pub struct LoadBalancersPrinter {
    pub load_balancers: Vec<LoadBalancer>,
    pub meta: Meta,
}

impl Renderable for LoadBalancersPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(LB_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.load_balancers, LB_COLUMNS.len(), lb_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct LoadBalancerPrinter {
    pub load_balancer: LoadBalancer,
}

impl Renderable for LoadBalancerPrinter {
    fn data(&self) -> Vec<Row> {
        let lb = &self.load_balancer;
        let info = &lb.generic_info;
        let hc = &lb.health_check;

        let mut rows: Vec<Row> = LB_COLUMNS
            .iter()
            .zip(lb_row(lb))
            .map(|(label, value)| kv(label, value))
            .collect();
        rows.push(kv("HAS SSL", lb.has_ssl));
        rows.push(kv("HTTP2", lb.http2));
        rows.push(kv("INSTANCES", list_cell(&lb.instances)));

        rows.push(vec!["HEALTH CHECK".to_string()]);
        rows.push(kv("PROTOCOL", &hc.protocol));
        rows.push(kv("PORT", hc.port));
        rows.push(kv("PATH", text_cell(&hc.path)));
        rows.push(kv("CHECK INTERVAL", hc.check_interval));
        rows.push(kv("RESPONSE TIMEOUT", hc.response_timeout));
        rows.push(kv("UNHEALTHY THRESHOLD", hc.unhealthy_threshold));
        rows.push(kv("HEALTHY THRESHOLD", hc.healthy_threshold));

        rows.push(vec!["GENERIC INFO".to_string()]);
        rows.push(kv("BALANCING ALGORITHM", &info.balancing_algorithm));
        rows.push(kv("SSL REDIRECT", info.ssl_redirect));
        rows.push(kv("COOKIE NAME", text_cell(&info.sticky_sessions.cookie_name)));
        rows.push(kv("PROXY PROTOCOL", info.proxy_protocol));
        rows.push(kv("VPC", text_cell(&info.vpc)));

        rows.push(vec!["FORWARDING RULES".to_string()]);
        if lb.forwarding_rules.is_empty() {
            rows.push(kv("RULE ID", text_cell("")));
        }
        for rule in &lb.forwarding_rules {
            rows.extend(forwarding_rule_kv(rule));
        }

        rows.push(vec!["FIREWALL RULES".to_string()]);
        if lb.firewall_rules.is_empty() {
            rows.push(kv("RULE ID", text_cell("")));
        }
        for rule in &lb.firewall_rules {
            rows.extend(firewall_rule_kv(rule));
        }
        rows
    }
}

const FORWARDING_COLUMNS: [&str; 5] = [
    "RULE ID",
    "FRONTEND PROTOCOL",
    "FRONTEND PORT",
    "BACKEND PROTOCOL",
    "BACKEND PORT",
];

fn forwarding_rule_row(r: &ForwardingRule) -> Row {
    vec![
        r.id.clone(),
        r.frontend_protocol.clone(),
        r.frontend_port.to_string(),
        r.backend_protocol.clone(),
        r.backend_port.to_string(),
    ]
}

fn forwarding_rule_kv(r: &ForwardingRule) -> Vec<Row> {
    FORWARDING_COLUMNS
        .iter()
        .zip(forwarding_rule_row(r))
        .map(|(label, value)| kv(label, value))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ForwardingRulesPrinter {
    pub forwarding_rules: Vec<ForwardingRule>,
    pub meta: Meta,
}

impl Renderable for ForwardingRulesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(FORWARDING_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(
            &self.forwarding_rules,
            FORWARDING_COLUMNS.len(),
            forwarding_rule_row,
        )
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct ForwardingRulePrinter {
    pub forwarding_rule: ForwardingRule,
}

impl Renderable for ForwardingRulePrinter {
    fn data(&self) -> Vec<Row> {
        forwarding_rule_kv(&self.forwarding_rule)
    }
}

const FIREWALL_COLUMNS: [&str; 4] = ["RULE ID", "PORT", "SOURCE", "IP TYPE"];

fn firewall_rule_row(r: &LbFirewallRule) -> Row {
    vec![
        r.id.clone(),
        r.port.to_string(),
        r.source.clone(),
        r.ip_type.clone(),
    ]
}

fn firewall_rule_kv(r: &LbFirewallRule) -> Vec<Row> {
    FIREWALL_COLUMNS
        .iter()
        .zip(firewall_rule_row(r))
        .map(|(label, value)| kv(label, value))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct FirewallRulesPrinter {
    pub firewall_rules: Vec<LbFirewallRule>,
    pub meta: Meta,
}

impl Renderable for FirewallRulesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(FIREWALL_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.firewall_rules, FIREWALL_COLUMNS.len(), firewall_rule_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct FirewallRulePrinter {
    pub firewall_rule: LbFirewallRule,
}

impl Renderable for FirewallRulePrinter {
    fn data(&self) -> Vec<Row> {
        firewall_rule_kv(&self.firewall_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compose::ComposeError;

    fn fields() -> LoadBalancerFields {
        LoadBalancerFields {
            label: Some("web".into()),
            balancing_algorithm: None,
            ssl_redirect: None,
            http2: None,
            proxy_protocol: None,
            nodes: None,
            protocol: None,
            port: None,
            path: None,
            check_interval: None,
            response_timeout: None,
            unhealthy_threshold: None,
            healthy_threshold: None,
            cookie_name: None,
            forwarding_rules: None,
            firewall_rules: None,
            instances: Vec::new(),
            vpc: None,
        }
    }

    #[test]
    fn test_request_composes_rules() {
        let mut f = fields();
        f.forwarding_rules = Some(
            "frontend_protocol:http,frontend_port:80,backend_protocol:http,backend_port:8080"
                .into(),
        );
        f.firewall_rules = Some("port:80,ip_type:v4,source:0.0.0.0/0".into());
        let req = f.into_request(Some("ewr".into())).unwrap();

        assert_eq!(req.region.as_deref(), Some("ewr"));
        assert_eq!(req.forwarding_rules.len(), 1);
        assert_eq!(req.forwarding_rules[0].backend_port, 8080);
        assert_eq!(req.firewall_rules[0].source, "0.0.0.0/0");
        assert!(req.health_check.is_none());
    }

    #[test]
    fn test_health_check_only_when_given() {
        let mut f = fields();
        f.port = Some(8080);
        let req = f.into_request(None).unwrap();
        let hc = req.health_check.unwrap();
        assert_eq!(hc.port, Some(8080));
        assert!(hc.protocol.is_none());
    }

    #[test]
    fn test_bad_rule_is_rejected() {
        let mut f = fields();
        f.forwarding_rules = Some("frontend_protocol:http".into());
        let err = f.into_request(None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Compose(ComposeError::KeyCount { .. })
        ));
    }

    #[test]
    fn test_update_body_skips_unset_fields() {
        let req = fields().into_request(None).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, serde_json::json!({ "label": "web" }));
    }
}
