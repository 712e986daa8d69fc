use super::{footer, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{
    Domain, DomainCreate, DomainUpdate, Record, RecordCreate, RecordUpdate, Soa, SoaUpdate,
};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DnsCommand {
    #[command(subcommand)]
    command: DnsSubcommand,
}

#[derive(Subcommand, Debug)]
enum DnsSubcommand {
    /// DNS domain commands
    #[command(visible_alias = "d")]
    Domain(DomainCommand),

    /// DNS record commands
    #[command(visible_alias = "r")]
    Record(RecordCommand),
}

#[derive(Args, Debug)]
struct DomainCommand {
    #[command(subcommand)]
    command: DomainSubcommand,
}

#[derive(Subcommand, Debug)]
enum DomainSubcommand {
    /// List all DNS domains
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a DNS domain
    #[command(visible_alias = "g")]
    Get(DomainName),

    /// Create a DNS domain
    #[command(visible_alias = "c")]
    Create(DomainCreateArgs),

    /// Delete a DNS domain
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(DomainName),

    /// Enable or disable DNSSEC on a domain
    Dnssec(DnssecArgs),

    /// Get the DNSSEC records of a domain
    DnssecInfo(DomainName),

    /// Get the SOA record of a domain
    SoaInfo(DomainName),

    /// Update the SOA record of a domain
    SoaUpdate(SoaUpdateArgs),
}

#[derive(Args, Debug)]
struct DomainName {
    #[arg(value_name = "DOMAIN")]
    domain: String,
}

#[derive(Args, Debug)]
struct DomainCreateArgs {
    /// Name of the domain
    #[arg(short, long, required = true)]
    domain: String,

    /// Instance IP to point the domain at
    #[arg(short, long)]
    ip: Option<String>,

    /// Enable DNSSEC on the new domain, 'enabled' or 'disabled'
    #[arg(long)]
    dns_sec: Option<String>,
}

#[derive(Args, Debug)]
struct DnssecArgs {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Enable DNSSEC
    #[arg(long, conflicts_with = "disabled", required_unless_present = "disabled")]
    enabled: bool,

    /// Disable DNSSEC
    #[arg(long, required_unless_present = "enabled")]
    disabled: bool,
}

#[derive(Args, Debug)]
struct SoaUpdateArgs {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Primary nameserver
    #[arg(short, long)]
    ns_primary: Option<String>,

    /// Administrative contact email
    #[arg(short, long)]
    email: Option<String>,
}

#[derive(Args, Debug)]
struct RecordCommand {
    #[command(subcommand)]
    command: RecordSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecordSubcommand {
    /// List all records of a domain
    #[command(visible_alias = "l")]
    List(RecordListArgs),

    /// Get a DNS record
    #[command(visible_alias = "g")]
    Get(RecordId),

    /// Create a DNS record
    #[command(visible_alias = "c")]
    Create(RecordCreateArgs),

    /// Update a DNS record
    #[command(visible_alias = "u")]
    Update(RecordUpdateArgs),

    /// Delete a DNS record
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(RecordId),
}

#[derive(Args, Debug)]
struct RecordListArgs {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct RecordId {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    #[arg(value_name = "RECORD-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct RecordCreateArgs {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Record type, such as A, AAAA, CNAME or TXT
    #[arg(short = 't', long = "type", required = true)]
    record_type: String,

    /// Record name
    #[arg(short, long, required = true)]
    name: String,

    /// Record data
    #[arg(short, long, required = true)]
    data: String,

    /// Time to live in seconds
    #[arg(long)]
    ttl: Option<i32>,

    /// Record priority, for MX and SRV records
    #[arg(short, long)]
    priority: Option<i32>,
}

#[derive(Args, Debug)]
struct RecordUpdateArgs {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    #[arg(value_name = "RECORD-ID")]
    id: String,

    /// Record name
    #[arg(short, long)]
    name: Option<String>,

    /// Record data
    #[arg(short, long)]
    data: Option<String>,

    /// Time to live in seconds
    #[arg(long)]
    ttl: Option<i32>,

    /// Record priority
    #[arg(short, long)]
    priority: Option<i32>,
}

impl DnsCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        match self.command {
            DnsSubcommand::Domain(cmd) => cmd.execute(ctx).await,
            DnsSubcommand::Record(cmd) => cmd.execute(ctx).await,
        }
    }
}

impl DomainCommand {
    async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.dns();
        match self.command {
            DomainSubcommand::List(_) => {
                let (domains, meta) = service
                    .list_domains(&ctx.paging)
                    .await
                    .context("error retrieving domain list")?;
                ctx.display(&DomainsPrinter { domains, meta })?;
            }
            DomainSubcommand::Get(args) => {
                let domain = service
                    .get_domain(&args.domain)
                    .await
                    .context("error retrieving domain")?;
                ctx.display(&DomainPrinter { domain })?;
            }
            DomainSubcommand::Create(args) => {
                let req = DomainCreate {
                    domain: args.domain,
                    ip: args.ip,
                    dns_sec: args.dns_sec,
                };
                let domain = service
                    .create_domain(&req)
                    .await
                    .context("error creating domain")?;
                ctx.display(&DomainPrinter { domain })?;
            }
            DomainSubcommand::Delete(args) => {
                service
                    .delete_domain(&args.domain)
                    .await
                    .context("error deleting domain")?;
                ctx.message("domain has been deleted")?;
            }
            DomainSubcommand::Dnssec(args) => {
                let state = if args.enabled { "enabled" } else { "disabled" };
                let req = DomainUpdate {
                    dns_sec: state.to_string(),
                };
                service
                    .update_domain(&args.domain, &req)
                    .await
                    .context("error toggling dnssec")?;
                ctx.message(&format!("dnssec has been {}", state))?;
            }
            DomainSubcommand::DnssecInfo(args) => {
                let dns_sec = service
                    .dnssec_info(&args.domain)
                    .await
                    .context("error retrieving dnssec info")?;
                ctx.display(&DnssecPrinter { dns_sec })?;
            }
            DomainSubcommand::SoaInfo(args) => {
                let dns_soa = service
                    .soa_info(&args.domain)
                    .await
                    .context("error retrieving soa info")?;
                ctx.display(&SoaPrinter { dns_soa })?;
            }
            DomainSubcommand::SoaUpdate(args) => {
                let req = SoaUpdate {
                    nsprimary: args.ns_primary,
                    email: args.email,
                };
                service
                    .update_soa(&args.domain, &req)
                    .await
                    .context("error updating soa")?;
                ctx.message("domain soa has been updated")?;
            }
        }
        Ok(())
    }
}

impl RecordCommand {
    async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.dns();
        match self.command {
            RecordSubcommand::List(args) => {
                let (records, meta) = service
                    .list_records(&args.domain, &ctx.paging)
                    .await
                    .context("error retrieving record list")?;
                ctx.display(&RecordsPrinter { records, meta })?;
            }
            RecordSubcommand::Get(args) => {
                let record = service
                    .get_record(&args.domain, &args.id)
                    .await
                    .context("error retrieving record")?;
                ctx.display(&RecordPrinter { record })?;
            }
            RecordSubcommand::Create(args) => {
                let req = RecordCreate {
                    name: args.name,
                    record_type: args.record_type,
                    data: args.data,
                    ttl: args.ttl,
                    priority: args.priority,
                };
                let record = service
                    .create_record(&args.domain, &req)
                    .await
                    .context("error creating record")?;
                ctx.display(&RecordPrinter { record })?;
            }
            RecordSubcommand::Update(args) => {
                let req = RecordUpdate {
                    name: args.name,
                    data: args.data,
                    ttl: args.ttl,
                    priority: args.priority,
                };
                service
                    .update_record(&args.domain, &args.id, &req)
                    .await
                    .context("error updating record")?;
                ctx.message("record has been updated")?;
            }
            RecordSubcommand::Delete(args) => {
                service
                    .delete_record(&args.domain, &args.id)
                    .await
                    .context("error deleting record")?;
                ctx.message("record has been deleted")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DomainsPrinter {
    pub domains: Vec<Domain>,
    pub meta: Meta,
}

impl Renderable for DomainsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["DOMAIN", "DATE CREATED", "DNS SEC"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.domains, 3, |d| {
            vec![d.domain.clone(), d.date_created.clone(), d.dns_sec.clone()]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct DomainPrinter {
    pub domain: Domain,
}

impl Renderable for DomainPrinter {
    fn data(&self) -> Vec<Row> {
        let d = &self.domain;
        vec![
            kv("DOMAIN", &d.domain),
            kv("DATE CREATED", &d.date_created),
            kv("DNS SEC", &d.dns_sec),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct DnssecPrinter {
    pub dns_sec: Vec<String>,
}

impl Renderable for DnssecPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["DNSSEC INFO"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.dns_sec, 1, |r| vec![r.clone()])
    }
}

#[derive(Debug, Serialize)]
pub struct SoaPrinter {
    pub dns_soa: Soa,
}

impl Renderable for SoaPrinter {
    fn data(&self) -> Vec<Row> {
        vec![
            kv("NS PRIMARY", &self.dns_soa.nsprimary),
            kv("EMAIL", &self.dns_soa.email),
        ]
    }
}

const RECORD_COLUMNS: [&str; 6] = ["ID", "TYPE", "NAME", "DATA", "PRIORITY", "TTL"];

#[derive(Debug, Serialize)]
pub struct RecordsPrinter {
    pub records: Vec<Record>,
    pub meta: Meta,
}

impl Renderable for RecordsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(RECORD_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.records, RECORD_COLUMNS.len(), |r| {
            vec![
                r.id.clone(),
                r.record_type.clone(),
                text_cell(&r.name),
                r.data.clone(),
                r.priority.to_string(),
                r.ttl.to_string(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct RecordPrinter {
    pub record: Record,
}

impl Renderable for RecordPrinter {
    fn data(&self) -> Vec<Row> {
        let r = &self.record;
        vec![
            kv("ID", &r.id),
            kv("TYPE", &r.record_type),
            kv("NAME", text_cell(&r.name)),
            kv("DATA", &r.data),
            kv("PRIORITY", r.priority),
            kv("TTL", r.ttl),
        ]
    }
}
