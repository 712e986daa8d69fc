use super::{footer, rows_or_empty, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{Iso, IsoCreate, PublicIso};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct IsoCommand {
    #[command(subcommand)]
    command: IsoSubcommand,
}

#[derive(Subcommand, Debug)]
enum IsoSubcommand {
    /// List all private ISOs
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a private ISO
    #[command(visible_alias = "g")]
    Get(IsoId),

    /// Create an ISO from a URL
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Delete a private ISO
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(IsoId),

    /// List all public ISOs
    #[command(visible_alias = "p")]
    Public(PagingArgs),
}

#[derive(Args, Debug)]
struct IsoId {
    #[arg(value_name = "ISO-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// URL of the ISO to fetch
    #[arg(short, long, required = true)]
    url: String,
}

impl IsoCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.isos();
        match self.command {
            IsoSubcommand::List(_) => {
                let (isos, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving iso list")?;
                ctx.display(&IsosPrinter { isos, meta })?;
            }
            IsoSubcommand::Get(args) => {
                let iso = service.get(&args.id).await.context("error getting iso")?;
                ctx.display(&IsoPrinter { iso })?;
            }
            IsoSubcommand::Create(args) => {
                let iso = service
                    .create(&IsoCreate { url: args.url })
                    .await
                    .context("error creating iso")?;
                ctx.display(&IsoPrinter { iso })?;
            }
            IsoSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting iso")?;
                ctx.message("iso has been deleted")?;
            }
            IsoSubcommand::Public(_) => {
                let (public_isos, meta) = service
                    .list_public(&ctx.paging)
                    .await
                    .context("error retrieving public iso list")?;
                ctx.display(&PublicIsosPrinter { public_isos, meta })?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 7] = [
    "ID",
    "FILE NAME",
    "SIZE",
    "STATUS",
    "MD5SUM",
    "SHA512SUM",
    "DATE CREATED",
];

fn iso_row(i: &Iso) -> Row {
    vec![
        i.id.clone(),
        i.filename.clone(),
        i.size.to_string(),
        i.status.clone(),
        i.md5sum.clone(),
        i.sha512sum.clone(),
        i.date_created.clone(),
    ]
}

#[derive(Debug, Serialize)]
pub struct IsosPrinter {
    pub isos: Vec<Iso>,
    pub meta: Meta,
}

impl Renderable for IsosPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.isos, COLUMNS.len(), iso_row)
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct IsoPrinter {
    pub iso: Iso,
}

impl Renderable for IsoPrinter {
    fn data(&self) -> Vec<Row> {
        COLUMNS
            .iter()
            .zip(iso_row(&self.iso))
            .map(|(label, value)| kv(label, value))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PublicIsosPrinter {
    pub public_isos: Vec<PublicIso>,
    pub meta: Meta,
}

impl Renderable for PublicIsosPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["ID", "NAME", "DESCRIPTION", "MD5SUM"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.public_isos, 4, |i| {
            vec![
                i.id.clone(),
                i.name.clone(),
                i.description.clone(),
                i.md5sum.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}
