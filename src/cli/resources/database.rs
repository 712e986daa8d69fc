use super::{rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::Database;
use crate::domain::paging::{Meta, Paging};
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DatabaseCommand {
    #[command(subcommand)]
    command: DatabaseSubcommand,
}

#[derive(Subcommand, Debug)]
enum DatabaseSubcommand {
    /// List all managed databases
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Retrieve a managed database
    #[command(visible_alias = "g")]
    Get(DatabaseId),

    /// Delete a managed database
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(DatabaseId),
}

#[derive(Args, Debug)]
struct DatabaseId {
    #[arg(value_name = "DATABASE-ID")]
    id: String,
}

impl DatabaseCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.databases();
        match self.command {
            DatabaseSubcommand::List(_) => {
                let (databases, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving database list")?;
                ctx.display(&DatabasesPrinter { databases, meta })?;
            }
            DatabaseSubcommand::Get(args) => {
                let database = service
                    .get(&args.id)
                    .await
                    .context("error retrieving database")?;
                ctx.display(&DatabasePrinter { database })?;
            }
            DatabaseSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting database")?;
                ctx.message("database has been deleted")?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 9] = [
    "ID",
    "LABEL",
    "ENGINE",
    "VERSION",
    "REGION",
    "PLAN",
    "STATUS",
    "HOST",
    "DATE CREATED",
];

#[derive(Debug, Serialize)]
pub struct DatabasesPrinter {
    pub databases: Vec<Database>,
    pub meta: Meta,
}

impl Renderable for DatabasesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.databases, COLUMNS.len(), |d| {
            vec![
                d.id.clone(),
                d.label.clone(),
                d.database_engine.clone(),
                d.database_engine_version.clone(),
                d.region.clone(),
                d.plan.clone(),
                d.status.clone(),
                d.host.clone(),
                d.date_created.clone(),
            ]
        })
    }

    /// Managed database listings are not cursor paged.
    fn paging(&self) -> Vec<Row> {
        Paging::total_footer(self.meta.total)
    }
}

#[derive(Debug, Serialize)]
pub struct DatabasePrinter {
    pub database: Database,
}

impl Renderable for DatabasePrinter {
    fn data(&self) -> Vec<Row> {
        let d = &self.database;
        vec![
            kv("ID", &d.id),
            kv("DATE CREATED", &d.date_created),
            kv("PLAN", &d.plan),
            kv("PLAN DISK", d.plan_disk),
            kv("PLAN RAM", d.plan_ram),
            kv("PLAN VCPUS", d.plan_vcpus),
            kv("PLAN REPLICAS", d.plan_replicas),
            kv("REGION", &d.region),
            kv("DATABASE ENGINE", &d.database_engine),
            kv("DATABASE ENGINE VERSION", &d.database_engine_version),
            kv("STATUS", &d.status),
            kv("LABEL", &d.label),
            kv("TAG", text_cell(&d.tag)),
            kv("DBNAME", text_cell(&d.dbname)),
            kv("HOST", &d.host),
            kv("USER", &d.user),
            kv("PORT", &d.port),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_only_footer() {
        let printer = DatabasesPrinter {
            databases: vec![],
            meta: Meta::new(7, "ignored", ""),
        };
        assert_eq!(printer.paging(), vec![vec!["TOTAL"], vec!["7"]]);
    }
}
