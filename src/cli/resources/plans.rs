use super::{footer, list_cell, rows_or_empty, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, Renderable, Row};
use crate::domain::models::Plan;
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct PlansCommand {
    #[command(subcommand)]
    command: PlansSubcommand,
}

#[derive(Subcommand, Debug)]
enum PlansSubcommand {
    /// List all plans
    #[command(visible_alias = "l")]
    List(ListArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Filter by plan type, such as vc2, vhf or vdc
    #[arg(short = 't', long = "type")]
    plan_type: Option<String>,

    #[command(flatten)]
    paging: PagingArgs,
}

impl PlansCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        match self.command {
            PlansSubcommand::List(args) => {
                let (plans, meta) = ctx
                    .client
                    .regions()
                    .plans(args.plan_type.as_deref(), &ctx.paging)
                    .await
                    .context("error retrieving plan list")?;
                ctx.display(&PlansPrinter { plans, meta })?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 9] = [
    "ID",
    "VCPU COUNT",
    "RAM",
    "DISK",
    "DISK COUNT",
    "BANDWIDTH GB",
    "PRICE PER MONTH",
    "TYPE",
    "REGIONS",
];

#[derive(Debug, Serialize)]
pub struct PlansPrinter {
    pub plans: Vec<Plan>,
    pub meta: Meta,
}

impl Renderable for PlansPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.plans, COLUMNS.len(), |p| {
            vec![
                p.id.clone(),
                p.vcpu_count.to_string(),
                p.ram.to_string(),
                p.disk.to_string(),
                p.disk_count.to_string(),
                p.bandwidth.to_string(),
                format!("{:.2}", p.monthly_cost),
                p.plan_type.clone(),
                list_cell(&p.locations),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}
