use super::{footer, list_cell, rows_or_empty, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, Renderable, Row};
use crate::domain::models::Region;
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct RegionsCommand {
    #[command(subcommand)]
    command: RegionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RegionsSubcommand {
    /// List regions
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// List the plans available in a region
    #[command(visible_alias = "a")]
    Availability(RegionId),
}

#[derive(Args, Debug)]
struct RegionId {
    #[arg(value_name = "REGION-ID")]
    id: String,
}

impl RegionsCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.regions();
        match self.command {
            RegionsSubcommand::List(_) => {
                let (regions, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving region list")?;
                ctx.display(&RegionsPrinter { regions, meta })?;
            }
            RegionsSubcommand::Availability(args) => {
                let available_plans = service
                    .availability(&args.id)
                    .await
                    .context("error retrieving region availability")?;
                ctx.display(&AvailabilityPrinter { available_plans })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct RegionsPrinter {
    pub regions: Vec<Region>,
    pub meta: Meta,
}

impl Renderable for RegionsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["ID", "CITY", "COUNTRY", "CONTINENT", "OPTIONS"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.regions, 5, |r| {
            vec![
                r.id.clone(),
                r.city.clone(),
                r.country.clone(),
                r.continent.clone(),
                list_cell(&r.options),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityPrinter {
    pub available_plans: Vec<String>,
}

impl Renderable for AvailabilityPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["AVAILABLE PLANS"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.available_plans, 1, |p| vec![p.clone()])
    }
}
