use super::{footer, rows_or_empty, switch, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{
    BlockStorage, BlockStorageAttach, BlockStorageCreate, BlockStorageDetach, BlockStorageUpdate,
};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct BlockStorageCommand {
    #[command(subcommand)]
    command: BlockStorageSubcommand,
}

#[derive(Subcommand, Debug)]
enum BlockStorageSubcommand {
    /// List all block storage
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Retrieve a block storage
    #[command(visible_alias = "g")]
    Get(BlockId),

    /// Create a new block storage
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Delete a block storage
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(BlockId),

    /// Attach a block storage to an instance
    #[command(visible_alias = "a")]
    Attach(AttachArgs),

    /// Detach a block storage from its instance
    #[command(visible_alias = "de")]
    Detach(DetachArgs),

    /// Set the label of a block storage
    Label(LabelArgs),

    /// Resize a block storage
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),
}

#[derive(Args, Debug)]
struct BlockId {
    #[arg(value_name = "BLOCK-STORAGE-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// ID of the region in which to create the block storage
    #[arg(short, long, required = true)]
    region: String,

    /// Size in GB of the block storage
    #[arg(short, long, required = true)]
    size: u32,

    /// Label for the block storage
    #[arg(short, long, default_value = "")]
    label: String,

    /// Block storage type, 'high_perf' or 'storage_opt'
    #[arg(short, long, default_value = "")]
    block_type: String,
}

#[derive(Args, Debug)]
struct AttachArgs {
    #[arg(value_name = "BLOCK-STORAGE-ID")]
    id: String,

    /// Instance to attach to
    #[arg(short, long, required = true)]
    instance: String,

    /// Attach without restarting the instance
    #[arg(long)]
    live: bool,
}

#[derive(Args, Debug)]
struct DetachArgs {
    #[arg(value_name = "BLOCK-STORAGE-ID")]
    id: String,

    /// Detach without restarting the instance
    #[arg(long)]
    live: bool,
}

#[derive(Args, Debug)]
struct LabelArgs {
    #[arg(value_name = "BLOCK-STORAGE-ID")]
    id: String,

    /// New label for the block storage
    #[arg(short, long, required = true)]
    label: String,
}

#[derive(Args, Debug)]
struct ResizeArgs {
    #[arg(value_name = "BLOCK-STORAGE-ID")]
    id: String,

    /// New size in GB
    #[arg(short, long, required = true)]
    size: u32,
}

impl BlockStorageCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.block_storage();
        match self.command {
            BlockStorageSubcommand::List(_) => {
                let (blocks, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving block storage list")?;
                ctx.display(&BlockStoragesPrinter { blocks, meta })?;
            }
            BlockStorageSubcommand::Get(args) => {
                let block = service
                    .get(&args.id)
                    .await
                    .context("error getting block storage")?;
                ctx.display(&BlockStoragePrinter { block })?;
            }
            BlockStorageSubcommand::Create(args) => {
                let req = BlockStorageCreate {
                    region: args.region,
                    size_gb: args.size,
                    label: args.label,
                    block_type: args.block_type,
                };
                let block = service
                    .create(&req)
                    .await
                    .context("error creating block storage")?;
                ctx.display(&BlockStoragePrinter { block })?;
            }
            BlockStorageSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting block storage")?;
                ctx.message("block storage has been deleted")?;
            }
            BlockStorageSubcommand::Attach(args) => {
                let req = BlockStorageAttach {
                    instance_id: args.instance,
                    live: switch(args.live),
                };
                service
                    .attach(&args.id, &req)
                    .await
                    .context("error attaching block storage")?;
                ctx.message("block storage has been attached")?;
            }
            BlockStorageSubcommand::Detach(args) => {
                let req = BlockStorageDetach {
                    live: switch(args.live),
                };
                service
                    .detach(&args.id, &req)
                    .await
                    .context("error detaching block storage")?;
                ctx.message("block storage has been detached")?;
            }
            BlockStorageSubcommand::Label(args) => {
                let req = BlockStorageUpdate {
                    label: Some(args.label),
                    ..Default::default()
                };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error labeling block storage")?;
                ctx.message("block storage label has been set")?;
            }
            BlockStorageSubcommand::Resize(args) => {
                let req = BlockStorageUpdate {
                    size_gb: Some(args.size),
                    ..Default::default()
                };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error resizing block storage")?;
                ctx.message("block storage has been resized")?;
            }
        }
        Ok(())
    }
}

const COLUMNS: [&str; 10] = [
    "ID",
    "REGION ID",
    "INSTANCE ID",
    "SIZE GB",
    "STATUS",
    "LABEL",
    "BLOCK TYPE",
    "DATE CREATED",
    "MONTHLY COST",
    "MOUNT ID",
];

#[derive(Debug, Serialize)]
pub struct BlockStoragesPrinter {
    pub blocks: Vec<BlockStorage>,
    pub meta: Meta,
}

impl Renderable for BlockStoragesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.blocks, COLUMNS.len(), |b| {
            vec![
                b.id.clone(),
                b.region.clone(),
                text_cell(&b.attached_to_instance),
                b.size_gb.to_string(),
                b.status.clone(),
                text_cell(&b.label),
                b.block_type.clone(),
                b.date_created.clone(),
                format!("${:.2}", b.cost),
                b.mount_id.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct BlockStoragePrinter {
    pub block: BlockStorage,
}

impl Renderable for BlockStoragePrinter {
    fn data(&self) -> Vec<Row> {
        let b = &self.block;
        vec![
            kv("ID", &b.id),
            kv("REGION ID", &b.region),
            kv("INSTANCE ID", text_cell(&b.attached_to_instance)),
            kv("SIZE GB", b.size_gb),
            kv("STATUS", &b.status),
            kv("LABEL", text_cell(&b.label)),
            kv("BLOCK TYPE", &b.block_type),
            kv("DATE CREATED", &b.date_created),
            kv("MONTHLY COST", format!("${:.2}", b.cost)),
            kv("MOUNT ID", &b.mount_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::display::render;
    use crate::domain::config::OutputFormat;

    #[test]
    fn test_empty_list_renders_placeholder_row() {
        let printer = BlockStoragesPrinter {
            blocks: vec![],
            meta: Meta::default(),
        };
        let rows = printer.data();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].iter().all(|c| c == "---"));
        assert!(render(OutputFormat::Table, &printer).is_ok());
    }

    #[test]
    fn test_singular_is_key_value() {
        let printer = BlockStoragePrinter {
            block: BlockStorage {
                id: "b1".into(),
                size_gb: 10,
                cost: 1.0,
                ..Default::default()
            },
        };
        assert!(printer.columns().is_none());
        assert!(printer.paging().is_empty());
        let out = String::from_utf8(render(OutputFormat::Table, &printer).unwrap()).unwrap();
        assert!(out.starts_with("ID            b1\n"));
        assert!(out.contains("MONTHLY COST  $1.00\n"));
    }
}
