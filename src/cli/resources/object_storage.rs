use super::{footer, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{
    ObjectStorage, ObjectStorageCluster, ObjectStorageCreate, ObjectStorageTier,
    ObjectStorageUpdate, S3Keys,
};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ObjectStorageCommand {
    #[command(subcommand)]
    command: ObjectStorageSubcommand,
}

#[derive(Subcommand, Debug)]
enum ObjectStorageSubcommand {
    /// List all object storage subscriptions
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get an object storage subscription
    #[command(visible_alias = "g")]
    Get(ObjectStorageId),

    /// Create an object storage subscription
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Change the label of an object storage subscription
    Label(LabelArgs),

    /// Delete an object storage subscription
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(ObjectStorageId),

    /// Regenerate the S3 keys of an object storage subscription
    #[command(visible_alias = "rk")]
    RegenerateKeys(ObjectStorageId),

    /// List the clusters object storage can be deployed to
    #[command(visible_alias = "cluster-list")]
    ListCluster(PagingArgs),

    /// List the available object storage tiers
    #[command(visible_alias = "tiers")]
    ListTiers,
}

#[derive(Args, Debug)]
struct ObjectStorageId {
    #[arg(value_name = "OBJECT-STORAGE-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// ID of the cluster to deploy to
    #[arg(short = 'i', long, required = true)]
    cluster_id: u32,

    /// ID of the tier to subscribe to
    #[arg(short, long)]
    tier_id: Option<u32>,

    /// Label for the subscription
    #[arg(short, long, default_value = "")]
    label: String,
}

#[derive(Args, Debug)]
struct LabelArgs {
    #[arg(value_name = "OBJECT-STORAGE-ID")]
    id: String,

    /// New label
    #[arg(short, long, required = true)]
    label: String,
}

impl ObjectStorageCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.object_storage();
        match self.command {
            ObjectStorageSubcommand::List(_) => {
                let (object_storages, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving object storage list")?;
                ctx.display(&ObjectStoragesPrinter {
                    object_storages,
                    meta,
                })?;
            }
            ObjectStorageSubcommand::Get(args) => {
                let object_storage = service
                    .get(&args.id)
                    .await
                    .context("error getting object storage")?;
                ctx.display(&ObjectStoragePrinter { object_storage })?;
            }
            ObjectStorageSubcommand::Create(args) => {
                let req = ObjectStorageCreate {
                    cluster_id: args.cluster_id,
                    tier_id: args.tier_id,
                    label: args.label,
                };
                let object_storage = service
                    .create(&req)
                    .await
                    .context("error creating object storage")?;
                ctx.display(&ObjectStoragePrinter { object_storage })?;
            }
            ObjectStorageSubcommand::Label(args) => {
                let req = ObjectStorageUpdate { label: args.label };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating object storage label")?;
                ctx.message("object storage has been labeled")?;
            }
            ObjectStorageSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting object storage")?;
                ctx.message("object storage has been deleted")?;
            }
            ObjectStorageSubcommand::RegenerateKeys(args) => {
                let s3_credentials = service
                    .regenerate_keys(&args.id)
                    .await
                    .context("error regenerating object storage keys")?;
                ctx.display(&S3KeysPrinter { s3_credentials })?;
            }
            ObjectStorageSubcommand::ListCluster(_) => {
                let (clusters, meta) = service
                    .list_clusters(&ctx.paging)
                    .await
                    .context("error retrieving object storage cluster list")?;
                ctx.display(&ClustersPrinter { clusters, meta })?;
            }
            ObjectStorageSubcommand::ListTiers => {
                let (tiers, _) = service
                    .list_tiers()
                    .await
                    .context("error retrieving object storage tier list")?;
                ctx.display(&TiersPrinter { tiers })?;
            }
        }
        Ok(())
    }
}

const OBJECT_STORAGE_COLUMNS: [&str; 7] = [
    "ID",
    "REGION",
    "CLUSTER ID",
    "LABEL",
    "STATUS",
    "S3 HOSTNAME",
    "DATE CREATED",
];

#[derive(Debug, Serialize)]
pub struct ObjectStoragesPrinter {
    pub object_storages: Vec<ObjectStorage>,
    pub meta: Meta,
}

impl Renderable for ObjectStoragesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(OBJECT_STORAGE_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.object_storages, OBJECT_STORAGE_COLUMNS.len(), |o| {
            vec![
                o.id.clone(),
                o.region.clone(),
                o.cluster_id.to_string(),
                text_cell(&o.label),
                o.status.clone(),
                o.s3_hostname.clone(),
                o.date_created.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct ObjectStoragePrinter {
    pub object_storage: ObjectStorage,
}

impl Renderable for ObjectStoragePrinter {
    fn data(&self) -> Vec<Row> {
        let o = &self.object_storage;
        vec![
            kv("ID", &o.id),
            kv("DATE CREATED", &o.date_created),
            kv("CLUSTER ID", o.cluster_id),
            kv("REGION", &o.region),
            kv("LOCATION", &o.location),
            kv("LABEL", text_cell(&o.label)),
            kv("STATUS", &o.status),
            kv("S3 HOSTNAME", &o.s3_hostname),
            kv("S3 ACCESS KEY", &o.s3_access_key),
            kv("S3 SECRET KEY", &o.s3_secret_key),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct S3KeysPrinter {
    pub s3_credentials: S3Keys,
}

impl Renderable for S3KeysPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["S3 HOSTNAME", "S3 ACCESS KEY", "S3 SECRET KEY"]))
    }

    fn data(&self) -> Vec<Row> {
        let k = &self.s3_credentials;
        vec![vec![
            k.s3_hostname.clone(),
            k.s3_access_key.clone(),
            k.s3_secret_key.clone(),
        ]]
    }
}

const CLUSTER_COLUMNS: [&str; 4] = ["ID", "REGION", "HOSTNAME", "DEPLOY"];

#[derive(Debug, Serialize)]
pub struct ClustersPrinter {
    pub clusters: Vec<ObjectStorageCluster>,
    pub meta: Meta,
}

impl Renderable for ClustersPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(CLUSTER_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.clusters, CLUSTER_COLUMNS.len(), |c| {
            vec![
                c.id.to_string(),
                c.region.clone(),
                c.hostname.clone(),
                c.deploy.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

const TIER_COLUMNS: [&str; 6] = [
    "ID",
    "SLUG",
    "SLA",
    "PRICE",
    "RATE LIMIT BYTES",
    "RATE LIMIT OPERATIONS",
];

#[derive(Debug, Serialize)]
pub struct TiersPrinter {
    pub tiers: Vec<ObjectStorageTier>,
}

impl Renderable for TiersPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(TIER_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.tiers, TIER_COLUMNS.len(), |t| {
            vec![
                t.id.to_string(),
                t.slug.clone(),
                text_cell(&t.sla),
                format!("{:.2}", t.price),
                t.rate_limit_bytes_sec.to_string(),
                t.rate_limit_operations_sec.to_string(),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::display::render;
    use crate::domain::config::OutputFormat;

    #[test]
    fn test_regenerated_keys_table() {
        let printer = S3KeysPrinter {
            s3_credentials: S3Keys {
                s3_hostname: "ewr1.vultrobjects.com".into(),
                s3_access_key: "AK".into(),
                s3_secret_key: "SK".into(),
            },
        };
        let out = String::from_utf8(render(OutputFormat::Table, &printer).unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("S3 HOSTNAME"));
        assert!(lines[1].starts_with("ewr1.vultrobjects.com"));
    }

    #[test]
    fn test_tiers_json_uses_tiers_key() {
        let printer = TiersPrinter { tiers: Vec::new() };
        let out: serde_json::Value =
            serde_json::from_slice(&render(OutputFormat::Json, &printer).unwrap()).unwrap();
        assert_eq!(out["tiers"], serde_json::json!([]));
    }
}
