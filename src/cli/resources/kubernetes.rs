use super::{footer, rows_or_empty, text_cell, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::compose::{compose_node_pools, parse_labels, ComposeError};
use crate::domain::models::{
    Cluster, ClusterCreate, ClusterUpdate, NodePool, NodePoolReq, NodePoolUpdate, UpgradeReq,
};
use crate::domain::paging::Meta;
use crate::infrastructure::constants::{BLOCK_SEPARATOR, KUBECONFIG_DIR_MODE, KUBECONFIG_FILE_MODE};
use crate::shared::error::{CliError, Result};
use anyhow::Context as _;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, DirBuilder, OpenOptions, Permissions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct KubernetesCommand {
    #[command(subcommand)]
    command: KubernetesSubcommand,
}

#[derive(Subcommand, Debug)]
enum KubernetesSubcommand {
    /// List all kubernetes clusters
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a kubernetes cluster
    #[command(visible_alias = "g")]
    Get(ClusterId),

    /// Create a kubernetes cluster
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update the label of a kubernetes cluster
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete a kubernetes cluster
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(DeleteArgs),

    /// Get the kubeconfig of a kubernetes cluster
    Config(ConfigArgs),

    /// List the supported kubernetes versions
    #[command(visible_alias = "v")]
    Versions,

    /// Commands to upgrade a kubernetes cluster
    Upgrades(UpgradesCommand),

    /// Commands to manage the node pools of a kubernetes cluster
    #[command(visible_alias = "np")]
    NodePool(NodePoolCommand),
}

#[derive(Args, Debug)]
struct ClusterId {
    #[arg(value_name = "CLUSTER-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Label for the cluster
    #[arg(short, long, default_value = "")]
    label: String,

    /// Region to deploy the cluster in
    #[arg(short, long)]
    region: Option<String>,

    /// Kubernetes version, see 'kubernetes versions'
    #[arg(long)]
    version: Option<String>,

    /// Node pools, e.g.
    /// "quantity:3,plan:vc2-2c-4gb,label:pool,tag:t,node-labels:a=b|c=d"
    /// with pools separated by '/'. label, quantity and plan are required;
    /// tag, auto-scaler, min-nodes, max-nodes and node-labels are optional
    #[arg(short, long, required = true)]
    node_pools: String,

    /// Deploy highly available control planes
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    high_avail: Option<bool>,

    /// Create a managed firewall group for the cluster
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    enable_firewall: Option<bool>,
}

impl CreateArgs {
    /// Build the request body. Node pools are composed first so that a
    /// malformed pool spec is reported before anything else.
    fn into_request(self) -> Result<ClusterCreate> {
        let node_pools = compose_node_pools(&self.node_pools)?;
        let region = self
            .region
            .ok_or_else(|| CliError::usage("--region is required"))?;
        let version = self
            .version
            .ok_or_else(|| CliError::usage("--version is required"))?;

        Ok(ClusterCreate {
            label: self.label,
            region,
            version,
            ha_controlplanes: self.high_avail,
            enable_firewall: self.enable_firewall,
            node_pools,
        })
    }
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "CLUSTER-ID")]
    id: String,

    /// New label
    #[arg(short, long, required = true)]
    label: String,
}

#[derive(Args, Debug)]
struct DeleteArgs {
    #[arg(value_name = "CLUSTER-ID")]
    id: String,

    /// Also delete the block storage and load balancers linked to the
    /// cluster. Whether linked resources are removed synchronously is up
    /// to the server
    #[arg(long)]
    delete_resources: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[arg(value_name = "CLUSTER-ID")]
    id: String,

    /// Write the kubeconfig to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct UpgradesCommand {
    #[command(subcommand)]
    command: UpgradesSubcommand,
}

#[derive(Subcommand, Debug)]
enum UpgradesSubcommand {
    /// List the versions a cluster can be upgraded to
    #[command(visible_alias = "l")]
    List(ClusterId),

    /// Start a cluster upgrade
    #[command(visible_alias = "s")]
    Start(UpgradeArgs),
}

#[derive(Args, Debug)]
struct UpgradeArgs {
    #[arg(value_name = "CLUSTER-ID")]
    id: String,

    /// Version to upgrade to
    #[arg(long, required = true)]
    version: String,
}

#[derive(Args, Debug)]
struct NodePoolCommand {
    #[command(subcommand)]
    command: NodePoolSubcommand,
}

#[derive(Subcommand, Debug)]
enum NodePoolSubcommand {
    /// List the node pools of a cluster
    #[command(visible_alias = "l")]
    List(NodePoolListArgs),

    /// Get a node pool
    #[command(visible_alias = "g")]
    Get(NodePoolId),

    /// Create a node pool
    #[command(visible_alias = "c")]
    Create(NodePoolCreateArgs),

    /// Update a node pool
    #[command(visible_alias = "u")]
    Update(NodePoolUpdateArgs),

    /// Delete a node pool
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(NodePoolId),

    /// Commands to manage the nodes of a node pool
    #[command(visible_alias = "n")]
    Node(NodeCommand),
}

#[derive(Args, Debug)]
struct NodePoolListArgs {
    #[arg(value_name = "CLUSTER-ID")]
    cluster_id: String,

    #[command(flatten)]
    paging: PagingArgs,
}

#[derive(Args, Debug)]
struct NodePoolId {
    #[arg(value_name = "CLUSTER-ID")]
    cluster_id: String,

    #[arg(value_name = "NODE-POOL-ID")]
    id: String,
}

fn node_labels(value: &str) -> std::result::Result<BTreeMap<String, String>, ComposeError> {
    parse_labels("node-labels", value)
}

#[derive(Args, Debug)]
struct NodePoolCreateArgs {
    #[arg(value_name = "CLUSTER-ID")]
    cluster_id: String,

    /// Label for the node pool
    #[arg(short, long, required = true)]
    label: String,

    /// Number of nodes
    #[arg(short, long, required = true)]
    quantity: u32,

    /// Plan of the nodes
    #[arg(short, long, required = true)]
    plan: String,

    /// Tag for the node pool
    #[arg(short, long, default_value = "")]
    tag: String,

    /// Enable the auto scaler
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    auto_scaler: Option<bool>,

    /// Minimum nodes for the auto scaler
    #[arg(long)]
    min_nodes: Option<u32>,

    /// Maximum nodes for the auto scaler
    #[arg(long)]
    max_nodes: Option<u32>,

    /// Kubernetes labels for the nodes, e.g. "app=web|tier=1"
    #[arg(long, value_parser = node_labels)]
    node_labels: Option<BTreeMap<String, String>>,
}

#[derive(Args, Debug)]
struct NodePoolUpdateArgs {
    #[arg(value_name = "CLUSTER-ID")]
    cluster_id: String,

    #[arg(value_name = "NODE-POOL-ID")]
    id: String,

    /// Number of nodes
    #[arg(short, long)]
    quantity: Option<u32>,

    /// Tag for the node pool
    #[arg(short, long)]
    tag: Option<String>,

    /// Enable the auto scaler
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    auto_scaler: Option<bool>,

    /// Minimum nodes for the auto scaler
    #[arg(long)]
    min_nodes: Option<u32>,

    /// Maximum nodes for the auto scaler
    #[arg(long)]
    max_nodes: Option<u32>,

    /// Kubernetes labels for the nodes, replacing the current set
    #[arg(long, value_parser = node_labels)]
    node_labels: Option<BTreeMap<String, String>>,
}

#[derive(Args, Debug)]
struct NodeCommand {
    #[command(subcommand)]
    command: NodeSubcommand,
}

#[derive(Subcommand, Debug)]
enum NodeSubcommand {
    /// Delete a node from a node pool
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(NodeId),

    /// Recycle a node, replacing it with a fresh one
    #[command(visible_alias = "r")]
    Recycle(NodeId),
}

#[derive(Args, Debug)]
struct NodeId {
    #[arg(value_name = "CLUSTER-ID")]
    cluster_id: String,

    #[arg(value_name = "NODE-POOL-ID")]
    pool_id: String,

    #[arg(value_name = "NODE-ID")]
    id: String,
}

impl KubernetesCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.kubernetes();
        match self.command {
            KubernetesSubcommand::List(_) => {
                let (vke_clusters, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving kubernetes cluster list")?;
                ctx.display(&ClustersPrinter { vke_clusters, meta })?;
            }
            KubernetesSubcommand::Get(args) => {
                let vke_cluster = service
                    .get(&args.id)
                    .await
                    .context("error getting kubernetes cluster")?;
                ctx.display(&ClusterPrinter { vke_cluster })?;
            }
            KubernetesSubcommand::Create(args) => {
                let req = args.into_request()?;
                let vke_cluster = service
                    .create(&req)
                    .await
                    .context("error creating kubernetes cluster")?;
                ctx.display(&ClusterPrinter { vke_cluster })?;
            }
            KubernetesSubcommand::Update(args) => {
                let req = ClusterUpdate { label: args.label };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating kubernetes cluster")?;
                ctx.message("kubernetes cluster has been updated")?;
            }
            KubernetesSubcommand::Delete(args) => {
                if args.delete_resources {
                    service
                        .delete_with_resources(&args.id)
                        .await
                        .context("error deleting kubernetes cluster and linked resources")?;
                    ctx.message("kubernetes cluster and linked resources have been deleted")?;
                } else {
                    service
                        .delete(&args.id)
                        .await
                        .context("error deleting kubernetes cluster")?;
                    ctx.message("kubernetes cluster has been deleted")?;
                }
            }
            KubernetesSubcommand::Config(args) => {
                let encoded = service
                    .config(&args.id)
                    .await
                    .context("error getting kubernetes cluster config")?;
                let decoded = STANDARD
                    .decode(encoded.trim())
                    .map_err(CliError::from)
                    .context("error decoding kubeconfig")?;
                match args.output_file {
                    Some(path) => {
                        if ctx.cancel.is_cancelled() {
                            return Err(CliError::Cancelled).context("kubeconfig not written");
                        }
                        write_kubeconfig(&path, &decoded).with_context(|| {
                            format!("error writing kubeconfig to {}", path.display())
                        })?;
                        ctx.message(&format!("kubeconfig written to {}", path.display()))?;
                    }
                    None => ctx.printer.raw(&String::from_utf8_lossy(&decoded))?,
                }
            }
            KubernetesSubcommand::Versions => {
                let versions = service
                    .versions()
                    .await
                    .context("error retrieving kubernetes versions")?;
                ctx.display(&VersionsPrinter { versions })?;
            }
            KubernetesSubcommand::Upgrades(cmd) => match cmd.command {
                UpgradesSubcommand::List(args) => {
                    let available_upgrades = service
                        .available_upgrades(&args.id)
                        .await
                        .context("error retrieving kubernetes cluster upgrades")?;
                    ctx.display(&UpgradesPrinter { available_upgrades })?;
                }
                UpgradesSubcommand::Start(args) => {
                    let req = UpgradeReq {
                        upgrade_version: args.version,
                    };
                    service
                        .upgrade(&args.id, &req)
                        .await
                        .context("error starting kubernetes cluster upgrade")?;
                    ctx.message("kubernetes cluster upgrade has been started")?;
                }
            },
            KubernetesSubcommand::NodePool(cmd) => return cmd.execute(ctx).await,
        }
        Ok(())
    }
}

impl NodePoolCommand {
    async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.kubernetes();
        match self.command {
            NodePoolSubcommand::List(args) => {
                let (node_pools, meta) = service
                    .list_node_pools(&args.cluster_id, &ctx.paging)
                    .await
                    .context("error retrieving node pool list")?;
                ctx.display(&NodePoolsPrinter { node_pools, meta })?;
            }
            NodePoolSubcommand::Get(args) => {
                let node_pool = service
                    .get_node_pool(&args.cluster_id, &args.id)
                    .await
                    .context("error getting node pool")?;
                ctx.display(&NodePoolPrinter { node_pool })?;
            }
            NodePoolSubcommand::Create(args) => {
                let req = NodePoolReq {
                    node_quantity: args.quantity,
                    label: args.label,
                    plan: args.plan,
                    tag: args.tag,
                    auto_scaler: args.auto_scaler,
                    min_nodes: args.min_nodes,
                    max_nodes: args.max_nodes,
                    labels: args.node_labels.unwrap_or_default(),
                };
                let node_pool = service
                    .create_node_pool(&args.cluster_id, &req)
                    .await
                    .context("error creating node pool")?;
                ctx.display(&NodePoolPrinter { node_pool })?;
            }
            NodePoolSubcommand::Update(args) => {
                let req = NodePoolUpdate {
                    node_quantity: args.quantity,
                    tag: args.tag,
                    auto_scaler: args.auto_scaler,
                    min_nodes: args.min_nodes,
                    max_nodes: args.max_nodes,
                    labels: args.node_labels,
                };
                let node_pool = service
                    .update_node_pool(&args.cluster_id, &args.id, &req)
                    .await
                    .context("error updating node pool")?;
                ctx.display(&NodePoolPrinter { node_pool })?;
            }
            NodePoolSubcommand::Delete(args) => {
                service
                    .delete_node_pool(&args.cluster_id, &args.id)
                    .await
                    .context("error deleting node pool")?;
                ctx.message("node pool has been deleted")?;
            }
            NodePoolSubcommand::Node(cmd) => match cmd.command {
                NodeSubcommand::Delete(args) => {
                    service
                        .delete_node(&args.cluster_id, &args.pool_id, &args.id)
                        .await
                        .context("error deleting node")?;
                    ctx.message("node has been deleted")?;
                }
                NodeSubcommand::Recycle(args) => {
                    service
                        .recycle_node(&args.cluster_id, &args.pool_id, &args.id)
                        .await
                        .context("error recycling node")?;
                    ctx.message("node will be recycled")?;
                }
            },
        }
        Ok(())
    }
}

/// Write a kubeconfig readable only by its owner, creating the parent
/// directory when it does not exist yet.
fn write_kubeconfig(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            DirBuilder::new()
                .recursive(true)
                .mode(KUBECONFIG_DIR_MODE)
                .create(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(KUBECONFIG_FILE_MODE)
        .open(path)?;
    file.write_all(contents)?;

    // The open mode only applies to new files.
    fs::set_permissions(path, Permissions::from_mode(KUBECONFIG_FILE_MODE))?;
    Ok(())
}

const CLUSTER_COLUMNS: [&str; 8] = [
    "ID",
    "LABEL",
    "DATE CREATED",
    "REGION",
    "VERSION",
    "STATUS",
    "ENDPOINT",
    "NODE POOLS",
];

#[derive(Debug, Serialize)]
pub struct ClustersPrinter {
    pub vke_clusters: Vec<Cluster>,
    pub meta: Meta,
}

impl Renderable for ClustersPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(CLUSTER_COLUMNS))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.vke_clusters, CLUSTER_COLUMNS.len(), |c| {
            vec![
                c.id.clone(),
                text_cell(&c.label),
                c.date_created.clone(),
                c.region.clone(),
                c.version.clone(),
                c.status.clone(),
                text_cell(&c.endpoint),
                c.node_pools.len().to_string(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct ClusterPrinter {
    pub vke_cluster: Cluster,
}

impl Renderable for ClusterPrinter {
    fn data(&self) -> Vec<Row> {
        let c = &self.vke_cluster;
        let mut rows = vec![
            kv("ID", &c.id),
            kv("LABEL", text_cell(&c.label)),
            kv("DATE CREATED", &c.date_created),
            kv("CLUSTER SUBNET", &c.cluster_subnet),
            kv("SERVICE SUBNET", &c.service_subnet),
            kv("IP", text_cell(&c.ip)),
            kv("ENDPOINT", text_cell(&c.endpoint)),
            kv("HIGH AVAIL", c.ha_controlplanes),
            kv("VERSION", &c.version),
            kv("REGION", &c.region),
            kv("STATUS", &c.status),
            kv("FIREWALL GROUP ID", text_cell(&c.firewall_group_id)),
            vec![" ".to_string()],
            vec!["NODE POOLS".to_string()],
        ];
        for (i, pool) in c.node_pools.iter().enumerate() {
            if i > 0 {
                rows.push(vec![BLOCK_SEPARATOR.to_string()]);
            }
            rows.extend(node_pool_rows(pool));
        }
        rows
    }
}

fn labels_cell(labels: &BTreeMap<String, String>) -> String {
    if labels.is_empty() {
        text_cell("")
    } else {
        labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn node_pool_rows(pool: &NodePool) -> Vec<Row> {
    let mut rows = vec![
        kv("ID", &pool.id),
        kv("DATE CREATED", &pool.date_created),
        kv("DATE UPDATED", &pool.date_updated),
        kv("LABEL", &pool.label),
        kv("TAG", text_cell(&pool.tag)),
        kv("PLAN", &pool.plan),
        kv("STATUS", &pool.status),
        kv("NODE QUANTITY", pool.node_quantity),
        kv("AUTO SCALER", pool.auto_scaler),
        kv("MIN NODES", pool.min_nodes),
        kv("MAX NODES", pool.max_nodes),
        kv("NODE LABELS", labels_cell(&pool.labels)),
        vec![" ".to_string()],
        vec!["NODES".to_string()],
    ];
    if pool.nodes.is_empty() {
        rows.push(kv("ID", text_cell("")));
    }
    for (i, node) in pool.nodes.iter().enumerate() {
        if i > 0 {
            rows.push(vec![BLOCK_SEPARATOR.to_string()]);
        }
        rows.push(kv("ID", &node.id));
        rows.push(kv("DATE CREATED", &node.date_created));
        rows.push(kv("LABEL", text_cell(&node.label)));
        rows.push(kv("STATUS", &node.status));
    }
    rows
}

#[derive(Debug, Serialize)]
pub struct NodePoolsPrinter {
    pub node_pools: Vec<NodePool>,
    pub meta: Meta,
}

impl Renderable for NodePoolsPrinter {
    fn data(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (i, pool) in self.node_pools.iter().enumerate() {
            if i > 0 {
                rows.push(vec![BLOCK_SEPARATOR.to_string()]);
            }
            rows.extend(node_pool_rows(pool));
        }
        if rows.is_empty() {
            rows.push(kv("ID", text_cell("")));
        }
        rows
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct NodePoolPrinter {
    pub node_pool: NodePool,
}

impl Renderable for NodePoolPrinter {
    fn data(&self) -> Vec<Row> {
        node_pool_rows(&self.node_pool)
    }
}

#[derive(Debug, Serialize)]
pub struct VersionsPrinter {
    pub versions: Vec<String>,
}

impl Renderable for VersionsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["VERSION"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.versions, 1, |v| vec![v.clone()])
    }
}

#[derive(Debug, Serialize)]
pub struct UpgradesPrinter {
    pub available_upgrades: Vec<String>,
}

impl Renderable for UpgradesPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["AVAILABLE UPGRADES"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.available_upgrades, 1, |v| vec![v.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::display::render;
    use crate::domain::config::OutputFormat;
    use crate::domain::models::Node;

    fn create_args(node_pools: &str) -> CreateArgs {
        CreateArgs {
            label: "c".into(),
            region: Some("ewr".into()),
            version: Some("v1.29.2+1".into()),
            node_pools: node_pools.into(),
            high_avail: None,
            enable_firewall: None,
        }
    }

    #[test]
    fn test_create_request_composes_pools() {
        let req = create_args(
            "quantity:3,plan:p,label:np,node-labels:a=b|c=d/quantity:1,plan:p,label:np2",
        )
        .into_request()
        .unwrap();

        assert_eq!(req.node_pools.len(), 2);
        assert_eq!(req.node_pools[0].labels.get("a").map(String::as_str), Some("b"));
        assert_eq!(req.node_pools[0].labels.get("c").map(String::as_str), Some("d"));
        assert_eq!(req.node_pools[1].label, "np2");
        assert!(req.ha_controlplanes.is_none());
    }

    #[derive(clap::Parser)]
    struct CreateCli {
        #[command(flatten)]
        args: CreateArgs,
    }

    fn parse_create(extra: &[&str]) -> ClusterCreate {
        use clap::Parser;

        let mut argv = vec![
            "create", "-r", "ewr", "--version", "v1.29.2+1", "-n", "quantity:1,plan:p,label:np",
        ];
        argv.extend_from_slice(extra);
        CreateCli::try_parse_from(argv).unwrap().args.into_request().unwrap()
    }

    #[test]
    fn test_bool_flags_work_as_switches() {
        let req = parse_create(&["--high-avail"]);
        assert_eq!(req.ha_controlplanes, Some(true));
        assert_eq!(req.enable_firewall, None);

        let req = parse_create(&["--high-avail", "false", "--enable-firewall"]);
        assert_eq!(req.ha_controlplanes, Some(false));
        assert_eq!(req.enable_firewall, Some(true));
    }

    #[test]
    fn test_pool_errors_come_before_missing_region() {
        let mut args = create_args("plan:p,quantity:3");
        args.region = None;
        let err = args.into_request().unwrap_err();
        assert!(matches!(err, CliError::Compose(ComposeError::KeyCount { .. })));
        assert!(err.to_string().contains("label, quantity and plan"), "{err}");
    }

    #[test]
    fn test_missing_version_is_usage_error() {
        let mut args = create_args("label:a,quantity:1,plan:p");
        args.version = None;
        assert!(matches!(args.into_request(), Err(CliError::Usage(_))));
    }

    #[test]
    fn test_kubeconfig_written_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        write_kubeconfig(&path, b"apiVersion: v1\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"apiVersion: v1\n");
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, KUBECONFIG_FILE_MODE);
        let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode & KUBECONFIG_DIR_MODE, dir_mode);
    }

    #[test]
    fn test_kubeconfig_overwrite_resets_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o644)).unwrap();

        write_kubeconfig(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(
            fs::metadata(&path).unwrap().permissions().mode() & 0o777,
            KUBECONFIG_FILE_MODE
        );
    }

    fn node(id: &str, label: &str) -> Node {
        Node {
            id: id.into(),
            label: label.into(),
            date_created: "2024".into(),
            status: "active".into(),
        }
    }

    #[test]
    fn test_cluster_nodes_render_as_labelled_pairs() {
        let printer = ClusterPrinter {
            vke_cluster: Cluster {
                id: "c1".into(),
                node_pools: vec![NodePool {
                    id: "np1".into(),
                    nodes: vec![node("n1", "node-a"), node("n2", "node-b")],
                    ..Default::default()
                }],
                ..Default::default()
            },
        };
        assert!(printer.data().iter().all(|row| matches!(row.len(), 1 | 2)));

        let out = String::from_utf8(render(OutputFormat::Table, &printer).unwrap()).unwrap();
        let nodes = out.split("NODES\n").nth(1).unwrap();
        let lines: Vec<_> = nodes.lines().collect();
        assert_eq!(
            lines,
            [
                "ID            n1",
                "DATE CREATED  2024",
                "LABEL         node-a",
                "STATUS        active",
                BLOCK_SEPARATOR,
                "ID            n2",
                "DATE CREATED  2024",
                "LABEL         node-b",
                "STATUS        active",
            ]
        );
    }

    #[test]
    fn test_versions_table() {
        let printer = VersionsPrinter {
            versions: vec!["v1.29.2+1".into(), "v1.28.7+1".into()],
        };
        let out = String::from_utf8(render(OutputFormat::Table, &printer).unwrap()).unwrap();
        assert_eq!(out, "VERSION\nv1.29.2+1\nv1.28.7+1\n");
    }
}
