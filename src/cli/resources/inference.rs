use super::{footer, rows_or_empty, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{InferenceUsage, Subscription, SubscriptionReq};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InferenceCommand {
    #[command(subcommand)]
    command: InferenceSubcommand,
}

#[derive(Subcommand, Debug)]
enum InferenceSubcommand {
    /// List inference subscriptions
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get an inference subscription
    #[command(visible_alias = "g")]
    Get(SubscriptionId),

    /// Create an inference subscription
    #[command(visible_alias = "c")]
    Create(LabelArgs),

    /// Relabel an inference subscription
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete an inference subscription
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(SubscriptionId),

    /// Show token and character usage of a subscription
    Usage(SubscriptionId),
}

#[derive(Args, Debug)]
struct SubscriptionId {
    #[arg(value_name = "INFERENCE-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct LabelArgs {
    /// Label for the subscription
    #[arg(short, long, required = true)]
    label: String,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "INFERENCE-ID")]
    id: String,

    /// New label
    #[arg(short, long, required = true)]
    label: String,
}

impl InferenceCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.inference();
        match self.command {
            InferenceSubcommand::List(_) => {
                let (subscriptions, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving inference subscription list")?;
                ctx.display(&SubscriptionsPrinter {
                    subscriptions,
                    meta,
                })?;
            }
            InferenceSubcommand::Get(args) => {
                let subscription = service
                    .get(&args.id)
                    .await
                    .context("error getting inference subscription")?;
                ctx.display(&SubscriptionPrinter { subscription })?;
            }
            InferenceSubcommand::Create(args) => {
                let subscription = service
                    .create(&SubscriptionReq { label: args.label })
                    .await
                    .context("error creating inference subscription")?;
                ctx.display(&SubscriptionPrinter { subscription })?;
            }
            InferenceSubcommand::Update(args) => {
                let subscription = service
                    .update(&args.id, &SubscriptionReq { label: args.label })
                    .await
                    .context("error updating inference subscription")?;
                ctx.display(&SubscriptionPrinter { subscription })?;
            }
            InferenceSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting inference subscription")?;
                ctx.message("inference subscription has been deleted")?;
            }
            InferenceSubcommand::Usage(args) => {
                let usage = service
                    .usage(&args.id)
                    .await
                    .context("error retrieving inference usage")?;
                ctx.display(&UsagePrinter { usage })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionsPrinter {
    pub subscriptions: Vec<Subscription>,
    pub meta: Meta,
}

impl Renderable for SubscriptionsPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["ID", "DATE CREATED", "LABEL", "API KEY"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.subscriptions, 4, |s| {
            vec![
                s.id.clone(),
                s.date_created.clone(),
                s.label.clone(),
                s.api_key.clone(),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionPrinter {
    pub subscription: Subscription,
}

impl Renderable for SubscriptionPrinter {
    fn data(&self) -> Vec<Row> {
        let s = &self.subscription;
        vec![
            kv("ID", &s.id),
            kv("DATE CREATED", &s.date_created),
            kv("LABEL", &s.label),
            kv("API KEY", &s.api_key),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct UsagePrinter {
    pub usage: InferenceUsage,
}

impl Renderable for UsagePrinter {
    fn data(&self) -> Vec<Row> {
        let chat = &self.usage.chat;
        let audio = &self.usage.audio;
        vec![
            vec!["CHAT USAGE".to_string()],
            kv("CURRENT TOKENS", chat.current_tokens),
            kv("MONTHLY ALLOTMENT", chat.monthly_allotment),
            kv("OVERAGE", chat.overage),
            vec![" ".to_string()],
            vec!["AUDIO GENERATION USAGE".to_string()],
            kv("TTS CHARACTERS", audio.tts_characters),
            kv("TTS (SM) CHARACTERS", audio.tts_sm_characters),
        ]
    }
}
