use super::list_cell;
use crate::cli::context::Context;
use crate::cli::display::{kv, Renderable, Row};
use crate::domain::models::Account;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
enum AccountSubcommand {
    /// Get account information
    Get,
}

impl AccountCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        match self.command {
            AccountSubcommand::Get => {
                let account = ctx
                    .client
                    .account()
                    .get()
                    .await
                    .context("error retrieving account information")?;
                ctx.display(&AccountPrinter { account })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AccountPrinter {
    pub account: Account,
}

impl Renderable for AccountPrinter {
    fn data(&self) -> Vec<Row> {
        let a = &self.account;
        vec![
            kv("BALANCE", format!("{:.2}", a.balance)),
            kv("PENDING CHARGES", format!("{:.2}", a.pending_charges)),
            kv("LAST PAYMENT DATE", &a.last_payment_date),
            kv("LAST PAYMENT AMOUNT", format!("{:.2}", a.last_payment_amount)),
            kv("NAME", &a.name),
            kv("EMAIL", &a.email),
            kv("ACLS", list_cell(&a.acls)),
        ]
    }
}
