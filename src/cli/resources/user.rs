use super::{footer, list_cell, rows_or_empty, PagingArgs};
use crate::cli::context::Context;
use crate::cli::display::{cells, kv, Renderable, Row};
use crate::domain::models::{User, UserCreate, UserUpdate};
use crate::domain::paging::Meta;
use anyhow::Context as _;
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    /// List all users
    #[command(visible_alias = "l")]
    List(PagingArgs),

    /// Get a user
    #[command(visible_alias = "g")]
    Get(UserId),

    /// Create a user
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// Update a user
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Delete a user
    #[command(visible_aliases = ["d", "destroy"])]
    Delete(UserId),
}

#[derive(Args, Debug)]
struct UserId {
    #[arg(value_name = "USER-ID")]
    id: String,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Name of the user
    #[arg(short, long, required = true)]
    name: String,

    /// Email address of the user
    #[arg(short, long, required = true)]
    email: String,

    /// Password for the user
    #[arg(short, long, required = true)]
    password: String,

    /// Allow API access
    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    api_enabled: Option<bool>,

    /// Comma separated ACLs
    #[arg(long, value_delimiter = ',')]
    acl: Vec<String>,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    #[arg(value_name = "USER-ID")]
    id: String,

    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    email: Option<String>,

    #[arg(short, long)]
    password: Option<String>,

    #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
    api_enabled: Option<bool>,

    /// Replace the ACLs with this comma separated list
    #[arg(long, value_delimiter = ',')]
    acl: Option<Vec<String>>,
}

impl UserCommand {
    pub async fn execute(self, ctx: &mut Context) -> anyhow::Result<()> {
        let service = ctx.client.users();
        match self.command {
            UserSubcommand::List(_) => {
                let (users, meta) = service
                    .list(&ctx.paging)
                    .await
                    .context("error retrieving user list")?;
                ctx.display(&UsersPrinter { users, meta })?;
            }
            UserSubcommand::Get(args) => {
                let user = service.get(&args.id).await.context("error getting user")?;
                ctx.display(&UserPrinter { user })?;
            }
            UserSubcommand::Create(args) => {
                let req = UserCreate {
                    name: args.name,
                    email: args.email,
                    password: args.password,
                    api_enabled: args.api_enabled,
                    acls: args.acl,
                };
                let user = service
                    .create(&req)
                    .await
                    .context("error creating user")?;
                ctx.display(&UserPrinter { user })?;
            }
            UserSubcommand::Update(args) => {
                let req = UserUpdate {
                    name: args.name,
                    email: args.email,
                    password: args.password,
                    api_enabled: args.api_enabled,
                    acls: args.acl,
                };
                service
                    .update(&args.id, &req)
                    .await
                    .context("error updating user")?;
                ctx.message("user has been updated")?;
            }
            UserSubcommand::Delete(args) => {
                service
                    .delete(&args.id)
                    .await
                    .context("error deleting user")?;
                ctx.message("user has been deleted")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UsersPrinter {
    pub users: Vec<User>,
    pub meta: Meta,
}

impl Renderable for UsersPrinter {
    fn columns(&self) -> Option<Row> {
        Some(cells(["ID", "NAME", "EMAIL", "API", "ACL"]))
    }

    fn data(&self) -> Vec<Row> {
        rows_or_empty(&self.users, 5, |u| {
            vec![
                u.id.clone(),
                u.name.clone(),
                u.email.clone(),
                u.api_enabled.to_string(),
                list_cell(&u.acls),
            ]
        })
    }

    fn paging(&self) -> Vec<Row> {
        footer(&self.meta)
    }
}

#[derive(Debug, Serialize)]
pub struct UserPrinter {
    pub user: User,
}

impl Renderable for UserPrinter {
    fn data(&self) -> Vec<Row> {
        let u = &self.user;
        vec![
            kv("ID", &u.id),
            kv("NAME", &u.name),
            kv("EMAIL", &u.email),
            kv("API", u.api_enabled),
            kv("ACL", list_cell(&u.acls)),
        ]
    }
}
