// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pre-run wiring shared by every command, and argv dispatch.
//!
//! The hooks a leaf runs are data: [`PRE_RUN`] maps command paths to hook
//! lists and a leaf takes the entry with the longest matching prefix.

use super::commands::CliArgs;
use super::context::{Context, PreRun};
use super::display::Printer;
use crate::domain::config::{Overrides, Settings};
use crate::domain::paging::ListOptions;
use crate::infrastructure::api::{Client, HttpTransport, Transport};
use crate::shared::{logging, CancelToken, CliError, Result};
use clap::error::ErrorKind;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use colored::Colorize;
use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Take the API key and output format from the resolved settings.
    LoadConfig,
    /// Read `--cursor` and `--per-page` when the leaf declares them.
    Paging,
    /// Copy the leaf's positional values.
    Args,
    /// Fail unless an API key was resolved.
    RequireAuth,
}

const AUTHENTICATED: &[Hook] = &[Hook::LoadConfig, Hook::Paging, Hook::Args, Hook::RequireAuth];
const PUBLIC: &[Hook] = &[Hook::LoadConfig, Hook::Paging, Hook::Args];

pub const PRE_RUN: &[(&str, &[Hook])] = &[
    ("", AUTHENTICATED),
    ("kubernetes versions", PUBLIC),
    ("regions", PUBLIC),
    ("plans", PUBLIC),
];

/// Hooks for the command at `path` (canonical subcommand names).
pub fn hooks_for<S: AsRef<str>>(path: &[S]) -> &'static [Hook] {
    PRE_RUN
        .iter()
        .filter_map(|(prefix, hooks)| {
            let prefix: Vec<&str> = prefix.split_whitespace().collect();
            let matches = prefix.len() <= path.len()
                && prefix.iter().zip(path).all(|(p, s)| *p == s.as_ref());
            matches.then_some((prefix.len(), *hooks))
        })
        .max_by_key(|(depth, _)| *depth)
        .map(|(_, hooks)| hooks)
        .unwrap_or(AUTHENTICATED)
}

/// What the pre-run hooks need to know about the invoked leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaf {
    pub path: Vec<String>,
    pub paged: bool,
    pub cursor: Option<String>,
    pub per_page: Option<u32>,
    pub positionals: Vec<String>,
}

impl Leaf {
    pub fn resolve(root: &clap::Command, matches: &ArgMatches) -> Self {
        let mut command = root;
        let mut matches = matches;
        let mut path = Vec::new();

        while let Some((name, sub)) = matches.subcommand() {
            path.push(name.to_string());
            match command.find_subcommand(name) {
                Some(next) => command = next,
                None => break,
            }
            matches = sub;
        }

        let positionals = command
            .get_positionals()
            .filter_map(|arg| matches.try_get_raw(arg.get_id().as_str()).ok().flatten())
            .flatten()
            .map(|value| value.to_string_lossy().into_owned())
            .collect();

        Self {
            path,
            paged: command.get_arguments().any(|a| a.get_id() == "per_page"),
            cursor: matches.try_get_one::<String>("cursor").ok().flatten().cloned(),
            per_page: matches.try_get_one::<u32>("per_page").ok().flatten().copied(),
            positionals,
        }
    }
}

pub fn run_hooks(hooks: &[Hook], settings: &Settings, leaf: &Leaf) -> Result<PreRun> {
    let mut pre_run = PreRun::default();

    for hook in hooks {
        debug!(?hook, path = %leaf.path.join(" "), "pre-run");
        match hook {
            Hook::LoadConfig => {
                pre_run.api_key = settings.api_key.clone();
                pre_run.output = settings.output;
                pre_run.has_auth = settings.has_auth();
            }
            Hook::Paging => {
                if leaf.paged {
                    pre_run.paging = ListOptions::new(
                        leaf.cursor.clone(),
                        Some(leaf.per_page.unwrap_or(settings.per_page)),
                    );
                }
            }
            Hook::Args => pre_run.args = leaf.positionals.clone(),
            Hook::RequireAuth => {
                if !pre_run.has_auth {
                    return Err(CliError::Auth);
                }
            }
        }
    }

    Ok(pre_run)
}

pub type Connector = Box<dyn Fn(&PreRun, CancelToken) -> Result<Arc<dyn Transport>> + Send + Sync>;

/// Parses argv, runs the pre-run hooks, builds the adapter and executes the
/// selected command.
pub struct Dispatcher {
    env_api_key: Option<String>,
    connector: Connector,
    cancel: CancelToken,
}

impl Dispatcher {
    /// Production wiring: `VULTR_API_KEY` from the environment and an HTTP
    /// transport.
    pub fn new(cancel: CancelToken) -> Self {
        Self {
            env_api_key: Settings::env_api_key(),
            connector: Box::new(|pre_run: &PreRun, cancel: CancelToken| {
                let transport = HttpTransport::new(pre_run.api_key.clone(), cancel)?;
                Ok(Arc::new(transport) as Arc<dyn Transport>)
            }),
            cancel,
        }
    }

    /// Dispatch against a fixed transport. The environment is not read.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            env_api_key: None,
            connector: Box::new(move |_: &PreRun, _: CancelToken| Ok(transport.clone())),
            cancel: CancelToken::new(),
        }
    }

    pub fn env_api_key(mut self, key: Option<String>) -> Self {
        self.env_api_key = key;
        self
    }

    pub fn cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run one command and return the process exit code. Rendered output
    /// goes to `out`; diagnostics go to `err`.
    pub async fn run<I, T>(
        &self,
        argv: I,
        out: Box<dyn Write + Send>,
        err: &mut dyn Write,
        color: bool,
    ) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match CliArgs::command().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => return report_usage(e, out, err),
        };

        match self.dispatch(&matches, out).await {
            Ok(()) => 0,
            Err(e) => {
                let line = format!("Error: {e:#}");
                let line = if color { line.red().to_string() } else { line };
                let _ = writeln!(err, "{}", line);
                1
            }
        }
    }

    async fn dispatch(&self, matches: &ArgMatches, out: Box<dyn Write + Send>) -> anyhow::Result<()> {
        let args = CliArgs::from_arg_matches(matches)?;
        logging::init(args.verbose);

        let overrides = Overrides {
            api_key: args.api_key.clone(),
            output: args.output.clone(),
            config: args.config.clone(),
        };
        let settings = Settings::load(&overrides, self.env_api_key.clone())?;

        let root = CliArgs::command();
        let leaf = Leaf::resolve(&root, matches);
        let pre_run = run_hooks(hooks_for(&leaf.path), &settings, &leaf)?;

        let transport = (self.connector)(&pre_run, self.cancel.clone())?;
        let printer = Printer::new(pre_run.output, out);
        let mut ctx = Context::new(Client::new(transport), self.cancel.clone(), pre_run, printer);

        debug!(
            args = ?ctx.args,
            paging = ?ctx.paging,
            output = %ctx.output,
            has_auth = ctx.has_auth,
            "executing {}",
            leaf.path.join(" ")
        );
        args.command.execute(&mut ctx).await
    }
}

/// Help and version go to `out` with exit 0; every other parse failure is a
/// usage error with exit 1.
fn report_usage(e: clap::Error, mut out: Box<dyn Write + Send>, err: &mut dyn Write) -> i32 {
    let rendered = e.render().to_string();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", rendered);
            let _ = out.flush();
            0
        }
        _ => {
            let _ = write!(err, "{}", rendered);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::OutputFormat;

    fn leaf(path: &[&str], paged: bool) -> Leaf {
        Leaf {
            path: path.iter().map(|s| s.to_string()).collect(),
            paged,
            ..Default::default()
        }
    }

    fn settings(api_key: &str) -> Settings {
        Settings {
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(hooks_for(&["block-storage", "list"]), AUTHENTICATED);
        assert_eq!(hooks_for(&["kubernetes", "versions"]), PUBLIC);
        assert_eq!(hooks_for(&["kubernetes", "list"]), AUTHENTICATED);
        assert_eq!(hooks_for(&["regions", "list"]), PUBLIC);
        assert_eq!(hooks_for(&["plans", "list"]), PUBLIC);
        assert_eq!(hooks_for::<&str>(&[]), AUTHENTICATED);
    }

    #[test]
    fn test_require_auth() {
        let err = run_hooks(AUTHENTICATED, &settings(""), &leaf(&["account", "get"], false))
            .unwrap_err();
        assert!(matches!(err, CliError::Auth));

        let pre_run = run_hooks(PUBLIC, &settings(""), &leaf(&["regions", "list"], true)).unwrap();
        assert!(!pre_run.has_auth);
    }

    #[test]
    fn test_paging_defaults_from_settings() {
        let pre_run = run_hooks(AUTHENTICATED, &settings("k"), &leaf(&["user", "list"], true))
            .unwrap();
        assert_eq!(pre_run.paging, ListOptions::new(None, Some(100)));

        let pre_run = run_hooks(AUTHENTICATED, &settings("k"), &leaf(&["user", "get"], false))
            .unwrap();
        assert_eq!(pre_run.paging, ListOptions::default());
    }

    #[test]
    fn test_leaf_resolution() {
        let root = CliArgs::command();
        let matches = root
            .clone()
            .try_get_matches_from([
                "vultr-cli",
                "-o",
                "json",
                "bs",
                "list",
                "--per-page",
                "250",
                "--cursor",
                "abc",
            ])
            .unwrap();
        let leaf = Leaf::resolve(&root, &matches);
        assert_eq!(leaf.path, vec!["block-storage", "list"]);
        assert!(leaf.paged);
        assert_eq!(leaf.cursor.as_deref(), Some("abc"));
        assert_eq!(leaf.per_page, Some(250));

        let matches = root
            .clone()
            .try_get_matches_from(["vultr-cli", "dns", "record", "get", "example.com", "rec-1"])
            .unwrap();
        let leaf = Leaf::resolve(&root, &matches);
        assert_eq!(leaf.path, vec!["dns", "record", "get"]);
        assert_eq!(leaf.positionals, vec!["example.com", "rec-1"]);
        assert!(!leaf.paged);
    }

    #[test]
    fn test_load_config_hook() {
        let s = Settings {
            api_key: "k".into(),
            output: OutputFormat::Yaml,
            ..Default::default()
        };
        let pre_run = run_hooks(AUTHENTICATED, &s, &leaf(&["account", "get"], false)).unwrap();
        assert_eq!(pre_run.output, OutputFormat::Yaml);
        assert!(pre_run.has_auth);
    }
}
