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

//! Per-process runtime context handed to every command body.

use super::display::{Printer, Renderable};
use crate::domain::config::OutputFormat;
use crate::domain::paging::ListOptions;
use crate::infrastructure::api::Client;
use crate::shared::{CancelToken, Result};

/// State produced by the pre-run hooks, before any adapter exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreRun {
    pub api_key: String,
    pub output: OutputFormat,
    pub has_auth: bool,
    pub paging: ListOptions,
    pub args: Vec<String>,
}

pub struct Context {
    pub client: Client,
    /// Shared with the transport. Bodies check it before local side effects
    /// such as writing files.
    pub cancel: CancelToken,
    /// Positional values of the invoked leaf command, in declaration order.
    pub args: Vec<String>,
    /// Cursor and page size for list commands.
    pub paging: ListOptions,
    /// Format the printer was built with.
    pub output: OutputFormat,
    /// Whether an API key was resolved. Public commands run without one.
    pub has_auth: bool,
    pub printer: Printer,
}

impl Context {
    pub fn new(client: Client, cancel: CancelToken, pre_run: PreRun, printer: Printer) -> Self {
        Self {
            client,
            cancel,
            args: pre_run.args,
            paging: pre_run.paging,
            output: pre_run.output,
            has_auth: pre_run.has_auth,
            printer,
        }
    }

    pub fn display(&mut self, item: &dyn Renderable) -> Result<()> {
        self.printer.display(item)
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        self.printer.message(text)
    }
}
