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

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use vultr_cli::{CancelToken, Dispatcher, MockTransport};

/// A cloneable in-memory writer standing in for stdout.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Config path that never exists, so the developer's own config file is
/// never read.
pub const NO_CONFIG: &str = "/nonexistent/vultr-cli-test.yaml";

/// Run a command with an API key against `mock`.
pub async fn run(mock: Arc<MockTransport>, args: &[&str]) -> Outcome {
    let mut argv = vec!["vultr-cli"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["--api-key", "test-key", "--config", NO_CONFIG]);
    run_argv(mock, &argv).await
}

/// Run a command without any API key against `mock`.
pub async fn run_anonymous(mock: Arc<MockTransport>, args: &[&str]) -> Outcome {
    let mut argv = vec!["vultr-cli"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["--config", NO_CONFIG]);
    run_argv(mock, &argv).await
}

/// Run a command with an API key after `cancel` has been handed to the
/// dispatcher.
pub async fn run_with_cancel(
    mock: Arc<MockTransport>,
    cancel: CancelToken,
    args: &[&str],
) -> Outcome {
    let mut argv = vec!["vultr-cli"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["--api-key", "test-key", "--config", NO_CONFIG]);
    dispatch(Dispatcher::with_transport(mock).cancel(cancel), &argv).await
}

async fn run_argv(mock: Arc<MockTransport>, argv: &[&str]) -> Outcome {
    dispatch(Dispatcher::with_transport(mock), argv).await
}

async fn dispatch(dispatcher: Dispatcher, argv: &[&str]) -> Outcome {
    let out = Capture::default();
    let mut err: Vec<u8> = Vec::new();
    let code = dispatcher
        .run(argv.iter().copied(), Box::new(out.clone()), &mut err, false)
        .await;
    Outcome {
        code,
        stdout: out.contents(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}
