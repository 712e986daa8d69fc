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

use std::io::IsTerminal;
use vultr_cli::shared::CancelToken;
use vultr_cli::Dispatcher;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cancel = CancelToken::new();
    cancel.cancel_on_interrupt();

    let mut stderr = std::io::stderr();
    let color = stderr.is_terminal();
    let code = Dispatcher::new(cancel)
        .run(
            std::env::args_os(),
            Box::new(std::io::stdout()),
            &mut stderr,
            color,
        )
        .await;

    std::process::exit(code);
}
