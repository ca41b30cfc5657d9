// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use ztv::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = ztv::run(cli) {
        let code = e.exit_code();
        tracing::error!(exit_code = code, "{}", e);
        eprintln!("error: {}", e);
        std::process::exit(code);
    }
}
