/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use checkers::{Cli, Engine, EngineCommand};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    let mut engine = match Engine::from_cli(&cli) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} failed to start: {e:#}", env!("CARGO_PKG_NAME"));
            std::process::exit(1);
        }
    };

    // Forward any trailing arguments as the first command
    if !cli.command.is_empty() {
        match EngineCommand::try_parse_from(&cli.command) {
            Ok(cmd) => {
                if let Err(e) = engine.send_command(cmd) {
                    eprintln!("{e}");
                }
            }
            Err(e) => eprintln!("ERROR on input {:?}:\n{e}", cli.command),
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
