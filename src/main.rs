// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneydash::{cli, commands, config, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_flag("verbose"));

    let conn = db::open_or_init()?;
    let mut settings = config::load(&conn)?;
    if let Some(owner) = matches.get_one::<String>("owner") {
        settings.owner = owner.trim().to_string();
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &settings, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, &settings, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&conn, &settings, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &settings, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
