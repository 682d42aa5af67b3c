// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .long("kind")
        .required(true)
        .value_parser(["income", "expense"])
}

fn entry_add(name: &'static str, category_flag: &'static str, with_receipt: bool) -> Command {
    let mut cmd = Command::new(name)
        .about("Record a new entry")
        .arg(Arg::new("amount").long("amount").required(true).help("e.g. 12,50 or 12.50"))
        .arg(Arg::new("description").long("description").required(true))
        .arg(Arg::new(category_flag).long(category_flag).required(true))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"));
    if with_receipt {
        cmd = cmd.arg(
            Arg::new("receipt")
                .long("receipt")
                .help("Path to a receipt image to attach"),
        );
    }
    cmd
}

fn entry_list() -> Command {
    json_args(
        Command::new("list").about("List entries, newest first").arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(usize)),
        ),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneydash")
        .about("Income and expense tracking with a monthly dashboard")
        .version(clap::crate_version!())
        .arg(
            Arg::new("owner")
                .long("owner")
                .global(true)
                .help("Owner to act as (overrides the stored setting)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(json_args(
            Command::new("dashboard")
                .about("Balance, monthly series and highlights")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("order")
                        .long("order")
                        .value_parser(["chronological", "first-seen"]),
                )
                .arg(Arg::new("locale").long("locale").help("pt-BR or en")),
        ))
        .subcommand(
            Command::new("expense")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Expenses")
                .subcommand(entry_add("add", "category", true))
                .subcommand(entry_list()),
        )
        .subcommand(
            Command::new("income")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Incomes")
                .subcommand(entry_add("add", "source", false))
                .subcommand(entry_list()),
        )
        .subcommand(
            Command::new("category")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Expense categories and income sources")
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_args(Command::new("list").arg(kind_arg())))
                .subcommand(
                    Command::new("rm")
                        .arg(kind_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .about("Persisted settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
