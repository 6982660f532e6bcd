// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("month")
        .value_parser(["today", "week", "month", "year", "all"])
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("YYYY-MM, defaults to the current month")
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal finance dashboard: transactions, goals and monthly reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the database and default categories"))
        .subcommand(
            Command::new("sample")
                .about("Load the demo data set into an empty database")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Load even when records already exist"),
                ),
        )
        .subcommand(category_cmd())
        .subcommand(account_cmd())
        .subcommand(card_cmd())
        .subcommand(tx_cmd())
        .subcommand(goal_cmd())
        .subcommand(report_cmd())
        .subcommand(settings_cmd())
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("id").long("id"))
                .arg(Arg::new("color").long("color").default_value("#CCCCCC"))
                .arg(Arg::new("icon").long("icon").default_value("")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn account_cmd() -> Command {
    Command::new("account")
        .about("Manage bank accounts")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("bank").long("bank").required(true))
                .arg(Arg::new("balance").long("balance").default_value("0"))
                .arg(Arg::new("type").long("type").default_value("checking")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Manage credit cards")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("bank").long("bank").required(true))
                .arg(Arg::new("brand").long("brand").required(true))
                .arg(Arg::new("last4").long("last4").required(true))
                .arg(Arg::new("limit").long("limit").required(true))
                .arg(Arg::new("used").long("used").default_value("0"))
                .arg(
                    Arg::new("due-day")
                        .long("due-day")
                        .required(true)
                        .value_parser(value_parser!(u32).range(1..=31)),
                ),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("status").long("status").default_value("completed")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .arg(month_arg())
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn goal_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("name").long("name"))
        .arg(Arg::new("target").long("target"))
        .arg(Arg::new("current").long("current"))
        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
        .arg(Arg::new("category").long("category"))
        .arg(
            Arg::new("priority")
                .long("priority")
                .value_parser(["low", "medium", "high"]),
        )
        .arg(Arg::new("type").long("type"))
        .arg(Arg::new("notes").long("notes"))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Track savings goals")
        .subcommand(
            goal_fields(Command::new("add"))
                .mut_arg("name", |a| a.required(true))
                .mut_arg("target", |a| a.required(true)),
        )
        .subcommand(json_flags(
            Command::new("list")
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["active", "completed", "failed"]),
                )
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .value_parser(["low", "medium", "high"]),
                )
                .arg(Arg::new("type").long("type")),
        ))
        .subcommand(
            goal_fields(Command::new("update").arg(id_arg()))
                .arg(
                    Arg::new("clear-deadline")
                        .long("clear-deadline")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("deadline"),
                )
                .arg(
                    Arg::new("clear-category")
                        .long("clear-category")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("category"),
                ),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
        .subcommand(
            Command::new("contribute")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(json_flags(Command::new("recommend")))
        .subcommand(json_flags(Command::new("achievements")))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries, charts data and the monthly report")
        .subcommand(json_flags(Command::new("summary").arg(period_arg())))
        .subcommand(json_flags(
            Command::new("categories").arg(period_arg()).arg(
                Arg::new("top")
                    .long("top")
                    .default_value("8")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(
            Command::new("monthly").arg(
                Arg::new("months")
                    .long("months")
                    .default_value("6")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(
            Command::new("wealth").arg(
                Arg::new("months")
                    .long("months")
                    .default_value("6")
                    .value_parser(value_parser!(usize)),
            ),
        ))
        .subcommand(json_flags(Command::new("insights")))
        .subcommand(json_flags(Command::new("dashboard")))
        .subcommand(
            Command::new("export")
                .about("Write the monthly report for an external renderer")
                .arg(month_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Presentation preferences")
        .subcommand(
            Command::new("set")
                .arg(
                    Arg::new("key")
                        .long("key")
                        .required(true)
                        .value_parser(["currency", "language", "theme"]),
                )
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(json_flags(Command::new("list")))
}
