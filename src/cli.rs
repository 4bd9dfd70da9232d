// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, crate_version, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print JSON").required(false))
        .arg(arg!(--jsonl "Print one JSON object per line").required(false))
}

fn confirm_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .action(ArgAction::SetTrue)
        .help("Confirm permanent deletion")
}

pub fn build_cli() -> Command {
    Command::new("avicola")
        .version(crate_version!())
        .about("Poultry-sales ledger: sales, expenses and customer collection alerts")
        .arg(
            arg!(--db <PATH> "SQLite database file (defaults to $AVICOLA_DB or the user data dir)")
                .required(false)
                .global(true),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(Command::new("customers").about("List regular customers"))
        .subcommand(
            Command::new("sale")
                .about("Record and review sales")
                .subcommand(
                    Command::new("add")
                        .about("Record a sale")
                        .arg(arg!(--date <DATE> "Sale date YYYY-MM-DD (default today)").required(false))
                        .arg(arg!(--customer <NAME>).required(true))
                        .arg(
                            arg!(--bird <TYPE> "pollo|gallina")
                                .required(false)
                                .default_value("pollo"),
                        )
                        .arg(
                            arg!(--quantity <QTY>)
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(arg!(--gross <LBS> "Gross weight in pounds").required(true))
                        .arg(
                            arg!(--discount <LBS> "Weight discounted in pounds")
                                .required(false)
                                .default_value("0"),
                        )
                        .arg(arg!(--price <PRICE> "Price per pound").required(true))
                        .arg(
                            arg!(--paid <AMOUNT> "Amount paid by the customer")
                                .required(false)
                                .default_value("0"),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List sales with totals")
                        .arg(arg!(--customer <NAME>).required(false))
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("clear")
                        .about("Delete ALL sales")
                        .arg(confirm_flag()),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and review expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(arg!(--date <DATE> "Expense date YYYY-MM-DD (default today)").required(false))
                        .arg(
                            arg!(--category <CATEGORY> "food|transport|production|health|education|labor|loss|miscellaneous|other")
                                .required(false)
                                .default_value("food"),
                        )
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--description <TEXT>).required(false))
                        .arg(
                            arg!(--calculation <VALUE> "Optional side calculation")
                                .required(false)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List expenses with total")
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("clear")
                        .about("Delete ALL expenses")
                        .arg(confirm_flag()),
                ),
        )
        .subcommand(output_flags(
            Command::new("alerts").about("Customers to follow up for collection"),
        ))
        .subcommand(output_flags(
            Command::new("summary").about("Totals across sales and expenses"),
        ))
        .subcommand(
            Command::new("import")
                .about("Import records from CSV")
                .subcommand(
                    Command::new("sales").arg(arg!(--path <CSV>).required(true)),
                )
                .subcommand(
                    Command::new("expenses").arg(arg!(--path <CSV>).required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(
                    Command::new("sales")
                        .arg(arg!(--format <FMT> "csv|json").required(false).default_value("csv"))
                        .arg(arg!(--out <PATH>).required(true)),
                )
                .subcommand(
                    Command::new("expenses")
                        .arg(arg!(--format <FMT> "csv|json").required(false).default_value("csv"))
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for problems"))
}
