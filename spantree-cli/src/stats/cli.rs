use clap::{Command, arg};

pub const STATS_CMD: &str = "stats";

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .about("Summarize the tree built for each document of an interval file")
        .arg_required_else_help(true)
        .arg(arg!(-i --intervals <intervals> "Interval file to index: document, start, length, [label]").required(true))
}
