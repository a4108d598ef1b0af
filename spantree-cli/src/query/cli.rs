use clap::{Arg, ArgAction, Command, arg};

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .about("Find the indexed intervals matching each query range")
        .arg_required_else_help(true)
        .arg(arg!(-i --intervals <intervals> "Interval file to index: document, start, length, [label]").required(true))
        .arg(arg!(-q --queries <queries> "Query file with document, start, length per line, or '-' for stdin").required(true))
        .arg(arg!(-p --predicate <predicate> "How stored intervals must relate to a query (overlaps, intersects or contains)"))
        .arg(
            Arg::new("first")
                .long("first")
                .action(ArgAction::SetTrue)
                .help("Report only the lowest-start match per query"),
        )
        .arg(
            Arg::new("exists")
                .long("exists")
                .action(ArgAction::SetTrue)
                .conflicts_with("first")
                .help("Only report whether each query has a match"),
        )
}
