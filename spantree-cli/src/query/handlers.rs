use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

use spantree_core::utils::{get_dynamic_reader_w_stdin, parse_record_line, read_span_records};
use spantree_index::PredicateKind;
use spantree_index::config::QueryConfig;
use spantree_index::document_index::{DocumentIndex, IntoDocumentIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub predicate: PredicateKind,
    pub first_only: bool,
    pub exists: bool,
}

impl QueryOptions {
    /// Command line flags win over the config file defaults.
    pub fn from_matches(matches: &ArgMatches, defaults: &QueryConfig) -> Result<Self> {
        let predicate = match matches.get_one::<String>("predicate") {
            Some(name) => name.parse::<PredicateKind>().map_err(|e| anyhow!(e))?,
            None => defaults.predicate,
        };

        Ok(QueryOptions {
            predicate,
            first_only: matches.get_flag("first") || defaults.first_only,
            exists: matches.get_flag("exists"),
        })
    }
}

pub fn run_query(matches: &ArgMatches, defaults: &QueryConfig) -> Result<()> {
    let intervals = matches
        .get_one::<String>("intervals")
        .ok_or_else(|| anyhow!("A path to an interval file is required."))?;

    let queries = matches
        .get_one::<String>("queries")
        .ok_or_else(|| anyhow!("A path to a query file is required."))?;

    let options = QueryOptions::from_matches(matches, defaults)?;

    let index = read_span_records(intervals)?
        .into_document_index()
        .with_context(|| format!("Failed to index {}", intervals))?;
    log::info!(
        "indexed {} intervals across {} documents",
        index.record_count(),
        index.len()
    );

    let reader = get_dynamic_reader_w_stdin(queries)?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let answered = process_queries(reader, &index, &options, &mut writer)?;
    writer.flush()?;

    log::info!("answered {} queries with predicate '{}'", answered, options.predicate);

    Ok(())
}

///
/// Answer every query line read from `reader`, writing tab separated results to `writer`.
///
/// With `exists` set, each query produces one line ending in `true` or
/// `false`. Otherwise each match produces one line: the query columns
/// followed by the start, length and label of the matching interval.
///
/// # Returns
/// - the number of queries answered
///
pub fn process_queries<R: BufRead, W: Write>(
    reader: R,
    index: &DocumentIndex,
    options: &QueryOptions,
    writer: &mut W,
) -> Result<usize> {
    let mut output_buffer = String::with_capacity(1024);
    let mut answered = 0;

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(query) = parse_record_line(&line, line_index + 1)? else {
            continue;
        };
        answered += 1;

        output_buffer.clear();
        if options.exists {
            let found = index.any(&query.document, query.start, query.length, options.predicate)?;
            writeln!(
                &mut output_buffer,
                "{}\t{}\t{}\t{}",
                query.document, query.start, query.length, found
            )?;
        } else {
            let hits = index.query(
                &query.document,
                query.start,
                query.length,
                options.predicate,
                options.first_only,
            )?;
            for hit in hits {
                writeln!(
                    &mut output_buffer,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    query.document,
                    query.start,
                    query.length,
                    hit.start,
                    hit.length,
                    hit.label.as_deref().unwrap_or(".")
                )?;
            }
        }
        writer.write_all(output_buffer.as_bytes())?;
    }

    Ok(answered)
}
