use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

use spantree_core::utils::read_span_records;
use spantree_index::document_index::{DocumentIndex, IntoDocumentIndex};

pub fn run_stats(matches: &ArgMatches) -> Result<()> {
    let intervals = matches
        .get_one::<String>("intervals")
        .ok_or_else(|| anyhow!("A path to an interval file is required."))?;

    let index = read_span_records(intervals)?
        .into_document_index()
        .with_context(|| format!("Failed to index {}", intervals))?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_stats(&index, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// One row per document, sorted by name: interval count, tree depth and greatest end.
pub fn write_stats<W: Write>(index: &DocumentIndex, writer: &mut W) -> Result<()> {
    writeln!(writer, "document\tintervals\tdepth\tmax_end")?;
    for document in index.documents() {
        let Some(tree) = index.get(document) else {
            continue;
        };
        let max_end = tree
            .max_end()
            .map(|end| end.to_string())
            .unwrap_or_else(|| ".".to_string());
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            document,
            tree.len(),
            tree.depth(),
            max_end
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use spantree_core::models::SpanRecord;
    use spantree_core::utils::parse_span_records;

    #[rstest]
    fn test_write_stats() {
        let records = parse_span_records(Cursor::new(
            "lib.rs\t4\t4\nmain.rs\t0\t3\nmain.rs\t5\t2\nmain.rs\t10\t1\nmain.rs\t12\t4\n",
        ))
        .unwrap();
        let index = records.into_document_index().unwrap();

        let mut out = Vec::new();
        write_stats(&index, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "document\tintervals\tdepth\tmax_end\nlib.rs\t1\t1\t8\nmain.rs\t4\t3\t16\n"
        );
    }

    #[rstest]
    fn test_write_stats_empty() {
        let index = Vec::<SpanRecord>::new().into_document_index().unwrap();
        let mut out = Vec::new();
        write_stats(&index, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "document\tintervals\tdepth\tmax_end\n");
    }
}
