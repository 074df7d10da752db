use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn, Level};

use crate::error::EmbeddingError;
use crate::table::{EmbeddingTable, TableBuilder};

/// Loads pretrained word embeddings from a whitespace-delimited file.
///
/// Each line is `word v1 v2 ... vD`, fields separated by tabs or spaces (the
/// StarSpace `.tsv` export uses tabs). The dimension `D` comes from the
/// first line and every other line must match it.
pub fn load_embeddings<P: AsRef<Path>>(path: P) -> Result<EmbeddingTable, EmbeddingError> {
    let path = path.as_ref();
    let start = Instant::now();

    let span = tracing::span!(Level::INFO, "embeddings.load", path = %path.display());
    let _guard = span.enter();

    let result = File::open(path)
        .map_err(|source| EmbeddingError::Open {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|file| parse_embeddings(BufReader::new(file)));

    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(table) => info!(
            entries = table.len(),
            dim = table.dim(),
            elapsed_micros,
            "embeddings_loaded"
        ),
        Err(err) => warn!(error = %err, elapsed_micros, "embeddings_failure"),
    }
    result
}

/// Parses embedding lines from any buffered reader.
///
/// Same contract as [`load_embeddings`]: blank lines, non-numeric
/// components and inconsistent lengths are errors, and input without any
/// entry fails with [`EmbeddingError::Empty`].
pub fn parse_embeddings<R: BufRead>(reader: R) -> Result<EmbeddingTable, EmbeddingError> {
    let mut builder = TableBuilder::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| EmbeddingError::Read {
            line: line_no,
            source,
        })?;
        let (word, vector) = parse_line(line_no, &line)?;
        builder.push(line_no, word.to_owned(), vector)?;
    }

    builder.finish()
}

fn parse_line(line_no: usize, line: &str) -> Result<(&str, Vec<f32>), EmbeddingError> {
    let mut fields = line.split_whitespace();
    let word = fields.next().ok_or_else(|| EmbeddingError::Parse {
        line: line_no,
        message: "blank line".into(),
    })?;

    let vector = fields
        .map(|field| {
            field.parse::<f32>().map_err(|e| EmbeddingError::Parse {
                line: line_no,
                message: format!("component {field:?} for {word:?}: {e}"),
            })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    Ok((word, vector))
}
