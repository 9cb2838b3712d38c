//! Decode command implementation.

use crate::utils::{
    StderrStats, apply_permissions, create_output, discard_output, ensure_distinct, open_input,
};
use oxihuff_core::{HuffmanConfig, SessionKind, StatsSink};
use oxihuff_huffman::HuffmanDecoder;
use std::path::Path;
use tracing::info;

pub fn cmd_decode(
    input: Option<&Path>,
    output: Option<&Path>,
    verbose: bool,
    config: HuffmanConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let decoder = HuffmanDecoder::new(config)?;
    ensure_distinct(input, output)?;
    let mut source = open_input(input)?;
    let mut sink = create_output(output)?;
    let result = decoder.decode(&mut source, &mut sink);
    drop(sink);

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if let Some(path) = output {
                discard_output(path);
            }
            return Err(e.into());
        }
    };

    if let Some(path) = output {
        apply_permissions(path, report.header.permissions)?;
    }

    info!(symbols = report.header.file_size, "decoded");
    if verbose {
        StderrStats.record(SessionKind::Decompress, &report.stats);
    }
    Ok(())
}
