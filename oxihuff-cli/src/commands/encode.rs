//! Encode command implementation.

use crate::utils::{
    StderrStats, apply_permissions, create_output, discard_output, ensure_distinct,
    open_seekable_input,
};
use oxihuff_core::{HuffmanConfig, SessionKind, StatsSink};
use oxihuff_huffman::HuffmanEncoder;
use std::path::Path;
use tracing::info;

pub fn cmd_encode(
    input: Option<&Path>,
    output: Option<&Path>,
    verbose: bool,
    config: HuffmanConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoder = HuffmanEncoder::new(config)?;
    ensure_distinct(input, output)?;
    let (mut source, permissions) = open_seekable_input(input)?;
    let encoder = encoder.with_permissions(permissions);

    let mut sink = create_output(output)?;
    let result = encoder.encode(&mut source, &mut sink);
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
        apply_permissions(path, permissions)?;
    }

    info!(
        symbols = report.header.file_size,
        tree_size = report.header.tree_size,
        bytes_written = report.stats.bytes_written,
        "encoded"
    );
    if verbose {
        StderrStats.record(SessionKind::Compress, &report.stats);
    }
    Ok(())
}
