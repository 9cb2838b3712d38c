//! Info command implementation.

use oxihuff_huffman::{HEADER_SIZE, Header};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Header summary printed by `oxihuff info --json`.
#[derive(Debug, Serialize)]
struct StreamInfo<'a> {
    file: &'a Path,
    size: u64,
    header: Header,
    leaves: usize,
    body_size: u64,
}

pub fn cmd_info(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let header = Header::read(&mut BufReader::new(file))?;
    header.validate()?;

    let preamble = (HEADER_SIZE + usize::from(header.tree_size)) as u64;
    let info = StreamInfo {
        file: path,
        size,
        header,
        leaves: header.leaf_count(),
        body_size: size.saturating_sub(preamble),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", path.display());
    println!("Size: {} bytes", info.size);
    println!();
    println!("Header:");
    println!("  Magic: {:#010x}", header.magic);
    println!("  Permissions: {:04o}", header.permissions);
    println!(
        "  Tree size: {} bytes ({} leaves)",
        header.tree_size, info.leaves
    );
    println!("  Original size: {} bytes", header.file_size);
    println!("  Body size: {} bytes", info.body_size);
    if header.file_size > 0 {
        println!(
            "  Space saving: {:.2}%",
            (1.0 - size as f64 / header.file_size as f64) * 100.0
        );
    }
    Ok(())
}
