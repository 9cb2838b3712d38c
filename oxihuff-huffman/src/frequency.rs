//! Symbol occurrence counts.

use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{self, Read};
use tracing::debug;

/// Number of distinct symbols (byte values).
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of a slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Read `source` to the end, counting every byte.
    ///
    /// `buffer_size` is the chunk size used for reads. Returns the table and
    /// the total number of bytes read.
    pub fn scan<R: Read>(source: &mut R, buffer_size: usize) -> Result<(Self, u64)> {
        let mut table = Self::new();
        let mut buf = vec![0u8; buffer_size.max(1)];
        let mut total = 0u64;

        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            table.add_bytes(&buf[..n]);
            total += n as u64;
        }

        debug!(bytes = total, distinct = table.distinct(), "scanned source");
        Ok((table, total))
    }

    /// Add the bytes of `data` to the counts.
    pub fn add_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Count for `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Overwrite the count for `symbol`.
    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Symbols with a non-zero count and their counts, in ascending symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX)
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }

    /// Force at least two symbols to be present.
    ///
    /// Symbol 0 is raised to a count of one first; symbol 1 is raised only
    /// if that still leaves fewer than two symbols. Returns the number of
    /// symbols that were padded.
    pub fn pad(&mut self) -> usize {
        let mut padded = 0;
        for symbol in [0u8, 1] {
            if self.distinct() >= 2 {
                break;
            }
            if self.counts[symbol as usize] == 0 {
                self.counts[symbol as usize] = 1;
                padded += 1;
            }
        }
        if padded > 0 {
            debug!(padded, "padded frequency table");
        }
        padded
    }

    /// Fail unless at least two symbols are present.
    pub fn ensure_buildable(&self) -> Result<()> {
        let distinct = self.distinct();
        if distinct < 2 {
            return Err(OxiHuffError::underflow(
                "frequency table (needs two symbols)",
            ));
        }
        Ok(())
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_bytes() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.distinct(), 5);
        assert_eq!(table.iter_nonzero().map(|(_, c)| c).sum::<u64>(), 11);
    }

    #[test]
    fn test_scan_matches_from_bytes() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let (table, total) = FrequencyTable::scan(&mut Cursor::new(&data), 64).unwrap();
        assert_eq!(total, data.len() as u64);
        assert_eq!(table, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn test_iter_nonzero_is_ascending() {
        let table = FrequencyTable::from_bytes(b"zyxa");
        let symbols: Vec<u8> = table.iter_nonzero().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"axyz");
    }

    #[test]
    fn test_pad_empty() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.pad(), 2);
        assert_eq!(table.get(0), 1);
        assert_eq!(table.get(1), 1);
        assert!(table.ensure_buildable().is_ok());
    }

    #[test]
    fn test_pad_single_symbol() {
        let mut table = FrequencyTable::from_bytes(&[b'a'; 1000]);
        assert!(table.ensure_buildable().is_err());
        assert_eq!(table.pad(), 1);
        assert_eq!(table.get(0), 1);
        assert_eq!(table.get(1), 0);
        assert_eq!(table.distinct(), 2);
    }

    #[test]
    fn test_pad_single_zero_symbol() {
        let mut table = FrequencyTable::from_bytes(&[0u8; 5]);
        assert_eq!(table.pad(), 1);
        assert_eq!(table.get(0), 5);
        assert_eq!(table.get(1), 1);
    }

    #[test]
    fn test_pad_leaves_rich_table_alone() {
        let mut table = FrequencyTable::from_bytes(b"ab");
        assert_eq!(table.pad(), 0);
        assert_eq!(table.get(0), 0);
        assert_eq!(table.get(1), 0);
    }
}
