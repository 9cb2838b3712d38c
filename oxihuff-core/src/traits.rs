//! Traits at the boundary between the codec and its callers.
//!
//! Byte sources and sinks are plain [`std::io::Read`] / [`std::io::Write`]
//! implementations. Statistics are the one collaborator that needs its own
//! trait: the codec hands a finished [`SessionStats`] to a [`StatsSink`]
//! and lets the caller decide how to present it.

use crate::stats::SessionStats;

/// Direction of a codec session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Source is raw data, sink receives the compressed stream.
    Compress,
    /// Source is a compressed stream, sink receives raw data.
    Decompress,
}

impl SessionKind {
    /// Whether this is a compression session.
    pub fn is_compress(&self) -> bool {
        matches!(self, Self::Compress)
    }
}

/// Receiver for the byte counts of a finished session.
pub trait StatsSink {
    /// Record the statistics of one session.
    fn record(&mut self, kind: SessionKind, stats: &SessionStats);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect(Vec<(SessionKind, SessionStats)>);

    impl StatsSink for Collect {
        fn record(&mut self, kind: SessionKind, stats: &SessionStats) {
            self.0.push((kind, *stats));
        }
    }

    #[test]
    fn test_sink_receives_sessions() {
        let mut sink = Collect::default();
        let stats = SessionStats {
            bytes_read: 10,
            bytes_written: 4,
            symbols: 10,
        };
        sink.record(SessionKind::Compress, &stats);
        assert_eq!(sink.0, vec![(SessionKind::Compress, stats)]);
        assert!(sink.0[0].0.is_compress());
        assert!(!SessionKind::Decompress.is_compress());
    }
}
