//! Compression statistics.
//!
//! Collected around one build/encode/decode cycle so the effect of a code
//! table on real input is visible: sizes, ratio, code lengths, timing.
//!
//! `CompressionStats` is plain data with no interior mutability.

use std::time::{Duration, Instant};

use crate::stream::{PackedStream, HEADER_SIZE};
use crate::table::CodeTable;

/// Statistics for one compression run.
#[derive(Debug, Clone)]
pub struct CompressionStats {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Size of the original input in bytes
    pub input_bytes: u64,

    /// Number of symbols encoded
    pub input_symbols: u64,

    // === Code table ===
    /// Number of symbols in the table
    pub table_symbols: u64,

    /// Shortest code length in bits
    pub min_code_len: u64,

    /// Longest code length in bits
    pub max_code_len: u64,

    // === Output ===
    /// Number of packed streams produced
    pub streams: u64,

    /// Packed stream size in bytes, header included
    pub encoded_bytes: u64,

    /// Meaningful payload bits
    pub payload_bits: u64,

    /// Zero bits added for byte alignment
    pub padding_bits: u64,

    /// Number of symbols recovered by decoding
    pub decoded_symbols: u64,
}

impl CompressionStats {
    /// Create new stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            input_symbols: 0,
            table_symbols: 0,
            min_code_len: 0,
            max_code_len: 0,
            streams: 0,
            encoded_bytes: 0,
            payload_bits: 0,
            padding_bits: 0,
            decoded_symbols: 0,
        }
    }

    /// Record the shape of the code table in use.
    pub fn record_table<S>(&mut self, table: &CodeTable<S>) {
        self.table_symbols = table.len() as u64;
        self.min_code_len = table.min_code_len() as u64;
        self.max_code_len = table.max_code_len() as u64;
    }

    /// Record one encoded stream and the input it came from.
    pub fn record_encode(&mut self, input_bytes: usize, input_symbols: usize, stream: &PackedStream) {
        self.input_bytes += input_bytes as u64;
        self.input_symbols += input_symbols as u64;
        self.streams += 1;
        self.encoded_bytes += stream.len() as u64;
        self.payload_bits += stream.bit_len() as u64;
        self.padding_bits += u64::from(stream.padding());
    }

    pub fn record_decode(&mut self, symbols: usize) {
        self.decoded_symbols += symbols as u64;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (encoded / input).
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.encoded_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Mean payload bits per encoded symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_symbols as f64
        }
    }

    /// Bytes spent on headers and padding rather than codes.
    pub fn overhead_bytes(&self) -> f64 {
        (self.streams * HEADER_SIZE as u64) as f64 + self.padding_bits as f64 / 8.0
    }

    /// Compute throughput in input bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// True once every encoded symbol came back out of the decoder.
    pub fn verified(&self) -> bool {
        self.input_symbols == self.decoded_symbols
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Code Table ===");
        println!("Symbols: {}", self.table_symbols);
        println!("Code lengths: {}..={} bits", self.min_code_len, self.max_code_len);
        println!();

        println!("=== Stream ===");
        println!("Input:   {} bytes, {} symbols", self.input_bytes, self.input_symbols);
        println!("Encoded: {} bytes", self.encoded_bytes);
        println!("Payload: {} bits (+{} padding)", self.payload_bits, self.padding_bits);
        println!("Overhead: {:.3} bytes (header + padding)", self.overhead_bytes());
        println!("Bits/symbol: {:.3}", self.bits_per_symbol());
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        if self.decoded_symbols > 0 && self.input_symbols == 0 {
            println!("Decoded: {} symbols", self.decoded_symbols);
            println!();
        } else if self.decoded_symbols > 0 {
            if self.verified() {
                println!("Verification: PASSED ({} symbols)", self.decoded_symbols);
            } else {
                println!(
                    "Verification: FAILED ({} encoded, {} decoded)",
                    self.input_symbols, self.decoded_symbols
                );
            }
            println!();
        }

        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
    }
}

impl Default for CompressionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    fn table() -> CodeTable<char> {
        CodeTable::from_frequencies(vec![(2.0, 'a'), (1.0, 'b'), (1.0, 'c'), (5.0, 'd')]).unwrap()
    }

    #[test]
    fn test_stats_creation() {
        let stats = CompressionStats::new();
        assert!(stats.end_time.is_none());
        assert_eq!(stats.compression_ratio(), 0.0);
        assert_eq!(stats.bits_per_symbol(), 0.0);
        assert_eq!(stats.overhead_bytes(), 0.0);
    }

    #[test]
    fn test_record_encode() {
        let table = table();
        let stream = encode("dabc".chars(), &table).unwrap();

        let mut stats = CompressionStats::new();
        stats.record_table(&table);
        stats.record_encode(4, 4, &stream);
        stats.record_decode(4);
        stats.complete();

        assert_eq!(stats.table_symbols, 4);
        assert_eq!(stats.min_code_len, 1);
        assert_eq!(stats.max_code_len, 3);
        assert_eq!(stats.encoded_bytes, 3);
        assert_eq!(stats.payload_bits, 9);
        assert_eq!(stats.padding_bits, 7);
        assert_eq!(stats.compression_ratio(), 0.75);
        assert_eq!(stats.bits_per_symbol(), 2.25);
        assert_eq!(stats.overhead_bytes(), 1.875);
        assert!(stats.verified());
    }

    #[test]
    fn test_overhead_across_streams() {
        let table = table();
        let mut stats = CompressionStats::new();
        stats.record_encode(4, 4, &encode("dabc".chars(), &table).unwrap());
        stats.record_encode(8, 8, &encode(['d'; 8], &table).unwrap());

        assert_eq!(stats.streams, 2);
        // two header bytes, 7 + 0 padding bits
        assert_eq!(stats.overhead_bytes(), 2.875);
        assert_eq!(stats.encoded_bytes, 5);
        assert_eq!(stats.payload_bits, 17);
    }

    #[test]
    fn test_verified_counts() {
        let mut stats = CompressionStats::new();
        stats.input_symbols = 10;
        stats.record_decode(9);
        assert!(!stats.verified());
        stats.record_decode(1);
        assert!(stats.verified());
    }
}
