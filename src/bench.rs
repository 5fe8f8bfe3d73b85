/// Performance benchmarks for the codec and width engine.
/// Run with: cargo test --release bench_ -- --nocapture

use crate::core::{convert, width, ErrorPolicy, Utf16, Utf32, Utf8, Wide16};
use std::time::Instant;

pub struct BenchResult {
    pub name: &'static str,
    pub iterations: usize,
    pub total_ms: f64,
    pub per_iter_us: f64,
    pub throughput_mb_s: Option<f64>,
}

impl std::fmt::Display for BenchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.1}µs/iter ({} iters, {:.1}ms total",
               self.name, self.per_iter_us, self.iterations, self.total_ms)?;
        if let Some(tp) = self.throughput_mb_s {
            write!(f, ", {:.1} MB/s", tp)?;
        }
        write!(f, ")")
    }
}

fn sample_text() -> String {
    "Hello, World! Résumé 中国人 😂🌎👨‍👩‍👧‍👦 اَلْعَرَبِيَّةُ 𠮷 ".repeat(2_000)
}

fn result(name: &'static str, iterations: usize, elapsed: std::time::Duration, bytes: Option<usize>) -> BenchResult {
    BenchResult {
        name,
        iterations,
        total_ms: elapsed.as_secs_f64() * 1000.0,
        per_iter_us: elapsed.as_secs_f64() * 1_000_000.0 / iterations as f64,
        throughput_mb_s: bytes.map(|b| (b * iterations) as f64 / elapsed.as_secs_f64() / 1_048_576.0),
    }
}

/// Benchmark UTF-8 -> UTF-16 transcoding throughput.
pub fn bench_utf8_to_utf16() -> BenchResult {
    let text = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    let start = Instant::now();
    for _ in 0..iterations {
        let out = convert::<Utf8, Utf16>(text.as_bytes(), ErrorPolicy::default());
        std::hint::black_box(out);
    }
    result("utf8_to_utf16", iterations, start.elapsed(), Some(text.len()))
}

/// Benchmark UTF-16 -> UTF-8 transcoding throughput.
pub fn bench_utf16_to_utf8() -> BenchResult {
    let text = sample_text();
    let units: Vec<u16> = text.encode_utf16().collect();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    let start = Instant::now();
    for _ in 0..iterations {
        let out = convert::<Utf16, Utf8>(&units, ErrorPolicy::default());
        std::hint::black_box(out);
    }
    result("utf16_to_utf8", iterations, start.elapsed(), Some(units.len() * 2))
}

/// Benchmark the cast-only wide -> UTF-16 path.
pub fn bench_reinterpret() -> BenchResult {
    let units: Vec<u16> = sample_text().encode_utf16().collect();
    let iterations = if cfg!(debug_assertions) { 20 } else { 1_000 };
    let start = Instant::now();
    for _ in 0..iterations {
        let out = convert::<Wide16, Utf16>(&units, ErrorPolicy::default());
        std::hint::black_box(out);
    }
    result("reinterpret", iterations, start.elapsed(), Some(units.len() * 2))
}

/// Benchmark display width of a UTF-32 sequence.
pub fn bench_width() -> BenchResult {
    let cps: Vec<u32> = sample_text().chars().map(|c| c as u32).collect();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    let start = Instant::now();
    for _ in 0..iterations {
        let w = width::<Utf32>(&cps);
        std::hint::black_box(w.ok());
    }
    result("width", iterations, start.elapsed(), Some(cps.len() * 4))
}

/// Run all benchmarks and return results.
pub fn run_all() -> Vec<BenchResult> {
    vec![
        bench_utf8_to_utf16(),
        bench_utf16_to_utf8(),
        bench_reinterpret(),
        bench_width(),
    ]
}
