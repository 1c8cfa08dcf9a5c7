//! Throughput benchmarks for the LZ77 matcher.

use ironpack_deflate::lz77::{Lz77Encoder, Lz77Symbol};

fn main() {
    let test_cases = vec![
        ("small_random", generate_random(1024)),
        ("medium_random", generate_random(64 * 1024)),
        ("large_random", generate_random(256 * 1024)),
        ("small_repeated", generate_repeated(1024)),
        ("medium_repeated", generate_repeated(64 * 1024)),
        ("large_repeated", generate_repeated(256 * 1024)),
        ("small_text", generate_text_like(1024)),
        ("medium_text", generate_text_like(64 * 1024)),
        ("large_text", generate_text_like(256 * 1024)),
    ];

    println!("LZ77 Matcher Benchmarks");
    println!("=======================\n");

    for (name, data) in &test_cases {
        println!("Test: {} ({} bytes)", name, data.len());

        for level in [1, 5, 9] {
            let start = std::time::Instant::now();
            let mut encoder = Lz77Encoder::with_level(level);
            let symbols = encoder.compress(data);
            let elapsed = start.elapsed();

            let covered: usize = symbols
                .iter()
                .map(|s| match s {
                    Lz77Symbol::Literal(_) => 1,
                    Lz77Symbol::Reference { length, .. } => *length as usize,
                    Lz77Symbol::EndOfBlock => 0,
                })
                .sum();

            let throughput = data.len() as f64 / elapsed.as_secs_f64() / 1024.0 / 1024.0;
            let ratio = (data.len() as f64 / symbols.len() as f64).max(1.0);

            println!(
                "  Level {}: {:6.2} MB/s, {:6} symbols, {:.2}x ratio, {:8} µs",
                level,
                throughput,
                symbols.len(),
                ratio,
                elapsed.as_micros()
            );

            // Sanity check
            assert_eq!(covered, data.len());
        }
        println!();
    }
}

fn generate_random(size: usize) -> Vec<u8> {
    // Simple LCG random number generator
    let mut data = Vec::with_capacity(size);
    let mut seed = 12345u32;
    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((seed >> 16) as u8);
    }
    data
}

fn generate_repeated(size: usize) -> Vec<u8> {
    let pattern = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut data = Vec::with_capacity(size);
    while data.len() < size {
        data.extend_from_slice(pattern);
    }
    data.truncate(size);
    data
}

fn generate_text_like(size: usize) -> Vec<u8> {
    let words: &[&[u8]] = &[
        b"the", b"quick", b"brown", b"fox", b"jumps", b"over", b"lazy", b"dog", b"and", b"runs",
        b"through", b"forest", b"near", b"river", b"under", b"blue", b"sky", b"with", b"wind",
        b"blowing",
    ];
    let mut data = Vec::with_capacity(size);
    let mut seed = 42u32;

    while data.len() < size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        let word_idx = (seed as usize) % words.len();
        data.extend_from_slice(words[word_idx]);
        data.push(b' ');
    }
    data.truncate(size);
    data
}
