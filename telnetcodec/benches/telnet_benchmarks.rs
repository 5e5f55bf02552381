//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetcodec performance

use std::time::Instant;

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use decafmud_telnetcodec::{TelnetCodec, TelnetConfig, TelnetEngine, TelnetHost, debug_iac};
use tokio_util::codec::{Decoder, Encoder};

// ============================================================================
// Helper Functions
// ============================================================================

struct Discard;

impl TelnetHost for Discard {
    fn send(&mut self, bytes: &[u8]) {
        black_box(bytes);
    }

    fn trace(&mut self, _level: decafmud_telnetcodec::TraceLevel, message: &str) {
        black_box(message);
    }
}

/// A screenful of room text with a negotiation every few lines.
fn session_bytes(lines: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for line in 0..lines {
        out.extend_from_slice(b"\x1b[1;32mA gentle breeze blows through the trees.\x1b[0m\r\n");
        if line % 8 == 0 {
            out.extend_from_slice(b"\xFF\xFA\xC9Char.Vitals {\"hp\":100,\"mp\":42}\xFF\xF0");
        }
        if line % 16 == 0 {
            out.extend_from_slice(b"\xFF\xF9");
        }
    }
    out
}

// ============================================================================
// Framing Benchmarks
// ============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for lines in [16, 256] {
        let input = session_bytes(lines);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &input, |b, input| {
            let mut codec = TelnetCodec::new();
            b.iter(|| {
                let mut buffer = BytesMut::from(&input[..]);
                while let Ok(Some(frame)) = codec.decode(&mut buffer) {
                    black_box(frame);
                }
            });
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");
    let plain = vec![b'a'; 4096];
    let dense = vec![0xFF; 4096];

    for (name, input) in [("plain", &plain), ("all_iac", &dense)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, input| {
            let mut codec = TelnetCodec::new();
            let mut buffer = BytesMut::with_capacity(8192);
            b.iter(|| {
                buffer.clear();
                let _ = codec.encode(black_box(&input[..]), &mut buffer);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Engine Benchmarks
// ============================================================================

fn bench_receive(c: &mut Criterion) {
    let mut group = c.benchmark_group("receive");
    let input = session_bytes(256);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for chunk in [64, 1024] {
        group.bench_with_input(BenchmarkId::new("chunk", chunk), &input, |b, input| {
            let now = Instant::now();
            b.iter(|| {
                let mut engine = TelnetEngine::with_default_handlers(TelnetConfig::default());
                let mut host = Discard;
                for piece in input.chunks(chunk) {
                    black_box(engine.receive(now, piece, &mut host));
                }
            });
        });
    }

    group.finish();
}

fn bench_debug_iac(c: &mut Criterion) {
    let sequence = b"\xFF\xFA\x45\x01COMMANDS\x02LIST\x02REPORT\x02SEND\xFF\xF0";
    c.bench_function("debug_iac_msdp", |b| {
        b.iter(|| debug_iac(black_box(sequence)));
    });
}

criterion_group!(benches, bench_decode, bench_escape, bench_receive, bench_debug_iac);
criterion_main!(benches);
