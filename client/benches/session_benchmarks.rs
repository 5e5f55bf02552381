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

//! Benchmarks for the full receive path: telnet engine, interpreter, renderer

use std::io;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use decafmud_client::{ClientConfig, Renderer, Session, TerminalOutput, Transport};
use tracing::Level;

// ============================================================================
// Helper Functions
// ============================================================================

struct Null;

impl Transport for Null {
    fn connect(&mut self, _host: &str, _port: u16) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) {}

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        black_box(bytes);
        Ok(())
    }
}

struct Blind;

impl Renderer for Blind {
    fn display(&mut self, output: &[TerminalOutput]) {
        black_box(output);
    }
}

fn room(lines: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for line in 0..lines {
        out.extend_from_slice(b"\x1b[1;36mThe Market Square\x1b[0m\r\n");
        out.extend_from_slice(b"Merchants  shout  over  the  crowd.\r\n");
        if line % 4 == 0 {
            out.extend_from_slice(b"\xFF\xFA\xC9Room.Info {\"num\":1200,\"exits\":{\"n\":1201}}\xFF\xF0");
        }
    }
    out
}

// ============================================================================
// Session Benchmarks
// ============================================================================

fn bench_handle_incoming(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt().with_max_level(Level::WARN).try_init();

    let mut group = c.benchmark_group("handle_incoming");
    let data = room(64);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [64usize, 1460] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &data, |b, data| {
            let now = Instant::now();
            let mut session = Session::new(ClientConfig::default().with_autoreconnect(false), Null, Blind);
            let _ = session.on_ready(now);
            session.on_connected(now);
            b.iter(|| {
                for piece in data.chunks(chunk) {
                    session.handle_incoming(now, black_box(piece));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_handle_incoming);
criterion_main!(benches);
