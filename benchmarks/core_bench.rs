use boardscan_core::ports::parse_port_names;
use boardscan_core::probe::parse_probe_serials;
use boardscan_core::Recommendation;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn nrfjprog_output(probes: usize) -> String {
    let mut out = String::from("Connected probes:\n");
    for i in 0..probes {
        out.push_str(&format!("  J-Link OB-nRF5340 {:09}\n", 683_000_000 + i));
    }
    out
}

fn bench_probe_parsing(c: &mut Criterion) {
    let stdout = nrfjprog_output(16);
    c.bench_function("parse_probe_serials", |b| {
        b.iter(|| black_box(parse_probe_serials(black_box(&stdout))))
    });
}

fn bench_port_parsing(c: &mut Criterion) {
    let stdout: String =
        (0..16).map(|i| format!("/dev/ttyACM{i}             J-Link - CDC\n")).collect();
    c.bench_function("parse_port_names", |b| {
        b.iter(|| black_box(parse_port_names(black_box(&stdout))))
    });
}

fn bench_recommendation_render(c: &mut Criterion) {
    let rec = Recommendation::new(
        parse_probe_serials(&nrfjprog_output(2)),
        vec!["COM3".to_string(), "COM7".to_string()],
    );
    c.bench_function("recommendation_render", |b| b.iter(|| black_box(rec.to_string())));
}

criterion_group!(benches, bench_probe_parsing, bench_port_parsing, bench_recommendation_render);
criterion_main!(benches);
