//! Benchmarks for event descriptor handling and full scenario runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use widgetcheck_core::{Platform, Point, Size};
use widgetcheck_test::{
    canonicalize, code_for, pattern, resolve_codes, CompareMode, ConsistencyHarness,
    HarnessConfig, SimDisplay, SymbolicEvent, WidgetKind,
};

fn double_click_sequence() -> Vec<SymbolicEvent> {
    pattern("DoubleClick")
        .map(|p| p.expected_for(Platform::Gtk).to_vec())
        .unwrap_or_default()
}

fn bench_canonicalize(c: &mut Criterion) {
    let events = double_click_sequence();
    c.bench_function("canonicalize_full", |b| {
        b.iter(|| canonicalize(black_box(&events), CompareMode::Full))
    });
    c.bench_function("canonicalize_base_names", |b| {
        b.iter(|| canonicalize(black_box(&events), CompareMode::BaseNames))
    });
}

fn bench_parse_descriptor(c: &mut Criterion) {
    c.bench_function("parse_descriptor", |b| {
        b.iter(|| SymbolicEvent::parse(black_box("Selection:PAGE_DOWN")))
    });
}

fn bench_registry_lookup(c: &mut Criterion) {
    let names = [
        "MouseDown",
        "Selection:CHECK",
        "MouseUp",
        "Traverse:TAB_NEXT",
        "FocusOut",
        "MouseDown",
    ];
    c.bench_function("code_for", |b| b.iter(|| code_for(black_box("DefaultSelection"))));
    c.bench_function("resolve_codes", |b| b.iter(|| resolve_codes(black_box(&names))));
}

fn bench_scenario_run(c: &mut Criterion) {
    let mut display = SimDisplay::new(Platform::Gtk);
    let shell = display.create_shell(Point::new(0, 0), Size::new(200, 150));
    let list = display.create_widget(shell, WidgetKind::List);
    let mut harness =
        ConsistencyHarness::new(display, shell, list).with_config(HarnessConfig::default());

    c.bench_function("scenario_double_click", |b| {
        b.iter(|| harness.try_consistency_event(30, 10, 1, 0, black_box("DoubleClick")))
    });
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_parse_descriptor,
    bench_registry_lookup,
    bench_scenario_run,
);
criterion_main!(benches);
