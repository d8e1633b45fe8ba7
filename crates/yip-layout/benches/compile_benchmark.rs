//! Layout compilation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use yip_layout::compile;

const SIMPLE_DOC: &str = r#"<layout size="320,480" portrait="true"><button id="ok" text="OK"/></layout>"#;

const MEDIUM_DOC: &str = include_str!("../tests/fixtures/login.xml");

fn wide_doc(widgets: usize) -> String {
    let mut doc = String::from(r#"<layout size="320,480" portrait="true"><string id="t" text="Title"/>"#);
    for i in 0..widgets {
        doc.push_str(&format!(r#"<group pos="0,{}" size="320,40"><label text="@t"/><button text="Go {}"/></group>"#, i * 40, i));
    }
    doc.push_str("</layout>");
    doc
}

fn compile_simple(c: &mut Criterion) {
    c.bench_function("compile_simple", |b| b.iter(|| compile(black_box(SIMPLE_DOC), "simple.xml")));
}

fn compile_medium(c: &mut Criterion) {
    c.bench_function("compile_medium", |b| b.iter(|| compile(black_box(MEDIUM_DOC), "login.xml")));
}

fn compile_wide(c: &mut Criterion) {
    let doc = wide_doc(200);
    c.bench_function("compile_wide", |b| b.iter(|| compile(black_box(&doc), "wide.xml")));
}

criterion_group!(benches, compile_simple, compile_medium, compile_wide);
criterion_main!(benches);
