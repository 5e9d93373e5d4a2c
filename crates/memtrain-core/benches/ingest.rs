use criterion::{black_box, criterion_group, criterion_main, Criterion};

use memtrain_core::store::ingest;
use memtrain_core::table::parse_table_str;

fn make_table(rows: usize) -> String {
    let mut s = String::from("Generated deck\n\"settings: nquestions=10\"\n");
    s.push_str("Cue,Response,Synonym,Response2,Synonym2,Tag,Tag,Mtag\n");
    for i in 0..rows {
        s.push_str(&format!(
            "\"{{{{1}}}} and {{{{2}}}} #{i}\",first{i},f{i},second{i},,group{},all,mix{}\n",
            i % 10,
            i % 7
        ));
    }
    s
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    let small = parse_table_str(&make_table(20)).unwrap();
    let large = parse_table_str(&make_table(2000)).unwrap();
    let large_csv = make_table(2000);

    group.bench_function("rows_20", |b| b.iter(|| ingest(black_box(&small))));

    group.bench_function("rows_2000", |b| b.iter(|| ingest(black_box(&large))));

    group.bench_function("parse_csv_2000", |b| {
        b.iter(|| parse_table_str(black_box(&large_csv)))
    });

    group.finish();
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
