//! Benchmarks for the comparison pipeline.
//!
//! Exercises the dominant cost paths on synthetic packages:
//! - Full comparison of two identical packages (best case for the best-match scan)
//! - Full comparison of two divergent packages (every method scans the whole opposing list)

extern crate clonescope;

use clonescope::model::{
    CallKind, CallTarget, CodeBase, CodeBaseBuilder, MethodAccessFlags, MethodBuilder, Operand,
};
use clonescope::{compare, MethodFilter};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// Assemble a package with `methods` private methods; `salt` varies names and strings so two
/// packages built with different salts share almost nothing.
fn synthetic_package(name: &str, methods: usize, salt: u64) -> CodeBase {
    let mut builder = CodeBaseBuilder::new(name);

    for index in 0..methods {
        let tag = builder.string(&format!("tag-{salt}-{index}"));
        let class = format!("Lcom/app/Class{}{};", salt, index % 16);
        builder.method(
            MethodBuilder::new(&class, &format!("method{index}"), "(I)V")
                .access(MethodAccessFlags::PRIVATE)
                .instruction("const-string", Operand::String(tag))
                .instruction("if-eqz", Operand::Target(6))
                .block_break()
                .instruction("invoke-virtual", Operand::None)
                .instruction("add-int", Operand::None)
                .block_break()
                .instruction("return-void", Operand::None)
                .call(
                    CallKind::Virtual,
                    CallTarget::external(&format!("Llib/Api{}; call (I)V", index % 8)),
                    2,
                )
                .finish(),
        );
    }

    builder.finish()
}

fn bench_compare_identical(c: &mut Criterion) {
    let a = synthetic_package("a.apk", 200, 1);
    let b = synthetic_package("b.apk", 200, 1);
    let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);

    c.bench_function("compare_identical_200", |bencher| {
        bencher.iter(|| {
            let result = compare(black_box(&a), black_box(&b), black_box(&filter));
            black_box(result)
        });
    });
}

fn bench_compare_divergent(c: &mut Criterion) {
    let a = synthetic_package("a.apk", 200, 1);
    let b = synthetic_package("b.apk", 200, 2);
    let filter = MethodFilter::new("Lcom/app/", MethodAccessFlags::PRIVATE);

    c.bench_function("compare_divergent_200", |bencher| {
        bencher.iter(|| {
            let result = compare(black_box(&a), black_box(&b), black_box(&filter));
            black_box(result)
        });
    });
}

criterion_group!(benches, bench_compare_identical, bench_compare_divergent);
criterion_main!(benches);
