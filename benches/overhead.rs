use criterion::{criterion_group, criterion_main, Criterion};
use macroable::error::InvokeError;
use macroable::{Args, MacroRegistry, Macroable, Model};

#[derive(Model)]
struct BenchModel;

fn registry_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Macro Registry");

    group.bench_function("add_macro", |b| {
        let registry = MacroRegistry::new();
        b.iter(|| {
            registry.add_macro(
                "answer",
                |_: &mut BenchModel, _: Args| -> Result<u32, InvokeError> { Ok(42) },
            );
        });
    });

    group.bench_function("resolve", |b| {
        let registry = MacroRegistry::new();
        registry.add_macro(
            "answer",
            |_: &mut BenchModel, _: Args| -> Result<u32, InvokeError> { Ok(42) },
        );
        b.iter(|| {
            registry.resolve::<BenchModel, _>("answer").unwrap();
        });
    });

    group.bench_function("dispatch", |b| {
        let registry = MacroRegistry::new();
        registry.add_macro(
            "answer",
            |_: &mut BenchModel, _: Args| -> Result<u32, InvokeError> { Ok(42) },
        );
        let mut model = BenchModel;
        b.iter(|| {
            model.invoke(&registry, "answer", Args::new()).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, registry_benchmarks);
criterion_main!(benches);
