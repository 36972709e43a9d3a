//! Benchmarks for extension invocation throughput

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kernel_extension::{
    Element, ErrorBuffer, ExtensionModule, HostAlloc, HostBuffer, HostInvoke, HostModule,
    KernelIndex,
};

struct BenchHost;

struct EchoInvoke;

impl<T: Element> HostInvoke<T> for EchoInvoke {
    fn invoke(&self, _kernel: KernelIndex, _function: i64, input: &[T]) -> Result<Vec<T>, i32> {
        Ok(input.to_vec())
    }
}

struct CopyAlloc;

impl<T: Element> HostAlloc<T> for CopyAlloc {
    fn alloc_host(
        &self,
        _kernel: KernelIndex,
        count: usize,
        source: &[T],
        _pinned: bool,
    ) -> Result<HostBuffer<T>, i32> {
        Ok(HostBuffer::from_source(count, source))
    }
}

impl<T: Element> HostModule<T> for BenchHost {
    fn invoke_callback(&self) -> Option<Arc<dyn HostInvoke<T>>> {
        Some(Arc::new(EchoInvoke))
    }
    fn alloc_callback(&self) -> Option<Arc<dyn HostAlloc<T>>> {
        Some(Arc::new(CopyAlloc))
    }
}

/// Benchmark invoke throughput for varying input sizes
fn bench_invoke(c: &mut Criterion) {
    let mut module = ExtensionModule::new(BenchHost);
    module.init_float(KernelIndex(1)).unwrap();
    module.init_double(KernelIndex(2)).unwrap();

    let mut group = c.benchmark_group("invoke");

    for &size in &[64usize, 256, 1024, 4096] {
        let input_f32: Vec<f32> = (0..size).map(|i| i as f32).collect();
        let input_f64: Vec<f64> = (0..size).map(|i| i as f64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("square_f32_{}", size), |b| {
            let mut err = ErrorBuffer::new(256);
            b.iter(|| {
                let out = module.invoke_float(1, black_box(&input_f32), &mut err);
                black_box(out)
            })
        });

        group.bench_function(format!("cube_f64_{}", size), |b| {
            let mut err = ErrorBuffer::new(256);
            b.iter(|| {
                let out = module.invoke_double(2, black_box(&input_f64), &mut err);
                black_box(out)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_invoke);
criterion_main!(benches);
