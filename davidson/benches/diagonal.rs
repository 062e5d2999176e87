use criterion::*;
use davidson::{operator::SingleProcess, solve, DavidsonConfig, Target};
use ndarray::{Array2, ArrayView2};

fn diagonal_smallest(c: &mut Criterion) {
    let mut group = c.benchmark_group("davidson_diagonal");
    for &n in &[100usize, 400, 1000] {
        group.bench_with_input(BenchmarkId::new("smallest5", n), &n, |b, &n| {
            let diag: Vec<f64> = (1..=n).map(|i| i as f64).collect();
            b.iter(|| {
                let mut matvec = |v: ArrayView2<f64>| -> Array2<f64> {
                    let mut out = v.to_owned();
                    for mut col in out.columns_mut() {
                        for (x, &d) in col.iter_mut().zip(diag.iter()) {
                            *x *= d;
                        }
                    }
                    out
                };
                let config = DavidsonConfig::new(5).target(Target::Smallest).eps(1e-10);
                let result = solve(n, &mut matvec, None, &mut SingleProcess, None, &config).unwrap();
                black_box(result.eigenvalues);
            })
        });
    }
}

criterion_group!(diagonal, diagonal_smallest);
criterion_main!(diagonal);
