use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration};

use canopy::prelude::*;
use rand::prelude::*;

type Vector = canopy::math::Vec2;

fn random_leaves(rng: &mut StdRng, count: usize) -> Vec<Aabb<Vector>> {
    (0..count)
        .map(|_| {
            let position = Vector::new(rng.gen_range(-1e3..1e3), rng.gen_range(-1e3..1e3));
            Aabb::point(position)
        })
        .collect()
}

fn random_regions(rng: &mut StdRng, count: usize) -> Vec<Overlaps<Aabb<Vector>>> {
    (0..count)
        .map(|_| {
            let min = Vector::new(rng.gen_range(-1e3..9e2), rng.gen_range(-1e3..9e2));
            let size = Vector::new(rng.gen_range(0.0..1e2), rng.gen_range(0.0..1e2));
            Overlaps(Aabb::new(min, min + size))
        })
        .collect()
}

fn random_nearest(rng: &mut StdRng, count: usize, k: usize) -> Vec<Nearest<Vector>> {
    (0..count)
        .map(|_| {
            let position = Vector::new(rng.gen_range(-1e3..1e3), rng.gen_range(-1e3..1e3));
            Nearest::new(position, k)
        })
        .collect()
}

macro_rules! bench {
    ($group: tt, $execution: expr, $tree: ident, $batch: ident, $counter: expr, $name: expr, $leaves: expr) => {
        $group.bench_function(BenchmarkId::new($name, $leaves), |bencher| {
            bencher.iter(|| traverse(&mut $execution, &$tree, &$batch, &$counter));
        });
    };
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Canopy");
    group
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(1))
        .measurement_time(std::time::Duration::from_secs(1))
        .sample_size(15);

    let query_count = 4096;

    for leaves in (8..17).map(|i| 2usize.pow(i)) {
        let mut rng = StdRng::seed_from_u64(1808);
        let volumes = random_leaves(&mut rng, leaves);
        let two_child = TwoChildTree::from_leaves(&volumes);
        let rope = RopeTree::from_leaves(&volumes);

        let regions = random_regions(&mut rng, query_count);
        let nearest = random_nearest(&mut rng, query_count, 8);

        let spatial_counter = |_: &Overlaps<Aabb<Vector>>, leaf: u32| {
            criterion::black_box(leaf);
        };
        let nearest_counter = |_: &Nearest<Vector>, leaf: u32, distance: f32| {
            criterion::black_box((leaf, distance));
        };

        #[cfg(feature = "parallel")]
        {
            bench!(group, Parallel, two_child, regions, spatial_counter, "par_spatial_two_child", leaves);
            bench!(group, Parallel, rope, regions, spatial_counter, "par_spatial_rope", leaves);
            bench!(group, Parallel, two_child, nearest, nearest_counter, "par_nearest_two_child", leaves);
            bench!(group, Parallel, rope, nearest, nearest_counter, "par_nearest_rope", leaves);
        }

        {
            bench!(group, Sequential, two_child, regions, spatial_counter, "spatial_two_child", leaves);
            bench!(group, Sequential, rope, regions, spatial_counter, "spatial_rope", leaves);
            bench!(group, Sequential, two_child, nearest, nearest_counter, "nearest_two_child", leaves);
            bench!(group, Sequential, rope, nearest, nearest_counter, "nearest_rope", leaves);
        }
    }

    group.finish();
}

criterion::criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
