use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wall_order::ir::wall_label;
use wall_order::{RoutePosition, Wall, parse_routes, sort_routes_by_wall, sort_routes_json};

// Deterministic scatter over the map; every seventh route is pinned by hand
// and every eleventh has no coordinates at all.
fn route_scatter(count: usize) -> Vec<RoutePosition> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 50_000) as f64 / 100.0
    };
    (0..count)
        .map(|idx| {
            let route = if idx % 11 == 0 {
                RoutePosition::default()
            } else if idx % 7 == 0 {
                RoutePosition::ordered((idx % 13) as f64)
            } else {
                RoutePosition::at(next(), next())
            };
            route.with_id(format!("R{idx}"))
        })
        .collect()
}

fn route_json(count: usize) -> String {
    let routes: Vec<serde_json::Value> = route_scatter(count)
        .into_iter()
        .map(|route| {
            serde_json::json!({
                "id": route.id,
                "x": route.x,
                "y": route.y,
                "order": route.order,
                "grade": "6b+",
            })
        })
        .collect();
    serde_json::Value::Array(routes).to_string()
}

fn walls() -> impl Iterator<Item = Option<Wall>> {
    Wall::ALL.into_iter().map(Some).chain(std::iter::once(None))
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_routes_by_wall");
    let routes = route_scatter(400);
    for wall in walls() {
        group.bench_with_input(
            BenchmarkId::from_parameter(wall_label(wall)),
            &routes,
            |b, data| {
                b.iter(|| {
                    let sorted = sort_routes_by_wall(black_box(data), wall);
                    black_box(sorted.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_sort_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_scaling");
    for count in [10usize, 100, 1_000, 10_000] {
        let routes = route_scatter(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &routes, |b, data| {
            b.iter(|| {
                let sorted = sort_routes_by_wall(black_box(data), Some(Wall::BoulderMiddle));
                black_box(sorted.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    for count in [50usize, 500] {
        let input = route_json(count);
        group.bench_with_input(BenchmarkId::new("parse", count), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_routes(black_box(data)).expect("parse failed");
                black_box(parsed.routes.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("json", count), &input, |b, data| {
            b.iter(|| {
                let out = sort_routes_json(black_box(data), Some("boulderSouth"))
                    .expect("sort failed");
                black_box(out.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_sort, bench_sort_scaling, bench_end_to_end
);
criterion_main!(benches);
