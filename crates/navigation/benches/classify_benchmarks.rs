//! Benchmarks for navigation classification.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use memberhub_auth::{Audience, Role};
use memberhub_navigation::{NavigationItem, defaults};

fn shell_items(n: usize) -> Vec<NavigationItem> {
    const NAMES: &[&str] = &[
        "Dashboard",
        "Applications",
        "Members",
        "Certificates",
        "Payments",
        "Reports",
        "Events",
        "Communities",
        "Users",
        "Settings",
        "Profile",
        "Logout",
        "Help",
    ];
    (0..n)
        .map(|i| NavigationItem::new(format!("{} {}", NAMES[i % NAMES.len()], i)))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let table = defaults::dashboard_navigation().expect("default navigation table");
    let mut group = c.benchmark_group("classify");

    for size in [13usize, 100, 1_000] {
        let items = shell_items(size);
        for audience in [Audience::Role(Role::Administrator), Audience::Pending] {
            group.bench_with_input(
                BenchmarkId::new(format!("{audience:?}"), size),
                &items,
                |b, items| b.iter(|| table.classify(black_box(items), audience)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
