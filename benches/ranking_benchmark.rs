use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eco_tracker::models::LeaderboardEntry;
use eco_tracker::services::impact::level_for_points;
use eco_tracker::services::leaderboard::{rank_campuses, rank_entries};

fn campus_entries(count: usize) -> Vec<LeaderboardEntry> {
    const CAMPUSES: [&str; 4] = ["UCB", "UCLA", "UCSD", "UCD"];
    (0..count)
        .map(|i| LeaderboardEntry {
            user_id: format!("user-{}", i),
            name: format!("Student {}", i),
            campus_code: CAMPUSES[i % CAMPUSES.len()].to_string(),
            // Spread with plenty of ties
            points: ((i * 7_919) % 6_000) as u64,
        })
        .collect()
}

fn benchmark_ranking(c: &mut Criterion) {
    let entries = campus_entries(10_000);

    let mut group = c.benchmark_group("leaderboard");

    group.bench_function("rank_entries_10k", |b| {
        b.iter(|| rank_entries(black_box(entries.clone())))
    });

    group.bench_function("rank_campuses_10k", |b| {
        b.iter(|| rank_campuses(black_box(&entries)))
    });

    group.finish();
}

fn benchmark_level_lookup(c: &mut Criterion) {
    c.bench_function("level_for_points", |b| {
        b.iter(|| {
            (0..6_000u32)
                .step_by(13)
                .map(|p| level_for_points(black_box(p)).rank as u32)
                .sum::<u32>()
        })
    });
}

criterion_group!(benches, benchmark_ranking, benchmark_level_lookup);
criterion_main!(benches);
