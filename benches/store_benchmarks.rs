use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use leaguestore::selectors;
use leaguestore::*;

fn start_of_day(day: u32) -> Timestamp {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 1 + (day % 28))
        .expect("valid fixture date")
        .and_hms_opt(9, 0, 0)
        .expect("valid fixture time")
}

// Builds a store with `count` tournaments in one league, each with two
// teams of two players.
fn populated_store(count: u32) -> Store {
    let mut store = Store::new();
    let mut tournament_ids = Vec::new();

    for i in 0..count {
        for offset in 0..4 {
            let player_id = i * 4 + offset;
            store.upsert(Player {
                id: EntityId(player_id),
                name: format!("Player {}", player_id),
                user: None,
            });
        }
        let team1 = EntityId(i * 2);
        let team2 = EntityId(i * 2 + 1);
        store.upsert(Team {
            id: team1,
            name: format!("Team {}", i * 2),
            player1: EntityId(i * 4),
            player2: EntityId(i * 4 + 1),
        });
        store.upsert(Team {
            id: team2,
            name: format!("Team {}", i * 2 + 1),
            player1: EntityId(i * 4 + 2),
            player2: EntityId(i * 4 + 3),
        });

        store.upsert(Tournament {
            id: EntityId(i),
            name: format!("Tournament {}", i),
            start: start_of_day(i),
            end: start_of_day(i),
            season: 2024,
            gender: Gender::M,
            league: "AMATEUR TOUR".to_string(),
            phase: "ABV Tour AMATEUR 1".to_string(),
            status: TournamentStatus::Upcoming,
            registration_open: true,
            link: format!("http://example.com/cup/{}", i),
            teams: vec![team1, team2],
        });
        tournament_ids.push(EntityId(i));
    }

    store.set_index::<Tournament>(IndexName::League, "AMATEUR TOUR".into(), tournament_ids);
    store
}

fn bench_denormalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("denormalization");

    for size in [10u32, 100, 1000].iter() {
        let store = populated_store(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("denorm_list", size), size, |b, _| {
            let map = store.entity_map();
            let ids = store.table::<Tournament>().all();
            b.iter(|| {
                let views = denorm_list::<TournamentView>(&map, black_box(ids));
                black_box(views)
            });
        });
    }

    group.finish();
}

fn bench_selectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("selectors");

    for size in [10u32, 100, 1000].iter() {
        let store = populated_store(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("tournaments_by_league", size), size, |b, _| {
            b.iter(|| {
                let views =
                    selectors::tournaments_by_league(&store, black_box(&["AMATEUR TOUR"]));
                black_box(views)
            });
        });

        group.bench_with_input(BenchmarkId::new("memoized_repeat_read", size), size, |b, _| {
            let leagues = vec!["AMATEUR TOUR".to_string()];
            b.iter_batched(
                SelectorCache::new,
                |mut cache| {
                    for _ in 0..10 {
                        black_box(cache.tournaments_by_league(&store, &leagues));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    for size in [100u32, 1000].iter() {
        let store = populated_store(*size);
        let tournaments = selectors::tournaments_by_league(&store, &["AMATEUR TOUR"]);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("sort_and_group", size), size, |b, _| {
            b.iter(|| {
                let sorted = sorted_by_start_desc(black_box(&tournaments));
                black_box(group_by_day(&sorted))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_denormalization, bench_selectors, bench_grouping);
criterion_main!(benches);
