use crate::test::fixtures::*;
use crate::*;

#[test]
fn denorm_resolves_nested_graph() {
    let store = sample_store();
    let map = store.entity_map();

    let game = denorm_one::<MatchView>(&map, EntityId(1)).expect("match 1 is loaded");

    let group = game.group.full().expect("group resolves");
    assert_eq!(group.name, "Spring League");

    let team1 = game.team1.full().expect("team 1 resolves");
    let anna = team1.player1.full().expect("player 1 resolves");
    assert_eq!(anna.name, "Anna");
}

#[test]
fn denorm_missing_id_is_none() {
    let store = sample_store();
    let map = store.entity_map();

    assert!(denorm_one::<MatchView>(&map, EntityId(999)).is_none());
    assert!(denorm(EntityName::Match, &map, EntityId(999)).is_none());
}

#[test]
fn denorm_missing_foreign_key_degrades_to_ref() {
    let mut store = Store::new();
    store.upsert(Group {
        id: EntityId(1),
        name: "Spring League".to_string(),
    });
    // Teams 8 and 9 were never loaded.
    store.upsert(game(1, 1, 8, 9, "2024-03-01T18:00:00"));

    let map = store.entity_map();
    let view = denorm_one::<MatchView>(&map, EntityId(1)).expect("match 1 is loaded");

    assert_eq!(view.team1, Link::Ref(EntityId(8)));
    assert_eq!(view.team2, Link::Ref(EntityId(9)));
    assert!(view.group.full().is_some());
}

#[test]
fn denorm_is_idempotent_for_unchanged_map() {
    let store = sample_store();
    let map = store.entity_map();

    let first = denorm_one::<TournamentView>(&map, EntityId(10));
    let second = denorm_one::<TournamentView>(&map, EntityId(10));
    assert_eq!(first, second);
}

#[test]
fn denorm_list_preserves_order_and_holes() {
    let store = sample_store();
    let map = store.entity_map();

    let ids = [EntityId(11), EntityId(999), EntityId(10)];
    let views = denorm_list::<TournamentView>(&map, &ids);

    assert_eq!(views.len(), 3);
    assert_eq!(views[0].as_ref().map(|t| t.id), Some(EntityId(11)));
    assert!(views[1].is_none());
    assert_eq!(views[2].as_ref().map(|t| t.id), Some(EntityId(10)));

    let filtered = present(views);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn denorm_cycle_terminates_with_ref_stub() {
    let mut store = Store::new();
    // Account and profile reference each other; resolution must stop at
    // the re-entered id instead of recursing.
    store.upsert(Player {
        id: EntityId(7),
        name: "Anna".to_string(),
        user: Some(EntityId(9)),
    });
    store.upsert(User {
        id: EntityId(9),
        email: "anna@example.com".to_string(),
        player: Some(EntityId(7)),
    });

    let map = store.entity_map();
    let view = denorm_one::<PlayerView>(&map, EntityId(7)).expect("player 7 is loaded");

    let account = view.user.as_ref().and_then(|link| link.full()).expect("user resolves");
    assert_eq!(account.email, "anna@example.com");
    assert_eq!(account.player, Some(Link::Ref(EntityId(7))));
}

#[test]
fn denorm_dispatch_matches_typed_entry_points() {
    let store = sample_store();
    let map = store.entity_map();

    match denorm(EntityName::Tournament, &map, EntityId(10)) {
        Some(EntityView::Tournament(view)) => assert_eq!(view.name, "Summer Opening"),
        other => panic!("expected a tournament view, got {:?}", other),
    }

    let views = denorm_all(EntityName::Player, &map, &[EntityId(1), EntityId(999)]);
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].as_ref().map(EntityView::id), Some(EntityId(1)));
    assert!(views[1].is_none());
}
