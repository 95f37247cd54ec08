use crate::*;

pub fn ts(datetime: &str) -> Timestamp {
    chrono::NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S")
        .expect("fixture datetime must parse")
}

pub fn player(id: u32, name: &str) -> Player {
    Player {
        id: EntityId(id),
        name: name.to_string(),
        user: None,
    }
}

pub fn team(id: u32, name: &str, player1: u32, player2: u32) -> Team {
    Team {
        id: EntityId(id),
        name: name.to_string(),
        player1: EntityId(player1),
        player2: EntityId(player2),
    }
}

pub fn game(id: u32, group: u32, team1: u32, team2: u32, start: &str) -> Match {
    Match {
        id: EntityId(id),
        group: EntityId(group),
        team1: EntityId(team1),
        team2: EntityId(team2),
        score_team1: 15,
        score_team2: 13,
        start: ts(start),
    }
}

pub fn statistic(id: u32, player: u32, team: u32, group: u32) -> Statistic {
    Statistic {
        id: EntityId(id),
        player: EntityId(player),
        team: EntityId(team),
        group: EntityId(group),
        played: 10,
        won: 6,
        points_won: 150,
        points_lost: 120,
    }
}

pub fn tournament(id: u32, name: &str, start: &str, league: &str) -> Tournament {
    Tournament {
        id: EntityId(id),
        name: name.to_string(),
        start: ts(start),
        end: ts(start),
        season: 2018,
        gender: Gender::M,
        league: league.to_string(),
        phase: format!("ABV Tour {} 1", league),
        status: TournamentStatus::Upcoming,
        registration_open: false,
        link: format!("http://example.com/cup/{}", id),
        teams: Vec::new(),
    }
}

pub fn ladder_player(id: u32, last_name: &str, gender: Gender, rank: u32) -> VolleynetPlayer {
    VolleynetPlayer {
        id: EntityId(id),
        first_name: "Max".to_string(),
        last_name: last_name.to_string(),
        gender,
        club: "Beachvolley Wien".to_string(),
        country_union: "ÖVV".to_string(),
        rank,
        total_points: 1000 - rank,
    }
}

/// A store with one group, four players in two teams, two matches, one
/// statistic per player of team 1, and tournaments in two leagues.
pub fn sample_store() -> Store {
    let mut store = Store::new();

    store.upsert(Group {
        id: EntityId(1),
        name: "Spring League".to_string(),
    });

    for (id, name) in [(1, "Anna"), (2, "Ben"), (3, "Clara"), (4, "David")] {
        store.upsert(player(id, name));
    }
    store.set_index::<Player>(
        IndexName::Group,
        EntityId(1).into(),
        vec![EntityId(1), EntityId(2), EntityId(3), EntityId(4)],
    );

    store.upsert(team(1, "Anna / Ben", 1, 2));
    store.upsert(team(2, "Clara / David", 3, 4));

    store.upsert(game(1, 1, 1, 2, "2024-03-01T18:00:00"));
    store.upsert(game(2, 1, 2, 1, "2024-03-08T18:00:00"));
    store.set_index::<Match>(
        IndexName::Group,
        EntityId(1).into(),
        vec![EntityId(1), EntityId(2)],
    );
    for player_id in 1..=4u32 {
        store.set_index::<Match>(
            IndexName::Player,
            EntityId(player_id).into(),
            vec![EntityId(1), EntityId(2)],
        );
    }

    store.upsert(statistic(1, 1, 1, 1));
    store.upsert(statistic(2, 2, 1, 1));
    store.set_index::<Statistic>(
        IndexName::Group,
        EntityId(1).into(),
        vec![EntityId(1), EntityId(2)],
    );
    store.set_index::<Statistic>(IndexName::Player, EntityId(1).into(), vec![EntityId(1)]);
    store.set_index::<Statistic>(IndexName::Player, EntityId(2).into(), vec![EntityId(2)]);
    store.set_index::<Statistic>(IndexName::PlayerTeam, EntityId(1).into(), vec![EntityId(1)]);
    store.set_index::<Statistic>(IndexName::PlayerTeam, EntityId(2).into(), vec![EntityId(2)]);

    store.upsert(tournament(10, "Summer Opening", "2018-04-21T09:00:00", "AMATEUR TOUR"));
    store.upsert(tournament(11, "Graz", "2018-04-21T10:00:00", "AMATEUR TOUR"));
    store.upsert(tournament(12, "Pro Masters", "2018-05-06T09:00:00", "PRO TOUR"));
    store.set_index::<Tournament>(
        IndexName::League,
        "AMATEUR TOUR".into(),
        vec![EntityId(10), EntityId(11)],
    );
    store.set_index::<Tournament>(IndexName::League, "PRO TOUR".into(), vec![EntityId(12)]);

    store.upsert(ladder_player(100, "Huber", Gender::M, 1));
    store.upsert(ladder_player(101, "Gruber", Gender::M, 2));
    store.upsert(ladder_player(102, "Maier", Gender::W, 1));
    store.set_index::<VolleynetPlayer>(
        IndexName::Ladder,
        Gender::M.into(),
        vec![EntityId(100), EntityId(101)],
    );
    store.set_index::<VolleynetPlayer>(
        IndexName::Ladder,
        Gender::W.into(),
        vec![EntityId(102)],
    );

    store
}
