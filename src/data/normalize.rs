//! Ingestion of nested API responses into the normalized store.
//!
//! The API delivers object graphs (a tournament with its teams and their
//! players embedded); storage is flat. The functions here split a response
//! into per-kind upserts plus the index updates the read path relies on,
//! the inverse of denormalization. After a completed load the store
//! satisfies [`Store::verify`].

use log::debug;
use serde::Deserialize;

use crate::data::{
    EntityId, Gender, Group, IndexName, Match, Player, Statistic, Store, Team, Timestamp,
    Tournament, TournamentStatus, User, VolleynetPlayer,
};

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResponse {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupResponse {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamResponse {
    pub id: EntityId,
    pub name: String,
    pub player1: PlayerResponse,
    pub player2: PlayerResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchResponse {
    pub id: EntityId,
    pub group: GroupResponse,
    pub team1: TeamResponse,
    pub team2: TeamResponse,
    pub score_team1: u32,
    pub score_team2: u32,
    pub start: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentResponse {
    pub id: EntityId,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub season: u16,
    pub gender: Gender,
    pub league: String,
    pub phase: String,
    pub status: TournamentStatus,
    pub registration_open: bool,
    pub link: String,
    #[serde(default)]
    pub teams: Vec<TeamResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticResponse {
    pub id: EntityId,
    pub player: PlayerResponse,
    pub team: TeamResponse,
    pub group: GroupResponse,
    pub played: u32,
    pub won: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub email: String,
    pub player: Option<PlayerResponse>,
}

fn put_player(store: &mut Store, player: PlayerResponse) {
    // Re-upserting a player must not drop an already known account link.
    let user = store.table::<Player>().get(player.id).and_then(|known| known.user);
    store.upsert(Player {
        id: player.id,
        name: player.name,
        user,
    });
}

fn put_team(store: &mut Store, team: TeamResponse) {
    let player1 = team.player1.id;
    let player2 = team.player2.id;
    put_player(store, team.player1);
    put_player(store, team.player2);
    store.upsert(Team {
        id: team.id,
        name: team.name,
        player1,
        player2,
    });
}

/// Stores a tournament list response, indexing each tournament under its
/// league.
pub fn ingest_tournaments(store: &mut Store, tournaments: Vec<TournamentResponse>) {
    debug!("ingest {} tournaments", tournaments.len());
    for tournament in tournaments {
        let team_ids: Vec<EntityId> = tournament.teams.iter().map(|team| team.id).collect();
        for team in tournament.teams {
            put_team(store, team);
        }

        let league = tournament.league.clone();
        let id = tournament.id;
        store.upsert(Tournament {
            id,
            name: tournament.name,
            start: tournament.start,
            end: tournament.end,
            season: tournament.season,
            gender: tournament.gender,
            league: tournament.league,
            phase: tournament.phase,
            status: tournament.status,
            registration_open: tournament.registration_open,
            link: tournament.link,
            teams: team_ids,
        });
        store.append_index::<Tournament>(IndexName::League, league.into(), id);
    }
}

/// Stores a match list response, indexing each match under its group and
/// under each of its four players.
pub fn ingest_matches(store: &mut Store, matches: Vec<MatchResponse>) {
    debug!("ingest {} matches", matches.len());
    for game in matches {
        let group_id = game.group.id;
        store.upsert(Group {
            id: game.group.id,
            name: game.group.name,
        });

        let players = [
            game.team1.player1.id,
            game.team1.player2.id,
            game.team2.player1.id,
            game.team2.player2.id,
        ];
        let team1 = game.team1.id;
        let team2 = game.team2.id;
        put_team(store, game.team1);
        put_team(store, game.team2);

        store.upsert(Match {
            id: game.id,
            group: group_id,
            team1,
            team2,
            score_team1: game.score_team1,
            score_team2: game.score_team2,
            start: game.start,
        });
        store.append_index::<Match>(IndexName::Group, group_id.into(), game.id);
        for player in players {
            store.append_index::<Match>(IndexName::Player, player.into(), game.id);
        }
    }
}

/// Stores a group's player roster, replacing the group's player bucket.
pub fn ingest_group_players(
    store: &mut Store,
    group: GroupResponse,
    players: Vec<PlayerResponse>,
) {
    debug!("ingest {} players for group {}", players.len(), group.id);
    let group_id = group.id;
    store.upsert(Group {
        id: group.id,
        name: group.name,
    });

    let ids: Vec<EntityId> = players.iter().map(|player| player.id).collect();
    for player in players {
        put_player(store, player);
    }
    store.set_index::<Player>(IndexName::Group, group_id.into(), ids);
}

/// Stores a statistics response, indexing per group, per player and per
/// player-team pairing.
pub fn ingest_statistics(store: &mut Store, statistics: Vec<StatisticResponse>) {
    debug!("ingest {} statistics", statistics.len());
    for statistic in statistics {
        let player_id = statistic.player.id;
        let team_id = statistic.team.id;
        let group_id = statistic.group.id;

        put_player(store, statistic.player);
        put_team(store, statistic.team);
        store.upsert(Group {
            id: statistic.group.id,
            name: statistic.group.name,
        });

        store.upsert(Statistic {
            id: statistic.id,
            player: player_id,
            team: team_id,
            group: group_id,
            played: statistic.played,
            won: statistic.won,
            points_won: statistic.points_won,
            points_lost: statistic.points_lost,
        });
        store.append_index::<Statistic>(IndexName::Group, group_id.into(), statistic.id);
        store.append_index::<Statistic>(IndexName::Player, player_id.into(), statistic.id);
        store.append_index::<Statistic>(IndexName::PlayerTeam, player_id.into(), statistic.id);
    }
}

/// Stores a login/user response.
pub fn ingest_users(store: &mut Store, users: Vec<UserResponse>) {
    debug!("ingest {} users", users.len());
    for user in users {
        let player_id = user.player.as_ref().map(|player| player.id);
        if let Some(player) = user.player {
            put_player(store, player);
        }
        store.upsert(User {
            id: user.id,
            email: user.email,
            player: player_id,
        });
    }
}

/// Replaces one gender's ranking ladder.
pub fn ingest_ladder(store: &mut Store, gender: Gender, players: Vec<VolleynetPlayer>) {
    debug!("ingest ladder {} with {} players", gender, players.len());
    let ids: Vec<EntityId> = players.iter().map(|player| player.id).collect();
    for player in players {
        store.upsert(player);
    }
    store.set_index::<VolleynetPlayer>(IndexName::Ladder, gender.into(), ids);
}

/// Replaces the current player search result.
pub fn ingest_search(store: &mut Store, players: Vec<VolleynetPlayer>) {
    debug!("ingest search result with {} players", players.len());
    let ids: Vec<EntityId> = players.iter().map(|player| player.id).collect();
    for player in players {
        store.upsert(player);
    }
    store.set_list::<VolleynetPlayer>("search", ids);
}
