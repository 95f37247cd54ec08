//! Read-only query functions over the [`Store`].
//!
//! Every selector is a pure function of `(store, params)`. List selectors
//! return an empty `Vec` when nothing matches (never an error), so list
//! consumers can always iterate; by-id selectors return `Option`. Callers
//! that want memoization wrap a [`SelectorCache`] around the hot ones;
//! caching is explicit and keyed on the store version, never hidden in
//! globals.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::data::denorm::{denorm_list, denorm_one, present};
use crate::data::{
    EntityId, Gender, GroupView, IndexName, Match, MatchView, Player, PlayerView, Statistic,
    StatisticView, Store, Tournament, TournamentView, User, UserView, VolleynetPlayer,
    VolleynetPlayerView,
};

pub fn all_users(store: &Store) -> Vec<UserView> {
    let map = store.entity_map();
    present(denorm_list(&map, store.table::<User>().all()))
}

pub fn all_players(store: &Store) -> Vec<PlayerView> {
    let map = store.entity_map();
    present(denorm_list(&map, store.table::<Player>().all()))
}

pub fn all_matches(store: &Store) -> Vec<MatchView> {
    let map = store.entity_map();
    present(denorm_list(&map, store.table::<Match>().all()))
}

pub fn all_statistics(store: &Store) -> Vec<StatisticView> {
    let map = store.entity_map();
    present(denorm_list(&map, store.table::<Statistic>().all()))
}

pub fn group(store: &Store, group_id: EntityId) -> Option<GroupView> {
    denorm_one(&store.entity_map(), group_id)
}

pub fn player(store: &Store, player_id: EntityId) -> Option<PlayerView> {
    denorm_one(&store.entity_map(), player_id)
}

pub fn match_by_id(store: &Store, match_id: EntityId) -> Option<MatchView> {
    denorm_one(&store.entity_map(), match_id)
}

pub fn tournament(store: &Store, tournament_id: EntityId) -> Option<TournamentView> {
    denorm_one(&store.entity_map(), tournament_id)
}

/// Players of a group, in index order.
pub fn group_players(store: &Store, group_id: EntityId) -> Vec<PlayerView> {
    let map = store.entity_map();
    let ids = store
        .table::<Player>()
        .by(IndexName::Group, &group_id.into());
    present(denorm_list(&map, ids))
}

pub fn matches_by_group(store: &Store, group_id: EntityId) -> Vec<MatchView> {
    let map = store.entity_map();
    let ids = store.table::<Match>().by(IndexName::Group, &group_id.into());
    present(denorm_list(&map, ids))
}

pub fn matches_by_player(store: &Store, player_id: EntityId) -> Vec<MatchView> {
    let map = store.entity_map();
    let ids = store
        .table::<Match>()
        .by(IndexName::Player, &player_id.into());
    present(denorm_list(&map, ids))
}

pub fn statistics_by_group(store: &Store, group_id: EntityId) -> Vec<StatisticView> {
    let map = store.entity_map();
    let ids = store
        .table::<Statistic>()
        .by(IndexName::Group, &group_id.into());
    present(denorm_list(&map, ids))
}

pub fn statistics_by_player_team(store: &Store, player_id: EntityId) -> Vec<StatisticView> {
    let map = store.entity_map();
    let ids = store
        .table::<Statistic>()
        .by(IndexName::PlayerTeam, &player_id.into());
    present(denorm_list(&map, ids))
}

/// The player's primary statistic: the first id of their `player` bucket.
pub fn statistic_by_player(store: &Store, player_id: EntityId) -> Option<StatisticView> {
    let ids = store
        .table::<Statistic>()
        .by(IndexName::Player, &player_id.into());
    let first = ids.first()?;
    denorm_one(&store.entity_map(), *first)
}

/// Tournaments of the given leagues, one flat list in caller-given league
/// order, each league's bucket in index order. A tournament indexed under
/// several of the requested leagues appears once per league; deduplication
/// is deliberately not performed.
pub fn tournaments_by_league<S: AsRef<str>>(store: &Store, leagues: &[S]) -> Vec<TournamentView> {
    let map = store.entity_map();
    let table = store.table::<Tournament>();

    let mut tournaments = Vec::new();
    for league in leagues {
        let ids = table.by(IndexName::League, &league.as_ref().into());
        tournaments.extend(present(denorm_list(&map, ids)));
    }
    tournaments
}

/// The volleynet ranking ladder for one gender.
pub fn ladder_players(store: &Store, gender: Gender) -> Vec<VolleynetPlayerView> {
    let map = store.entity_map();
    let ids = store
        .table::<VolleynetPlayer>()
        .by(IndexName::Ladder, &gender.into());
    present(denorm_list(&map, ids))
}

/// The current volleynet player search result.
pub fn search_players(store: &Store) -> Vec<VolleynetPlayerView> {
    let map = store.entity_map();
    let ids = store.table::<VolleynetPlayer>().list("search");
    present(denorm_list(&map, ids))
}

/// Last-args-equal cache: remembers the one most recent (key, value) pair
/// and recomputes only when the key changes identity.
#[derive(Debug)]
pub struct Memo<K, V> {
    last: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo { last: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let stale = !matches!(&self.last, Some((cached, _)) if *cached == key);
        if stale {
            let value = compute();
            self.last = Some((key, value));
        }
        match &self.last {
            Some((_, value)) => value,
            // `last` was filled right above when it was empty or stale.
            None => unreachable!(),
        }
    }
}

const LRU_CAPACITY: usize = 16;

fn lru_capacity() -> NonZeroUsize {
    NonZeroUsize::new(LRU_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

/// Memoized wrappers for the hot list selectors.
///
/// Keys combine the store version with the selector parameters, so a cache
/// entry is valid exactly as long as no write has happened. Unparameterized
/// selectors use a [`Memo`]; parameterized ones a small bounded
/// [`LruCache`]. The cache is owned by the caller (typically whatever owns
/// the store) rather than living in a global.
pub struct SelectorCache {
    all_matches: Memo<u64, Vec<MatchView>>,
    tournaments_by_league: LruCache<(u64, Vec<String>), Vec<TournamentView>>,
    ladder_players: LruCache<(u64, Gender), Vec<VolleynetPlayerView>>,
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorCache {
    pub fn new() -> Self {
        SelectorCache {
            all_matches: Memo::new(),
            tournaments_by_league: LruCache::new(lru_capacity()),
            ladder_players: LruCache::new(lru_capacity()),
        }
    }

    pub fn all_matches(&mut self, store: &Store) -> &[MatchView] {
        self.all_matches
            .get_or_insert_with(store.version(), || all_matches(store))
    }

    pub fn tournaments_by_league(&mut self, store: &Store, leagues: &[String]) -> Vec<TournamentView> {
        let key = (store.version(), leagues.to_vec());
        if let Some(hit) = self.tournaments_by_league.get(&key) {
            return hit.clone();
        }
        let computed = tournaments_by_league(store, leagues);
        self.tournaments_by_league.put(key, computed.clone());
        computed
    }

    pub fn ladder_players(&mut self, store: &Store, gender: Gender) -> Vec<VolleynetPlayerView> {
        let key = (store.version(), gender);
        if let Some(hit) = self.ladder_players.get(&key) {
            return hit.clone();
        }
        let computed = ladder_players(store, gender);
        self.ladder_players.put(key, computed.clone());
        computed
    }
}
