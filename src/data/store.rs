use std::error;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};

use crate::data::{
    EntityId, EntityName, Gender, Group, Match, Player, Record, Statistic, Team, Tournament,
    User, VolleynetPlayer,
};
use crate::Result;

/// Names of the precomputed secondary indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexName {
    Group,
    Player,
    PlayerTeam,
    League,
    Ladder,
}

impl IndexName {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexName::Group => "group",
            IndexName::Player => "player",
            IndexName::PlayerTeam => "playerTeam",
            IndexName::League => "league",
            IndexName::Ladder => "ladder",
        }
    }
}

impl std::fmt::Display for IndexName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key within a secondary index: either a referenced entity id (e.g. a
/// group id) or a plain string key (e.g. a league name or ladder gender).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Id(EntityId),
    Name(String),
}

impl From<EntityId> for IndexKey {
    fn from(id: EntityId) -> Self {
        IndexKey::Id(id)
    }
}

impl From<&str> for IndexKey {
    fn from(name: &str) -> Self {
        IndexKey::Name(name.to_string())
    }
}

impl From<String> for IndexKey {
    fn from(name: String) -> Self {
        IndexKey::Name(name)
    }
}

impl From<Gender> for IndexKey {
    fn from(gender: Gender) -> Self {
        IndexKey::Name(gender.as_str().to_string())
    }
}

impl std::fmt::Display for IndexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKey::Id(id) => write!(f, "{}", id),
            IndexKey::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DanglingId(EntityName, String, EntityId);
impl error::Error for DanglingId {}
impl std::fmt::Display for DanglingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dangling id in {} table, {}: {} not in values",
            self.0, self.1, self.2
        )
    }
}

#[derive(Debug, Clone)]
pub struct DuplicateId(EntityName, EntityId);
impl error::Error for DuplicateId {}
impl std::fmt::Display for DuplicateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate id in {} table: {} appears twice in all", self.0, self.1)
    }
}

/// Normalized storage for one entity kind.
///
/// `values` holds every known record keyed by id. `all` is the insertion
/// ordered list of every known id. `by` holds the secondary indices and
/// `list` the named ad-hoc query results (e.g. the current search).
#[derive(Debug)]
pub struct EntityTable<R> {
    values: AHashMap<EntityId, R>,
    all: Vec<EntityId>,
    by: AHashMap<IndexName, AHashMap<IndexKey, Vec<EntityId>>>,
    list: AHashMap<String, Vec<EntityId>>,
}

impl<R> Default for EntityTable<R> {
    fn default() -> Self {
        EntityTable {
            values: AHashMap::new(),
            all: Vec::new(),
            by: AHashMap::new(),
            list: AHashMap::new(),
        }
    }
}

impl<R: Record> EntityTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &AHashMap<EntityId, R> {
        &self.values
    }

    pub fn get(&self, id: EntityId) -> Option<&R> {
        self.values.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every known id, in load order.
    pub fn all(&self) -> &[EntityId] {
        &self.all
    }

    /// The ids matching `key` in the `index` secondary index. A key with no
    /// bucket yet (nothing loaded) yields an empty slice, never an error.
    pub fn by(&self, index: IndexName, key: &IndexKey) -> &[EntityId] {
        self.by
            .get(&index)
            .and_then(|buckets| buckets.get(key))
            .map_or(&[], Vec::as_slice)
    }

    /// The ids of the named ad-hoc query result, empty when absent.
    pub fn list(&self, name: &str) -> &[EntityId] {
        self.list.get(name).map_or(&[], Vec::as_slice)
    }

    fn upsert(&mut self, record: R) {
        let id = record.id();
        debug!("upsert {} {}", R::KIND, id);
        if self.values.insert(id, record).is_none() {
            self.all.push(id);
        }
    }

    fn set_index(&mut self, index: IndexName, key: IndexKey, ids: Vec<EntityId>) {
        for id in &ids {
            if !self.values.contains_key(id) {
                // Tolerated mid-load; verify() reports it if it persists.
                warn!("{} index {}[{}] references unloaded id {}", R::KIND, index, key, id);
            }
        }
        self.by.entry(index).or_default().insert(key, ids);
    }

    fn append_index(&mut self, index: IndexName, key: IndexKey, id: EntityId) {
        if !self.values.contains_key(&id) {
            warn!("{} index {}[{}] references unloaded id {}", R::KIND, index, key, id);
        }
        let bucket = self.by.entry(index).or_default().entry(key).or_default();
        if !bucket.contains(&id) {
            bucket.push(id);
        }
    }

    fn set_list(&mut self, name: &str, ids: Vec<EntityId>) {
        self.list.insert(name.to_string(), ids);
    }

    fn clear_list(&mut self, name: &str) {
        self.list.remove(name);
    }

    /// Checks this table against the store invariants: `all` is duplicate
    /// free, and every id in any `by` bucket or `list` is present in both
    /// `values` and `all`.
    fn verify(&self) -> Result<()> {
        let mut seen = AHashSet::new();
        for id in &self.all {
            if !seen.insert(*id) {
                return Err(DuplicateId(R::KIND, *id).into());
            }
            if !self.values.contains_key(id) {
                return Err(DanglingId(R::KIND, "all".to_string(), *id).into());
            }
        }

        for (index, buckets) in &self.by {
            for (key, ids) in buckets {
                for id in ids {
                    if !self.values.contains_key(id) || !seen.contains(id) {
                        return Err(
                            DanglingId(R::KIND, format!("by.{}[{}]", index, key), *id).into()
                        );
                    }
                }
            }
        }

        for (name, ids) in &self.list {
            for id in ids {
                if !self.values.contains_key(id) || !seen.contains(id) {
                    return Err(DanglingId(R::KIND, format!("list.{}", name), *id).into());
                }
            }
        }

        Ok(())
    }
}

/// Ties a record type to its table within the [`Store`], so the write path
/// and the selectors can be expressed once, generically.
pub trait StoreTable: Record + Sized {
    fn table(store: &Store) -> &EntityTable<Self>;
    fn table_mut(store: &mut Store) -> &mut EntityTable<Self>;
}

macro_rules! impl_store_table {
    ($ty:ty, $field:ident) => {
        impl StoreTable for $ty {
            fn table(store: &Store) -> &EntityTable<Self> {
                &store.$field
            }

            fn table_mut(store: &mut Store) -> &mut EntityTable<Self> {
                &mut store.$field
            }
        }
    };
}

impl_store_table!(Group, group);
impl_store_table!(Player, player);
impl_store_table!(Team, team);
impl_store_table!(Match, matches);
impl_store_table!(Statistic, statistic);
impl_store_table!(Tournament, tournament);
impl_store_table!(User, user);
impl_store_table!(VolleynetPlayer, volleynetplayer);

/// The process-wide normalized entity cache.
///
/// All mutation goes through the write path methods here, which bump the
/// store version; the version is the identity key selector memoization is
/// keyed on. Reads take `&Store` and never block or mutate.
#[derive(Debug, Default)]
pub struct Store {
    group: EntityTable<Group>,
    player: EntityTable<Player>,
    team: EntityTable<Team>,
    matches: EntityTable<Match>,
    statistic: EntityTable<Statistic>,
    tournament: EntityTable<Tournament>,
    user: EntityTable<User>,
    volleynetplayer: EntityTable<VolleynetPlayer>,
    version: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonically increasing write counter. Two reads observing the same
    /// version observe the same store contents.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn table<R: StoreTable>(&self) -> &EntityTable<R> {
        R::table(self)
    }

    /// Inserts or replaces a record, appending its id to `all` on first
    /// sight.
    pub fn upsert<R: StoreTable>(&mut self, record: R) {
        self.version += 1;
        R::table_mut(self).upsert(record);
    }

    /// Replaces the `index`/`key` bucket of `R`'s table.
    pub fn set_index<R: StoreTable>(&mut self, index: IndexName, key: IndexKey, ids: Vec<EntityId>) {
        self.version += 1;
        R::table_mut(self).set_index(index, key, ids);
    }

    /// Appends `id` to the `index`/`key` bucket, skipping duplicates.
    pub fn append_index<R: StoreTable>(&mut self, index: IndexName, key: IndexKey, id: EntityId) {
        self.version += 1;
        R::table_mut(self).append_index(index, key, id);
    }

    /// Replaces the named ad-hoc query result (e.g. `"search"`).
    pub fn set_list<R: StoreTable>(&mut self, name: &str, ids: Vec<EntityId>) {
        self.version += 1;
        R::table_mut(self).set_list(name, ids);
    }

    pub fn clear_list<R: StoreTable>(&mut self, name: &str) {
        self.version += 1;
        R::table_mut(self).clear_list(name);
    }

    /// A borrowed snapshot of all eight `values` tables, the denormalizer's
    /// input. Immutable for as long as it is held.
    pub fn entity_map(&self) -> EntityMap<'_> {
        EntityMap {
            group: self.group.values(),
            player: self.player.values(),
            team: self.team.values(),
            matches: self.matches.values(),
            statistic: self.statistic.values(),
            tournament: self.tournament.values(),
            user: self.user.values(),
            volleynetplayer: self.volleynetplayer.values(),
        }
    }

    /// Checks the store invariants across all tables. Intended for the
    /// ingestion collaborator after a completed load, and for tests.
    pub fn verify(&self) -> Result<()> {
        self.group.verify()?;
        self.player.verify()?;
        self.team.verify()?;
        self.matches.verify()?;
        self.statistic.verify()?;
        self.tournament.verify()?;
        self.user.verify()?;
        self.volleynetplayer.verify()?;
        Ok(())
    }
}

/// A snapshot of the `values` tables of all eight entity kinds.
#[derive(Debug, Clone, Copy)]
pub struct EntityMap<'a> {
    pub group: &'a AHashMap<EntityId, Group>,
    pub player: &'a AHashMap<EntityId, Player>,
    pub team: &'a AHashMap<EntityId, Team>,
    pub matches: &'a AHashMap<EntityId, Match>,
    pub statistic: &'a AHashMap<EntityId, Statistic>,
    pub tournament: &'a AHashMap<EntityId, Tournament>,
    pub user: &'a AHashMap<EntityId, User>,
    pub volleynetplayer: &'a AHashMap<EntityId, VolleynetPlayer>,
}
