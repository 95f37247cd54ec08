use serde::{Deserialize, Serialize};

use crate::data::Timestamp;

/// Identifier of a single record within one entity kind.
///
/// Ids are only unique per kind; a `Match` and a `Team` may share the same
/// numeric id. An `EntityId` is therefore only meaningful paired with an
/// [`EntityName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

/// The closed set of entity kinds tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityName {
    Group,
    Player,
    Team,
    Match,
    Statistic,
    Tournament,
    User,
    VolleynetPlayer,
}

impl EntityName {
    pub const ALL: [EntityName; 8] = [
        EntityName::Group,
        EntityName::Player,
        EntityName::Team,
        EntityName::Match,
        EntityName::Statistic,
        EntityName::Tournament,
        EntityName::User,
        EntityName::VolleynetPlayer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityName::Group => "group",
            EntityName::Player => "player",
            EntityName::Team => "team",
            EntityName::Match => "match",
            EntityName::Statistic => "statistic",
            EntityName::Tournament => "tournament",
            EntityName::User => "user",
            EntityName::VolleynetPlayer => "volleynetplayer",
        }
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    W,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::W => "W",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    Upcoming,
    Done,
    Canceled,
}

/// A stored record of a known kind.
///
/// Implementations tie a record struct to its [`EntityName`] so that tables
/// and the denormalizer can be written once, generically.
pub trait Record {
    const KIND: EntityName;

    fn id(&self) -> EntityId;
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl Record for $ty {
            const KIND: EntityName = $kind;

            fn id(&self) -> EntityId {
                self.id
            }
        }
    };
}

/// A league group (a round-robin division players compete in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: EntityId,
    pub name: String,
}

/// A registered player. `user` links back to the login account, when the
/// player has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub user: Option<EntityId>,
}

/// A two-player team. `player1`/`player2` reference [`Player`] records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    pub player1: EntityId,
    pub player2: EntityId,
}

/// A played (or scheduled) match between two teams within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: EntityId,
    pub group: EntityId,
    pub team1: EntityId,
    pub team2: EntityId,
    pub score_team1: u32,
    pub score_team2: u32,
    pub start: Timestamp,
}

/// Aggregated per-player result tallies, scoped to a team and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub id: EntityId,
    pub player: EntityId,
    pub team: EntityId,
    pub group: EntityId,
    pub played: u32,
    pub won: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

/// A volleynet beach tournament. `teams` references [`Team`] records in
/// registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
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
    pub teams: Vec<EntityId>,
}

/// A login account. `player` links to the profile the account plays as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub player: Option<EntityId>,
}

/// A player on the volleynet ranking ladder. Carries no foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolleynetPlayer {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub club: String,
    pub country_union: String,
    pub rank: u32,
    pub total_points: u32,
}

impl_record!(Group, EntityName::Group);
impl_record!(Player, EntityName::Player);
impl_record!(Team, EntityName::Team);
impl_record!(Match, EntityName::Match);
impl_record!(Statistic, EntityName::Statistic);
impl_record!(Tournament, EntityName::Tournament);
impl_record!(User, EntityName::User);
impl_record!(VolleynetPlayer, EntityName::VolleynetPlayer);
