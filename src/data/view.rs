use serde::Serialize;

use crate::data::{
    EntityId, Gender, Group, Timestamp, TournamentStatus, VolleynetPlayer,
};

/// A resolved foreign-key edge.
///
/// `Full` embeds the denormalized target. `Ref` is the bare id, produced when
/// the target is absent from the entity map or when resolving it would
/// re-enter an id already being denormalized in the current call (a cycle).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Link<T> {
    Ref(EntityId),
    Full(Box<T>),
}

impl<T> Link<T> {
    /// The embedded view, if the edge resolved.
    pub fn full(&self) -> Option<&T> {
        match self {
            Link::Full(view) => Some(view),
            Link::Ref(_) => None,
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Link::Ref(_))
    }
}

// Groups and ladder players carry no foreign keys, so their views are the
// records themselves.
pub type GroupView = Group;
pub type VolleynetPlayerView = VolleynetPlayer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub name: String,
    pub user: Option<Link<UserView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamView {
    pub id: EntityId,
    pub name: String,
    pub player1: Link<PlayerView>,
    pub player2: Link<PlayerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub id: EntityId,
    pub group: Link<GroupView>,
    pub team1: Link<TeamView>,
    pub team2: Link<TeamView>,
    pub score_team1: u32,
    pub score_team2: u32,
    pub start: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticView {
    pub id: EntityId,
    pub player: Link<PlayerView>,
    pub team: Link<TeamView>,
    pub group: Link<GroupView>,
    pub played: u32,
    pub won: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentView {
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
    pub teams: Vec<Link<TeamView>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: EntityId,
    pub email: String,
    pub player: Option<Link<PlayerView>>,
}

/// A denormalized record of any kind, as returned by the
/// [`EntityName`](crate::EntityName)-dispatched entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EntityView {
    Group(GroupView),
    Player(PlayerView),
    Team(TeamView),
    Match(MatchView),
    Statistic(StatisticView),
    Tournament(TournamentView),
    User(UserView),
    VolleynetPlayer(VolleynetPlayerView),
}

impl EntityView {
    pub fn id(&self) -> EntityId {
        match self {
            EntityView::Group(v) => v.id,
            EntityView::Player(v) => v.id,
            EntityView::Team(v) => v.id,
            EntityView::Match(v) => v.id,
            EntityView::Statistic(v) => v.id,
            EntityView::Tournament(v) => v.id,
            EntityView::User(v) => v.id,
            EntityView::VolleynetPlayer(v) => v.id,
        }
    }
}
