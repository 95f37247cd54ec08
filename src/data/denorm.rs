use smallvec::SmallVec;

use crate::data::{
    EntityId, EntityMap, EntityName, EntityView, GroupView, Link, MatchView, PlayerView,
    StatisticView, TeamView, TournamentView, UserView, VolleynetPlayerView,
};

/// The (kind, id) pairs currently being resolved in one denormalization
/// call. Re-entering a pair on the trail means the data contains a cycle;
/// resolution short-circuits to a bare [`Link::Ref`] instead of recursing.
#[derive(Debug, Default)]
pub struct Trail(SmallVec<[(EntityName, EntityId); 8]>);

impl Trail {
    fn new() -> Self {
        Self::default()
    }

    fn contains(&self, kind: EntityName, id: EntityId) -> bool {
        self.0.contains(&(kind, id))
    }

    fn push(&mut self, kind: EntityName, id: EntityId) {
        self.0.push((kind, id));
    }

    fn pop(&mut self) {
        self.0.pop();
    }
}

/// A view type reconstructable from the entity map.
///
/// `resolve` looks the record up in the map and recursively resolves its
/// foreign-key fields; a missing record yields `None`. Implementations
/// never write and depend only on the map snapshot, so for an unchanged
/// map the same inputs always produce the same output.
pub trait Denormalize: Sized {
    const KIND: EntityName;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self>;
}

/// Resolves one foreign-key edge. Missing targets and cycles both degrade
/// to the bare id; the policy of what to do with an unresolved edge stays
/// with the consumer.
fn link<T: Denormalize>(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Link<T> {
    if trail.contains(T::KIND, id) {
        return Link::Ref(id);
    }
    match T::resolve(map, id, trail) {
        Some(view) => Link::Full(Box::new(view)),
        None => Link::Ref(id),
    }
}

impl Denormalize for GroupView {
    const KIND: EntityName = EntityName::Group;

    fn resolve(map: &EntityMap<'_>, id: EntityId, _: &mut Trail) -> Option<Self> {
        map.group.get(&id).cloned()
    }
}

impl Denormalize for VolleynetPlayerView {
    const KIND: EntityName = EntityName::VolleynetPlayer;

    fn resolve(map: &EntityMap<'_>, id: EntityId, _: &mut Trail) -> Option<Self> {
        map.volleynetplayer.get(&id).cloned()
    }
}

impl Denormalize for PlayerView {
    const KIND: EntityName = EntityName::Player;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.player.get(&id)?;
        trail.push(Self::KIND, id);
        let view = PlayerView {
            id: raw.id,
            name: raw.name.clone(),
            user: raw.user.map(|user| link(map, user, trail)),
        };
        trail.pop();
        Some(view)
    }
}

impl Denormalize for UserView {
    const KIND: EntityName = EntityName::User;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.user.get(&id)?;
        trail.push(Self::KIND, id);
        let view = UserView {
            id: raw.id,
            email: raw.email.clone(),
            player: raw.player.map(|player| link(map, player, trail)),
        };
        trail.pop();
        Some(view)
    }
}

impl Denormalize for TeamView {
    const KIND: EntityName = EntityName::Team;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.team.get(&id)?;
        trail.push(Self::KIND, id);
        let view = TeamView {
            id: raw.id,
            name: raw.name.clone(),
            player1: link(map, raw.player1, trail),
            player2: link(map, raw.player2, trail),
        };
        trail.pop();
        Some(view)
    }
}

impl Denormalize for MatchView {
    const KIND: EntityName = EntityName::Match;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.matches.get(&id)?;
        trail.push(Self::KIND, id);
        let view = MatchView {
            id: raw.id,
            group: link(map, raw.group, trail),
            team1: link(map, raw.team1, trail),
            team2: link(map, raw.team2, trail),
            score_team1: raw.score_team1,
            score_team2: raw.score_team2,
            start: raw.start,
        };
        trail.pop();
        Some(view)
    }
}

impl Denormalize for StatisticView {
    const KIND: EntityName = EntityName::Statistic;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.statistic.get(&id)?;
        trail.push(Self::KIND, id);
        let view = StatisticView {
            id: raw.id,
            player: link(map, raw.player, trail),
            team: link(map, raw.team, trail),
            group: link(map, raw.group, trail),
            played: raw.played,
            won: raw.won,
            points_won: raw.points_won,
            points_lost: raw.points_lost,
        };
        trail.pop();
        Some(view)
    }
}

impl Denormalize for TournamentView {
    const KIND: EntityName = EntityName::Tournament;

    fn resolve(map: &EntityMap<'_>, id: EntityId, trail: &mut Trail) -> Option<Self> {
        let raw = map.tournament.get(&id)?;
        trail.push(Self::KIND, id);
        let view = TournamentView {
            id: raw.id,
            name: raw.name.clone(),
            start: raw.start,
            end: raw.end,
            season: raw.season,
            gender: raw.gender,
            league: raw.league.clone(),
            phase: raw.phase.clone(),
            status: raw.status,
            registration_open: raw.registration_open,
            link: raw.link.clone(),
            teams: raw.teams.iter().map(|team| link(map, *team, trail)).collect(),
        };
        trail.pop();
        Some(view)
    }
}

/// Denormalizes a single record, `None` when the id is unknown.
pub fn denorm_one<T: Denormalize>(map: &EntityMap<'_>, id: EntityId) -> Option<T> {
    T::resolve(map, id, &mut Trail::new())
}

/// Denormalizes a sequence of ids, in input order, one result per id.
/// Unknown ids come back as `None` holes; call sites that want them gone
/// pass the result through [`present`].
pub fn denorm_list<T: Denormalize>(map: &EntityMap<'_>, ids: &[EntityId]) -> Vec<Option<T>> {
    let mut trail = Trail::new();
    ids.iter()
        .map(|id| T::resolve(map, *id, &mut trail))
        .collect()
}

/// Drops the not-found holes of a [`denorm_list`] result.
pub fn present<T>(results: Vec<Option<T>>) -> Vec<T> {
    results.into_iter().flatten().collect()
}

/// Kind-dispatched denormalization of a single id.
pub fn denorm(kind: EntityName, map: &EntityMap<'_>, id: EntityId) -> Option<EntityView> {
    match kind {
        EntityName::Group => denorm_one::<GroupView>(map, id).map(EntityView::Group),
        EntityName::Player => denorm_one::<PlayerView>(map, id).map(EntityView::Player),
        EntityName::Team => denorm_one::<TeamView>(map, id).map(EntityView::Team),
        EntityName::Match => denorm_one::<MatchView>(map, id).map(EntityView::Match),
        EntityName::Statistic => denorm_one::<StatisticView>(map, id).map(EntityView::Statistic),
        EntityName::Tournament => {
            denorm_one::<TournamentView>(map, id).map(EntityView::Tournament)
        }
        EntityName::User => denorm_one::<UserView>(map, id).map(EntityView::User),
        EntityName::VolleynetPlayer => {
            denorm_one::<VolleynetPlayerView>(map, id).map(EntityView::VolleynetPlayer)
        }
    }
}

/// Kind-dispatched denormalization of an id sequence, holes preserved.
pub fn denorm_all(
    kind: EntityName,
    map: &EntityMap<'_>,
    ids: &[EntityId],
) -> Vec<Option<EntityView>> {
    ids.iter().map(|id| denorm(kind, map, *id)).collect()
}
