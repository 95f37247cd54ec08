mod denorm;
mod entity;
pub mod grouping;
pub mod normalize;
pub mod selectors;
mod store;
mod view;

pub use denorm::{denorm, denorm_all, denorm_list, denorm_one, present, Denormalize, Trail};
pub use entity::{
    EntityId, EntityName, Gender, Group, Match, Player, Record, Statistic, Team, Tournament,
    TournamentStatus, User, VolleynetPlayer,
};
pub use grouping::{group_by_day, sorted_by_start_desc, Scheduled};
pub use selectors::{Memo, SelectorCache};
pub use store::{EntityMap, EntityTable, IndexKey, IndexName, Store, StoreTable};
pub use view::{
    EntityView, GroupView, Link, MatchView, PlayerView, StatisticView, TeamView, TournamentView,
    UserView, VolleynetPlayerView,
};

pub type Timestamp = chrono::NaiveDateTime;

pub fn now() -> Timestamp {
    chrono::Local::now().naive_local()
}
