mod data;

#[cfg(test)]
mod test;

pub use data::{
    denorm, denorm_all, denorm_list, denorm_one, group_by_day, now, present,
    sorted_by_start_desc, Denormalize, EntityId, EntityMap, EntityName, EntityTable, EntityView,
    Gender, Group, GroupView, IndexKey, IndexName, Link, Match, MatchView, Memo, Player,
    PlayerView, Record, Scheduled, SelectorCache, Statistic, StatisticView, Store, StoreTable,
    Team, TeamView, Timestamp, Tournament, TournamentStatus, TournamentView, Trail, User,
    UserView, VolleynetPlayer, VolleynetPlayerView,
};

pub use data::normalize;
pub use data::selectors;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
