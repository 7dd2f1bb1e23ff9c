//! Prediction list queries

use crate::domain::storage::Filter;

/// Optional equality filters for listing predictions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionQuery {
    pub season: Option<i32>,
    pub week: Option<i32>,
    /// Matches either the home or the away team
    pub team: Option<String>,
}

impl PredictionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_week(mut self, week: i32) -> Self {
        self.week = Some(week);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Builds the store filter; blank team names are ignored
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::all();

        if let Some(season) = self.season {
            filter = filter.and(Filter::eq("season", season));
        }

        if let Some(week) = self.week {
            filter = filter.and(Filter::eq("week", week));
        }

        if let Some(team) = self.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            filter = filter.and(Filter::any_of(vec![
                Filter::eq("home_team", team),
                Filter::eq("away_team", team),
            ]));
        }

        filter
    }
}
