// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Duration;
use rr_fixtures_domain::{DomainError, GroupingStrategy, RefereeType, TimeZoneConverter};
use serde::{Deserialize, Serialize};

/// Tournament rule settings read by the planner.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningSettings {
    /// IANA name of the tenant's time zone, e.g. `Europe/Berlin`.
    pub time_zone: String,
    /// How long a match occupies its venue.
    pub planned_duration_of_match_minutes: u32,
    /// Who referees the matches.
    pub referee_type: RefereeType,
    /// How pairings are combined into groups played close together.
    pub grouping_strategy: GroupingStrategy,
    /// Compare exclusion windows by local calendar day instead of by instant.
    pub use_only_date_part_for_free_busy_times: bool,
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self {
            time_zone: String::from("UTC"),
            planned_duration_of_match_minutes: 120,
            referee_type: RefereeType::Home,
            grouping_strategy: GroupingStrategy::AlternatingFill,
            use_only_date_part_for_free_busy_times: false,
        }
    }
}

impl PlanningSettings {
    /// Returns the planned match duration.
    #[must_use]
    pub fn planned_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.planned_duration_of_match_minutes))
    }

    /// Builds the time zone converter for the configured zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the zone name is unknown.
    pub fn time_zone_converter(&self) -> Result<TimeZoneConverter, DomainError> {
        TimeZoneConverter::new(&self.time_zone)
    }
}
