// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DateTimePeriod, ExcludedDateWindow, RoundId, TeamId, TimeZoneConverter, TournamentId};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
}

fn window(round_id: Option<i64>, team_id: Option<i64>) -> ExcludedDateWindow {
    ExcludedDateWindow {
        date_from: at(6, 10, 0),
        date_to: at(6, 12, 0) + Duration::days(1) - Duration::seconds(1),
        tournament_id: TournamentId(5),
        round_id: round_id.map(RoundId),
        team_id: team_id.map(TeamId),
        reason: String::from("Summer break"),
    }
}

fn match_at(day: u32) -> DateTimePeriod {
    DateTimePeriod::new(at(6, day, 18), at(6, day, 20))
}

#[test]
fn test_tournament_wide_window_applies_to_everyone() {
    let excluded = window(None, None);
    for round in 1..=3 {
        for team in 1..=4 {
            assert!(excluded.applies_to(TournamentId(5), RoundId(round), TeamId(team)));
        }
    }
    assert!(!excluded.applies_to(TournamentId(6), RoundId(1), TeamId(1)));
}

#[test]
fn test_round_window_only_applies_to_that_round() {
    let excluded = window(Some(1), None);
    assert!(excluded.applies_to(TournamentId(5), RoundId(1), TeamId(1)));
    assert!(excluded.applies_to(TournamentId(5), RoundId(1), TeamId(2)));
    assert!(!excluded.applies_to(TournamentId(5), RoundId(2), TeamId(1)));
}

#[test]
fn test_team_window_only_applies_to_that_team() {
    let excluded = window(None, Some(3));
    assert!(excluded.applies_to(TournamentId(5), RoundId(1), TeamId(3)));
    assert!(excluded.applies_to(TournamentId(5), RoundId(2), TeamId(3)));
    assert!(!excluded.applies_to(TournamentId(5), RoundId(1), TeamId(4)));
}

#[test]
fn test_window_blocks_days_inside_range() {
    let excluded = window(None, None);
    let tz = TimeZoneConverter::utc();
    for day in 10..=12 {
        assert!(excluded.blocks(&match_at(day), false, &tz), "day {day}");
        assert!(excluded.blocks(&match_at(day), true, &tz), "day {day}");
    }
    assert!(!excluded.blocks(&match_at(9), false, &tz));
    assert!(!excluded.blocks(&match_at(13), false, &tz));
}

#[test]
fn test_date_only_comparison_ignores_time_of_day() {
    let excluded = ExcludedDateWindow {
        date_from: at(6, 10, 12),
        date_to: at(6, 10, 14),
        ..window(None, None)
    };
    let tz = TimeZoneConverter::utc();
    let evening = match_at(10);
    assert!(!excluded.blocks(&evening, false, &tz));
    assert!(excluded.blocks(&evening, true, &tz));
}

#[test]
fn test_date_only_comparison_uses_local_days() {
    let excluded = ExcludedDateWindow {
        date_from: at(6, 10, 0),
        date_to: at(6, 10, 21),
        ..window(None, None)
    };
    let berlin = TimeZoneConverter::new("Europe/Berlin").unwrap();
    // 22:30 UTC on the 10th is already the 11th in Berlin
    let late = DateTimePeriod::new(
        at(6, 10, 22) + Duration::minutes(30),
        at(6, 11, 0) + Duration::minutes(30),
    );
    assert!(!excluded.blocks(&late, true, &berlin));
    assert!(excluded.blocks(&late, true, &TimeZoneConverter::utc()));
}
