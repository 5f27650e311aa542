// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ConflictScope, ErrorKind, PlanningError, RepositoryError};
use rr_fixtures_domain::{DomainError, RoundId, TournamentId};

#[test]
fn test_domain_errors_split_into_configuration_and_infeasible() {
    let too_few = PlanningError::from(DomainError::TooFewParticipants {
        required: 2,
        actual: 1,
    });
    assert_eq!(too_few.kind(), ErrorKind::InvalidConfiguration);

    let zone = PlanningError::from(DomainError::InvalidTimezone(String::from("Mars/Base")));
    assert_eq!(zone.kind(), ErrorKind::InvalidConfiguration);

    let days = PlanningError::from(DomainError::InsufficientDays { groups: 3, days: 2 });
    assert_eq!(days.kind(), ErrorKind::SchedulingInfeasible);
}

#[test]
fn test_remaining_kinds() {
    let io = PlanningError::from(RepositoryError::Io(String::from("disk full")));
    assert_eq!(io.kind(), ErrorKind::Io);
    assert_eq!(PlanningError::RoundNotFound(RoundId(3)).kind(), ErrorKind::NotFound);
    assert_eq!(PlanningError::Cancelled.kind(), ErrorKind::Cancelled);
    assert_eq!(
        PlanningError::StateConflict {
            scope: ConflictScope::Round(RoundId(3)),
        }
        .kind(),
        ErrorKind::StateConflict
    );
}

#[test]
fn test_display_messages() {
    assert_eq!(
        PlanningError::RoundNotFound(RoundId(7)).to_string(),
        "Round 7 not found"
    );
    assert_eq!(
        PlanningError::StateConflict {
            scope: ConflictScope::Tournament(TournamentId(2)),
        }
        .to_string(),
        "Tournament 2 already has completed matches; refusing to regenerate fixtures"
    );
    assert_eq!(
        PlanningError::Cancelled.to_string(),
        "Planning was cancelled"
    );
    assert_eq!(
        PlanningError::from(RepositoryError::Serialization(String::from("bad json")))
            .to_string(),
        "Serialization error: bad json"
    );
}

#[test]
fn test_domain_message_is_passed_through() {
    let domain = DomainError::InsufficientDays { groups: 3, days: 2 };
    let planning = PlanningError::from(domain.clone());
    assert_eq!(planning.to_string(), domain.to_string());
}
