// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use finboard::Error;
use finboard::goals::{self, GoalEstimate, GoalInput, GoalPatch, GoalTracker, RecommendationKind};
use finboard::models::{GoalStatus, Priority, Severity};
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-03-01T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn input(name: &str, target: i64, current: i64, deadline: Option<&str>) -> GoalInput {
    GoalInput {
        name: name.into(),
        target: Decimal::from(target),
        current: Some(Decimal::from(current)),
        deadline: deadline.map(d),
        ..Default::default()
    }
}

#[test]
fn create_applies_defaults() {
    let mut tracker = GoalTracker::new();
    let goal = tracker
        .create_goal(
            GoalInput {
                name: "  Emergency fund ".into(),
                target: Decimal::from(5000),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    assert_eq!(goal.name, "Emergency fund");
    assert_eq!(goal.current, Decimal::ZERO);
    assert_eq!(goal.r#type, goals::DEFAULT_GOAL_TYPE);
    assert_eq!(goal.priority, Priority::Medium);
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.created_at, now());
    assert_eq!(tracker.goals().len(), 1);
}

#[test]
fn create_rejects_bad_input_without_mutating() {
    let mut tracker = GoalTracker::new();
    let err = tracker.create_goal(input(" ", 100, 0, None), now()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = tracker.create_goal(input("Car", 0, 0, None), now()).unwrap_err();
    assert!(matches!(err, Error::InvalidAmount(_)));
    let err = tracker.create_goal(input("Car", 100, -1, None), now()).unwrap_err();
    assert!(matches!(err, Error::InvalidAmount(_)));
    assert!(tracker.goals().is_empty());
}

#[test]
fn ids_are_unique_within_one_instant() {
    let mut tracker = GoalTracker::new();
    let a = tracker.create_goal(input("A", 100, 0, None), now()).unwrap();
    let b = tracker.create_goal(input("B", 100, 0, None), now()).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn contribution_completes_once() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("Bike", 1000, 0, None), now()).unwrap();
    let later = now() + Duration::hours(36);

    let change = tracker
        .add_contribution(&goal.id, Decimal::from(1000), later)
        .unwrap();
    assert_eq!(change.goal.status, GoalStatus::Completed);
    let done = change.completed.expect("completion event");
    assert_eq!(done.achievement.goal_id, goal.id);
    assert_eq!(done.achievement.completion_time_days, 2);
    assert_eq!(tracker.achievements().len(), 1);

    let change = tracker
        .add_contribution(&goal.id, Decimal::from(50), later)
        .unwrap();
    assert_eq!(change.goal.current, Decimal::from(1050));
    assert_eq!(change.goal.status, GoalStatus::Completed);
    assert!(change.completed.is_none());
    assert_eq!(tracker.achievements().len(), 1);
}

#[test]
fn contribution_errors() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("Bike", 1000, 0, None), now()).unwrap();
    assert!(matches!(
        tracker.add_contribution("missing", Decimal::ONE, now()),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        tracker.add_contribution(&goal.id, Decimal::ZERO, now()),
        Err(Error::InvalidAmount(_))
    ));
    assert_eq!(tracker.get(&goal.id).unwrap().current, Decimal::ZERO);
}

#[test]
fn past_deadline_fails_and_stays_failed() {
    let mut tracker = GoalTracker::new();
    let goal = tracker
        .create_goal(input("Trip", 1000, 0, Some("2024-03-11")), now())
        .unwrap();
    let after = d("2024-03-12").and_hms_opt(9, 0, 0).unwrap();

    let change = tracker
        .add_contribution(&goal.id, Decimal::from(100), after)
        .unwrap();
    assert_eq!(change.goal.status, GoalStatus::Failed);

    let change = tracker
        .add_contribution(&goal.id, Decimal::from(2000), after)
        .unwrap();
    assert_eq!(change.goal.current, Decimal::from(2100));
    assert_eq!(change.goal.status, GoalStatus::Failed);
    assert!(change.completed.is_none());
    assert!(tracker.achievements().is_empty());
}

#[test]
fn refresh_statuses_reports_only_changes() {
    let mut tracker = GoalTracker::new();
    tracker
        .create_goal(input("Late", 1000, 0, Some("2024-03-05")), now())
        .unwrap();
    tracker
        .create_goal(input("Done", 100, 100, None), now())
        .unwrap();
    tracker
        .create_goal(input("Open", 100, 10, None), now())
        .unwrap();

    let changes = tracker.refresh_statuses(now() + Duration::days(10));
    assert_eq!(changes.len(), 2);
    assert_eq!(tracker.by_status(GoalStatus::Failed).len(), 1);
    assert_eq!(tracker.by_status(GoalStatus::Completed).len(), 1);
    assert_eq!(tracker.achievements().len(), 1);
    assert!(tracker.refresh_statuses(now() + Duration::days(11)).is_empty());
}

#[test]
fn update_validates_before_merging() {
    let mut tracker = GoalTracker::new();
    let goal = tracker
        .create_goal(input("House", 1000, 100, Some("2024-12-01")), now())
        .unwrap();

    let bad = GoalPatch {
        name: Some("Flat".into()),
        target: Some(Decimal::ZERO),
        ..Default::default()
    };
    assert!(matches!(
        tracker.update_goal(&goal.id, bad, now()),
        Err(Error::InvalidAmount(_))
    ));
    assert_eq!(tracker.get(&goal.id).unwrap().name, "House");

    assert!(matches!(
        tracker.update_goal("nope", GoalPatch::default(), now()),
        Err(Error::NotFound(_))
    ));

    let later = now() + Duration::days(1);
    let change = tracker
        .update_goal(
            &goal.id,
            GoalPatch {
                deadline: Some(None),
                priority: Some(Priority::High),
                ..Default::default()
            },
            later,
        )
        .unwrap();
    assert_eq!(change.goal.deadline, None);
    assert_eq!(change.goal.priority, Priority::High);
    assert_eq!(change.goal.updated_at, later);
    assert_eq!(change.goal.created_at, now());
}

#[test]
fn update_can_complete_goal() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("TV", 1000, 900, None), now()).unwrap();
    let change = tracker
        .update_goal(
            &goal.id,
            GoalPatch {
                target: Some(Decimal::from(800)),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    assert_eq!(change.goal.status, GoalStatus::Completed);
    assert!(change.completed.is_some());
    assert_eq!(tracker.achievements().len(), 1);
}

#[test]
fn delete_unknown_goal_is_not_found() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("A", 100, 0, None), now()).unwrap();
    assert!(matches!(tracker.delete_goal("x"), Err(Error::NotFound(_))));
    assert_eq!(tracker.delete_goal(&goal.id).unwrap().name, "A");
    assert!(tracker.goals().is_empty());
}

#[test]
fn progress_is_clamped() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("A", 200, 50, None), now()).unwrap();
    assert_eq!(goals::progress(&goal), Decimal::from(25));
    let over = tracker.create_goal(input("B", 100, 250, None), now()).unwrap();
    assert_eq!(goals::progress(&over), Decimal::ONE_HUNDRED);
}

#[test]
fn contribution_that_overflows_is_rejected_without_mutating() {
    let mut tracker = GoalTracker::new();
    let near_max = Decimal::MAX - Decimal::ONE;
    let goal = tracker
        .create_goal(
            GoalInput {
                name: "Moonshot".into(),
                target: Decimal::MAX,
                current: Some(near_max),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    let later = now() + Duration::days(1);
    let err = tracker
        .add_contribution(&goal.id, Decimal::from(10), later)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAmount(_)));
    let kept = tracker.get(&goal.id).unwrap();
    assert_eq!(kept.current, near_max);
    assert_eq!(kept.updated_at, now());
    assert_eq!(kept.status, GoalStatus::Active);
    assert!(tracker.achievements().is_empty());
}

#[test]
fn extreme_ratios_saturate_instead_of_panicking() {
    let mut tracker = GoalTracker::new();
    let tiny = tracker
        .create_goal(
            GoalInput {
                name: "Tiny".into(),
                target: Decimal::new(1, 28),
                current: Some(Decimal::from(1_000_000)),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    assert_eq!(goals::progress(&tiny), Decimal::ONE_HUNDRED);
    assert_eq!(tracker.overall_progress(), Decimal::MAX);

    let huge = tracker
        .create_goal(
            GoalInput {
                name: "Huge".into(),
                target: Decimal::MAX,
                deadline: Some(d("2024-03-02")),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    assert_eq!(goals::monthly_needed(&huge, now()), Some(Decimal::MAX));
    tracker.create_goal(input("Another", 1, 0, None), now()).unwrap();
    assert_eq!(tracker.total_target_value(), Decimal::MAX);
}

#[test]
fn monthly_needed_paces_by_days() {
    let mut tracker = GoalTracker::new();
    let goal = tracker
        .create_goal(input("Phone", 1000, 400, Some("2024-03-11")), now())
        .unwrap();
    let needed = goals::monthly_needed(&goal, now()).unwrap();
    assert_eq!(needed.round_dp(2), Decimal::new(18264, 1));

    let due = d("2024-03-11").and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(goals::monthly_needed(&goal, due), Some(Decimal::ZERO));

    let open = tracker.create_goal(input("Open", 100, 0, None), now()).unwrap();
    assert_eq!(goals::monthly_needed(&open, now()), None);
}

#[test]
fn estimate_uses_calendar_months() {
    let mut tracker = GoalTracker::new();
    let goal = tracker
        .create_goal(input("Course", 900, 0, Some("2024-06-01")), now())
        .unwrap();
    assert_eq!(
        goals::estimate(&goal, now()),
        GoalEstimate::PerMonth(Decimal::from(300))
    );
    let same_month = tracker
        .create_goal(input("Soon", 900, 0, Some("2024-03-30")), now())
        .unwrap();
    assert_eq!(goals::estimate(&same_month, now()), GoalEstimate::Overdue);
    let open = tracker.create_goal(input("Open", 1, 0, None), now()).unwrap();
    assert_eq!(goals::estimate(&open, now()), GoalEstimate::NoDeadline);
}

#[test]
fn recommendations_come_in_fixed_order() {
    let mut tracker = GoalTracker::new();
    tracker.create_goal(input("No deadline", 1000, 0, None), now()).unwrap();
    tracker
        .create_goal(input("Overdue", 1000, 100, Some("2024-02-20")), now())
        .unwrap();
    tracker
        .create_goal(input("Soon", 1000, 100, Some("2024-03-21")), now())
        .unwrap();
    tracker
        .create_goal(input("Far", 1000, 100, Some("2025-03-01")), now())
        .unwrap();

    let recs = tracker.recommendations(now());
    let got: Vec<(RecommendationKind, Severity, usize)> =
        recs.iter().map(|r| (r.kind, r.severity, r.count)).collect();
    assert_eq!(
        got,
        [
            (RecommendationKind::MissingDeadline, Severity::Warning, 1),
            (RecommendationKind::Overdue, Severity::Danger, 1),
            (RecommendationKind::DueSoon, Severity::Info, 1),
            (RecommendationKind::LowProgress, Severity::Warning, 2),
        ]
    );
}

#[test]
fn low_progress_skips_goals_due_today() {
    let mut tracker = GoalTracker::new();
    tracker
        .create_goal(input("Today", 1000, 100, Some("2024-03-01")), now())
        .unwrap();
    let today = tracker.recommendations(now());
    assert!(today.is_empty(), "{:?}", today);

    tracker
        .create_goal(input("Next week", 1000, 100, Some("2024-03-08")), now())
        .unwrap();
    let low: Vec<usize> = tracker
        .recommendations(now())
        .iter()
        .filter(|r| r.kind == RecommendationKind::LowProgress)
        .map(|r| r.count)
        .collect();
    assert_eq!(low, [1]);
}

#[test]
fn recommendations_skip_finished_goals() {
    let mut tracker = GoalTracker::new();
    let goal = tracker.create_goal(input("A", 100, 0, None), now()).unwrap();
    tracker
        .add_contribution(&goal.id, Decimal::from(100), now())
        .unwrap();
    assert!(tracker.recommendations(now()).is_empty());
}

#[test]
fn collection_queries() {
    let mut tracker = GoalTracker::new();
    let a = tracker
        .create_goal(
            GoalInput {
                name: "Car".into(),
                r#type: Some("purchase".into()),
                target: Decimal::from(300),
                current: Some(Decimal::from(300)),
                priority: Some(Priority::High),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
    tracker
        .create_goal(input("Trip", 100, 0, Some("2024-03-20")), now())
        .unwrap();
    tracker
        .create_goal(input("Old", 100, 0, Some("2024-02-01")), now())
        .unwrap();
    tracker.refresh_statuses(now());

    assert_eq!(tracker.by_type("purchase")[0].id, a.id);
    assert_eq!(tracker.by_priority(Priority::High).len(), 1);
    assert_eq!(tracker.upcoming(30, now()).len(), 1);
    assert!(tracker.overdue(now()).is_empty());
    assert_eq!(tracker.total_target_value(), Decimal::from(500));
    assert_eq!(tracker.completed_target_value(), Decimal::from(300));
    assert_eq!(tracker.overall_progress(), Decimal::from(60));
    assert_eq!(tracker.average_active_progress(), Some(Decimal::ZERO));
}
