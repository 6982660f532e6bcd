// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings goal tracking.
//!
//! A goal starts `active` and moves to `completed` once `current >= target`,
//! or to `failed` once its deadline passes short of the target. Both end
//! states are final. Mutating calls return the changed record together with
//! an optional [`GoalCompleted`] so the caller decides how to persist it.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate;
use crate::error::{Error, Result};
use crate::models::{Achievement, Goal, GoalStatus, Priority, Severity};
use crate::time;

/// Average month length used to turn days into months for pacing.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(3044, 0, 0, false, 2);
pub const DEFAULT_GOAL_TYPE: &str = "savings";
pub const UPCOMING_WINDOW_DAYS: i64 = 30;
pub const LOW_PROGRESS_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
pub const LOW_PROGRESS_WINDOW_DAYS: i64 = 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalInput {
    pub name: String,
    pub r#type: Option<String>,
    pub target: Decimal,
    pub current: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

/// Fields to change on an existing goal. `None` leaves a field alone; the
/// nested options on `deadline`/`category` clear the value with `Some(None)`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub target: Option<Decimal>,
    pub current: Option<Decimal>,
    pub deadline: Option<Option<NaiveDate>>,
    pub category: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalCompleted {
    pub goal: Goal,
    pub achievement: Achievement,
}

/// Result of a mutating goal operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalChange {
    pub goal: Goal,
    pub completed: Option<GoalCompleted>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    MissingDeadline,
    Overdue,
    DueSoon,
    LowProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub severity: Severity,
    pub count: usize,
    pub message: String,
}

/// Calendar-month pacing shown next to a goal in reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum GoalEstimate {
    NoDeadline,
    Overdue,
    PerMonth(Decimal),
}

/// Percentage of the target saved, clamped to `0..=100`.
pub fn progress(goal: &Goal) -> Decimal {
    if goal.target.is_zero() {
        return Decimal::ZERO;
    }
    aggregate::scaled_ratio(goal.current, goal.target)
        .unwrap_or_else(|| aggregate::saturated(goal.current, goal.target))
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

pub fn days_remaining(goal: &Goal, now: NaiveDateTime) -> Option<i64> {
    time::days_remaining(goal.deadline, now)
}

/// Amount to set aside each month to hit the target by the deadline.
pub fn monthly_needed(goal: &Goal, now: NaiveDateTime) -> Option<Decimal> {
    let days = days_remaining(goal, now)?;
    if days <= 0 {
        return Some(Decimal::ZERO);
    }
    let months = Decimal::from(days) / DAYS_PER_MONTH;
    let remaining = goal.target.saturating_sub(goal.current);
    Some(
        remaining
            .checked_div(months)
            .unwrap_or_else(|| aggregate::saturated(remaining, months)),
    )
}

pub fn estimate(goal: &Goal, now: NaiveDateTime) -> GoalEstimate {
    let Some(deadline) = goal.deadline else {
        return GoalEstimate::NoDeadline;
    };
    let months = time::month_diff(now.date(), deadline);
    if months <= 0 {
        return GoalEstimate::Overdue;
    }
    let remaining = goal.target.saturating_sub(goal.current);
    GoalEstimate::PerMonth(remaining / Decimal::from(months))
}

pub fn is_overdue(goal: &Goal, now: NaiveDateTime) -> bool {
    goal.status == GoalStatus::Active && goal.deadline.is_some_and(|d| time::is_past(d, now))
}

pub fn is_upcoming(goal: &Goal, now: NaiveDateTime, days: i64) -> bool {
    goal.status == GoalStatus::Active
        && goal.deadline.is_some_and(|d| time::due_within(d, now, days))
}

/// Mean progress of the active goals, `None` when there are none.
pub fn average_active_progress(goals: &[Goal]) -> Option<Decimal> {
    let active: Vec<&Goal> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .collect();
    if active.is_empty() {
        return None;
    }
    let total: Decimal = active.iter().map(|g| progress(g)).sum();
    Some(total / Decimal::from(active.len()))
}

/// Aggregate advisories over the active goals, in fixed order.
pub fn recommendations(goals: &[Goal], now: NaiveDateTime) -> Vec<Recommendation> {
    let active: Vec<&Goal> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .collect();
    let mut out = Vec::new();

    let without_deadline = active.iter().filter(|g| g.deadline.is_none()).count();
    if without_deadline > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::MissingDeadline,
            severity: Severity::Warning,
            count: without_deadline,
            message: format!(
                "{} goal(s) without a deadline. Setting a deadline helps you stay focused.",
                without_deadline
            ),
        });
    }

    let overdue = active.iter().filter(|g| is_overdue(g, now)).count();
    if overdue > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::Overdue,
            severity: Severity::Danger,
            count: overdue,
            message: format!(
                "{} goal(s) overdue. Consider moving the deadline or increasing contributions.",
                overdue
            ),
        });
    }

    let due_soon = active
        .iter()
        .filter(|g| is_upcoming(g, now, UPCOMING_WINDOW_DAYS))
        .count();
    if due_soon > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::DueSoon,
            severity: Severity::Info,
            count: due_soon,
            message: format!(
                "{} goal(s) due in the next {} days. Check your progress.",
                due_soon, UPCOMING_WINDOW_DAYS
            ),
        });
    }

    let low_progress = active
        .iter()
        .filter(|g| {
            progress(g) < LOW_PROGRESS_PERCENT
                && days_remaining(g, now)
                    .is_some_and(|d| d != 0 && d < LOW_PROGRESS_WINDOW_DAYS)
        })
        .count();
    if low_progress > 0 {
        out.push(Recommendation {
            kind: RecommendationKind::LowProgress,
            severity: Severity::Warning,
            count: low_progress,
            message: format!(
                "{} goal(s) below {}% progress with less than {} days left.",
                low_progress, LOW_PROGRESS_PERCENT, LOW_PROGRESS_WINDOW_DAYS
            ),
        });
    }

    out
}

/// Owns the goal collection and the achievement log.
#[derive(Debug, Clone, Default)]
pub struct GoalTracker {
    goals: Vec<Goal>,
    achievements: Vec<Achievement>,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(goals: Vec<Goal>, achievements: Vec<Achievement>) -> Self {
        Self {
            goals,
            achievements,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn create_goal(&mut self, input: GoalInput, now: NaiveDateTime) -> Result<Goal> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Goal name is required".into()));
        }
        if input.target <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "Goal target must be positive, got {}",
                input.target
            )));
        }
        let current = input.current.unwrap_or(Decimal::ZERO);
        if current < Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "Goal current amount cannot be negative, got {}",
                current
            )));
        }

        let goal = Goal {
            id: self.next_id(now),
            name: name.to_string(),
            r#type: input
                .r#type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GOAL_TYPE.to_string()),
            target: input.target,
            current,
            deadline: input.deadline,
            category: input.category,
            priority: input.priority.unwrap_or_default(),
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
            notes: input.notes.unwrap_or_default(),
        };
        info!(goal_id = %goal.id, name = %goal.name, target = %goal.target, "Goal created");
        self.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn update_goal(
        &mut self,
        id: &str,
        patch: GoalPatch,
        now: NaiveDateTime,
    ) -> Result<GoalChange> {
        let idx = self.index_of(id)?;
        if let Some(target) = patch.target {
            if target <= Decimal::ZERO {
                return Err(Error::InvalidAmount(format!(
                    "Goal target must be positive, got {}",
                    target
                )));
            }
        }
        if let Some(current) = patch.current {
            if current < Decimal::ZERO {
                return Err(Error::InvalidAmount(format!(
                    "Goal current amount cannot be negative, got {}",
                    current
                )));
            }
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput("Goal name cannot be empty".into()));
            }
        }

        let goal = &mut self.goals[idx];
        if let Some(name) = patch.name {
            goal.name = name.trim().to_string();
        }
        if let Some(kind) = patch.r#type {
            goal.r#type = kind;
        }
        if let Some(target) = patch.target {
            goal.target = target;
        }
        if let Some(current) = patch.current {
            goal.current = current;
        }
        if let Some(deadline) = patch.deadline {
            goal.deadline = deadline;
        }
        if let Some(category) = patch.category {
            goal.category = category;
        }
        if let Some(priority) = patch.priority {
            goal.priority = priority;
        }
        if let Some(notes) = patch.notes {
            goal.notes = notes;
        }
        goal.updated_at = now;
        debug!(goal_id = %id, "Goal updated");

        Ok(self.settle(idx, now))
    }

    /// Removes a goal; unknown ids are reported as `NotFound`.
    pub fn delete_goal(&mut self, id: &str) -> Result<Goal> {
        let idx = self.index_of(id)?;
        let goal = self.goals.remove(idx);
        info!(goal_id = %id, "Goal deleted");
        Ok(goal)
    }

    pub fn add_contribution(
        &mut self,
        id: &str,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> Result<GoalChange> {
        let idx = self.index_of(id)?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "Contribution must be positive, got {}",
                amount
            )));
        }
        let goal = &mut self.goals[idx];
        let Some(current) = goal.current.checked_add(amount) else {
            return Err(Error::InvalidAmount(format!(
                "Contribution of {} overflows the saved amount of goal '{}'",
                amount, id
            )));
        };
        goal.current = current;
        goal.updated_at = now;
        debug!(goal_id = %id, amount = %amount, current = %goal.current, "Contribution added");

        Ok(self.settle(idx, now))
    }

    /// Re-evaluates every goal, e.g. after loading from storage.
    pub fn refresh_statuses(&mut self, now: NaiveDateTime) -> Vec<GoalChange> {
        (0..self.goals.len())
            .filter_map(|idx| {
                let before = self.goals[idx].status;
                let change = self.settle(idx, now);
                (change.goal.status != before).then_some(change)
            })
            .collect()
    }

    pub fn by_status(&self, status: GoalStatus) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.status == status).collect()
    }

    pub fn by_type(&self, kind: &str) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.r#type == kind).collect()
    }

    pub fn by_priority(&self, priority: Priority) -> Vec<&Goal> {
        self.goals.iter().filter(|g| g.priority == priority).collect()
    }

    pub fn upcoming(&self, days: i64, now: NaiveDateTime) -> Vec<&Goal> {
        self.goals
            .iter()
            .filter(|g| is_upcoming(g, now, days))
            .collect()
    }

    pub fn overdue(&self, now: NaiveDateTime) -> Vec<&Goal> {
        self.goals.iter().filter(|g| is_overdue(g, now)).collect()
    }

    pub fn total_target_value(&self) -> Decimal {
        self.goals
            .iter()
            .map(|g| g.target)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn completed_target_value(&self) -> Decimal {
        self.goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .map(|g| g.target)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of `current` over sum of `target`, as a percentage. Not clamped.
    pub fn overall_progress(&self) -> Decimal {
        let total = self.total_target_value();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        let current = self
            .goals
            .iter()
            .map(|g| g.current)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        aggregate::scaled_ratio(current, total)
            .unwrap_or_else(|| aggregate::saturated(current, total))
    }

    pub fn average_active_progress(&self) -> Option<Decimal> {
        average_active_progress(&self.goals)
    }

    pub fn recommendations(&self, now: NaiveDateTime) -> Vec<Recommendation> {
        recommendations(&self.goals, now)
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::NotFound(format!("Goal '{}'", id)))
    }

    fn next_id(&self, now: NaiveDateTime) -> String {
        let mut stamp = now.and_utc().timestamp_millis();
        while self.goals.iter().any(|g| g.id == stamp.to_string()) {
            stamp += 1;
        }
        stamp.to_string()
    }

    /// Applies the status rules to one goal; records an achievement when it
    /// completes on this call.
    fn settle(&mut self, idx: usize, now: NaiveDateTime) -> GoalChange {
        let goal = &mut self.goals[idx];
        if goal.status.is_terminal() {
            return GoalChange {
                goal: goal.clone(),
                completed: None,
            };
        }

        if goal.current >= goal.target {
            goal.status = GoalStatus::Completed;
            let achievement = Achievement {
                goal_id: goal.id.clone(),
                goal_name: goal.name.clone(),
                target: goal.target,
                completed_at: now,
                completion_time_days: completion_days(goal.created_at, now),
            };
            info!(goal_id = %goal.id, name = %goal.name, "Goal completed");
            let goal = goal.clone();
            self.achievements.push(achievement.clone());
            return GoalChange {
                goal: goal.clone(),
                completed: Some(GoalCompleted { goal, achievement }),
            };
        }

        if goal.deadline.is_some_and(|d| time::is_past(d, now)) {
            goal.status = GoalStatus::Failed;
            info!(goal_id = %goal.id, name = %goal.name, "Goal failed past its deadline");
        }
        GoalChange {
            goal: goal.clone(),
            completed: None,
        }
    }
}

fn completion_days(created_at: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let secs = (now - created_at).num_seconds();
    (secs + 86_399).div_euclid(86_400)
}
