//! Operations over the ordered streak collection.
//!
//! Every mutation locates one streak by id, computes its next state from
//! the current entry and replaces only that entry.

use crate::errors::StreakError;
use crate::models::{AppData, NewStreak, RepeatType, Streak, StreakEdit, StreakView};
use crate::schedule;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

impl AppData {
    /// Streaks in display order.
    pub fn sorted(&self) -> Vec<&Streak> {
        let mut streaks: Vec<&Streak> = self.streaks.iter().collect();
        streaks.sort_by_key(|streak| streak.order);
        streaks
    }

    pub fn get(&self, id: &str) -> Option<&Streak> {
        self.streaks.iter().find(|streak| streak.id == id)
    }

    pub fn views_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<StreakView> {
        self.sorted()
            .into_iter()
            .map(|streak| StreakView::at(streak, now))
            .collect()
    }

    pub fn create<Tz: TimeZone>(
        &mut self,
        request: NewStreak,
        now: &DateTime<Tz>,
    ) -> Result<Streak, StreakError> {
        let name = validate_name(&request.name)?;
        if let Some(day) = request.selected_days.iter().find(|day| **day > 6) {
            return Err(StreakError::Validation(format!(
                "selected day {day} is not a weekday index (0-6)"
            )));
        }
        if request.is_quantity_based && request.daily_goal.unwrap_or(0) == 0 {
            return Err(StreakError::Validation(
                "quantity-based streaks need a daily goal above zero".to_string(),
            ));
        }

        let selected_days: BTreeSet<u8> = if request.repeat_type == RepeatType::Week {
            request.selected_days.into_iter().collect()
        } else {
            BTreeSet::new()
        };
        let now = now.with_timezone(&Utc);
        let streak = Streak {
            id: Uuid::new_v4().to_string(),
            name,
            repeat_type: request.repeat_type,
            selected_days,
            count: 0,
            created_at: now,
            last_updated: now,
            is_quantity_based: request.is_quantity_based,
            daily_goal: request.daily_goal,
            unit: request.unit.and_then(non_empty),
            daily_progress: 0,
            order: self.streaks.len(),
        };
        self.streaks.push(streak.clone());
        Ok(streak)
    }

    /// Replaces the streak `id` with whatever `f` computes from its
    /// current state. Nothing changes when `f` fails.
    pub fn update<F>(&mut self, id: &str, f: F) -> Result<Streak, StreakError>
    where
        F: FnOnce(&Streak) -> Result<Streak, StreakError>,
    {
        let entry = self
            .streaks
            .iter_mut()
            .find(|streak| streak.id == id)
            .ok_or_else(|| StreakError::NotFound(id.to_string()))?;
        let next = f(entry)?;
        *entry = next.clone();
        Ok(next)
    }

    pub fn toggle<Tz: TimeZone>(
        &mut self,
        id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Streak, StreakError> {
        self.update(id, |streak| {
            if !schedule::is_clickable_today(streak, now) {
                return Err(StreakError::NotClickable(streak.id.clone()));
            }
            Ok(schedule::toggle(streak, now))
        })
    }

    pub fn reset<Tz: TimeZone>(
        &mut self,
        id: &str,
        now: &DateTime<Tz>,
    ) -> Result<Streak, StreakError> {
        self.update(id, |streak| Ok(schedule::reset(streak, now)))
    }

    /// Overwrites the edited fields directly. `last_updated` is untouched.
    pub fn edit(&mut self, id: &str, edit: StreakEdit) -> Result<Streak, StreakError> {
        self.update(id, move |streak| {
            let mut next = streak.clone();
            if let Some(name) = edit.name {
                next.name = validate_name(&name)?;
            }
            if let Some(count) = edit.count {
                next.count = count;
            }
            if let Some(goal) = edit.daily_goal {
                if next.is_quantity_based && goal == 0 {
                    return Err(StreakError::Validation(
                        "daily goal must be above zero".to_string(),
                    ));
                }
                next.daily_goal = Some(goal);
            }
            if let Some(progress) = edit.daily_progress {
                next.daily_progress = progress;
            }
            if let Some(unit) = edit.unit {
                next.unit = non_empty(unit);
            }
            Ok(next)
        })
    }

    pub fn remove(&mut self, id: &str) -> Result<Streak, StreakError> {
        let index = self
            .streaks
            .iter()
            .position(|streak| streak.id == id)
            .ok_or_else(|| StreakError::NotFound(id.to_string()))?;
        let removed = self.streaks.remove(index);
        self.compact_order();
        Ok(removed)
    }

    /// Assigns `order` by position in `ids`, which must name every streak
    /// exactly once.
    pub fn reorder(&mut self, ids: &[String]) -> Result<(), StreakError> {
        let positions: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(position, id)| (id.as_str(), position))
            .collect();
        if ids.len() != self.streaks.len() || positions.len() != ids.len() {
            return Err(StreakError::InvalidOrder);
        }

        let mut orders = Vec::with_capacity(self.streaks.len());
        for streak in &self.streaks {
            match positions.get(streak.id.as_str()) {
                Some(position) => orders.push(*position),
                None => return Err(StreakError::InvalidOrder),
            }
        }

        for (streak, order) in self.streaks.iter_mut().zip(orders) {
            streak.order = order;
        }
        self.streaks.sort_by_key(|streak| streak.order);
        Ok(())
    }

    /// Drops weekday indices outside 0..=6 from loaded records and returns
    /// the ids of the streaks that had any.
    pub fn drop_invalid_weekdays(&mut self) -> Vec<String> {
        let mut repaired = Vec::new();
        for streak in &mut self.streaks {
            let before = streak.selected_days.len();
            streak.selected_days.retain(|day| *day <= 6);
            if streak.selected_days.len() != before {
                repaired.push(streak.id.clone());
            }
        }
        repaired
    }

    fn compact_order(&mut self) {
        self.streaks.sort_by_key(|streak| streak.order);
        for (order, streak) in self.streaks.iter_mut().enumerate() {
            streak.order = order;
        }
    }
}

impl StreakView {
    pub fn at<Tz: TimeZone>(streak: &Streak, now: &DateTime<Tz>) -> Self {
        let progress = match (streak.is_quantity_based, streak.daily_goal) {
            (true, Some(goal)) if goal > 0 => {
                Some((f64::from(streak.daily_progress) / f64::from(goal)).min(1.0))
            }
            _ => None,
        };
        Self {
            completed_today: schedule::is_completed_today(streak, now),
            clickable_today: schedule::is_clickable_today(streak, now),
            progress,
            streak: streak.clone(),
        }
    }
}

fn validate_name(name: &str) -> Result<String, StreakError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StreakError::Validation("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
