use crate::models::{AppData, LongestStreak, ScheduledDay, SummaryResponse};
use crate::schedule::{is_clickable_today, is_completed_today, is_scheduled_on, week_start};
use chrono::{DateTime, Duration, Local, TimeZone};

pub fn build_summary(data: &AppData) -> SummaryResponse {
    build_summary_at(&Local::now(), data)
}

pub fn build_summary_at<Tz: TimeZone>(now: &DateTime<Tz>, data: &AppData) -> SummaryResponse {
    let today = now.date_naive();
    let streaks = data.sorted();

    let mut clickable_today = 0;
    let mut completed_today = 0;
    let mut remaining_today = 0;
    let mut total_count = 0u64;
    for streak in &streaks {
        let clickable = is_clickable_today(streak, now);
        let completed = is_completed_today(streak, now);
        clickable_today += usize::from(clickable);
        completed_today += usize::from(completed);
        remaining_today += usize::from(clickable && !completed);
        total_count = total_count.saturating_add(u64::from(streak.count));
    }

    // max_by_key keeps the last maximum; reversing makes display order win ties.
    let longest = streaks
        .iter()
        .rev()
        .filter(|streak| streak.count > 0)
        .max_by_key(|streak| streak.count)
        .map(|streak| LongestStreak {
            id: streak.id.clone(),
            name: streak.name.clone(),
            count: streak.count,
        });

    let start = week_start(today);
    let this_week = (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            ScheduledDay {
                date: date.to_string(),
                weekday: date.format("%a").to_string(),
                scheduled: streaks
                    .iter()
                    .filter(|streak| is_scheduled_on(streak, date))
                    .count(),
            }
        })
        .collect();

    SummaryResponse {
        date: today.to_string(),
        total: streaks.len(),
        clickable_today,
        completed_today,
        remaining_today,
        total_count,
        longest,
        this_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewStreak, RepeatType};
    use crate::schedule::tests::at;

    fn add(data: &mut AppData, name: &str, repeat_type: RepeatType, days: &[u8]) -> String {
        data.create(
            NewStreak {
                name: name.to_string(),
                repeat_type,
                selected_days: days.to_vec(),
                ..NewStreak::default()
            },
            &at(2023, 12, 1, 9, 0),
        )
        .unwrap()
        .id
    }

    #[test]
    fn summary_counts_today_states() {
        let mut data = AppData::default();
        let read = add(&mut data, "Read", RepeatType::Day, &[]);
        add(&mut data, "Gym", RepeatType::Week, &[1, 3, 5]);
        let budget = add(&mut data, "Budget", RepeatType::Month, &[]);

        // 2024-01-02 is a Tuesday: the gym streak is off.
        let now = at(2024, 1, 2, 12, 0);
        data.toggle(&read, &now).unwrap();
        data.toggle(&budget, &at(2024, 1, 1, 8, 0)).unwrap();
        data.edit(
            &budget,
            crate::models::StreakEdit {
                count: Some(4),
                ..Default::default()
            },
        )
        .unwrap();

        let summary = build_summary_at(&now, &data);
        assert_eq!(summary.date, "2024-01-02");
        assert_eq!(summary.total, 3);
        assert_eq!(summary.clickable_today, 2);
        assert_eq!(summary.completed_today, 2);
        assert_eq!(summary.remaining_today, 0);
        assert_eq!(summary.total_count, 5);
        let longest = summary.longest.expect("longest streak");
        assert_eq!(longest.name, "Budget");
        assert_eq!(longest.count, 4);
    }

    #[test]
    fn summary_week_lists_scheduled_streaks_per_day() {
        let mut data = AppData::default();
        add(&mut data, "Read", RepeatType::Day, &[]);
        add(&mut data, "Gym", RepeatType::Week, &[1, 3, 5]);

        let summary = build_summary_at(&at(2024, 1, 4, 12, 0), &data);
        assert_eq!(summary.this_week.len(), 7);
        assert_eq!(summary.this_week[0].date, "2024-01-01");
        assert_eq!(summary.this_week[0].weekday, "Mon");
        let scheduled: Vec<usize> = summary.this_week.iter().map(|day| day.scheduled).collect();
        assert_eq!(scheduled, vec![2, 1, 2, 1, 2, 1, 1]);
    }

    #[test]
    fn empty_collection_has_no_longest() {
        let summary = build_summary_at(&at(2024, 1, 4, 12, 0), &AppData::default());
        assert_eq!(summary.total, 0);
        assert!(summary.longest.is_none());
    }
}
