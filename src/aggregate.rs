//! Aggregation engine
//!
//! Computes daily totals, category breakdowns, and the rolling 7-day series
//! from stored records. All operations are pure reads: calling them twice
//! with no intervening writes returns identical results.
//!
//! Every aggregation shares one time-bucketing primitive, [`day_window`],
//! which produces the half-open `[startOfDay, endOfDay)` range for a
//! calendar day in UTC (the deployment reference timezone).

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::error::CoreError;
use crate::store::WorkoutStore;
use crate::types::{
    CategoryCalories, DailySummary, DashboardSummary, DayTotal, PieChartSlice, TodayWorkouts,
    UserId, WeeklyCalories, WeeklySeries,
};

/// Number of days in the rolling weekly series, inclusive of the reference day.
pub const WEEKLY_SERIES_DAYS: i64 = 7;

/// Half-open `[startOfDay, endOfDay)` window for the calendar day containing
/// `date`, in UTC.
pub fn day_window(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.date_naive().and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Summed calories for the calendar day containing `date`. 0 when no records
/// fall in the window.
fn calories_for_day(
    store: &dyn WorkoutStore,
    user: &UserId,
    date: DateTime<Utc>,
) -> Result<f64, CoreError> {
    let (start, end) = day_window(date);
    let sums = store.sum_calories_by_day(user, start, end)?;
    Ok(sums.get(&date.date_naive()).copied().unwrap_or(0.0))
}

/// Daily summary for the calendar day containing `reference`.
///
/// The average is 0 when there are no workouts; a zero-match window is a
/// zero-valued summary, never an error.
pub fn compute_daily_summary(
    store: &dyn WorkoutStore,
    user: &UserId,
    reference: DateTime<Utc>,
) -> Result<DailySummary, CoreError> {
    let (start, end) = day_window(reference);

    let total_calories_burnt = calories_for_day(store, user, reference)?;
    let total_workouts = store.count_by_user_and_date_range(user, start, end)?;
    let avg_calories_burnt_per_workout = if total_workouts > 0 {
        total_calories_burnt / total_workouts as f64
    } else {
        0.0
    };

    // Sorted by label so breakdown indices are stable across identical reads
    let mut category_breakdown: Vec<CategoryCalories> = store
        .sum_calories_by_category(user, start, end)?
        .into_iter()
        .map(|(category, total_calories)| CategoryCalories {
            category,
            total_calories,
        })
        .collect();
    category_breakdown.sort_by(|a, b| a.category.cmp(&b.category));

    Ok(DailySummary {
        total_calories_burnt,
        total_workouts,
        avg_calories_burnt_per_workout,
        category_breakdown,
    })
}

/// Rolling 7-day calorie series ending on `reference`'s own day.
///
/// Exactly 7 entries, oldest first. Each day's window is computed
/// independently; a day with no rows sums to 0, and "no workouts that day"
/// is deliberately indistinguishable from "no data".
pub fn compute_weekly_series(
    store: &dyn WorkoutStore,
    user: &UserId,
    reference: DateTime<Utc>,
) -> Result<WeeklySeries, CoreError> {
    let mut days = Vec::with_capacity(WEEKLY_SERIES_DAYS as usize);

    for offset in (0..WEEKLY_SERIES_DAYS).rev() {
        let day = reference - Duration::days(offset);
        days.push(DayTotal {
            day_label: ordinal_label(day.day()),
            total_calories: calories_for_day(store, user, day)?,
        });
    }

    Ok(WeeklySeries { days })
}

/// All of a user's workouts for the calendar day containing `date` (now when
/// absent), plus their calorie sum.
pub fn find_workouts_for_date(
    store: &dyn WorkoutStore,
    user: &UserId,
    date: Option<DateTime<Utc>>,
) -> Result<TodayWorkouts, CoreError> {
    let (start, end) = day_window(date.unwrap_or_else(Utc::now));

    let todays_workouts = store.find_by_user_and_date_range(user, start, end)?;
    let total_calories_burnt = todays_workouts.iter().map(|w| w.calories_burned).sum();

    Ok(TodayWorkouts {
        todays_workouts,
        total_calories_burnt,
    })
}

/// Full dashboard payload: daily summary, weekly series in parallel-array
/// form, and pie chart slices with stable indices.
pub fn compute_dashboard(
    store: &dyn WorkoutStore,
    user: &UserId,
    reference: DateTime<Utc>,
) -> Result<DashboardSummary, CoreError> {
    let daily = compute_daily_summary(store, user, reference)?;
    let weekly = compute_weekly_series(store, user, reference)?;

    let pie_chart_data = daily
        .category_breakdown
        .iter()
        .enumerate()
        .map(|(id, entry)| PieChartSlice {
            id,
            value: entry.total_calories,
            label: entry.category.clone(),
        })
        .collect();

    Ok(DashboardSummary {
        total_calories_burnt: daily.total_calories_burnt,
        total_workouts: daily.total_workouts,
        avg_calories_burnt_per_workout: daily.avg_calories_burnt_per_workout,
        total_weeks_calories_burnt: WeeklyCalories::from(weekly),
        pie_chart_data,
    })
}

/// Ordinal day-of-month label: 1 -> "1st", 2 -> "2nd", 11 -> "11th", 21 -> "21st".
fn ordinal_label(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::NewWorkoutRecord;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn seed(store: &mut MemoryStore, category: &str, calories: f64, date: DateTime<Utc>) {
        store
            .create(NewWorkoutRecord {
                owner: UserId::new("u-1"),
                category: category.to_string(),
                name: "Exercise".to_string(),
                sets: 3,
                reps: 10,
                weight: 20.0,
                duration: calories / (20.0 * 5.0),
                calories_burned: calories,
                date,
            })
            .unwrap();
    }

    #[test]
    fn test_day_window_is_half_open_utc_day() {
        let (start, end) = day_window(at(2024, 1, 15, 17));
        assert_eq!(start, at(2024, 1, 15, 0));
        assert_eq!(end, at(2024, 1, 16, 0));
    }

    #[test]
    fn test_daily_summary() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8));
        seed(&mut store, "Legs", 500.0, at(2024, 1, 15, 18));
        seed(&mut store, "Chest", 400.0, at(2024, 1, 15, 12));
        // Previous day, outside the window
        seed(&mut store, "Back", 999.0, at(2024, 1, 14, 12));

        let summary = compute_daily_summary(&store, &user, at(2024, 1, 15, 10)).unwrap();
        assert_eq!(summary.total_calories_burnt, 2400.0);
        assert_eq!(summary.total_workouts, 3);
        assert_eq!(summary.avg_calories_burnt_per_workout, 800.0);
        assert_eq!(summary.category_breakdown.len(), 2);
        // Sorted by label: Chest before Legs
        assert_eq!(summary.category_breakdown[0].category, "Chest");
        assert_eq!(summary.category_breakdown[1].total_calories, 2000.0);
    }

    #[test]
    fn test_daily_summary_with_no_workouts_is_zero_valued() {
        let store = MemoryStore::new();
        let summary =
            compute_daily_summary(&store, &UserId::new("u-1"), at(2024, 1, 15, 10)).unwrap();

        assert_eq!(summary.total_calories_burnt, 0.0);
        assert_eq!(summary.total_workouts, 0);
        assert_eq!(summary.avg_calories_burnt_per_workout, 0.0);
        assert!(summary.category_breakdown.is_empty());
    }

    #[test]
    fn test_daily_summary_is_idempotent() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8));

        let first = compute_daily_summary(&store, &user, at(2024, 1, 15, 10)).unwrap();
        let second = compute_daily_summary(&store, &user, at(2024, 1, 15, 10)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_weekly_series_has_seven_entries_oldest_first() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8)); // reference day
        seed(&mut store, "Legs", 300.0, at(2024, 1, 9, 8)); // oldest day in range
        seed(&mut store, "Legs", 999.0, at(2024, 1, 8, 8)); // outside the window

        let series = compute_weekly_series(&store, &user, at(2024, 1, 15, 10)).unwrap();
        assert_eq!(series.days.len(), 7);
        assert_eq!(series.days[0].day_label, "9th");
        assert_eq!(series.days[0].total_calories, 300.0);
        assert_eq!(series.days[6].day_label, "15th");
        assert_eq!(series.days[6].total_calories, 1500.0);
        // Empty days resolve to zero, not errors
        assert_eq!(series.days[3].total_calories, 0.0);
    }

    #[test]
    fn test_weekly_series_last_entry_matches_daily_total() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8));
        seed(&mut store, "Chest", 250.0, at(2024, 1, 15, 19));

        let reference = at(2024, 1, 15, 10);
        let series = compute_weekly_series(&store, &user, reference).unwrap();
        let summary = compute_daily_summary(&store, &user, reference).unwrap();
        assert_eq!(
            series.days.last().unwrap().total_calories,
            summary.total_calories_burnt
        );
    }

    #[test]
    fn test_weekly_series_crosses_month_boundary() {
        let store = MemoryStore::new();
        let series =
            compute_weekly_series(&store, &UserId::new("u-1"), at(2024, 2, 2, 10)).unwrap();

        let labels: Vec<&str> = series.days.iter().map(|d| d.day_label.as_str()).collect();
        assert_eq!(labels, vec!["27th", "28th", "29th", "30th", "31st", "1st", "2nd"]);
    }

    #[test]
    fn test_find_workouts_for_date() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8));
        seed(&mut store, "Chest", 400.0, at(2024, 1, 15, 18));
        seed(&mut store, "Back", 999.0, at(2024, 1, 16, 1));

        let today = find_workouts_for_date(&store, &user, Some(at(2024, 1, 15, 12))).unwrap();
        assert_eq!(today.todays_workouts.len(), 2);
        assert_eq!(today.total_calories_burnt, 1900.0);
    }

    #[test]
    fn test_dashboard_pie_slice_ids_are_stable() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u-1");
        seed(&mut store, "Legs", 1500.0, at(2024, 1, 15, 8));
        seed(&mut store, "Chest", 400.0, at(2024, 1, 15, 12));

        let dashboard = compute_dashboard(&store, &user, at(2024, 1, 15, 10)).unwrap();
        assert_eq!(dashboard.pie_chart_data.len(), 2);
        assert_eq!(dashboard.pie_chart_data[0].id, 0);
        assert_eq!(dashboard.pie_chart_data[0].label, "Chest");
        assert_eq!(dashboard.pie_chart_data[1].id, 1);
        assert_eq!(dashboard.pie_chart_data[1].label, "Legs");
        assert_eq!(dashboard.total_weeks_calories_burnt.weeks.len(), 7);
    }

    #[test]
    fn test_ordinal_labels() {
        assert_eq!(ordinal_label(1), "1st");
        assert_eq!(ordinal_label(2), "2nd");
        assert_eq!(ordinal_label(3), "3rd");
        assert_eq!(ordinal_label(4), "4th");
        assert_eq!(ordinal_label(11), "11th");
        assert_eq!(ordinal_label(12), "12th");
        assert_eq!(ordinal_label(13), "13th");
        assert_eq!(ordinal_label(21), "21st");
        assert_eq!(ordinal_label(22), "22nd");
        assert_eq!(ordinal_label(31), "31st");
    }
}
