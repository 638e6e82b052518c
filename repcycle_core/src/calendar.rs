//! Calendar date mapping for date-scheduled cycles.
//!
//! Converts `(start date, number of weeks, selected weekdays)` into the
//! ordered list of concrete dates the schedule generator stamps onto
//! workouts. Weeks are calendar blocks running Sunday through Saturday.

use chrono::{Datelike, Days, NaiveDate};

/// Compute the ascending list of workout dates for a date-scheduled cycle.
///
/// Iterates `number_of_weeks` consecutive Sunday-anchored blocks starting
/// with the block that contains `start_date`. Within each block one date
/// is emitted per selected weekday (0 = Sunday .. 6 = Saturday) in
/// ascending weekday order. In the first block, dates before `start_date`
/// are dropped; later blocks emit every selected weekday.
///
/// An empty weekday selection yields an empty result, and a start date
/// falling after every selected weekday of its week yields nothing for
/// that entire first block.
pub fn dates_for(
    start_date: NaiveDate,
    number_of_weeks: u32,
    selected_weekdays: &[u8],
) -> Vec<NaiveDate> {
    let mut weekdays: Vec<u8> = selected_weekdays
        .iter()
        .copied()
        .filter(|d| *d <= 6)
        .collect();
    weekdays.sort_unstable();
    weekdays.dedup();

    if weekdays.is_empty() {
        return Vec::new();
    }

    // Sunday of the block containing the start date
    let first_sunday = start_date
        - Days::new(u64::from(start_date.weekday().num_days_from_sunday()));

    let mut dates = Vec::with_capacity(number_of_weeks as usize * weekdays.len());
    for week in 0..number_of_weeks {
        let block_sunday = first_sunday + Days::new(7 * u64::from(week));
        for &weekday in &weekdays {
            let date = block_sunday + Days::new(u64::from(weekday));
            if week == 0 && date < start_date {
                continue;
            }
            dates.push(date);
        }
    }

    dates
}
