use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::domain::model::{Coordinate, NextPrayer, Prayer, PrayerTimes, TimeLeft};

// 固定佔位時刻，不做天文計算
const FAJR_HOUR: u32 = 6;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Placeholder schedule. Date and location are accepted for API shape but do
/// not influence the result.
pub fn prayer_times(date: NaiveDate, coordinate: Coordinate) -> PrayerTimes {
    tracing::debug!("Generating placeholder prayer times for {} at {}", date, coordinate);

    PrayerTimes {
        fajr: hm(FAJR_HOUR, 0),
        sunrise: hm(FAJR_HOUR + 1, 30),
        dhuhr: hm(12, 30),
        asr: hm(15, 45),
        maghrib: hm(18, 15),
        isha: hm(19, 45),
    }
}

/// 12 小時制，例如 "6:00 AM"、"12:30 PM"
pub fn format_time(time: NaiveTime) -> String {
    let hour = time.hour();
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// First prayer strictly after `now` (minute resolution); Fajr tomorrow once
/// Isha has passed.
pub fn next_prayer(times: &PrayerTimes, now: NaiveTime) -> NextPrayer {
    let current = minutes_of_day(now);

    times
        .iter()
        .find_map(|(prayer, time)| {
            let at = minutes_of_day(time);
            (at > current).then(|| {
                let diff = at - current;
                NextPrayer {
                    prayer,
                    time: format_time(time),
                    time_left: TimeLeft::Today {
                        hours: diff / 60,
                        minutes: diff % 60,
                    },
                }
            })
        })
        .unwrap_or_else(|| NextPrayer {
            prayer: Prayer::Fajr,
            time: format_time(times.fajr),
            time_left: TimeLeft::Tomorrow,
        })
}
