//! Time, ritual, and weather modifiers for the density model.
//!
//! All hour sets and multipliers mirror the observed behavior of the sites:
//! crowding swells around the five daily prayers, the stoning ritual has its
//! own peak windows at the Jamaraat complex, and Arafat fills only on the
//! main ritual day.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use pilgrim_nav_crowd_models::Weather;

/// Multiplier during late-night hours (22:00-03:59).
pub const NIGHT: f64 = 0.7;
/// Multiplier during early morning (04:00-05:59).
pub const EARLY_MORNING: f64 = 0.8;
/// Multiplier during prayer hours.
pub const DURING_PRAYER: f64 = 2.5;
/// Multiplier in the dispersal hour after prayers.
pub const AFTER_PRAYER: f64 = 1.8;
/// Multiplier in the hour leading into prayers.
pub const BEFORE_PRAYER: f64 = 2.0;
/// Multiplier at the Jamaraat complex during stoning windows.
pub const JAMARAT: f64 = 3.0;
/// Multiplier at Masjid al-Haram during peak tawaf hours.
pub const TAWAF: f64 = 2.5;
/// Multiplier at Arafat on the main ritual day.
pub const RITUAL_DAY: f64 = 3.0;

/// Hours of the five daily prayers.
pub const PRAYER_HOURS: [u32; 5] = [5, 12, 15, 18, 20];
/// Dispersal hours following prayers.
pub const AFTER_PRAYER_HOURS: [u32; 5] = [6, 13, 16, 19, 21];
/// Hours leading into prayers.
pub const BEFORE_PRAYER_HOURS: [u32; 5] = [4, 11, 14, 17, 19];
/// Peak stoning windows at the Jamaraat complex.
pub const JAMARAT_HOURS: [u32; 7] = [6, 7, 8, 13, 14, 15, 16];
/// Peak tawaf hours at Masjid al-Haram.
pub const TAWAF_HOURS: [u32; 6] = [5, 6, 7, 21, 22, 23];

/// Generic hour-of-day modifier.
///
/// Regimes are checked in a fixed order (night, early morning, during,
/// after, before prayer); the first match wins, so overlapping hour sets
/// resolve the same way on every evaluation.
#[must_use]
pub fn time_modifier(hour: u32) -> f64 {
    if hour >= 22 || hour < 4 {
        NIGHT
    } else if hour < 6 {
        EARLY_MORNING
    } else if PRAYER_HOURS.contains(&hour) {
        DURING_PRAYER
    } else if AFTER_PRAYER_HOURS.contains(&hour) {
        AFTER_PRAYER
    } else if BEFORE_PRAYER_HOURS.contains(&hour) {
        BEFORE_PRAYER
    } else {
        1.0
    }
}

/// Site-specific override of the generic time modifier.
///
/// The Jamaraat complex and Masjid al-Haram have their own peak windows;
/// Arafat swells on the main ritual day regardless of hour.
#[must_use]
pub fn site_time_modifier(site: &str, hour: u32, ritual_day: bool, generic: f64) -> f64 {
    match site {
        "Jamaraat Bridge" if JAMARAT_HOURS.contains(&hour) => JAMARAT,
        "Masjid al-Haram" if TAWAF_HOURS.contains(&hour) => TAWAF,
        "Arafat" if ritual_day => RITUAL_DAY,
        _ => generic,
    }
}

/// Whether `now` counts as the main ritual day.
///
/// Demo rule: Fridays, plus any minute divisible by 3 so the behavior is
/// observable without waiting a week. A production deployment replaces this
/// with a real calendar signal.
#[must_use]
pub fn ritual_day(now: DateTime<Utc>) -> bool {
    now.weekday() == Weekday::Fri || now.minute() % 3 == 0
}

/// Weather modifier; an observed reading overrides the time-of-day proxy.
///
/// The proxy treats midday (11:00-15:59) as hot and late afternoon
/// (16:00-18:59) as pleasant, which tracks typical conditions in Mecca.
#[must_use]
pub fn weather_modifier(observed: Option<Weather>, hour: u32) -> f64 {
    if let Some(weather) = observed {
        return weather.density_modifier();
    }
    match hour {
        11..=15 => Weather::Hot.density_modifier(),
        16..=18 => Weather::Pleasant.density_modifier(),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn night_hours_reduce_density() {
        assert!((time_modifier(23) - NIGHT).abs() < f64::EPSILON);
        assert!((time_modifier(2) - NIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn early_morning_takes_precedence_over_prayer() {
        // 05:00 is both an early-morning hour and a prayer hour; the regime
        // order resolves it to early morning.
        assert!((time_modifier(5) - EARLY_MORNING).abs() < f64::EPSILON);
    }

    #[test]
    fn prayer_regimes_resolve_in_order() {
        assert!((time_modifier(12) - DURING_PRAYER).abs() < f64::EPSILON);
        assert!((time_modifier(13) - AFTER_PRAYER).abs() < f64::EPSILON);
        // 19:00 is in both the after- and before-prayer sets; after wins.
        assert!((time_modifier(19) - AFTER_PRAYER).abs() < f64::EPSILON);
        assert!((time_modifier(11) - BEFORE_PRAYER).abs() < f64::EPSILON);
        assert!((time_modifier(10) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jamaraat_peak_overrides_generic() {
        let generic = time_modifier(7);
        let m = site_time_modifier("Jamaraat Bridge", 7, false, generic);
        assert!((m - JAMARAT).abs() < f64::EPSILON);
    }

    #[test]
    fn arafat_ritual_day_override() {
        let m = site_time_modifier("Arafat", 10, true, 1.0);
        assert!((m - RITUAL_DAY).abs() < f64::EPSILON);
        let m = site_time_modifier("Arafat", 10, false, 1.0);
        assert!((m - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ritual_day_on_fridays_and_third_minutes() {
        // 2026-06-19 is a Friday.
        let friday = Utc.with_ymd_and_hms(2026, 6, 19, 10, 1, 0).unwrap();
        assert!(ritual_day(friday));

        let monday_min_3 = Utc.with_ymd_and_hms(2026, 6, 15, 10, 3, 0).unwrap();
        assert!(ritual_day(monday_min_3));

        let monday_min_4 = Utc.with_ymd_and_hms(2026, 6, 15, 10, 4, 0).unwrap();
        assert!(!ritual_day(monday_min_4));
    }

    #[test]
    fn observed_weather_overrides_proxy() {
        // Midday proxy says hot, but an observed rain reading wins.
        let m = weather_modifier(Some(Weather::Rain), 12);
        assert!((m - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn proxy_tracks_hour() {
        assert!((weather_modifier(None, 12) - 0.9).abs() < f64::EPSILON);
        assert!((weather_modifier(None, 17) - 1.2).abs() < f64::EPSILON);
        assert!((weather_modifier(None, 9) - 1.0).abs() < f64::EPSILON);
    }
}
