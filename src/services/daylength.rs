//! Day-length derivation on top of an external sunrise/sunset provider.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::astro::{is_polar_night, sunray_angle_degrees, EARTH_TILT_DEGREES};
use crate::core::types::Result;

use super::bridge::RecordSet;
use super::search::Location;
use super::sequencer::RequestSequencer;

/// Sunrise and sunset for one date. Either is absent during polar day or
/// polar night.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunEvents {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Solar-position collaborator.
pub trait SolarTimes: Send + Sync + 'static {
    fn sun_events(&self, date: NaiveDate, latitude: f64, longitude: f64) -> Result<SunEvents>;
}

/// One derived row of day data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLengthRecord {
    pub date: NaiveDate,
    /// Zero-based day of year, matching the simulation's `day`.
    pub day_of_year: u32,
    pub day_length_hours: f64,
    /// Local decimal hour in [0, 24).
    pub sunrise_local: Option<f64>,
    /// Local decimal hour in [0, 24).
    pub sunset_local: Option<f64>,
    pub noon_sunray_angle: f32,
}

/// Decimal hour of `time` shifted by `utc_offset_hours`, wrapped into [0, 24).
pub fn local_decimal_hour(time: DateTime<Utc>, utc_offset_hours: f64) -> f64 {
    let hour = time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
    (hour + utc_offset_hours).rem_euclid(24.0)
}

/// Build a [`DayLengthRecord`] from raw sun events.
pub fn derive_day_length(
    date: NaiveDate,
    latitude: f32,
    utc_offset_hours: f64,
    events: SunEvents,
) -> DayLengthRecord {
    let day_of_year = date.ordinal0();
    let noon_sunray_angle = sunray_angle_degrees(day_of_year as f32, EARTH_TILT_DEGREES, latitude);

    let day_length_hours = match (events.sunrise, events.sunset) {
        (Some(rise), Some(set)) => {
            let hours = (set - rise).num_seconds() as f64 / 3600.0;
            // Sunset after UTC midnight
            if hours < 0.0 { hours + 24.0 } else { hours }
        }
        _ if is_polar_night(noon_sunray_angle) => 0.0,
        _ => 24.0,
    };

    DayLengthRecord {
        date,
        day_of_year,
        day_length_hours,
        sunrise_local: events.sunrise.map(|t| local_decimal_hour(t, utc_offset_hours)),
        sunset_local: events.sunset.map(|t| local_decimal_hour(t, utc_offset_hours)),
        noon_sunray_angle,
    }
}

/// Every date of `year`.
pub fn dates_of_year(year: i32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|d| d.year() == year).collect()
}

/// Fetches a year of day data for a location off the render thread.
///
/// Requests are sequenced: a completion superseded by a newer request
/// returns `None`. A collaborator failure yields a record set with no rows.
pub struct DayDataFetcher<S: SolarTimes> {
    solar: Arc<S>,
    sequencer: Mutex<RequestSequencer>,
}

impl<S: SolarTimes> DayDataFetcher<S> {
    pub fn new(solar: Arc<S>) -> Self {
        Self { solar, sequencer: Mutex::new(RequestSequencer::new()) }
    }

    pub async fn fetch_year(&self, location: Location, year: i32, utc_offset_hours: f64) -> Option<RecordSet> {
        let id = self.sequencer.lock().await.begin();
        let solar = self.solar.clone();
        let lat = location.latitude;
        let long = location.longitude;

        let computed = tokio::task::spawn_blocking(move || {
            dates_of_year(year)
                .into_iter()
                .map(|date| {
                    solar
                        .sun_events(date, lat as f64, long as f64)
                        .map(|events| derive_day_length(date, lat, utc_offset_hours, events))
                })
                .collect::<Result<Vec<_>>>()
        })
        .await;

        let rows = match computed {
            Ok(Ok(rows)) => rows,
            Ok(Err(e)) => {
                log::warn!("Day data for {} unavailable: {}", location.name, e);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Day data task for {} failed: {}", location.name, e);
                Vec::new()
            }
        };

        if !self.sequencer.lock().await.accept(id) {
            log::debug!("Discarding stale day data for {}", location.name);
            return None;
        }
        Some(RecordSet { location, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    /// Twelve-hour days, sunrise 11:00 UTC, except in the Arctic.
    struct FixedSolar;

    impl SolarTimes for FixedSolar {
        fn sun_events(&self, date: NaiveDate, latitude: f64, _longitude: f64) -> Result<SunEvents> {
            if latitude > 89.0 {
                return Ok(SunEvents { sunrise: None, sunset: None });
            }
            if latitude < -89.0 {
                return Err(Error::Service("no data".into()));
            }
            let rise = date.and_hms_opt(11, 0, 0).unwrap().and_utc();
            Ok(SunEvents { sunrise: Some(rise), sunset: Some(rise + chrono::Duration::hours(12)) })
        }
    }

    #[test]
    fn test_local_hours_wrap() {
        let t = utc(2024, 6, 20, 2, 30);
        assert!((local_decimal_hour(t, 0.0) - 2.5).abs() < 1e-9);
        assert!((local_decimal_hour(t, -5.0) - 21.5).abs() < 1e-9);
        assert!((local_decimal_hour(t, 23.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_day_length_across_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let events = SunEvents {
            sunrise: Some(utc(2024, 6, 20, 10, 15)),
            sunset: Some(utc(2024, 6, 20, 1, 30)),
        };
        let record = derive_day_length(date, 40.11, -5.0, events);
        assert!((record.day_length_hours - 15.25).abs() < 1e-9);
        assert!((record.sunrise_local.unwrap() - 5.25).abs() < 1e-9);
        assert!((record.sunset_local.unwrap() - 20.5).abs() < 1e-9);
    }

    #[test]
    fn test_polar_day_and_night() {
        let none = SunEvents { sunrise: None, sunset: None };
        let june = NaiveDate::from_ymd_opt(2023, 6, 21).unwrap();
        let december = NaiveDate::from_ymd_opt(2023, 12, 21).unwrap();
        assert_eq!(derive_day_length(june, 80.0, 0.0, none).day_length_hours, 24.0);
        assert_eq!(derive_day_length(december, 80.0, 0.0, none).day_length_hours, 0.0);
    }

    #[test]
    fn test_day_of_year_is_zero_based() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let none = SunEvents { sunrise: None, sunset: None };
        assert_eq!(derive_day_length(date, 0.0, 0.0, none).day_of_year, 0);
        assert_eq!(dates_of_year(2023).len(), 365);
        assert_eq!(dates_of_year(2024).len(), 366);
    }

    #[tokio::test]
    async fn test_fetch_year_rows() {
        let fetcher = DayDataFetcher::new(Arc::new(FixedSolar));
        let set = fetcher.fetch_year(Location::new("Urbana", 40.11, -88.2), 2023, -6.0).await.unwrap();
        assert_eq!(set.rows.len(), 365);
        assert!((set.rows[0].day_length_hours - 12.0).abs() < 1e-9);
        assert!((set.rows[0].sunrise_local.unwrap() - 5.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_failure_gives_empty_rows() {
        let fetcher = DayDataFetcher::new(Arc::new(FixedSolar));
        let set = fetcher.fetch_year(Location::new("Pole", -90.0, 0.0), 2023, 0.0).await.unwrap();
        assert!(set.rows.is_empty());
    }

    #[tokio::test]
    async fn test_newer_fetch_supersedes() {
        let fetcher = DayDataFetcher::new(Arc::new(FixedSolar));
        // Finish the newer request first, then the older one
        let old_id = fetcher.sequencer.lock().await.begin();
        let newer = fetcher.fetch_year(Location::new("A", 10.0, 0.0), 2023, 0.0).await;
        assert!(newer.is_some());
        assert!(!fetcher.sequencer.lock().await.accept(old_id));
    }
}
