#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic crowd density estimator for Hajj sites.
//!
//! Produces one internally consistent [`SnapshotSet`] per evaluation: an
//! occupancy figure, headcount, people-per-area density, and qualitative
//! level for every catalog site and each of its sections, as a function of
//! the evaluation instant, weather, and ritual-day state. There are no
//! external dependencies and no I/O; a live sensor feed can replace this
//! module by producing the same snapshot shape.

pub mod modifiers;

use chrono::{DateTime, Timelike, Utc};
use pilgrim_nav_crowd_models::{
    DensityLevel, DensitySnapshot, SectionSnapshot, SnapshotSet, Weather,
};
use pilgrim_nav_sites::Catalog;
use pilgrim_nav_sites_models::{Coordinates, Location};
use rand::Rng;
use uuid::Uuid;

/// Lower bound of the total pilgrim population range.
pub const TOTAL_PILGRIMS_MIN: u32 = 250_000;
/// Upper bound of the total pilgrim population range.
pub const TOTAL_PILGRIMS_MAX: u32 = 350_000;

/// Human-readable form of the pilgrim population range, reported on routes.
pub const PILGRIM_COUNT_RANGE: &str = "250,000-350,000";

/// Estimator behavior switches.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorOptions {
    /// Force every fifth catalog site into a fixed occupancy band so the
    /// catalog shows a spread of density levels on every evaluation. A
    /// demonstration device, not a physical model; disable for natural
    /// curves only.
    pub demo_bands: bool,
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self { demo_bands: true }
    }
}

impl EstimatorOptions {
    /// Options with all demonstration behavior disabled.
    #[must_use]
    pub const fn natural() -> Self {
        Self { demo_bands: false }
    }
}

/// Produces a full density snapshot set for the catalog at `now`.
///
/// Pure with respect to its inputs: the same catalog, instant, weather, and
/// RNG state yield the same readings. The jitter source is injected so
/// callers that need reproducibility (tests, replay) can seed it.
///
/// The sum of site headcounts approximates the interpolated population
/// target; exact reconciliation is deliberately not attempted.
pub fn estimate_densities(
    catalog: &Catalog,
    now: DateTime<Utc>,
    weather: Option<Weather>,
    options: EstimatorOptions,
    rng: &mut impl Rng,
) -> SnapshotSet {
    let hour = now.hour();
    let minute = now.minute();

    let generic_modifier = modifiers::time_modifier(hour);
    let ritual_day = modifiers::ritual_day(now);
    let weather_modifier = modifiers::weather_modifier(weather, hour);
    let total_pilgrims = current_total_pilgrims(minute);

    let snapshots: Vec<DensitySnapshot> = catalog
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let mut base = base_occupancy(&location.name, hour, minute, ritual_day);
            let mut modifier =
                modifiers::site_time_modifier(&location.name, hour, ritual_day, generic_modifier);

            if options.demo_bands {
                if let Some((banded_base, banded_modifier)) = demo_band(index) {
                    base = banded_base;
                    modifier = banded_modifier;
                }
            }

            let occupancy = base * modifier * weather_modifier * rng.gen_range(0.95..1.05);
            site_snapshot(location, occupancy, now, rng)
        })
        .collect();

    let set = SnapshotSet {
        id: Uuid::new_v4(),
        snapshots,
        generated_at: now,
        total_pilgrims,
    };

    log::debug!(
        "Snapshot set {}: {} pilgrims distributed (target {total_pilgrims})",
        set.id,
        set.distributed_total()
    );

    set
}

/// Builds the snapshot for one site from its final occupancy fraction.
fn site_snapshot(
    location: &Location,
    occupancy: f64,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> DensitySnapshot {
    let crowd_size = headcount(occupancy, location.capacity);
    let density = location.density_for(crowd_size);
    let density_level = DensityLevel::classify(density);

    let sections: Vec<SectionSnapshot> = location
        .sections
        .iter()
        .map(|section| {
            // Sections drift around the site average and are classified on
            // their own density, so a section's level can differ from its
            // parent's.
            let section_density = density * rng.gen_range(0.9..1.1);
            SectionSnapshot {
                id: section.id.clone(),
                name: section.name.clone(),
                density: section_density,
                density_level: DensityLevel::classify(section_density),
                crowd_size: headcount(section.share, crowd_size),
            }
        })
        .collect();

    // Display-only wobble; routing never reads these coordinates.
    let coordinates = Coordinates {
        lng: location.coordinates.lng + rng.gen_range(-0.000_25..0.000_25),
        lat: location.coordinates.lat + rng.gen_range(-0.000_25..0.000_25),
    };

    DensitySnapshot {
        location_name: location.name.clone(),
        coordinates,
        occupancy,
        density,
        density_level,
        crowd_size,
        capacity: location.capacity,
        sections,
        timestamp: now,
    }
}

/// Interpolates the current total pilgrim count across the fixed range by
/// the fraction of the hour elapsed, giving smooth minute-to-minute
/// variation without full randomness.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn current_total_pilgrims(minute: u32) -> u32 {
    let variation =
        (f64::from(minute) / 60.0) * f64::from(TOTAL_PILGRIMS_MAX - TOTAL_PILGRIMS_MIN);
    TOTAL_PILGRIMS_MIN + variation.floor() as u32
}

/// Baseline occupancy curve per site.
///
/// Each named site has a distinct pattern reflecting its known behavior;
/// sites without a curve of their own wander with the minute of the hour.
#[must_use]
pub fn base_occupancy(site: &str, hour: u32, minute: u32, ritual_day: bool) -> f64 {
    match site {
        // Consistently busy, breathing with a three-hour cycle.
        "Masjid al-Haram" => 0.7 + f64::from(hour % 3) * 0.1,
        "Jamaraat Bridge" => {
            if modifiers::JAMARAT_HOURS.contains(&hour) {
                0.9
            } else {
                0.5
            }
        }
        "Mina" => {
            if ritual_day {
                0.95
            } else {
                0.6
            }
        }
        // Near-full on the main ritual day, sparse otherwise.
        "Arafat" => {
            if ritual_day {
                0.98
            } else {
                0.3
            }
        }
        // Fills in the evening for the overnight stay.
        "Muzdalifah" => {
            if (18..=23).contains(&hour) {
                0.85
            } else {
                0.4
            }
        }
        _ => 0.4 + f64::from(minute % 10) / 10.0,
    }
}

/// Forced occupancy band for every fifth catalog site: `(base, modifier)`
/// pairs cycling high, medium, critical, low, natural.
const fn demo_band(index: usize) -> Option<(f64, f64)> {
    match index % 5 {
        0 => Some((0.9, 2.0)),
        1 => Some((0.7, 1.5)),
        2 => Some((1.0, 2.5)),
        3 => Some((0.4, 1.0)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn headcount(fraction: f64, capacity: u32) -> u32 {
    (fraction * f64::from(capacity)).floor().max(0.0) as u32
}
