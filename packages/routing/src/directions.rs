//! Narrated guidance assembly.
//!
//! Turn-by-turn micro-directions for well-known adjacent site pairs live in
//! a lookup table; pairs without an entry get a generic signage line. The
//! table only applies when the resolved path is a single direct hop.

use pilgrim_nav_crowd_models::{DensityLevel, SnapshotSet};
use pilgrim_nav_sites::SiteGraph;

/// Congestion-dependent tail of a hop guide: which site's level selects the
/// branch, and the lines for each outcome.
struct CongestionBranch {
    watch: &'static str,
    congested: &'static [&'static str],
    clear: &'static [&'static str],
}

/// Scripted micro-directions for one well-known direct hop.
struct HopGuide {
    pair: (&'static str, &'static str),
    approach: &'static [&'static str],
    branch: Option<CongestionBranch>,
}

static HOP_GUIDES: &[HopGuide] = &[
    HopGuide {
        pair: ("Mina", "Jamaraat Bridge"),
        approach: &[
            "Head southwest on Tariq Al-Jaysh Street for 0.5 km",
            "Turn right onto Al-Jamarat Road and continue for 1.0 km",
            "Follow the designated pathway along Al-Jamarat Road following the crowd management barriers",
        ],
        branch: Some(CongestionBranch {
            watch: "Jamaraat Bridge",
            congested: &[
                "At the Jamarat Complex, follow signs for your camp's designated time slot entrance",
                "Use the Jamarat Bridge Eastern Entrance to avoid the most congested areas",
            ],
            clear: &["Continue on Al-Jamarat Road until you reach the Jamarat Complex"],
        }),
    },
    HopGuide {
        pair: ("Masjid al-Haram", "Mina"),
        approach: &[
            "Exit Masjid al-Haram through the King Fahd expansion gate (Gate 79)",
            "Head east on Ibrahim Al Khalil Road for 1.2 km",
            "Continue onto Makkah-Mina Road for 4.5 km",
        ],
        branch: Some(CongestionBranch {
            watch: "Masjid al-Haram",
            congested: &[
                "Take the covered walkway path on Pedestrian Route 5",
                "Keep right at the Al-Muaisem junction to avoid heavier crowds",
                "Follow Mina Street 204 to enter the Mina Valley",
            ],
            clear: &[
                "Follow the main pedestrian path along Makkah-Mina Road",
                "Enter Mina via Street 206",
            ],
        }),
    },
    HopGuide {
        pair: ("Masjid al-Haram", "Arafat"),
        approach: &[
            "Exit Masjid al-Haram through the Ajyad Gate (Gate 5)",
            "Head southeast on Al-Haram Road for 1.5 km",
            "Continue onto Makkah-Arafat Highway for 14 km",
            "Follow signs for Arafat Plain on Route 15",
            "Enter Arafat via Northern Entrance Road",
        ],
        branch: None,
    },
    HopGuide {
        pair: ("Arafat", "Muzdalifah"),
        approach: &[
            "Exit Arafat via the Western Exit Road",
            "Head west on Arafat-Muzdalifah Road for 6 km",
            "Follow the pedestrian pathways marked in green",
            "Continue straight onto Muzdalifah Valley Road",
        ],
        branch: None,
    },
    HopGuide {
        pair: ("Muzdalifah", "Mina"),
        approach: &[
            "Head northwest on Muzdalifah Valley Road",
            "Continue onto Muzdalifah-Mina Connection Road for 2.5 km",
            "Follow the pedestrian routes marked with yellow signs",
            "Enter Mina through the Southern Entrance",
        ],
        branch: None,
    },
    HopGuide {
        pair: ("Jamaraat Bridge", "Masjid al-Haram"),
        approach: &[
            "Exit the Jamarat Complex via the Western Exit",
            "Head southwest on Al-Jamarat Road for 0.8 km",
            "Continue onto Mina-Makkah Pedestrian Way for 5 km",
            "Follow Ibrahim Al-Khalil Road to reach Masjid al-Haram",
        ],
        branch: None,
    },
];

fn guide_for(start: &str, destination: &str) -> Option<&'static HopGuide> {
    HOP_GUIDES
        .iter()
        .find(|g| g.pair.0 == start && g.pair.1 == destination)
}

fn level_or_low(snapshots: &SnapshotSet, site: &str) -> DensityLevel {
    snapshots.level_of(site).unwrap_or(DensityLevel::Low)
}

/// Assembles the full ordered direction list for a resolved path.
pub(crate) fn assemble(
    graph: &SiteGraph,
    snapshots: &SnapshotSet,
    path: &[String],
    aggregate: DensityLevel,
) -> Vec<String> {
    let start = path.first().map(String::as_str).unwrap_or_default();
    let destination = path.last().map(String::as_str).unwrap_or_default();

    let mut directions = vec![format!("Start at {start}")];

    let congested: Vec<&String> = path
        .iter()
        .filter(|site| level_or_low(snapshots, site) >= DensityLevel::High)
        .collect();

    if congested.is_empty() {
        directions.push("This route avoids high crowd density areas".to_string());
    } else {
        if level_or_low(snapshots, start) == DensityLevel::Critical {
            directions.push(format!(
                "⚠️ Warning: Extremely high crowd density at your starting point ({start})"
            ));
        } else if level_or_low(snapshots, destination) == DensityLevel::Critical {
            directions.push(format!(
                "⚠️ Warning: Extremely high crowd density at your destination ({destination})"
            ));
        } else if aggregate == DensityLevel::Critical {
            directions.push("⚠️ Warning: Extremely high crowd density on this route".to_string());
        } else {
            directions.push("⚠️ Warning: High crowd density detected on this route".to_string());
        }
        directions
            .push("We've calculated a route that avoids the most crowded areas where possible".to_string());
        directions.push("Consider traveling during off-peak hours if possible".to_string());
    }

    // One line per hop after the first; the opening line already covers the
    // departure leg.
    for (i, pair) in path.windows(2).enumerate() {
        if i == 0 {
            continue;
        }
        let next = &pair[1];
        let distance = graph.direct_distance(&pair[0], next).unwrap_or(0.0);
        let level = level_or_low(snapshots, next);
        directions.push(format!(
            "Continue to {next} ({level} crowd density) - {distance:.1} km"
        ));
    }

    // Street-level guidance only exists for known direct hops.
    if path.len() == 2 {
        if let Some(guide) = guide_for(start, destination) {
            directions.extend(guide.approach.iter().map(ToString::to_string));
            if let Some(branch) = &guide.branch {
                let lines = if level_or_low(snapshots, branch.watch) >= DensityLevel::High {
                    branch.congested
                } else {
                    branch.clear
                };
                directions.extend(lines.iter().map(ToString::to_string));
            }
        } else {
            directions.push(format!(
                "Head toward {destination} following the main pilgrimage route"
            ));
            directions
                .push("Follow the official signage and crowd management directions".to_string());
        }
    }

    directions.push(format!("Arrive at {destination}"));

    if aggregate >= DensityLevel::High {
        directions
            .push("Stay hydrated and follow crowd management officials' instructions".to_string());
        directions
            .push("Keep your group together and follow the designated walking paths".to_string());
    }

    directions
}
