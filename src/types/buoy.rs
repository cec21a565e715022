//! Buoy archetypes understood by the Bridge Command world files

use serde::{Deserialize, Serialize};

/// Simulator buoy archetype assigned to each navigational aid.
///
/// Exactly one per record; see `interpreter::rules::BUOY_RULES` for how
/// a class is chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BuoyClass {
    CardinalNorth,
    CardinalEast,
    CardinalSouth,
    CardinalWest,
    SafeWater,
    IsolatedDanger,
    /// Yellow special-purpose mark (cable, research, obstruction, ...)
    Special,
    /// Red-over-green junction mark
    PreferredStarboard,
    /// Green-over-red junction mark
    PreferredPort,
    StarboardPost,
    PortPost,
    StarboardSmall,
    PortSmall,
    Mooring,
    /// Nothing recognisable in the text
    Unclassified,
}

impl BuoyClass {
    pub const ALL: [BuoyClass; 15] = [
        BuoyClass::CardinalNorth,
        BuoyClass::CardinalEast,
        BuoyClass::CardinalSouth,
        BuoyClass::CardinalWest,
        BuoyClass::SafeWater,
        BuoyClass::IsolatedDanger,
        BuoyClass::Special,
        BuoyClass::PreferredStarboard,
        BuoyClass::PreferredPort,
        BuoyClass::StarboardPost,
        BuoyClass::PortPost,
        BuoyClass::StarboardSmall,
        BuoyClass::PortSmall,
        BuoyClass::Mooring,
        BuoyClass::Unclassified,
    ];

    /// Stable key used in `[buoy_types]` overrides and reports
    pub fn slug(&self) -> &'static str {
        match self {
            BuoyClass::CardinalNorth => "cardinal_north",
            BuoyClass::CardinalEast => "cardinal_east",
            BuoyClass::CardinalSouth => "cardinal_south",
            BuoyClass::CardinalWest => "cardinal_west",
            BuoyClass::SafeWater => "safe_water",
            BuoyClass::IsolatedDanger => "isolated_danger",
            BuoyClass::Special => "special",
            BuoyClass::PreferredStarboard => "preferred_starboard",
            BuoyClass::PreferredPort => "preferred_port",
            BuoyClass::StarboardPost => "starboard_post",
            BuoyClass::PortPost => "port_post",
            BuoyClass::StarboardSmall => "starboard_small",
            BuoyClass::PortSmall => "port_small",
            BuoyClass::Mooring => "mooring",
            BuoyClass::Unclassified => "unclassified",
        }
    }

    /// Default Bridge Command `Type(i)` model name
    pub fn default_type_name(&self) -> &'static str {
        match self {
            BuoyClass::CardinalNorth => "north_small",
            BuoyClass::CardinalEast => "east_small",
            BuoyClass::CardinalSouth => "south_small",
            BuoyClass::CardinalWest => "west_small",
            BuoyClass::SafeWater => "safe",
            BuoyClass::IsolatedDanger => "danger_small",
            BuoyClass::Special | BuoyClass::Unclassified => "special_small",
            BuoyClass::PreferredStarboard => "pref_stbd_small",
            BuoyClass::PreferredPort => "pref_port_small",
            BuoyClass::StarboardPost => "stbd_post",
            BuoyClass::PortPost => "port_post",
            BuoyClass::StarboardSmall => "stbd_small",
            BuoyClass::PortSmall => "port_small",
            BuoyClass::Mooring => "mooring",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl std::fmt::Display for BuoyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}
