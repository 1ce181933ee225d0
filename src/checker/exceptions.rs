//! Curated per-dataset exceptions.
//!
//! These tables record datasets and organizations that predate the checks or
//! legitimately break a rule. Extending a table never requires touching the
//! checks themselves.

/// Organizations allowed a second directory level of catalogs and collections.
pub static TWO_LEVEL_ORGANIZATIONS: &[&str] = &["NASA", "NOAA", "USGS"];

/// A collection stored as `org/dataset/org_dataset_VERSION.json` with an id of
/// `org/dataset_VERSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedCollection {
    pub organization: &'static str,
    pub dataset: &'static str,
}

pub static VERSIONED_COLLECTIONS: &[VersionedCollection] = &[VersionedCollection {
    organization: "USGS",
    dataset: "GFSAD1000",
}];

/// Class tables with a single entry.
pub static ONE_CLASS: &[&str] = &[
    "LANDSAT/MANGROVE_FORESTS",
    "UMD/GLAD/PRIMARY_HUMID_TROPICAL_FORESTS/v1",
];

/// Id fragments whose class tables may exceed 255 entries.
pub static LARGE_CLASS_TABLES: &[&str] = &["LANDFIRE", "USGS/GAP"];

pub static DUPLICATE_DESCRIPTIONS: &[&str] = &[
    "LANDFIRE/Vegetation/BPS/v1_4_0",
    "LANDFIRE/Vegetation/ESP/v1_2_0/AK",
    "LANDFIRE/Vegetation/ESP/v1_2_0/HI",
    "LANDFIRE/Vegetation/EVC/v1_4_0",
    "LANDFIRE/Vegetation/EVT/v1_4_0",
    "USDA/NASS/CDL",
];

/// Class tables where several categories share a color.
pub static DUPLICATE_COLORS: &[&str] = &[
    "AAFC/ACI",
    "CSP/ERGo/1_0/US/lithology",
    "ISDASOIL/Africa/v1/fcc",
    "JRC/D5/EUCROPMAP/V1",
    "LANDFIRE/Vegetation/BPS/v1_4_0",
    "LANDFIRE/Vegetation/ESP/v1_2_0/AK",
    "LANDFIRE/Vegetation/ESP/v1_2_0/CONUS",
    "LANDFIRE/Vegetation/ESP/v1_2_0/HI",
    "LANDFIRE/Vegetation/EVC/v1_4_0",
    "LANDFIRE/Vegetation/EVT/v1_4_0",
    "NOAA/CDR/PATMOSX/V53",
    "OpenLandMap/SOL/SOL_GRTGROUP_USDA-SOILTAX_C/v01",
    "Oxford/MAP/IGBP_Fractional_Landcover_5km_Annual",
    "Tsinghua/FROM-GLC/GAIA/v10",
    "USDA/NASS/CDL",
    "USGS/NLCD",
    "USGS/GAP/CONUS/2011",
    "USGS/NLCD_RELEASES/2016_REL",
];

/// Datasets whose revisit interval is longer than 32 units.
pub static LONG_INTERVALS: &[&str] = &["EO1/HYPERION"];

/// Named colors accepted in place of a hex code.
pub static COLOR_NAMES: &[&str] = &[
    "black",
    "blue",
    "brown",
    "darkblue",
    "darkorange",
    "darkred",
    "darkslategray",
    "darkviolet",
    "ghostwhite",
    "green",
    "orange",
    "purple",
    "red",
    "slategray",
    "violet",
    "white",
    "yellow",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathExceptions {
    pub two_level_organizations: &'static [&'static str],
    pub versioned_collections: &'static [VersionedCollection],
}

impl Default for PathExceptions {
    fn default() -> Self {
        Self {
            two_level_organizations: TWO_LEVEL_ORGANIZATIONS,
            versioned_collections: VERSIONED_COLLECTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassExceptions {
    pub one_class: &'static [&'static str],
    pub large_tables: &'static [&'static str],
    pub duplicate_descriptions: &'static [&'static str],
    pub duplicate_colors: &'static [&'static str],
    pub color_names: &'static [&'static str],
}

impl Default for ClassExceptions {
    fn default() -> Self {
        Self {
            one_class: ONE_CLASS,
            large_tables: LARGE_CLASS_TABLES,
            duplicate_descriptions: DUPLICATE_DESCRIPTIONS,
            duplicate_colors: DUPLICATE_COLORS,
            color_names: COLOR_NAMES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalExceptions {
    pub long_intervals: &'static [&'static str],
}

impl Default for IntervalExceptions {
    fn default() -> Self {
        Self {
            long_intervals: LONG_INTERVALS,
        }
    }
}
