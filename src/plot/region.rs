//! State abbreviation → FIPS id mapping
//!
//! The ids match the `id` property of the `states` feature in the `us-10m`
//! TopoJSON file, which is what the map joins its boundaries against.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::LazyLock;

/// US state boundaries, keyed by FIPS id
pub const US_10M_URL: &str = "https://cdn.jsdelivr.net/npm/vega-datasets@v1.29.0/data/us-10m.json";

/// TopoJSON object holding the state shapes
pub const STATES_FEATURE: &str = "states";

const STATE_FIPS: [(&str, i64); 51] = [
    ("AL", 1),
    ("AK", 2),
    ("AZ", 4),
    ("AR", 5),
    ("CA", 6),
    ("CO", 8),
    ("CT", 9),
    ("DE", 10),
    ("DC", 11),
    ("FL", 12),
    ("GA", 13),
    ("HI", 15),
    ("ID", 16),
    ("IL", 17),
    ("IN", 18),
    ("IA", 19),
    ("KS", 20),
    ("KY", 21),
    ("LA", 22),
    ("ME", 23),
    ("MD", 24),
    ("MA", 25),
    ("MI", 26),
    ("MN", 27),
    ("MS", 28),
    ("MO", 29),
    ("MT", 30),
    ("NE", 31),
    ("NV", 32),
    ("NH", 33),
    ("NJ", 34),
    ("NM", 35),
    ("NY", 36),
    ("NC", 37),
    ("ND", 38),
    ("OH", 39),
    ("OK", 40),
    ("OR", 41),
    ("PA", 42),
    ("RI", 44),
    ("SC", 45),
    ("SD", 46),
    ("TN", 47),
    ("TX", 48),
    ("UT", 49),
    ("VT", 50),
    ("VA", 51),
    ("WA", 53),
    ("WV", 54),
    ("WI", 55),
    ("WY", 56),
];

static REGION_IDS: LazyLock<HashMap<&'static str, i64>> =
    LazyLock::new(|| STATE_FIPS.iter().copied().collect());

/// FIPS id of a two-letter state abbreviation, if it has one
pub fn region_id(abbr: &str) -> Option<i64> {
    REGION_IDS.get(abbr).copied()
}

/// Lookup source that adds `geometry` and `type` to rows by their `id`
pub fn states_lookup() -> Value {
    json!({
        "data": {
            "url": US_10M_URL,
            "format": {"type": "topojson", "feature": STATES_FEATURE}
        },
        "key": "id",
        "fields": ["geometry", "type"]
    })
}
