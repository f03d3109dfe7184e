//! Synthetic table set shared by the integration tests
//!
//! The tables are small and smooth enough to reason about by hand while
//! still exercising symmetries, latitude blending and every body pipeline.

#![allow(dead_code)]

use std::sync::Arc;

use alphonsine::ephemerides::table_set::TableSetDescription;
use alphonsine::sexagesimal::Sexagesimal;
use alphonsine::tables::{MemoryTableSource, RawTable};
use alphonsine::{TableSet, TableSetLoader};

pub fn sx(text: &str) -> Sexagesimal {
    text.parse().unwrap()
}

fn raw(samples: &[(&str, &str)]) -> RawTable {
    RawTable::new(
        samples.iter().map(|(a, v)| (sx(a), sx(v))).collect(),
        vec![],
    )
}

pub const ZERO: u32 = 1;
pub const HALF_WAVE: u32 = 2;
pub const OBLIQUE_30: u32 = 3;
pub const OBLIQUE_45: u32 = 4;
pub const RIGHT_ASCENSION: u32 = 5;
pub const MOON_MINUTES: u32 = 6;
pub const DIVERSITY: u32 = 7;
pub const PLANET_MINUTES: u32 = 8;
pub const IDENTITY: u32 = 9;

pub fn source() -> MemoryTableSource {
    MemoryTableSource::new()
        .with_table(ZERO, raw(&[("0", "0"), ("6,0", "0")]))
        .with_table(
            HALF_WAVE,
            raw(&[
                ("0", "0"),
                ("30", "1;0"),
                ("1,0", "1;43,55"),
                ("1,30", "2;0"),
                ("2,0", "1;43,55"),
                ("2,30", "1;0"),
                ("3,0", "0"),
            ]),
        )
        .with_table(
            OBLIQUE_30,
            raw(&[("0", "0"), ("1,30", "1,20"), ("3,0", "3,0"), ("4,30", "4,40"), ("6,0", "6,0")]),
        )
        .with_table(
            OBLIQUE_45,
            raw(&[("0", "0"), ("1,30", "1,10"), ("3,0", "3,0"), ("4,30", "4,50"), ("6,0", "6,0")]),
        )
        .with_table(
            RIGHT_ASCENSION,
            raw(&[
                ("0", "0"),
                ("45", "42;30"),
                ("1,30", "1,30"),
                ("2,15", "2,17;30"),
                ("3,0", "3,0"),
                ("3,45", "3,42;30"),
                ("4,30", "4,30"),
                ("5,15", "5,17;30"),
                ("6,0", "6,0"),
            ]),
        )
        .with_table(MOON_MINUTES, raw(&[("0", "0"), ("3,0", "1,0"), ("6,0", "0")]))
        .with_table(DIVERSITY, raw(&[("0", "2"), ("6,0", "2")]))
        .with_table(
            PLANET_MINUTES,
            raw(&[("0", "-30"), ("3,0", "30"), ("6,0", "-30")]),
        )
        .with_table(IDENTITY, raw(&[("0", "0"), ("6,0", "6,0")]))
}

pub const DESCRIPTION: &str = r#"{
    "fixed_stars": {
        "mean_motion": ["0;0,0,4,20,41,17,12", "0"],
        "access_recess_mean_motion": ["0;0,0,30,24,49", "5,59;12,34"],
        "access_recess_equation": {"id": 2, "symmetry": [{"kind": "anti_mirror"}]}
    },
    "sun": {
        "mean_motion": ["0;59,8,19,37,19,13", "4,38;21,0,30,28"],
        "apogee_radix": "1,11;25,23",
        "equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]}
    },
    "moon": {
        "mean_motion": ["13;10,35,1,15,11,4", "2,2;46,50,16,39"],
        "mean_argument": ["13;3,53,57,30,21,4", "3,19;0,14,31,16"],
        "equation_center": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "equation_argument": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": 6,
        "diameter_diversion": 7
    },
    "mercury": {
        "mean_argument": ["3;6,24,7,42,40,52", "45;23,57,4"],
        "apogee_radix": "3,10;39,33,4",
        "center_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "argument_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": {"id": 8, "symmetry": [{"kind": "periodic", "period": "6,0"}]},
        "long_longior": 7,
        "long_propior": 7
    },
    "venus": {
        "mean_argument": ["0;36,59,27,23,59,31", "5,59;15,28,32"],
        "center_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "argument_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": {"id": 8, "symmetry": [{"kind": "periodic", "period": "6,0"}]},
        "long_longior": 7,
        "long_propior": 7
    },
    "mars": {
        "mean_motion": ["0;31,26,38,40,5", "41;25,29,43"],
        "apogee_radix": "1,55;12,13,4",
        "center_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "argument_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": {"id": 8, "symmetry": [{"kind": "periodic", "period": "6,0"}]},
        "long_longior": 7,
        "long_propior": 7
    },
    "jupiter": {
        "mean_motion": ["0;4,59,15,27,7,23", "3,3;14,23,13"],
        "apogee_radix": "2,33;37,0,4",
        "center_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "argument_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": {"id": 8, "symmetry": [{"kind": "periodic", "period": "6,0"}]},
        "long_longior": 7,
        "long_propior": 7
    },
    "saturn": {
        "mean_motion": ["0;2,0,35,17,40,21", "1,14;20,16,0"],
        "apogee_radix": "3,53;23,42,4",
        "center_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "argument_equation": {"id": 2, "append_symmetry": [{"kind": "anti_mirror"}]},
        "proportional_minutes": {"id": 8, "symmetry": [{"kind": "periodic", "period": "6,0"}]},
        "long_longior": 7,
        "long_propior": 7
    },
    "oblique_ascension": {"tables": {"30": 3, "45": 4}},
    "right_ascension": {"table": 5}
}"#;

pub fn description() -> TableSetDescription {
    serde_json::from_str(DESCRIPTION).unwrap()
}

pub fn table_set() -> TableSet {
    TableSetLoader::new()
        .with_source(Arc::new(source()))
        .build("synthetic", &description())
        .unwrap()
}

/// The synthetic set with oblique ascension equal to longitude at every
/// latitude, so the ascendant is the Sun plus a quarter turn plus the hour arc
pub fn identity_ascension_set() -> TableSet {
    let description = DESCRIPTION.replace(
        r#""oblique_ascension": {"tables": {"30": 3, "45": 4}}"#,
        r#""oblique_ascension": {"tables": {"30": 9, "45": 9}}"#,
    );
    TableSetLoader::new()
        .with_source(Arc::new(source()))
        .build("identity", &serde_json::from_str::<TableSetDescription>(&description).unwrap())
        .unwrap()
}

/// Whether a value lies in `[0, 360)`
pub fn in_circle(value: &Sexagesimal) -> bool {
    *value >= Sexagesimal::zero() && *value < sx("6,0")
}
