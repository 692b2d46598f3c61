//! Narrative paths. Each path owns a contiguous, inclusive level range; text
//! comes from the locale catalog under `paths.<id>`.

pub struct PathRow {
    pub id: &'static str,
    pub first_level: usize,
    pub last_level: usize,
    pub color: &'static str,
}

pub const PATH_ROWS: &[PathRow] = &[
    PathRow { id: "fundamentals", first_level: 0, last_level: 4, color: "#4285F4" },
    PathRow { id: "insight", first_level: 5, last_level: 9, color: "#34A853" },
    PathRow { id: "mastery", first_level: 10, last_level: 14, color: "#FBBC05" },
    PathRow { id: "wisdom", first_level: 15, last_level: 19, color: "#EA4335" },
    PathRow { id: "transcendence", first_level: 20, last_level: 72, color: "#673AB7" },
];
