//! Level thresholds. Index in this table is the level index; names and
//! messages come from the locale catalog under `levels.<index>`.

pub struct LevelRow {
    pub xp: u64,
    pub path: &'static str,
}

const fn row(xp: u64, path: &'static str) -> LevelRow {
    LevelRow { xp, path }
}

pub const LEVEL_ROWS: &[LevelRow] = &[
    // Fundamentals
    row(0, "fundamentals"),
    row(5, "fundamentals"),
    row(15, "fundamentals"),
    row(30, "fundamentals"),
    row(50, "fundamentals"),
    // Insight
    row(75, "insight"),
    row(105, "insight"),
    row(140, "insight"),
    row(180, "insight"),
    row(225, "insight"),
    // Mastery
    row(275, "mastery"),
    row(330, "mastery"),
    row(390, "mastery"),
    row(455, "mastery"),
    row(525, "mastery"),
    // Wisdom
    row(600, "wisdom"),
    row(680, "wisdom"),
    row(765, "wisdom"),
    row(855, "wisdom"),
    row(950, "wisdom"),
    // Transcendence (open-ended, ~10% per level past 1750)
    row(1050, "transcendence"),
    row(1200, "transcendence"),
    row(1350, "transcendence"),
    row(1500, "transcendence"),
    row(1750, "transcendence"),
    row(1925, "transcendence"),
    row(2118, "transcendence"),
    row(2329, "transcendence"),
    row(2562, "transcendence"),
    row(2818, "transcendence"),
    row(3100, "transcendence"),
    row(3410, "transcendence"),
    row(3751, "transcendence"),
    row(4126, "transcendence"),
    row(4538, "transcendence"),
    row(4992, "transcendence"),
    row(5491, "transcendence"),
    row(6039, "transcendence"),
    row(6643, "transcendence"),
    row(7307, "transcendence"),
    row(8038, "transcendence"),
    row(8842, "transcendence"),
    row(9726, "transcendence"),
    row(10698, "transcendence"),
    row(11768, "transcendence"),
    row(12945, "transcendence"),
    row(14239, "transcendence"),
    row(15663, "transcendence"),
    row(17229, "transcendence"),
    row(18952, "transcendence"),
    row(20847, "transcendence"),
    row(22932, "transcendence"),
    row(25225, "transcendence"),
    row(27748, "transcendence"),
    row(30522, "transcendence"),
    row(33574, "transcendence"),
    row(36932, "transcendence"),
    row(40625, "transcendence"),
    row(44687, "transcendence"),
    row(49155, "transcendence"),
    row(54070, "transcendence"),
    row(59477, "transcendence"),
    row(65425, "transcendence"),
    row(71967, "transcendence"),
    row(79163, "transcendence"),
    row(87079, "transcendence"),
    row(95787, "transcendence"),
    row(105366, "transcendence"),
    row(115902, "transcendence"),
    row(127492, "transcendence"),
    row(140241, "transcendence"),
    row(154346, "transcendence"),
    row(169780, "transcendence"),
];
