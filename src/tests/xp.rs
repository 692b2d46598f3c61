use crate::xp::*;

#[test]
fn award_never_drops_below_the_base() {
    for d in Difficulty::ALL {
        for secs in [1.0, 59.9, 180.0, 600.0, 1500.0, 86_400.0] {
            let xp = compute_xp_gain(d, secs, false);
            assert!(xp >= 2 * d.multiplier(), "{d:?} at {secs}s gave {xp}");
            assert!(xp <= 2 * d.multiplier() + 3);
            assert_eq!(compute_xp_gain(d, secs, true), 0);
        }
    }
}

#[test]
fn faster_solves_never_earn_less() {
    for d in Difficulty::ALL {
        let mut last = u32::MAX;
        for minutes in 1..40 {
            let xp = compute_xp_gain(d, f64::from(minutes) * 60.0, false);
            assert!(xp <= last);
            last = xp;
        }
    }
}

#[test]
fn each_difficulty_has_its_own_breakpoints() {
    // 10 minutes: too slow for any easy bonus, fastest tier for expert.
    assert_eq!(compute_xp_gain(Difficulty::Easy, 600.0, false), 2);
    assert_eq!(compute_xp_gain(Difficulty::Medium, 600.0, false), 4 + 1);
    assert_eq!(compute_xp_gain(Difficulty::Hard, 600.0, false), 6 + 2);
    assert_eq!(compute_xp_gain(Difficulty::Expert, 600.0, false), 8 + 3);
}

#[test]
fn difficulty_serializes_lowercase() {
    let json = serde_json::to_string(&Difficulty::Expert).expect("serialize");
    assert_eq!(json, "\"expert\"");
}
