//! Normalised inputs for desirability functions.  Every helper returns a
//! value in `[0, 1]`.

/// `current / max`, 0 when `max` is 0.
pub fn health(current: u32, max: u32) -> f64 {
    ratio(current, max)
}

/// `distance / max_distance`: 0 on top of the target, 1 at or beyond
/// `max_distance`.  A non-positive `max_distance` gives 1.
pub fn distance_score(distance: f64, max_distance: f64) -> f64 {
    if !(max_distance > 0.0) {
        return 1.0;
    }
    (distance / max_distance).clamp(0.0, 1.0)
}

/// Fraction of a weapon's ammo capacity that is loaded.
pub fn individual_weapon_strength(ammo: u32, max_ammo: u32) -> f64 {
    ratio(ammo, max_ammo)
}

/// Mean of the individual strengths of `(ammo, max_ammo)` pairs.
/// 0 for an empty arsenal.
pub fn total_weapon_strength(arsenal: impl IntoIterator<Item = (u32, u32)>) -> f64 {
    let (sum, count) = arsenal
        .into_iter()
        .fold((0.0, 0u32), |(s, n), (ammo, max)| (s + ratio(ammo, max), n + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

fn ratio(n: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(n) / f64::from(max)).clamp(0.0, 1.0)
}
