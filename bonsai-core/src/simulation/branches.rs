use bonsai_schemas::{bonsai::Branch, style::StyleProfile};
use rand::Rng;

/// Generates a fresh branch set for a style.
///
/// `difficulty + 2` branches fan out evenly across 90 degrees centered on
/// the trunk angle. Lengths are drawn from `[10, 30)`; the random source is
/// injected so callers can replay a layout from a seed.
pub fn generate<R: Rng>(profile: &StyleProfile, rng: &mut R) -> Vec<Branch> {
    let count = profile.difficulty as usize + 2;
    (0..count)
        .map(|i| Branch {
            length: rng.gen_range(10.0..30.0),
            angle_deg: profile.trunk_angle_deg + (-45.0 + i as f64 * (90.0 / (count - 1) as f64)),
            health: 100.0,
        })
        .collect()
}
