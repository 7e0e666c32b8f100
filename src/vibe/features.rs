use crate::types::AudioFeatures;

const HIGH_ENERGY: [&str; 3] = ["high energy", "workout", "pumped"];
const LOW_ENERGY: [&str; 3] = ["chill", "relax", "calm"];
const HIGH_VALENCE: [&str; 3] = ["happy", "upbeat", "celebration"];
const LOW_VALENCE: [&str; 3] = ["sad", "melancholy", "nostalgic"];
const DANCEABLE: [&str; 3] = ["dance", "party", "club"];

/// Derives audio-feature targets from keywords in the vibe.
///
/// Every feature starts at 0.5. Within a feature only the first matching
/// rule applies; features are evaluated independently of each other.
pub fn map_features(vibe: &str) -> AudioFeatures {
    let vibe = vibe.to_lowercase();
    let mut features = AudioFeatures::default();

    if contains_any(&vibe, &HIGH_ENERGY) {
        features.energy = 0.8;
    } else if contains_any(&vibe, &LOW_ENERGY) {
        features.energy = 0.3;
    }

    if contains_any(&vibe, &HIGH_VALENCE) {
        features.valence = 0.8;
    } else if contains_any(&vibe, &LOW_VALENCE) {
        features.valence = 0.2;
    }

    if contains_any(&vibe, &DANCEABLE) {
        features.danceability = 0.8;
    }

    features
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_range(f: &AudioFeatures) -> bool {
        [f.energy, f.valence, f.danceability]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    #[test]
    fn no_keywords_keeps_defaults() {
        let f = map_features("rainy tuesday afternoon");
        assert_eq!(f, AudioFeatures::default());
    }

    #[test]
    fn high_energy_dance_party() {
        let f = map_features("high energy dance party");
        assert_eq!(f.energy, 0.8);
        assert_eq!(f.danceability, 0.8);
        assert_eq!(f.valence, 0.5);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let f = map_features("Calm and NOSTALGIC");
        assert_eq!(f.energy, 0.3);
        assert_eq!(f.valence, 0.2);
        assert_eq!(f.danceability, 0.5);
    }

    #[test]
    fn first_rule_wins_within_a_feature() {
        // both an energetic and a calm keyword: the energetic rule is checked first
        let f = map_features("pumped but calm, happy yet sad");
        assert_eq!(f.energy, 0.8);
        assert_eq!(f.valence, 0.8);
    }

    #[test]
    fn bare_energy_does_not_raise_energy() {
        let f = map_features("coding energy");
        assert_eq!(f.energy, 0.5);
    }

    #[test]
    fn values_always_in_unit_range() {
        for vibe in [
            "",
            "workout",
            "relax",
            "celebration club",
            "melancholy",
            "party party party",
            "ünïcödé chill ✨",
        ] {
            assert!(in_range(&map_features(vibe)), "out of range for {vibe:?}");
        }
    }
}
