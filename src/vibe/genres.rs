/// Genres accepted as recommendation seeds.
pub const GENRE_WHITELIST: [&str; 25] = [
    "rock",
    "pop",
    "jazz",
    "classical",
    "metal",
    "hip-hop",
    "electronic",
    "indie",
    "blues",
    "folk",
    "soul",
    "reggae",
    "country",
    "r-n-b",
    "funk",
    "punk",
    "alternative",
    "dance",
    "house",
    "techno",
    "ambient",
    "chill",
    "acoustic",
    "latin",
    "world-music",
];

pub const MAX_GENRES: usize = 5;
pub const DEFAULT_GENRE: &str = "pop";

const ALIASES: [(&str, &str); 5] = [
    ("rnb", "r-n-b"),
    ("r&b", "r-n-b"),
    ("hiphop", "hip-hop"),
    ("hip hop", "hip-hop"),
    ("edm", "electronic"),
];

pub fn is_known_genre(genre: &str) -> bool {
    GENRE_WHITELIST.contains(&genre)
}

/// Normalizes a single tag: lowercase, trimmed, aliases rewritten.
pub fn normalize_genre(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(tag)
}

/// Filters tags down to whitelisted genres.
///
/// Order is preserved and the result always holds between one and
/// [`MAX_GENRES`] entries; an empty outcome becomes [`DEFAULT_GENRE`].
pub fn validate_genres<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut genres: Vec<String> = tags
        .iter()
        .map(|tag| normalize_genre(tag.as_ref()))
        .filter(|tag| is_known_genre(tag))
        .take(MAX_GENRES)
        .collect();

    if genres.is_empty() {
        genres.push(DEFAULT_GENRE.to_string());
    }
    genres
}
