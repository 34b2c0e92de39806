//! Keyword genre heuristic over title and author.
//!
//! The rule table is ordered and the first match wins. The order is part of
//! the contract: a "science of habits" title is self-help, not science.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Coarse content genre of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fantasy,
    Philosophy,
    Romance,
    Thriller,
    Literary,
    SciFi,
    Mystery,
    SelfHelp,
    Science,
    Medical,
    Business,
    History,
    Unknown,
}

/// Ordered keyword rules. Keywords are lowercase; a leading or trailing
/// space anchors the keyword at a word boundary in the padded haystack.
const RULES: &[(Genre, &[&str])] = &[
    (
        Genre::SelfHelp,
        &[
            "self-help", "self help", "habit", "mindset", "productivity", "motivation",
            "happiness", "confidence", "mindful", "personal growth", "the power of",
            "how to win", "life-changing", "subtle art", "deep work", " grit",
        ],
    ),
    (
        Genre::Medical,
        &[
            "medical", "medicine", "doctor", "surgeon", "surgery", "anatomy", "disease",
            "clinical", "nursing", "pharmac", "diagnos", "cancer", "patient", "health",
        ],
    ),
    (
        Genre::Science,
        &[
            "science", "physics", "chemistry", "biology", "universe", "cosmos", "quantum",
            " evolution", "genetic", "genome", "selfish gene", "neuroscience", "relativity",
            "brief history of time", "mathemat",
        ],
    ),
    (
        Genre::Business,
        &[
            "business", "startup", "entrepreneur", "leadership", "management", "marketing",
            "economic", "finance", "invest", "wealth", "money", "strategy", "capital",
            "zero to one", "rich dad",
        ],
    ),
    (
        Genre::History,
        &[
            "history", "historical", " war ", " wars", "empire", "century", "ancient",
            "revolution", "civilization", "dynasty", "medieval", "sapiens", "biography",
        ],
    ),
    (
        Genre::Fantasy,
        &[
            "fantasy", "magic", "wizard", "dragon", "lord of the rings", "hobbit", "sorcer",
            "witch", "throne", "kingdom", " elf", "elves", "sword", "fairy", "enchant",
            "harry potter", "narnia", "tolkien", "mistborn", "name of the wind",
        ],
    ),
    (
        Genre::Philosophy,
        &[
            "philosoph", "meditations", "ethics", "existential", "nietzsche", "plato",
            "aristotle", "stoic", "socrates", " kant", "camus", "sartre", "zarathustra",
            "the republic", "being and",
        ],
    ),
    (
        Genre::Romance,
        &[
            " romance", "love", "lover", "kiss", "bride", "wedding", "pride and prejudice",
            "austen", "passion", "darling", "sweetheart",
        ],
    ),
    (
        Genre::Thriller,
        &[
            "thriller", "killer", "conspiracy", "assassin", "gone girl", "girl on the train",
            " spy", "terror", "revenge", "deadly", "hunted", "fugitive",
        ],
    ),
    (
        Genre::Mystery,
        &[
            "mystery", "mysteries", "detective", "murder", "sherlock", "holmes", "christie",
            "poirot", "whodunit", "crime", "case of", "secret",
        ],
    ),
    (
        Genre::SciFi,
        &[
            "sci-fi", "dune", "robot", "galaxy", "galactic", "space", "alien", "android",
            "cyber", "starship", "dystopia", "martian", "planet", "foundation", "1984",
            "neuromancer", "time machine", "asimov",
        ],
    ),
];

/// Stateless keyword classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreClassifier;

impl GenreClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify from optional title and author. Never fails.
    ///
    /// Blank input yields [`Genre::Unknown`]; anything else that matches no
    /// rule is [`Genre::Literary`].
    ///
    /// ```
    /// use cover_palette::{Genre, GenreClassifier};
    ///
    /// let classifier = GenreClassifier::new();
    /// assert_eq!(classifier.classify(Some("Atomic Habits"), None), Genre::SelfHelp);
    /// assert_eq!(classifier.classify(Some("The Lord of the Rings"), None), Genre::Fantasy);
    /// assert_eq!(classifier.classify(None, None), Genre::Unknown);
    /// ```
    pub fn classify(&self, title: Option<&str>, author: Option<&str>) -> Genre {
        let title = title.unwrap_or("").trim();
        let author = author.unwrap_or("").trim();
        if title.is_empty() && author.is_empty() {
            return Genre::Unknown;
        }

        let haystack = format!(" {title} {author} ").to_lowercase();

        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
            .map_or(Genre::Literary, |(genre, _)| *genre)
    }
}

/// 0xRRGGBB -> Rgb
fn hex(rgb: u32) -> Rgb {
    Rgb::from_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

impl Genre {
    pub const ALL: [Genre; 13] = [
        Genre::Fantasy,
        Genre::Philosophy,
        Genre::Romance,
        Genre::Thriller,
        Genre::Literary,
        Genre::SciFi,
        Genre::Mystery,
        Genre::SelfHelp,
        Genre::Science,
        Genre::Medical,
        Genre::Business,
        Genre::History,
        Genre::Unknown,
    ];

    /// Genre whose palette tables apply; `Unknown` borrows Literary's.
    pub fn palette_genre(self) -> Genre {
        match self {
            Genre::Unknown => Genre::Literary,
            other => other,
        }
    }

    /// Four-color palette used when the cover cannot be read.
    pub fn fallback_palette(self) -> [Rgb; 4] {
        let table: [u32; 4] = match self.palette_genre() {
            Genre::Fantasy => [0x5B2A86, 0x1F6F8B, 0xC9A227, 0x2E8B57],
            Genre::Philosophy => [0x3D4B6E, 0x7A6C5D, 0xB08D57, 0x4F6D7A],
            Genre::Romance => [0xC2185B, 0xE57373, 0xF8BBD0, 0x8E244D],
            Genre::Thriller => [0xB71C1C, 0x263238, 0xFF6F00, 0x4A148C],
            Genre::SciFi => [0x00ACC1, 0x311B92, 0x00E5FF, 0x1A237E],
            Genre::Mystery => [0x37474F, 0x512DA8, 0x00897B, 0x6D4C41],
            Genre::SelfHelp => [0xFF8F00, 0xFFB300, 0x43A047, 0xF4511E],
            Genre::Science => [0x1565C0, 0x00838F, 0x7CB342, 0x5E35B1],
            Genre::Medical => [0x00897B, 0x0277BD, 0x80CBC4, 0xC62828],
            Genre::Business => [0x0D47A1, 0x455A64, 0x2E7D32, 0xF9A825],
            Genre::History => [0x8D6E63, 0xA1887F, 0x6D4C41, 0xBF8F3F],
            Genre::Literary | Genre::Unknown => [0x6A4C93, 0x8C6A5D, 0x3E6E8E, 0xC08552],
        };
        table.map(hex)
    }

    /// Signature tint mixed into white-cover palettes.
    pub fn mood_color(self) -> Rgb {
        hex(match self.palette_genre() {
            Genre::Fantasy => 0x7E57C2,
            Genre::Philosophy => 0x5C6BC0,
            Genre::Romance => 0xEC407A,
            Genre::Thriller => 0xE53935,
            Genre::SciFi => 0x26C6DA,
            Genre::Mystery => 0x7E57C2,
            Genre::SelfHelp => 0xFFA726,
            Genre::Science => 0x42A5F5,
            Genre::Medical => 0x26A69A,
            Genre::Business => 0x1E88E5,
            Genre::History => 0xA1887F,
            Genre::Literary | Genre::Unknown => 0x8D6E63,
        })
    }

    /// Stable kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fantasy => "fantasy",
            Genre::Philosophy => "philosophy",
            Genre::Romance => "romance",
            Genre::Thriller => "thriller",
            Genre::Literary => "literary",
            Genre::SciFi => "sci-fi",
            Genre::Mystery => "mystery",
            Genre::SelfHelp => "self-help",
            Genre::Science => "science",
            Genre::Medical => "medical",
            Genre::Business => "business",
            Genre::History => "history",
            Genre::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized genre name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre: {0}")]
pub struct ParseGenreError(pub String);

impl FromStr for Genre {
    type Err = ParseGenreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| ParseGenreError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(title: &str) -> Genre {
        GenreClassifier::new().classify(Some(title), None)
    }

    #[test]
    fn test_known_titles() {
        assert_eq!(classify("Atomic Habits"), Genre::SelfHelp);
        assert_eq!(classify("The Lord of the Rings"), Genre::Fantasy);
        assert_eq!(classify("Thriller Title"), Genre::Thriller);
        assert_eq!(classify("A Brief History of Time"), Genre::Science);
        assert_eq!(classify("The Murder of Roger Ackroyd"), Genre::Mystery);
        assert_eq!(classify("Dune"), Genre::SciFi);
        assert_eq!(classify("Meditations"), Genre::Philosophy);
        assert_eq!(classify("Pride and Prejudice"), Genre::Romance);
        assert_eq!(classify("The Lean Startup"), Genre::Business);
        assert_eq!(classify("The House of God: a doctor's story"), Genre::Medical);
        assert_eq!(classify("The Guns of August: World War I"), Genre::History);
    }

    #[test]
    fn test_rule_order_wins() {
        // business precedes fantasy
        assert_eq!(classify("The Magic of Business"), Genre::Business);
        // self-help precedes both
        assert_eq!(classify("Business Magic Habits"), Genre::SelfHelp);
        // fantasy on its own
        assert_eq!(classify("The Magic Circle"), Genre::Fantasy);
    }

    #[test]
    fn test_author_participates() {
        let genre = GenreClassifier::new().classify(Some("Collected Works"), Some("Plato"));
        assert_eq!(genre, Genre::Philosophy);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("THE HOBBIT"), Genre::Fantasy);
    }

    #[test]
    fn test_word_boundary_keywords() {
        // "war" inside "award" or "Edward" is not history
        assert_eq!(classify("Edward's Award"), Genre::Literary);
        assert_eq!(classify("War and Peace"), Genre::History);
    }

    #[test]
    fn test_keywords_inside_longer_words() {
        assert_eq!(classify("The French Revolution"), Genre::History);
        assert_eq!(classify("On the Origin of Species: Evolution"), Genre::Science);
        let genre = GenreClassifier::new().classify(Some("Neuromancer"), Some("William Gibson"));
        assert_eq!(genre, Genre::SciFi);
        assert_eq!(classify("A Regency Romance"), Genre::Romance);
    }

    #[test]
    fn test_no_keyword_shadowed_by_earlier_rule() {
        for (i, (earlier_genre, earlier)) in RULES.iter().enumerate() {
            for (later_genre, later) in &RULES[i + 1..] {
                for keyword in *later {
                    let padded = format!(" {keyword} ");
                    for shadow in *earlier {
                        assert!(
                            !padded.contains(shadow),
                            "{later_genre} keyword {keyword:?} always matches \
                             {earlier_genre} keyword {shadow:?} first"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_blank_is_unknown_unmatched_is_literary() {
        let classifier = GenreClassifier::new();
        assert_eq!(classifier.classify(None, None), Genre::Unknown);
        assert_eq!(classifier.classify(Some("   "), Some("")), Genre::Unknown);
        assert_eq!(classify("Middlemarch"), Genre::Literary);
    }

    #[test]
    fn test_unknown_uses_literary_tables() {
        assert_eq!(Genre::Unknown.fallback_palette(), Genre::Literary.fallback_palette());
        assert_eq!(Genre::Unknown.mood_color(), Genre::Literary.mood_color());
    }

    #[test]
    fn test_name_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(genre.to_string().parse::<Genre>().unwrap(), genre);
        }
        assert!("poetry".parse::<Genre>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).unwrap();
            assert_eq!(json, format!("\"{genre}\""));
        }
    }
}
