//! Keyword tables behind the notability heuristic.
//!
//! All matching is lowercase substring containment. The category tables are
//! consulted through [`CATEGORY_RULES`], a prioritized list evaluated
//! top-to-bottom with first-match-wins; [`WESTERN_INDICATORS`] is an
//! independent additive signal. The score arithmetic downstream is tuned to
//! these tables (the inclusion threshold sits at 3), so table edits change
//! which records survive, not just their ordering.

use crate::notability::Category;

/// Entertainment occupations to include.
pub const ENTERTAINMENT_KEYWORDS: &[&str] = &[
    "actor",
    "actress",
    "singer",
    "musician",
    "rapper",
    "comedian",
    "director",
    "producer",
    "screenwriter",
    "filmmaker",
    "entertainer",
    "television host",
    "tv host",
    "talk show",
    "radio host",
    "model",
    "supermodel",
    "dancer",
    "choreographer",
    "composer",
    "songwriter",
    "rock",
    "pop",
    "country",
    "hip hop",
    "r&b",
    "jazz",
    "band",
    "youtube",
    "influencer",
    "tiktoker",
    "podcaster",
    "voice actor",
    "stand-up",
    "snl",
    "saturday night live",
];

/// Political/leadership occupations.
pub const POLITICS_KEYWORDS: &[&str] = &[
    "president",
    "prime minister",
    "senator",
    "congressman",
    "governor",
    "mayor",
    "politician",
    "political",
    "secretary of state",
    "ambassador",
    "supreme court",
    "justice",
    "attorney general",
    "minister",
    "chancellor",
    "monarch",
    "king",
    "queen",
    "prince",
    "princess",
    "first lady",
];

/// Science/innovation occupations.
pub const SCIENCE_KEYWORDS: &[&str] = &[
    "scientist",
    "physicist",
    "chemist",
    "biologist",
    "astronaut",
    "nasa",
    "inventor",
    "engineer",
    "mathematician",
    "nobel prize",
    "researcher",
    "professor",
    "doctor",
    "surgeon",
    "psychologist",
    "economist",
    "astronomer",
    "cosmologist",
    "geneticist",
    "neuroscientist",
];

/// Sports (major Western sports figures).
pub const SPORTS_KEYWORDS: &[&str] = &[
    "football player",
    "nfl",
    "quarterback",
    "basketball player",
    "nba",
    "baseball player",
    "mlb",
    "hockey player",
    "nhl",
    "soccer player",
    "tennis player",
    "golfer",
    "boxer",
    "wrestler",
    "wwe",
    "olympic",
    "athlete",
    "coach",
    "mvp",
    "hall of fame",
    "super bowl",
    "world series",
];

/// Western countries/nationalities and award contexts to prioritize.
pub const WESTERN_INDICATORS: &[&str] = &[
    "american",
    "british",
    "english",
    "canadian",
    "australian",
    "irish",
    "scottish",
    "welsh",
    "new zealand",
    "german",
    "french",
    "italian",
    "spanish",
    "dutch",
    "swedish",
    "norwegian",
    "danish",
    "belgian",
    "austrian",
    "swiss",
    "polish",
    "greek",
    "portuguese",
    "united states",
    "united kingdom",
    "hollywood",
    "broadway",
    "grammy",
    "oscar",
    "emmy",
    "tony award",
    "bafta",
    "golden globe",
];

/// Category tables in priority order; the first set that matches decides
/// the category and contributes its points.
pub const CATEGORY_RULES: &[(Category, &[&str], u32)] = &[
    (Category::Entertainment, ENTERTAINMENT_KEYWORDS, 3),
    (Category::Politics, POLITICS_KEYWORDS, 3),
    (Category::Science, SCIENCE_KEYWORDS, 3),
    (Category::Sports, SPORTS_KEYWORDS, 2),
];

/// True when any needle occurs in `haystack`. Callers lowercase first.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|kw| haystack.contains(kw))
}

/// True when `haystack` matches any category table (the union of the four
/// keyword sets, without materialising it).
pub fn any_notable_keyword(haystack: &str) -> bool {
    CATEGORY_RULES
        .iter()
        .any(|(_, set, _)| contains_any(haystack, set))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_rules_cover_all_four_tables() {
        assert!(any_notable_keyword("an american actress"));
        assert!(any_notable_keyword("former prime minister"));
        assert!(any_notable_keyword("renowned physicist"));
        assert!(any_notable_keyword("star quarterback"));
        assert!(!any_notable_keyword("a quiet librarian"));
    }

    #[test]
    fn matching_is_plain_substring_containment() {
        // "rock" matches inside larger words too; the tables accept that.
        assert!(contains_any("rocket pioneer", &["rock"]));
        assert!(!contains_any("ROCK", &["rock"]), "callers must lowercase");
    }
}
