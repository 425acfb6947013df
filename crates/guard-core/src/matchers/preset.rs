//! Preset matcher - containment against platform-maintained word lists
//!
//! The lists are maintained here, versioned with the code, and are not
//! user-editable. Rules reference them by name.

use super::{MatchOutcome, MatcherFault};

/// Baseline profanity list
const PROFANITY: &[&str] = &[
    "fuck", "shit", "damn", "ass", "bitch", "bastard", "crap", "dick", "piss",
];

/// Sexual content markers
const SEXUAL_CONTENT: &[&str] = &["porn", "xxx", "nsfw", "hentai", "onlyfans", "nude", "nudes"];

/// Slur list
const SLURS: &[&str] = &[
    "nigger", "faggot", "retard", "kike", "spic", "chink", "tranny",
];

/// Look up a preset word list by name
pub fn known_preset(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "profanity" => Some(PROFANITY),
        "sexual_content" => Some(SEXUAL_CONTENT),
        "slurs" => Some(SLURS),
        _ => None,
    }
}

/// Names of all available presets
pub fn preset_names() -> &'static [&'static str] {
    &["profanity", "sexual_content", "slurs"]
}

/// Match message content against the named presets
///
/// Same semantics as the keyword matcher: case-insensitive containment,
/// scanning presets in configured order and words in list order; the first
/// contained word is the reported fragment. An unknown preset name is a
/// fault, not a silent skip - rule creation validates names, so hitting one
/// here means the preset was retired after the rule was stored.
pub fn match_presets(content: &str, presets: &[String]) -> Result<MatchOutcome, MatcherFault> {
    let lowered = content.to_lowercase();
    for preset in presets {
        let words =
            known_preset(preset).ok_or_else(|| MatcherFault::UnknownPreset(preset.clone()))?;
        for word in words {
            if lowered.contains(word) {
                return Ok(MatchOutcome::Matched {
                    fragment: Some((*word).to_string()),
                });
            }
        }
    }
    Ok(MatchOutcome::NotMatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_profanity_word_matches() {
        let outcome = match_presets("this message has shit in it", &presets(&["profanity"]));
        assert_eq!(
            outcome.unwrap(),
            MatchOutcome::Matched {
                fragment: Some("shit".to_string())
            }
        );
    }

    #[test]
    fn test_clean_content_passes() {
        let outcome = match_presets("perfectly clean message", &presets(&["profanity"]));
        assert_eq!(outcome.unwrap(), MatchOutcome::NotMatched);
    }

    #[test]
    fn test_case_insensitive() {
        let outcome = match_presets("NSFW content here", &presets(&["sexual_content"]));
        assert!(outcome.unwrap().is_match());
    }

    #[test]
    fn test_unknown_preset_faults() {
        let outcome = match_presets("anything", &presets(&["profanity", "retired_list"]));
        assert_eq!(
            outcome,
            Err(MatcherFault::UnknownPreset("retired_list".to_string()))
        );
    }

    #[test]
    fn test_preset_order_breaks_ties() {
        // content matches words from both lists; the first configured preset wins
        let outcome = match_presets(
            "nsfw shit",
            &presets(&["sexual_content", "profanity"]),
        );
        assert_eq!(
            outcome.unwrap(),
            MatchOutcome::Matched {
                fragment: Some("nsfw".to_string())
            }
        );
    }

    #[test]
    fn test_all_names_resolve() {
        for name in preset_names() {
            assert!(known_preset(name).is_some());
        }
    }
}
