//! Keyword matcher - case-insensitive containment against a configured list

use super::MatchOutcome;

/// Match message content against a configured keyword list
///
/// Keywords are scanned in configured order and the first one contained in
/// the content (case-insensitive) is reported as the matched fragment. The
/// tie-break is configured-list order, not position in the content.
pub fn match_keywords(content: &str, keywords: &[String]) -> MatchOutcome {
    let lowered = content.to_lowercase();
    for keyword in keywords {
        if lowered.contains(&keyword.to_lowercase()) {
            return MatchOutcome::Matched {
                fragment: Some(keyword.clone()),
            };
        }
    }
    MatchOutcome::NotMatched
}
