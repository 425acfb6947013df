//! Mention-spam matcher - counts mention tokens against a configured limit

use super::MatchOutcome;

/// Count user mention tokens (`<@123>` / `<@!123>`) in message content
pub fn count_mentions(content: &str) -> u32 {
    let bytes = content.as_bytes();
    let mut count = 0u32;
    let mut i = 0;
    while i + 2 < bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1] == b'@' {
            let mut j = i + 2;
            // nickname mention form
            if j < bytes.len() && bytes[j] == b'!' {
                j += 1;
            }
            let digits_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > digits_start && j < bytes.len() && bytes[j] == b'>' {
                count += 1;
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    count
}

/// Match message content against a mention limit
///
/// Triggers strictly when the count exceeds the limit: a limit of 3 allows
/// exactly 3 mentions and blocks 4 or more. No fragment is produced for this
/// trigger kind.
pub fn match_mention_spam(content: &str, mention_limit: u32) -> MatchOutcome {
    if count_mentions(content) > mention_limit {
        MatchOutcome::Matched { fragment: None }
    } else {
        MatchOutcome::NotMatched
    }
}
