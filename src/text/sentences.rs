// src/text/sentences.rs
//! Punctuation-driven sentence splitter.

const ENDERS: [char; 3] = ['.', '!', '?'];

/// Split into sentences on `.`, `!`, `?`, keeping the terminator.
/// Each emitted sentence is trimmed; buffers that trim to nothing are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut buf = String::new();

    for ch in text.chars() {
        buf.push(ch);
        if ENDERS.contains(&ch) {
            push_trimmed(&mut out, &buf);
            buf.clear();
        }
    }
    push_trimmed(&mut out, &buf);
    out
}

fn push_trimmed(out: &mut Vec<String>, buf: &str) {
    let s = buf.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_keeps_terminators() {
        let s = split_sentences("good doctor. rude desk! why? ok then");
        assert_eq!(s, vec!["good doctor.", "rude desk!", "why?", "ok then"]);
    }

    #[test]
    fn empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn repeated_terminators_become_own_sentences() {
        // "great!!" -> "great!" then "!" (non-empty after trim)
        assert_eq!(split_sentences("great!!"), vec!["great!", "!"]);
        assert_eq!(split_sentences("fine. "), vec!["fine."]);
    }
}
