// Line codec for the quickphrase file format
//
// One entry per line: keyword, a tab, the phrase, a newline. Parsing accepts
// any whitespace as the separator and collapses whitespace runs inside each
// field, so parse/serialize is deliberately not a strict inverse pair; see
// codec_test.rs. Changing that would break compatibility with existing files.

use crate::entry::PhraseEntry;

/// Parse quickphrase file text into entries.
///
/// Each line is simplified (trimmed, internal whitespace runs collapsed to
/// single spaces); the first token is the keyword and the remaining tokens,
/// joined by single spaces, form the phrase. Lines that are empty or missing
/// either field after simplification are skipped. Malformed input is never an
/// error here: the editor exists to let a user fix bad data interactively.
pub fn parse(text: &str) -> Vec<PhraseEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let phrase = tokens.collect::<Vec<_>>().join(" ");
        if phrase.is_empty() {
            continue;
        }
        entries.push(PhraseEntry::new(keyword, phrase));
    }
    entries
}

/// Serialize entries into quickphrase file text, one `keyword\tphrase` line
/// per entry, in sequence order. Fields are written as-is; whitespace is only
/// ever collapsed on the way back in.
pub fn serialize(entries: &[PhraseEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.keyword);
        out.push('\t');
        out.push_str(&entry.phrase);
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
