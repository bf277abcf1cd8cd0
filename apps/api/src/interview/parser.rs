//! Extracts interview questions from a numbered-list reply.
//!
//! A line counts as a question when, after trimming, it starts with an ASCII
//! digit or a literal `Q`. Everything up to and including the first `.` is
//! dropped as the enumeration marker. Lines that fit neither shape are
//! ignored, so a reply in an unexpected format yields fewer questions rather
//! than an error.

/// Parses at most `limit` questions out of `text`. Never panics.
pub fn parse_questions(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| is_enumerated(line))
        .filter_map(strip_marker)
        .take(limit)
        .collect()
}

fn is_enumerated(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit()) || line.starts_with('Q')
}

fn strip_marker(line: &str) -> Option<String> {
    let question = line
        .split_once('.')
        .map_or(line, |(_, rest)| rest)
        .trim();

    (!question.is_empty()).then(|| question.to_string())
}
