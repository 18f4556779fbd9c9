/// Filesystem-reserved characters and the lookalikes that replace them.
///
/// Each replacement is a single code point outside this table, so applying
/// the substitution twice gives the same result as applying it once.
const LOOKALIKES: [(char, char); 8] = [
    ('<', '\u{FE64}'),  // ﹤
    ('>', '\u{FE65}'),  // ﹥
    (':', '\u{02D0}'),  // ː
    ('/', '\u{2044}'),  // ⁄
    ('\\', '\u{2216}'), // ∖
    ('|', '\u{2F01}'),  // ⼁
    ('?', '\u{FE56}'),  // ﹖
    ('*', '\u{FE61}'),  // ﹡
];

/// Replace characters that NTFS and friends refuse in file names with
/// visually similar Unicode characters.
///
/// Total and length-preserving in code points; everything not in the
/// table passes through unchanged.
pub fn sanitize(text: &str) -> String {
    text.chars().map(substitute).collect()
}

fn substitute(c: char) -> char {
    LOOKALIKES
        .iter()
        .find(|(unsafe_char, _)| *unsafe_char == c)
        .map_or(c, |(_, replacement)| *replacement)
}
