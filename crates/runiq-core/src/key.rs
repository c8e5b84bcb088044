use std::borrow::Cow;

use crate::options::Options;

/// Fields are delimited purely by runs of this separator. Tabs and other
/// whitespace are ordinary field content.
const FIELD_SEPARATOR: char = ' ';

/// Derive the comparison key for a line: skip leading fields, then leading
/// characters, then optionally fold case.
///
/// Borrows from the line whenever no case folding is required.
pub fn derive_key<'a>(line: &'a str, opts: &Options) -> Cow<'a, str> {
    let mut rest = line;
    if opts.skip_fields > 0 {
        rest = skip_fields(rest, opts.skip_fields);
    }
    if opts.skip_chars > 0 {
        rest = skip_chars(rest, opts.skip_chars);
    }

    if opts.ignore_case {
        Cow::Owned(rest.to_lowercase())
    } else {
        Cow::Borrowed(rest)
    }
}

/// Skip `count` space-delimited fields, then the separator run that follows
/// them. Lines with fewer than `count` fields reduce to the empty remainder.
fn skip_fields(line: &str, count: usize) -> &str {
    let mut rest = line;
    for _ in 0..count {
        rest = rest.trim_start_matches(FIELD_SEPARATOR);
        rest = rest.trim_start_matches(|c| c != FIELD_SEPARATOR);
    }
    rest.trim_start_matches(FIELD_SEPARATOR)
}

/// Advance by `count` characters, clamped to the end of the line. Counts
/// characters rather than bytes so multi-byte input never splits mid-char.
fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}
