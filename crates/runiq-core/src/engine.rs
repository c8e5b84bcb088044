use std::io::{BufRead, Write};

use anyhow::Result;

use crate::key::derive_key;
use crate::options::{EmitMode, Options};

/// The single piece of pass state: the run of equal-key lines currently
/// being accumulated.
struct OpenGroup {
    /// First line of the run, emitted verbatim when the group closes.
    representative: String,
    /// Derived key the run is compared under.
    key: String,
    count: u64,
}

/// Collapse consecutive equal-key lines from `input` into `output`.
///
/// Single pass: a group opens at the first line (or whenever a key differs
/// from the open group's key), grows while keys match, and is closed through
/// the emit decision of `opts.mode` on mismatch or end of input. Non-adjacent
/// duplicates are never merged. Any I/O error aborts the pass; output written
/// before the failure stays written.
pub fn process(input: impl BufRead, output: &mut impl Write, opts: &Options) -> Result<()> {
    let mut open: Option<OpenGroup> = None;

    for line in input.lines() {
        let line = line?;
        let key = derive_key(&line, opts);

        match &mut open {
            Some(group) if group.key == key.as_ref() => group.count += 1,
            slot => {
                if let Some(group) = slot.take() {
                    emit(output, &group, opts.mode)?;
                }
                *slot = Some(OpenGroup {
                    key: key.into_owned(),
                    representative: line,
                    count: 1,
                });
            }
        }
    }

    // End of input flushes the open group through the same decision.
    if let Some(group) = open {
        emit(output, &group, opts.mode)?;
    }
    output.flush()?;
    Ok(())
}

fn emit(output: &mut impl Write, group: &OpenGroup, mode: EmitMode) -> Result<()> {
    if !mode.should_emit(group.count) {
        return Ok(());
    }
    match mode {
        EmitMode::Counted => writeln!(output, "{} {}", group.count, group.representative)?,
        _ => writeln!(output, "{}", group.representative)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    fn run(input: &str, opts: &Options) -> String {
        let mut out = Vec::new();
        process(Cursor::new(input), &mut out, opts).expect("pass should succeed");
        String::from_utf8(out).unwrap()
    }

    fn opts(mode: EmitMode) -> Options {
        Options {
            mode,
            ..Default::default()
        }
    }

    #[test]
    fn plain_collapses_adjacent_duplicates_only() {
        // Three groups: "a" x2, "b", "a". The trailing "a" is a new group.
        assert_eq!(run("a\na\nb\na\n", &opts(EmitMode::Plain)), "a\nb\na\n");
    }

    #[test]
    fn counted_prefixes_group_sizes() {
        assert_eq!(
            run("a\na\nb\na\n", &opts(EmitMode::Counted)),
            "2 a\n1 b\n1 a\n"
        );
    }

    #[test]
    fn duplicates_only_drops_singletons() {
        assert_eq!(run("a\na\nb\na\n", &opts(EmitMode::DuplicatesOnly)), "a\n");
    }

    #[test]
    fn uniques_only_drops_repeats() {
        assert_eq!(run("a\na\nb\na\n", &opts(EmitMode::UniquesOnly)), "b\na\n");
    }

    #[test]
    fn empty_input_produces_no_output() {
        assert_eq!(run("", &opts(EmitMode::Plain)), "");
        assert_eq!(run("", &opts(EmitMode::Counted)), "");
    }

    #[test]
    fn single_line_is_its_own_group() {
        assert_eq!(run("only\n", &opts(EmitMode::Counted)), "1 only\n");
    }

    #[test]
    fn last_group_flushes_at_end_of_input() {
        assert_eq!(run("x\nx\nx\n", &opts(EmitMode::Counted)), "3 x\n");
    }

    #[test]
    fn missing_final_newline_still_counts() {
        assert_eq!(run("a\na", &opts(EmitMode::Counted)), "2 a\n");
    }

    #[test]
    fn blank_lines_group_like_any_other() {
        assert_eq!(run("\n\nx\n\n", &opts(EmitMode::Counted)), "2 \n1 x\n1 \n");
    }

    #[test]
    fn ignore_case_groups_across_case() {
        let opts = Options {
            ignore_case: true,
            ..Default::default()
        };
        assert_eq!(run("Apple\napple\nAPPLE\nbanana\n", &opts), "Apple\nbanana\n");
    }

    #[test]
    fn emission_preserves_representative_not_key() {
        // Keys fold to lowercase but the first-seen spelling is printed.
        let opts = Options {
            mode: EmitMode::Counted,
            ignore_case: true,
            ..Default::default()
        };
        assert_eq!(run("LOUD\nloud\n", &opts), "2 LOUD\n");
    }

    #[test]
    fn skip_fields_groups_by_remainder() {
        let opts = Options {
            skip_fields: 1,
            ..Default::default()
        };
        // First field differs, remainder matches: one group.
        assert_eq!(run("1 same\n2 same\n3 other\n", &opts), "1 same\n3 other\n");
    }

    #[test]
    fn skip_chars_groups_by_suffix() {
        let opts = Options {
            mode: EmitMode::Counted,
            skip_chars: 3,
            ..Default::default()
        };
        assert_eq!(run("aaatail\nbbbtail\n", &opts), "2 aaatail\n");
    }

    #[test]
    fn lines_shorter_than_skip_share_the_empty_key() {
        let opts = Options {
            mode: EmitMode::Counted,
            skip_fields: 3,
            ..Default::default()
        };
        assert_eq!(run("a b\nc\n", &opts), "2 a b\n");
    }

    #[test]
    fn carriage_returns_are_stripped_before_comparison() {
        assert_eq!(run("a\r\na\r\nb\n", &opts(EmitMode::Plain)), "a\nb\n");
    }

    // -- failure propagation --

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "simulated read failure"))
        }
    }

    #[test]
    fn read_failure_aborts_the_pass() {
        let mut out = Vec::new();
        let result = process(
            BufReader::new(FailingReader),
            &mut out,
            &Options::default(),
        );
        assert!(result.is_err(), "read failure must surface to the caller");
        assert!(result.unwrap_err().to_string().contains("simulated"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "simulated write failure"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_aborts_the_pass() {
        let result = process(
            Cursor::new("a\nb\n"),
            &mut FailingWriter,
            &Options::default(),
        );
        assert!(result.is_err(), "write failure must surface to the caller");
    }
}
