//! Turns a raw input line into an [`Expression`].
//!
//! The grammar is one fixed shape:
//! `cmd1 [args] [< infile] | cmd2 [args] | ... | cmdN [args] [> outfile] [&]`.
//! There is no quoting, no globbing and no operator precedence; words are
//! whitespace-separated and the three markers are recognized by position.

use crate::command::{Command, Expression};
use std::path::PathBuf;

/// Split `line` on `delim` without ever yielding empty chunks: runs of the
/// delimiter collapse to one split point, leading and trailing delimiters are
/// ignored.
fn split_collapsed(line: &str, delim: char) -> Vec<&str> {
    line.split(delim).filter(|chunk| !chunk.is_empty()).collect()
}

/// Tokenize one pipeline segment into words. Runs of whitespace collapse; no
/// empty words are produced.
fn split_words(segment: &str) -> Vec<String> {
    segment.split_whitespace().map(str::to_owned).collect()
}

/// Parse a raw input line into an [`Expression`].
///
/// The line is split on `|` into segments and each segment into words, then
/// three markers are stripped, in this fixed order:
///
/// 1. on the last segment, a trailing `&` (at least two words) sets the
///    background flag;
/// 2. on the last segment, a second-to-last `>` (at least three words) takes
///    the final word as the output path;
/// 3. on the first segment, a second-to-last `<` (at least three words) takes
///    the final word as the input path.
///
/// Whatever remains of each segment becomes one [`Command`]. The marker
/// checks look at positions, not meaning: a `>` in the middle of a segment is
/// an ordinary word, and an all-whitespace segment becomes an empty
/// `Command`. The `<` check deliberately keys on the second-to-last word, so
/// the redirect does not have to follow the program name directly.
pub fn parse_command_line(line: &str) -> Expression {
    let mut expression = Expression::default();
    let segments = split_collapsed(line, '|');
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        let mut words = split_words(segment);

        if i == last && words.len() >= 2 && words[words.len() - 1] == "&" {
            expression.background = true;
            words.truncate(words.len() - 1);
        }
        if i == last && words.len() >= 3 && words[words.len() - 2] == ">" {
            expression.output_to_file = Some(PathBuf::from(&words[words.len() - 1]));
            words.truncate(words.len() - 2);
        }
        if i == 0 && words.len() >= 3 && words[words.len() - 2] == "<" {
            expression.input_from_file = Some(PathBuf::from(&words[words.len() - 1]));
            words.truncate(words.len() - 2);
        }

        expression.commands.push(Command { parts: words });
    }

    expression
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(parts: &[&str]) -> Command {
        Command {
            parts: parts.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_split_words_collapses_separators() {
        assert_eq!(split_words(""), Vec::<String>::new());
        assert_eq!(split_words("   "), Vec::<String>::new());
        assert_eq!(split_words("foo"), vec!["foo"]);
        assert_eq!(split_words("  foo  "), vec!["foo"]);
        assert_eq!(split_words("foo   bar"), vec!["foo", "bar"]);
        assert_eq!(
            split_words("cmd1 arg1 < inputfile"),
            vec!["cmd1", "arg1", "<", "inputfile"]
        );
    }

    #[test]
    fn test_whitespace_runs_do_not_change_the_parse() {
        assert_eq!(
            parse_command_line("  ls   -la  "),
            parse_command_line("ls -la")
        );
        assert_eq!(
            parse_command_line("cat  <  in  |  wc"),
            parse_command_line("cat < in | wc")
        );
    }

    #[test]
    fn test_plain_command_round_trip() {
        let expression = parse_command_line("ls -la /tmp");
        assert_eq!(expression.commands, vec![cmd(&["ls", "-la", "/tmp"])]);
        assert_eq!(expression.input_from_file, None);
        assert_eq!(expression.output_to_file, None);
        assert!(!expression.background);
    }

    #[test]
    fn test_redirects_on_both_ends() {
        let expression = parse_command_line("cmd1 arg1 < inputfile | cmd2 arg2 > outputfile");
        assert_eq!(
            expression.commands,
            vec![cmd(&["cmd1", "arg1"]), cmd(&["cmd2", "arg2"])]
        );
        assert_eq!(expression.input_from_file, Some(PathBuf::from("inputfile")));
        assert_eq!(expression.output_to_file, Some(PathBuf::from("outputfile")));
        assert!(!expression.background);
    }

    #[test]
    fn test_marker_order_is_background_then_output_then_input() {
        let expression = parse_command_line("tr a-z A-Z < in > out &");
        assert!(expression.background);
        assert_eq!(expression.input_from_file, Some(PathBuf::from("in")));
        assert_eq!(expression.output_to_file, Some(PathBuf::from("out")));
        assert_eq!(expression.commands, vec![cmd(&["tr", "a-z", "A-Z"])]);
    }

    #[test]
    fn test_background_needs_a_command_word() {
        let expression = parse_command_line("sleep 5 &");
        assert!(expression.background);
        assert_eq!(expression.commands, vec![cmd(&["sleep", "5"])]);

        // a lone `&` is not a marker, it is (nonsense) argv
        let expression = parse_command_line("&");
        assert!(!expression.background);
        assert_eq!(expression.commands, vec![cmd(&["&"])]);
    }

    #[test]
    fn test_short_marker_sequences_stay_words() {
        let expression = parse_command_line("> out");
        assert_eq!(expression.output_to_file, None);
        assert_eq!(expression.commands, vec![cmd(&[">", "out"])]);

        let expression = parse_command_line("< in");
        assert_eq!(expression.input_from_file, None);
        assert_eq!(expression.commands, vec![cmd(&["<", "in"])]);
    }

    #[test]
    fn test_input_marker_applies_to_first_segment_only() {
        let expression = parse_command_line("cat | head < in");
        assert_eq!(expression.input_from_file, None);
        assert_eq!(
            expression.commands,
            vec![cmd(&["cat"]), cmd(&["head", "<", "in"])]
        );
    }

    #[test]
    fn test_output_marker_applies_to_last_segment_only() {
        let expression = parse_command_line("cat > out | wc");
        assert_eq!(expression.output_to_file, None);
        assert_eq!(
            expression.commands,
            vec![cmd(&["cat", ">", "out"]), cmd(&["wc"])]
        );
    }

    #[test]
    fn test_pipe_runs_collapse() {
        let expression = parse_command_line("ls || wc");
        assert_eq!(expression.commands, vec![cmd(&["ls"]), cmd(&["wc"])]);

        let expression = parse_command_line("| ls |");
        assert_eq!(expression.commands, vec![cmd(&["ls"])]);
    }

    #[test]
    fn test_blank_segment_becomes_empty_command() {
        let expression = parse_command_line("ls | | wc");
        assert_eq!(
            expression.commands,
            vec![cmd(&["ls"]), cmd(&[]), cmd(&["wc"])]
        );
    }

    #[test]
    fn test_empty_line_yields_no_commands() {
        assert_eq!(parse_command_line("").commands, Vec::new());
        // blank input is one segment and becomes one empty command
        assert_eq!(parse_command_line("   ").commands, vec![cmd(&[])]);
    }
}
