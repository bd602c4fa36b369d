use conjure::backend::BackendMode;
use conjure::parse::parse_completion;

// ---------------------------------------------------------------------------
// Line splitting follows the active backend mode's delimiter convention.
// ---------------------------------------------------------------------------

#[test]
fn local_split_preserves_line_count() {
    let raw = "say hello\n/time set day\n\nweather clear";
    let commands = parse_completion(raw, BackendMode::Local);
    assert_eq!(commands.len(), raw.split('\n').count());
}

#[test]
fn remote_mode_splits_on_escape_sequence() {
    // Remote completions historically carried newlines as the two-character
    // sequence backslash-n.
    let raw = r"1. say hello\n2. /time set day";
    let commands = parse_completion(raw, BackendMode::Remote);
    assert_eq!(commands, vec!["say hello", "time set day"]);
}

#[test]
fn local_mode_does_not_split_on_escape_sequence() {
    let raw = r"say hello\nsay world";
    let commands = parse_completion(raw, BackendMode::Local);
    assert_eq!(commands.len(), 1);
}

#[test]
fn empty_raw_yields_single_empty_entry() {
    assert_eq!(parse_completion("", BackendMode::Local), vec![""]);
    assert_eq!(parse_completion("", BackendMode::Remote), vec![""]);
}

// ---------------------------------------------------------------------------
// Per-line sanitization rules.
// ---------------------------------------------------------------------------

#[test]
fn single_space_line_becomes_empty_unconditionally() {
    assert_eq!(parse_completion(" ", BackendMode::Local), vec![""]);
    // Sandwiched between real lines too.
    let commands = parse_completion("say hi\n \nsay bye", BackendMode::Local);
    assert_eq!(commands, vec!["say hi", "", "say bye"]);
}

#[test]
fn numbered_list_marker_is_stripped() {
    assert_eq!(
        parse_completion("1. say hello", BackendMode::Local),
        vec!["say hello"]
    );
    assert_eq!(
        parse_completion("12.weather clear", BackendMode::Local),
        vec!["weather clear"]
    );
    assert_eq!(
        parse_completion("3.   time set day", BackendMode::Local),
        vec!["time set day"]
    );
}

#[test]
fn digits_without_period_are_not_a_marker() {
    assert_eq!(parse_completion("42 fish", BackendMode::Local), vec!["42 fish"]);
}

#[test]
fn leading_slash_is_stripped_once() {
    assert_eq!(parse_completion("/say hi", BackendMode::Local), vec!["say hi"]);
    // Only one slash comes off.
    assert_eq!(parse_completion("//say hi", BackendMode::Local), vec!["/say hi"]);
}

#[test]
fn bullet_before_slash_command_is_stripped() {
    assert_eq!(
        parse_completion("- /gamemode creative", BackendMode::Local),
        vec!["gamemode creative"]
    );
    // A bullet without a slash is left alone.
    assert_eq!(
        parse_completion("- say hi", BackendMode::Local),
        vec!["- say hi"]
    );
}

#[test]
fn lines_are_trimmed() {
    assert_eq!(parse_completion("  say hi  ", BackendMode::Local), vec!["say hi"]);
    assert_eq!(parse_completion("  /say hi", BackendMode::Local), vec!["say hi"]);
}

#[test]
fn short_lines_get_the_same_transforms() {
    // No minimum-length special case: a two-character line is processed
    // like any other.
    assert_eq!(parse_completion("/x", BackendMode::Local), vec!["x"]);
}

// ---------------------------------------------------------------------------
// End-to-end scenarios.
// ---------------------------------------------------------------------------

#[test]
fn scenario_numbered_list_with_trailing_newline() {
    let raw = "1. say hello\n2. /time set day\n";
    let commands = parse_completion(raw, BackendMode::Local);
    assert_eq!(commands, vec!["say hello", "time set day", ""]);
}

#[test]
fn scenario_markdown_bullet() {
    let commands = parse_completion("- /gamemode creative", BackendMode::Local);
    assert_eq!(commands, vec!["gamemode creative"]);
}

#[test]
fn order_is_preserved() {
    let raw = "say one\nsay two\nsay three";
    let commands = parse_completion(raw, BackendMode::Local);
    assert_eq!(commands, vec!["say one", "say two", "say three"]);
}
