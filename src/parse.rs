use crate::backend::BackendMode;

/// Convert a raw completion into an ordered command sequence.
///
/// The sequence has exactly one entry per line of the split — empty entries
/// included, in original order. Empties are skipped at dispatch time, not
/// here, so the line count survives parsing.
pub fn parse_completion(raw: &str, mode: BackendMode) -> Vec<String> {
    raw.split(mode.delimiter()).map(sanitize_line).collect()
}

/// Sanitize one response line into a dispatchable command string.
///
/// A line that is exactly one space becomes empty and gets no further
/// cleanup. Otherwise: drop a leading numbered-list marker, trim, drop a
/// markdown bullet before a slash command, drop the slash prefix itself
/// (the host executor takes commands without the chat-UI slash).
fn sanitize_line(line: &str) -> String {
    if line == " " {
        return String::new();
    }

    let mut line = strip_list_marker(line).trim();

    if line.starts_with("- /") {
        line = &line[2..];
    }

    line.strip_prefix('/').unwrap_or(line).to_string()
}

/// Strip "one or more digits, a period, optional whitespace" from the start
/// of the line. Anything else passes through untouched.
fn strip_list_marker(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
