/// Remove line comments starting with `prefix` from JSON text.
///
/// On every line, everything from the first occurrence of `prefix` that is
/// outside a string literal up to the end of the line is dropped. Line
/// breaks are kept so parse errors still report the original line numbers.
pub fn strip_comments(source: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    for segment in source.split_inclusive('\n') {
        let (line, newline) = match segment.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (segment, ""),
        };
        match find_comment_start(line, prefix) {
            Some(idx) => out.push_str(&line[..idx]),
            None => out.push_str(line),
        }
        out.push_str(newline);
    }
    out
}

/// Byte offset of the first `prefix` outside a string literal.
///
/// JSON strings cannot span lines, so the scan state starts fresh on every line.
fn find_comment_start(line: &str, prefix: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;

    for (idx, c) in line.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if line[idx..].starts_with(prefix) {
            return Some(idx);
        }
        if c == '"' {
            in_string = true;
        }
    }

    None
}
