//! Quoting helpers for values handed to a process launcher as single arguments.

const QUOTE_TRIGGERS: [char; 4] = [' ', '&', '(', ')'];

/// Wrap `value` in double quotes when it contains a space, `&`, `(` or `)`.
///
/// Values that already start or end with a double quote are left alone, as is
/// the empty string.
pub fn quote_for_command_line(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(&QUOTE_TRIGGERS[..]);
    if needs_quotes && !value.starts_with('"') && !value.ends_with('"') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Quote a file path for the command line and normalize separators to `/`.
pub fn file_to_command_argument(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    quote_for_command_line(path).replace('\\', "/")
}
