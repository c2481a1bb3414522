/// Reduce free text to a plain string: markup tags are stripped, control
/// characters other than whitespace are dropped, and quotes are encoded as
/// numeric entities.
///
/// A `<` only opens a tag when a non-whitespace character follows it, so
/// comparisons such as `a < b` survive. An opened tag that never closes runs
/// to the end of the input.
pub fn sanitize_plain_text(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }

        match c {
            '<' if chars.peek().is_some_and(|next| !next.is_whitespace()) => in_tag = true,
            '\'' => output.push_str("&#39;"),
            '"' => output.push_str("&#34;"),
            '\t' | '\n' | '\r' => output.push(c),
            // Stricter than the legacy string filter, which only removed NUL
            c if c.is_control() => {}
            c => output.push(c),
        }
    }

    output
}
