use super::cell::RawCell;

/// Normalizes a phone cell to a `", "`-separated list of local Indonesian
/// numbers (`08…`).
///
/// Two numbers typed into one cell as `0813…X0821…` are split apart, as are
/// comma-separated lists, so the output reads back unchanged.
pub fn normalize_phone(cell: &RawCell) -> String {
    let text = match cell {
        RawCell::Empty => return String::new(),
        RawCell::Number(n) if !n.is_finite() => return String::new(),
        // Spreadsheets store bare numbers; render them whole, never 8.12e10.
        RawCell::Number(n) => format!("{:.0}", n.trunc()),
        RawCell::Text(s) => s.clone(),
    };

    split_numbers(&text)
        .into_iter()
        .map(normalize_number)
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits on commas and on an uppercase `X` with a digit on both sides.
fn split_numbers(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &(pos, c)) in chars.iter().enumerate() {
        let joins_two_numbers = c == 'X'
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1].1.is_ascii_digit()
            && chars[i + 1].1.is_ascii_digit();
        if c == ',' || joins_two_numbers {
            parts.push(&text[start..pos]);
            start = pos + c.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

fn normalize_number(token: &str) -> String {
    let digits: String = token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if let Some(rest) = digits.strip_prefix("+62") {
        format!("0{rest}")
    } else if digits.starts_with("62") && digits.len() >= 11 {
        format!("0{}", &digits[2..])
    } else if digits.starts_with('8') {
        format!("0{digits}")
    } else {
        digits
    }
}
