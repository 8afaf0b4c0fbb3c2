use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameParts {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
}

/// Splits a full name on whitespace: first token, inner tokens, last token.
pub fn split_full_name(raw: &str) -> NameParts {
    let tokens: Vec<String> = raw.split_whitespace().map(title_case).collect();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [first] => NameParts {
            first_name: first.clone(),
            ..NameParts::default()
        },
        [first, last] => NameParts {
            first_name: first.clone(),
            middle_name: String::new(),
            last_name: last.clone(),
        },
        [first, middle @ .., last] => NameParts {
            first_name: first.clone(),
            middle_name: middle.join(" "),
            last_name: last.clone(),
        },
    }
}

/// Capitalizes the first letter of every space- or hyphen-separated segment
/// and lowercases the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_boundary = true;
    for c in raw.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_boundary = c == ' ' || c == '-';
    }
    out
}
