use serde_json::Value;

/// One spreadsheet cell before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    /// Numbers stay numbers: Excel stores dates as serials and phone numbers
    /// as plain integers.
    Number(f64),
}

impl RawCell {
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            RawCell::Number(n) => !n.is_finite(),
        }
    }

    /// Text form of the cell. Integral numbers render without a decimal part.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) if !n.is_finite() => String::new(),
            RawCell::Number(n) if n.fract() == 0.0 => format!("{:.0}", n),
            RawCell::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s.to_string())
        }
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(s)
        }
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl From<i64> for RawCell {
    fn from(n: i64) -> Self {
        RawCell::Number(n as f64)
    }
}

impl From<&Value> for RawCell {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => RawCell::Empty,
            Value::String(s) => RawCell::from(s.as_str()),
            Value::Number(n) => n.as_f64().map(RawCell::Number).unwrap_or(RawCell::Empty),
            Value::Bool(b) => RawCell::Text(b.to_string()),
            other => RawCell::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_numbers_render_without_decimals() {
        assert_eq!(RawCell::Number(81234567890.0).as_text(), "81234567890");
        assert_eq!(RawCell::Number(2.5).as_text(), "2.5");
        assert_eq!(RawCell::Empty.as_text(), "");
    }

    #[test]
    fn json_values_map_to_cells() {
        assert_eq!(RawCell::from(&json!(null)), RawCell::Empty);
        assert_eq!(RawCell::from(&json!("")), RawCell::Empty);
        assert_eq!(RawCell::from(&json!(45000)), RawCell::Number(45000.0));
        assert_eq!(RawCell::from(&json!("Budi")), RawCell::Text("Budi".into()));
        assert!(RawCell::from(&json!("   ")).is_empty());
    }
}
