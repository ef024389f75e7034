// 🌍 Number Locale
// Decimal/grouping separators and lenient locale-aware decimal parsing
//
// Worth columns come from spreadsheets saved in whatever locale the author used:
// "1,234.50" (en), "1.234,50" (de), "1 234,50" (fr).

use std::env;

/// Separators used to read numbers in one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal: char,
    pub grouping: char,
}

const NBSP: char = '\u{a0}';

/// Languages writing "1.234,5"
const COMMA_DECIMAL_DOT_GROUPING: &[&str] = &[
    "de", "es", "it", "pt", "nl", "da", "id", "tr", "el", "ro", "hr", "sl", "sr", "vi", "ca",
];

/// Languages writing "1 234,5"
const COMMA_DECIMAL_SPACE_GROUPING: &[&str] = &[
    "fr", "ru", "pl", "cs", "sk", "sv", "fi", "nb", "nn", "no", "uk", "hu", "bg", "lt", "lv",
    "et",
];

impl NumberLocale {
    /// "1,234.5"
    pub const ENGLISH: NumberLocale = NumberLocale {
        decimal: '.',
        grouping: ',',
    };

    pub fn new(decimal: char, grouping: char) -> Self {
        NumberLocale { decimal, grouping }
    }

    /// Build from a POSIX-style locale tag: "de_DE.UTF-8", "fr-CA", "en", "C".
    /// Unknown languages read numbers the English way.
    pub fn from_tag(tag: &str) -> Self {
        let base = tag.split(['.', '@']).next().unwrap_or("");
        let mut parts = base.split(['_', '-']);
        let lang = parts.next().unwrap_or("").to_lowercase();
        let region = parts.next().unwrap_or("").to_uppercase();

        match (lang.as_str(), region.as_str()) {
            // Swiss German/Italian keep the dot as decimal separator
            ("de" | "it", "CH") | ("de", "LI") => NumberLocale::new('.', '\''),
            ("es", "MX" | "US") => NumberLocale::ENGLISH,
            (l, _) if COMMA_DECIMAL_DOT_GROUPING.contains(&l) => NumberLocale::new(',', '.'),
            (l, _) if COMMA_DECIMAL_SPACE_GROUPING.contains(&l) => NumberLocale::new(',', NBSP),
            _ => NumberLocale::ENGLISH,
        }
    }

    /// Locale of the running process: LC_ALL, then LC_NUMERIC, then LANG.
    pub fn from_env() -> Self {
        NumberLocale::from_vars(|var| env::var(var).ok())
    }

    /// Same precedence as `from_env`, reading variables through `lookup`.
    /// Unset or blank variables are passed over.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        ["LC_ALL", "LC_NUMERIC", "LANG"]
            .iter()
            .filter_map(|var| lookup(*var))
            .find(|value| !value.trim().is_empty())
            .map(|tag| NumberLocale::from_tag(&tag))
            .unwrap_or(NumberLocale::ENGLISH)
    }

    /// Parse the leading decimal number of `text`.
    ///
    /// Lenient like a spreadsheet reader: grouping separators are accepted
    /// anywhere in the integer part and parsing stops at the first character
    /// that cannot continue the number ("12abc" reads as 12). An exponent
    /// ("1E3", "2,5e-2") is read only when digits follow it.
    /// Returns None when no digit is found at the start.
    pub fn parse_decimal(&self, text: &str) -> Option<f64> {
        let chars: Vec<char> = text.chars().collect();
        let mut pos = 0;

        let negative = chars.first() == Some(&'-');
        if negative {
            pos += 1;
        }

        let mut integer = String::new();
        let mut fraction = String::new();
        let mut in_fraction = false;

        while let Some(&c) = chars.get(pos) {
            if c.is_ascii_digit() {
                if in_fraction {
                    fraction.push(c);
                } else {
                    integer.push(c);
                }
            } else if c == self.decimal && !in_fraction {
                in_fraction = true;
            } else if self.is_grouping(c) && !in_fraction && !integer.is_empty() {
                // skipped
            } else {
                break;
            }
            pos += 1;
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let exponent = read_exponent(&chars[pos..]).unwrap_or_default();

        let literal = format!(
            "{}{}.{}{}",
            if negative { "-" } else { "" },
            if integer.is_empty() { "0" } else { &integer },
            if fraction.is_empty() { "0" } else { &fraction },
            exponent,
        );
        literal.parse::<f64>().ok()
    }

    fn is_grouping(&self, c: char) -> bool {
        // Locales grouping with a no-break space also see narrow or plain spaces
        c == self.grouping || (self.grouping == NBSP && matches!(c, ' ' | '\u{202f}'))
    }
}

/// "e-2" style suffix at the start of `rest`, or None if no digits follow the marker
fn read_exponent(rest: &[char]) -> Option<String> {
    let (&marker, mut tail) = rest.split_first()?;
    if marker != 'e' && marker != 'E' {
        return None;
    }

    let mut sign = "";
    if let Some((&c, after)) = tail.split_first() {
        if c == '-' || c == '+' {
            sign = if c == '-' { "-" } else { "+" };
            tail = after;
        }
    }

    let digits: String = tail.iter().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    Some(format!("e{}{}", sign, digits))
}

impl Default for NumberLocale {
    fn default() -> Self {
        NumberLocale::ENGLISH
    }
}

// ============================================================================
// TESTS
// ============================================================================
