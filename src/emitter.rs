// 📝 Group Emitter
// Sorted items → YAML worth table, grouping variants under their shared id
//
// Grouping is never stored on the Item: each position is classified from its
// immediate neighbours in the sorted sequence.

use crate::item::Item;
use crate::resolver::NameResolver;

const INDENT: &str = "  ";

pub const DEFAULT_SECTION_LABEL: &str = "worth";

/// Default generator banner
pub fn default_banner() -> Vec<String> {
    vec![
        "Worth file generated by worthgen".to_string(),
        "Edit the source spreadsheet, not this file".to_string(),
    ]
}

// ============================================================================
// POSITION CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Only item with its id: `key: worth`
    Standalone,
    /// First of a run sharing an id: opens `key:` then its own variant entry
    GroupHead,
    /// Later item of a run: variant entry only
    GroupMember,
}

/// Classify `items[index]` by comparing its id with the previous and next item.
pub fn classify(items: &[Item], index: usize) -> Position {
    let item = &items[index];
    let prev = index.checked_sub(1).and_then(|i| items.get(i));
    let next = items.get(index + 1);

    if item.shares_id(prev) {
        Position::GroupMember
    } else if item.shares_id(next) {
        Position::GroupHead
    } else {
        Position::Standalone
    }
}

// ============================================================================
// EMITTER
// ============================================================================

pub struct GroupEmitter {
    section_label: String,
    banner: Vec<String>,
}

impl GroupEmitter {
    pub fn new(section_label: impl Into<String>, banner: Vec<String>) -> Self {
        GroupEmitter {
            section_label: section_label.into(),
            banner,
        }
    }

    /// Banner comment block followed by the top-level section label
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = vec!["#".to_string()];
        for line in &self.banner {
            lines.push(comment_line(line));
            lines.push("#".to_string());
        }
        lines.push(format!("{}:", self.section_label));
        lines
    }

    /// Body lines for an already sorted item sequence
    pub fn item_lines(&self, items: &[Item], resolver: &dyn NameResolver) -> Vec<String> {
        items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| fragment(classify(items, index), item, resolver))
            .collect()
    }

    /// Full document, newline-terminated
    pub fn render(&self, items: &[Item], resolver: &dyn NameResolver) -> String {
        let lines: Vec<String> = self
            .header_lines()
            .into_iter()
            .chain(self.item_lines(items, resolver))
            .collect();

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl Default for GroupEmitter {
    fn default() -> Self {
        GroupEmitter::new(DEFAULT_SECTION_LABEL, default_banner())
    }
}

fn fragment(position: Position, item: &Item, resolver: &dyn NameResolver) -> Vec<String> {
    let outer = INDENT;
    let inner = INDENT.repeat(2);
    let comment = comment_line(item.comment());

    match position {
        Position::Standalone => vec![
            format!("{}{}", outer, comment),
            format!("{}{}: {}", outer, resolver.resolve(item.id()), format_worth(item.worth())),
        ],
        Position::GroupHead => vec![
            format!("{}{}", outer, comment),
            format!("{}{}:", outer, resolver.resolve(item.id())),
            format!("{}{}", inner, comment),
            variant_line(&inner, item),
        ],
        Position::GroupMember => vec![format!("{}{}", inner, comment), variant_line(&inner, item)],
    }
}

fn variant_line(indent: &str, item: &Item) -> String {
    format!("{}'{}': {}", indent, item.variant(), format_worth(item.worth()))
}

/// `# text` on a single line; embedded line breaks become spaces.
fn comment_line(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let flat = flat.trim_end();

    if flat.is_empty() {
        "#".to_string()
    } else {
        format!("# {}", flat)
    }
}

/// Round-trip float text that every YAML reader sees as a float: always a
/// fractional part ("100.0"), and exponents signed ("1.0e-6", "1.0e+17").
pub fn format_worth(worth: f64) -> String {
    let text = format!("{:?}", worth);

    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = if mantissa.contains('.') {
                mantissa.to_string()
            } else {
                format!("{}.0", mantissa)
            };
            let exponent = if exponent.starts_with('-') {
                exponent.to_string()
            } else {
                format!("+{}", exponent)
            };
            format!("{}e{}", mantissa, exponent)
        }
        None => text,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{IdResolver, NameTable};

    fn item(id: u32, variant: u32, comment: &str, worth: f64) -> Item {
        Item::new(id, variant, comment, worth).unwrap()
    }

    #[test]
    fn test_classify_positions() {
        let items = vec![
            item(1, 0, "a", 1.0),
            item(2, 0, "b", 1.0),
            item(2, 1, "c", 1.0),
            item(2, 2, "d", 1.0),
            item(3, 0, "e", 1.0),
        ];

        assert_eq!(classify(&items, 0), Position::Standalone);
        assert_eq!(classify(&items, 1), Position::GroupHead);
        assert_eq!(classify(&items, 2), Position::GroupMember);
        assert_eq!(classify(&items, 3), Position::GroupMember);
        assert_eq!(classify(&items, 4), Position::Standalone);
    }

    #[test]
    fn test_single_item_is_standalone() {
        let items = vec![item(9, 4, "only", 2.0)];
        assert_eq!(classify(&items, 0), Position::Standalone);
    }

    #[test]
    fn test_header_lines() {
        let emitter = GroupEmitter::new("worth", vec!["one".to_string(), "two".to_string()]);

        assert_eq!(
            emitter.header_lines(),
            vec!["#", "# one", "#", "# two", "#", "worth:"]
        );
    }

    #[test]
    fn test_item_lines_groups_variants() {
        let items = vec![
            item(1, 0, "Sword", 100.0),
            item(2, 1, "Shield Reinforced", 75.0),
            item(2, 2, "Shield Spiked", 80.5),
        ];
        let lines = GroupEmitter::default().item_lines(&items, &IdResolver);

        assert_eq!(
            lines,
            vec![
                "  # Sword",
                "  1: 100.0",
                "  # Shield Reinforced",
                "  2:",
                "    # Shield Reinforced",
                "    '1': 75.0",
                "    # Shield Spiked",
                "    '2': 80.5",
            ]
        );
    }

    #[test]
    fn test_name_resolver_keys() {
        let mut names = NameTable::new();
        names.insert(1, "DIAMOND_SWORD");
        let items = vec![item(1, 0, "Sword", 100.0), item(5, 0, "Unknown", 3.0)];

        let lines = GroupEmitter::default().item_lines(&items, &names);

        assert_eq!(lines[1], "  DIAMOND_SWORD: 100.0");
        assert_eq!(lines[3], "  5: 3.0");
    }

    #[test]
    fn test_render_ends_with_newline() {
        let text = GroupEmitter::default().render(&[], &IdResolver);

        assert!(text.ends_with("worth:\n"));
        assert!(text.starts_with("#\n# Worth file generated by worthgen\n"));
    }

    #[test]
    fn test_comment_line() {
        assert_eq!(comment_line("Sword"), "# Sword");
        assert_eq!(comment_line(""), "#");
        assert_eq!(comment_line("two\nlines"), "# two lines");
    }

    #[test]
    fn test_format_worth() {
        assert_eq!(format_worth(100.0), "100.0");
        assert_eq!(format_worth(0.5), "0.5");
        assert_eq!(format_worth(1234.25), "1234.25");
    }

    #[test]
    fn test_format_worth_exponents_stay_floats() {
        assert_eq!(format_worth(0.000001), "1.0e-6");
        assert_eq!(format_worth(1e17), "1.0e+17");
        assert_eq!(format_worth(2.5e-7), "2.5e-7");
        assert_eq!(format_worth(-3e20), "-3.0e+20");
    }
}
