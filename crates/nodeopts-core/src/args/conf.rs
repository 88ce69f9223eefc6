//! Parser for the node's `name=value` config file format.
//!
//! ```text
//! # comment
//! dbcache=1000
//! [test]
//! port=18555
//! ```
//!
//! Entries before any section header apply to every chain; entries inside a
//! `[chain]` section only apply to that chain.  A bare `name` means
//! `name=1`, matching how the node treats flag arguments.

use crate::domain::chain::Chain;

/// Parses config text, keeping the entries that apply to `chain`.
///
/// Unparseable lines are skipped.  Later entries win over earlier ones when
/// the result is folded into a map.
pub fn parse_config(text: &str, chain: Chain) -> Vec<(String, String)> {
    let mut section: Option<String> = None;
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line,
        }
        .trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name.trim().to_string());
            continue;
        }
        if let Some(ref s) = section {
            if s != chain.as_str() {
                continue;
            }
        }
        let (name, value) = match line.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (line, "1"),
        };
        let name = name.trim_start_matches('-');
        if name.is_empty() {
            continue;
        }
        entries.push((name.to_string(), value.to_string()));
    }
    entries
}

/// Renders entries back into config text, one `name=value` per line.
pub fn render_config(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in entries {
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let text = "# header\n\ndbcache=1000 # trailing\n";
        assert_eq!(
            parse_config(text, Chain::Main),
            vec![("dbcache".to_string(), "1000".to_string())]
        );
    }

    #[test]
    fn test_sections_filter_by_chain() {
        // Arrange
        let text = "listen=1\n[test]\nport=18555\n[main]\nport=8334\n";

        // Act
        let test = parse_config(text, Chain::Test);
        let main = parse_config(text, Chain::Main);

        // Assert
        assert!(test.contains(&("port".to_string(), "18555".to_string())));
        assert!(!test.contains(&("port".to_string(), "8334".to_string())));
        assert!(main.contains(&("port".to_string(), "8334".to_string())));
        assert!(main.contains(&("listen".to_string(), "1".to_string())));
    }

    #[test]
    fn test_bare_flag_means_one() {
        assert_eq!(
            parse_config("upnp\n", Chain::Main),
            vec![("upnp".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_render_then_parse_preserves_order() {
        let entries = vec![
            ("prune".to_string(), "550".to_string()),
            ("blockfilterindex".to_string(), "0".to_string()),
        ];
        assert_eq!(parse_config(&render_config(&entries), Chain::Main), entries);
    }
}
