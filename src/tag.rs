//! Tag parsing: turn a field's raw tag string into a [`FlagSpec`].
//!
//! A tag is a separator-joined list of tokens. The first token is the flag
//! name; every later token is a `label` or `label:value` pair:
//!
//! ```text
//! "port,short:P,desc:listen port,default:20001"
//! ```
//!
//! - An empty first token falls back to the lower-cased field identifier.
//! - A first token of `-` excludes the field entirely.
//! - A bare label (no colon) stores itself as its own value; this is how
//!   presence-only labels like `squash` work.
//! - A token ending in `\` is rejoined with the following token, so a
//!   description or default may contain the separator literally:
//!   `"debug,desc:enable\,disable"`.
//!
//! Malformed tag text never errors. Empty tokens, unknown labels, and an
//! unbalanced trailing `\` are all accepted and ignored or stripped.

use std::collections::HashMap;

/// Default tag key consulted by the walker.
pub const DEFAULT_TAG_KEY: &str = "flag";
/// Default token separator.
pub const DEFAULT_SEP: char = ',';

const LABEL_SHORT: &str = "short";
const LABEL_DESC: &str = "desc";
const LABEL_DEFAULT: &str = "default";
const LABEL_SQUASH: &str = "squash";
const SKIP_SENTINEL: &str = "-";
const ESCAPE: char = '\\';

/// Parsed per-field flag settings.
///
/// Ephemeral: recomputed on every walk, never cached across walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// Public flag name, possibly namespaced with ancestor segments.
    pub name: String,
    /// The name before any ancestor prefix was applied. This is the segment
    /// a nested field contributes to its children's namespace.
    pub origin: String,
    /// Single-character short alias, if any.
    pub short: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Default value in raw textual form; converted to the field's native
    /// kind at bind time.
    pub default: Option<String>,
    /// Whether a nested field's contents are flattened into the parent's
    /// namespace. Inert on scalar fields.
    pub squash: bool,
}

impl FlagSpec {
    /// Apply an ancestor namespace prefix: `join(path, ".") + "." + origin`.
    /// No-op when the path is empty. `origin` is left untouched so the
    /// pre-prefix form survives.
    pub(crate) fn apply_prefix(&mut self, path: &[String]) {
        if !path.is_empty() {
            self.name = format!("{}.{}", path.join("."), self.origin);
        }
    }
}

/// Parse a raw tag value into a [`FlagSpec`].
///
/// `ident` is the field's identifier, used as the fallback name when the
/// tag's first token is empty. Returns `None` when the resolved name is the
/// skip sentinel `-`; the caller must then skip the field entirely.
///
/// This is pure and side-effect free — usable standalone for introspection.
pub fn parse(ident: &str, raw: &str, sep: char) -> Option<FlagSpec> {
    let tokens: Vec<&str> = raw.trim().split(sep).collect();

    let mut name = tokens[0].trim().to_string();
    let labels = parse_labels(&tokens, sep);

    if name.is_empty() {
        name = ident.to_lowercase();
    }
    if name == SKIP_SENTINEL {
        return None;
    }

    Some(FlagSpec {
        origin: name.clone(),
        name,
        short: labels.get(LABEL_SHORT).cloned(),
        description: labels.get(LABEL_DESC).cloned(),
        default: labels.get(LABEL_DEFAULT).cloned(),
        squash: labels.contains_key(LABEL_SQUASH),
    })
}

/// Parse tokens after position 0 into a label map, folding escaped
/// separators back together.
fn parse_labels(tokens: &[&str], sep: char) -> HashMap<String, String> {
    let mut labels = HashMap::new();

    let mut i = 1;
    while i < tokens.len() {
        let mut token = tokens[i].to_string();
        i += 1;

        // A trailing `\` means the separator inside this token was escaped:
        // strip the marker and rejoin with the next token. The rejoined token
        // may itself end in `\`, so repeat. An escape with no token left to
        // join is simply stripped.
        while token.ends_with(ESCAPE) {
            token.pop();
            if i >= tokens.len() {
                break;
            }
            token.push(sep);
            token.push_str(tokens[i]);
            i += 1;
        }

        match token.split_once(':') {
            Some((key, value)) => {
                labels.insert(key.trim().to_string(), value.to_string());
            }
            None => {
                let key = token.trim();
                if !key.is_empty() {
                    labels.insert(key.to_string(), key.to_string());
                }
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_flag(ident: &str, raw: &str) -> Option<FlagSpec> {
        parse(ident, raw, DEFAULT_SEP)
    }

    #[test]
    fn full_form() {
        let spec = parse_flag("port", "port,short:P,desc:listen port,default:20001").unwrap();
        assert_eq!(spec.name, "port");
        assert_eq!(spec.origin, "port");
        assert_eq!(spec.short.as_deref(), Some("P"));
        assert_eq!(spec.description.as_deref(), Some("listen port"));
        assert_eq!(spec.default.as_deref(), Some("20001"));
        assert!(!spec.squash);
    }

    #[test]
    fn empty_first_token_uses_lowercased_ident() {
        let spec = parse_flag("LongName", ",short:N").unwrap();
        assert_eq!(spec.name, "longname");
        assert_eq!(spec.short.as_deref(), Some("N"));
    }

    #[test]
    fn empty_tag_uses_ident() {
        let spec = parse_flag("Debug", "").unwrap();
        assert_eq!(spec.name, "debug");
        assert_eq!(spec.short, None);
        assert_eq!(spec.default, None);
    }

    #[test]
    fn skip_sentinel_yields_none() {
        assert!(parse_flag("NoUse", "-").is_none());
    }

    #[test]
    fn skip_sentinel_wins_over_other_labels() {
        assert!(parse_flag("NoUse", "-,short:n,default:x").is_none());
    }

    #[test]
    fn escaped_separator_kept_in_description() {
        let spec = parse_flag("Debug", r"debug,default:true,desc:enable\,disable").unwrap();
        assert_eq!(spec.description.as_deref(), Some("enable,disable"));
        assert_eq!(spec.default.as_deref(), Some("true"));
    }

    #[test]
    fn chained_escapes_rejoin_multiple_tokens() {
        let spec = parse_flag("F", r"f,desc:a\,b\,c").unwrap();
        assert_eq!(spec.description.as_deref(), Some("a,b,c"));
    }

    #[test]
    fn unbalanced_trailing_escape_is_stripped() {
        let spec = parse_flag("F", r"f,desc:dangling\").unwrap();
        assert_eq!(spec.description.as_deref(), Some("dangling"));
    }

    #[test]
    fn value_may_contain_colons() {
        // Everything after the first colon is the value, further colons kept.
        let spec = parse_flag("DBUrl", "dburl,default::27071").unwrap();
        assert_eq!(spec.default.as_deref(), Some(":27071"));

        let spec = parse_flag("LogFile", "logfile,desc:udp|udp:UdpAddr|redirect:x").unwrap();
        assert_eq!(spec.description.as_deref(), Some("udp|udp:UdpAddr|redirect:x"));
    }

    #[test]
    fn tokens_are_trimmed() {
        let spec = parse_flag("DBUrl", "dburl, desc:dburl, default::27071").unwrap();
        assert_eq!(spec.name, "dburl");
        assert_eq!(spec.description.as_deref(), Some("dburl"));
        assert_eq!(spec.default.as_deref(), Some(":27071"));
    }

    #[test]
    fn bare_label_stores_itself() {
        let spec = parse_flag("Child", ",squash").unwrap();
        assert!(spec.squash);
    }

    #[test]
    fn unknown_labels_are_inert() {
        let spec = parse_flag("KeepTime", "keep,omitempty, default:1s").unwrap();
        assert_eq!(spec.name, "keep");
        assert_eq!(spec.default.as_deref(), Some("1s"));
        assert!(!spec.squash);
    }

    #[test]
    fn empty_middle_token_is_ignored() {
        let spec = parse_flag("F", "f,,default:3").unwrap();
        assert_eq!(spec.default.as_deref(), Some("3"));
    }

    #[test]
    fn squash_label_on_scalar_is_recorded_but_inert() {
        // The parser records it; only the walker decides it matters.
        let spec = parse_flag("Name", "name,squash").unwrap();
        assert!(spec.squash);
    }

    #[test]
    fn custom_separator() {
        let spec = parse("Port", "port;short:P;default:1", ';').unwrap();
        assert_eq!(spec.short.as_deref(), Some("P"));
        assert_eq!(spec.default.as_deref(), Some("1"));
    }

    #[test]
    fn prefix_applied_from_path() {
        let mut spec = parse_flag("Name", "name").unwrap();
        spec.apply_prefix(&["child".to_string()]);
        assert_eq!(spec.name, "child.name");
        assert_eq!(spec.origin, "name");

        let mut spec = parse_flag("Name", "name").unwrap();
        spec.apply_prefix(&["a".to_string(), "b".to_string()]);
        assert_eq!(spec.name, "a.b.name");
    }

    #[test]
    fn prefix_noop_on_empty_path() {
        let mut spec = parse_flag("Name", "name").unwrap();
        spec.apply_prefix(&[]);
        assert_eq!(spec.name, "name");
    }
}
