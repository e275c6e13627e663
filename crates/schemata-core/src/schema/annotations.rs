use indexmap::IndexMap;

/// Key/value settings parsed from a field's annotation string.
///
/// Keys are stored upper-cased, so lookups are case-insensitive. A bare key
/// is stored with the value `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    entries: IndexMap<String, String>,
}

/// Why an annotation string was rejected, with the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnnotationSyntaxError {
    pub(crate) token: String,
    pub(crate) reason: &'static str,
}

pub(crate) const VIRTUAL: &str = "VIRTUAL";
pub(crate) const PRIMARY_KEY: &[&str] = &["PRIMARYKEY", "PRIMARY_KEY"];
pub(crate) const COLUMN: &str = "COLUMN";
pub(crate) const EMBEDDED_PREFIX: &str = "EMBEDDEDPREFIX";

impl Annotations {
    /// Parses `primaryKey, column:user_id, virtual` style strings.
    ///
    /// Tokens are comma separated and `\,` escapes a literal comma. Empty
    /// tokens are skipped and a repeated key keeps its last value.
    pub(crate) fn parse(src: &str) -> Result<Annotations, AnnotationSyntaxError> {
        let mut entries = IndexMap::new();

        for token in split_tokens(src) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            let (key, value) = match token.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (token, "true"),
            };

            if key.is_empty() {
                return Err(AnnotationSyntaxError {
                    token: token.to_string(),
                    reason: "empty key",
                });
            }

            if key.chars().any(char::is_whitespace) {
                return Err(AnnotationSyntaxError {
                    token: token.to_string(),
                    reason: "key contains whitespace",
                });
            }

            let key = key.to_ascii_uppercase();

            if key == COLUMN && value.is_empty() {
                return Err(AnnotationSyntaxError {
                    token: token.to_string(),
                    reason: "`column` requires a name",
                });
            }

            entries.insert(key, value.to_string());
        }

        Ok(Annotations { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// True when `key` is present with a truthy value (`true`, `1`, `yes`, `on`).
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in the order they were first declared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn is_virtual(&self) -> bool {
        self.is_set(VIRTUAL)
    }

    pub(crate) fn is_primary_key(&self) -> bool {
        PRIMARY_KEY.iter().any(|key| self.is_set(key))
    }

    /// True if a primary key key is present at all, whatever its value.
    pub(crate) fn declares_primary_key(&self) -> bool {
        PRIMARY_KEY.iter().any(|key| self.contains(key))
    }

    pub(crate) fn column(&self) -> Option<&str> {
        self.get(COLUMN)
    }

    pub(crate) fn embedded_prefix(&self) -> Option<&str> {
        self.get(EMBEDDED_PREFIX)
    }
}

fn is_truthy(value: &str) -> bool {
    ["true", "1", "yes", "on"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

fn split_tokens(src: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut chars = src.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    tokens.push(current);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keys_are_true() {
        let annotations = Annotations::parse("primaryKey").unwrap();
        assert_eq!(annotations.get("primaryKey"), Some("true"));
        assert!(annotations.is_primary_key());
        assert!(!annotations.is_virtual());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let annotations = Annotations::parse("Virtual").unwrap();
        assert!(annotations.is_virtual());
        assert!(annotations.contains("VIRTUAL"));
        assert!(annotations.contains("virtual"));
    }

    #[test]
    fn falsy_primary_key_is_declared_but_unset() {
        let annotations = Annotations::parse("primaryKey:false").unwrap();
        assert!(annotations.declares_primary_key());
        assert!(!annotations.is_primary_key());
        assert!(!Annotations::parse("virtual").unwrap().declares_primary_key());
    }

    #[test]
    fn key_value_pairs() {
        let annotations = Annotations::parse("column: user_name , primary_key:yes").unwrap();
        assert_eq!(annotations.column(), Some("user_name"));
        assert!(annotations.is_primary_key());
        assert_eq!(annotations.len(), 2);
    }

    #[test]
    fn virtual_false_is_not_virtual() {
        let annotations = Annotations::parse("virtual:false").unwrap();
        assert!(annotations.contains("virtual"));
        assert!(!annotations.is_virtual());

        assert!(Annotations::parse("virtual:ON").unwrap().is_virtual());
        assert!(Annotations::parse("virtual:1").unwrap().is_virtual());
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let annotations = Annotations::parse(" , virtual,,").unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(Annotations::parse("").unwrap().is_empty());
    }

    #[test]
    fn last_value_wins() {
        let annotations = Annotations::parse("column:a, column:b").unwrap();
        assert_eq!(annotations.column(), Some("b"));
    }

    #[test]
    fn escaped_comma() {
        let annotations = Annotations::parse(r"comment:a\, b, virtual").unwrap();
        assert_eq!(annotations.get("comment"), Some("a, b"));
        assert!(annotations.is_virtual());
    }

    #[test]
    fn preserves_declaration_order() {
        let annotations = Annotations::parse("virtual, column:x, primaryKey").unwrap();
        let keys: Vec<_> = annotations.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["VIRTUAL", "COLUMN", "PRIMARYKEY"]);
    }

    #[test]
    fn rejects_empty_key() {
        let err = Annotations::parse("virtual, :foo").unwrap_err();
        assert_eq!(err.token, ":foo");
        assert_eq!(err.reason, "empty key");
    }

    #[test]
    fn rejects_whitespace_in_key() {
        let err = Annotations::parse("primary key").unwrap_err();
        assert_eq!(err.token, "primary key");
    }

    #[test]
    fn rejects_empty_column() {
        let err = Annotations::parse("column:").unwrap_err();
        assert_eq!(err.reason, "`column` requires a name");
    }
}
