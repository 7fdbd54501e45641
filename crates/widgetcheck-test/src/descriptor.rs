//! Symbolic event descriptors and canonicalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A human-readable event name with an optional subtype.
///
/// Rendered as `"Name"` or `"Name:Subtype"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct SymbolicEvent {
    /// Base event name
    pub name: String,
    /// Subtype, e.g. the selection or traversal kind
    pub subtype: Option<String>,
}

impl SymbolicEvent {
    /// Descriptor without a subtype.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtype: None,
        }
    }

    /// Descriptor with a subtype. An empty subtype is treated as none.
    #[must_use]
    pub fn with_subtype(name: impl Into<String>, subtype: impl Into<String>) -> Self {
        let subtype = subtype.into();
        Self {
            name: name.into(),
            subtype: (!subtype.is_empty()).then_some(subtype),
        }
    }

    /// Parse `"Name"` or `"Name:Subtype"`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((name, subtype)) => Self::with_subtype(name, subtype),
            None => Self::new(raw),
        }
    }

    /// Copy without the subtype.
    #[must_use]
    pub fn base(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl fmt::Display for SymbolicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtype {
            Some(subtype) => write!(f, "{}:{}", self.name, subtype),
            None => f.write_str(&self.name),
        }
    }
}

impl From<SymbolicEvent> for String {
    fn from(event: SymbolicEvent) -> Self {
        event.to_string()
    }
}

impl From<String> for SymbolicEvent {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for SymbolicEvent {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Strip a `:subtype` suffix from a raw descriptor.
#[must_use]
pub fn base_name(raw: &str) -> &str {
    raw.split_once(':').map_or(raw, |(name, _)| name)
}

/// How much of each descriptor a scenario compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompareMode {
    /// Compare names and subtypes
    #[default]
    Full,
    /// Compare base names only
    BaseNames,
}

/// Normalize a descriptor sequence for comparison.
///
/// Order and repeats are preserved. Applying this twice gives the same result
/// as applying it once.
#[must_use]
pub fn canonicalize(events: &[SymbolicEvent], mode: CompareMode) -> Vec<SymbolicEvent> {
    match mode {
        CompareMode::Full => events.to_vec(),
        CompareMode::BaseNames => events.iter().map(SymbolicEvent::base).collect(),
    }
}

/// Render descriptors as strings, the form mismatch reports use.
#[must_use]
pub fn render(events: &[SymbolicEvent]) -> Vec<String> {
    events.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain_and_subtyped() {
        assert_eq!(SymbolicEvent::parse("MouseDown"), SymbolicEvent::new("MouseDown"));
        let sel = SymbolicEvent::parse("Selection:DRAG");
        assert_eq!(sel.name, "Selection");
        assert_eq!(sel.subtype.as_deref(), Some("DRAG"));
    }

    #[test]
    fn test_parse_empty_suffix_is_no_subtype() {
        assert_eq!(SymbolicEvent::parse("Selection:"), SymbolicEvent::new("Selection"));
    }

    #[test]
    fn test_display_roundtrip() {
        for raw in ["KeyDown", "Traverse:TAB_NEXT"] {
            assert_eq!(SymbolicEvent::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Traverse:RETURN"), "Traverse");
        assert_eq!(base_name("Expand"), "Expand");
    }

    #[test]
    fn test_canonicalize_base_names_strips_subtypes() {
        let events = vec![
            SymbolicEvent::parse("MouseDown"),
            SymbolicEvent::parse("Selection:CHECK"),
        ];
        let canon = canonicalize(&events, CompareMode::BaseNames);
        assert_eq!(render(&canon), vec!["MouseDown", "Selection"]);
        assert_eq!(canonicalize(&events, CompareMode::Full), events);
    }

    #[test]
    fn test_serde_as_string() {
        let event = SymbolicEvent::parse("Selection:PAGE_DOWN");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, "\"Selection:PAGE_DOWN\"");
        let back: SymbolicEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    fn descriptor() -> impl Strategy<Value = SymbolicEvent> {
        ("[A-Z][a-zA-Z]{0,12}", proptest::option::of("[A-Z_]{1,10}")).prop_map(|(name, sub)| {
            SymbolicEvent {
                name,
                subtype: sub,
            }
        })
    }

    proptest! {
        #[test]
        fn prop_canonicalize_is_idempotent(events in proptest::collection::vec(descriptor(), 0..12), base in any::<bool>()) {
            let mode = if base { CompareMode::BaseNames } else { CompareMode::Full };
            let once = canonicalize(&events, mode);
            let twice = canonicalize(&once, mode);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_canonicalize_preserves_length_and_order(events in proptest::collection::vec(descriptor(), 0..12)) {
            let canon = canonicalize(&events, CompareMode::BaseNames);
            prop_assert_eq!(canon.len(), events.len());
            for (a, b) in canon.iter().zip(events.iter()) {
                prop_assert_eq!(&a.name, &b.name);
            }
        }
    }
}
