//! Registry of expected event orderings per interaction.
//!
//! Adding a pattern means adding one entry to [`PATTERNS`]. Every entry is
//! checked against the event type registry when the registry is first built.

use crate::descriptor::SymbolicEvent;
use crate::error::RegistryError;
use crate::registry::resolve_codes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use widgetcheck_core::{EventType, Platform};

/// Physical interaction that drives a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interaction {
    /// Single click, optionally followed by a menu-escape click
    Click,
    /// Two clicks at one point
    DoubleClick,
    /// Press, move, release
    Drag,
    /// One key down and up
    KeyPress,
    /// One key held while a second is pressed
    DoubleKeyPress,
    /// Click on the shell's minimize control, then restore
    Iconify,
    /// Click, flush, click again
    TwoStepSelect,
}

struct PatternDef {
    name: &'static str,
    interaction: Interaction,
    expected: &'static [&'static str],
    overrides: &'static [(Platform, &'static [&'static str])],
}

const fn def(
    name: &'static str,
    interaction: Interaction,
    expected: &'static [&'static str],
) -> PatternDef {
    PatternDef {
        name,
        interaction,
        expected,
        overrides: &[],
    }
}

const PATTERNS: &[PatternDef] = &[
    def(
        "DoubleClick",
        Interaction::DoubleClick,
        &[
            "MouseDown",
            "Selection",
            "MouseUp",
            "MouseDown",
            "MouseDoubleClick",
            "DefaultSelection",
            "MouseUp",
        ],
    ),
    def(
        "MouseSelection",
        Interaction::Click,
        &["MouseDown", "Selection", "MouseUp"],
    ),
    def(
        "ButtonMouseSelection",
        Interaction::Click,
        &["MouseDown", "MouseUp", "Selection"],
    ),
    def(
        "CheckSelection",
        Interaction::Click,
        &["MouseDown", "Selection:CHECK", "MouseUp"],
    ),
    def(
        "KeySelection",
        Interaction::KeyPress,
        &["KeyDown", "Selection", "KeyUp"],
    ),
    def(
        "SpaceSelection",
        Interaction::KeyPress,
        &["Selection", "KeyDown", "KeyUp"],
    ),
    def(
        "EnterSelection",
        Interaction::KeyPress,
        &["Traverse:RETURN", "KeyDown", "DefaultSelection", "KeyUp"],
    ),
    PatternDef {
        name: "MenuDetect",
        interaction: Interaction::Click,
        expected: &["MouseDown", "MenuDetect", "MouseUp"],
        overrides: &[(Platform::Win32, &["MouseDown", "MouseUp", "MenuDetect"])],
    },
    def(
        "DragDetect",
        Interaction::Drag,
        &["MouseDown", "DragDetect", "MouseUp"],
    ),
    def(
        "TreeKeyExpand",
        Interaction::KeyPress,
        &["KeyDown", "Expand", "KeyUp"],
    ),
    def(
        "TreeMouseExpand",
        Interaction::Click,
        &["MouseDown", "Expand", "MouseUp"],
    ),
    def(
        "Modify",
        Interaction::KeyPress,
        &["KeyDown", "Verify", "Modify", "KeyUp"],
    ),
    def(
        "SelectAll",
        Interaction::DoubleKeyPress,
        &["KeyDown", "KeyDown", "KeyUp", "KeyUp"],
    ),
    def(
        "TabTraversal",
        Interaction::KeyPress,
        &["Traverse:TAB_NEXT", "FocusOut"],
    ),
    def(
        "ShellIconify",
        Interaction::Iconify,
        &[
            "FocusOut",
            "Iconify",
            "Deactivate",
            "Deiconify",
            "Activate",
            "FocusIn",
            "Activate",
        ],
    ),
    def("ComboMouseSelection", Interaction::TwoStepSelect, &["Selection"]),
    def(
        "ArrowSelection",
        Interaction::Click,
        &["MouseDown", "Selection:ARROW_DOWN", "MouseUp"],
    ),
    def(
        "ThumbSelection",
        Interaction::Click,
        &["MouseDown", "Selection:DRAG", "MouseUp"],
    ),
    def(
        "TroughSelection",
        Interaction::Click,
        &["MouseDown", "Selection:PAGE_DOWN", "MouseUp"],
    ),
    def(
        "SliderKeySelection",
        Interaction::KeyPress,
        &["KeyDown", "Selection:ARROW_DOWN", "KeyUp"],
    ),
];

/// A named, ordered list of expected events for one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionPattern {
    /// Pattern name
    pub name: &'static str,
    /// Interaction that produces the events
    pub interaction: Interaction,
    /// Expected sequence on platforms without an override
    pub expected: Vec<SymbolicEvent>,
    /// Platform-specific expected sequences
    pub overrides: Vec<(Platform, Vec<SymbolicEvent>)>,
}

impl InteractionPattern {
    fn from_def(def: &PatternDef) -> Self {
        let parse = |raw: &[&str]| -> Vec<SymbolicEvent> {
            raw.iter().map(|r| SymbolicEvent::parse(r)).collect()
        };
        Self {
            name: def.name,
            interaction: def.interaction,
            expected: parse(def.expected),
            overrides: def
                .overrides
                .iter()
                .map(|(platform, raw)| (*platform, parse(*raw)))
                .collect(),
        }
    }

    /// Expected sequence on `platform`.
    #[must_use]
    pub fn expected_for(&self, platform: Platform) -> &[SymbolicEvent] {
        self.overrides
            .iter()
            .find(|(p, _)| *p == platform)
            .map_or(self.expected.as_slice(), |(_, events)| events.as_slice())
    }

    /// Event types a capture must hook to observe this pattern on `platform`.
    pub fn hook_types(&self, platform: Platform) -> Result<Vec<EventType>, RegistryError> {
        let names: Vec<&str> = self
            .expected_for(platform)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        resolve_codes(&names)
    }
}

/// Process-wide pattern table.
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: HashMap<&'static str, InteractionPattern>,
}

impl PatternRegistry {
    /// The registry built from the static pattern table.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<PatternRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::build(PATTERNS))
    }

    fn build(defs: &[PatternDef]) -> Self {
        let mut patterns = HashMap::with_capacity(defs.len());
        for def in defs {
            let pattern = InteractionPattern::from_def(def);
            let mut sequences = vec![pattern.expected.as_slice()];
            sequences.extend(pattern.overrides.iter().map(|(_, s)| s.as_slice()));
            for sequence in sequences {
                let names: Vec<&str> = sequence.iter().map(|e| e.name.as_str()).collect();
                if let Err(err) = resolve_codes(&names) {
                    panic!("pattern {}: {err}", def.name);
                }
            }
            assert!(
                patterns.insert(def.name, pattern).is_none(),
                "pattern {} registered twice",
                def.name
            );
        }
        Self { patterns }
    }

    /// Pattern by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InteractionPattern> {
        self.patterns.get(name)
    }

    /// All pattern names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.patterns.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Look up a pattern in the global registry.
#[must_use]
pub fn pattern(name: &str) -> Option<&'static InteractionPattern> {
    PatternRegistry::global().get(name)
}
