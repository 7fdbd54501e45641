//! Bidirectional lookup between event names and dispatch codes.

use crate::descriptor::base_name;
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::OnceLock;
use widgetcheck_core::EventType;

/// Name ↔ code registry, built once per process.
#[derive(Debug)]
pub struct EventTypeRegistry {
    by_name: HashMap<&'static str, EventType>,
    by_code: HashMap<i32, EventType>,
}

impl EventTypeRegistry {
    /// The process-wide registry over [`EventType::ALL`].
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<EventTypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::build(EventType::ALL))
    }

    /// Build a registry, panicking if names or codes collide.
    fn build(types: &[EventType]) -> Self {
        let mut by_name = HashMap::with_capacity(types.len());
        let mut by_code = HashMap::with_capacity(types.len());
        for &ty in types {
            assert!(
                by_name.insert(ty.name(), ty).is_none(),
                "event name {} registered twice",
                ty.name()
            );
            assert!(
                by_code.insert(ty.code(), ty).is_none(),
                "event code {} registered twice",
                ty.code()
            );
        }
        Self { by_name, by_code }
    }

    /// Event type for a name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<EventType> {
        self.by_name.get(name).copied()
    }

    /// Event type for a code.
    #[must_use]
    pub fn from_code(&self, code: i32) -> Option<EventType> {
        self.by_code.get(&code).copied()
    }

    /// Code for a name.
    #[must_use]
    pub fn code_for(&self, name: &str) -> Option<i32> {
        self.lookup(name).map(EventType::code)
    }

    /// Name for a code.
    #[must_use]
    pub fn name_for(&self, code: i32) -> Option<&'static str> {
        self.from_code(code).map(EventType::name)
    }

    /// Number of registered event types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Code for an event name in the global registry.
#[must_use]
pub fn code_for(name: &str) -> Option<i32> {
    EventTypeRegistry::global().code_for(name)
}

/// Name for an event code in the global registry.
#[must_use]
pub fn name_for(code: i32) -> Option<&'static str> {
    EventTypeRegistry::global().name_for(code)
}

/// Event types a listener must be hooked for to observe `raw_names`.
///
/// Subtype suffixes are ignored. Each distinct type appears once, in
/// first-seen order: repeats such as the two `MouseDown`s of a double click
/// need one hook, and the capture log records every occurrence.
pub fn resolve_codes<S: AsRef<str>>(raw_names: &[S]) -> Result<Vec<EventType>, RegistryError> {
    let registry = EventTypeRegistry::global();
    let mut resolved: Vec<EventType> = Vec::with_capacity(raw_names.len());
    for raw in raw_names {
        let name = base_name(raw.as_ref());
        let ty = registry
            .lookup(name)
            .ok_or_else(|| RegistryError::UnknownEventName(name.to_string()))?;
        if !resolved.contains(&ty) {
            resolved.push(ty);
        }
    }
    Ok(resolved)
}
