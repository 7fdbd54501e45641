#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::new_without_default)]
//! Event consistency verification for widget toolkits.
//!
//! A scenario synthesizes low-level input at a control, drains the display's
//! event queue, records the high-level events the control emitted, and checks
//! them against the registered ordering for that interaction on the current
//! platform.
//!
//! # Proc Macros
//!
//! Use `#[consistency_test]` for scenario tests. It installs test tracing and
//! skips the test when input injection is unavailable:
//!
//! ```ignore
//! use widgetcheck_test::{consistency_test, ConsistencyHarness, SimDisplay};
//!
//! #[consistency_test]
//! fn test_list_double_click() {
//!     let mut harness = ConsistencyHarness::new(display, shell, list);
//!     harness.consistency_event(10, 10, 1, 0, "DoubleClick");
//! }
//! ```
//!
//! # Lower-level pieces
//!
//! [`Scenario`] runs one check without the harness's parameter convention.
//! [`EventSynthesizer`], [`EventCapture`] and [`drain`] are the building blocks
//! it is made of. [`SimDisplay`] is a headless [`widgetcheck_core::Display`]
//! the harness tests itself against.

pub mod capability;
mod capture;
pub mod config;
mod descriptor;
pub mod detail;
mod driver;
mod error;
mod harness;
pub mod logging;
mod pattern;
mod platform;
pub mod registry;
pub mod sim;
mod synth;

pub use capture::EventCapture;
pub use config::HarnessConfig;
pub use descriptor::{base_name, canonicalize, render, CompareMode, SymbolicEvent};
pub use driver::{
    drain, DrainOutcome, HookScope, InputDescriptor, Scenario, ScenarioReport, WaitPredicate,
};
pub use error::{ConfigError, DetailError, RegistryError, ScenarioError};
pub use harness::{ConsistencyHarness, ESCAPE_MENU, ESCAPE_POINT};
pub use pattern::{pattern, Interaction, InteractionPattern, PatternRegistry};
pub use platform::{IconifyAnchor, PlatformCaps, ICONIFY_RIGHT_INSET};
pub use registry::{code_for, name_for, resolve_codes, EventTypeRegistry};
pub use sim::{SimDisplay, WidgetKind};
pub use synth::EventSynthesizer;

// Re-export proc macros for convenient access
pub use widgetcheck_test_macros::consistency_test;
