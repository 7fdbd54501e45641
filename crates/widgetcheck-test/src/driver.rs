//! Scenario driver: hook, synthesize, drain, compare, unhook.

use crate::capture::EventCapture;
use crate::config::HarnessConfig;
use crate::descriptor::{canonicalize, render, CompareMode, SymbolicEvent};
use crate::error::ScenarioError;
use crate::pattern::{pattern, Interaction, InteractionPattern};
use crate::platform::PlatformCaps;
use crate::synth::EventSynthesizer;
use serde::Serialize;
use std::time::{Duration, Instant};
use widgetcheck_core::{Display, MouseButton, Platform, Point, WidgetId};

/// How a drain loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrainOutcome {
    /// Queue emptied and no predicate was pending
    Idle,
    /// The wait predicate held
    PredicateMet,
    /// The deadline passed first
    TimedOut,
}

/// Dispatch queued events until idle, until `predicate` holds, or until
/// `timeout` elapses.
///
/// With a predicate, an idle queue sleeps for `poll` before checking again.
pub fn drain<D: Display>(
    display: &mut D,
    timeout: Duration,
    poll: Duration,
    mut predicate: Option<&mut dyn FnMut() -> bool>,
) -> DrainOutcome {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(check) = predicate.as_mut() {
            if check() {
                return DrainOutcome::PredicateMet;
            }
        }
        if Instant::now() >= deadline {
            tracing::warn!(timeout_ms = timeout.as_millis(), "drain timed out");
            return DrainOutcome::TimedOut;
        }
        if !display.read_and_dispatch() {
            if predicate.is_none() {
                return DrainOutcome::Idle;
            }
            display.sleep(poll);
        }
    }
}

/// Concrete input for one scenario, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputDescriptor {
    /// Click, optionally followed by a left click that dismisses a menu
    Click {
        /// Click position
        at: Point,
        /// Button to click with
        button: MouseButton,
        /// Where to click afterwards to escape a popup menu
        escape: Option<Point>,
    },
    /// Double click at one point
    DoubleClick {
        /// Click position
        at: Point,
        /// Button to click with
        button: MouseButton,
    },
    /// Drag with the platform's drag button
    Drag {
        /// Press position
        from: Point,
        /// Release position
        to: Point,
    },
    /// Single key press
    KeyPress {
        /// Character
        character: char,
        /// Key code
        key_code: i32,
    },
    /// One key held while another is pressed
    DoubleKeyPress {
        /// Held key character
        held_char: char,
        /// Held key code
        held_code: i32,
        /// Pressed key character
        character: char,
        /// Pressed key code
        key_code: i32,
    },
    /// Minimize `shell` through its title bar control, then restore it
    Iconify {
        /// Reference point the platform offset is applied to
        at: Point,
        /// Button to click with
        button: MouseButton,
        /// Shell to restore afterwards
        shell: WidgetId,
    },
    /// Click, flush, click
    TwoStepSelect {
        /// First click
        first: Point,
        /// Second click, after the flush
        second: Point,
    },
}

impl InputDescriptor {
    /// Interaction kind this input drives.
    #[must_use]
    pub const fn interaction(&self) -> Interaction {
        match self {
            Self::Click { .. } => Interaction::Click,
            Self::DoubleClick { .. } => Interaction::DoubleClick,
            Self::Drag { .. } => Interaction::Drag,
            Self::KeyPress { .. } => Interaction::KeyPress,
            Self::DoubleKeyPress { .. } => Interaction::DoubleKeyPress,
            Self::Iconify { .. } => Interaction::Iconify,
            Self::TwoStepSelect { .. } => Interaction::TwoStepSelect,
        }
    }
}

/// Which widgets get capture listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HookScope {
    /// Only the targets
    #[default]
    Widget,
    /// Targets and all their descendants
    WithChildren,
}

/// Predicate over the events captured so far.
pub type WaitPredicate = Box<dyn Fn(&[SymbolicEvent]) -> bool>;

/// Result of a passing scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Pattern name
    pub pattern: String,
    /// Platform the scenario ran on
    pub platform: Platform,
    /// Expected sequence, canonicalized
    pub expected: Vec<SymbolicEvent>,
    /// Captured sequence, canonicalized
    pub captured: Vec<SymbolicEvent>,
    /// How the drain loop ended
    pub drain: DrainOutcome,
    /// Listeners registered for the scenario
    pub hooked: usize,
}

impl ScenarioReport {
    /// Pretty JSON form used in failure messages.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// One consistency check.
///
/// ```ignore
/// let report = Scenario::new("DoubleClick")
///     .input(InputDescriptor::DoubleClick { at, button: MouseButton::Left })
///     .targets(vec![list])
///     .run(&mut display)?;
/// ```
pub struct Scenario {
    pattern: String,
    input: Option<InputDescriptor>,
    targets: Vec<WidgetId>,
    scope: HookScope,
    compare: CompareMode,
    until: Option<WaitPredicate>,
    pre_layout: Option<WidgetId>,
    timeout: Duration,
    poll: Duration,
    strict_timeout: bool,
    platform: Option<Platform>,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("pattern", &self.pattern)
            .field("input", &self.input)
            .field("targets", &self.targets)
            .field("scope", &self.scope)
            .field("compare", &self.compare)
            .field("until", &self.until.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Scenario {
    /// Scenario for a registered pattern, with default config values.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        let defaults = HarnessConfig::default();
        Self {
            pattern: pattern.into(),
            input: None,
            targets: Vec::new(),
            scope: HookScope::Widget,
            compare: CompareMode::Full,
            until: None,
            pre_layout: None,
            timeout: defaults.drain_timeout(),
            poll: defaults.poll_interval(),
            strict_timeout: defaults.strict_timeout,
            platform: defaults.platform,
        }
    }

    /// Input to synthesize.
    #[must_use]
    pub fn input(mut self, input: InputDescriptor) -> Self {
        self.input = Some(input);
        self
    }

    /// Widgets to hook.
    #[must_use]
    pub fn targets(mut self, targets: Vec<WidgetId>) -> Self {
        self.targets = targets;
        self
    }

    /// Whether descendants of the targets are hooked too.
    #[must_use]
    pub fn hook_scope(mut self, scope: HookScope) -> Self {
        self.scope = scope;
        self
    }

    /// How descriptors are compared.
    #[must_use]
    pub fn compare(mut self, mode: CompareMode) -> Self {
        self.compare = mode;
        self
    }

    /// Keep draining until `predicate` holds over the captured events.
    #[must_use]
    pub fn until(mut self, predicate: impl Fn(&[SymbolicEvent]) -> bool + 'static) -> Self {
        self.until = Some(Box::new(predicate));
        self
    }

    /// Lay out `shell` after synthesizing and before draining.
    #[must_use]
    pub fn pre_layout(mut self, shell: WidgetId) -> Self {
        self.pre_layout = Some(shell);
        self
    }

    /// Drain timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Treat the display as `platform` when picking expected sequences and
    /// input quirks.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Take timeout, poll interval, timeout strictness and any platform
    /// override from `config`.
    #[must_use]
    pub fn config(mut self, config: &HarnessConfig) -> Self {
        self.timeout = config.drain_timeout();
        self.poll = config.poll_interval();
        self.strict_timeout = config.strict_timeout;
        self.platform = config.platform.or(self.platform);
        self
    }

    /// Run the scenario against `display`.
    ///
    /// Listeners are removed before this returns, whatever the outcome.
    /// Input the scenario left queued is then dispatched to nobody, so it
    /// cannot reach the next scenario on the same display.
    pub fn run<D: Display>(&self, display: &mut D) -> Result<ScenarioReport, ScenarioError> {
        let pattern = pattern(&self.pattern)
            .ok_or_else(|| ScenarioError::UnknownPattern(self.pattern.clone()))?;
        let input = self
            .input
            .ok_or_else(|| ScenarioError::MissingInput(self.pattern.clone()))?;
        if input.interaction() != pattern.interaction {
            return Err(ScenarioError::InputMismatch {
                pattern: self.pattern.clone(),
                expected: pattern.interaction,
                actual: input.interaction(),
            });
        }

        let platform = self.platform.unwrap_or_else(|| display.platform());
        let types = pattern.hook_types(platform)?;
        let widgets = self.hook_targets(display);

        let mut capture = EventCapture::new();
        capture.hook(display, &widgets, &types);
        let hooked = capture.listener_count();
        let result = self.drive(display, &mut capture, pattern, input, platform, hooked);
        let removed = capture.unhook(display);
        let flushed = drain(display, self.timeout, self.poll, None);

        tracing::info!(
            pattern = %self.pattern,
            %platform,
            hooked,
            removed,
            ?flushed,
            passed = result.is_ok(),
            "scenario finished"
        );
        result
    }

    fn hook_targets<D: Display>(&self, display: &D) -> Vec<WidgetId> {
        let mut widgets = Vec::new();
        let mut pending: Vec<WidgetId> = self.targets.iter().rev().copied().collect();
        while let Some(widget) = pending.pop() {
            if widgets.contains(&widget) {
                continue;
            }
            widgets.push(widget);
            if self.scope == HookScope::WithChildren {
                pending.extend(display.children(widget).into_iter().rev());
            }
        }
        widgets
    }

    fn drive<D: Display>(
        &self,
        display: &mut D,
        capture: &mut EventCapture,
        pattern: &InteractionPattern,
        input: InputDescriptor,
        platform: Platform,
        hooked: usize,
    ) -> Result<ScenarioReport, ScenarioError> {
        let injected = self.synthesize(display, input, PlatformCaps::for_platform(platform));
        if let Some(shell) = self.pre_layout {
            display.layout(shell);
        }

        let drain_outcome = match &self.until {
            Some(until) => {
                let mut check = || capture.with_log(|log| until(log));
                let check: &mut dyn FnMut() -> bool = &mut check;
                drain(display, self.timeout, self.poll, Some(check))
            }
            None => drain(display, self.timeout, self.poll, None),
        };

        if !injected {
            return Err(ScenarioError::InjectionFailed(self.pattern.clone()));
        }
        if let Some(&fault) = capture.faults().first() {
            return Err(fault.into());
        }
        if drain_outcome == DrainOutcome::TimedOut && self.strict_timeout {
            return Err(ScenarioError::DrainTimeout {
                pattern: self.pattern.clone(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }

        let expected = canonicalize(pattern.expected_for(platform), self.compare);
        let captured = canonicalize(&capture.take_log(), self.compare);
        let report = ScenarioReport {
            pattern: self.pattern.clone(),
            platform,
            expected,
            captured,
            drain: drain_outcome,
            hooked,
        };
        if report.expected != report.captured {
            return Err(ScenarioError::Mismatch {
                pattern: self.pattern.clone(),
                expected: render(&report.expected),
                actual: render(&report.captured),
                drain: drain_outcome,
                report: format!("\n{}", report.to_json()),
            });
        }
        Ok(report)
    }

    fn synthesize<D: Display>(
        &self,
        display: &mut D,
        input: InputDescriptor,
        caps: PlatformCaps,
    ) -> bool {
        match input {
            InputDescriptor::Click { at, button, escape } => {
                let mut synth = EventSynthesizer::with_caps(display, caps);
                let clicked = synth.click(at, button);
                let escaped = escape.map_or(true, |point| synth.click(point, MouseButton::Left));
                clicked && escaped
            }
            InputDescriptor::DoubleClick { at, button } => {
                EventSynthesizer::with_caps(display, caps).double_click(at, button)
            }
            InputDescriptor::Drag { from, to } => {
                EventSynthesizer::with_caps(display, caps).drag(from, to)
            }
            InputDescriptor::KeyPress {
                character,
                key_code,
            } => EventSynthesizer::with_caps(display, caps).key_press(character, key_code),
            InputDescriptor::DoubleKeyPress {
                held_char,
                held_code,
                character,
                key_code,
            } => EventSynthesizer::with_caps(display, caps).double_key_press(
                held_char, held_code, character, key_code,
            ),
            InputDescriptor::Iconify { at, button, shell } => {
                let clicked = EventSynthesizer::with_caps(display, caps).iconify_click(at, button);
                drain(display, self.timeout, self.poll, None);
                display.set_minimized(shell, false);
                clicked
            }
            InputDescriptor::TwoStepSelect { first, second } => {
                EventSynthesizer::with_caps(display, caps).two_step_select(first, second)
            }
        }
    }
}
