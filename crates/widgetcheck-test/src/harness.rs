//! Consistency harness front-end.
//!
//! Scenarios are described by four integer parameters whose meaning depends
//! on the pattern's interaction:
//!
//! | interaction    | `a`, `b`                   | `c`, `d`                                   |
//! |----------------|----------------------------|--------------------------------------------|
//! | Click          | control-relative point     | `c` button; `d == ESCAPE_MENU` escapes a menu |
//! | DoubleClick    | control-relative point     | `c` button                                 |
//! | Drag           | drag origin                | drag destination                           |
//! | TwoStepSelect  | first click                | second click                               |
//! | KeyPress       | character, key code        |                                            |
//! | DoubleKeyPress | held character, key code   | pressed character, key code                |
//! | Iconify        | `a` button                 |                                            |
//!
//! ```ignore
//! let mut harness = ConsistencyHarness::new(display, shell, list);
//! harness.consistency_event(10, 10, 1, 0, "DoubleClick");
//! ```

use crate::config::HarnessConfig;
use crate::descriptor::CompareMode;
use crate::driver::{HookScope, InputDescriptor, Scenario, ScenarioReport};
use crate::error::ScenarioError;
use crate::pattern::{pattern, Interaction};
use crate::platform::{IconifyAnchor, PlatformCaps, ICONIFY_RIGHT_INSET};
use widgetcheck_core::{Display, MouseButton, Point, WidgetId};

/// `d` value that follows a click with a left click on the shell's title
/// bar, dismissing a popup menu the first click opened.
pub const ESCAPE_MENU: i32 = 4;

/// Shell-relative point clicked to escape a menu.
pub const ESCAPE_POINT: Point = Point::new(25, -10);

/// Drives consistency scenarios against one control in one shell.
#[derive(Debug)]
pub struct ConsistencyHarness<D: Display> {
    display: D,
    shell: WidgetId,
    control: WidgetId,
    config: HarnessConfig,
}

impl<D: Display> ConsistencyHarness<D> {
    /// Harness for `control` inside `shell`, configured from the environment.
    pub fn new(display: D, shell: WidgetId, control: WidgetId) -> Self {
        Self {
            display,
            shell,
            control,
            config: HarnessConfig::load_default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Display under test.
    pub const fn display(&self) -> &D {
        &self.display
    }

    /// Display under test, mutably.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Parent shell.
    pub const fn shell(&self) -> WidgetId {
        self.shell
    }

    /// Control under test.
    pub const fn control(&self) -> WidgetId {
        self.control
    }

    /// Point the harness at another control.
    pub fn set_control(&mut self, control: WidgetId) {
        self.control = control;
    }

    /// Active configuration.
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Lay the shell out so control geometry can be queried before a
    /// `consistency_event` call.
    pub fn consistency_pre_pack_shell(&mut self) {
        self.display.pack(self.shell);
    }

    /// Lay out the shell, then pack `other` (usually a dialog shell).
    pub fn consistency_pre_pack_shell_with(&mut self, other: WidgetId) {
        self.consistency_pre_pack_shell();
        self.display.pack(other);
    }

    /// Run `pattern` against the control.
    ///
    /// Returns `None` when consistency checks are disabled.
    ///
    /// # Panics
    ///
    /// Panics with the failure message if the scenario does not pass.
    pub fn consistency_event(
        &mut self,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
    ) -> Option<ScenarioReport> {
        let targets = [self.control];
        self.consistency_event_on(&targets, HookScope::Widget, a, b, c, d, pattern)
    }

    /// Run `pattern`, hooking `targets` instead of the control.
    ///
    /// # Panics
    ///
    /// Panics with the failure message if the scenario does not pass.
    pub fn consistency_event_on(
        &mut self,
        targets: &[WidgetId],
        scope: HookScope,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
    ) -> Option<ScenarioReport> {
        match self.try_consistency_event_on(targets, scope, a, b, c, d, pattern) {
            Ok(report) => report,
            Err(err) => panic!("{err}"),
        }
    }

    /// Non-panicking form of [`Self::consistency_event`].
    pub fn try_consistency_event(
        &mut self,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
    ) -> Result<Option<ScenarioReport>, ScenarioError> {
        let targets = [self.control];
        self.try_consistency_event_on(&targets, HookScope::Widget, a, b, c, d, pattern)
    }

    /// Run `pattern` against the control, comparing with `mode`.
    ///
    /// [`CompareMode::BaseNames`] ignores subtypes such as `Selection:CHECK`.
    ///
    /// # Panics
    ///
    /// Panics with the failure message if the scenario does not pass.
    pub fn consistency_event_with_mode(
        &mut self,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
        mode: CompareMode,
    ) -> Option<ScenarioReport> {
        match self.try_consistency_event_with_mode(a, b, c, d, pattern, mode) {
            Ok(report) => report,
            Err(err) => panic!("{err}"),
        }
    }

    /// Non-panicking form of [`Self::consistency_event_with_mode`].
    pub fn try_consistency_event_with_mode(
        &mut self,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
        mode: CompareMode,
    ) -> Result<Option<ScenarioReport>, ScenarioError> {
        let targets = [self.control];
        self.run_event(&targets, HookScope::Widget, mode, [a, b, c, d], pattern)
    }

    /// Non-panicking form of [`Self::consistency_event_on`].
    pub fn try_consistency_event_on(
        &mut self,
        targets: &[WidgetId],
        scope: HookScope,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        pattern: &str,
    ) -> Result<Option<ScenarioReport>, ScenarioError> {
        self.run_event(targets, scope, CompareMode::Full, [a, b, c, d], pattern)
    }

    fn run_event(
        &mut self,
        targets: &[WidgetId],
        scope: HookScope,
        mode: CompareMode,
        [a, b, c, d]: [i32; 4],
        pattern_name: &str,
    ) -> Result<Option<ScenarioReport>, ScenarioError> {
        if !self.config.enabled {
            tracing::info!(pattern = pattern_name, "consistency checks disabled");
            return Ok(None);
        }
        let interaction = pattern(pattern_name)
            .ok_or_else(|| ScenarioError::UnknownPattern(pattern_name.to_string()))?
            .interaction;

        self.display.pack(self.shell);
        self.display.open(self.shell);
        if self.control != self.shell && self.display.is_shell(self.control) {
            self.display.pack(self.control);
            self.display.open(self.control);
        }

        let input = self.determine_input(a, b, c, d, interaction)?;
        if self.config.focus_before_event && !self.display.set_focus(self.control) {
            self.display.force_focus(self.control);
        }

        Scenario::new(pattern_name)
            .input(input)
            .targets(targets.to_vec())
            .hook_scope(scope)
            .compare(mode)
            .config(&self.config)
            .run(&mut self.display)
            .map(Some)
    }

    /// Translate harness parameters into display-coordinate input.
    pub fn determine_input(
        &self,
        a: i32,
        b: i32,
        c: i32,
        d: i32,
        interaction: Interaction,
    ) -> Result<InputDescriptor, ScenarioError> {
        let at = |x, y| self.display.to_display(self.control, Point::new(x, y));
        let input = match interaction {
            Interaction::Click => InputDescriptor::Click {
                at: at(a, b),
                button: button(c)?,
                escape: (d == ESCAPE_MENU)
                    .then(|| self.display.to_display(self.shell, ESCAPE_POINT)),
            },
            Interaction::DoubleClick => InputDescriptor::DoubleClick {
                at: at(a, b),
                button: button(c)?,
            },
            Interaction::Drag => InputDescriptor::Drag {
                from: at(a, b),
                to: at(c, d),
            },
            Interaction::TwoStepSelect => InputDescriptor::TwoStepSelect {
                first: at(a, b),
                second: at(c, d),
            },
            Interaction::KeyPress => InputDescriptor::KeyPress {
                character: character(a),
                key_code: b,
            },
            Interaction::DoubleKeyPress => InputDescriptor::DoubleKeyPress {
                held_char: character(a),
                held_code: b,
                character: character(c),
                key_code: d,
            },
            Interaction::Iconify => {
                if !self.display.is_shell(self.control) {
                    return Err(ScenarioError::NotAShell(self.control.0));
                }
                let platform = self.config.platform.unwrap_or_else(|| self.display.platform());
                let reference = match PlatformCaps::for_platform(platform).iconify_anchor {
                    IconifyAnchor::TopLeft => at(0, 0),
                    IconifyAnchor::TopRight => {
                        at(self.display.size(self.control).width - ICONIFY_RIGHT_INSET, 0)
                    }
                };
                InputDescriptor::Iconify {
                    at: reference,
                    button: button(a)?,
                    shell: self.control,
                }
            }
        };
        Ok(input)
    }
}

fn button(id: i32) -> Result<MouseButton, ScenarioError> {
    MouseButton::from_id(id).ok_or(ScenarioError::InvalidButton(id))
}

fn character(code: i32) -> char {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or('\0')
}
