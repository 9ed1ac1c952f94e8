//! Floating copy control state
//!
//! One [`CopyController`] is created per page session and handed to every
//! event handler. It owns the formula the control currently points at, the
//! control's position and label, and the two timers (pending hide, feedback
//! label). It never reads a clock: every time-dependent call takes a
//! millisecond timestamp from the caller, e.g. `performance.now()`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::core::{extract_with_options, locate_with_options};
use crate::dom::MathNode;
use crate::options::GrabOptions;
use crate::utils::error::{GrabError, GrabResult};

/// Feedback shown on the control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
    Failed,
}

/// Everything a renderer needs to draw the control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonState {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub status: CopyStatus,
    pub label: String,
    pub tooltip: String,
}

/// Result of a copy request
#[derive(Debug, Clone)]
pub enum CopyOutcome {
    Copied(String),
    Failed(GrabError),
    /// The control was not attached to any formula
    NoFormula,
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }
}

/// Explicit UI state of the copy control
#[derive(Debug)]
pub struct CopyController<N: MathNode> {
    options: GrabOptions,
    current: Option<N>,
    visible: bool,
    left: f64,
    top: f64,
    status: CopyStatus,
    status_until: Option<f64>,
    hide_at: Option<f64>,
}

impl<N: MathNode> CopyController<N> {
    pub fn new(options: GrabOptions) -> Self {
        Self {
            options,
            current: None,
            visible: false,
            left: 0.0,
            top: 0.0,
            status: CopyStatus::Idle,
            status_until: None,
            hide_at: None,
        }
    }

    /// The formula the control is attached to
    pub fn current(&self) -> Option<&N> {
        self.current.as_ref()
    }

    pub fn button(&self) -> ButtonState {
        let labels = &self.options.button;
        let label = match self.status {
            CopyStatus::Idle => &labels.label_idle,
            CopyStatus::Copied => &labels.label_copied,
            CopyStatus::Failed => &labels.label_failed,
        };
        ButtonState {
            visible: self.visible,
            left: self.left,
            top: self.top,
            status: self.status,
            label: label.clone(),
            tooltip: labels.tooltip.clone(),
        }
    }

    /// Pointer entered `target`. Returns true when the control moved to a
    /// different formula.
    pub fn pointer_over(&mut self, target: &N) -> bool {
        let Some(formula) = locate_with_options(target, &self.options) else {
            return false;
        };
        self.hide_at = None;
        if self.current.as_ref() == Some(&formula) {
            return false;
        }
        self.show(formula);
        true
    }

    /// Pointer left `target` for `related` (`None` when it left the page).
    ///
    /// Leaving a formula for something that is not the same formula hides the
    /// control after the configured delay, unless the pointer went onto the
    /// control itself.
    pub fn pointer_out(&mut self, target: &N, related: Option<&N>, into_button: bool, now_ms: f64) {
        if !self.visible || into_button {
            return;
        }
        let Some(left) = locate_with_options(target, &self.options) else {
            return;
        };
        let entered = related.and_then(|r| locate_with_options(r, &self.options));
        if entered.as_ref() != Some(&left) {
            self.hide_at = Some(now_ms + self.options.button.hide_delay_ms);
        }
    }

    /// A click landed somewhere on the page. Clicks outside the control hide it.
    pub fn click(&mut self, on_button: bool) {
        if !on_button {
            self.hide();
        }
    }

    /// Advance timers. `button_hovered` cancels a pending hide.
    pub fn tick(&mut self, now_ms: f64, button_hovered: bool) {
        if let Some(due) = self.hide_at {
            if now_ms >= due {
                self.hide_at = None;
                if !button_hovered {
                    self.hide();
                }
            }
        }
        if let Some(until) = self.status_until {
            if now_ms >= until {
                self.status_until = None;
                self.status = CopyStatus::Idle;
            }
        }
    }

    /// Extract the current formula and write it to a synchronous clipboard.
    pub fn copy<C: Clipboard>(&mut self, clipboard: &mut C, now_ms: f64) -> CopyOutcome {
        let Some(latex) = self.begin_copy() else {
            return CopyOutcome::NoFormula;
        };
        let result = clipboard.write_text(&latex);
        self.finish_copy(latex, result, now_ms)
    }

    /// First half of an asynchronous copy: the text to write, if any.
    pub fn begin_copy(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|formula| extract_with_options(formula, &self.options))
    }

    /// Second half of an asynchronous copy: record how the write went.
    pub fn finish_copy(&mut self, latex: String, result: GrabResult<()>, now_ms: f64) -> CopyOutcome {
        self.status_until = Some(now_ms + self.options.button.feedback_ms);
        match result {
            Ok(()) => {
                debug!(latex = %latex, "copied formula");
                self.status = CopyStatus::Copied;
                CopyOutcome::Copied(latex)
            }
            Err(err) => {
                warn!(error = %err, "copy failed");
                self.status = CopyStatus::Failed;
                CopyOutcome::Failed(err)
            }
        }
    }

    fn show(&mut self, formula: N) {
        if let Some(rect) = formula.bounding_rect() {
            self.left = rect.right + self.options.button.offset_x;
            self.top = rect.top + self.options.button.offset_y;
        }
        self.current = Some(formula);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.current = None;
        self.hide_at = None;
    }
}
