//! View State
//! Immutable UI flags and the pure `(state, action) -> state` reducer.

use crate::data::{DataMode, Facility};
use std::collections::BTreeSet;

/// Everything the renderer needs to know about user choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active: BTreeSet<Facility>,
    pub mode: DataMode,
    pub show_grid: bool,
    pub dark_mode: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active: Facility::ALL.into_iter().collect(),
            mode: DataMode::Raw,
            show_grid: true,
            dark_mode: false,
        }
    }
}

/// State transitions triggered by input or by the platform theme signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    ToggleSeries(Facility),
    SetNormalize(bool),
    SetGrid(bool),
    ToggleTheme,
    SystemThemeChanged(bool),
}

impl ViewState {
    pub fn reduce(mut self, action: ViewAction) -> ViewState {
        match action {
            ViewAction::ToggleSeries(facility) => {
                if !self.active.remove(&facility) {
                    self.active.insert(facility);
                }
            }
            ViewAction::SetNormalize(on) => {
                self.mode = if on {
                    DataMode::Normalized
                } else {
                    DataMode::Raw
                };
            }
            ViewAction::SetGrid(on) => self.show_grid = on,
            ViewAction::ToggleTheme => self.dark_mode = !self.dark_mode,
            ViewAction::SystemThemeChanged(dark) => self.dark_mode = dark,
        }
        self
    }

    /// Active facilities in display order.
    pub fn active_series(&self) -> Vec<Facility> {
        Facility::ALL
            .into_iter()
            .filter(|f| self.active.contains(f))
            .collect()
    }

    pub fn is_active(&self, facility: Facility) -> bool {
        self.active.contains(&facility)
    }

    pub fn normalized(&self) -> bool {
        self.mode == DataMode::Normalized
    }
}

/// Tracks the last platform theme seen so changes are dispatched once.
#[derive(Debug, Default)]
pub struct ThemeSignal {
    last: Option<bool>,
}

impl ThemeSignal {
    /// Returns an action only when the observed theme differs from the last one.
    pub fn observe(&mut self, dark: Option<bool>) -> Option<ViewAction> {
        let dark = dark?;
        if self.last == Some(dark) {
            return None;
        }
        self.last = Some(dark);
        Some(ViewAction::SystemThemeChanged(dark))
    }
}
