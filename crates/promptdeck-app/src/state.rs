// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::TabKind;

/// Root shell state: the active tab and the transient status line. The demo
/// banner flag is set once at startup and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub status_line: Option<String>,
    pub demo_banner: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: TabKind::Library,
            status_line: None,
            demo_banner: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SetActiveTab(TabKind),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.shift_tab(1),
            AppCommand::PrevTab => self.shift_tab(-1),
            AppCommand::SetActiveTab(tab) => {
                if self.active_tab == tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    // Tabs clamp at both ends rather than wrapping.
    fn shift_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, tabs.len() as isize - 1) as usize;
        if tabs[next] == self.active_tab {
            return Vec::new();
        }
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }
}
