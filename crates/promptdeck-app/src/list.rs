// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::PromptId;
use crate::model::{Prompt, sort_for_library};

/// The library list and its keyboard selection. Selection tracks record
/// identity across refreshes: after the backing list reorders, the highlight
/// follows the previously selected id rather than silently pointing at
/// whatever landed in the same slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptList {
    prompts: Vec<Prompt>,
    cursor: Option<usize>,
}

impl PromptList {
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Prompt> {
        self.prompts.get(self.cursor?)
    }

    /// Replace the backing list with a fresh fetch. The previous selection is
    /// re-located by id; if that record is gone the cursor clamps to the same
    /// position.
    pub fn replace(&mut self, prompts: Vec<Prompt>) {
        let previous_id = self.selected().map(|prompt| prompt.id.clone());
        self.prompts = prompts;
        self.cursor = match previous_id.and_then(|id| self.position_of(&id)) {
            Some(index) => Some(index),
            None => self.clamped_cursor(),
        };
    }

    /// Down from no selection enters the list at the top; both ends clamp.
    pub fn move_down(&mut self) {
        if self.prompts.is_empty() {
            return;
        }
        self.cursor = Some(match self.cursor {
            None => 0,
            Some(index) => (index + 1).min(self.prompts.len() - 1),
        });
    }

    /// Up with no selection stays unselected.
    pub fn move_up(&mut self) {
        if let Some(index) = self.cursor
            && index > 0
        {
            self.cursor = Some(index - 1);
        }
    }

    pub fn select_id(&mut self, id: &PromptId) {
        if let Some(index) = self.position_of(id) {
            self.cursor = Some(index);
        }
    }

    /// Optimistic local flip of the favorite flag, ahead of the store call.
    pub fn flip_favorite(&mut self, id: &PromptId) -> Option<bool> {
        let index = self.position_of(id)?;
        let prompt = &mut self.prompts[index];
        prompt.favorite = !prompt.favorite;
        Some(prompt.favorite)
    }

    /// Merge a single store-confirmed record and re-sort, keeping the
    /// highlight on that record. Used by the favorite toggle instead of a
    /// full re-fetch.
    pub fn merge_confirmed(&mut self, confirmed: Prompt) {
        let id = confirmed.id.clone();
        match self.position_of(&id) {
            Some(index) => self.prompts[index] = confirmed,
            None => self.prompts.push(confirmed),
        }
        sort_for_library(&mut self.prompts);
        self.cursor = self.position_of(&id);
    }

    /// Local removal ahead of the post-delete re-fetch.
    pub fn remove(&mut self, id: &PromptId) {
        if let Some(index) = self.position_of(id) {
            self.prompts.remove(index);
            self.cursor = self.clamped_cursor();
        }
    }

    fn position_of(&self, id: &PromptId) -> Option<usize> {
        self.prompts.iter().position(|prompt| prompt.id == *id)
    }

    fn clamped_cursor(&self) -> Option<usize> {
        match self.cursor {
            Some(_) if self.prompts.is_empty() => None,
            Some(index) => Some(index.min(self.prompts.len() - 1)),
            None => None,
        }
    }
}
