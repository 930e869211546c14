// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::model::Prompt;

/// The editable fields of a draft, in form traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
    Tags,
    Models,
}

impl DraftField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Content, Self::Tags, Self::Models];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Tags => "tags",
            Self::Models => "models",
        }
    }
}

/// Editable field values backing both the create form and the edit modal.
/// Tags and models arrive here already committed (token entry lives in
/// [`crate::tokens::TokenInput`]); empty collections are normalized to
/// "absent" at the store boundary, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub models: Vec<String>,
}

impl PromptDraft {
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            tags: prompt.tags.clone(),
            models: prompt.models.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("prompt title is required -- enter a title and retry");
        }
        if self.content.trim().is_empty() {
            bail!("prompt content is required -- enter the prompt text and retry");
        }
        Ok(())
    }
}
