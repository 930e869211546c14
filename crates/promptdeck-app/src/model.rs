// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::OffsetDateTime;

use crate::ids::PromptId;

/// A stored prompt: a title/content pair with optional tags and model
/// labels. The content field is what gets copied to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub models: Vec<String>,
    pub favorite: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Library,
    Compose,
}

impl TabKind {
    pub const ALL: [Self; 2] = [Self::Library, Self::Compose];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Library => "library",
            Self::Compose => "compose",
        }
    }
}

/// Library ordering: favorites first, then most recently updated, with the
/// id as a deterministic tiebreaker. The store applies the same ordering to
/// full fetches; this comparator exists for local re-sorts after a merged
/// favorite confirmation.
pub fn compare_for_library(a: &Prompt, b: &Prompt) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.id.cmp(&a.id))
}

pub fn sort_for_library(prompts: &mut [Prompt]) {
    prompts.sort_by(compare_for_library);
}
