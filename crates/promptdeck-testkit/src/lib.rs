// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use promptdeck_app::{Prompt, PromptId, sort_for_library};
use promptdeck_client::{NewPrompt, PromptStore, PromptUpdate};
use std::sync::{Arc, Mutex, MutexGuard};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// In-process [`PromptStore`] with the same observable semantics as the
/// remote store: exact tag containment, case-insensitive substring matching,
/// library ordering, absent-when-empty collections, not-found on repeated
/// delete. Clones share state, so a clone handed to a worker thread observes
/// the same records.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug)]
struct MemoryInner {
    prompts: Vec<Prompt>,
    next_id: u64,
    clock: OffsetDateTime,
}

// Fixed epoch so test assertions on ordering are deterministic.
const CLOCK_EPOCH: OffsetDateTime = datetime!(2026-01-01 00:00 UTC);

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                prompts: Vec::new(),
                next_id: 0,
                clock: CLOCK_EPOCH,
            })),
        }
    }

    /// A store pre-populated with the demo library.
    pub fn with_samples() -> Self {
        let store = Self::new();
        for sample in sample_prompts() {
            store
                .insert_prompt(&sample)
                .expect("seed sample prompt");
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl MemoryInner {
    // Monotonic fake clock; each tick is one second so created_at ordering
    // follows insertion order.
    fn tick(&mut self) -> OffsetDateTime {
        self.clock += Duration::seconds(1);
        self.clock
    }

    fn position_of(&self, id: &PromptId) -> Option<usize> {
        self.prompts.iter().position(|prompt| prompt.id == *id)
    }
}

impl PromptStore for MemoryStore {
    fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn list_prompts(&self) -> Result<Vec<Prompt>> {
        let inner = self.lock();
        let mut prompts = inner.prompts.clone();
        sort_for_library(&mut prompts);
        Ok(prompts)
    }

    fn recent_prompts(&self, limit: usize) -> Result<Vec<Prompt>> {
        let inner = self.lock();
        let mut prompts = inner.prompts.clone();
        prompts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        prompts.truncate(limit);
        Ok(prompts)
    }

    fn prompts_with_tag(&self, tag: &str) -> Result<Vec<Prompt>> {
        let inner = self.lock();
        Ok(inner
            .prompts
            .iter()
            .filter(|prompt| prompt.tags.iter().any(|candidate| candidate == tag))
            .cloned()
            .collect())
    }

    fn prompts_matching(&self, text: &str) -> Result<Vec<Prompt>> {
        let needle = text.to_lowercase();
        let inner = self.lock();
        let mut matches: Vec<Prompt> = inner
            .prompts
            .iter()
            .filter(|prompt| {
                prompt.title.to_lowercase().contains(&needle)
                    || prompt.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matches)
    }

    fn insert_prompt(&self, new_prompt: &NewPrompt) -> Result<Prompt> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let now = inner.tick();
        let prompt = Prompt {
            id: PromptId::new(format!("mem-{:04}", inner.next_id)),
            title: new_prompt.title.clone(),
            content: new_prompt.content.clone(),
            tags: new_prompt.tags.clone(),
            models: new_prompt.models.clone(),
            favorite: false,
            created_at: now,
            updated_at: now,
        };
        inner.prompts.push(prompt.clone());
        Ok(prompt)
    }

    fn update_prompt(&self, id: &PromptId, update: &PromptUpdate) -> Result<Prompt> {
        let mut inner = self.lock();
        let Some(index) = inner.position_of(id) else {
            bail!("prompt {id} not found -- it may have been deleted");
        };
        let prompt = &mut inner.prompts[index];
        prompt.title = update.title.clone();
        prompt.content = update.content.clone();
        prompt.tags = update.tags.clone();
        prompt.models = update.models.clone();
        prompt.updated_at = update.updated_at;
        Ok(prompt.clone())
    }

    fn set_favorite(&self, id: &PromptId, favorite: bool) -> Result<Prompt> {
        let mut inner = self.lock();
        let Some(index) = inner.position_of(id) else {
            bail!("prompt {id} not found -- it may have been deleted");
        };
        let prompt = &mut inner.prompts[index];
        prompt.favorite = favorite;
        Ok(prompt.clone())
    }

    fn delete_prompt(&self, id: &PromptId) -> Result<()> {
        let mut inner = self.lock();
        let Some(index) = inner.position_of(id) else {
            bail!("prompt {id} not found -- it may already be deleted");
        };
        inner.prompts.remove(index);
        Ok(())
    }
}

/// Demo-mode seed data: a small believable prompt library.
pub fn sample_prompts() -> Vec<NewPrompt> {
    vec![
        NewPrompt {
            title: "Code review".to_owned(),
            content: "Review the following diff. Point out correctness bugs first, \
                      then style issues. Be specific about line numbers."
                .to_owned(),
            tags: vec!["coding".to_owned(), "review".to_owned()],
            models: vec!["claude-sonnet".to_owned()],
        },
        NewPrompt {
            title: "Commit message".to_owned(),
            content: "Write a one-line imperative commit message for this diff, \
                      under 70 characters."
                .to_owned(),
            tags: vec!["coding".to_owned(), "git".to_owned()],
            models: Vec::new(),
        },
        NewPrompt {
            title: "Summarize meeting notes".to_owned(),
            content: "Summarize these notes into decisions, action items with \
                      owners, and open questions."
                .to_owned(),
            tags: vec!["writing".to_owned()],
            models: vec!["claude-haiku".to_owned()],
        },
        NewPrompt {
            title: "Explain like I'm five".to_owned(),
            content: "Explain the following concept to a smart ten-year-old. \
                      No jargon. Use one concrete analogy."
                .to_owned(),
            tags: vec!["teaching".to_owned()],
            models: Vec::new(),
        },
        NewPrompt {
            title: "SQL from plain English".to_owned(),
            content: "Translate the question below into a single SELECT statement \
                      for the schema I provide. Return only SQL."
                .to_owned(),
            tags: vec!["coding".to_owned(), "sql".to_owned()],
            models: vec!["claude-sonnet".to_owned(), "claude-haiku".to_owned()],
        },
        NewPrompt {
            title: "Rewrite for tone".to_owned(),
            content: "Rewrite this message to be direct but friendly. Keep it \
                      under 120 words."
                .to_owned(),
            tags: vec!["writing".to_owned(), "email".to_owned()],
            models: Vec::new(),
        },
    ]
}
