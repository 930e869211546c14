// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use promptdeck_app::{Prompt, PromptDraft, PromptId, QueryMode, RECENT_LIMIT};
use promptdeck_client::{NewPrompt, PromptStore, PromptUpdate};
use promptdeck_tui::{AppRuntime, InternalEvent, SearchEvent};
use std::sync::mpsc::Sender;
use std::thread;

/// Bridges the UI to a [`PromptStore`]. Search requests run on their own
/// thread against a store clone; the response carries the request sequence
/// back so the overlay can discard anything superseded.
pub struct StoreRuntime<S> {
    store: S,
}

impl<S> StoreRuntime<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

fn run_query<S: PromptStore>(store: &S, mode: &QueryMode) -> Result<Vec<Prompt>> {
    match mode {
        QueryMode::Recent => store.recent_prompts(RECENT_LIMIT),
        QueryMode::Tag(tag) => store.prompts_with_tag(tag),
        QueryMode::Text(text) => store.prompts_matching(text),
    }
}

impl<S> AppRuntime for StoreRuntime<S>
where
    S: PromptStore + Clone + Send + 'static,
{
    fn health_check(&mut self) -> Result<()> {
        self.store.health_check()
    }

    fn load_prompt_list(&mut self) -> Result<Vec<Prompt>> {
        self.store.list_prompts()
    }

    fn run_search(&mut self, mode: &QueryMode) -> Result<Vec<Prompt>> {
        run_query(&self.store, mode)
    }

    fn spawn_search(
        &mut self,
        seq: u64,
        mode: QueryMode,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let store = self.store.clone();
        thread::spawn(move || {
            let event = match run_query(&store, &mode) {
                Ok(results) => InternalEvent::Search(SearchEvent::Completed { seq, results }),
                Err(error) => InternalEvent::Search(SearchEvent::Failed {
                    seq,
                    error: error.to_string(),
                }),
            };
            // The overlay may have closed; a dead channel is fine.
            let _ = tx.send(event);
        });
        Ok(())
    }

    fn create_prompt(&mut self, draft: &PromptDraft) -> Result<Prompt> {
        self.store.insert_prompt(&NewPrompt {
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: draft.tags.clone(),
            models: draft.models.clone(),
        })
    }

    fn update_prompt(&mut self, id: &PromptId, draft: &PromptDraft) -> Result<Prompt> {
        self.store.update_prompt(
            id,
            &PromptUpdate::stamped_now(
                draft.title.clone(),
                draft.content.clone(),
                draft.tags.clone(),
                draft.models.clone(),
            ),
        )
    }

    fn set_favorite(&mut self, id: &PromptId, favorite: bool) -> Result<Prompt> {
        self.store.set_favorite(id, favorite)
    }

    fn delete_prompt(&mut self, id: &PromptId) -> Result<()> {
        self.store.delete_prompt(id)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreRuntime;
    use anyhow::Result;
    use promptdeck_app::{PromptDraft, QueryMode};
    use promptdeck_client::PromptStore;
    use promptdeck_testkit::MemoryStore;
    use promptdeck_tui::{AppRuntime, InternalEvent, SearchEvent};
    use std::sync::mpsc;
    use std::time::Duration;

    fn draft(title: &str, content: &str) -> PromptDraft {
        PromptDraft {
            title: title.to_owned(),
            content: content.to_owned(),
            tags: vec!["t".to_owned()],
            models: Vec::new(),
        }
    }

    #[test]
    fn create_and_list_round_trip() -> Result<()> {
        let mut runtime = StoreRuntime::new(MemoryStore::new());
        runtime.create_prompt(&draft("a", "x"))?;

        let listed = runtime.load_prompt_list()?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tags, vec!["t"]);
        Ok(())
    }

    #[test]
    fn update_stamps_a_newer_updated_at() -> Result<()> {
        let mut runtime = StoreRuntime::new(MemoryStore::new());
        let created = runtime.create_prompt(&draft("a", "x"))?;

        let updated = runtime.update_prompt(&created.id, &draft("a2", "x2"))?;
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
        Ok(())
    }

    #[test]
    fn spawned_search_posts_a_stamped_response() -> Result<()> {
        let store = MemoryStore::new();
        let mut runtime = StoreRuntime::new(store.clone());
        runtime.create_prompt(&draft("findme", "x"))?;

        let (tx, rx) = mpsc::channel();
        runtime.spawn_search(7, QueryMode::Text("findme".to_owned()), tx)?;

        let event = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("search response expected");
        match event {
            InternalEvent::Search(SearchEvent::Completed { seq, results }) => {
                assert_eq!(seq, 7);
                assert_eq!(results.len(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn spawned_search_survives_a_dropped_receiver() -> Result<()> {
        let store = MemoryStore::new();
        let mut runtime = StoreRuntime::new(store);

        let (tx, rx) = mpsc::channel();
        drop(rx);
        runtime.spawn_search(1, QueryMode::Recent, tx)?;
        // Nothing to assert beyond "no panic"; the send error is swallowed.
        Ok(())
    }

    #[test]
    fn favorite_passthrough_leaves_updated_at_alone() -> Result<()> {
        let store = MemoryStore::new();
        let mut runtime = StoreRuntime::new(store.clone());
        let created = runtime.create_prompt(&draft("a", "x"))?;

        let confirmed = runtime.set_favorite(&created.id, true)?;
        assert!(confirmed.favorite);
        assert_eq!(confirmed.updated_at, created.updated_at);

        let reloaded = store.list_prompts()?;
        assert!(reloaded[0].favorite);
        Ok(())
    }
}
