// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Prompt;

/// Result-set size for an empty query.
pub const RECENT_LIMIT: usize = 10;

const TAG_MARKER: &str = "tag:";

/// How a raw query string is interpreted before dispatching to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// Empty query: the most recently created records, newest first.
    Recent,
    /// `tag:<value>` query: exact, case-sensitive tag membership.
    Tag(String),
    /// Anything else: case-insensitive substring over title or content.
    Text(String),
}

/// The marker is matched ASCII-case-insensitively; the value keeps its case.
pub fn classify_query(raw: &str) -> QueryMode {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return QueryMode::Recent;
    }
    if let Some(prefix) = trimmed.get(..TAG_MARKER.len())
        && prefix.eq_ignore_ascii_case(TAG_MARKER)
    {
        return QueryMode::Tag(trimmed[TAG_MARKER.len()..].trim().to_owned());
    }
    QueryMode::Text(trimmed.to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Caret in the text box; typing edits the query.
    Input,
    /// A result row holds the highlight; arrows move it.
    Results,
}

/// A filter request the runtime must dispatch. Responses carry the sequence
/// number back so the overlay can drop anything that is not the latest issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub mode: QueryMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    Closed,
    ReturnedToInput,
}

/// Selection state machine for the search overlay. Pure: every edit that
/// changes the effective query hands back a [`SearchRequest`]; the caller
/// owns the I/O and feeds results through [`SearchOverlay::apply_response`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOverlay {
    open: bool,
    query: String,
    focus: SearchFocus,
    cursor: usize,
    results: Vec<Prompt>,
    loading: bool,
    next_seq: u64,
    issued_seq: Option<u64>,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self {
            open: false,
            query: String::new(),
            focus: SearchFocus::Input,
            cursor: 0,
            results: Vec::new(),
            loading: false,
            next_seq: 0,
            issued_seq: None,
        }
    }
}

impl SearchOverlay {
    /// Reset query and selection, focus the input, and request the default
    /// (recent) result set.
    pub fn open(&mut self) -> SearchRequest {
        self.open = true;
        self.query.clear();
        self.focus = SearchFocus::Input;
        self.cursor = 0;
        self.results.clear();
        self.issue()
    }

    /// Discard query and selection. Outstanding requests stay in flight but
    /// their responses no longer match any issued sequence.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.focus = SearchFocus::Input;
        self.cursor = 0;
        self.results.clear();
        self.loading = false;
        self.issued_seq = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn focus(&self) -> SearchFocus {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn results(&self) -> &[Prompt] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected(&self) -> Option<&Prompt> {
        self.results.get(self.cursor)
    }

    /// Every keystroke dispatches exactly one filter request.
    pub fn input_char(&mut self, ch: char) -> SearchRequest {
        self.query.push(ch);
        self.focus = SearchFocus::Input;
        self.issue()
    }

    pub fn backspace(&mut self) -> Option<SearchRequest> {
        self.query.pop()?;
        self.focus = SearchFocus::Input;
        Some(self.issue())
    }

    pub fn clear_query(&mut self) -> Option<SearchRequest> {
        if self.query.is_empty() {
            return None;
        }
        self.query.clear();
        self.focus = SearchFocus::Input;
        Some(self.issue())
    }

    /// The text box regained focus by click or any other means.
    pub fn focus_input(&mut self) {
        self.focus = SearchFocus::Input;
    }

    /// Highlight a row without moving keyboard focus (the hover contract:
    /// the index feeds Enter, but up/down semantics follow the focus flag).
    pub fn point_at(&mut self, index: usize) {
        if index < self.results.len() {
            self.cursor = index;
        }
    }

    /// Up from the first result leaves the list and returns to the input.
    pub fn move_up(&mut self) {
        if self.focus != SearchFocus::Results || self.results.is_empty() {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        } else {
            self.focus = SearchFocus::Input;
        }
    }

    /// Down clamps at the last result; there is no wraparound.
    pub fn move_down(&mut self) {
        if self.focus != SearchFocus::Results || self.results.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.results.len() - 1);
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        match self.focus {
            SearchFocus::Input => {
                self.close();
                EscapeOutcome::Closed
            }
            SearchFocus::Results => {
                self.focus = SearchFocus::Input;
                EscapeOutcome::ReturnedToInput
            }
        }
    }

    /// Apply a completed filter response. Returns false when the response is
    /// stale (superseded sequence) or the overlay has closed; stale results
    /// must never overwrite newer ones.
    pub fn apply_response(&mut self, seq: u64, results: Vec<Prompt>) -> bool {
        if !self.open || self.issued_seq != Some(seq) {
            return false;
        }
        self.loading = false;
        self.results = results;
        if self.results.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.results.len() - 1);
            if self.focus == SearchFocus::Input && !self.query.trim().is_empty() {
                self.focus = SearchFocus::Results;
            }
        }
        true
    }

    /// A failed request keeps the previous result set and does not change
    /// focus. Returns true when the failure belongs to the latest request,
    /// in which case the caller surfaces a notification.
    pub fn fail_response(&mut self, seq: u64) -> bool {
        if !self.open || self.issued_seq != Some(seq) {
            return false;
        }
        self.loading = false;
        true
    }

    fn issue(&mut self) -> SearchRequest {
        self.next_seq = self.next_seq.saturating_add(1);
        self.issued_seq = Some(self.next_seq);
        self.loading = true;
        SearchRequest {
            seq: self.next_seq,
            mode: classify_query(&self.query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EscapeOutcome, QueryMode, SearchFocus, SearchOverlay, classify_query};
    use crate::ids::PromptId;
    use crate::model::Prompt;
    use time::macros::datetime;

    fn prompt(id: &str) -> Prompt {
        Prompt {
            id: PromptId::new(id),
            title: format!("title {id}"),
            content: format!("content {id}"),
            tags: Vec::new(),
            models: Vec::new(),
            favorite: false,
            created_at: datetime!(2026-03-01 08:00 UTC),
            updated_at: datetime!(2026-03-01 08:00 UTC),
        }
    }

    fn results(ids: &[&str]) -> Vec<Prompt> {
        ids.iter().map(|id| prompt(id)).collect()
    }

    #[test]
    fn empty_query_is_recent_mode() {
        assert_eq!(classify_query(""), QueryMode::Recent);
        assert_eq!(classify_query("   "), QueryMode::Recent);
    }

    #[test]
    fn tag_marker_is_case_insensitive_but_value_keeps_case() {
        assert_eq!(
            classify_query("tag:Rust"),
            QueryMode::Tag("Rust".to_owned())
        );
        assert_eq!(
            classify_query("TAG: coding "),
            QueryMode::Tag("coding".to_owned())
        );
    }

    #[test]
    fn tag_marker_without_value_stays_tag_mode() {
        assert_eq!(classify_query("tag:"), QueryMode::Tag(String::new()));
    }

    #[test]
    fn other_text_is_text_mode() {
        assert_eq!(
            classify_query("  review my code  "),
            QueryMode::Text("review my code".to_owned())
        );
        assert_eq!(
            classify_query("montag:ue"),
            QueryMode::Text("montag:ue".to_owned())
        );
    }

    #[test]
    fn open_resets_state_and_requests_recent() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();

        assert!(overlay.is_open());
        assert_eq!(overlay.focus(), SearchFocus::Input);
        assert_eq!(overlay.cursor(), 0);
        assert_eq!(request.mode, QueryMode::Recent);
        assert!(overlay.is_loading());
    }

    #[test]
    fn results_arriving_for_nonempty_query_shift_focus_to_list() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let request = overlay.input_char('a');

        assert_eq!(overlay.focus(), SearchFocus::Input);
        assert!(overlay.apply_response(request.seq, results(&["1", "2"])));
        assert_eq!(overlay.focus(), SearchFocus::Results);
        assert!(!overlay.is_loading());
    }

    #[test]
    fn results_for_empty_query_keep_input_focus() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();

        assert!(overlay.apply_response(request.seq, results(&["1"])));
        assert_eq!(overlay.focus(), SearchFocus::Input);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let first = overlay.input_char('a');
        let second = overlay.input_char('b');

        assert!(!overlay.apply_response(first.seq, results(&["stale"])));
        assert!(overlay.results().is_empty());

        assert!(overlay.apply_response(second.seq, results(&["fresh"])));
        assert_eq!(overlay.results()[0].id, PromptId::new("fresh"));
    }

    #[test]
    fn response_after_close_is_dropped() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();
        overlay.close();

        assert!(!overlay.apply_response(request.seq, results(&["late"])));
        assert!(!overlay.is_open());
        assert!(overlay.results().is_empty());
    }

    #[test]
    fn up_at_first_result_returns_to_input() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let request = overlay.input_char('a');
        overlay.apply_response(request.seq, results(&["1", "2", "3"]));

        overlay.move_down();
        assert_eq!(overlay.cursor(), 1);
        overlay.move_up();
        assert_eq!(overlay.cursor(), 0);
        assert_eq!(overlay.focus(), SearchFocus::Results);

        overlay.move_up();
        assert_eq!(overlay.focus(), SearchFocus::Input);
        assert_eq!(overlay.cursor(), 0);
    }

    #[test]
    fn down_clamps_at_last_result() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let request = overlay.input_char('a');
        overlay.apply_response(request.seq, results(&["1", "2"]));

        overlay.move_down();
        overlay.move_down();
        overlay.move_down();
        assert_eq!(overlay.cursor(), 1);
    }

    #[test]
    fn arrows_do_nothing_while_input_is_focused() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();
        overlay.apply_response(request.seq, results(&["1", "2"]));

        assert_eq!(overlay.focus(), SearchFocus::Input);
        overlay.move_down();
        assert_eq!(overlay.cursor(), 0);
    }

    #[test]
    fn escape_layers_back_out_then_closes() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let request = overlay.input_char('a');
        overlay.apply_response(request.seq, results(&["1"]));
        assert_eq!(overlay.focus(), SearchFocus::Results);

        assert_eq!(overlay.escape(), EscapeOutcome::ReturnedToInput);
        assert!(overlay.is_open());
        assert_eq!(overlay.escape(), EscapeOutcome::Closed);
        assert!(!overlay.is_open());
    }

    #[test]
    fn clearing_query_returns_focus_to_input_and_requests_recent() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let request = overlay.input_char('a');
        overlay.apply_response(request.seq, results(&["1"]));
        assert_eq!(overlay.focus(), SearchFocus::Results);

        let request = overlay.backspace().expect("backspace should re-issue");
        assert_eq!(request.mode, QueryMode::Recent);
        assert_eq!(overlay.focus(), SearchFocus::Input);
    }

    #[test]
    fn backspace_on_empty_query_issues_nothing() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        assert!(overlay.backspace().is_none());
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let first = overlay.input_char('a');
        overlay.apply_response(first.seq, results(&["keep"]));

        let second = overlay.input_char('b');
        assert!(overlay.fail_response(second.seq));
        assert_eq!(overlay.results()[0].id, PromptId::new("keep"));
        assert_eq!(overlay.focus(), SearchFocus::Input);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let first = overlay.input_char('a');
        let second = overlay.input_char('b');
        assert!(!overlay.fail_response(first.seq));
        assert!(overlay.fail_response(second.seq));
    }

    #[test]
    fn point_at_moves_highlight_without_changing_focus() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();
        overlay.apply_response(request.seq, results(&["1", "2", "3"]));

        overlay.point_at(2);
        assert_eq!(overlay.cursor(), 2);
        assert_eq!(overlay.focus(), SearchFocus::Input);

        overlay.point_at(9);
        assert_eq!(overlay.cursor(), 2);
    }

    #[test]
    fn selected_requires_valid_cursor() {
        let mut overlay = SearchOverlay::default();
        let request = overlay.open();
        assert!(overlay.selected().is_none());

        overlay.apply_response(request.seq, results(&["1"]));
        assert_eq!(
            overlay.selected().map(|p| p.id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn cursor_clamps_when_a_shorter_result_set_arrives() {
        let mut overlay = SearchOverlay::default();
        overlay.open();
        let first = overlay.input_char('a');
        overlay.apply_response(first.seq, results(&["1", "2", "3"]));
        overlay.move_down();
        overlay.move_down();
        assert_eq!(overlay.cursor(), 2);

        let second = overlay.input_char('b');
        overlay.apply_response(second.seq, results(&["1"]));
        assert_eq!(overlay.cursor(), 0);
    }
}
