// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use promptdeck_app::{Prompt, PromptId};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

const PROMPTS_TABLE: &str = "prompts";
const LIBRARY_ORDER: &str = "favorite.desc,updated_at.desc,id.desc";
const RECENT_ORDER: &str = "created_at.desc";

/// Fields for a new record. The store assigns id and timestamps; favorite
/// starts false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub models: Vec<String>,
}

/// Full-edit payload. `updated_at` is client-stamped; the favorite flag is
/// deliberately absent -- it travels through [`PromptStore::set_favorite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptUpdate {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub models: Vec<String>,
    pub updated_at: OffsetDateTime,
}

impl PromptUpdate {
    pub fn stamped_now(
        title: String,
        content: String,
        tags: Vec<String>,
        models: Vec<String>,
    ) -> Self {
        Self {
            title,
            content,
            tags,
            models,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

/// The record store contract. All operations are synchronous at this layer;
/// the UI runtime decides what runs on a background thread.
pub trait PromptStore {
    fn health_check(&self) -> Result<()>;
    /// Full collection, favorites first, then newest-updated first.
    fn list_prompts(&self) -> Result<Vec<Prompt>>;
    /// The `limit` most recently created records, newest first.
    fn recent_prompts(&self, limit: usize) -> Result<Vec<Prompt>>;
    /// Records whose tag collection contains `tag` exactly (case-sensitive).
    fn prompts_with_tag(&self, tag: &str) -> Result<Vec<Prompt>>;
    /// Records where title or content contains `text` case-insensitively,
    /// newest-created first.
    fn prompts_matching(&self, text: &str) -> Result<Vec<Prompt>>;
    fn insert_prompt(&self, new_prompt: &NewPrompt) -> Result<Prompt>;
    fn update_prompt(&self, id: &PromptId, update: &PromptUpdate) -> Result<Prompt>;
    /// Flips only the favorite flag; does not stamp `updated_at`.
    fn set_favorite(&self, id: &PromptId, favorite: bool) -> Result<Prompt>;
    /// Hard delete. A repeat call for the same id reports not-found.
    fn delete_prompt(&self, id: &PromptId) -> Result<()>;
}

/// Blocking client for a PostgREST-style endpoint, the interface the hosted
/// relational store exposes. Row-level filtering and auth stay server-side;
/// this client only shapes requests and maps rows.
#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: String,
    http: HttpClient,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("store.base_url must not be empty");
        }
        Url::parse(&base_url)
            .with_context(|| format!("store.base_url {base_url:?} is not a valid URL"))?;
        if api_key.trim().is_empty() {
            bail!("store.api_key must not be empty");
        }

        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key).context("store.api_key header value")?;
        key_value.set_sensitive(true);
        headers.insert("apikey", key_value);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .context("store.api_key bearer value")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, pairs: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{PROMPTS_TABLE}", self.base_url))
            .context("build prompts endpoint URL")?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn fetch_rows(&self, action: &str, url: Url) -> Result<Vec<Prompt>> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let response = check_status(action, response)?;
        let rows: Vec<PromptRow> = response
            .json()
            .with_context(|| format!("decode {action} response"))?;
        Ok(rows.into_iter().map(Prompt::from).collect())
    }

    fn mutate_rows(
        &self,
        action: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Vec<Prompt>> {
        let response = request
            .header("Prefer", "return=representation")
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let response = check_status(action, response)?;
        let rows: Vec<PromptRow> = response
            .json()
            .with_context(|| format!("decode {action} response"))?;
        Ok(rows.into_iter().map(Prompt::from).collect())
    }
}

impl PromptStore for RestStore {
    fn health_check(&self) -> Result<()> {
        let url = self.table_url(&[("select", "id"), ("limit", "1")])?;
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        check_status("connect to store", response)?;
        Ok(())
    }

    fn list_prompts(&self) -> Result<Vec<Prompt>> {
        let url = self.table_url(&[("select", "*"), ("order", LIBRARY_ORDER)])?;
        self.fetch_rows("load prompts", url)
    }

    fn recent_prompts(&self, limit: usize) -> Result<Vec<Prompt>> {
        let limit = limit.to_string();
        let url = self.table_url(&[
            ("select", "*"),
            ("order", RECENT_ORDER),
            ("limit", &limit),
        ])?;
        self.fetch_rows("load recent prompts", url)
    }

    fn prompts_with_tag(&self, tag: &str) -> Result<Vec<Prompt>> {
        let contains = format!("cs.{{{}}}", quote_array_element(tag));
        let url = self.table_url(&[("select", "*"), ("tags", &contains)])?;
        self.fetch_rows("search by tag", url)
    }

    fn prompts_matching(&self, text: &str) -> Result<Vec<Prompt>> {
        let pattern = quote_logic_value(&ilike_pattern(text));
        let filter = format!("(title.ilike.{pattern},content.ilike.{pattern})");
        let url = self.table_url(&[
            ("select", "*"),
            ("or", &filter),
            ("order", RECENT_ORDER),
        ])?;
        self.fetch_rows("search prompts", url)
    }

    fn insert_prompt(&self, new_prompt: &NewPrompt) -> Result<Prompt> {
        let url = self.table_url(&[])?;
        let body = InsertBody {
            title: &new_prompt.title,
            content: &new_prompt.content,
            tags: absent_when_empty(&new_prompt.tags),
            models: absent_when_empty(&new_prompt.models),
            favorite: false,
        };
        let rows = self.mutate_rows("create prompt", self.http.post(url).json(&body))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("store returned no row for the created prompt"))
    }

    fn update_prompt(&self, id: &PromptId, update: &PromptUpdate) -> Result<Prompt> {
        let eq = format!("eq.{}", id.as_str());
        let url = self.table_url(&[("id", &eq)])?;
        let updated_at = update
            .updated_at
            .format(&Rfc3339)
            .context("format updated_at timestamp")?;
        let body = UpdateBody {
            title: &update.title,
            content: &update.content,
            tags: absent_when_empty(&update.tags),
            models: absent_when_empty(&update.models),
            updated_at: &updated_at,
        };
        let rows = self.mutate_rows("update prompt", self.http.patch(url).json(&body))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("prompt {id} not found -- it may have been deleted"))
    }

    fn set_favorite(&self, id: &PromptId, favorite: bool) -> Result<Prompt> {
        let eq = format!("eq.{}", id.as_str());
        let url = self.table_url(&[("id", &eq)])?;
        let body = FavoriteBody { favorite };
        let rows = self.mutate_rows("update favorite", self.http.patch(url).json(&body))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("prompt {id} not found -- it may have been deleted"))
    }

    fn delete_prompt(&self, id: &PromptId) -> Result<()> {
        let eq = format!("eq.{}", id.as_str());
        let url = self.table_url(&[("id", &eq)])?;
        let rows = self.mutate_rows("delete prompt", self.http.delete(url))?;
        if rows.is_empty() {
            bail!("prompt {id} not found -- it may already be deleted");
        }
        Ok(())
    }
}

/// Wire shape of a prompt row. The store serializes absent tag/model
/// collections as null; the domain model normalizes to empty vectors.
#[derive(Debug, Deserialize)]
struct PromptRow {
    id: String,
    title: String,
    content: String,
    tags: Option<Vec<String>>,
    models: Option<Vec<String>>,
    favorite: bool,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl From<PromptRow> for Prompt {
    fn from(row: PromptRow) -> Self {
        Self {
            id: PromptId::new(row.id),
            title: row.title,
            content: row.content,
            tags: row.tags.unwrap_or_default(),
            models: row.models.unwrap_or_default(),
            favorite: row.favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertBody<'a> {
    title: &'a str,
    content: &'a str,
    tags: Option<&'a [String]>,
    models: Option<&'a [String]>,
    favorite: bool,
}

#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    title: &'a str,
    content: &'a str,
    tags: Option<&'a [String]>,
    models: Option<&'a [String]>,
    updated_at: &'a str,
}

#[derive(Debug, Serialize)]
struct FavoriteBody {
    favorite: bool,
}

fn absent_when_empty(values: &[String]) -> Option<&[String]> {
    if values.is_empty() { None } else { Some(values) }
}

/// ilike pattern with SQL wildcards escaped, wrapped for substring matching.
/// PostgREST translates `*` to `%` on its side, so `*` wraps the pattern.
fn ilike_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('*');
    for ch in text.chars() {
        match ch {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            other => escaped.push(other),
        }
    }
    escaped.push('*');
    escaped
}

/// Values inside an `or=(...)` logic tree need double quoting so commas and
/// parentheses in user text do not split the expression.
fn quote_logic_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Array literal element for `cs.{...}` containment filters.
fn quote_array_element(value: &str) -> String {
    quote_logic_value(value)
}

fn check_status(action: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(error_response(action, status, &body))
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!("cannot reach the prompt store at {base_url} -- check [store].base_url and your network ({error})")
}

fn error_response(action: &str, status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<StoreErrorEnvelope>(body)
        && !parsed.message.is_empty()
    {
        return anyhow!("{action} failed ({}): {}", status.as_u16(), parsed.message);
    }

    if body.len() < 200 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("{action} failed ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("{action} failed: store returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct StoreErrorEnvelope {
    #[serde(default)]
    message: String,
}
