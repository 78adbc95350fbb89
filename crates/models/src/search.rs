//! Global search DTOs.

use serde::{Deserialize, Serialize};

use crate::blog::BlogPost;
use crate::project::Project;
use crate::task::Task;
use crate::volunteer::Volunteer;

/// Entity kinds the search endpoint can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Projects,
    Tasks,
    Volunteers,
    Posts,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Volunteers => "volunteers",
            Self::Posts => "posts",
        }
    }
}

/// Query string for `GET /search/`.
///
/// `types` travels as a single comma-separated value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn with_types(mut self, types: &[SearchType]) -> Self {
        if types.is_empty() {
            self.types = None;
        } else {
            let joined: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
            self.types = Some(joined.join(","));
        }
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub total: u32,
}
