use dejavu_types::Selection;
use urlencoding::{decode, encode};

pub const SEARCH_PATH: &str = "/search";
pub const DETAIL_PATH: &str = "/detail";

/// A client location. The location string is the single source of truth for
/// navigable state: every read is a pure parse of the current location,
/// every write is serialize-then-navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search {
        /// `None` means no query yet, distinct from an empty keyword.
        text: Option<String>,
    },
    Detail {
        /// `None` when `image_id` is missing or malformed; the detail view
        /// then shows a placeholder instead of erroring.
        selection: Option<Selection>,
    },
}

impl Route {
    /// Route for a submitted keyword. Trims, nothing else; an empty keyword
    /// is a valid (empty-result) query.
    pub fn search(keyword: &str) -> Route {
        Route::Search {
            text: Some(keyword.trim().to_string()),
        }
    }

    pub fn detail(selection: Selection) -> Route {
        Route::Detail {
            selection: Some(selection),
        }
    }

    /// Parses a location string. Tolerant by contract: malformed parameters
    /// degrade to placeholder variants, unknown paths to `Home`. Never
    /// errors.
    pub fn parse(location: &str) -> Route {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };

        match path {
            SEARCH_PATH => Route::Search {
                text: query_param(query, "text"),
            },
            DETAIL_PATH => {
                let image_id = query_param(query, "image_id");
                let selection = image_id.filter(|id| !id.is_empty()).map(|image_id| {
                    let text_ids = query_param(query, "text_ids")
                        .map(|raw| parse_text_ids(&raw))
                        .unwrap_or_default();
                    Selection { image_id, text_ids }
                });
                Route::Detail { selection }
            }
            _ => Route::Home,
        }
    }

    pub fn to_location(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { text: None } => SEARCH_PATH.to_string(),
            Route::Search { text: Some(text) } => {
                format!("{SEARCH_PATH}?text={}", encode(text))
            }
            Route::Detail { selection: None } => DETAIL_PATH.to_string(),
            Route::Detail {
                selection: Some(selection),
            } => format!(
                "{DETAIL_PATH}?image_id={}&text_ids={}",
                encode(&selection.image_id),
                join_text_ids(&selection.text_ids)
            ),
        }
    }
}

/// Backend path for the search request.
pub fn api_search_path(keyword: &str) -> String {
    format!("/api/search?text={}", encode(keyword))
}

/// Backend path for an image, with its advisory text ids.
pub fn api_image_path(selection: &Selection) -> String {
    format!(
        "/api/image?image_id={}&text_ids={}",
        encode(&selection.image_id),
        join_text_ids(&selection.text_ids)
    )
}

pub fn join_text_ids(text_ids: &[u32]) -> String {
    text_ids
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a comma-joined id list, skipping entries that do not parse.
fn parse_text_ids(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// First occurrence of `name` in a query string, percent-decoded. An
/// undecodable value is kept raw rather than rejected.
fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == name {
                Some(
                    decode(value)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| value.to_string()),
                )
            } else {
                None
            }
        })
}

/// Ordered location stack with a cursor, giving back/forward navigation.
#[derive(Debug)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: String) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Pushes a new location, truncating any forward tail. Re-navigating to
    /// the current location is a no-op on the stack.
    pub fn navigate(&mut self, location: String) {
        if self.current() == location {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}
