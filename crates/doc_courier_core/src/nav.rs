//! MkDocs navigation maintenance.
//!
//! Newly published documentation pages are appended to the `nav` list of the
//! site's `mkdocs.yml`. Everything else in the file is carried through in its
//! original order. Documents using Python-specific `!!` tags, as
//! mkdocs-material's emoji setup does, are refused rather than rewritten,
//! since those tags cannot survive a round trip.

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::{CourierError, CourierResult, DownloadedFile};

#[cfg(test)]
#[path = "nav_tests.rs"]
mod tests;

/// Repository path of the site generator config.
pub const NAV_CONFIG_PATH: &str = "mkdocs.yml";

/// Site name given to a config created from scratch.
pub const DEFAULT_SITE_NAME: &str = "Documentation";

const SITE_NAME_KEY: &str = "site_name";
const NAV_KEY: &str = "nav";

/// `!!` tags serde_yaml resolves itself. Any other `!!` tag is dropped on
/// parse, leaving an empty value behind.
const CORE_TAGS: [&str; 7] = ["str", "int", "float", "bool", "null", "seq", "map"];

/// One entry of the `nav` list.
#[derive(Debug, Clone, PartialEq)]
pub enum NavItem {
    /// A bare page path, e.g. `- intro.md`
    Path(String),

    /// A page with an explicit title, e.g. `- Intro: intro.md`
    Titled { title: String, path: String },

    /// Anything else (sections with children, external links, multi-key
    /// mappings), kept verbatim
    Other(Value),
}

impl NavItem {
    /// Whether this entry already points at `path`.
    ///
    /// Bare paths and titled pages match on their path; for other mappings any
    /// value equal to `path` counts.
    pub fn references(&self, path: &str) -> bool {
        match self {
            NavItem::Path(existing) => existing == path,
            NavItem::Titled { path: existing, .. } => existing == path,
            NavItem::Other(Value::Mapping(map)) => {
                map.values().any(|value| value.as_str() == Some(path))
            }
            NavItem::Other(_) => false,
        }
    }
}

impl From<Value> for NavItem {
    fn from(value: Value) -> Self {
        match value {
            Value::String(path) => NavItem::Path(path),
            Value::Mapping(map) if map.len() == 1 => {
                let titled = map
                    .iter()
                    .next()
                    .and_then(|(key, value)| Some((key.as_str()?, value.as_str()?)))
                    .map(|(title, path)| NavItem::Titled {
                        title: title.to_string(),
                        path: path.to_string(),
                    });
                titled.unwrap_or(NavItem::Other(Value::Mapping(map)))
            }
            other => NavItem::Other(other),
        }
    }
}

impl From<NavItem> for Value {
    fn from(item: NavItem) -> Self {
        match item {
            NavItem::Path(path) => Value::String(path),
            NavItem::Titled { title, path } => {
                let mut map = Mapping::new();
                map.insert(Value::String(title), Value::String(path));
                Value::Mapping(map)
            }
            NavItem::Other(value) => value,
        }
    }
}

/// An `mkdocs.yml` document with its `nav` list broken out.
///
/// The rest of the document is held as parsed, so key order and values this
/// module does not understand come back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    pub nav: Vec<NavItem>,
    document: Mapping,
}

impl Default for NavConfig {
    fn default() -> Self {
        let mut document = Mapping::new();
        document.insert(SITE_NAME_KEY.into(), DEFAULT_SITE_NAME.into());
        Self {
            nav: Vec::new(),
            document,
        }
    }
}

impl NavConfig {
    /// Parses an `mkdocs.yml` document.
    ///
    /// An empty document yields the default config.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::NavUpdate` if the text is not YAML, uses a `!!`
    /// tag outside the core schema, is not a mapping at the top level, or has
    /// a `nav` that is not a list.
    pub fn from_yaml(text: &str) -> CourierResult<Self> {
        if let Some(tag) = unsupported_tag(text) {
            return Err(CourierError::nav_update(format!(
                "unsupported YAML tag {tag} in {NAV_CONFIG_PATH}"
            )));
        }

        let document: Value = serde_yaml::from_str(text)
            .map_err(|e| CourierError::nav_update(format!("invalid YAML in {NAV_CONFIG_PATH}: {e}")))?;

        let document = match document {
            Value::Mapping(map) => map,
            Value::Null => return Ok(Self::default()),
            _ => {
                return Err(CourierError::nav_update(format!(
                    "{NAV_CONFIG_PATH} is not a mapping"
                )))
            }
        };

        let nav = match document.get(NAV_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items.iter().cloned().map(NavItem::from).collect(),
            Some(_) => {
                return Err(CourierError::nav_update(format!(
                    "{NAV_KEY} in {NAV_CONFIG_PATH} is not a list"
                )))
            }
        };

        Ok(Self { nav, document })
    }

    /// Serializes the config back to YAML.
    ///
    /// `nav` is written where it stood in the parsed document, or last when
    /// the document had none.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::NavUpdate` if serialization fails.
    pub fn to_yaml(&self) -> CourierResult<String> {
        let mut document = self.document.clone();
        document.insert(
            NAV_KEY.into(),
            Value::Sequence(self.nav.iter().cloned().map(Value::from).collect()),
        );

        serde_yaml::to_string(&Value::Mapping(document))
            .map_err(|e| CourierError::nav_update(format!("failed to serialize {NAV_CONFIG_PATH}: {e}")))
    }

    /// The `site_name` value, when it is a string.
    pub fn site_name(&self) -> Option<&str> {
        self.document.get(SITE_NAME_KEY).and_then(Value::as_str)
    }

    /// A top-level value as parsed.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.document.keys().filter_map(Value::as_str)
    }

    /// Whether any entry already points at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.nav.iter().any(|item| item.references(path))
    }

    /// Appends `{title: path}` unless `path` is already listed.
    ///
    /// Returns `true` when an entry was added.
    pub fn add_page(&mut self, title: impl Into<String>, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.nav.push(NavItem::Titled {
            title: title.into(),
            path,
        });
        true
    }
}

/// Finds the first `!!` tag outside the core schema, skipping comments and
/// quoted scalars.
fn unsupported_tag(text: &str) -> Option<&str> {
    text.lines().find_map(|line| {
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut prev = ' ';

        for (i, c) in line.char_indices() {
            match quote {
                Some('"') if escaped => escaped = false,
                Some('"') if c == '\\' => escaped = true,
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '\'' | '"' if prev.is_whitespace() || "[{,:-".contains(prev) => {
                        quote = Some(c)
                    }
                    '#' if prev.is_whitespace() => return None,
                    '!' if line[i..].starts_with("!!")
                        && (prev.is_whitespace() || "[{,".contains(prev)) =>
                    {
                        let name = line[i + 2..]
                            .split(|c: char| c.is_whitespace() || ",[]{}".contains(c))
                            .next()
                            .unwrap_or_default();
                        if !CORE_TAGS.contains(&name) {
                            return Some(&line[i..i + 2 + name.len()]);
                        }
                    }
                    _ => {}
                },
            }
            prev = c;
        }
        None
    })
}

/// Derives a human-readable title from a page path relative to the docs root.
///
/// The `.md` suffix is dropped, the name is split on `-` and `_`, and the first
/// character of every fragment is upper-cased. The rest of each fragment keeps
/// its casing.
///
/// # Examples
///
/// ```
/// use doc_courier_core::derive_title;
///
/// assert_eq!(derive_title("getting-started.md"), "Getting Started");
/// assert_eq!(derive_title("api_reference.md"), "Api Reference");
/// assert_eq!(derive_title("faq.md"), "Faq");
/// ```
pub fn derive_title(relative_path: &str) -> String {
    let name = relative_path.strip_suffix(".md").unwrap_or(relative_path);

    name.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Adds an entry for each documentation page to an `mkdocs.yml` document.
///
/// `existing` is the current file content, or `None` when the repository has
/// no config yet, in which case a default config is started. Pages already in
/// the navigation are skipped. Returns the full updated document.
///
/// # Errors
///
/// Returns `CourierError::NavUpdate` when the existing document cannot be
/// parsed or the result cannot be serialized.
pub fn merge_doc_entries<'a>(
    existing: Option<&str>,
    doc_files: impl IntoIterator<Item = &'a DownloadedFile>,
    docs_prefix: &str,
) -> CourierResult<String> {
    let mut config = match existing {
        Some(text) => {
            debug!("Parsing existing {}", NAV_CONFIG_PATH);
            NavConfig::from_yaml(text)?
        }
        None => {
            info!("{} not found, creating new one", NAV_CONFIG_PATH);
            NavConfig::default()
        }
    };

    for file in doc_files {
        let relative_path = file.path.strip_prefix(docs_prefix).unwrap_or(&file.path);
        let title = derive_title(relative_path);

        if config.add_page(title.as_str(), relative_path) {
            info!(title = %title, path = %relative_path, "Added page to navigation");
        } else {
            debug!(path = %relative_path, "Page already in navigation");
        }
    }

    config.to_yaml()
}
