//! Parser for the `#user-repositories-list` page layout

use super::traits::ListingParser;
use crate::config::Config;
use crate::error::{ParseError, Result};
use crate::types::{Identifier, RawDocument, RepositoryRecord, UNKNOWN};
use scraper::{ElementRef, Html, Selector};
use url::Url;

const LISTING: &str = "#user-repositories-list";
const ENTRY: &str = "li.source";
const NAME: &str = r#"a[itemprop="name codeRepository"]"#;
const LANGUAGE: &str = r#"span[itemprop="programmingLanguage"]"#;
const DESCRIPTION: &str = r#"p[itemprop="description"]"#;

struct Selectors {
    listing: Selector,
    entry: Selector,
    name: Selector,
    language: Selector,
    description: Selector,
}

impl Selectors {
    fn compile() -> std::result::Result<Self, ParseError> {
        Ok(Self {
            listing: selector(LISTING)?,
            entry: selector(ENTRY)?,
            name: selector(NAME)?,
            language: selector(LANGUAGE)?,
            description: selector(DESCRIPTION)?,
        })
    }
}

fn selector(css: &str) -> std::result::Result<Selector, ParseError> {
    Selector::parse(css)
        .map_err(|e| ParseError::Structure(format!("invalid selector '{}': {}", css, e)))
}

/// Trimmed text of the first descendant matching `selector`, if it has any
fn field_text(entry: ElementRef<'_>, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parser for profile pages that list repositories under `#user-repositories-list`
#[derive(Clone, Debug)]
pub struct RepositoryListParser {
    profile_base: Url,
}

impl RepositoryListParser {
    /// Create a parser that builds repository links under `profile_base`
    pub fn new(profile_base: Url) -> Self {
        Self { profile_base }
    }

    /// Create a parser whose links point at the configured host
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.base_url()?))
    }

    fn repository_link(
        &self,
        identifier: &Identifier,
        name: &str,
    ) -> std::result::Result<String, ParseError> {
        let mut link = self.profile_base.clone();
        link.path_segments_mut()
            .map_err(|()| {
                ParseError::Structure(format!(
                    "cannot build repository links under '{}'",
                    self.profile_base
                ))
            })?
            .pop_if_empty()
            .push(identifier.as_str())
            .push(name);
        Ok(link.to_string())
    }

    fn parse_entry(
        &self,
        identifier: &Identifier,
        entry: ElementRef<'_>,
        selectors: &Selectors,
    ) -> std::result::Result<RepositoryRecord, ParseError> {
        let (name, link) = match field_text(entry, &selectors.name) {
            Some(name) => {
                let link = self.repository_link(identifier, &name)?;
                (name, link)
            }
            None => (UNKNOWN.to_string(), String::new()),
        };

        Ok(RepositoryRecord {
            name,
            link,
            language: field_text(entry, &selectors.language)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            description: field_text(entry, &selectors.description).unwrap_or_default(),
        })
    }
}

impl Default for RepositoryListParser {
    fn default() -> Self {
        #[allow(clippy::expect_used)]
        let base = Url::parse("https://github.com/").expect("static URL is valid");
        Self::new(base)
    }
}

impl ListingParser for RepositoryListParser {
    fn schema(&self) -> &'static str {
        "user-repositories-list"
    }

    fn parse(
        &self,
        identifier: &Identifier,
        document: &RawDocument,
    ) -> std::result::Result<Vec<RepositoryRecord>, ParseError> {
        let selectors = Selectors::compile()?;
        let html = Html::parse_document(document.body());

        let Some(listing) = html.select(&selectors.listing).next() else {
            tracing::debug!(
                identifier = %identifier,
                url = document.url(),
                "Repository listing container not found"
            );
            return Err(ParseError::ListingNotFound);
        };

        let records = listing
            .select(&selectors.entry)
            .map(|entry| self.parse_entry(identifier, entry, &selectors))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(
            identifier = %identifier,
            repositories = records.len(),
            "Parsed repository listing"
        );

        Ok(records)
    }
}
