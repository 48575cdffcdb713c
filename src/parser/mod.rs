//! Extraction of repository records from profile pages
//!
//! The markup of the remote repositories page is an unversioned external contract.
//! It is isolated behind the [`ListingParser`] trait so that a layout change is handled
//! by adding one implementation rather than editing field lookups across the crate.
//!
//! - [`RepositoryListParser`]: the `#user-repositories-list` layout, where each
//!   repository is an `li.source` entry carrying `itemprop` markers for its name,
//!   language and description.
//!
//! ## Usage
//!
//! ```
//! use profile_scan::parser::{ListingParser, RepositoryListParser};
//! use profile_scan::types::RawDocument;
//! use profile_scan::validate::validate;
//!
//! let html = r#"<div id="user-repositories-list"><ul>
//!     <li class="source"><a itemprop="name codeRepository">linux</a>
//!     <span itemprop="programmingLanguage">C</span></li>
//! </ul></div>"#;
//!
//! let parser = RepositoryListParser::default();
//! let id = validate("torvalds").unwrap();
//! let repos = parser.parse(&id, &RawDocument::new("", html)).unwrap();
//! assert_eq!(repos[0].link, "https://github.com/torvalds/linux");
//! ```

mod repository_list;
mod traits;

pub use repository_list::RepositoryListParser;
pub use traits::ListingParser;
