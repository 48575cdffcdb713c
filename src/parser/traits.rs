//! Parser contract for repository listing pages

use crate::error::ParseError;
use crate::types::{Identifier, RawDocument, RepositoryRecord};

/// Extracts repository records from a fetched profile page
///
/// Implementations must distinguish a missing listing container
/// ([`ParseError::ListingNotFound`]) from a present but empty one (`Ok(vec![])`), and
/// must keep an entry even when some of its fields are missing.
pub trait ListingParser: Send + Sync {
    /// Short name of the page layout this parser understands
    fn schema(&self) -> &'static str;

    /// Extract repositories in page order
    ///
    /// # Arguments
    ///
    /// * `identifier` - Account the page belongs to, used to build repository links
    /// * `document` - Fetched page
    fn parse(
        &self,
        identifier: &Identifier,
        document: &RawDocument,
    ) -> Result<Vec<RepositoryRecord>, ParseError>;
}
