//! Profile page fixtures

/// Build a repositories page from `(name, language, description)` entries
///
/// `None` omits the corresponding marker element entirely.
pub fn listing_page(entries: &[(Option<&str>, Option<&str>, Option<&str>)]) -> String {
    let items: String = entries
        .iter()
        .map(|(name, language, description)| {
            let mut item = String::from("<li class=\"col-12 d-flex source\">\n");
            if let Some(name) = name {
                item.push_str(&format!(
                    "  <h3><a href=\"#\" itemprop=\"name codeRepository\">\n    {name}</a></h3>\n"
                ));
            }
            if let Some(description) = description {
                item.push_str(&format!(
                    "  <p class=\"col-9\" itemprop=\"description\">\n    {description}\n  </p>\n"
                ));
            }
            if let Some(language) = language {
                item.push_str(&format!(
                    "  <span itemprop=\"programmingLanguage\">{language}</span>\n"
                ));
            }
            item.push_str("</li>\n");
            item
        })
        .collect();

    format!(
        "<!DOCTYPE html><html><head><title>Repositories</title></head><body>\n\
         <nav><li class=\"source\">decoy outside listing</li></nav>\n\
         <div id=\"user-repositories-list\"><ul>\n{items}</ul></div>\n\
         </body></html>"
    )
}

/// A profile page without the repository listing container
pub const NO_LISTING_PAGE: &str =
    "<!DOCTYPE html><html><body><div class=\"blankslate\">Not here</div></body></html>";

/// A profile page with an empty listing container
pub const EMPTY_LISTING_PAGE: &str =
    "<!DOCTYPE html><html><body><div id=\"user-repositories-list\"><ul></ul></div></body></html>";
