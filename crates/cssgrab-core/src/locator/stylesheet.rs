//! Splitting the stylesheet's source URL into site root, directory and file name.

use url::Url;

use super::LocatorError;

/// Location of the stylesheet being mirrored.
///
/// For `http://example.com/styles/main/site.css`:
/// - `site_root` is `http://example.com/`
/// - `stylesheet_relative_path` is `styles/main`
/// - `base_url` is `http://example.com/styles/main/`
/// - `file_name` is `site.css`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetReference {
    source_url: String,
    site_root: String,
    directories: Vec<String>,
    file_name: String,
}

impl StylesheetReference {
    /// Parses an absolute stylesheet URL. Query and fragment are ignored for the
    /// split but kept in `source_url`.
    pub fn parse(source_url: &str) -> Result<Self, LocatorError> {
        let invalid = |reason: &str| LocatorError::InvalidSourceUrl {
            url: source_url.to_string(),
            reason: reason.to_string(),
        };

        let mut parsed = Url::parse(source_url).map_err(|e| invalid(&e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL"));
        }
        parsed.set_query(None);
        parsed.set_fragment(None);

        let bare = parsed.as_str();
        let (scheme, rest) = bare
            .split_once("://")
            .ok_or_else(|| invalid("missing scheme separator"))?;
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        if path.is_empty() || path.ends_with('/') {
            return Err(invalid("URL does not name a file"));
        }

        let mut directories: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let file_name = directories
            .pop()
            .ok_or_else(|| invalid("URL does not name a file"))?;

        Ok(StylesheetReference {
            source_url: source_url.to_string(),
            site_root: format!("{}://{}/", scheme, authority),
            directories,
            file_name,
        })
    }

    /// The URL exactly as given by the caller.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// `scheme://host/`, always with a trailing slash.
    pub fn site_root(&self) -> &str {
        &self.site_root
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory of the stylesheet below the site root, without leading or
    /// trailing slash. Empty when the stylesheet sits at the site root.
    pub fn stylesheet_relative_path(&self) -> String {
        self.directories.join("/")
    }

    /// Source URL with the file name stripped (ends with `/`).
    pub fn base_url(&self) -> String {
        if self.directories.is_empty() {
            self.site_root.clone()
        } else {
            format!("{}{}/", self.site_root, self.stylesheet_relative_path())
        }
    }

    pub(crate) fn directories(&self) -> &[String] {
        &self.directories
    }
}
