use serde::{Deserialize, Serialize};

/// What the host knows about the request being rendered.
///
/// Flags mirror the questions a CMS answers about its current query. The
/// built-in conditions read them directly; custom conditions may also look at
/// `flags` for host-specific markers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The site's configured front page is being rendered.
    #[serde(default)]
    pub front_page: bool,
    /// The blog posts index is being rendered.
    #[serde(default)]
    pub home: bool,
    /// A date, author, category, or other archive listing.
    #[serde(default)]
    pub archive: bool,
    /// A search results listing.
    #[serde(default)]
    pub search: bool,
    /// A single content item.
    #[serde(default)]
    pub singular: bool,
    /// 1-based page number of a paginated listing.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Additional host-defined markers.
    #[serde(default)]
    pub flags: Vec<String>,
}

fn first_page() -> u32 {
    1
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            front_page: false,
            home: false,
            archive: false,
            search: false,
            singular: false,
            page: first_page(),
            flags: Vec::new(),
        }
    }
}

impl RequestContext {
    /// A request for the front page, first page of results.
    pub fn front_page() -> Self {
        Self {
            front_page: true,
            ..Default::default()
        }
    }

    pub fn with_home(mut self, home: bool) -> Self {
        self.home = home;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Returns `true` if the host set the given marker.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Past the first page of a paginated listing.
    pub fn is_paged(&self) -> bool {
        self.page > 1
    }
}
