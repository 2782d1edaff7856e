/// URL set definitions for the per-domain link state
use std::collections::HashSet;
use std::fmt;

/// Names one of the three disjoint URL sets persisted for every domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSet {
    /// URLs not yet successfully submitted or permanently failed
    Pending,

    /// URLs the indexing API accepted
    Indexed,

    /// URLs the indexing API rejected; never resubmitted
    Failed,
}

impl LinkSet {
    /// File name used by file-backed stores
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Pending => "pending.txt",
            Self::Indexed => "indexed.txt",
            Self::Failed => "failed.txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Indexed => "indexed",
            Self::Failed => "failed",
        }
    }

    /// Returns all link sets
    pub fn all() -> [Self; 3] {
        [Self::Pending, Self::Indexed, Self::Failed]
    }
}

impl fmt::Display for LinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered set of URLs
///
/// Keeps the order entries were added in (the persisted order) while
/// answering membership queries in constant time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a sequence, keeping the first occurrence of each URL
    pub fn from_links<I>(links: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = Self::new();
        for link in links {
            set.insert(link);
        }
        set
    }

    /// Adds a URL; returns false if it was already present
    pub fn insert(&mut self, url: String) -> bool {
        if self.members.contains(&url) {
            return false;
        }
        self.members.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}
