//! Tag value types and grouping.

use serde::Serialize;

/// One tag record from a listing query.
///
/// `remote == None` means the tag is local; otherwise it belongs to the
/// named remote's group. Produced fresh on every listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    /// Tag name (e.g., "v1.0").
    pub name: String,
    /// Full commit hash the tag points at.
    pub sha: String,
    /// Remote the tag was listed from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl TagEntry {
    pub fn local(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
            remote: None,
        }
    }

    pub fn remote(
        name: impl Into<String>,
        sha: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
            remote: Some(remote.into()),
        }
    }

    pub fn is_local(&self) -> bool {
        self.remote.is_none()
    }

    /// 7-character display prefix of the full hash.
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(7);
        &self.sha[..end]
    }
}

/// All tags listed from one remote, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteGroup {
    pub remote: String,
    pub entries: Vec<TagEntry>,
}

/// Minimal reference recoverable from a rendered tag line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagRef {
    /// 7-character hash prefix as displayed.
    pub short_hash: String,
    /// Tag name as displayed.
    pub name: String,
}

/// Partition a flat tag listing into local tags and per-remote groups.
///
/// Remote groups appear in the order their remote was first seen; entry
/// order within local and within each group follows the input. No
/// deduplication happens here; callers filter upstream.
pub fn group_remotes(tags: &[TagEntry]) -> (Vec<TagEntry>, Vec<RemoteGroup>) {
    let mut local = Vec::new();
    let mut groups: Vec<RemoteGroup> = Vec::new();

    for tag in tags {
        match &tag.remote {
            None => local.push(tag.clone()),
            Some(remote) => match groups.iter_mut().find(|g| g.remote == *remote) {
                Some(group) => group.entries.push(tag.clone()),
                None => groups.push(RemoteGroup {
                    remote: remote.clone(),
                    entries: vec![tag.clone()],
                }),
            },
        }
    }

    (local, groups)
}
