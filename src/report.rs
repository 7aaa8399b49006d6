//! Report rendering: turn a tag snapshot into an addressable text report.
//!
//! The renderer is a pure function of its inputs. It produces the report
//! text plus one [`SectionRange`] per tag block so selections in the text
//! can later be mapped back to tag records by the resolver.

use crate::model::{group_remotes, TagEntry};

pub const NO_TAGS_MESSAGE: &str = "\n  Your repository has no tags.\n";
pub const LOADING_TAGS_MESSAGE: &str =
    "\n  Please stand by while fetching tags from remote(s).\n";

pub const KEY_BINDINGS_MENU: &str = "
  #############
  ## ACTIONS ##
  #############

  [c] create
  [d] delete
  [p] push to remote
  [P] push all tags to remote
  [l] view commit

  ###########
  ## OTHER ##
  ###########

  [r] refresh status

-
";

/// Indentation prefix of every rendered tag line.
pub const TAG_LINE_INDENT: &str = "    ";

/// Repository header values, supplied by the caller (never computed here).
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub branch_status: String,
    pub repo_root: String,
    pub head_summary: String,
}

/// Half-open character span `[start, end)` occupied by one tag block.
///
/// An omitted block records the empty `(0, 0)` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionRange {
    pub start: usize,
    pub end: usize,
}

impl SectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the span `[start, end)` lies entirely within this range.
    pub fn contains_span(&self, start: usize, end: usize) -> bool {
        !self.is_empty() && start >= self.start && end <= self.end
    }
}

/// The rendered report and its section map, replaced wholesale on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSnapshot {
    pub text: String,
    /// Section order is fixed: `[local, remote_1, remote_2, ...]`.
    pub sections: Vec<SectionRange>,
}

fn header_block(header: &HeaderInfo) -> String {
    format!(
        "\n  BRANCH:  {}\n  ROOT:    {}\n  HEAD:    {}\n",
        header.branch_status, header.repo_root, header.head_summary
    )
}

fn tag_lines(entries: &[TagEntry]) -> String {
    entries
        .iter()
        .map(|t| format!("{}{} {}", TAG_LINE_INDENT, t.short_sha(), t.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the full report for a tag listing.
///
/// Entry order is preserved as given; callers are expected to have sorted
/// and deduplicated upstream.
pub fn render(header: &HeaderInfo, tags: &[TagEntry]) -> ReportSnapshot {
    let head = header_block(header);
    let (local, remotes) = group_remotes(tags);

    if local.is_empty() && remotes.is_empty() {
        return ReportSnapshot {
            text: format!("{}{}{}", head, NO_TAGS_MESSAGE, KEY_BINDINGS_MENU),
            sections: Vec::new(),
        };
    }

    let mut text = head;
    let mut sections = Vec::with_capacity(1 + remotes.len());

    let push_block = |text: &mut String, block: String| -> SectionRange {
        let start = text.len();
        text.push_str(&block);
        SectionRange::new(start, text.len())
    };

    if local.is_empty() {
        sections.push(SectionRange::default());
    } else {
        let block = format!("\n  LOCAL:\n{}\n", tag_lines(&local));
        sections.push(push_block(&mut text, block));
    }

    for group in &remotes {
        let block = format!(
            "\n  REMOTE ({}):\n{}\n",
            group.remote,
            tag_lines(&group.entries)
        );
        sections.push(push_block(&mut text, block));
    }

    text.push_str(KEY_BINDINGS_MENU);

    ReportSnapshot { text, sections }
}

/// Render the loading placeholder shown before the tag query resolves.
///
/// Carries no tag data and no sections, so a selection against it always
/// resolves to nothing.
pub fn render_loading(header: &HeaderInfo) -> ReportSnapshot {
    ReportSnapshot {
        text: format!(
            "{}{}{}",
            header_block(header),
            LOADING_TAGS_MESSAGE,
            KEY_BINDINGS_MENU
        ),
        sections: Vec::new(),
    }
}
