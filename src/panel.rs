//! The tag panel: dispatches refresh, delete, push, log, and create
//! operations over an injected repository client and display surface.
//!
//! Each panel instance owns its current [`ReportSnapshot`]; a refresh
//! replaces the snapshot and the displayed text together, so selections are
//! always resolved against what is on screen. Last refresh wins.

use tracing::debug;

use crate::client::RepositoryClient;
use crate::config::Config;
use crate::error::Result;
use crate::model::TagRef;
use crate::report::{self, HeaderInfo, ReportSnapshot};
use crate::select;
use crate::surface::DisplaySurface;

pub const TAG_CREATE_PROMPT: &str = "Enter tag:";
pub const TAG_CREATE_MESSAGE_PROMPT: &str = "Enter message:";
pub const REMOTE_CHOICE_PROMPT: &str = "Push to remote:";
pub const START_PUSH_MESSAGE: &str = "Starting push...";
pub const END_PUSH_MESSAGE: &str = "Push complete.";
pub const NO_REMOTES_MESSAGE: &str = "There are no remotes available.";

/// Gather the report header values from the client.
pub fn header_info(client: &impl RepositoryClient) -> Result<HeaderInfo> {
    Ok(HeaderInfo {
        branch_status: client.branch_status()?,
        repo_root: client.repo_root()?.display().to_string(),
        head_summary: client.head_summary()?,
    })
}

/// Sequential state machine for the two-prompt create-tag flow.
///
/// Cancellation (or an empty tag name) moves to `Cancelled` before any
/// repository mutation can be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTagFlow {
    AwaitingName,
    AwaitingMessage { name: String },
    Done { name: String, message: String },
    Cancelled,
}

impl CreateTagFlow {
    pub fn new() -> Self {
        CreateTagFlow::AwaitingName
    }

    /// Feed the result of the name prompt. `None` is the cancel signal;
    /// an empty name also aborts.
    pub fn on_name(self, input: Option<String>) -> Self {
        match self {
            CreateTagFlow::AwaitingName => match input {
                Some(name) if !name.trim().is_empty() => CreateTagFlow::AwaitingMessage {
                    name: name.trim().to_string(),
                },
                _ => CreateTagFlow::Cancelled,
            },
            other => other,
        }
    }

    /// Feed the result of the message prompt. `None` cancels; a blank
    /// message falls back to the configured template.
    pub fn on_message(self, input: Option<String>, config: &Config) -> Self {
        match self {
            CreateTagFlow::AwaitingMessage { name } => match input {
                Some(message) => {
                    let message = if message.is_empty() {
                        config.tags.message_for(&name)
                    } else {
                        message
                    };
                    CreateTagFlow::Done { name, message }
                }
                None => CreateTagFlow::Cancelled,
            },
            other => other,
        }
    }
}

impl Default for CreateTagFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// One open tag report with its client, surface, and current snapshot.
pub struct TagPanel<C, S> {
    client: C,
    surface: S,
    config: Config,
    snapshot: Option<ReportSnapshot>,
}

impl<C: RepositoryClient, S: DisplaySurface> TagPanel<C, S> {
    pub fn new(client: C, surface: S, config: Config) -> Self {
        Self {
            client,
            surface,
            config,
            snapshot: None,
        }
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn current_snapshot(&self) -> Option<&ReportSnapshot> {
        self.snapshot.as_ref()
    }

    /// Rebuild and display the report, replacing the stored snapshot.
    ///
    /// The loading placeholder is shown (and stored, so selections resolve
    /// to nothing) while the tag query runs, then the full report replaces
    /// it. Safe to call repeatedly; state is always fully replaced.
    pub fn refresh(&mut self) -> Result<()> {
        let header = header_info(&self.client)?;

        let loading = report::render_loading(&header);
        self.surface.render_report(&loading.text);
        self.snapshot = Some(loading);

        let tags = self.client.list_tags()?;
        let snapshot = report::render(&header, &tags);
        debug!(tags = tags.len(), sections = snapshot.sections.len(), "refreshed tag report");
        self.surface.render_report(&snapshot.text);
        self.snapshot = Some(snapshot);

        Ok(())
    }

    /// Resolve the surface's current selection against the stored snapshot.
    fn resolve_selection(&self) -> Vec<TagRef> {
        match &self.snapshot {
            Some(snapshot) => select::resolve(snapshot, &self.surface.selected_offsets()),
            None => Vec::new(),
        }
    }

    /// Delete every tag in the selection by name, then refresh.
    ///
    /// An empty selection is a no-op with no message. Returns the number of
    /// tags deleted.
    pub fn delete_selected(&mut self) -> Result<usize> {
        let refs = self.resolve_selection();
        if refs.is_empty() {
            return Ok(0);
        }

        for tag_ref in &refs {
            self.client.delete_tag(&tag_ref.name)?;
        }

        self.refresh()?;
        self.surface
            .show_status(&format!("{} tag(s) deleted.", refs.len()));
        Ok(refs.len())
    }

    /// Push the selected tags (or all tags) to a remote chosen by the user.
    ///
    /// With `push_all` the selection is ignored and `--tags` semantics
    /// apply; otherwise an empty selection is a no-op. Cancelling the
    /// remote choice aborts before any mutation. The push outcome drives
    /// the status message: failures are surfaced as failures, never as
    /// completion.
    pub fn push(&mut self, push_all: bool) -> Result<()> {
        let refs = if push_all {
            Vec::new()
        } else {
            let refs = self.resolve_selection();
            if refs.is_empty() {
                return Ok(());
            }
            refs
        };

        let remotes = self.client.list_remotes()?;
        if remotes.is_empty() {
            let _ = self
                .surface
                .prompt_choice(REMOTE_CHOICE_PROMPT, &[NO_REMOTES_MESSAGE.to_string()]);
            return Ok(());
        }

        let Some(index) = self.surface.prompt_choice(REMOTE_CHOICE_PROMPT, &remotes) else {
            return Ok(());
        };
        let Some(remote) = remotes.get(index) else {
            return Ok(());
        };

        self.surface.show_status(START_PUSH_MESSAGE);
        let outcome = if push_all {
            self.client.push_all_tags(remote)
        } else {
            let refspecs: Vec<String> = refs
                .iter()
                .map(|tag_ref| format!("refs/tags/{}", tag_ref.name))
                .collect();
            self.client.push_refs(remote, &refspecs)
        };

        match outcome {
            Ok(()) => {
                self.surface.show_status(END_PUSH_MESSAGE);
                self.refresh()?;
                Ok(())
            }
            Err(err) => {
                self.surface.show_status(&format!("Push failed: {err}"));
                Err(err)
            }
        }
    }

    /// Show the commit log for the first selected entry only.
    pub fn show_log_for_selection(&mut self) -> Result<()> {
        let refs = self.resolve_selection();
        let Some(first) = refs.first() else {
            return Ok(());
        };

        let log = self.client.commit_log(&first.short_hash)?;
        self.surface.show_panel(&log);
        Ok(())
    }

    /// Run the two-prompt create-tag flow and create an annotated tag.
    ///
    /// Cancelling either prompt aborts silently. A successful create
    /// refreshes the report, matching delete and push.
    pub fn create_tag(&mut self) -> Result<()> {
        let mut flow = CreateTagFlow::new();
        flow = flow.on_name(self.surface.prompt_input(TAG_CREATE_PROMPT));

        if matches!(flow, CreateTagFlow::AwaitingMessage { .. }) {
            let input = self.surface.prompt_input(TAG_CREATE_MESSAGE_PROMPT);
            flow = flow.on_message(input, &self.config);
        }

        match flow {
            CreateTagFlow::Done { name, message } => {
                self.client.create_annotated_tag(&name, &message)?;
                self.refresh()?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
