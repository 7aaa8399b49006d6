//! Repository client: the injected capability that executes git queries and
//! mutations on behalf of the panel.
//!
//! [`GitClient`] is the concrete implementation, using libgit2 for local
//! queries and the external `git` binary for remote listing and mutations.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::TagEntry;

/// Capability surface the panel consumes. All calls are blocking and
/// fire-once; no retries happen at this layer.
pub trait RepositoryClient {
    /// Flat listing of local tags followed by per-remote tags.
    fn list_tags(&self) -> Result<Vec<TagEntry>>;
    fn branch_status(&self) -> Result<String>;
    fn head_summary(&self) -> Result<String>;
    fn repo_root(&self) -> Result<PathBuf>;
    /// Remote names in configuration order.
    fn list_remotes(&self) -> Result<Vec<String>>;
    /// Delete a local tag by name.
    fn delete_tag(&self, name: &str) -> Result<()>;
    /// Push the given refspecs to a remote as one combined push.
    fn push_refs(&self, remote: &str, refs: &[String]) -> Result<()>;
    fn push_all_tags(&self, remote: &str) -> Result<()>;
    /// Create an annotated tag; the message goes to git over stdin, never
    /// as an argument.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;
    /// Commit log detail for a single hash.
    fn commit_log(&self, hash: &str) -> Result<String>;
}

/// Git-backed client for a discovered repository.
pub struct GitClient {
    repo: Repository,
    workdir: PathBuf,
}

impl GitClient {
    /// Discover and open the repository containing `start` (or the current
    /// directory). Bare repositories are rejected.
    pub fn open(start: Option<&Path>) -> Result<Self> {
        let start_path = match start {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = Repository::discover(&start_path).map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                Error::RepoNotFound(start_path.clone())
            } else {
                Error::Git(err)
            }
        })?;

        let workdir = repo
            .workdir()
            .map(|path| path.to_path_buf())
            .ok_or(Error::NotARepo(start_path))?;

        Ok(Self { repo, workdir })
    }

    /// Run `git` in the workdir, optionally writing `stdin` to the child.
    fn run_git(&self, args: &[&str], stdin: Option<&str>) -> Result<String> {
        debug!(?args, "running git");

        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.workdir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = command.spawn()?;

        if let Some(input) = stdin {
            let mut pipe = child.stdin.take().ok_or_else(|| {
                Error::OperationFailed("git stdin unavailable".to_string())
            })?;
            pipe.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::GitCommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn local_tags(&self) -> Result<Vec<TagEntry>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{name}"))?;
            let oid = reference.target().ok_or_else(|| {
                Error::OperationFailed(format!("tag '{name}' has no target"))
            })?;
            tags.push(TagEntry::local(name, oid.to_string()));
        }

        Ok(tags)
    }

    /// List tags on one remote via `git ls-remote --tags`.
    ///
    /// Peeled `^{}` entries are skipped so each tag appears once, under the
    /// same object id `ls-remote` reports for the ref itself.
    fn remote_tags(&self, remote: &str) -> Result<Vec<TagEntry>> {
        let stdout = self.run_git(&["ls-remote", "--tags", remote], None)?;
        let mut tags = Vec::new();

        for line in stdout.lines() {
            let mut parts = line.split_whitespace();
            let (Some(sha), Some(refname)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Some(name) = refname.strip_prefix("refs/tags/") else {
                continue;
            };
            if name.ends_with("^{}") {
                continue;
            }
            tags.push(TagEntry::remote(name, sha, remote));
        }

        Ok(tags)
    }
}

impl RepositoryClient for GitClient {
    /// Local tags first, then per-remote tags in remote order. Remote
    /// entries identical to a local tag (same name and object id) are
    /// filtered here; the renderer never deduplicates.
    fn list_tags(&self) -> Result<Vec<TagEntry>> {
        let mut tags = self.local_tags()?;
        let local: Vec<(String, String)> = tags
            .iter()
            .map(|t| (t.name.clone(), t.sha.clone()))
            .collect();

        for remote in self.list_remotes()? {
            for tag in self.remote_tags(&remote)? {
                let duplicate = local
                    .iter()
                    .any(|(name, sha)| *name == tag.name && *sha == tag.sha);
                if !duplicate {
                    tags.push(tag);
                }
            }
        }

        Ok(tags)
    }

    fn branch_status(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(err)
                if err.code() == ErrorCode::UnbornBranch
                    || err.code() == ErrorCode::NotFound =>
            {
                return Ok("(no commits yet)".to_string());
            }
            Err(err) => return Err(err.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().unwrap_or("(unnamed)").to_string())
        } else {
            let short = head
                .target()
                .map(|oid| oid.to_string()[..7].to_string())
                .unwrap_or_default();
            Ok(format!("HEAD detached at {short}"))
        }
    }

    fn head_summary(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(err)
                if err.code() == ErrorCode::UnbornBranch
                    || err.code() == ErrorCode::NotFound =>
            {
                return Ok("(no commits yet)".to_string());
            }
            Err(err) => return Err(err.into()),
        };

        let commit = head.peel_to_commit()?;
        let short = commit.id().to_string()[..7].to_string();
        let summary = commit.summary().unwrap_or("").to_string();
        Ok(format!("{short} {summary}"))
    }

    fn repo_root(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.run_git(&["tag", "-d", name], None)?;
        Ok(())
    }

    fn push_refs(&self, remote: &str, refs: &[String]) -> Result<()> {
        let mut args = vec!["push", remote];
        args.extend(refs.iter().map(String::as_str));
        self.run_git(&args, None)?;
        Ok(())
    }

    fn push_all_tags(&self, remote: &str) -> Result<()> {
        self.run_git(&["push", remote, "--tags"], None)?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.run_git(&["tag", name, "-F", "-"], Some(message))?;
        Ok(())
    }

    fn commit_log(&self, hash: &str) -> Result<String> {
        self.run_git(&["log", "-1", "--pretty=medium", hash], None)
    }
}
