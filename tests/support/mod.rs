#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// A throwaway git repository for integration tests.
pub struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    pub fn init() -> Result<Self, git2::Error> {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let repo = Repository::init(dir.path())?;
        set_identity(&repo)?;
        Ok(Self { dir, repo })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a file and commit it on HEAD.
    pub fn commit_file(
        &self,
        rel_path: &str,
        contents: &str,
        message: &str,
    ) -> Result<Oid, Box<dyn std::error::Error>> {
        self.write_file(rel_path, contents)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new(rel_path))?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let signature = signature()?;
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid)
    }

    /// Create an annotated tag on HEAD via libgit2.
    pub fn tag_head(&self, name: &str, message: &str) -> Result<Oid, Box<dyn std::error::Error>> {
        let head = self.repo.head()?.peel_to_commit()?;
        let object = head.as_object();
        let signature = signature()?;
        let oid = self.repo.tag(name, object, &signature, message, false)?;
        Ok(oid)
    }

    /// Create a bare repository and register it as a remote. The returned
    /// tempdir keeps the remote alive for the test's duration.
    pub fn add_bare_remote(&self, name: &str) -> Result<TempDir, Box<dyn std::error::Error>> {
        let remote_dir = tempfile::tempdir()?;
        Repository::init_bare(remote_dir.path())?;
        self.repo
            .remote(name, &remote_dir.path().to_string_lossy())?;
        Ok(remote_dir)
    }
}

fn set_identity(repo: &Repository) -> Result<(), git2::Error> {
    let mut config = repo.config()?;
    config.set_str("user.name", "Tester")?;
    config.set_str("user.email", "tester@example.com")?;
    Ok(())
}

fn signature() -> Result<Signature<'static>, git2::Error> {
    Signature::now("Tester", "tester@example.com")
}
