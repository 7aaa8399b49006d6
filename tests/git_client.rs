//! GitClient against real throwaway repositories.

mod support;

use support::TestRepo;
use tagview::client::{GitClient, RepositoryClient};

#[test]
fn create_list_delete_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;

    let client = GitClient::open(Some(repo.path()))?;
    client.create_annotated_tag("v1.0", "first release")?;

    let tags = client.list_tags()?;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "v1.0");
    assert!(tags[0].is_local());
    assert_eq!(tags[0].short_sha().len(), 7);

    client.delete_tag("v1.0")?;
    assert!(client.list_tags()?.is_empty());
    Ok(())
}

#[test]
fn create_tag_message_survives_special_characters() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;

    let client = GitClient::open(Some(repo.path()))?;
    // The message travels over stdin, so shell metacharacters are inert.
    client.create_annotated_tag("v1.0", "release; $(danger) \"quoted\"")?;

    let tag = repo.repo().revparse_single("v1.0")?;
    let tag = tag.as_tag().expect("annotated tag");
    assert!(tag.message().unwrap_or("").contains("$(danger)"));
    Ok(())
}

#[test]
fn header_queries_describe_the_repository() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;

    let client = GitClient::open(Some(repo.path()))?;
    assert!(!client.branch_status()?.is_empty());
    assert!(client.head_summary()?.contains("initial commit"));

    let root = client.repo_root()?;
    assert_eq!(root.canonicalize()?, repo.path().canonicalize()?);
    Ok(())
}

#[test]
fn header_queries_survive_an_empty_repository() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    let client = GitClient::open(Some(repo.path()))?;
    assert_eq!(client.branch_status()?, "(no commits yet)");
    assert_eq!(client.head_summary()?, "(no commits yet)");
    assert!(client.list_tags()?.is_empty());
    Ok(())
}

#[test]
fn commit_log_shows_the_tagged_commit() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;
    repo.tag_head("v1.0", "release")?;

    let client = GitClient::open(Some(repo.path()))?;
    let tags = client.list_tags()?;
    let log = client.commit_log(tags[0].short_sha())?;
    assert!(log.contains("initial commit"));
    Ok(())
}

#[test]
fn pushed_tag_is_filtered_from_the_remote_listing() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;
    let _remote_dir = repo.add_bare_remote("origin")?;

    let client = GitClient::open(Some(repo.path()))?;
    client.create_annotated_tag("v1.0", "first release")?;
    client.push_refs("origin", &["refs/tags/v1.0".to_string()])?;

    // The remote copy is identical to the local tag, so only the local
    // entry remains after the caller-side filter.
    let tags = client.list_tags()?;
    assert_eq!(tags.len(), 1);
    assert!(tags[0].is_local());

    // Delete locally: the remote copy now shows up under its remote.
    client.delete_tag("v1.0")?;
    let tags = client.list_tags()?;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].remote.as_deref(), Some("origin"));
    Ok(())
}

#[test]
fn push_all_tags_reaches_the_remote() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;
    let _remote_dir = repo.add_bare_remote("origin")?;

    let client = GitClient::open(Some(repo.path()))?;
    client.create_annotated_tag("v1.0", "first")?;
    client.create_annotated_tag("v2.0", "second")?;
    client.push_all_tags("origin")?;

    client.delete_tag("v1.0")?;
    client.delete_tag("v2.0")?;

    let tags = client.list_tags()?;
    let mut names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["v1.0", "v2.0"]);
    assert!(tags.iter().all(|t| t.remote.as_deref() == Some("origin")));
    Ok(())
}

#[test]
fn remotes_are_listed_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    let _first = repo.add_bare_remote("origin")?;
    let _second = repo.add_bare_remote("fork")?;

    let client = GitClient::open(Some(repo.path()))?;
    let remotes = client.list_remotes()?;
    assert_eq!(remotes.len(), 2);
    assert!(remotes.contains(&"origin".to_string()));
    assert!(remotes.contains(&"fork".to_string()));
    Ok(())
}

#[test]
fn failed_subprocess_surfaces_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "# test\n", "initial commit")?;

    let client = GitClient::open(Some(repo.path()))?;
    let err = client.delete_tag("does-not-exist").unwrap_err();
    assert_eq!(err.exit_code(), tagview::error::exit_codes::OPERATION_FAILED);
    assert!(err.to_string().contains("tag -d"));
    Ok(())
}
