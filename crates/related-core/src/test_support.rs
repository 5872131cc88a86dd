//! Real-repository fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use related_git::{GitOps, Oid, Repository};
use tempfile::TempDir;

/// A throwaway repository on branch `main` with one initial commit.
pub struct TestRepo {
    _temp: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("main");
        let git = git2::Repository::init_opts(temp.path(), &opts).unwrap();

        {
            let mut config = git
                .config()
                .unwrap()
                .open_level(git2::ConfigLevel::Local)
                .unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        let repo = Repository::open(temp.path()).unwrap();
        let fixture = Self { _temp: temp, repo };
        fixture.commit_file("README.md", "# Test Repo\n", "Initial commit");
        fixture
    }

    pub fn root(&self) -> &Path {
        self.repo.workdir().unwrap()
    }

    pub fn head(&self) -> Oid {
        self.repo.resolve_commit("HEAD").unwrap()
    }

    pub fn current_branch(&self) -> String {
        self.repo.current_branch().unwrap()
    }

    /// Write `content` to `file` and commit it on top of HEAD.
    pub fn commit_file(&self, file: &str, content: &str, message: &str) -> Oid {
        fs::write(self.root().join(file), content).unwrap();

        let git = self.repo.inner();
        let mut index = git.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();

        let tree = git.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git.signature().unwrap();
        let parents = match git.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<_> = parents.iter().collect();
        git.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// Delete `file` and commit the removal on top of HEAD.
    pub fn remove_file(&self, file: &str, message: &str) -> Oid {
        fs::remove_file(self.root().join(file)).unwrap();

        let git = self.repo.inner();
        let mut index = git.index().unwrap();
        index.remove_path(Path::new(file)).unwrap();
        index.write().unwrap();

        let tree = git.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git.signature().unwrap();
        let parent = git.head().unwrap().peel_to_commit().unwrap();
        git.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    /// Create a branch at HEAD and switch to it without touching files.
    pub fn checkout_new_branch(&self, name: &str) {
        let git = self.repo.inner();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        git.branch(name, &head, false).unwrap();
        git.set_head(&format!("refs/heads/{name}")).unwrap();
    }

    /// Switch to an existing branch, overwriting the working copy.
    pub fn checkout(&self, name: &str) {
        let git = self.repo.inner();
        let object = git.revparse_single(name).unwrap();
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        git.checkout_tree(&object, Some(&mut opts)).unwrap();
        git.set_head(&format!("refs/heads/{name}")).unwrap();
    }

    /// Create a parentless commit on a new branch, leaving HEAD alone.
    pub fn orphan_branch(&self, name: &str) -> Oid {
        let git = self.repo.inner();
        let sig = git.signature().unwrap();
        let mut builder = git.treebuilder(None).unwrap();
        let blob = git.blob(b"island\n").unwrap();
        builder.insert("island.txt", blob, 0o100_644).unwrap();
        let tree = git.find_tree(builder.write().unwrap()).unwrap();
        git.commit(Some(&format!("refs/heads/{name}")), &sig, &sig, "Orphan", &tree, &[])
            .unwrap()
    }
}

/// `main` plus a `feature` branch (checked out) with three linear commits.
pub fn feature_branch() -> (TestRepo, Vec<Oid>) {
    let repo = TestRepo::new();
    repo.checkout_new_branch("feature");
    let commits = vec![
        repo.commit_file("a.txt", "a\n", "Add a"),
        repo.commit_file("b.txt", "b\n", "Add b"),
        repo.commit_file("a.txt", "a\na2\n", "Extend a"),
    ];
    (repo, commits)
}

/// Three commits on `feature`:
/// - A adds a five-line function,
/// - B rewrites three of those lines and adds two more,
/// - C adds four unrelated lines in another file.
pub fn related_scenario() -> (TestRepo, [Oid; 3]) {
    let repo = TestRepo::new();
    repo.checkout_new_branch("feature");

    let a = repo.commit_file(
        "lib.rs",
        "fn area(w: u32, h: u32) -> u32 {\n    let width = w;\n    let height = h;\n    width * height\n}\n",
        "Add area function",
    );
    let b = repo.commit_file(
        "lib.rs",
        "fn area(w: u64, h: u64) -> u64 {\n    let width = w;\n    let height = h;\n    let scaled = width * height;\n    scaled * 2\n}\n",
        "Widen area to u64",
    );
    let c = repo.commit_file(
        "notes.txt",
        "one\ntwo\nthree\nfour\n",
        "Add notes",
    );

    (repo, [a, b, c])
}

/// Three commits on `feature` editing the same line in turn, so replaying the
/// third directly onto the first conflicts.
pub fn conflict_scenario() -> (TestRepo, [Oid; 3]) {
    let repo = TestRepo::new();
    repo.checkout_new_branch("feature");

    let x = repo.commit_file("value.txt", "x\n", "Set x");
    let y = repo.commit_file("value.txt", "y\n", "Set y");
    let z = repo.commit_file("value.txt", "z\n", "Set z");

    (repo, [x, y, z])
}

/// `feature` where A adds `notes.txt` and B deletes it again, so the tip has
/// no `notes.txt` but A's tree does.
pub fn vanishing_file_scenario() -> (TestRepo, [Oid; 2]) {
    let repo = TestRepo::new();
    repo.checkout_new_branch("feature");

    let a = repo.commit_file("notes.txt", "draft\n", "Add notes");
    let b = repo.remove_file("notes.txt", "Drop notes");

    (repo, [a, b])
}
