use crate::error::{Error, Result};
use git2::Repository as Git2Repository;
use std::path::{Path, PathBuf};

/// A git repository whose history is being visualized
pub struct Repository {
    git_repo: Git2Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::RootMissing(path.to_path_buf()));
        }

        let git_repo = Git2Repository::discover(path).map_err(|err| {
            tracing::debug!(path = %path.display(), error = %err, "repository discovery failed");
            Error::NotARepository(path.to_path_buf())
        })?;

        // Bare repositories have no work tree; git still runs from the git dir
        let workdir = git_repo
            .workdir()
            .unwrap_or_else(|| git_repo.path())
            .to_path_buf();

        Ok(Repository { git_repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Express `file` relative to the work tree when it lies inside it
    pub fn relative_path(&self, file: &Path) -> PathBuf {
        let canonical = |p: &Path| p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
        let workdir = canonical(&self.workdir);
        let file = canonical(file);

        file.strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .unwrap_or(file)
    }
}
