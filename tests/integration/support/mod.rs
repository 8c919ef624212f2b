use std::fs;
use std::path::{Path, PathBuf};

use stackselect::discovery::read_profile_dir;
use stackselect::{LoadError, LoadReport, ProfileStore};
use tempfile::TempDir;

/// Writes deployment profile YAML files into a temp directory and loads a
/// store from them through the real discovery path.
pub struct ProfileDirFixture {
    workspace: TempDir,
    profile_dir: PathBuf,
}

impl ProfileDirFixture {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        let profile_dir = workspace.path().join("configs");
        fs::create_dir_all(&profile_dir).expect("failed to create profile dir");
        Self {
            workspace,
            profile_dir,
        }
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn write_profile(&self, file_name: &str, text: &str) -> &Self {
        fs::write(self.profile_dir.join(file_name), text).expect("failed to write profile");
        self
    }

    /// Writes a tenant configuration next to the profiles and returns its path.
    pub fn write_tenant(&self, file_name: &str, text: &str) -> PathBuf {
        let path = self.workspace.path().join(file_name);
        fs::write(&path, text).expect("failed to write tenant config");
        path
    }

    pub fn load(&self) -> Result<(ProfileStore, LoadReport), LoadError> {
        let (sources, warnings) = read_profile_dir(&self.profile_dir)?;
        let (store, mut report) = ProfileStore::load(&sources)?;
        report.warnings.extend(warnings);
        Ok((store, report))
    }

    pub fn store(&self) -> ProfileStore {
        self.load().expect("fixture profiles should load").0
    }
}

/// A tenant configuration with every required field present.
pub fn valid_tenant_yaml(deployment_type: Option<&str>) -> String {
    let mut yaml = String::from(
        "org: acme\nenv: test\nregion: us-west-2\nsregion: usw2\ndeployment: app03\naccount_id: '123456789012'\n",
    );
    if let Some(deployment_type) = deployment_type {
        yaml.push_str(&format!("deployment_type: {deployment_type}\n"));
    }
    yaml
}
