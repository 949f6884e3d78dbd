//! Signing identity: an ORCID plus an RSA key.
//!
//! Keys use the nanopub key format: the base64 encoding of the PKCS#8 DER private key on
//! one line, by default at `~/.nanopub/id_rsa`.

use anyhow::{anyhow, Result};
use log::{info, warn};
use ::nanopub::{NpProfile, ProfileBuilder};
use oxigraph::model::NamedNode;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Profile {
    orcid: NamedNode,
    private_key: String,
    np_profile: NpProfile,
}

// keep the secret out of logs
impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("orcid", &self.orcid)
            .finish_non_exhaustive()
    }
}

/// `~/.nanopub/id_rsa`, if a home directory can be determined.
pub fn default_key_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nanopub").join("id_rsa"))
}

impl Profile {
    /// Builds a profile from a base64 PKCS#8 private key. Fails if the key does not parse.
    pub fn new(orcid: NamedNode, private_key: impl Into<String>) -> Result<Self> {
        let private_key = private_key.into().trim().to_string();
        let np_profile = ProfileBuilder::new(private_key.clone())
            .with_orcid(orcid.as_str().to_string())
            .build()
            .map_err(|e| anyhow!("Invalid RSA private key: {e:?}"))?;
        Ok(Self {
            orcid,
            private_key,
            np_profile,
        })
    }

    /// Loads the private key stored at `path`.
    pub fn load(orcid: NamedNode, path: &Path) -> Result<Self> {
        info!("Loading signing key from {}", path.display());
        let encoded = std::fs::read_to_string(path)?;
        Self::new(orcid, encoded)
            .map_err(|e| anyhow!("Cannot use signing key {}: {e}", path.display()))
    }

    /// Creates a profile with a fresh RSA key. Nothing is written to disk.
    pub fn generate(orcid: NamedNode) -> Result<Self> {
        let (private_key, _public_key) =
            ::nanopub::profile::gen_keys().map_err(|e| anyhow!("Key generation failed: {e:?}"))?;
        Self::new(orcid, private_key)
    }

    /// Loads the key at `path` when it exists. Otherwise generates an ephemeral key if
    /// `allow_ephemeral` is set, and fails if not.
    pub fn load_or_generate(
        orcid: NamedNode,
        path: Option<&Path>,
        allow_ephemeral: bool,
    ) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(orcid, p),
            _ if allow_ephemeral => {
                warn!("No signing key found, using an ephemeral key for this run");
                Self::generate(orcid)
            }
            Some(p) => Err(anyhow!("Signing key not found at {}", p.display())),
            None => Err(anyhow!("No signing key path configured")),
        }
    }

    /// Writes the private key to `path`, creating parent directories. On unix the file is
    /// readable by its owner only.
    pub fn save_key(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            // mode only applies on creation
            if path.exists() {
                std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
            }
        }
        let mut file = options.open(path)?;
        writeln!(file, "{}", self.private_key)?;
        Ok(())
    }

    pub fn orcid(&self) -> &NamedNode {
        &self.orcid
    }

    pub fn np_profile(&self) -> &NpProfile {
        &self.np_profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_KEY: &str = "fixtures/id_rsa";

    fn orcid() -> NamedNode {
        NamedNode::new("https://orcid.org/0000-0002-7641-6446").unwrap()
    }

    #[test]
    fn test_save_and_load_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("id_rsa");
        let profile = Profile::load(orcid(), Path::new(FIXTURE_KEY)).unwrap();
        profile.save_key(&path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        let original = std::fs::read_to_string(FIXTURE_KEY).unwrap();
        assert_eq!(saved.trim(), original.trim());
        let loaded = Profile::load(orcid(), &path).unwrap();
        assert_eq!(loaded.orcid(), profile.orcid());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_key_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_rsa");
        let profile = Profile::load(orcid(), Path::new(FIXTURE_KEY)).unwrap();
        profile.save_key(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        // an existing world-readable file is tightened on overwrite
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        profile.save_key(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_rejects_garbage_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_rsa");
        std::fs::write(&path, "bm90IGEga2V5").unwrap();
        assert!(Profile::load(orcid(), &path).is_err());
    }

    #[test]
    fn test_missing_key_requires_ephemeral_permission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        assert!(Profile::load_or_generate(orcid(), Some(&path), false).is_err());
        assert!(Profile::load_or_generate(orcid(), Some(&path), true).is_ok());
    }

    #[test]
    fn test_debug_hides_private_key() {
        let profile = Profile::load(orcid(), Path::new(FIXTURE_KEY)).unwrap();
        let debug = format!("{profile:?}");
        assert!(debug.contains("0000-0002-7641-6446"));
        assert!(!debug.contains(&profile.private_key[..32]));
    }
}
