//! Vault key generation, persistence, and loading.
//!
//! The vault key is a single 32-byte secret stored hex-encoded in a file
//! under the vault home. It is generated once on first run and loaded
//! unchanged afterwards. Losing the file makes every stored password
//! permanently undecryptable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{PassmanError, Result};

/// Length of the vault key in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Raw symmetric key material.
///
/// Cloning produces an independent buffer; every copy is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a key from a slice, rejecting anything but exactly `KEY_SIZE` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            PassmanError::Crypto(format!(
                "invalid key length: {} bytes (expected {})",
                bytes.len(),
                KEY_SIZE
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Generate a fresh key from the OS random source.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_SIZE];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| PassmanError::Entropy(format!("failed to generate key: {}", e)))?;
        Ok(Self { bytes })
    }

    /// Decode a hex-encoded key as stored in the key file.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            hex::decode(encoded)
                .map_err(|e| PassmanError::Initialization(format!("undecodable key: {}", e)))?,
        );
        if decoded.len() != KEY_SIZE {
            return Err(PassmanError::Initialization(format!(
                "unexpected key length: {} bytes (expected {})",
                decoded.len(),
                KEY_SIZE
            )));
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Borrow the raw key bytes.
    ///
    /// Avoid storing or logging this value.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Load the key stored at `path`, or generate and persist one if the file
/// is absent or empty.
///
/// A key file that exists but does not decode to exactly `KEY_SIZE` bytes
/// is never overwritten: doing so would orphan every record encrypted
/// under the previous key.
///
/// Concurrent first runs never both succeed with different keys. A new key
/// is published with an exclusive link, and an empty file is refilled only
/// while holding `<path>.lock`; the loser of either race gets an
/// `Initialization` error.
///
/// # Errors
///
/// - `PassmanError::Initialization` if the file is unreadable, corrupt, or
///   being created by another process at the same time
/// - `PassmanError::Entropy` if the OS random source fails
pub fn load_or_create(path: &Path) -> Result<SecretKey> {
    match read_key_file(path)? {
        KeyFile::Present(key) => Ok(key),
        KeyFile::Missing => create_key_file(path),
        KeyFile::Empty => refill_empty_key_file(path),
    }
}

enum KeyFile {
    Present(SecretKey),
    Empty,
    Missing,
}

fn read_key_file(path: &Path) -> Result<KeyFile> {
    let raw = match fs::read(path) {
        Ok(raw) => Zeroizing::new(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(KeyFile::Missing),
        Err(err) => return Err(init_io_error(path, "read", err)),
    };
    let contents = std::str::from_utf8(&raw).map_err(|_| {
        PassmanError::Initialization(format!("key file {} is not valid text", path.display()))
    })?;
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(KeyFile::Empty);
    }
    let key = SecretKey::from_hex(trimmed).map_err(|e| match e {
        PassmanError::Initialization(msg) => PassmanError::Initialization(format!(
            "key file {} is corrupt: {}",
            path.display(),
            msg
        )),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), "loaded vault key");
    Ok(KeyFile::Present(key))
}

fn create_key_file(path: &Path) -> Result<SecretKey> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::fs::ensure_private_dir(parent)
            .map_err(|e| init_io_error(parent, "create directory for", e))?;
    }

    let key = SecretKey::generate()?;
    crate::fs::persist_new(path, key.to_hex().as_bytes()).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            concurrent_creation(path)
        } else {
            init_io_error(path, "create", e)
        }
    })?;

    tracing::info!(path = %path.display(), "generated new vault key");
    Ok(key)
}

/// Replace an empty key file while holding its lock file.
fn refill_empty_key_file(path: &Path) -> Result<SecretKey> {
    let lock_path = lock_path(path);
    crate::fs::create_owner_only(&lock_path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            PassmanError::Initialization(format!(
                "key file {} is being created by another process (remove {} if it is stale)",
                path.display(),
                lock_path.display()
            ))
        } else {
            init_io_error(&lock_path, "lock", e)
        }
    })?;

    let result = refill_locked(path);
    let _ = fs::remove_file(&lock_path);
    result
}

fn refill_locked(path: &Path) -> Result<SecretKey> {
    match read_key_file(path)? {
        KeyFile::Present(key) => Ok(key),
        KeyFile::Missing => create_key_file(path),
        KeyFile::Empty => {
            tracing::warn!(path = %path.display(), "key file is empty, generating a new key");
            let key = SecretKey::generate()?;
            crate::fs::write_atomic(path, key.to_hex().as_bytes())
                .map_err(|e| init_io_error(path, "write", e))?;
            tracing::info!(path = %path.display(), "generated new vault key");
            Ok(key)
        }
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn concurrent_creation(path: &Path) -> PassmanError {
    PassmanError::Initialization(format!(
        "key file {} was created concurrently; refusing to overwrite it",
        path.display()
    ))
}

fn init_io_error(path: &Path, action: &str, err: io::Error) -> PassmanError {
    PassmanError::Initialization(format!(
        "failed to {} key file {}: {}",
        action,
        path.display(),
        err
    ))
}

/// Owner of the installation's vault key.
///
/// Constructed once at program start with [`KeyStore::init`] and passed to
/// whatever needs to encrypt. Callers only ever receive copies of the key.
#[derive(Debug)]
pub struct KeyStore {
    path: PathBuf,
    key: SecretKey,
}

impl KeyStore {
    /// Load or create the key file at `path`. See [`load_or_create`].
    pub fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let key = load_or_create(&path)?;
        Ok(Self { path, key })
    }

    /// An independent copy of the in-memory key.
    pub fn current(&self) -> SecretKey {
        self.key.clone()
    }

    /// Location of the backing key file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_run_creates_hex_key_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");

        let key = load_or_create(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.len(), KEY_SIZE * 2);
        assert!(contents
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(contents, *key.to_hex());
    }

    #[test]
    fn test_second_run_loads_same_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");

        let first = load_or_create(&path).unwrap();
        let second = load_or_create(&path).unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("home").join("key");

        load_or_create(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_file_triggers_generation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, "").unwrap();

        let key = load_or_create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), *key.to_hex());
        assert!(!lock_path(&path).exists());
    }

    #[test]
    fn test_stale_lock_blocks_empty_key_refill() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, "").unwrap();
        fs::write(lock_path(&path), "").unwrap();

        let err = load_or_create(&path).unwrap_err();
        assert!(matches!(err, PassmanError::Initialization(_)));
        assert!(err.to_string().contains("key.lock"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    /// Start many first runs at once and check that every successful caller
    /// holds exactly the key that ended up on disk.
    fn race_first_runs(prepare: impl Fn(&Path)) {
        use std::sync::{Arc, Barrier};
        use std::thread;

        const THREADS: usize = 16;

        for _ in 0..50 {
            let dir = tempdir().unwrap();
            let path = dir.path().join("key");
            prepare(&path);

            let barrier = Arc::new(Barrier::new(THREADS));
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let path = path.clone();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        load_or_create(&path)
                    })
                })
                .collect();
            let results: Vec<Result<SecretKey>> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            let persisted = fs::read_to_string(&path).unwrap();
            let mut successes = 0;
            for result in results {
                match result {
                    Ok(key) => {
                        assert_eq!(key.to_hex().as_str(), persisted.trim());
                        successes += 1;
                    }
                    Err(err) => {
                        assert!(matches!(err, PassmanError::Initialization(_)), "{}", err)
                    }
                }
            }
            assert!(successes >= 1);
            assert!(!lock_path(&path).exists());

            let leftovers = fs::read_dir(dir.path()).unwrap().count();
            assert_eq!(leftovers, 1);
        }
    }

    #[test]
    fn test_concurrent_first_runs_agree_on_persisted_key() {
        race_first_runs(|_| {});
    }

    #[test]
    fn test_concurrent_refills_of_empty_key_agree_on_persisted_key() {
        race_first_runs(|path| fs::write(path, "").unwrap());
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        let encoded = hex::encode([7u8; KEY_SIZE]);
        fs::write(&path, format!("{}\n", encoded)).unwrap();

        let key = load_or_create(&path).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; KEY_SIZE]);
    }

    #[test]
    fn test_corrupt_key_is_fatal_and_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, "not-a-hex-key").unwrap();

        let result = load_or_create(&path);
        assert!(matches!(result, Err(PassmanError::Initialization(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not-a-hex-key");
    }

    #[test]
    fn test_wrong_length_key_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        fs::write(&path, hex::encode([1u8; 16])).unwrap();

        let err = load_or_create(&path).unwrap_err();
        assert!(matches!(err, PassmanError::Initialization(_)));
        assert!(err.to_string().contains("unexpected key length"));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("key");
        load_or_create(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = SecretKey::generate().unwrap();
        let b = SecretKey::generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert!(SecretKey::from_slice(&[0u8; 31]).is_err());
        assert!(SecretKey::from_slice(&[0u8; 33]).is_err());
        assert!(SecretKey::from_slice(&[0u8; KEY_SIZE]).is_ok());
    }

    #[test]
    fn test_key_store_current_returns_copies() {
        let dir = tempdir().unwrap();
        let store = KeyStore::init(dir.path().join("key")).unwrap();

        let mut copy = store.current();
        copy.zeroize();

        assert_eq!(copy.as_bytes(), &[0u8; KEY_SIZE]);
        assert_ne!(store.current().as_bytes(), &[0u8; KEY_SIZE]);
    }

    #[test]
    fn test_secret_key_debug_redacts() {
        let key = SecretKey::from_bytes([0xAB; KEY_SIZE]);
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("abab"));
    }
}
