//! Sources for the bytes behind a [`FileRef`]

use crate::error::{ClientError, ClientResult};
use agriform_forms::FileRef;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;

/// Reads upload content at submission time
#[async_trait]
pub trait BlobStore: Send + Sync {
	async fn read(&self, file: &FileRef) -> ClientResult<Vec<u8>>;
}

/// Blobs stored as files under a root directory, keyed by [`FileRef::id`]
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
	root: PathBuf,
}

impl LocalBlobStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

#[async_trait]
impl BlobStore for LocalBlobStore {
	async fn read(&self, file: &FileRef) -> ClientResult<Vec<u8>> {
		if file.id.split(['/', '\\']).any(|segment| segment == "..") {
			return Err(ClientError::Blob {
				id: file.id.clone(),
				message: "Path escapes the blob root".to_string(),
			});
		}

		tokio::fs::read(self.root.join(&file.id))
			.await
			.map_err(|e| ClientError::Blob {
				id: file.id.clone(),
				message: e.to_string(),
			})
	}
}

/// In-memory blobs
///
/// # Examples
///
/// ```
/// use agriform_client::{BlobStore, MemoryBlobStore};
/// use agriform_forms::FileRef;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryBlobStore::new();
/// store.insert("photo-1", b"\x89PNG".to_vec());
///
/// let file = FileRef::new("photo-1", "me.png", "image/png", 4);
/// assert_eq!(store.read(&file).await.unwrap(), b"\x89PNG");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
	blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, id: impl Into<String>, bytes: Vec<u8>) {
		self.blobs.write().insert(id.into(), bytes);
	}
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
	async fn read(&self, file: &FileRef) -> ClientResult<Vec<u8>> {
		self.blobs
			.read()
			.get(&file.id)
			.cloned()
			.ok_or_else(|| ClientError::Blob {
				id: file.id.clone(),
				message: "Not found".to_string(),
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	#[rstest]
	#[tokio::test]
	async fn test_local_store_reads_by_id() {
		// Arrange
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("passbook.pdf"), b"%PDF-1.7").unwrap();
		let store = LocalBlobStore::new(dir.path());
		let file = FileRef::new("passbook.pdf", "passbook.pdf", "application/pdf", 8);

		// Act
		let bytes = store.read(&file).await.unwrap();

		// Assert
		assert_eq!(bytes, b"%PDF-1.7");
	}

	#[rstest]
	#[case("missing.pdf")]
	#[case("../etc/passwd")]
	#[tokio::test]
	async fn test_local_store_errors(#[case] id: &str) {
		let dir = TempDir::new().unwrap();
		let store = LocalBlobStore::new(dir.path());

		let result = store.read(&FileRef::new(id, "x.pdf", "application/pdf", 1)).await;

		assert!(matches!(result, Err(ClientError::Blob { .. })));
	}
}
