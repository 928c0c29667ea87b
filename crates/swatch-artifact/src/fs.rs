use std::path::Path;

use futures::TryStreamExt;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::{Artifact, Error};

/// Open a local file for streaming.
///
/// Directories and missing paths are both reported as [`Error::NotFound`].
pub async fn open_local(path: &Path) -> Result<Artifact, Error> {
  let not_found = || Error::NotFound(path.display().to_string());

  let file = File::open(path).await.map_err(|e| {
    if e.kind() == std::io::ErrorKind::NotFound {
      not_found()
    } else {
      Error::Io(e)
    }
  })?;

  let metadata = file.metadata().await?;
  if !metadata.is_file() {
    return Err(not_found());
  }

  let stream = ReaderStream::new(file).map_err(Error::Io);
  Ok(Artifact {
    body: Box::pin(stream),
    content_type: None,
    size: Some(metadata.len()),
  })
}

/// Whether a regular file exists at `path`.
pub async fn local_exists(path: &Path) -> bool {
  tokio::fs::metadata(path)
    .await
    .map(|m| m.is_file())
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
  use futures::StreamExt;

  use super::*;

  #[tokio::test]
  async fn test_open_and_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tp.pdf");
    std::fs::write(&path, b"%PDF-1.7 test").unwrap();

    let artifact = open_local(&path).await.unwrap();
    assert_eq!(artifact.size, Some(13));

    let chunks: Vec<_> = artifact.body.collect().await;
    let bytes: Vec<u8> = chunks
      .into_iter()
      .flat_map(|c| c.unwrap().to_vec())
      .collect();
    assert_eq!(bytes, b"%PDF-1.7 test");
  }

  #[tokio::test]
  async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_local(&dir.path().join("nope.png")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(!local_exists(&dir.path().join("nope.png")).await);
  }

  #[tokio::test]
  async fn test_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!local_exists(dir.path()).await);
    assert!(matches!(
      open_local(dir.path()).await.unwrap_err(),
      Error::NotFound(_)
    ));
  }
}
