use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::utils::sanitize_filename;
use crate::youtube::VideoId;
use crate::{DigestError, Result};

/// Filename for a summary when none was requested: `<sanitized-title>_<id>.<ext>`
pub fn default_output_path(title: &str, video_id: &VideoId, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.{}",
        sanitize_filename(title),
        video_id,
        format.extension()
    ))
}

/// Save the model's response verbatim, replacing any existing file
pub fn write_summary(path: &Path, content: &str) -> Result<()> {
    let io_failure = |source: std::io::Error| DigestError::IoFailure {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(io_failure)?;
    }

    fs_err::write(path, content).map_err(io_failure)?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let id = VideoId::parse("abc12345678").unwrap();
        assert_eq!(
            default_output_path("MyVideo", &id, OutputFormat::Html),
            PathBuf::from("MyVideo_abc12345678.html")
        );
        assert_eq!(
            default_output_path("What? A: Title", &id, OutputFormat::Markdown),
            PathBuf::from("What_ A_ Title_abc12345678.md")
        );
    }

    #[test]
    fn test_write_summary_verbatim_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");

        write_summary(&path, "first version that is longer").unwrap();
        write_summary(&path, "# Summary\n\nüñí\n").unwrap();

        assert_eq!(fs_err::read_to_string(&path).unwrap(), "# Summary\n\nüñí\n");
    }

    #[test]
    fn test_write_summary_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.html");

        write_summary(&path, "<h1>hi</h1>").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_failure_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten with a file
        let err = write_summary(dir.path(), "content").unwrap_err();

        match err {
            DigestError::IoFailure { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected IoFailure, got {:?}", other),
        }
    }
}
