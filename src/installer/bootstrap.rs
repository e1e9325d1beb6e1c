use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};

use crate::{Error, Result};

/// Download `url` to `dest` unless `dest` already exists.
///
/// The body is staged in a temporary file next to `dest` and renamed into
/// place, so a failed download never leaves a truncated file behind.
/// Returns whether a download happened.
#[instrument]
pub fn ensure_downloaded(url: &str, dest: &Path) -> Result<bool> {
    if dest.exists() {
        debug!("already present");
        return Ok(false);
    }

    let parent = dest.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| Error::DirCreate {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut resp = reqwest::blocking::get(url).map_err(|e| Error::Network {
        url: url.to_string(),
        source: e,
    })?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let write_err = |e: std::io::Error| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    };
    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    let bytes = resp.copy_to(&mut staged).map_err(|e| Error::Network {
        url: url.to_string(),
        source: e,
    })?;
    staged.flush().map_err(write_err)?;
    staged.persist(dest).map_err(|e| write_err(e.error))?;

    debug!(bytes, "downloaded");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_downloads_missing_file() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/autoload/pathogen.vim")
            .with_status(200)
            .with_body("function! pathogen#infect() abort\nendfunction\n")
            .create();

        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("autoload/pathogen.vim");
        let url = format!("{}/autoload/pathogen.vim", server.url());

        assert!(ensure_downloaded(&url, &dest).unwrap());
        assert!(fs::read_to_string(&dest).unwrap().contains("pathogen#infect"));
        mock.assert();
    }

    #[test]
    fn test_existing_file_is_not_fetched() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/autoload/pathogen.vim")
            .expect(0)
            .create();

        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("pathogen.vim");
        fs::write(&dest, "local copy").unwrap();
        let url = format!("{}/autoload/pathogen.vim", server.url());

        assert!(!ensure_downloaded(&url, &dest).unwrap());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "local copy");
        mock.assert();
    }

    #[test]
    fn test_http_error_leaves_nothing_behind() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/autoload/pathogen.vim")
            .with_status(404)
            .create();

        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("pathogen.vim");
        let url = format!("{}/autoload/pathogen.vim", server.url());

        let result = ensure_downloaded(&url, &dest);
        assert!(matches!(result, Err(Error::HttpStatus { status: 404, .. })));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
