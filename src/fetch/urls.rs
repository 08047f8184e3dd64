// src/fetch/urls.rs
use regex::Regex;
use url::Url;

use super::FetchError;

const DRIVE_DOWNLOAD_BASE: &str = "https://drive.google.com/uc";

/// Turn a Google Drive share link (`…/file/d/<id>/view?…`) into a direct
/// download URL.
pub fn download_url(share_link: &str) -> Result<Url, FetchError> {
    let id = file_id(share_link).ok_or_else(|| FetchError::InvalidLink(share_link.to_string()))?;
    Url::parse_with_params(DRIVE_DOWNLOAD_BASE, &[("export", "download"), ("id", id)])
        .map_err(|_| FetchError::InvalidLink(share_link.to_string()))
}

/// The `<id>` segment following `/d/`.
pub fn file_id(share_link: &str) -> Option<&str> {
    let re = Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("file id pattern should compile");
    re.captures(share_link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_link_becomes_download_url() {
        let url = download_url(
            "https://drive.google.com/file/d/1AbC_d-9xYz/view?usp=sharing",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://drive.google.com/uc?export=download&id=1AbC_d-9xYz"
        );
    }

    #[test]
    fn spreadsheet_links_work_too() {
        assert_eq!(
            file_id("https://docs.google.com/spreadsheets/d/XYZ123/edit#gid=0"),
            Some("XYZ123")
        );
    }

    #[test]
    fn links_without_id_are_rejected() {
        let err = download_url("https://drive.google.com/drive/my-drive").unwrap_err();
        assert!(matches!(err, FetchError::InvalidLink(_)));
    }
}
