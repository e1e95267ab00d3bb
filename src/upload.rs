extern crate anyhow;
extern crate reqwest;

use anyhow::Context;
use crate::config;
use crate::drawing;
use crate::result;

/// Where and how to send board images.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub device_url: String,
    pub upload_dir: String,
    pub timeout: std::time::Duration,
}

impl UploadTarget {
    pub fn from_config(config: &config::Config) -> result::BoardResult<UploadTarget> {
        return Ok(UploadTarget {
            device_url: config.require_device_url()?.to_string(),
            upload_dir: config.upload_dir.clone(),
            timeout: config.timeout(),
        });
    }
}

/// Uploads `path` to the device. Failures are logged, never retried.
pub fn upload_image(target: &UploadTarget, path: &std::path::Path) -> bool {
    match try_upload_image(target, path) {
        Ok(()) => return true,
        Err(err) => {
            error!("Upload failed: {}", err);
            return false;
        },
    }
}

pub fn try_upload_image(target: &UploadTarget, path: &std::path::Path) -> result::BoardResult<()> {
    if !path.is_file() {
        return Err(result::BoardError::MissingFile(path.to_path_buf()));
    }

    let file_name = path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or(drawing::DEPARTURES_IMAGE.to_string());
    let bytes = std::fs::read(path)
        .with_context(|| format!("while reading {}", path.display()))?;

    let part = reqwest::blocking::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("image/jpeg")?;
    let form = reqwest::blocking::multipart::Form::new().part("file", part);

    let client = reqwest::blocking::Client::builder()
        .timeout(target.timeout)
        .build()?;

    info!("Uploading {} to {}...", path.display(), target.device_url);
    let response = client.post(&target.device_url)
        .query(&[("dir", target.upload_dir.as_str())])
        .multipart(form)
        .send()
        .with_context(|| format!("while uploading to {}", target.device_url))?;

    let status = response.status();
    let body = response.text().unwrap_or_default();
    if !status.is_success() {
        return Err(result::BoardError::UploadError(
            format!("device answered {}: {}", status, body.trim())));
    }

    info!("Upload successful! Status: {}", status);
    if !body.trim().is_empty() {
        info!("Response: {}", body.trim());
    }
    return Ok(());
}
