//! Media listing and download from the camera's `DCIM/` tree.

use crate::client::ZCam;
use crate::config::PullOptions;
use crate::error::{Error, Result};
use futures_util::StreamExt;
use log::{debug, info};
use reqwest::Response;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Deserialize, Debug)]
struct Listing {
    files: Vec<String>,
}

impl ZCam {
    /// Folders under `DCIM/`, in the order the camera lists them.
    pub async fn get_dirs(&self) -> Result<Vec<String>> {
        let listing: Listing = self.request_json("DCIM/").await?;
        Ok(listing.files)
    }

    /// Files inside one `DCIM/` folder.
    pub async fn get_files(&self, dir: &str) -> Result<Vec<String>> {
        let listing: Listing = self.request_json(&format!("DCIM/{}", dir)).await?;
        Ok(listing.files)
    }

    /// Download every file on the card into `dst`.
    ///
    /// Stops at the first failure; files written before it are kept.
    pub async fn pull(&self, dst: impl AsRef<Path>, opts: &PullOptions) -> Result<Vec<PathBuf>> {
        let dst = dst.as_ref();
        create_dir(dst).await?;

        let mut pulled = Vec::new();
        for dir in self.get_dirs().await? {
            for file in self.get_files(&dir).await? {
                pulled.push(self.download(&dir, &file, dst, opts).await?);
            }
        }
        info!("[ZCam] Pulled {} files into {}", pulled.len(), dst.display());
        Ok(pulled)
    }

    /// Download the first file named `target`, searching folders in listing order.
    pub async fn pull_video(
        &self,
        target: &str,
        dst: impl AsRef<Path>,
        opts: &PullOptions,
    ) -> Result<PathBuf> {
        let dst = dst.as_ref();
        for dir in self.get_dirs().await? {
            let files = self.get_files(&dir).await?;
            if files.iter().any(|file| file == target) {
                create_dir(dst).await?;
                return self.download(&dir, target, dst, opts).await;
            }
        }
        Err(Error::NotFound(target.to_string()))
    }

    async fn download(
        &self,
        dir: &str,
        file: &str,
        dst: &Path,
        opts: &PullOptions,
    ) -> Result<PathBuf> {
        let target = dst.join(local_name(file)?);
        let res = self.request(&media_path(dir, file, opts.proxy), opts.timeout).await?;
        write_body(res, &target).await?;
        debug!("[ZCam] Saved {}/{} -> {}", dir, file, target.display());
        Ok(target)
    }
}

fn media_path(dir: &str, file: &str, proxy: bool) -> String {
    if proxy {
        format!("DCIM/{}/proxy/{}", dir, file)
    } else {
        format!("DCIM/{}/{}", dir, file)
    }
}

/// A listed file name must be one plain path component so it stays inside `dst`.
fn local_name(file: &str) -> Result<&Path> {
    let path = Path::new(file);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(path),
        _ => Err(Error::Parse(format!("refusing unsafe file name {:?}", file))),
    }
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    target.with_file_name(name)
}

/// Stream the body next to `target`, then rename into place. A body cut
/// short leaves `target` as it was.
async fn write_body(res: Response, target: &Path) -> Result<()> {
    let partial = partial_path(target);
    let mut out = tokio::fs::File::create(&partial).await?;
    let copied = copy_body(res, &mut out).await;
    drop(out);

    match copied {
        Ok(()) => {
            tokio::fs::rename(&partial, target).await?;
            Ok(())
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(e)
        }
    }
}

async fn copy_body(res: Response, out: &mut tokio::fs::File) -> Result<()> {
    let mut stream = res.bytes_stream();
    while let Some(chunk) = stream.next().await {
        out.write_all(&chunk?).await?;
    }
    out.flush().await?;
    Ok(())
}

/// `mkdir -p`; an existing directory is fine.
pub(crate) async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
