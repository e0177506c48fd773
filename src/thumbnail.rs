//! Downloading, decoding and memoizing thumbnails and avatars

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::ThumbnailError;

/// Download an image and convert it to an egui image
pub fn fetch_image(url: &str) -> Result<ColorImage, ThumbnailError> {
    // Perform a blocking HTTP GET request
    let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    decode_image(&bytes)
}

/// Decode raw image bytes into RGBA for egui
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage, ThumbnailError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, &img))
}

/// Frames a texture or a failed URL is kept without being asked for
/// (about a minute at the app's repaint rate)
pub const IDLE_FRAMES: u64 = 600;

struct CachedTexture {
    handle: TextureHandle,
    last_used: u64,
}

/// Textures by URL; each URL is fetched once while it stays in use
pub struct ThumbnailCache {
    runtime: Handle,
    /// Frames drained so far
    frame: u64,
    textures: HashMap<String, CachedTexture>,
    /// Downloads in flight
    requested: HashSet<String>,
    /// URLs that failed, with the frame they failed on; not retried until they expire
    failed: HashMap<String, u64>,
    /// Incoming results (url, image or None when the fetch failed)
    results: Arc<Mutex<Vec<(String, Option<ColorImage>)>>>,
}

impl ThumbnailCache {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            frame: 0,
            textures: HashMap::new(),
            requested: HashSet::new(),
            failed: HashMap::new(),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Turn finished downloads into textures and evict idle ones; call once per frame
    pub fn drain(&mut self, ctx: &egui::Context) {
        self.frame += 1;
        let finished = match self.results.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(_) => Vec::new(),
        };
        for (url, img) in finished {
            self.requested.remove(&url);
            match img {
                Some(img) => {
                    let handle = ctx.load_texture(&url, img, TextureOptions::default());
                    let last_used = self.frame;
                    self.textures.insert(url, CachedTexture { handle, last_used });
                }
                None => {
                    self.failed.insert(url, self.frame);
                }
            }
        }
        self.evict_idle();
    }

    /// Texture for a URL, starting a download the first time it is asked for
    pub fn get(&mut self, ctx: &egui::Context, url: &str) -> Option<TextureHandle> {
        if url.is_empty() {
            return None;
        }
        if let Some(cached) = self.textures.get_mut(url) {
            cached.last_used = self.frame;
            return Some(cached.handle.clone());
        }
        if self.failed.contains_key(url) {
            return None;
        }
        if self.requested.insert(url.to_string()) {
            self.spawn_fetch(ctx, url.to_string());
        }
        None
    }

    /// Dropping the last handle frees the GPU texture
    fn evict_idle(&mut self) {
        let frame = self.frame;
        let before = self.textures.len();
        self.textures
            .retain(|_, cached| frame - cached.last_used <= IDLE_FRAMES);
        self.failed.retain(|_, failed_at| frame - *failed_at <= IDLE_FRAMES);
        let evicted = before - self.textures.len();
        if evicted > 0 {
            debug!(evicted, kept = self.textures.len(), "idle thumbnails released");
        }
    }

    fn spawn_fetch(&self, ctx: &egui::Context, url: String) {
        let results = Arc::clone(&self.results);
        let ctx = ctx.clone();
        self.runtime.spawn_blocking(move || {
            let img = match fetch_image(&url) {
                Ok(img) => {
                    debug!(%url, "thumbnail loaded");
                    Some(img)
                }
                Err(err) => {
                    warn!(%url, error = %err, "thumbnail unavailable");
                    None
                }
            };
            // Hand the result to the UI thread and wake it up
            if let Ok(mut pending) = results.lock() {
                pending.push((url, img));
            }
            ctx.request_repaint();
        });
    }
}
