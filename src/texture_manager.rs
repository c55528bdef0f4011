use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

use crate::session::ImageRef;

/// Keeps the GPU textures of picked images, keyed by image reference.
///
/// The controller only holds [`ImageRef`]s; the pixels behind them live here.
/// Least recently shown textures are evicted once `max_cache_size` is exceeded.
pub struct TextureManager {
    textures: HashMap<String, TextureHandle>,
    /// Frame each texture was last shown in
    last_used: HashMap<String, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Uploads `pixels` as the texture for `image`, replacing any previous one
    pub fn insert(&mut self, ctx: &Context, image: &ImageRef, pixels: ColorImage) -> &TextureHandle {
        let key = image.cache_key().to_owned();
        let handle = ctx.load_texture(format!("image:{}", key), pixels, TextureOptions::LINEAR);

        self.last_used.insert(key.clone(), self.current_frame);
        self.textures.insert(key.clone(), handle);
        self.prune_cache_if_needed(&key);

        &self.textures[&key]
    }

    /// The texture for `image`, marking it as used this frame
    pub fn get(&mut self, image: &ImageRef) -> Option<&TextureHandle> {
        let key = image.cache_key();
        let handle = self.textures.get(key)?;
        self.last_used.insert(key.to_owned(), self.current_frame);
        Some(handle)
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.textures.contains_key(image.cache_key())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn prune_cache_if_needed(&mut self, keep: &str) {
        if self.textures.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self
            .last_used
            .iter()
            .filter(|(key, _)| key.as_str() != keep)
            .map(|(key, frame)| (key.clone(), *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.textures.len() - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            log::debug!("Evicting texture {}", key);
            self.textures.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn clear_cache(&mut self) {
        self.textures.clear();
        self.last_used.clear();
    }
}
