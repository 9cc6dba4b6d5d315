//! Sprite sheets and sprite regions
//!
//! [`Gfx`] owns every texture the screens draw from. Sheets are keyed by file
//! stem (`resources/graphics/mario_bros.png` is `"mario_bros"`); slides get a
//! `slide:` prefix so they can never replace a sheet. Sheets are loaded
//! through an SDL surface so a colour key can be applied before the texture is
//! created; the sheets in this game use magenta as their transparent colour,
//! except where the config overrides it.
//!
//! [`SpriteRegion`] describes one sub-image of a sheet plus the scale it is drawn
//! at. It carries no texture reference, so states can own regions without
//! borrowing the texture store. [`Backdrop`] does the same for the scaled
//! level background.

use crate::error::GameError;
use sdl2::image::LoadSurface;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

const SLIDE_PREFIX: &str = "slide:";

/// Texture store for sprite sheets, backgrounds and slides
pub struct Gfx<'a> {
    textures: HashMap<String, Texture<'a>>,
}

impl<'a> Gfx<'a> {
    pub fn new() -> Self {
        Gfx {
            textures: HashMap::new(),
        }
    }

    /// Loads every image in `dir`
    ///
    /// Each sheet gets `default_key` as its transparent colour unless
    /// `overrides` names a different one for its stem.
    pub fn load_dir(
        &mut self,
        texture_creator: &'a TextureCreator<WindowContext>,
        dir: impl AsRef<Path>,
        default_key: Color,
        overrides: &HashMap<String, [u8; 3]>,
    ) -> Result<usize, GameError> {
        let mut loaded = 0;

        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if !is_image(&path) {
                continue;
            }

            let colorkey = sheet_name(&path)
                .and_then(|name| overrides.get(&name))
                .map(|[r, g, b]| Color::RGB(*r, *g, *b))
                .unwrap_or(default_key);

            self.load_file(texture_creator, &path, Some(colorkey))?;
            loaded += 1;
        }

        log::info!("Loaded {} sheets from {}", loaded, dir.as_ref().display());
        Ok(loaded)
    }

    /// Loads a single sheet and returns the key it is stored under
    pub fn load_file(
        &mut self,
        texture_creator: &'a TextureCreator<WindowContext>,
        path: impl AsRef<Path>,
        colorkey: Option<Color>,
    ) -> Result<String, GameError> {
        let path = path.as_ref();
        let name = sheet_name(path)
            .ok_or_else(|| GameError::MissingTexture(path.display().to_string()))?;
        self.load_as(texture_creator, path, name, colorkey)
    }

    /// Loads a slide image under its [`slide_key`]
    pub fn load_slide(
        &mut self,
        texture_creator: &'a TextureCreator<WindowContext>,
        path: impl AsRef<Path>,
    ) -> Result<String, GameError> {
        let path = path.as_ref();
        let name = slide_key(path)
            .ok_or_else(|| GameError::MissingTexture(path.display().to_string()))?;
        self.load_as(texture_creator, path, name, None)
    }

    fn load_as(
        &mut self,
        texture_creator: &'a TextureCreator<WindowContext>,
        path: &Path,
        name: String,
        colorkey: Option<Color>,
    ) -> Result<String, GameError> {

        let mut surface = Surface::from_file(path)
            .map_err(|e| GameError::Sdl(format!("Failed to load {}: {}", path.display(), e)))?;
        if let Some(key) = colorkey {
            surface.set_color_key(true, key)?;
        }

        let texture = texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        log::debug!("Loaded texture '{}' from {}", name, path.display());
        if self.textures.insert(name.clone(), texture).is_some() {
            log::warn!("Texture '{}' loaded twice, {} replaces it", name, path.display());
        }
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Result<&Texture<'a>, GameError> {
        self.textures
            .get(name)
            .ok_or_else(|| GameError::MissingTexture(name.to_string()))
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Unscaled pixel size of a loaded texture
    pub fn size_of(&self, name: &str) -> Result<(u32, u32), GameError> {
        let query = self.get(name)?.query();
        Ok((query.width, query.height))
    }
}

impl Default for Gfx<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage key for an image path: its file stem
pub fn sheet_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

/// Storage key for a slide: its file stem behind a prefix no sheet uses
pub fn slide_key(path: &Path) -> Option<String> {
    sheet_name(path).map(|stem| format!("{}{}", SLIDE_PREFIX, stem))
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A sub-image of a named sheet, drawn scaled
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRegion {
    pub sheet: String,
    pub src: Rect,
    pub scale: f32,
}

impl SpriteRegion {
    pub fn new(sheet: &str, x: i32, y: i32, width: u32, height: u32, scale: f32) -> Self {
        SpriteRegion {
            sheet: sheet.to_string(),
            src: Rect::new(x, y, width, height),
            scale,
        }
    }

    /// Size on screen after scaling (truncated, at least 1x1)
    pub fn scaled_size(&self) -> (u32, u32) {
        (
            ((self.src.width() as f32 * self.scale) as u32).max(1),
            ((self.src.height() as f32 * self.scale) as u32).max(1),
        )
    }

    /// Destination rect with its top-left corner at `(x, y)`
    pub fn dest_at(&self, x: i32, y: i32) -> Rect {
        let (width, height) = self.scaled_size();
        Rect::new(x, y, width, height)
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, gfx: &Gfx, dest: Rect) -> Result<(), String> {
        let texture = gfx.get(&self.sheet)?;
        canvas.copy(texture, Some(self.src), Some(dest))
    }
}

/// A background image scaled up by a constant factor and viewed through a
/// screen-sized window
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub sheet: String,
    pub multiplier: f32,
}

impl Backdrop {
    pub fn new(sheet: &str, multiplier: f32) -> Self {
        Backdrop {
            sheet: sheet.to_string(),
            multiplier,
        }
    }

    /// Region of the unscaled texture that covers `viewport` of the scaled image
    pub fn source_rect(&self, viewport: Rect) -> Rect {
        let scale = |v: f32| (v / self.multiplier).round();
        Rect::new(
            scale(viewport.x() as f32) as i32,
            scale(viewport.y() as f32) as i32,
            (scale(viewport.width() as f32) as u32).max(1),
            (scale(viewport.height() as f32) as u32).max(1),
        )
    }

    /// Width of the whole image once scaled
    pub fn scaled_width(&self, gfx: &Gfx) -> Result<u32, GameError> {
        let (width, _) = gfx.size_of(&self.sheet)?;
        Ok((width as f32 * self.multiplier) as u32)
    }

    /// Draws the part of the scaled image under `viewport` to fill `dest`
    pub fn render(&self, canvas: &mut Canvas<Window>, gfx: &Gfx, viewport: Rect, dest: Rect) -> Result<(), String> {
        let texture = gfx.get(&self.sheet)?;
        canvas.copy(texture, Some(self.source_rect(viewport)), Some(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_is_file_stem() {
        assert_eq!(
            sheet_name(Path::new("resources/graphics/mario_bros.png")),
            Some("mario_bros".to_string())
        );
    }

    #[test]
    fn test_slide_keys_never_collide_with_sheets() {
        let slide = Path::new("resources/slides/mario_bros.png");
        let sheet = Path::new("resources/graphics/mario_bros.png");
        assert_eq!(slide_key(slide), Some("slide:mario_bros".to_string()));
        assert_ne!(slide_key(slide), sheet_name(sheet));
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("level_1.png")));
        assert!(is_image(Path::new("slide.JPG")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("no_extension")));
    }

    #[test]
    fn test_scaled_size_truncates() {
        // Small Mario frame at the character multiplier
        let mario = SpriteRegion::new("mario_bros", 178, 32, 12, 16, 2.5);
        assert_eq!(mario.scaled_size(), (30, 40));

        let cursor = SpriteRegion::new("item_objects", 24, 160, 8, 8, 3.0);
        assert_eq!(cursor.dest_at(220, 358), Rect::new(220, 358, 24, 24));
    }

    #[test]
    fn test_backdrop_source_rect() {
        let backdrop = Backdrop::new("level_1", 2.0);
        assert_eq!(
            backdrop.source_rect(Rect::new(100, 0, 800, 600)),
            Rect::new(50, 0, 400, 300)
        );
    }

    #[test]
    fn test_missing_texture_lookup() {
        let gfx = Gfx::new();
        assert!(!gfx.contains("level_1"));
        assert!(matches!(gfx.get("level_1"), Err(GameError::MissingTexture(_))));
    }
}
