//! Build configuration

use crate::assets::MissingAssetPolicy;
use crate::{DeckError, Result};
use pdf_core::FontFamilyBuilder;
use std::path::{Path, PathBuf};

/// Everything needed to render the deck
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    /// Directory holding the slide images
    pub images_dir: PathBuf,
    /// Regular font file (TrueType/OpenType or collection)
    pub font: PathBuf,
    /// Bold font file; bold is synthesised when absent
    pub bold_font: Option<PathBuf>,
    /// Face to use inside font collections
    pub font_index: u32,
    /// Output PDF path
    pub output: PathBuf,
    pub missing_assets: MissingAssetPolicy,
    /// Where to write the JSON run summary
    pub summary: Option<PathBuf>,
}

impl DeckConfig {
    pub fn new(
        images_dir: impl Into<PathBuf>,
        font: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            images_dir: images_dir.into(),
            font: font.into(),
            bold_font: None,
            font_index: 0,
            output: output.into(),
            missing_assets: MissingAssetPolicy::default(),
            summary: None,
        }
    }

    pub fn with_bold_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.bold_font = Some(path.into());
        self
    }

    pub fn with_missing_assets(mut self, policy: MissingAssetPolicy) -> Self {
        self.missing_assets = policy;
        self
    }

    /// Check that every input exists before any rendering starts
    pub fn validated(self) -> Result<Self> {
        if !self.images_dir.is_dir() {
            return Err(DeckError::Config(format!(
                "image directory {} does not exist",
                self.images_dir.display()
            )));
        }
        require_file(&self.font, "font")?;
        if let Some(bold) = &self.bold_font {
            require_file(bold, "bold font")?;
        }
        if self.output.as_os_str().is_empty() {
            return Err(DeckError::Config("output path must not be empty".to_string()));
        }
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(DeckError::Config(format!(
                    "output directory {} does not exist",
                    parent.display()
                )));
            }
        }
        Ok(self)
    }

    /// Read the configured font files
    pub fn font_family(&self) -> Result<FontFamilyBuilder> {
        let mut builder = FontFamilyBuilder::new()
            .regular(std::fs::read(&self.font)?)
            .face_index(self.font_index);
        if let Some(bold) = &self.bold_font {
            builder = builder.bold(std::fs::read(bold)?);
        }
        Ok(builder)
    }
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DeckError::Config(format!(
            "{what} file {} does not exist",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, DeckConfig) {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("img");
        std::fs::create_dir(&images).unwrap();
        let font = dir.path().join("font.ttf");
        std::fs::write(&font, b"font").unwrap();
        let config = DeckConfig::new(images, font, dir.path().join("deck.pdf"));
        (dir, config)
    }

    #[test]
    fn test_valid_config() {
        let (_dir, config) = workspace();
        let validated = config.clone().validated().unwrap();
        assert_eq!(validated, config);
        assert_eq!(validated.missing_assets, MissingAssetPolicy::Abort);
    }

    #[test]
    fn test_missing_image_directory() {
        let (dir, mut config) = workspace();
        config.images_dir = dir.path().join("nope");

        let err = config.validated().unwrap_err();
        assert!(matches!(err, DeckError::Config(ref msg) if msg.contains("image directory")));
    }

    #[test]
    fn test_missing_fonts() {
        let (dir, config) = workspace();

        let err = config
            .clone()
            .with_bold_font(dir.path().join("bold.ttf"))
            .validated()
            .unwrap_err();
        assert!(matches!(err, DeckError::Config(ref msg) if msg.contains("bold font")));

        let mut config = config;
        config.font = dir.path().join("missing.ttf");
        assert!(matches!(config.validated(), Err(DeckError::Config(_))));
    }

    #[test]
    fn test_output_directory_must_exist() {
        let (dir, mut config) = workspace();
        config.output = dir.path().join("out").join("deck.pdf");
        assert!(matches!(config.validated(), Err(DeckError::Config(_))));
    }

    #[test]
    fn test_bare_output_name_is_fine() {
        let (_dir, mut config) = workspace();
        config.output = PathBuf::from("朝聖之路.pdf");
        assert!(config.validated().is_ok());
    }
}
