//! Template catalog — the bundled theme images faces are swapped into.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::encoding::to_data_url;
use crate::error::TemplateError;

/// Photo themes offered at the booth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Surfer,
    MoviePoster,
    Urban,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Surfer, Theme::MoviePoster, Theme::Urban];

    /// Name as stored in the metadata table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Surfer => "Surfer",
            Self::MoviePoster => "Movie Poster",
            Self::Urban => "Urban",
        }
    }

    /// Template file name inside the template directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Surfer => "surfer.png",
            Self::MoviePoster => "mission-not-impossible.png",
            Self::Urban => "urban-style.png",
        }
    }
}

impl FromStr for Theme {
    type Err = TemplateError;

    /// Exact, case-sensitive match on the stored label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.label() == s)
            .ok_or_else(|| TemplateError::UnsupportedTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolves themes to template files under a fixed directory.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dir: PathBuf,
}

impl TemplateCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the template for `theme`.
    pub fn path_for(&self, theme: Theme) -> PathBuf {
        self.dir.join(theme.file_name())
    }

    /// Look up a theme by its stored name and return the template as a data URL.
    pub fn select(&self, theme: &str) -> Result<String, TemplateError> {
        let theme: Theme = theme.parse()?;
        self.load(theme)
    }

    /// Read the template for `theme` and encode it.
    ///
    /// Templates are `image/png` when the file ends in `.png` and
    /// `image/jpeg` otherwise.
    pub fn load(&self, theme: Theme) -> Result<String, TemplateError> {
        let path = self.path_for(theme);
        let bytes = std::fs::read(&path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mime_type = if path.extension().is_some_and(|ext| ext == "png") {
            "image/png"
        } else {
            "image/jpeg"
        };

        debug!(theme = %theme, path = %path.display(), bytes = bytes.len(), "Loaded template");
        Ok(to_data_url(&bytes, mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> TemplateCatalog {
        TemplateCatalog::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"))
    }

    #[test]
    fn theme_parses_stored_labels() {
        assert_eq!("Surfer".parse::<Theme>().unwrap(), Theme::Surfer);
        assert_eq!("Movie Poster".parse::<Theme>().unwrap(), Theme::MoviePoster);
        assert_eq!("Urban".parse::<Theme>().unwrap(), Theme::Urban);
    }

    #[test]
    fn theme_is_case_sensitive() {
        assert!("surfer".parse::<Theme>().is_err());
        assert!("MoviePoster".parse::<Theme>().is_err());
    }

    #[test]
    fn bundled_templates_load() {
        let catalog = bundled();
        for theme in Theme::ALL {
            let encoded = catalog.select(theme.label()).unwrap();
            assert!(encoded.starts_with("data:image/png;base64,"), "{theme}");
            assert!(encoded.len() > "data:image/png;base64,".len(), "{theme}");
        }
    }

    #[test]
    fn unknown_theme_names_input() {
        let err = bundled().select("Space Cowboy").unwrap_err();
        assert!(matches!(err, TemplateError::UnsupportedTheme(ref name) if name == "Space Cowboy"));
        assert_eq!(err.to_string(), "Unsupported theme: Space Cowboy");
    }

    #[test]
    fn missing_template_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateCatalog::new(dir.path()).select("Urban").unwrap_err();
        assert!(matches!(err, TemplateError::Read { .. }));
    }

    #[test]
    fn template_bytes_encoded_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("surfer.png"), b"surf").unwrap();

        let encoded = TemplateCatalog::new(dir.path()).select("Surfer").unwrap();
        assert_eq!(encoded, "data:image/png;base64,c3VyZg==");
    }
}
