use crate::filename::resolve_file_name;
use crate::types::*;
use chrono::NaiveDateTime;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page geometry and placement settings, shared by every page of a document
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin_mode: MarginMode,
    pub fit_to_page: bool,
    pub alignment: Alignment,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mode: MarginMode::Default,
            fit_to_page: true,
            alignment: Alignment::MidMiddle,
        }
    }
}

/// Everything needed for one image-to-PDF conversion
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionOptions {
    // Input, in page order
    pub input_files: Vec<PathBuf>,

    // Output location and naming
    pub output_dir: PathBuf,
    pub file_name: String,
    pub append_date_time: bool,

    // Page geometry
    pub layout: LayoutConfig,

    // Document metadata
    pub title: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            output_dir: PathBuf::from("."),
            file_name: String::new(),
            append_date_time: false,
            layout: LayoutConfig::default(),
            title: None,
        }
    }
}

impl ConversionOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImagesError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImagesError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(ImagesError::Config("No input files specified".to_string()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ImagesError::Config(
                "Output directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Full output path for a conversion finished at `now`
    pub fn output_path(&self, now: NaiveDateTime) -> PathBuf {
        self.output_dir
            .join(resolve_file_name(&self.file_name, self.append_date_time, now))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Page size, orientation and margin travel as their keys and parse the
    // same way `FromStr` does, so "a4" and "A4" both load.
    macro_rules! keyed {
        ($($ty:ty),*) => {$(
            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self.key())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let key = String::deserialize(deserializer)?;
                    key.parse::<$ty>().map_err(serde::de::Error::custom)
                }
            }
        )*};
    }

    keyed!(PageSize, Orientation, MarginMode);

    // Alignment travels as its display key ("Mid-Middle"); unknown keys
    // load as top-left instead of failing the whole config.
    impl Serialize for Alignment {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.key())
        }
    }

    impl<'de> Deserialize<'de> for Alignment {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let key = String::deserialize(deserializer)?;
            Ok(Alignment::resolve(&key))
        }
    }
}
