use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{MARGIN_DEFAULT_MM, MARGIN_MINIMUM_MM};

#[derive(Error, Debug)]
pub enum ImagesError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No images to convert")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, ImagesError>;

/// Named page sizes, plus `Auto` which makes the page adopt the image size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    A0,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    Legal,
    Letter,
    Tabloid,
    Auto,
}

impl PageSize {
    pub const ALL: [PageSize; 10] = [
        PageSize::A0,
        PageSize::A1,
        PageSize::A2,
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::Legal,
        PageSize::Letter,
        PageSize::Tabloid,
        PageSize::Auto,
    ];

    /// Portrait dimensions (width, height) in millimetres; `None` for `Auto`
    pub fn dimensions_mm(self) -> Option<(f32, f32)> {
        match self {
            PageSize::A0 => Some((841.0, 1189.0)),
            PageSize::A1 => Some((594.0, 841.0)),
            PageSize::A2 => Some((420.0, 594.0)),
            PageSize::A3 => Some((297.0, 420.0)),
            PageSize::A4 => Some((210.0, 297.0)),
            PageSize::A5 => Some((148.0, 210.0)),
            PageSize::Legal => Some((216.0, 356.0)),
            PageSize::Letter => Some((216.0, 279.0)),
            PageSize::Tabloid => Some((279.0, 432.0)),
            PageSize::Auto => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PageSize::A0 => "A0",
            PageSize::A1 => "A1",
            PageSize::A2 => "A2",
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Legal => "Legal",
            PageSize::Letter => "Letter",
            PageSize::Tabloid => "Tabloid",
            PageSize::Auto => "Auto",
        }
    }
}

impl FromStr for PageSize {
    type Err = ImagesError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        PageSize::ALL
            .into_iter()
            .find(|size| size.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ImagesError::Config(format!("Unknown page size: {:?}", s)))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Page orientation for named sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Short side across (the size table as written)
    #[default]
    Portrait,
    /// Long side across
    Landscape,
    /// Follow the image: landscape for wide images, portrait otherwise
    Auto,
}

impl Orientation {
    pub fn key(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait",
            Orientation::Landscape => "Landscape",
            Orientation::Auto => "Auto",
        }
    }
}

impl FromStr for Orientation {
    type Err = ImagesError;

    fn from_str(s: &str) -> Result<Self> {
        [
            Orientation::Portrait,
            Orientation::Landscape,
            Orientation::Auto,
        ]
        .into_iter()
        .find(|o| o.key().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ImagesError::Config(format!("Unknown orientation: {:?}", s)))
    }
}

/// Page margin presets.
///
/// Margins describe the document frame only; they never move or shrink
/// the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginMode {
    #[default]
    Default,
    Minimum,
    None,
}

impl MarginMode {
    pub fn width_mm(self) -> f32 {
        match self {
            MarginMode::Default => MARGIN_DEFAULT_MM,
            MarginMode::Minimum => MARGIN_MINIMUM_MM,
            MarginMode::None => 0.0,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MarginMode::Default => "Default",
            MarginMode::Minimum => "Minimum",
            MarginMode::None => "None",
        }
    }
}

impl FromStr for MarginMode {
    type Err = ImagesError;

    fn from_str(s: &str) -> Result<Self> {
        [MarginMode::Default, MarginMode::Minimum, MarginMode::None]
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ImagesError::Config(format!("Unknown margin mode: {:?}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Where leftover page space goes around the drawn image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    TopLeft,
    TopMiddle,
    TopRight,
    MidLeft,
    #[default]
    MidMiddle,
    MidRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Alignment {
    pub const ALL: [Alignment; 9] = [
        Alignment::TopLeft,
        Alignment::TopMiddle,
        Alignment::TopRight,
        Alignment::MidLeft,
        Alignment::MidMiddle,
        Alignment::MidRight,
        Alignment::BottomLeft,
        Alignment::BottomMiddle,
        Alignment::BottomRight,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Alignment::TopLeft => "Top-Left",
            Alignment::TopMiddle => "Top-Middle",
            Alignment::TopRight => "Top-Right",
            Alignment::MidLeft => "Mid-Left",
            Alignment::MidMiddle => "Mid-Middle",
            Alignment::MidRight => "Mid-Right",
            Alignment::BottomLeft => "Bottom-Left",
            Alignment::BottomMiddle => "Bottom-Middle",
            Alignment::BottomRight => "Bottom-Right",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Alignment::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(key))
    }

    /// Like [`Alignment::from_key`], but unknown keys fall back to top-left.
    pub fn resolve(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            log::warn!("Unknown alignment {:?}, placing image at top-left", key);
            Alignment::TopLeft
        })
    }

    pub fn horizontal(self) -> HorizontalAlign {
        match self {
            Alignment::TopLeft | Alignment::MidLeft | Alignment::BottomLeft => {
                HorizontalAlign::Left
            }
            Alignment::TopMiddle | Alignment::MidMiddle | Alignment::BottomMiddle => {
                HorizontalAlign::Center
            }
            Alignment::TopRight | Alignment::MidRight | Alignment::BottomRight => {
                HorizontalAlign::Right
            }
        }
    }

    pub fn vertical(self) -> VerticalAlign {
        match self {
            Alignment::TopLeft | Alignment::TopMiddle | Alignment::TopRight => VerticalAlign::Top,
            Alignment::MidLeft | Alignment::MidMiddle | Alignment::MidRight => {
                VerticalAlign::Middle
            }
            Alignment::BottomLeft | Alignment::BottomMiddle | Alignment::BottomRight => {
                VerticalAlign::Bottom
            }
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Image encodings the document writer can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl MediaType {
    pub fn mime_type(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => Some(MediaType::Jpeg),
            "image/png" | "png" => Some(MediaType::Png),
            _ => None,
        }
    }

    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(MediaType::Jpeg),
            image::ImageFormat::Png => Some(MediaType::Png),
            _ => None,
        }
    }
}

/// Opaque handle to an image's pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub u64);

/// An image whose pixel size is already known
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub media_type: MediaType,
    pub source_ref: ImageRef,
    pub display_name: String,
}

impl ImageDescriptor {
    pub fn new(
        pixel_width: u32,
        pixel_height: u32,
        media_type: MediaType,
        source_ref: ImageRef,
        display_name: impl Into<String>,
    ) -> Result<Self> {
        let descriptor = Self {
            pixel_width,
            pixel_height,
            media_type,
            source_ref,
            display_name: display_name.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(ImagesError::InvalidInput(format!(
                "Image {:?} has zero size ({}x{})",
                self.display_name, self.pixel_width, self.pixel_height
            )));
        }
        Ok(())
    }

    pub fn is_landscape(&self) -> bool {
        self.pixel_width > self.pixel_height
    }
}

/// Page size and image rectangle for one output page.
///
/// All values are millimetres with the origin at the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page_width: f32,
    pub page_height: f32,
    pub draw_x: f32,
    pub draw_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
    /// Factor applied to the image's pixel size
    pub scale: f32,
    pub source_ref: ImageRef,
}
