//! Value types shared by the image source, the gallery context and the
//! layout engine.

use serde::{Deserialize, Serialize};

/// A single image as delivered by the image source.
///
/// `width` and `height` are the pixel dimensions of the display rendition;
/// the layout engine only ever looks at their ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// Unique identifier assigned by the remote service
    pub id: String,
    /// URL of the display ("large") rendition
    pub url: String,
    /// URL of the original rendition
    #[serde(default)]
    pub original_url: String,
    pub width: u32,
    pub height: u32,
    /// Numeric id of the author, when known
    #[serde(default)]
    pub author_id: Option<u64>,
    #[serde(default)]
    pub description: String,
    /// External profile page of the post the image belongs to
    #[serde(default)]
    pub profile_url: String,
}

impl ImageDescriptor {
    /// Convenience constructor for an image with only dimensions and urls.
    pub fn new(id: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            original_url: String::new(),
            width,
            height,
            author_id: None,
            description: String::new(),
            profile_url: String::new(),
        }
    }

    /// `width / height`. Infinite when `height` is 0.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Whether both dimensions are positive, i.e. the aspect ratio is finite
    /// and non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// An author as listed by the image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_is_width_over_height() {
        let img = ImageDescriptor::new("a", "u", 300, 150);
        assert_eq!(img.aspect_ratio(), 2.0);
        assert!(img.is_valid());
    }

    #[test]
    fn zero_dimensions_are_invalid() {
        assert!(!ImageDescriptor::new("a", "u", 0, 10).is_valid());
        assert!(!ImageDescriptor::new("b", "u", 10, 0).is_valid());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let img: ImageDescriptor =
            serde_json::from_str(r#"{"id":"x","url":"http://a/x.jpg","width":4,"height":3}"#)
                .unwrap();
        assert_eq!(img.width, 4);
        assert!(img.author_id.is_none());
        assert!(img.original_url.is_empty());

        let json = serde_json::to_value(&img).unwrap();
        assert!(json.get("originalUrl").is_some());
        assert!(json.get("profileUrl").is_some());
    }
}
