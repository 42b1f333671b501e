//! Gallery context: which author is selected, which page of images is
//! loaded, and the layout of what is loaded.
//!
//! The context is an explicit value owned by the caller. It talks to the
//! remote service only through [`ImageSource`], so any backend (HTTP, a
//! fixture, a cache) can feed it.

use crate::layout::{Column, LayoutConfig, WaterfallLayout};
use crate::model::{Author, ImageDescriptor};
use crate::Result;
use log::debug;

/// Default page size for image list requests
pub const DEFAULT_LIMIT: u32 = 20;

/// Filter and paging parameters for an image list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageQuery {
    /// Restrict to one author; `None` lists everyone
    pub author_id: Option<u64>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ImageQuery {
    fn default() -> Self {
        Self {
            author_id: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl ImageQuery {
    pub fn for_author(mut self, author_id: Option<u64>) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Author filter actually sent; id 0 means "everyone".
    pub fn author_filter(&self) -> Option<u64> {
        self.author_id.filter(|id| *id != 0)
    }

    /// Limit actually sent; 0 falls back to the default page size.
    pub fn effective_limit(&self) -> u32 {
        if self.limit == 0 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }

    /// The page following this one.
    pub fn next_page(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.effective_limit()),
            ..*self
        }
    }
}

/// Backend that lists authors and images
pub trait ImageSource {
    /// All authors, in service order
    fn fetch_authors(&self) -> Result<Vec<Author>>;

    /// One page of images, in service order
    fn fetch_images(&self, query: &ImageQuery) -> Result<Vec<ImageDescriptor>>;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn fetch_authors(&self) -> Result<Vec<Author>> {
        (**self).fetch_authors()
    }

    fn fetch_images(&self, query: &ImageQuery) -> Result<Vec<ImageDescriptor>> {
        (**self).fetch_images(query)
    }
}

impl<T: ImageSource + ?Sized> ImageSource for Box<T> {
    fn fetch_authors(&self) -> Result<Vec<Author>> {
        (**self).fetch_authors()
    }

    fn fetch_images(&self, query: &ImageQuery) -> Result<Vec<ImageDescriptor>> {
        (**self).fetch_images(query)
    }
}

/// Application context for one gallery view
pub struct Gallery<S: ImageSource> {
    source: S,
    layout: LayoutConfig,
    authors: Vec<Author>,
    query: ImageQuery,
    images: Vec<ImageDescriptor>,
}

impl<S: ImageSource> Gallery<S> {
    pub fn new(source: S, layout: LayoutConfig) -> Self {
        Self {
            source,
            layout,
            authors: Vec::new(),
            query: ImageQuery::default(),
            images: Vec::new(),
        }
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn query(&self) -> &ImageQuery {
        &self.query
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn set_page_size(&mut self, limit: u32) {
        self.query.limit = limit;
    }

    /// Replace the author list with a fresh fetch.
    pub fn load_authors(&mut self) -> Result<&[Author]> {
        self.authors = self.source.fetch_authors()?;
        debug!("loaded {} authors", self.authors.len());
        Ok(&self.authors)
    }

    /// Switch the author filter. Drops loaded images and rewinds paging.
    pub fn select_author(&mut self, author_id: Option<u64>) {
        self.query = ImageQuery {
            author_id,
            offset: 0,
            ..self.query
        };
        self.images.clear();
    }

    /// Fetch the current page and replace the loaded images with it.
    pub fn load_images(&mut self) -> Result<&[ImageDescriptor]> {
        self.images = self.source.fetch_images(&self.query)?;
        debug!(
            "loaded {} images (author {:?}, offset {})",
            self.images.len(),
            self.query.author_id,
            self.query.offset
        );
        Ok(&self.images)
    }

    /// Fetch the page after the current one and append it. Returns the
    /// number of images added. The offset only advances when the fetch
    /// succeeds.
    pub fn load_next_page(&mut self) -> Result<usize> {
        let next = if self.images.is_empty() {
            self.query
        } else {
            self.query.next_page()
        };
        let page = self.source.fetch_images(&next)?;
        let added = page.len();
        self.query = next;
        self.images.extend(page);
        Ok(added)
    }

    /// Lay out every loaded image for a container `container_width` wide.
    /// Each call is an independent pass.
    pub fn layout(&self, container_width: f64) -> Result<Vec<Column>> {
        let mut pass = WaterfallLayout::for_container(container_width, &self.layout)?;
        pass.extend(self.images.iter().cloned())?;
        Ok(pass.into_columns())
    }
}
