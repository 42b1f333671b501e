//! Blocking HTTP client for the remote image service.
//!
//! Two endpoints are used:
//!
//! - `GET {base}/producers` lists authors as `{uid, name}` with a string uid
//! - `GET {base}/v2/list?uid=&limit=&offset=` lists images, each carrying a
//!   `large` and an `original` rendition
//!
//! Payloads are deserialized into strict wire structs first; anything
//! missing or mistyped becomes [`Error::MalformedResponse`].

use crate::gallery::{ImageQuery, ImageSource};
use crate::model::{Author, ImageDescriptor};
use crate::{Error, GalleryConfig, Result};
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct ProducerRecord {
    uid: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseId {
    Number(u64),
    Text(String),
}

impl LooseId {
    fn to_u64(&self) -> Option<u64> {
        match self {
            LooseId::Number(n) => Some(*n),
            LooseId::Text(s) if s.trim().is_empty() => None,
            LooseId::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Rendition {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PicInfo {
    large: Rendition,
    original: Rendition,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    pic_id: String,
    pic_info: PicInfo,
    #[serde(default)]
    wb_url: String,
    #[serde(default)]
    uid: Option<LooseId>,
    #[serde(default)]
    description: Option<String>,
}

impl ListItem {
    fn into_descriptor(self, fallback_author: Option<u64>) -> Result<ImageDescriptor> {
        let large = self.pic_info.large;
        let (width, height) = match (large.width, large.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            (Some(w), Some(h)) => {
                return Err(Error::MalformedResponse(format!(
                    "image {} has non-positive dimensions {}x{}",
                    self.pic_id, w, h
                )))
            }
            _ => {
                return Err(Error::MalformedResponse(format!(
                    "image {} is missing large rendition dimensions",
                    self.pic_id
                )))
            }
        };
        Ok(ImageDescriptor {
            id: self.pic_id,
            url: large.url,
            original_url: self.pic_info.original.url,
            width,
            height,
            author_id: self.uid.as_ref().and_then(LooseId::to_u64).or(fallback_author),
            description: self.description.unwrap_or_default(),
            profile_url: self.wb_url,
        })
    }
}

fn parse_authors(records: Vec<ProducerRecord>) -> Result<Vec<Author>> {
    records
        .into_iter()
        .map(|r| {
            let id = r.uid.trim().parse::<u64>().map_err(|_| {
                Error::MalformedResponse(format!("author uid {:?} is not an integer", r.uid))
            })?;
            Ok(Author { id, name: r.name })
        })
        .collect()
}

/// [`ImageSource`] that talks to the image service over HTTP.
pub struct HttpImageSource {
    client: Client,
    base: Url,
    timeout_ms: u64,
}

impl HttpImageSource {
    pub fn new(config: &GalleryConfig) -> Result<Self> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base url {:?}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("{:?} cannot be used as a base url", config.base_url)));
        }
        // Keep any path prefix when joining endpoint names.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        for (k, v) in &config.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| Error::Config(format!("invalid header name {:?}: {}", k, e)))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| Error::Config(format!("invalid header value for {:?}: {}", k, e)))?;
            headers.insert(name, value);
        }
        let ua = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Config(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, ua);

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            timeout_ms: config.timeout_ms,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("invalid endpoint {:?}: {}", path, e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            e.into()
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {}", url);
        let res: Response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Network(format!("GET {} returned {}", url, status)));
        }

        let body = res.bytes().map_err(|e| self.transport_error(e))?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::MalformedResponse(format!("GET {}: {}", url, e)))
    }
}

impl ImageSource for HttpImageSource {
    fn fetch_authors(&self) -> Result<Vec<Author>> {
        let records: Vec<ProducerRecord> = self.get_json(self.endpoint("producers")?, &[])?;
        parse_authors(records)
    }

    fn fetch_images(&self, query: &ImageQuery) -> Result<Vec<ImageDescriptor>> {
        let params = [
            ("uid", query.author_filter().map(|id| id.to_string()).unwrap_or_default()),
            ("limit", query.effective_limit().to_string()),
            ("offset", query.offset.to_string()),
        ];
        let items: Vec<ListItem> = self.get_json(self.endpoint("v2/list")?, &params)?;
        items
            .into_iter()
            .map(|item| item.into_descriptor(query.author_filter()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authors_parse_string_uids() {
        let records: Vec<ProducerRecord> =
            serde_json::from_str(r#"[{"uid":"12","name":"a"},{"uid":" 3 ","name":"b"}]"#).unwrap();
        let authors = parse_authors(records).unwrap();
        assert_eq!(authors[0], Author { id: 12, name: "a".into() });
        assert_eq!(authors[1].id, 3);
    }

    #[test]
    fn non_numeric_uid_is_malformed() {
        let records: Vec<ProducerRecord> =
            serde_json::from_str(r#"[{"uid":"abc","name":"a"}]"#).unwrap();
        assert!(matches!(parse_authors(records), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn list_item_maps_renditions() {
        let item: ListItem = serde_json::from_str(
            r#"{"pic_id":"p1","pic_info":{"large":{"url":"L","width":600,"height":400},
                "original":{"url":"O"}},"wb_url":"W","uid":42}"#,
        )
        .unwrap();
        let d = item.into_descriptor(Some(1)).unwrap();
        assert_eq!(d.id, "p1");
        assert_eq!(d.url, "L");
        assert_eq!(d.original_url, "O");
        assert_eq!((d.width, d.height), (600, 400));
        assert_eq!(d.author_id, Some(42));
        assert_eq!(d.profile_url, "W");
    }

    #[test]
    fn list_item_falls_back_to_query_author() {
        let item: ListItem = serde_json::from_str(
            r#"{"pic_id":"p1","pic_info":{"large":{"url":"L","width":1,"height":1},"original":{"url":"O"}}}"#,
        )
        .unwrap();
        assert_eq!(item.into_descriptor(Some(9)).unwrap().author_id, Some(9));
    }

    #[test]
    fn list_item_without_dimensions_is_malformed() {
        let item: ListItem = serde_json::from_str(
            r#"{"pic_id":"p1","pic_info":{"large":{"url":"L"},"original":{"url":"O"}}}"#,
        )
        .unwrap();
        assert!(matches!(item.into_descriptor(None), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn list_item_with_zero_dimension_is_malformed() {
        let item: ListItem = serde_json::from_str(
            r#"{"pic_id":"z","pic_info":{"large":{"url":"L","width":100,"height":0},"original":{"url":"O"}}}"#,
        )
        .unwrap();
        assert!(matches!(item.into_descriptor(None), Err(Error::MalformedResponse(ref m)) if m.contains("100x0")));

        let item: ListItem = serde_json::from_str(
            r#"{"pic_id":"w","pic_info":{"large":{"url":"L","width":0,"height":80},"original":{"url":"O"}}}"#,
        )
        .unwrap();
        assert!(matches!(item.into_descriptor(None), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let cfg = GalleryConfig {
            base_url: "http://example.com/api".into(),
            ..Default::default()
        };
        let src = HttpImageSource::new(&cfg).unwrap();
        assert_eq!(src.endpoint("v2/list").unwrap().as_str(), "http://example.com/api/v2/list");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let cfg = GalleryConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(HttpImageSource::new(&cfg), Err(Error::Config(_))));
    }
}
