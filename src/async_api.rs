use crate::api::HttpImageSource;
use crate::gallery::{ImageQuery, ImageSource};
use crate::layout::{Column, LayoutConfig, WaterfallLayout};
use crate::model::{Author, ImageDescriptor};
use crate::{Error, GalleryConfig, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    FetchAuthors(oneshot::Sender<Result<Vec<Author>>>),
    FetchImages(ImageQuery, oneshot::Sender<Result<Vec<ImageDescriptor>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly gallery client backed by a dedicated worker thread.
///
/// The worker thread owns the blocking `HttpImageSource` and executes
/// commands sent from async tasks, so callers never block a runtime thread
/// on network I/O. Layout happens on the caller's side once a fetch has
/// resolved.
#[derive(Clone)]
pub struct AsyncGallery {
    cmd_tx: Sender<Command>,
    layout: LayoutConfig,
}

impl AsyncGallery {
    /// Create a new client (spawns a background thread that owns the
    /// blocking source).
    pub async fn new(config: Option<GalleryConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let layout = config.layout;

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let source = match HttpImageSource::new(&config) {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::FetchAuthors(resp) => {
                        let _ = resp.send(source.fetch_authors());
                    }
                    Command::FetchImages(query, resp) => {
                        let _ = resp.send(source.fetch_images(&query));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        match init_rx.await {
            Ok(Ok(())) => Ok(Self { cmd_tx, layout }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Other("gallery worker exited during startup".into())),
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Other("gallery worker is closed".into()))?;
        rx.await
            .map_err(|_| Error::Other("gallery worker dropped the request".into()))?
    }

    pub async fn fetch_authors(&self) -> Result<Vec<Author>> {
        self.request(Command::FetchAuthors).await
    }

    pub async fn fetch_images(&self, query: ImageQuery) -> Result<Vec<ImageDescriptor>> {
        self.request(move |tx| Command::FetchImages(query, tx)).await
    }

    /// Fetch one page and lay it out for `container_width`.
    pub async fn fetch_layout(&self, query: ImageQuery, container_width: f64) -> Result<Vec<Column>> {
        let images = self.fetch_images(query).await?;
        let mut pass = WaterfallLayout::for_container(container_width, &self.layout)?;
        pass.extend(images)?;
        Ok(pass.into_columns())
    }

    /// Stop the worker thread. Clones sharing the worker stop working too.
    pub async fn close(self) -> Result<()> {
        self.request(Command::Close).await
    }
}
