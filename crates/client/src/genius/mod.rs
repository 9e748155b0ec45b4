//! Genius API client.
//!
//! Provides typed access to the official API plus lyric retrieval from the
//! public song pages.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://api.genius.com` (albums by artist come from
//!   `https://genius.com/api`)
//! - **Authentication**: `Authorization: Bearer <token>` on API calls; song
//!   pages are fetched without credentials.
//! - **Rate Limiting**: 429/1015 responses are retried indefinitely after the
//!   `Retry-After` delay (see [`crate::fetch`]).
//! - **Pagination**: collection endpoints are walked with [`paginate`].
//! - **Lyrics**: extracted from song page markup (see [`crate::extract`]).

pub mod error;
pub mod pagination;
pub mod request;
pub mod response;

pub use error::GeniusError;
pub use pagination::{PageCursor, PageSource, PageTarget, paginate};
pub use request::{Collection, SongSort, TextFormat};
pub use response::{
    Account, Album, AlbumTrack, Annotation, Artist, HitKind, HitResult, Page, SearchHit, SearchSection,
    SearchSections, Song,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::extract::LyricsExtractor;
use crate::fetch::{FetchClient, FetchConfig, RequestDescriptor};
use request::join_url;
use response::{
    AccountPayload, AlbumPayload, AlbumsPage, AnnotationPayload, ArtistPayload, Envelope, PagePayload,
    SearchPayload, SongPayload, SongsPage, TracksPage,
};
use versefetch_core::AppConfig;

/// Default base URL for the official API.
const DEFAULT_API_BASE_URL: &str = "https://api.genius.com";

/// Default base URL for the website's API.
const DEFAULT_WEB_API_BASE_URL: &str = "https://genius.com/api";

/// Largest page the collection endpoints accept.
const DEFAULT_PER_PAGE: u32 = 50;

/// Genius client configuration.
#[derive(Debug, Clone)]
pub struct GeniusConfig {
    /// Bearer token for the official API.
    pub access_token: String,
    /// Base URL (default: https://api.genius.com).
    pub api_base_url: String,
    /// Website API base URL (default: https://genius.com/api).
    pub web_api_base_url: String,
    /// Page size ceiling for collections (default: 50).
    pub per_page: u32,
    /// Transport settings.
    pub fetch: FetchConfig,
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_api_base_url: DEFAULT_WEB_API_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            fetch: FetchConfig::default(),
        }
    }
}

impl GeniusConfig {
    /// Build from the layered application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeniusError> {
        let access_token = config.require_access_token().map_err(|_| GeniusError::MissingToken)?.to_string();

        Ok(Self {
            access_token,
            api_base_url: config.api_base_url.clone(),
            web_api_base_url: config.web_api_base_url.clone(),
            per_page: config.per_page,
            fetch: FetchConfig::from(config),
        })
    }
}

/// Genius API client.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    fetch: FetchClient,
    config: GeniusConfig,
    extractor: LyricsExtractor,
    cancel: CancellationToken,
}

impl GeniusClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeniusConfig) -> Result<Self, GeniusError> {
        if config.access_token.trim().is_empty() {
            return Err(GeniusError::MissingToken);
        }

        let fetch = FetchClient::new(config.fetch.clone())?;

        Ok(Self { fetch, config, extractor: LyricsExtractor::new(), cancel: CancellationToken::new() })
    }

    /// Create a client from the layered application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeniusError> {
        Self::new(GeniusConfig::from_app_config(config)?)
    }

    /// Abandon in-flight requests and backoff waits when `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Replace the lyrics extractor (e.g. to change the locate strategy).
    pub fn with_extractor(mut self, extractor: LyricsExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &GeniusConfig {
        &self.config
    }

    fn api_request(&self, path: &str) -> RequestDescriptor {
        RequestDescriptor::get(join_url(&self.config.api_base_url, path)).bearer(self.config.access_token.as_str())
    }

    /// Execute an authenticated request and decode the envelope's payload.
    async fn get_payload<T: DeserializeOwned>(&self, request: RequestDescriptor, context: &str) -> Result<T, GeniusError> {
        let bytes = self.fetch.execute(&request, &self.cancel).await?;

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| GeniusError::Decode { context: context.to_string(), message: e.to_string() })?;

        envelope.response.ok_or_else(|| GeniusError::NotFound { resource: context.to_string() })
    }

    /// Current user account.
    pub async fn account(&self) -> Result<Account, GeniusError> {
        let context = "account";
        let payload: AccountPayload = self.get_payload(self.api_request("/account/"), context).await?;
        payload.user.ok_or_else(|| GeniusError::NotFound { resource: context.to_string() })
    }

    /// Artist metadata.
    pub async fn artist(&self, id: u64, format: TextFormat) -> Result<Artist, GeniusError> {
        let context = format!("artist {id}");
        let request = self.api_request(&format!("/artists/{id}")).query("text_format", format);
        let payload: ArtistPayload = self.get_payload(request, &context).await?;
        payload.artist.ok_or(GeniusError::NotFound { resource: context })
    }

    /// Song metadata, without lyrics.
    pub async fn song(&self, id: u64, format: TextFormat) -> Result<Song, GeniusError> {
        let context = format!("song {id}");
        let request = self.api_request(&format!("/songs/{id}")).query("text_format", format);
        let payload: SongPayload = self.get_payload(request, &context).await?;
        payload.song.ok_or(GeniusError::NotFound { resource: context })
    }

    /// Song metadata with lyrics scraped from its page.
    pub async fn song_with_lyrics(&self, id: u64) -> Result<Song, GeniusError> {
        let mut song = self.song(id, TextFormat::Dom).await?;
        let lyrics = self.lyrics(&song.url).await?;
        song.lyrics = Some(lyrics);
        Ok(song)
    }

    /// Album metadata, optionally with its full track list.
    pub async fn album(&self, id: u64, with_tracks: bool, format: TextFormat) -> Result<Album, GeniusError> {
        let context = format!("album {id}");
        let request = self.api_request(&format!("/albums/{id}")).query("text_format", format);
        let payload: AlbumPayload = self.get_payload(request, &context).await?;
        let mut album = payload.album.ok_or(GeniusError::NotFound { resource: context })?;

        if with_tracks {
            album.tracks = self.album_tracks(id).await?;
        }

        Ok(album)
    }

    /// Annotation with its body in the requested format.
    pub async fn annotation(&self, id: u64, format: TextFormat) -> Result<Annotation, GeniusError> {
        let context = format!("annotation {id}");
        let request = self.api_request(&format!("/annotations/{id}")).query("text_format", format);
        let payload: AnnotationPayload = self.get_payload(request, &context).await?;
        payload.annotation.ok_or(GeniusError::NotFound { resource: context })
    }

    /// Songs by an artist, either exactly `target` many or all of them.
    pub async fn artist_songs(&self, id: u64, sort: SongSort, target: PageTarget) -> Result<Vec<Song>, GeniusError> {
        let pages = CollectionPages::<SongsPage>::new(self, Collection::ArtistSongs { sort }, id);
        paginate(&pages, self.config.per_page, target).await
    }

    /// Every album by an artist.
    pub async fn artist_albums(&self, id: u64) -> Result<Vec<Album>, GeniusError> {
        let pages = CollectionPages::<AlbumsPage>::new(self, Collection::ArtistAlbums, id);
        paginate(&pages, self.config.per_page, PageTarget::All).await
    }

    /// Every track of an album.
    pub async fn album_tracks(&self, id: u64) -> Result<Vec<AlbumTrack>, GeniusError> {
        let pages = CollectionPages::<TracksPage>::new(self, Collection::AlbumTracks, id);
        paginate(&pages, self.config.per_page, PageTarget::All).await
    }

    /// Flat search over songs.
    pub async fn search(&self, q: &str) -> Result<Vec<SearchHit>, GeniusError> {
        request::validate_query(q)?;
        let request = self.api_request("/search").query("q", q);
        let payload: SearchPayload = self.get_payload(request, &format!("search {q:?}")).await?;
        Ok(payload.hits)
    }

    /// Search grouped into typed sections (songs, artists, albums, ...).
    pub async fn search_multi(&self, q: &str, per_page: u32) -> Result<SearchSections, GeniusError> {
        request::validate_query(q)?;
        let request = self.api_request("/search/multi").query("per_page", per_page).query("q", q);
        self.get_payload(request, &format!("multi search {q:?}")).await
    }

    /// Lyric text of a song page.
    ///
    /// The page is fetched without credentials and handed to the extractor.
    pub async fn lyrics(&self, page_url: &str) -> Result<String, GeniusError> {
        fetch_lyrics(&self.fetch, &self.extractor, page_url, &self.cancel).await
    }
}

/// Fetch a song page without credentials and extract its lyrics.
///
/// Usable without an API token, since song pages are public.
pub async fn fetch_lyrics(
    fetch: &FetchClient, extractor: &LyricsExtractor, page_url: &str, cancel: &CancellationToken,
) -> Result<String, GeniusError> {
    let parsed =
        Url::parse(page_url.trim()).map_err(|e| GeniusError::InvalidInput(format!("invalid song page url: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GeniusError::InvalidInput(format!("unsupported scheme: {}", parsed.scheme())));
    }

    let html = fetch.execute(&RequestDescriptor::get(parsed.as_str()), cancel).await?;
    let lyrics = extractor.extract(&html)?;

    tracing::debug!(url = page_url, chars = lyrics.len(), "extracted lyrics");

    Ok(lyrics)
}

/// Pages of one collection, decoded through payload type `P`.
struct CollectionPages<'a, P> {
    client: &'a GeniusClient,
    collection: Collection,
    id: u64,
    _payload: PhantomData<fn() -> P>,
}

impl<'a, P> CollectionPages<'a, P> {
    fn new(client: &'a GeniusClient, collection: Collection, id: u64) -> Self {
        Self { client, collection, id, _payload: PhantomData }
    }
}

#[async_trait]
impl<P: PagePayload> PageSource for CollectionPages<'_, P> {
    type Item = P::Item;

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page<P::Item>, GeniusError> {
        let config = &self.client.config;
        let request = self
            .collection
            .page_request(&config.api_base_url, &config.web_api_base_url, self.id, per_page, page)
            .bearer(config.access_token.as_str());

        let context = format!("{} (page {page})", self.collection.label(self.id));
        let payload: P = self.client.get_payload(request, &context).await?;
        Ok(payload.into_page())
    }
}
