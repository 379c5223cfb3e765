use image::RgbaImage;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

static FLAG_HOST: &str = "https://flagcdn.com/w80";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the size of a downloaded flag.  The 80px wide PNGs are a
/// few kilobytes at most.
const MAX_FLAG_BYTES: u64 = 1 << 20;

/// A decoded flag, flattened onto a white background
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FlagImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl FlagImage {
    pub(crate) fn decode(bytes: &[u8]) -> Result<FlagImage, FlagError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Ok(FlagImage::from_rgba(&rgba))
    }

    fn from_rgba(rgba: &RgbaImage) -> FlagImage {
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity(rgba.as_raw().len() / 4 * 3);
        for px in rgba.pixels() {
            let [r, g, b, a] = px.0;
            rgb.extend([r, g, b].map(|c| over_white(c, a)));
        }
        FlagImage { width, height, rgb }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data as packed 8-bit RGB triples, row by row from the top
    pub(crate) fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = u16::from(channel);
    let a = u16::from(alpha);
    let mixed = (c * a + 255 * (255 - a) + 127) / 255;
    u8::try_from(mixed).unwrap_or(u8::MAX)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FlagLookup {
    Found(Rc<FlagImage>),
    NotFound,
}

impl FlagLookup {
    pub(crate) fn image(&self) -> Option<&FlagImage> {
        match self {
            FlagLookup::Found(img) => Some(img),
            FlagLookup::NotFound => None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum FlagError {
    #[error("invalid country code {0:?}")]
    InvalidCode(String),
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        source: Box<ureq::Error>,
    },
    #[error("failed to read response body from {url}")]
    Body { url: String, source: io::Error },
    #[error("failed to decode flag image")]
    Decode(#[from] image::ImageError),
    #[error("network access is disabled")]
    Offline,
}

impl FlagError {
    /// Whether the failure is a normal outcome of how the program was run,
    /// not worth a warning
    fn is_expected(&self) -> bool {
        matches!(self, FlagError::Offline)
    }
}

/// Downloads the PNG for a country code
pub(crate) trait FetchFlag {
    fn fetch(&self, code: &str) -> Result<Vec<u8>, FlagError>;
}

#[derive(Debug)]
pub(crate) struct HttpFetcher {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpFetcher {
    pub(crate) fn new() -> HttpFetcher {
        HttpFetcher {
            agent: ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build(),
            base_url: String::from(FLAG_HOST),
        }
    }
}

impl FetchFlag for HttpFetcher {
    fn fetch(&self, code: &str) -> Result<Vec<u8>, FlagError> {
        let url = format!("{}/{code}.png", self.base_url);
        tracing::debug!(%url, "Fetching flag");
        let response = self.agent.get(&url).call().map_err(|e| FlagError::Fetch {
            url: url.clone(),
            source: Box::new(e),
        })?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_FLAG_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|source| FlagError::Body { url, source })?;
        Ok(bytes)
    }
}

/// A fetcher for runs without network access
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Offline;

impl FetchFlag for Offline {
    fn fetch(&self, _code: &str) -> Result<Vec<u8>, FlagError> {
        Err(FlagError::Offline)
    }
}

/// Resolves country codes to flag images, trying in turn an in-memory cache,
/// the PNG files in an on-disk cache directory, and finally the network.
///
/// Every code is resolved at most once per `FlagCache`: the outcome, whether
/// an image or a failure, is remembered and returned for later requests.
/// Images fetched over the network are saved to the cache directory so that
/// later runs can work offline.
#[derive(Debug)]
pub(crate) struct FlagCache<F> {
    dir: PathBuf,
    fetcher: F,
    images: HashMap<String, FlagLookup>,
}

impl<F: FetchFlag> FlagCache<F> {
    pub(crate) fn new<P: Into<PathBuf>>(dir: P, fetcher: F) -> Self {
        FlagCache {
            dir: dir.into(),
            fetcher,
            images: HashMap::new(),
        }
    }

    pub(crate) fn get(&mut self, code: &str) -> FlagLookup {
        if let Some(lookup) = self.images.get(code) {
            return lookup.clone();
        }
        let lookup = match self.resolve(code) {
            Ok(img) => FlagLookup::Found(Rc::new(img)),
            Err(e) => {
                let error: &(dyn std::error::Error + 'static) = &e;
                if e.is_expected() {
                    tracing::debug!(code, error, "Flag unavailable");
                } else {
                    tracing::warn!(code, error, "Flag unavailable");
                }
                FlagLookup::NotFound
            }
        };
        self.images.insert(code.to_owned(), lookup.clone());
        lookup
    }

    fn resolve(&self, code: &str) -> Result<FlagImage, FlagError> {
        if !is_country_code(code) {
            return Err(FlagError::InvalidCode(code.to_owned()));
        }
        let path = self.path_for(code);
        match read_cached(&path) {
            Ok(Some(img)) => {
                tracing::debug!(code, path = %path.display(), "Flag found in disk cache");
                return Ok(img);
            }
            Ok(None) => tracing::debug!(code, "Flag not in disk cache"),
            Err(e) => {
                let error: &(dyn std::error::Error + 'static) = &e;
                tracing::debug!(code, error, "Ignoring unusable cached flag");
            }
        }
        let bytes = self.fetcher.fetch(code)?;
        let img = FlagImage::decode(&bytes)?;
        if let Err(e) = self.persist(&path, &bytes) {
            let error: &(dyn std::error::Error + 'static) = &e;
            tracing::warn!(code, error, "Could not save flag to disk cache");
        }
        Ok(img)
    }

    fn path_for(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}.png"))
    }

    fn persist(&self, path: &Path, bytes: &[u8]) -> Result<(), FlagError> {
        fs::create_dir_all(&self.dir).map_err(|source| FlagError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| FlagError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

/// Returns `Ok(None)` if there is no cached file for the code
fn read_cached(path: &Path) -> Result<Option<FlagImage>, FlagError> {
    match fs::read(path) {
        Ok(bytes) => FlagImage::decode(&bytes).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FlagError::Read {
            path: path.to_owned(),
            source,
        }),
    }
}

fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_lowercase())
}
