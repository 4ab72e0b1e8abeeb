//! Static asset serving from a capability-scoped public directory.
//!
//! Files are read through a `cap_std` [`Dir`], so absolute paths, `..`
//! segments and symlinks that leave the directory fail to open. Every failure
//! is answered with 404.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, web};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

/// Page served for `GET /`.
pub const INDEX_FILE: &str = "index.html";

/// Handle to the public directory.
#[derive(Clone)]
pub struct StaticAssets {
    dir: Arc<Dir>,
}

impl StaticAssets {
    /// Open `root` as the public directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when `root` does not exist or is not a directory.
    pub fn open(root: &Path) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self::from_dir(dir))
    }

    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn read(&self, path: String) -> io::Result<Vec<u8>> {
        let dir = Arc::clone(&self.dir);
        web::block(move || dir.read(path))
            .await
            .map_err(io::Error::other)?
    }

    /// Serve `path` relative to the public directory.
    pub async fn respond(&self, path: &str) -> HttpResponse {
        let relative = path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            INDEX_FILE
        } else {
            relative
        };

        match self.read(relative.to_owned()).await {
            Ok(bytes) => HttpResponse::Ok()
                .insert_header(content_type_for(relative))
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .body(bytes),
            Err(error) => {
                debug!(path = relative, %error, "static asset not served");
                HttpResponse::NotFound()
                    .content_type(ContentType::plaintext())
                    .body("Not Found")
            }
        }
    }
}

fn content_type_for(path: &str) -> ContentType {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => ContentType::html(),
        Some("js" | "mjs") => ContentType(mime_type("text/javascript; charset=utf-8")),
        Some("css") => ContentType(mime_type("text/css; charset=utf-8")),
        Some("json") => ContentType::json(),
        Some("svg") => ContentType(mime_type("image/svg+xml")),
        Some("png") => ContentType::png(),
        Some("jpg" | "jpeg") => ContentType::jpeg(),
        Some("ico") => ContentType(mime_type("image/x-icon")),
        Some("txt") => ContentType::plaintext(),
        _ => ContentType::octet_stream(),
    }
}

fn mime_type(value: &str) -> actix_web::mime::Mime {
    value
        .parse()
        .unwrap_or(actix_web::mime::APPLICATION_OCTET_STREAM)
}

/// Serve the form page.
#[get("/")]
pub async fn index(assets: web::Data<StaticAssets>) -> HttpResponse {
    assets.respond(INDEX_FILE).await
}

/// Serve any other file under the public directory.
///
/// Registered last so API routes take precedence.
#[get("/{path:.*}")]
pub async fn asset(assets: web::Data<StaticAssets>, path: web::Path<String>) -> HttpResponse {
    assets.respond(&path.into_inner()).await
}
