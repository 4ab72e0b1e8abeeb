//! Server harness and shared world for the contact form behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` stops the server
//! even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use contact_form::Trace;
use contact_form::domain::SubmissionStore;
use contact_form::inbound::http;
use contact_form::inbound::http::state::HttpState;
use contact_form::inbound::http::static_assets::StaticAssets;
use contact_form::outbound::memory::InMemorySubmissionRepository;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct ContactFormWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) repository: Arc<InMemorySubmissionRepository>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_content_type: Option<String>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_text: String,
}

pub(crate) type SharedWorld = Rc<RefCell<ContactFormWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // The future must not borrow the world; `block_on` runs while it is held.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn spawn_server(
    http_state: HttpState,
    assets: StaticAssets,
) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);
    let assets_data = web::Data::new(assets);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(assets_data.clone())
            .wrap(Trace)
            .configure(http::configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

/// Start a server backed by an in-memory store and the bundled public assets.
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let repository = Arc::new(InMemorySubmissionRepository::default());
    let store = SubmissionStore::new(repository.clone(), Arc::new(DefaultClock));
    let http_state = HttpState::from_service(Arc::new(store));
    let assets = StaticAssets::open(&Path::new(env!("CARGO_MANIFEST_DIR")).join("public"))
        .expect("public directory");

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_server(http_state, assets) })
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(ContactFormWorld {
            runtime,
            local,
            base_url,
            server,
            repository,
            last_status: None,
            last_content_type: None,
            last_trace_id: None,
            last_body: None,
            last_text: String::new(),
        })),
    }
}
