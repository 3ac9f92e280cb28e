use std::path::PathBuf;

use rocket::fs::NamedFile;
use rocket::{get, State};

use crate::server::ServerState;

/// Everything the JSON routes don't claim belongs to the single-page app:
/// serve the asset if the build directory has it, otherwise hand back the
/// entry point and let the client router deal with the path. Never a 404.
#[get("/<path..>", rank = 10)]
pub async fn spa_fallback(state: &State<ServerState>, path: PathBuf) -> Option<NamedFile> {
    let asset = state.config.static_dir.join(&path);
    if asset.is_file() {
        return NamedFile::open(asset).await.ok();
    }

    NamedFile::open(state.config.static_dir.join("index.html"))
        .await
        .ok()
}
