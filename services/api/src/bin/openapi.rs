//! services/api/src/bin/openapi.rs
//!
//! Dumps the REST API's OpenAPI document as pretty-printed JSON.
//!
//! Usage: `openapi [OUTPUT]`. OUTPUT defaults to `openapi.json`.

use api_lib::web::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let document = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&output, document)?;
    println!("Wrote OpenAPI document for ByteMentor to {}", output.display());
    Ok(())
}
