//! URL-info command implementation.

use std::io::Write;

use anyhow::{Context, Result};
use awis_lib::prelude::*;

/// Fetch URL information and print the raw XML body.
pub(crate) async fn url_info(client: &AwisClient, url: &str, groups: &[String]) -> Result<()> {
    let response = client
        .url_info(url, groups)
        .await
        .with_context(|| format!("url info lookup for {url} failed"))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(response.as_bytes())?;
    if !response.as_bytes().ends_with(b"\n") {
        writeln!(stdout)?;
    }
    Ok(())
}
