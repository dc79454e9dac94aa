use anyhow::Result;

use crate::cli::client::ApiClient;
use crate::cli::search::{interactive, render_results};
use crate::cli::OutputFormat;

/// One-shot search when a query is given; otherwise interactive
/// search-as-you-type with debounce and stale-response dropping
pub async fn handle(
    client: ApiClient,
    query: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    match query {
        Some(query) => {
            let results = if query.is_empty() {
                Vec::new()
            } else {
                client.search_exercises(query).await?
            };
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Text => render_results(&results),
            }
            Ok(())
        }
        None => interactive(client).await,
    }
}
