//! Resolve one node and print it as JSON.

use anyhow::Context;
use confd_resolver::Resolved;
use tracing::debug;

use super::CommandContext;

/// Execute the get command
pub async fn execute(
    segments: Vec<String>,
    compact: bool,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
    let resolved = ctx.conf.get(&segments).await?;

    if resolved.is_missing() {
        ctx.output.warn(&format!(
            "Nothing found for '{}' under {}",
            segments.join("/"),
            ctx.conf.from_path()
        ));
    }

    let rendered =
        render(&resolved, compact).context("Failed to serialize resolved configuration")?;
    debug!("Rendered {} bytes", rendered.len());
    ctx.output.line(&rendered);

    Ok(())
}

/// Serialize a resolution result, `null` when nothing was found
pub fn render(resolved: &Resolved, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(resolved)
    } else {
        serde_json::to_string_pretty(resolved)
    }
}
