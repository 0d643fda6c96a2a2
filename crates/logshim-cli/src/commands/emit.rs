//! Emit a single record.

use anyhow::{bail, Context, Result};
use logshim_core::level::console_level_for;
use logshim_core::LoggingContext;
use logshim_types::{LogLevel, Metadata};
use serde_json::Value;

pub async fn execute(
    ctx: &LoggingContext,
    level: &str,
    message: &str,
    meta: Option<&str>,
) -> Result<i32> {
    let level = parse_level(level)?;
    let meta = meta.map(parse_meta).transpose()?;
    let logger = ctx.logger();

    match level {
        LogLevel::Debug => logger.debug(message, meta),
        LogLevel::Info => logger.info(message, meta),
        LogLevel::Warn => logger.warn(message, meta),
        LogLevel::Error => logger.error(message, None, meta),
    }

    Ok(0)
}

fn parse_level(raw: &str) -> Result<LogLevel> {
    raw.parse::<LogLevel>()
        .or_else(|_| console_level_for(raw))
        .with_context(|| format!("Unknown level '{}'", raw))
}

fn parse_meta(raw: &str) -> Result<Metadata> {
    match serde_json::from_str::<Value>(raw).context("--meta is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("--meta must be a JSON object"),
    }
}
