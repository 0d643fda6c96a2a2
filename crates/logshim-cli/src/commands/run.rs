//! Run a child process with its output routed through the console.

use anyhow::{Context, Result};
use logshim_core::{Console, LoggingContext};
use logshim_types::{meta, ConsoleLevel};
use serde_json::Value;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

pub async fn execute(ctx: &LoggingContext, command: &str, args: &[String]) -> Result<i32> {
    ctx.patch_console();
    let console = ctx.console();
    let logger = ctx.logger();

    let status = logger
        .with_timing(
            command,
            || run_child(console, command, args),
            Some(meta! { "args" => args }),
        )
        .await?;

    let code = status.code().unwrap_or(1);
    if !status.success() {
        logger.warn(
            &format!("{} exited unsuccessfully", command),
            Some(meta! { "exitCode" => status.code() }),
        );
    }
    Ok(code)
}

async fn run_child(console: Arc<Console>, command: &str, args: &[String]) -> anyhow::Result<ExitStatus> {
    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {}", command))?;

    let stdout = child.stdout.take().context("child stdout was not captured")?;
    let stderr = child.stderr.take().context("child stderr was not captured")?;

    let (out, err) = tokio::join!(
        forward_lines(stdout, Arc::clone(&console), ConsoleLevel::Log),
        forward_lines(stderr, console, ConsoleLevel::Error),
    );
    out.context("reading child stdout")?;
    err.context("reading child stderr")?;

    Ok(child.wait().await?)
}

async fn forward_lines<R>(reader: R, console: Arc<Console>, method: ConsoleLevel) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        console.call(method, &[Value::String(line)]);
    }
}
