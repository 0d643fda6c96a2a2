//! Sanitize stdin.

use anyhow::Result;
use logshim_core::sanitize_str;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn execute() -> Result<i32> {
    let mut reader = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = sanitize_str(&String::from_utf8_lossy(&buf));
        if !line.is_empty() {
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    stdout.flush().await?;
    Ok(0)
}
