//! Public IP lookup and clipboard copy.

use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const TRACE_URL: &str = "https://1.1.1.1/cdn-cgi/trace";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpInfo {
    pub ip: String,
    pub loc: String,
}

/// Pull `ip=` and `loc=` out of a Cloudflare trace body.
pub fn parse_trace(body: &str) -> Option<IpInfo> {
    let field = |name: &str| -> Option<String> {
        let re = Regex::new(&format!(r"(?m)^{}=([^\n]*)$", name)).ok()?;
        re.captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|v| !v.is_empty())
    };

    Some(IpInfo {
        ip: field("ip")?,
        loc: field("loc")?,
    })
}

pub async fn lookup() -> Result<IpInfo> {
    let response = reqwest::get(TRACE_URL).await?;
    if !response.status().is_success() {
        bail!("HTTP error! status: {}", response.status());
    }
    let body = response.text().await?;
    parse_trace(&body).ok_or_else(|| anyhow!("Failed to parse IP information"))
}

fn clipboard_command() -> Result<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        Ok(("pbcopy", &[]))
    } else if cfg!(target_os = "linux") {
        Ok(("xclip", &["-selection", "clipboard"]))
    } else if cfg!(target_os = "windows") {
        Ok(("clip", &[]))
    } else {
        bail!("Unsupported platform")
    }
}

pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    let (program, args) = clipboard_command()?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| anyhow!("Failed to run {}: {}", program, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}
