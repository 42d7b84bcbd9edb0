//! Raw authenticated requests against the backend
//!
//! Escape hatch for endpoints without a typed wrapper; goes through the
//! same session-aware client, so the retry contract still applies.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;

use super::{api_client, require_session};

#[derive(Args)]
pub struct RawCommands {
    /// HTTP method
    #[arg(value_enum)]
    pub method: HttpMethod,
    /// Endpoint path, e.g. /exams/
    pub endpoint: String,
    /// JSON body for POST/PUT/PATCH
    #[arg(long)]
    pub data: Option<String>,
    /// Write the response to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

pub async fn raw_command(args: RawCommands) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let (profile, client) = api_client().await?;
    require_session(&profile).await?;

    let body = match args.data.as_deref() {
        Some(data) => Some(
            serde_json::from_str::<serde_json::Value>(data).context("--data must be valid JSON")?,
        ),
        None => None,
    };

    let method = match args.method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    };

    if body.is_none() && matches!(args.method, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch) {
        anyhow::bail!("{:?} requests require --data", args.method);
    }

    let result = client.request(method, &args.endpoint, body).await?;
    let formatted = serde_json::to_string_pretty(&result)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &formatted)
            .with_context(|| format!("Failed to write output to: {}", output_path.display()))?;
        println!(
            "Results saved to: {}",
            output_path.display().to_string().bright_green()
        );
    } else {
        println!("{}", formatted);
    }

    Ok(())
}
