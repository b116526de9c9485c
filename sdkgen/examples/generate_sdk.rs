//! Generates a Java SDK from a package schema.
//!
//! Run with: `cargo run --example generate_sdk -- schema.json out/`

use anyhow::Context;
use sdkgen::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sdkgen_codegen=info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let schema = PathBuf::from(args.next().context("usage: generate_sdk <schema> [out-dir]")?);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sdk".to_string()));

    let config = GeneratorConfig::builder().tool_name("sdkgen").build();
    let files = generate_from_file(&schema, &config)
        .with_context(|| format!("failed to generate from {}", schema.display()))?;

    for diagnostic in &files.diagnostics {
        println!("[{:?}] {}", diagnostic.severity, diagnostic.summary);
    }
    files
        .write_to(&out_dir)
        .with_context(|| format!("failed to write {}", out_dir.display()))?;
    println!("Wrote {} files to {}", files.len(), out_dir.display());
    Ok(())
}
