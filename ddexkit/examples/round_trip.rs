//! Detects, decodes and re-encodes DDEX documents, then checks them with the oracle.
//!
//! Run with: `cargo run --example round_trip -- path/to/message.xml [...]`
//!
//! Without arguments the bundled ERN 4.3.2 sample is used. Set `RUST_LOG=debug`
//! to see registry and detection events.

use anyhow::Context;
use ddexkit::oracle::field_coverage;
use ddexkit::prelude::*;
use tracing_subscriber::EnvFilter;

const SAMPLE: &[u8] = include_bytes!("../tests/data/ern432_new_release.xml");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let registry = ddexkit::build_registry()?;
    tracing::info!("Registered: {}", registry.list_registered().join(", "));

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        process(&registry, "bundled sample", SAMPLE)?;
    }
    for path in &paths {
        let xml = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
        process(&registry, path, &xml)?;
    }

    Ok(())
}

fn process(registry: &Registry, name: &str, xml: &[u8]) -> anyhow::Result<()> {
    let detected = registry
        .detect(xml)
        .with_context(|| format!("Failed to detect {name}"))?;
    println!("{name}: {detected}");

    let output = ddexkit::round_trip(registry, xml)?;
    let coverage = field_coverage(&XmlElement::parse(xml)?, &XmlElement::parse(&output)?);
    coverage.log_summary();

    let comparison = ddexkit::verify(registry, xml);
    comparison.log_summary();
    println!(
        "{name}: {} ({} elements, {} attributes, {:.1}% paths preserved)",
        if comparison.success { "lossless" } else { "LOSSY" },
        comparison.original_elements,
        comparison.original_attributes,
        coverage.percentage
    );

    Ok(())
}
