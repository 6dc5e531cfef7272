use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use nestview::entities::{NestingRequest, PlacementResult, Session};
use nestview::io::import::{import_into_session, import_response};
use serde::Serialize;
use svg::Document;

use crate::EPOCH;
use crate::config::CliConfig;

pub mod cli;
pub mod output;

pub fn read_config(path: &Path) -> Result<CliConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("incorrect config file format: {}", path.display()))
}

/// Reads a configuration or piece library into a fresh session.
pub fn read_session(path: &Path) -> Result<Session> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read input file: {}", path.display()))?;
    let mut session = Session::default();
    import_into_session(&mut session, &json)
        .with_context(|| format!("could not import input file: {}", path.display()))?;
    Ok(session)
}

/// Reads a saved service response and resolves it against `request`.
pub fn read_result(path: &Path, request: &NestingRequest) -> Result<PlacementResult> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read result file: {}", path.display()))?;
    import_response(&json, request)
        .with_context(|| format!("could not interpret result file: {}", path.display()))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not open solution file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write solution file: {}", path.display()))?;

    info!("[IO] solution written to {:?}", canonical(path));
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("[IO] svg written to {:?}", canonical(path));
    Ok(())
}

pub fn write_pdf(bytes: &[u8], path: &Path) -> Result<()> {
    fs::write(path, bytes)
        .with_context(|| format!("could not write pdf file: {}", path.display()))?;
    info!("[IO] pdf written to {:?}", canonical(path));
    Ok(())
}

fn canonical(path: &Path) -> std::path::PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        // Add blanket level filter -
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()
        .context("could not initialize logger")?;
    info!(
        "[MAIN] system time: {}",
        jiff::Zoned::now().strftime("%Y-%m-%d %H:%M:%S %Z")
    );
    Ok(())
}
