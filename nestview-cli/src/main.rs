use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use nestview::entities::{NestingRequest, PlacementResult, Session};
use nestview::io::export::{export_configuration, export_result};
use nestview::io::svg::result_to_svgs;
use nestview_cli::config::CliConfig;
use nestview_cli::io::cli::Cli;
use nestview_cli::io::output::NestOutput;
use nestview_cli::io::{read_config, read_result, read_session};
use nestview_cli::report::report_to_svg;
use nestview_cli::{EPOCH, io};
use nestview_client::NestClient;
use thousands::Separable;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => read_config(config_file)?,
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    info!("[MAIN] Successfully parsed CliConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no usable name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let mut session = read_session(&args.input_file)?;
    let token = session.request_token();
    let request = session.build_request();
    info!(
        "[MAIN] {} pieces, {} copies, {} {}² of piece area in a {} × {} {} container",
        request.pieces.len(),
        request.total_copies().separate_with_commas(),
        format!("{:.0}", request.total_piece_area()).separate_with_commas(),
        request.container.unit().symbol(),
        request.container.width(),
        request.container.height(),
        request.container.unit().symbol(),
    );

    let result = match &args.result_file {
        Some(result_file) => {
            info!("[MAIN] using saved response, nothing is submitted");
            read_result(result_file, &request)?
        }
        None => {
            let client = NestClient::new(config.endpoint.clone());
            client.submit_guarded(&request).await?
        }
    };

    if !session.apply_result(token, result.clone()) {
        warn!("[MAIN] session changed during submission, result not kept");
    }

    write_solution(&session, &request, &result, &config, input_stem, &args.solution_folder)?;

    info!("[MAIN] finished in {}ms", EPOCH.elapsed().as_millis());
    Ok(())
}

fn write_solution(
    session: &Session,
    request: &NestingRequest,
    result: &PlacementResult,
    config: &CliConfig,
    input_stem: &str,
    output_folder: &Path,
) -> Result<()> {
    {
        let output = NestOutput {
            configuration: export_configuration(session),
            result: export_result(result),
            config: config.clone(),
        };

        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        let svgs = result_to_svgs(result, &config.svg_draw_options)?;
        for (i, svg) in svgs.iter().enumerate() {
            let svg_path = output_folder.join(format!("sol_{input_stem}_{i}.svg"));

            io::write_svg(svg, Path::new(&svg_path))?;
        }
    }

    if config.svg_report || config.pdf_report {
        let generated_at = jiff::Zoned::now().strftime("%Y-%m-%d %H:%M").to_string();
        let report = report_to_svg(request, result, &config.svg_draw_options, &generated_at)?;

        if config.svg_report {
            let report_path = output_folder.join(format!("report_{input_stem}.svg"));
            io::write_svg(&report, &report_path)?;
        }
        if config.pdf_report {
            write_pdf_report(&report, &output_folder.join(format!("report_{input_stem}.pdf")))?;
        }
    }

    Ok(())
}

#[cfg(feature = "pdf")]
fn write_pdf_report(report: &svg::Document, path: &Path) -> Result<()> {
    let bytes = nestview_cli::report::svg_to_pdf(report)?;
    io::write_pdf(&bytes, path)
}

#[cfg(not(feature = "pdf"))]
fn write_pdf_report(_report: &svg::Document, path: &Path) -> Result<()> {
    warn!(
        "[MAIN] built without the pdf feature, skipping {}",
        path.display()
    );
    Ok(())
}
