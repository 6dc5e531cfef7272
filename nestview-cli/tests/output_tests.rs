#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use nestview::io::export::{export_configuration, export_result};
    use nestview::io::svg::SvgDrawOptions;
    use nestview_cli::config::CliConfig;
    use nestview_cli::io::output::NestOutput;
    use nestview_cli::io::{read_config, read_result, read_session, write_json, write_svg};
    use nestview_cli::report::report_to_svg;
    use nestview_client::DEFAULT_ENDPOINT;
    use serde_json::Value;

    const CONFIGURATION: &str = r#"{
        "pieces": [{"id": "rect", "points": [[0, 0], [50, 0], [50, 30], [0, 30]], "quantity": 2}],
        "bin_width": 200,
        "bin_height": 150,
        "unit": "mm",
        "allow_rotation": false
    }"#;

    const RESPONSE: &str = r#"{
        "placed_pieces": [
            {"id": "rect_1", "x": 0, "y": 0, "rotation": 0},
            {"id": "rect_2", "x": 50, "y": 0, "rotation": 0}
        ],
        "bins_used": 1,
        "utilization": 10.0,
        "computation_time": 0.05
    }"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = std::env::temp_dir().join(format!("nestview_cli_{}_{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn empty_config_file_uses_defaults() {
        let dir = scratch_dir("config");
        let path = dir.join("config.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(read_config(&path).unwrap(), CliConfig::default());

        fs::write(&path, r#"{"endpoint": "http://nesting.local/nest", "pdf_report": false}"#)
            .unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.endpoint, "http://nesting.local/nest");
        assert!(!config.pdf_report);
        assert_eq!(config.svg_draw_options, SvgDrawOptions::default());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn default_config_targets_local_service() {
        let config = CliConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.pdf_report);
        assert!(!config.svg_report);
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = scratch_dir("missing");
        let err = read_session(&dir.join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("could not read input file"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn saved_response_flows_into_solution_files() {
        let dir = scratch_dir("solution");
        let input = dir.join("job.json");
        let response = dir.join("response.json");
        fs::write(&input, CONFIGURATION).unwrap();
        fs::write(&response, RESPONSE).unwrap();

        let mut session = read_session(&input).unwrap();
        let token = session.request_token();
        let request = session.build_request();
        assert_eq!(request.total_copies(), 2);
        assert!(!request.rotation.allow_rotation());

        let result = read_result(&response, &request).unwrap();
        assert_eq!(result.summary.total_pieces_placed, 2);
        assert!(session.apply_result(token, result.clone()));

        let output = NestOutput {
            configuration: export_configuration(&session),
            result: export_result(&result),
            config: CliConfig::default(),
        };
        let solution = dir.join("sol_job.json");
        write_json(&output, &solution).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&solution).unwrap()).unwrap();
        assert_eq!(written["pieces"][0]["id"], "rect");
        assert_eq!(written["allow_rotation"], false);
        assert_eq!(written["result"]["summary"]["total_bins"], 1);
        assert_eq!(written["result"]["bins"][0]["placed_pieces"].as_array().unwrap().len(), 2);
        assert_eq!(written["config"]["endpoint"], DEFAULT_ENDPOINT);

        let report = report_to_svg(&request, &result, &SvgDrawOptions::default(), "now").unwrap();
        let report_path = dir.join("report_job.svg");
        write_svg(&report, &report_path).unwrap();
        assert!(fs::read_to_string(&report_path).unwrap().contains("NESTING REPORT"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn report_converts_to_pdf() {
        use nestview::entities::Session;
        use nestview_cli::io::write_pdf;
        use nestview_cli::report::svg_to_pdf;

        let dir = scratch_dir("pdf");
        let request = Session::sample().build_request();
        let result = nestview::io::import::import_response(
            r#"{"placed_pieces": [{"id": "rectangle_1_1", "x": 0, "y": 0}],
                "bins_used": 1, "utilization": 5.0, "computation_time": 0.01}"#,
            &request,
        )
        .unwrap();
        let report = report_to_svg(&request, &result, &SvgDrawOptions::default(), "now").unwrap();

        let bytes = svg_to_pdf(&report).unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let path = dir.join("report.pdf");
        write_pdf(&bytes, &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), bytes);

        fs::remove_dir_all(dir).unwrap();
    }
}
