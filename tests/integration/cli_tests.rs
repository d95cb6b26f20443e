use clap::Parser;
use hazreg::cli::{Cli, Commands, ExportArgs, ExportFormat, IndexArgs, SourceArgs, SourceMode};
use hazreg::config::Config;
use hazreg::{run_export, run_index};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sds_config(base: &Path) -> Config {
    let root = base.join("sds");
    fs::create_dir_all(root.join("ChemicalsA")).unwrap();
    fs::write(root.join("ChemicalsA/Benzene_MSDS.pdf"), vec![0u8; 2048]).unwrap();
    fs::write(root.join("ChemicalsA/Toluene.pdf"), vec![0u8; 100]).unwrap();
    Config {
        source: SourceMode::Sds,
        document_root: root,
        index_cache: base.join("cache/sds_index.csv"),
        ..Config::default()
    }
}

fn index_args(rebuild: bool, status: bool) -> IndexArgs {
    IndexArgs {
        document_root: None,
        index_cache: None,
        rebuild,
        status,
    }
}

fn run_index_to_string(config: &Config, args: &IndexArgs) -> String {
    let mut out = Vec::new();
    run_index(config, args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_serve_flags() {
    let cli = Cli::try_parse_from([
        "hazreg",
        "-v",
        "serve",
        "--port",
        "8080",
        "--source",
        "sds",
        "--document-root",
        "/srv/sds",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 1);
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.port, Some(8080));
            assert_eq!(args.source.source, Some(SourceMode::Sds));
        }
        _ => panic!("expected serve"),
    }
}

#[test]
fn test_parse_rejects_rebuild_with_status() {
    assert!(Cli::try_parse_from(["hazreg", "index", "--rebuild", "--status"]).is_err());
    assert!(Cli::try_parse_from(["hazreg", "--quiet", "--verbose", "index"]).is_err());
}

#[test]
fn test_index_status_before_and_after_build() {
    let dir = tempdir().unwrap();
    let config = sds_config(dir.path());

    let status = run_index_to_string(&config, &index_args(false, true));
    assert!(status.contains("missing"));
    assert!(!config.index_cache.exists());

    let built = run_index_to_string(&config, &index_args(false, false));
    assert!(built.contains("2 documents -> "));
    assert!(config.index_cache.is_file());

    let status = run_index_to_string(&config, &index_args(false, true));
    assert!(status.contains("built"));
    assert!(status.contains("Rows:   2"));
}

#[test]
fn test_index_skips_built_cache_until_rebuild() {
    let dir = tempdir().unwrap();
    let config = sds_config(dir.path());
    run_index_to_string(&config, &index_args(false, false));

    fs::write(
        config.document_root.join("ChemicalsA/Mercury.pdf"),
        vec![0u8; 10],
    )
    .unwrap();

    let skipped = run_index_to_string(&config, &index_args(false, false));
    assert!(skipped.contains("cache already built (2 entries)"));

    let rebuilt = run_index_to_string(&config, &index_args(true, false));
    assert!(rebuilt.contains("3 documents -> "));
}

#[test]
fn test_index_missing_root_fails() {
    let dir = tempdir().unwrap();
    let config = Config {
        document_root: dir.path().join("absent"),
        index_cache: dir.path().join("idx.csv"),
        ..Config::default()
    };
    let err = run_index(&config, &index_args(false, false), Vec::<u8>::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to index"));
    assert_eq!(
        hazreg::error::ExitCode::for_error(&err),
        hazreg::error::ExitCode::SourceNotFound
    );
}

#[test]
fn test_export_csv_inline() {
    let args = ExportArgs {
        format: ExportFormat::Csv,
        source: SourceArgs::default(),
    };
    let mut out = Vec::new();
    run_export(&Config::default(), &args, &mut out).unwrap();

    let csv = String::from_utf8(out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("MaterialCode,MaterialName,HazardClass,HealthEffects,Regulation")
    );
    assert_eq!(lines.count(), 4);
    assert!(csv.contains("HM-003,Mercury,Toxic,Neurological damage,REACH"));
}

#[test]
fn test_export_json_sds() {
    let dir = tempdir().unwrap();
    let config = sds_config(dir.path());
    let args = ExportArgs {
        format: ExportFormat::Json,
        source: SourceArgs::default(),
    };
    let mut out = Vec::new();
    run_export(&config, &args, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["row_count"], 2);
    assert_eq!(value["columns"][3], "FileSizeKB");
    assert_eq!(value["rows"][0][0], "Benzene MSDS");
    assert_eq!(value["rows"][0][3], "2.0");
    assert_eq!(value["rows"][1][3], "0.1");
}
