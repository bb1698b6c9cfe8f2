//! End-to-end tests for the `gv` subcommand handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gv_cli::attest::{run_attest, AttestArgs};
use gv_cli::check::{check, run_check, CheckArgs};
use gv_cli::datasets::run_datasets;
use gv_cli::hash::{compute_hash, HashArgs};
use gv_cli::source::PortfolioSource;
use gv_cli::validate::{run_validate, ValidateArgs};
use gv_cli::{EXIT_FAILED, EXIT_OK};

fn loan_json(id: &str, dpd: u32, band: &str) -> String {
    format!(
        r#"{{"loan_id": "{id}", "ref": "REF-{id}", "days_past_due": {dpd}, "valuation_band": "{band}", "covenant_flags": [], "payment_history_summary": "payments on time", "redacted_borrower_id": "B-xxx-01"}}"#
    )
}

fn write_portfolio(dir: &Path, id: &str, loans: &[String]) -> PathBuf {
    let path = dir.join(format!("{id}.json"));
    let doc = format!(
        r#"{{"portfolio_id": "{id}", "name": "Test Tape", "as_of": "2026-02-01", "loans": [{}]}}"#,
        loans.join(",")
    );
    std::fs::write(&path, doc).unwrap();
    path
}

fn validate_args(source: PortfolioSource) -> ValidateArgs {
    ValidateArgs {
        source,
        json: false,
        out: None,
    }
}

fn attest_args(source: PortfolioSource) -> AttestArgs {
    AttestArgs {
        source,
        claim: None,
        offline: false,
        out: None,
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// datasets / validate
// ---------------------------------------------------------------------------

#[test]
fn datasets_lists_bundled_tapes() {
    assert_eq!(run_datasets().unwrap(), EXIT_OK);
}

#[test]
fn validate_healthy_dataset_passes() {
    let code = run_validate(&validate_args(PortfolioSource::dataset("healthy-1"))).unwrap();
    assert_eq!(code, EXIT_OK);
}

#[test]
fn validate_distressed_dataset_fails_policy() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");
    let args = ValidateArgs {
        source: PortfolioSource::dataset("distressed-1"),
        json: true,
        out: Some(out.clone()),
    };
    assert_eq!(run_validate(&args).unwrap(), EXIT_FAILED);

    let report = read_json(&out);
    assert_eq!(report["summary"]["passed"], false);
    let breaching = report["breachingLoans"].as_array().unwrap();
    assert!(!breaching.is_empty());
    assert_eq!(breaching[0], "L-0101");
}

#[test]
fn validate_file_at_threshold_passes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_portfolio(
        dir.path(),
        "edge-1",
        &[loan_json("L-1", 90, "95-98"), loan_json("L-2", 0, "100")],
    );
    let code = run_validate(&validate_args(PortfolioSource::file(path))).unwrap();
    assert_eq!(code, EXIT_OK);
}

#[test]
fn validate_file_with_bad_band_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_portfolio(dir.path(), "bad-1", &[loan_json("L-1", 0, "lots")]);
    let err = run_validate(&validate_args(PortfolioSource::file(path))).unwrap_err();
    assert!(format!("{err:#}").contains("valuation_band"));
}

#[test]
fn unknown_dataset_is_an_error() {
    let err = run_validate(&validate_args(PortfolioSource::dataset("nope-9"))).unwrap_err();
    assert!(err.to_string().contains("nope-9"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = PortfolioSource::file(dir.path().join("absent.json"));
    assert!(run_validate(&validate_args(source)).is_err());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = run_validate(&validate_args(PortfolioSource::file(path))).unwrap_err();
    assert!(format!("{err:#}").contains("failed to ingest"));
}

// ---------------------------------------------------------------------------
// hash
// ---------------------------------------------------------------------------

#[test]
fn hash_with_pinned_summary_matches_known_vector() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_portfolio(
        dir.path(),
        "healthy-1",
        &[loan_json("L-0001", 0, "98-100"), loan_json("L-0002", 5, "100")],
    );
    let summary = dir.path().join("summary.json");
    std::fs::write(
        &summary,
        r#"{"passed":true,"totalLoans":2,"loansOver90":0,"navEstimate":199000000,"timestamp":"2026-02-01T12:00:00Z"}"#,
    )
    .unwrap();

    let (hash, _) = compute_hash(&HashArgs {
        source: PortfolioSource::file(tape),
        summary: Some(summary),
    })
    .unwrap();
    assert_eq!(
        hash.as_str(),
        "22097e90b877e078ece38d03a2fa5fc19894b2cff77f9913ad99f760d1d4ecc1"
    );
}

#[test]
fn hash_without_summary_validates_first() {
    let (hash, summary) = compute_hash(&HashArgs {
        source: PortfolioSource::dataset("healthy-1"),
        summary: None,
    })
    .unwrap();
    assert!(summary.passed);
    assert_eq!(hash.as_str().len(), 64);
}

#[test]
fn hash_with_unparseable_summary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let summary = dir.path().join("summary.json");
    std::fs::write(&summary, r#"{"passed":"maybe"}"#).unwrap();
    let result = compute_hash(&HashArgs {
        source: PortfolioSource::dataset("healthy-1"),
        summary: Some(summary),
    });
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// attest
// ---------------------------------------------------------------------------

#[test]
fn attest_healthy_dataset_verifies_and_exports_evidence() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("evidence.json");
    let args = AttestArgs {
        out: Some(out.clone()),
        ..attest_args(PortfolioSource::dataset("healthy-1"))
    };
    assert_eq!(run_attest(&args, Duration::ZERO).unwrap(), EXIT_OK);

    let evidence = read_json(&out);
    let proof_id = evidence["proofId"].as_str().unwrap();
    assert!(proof_id.starts_with("GV-"));
    assert!(!proof_id.starts_with("GV-OFFLINE-"));
    assert_eq!(evidence["claim"], "No loan > 90 days past due");
    assert_eq!(evidence["sampleRows"].as_array().unwrap().len(), 3);
}

#[test]
fn attest_distressed_dataset_exits_with_policy_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("evidence.json");
    let args = AttestArgs {
        out: Some(out.clone()),
        ..attest_args(PortfolioSource::dataset("distressed-1"))
    };
    assert_eq!(run_attest(&args, Duration::ZERO).unwrap(), EXIT_FAILED);

    let evidence = read_json(&out);
    assert_eq!(evidence["claim"], "Validation Failed");
    assert_eq!(evidence["validationSummary"]["passed"], false);
}

#[test]
fn attest_uses_custom_claim() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("evidence.json");
    let args = AttestArgs {
        claim: Some("Quarterly covenant check".to_string()),
        out: Some(out.clone()),
        ..attest_args(PortfolioSource::dataset("healthy-1"))
    };
    assert_eq!(run_attest(&args, Duration::ZERO).unwrap(), EXIT_OK);
    assert_eq!(read_json(&out)["claim"], "Quarterly covenant check");
}

#[test]
fn attest_offline_writes_local_record() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("record.json");
    let args = AttestArgs {
        offline: true,
        out: Some(out.clone()),
        ..attest_args(PortfolioSource::dataset("healthy-1"))
    };
    assert_eq!(run_attest(&args, Duration::ZERO).unwrap(), EXIT_OK);

    let record = read_json(&out);
    assert!(record["proofId"].as_str().unwrap().starts_with("GV-OFFLINE-"));
    assert_eq!(record["generatedBy"], "GlassVault Local Agent");
    assert!(record.get("sampleRows").is_none());
}

#[test]
fn attest_file_portfolio_exports_its_own_sample_rows() {
    let dir = tempfile::tempdir().unwrap();
    let tape = write_portfolio(
        dir.path(),
        "custom-7",
        &[loan_json("L-1", 3, "100"), loan_json("L-2", 12, "95-98")],
    );
    let out = dir.path().join("evidence.json");
    let args = AttestArgs {
        out: Some(out.clone()),
        ..attest_args(PortfolioSource::file(tape))
    };
    assert_eq!(run_attest(&args, Duration::ZERO).unwrap(), EXIT_OK);

    let evidence = read_json(&out);
    assert_eq!(evidence["portfolio_id"], "custom-7");
    let rows = evidence["sampleRows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

/// Attest `source` offline and return the written record path.
fn offline_record(dir: &Path, source: PortfolioSource) -> PathBuf {
    let out = dir.join("record.json");
    let args = AttestArgs {
        offline: true,
        out: Some(out.clone()),
        ..attest_args(source)
    };
    run_attest(&args, Duration::ZERO).unwrap();
    out
}

#[test]
fn check_offline_record_against_same_dataset_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let record = offline_record(dir.path(), PortfolioSource::dataset("healthy-1"));
    let args = CheckArgs {
        source: PortfolioSource::dataset("healthy-1"),
        record,
        summary: None,
    };
    assert_eq!(check(&args).unwrap().status(), "verified");
    assert_eq!(run_check(&args).unwrap(), EXIT_OK);
}

#[test]
fn check_detects_changed_days_past_due() {
    let dir = tempfile::tempdir().unwrap();
    let loans = [loan_json("L-1", 3, "100"), loan_json("L-2", 12, "95-98")];
    let tape = write_portfolio(dir.path(), "custom-9", &loans);
    let record = offline_record(dir.path(), PortfolioSource::file(&tape));

    let args = CheckArgs {
        source: PortfolioSource::file(&tape),
        record,
        summary: None,
    };
    assert_eq!(run_check(&args).unwrap(), EXIT_OK);

    write_portfolio(
        dir.path(),
        "custom-9",
        &[loan_json("L-1", 3, "100"), loan_json("L-2", 13, "95-98")],
    );
    assert_eq!(check(&args).unwrap().status(), "mismatch");
    assert_eq!(run_check(&args).unwrap(), EXIT_FAILED);
}

#[test]
fn check_rejects_subsecond_summary_override() {
    let dir = tempfile::tempdir().unwrap();
    let record = offline_record(dir.path(), PortfolioSource::dataset("healthy-1"));
    let held = read_json(&record);
    let mut summary = held["validationSummary"].clone();
    let issued = summary["timestamp"].as_str().unwrap().to_string();
    summary["timestamp"] = serde_json::json!(issued.replace('Z', ".999Z"));
    let summary_path = dir.path().join("summary.json");
    std::fs::write(&summary_path, summary.to_string()).unwrap();

    let args = CheckArgs {
        source: PortfolioSource::dataset("healthy-1"),
        record,
        summary: Some(summary_path),
    };
    let err = check(&args).unwrap_err();
    assert!(format!("{err:#}").contains("not canonical"));
}

#[test]
fn check_with_malformed_record_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("record.json");
    std::fs::write(&record, r#"{"proofId": "GV-OFFLINE-0001"}"#).unwrap();
    let args = CheckArgs {
        source: PortfolioSource::dataset("healthy-1"),
        record,
        summary: None,
    };
    assert!(run_check(&args).is_err());
}
