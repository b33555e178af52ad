use std::path::PathBuf;
use std::process::{Command, Output};

use pf_data::PanelTable;

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_panelfit"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

const CONFIG: &str = r#"
project_name = "demo"
input_var = ["inflation", "unemployment"]
output_var = ["approval_index"]
scenario = ["baseline"]

[filter_param]
filter_enable = true
iqr_threshold = 1.5
"#;

/// One group (norway/1/baseline), 30 rows, approval ≈ 1 + 2·inflation.
fn write_fixture(dir: &std::path::Path) {
    let mut table = PanelTable::new(["inflation", "unemployment", "approval_index"]);
    for i in 0..30 {
        let x1 = i as f64 * 0.3;
        let x2 = (i % 7) as f64;
        let noise = ((i * 31 % 13) as f64 - 6.0) * 0.01;
        table
            .push_row("norway", 1, "baseline", &[x1, x2, 1.0 + 2.0 * x1 + noise])
            .unwrap();
    }
    pf_data::write_table(&dir.join("baseline.parquet"), &table).unwrap();
}

const CONFIG_TWO_OUTPUTS: &str = r#"
project_name = "demo"
input_var = ["inflation", "unemployment"]
output_var = ["approval_index", "budget_balance"]
scenario = ["baseline"]

[filter_param]
filter_enable = true
iqr_threshold = 3.0
"#;

/// Two groups (norway/1 and chile/2), 30 rows each, with near-exact
/// linear relations: approval ≈ 1 + 2·inflation, budget ≈ 3 − inflation.
fn write_two_group_fixture(dir: &std::path::Path) {
    let mut table =
        PanelTable::new(["inflation", "unemployment", "approval_index", "budget_balance"]);
    for (country, period) in [("norway", 1), ("chile", 2)] {
        for i in 0..30 {
            let x1 = i as f64 * 0.3;
            let x2 = (i % 7) as f64;
            let noise = ((i * 31 % 13) as f64 - 6.0) * 0.01;
            table
                .push_row(
                    country,
                    period,
                    "baseline",
                    &[x1, x2, 1.0 + 2.0 * x1 + noise, 3.0 - x1 - noise],
                )
                .unwrap();
        }
    }
    pf_data::write_table(&dir.join("baseline.parquet"), &table).unwrap();
}

#[test]
fn regress_writes_cache_and_json() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let cache_dir = tmp.path().join("cache");
    std::fs::create_dir_all(&data_dir).unwrap();
    write_fixture(&data_dir);

    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, CONFIG).unwrap();
    let out_path = tmp.path().join("summaries.json");

    let out = run(&[
        "regress",
        "--config",
        config_path.to_string_lossy().as_ref(),
        "--data-dir",
        data_dir.to_string_lossy().as_ref(),
        "--cache-dir",
        cache_dir.to_string_lossy().as_ref(),
        "--output",
        out_path.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "regress should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    assert!(cache_dir.join("regression.parquet").exists());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    // One group, one output variable.
    assert_eq!(records.len(), 1);
    let r2 = records[0]["r_squared"].as_f64().unwrap();
    assert!(r2 > 0.99, "near-linear fixture should fit tightly, got {r2}");
}

#[test]
fn regress_emits_one_record_per_group_and_output() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let cache_dir = tmp.path().join("cache");
    std::fs::create_dir_all(&data_dir).unwrap();
    write_two_group_fixture(&data_dir);

    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, CONFIG_TWO_OUTPUTS).unwrap();
    let out_path = tmp.path().join("summaries.json");

    let out = run(&[
        "regress",
        "--config",
        config_path.to_string_lossy().as_ref(),
        "--data-dir",
        data_dir.to_string_lossy().as_ref(),
        "--cache-dir",
        cache_dir.to_string_lossy().as_ref(),
        "--output",
        out_path.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "regress should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    // 2 groups x 2 output variables.
    assert_eq!(records.len(), 4);

    for record in records {
        let r2 = record["r_squared"].as_f64().unwrap();
        assert!(r2 > 0.99, "near-linear fixture should fit tightly, got {r2}");

        let coefs = record["coefficients"].as_array().unwrap();
        let inflation = coefs
            .iter()
            .find(|c| c["input_var"] == "inflation")
            .expect("inflation coefficient present");
        let coef = inflation["coef"].as_f64().unwrap();
        let expected = match record["output_var"].as_str().unwrap() {
            "approval_index" => 2.0,
            "budget_balance" => -1.0,
            other => panic!("unexpected output_var {other}"),
        };
        assert!(
            (coef - expected).abs() < 0.05,
            "inflation coef {coef} should be near {expected}"
        );
    }

    // Both groups appear, with both outputs each.
    let norway = records.iter().filter(|r| r["group"]["country"] == "norway").count();
    let chile = records.iter().filter(|r| r["group"]["country"] == "chile").count();
    assert_eq!(norway, 2);
    assert_eq!(chile, 2);
}

#[test]
fn run_renders_charts() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let visual_dir = tmp.path().join("visual");
    let cache_dir = tmp.path().join("cache");
    std::fs::create_dir_all(&data_dir).unwrap();
    write_fixture(&data_dir);

    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, CONFIG).unwrap();

    let out = run(&[
        "run",
        "--config",
        config_path.to_string_lossy().as_ref(),
        "--data-dir",
        data_dir.to_string_lossy().as_ref(),
        "--visual-dir",
        visual_dir.to_string_lossy().as_ref(),
        "--cache-dir",
        cache_dir.to_string_lossy().as_ref(),
        "--cache-filtered",
    ]);
    assert!(
        out.status.success(),
        "run should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    assert!(cache_dir.join("regression.parquet").exists());
    assert!(cache_dir.join("filtered.parquet").exists());
    assert!(visual_dir.join("r-squared/norway_baseline.png").exists());
    assert!(visual_dir.join("approval_index/norway_baseline.png").exists());
}

#[test]
fn viz_renders_from_cached_table() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let cache_dir = tmp.path().join("cache");
    std::fs::create_dir_all(&data_dir).unwrap();
    write_fixture(&data_dir);

    let config_path = tmp.path().join("config.toml");
    std::fs::write(&config_path, CONFIG).unwrap();

    let out = run(&[
        "regress",
        "--config",
        config_path.to_string_lossy().as_ref(),
        "--data-dir",
        data_dir.to_string_lossy().as_ref(),
        "--cache-dir",
        cache_dir.to_string_lossy().as_ref(),
        "--output",
        tmp.path().join("ignored.json").to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success());

    let visual_dir = tmp.path().join("visual");
    let out = run(&[
        "viz",
        "--config",
        config_path.to_string_lossy().as_ref(),
        "--results",
        cache_dir.join("regression.parquet").to_string_lossy().as_ref(),
        "--visual-dir",
        visual_dir.to_string_lossy().as_ref(),
    ]);
    assert!(
        out.status.success(),
        "viz should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(visual_dir.join("r-squared/norway_baseline.png").exists());
}

#[test]
fn version_prints() {
    let out = run(&["version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("panelfit"));
}
