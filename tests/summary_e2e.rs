use ptcg_deck_stats::io::parse_deck_texts;
use ptcg_deck_stats::{build_summary, NameCollator, Section, Skeleton};
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ptcg_deck_stats"))
}

fn five_deck_sample() -> String {
    let core = "ポケモン\nピカチュウex\n3\nSV8\n033/106\nサポート\nナンジャモ\n4\nエネルギー\n基本雷エネルギー\n10\n小計\n10\n";
    serde_json::json!({
        "d1": format!("{core}グッズ\nネストボール\n2\n"),
        "d2": format!("{core}グッズ\nネストボール\n2\n"),
        "d3": format!("{core}グッズ\nネストボール\n2\n"),
        "d4": format!("{core}スタジアム\nボウルタウン\n1\n"),
        "d5": core,
    })
    .to_string()
}

#[test]
fn test_two_deck_scenario() {
    let texts = parse_deck_texts(r#"{"A": "ポケモン\nPikachu\n2", "B": "グッズ\nネストボール\n1"}"#).unwrap();

    let doc = build_summary(&texts).unwrap();
    let pikachu = &doc.result.section(Section::Pokemon)[0];

    assert_eq!(doc.result.n, 2);
    assert_eq!(pikachu.name, "Pikachu");
    assert_eq!(pikachu.present, 1);
    assert_eq!(pikachu.avg, 1.0);
    assert_eq!(pikachu.min, 2);
    assert_eq!(pikachu.max, 2);
    assert_eq!(pikachu.counts, vec![2]);
}

#[test]
fn test_five_deck_skeleton() {
    let texts = parse_deck_texts(&five_deck_sample()).unwrap();
    let doc = build_summary(&texts).unwrap();

    let nest_ball = &doc.result.section(Section::Goods)[0];
    assert_eq!(nest_ball.present, 3);
    assert_eq!(nest_ball.avg, 1.2);

    let skeleton = Skeleton::build(&doc.result, 3, &NameCollator::japanese());

    assert_eq!(skeleton.rows(Section::Goods)[0].qty, 1);
    assert!(skeleton.rows(Section::Stadium).is_empty());
    // 3 + 1 + 4 + 10
    assert_eq!(skeleton.total, 18);
    assert_eq!(skeleton.decks.len(), 5);
}

#[test]
fn test_cli_summarize_writes_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("decks.json");
    let output = temp_dir.path().join("out").join("summary.json");
    std::fs::write(&input, five_deck_sample()).unwrap();

    let status = bin()
        .arg("summarize")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();

    assert!(status.success());
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["n"], 5);
}

#[test]
fn test_cli_skeleton_prints_text() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("decks.json");
    let summary = temp_dir.path().join("summary.json");
    std::fs::write(&input, five_deck_sample()).unwrap();

    let status = bin()
        .arg("summarize")
        .arg(&input)
        .arg("-o")
        .arg(&summary)
        .status()
        .unwrap();
    assert!(status.success());

    let output = bin().arg("skeleton").arg(&summary).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("18 cards"));
    assert!(stdout.contains("ナンジャモ"));
}

#[test]
fn test_cli_missing_argument_fails_with_usage() {
    let output = bin().arg("summarize").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_cli_invalid_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("decks.json");
    let output = temp_dir.path().join("summary.json");
    std::fs::write(&input, "not json").unwrap();

    let status = bin()
        .arg("summarize")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}
