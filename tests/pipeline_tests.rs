use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use param_hunter::concurrent::{ConcurrentProbe, ProbeRequest};
use param_hunter::output::{read_csv, read_json, write_reports, ReportFormats};
use param_hunter::{extract_params, load_targets, Fetch, ProbeMethod, ProbeResult};
use reqwest::Method;

/// Answers 200 for every URL except those containing "down".
struct MockClient;

#[async_trait]
impl Fetch for MockClient {
    async fn fetch(&self, _method: &Method, url: &str, _body: Option<&str>, _timeout: Duration) -> anyhow::Result<u16> {
        if url.contains("down") {
            anyhow::bail!("error trying to connect: connection refused");
        }
        Ok(200)
    }
}

fn request() -> ProbeRequest {
    ProbeRequest { method: ProbeMethod::Get, body: None, timeout: Duration::from_secs(5) }
}

async fn run(targets: Vec<String>, threads: usize) -> Vec<ProbeResult> {
    let mut results = ConcurrentProbe::new(threads).run(Arc::new(MockClient), targets, &request()).await;
    results.sort_by(|a, b| a.url.cmp(&b.url));
    results
}

#[tokio::test]
async fn end_to_end_with_mock_client() {
    let results = run(
        vec!["https://example.com/?a=1".into(), "https://example.com/nofields".into()],
        10,
    )
    .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url, "https://example.com/?a=1");
    assert_eq!(results[0].params, vec!["a"]);
    assert_eq!(results[1].params, Vec::<String>::new());
    assert!(results.iter().all(|r| r.error.is_none() && r.status == Some(200)));
}

#[tokio::test]
async fn batch_keeps_every_target_including_duplicates() {
    let mut targets: Vec<String> = (0..25).map(|i| format!("https://e.com/p{}?k{}=v", i, i)).collect();
    targets.push("https://e.com/p0?k0=v".into());
    targets.push("https://down.example/?x=1".into());

    let results = run(targets.clone(), 4).await;

    assert_eq!(results.len(), targets.len());
    for r in &results {
        if r.error.is_some() {
            assert_eq!(r.status, None);
            assert!(r.params.is_empty());
        } else {
            let s = r.status.unwrap();
            assert!((100..=599).contains(&s));
        }
    }
    assert_eq!(results.iter().filter(|r| r.url == "https://e.com/p0?k0=v").count(), 2);
    assert_eq!(results.iter().filter(|r| r.error.is_some()).count(), 1);
}

#[test]
fn extract_params_is_pure() {
    let url = "https://e.com/?a=1&b=2&b=3&empty=";
    let first = extract_params(url);
    for _ in 0..5 {
        assert_eq!(extract_params(url), first);
    }
    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["a", "b", "empty"]);
}

#[test]
fn load_targets_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("targets.txt");
    std::fs::write(&path, "# comment\nhttps://a.example/\n\nhttps://b.example/?x=1\n").unwrap();

    let targets = load_targets(&path).unwrap();

    assert_eq!(targets, vec!["https://a.example/", "https://b.example/?x=1"]);
}

#[tokio::test]
async fn reports_round_trip() {
    let mut results = run(
        vec![
            "https://example.com/?a=1&b=2".into(),
            "https://example.com/plain".into(),
            "https://down.example/?z=9".into(),
        ],
        2,
    )
    .await;
    results.push(ProbeResult::failure("https://quoted.example/", "bad \"thing\", with comma", 17));

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("out/results");
    let base = base.to_str().unwrap();
    let written = write_reports(base, &results, ReportFormats { json: true, csv: true }).unwrap();
    assert_eq!(written.len(), 3);

    let from_csv = read_csv(&dir.path().join("out/results.csv")).unwrap();
    assert_eq!(from_csv, results);

    let from_json = read_json(&dir.path().join("out/results.json")).unwrap();
    assert_eq!(from_json, results);

    let txt = std::fs::read_to_string(dir.path().join("out/results.txt")).unwrap();
    assert_eq!(txt.lines().count(), results.len());
    assert!(txt.contains("[+] https://example.com/?a=1&b=2 -> params: a, b (http 200)"));
}

#[test]
fn only_txt_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("results");
    let results = vec![ProbeResult::success("https://a/", 200, Vec::new(), 1)];

    let written = write_reports(base.to_str().unwrap(), &results, ReportFormats::default()).unwrap();

    assert_eq!(written, vec![dir.path().join("results.txt")]);
    assert!(!dir.path().join("results.json").exists());
    assert!(!dir.path().join("results.csv").exists());
}

#[test]
fn unwritable_output_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // a regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();
    let base = blocker.join("results");
    let results = vec![ProbeResult::success("https://a/", 200, Vec::new(), 1)];

    assert!(write_reports(base.to_str().unwrap(), &results, ReportFormats::default()).is_err());
}
