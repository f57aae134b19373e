//! End-to-end HTTP API tests: spawn `sbd serve` against a temp config and
//! exercise the routes with a blocking client.

use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;
use tempfile::TempDir;

const BIND: &str = "127.0.0.1:7417";

fn sbd_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sbd");
    path
}

struct ServerGuard {
    child: Child,
    _tmp: TempDir,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn base_url(path: &str) -> String {
    format!("http://{}{}", BIND, path)
}

fn start_server() -> ServerGuard {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("studybuddy.toml");
    fs::write(
        &config_path,
        format!(
            "[server]\nbind = \"{}\"\n\n[generator]\nprovider = \"disabled\"\n",
            BIND
        ),
    )
    .unwrap();

    let child = Command::new(sbd_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("serve")
        .spawn()
        .expect("failed to spawn sbd serve");

    let guard = ServerGuard { child, _tmp: tmp };

    // Wait for the server to come up
    let client = reqwest::blocking::Client::new();
    for _ in 0..50 {
        if let Ok(resp) = client.get(base_url("/health")).send() {
            if resp.status().is_success() {
                return guard;
            }
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("server did not become healthy");
}

const NOTES: &str = "Photosynthesis converts light energy into chemical energy. \
Chlorophyll absorbs mostly red and blue wavelengths of light. \
The light reactions take place in the thylakoid membranes. \
The Calvin cycle fixes carbon dioxide into sugar molecules. \
Stomata regulate gas exchange on the underside of leaves. \
C4 plants concentrate carbon dioxide to reduce photorespiration.";

/// One server instance covers all route assertions: the store and the
/// feedback log are process state, so ordering within this test is part of
/// what is being verified.
#[test]
fn test_api_round_trip() {
    let _guard = start_server();
    let client = reqwest::blocking::Client::new();

    // Health
    let health: serde_json::Value = client
        .get(base_url("/health"))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(health["status"], "ok");

    // Upload a plain-text document
    let form = reqwest::blocking::multipart::Form::new().part(
        "file",
        reqwest::blocking::multipart::Part::bytes(NOTES.as_bytes().to_vec())
            .file_name("biology.txt"),
    );
    let upload: serde_json::Value = client
        .post(base_url("/api/upload"))
        .multipart(form)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(upload["id"], "doc_1");
    assert_eq!(upload["name"], "biology.txt");

    // Empty upload is rejected before reaching the pipeline
    let empty_form = reqwest::blocking::multipart::Form::new().part(
        "file",
        reqwest::blocking::multipart::Part::bytes(Vec::new()).file_name("empty.txt"),
    );
    let resp = client
        .post(base_url("/api/upload"))
        .multipart(empty_form)
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let err: serde_json::Value = resp.json().unwrap();
    assert_eq!(err["error"]["code"], "bad_request");

    // Listing shows exactly the one successful upload
    let docs: serde_json::Value = client
        .get(base_url("/api/docs"))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(docs.as_array().unwrap().len(), 1);
    assert_eq!(docs[0]["name"], "biology.txt");

    // Simple summary over the uploaded document: first sentences, bulleted,
    // in order, from the local pipeline (remote generator disabled)
    let query: serde_json::Value = client
        .post(base_url("/api/query"))
        .json(&serde_json::json!({
            "prompt": "summarize this",
            "docs": ["biology.txt"],
            "mode": "summarize",
            "style": "simple"
        }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    let answer = query["answer"].as_str().unwrap();
    let bullets: Vec<&str> = answer.lines().filter(|l| l.starts_with("• ")).collect();
    assert_eq!(bullets.len(), 5);
    assert!(bullets[0].contains("Photosynthesis converts"));
    assert!(bullets[4].contains("Stomata regulate"));
    assert_eq!(query["sources"][0], "biology.txt");

    // No selected documents → explanatory answer, not an error
    let query: serde_json::Value = client
        .post(base_url("/api/query"))
        .json(&serde_json::json!({
            "prompt": "summarize this",
            "docs": ["missing.txt"],
            "mode": "summarize"
        }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(query["answer"], "No documents selected for summarization.");

    // Planner mode parses topic and duration out of the prompt
    let query: serde_json::Value = client
        .post(base_url("/api/query"))
        .json(&serde_json::json!({
            "prompt": "Create a 7-day study plan for learning: Botany",
            "docs": [],
            "mode": "planner"
        }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    let answer = query["answer"].as_str().unwrap();
    assert!(answer.contains("7-Day Study Plan: Botany"));
    assert!(answer.contains("PHASE 1: FUNDAMENTALS"));

    // Quiz from raw text
    let quiz: serde_json::Value = client
        .post(base_url("/api/quiz"))
        .json(&serde_json::json!({ "text": NOTES, "num_questions": 3 }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    let items = quiz["quiz"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["answer"], "A");

    // Empty quiz text → 400
    let resp = client
        .post(base_url("/api/quiz"))
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    // Flashcards from raw text
    let cards: serde_json::Value = client
        .post(base_url("/api/flashcards"))
        .json(&serde_json::json!({ "text": NOTES }))
        .send()
        .unwrap()
        .json()
        .unwrap();
    let cards = cards["flashcards"].as_array().unwrap();
    assert_eq!(cards.len(), 6);
    assert!(cards[0]["front"].as_str().unwrap().starts_with("What about: "));

    // Feedback appends and reports the running count
    for i in 1..=3 {
        let fb: serde_json::Value = client
            .post(base_url("/api/feedback"))
            .json(&serde_json::json!({
                "feature": "quiz",
                "item_name": format!("item-{}", i),
                "thumbs_up": 1,
                "rating": 4
            }))
            .send()
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(fb["count"], i);
        assert_eq!(fb["message"], "Feedback saved successfully");
    }

    let list: serde_json::Value = client
        .get(base_url("/api/feedback"))
        .send()
        .unwrap()
        .json()
        .unwrap();
    let feedbacks = list["feedbacks"].as_array().unwrap();
    assert_eq!(feedbacks.len(), 3);
    assert_eq!(feedbacks[0]["item_name"], "item-1");
    assert_eq!(feedbacks[2]["item_name"], "item-3");

    // A second upload gets the next id
    let form = reqwest::blocking::multipart::Form::new().part(
        "file",
        reqwest::blocking::multipart::Part::bytes(NOTES.as_bytes().to_vec())
            .file_name("again.txt"),
    );
    let upload: serde_json::Value = client
        .post(base_url("/api/upload"))
        .multipart(form)
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(upload["id"], "doc_2");
}
