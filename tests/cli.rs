mod common;

use common::{QedHarness, PASSPHRASE};

#[test]
fn test_first_list_seeds_library() {
    let qed = QedHarness::new();
    assert!(!qed.data_file().exists());

    let out = qed.ok(&["list"]);
    assert!(out.contains("1  The Infinity of Primes"), "{out}");
    assert!(out.contains("2  Euler's Identity"), "{out}");
    assert!(qed.data_file().exists(), "seed should be persisted");

    let stored = std::fs::read_to_string(qed.data_file()).unwrap();
    assert!(stored.contains("\"abstract\""));
    assert!(stored.contains("\"createdAt\""));
}

#[test]
fn test_search_and_tag_filters() {
    let qed = QedHarness::new();

    let out = qed.ok(&["list", "--search", "EULER"]);
    assert!(out.contains("Euler's Identity"));
    assert!(!out.contains("The Infinity of Primes"));
    assert!(out.contains("Showing 1 of 2 proofs"));

    let out = qed.ok(&["list", "--tag", "Classics"]);
    assert!(out.contains("The Infinity of Primes"));
    assert!(out.contains("Showing 1 of 2 proofs in Classics"));

    let out = qed.ok(&["list", "--search", "zzz"]);
    assert!(out.contains("Showing 0 of 2 proofs"));
}

#[test]
fn test_tags_are_sorted_and_unique() {
    let qed = QedHarness::new();
    let out = qed.ok(&["tags"]);
    let tags: Vec<&str> = out.lines().collect();
    assert_eq!(
        tags,
        vec!["Analysis", "Classics", "Complex Numbers", "Number Theory"]
    );
}

#[test]
fn test_list_json_uses_stored_field_names() {
    let qed = QedHarness::new();
    let out = qed.ok(&["list", "--json", "--tag", "Analysis"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "2");
    assert_eq!(records[0]["author"], "Leonhard Euler");
    assert!(records[0]["createdAt"].is_i64());
}

#[test]
fn test_show_typesets_math() {
    let qed = QedHarness::new();
    let out = qed.ok(&["show", "2"]);
    assert!(out.starts_with("Euler's Identity\n"), "{out}");
    assert!(out.contains('π'), "{out}");
    assert!(!out.contains("\\pi"), "{out}");

    let raw = qed.ok(&["show", "2", "--raw"]);
    assert!(raw.contains("\\pi"));
}

#[test]
fn test_show_unknown_id_fails() {
    let qed = QedHarness::new();
    let err = qed.fails(&["show", "missing"]);
    assert!(err.contains("No proof with id 'missing'"), "{err}");
}

#[test]
fn test_mutations_require_passphrase() {
    let qed = QedHarness::new();
    let content = qed.write_file("body.txt", "$x$");

    let err = qed.fails(&[
        "add",
        "--title",
        "T",
        "--content-file",
        content.to_str().unwrap(),
        "--passphrase",
        "letmein",
    ]);
    assert!(err.contains("Incorrect password. Access denied."), "{err}");

    let err = qed.fails(&["delete", "1", "--passphrase", ""]);
    assert!(err.contains("Access denied"));
    assert!(qed.ok(&["list"]).contains("The Infinity of Primes"));
}

#[test]
fn test_add_edit_delete_round_trip() {
    let qed = QedHarness::new();
    let content = qed.write_file("body.txt", "## Claim\n$$a^2 + b^2 = c^2$$\n");

    let id = qed
        .ok(&[
            "add",
            "--title",
            "Pythagoras",
            "--abstract",
            "Right triangles",
            "--tags",
            "Geometry, Classics,",
            "--content-file",
            content.to_str().unwrap(),
            "--passphrase",
            PASSPHRASE,
        ])
        .trim()
        .to_string();
    assert_eq!(id.len(), 7);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));

    // Newest first
    let list = qed.ok(&["list"]);
    assert!(list.starts_with(&format!("{id}  Pythagoras")), "{list}");

    let shown = qed.ok(&["show", &id]);
    assert!(shown.contains("Anonymous"));
    assert!(shown.contains("a² + b² = c²"), "{shown}");

    qed.ok(&["edit", &id, "--title", "Pythagorean Theorem", "--passphrase", PASSPHRASE]);
    let shown = qed.ok(&["show", &id]);
    assert!(shown.starts_with("Pythagorean Theorem\n"));
    assert!(shown.contains("Right triangles"), "untouched fields are kept");

    let out = qed.ok(&["delete", &id, "--passphrase", PASSPHRASE]);
    assert_eq!(out.trim(), format!("Deleted {id}"));
    qed.fails(&["show", &id]);
    assert_eq!(qed.ok(&["tags"]).lines().count(), 4);
}

#[test]
fn test_add_rejects_blank_title() {
    let qed = QedHarness::new();
    let content = qed.write_file("body.txt", "text");
    let err = qed.fails(&[
        "add",
        "--title",
        "  ",
        "--content-file",
        content.to_str().unwrap(),
        "--passphrase",
        PASSPHRASE,
    ]);
    assert!(err.contains("title must not be empty"), "{err}");
}

#[test]
fn test_edit_unknown_id_fails() {
    let qed = QedHarness::new();
    let err = qed.fails(&["edit", "nope", "--title", "X", "--passphrase", PASSPHRASE]);
    assert!(err.contains("No proof with id 'nope'"), "{err}");
}

#[test]
fn test_render_from_stdin() {
    let qed = QedHarness::new();
    let output = qed.run_with_stdin(&["render"], "Let $\\alpha \\to \\infty$.");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "Let α → ∞.");
}

#[test]
fn test_render_html_from_file() {
    let qed = QedHarness::new();
    let file = qed.write_file("proof.txt", "## Proof\nLet $x$ be");
    let out = qed.ok(&["render", "--html", file.to_str().unwrap()]);
    assert_eq!(
        out.trim(),
        "<h2 class=\"proof-heading\">Proof</h2><br/>Let <span class=\"math-inline\">x</span> be"
    );
    assert!(!qed.data_file().exists(), "render never touches the library");
}

#[test]
fn test_render_html_keeps_crlf_headings() {
    let qed = QedHarness::new();
    let file = qed.write_file("crlf.txt", "## Title\r\nbody");
    let out = qed.ok(&["render", "--html", file.to_str().unwrap()]);
    assert!(out.starts_with("<h2 class=\"proof-heading\">Title</h2>\r<br/>body"));
}

#[test]
fn test_render_rejects_deeply_nested_math() {
    let qed = QedHarness::new();
    let nested = format!("${}x{}$", "{".repeat(100_000), "}".repeat(100_000));
    let file = qed.write_file("deep.txt", &nested);
    let stderr = qed.fails(&["render", file.to_str().unwrap()]);
    assert!(stderr.contains("expression nested too deeply"), "{stderr}");
}

#[test]
fn test_render_reports_math_errors() {
    let qed = QedHarness::new();
    let output = qed.run_with_stdin(&["render"], "$\\frac{1$");
    assert!(!output.status.success());
}
