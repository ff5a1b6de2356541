use super::*;
use serde_json::{from_value, json, to_value};

#[test]
fn test_file_commit_create_omits_sha_and_path() {
    let commit = FileCommit {
        path: "images/a.txt".to_string(),
        content: "aGVsbG8=".to_string(),
        message: "Add files via edge function: images/a.txt".to_string(),
        branch: "b1".to_string(),
        sha: None,
    };

    let body = to_value(&commit).expect("Failed to serialize FileCommit");

    assert!(commit.is_create());
    assert_eq!(
        body,
        json!({
            "content": "aGVsbG8=",
            "message": "Add files via edge function: images/a.txt",
            "branch": "b1"
        })
    );
}

#[test]
fn test_file_commit_update_includes_sha() {
    let commit = FileCommit {
        path: "mkdocs.yml".to_string(),
        content: "c2l0ZV9uYW1lOiBEb2NzCg==".to_string(),
        message: "Update nav".to_string(),
        branch: "docs".to_string(),
        sha: Some("3d21ec53a331a6f037a91c368710b99387d012c1".to_string()),
    };

    let body = to_value(&commit).expect("Failed to serialize FileCommit");

    assert!(!commit.is_create());
    assert_eq!(body["sha"], "3d21ec53a331a6f037a91c368710b99387d012c1");
    assert!(body.get("path").is_none());
}

#[test]
fn test_create_ref_payload_uses_ref_key() {
    let payload = CreateRefPayload {
        git_ref: "refs/heads/add-docs".to_string(),
        sha: "aa218f56b14c9653891f9e74264a383fa43fefbd",
    };

    let body = to_value(&payload).unwrap();

    assert_eq!(body["ref"], "refs/heads/add-docs");
    assert_eq!(body["sha"], "aa218f56b14c9653891f9e74264a383fa43fefbd");
}

#[test]
fn test_content_entry_decodes_wrapped_base64() {
    // "site_name: Docs\nnav: []\n" wrapped the way GitHub returns it
    let entry: ContentEntry = from_value(json!({
        "type": "file",
        "encoding": "base64",
        "sha": "abc123",
        "content": "c2l0ZV9uYW1lOiBEb2Nz\nCm5hdjogW10K\n"
    }))
    .unwrap();

    let file = entry.into_file_content("mkdocs.yml").unwrap();

    assert_eq!(file.sha, "abc123");
    assert_eq!(file.as_text(), Some("site_name: Docs\nnav: []\n"));
}

#[test]
fn test_content_entry_rejects_unknown_encoding() {
    let entry: ContentEntry = from_value(json!({
        "encoding": "none",
        "sha": "abc123",
        "content": ""
    }))
    .unwrap();

    let result = entry.into_file_content("big.bin");

    match result {
        Err(Error::ContentDecode { path, reason }) => {
            assert_eq!(path, "big.bin");
            assert!(reason.contains("none"));
        }
        other => panic!("Expected ContentDecode error, got {other:?}"),
    }
}

#[test]
fn test_content_entry_rejects_invalid_base64() {
    let entry: ContentEntry = from_value(json!({
        "encoding": "base64",
        "sha": "abc123",
        "content": "***"
    }))
    .unwrap();

    assert!(matches!(
        entry.into_file_content("mkdocs.yml"),
        Err(Error::ContentDecode { .. })
    ));
}

#[test]
fn test_file_content_as_text_rejects_binary() {
    let file = FileContent {
        content: vec![0xff, 0xfe, 0x00],
        sha: "abc".to_string(),
    };

    assert_eq!(file.as_text(), None);
}
