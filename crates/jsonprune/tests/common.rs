#![allow(missing_docs)]
#![allow(dead_code)]

/// A search response with nested debug payloads. Keys are sorted so the
/// compact `serde_json` rendering matches [`STREAM`] byte for byte.
pub const ORIGINAL: &str = r#"
{
    "request": {
        "id": "r-17",
        "tags": [
            "alpha",
            "beta"
        ]
    },
    "results": [
        {
            "debug": {
                "tokens": [1, 2, 3]
            },
            "score": 0.5,
            "text": "fn main() {}"
        },
        {
            "debug": null,
            "score": 1,
            "text": "println!(\"hi\")"
        }
    ],
    "total": 2
}"#;

// The same document as it might arrive over a socket. Chunks are cut inside
// strings, inside numbers and between closing brackets.
#[rustfmt::skip]
pub const STREAM: [&str; 10] = [
    r#"{"request":{"id":"r-"#,                 // inside a string
    r#"17","tags":["al"#,                      // inside a string in an array
    r#"pha","beta"]},""#,                      // after the opening quote of a key
    r#"results":[{"debug":{"tokens":[1,"#,     // after a comma in an array
    r#"2,3]},"score":0."#,                     // inside a number, after the point
    r#"5,"text":"fn main() {}"},"#,
    r#"{"debug":null,"score":1"#,              // a number is only complete at the next byte
    r#","text":"println!(\"hi\")"}]"#,
    r#","total":2"#,
    r#"}"#,
];

#[test]
fn stream_matches_original() {
    let streamed = STREAM.join("");

    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    let original = serde_json::to_string(&value).unwrap();

    assert_eq!(streamed, original);
}
