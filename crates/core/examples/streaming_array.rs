// this_file: crates/core/examples/streaming_array.rs

//! Decodes the elements of a large top-level JSON array lazily, with a
//! deliberately tiny refill buffer to show suspension at work.

use std::io::Cursor;
use trickle_json_core::{enumerate_array, int32, object, property, string};

fn main() {
    let json = br#"[
        {"name": "alpha", "score": 10},
        {"name": "beta", "score": 20},
        {"name": "gamma", "score": 30}
    ]"#;

    let entry = object(
        (property("name", string()), property("score", int32())),
        |name, score| (name, score),
    );

    let items = enumerate_array(Cursor::new(json.to_vec()), entry, 8);
    for item in items {
        match item {
            Ok((name, score)) => println!("{name}: {score}"),
            Err(e) => {
                eprintln!("decode failed: {e}");
                std::process::exit(1);
            }
        }
    }
}
