//! Monkey configuration loading tests
//!
//! Loads the sample behaviour file the way `serve --monkey-config` does.

use mockingjay_common::config::load_monkey_config;
use mockingjay_server::monkey::{CannedResponse, Monkey};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_sample_monkey_config_loads_every_profile() {
    let path = fixture("monkey.yaml");
    let monkey = Monkey::new(load_monkey_config(Some(path.as_path())).unwrap());

    let lines: Vec<String> = monkey
        .profiles()
        .iter()
        .map(|profile| profile.to_string())
        .collect();

    assert_eq!(
        lines,
        vec![
            "50% of the time | Body: This is wrong :( ",
            "20% of the time | Delay: 1s",
            "30% of the time | Status: 404",
            "10% of the time | Garbage bytes: 1984",
        ]
    );
}

#[test]
fn test_sample_monkey_config_profiles_are_reachable_in_order() {
    let path = fixture("monkey.yaml");
    let monkey = Monkey::new(load_monkey_config(Some(path.as_path())).unwrap());

    assert_eq!(monkey.choose(&mut || 0.5).unwrap().body, "This is wrong :( ");
    assert_eq!(monkey.choose(&mut || 0.7).unwrap().delay, 1000);
    assert_eq!(monkey.choose(&mut || 0.95).unwrap().status, 404);
    // The first three profiles cover the unit interval; only a draw past it
    // reaches the garbage profile.
    assert_eq!(monkey.choose(&mut || 1.05).unwrap().garbage, 1984);
}

#[tokio::test]
async fn test_without_monkey_config_responses_pass_through() {
    let monkey = Monkey::new(load_monkey_config(None).unwrap());
    assert!(monkey.profiles().is_empty());

    let canned = CannedResponse {
        status: 200,
        headers: Default::default(),
        body: b"hello".to_vec(),
    };
    assert_eq!(monkey.apply(canned.clone()).await, canned);
}
