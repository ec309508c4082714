use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use factgen_core::{AttributePool, GeneratorConfig, Scalar, load_targets};
use factgen_generate::GenerationEngine;

/// SHA-256 of `tests/fixtures/targets.json` rendered with the built-in
/// config (seed 1984, 10,000 facts).
const FIXTURE_FACTS_SHA256: &str =
    "8fbae41978deb8a5a2f631c682311d3f337a3236db36b56016861347a7a21e86";

fn hash_file(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8192];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/targets.json")
}

fn temp_out_path(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("factgen_golden_{label}_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp out dir");
    dir.join("facts.json")
}

/// Replays the documented draw sequence with a bare ChaCha8 stream: per
/// attribute, one index draw for cap 1, otherwise one draw of `k` followed by
/// `min(k, len)` Fisher-Yates draws.
fn replay_lines(pool: &AttributePool, config: &GeneratorConfig, count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut lines = Vec::with_capacity(count);

    for _ in 0..count {
        let mut fields = Vec::with_capacity(pool.len());
        for (attr, values) in pool.iter() {
            let cap = config.max_cardinality(attr);
            let value = if cap == 1 {
                let picked = &values[rng.random_range(0..values.len())];
                serde_json::to_string(picked).expect("serialize value")
            } else {
                let k = (rng.random_range(1..=cap) as usize).min(values.len());
                let mut positions: Vec<usize> = (0..values.len()).collect();
                for i in 0..k {
                    let j = rng.random_range(i..values.len());
                    positions.swap(i, j);
                }
                let picked: Vec<&Scalar> = positions[..k].iter().map(|&p| &values[p]).collect();
                serde_json::to_string(&picked).expect("serialize value")
            };
            let key = serde_json::to_string(attr).expect("serialize key");
            fields.push(format!("{key}:{value}"));
        }
        lines.push(format!("{{{}}}", fields.join(",")));
    }

    lines
}

#[test]
fn fixture_facts_match_pinned_digest() {
    let targets = load_targets(&fixture_path()).expect("load fixture targets");
    let out = temp_out_path("pinned");

    let report = GenerationEngine::new(GeneratorConfig::default())
        .run(&targets, &out)
        .expect("run generation");

    assert_eq!(report.facts_written, 10_000);
    assert_eq!(report.sha256, FIXTURE_FACTS_SHA256);
    assert_eq!(hash_file(&out).expect("hash facts"), FIXTURE_FACTS_SHA256);
}

#[test]
fn facts_follow_the_documented_draw_sequence() {
    let targets = load_targets(&fixture_path()).expect("load fixture targets");
    let config = GeneratorConfig {
        count: 500,
        ..GeneratorConfig::default()
    };
    let pool = AttributePool::build(&targets, &config).expect("build pool");

    let engine = GenerationEngine::new(config.clone());
    let (buffer, summary) = engine
        .generate_into(&pool, Vec::new())
        .expect("generate facts");
    let text = String::from_utf8(buffer).expect("utf8 output");
    let produced: Vec<&str> = text.lines().collect();

    let expected = replay_lines(&pool, &config, 500);
    assert_eq!(summary.facts, 500);
    assert_eq!(produced.len(), expected.len());
    for (index, (line, want)) in produced.iter().zip(&expected).enumerate() {
        assert_eq!(line, want, "fact {index} diverged from the draw sequence");
    }
}

#[test]
fn clamped_draws_still_consume_the_size_draw() {
    let targets = factgen_core::parse_targets(
        r#"[{"rules": [
            {"attr": "kws", "values": ["a", "b"]},
            {"attr": "ctry", "values": ["de", "fr", "it", "nl", "us"]}
        ]}]"#,
    )
    .expect("parse targets");
    let config = GeneratorConfig {
        count: 200,
        ..GeneratorConfig::default()
    };
    let pool = AttributePool::build(&targets, &config).expect("build pool");

    let (buffer, _) = GenerationEngine::new(config.clone())
        .generate_into(&pool, Vec::new())
        .expect("generate facts");
    let text = String::from_utf8(buffer).expect("utf8 output");

    let expected = replay_lines(&pool, &config, 200).join("\n") + "\n";
    assert_eq!(text, expected);
}
