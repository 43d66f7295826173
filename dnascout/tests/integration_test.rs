use anyhow::Result;
use dnascout::records::parse_records;
use dnascout::search::{kmp_search, rabin_karp_search, run_search};
use dnascout::{render_pretty, search, Algorithm, SearchConfig, SequenceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{Cursor, Write};
use tempfile::tempdir;

fn random_sequence(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

fn generated_records(count: usize) -> Vec<SequenceRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let seq = random_sequence(&mut rng, 50 + (i * 7) % 90, b"ACGTN");
            SequenceRecord::new(&format!("read_{}", i), &seq).unwrap()
        })
        .collect()
}

#[test]
fn test_matchers_cross_validate() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..300 {
        // a small alphabet makes repeated and overlapping hits common
        let alphabet: &[u8] = if round % 2 == 0 { b"AC" } else { b"ACGTN" };
        let text = random_sequence(&mut rng, round % 64, alphabet);
        let pattern = random_sequence(&mut rng, 1 + round % 6, alphabet);

        let kmp = kmp_search(&text, &pattern);
        let (rk, _) = rabin_karp_search(&text, &pattern);
        assert_eq!(kmp, rk, "pattern {} in {}", pattern, text);
        assert!(kmp.windows(2).all(|w| w[0] < w[1]));
        for &p in &kmp {
            assert_eq!(&text[p..p + pattern.len()], pattern);
        }
    }
}

#[test]
fn test_whole_sequence_pattern_matches_once() {
    for algorithm in Algorithm::ALL {
        let records = vec![SequenceRecord::new("s", "GATTACAN").unwrap()];
        let report = run_search(&records, algorithm, "GATTACAN", 1).unwrap();
        assert_eq!(report.matches().len(), 1);
        assert_eq!(report.matches()[0].positions, vec![0]);
    }
}

#[test]
fn test_pattern_longer_than_every_sequence() {
    let records = generated_records(10);
    let pattern = "A".repeat(500);
    for algorithm in Algorithm::ALL {
        let report = run_search(&records, algorithm, &pattern, 3).unwrap();
        assert_eq!(report.match_count(), 0);
        assert_eq!(report.statistics().total_sequences, 10);
        assert_eq!(report.statistics().hash_collisions, 0);
    }
}

#[test]
fn test_empty_pattern_yields_nothing() {
    let records = generated_records(5);
    for algorithm in Algorithm::ALL {
        let report = run_search(&records, algorithm, "", 2).unwrap();
        assert_eq!(report.match_count(), 0);
    }
}

#[test]
fn test_idempotent_runs() {
    let records = generated_records(40);
    for algorithm in Algorithm::ALL {
        let first = run_search(&records, algorithm, "ACG", 4).unwrap();
        let second = run_search(&records, algorithm, "ACG", 4).unwrap();
        assert_eq!(first.matches(), second.matches());
        assert_eq!(
            first.statistics().hash_collisions,
            second.statistics().hash_collisions
        );
    }
}

#[test]
fn test_results_independent_of_worker_count() {
    let records = generated_records(37);
    for algorithm in Algorithm::ALL {
        let baseline = run_search(&records, algorithm, "CGT", 1).unwrap();
        assert!(baseline.match_count() > 0);
        for workers in 2..=records.len() as i64 {
            let report = run_search(&records, algorithm, "CGT", workers).unwrap();
            assert_eq!(report.matches(), baseline.matches());
            assert_eq!(
                report.statistics().hash_collisions,
                baseline.statistics().hash_collisions
            );
        }
    }
}

#[test]
fn test_engineered_collision_is_counted_not_reported() {
    // "TGTGCGGTAGGAACT" is 1_000_000_007 in base 4, so it hashes like 15 A's
    let input = "decoy,TGTGCGGTAGGAACT\nreal,CAAAAAAAAAAAAAAAC\n";
    let loaded = parse_records(Cursor::new(input)).unwrap();
    let pattern = "A".repeat(15);

    let report = run_search(&loaded.records, Algorithm::RabinKarp, &pattern, 2).unwrap();
    assert_eq!(report.statistics().hash_collisions, 1);
    assert_eq!(report.match_count(), 1);
    assert_eq!(report.matches()[0].name, "real");
    assert_eq!(report.matches()[0].positions, vec![1]);

    let report = run_search(&loaded.records, Algorithm::Kmp, &pattern, 2).unwrap();
    assert_eq!(report.statistics().hash_collisions, 0);
    assert_eq!(report.matches()[0].positions, vec![1]);
}

#[test]
fn test_search_from_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("reads.csv");
    let mut file = File::create(&path)?;
    writeln!(file, "seq1,ACGTACGT")?;
    writeln!(file, "seq2,TTTTAAAA")?;
    writeln!(file, "seq3,ACGTX")?;
    writeln!(file, "seq4,acgtnacgt\r")?;
    writeln!(file, "seq5,AC,GT")?;
    drop(file);

    let config = SearchConfig {
        algorithm: "rabin_karp".to_string(),
        pattern: "ACGT".to_string(),
        input_path: path,
        thread_count: 10,
        ..Default::default()
    };
    let run = search(&config)?;

    let stats = run.report.statistics();
    assert_eq!(stats.total_sequences, 3);
    assert_eq!(stats.workers_used, 3);
    assert_eq!(run.rejected.len(), 2);

    let names: Vec<_> = run.report.matches().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["seq1", "seq4"]);
    assert_eq!(run.report.matches()[1].positions, vec![0, 5]);

    let text = render_pretty(&run.report);
    assert!(text.contains("\"positions\": [0, 5]"));
    assert!(text.contains("\"match_count\": 2"));
    Ok(())
}
