//! Tests that run A* with various heuristics against a reference aligner.
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::generate::{generate_pair, setup_sequences_with_seed, ErrorModel, GenerateOptions};
use crate::heuristic::*;
use crate::prelude::*;
use crate::seeds::TrailingSeed;
use crate::{astar, AstarEd, AstarEdParams};

fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>)> {
    vec![
        (b"ACCAGTGCCATT", b"ACTAGTGGCACT"),
        (b"TTGGGTCAATCAGCCAGTTTTTA", b"TTTGAGTGGGTCATCACCGATTTTAT"),
        (b"ACTGACCAGT", b"CCGACAGGA"),
        (b"AGTTTTAT", b"ACCGATTTTTA"),
        (b"CTCTCTTCTCTCTCTA", b"CCTCTCTCTCTCCTCTC"),
        (b"AGTGGGTTGCCTTCATTCCG", b"AGTGGTGTCTTCAGGCCTTCATTCCG"),
        (b"GCACGTCGCCCCCCGCCCGCG", b"GCCCGCCCGCCCGCCCCCGCCCCC"),
        (b"A", b"C"),
        (b"AAAA", b"A"),
    ]
}

/// Random pairs over a grid of lengths, error rates and error models.
/// Seeds are fixed so failures are reproducible.
fn gen_seqs() -> impl Iterator<Item = ((Sequence, Sequence), String)> {
    let ns = [1usize, 2, 3, 5, 8, 13, 20, 40, 70];
    let es = [0.0f32, 0.05, 0.2, 0.5];
    let models = [ErrorModel::Uniform, ErrorModel::Gap, ErrorModel::Move];
    ns.into_iter()
        .cartesian_product(es)
        .cartesian_product(models)
        .enumerate()
        .map(|(seed, ((n, e), error_model))| {
            let ref mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
            let pair = generate_pair(
                &GenerateOptions {
                    length: n,
                    error_rate: e,
                    error_model,
                },
                rng,
            );
            (pair, format!("n={n} e={e} model={error_model:?} seed={seed}"))
        })
}

fn all_pairs() -> impl Iterator<Item = ((Sequence, Sequence), String)> {
    test_sequences()
        .into_iter()
        .map(|(a, b)| ((a.to_vec(), b.to_vec()), "fixed".to_string()))
        .chain(gen_seqs())
}

fn reference(a: Seq, b: Seq) -> Cost {
    triple_accel::levenshtein_exp(a, b) as Cost
}

fn test_heuristic_on_input<H: Heuristic>(a: Seq, b: Seq, h: H, params: &str) {
    let Ok(result) = (AstarEd { h }).align(a, b) else {
        // Seeds longer than one of the sequences.
        return;
    };
    assert_eq!(
        result.distance,
        reference(a, b),
        "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\nHeuristic\n{h:?}",
        seq_to_string(a),
        seq_to_string(b),
    );
    assert!(result.path().len() > max(a.len(), b.len()));
}

#[test]
fn literal_pair() {
    let a = b"ACCAGTGCCATT";
    let b = b"ACTAGTGGCACT";
    let d = reference(a, b);
    assert_eq!(AstarEd { h: ZeroCost }.align(a, b).unwrap().distance, d);
    for k in 1..=12 {
        assert_eq!(AstarEd { h: SH::new(k) }.align(a, b).unwrap().distance, d);
    }
}

#[test]
fn zero_matches_reference() {
    for ((a, b), params) in all_pairs() {
        test_heuristic_on_input(&a, &b, ZeroCost, &params);
    }
}

macro_rules! make_test {
    // $m wraps the seed heuristic, e.g. to check consistency.
    ($name:ident, $trailing:expr, $m:expr) => {
        mod $name {
            use super::*;

            fn h(k: I) -> impl Heuristic {
                $m(SH::new(k).with_trailing($trailing))
            }

            #[test]
            fn small_k() {
                for ((a, b), params) in all_pairs() {
                    for k in 1..=4 {
                        test_heuristic_on_input(&a, &b, h(k), &params);
                    }
                }
            }

            #[test]
            fn every_k() {
                for ((a, b), params) in all_pairs() {
                    for k in 1..=min(a.len(), b.len()) as I {
                        test_heuristic_on_input(&a, &b, h(k), &params);
                    }
                }
            }

            #[test]
            fn auto_k() {
                for ((a, b), params) in all_pairs() {
                    let h = $m(SH::auto().with_trailing($trailing));
                    test_heuristic_on_input(&a, &b, h, &params);
                }
            }
        }
    };
}

make_test!(sh_drop, TrailingSeed::Drop, |h| h);
make_test!(sh_keep, TrailingSeed::Keep, |h| h);
make_test!(sh_drop_checked, TrailingSeed::Drop, Heuristic::checked);
make_test!(sh_keep_checked, TrailingSeed::Keep, Heuristic::checked);

#[test]
fn monotone_and_zero_at_target() {
    for ((a, b), params) in all_pairs() {
        for trailing in [TrailingSeed::Drop, TrailingSeed::Keep] {
            for k in 1..=min(a.len(), b.len()) as I {
                let h = SH::new(k).with_trailing(trailing).build(&a, &b).unwrap();
                let target = Pos::target(&a, &b);
                assert_eq!(h.h(target), 0, "{params} k={k}");
                for j in [0, target.1] {
                    let values = (0..=target.0).map(|i| h.h(Pos(i, j))).collect_vec();
                    assert!(
                        values.iter().tuple_windows().all(|(x, y)| x >= y),
                        "{params} k={k}: {values:?}"
                    );
                }
            }
        }
    }
    let h = ZeroCost.build(b"ACG", b"AC").unwrap();
    assert_eq!(h.h(Pos(3, 2)), 0);
}

#[test]
fn admissible_on_closed_nodes() {
    for ((a, b), params) in all_pairs().filter(|((a, _), _)| a.len() <= 40) {
        for trailing in [TrailingSeed::Drop, TrailingSeed::Keep] {
            for k in 1..=min(4, min(a.len(), b.len())) as I {
                let h = SH::new(k).with_trailing(trailing).build(&a, &b).unwrap();
                let result = astar(&a, &b, &h);
                for Pos(i, j) in result.closed() {
                    let remaining = reference(&a[i as usize..], &b[j as usize..]);
                    assert!(
                        h.h(Pos(i, j)) <= remaining,
                        "{params} k={k} {trailing:?}: h({i}, {j}) exceeds {remaining}"
                    );
                }
            }
        }
    }
}

#[test]
fn idempotent_construction() {
    let (a, b) = setup_sequences_with_seed(5, 300, 0.1);
    let h1 = SH::new(4).build(&a, &b).unwrap();
    let h2 = SH::new(4).build(&a, &b).unwrap();
    assert_eq!(h1.seeds().unwrap().potential, h2.seeds().unwrap().potential);
    assert_eq!(h1.stats().num_matches, h2.stats().num_matches);
    for i in 0..=a.len() as I {
        assert_eq!(h1.h(Pos(i, 0)), h2.h(Pos(i, 0)));
    }
}

#[test]
fn empty_sequences() {
    let aligner = AstarEd { h: ZeroCost };
    assert_eq!(aligner.align(b"", b"").unwrap().distance, 0);
    assert_eq!(aligner.align(b"", b"ACGT").unwrap().distance, 4);
    assert_eq!(aligner.align(b"ACG", b"").unwrap().distance, 3);
    assert!(SH::new(1).build(b"", b"ACGT").is_err());
    assert_eq!(crate::edit_distance(b"", b""), 0);
    assert_eq!(crate::edit_distance(b"", b"ACGT"), 4);
    assert_eq!(crate::edit_distance(b"ACCAGTGCCATT", b"ACTAGTGGCACT"), 3);
}

#[test]
fn deterministic() {
    let (a, b) = setup_sequences_with_seed(11, 500, 0.1);
    let aligner = AstarEd { h: SH::new(5) };
    let r1 = aligner.align(&a, &b).unwrap();
    let r2 = aligner.align(&a, &b).unwrap();
    assert_eq!(r1.distance, r2.distance);
    assert_eq!(r1.stats.expanded, r2.stats.expanded);
    assert_eq!(r1.stats.explored, r2.stats.explored);
    assert_eq!(r1.path(), r2.path());
}

#[test]
fn shared_heuristic_across_threads() {
    let (a, b) = setup_sequences_with_seed(3, 1000, 0.05);
    let h = SH::new(5).build(&a, &b).unwrap();
    let expected = reference(&a, &b);
    std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| astar(&a, &b, &h).distance))
            .collect_vec();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn seed_heuristic_expands_less() {
    let (a, b) = setup_sequences_with_seed(1, 2000, 0.02);
    let zero = AstarEd { h: ZeroCost }.align(&a, &b).unwrap();
    let sh = AstarEd { h: SH::new(8) }.align(&a, &b).unwrap();
    assert_eq!(zero.distance, sh.distance);
    assert!(sh.stats.expanded < zero.stats.expanded);
    assert!(sh.stats.h.h0 <= sh.distance);
}

/// Returns 10 at `(1, 1)`, which overestimates the true remaining cost 0.
#[derive(Debug, Clone, Copy)]
struct Overestimate;
struct OverestimateI;
impl Heuristic for Overestimate {
    type Instance = OverestimateI;
    fn build(&self, _a: Seq, _b: Seq) -> crate::Result<OverestimateI> {
        Ok(OverestimateI)
    }
    fn name(&self) -> String {
        "Overestimate".into()
    }
}
impl HeuristicInstance for OverestimateI {
    fn h(&self, pos: Pos) -> Cost {
        if pos == Pos(1, 1) {
            10
        } else {
            0
        }
    }
}

#[test]
fn inadmissible_heuristic_gives_wrong_distance() {
    let result = AstarEd { h: Overestimate }.align(b"AA", b"AA").unwrap();
    // The optimal path runs through (1, 1); A* avoids it and finds a
    // non-optimal alignment instead of crashing.
    assert_eq!(result.distance, 2);
    assert_ne!(result.distance, reference(b"AA", b"AA"));
}

#[test]
#[should_panic(expected = "Inconsistent")]
fn inadmissible_heuristic_is_caught_by_check() {
    AstarEd {
        h: Overestimate.checked(),
    }
    .align(b"AA", b"AA")
    .unwrap();
}

#[test]
fn params_from_json() {
    let args: HeuristicArgs =
        serde_json::from_str(r#"{"type": "sh", "k": 5, "trailing": "keep"}"#).unwrap();
    assert_eq!(args.sh(), SH::new(5).with_trailing(TrailingSeed::Keep));
    assert!(!args.check_consistency);

    let params: AstarEdParams =
        serde_json::from_str(r#"{"heuristic": {"type": "zero", "check_consistency": true}}"#)
            .unwrap();
    assert_eq!(params.heuristic.heuristic, HeuristicType::Zero);
    assert_eq!(params.aligner().name(), "Zero+check");
    assert_eq!(params.align(b"ACGT", b"AGT").unwrap().distance, 1);

    assert!(serde_json::from_str::<HeuristicArgs>(r#"{"type": "sh", "r": 2}"#).is_err());
}

#[test]
fn invalid_seed_length_is_reported_before_search() {
    let params = AstarEdParams::new(HeuristicArgs {
        k: Some(0),
        ..Default::default()
    });
    assert!(matches!(
        params.align(b"ACGT", b"ACGT"),
        Err(crate::Error::NonPositiveSeedLength { k: 0 })
    ));
    let params = AstarEdParams::new(HeuristicArgs {
        k: Some(5),
        ..Default::default()
    });
    assert!(matches!(
        params.align(b"ACGTAC", b"ACGT"),
        Err(crate::Error::SeedLongerThanSequence { k: 5, name: 'b', .. })
    ));
}
