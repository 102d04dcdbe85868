use crate::errors::FusionError;
use crate::test_utils::StubBackend;
use crate::{AbstractLanguageModel, LanguageModel, LanguageModelConfig, MultiLanguageModel, MultiState};

#[track_caller]
fn build_lm(backend: StubBackend, unigrams: &[&str]) -> LanguageModel<StubBackend> {
    LanguageModel::new(
        backend,
        Some(unigrams.iter().copied()),
        LanguageModelConfig::default(),
    )
    .unwrap()
}

fn build_multi() -> MultiLanguageModel<LanguageModel<StubBackend>> {
    let general = build_lm(StubBackend::with_known(["cat", "dog"]), &["cat", "dog"]);
    let domain = build_lm(
        StubBackend::with_known(["cat", "catheter"])
            .base_score(-1.0)
            .with_order(5),
        &["cat", "catheter"],
    );
    MultiLanguageModel::new(vec![general, domain]).unwrap()
}

#[test]
fn test_requires_two_models() {
    let lm = build_lm(StubBackend::with_known(["cat"]), &["cat"]);
    let result = MultiLanguageModel::new(vec![lm]);
    assert!(matches!(result, Err(FusionError::InvalidArgument(_))));
}

#[test]
fn test_order_is_max() {
    assert_eq!(build_multi().order(), 5);
}

#[test]
fn test_score_is_sum() {
    let multi = build_multi();
    let start = multi.get_start_state();
    assert_eq!(start.states().len(), 2);

    let (score, state) = multi.score(&start, "cat", false).unwrap();
    let mut expected = 0.0;
    for (lm, lm_start) in multi.models().iter().zip(start.states()) {
        let (lm_score, lm_state) = lm.score(lm_start, "cat", false).unwrap();
        expected += lm_score;
        assert!(state.states().contains(&lm_state));
    }
    assert_eq!(score, expected);
}

#[test]
fn test_partial_token_is_sum() {
    let multi = build_multi();
    // Only the domain model knows a word starting with "cath".
    assert_eq!(multi.score_partial_token("cath"), -10.0);
    assert_eq!(multi.score_partial_token("ca"), 0.0);
    assert_eq!(multi.score_partial_token("xyz"), -20.0);
}

#[test]
fn test_state_shape_mismatch() {
    let multi = build_multi();
    let start = multi.get_start_state();
    let truncated = MultiState::new(start.states()[..1].to_vec());
    let result = multi.score(&truncated, "cat", false);
    assert!(matches!(result, Err(FusionError::TypeMismatch(_))));
}

#[test]
fn test_member_state_from_other_scorer() {
    let multi = build_multi();
    let other = build_multi();
    let foreign = other.get_start_state();
    let result = multi.score(&foreign, "cat", false);
    assert!(matches!(result, Err(FusionError::InvalidState(_))));
}
