//! 複数の言語モデルを組み合わせるスコアラー
//!
//! 各メンバーのスコアを合計し、メンバーごとの状態をまとめて保持します。

use crate::errors::{FusionError, Result};
use crate::scorer::AbstractLanguageModel;

/// [`MultiLanguageModel`]の履歴状態
///
/// メンバーと同じ順序で、メンバーごとの状態を保持します。
#[derive(Clone, PartialEq, Debug)]
pub struct MultiState<S> {
    states: Vec<S>,
}

impl<S> MultiState<S> {
    /// メンバーごとの状態から作成します。
    pub fn new(states: Vec<S>) -> Self {
        Self { states }
    }

    /// メンバーごとの状態を返します。
    pub fn states(&self) -> &[S] {
        &self.states
    }
}

/// 複数の言語モデルのスコアを合計するスコアラー
pub struct MultiLanguageModel<L> {
    models: Vec<L>,
}

impl<L> MultiLanguageModel<L>
where
    L: AbstractLanguageModel,
{
    /// 新しいインスタンスを作成します。
    ///
    /// # エラー
    ///
    /// 言語モデルが2つ未満の場合、[`FusionError`]が返されます。
    pub fn new(models: Vec<L>) -> Result<Self> {
        if models.len() < 2 {
            return Err(FusionError::invalid_argument(
                "models",
                "at least 2 language models are required",
            ));
        }
        Ok(Self { models })
    }

    /// メンバーの言語モデルを返します。
    pub fn models(&self) -> &[L] {
        &self.models
    }
}

impl<L> AbstractLanguageModel for MultiLanguageModel<L>
where
    L: AbstractLanguageModel,
{
    type State = MultiState<L::State>;

    fn order(&self) -> usize {
        self.models.iter().map(L::order).max().unwrap_or(0)
    }

    fn get_start_state(&self) -> Self::State {
        MultiState::new(self.models.iter().map(L::get_start_state).collect())
    }

    fn score_partial_token(&self, partial_token: &str) -> f64 {
        self.models
            .iter()
            .map(|lm| lm.score_partial_token(partial_token))
            .sum()
    }

    fn score(
        &self,
        prev_state: &Self::State,
        word: &str,
        is_last_word: bool,
    ) -> Result<(f64, Self::State)> {
        if prev_state.states.len() != self.models.len() {
            return Err(FusionError::type_mismatch(
                format!("a state of {} language models", self.models.len()),
                format!("a state of {} language models", prev_state.states.len()),
            ));
        }

        let mut score = 0.0;
        let mut end_states = Vec::with_capacity(self.models.len());
        for (lm, state) in self.models.iter().zip(&prev_state.states) {
            let (lm_score, end_state) = lm.score(state, word, is_last_word)?;
            score += lm_score;
            end_states.push(end_state);
        }
        Ok((score, MultiState::new(end_states)))
    }
}
