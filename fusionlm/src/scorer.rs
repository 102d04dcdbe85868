//! 浅い融合（shallow fusion）のための言語モデルスコアラー
//!
//! ビームサーチが単語候補を展開するたびに呼び出され、n-gramバックエンドの対数確率、
//! 未知語ペナルティ、文末スコア、長さボーナスを一つのスコアにまとめます。
//!
//! # 主要な構造体
//!
//! - [`LanguageModel`]: 単一バックエンドのスコアラー
//! - [`LanguageModelConfig`]: 融合重みなどの設定値
//! - [`AbstractLanguageModel`]: ビームサーチ側が依存するスコアラーのトレイト
use std::f64::consts::LOG10_E;
use std::fmt::Debug;
use std::sync::Arc;

use crate::backend::{Backend, END_OF_SENTENCE};
use crate::errors::{FusionError, Result};
use crate::state::{Lineage, ModelState};
use crate::vocabulary::{FilterReport, Vocabulary};

/// これより長い部分トークンは、長さに比例して未知語ペナルティが増えます。
pub const EXPECTED_TOKEN_LEN: usize = 6;

/// ビームサーチから利用されるスコアラーのトレイト
///
/// 実装はスレッド間で共有され、同時に呼び出されます。
pub trait AbstractLanguageModel: Send + Sync {
    /// 仮説に付随する履歴状態
    type State: Clone + PartialEq + Debug + Send + Sync;

    /// n-gramの最大長を返します。
    fn order(&self) -> usize;

    /// 発話の開始状態を返します。
    fn get_start_state(&self) -> Self::State;

    /// 単語境界に達していない部分トークンのスコアを返します。
    fn score_partial_token(&self, partial_token: &str) -> f64;

    /// 状態`prev_state`に単語`word`を続けたときのスコアと新しい状態を返します。
    fn score(
        &self,
        prev_state: &Self::State,
        word: &str,
        is_last_word: bool,
    ) -> Result<(f64, Self::State)>;
}

/// スコアラーの設定値
///
/// スコアラーの構築後は変更できません。
///
/// # 例
///
/// ```
/// use fusionlm::LanguageModelConfig;
///
/// let config = LanguageModelConfig::default().alpha(0.7).score_boundary(false);
/// assert_eq!(config.alpha, 0.7);
/// assert_eq!(config.beta, 1.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanguageModelConfig {
    /// 浅い融合における言語モデルの重み
    pub alpha: f64,

    /// 単語数に応じた長さボーナスの重み
    pub beta: f64,

    /// 未知語に加算される常用対数スコア（通常は負）
    pub unk_score_offset: f64,

    /// 文頭・文末の文脈を考慮するかどうか
    pub score_boundary: bool,
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 1.5,
            unk_score_offset: -10.0,
            score_boundary: true,
        }
    }
}

impl LanguageModelConfig {
    /// 言語モデルの重みを設定します。
    pub const fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// 長さボーナスの重みを設定します。
    pub const fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// 未知語のスコアオフセットを設定します。
    pub const fn unk_score_offset(mut self, unk_score_offset: f64) -> Self {
        self.unk_score_offset = unk_score_offset;
        self
    }

    /// 文頭・文末の文脈を考慮するかを設定します。
    pub const fn score_boundary(mut self, yes: bool) -> Self {
        self.score_boundary = yes;
        self
    }

    /// 設定値を検証します。
    ///
    /// # エラー
    ///
    /// いずれかの値が有限でない場合、[`FusionError`]が返されます。
    pub fn validate(&self) -> Result<()> {
        for (arg, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("unk_score_offset", self.unk_score_offset),
        ] {
            if !value.is_finite() {
                return Err(FusionError::invalid_argument(
                    arg,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        if self.unk_score_offset > 0.0 {
            log::warn!(
                "[fusionlm] unk_score_offset is positive ({}), unknown words will be rewarded.",
                self.unk_score_offset
            );
        }
        Ok(())
    }
}

/// n-gramバックエンドに基づく言語モデルスコアラー
///
/// バックエンドと語彙は`Arc`で共有されるため、複製は安価です。
/// 複製したスコアラー同士は同じ識別子を持ち、互いの状態を受け付けます。
///
/// # 例
///
/// ```
/// use fusionlm::backend::{Backend, WordLookup};
/// use fusionlm::{LanguageModel, LanguageModelConfig};
///
/// // どの遷移にも-2.0を返すバックエンド
/// struct Flat;
///
/// impl WordLookup for Flat {
///     fn contains(&self, word: &str) -> bool {
///         word != "zzz"
///     }
/// }
///
/// impl Backend for Flat {
///     type State = u32;
///
///     fn order(&self) -> usize {
///         3
///     }
///     fn begin_sentence_write(&self, _state: u32) -> u32 {
///         1
///     }
///     fn null_context_write(&self, _state: u32) -> u32 {
///         0
///     }
///     fn transition(&self, state: &u32, _word: &str) -> (f64, u32) {
///         (-2.0, state + 1)
///     }
/// }
///
/// let lm = LanguageModel::new(Flat, Some(["hello", "world"]), LanguageModelConfig::default())?;
/// let start = lm.get_start_state();
/// let (score, state) = lm.score(&start, "hello", false)?;
/// assert!(score < 0.0);
/// assert_eq!(*state.inner(), 2);
/// assert_eq!(lm.score_partial_token("wor"), 0.0);
/// # Ok::<(), fusionlm::errors::FusionError>(())
/// ```
pub struct LanguageModel<B> {
    backend: Arc<B>,
    vocabulary: Arc<Vocabulary>,
    report: Arc<FilterReport>,
    config: LanguageModelConfig,
    lineage: Lineage,
}

impl<B> Clone for LanguageModel<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            vocabulary: Arc::clone(&self.vocabulary),
            report: Arc::clone(&self.report),
            config: self.config,
            lineage: self.lineage,
        }
    }
}

impl<B> LanguageModel<B>
where
    B: Backend,
{
    /// 新しいスコアラーを作成します。
    ///
    /// # 引数
    ///
    /// * `backend` - n-gramバックエンド
    /// * `unigrams` - デコーダーの既知語彙。`None`の場合は語彙なしとなります。
    /// * `config` - 設定値
    ///
    /// # エラー
    ///
    /// 設定値が無効な場合、またはバックエンドが0以下の次数を報告した場合、
    /// [`FusionError`]が返されます。
    pub fn new<I, S>(backend: B, unigrams: Option<I>, config: LanguageModelConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_shared_backend(Arc::new(backend), unigrams, config)
    }

    /// 共有されたバックエンドから新しいスコアラーを作成します。
    ///
    /// 同じモデルを異なる設定で使い分ける場合に、バックエンドを読み込み直さずに済みます。
    pub fn from_shared_backend<I, S>(
        backend: Arc<B>,
        unigrams: Option<I>,
        config: LanguageModelConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        if backend.order() == 0 {
            return Err(FusionError::backend_unavailable(
                "the backend reports an n-gram order of 0",
            ));
        }

        let (vocabulary, report) = Vocabulary::from_unigrams(unigrams, &*backend);
        log::info!(
            "[fusionlm] retained {:.4} of the unigrams ({} of {}) for an order-{} model",
            report.retained_fraction(),
            report.retained_len(),
            report.input_len(),
            backend.order(),
        );

        Ok(Self {
            backend,
            vocabulary: Arc::new(vocabulary),
            report: Arc::new(report),
            config,
            lineage: Lineage::fresh(),
        })
    }

    /// バックエンドを開いて新しいスコアラーを作成します。
    ///
    /// バックエンドの構築に失敗した場合は、スコア計算を始める前に
    /// [`FusionError::BackendUnavailable`]で失敗します。
    ///
    /// # 引数
    ///
    /// * `open` - バックエンドを構築する関数
    /// * `unigrams` - デコーダーの既知語彙
    /// * `config` - 設定値
    pub fn open<F, E, I, S>(
        open: F,
        unigrams: Option<I>,
        config: LanguageModelConfig,
    ) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<B, E>,
        E: std::fmt::Display,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = open().map_err(|e| FusionError::backend_unavailable(e.to_string()))?;
        Self::new(backend, unigrams, config)
    }

    /// n-gramの最大長を返します。
    pub fn order(&self) -> usize {
        self.backend.order()
    }

    /// 発話の開始状態を返します。
    ///
    /// `score_boundary`が有効な場合は文頭文脈、無効な場合は文脈なしで初期化されます。
    pub fn get_start_state(&self) -> ModelState<B::State> {
        let empty = B::State::default();
        let state = if self.config.score_boundary {
            self.backend.begin_sentence_write(empty)
        } else {
            self.backend.null_context_write(empty)
        };
        ModelState::new(self.lineage, state)
    }

    /// 部分トークンのスコアを返します。
    ///
    /// 語彙中に`partial_token`で始まる単語がなければ未知語オフセットを返し、
    /// 長さが[`EXPECTED_TOKEN_LEN`]文字を超える場合はさらに長さに比例して増やします。
    /// 状態は消費も生成もしません。
    pub fn score_partial_token(&self, partial_token: &str) -> f64 {
        let is_oov = if self.vocabulary.has_prefix(partial_token) {
            0.0
        } else {
            1.0
        };
        let mut unk_score = self.config.unk_score_offset * is_oov;
        let len = partial_token.chars().count();
        if len > EXPECTED_TOKEN_LEN {
            unk_score = unk_score * len as f64 / EXPECTED_TOKEN_LEN as f64;
        }
        unk_score
    }

    /// 状態`prev_state`に単語`word`を続けたときのスコアと新しい状態を返します。
    ///
    /// `is_last_word`が`true`の場合は文末スコアが加算されますが、返される状態は
    /// 文末記号を読み込む前のものです。そのため、返された状態からさらに仮説を延長できます。
    ///
    /// # エラー
    ///
    /// `prev_state`が別のスコアラーによって生成された場合、[`FusionError::InvalidState`]が
    /// 返されます。
    pub fn score(
        &self,
        prev_state: &ModelState<B::State>,
        word: &str,
        is_last_word: bool,
    ) -> Result<(f64, ModelState<B::State>)> {
        if prev_state.lineage() != self.lineage {
            return Err(FusionError::invalid_state(
                "the state was produced by a different language model",
                format!(
                    "expected lineage {}, got {}",
                    self.lineage.get(),
                    prev_state.lineage().get()
                ),
            ));
        }

        let (mut lm_score, end_state) = self.backend.transition(prev_state.inner(), word);
        // The vocabulary check is cheaper; the backend check covers words
        // missing from an absent vocabulary.
        if self.vocabulary.is_oov(word) || !self.backend.contains(word) {
            lm_score += self.config.unk_score_offset;
        }
        if is_last_word {
            lm_score += self.raw_end_score(&end_state);
        }
        let score = self.config.alpha * lm_score / LOG10_E + self.config.beta;
        Ok((score, ModelState::new(self.lineage, end_state)))
    }

    /// 文末記号の常用対数スコアを返します。
    fn raw_end_score(&self, state: &B::State) -> f64 {
        if self.config.score_boundary {
            self.backend.transition(state, END_OF_SENTENCE).0
        } else {
            0.0
        }
    }

    /// 設定値を返します。
    pub const fn config(&self) -> &LanguageModelConfig {
        &self.config
    }

    /// 語彙フィルタリングの結果報告を返します。
    pub fn report(&self) -> &FilterReport {
        &self.report
    }

    /// 語彙を返します。
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// バックエンドを返します。
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// このスコアラーの識別子を返します。
    pub const fn lineage(&self) -> Lineage {
        self.lineage
    }
}

impl<B> AbstractLanguageModel for LanguageModel<B>
where
    B: Backend,
{
    type State = ModelState<B::State>;

    fn order(&self) -> usize {
        LanguageModel::order(self)
    }

    fn get_start_state(&self) -> Self::State {
        LanguageModel::get_start_state(self)
    }

    fn score_partial_token(&self, partial_token: &str) -> f64 {
        LanguageModel::score_partial_token(self, partial_token)
    }

    fn score(
        &self,
        prev_state: &Self::State,
        word: &str,
        is_last_word: bool,
    ) -> Result<(f64, Self::State)> {
        LanguageModel::score(self, prev_state, word, is_last_word)
    }
}
