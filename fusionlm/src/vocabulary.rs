//! 語彙フィルタと接頭辞インデックス
//!
//! デコーダーの語彙のうちn-gramモデルが認識する単語だけを保持し、
//! 未知語（OOV）判定と部分トークンの接頭辞判定を提供します。
//!
//! 語彙が与えられない場合や、フィルタ後に空になった場合は[`Vocabulary::Absent`]となり、
//! 部分トークンはすべて未知として扱われます。

mod set;
pub mod trie;

use std::fmt;

pub use crate::vocabulary::set::{
    VocabularySet, MISMATCH_RETAINED_FRACTION, SMALL_VOCABULARY_SIZE,
};
pub use crate::vocabulary::trie::PrefixIndex;
use crate::backend::WordLookup;

/// 語彙構築時の診断
///
/// いずれも致命的ではなく、OOV判定の精度が落ちることを示すだけです。
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// 語彙が与えられなかった
    NoVocabulary,

    /// 空の語彙が与えられた
    EmptyVocabulary,

    /// 語彙が小さすぎる
    SmallVocabulary {
        /// 入力語彙の異なり数
        size: usize,
    },

    /// 語彙とモデルが一致していない可能性がある
    VocabularyMismatch {
        /// 入力語彙のうちモデルに存在した割合
        retained_fraction: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoVocabulary => write!(
                f,
                "No known unigrams provided, decoding results might be a lot worse."
            ),
            Self::EmptyVocabulary => write!(
                f,
                "Empty unigram vocabulary provided, every partial token will be scored as unknown."
            ),
            Self::SmallVocabulary { size } => write!(
                f,
                "Only {size} unigrams passed as vocabulary. Is this small or artificial data?"
            ),
            Self::VocabularyMismatch { retained_fraction } => write!(
                f,
                "Only {:.1}% of unigrams in vocabulary found in the language model, \
                 this might mean that your vocabulary and language model are incompatible.",
                retained_fraction * 100.0
            ),
        }
    }
}

/// 語彙フィルタリングの結果報告
#[derive(Clone, Debug, PartialEq)]
pub struct FilterReport {
    input_len: usize,
    retained_len: usize,
    diagnostics: Vec<Diagnostic>,
}

impl FilterReport {
    pub(crate) const fn new(input_len: usize, retained_len: usize) -> Self {
        Self {
            input_len,
            retained_len,
            diagnostics: vec![],
        }
    }

    /// 診断を追加し、警告としてログに出力します。
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("[fusionlm] {diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// 入力語彙の異なり数を返します。
    pub const fn input_len(&self) -> usize {
        self.input_len
    }

    /// 保持された単語数を返します。
    pub const fn retained_len(&self) -> usize {
        self.retained_len
    }

    /// 保持率を返します。入力が空の場合は1.0です。
    pub fn retained_fraction(&self) -> f64 {
        if self.input_len == 0 {
            1.0
        } else {
            self.retained_len as f64 / self.input_len as f64
        }
    }

    /// 発生した診断を返します。
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// 語彙とモデルの不一致が報告されたかを返します。
    pub fn has_mismatch(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::VocabularyMismatch { .. }))
    }
}

/// スコアラーが保持する語彙
pub enum Vocabulary {
    /// 語彙なし
    Absent,

    /// バックエンドで確認済みの語彙と、その接頭辞インデックス
    Filtered {
        /// バックエンドが知っている単語の集合
        words: VocabularySet,

        /// `words`の接頭辞インデックス
        prefixes: PrefixIndex,
    },
}

impl Vocabulary {
    /// 候補語彙から語彙を構築します。
    ///
    /// # 引数
    ///
    /// * `unigrams` - 候補語彙。`None`の場合は語彙なしとなります。
    /// * `lookup` - 単語の所属判定を行うバックエンド
    pub fn from_unigrams<I, S, L>(unigrams: Option<I>, lookup: &L) -> (Self, FilterReport)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: WordLookup + ?Sized,
    {
        let Some(unigrams) = unigrams else {
            let mut report = FilterReport::new(0, 0);
            report.push(Diagnostic::NoVocabulary);
            return (Self::Absent, report);
        };

        let (words, report) = VocabularySet::build(unigrams, lookup);
        if words.is_empty() {
            return (Self::Absent, report);
        }
        let prefixes = PrefixIndex::build(&words);
        (Self::Filtered { words, prefixes }, report)
    }

    /// 語彙に基づいて単語が未知語かどうかを返します。
    ///
    /// 語彙がない場合は判定できないため`false`を返します。
    #[inline(always)]
    pub fn is_oov(&self, word: &str) -> bool {
        match self {
            Self::Absent => false,
            Self::Filtered { words, .. } => !words.contains(word),
        }
    }

    /// `partial`を接頭辞に持つ単語が語彙に存在するかを返します。
    ///
    /// 語彙がない場合は常に`false`です。
    #[inline(always)]
    pub fn has_prefix(&self, partial: &str) -> bool {
        match self {
            Self::Absent => false,
            Self::Filtered { prefixes, .. } => prefixes.has_prefix(partial),
        }
    }

    /// 語彙の単語数を返します。
    pub fn num_words(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Filtered { words, .. } => words.len(),
        }
    }
}
