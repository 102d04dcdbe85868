//! バックエンドで確認済みのユニグラム集合

use hashbrown::HashSet;

use crate::backend::WordLookup;
use crate::vocabulary::{Diagnostic, FilterReport};

/// 語彙が小さすぎると判断する入力サイズ
pub const SMALL_VOCABULARY_SIZE: usize = 1000;

/// 語彙とモデルの不一致を疑う保持率
pub const MISMATCH_RETAINED_FRACTION: f64 = 0.1;

/// バックエンドが認識するユニグラムの不変集合
///
/// すべての要素はバックエンドで確認済みのため偽陽性はありません。
/// 入力として渡されなかった単語についてのみ偽陰性が生じます。
pub struct VocabularySet {
    words: HashSet<String>,
}

impl VocabularySet {
    /// 候補語彙のうち`lookup`が認識する単語だけを保持する集合を構築します。
    ///
    /// 語彙の大きさや保持率に関する診断は`log`に警告として出力され、
    /// [`FilterReport`]としても返されます。診断によって構築が失敗することはありません。
    ///
    /// # 引数
    ///
    /// * `raw_unigrams` - 候補語彙（重複は除かれます）
    /// * `lookup` - 単語の所属判定を行うバックエンド
    ///
    /// # 戻り値
    ///
    /// 構築された集合と、フィルタリングの結果報告
    pub fn build<I, S, L>(raw_unigrams: I, lookup: &L) -> (Self, FilterReport)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        L: WordLookup + ?Sized,
    {
        let mut words: HashSet<String> = raw_unigrams.into_iter().map(Into::into).collect();
        let input_len = words.len();
        words.retain(|word| lookup.contains(word));

        let mut report = FilterReport::new(input_len, words.len());
        if input_len < SMALL_VOCABULARY_SIZE {
            report.push(Diagnostic::SmallVocabulary { size: input_len });
        }
        if input_len == 0 {
            report.push(Diagnostic::EmptyVocabulary);
        } else {
            let retained_fraction = report.retained_fraction();
            if retained_fraction < MISMATCH_RETAINED_FRACTION {
                report.push(Diagnostic::VocabularyMismatch { retained_fraction });
            }
        }

        (Self { words }, report)
    }

    /// 単語が集合に含まれるかを返します。
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// 要素数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// 集合が空かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// 要素のイテレータを返します。順序は不定です。
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }
}

impl WordLookup for VocabularySet {
    fn contains(&self, word: &str) -> bool {
        VocabularySet::contains(self, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_utils::{hashset, StubBackend};

    #[test]
    fn test_retains_known_words_only() {
        let backend = StubBackend::with_known(["cat", "dog"]);
        let (vocab, report) = VocabularySet::build(["cat", "dog", "cow"], &backend);
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("cat"));
        assert!(!vocab.contains("cow"));
        assert_eq!(report.input_len(), 3);
        assert_eq!(report.retained_len(), 2);
    }

    #[test]
    fn test_duplicates_are_counted_once() {
        let backend = StubBackend::with_known(["cat"]);
        let (vocab, report) = VocabularySet::build(["cat", "cat", "cat"], &backend);
        assert_eq!(vocab.len(), 1);
        assert_eq!(report.input_len(), 1);
        assert_eq!(report.retained_fraction(), 1.0);
    }

    #[test]
    fn test_small_vocabulary_diagnostic() {
        let backend = StubBackend::with_known(["a", "b"]);
        let (_, report) = VocabularySet::build(["a", "b"], &backend);
        assert_eq!(report.diagnostics(), &[Diagnostic::SmallVocabulary { size: 2 }]);
    }

    #[test]
    fn test_empty_vocabulary_diagnostic() {
        let backend = StubBackend::with_known(["a"]);
        let (vocab, report) = VocabularySet::build(Vec::<String>::new(), &backend);
        assert!(vocab.is_empty());
        assert_eq!(
            report.diagnostics(),
            &[
                Diagnostic::SmallVocabulary { size: 0 },
                Diagnostic::EmptyVocabulary,
            ]
        );
        assert_eq!(report.retained_fraction(), 1.0);
    }

    #[test]
    fn test_mismatch_diagnostic() {
        let raw: Vec<String> = (0..10_000).map(|i| format!("w{i}")).collect();
        let known: Vec<String> = (0..500).map(|i| format!("w{i}")).collect();
        let backend = StubBackend::with_known(known);
        let (vocab, report) = VocabularySet::build(raw, &backend);
        assert_eq!(vocab.len(), 500);
        assert_eq!(report.input_len(), 10_000);
        assert_eq!(
            report.diagnostics(),
            &[Diagnostic::VocabularyMismatch {
                retained_fraction: 0.05
            }],
        );
        assert!(report.has_mismatch());
    }

    #[test]
    fn test_no_mismatch_at_threshold() {
        let raw: Vec<String> = (0..1000).map(|i| format!("w{i}")).collect();
        let known: Vec<String> = (0..100).map(|i| format!("w{i}")).collect();
        let backend = StubBackend::with_known(known);
        let (_, report) = VocabularySet::build(raw, &backend);
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn test_plain_set_as_lookup() {
        let lookup = hashset!["cat".to_string(), "dog".to_string()];
        let (vocab, _) = VocabularySet::build(["cat", "bird"], &lookup);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["cat"]);
    }
}
