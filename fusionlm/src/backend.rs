//! n-gramバックエンドとのインタフェース
//!
//! n-gramモデルの格納形式や検索エンジンはこのクレートの範囲外です。
//! スコアラーはここで定義するトレイトを通してのみバックエンドを利用します。

use std::fmt::Debug;

/// 文頭記号
pub const BEGIN_OF_SENTENCE: &str = "<s>";

/// 文末記号
pub const END_OF_SENTENCE: &str = "</s>";

/// 単語の所属判定機能を提供するトレイト
///
/// 語彙フィルタは所属判定だけを必要とするため、[`Backend`]から独立しています。
pub trait WordLookup {
    /// 単語がモデルに含まれているかを返します。
    fn contains(&self, word: &str) -> bool;
}

impl<S> WordLookup for hashbrown::HashSet<String, S>
where
    S: std::hash::BuildHasher,
{
    fn contains(&self, word: &str) -> bool {
        hashbrown::HashSet::contains(self, word)
    }
}

/// n-gramモデルのスコア遷移機能を提供するトレイト
///
/// 状態遷移は常に新しい状態を返し、渡された状態を変更しません。
/// 複数のワーカースレッドから同時に読み取り専用で呼び出されます。
pub trait Backend: WordLookup + Send + Sync {
    /// バックエンド固有の履歴状態
    ///
    /// `Default`は未初期化の空状態を表します。
    type State: Clone + Default + PartialEq + Debug + Send + Sync;

    /// n-gramの最大長を返します。
    fn order(&self) -> usize;

    /// 文頭文脈で状態を初期化します。
    fn begin_sentence_write(&self, state: Self::State) -> Self::State;

    /// 文脈なしで状態を初期化します。
    fn null_context_write(&self, state: Self::State) -> Self::State;

    /// 状態`state`の後に単語`word`が続く常用対数確率と、次の状態を返します。
    ///
    /// 戻り値のスコアは有限の実数でなければなりません。
    fn transition(&self, state: &Self::State, word: &str) -> (f64, Self::State);
}
