//! # fusionlm
//!
//! fusionlmは、サブワード列を単語列へ変換するビームサーチを導くための、
//! 逐次的なn-gram言語モデルスコアラーです。
//!
//! ## 概要
//!
//! 音響モデルなどの系列モデルのスコアに、統計的言語モデルのスコアを復号時に加算する
//! 浅い融合（shallow fusion）を行います。n-gramモデルの格納形式や検索エンジンは
//! [`Backend`](backend::Backend)トレイトの向こう側にあり、このクレートはその上に載る
//! スコアラーだけを提供します。
//!
//! ## 主な機能
//!
//! - **逐次的なスコア計算**: 単語を1つ延長するごとに新しい状態を返し、再計算を行いません
//! - **語彙フィルタ**: デコーダーの語彙をモデルが認識する単語に絞り込み、未知語を定数時間で判定します
//! - **接頭辞インデックス**: 単語境界に達していない部分トークンを、文字列長に比例する時間で評価します
//! - **スコアの合成**: 対数確率、長さボーナス、未知語ペナルティ、文末スコアを一つの値にまとめます
//! - **並行利用**: スコアラーは構築後に不変で、複数のワーカースレッドから同時に呼び出せます
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fusionlm::backend::{Backend, WordLookup};
//! use fusionlm::{LanguageModel, LanguageModelConfig};
//!
//! struct Unigram;
//!
//! impl WordLookup for Unigram {
//!     fn contains(&self, word: &str) -> bool {
//!         matches!(word, "the" | "cat" | "</s>")
//!     }
//! }
//!
//! impl Backend for Unigram {
//!     type State = ();
//!
//!     fn order(&self) -> usize {
//!         1
//!     }
//!     fn begin_sentence_write(&self, state: ()) -> () {
//!         state
//!     }
//!     fn null_context_write(&self, state: ()) -> () {
//!         state
//!     }
//!     fn transition(&self, _state: &(), word: &str) -> (f64, ()) {
//!         let score = match word {
//!             "the" => -1.0,
//!             "cat" => -2.0,
//!             _ => -3.0,
//!         };
//!         (score, ())
//!     }
//! }
//!
//! let config = LanguageModelConfig::default().score_boundary(false);
//! let lm = LanguageModel::new(Unigram, Some(["the", "cat", "dog"]), config)?;
//! assert_eq!(lm.report().retained_len(), 2);
//!
//! let state = lm.get_start_state();
//! let (the, state) = lm.score(&state, "the", false)?;
//! let (cat, _) = lm.score(&state, "cat", true)?;
//! assert!(the > cat);
//!
//! // "ca"は"cat"の接頭辞なのでペナルティなし
//! assert_eq!(lm.score_partial_token("ca"), 0.0);
//! assert_eq!(lm.score_partial_token("xy"), -10.0);
//! # Ok(())
//! # }
//! ```

/// エラー型の定義
pub mod errors;

/// n-gramバックエンドとのインタフェース
pub mod backend;

/// 言語モデルの履歴状態
pub mod state;

/// 語彙フィルタと接頭辞インデックス
pub mod vocabulary;

/// 言語モデルスコアラー
pub mod scorer;

/// 複数の言語モデルの組み合わせ
pub mod multi;

/// ARPA形式ファイルからのユニグラム読み込み
pub mod arpa;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use multi::{MultiLanguageModel, MultiState};
pub use scorer::{AbstractLanguageModel, LanguageModel, LanguageModelConfig};
pub use state::ModelState;
pub use vocabulary::{Diagnostic, FilterReport, Vocabulary};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
