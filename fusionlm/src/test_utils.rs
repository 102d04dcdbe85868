//! テスト用ユーティリティ
//!
//! テストコードで使用するスタブのバックエンドと便利なマクロを提供します。

use hashbrown::{HashMap, HashSet};

use crate::backend::{Backend, WordLookup, BEGIN_OF_SENTENCE};

macro_rules! hashset {
    ( $($v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashSet::new();
            $(
                h.insert($v);
            )*
            h
        }
    };
    ( $($v:expr),* ) => {
        hashset![$( $v, )*]
    };
}

pub(crate) use hashset;

/// 直近の単語列を状態とするスタブのバックエンド
///
/// 単語ごとのスコアが登録されていなければ、どの遷移にも`base_score`を返します。
pub(crate) struct StubBackend {
    known: HashSet<String>,
    base_score: f64,
    word_scores: HashMap<String, f64>,
    order: usize,
}

impl StubBackend {
    /// 既知語を指定して作成します。
    pub(crate) fn with_known<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: words.into_iter().map(Into::into).collect(),
            base_score: -2.0,
            word_scores: HashMap::new(),
            order: 3,
        }
    }

    /// 既知語を持たず、常に`base_score`を返すバックエンドを作成します。
    pub(crate) fn flat(base_score: f64) -> Self {
        Self::with_known(Vec::<String>::new()).base_score(base_score)
    }

    pub(crate) fn base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    pub(crate) fn word_score(mut self, word: &str, score: f64) -> Self {
        self.word_scores.insert(word.to_string(), score);
        self
    }

    pub(crate) fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}

impl WordLookup for StubBackend {
    fn contains(&self, word: &str) -> bool {
        self.known.contains(word)
    }
}

impl Backend for StubBackend {
    type State = Vec<String>;

    fn order(&self) -> usize {
        self.order
    }

    fn begin_sentence_write(&self, _state: Vec<String>) -> Vec<String> {
        vec![BEGIN_OF_SENTENCE.to_string()]
    }

    fn null_context_write(&self, _state: Vec<String>) -> Vec<String> {
        vec![]
    }

    fn transition(&self, state: &Vec<String>, word: &str) -> (f64, Vec<String>) {
        let score = self
            .word_scores
            .get(word)
            .copied()
            .unwrap_or(self.base_score);
        let mut next = state.clone();
        next.push(word.to_string());
        let keep = self.order.saturating_sub(1);
        if next.len() > keep {
            next.drain(..next.len() - keep);
        }
        (score, next)
    }
}
