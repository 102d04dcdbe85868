//! 接頭辞の存在判定のためのトライ
//!
//! 語彙に含まれる単語のすべての接頭辞を保持し、ある文字列を接頭辞に持つ単語が
//! 存在するかを文字列長に比例する時間で判定します。

use hashbrown::HashMap;

use crate::vocabulary::VocabularySet;

const ROOT: u32 = 0;

/// 文字単位のトライ
///
/// 遷移はすべて`(親ノード, 文字) -> 子ノード`の単一のハッシュ表で保持します。
/// 構築後は読み取り専用です。
pub struct PrefixIndex {
    edges: HashMap<(u32, char), u32>,
    num_nodes: u32,
}

impl PrefixIndex {
    /// 語彙からトライを構築します。
    pub fn build(vocab: &VocabularySet) -> Self {
        let mut edges = HashMap::new();
        let mut num_nodes = 1;
        for word in vocab.iter() {
            let mut node = ROOT;
            for c in word.chars() {
                node = *edges.entry((node, c)).or_insert_with(|| {
                    let child = num_nodes;
                    num_nodes += 1;
                    child
                });
            }
        }
        Self { edges, num_nodes }
    }

    /// `prefix`を接頭辞に持つ単語（`prefix`自身を含む）が存在するかを返します。
    ///
    /// 空文字列は常に存在するとみなします。
    #[inline]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let mut node = ROOT;
        for c in prefix.chars() {
            match self.edges.get(&(node, c)) {
                Some(&child) => node = child,
                None => return false,
            }
        }
        true
    }

    /// ルートを含むノード数を返します。
    pub fn num_nodes(&self) -> usize {
        self.num_nodes as usize
    }
}
