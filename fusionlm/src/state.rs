//! 言語モデルの履歴状態
//!
//! バックエンドの状態を、それを生成したスコアラーの識別子とともに保持します。

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LINEAGE: AtomicU64 = AtomicU64::new(0);

/// 状態を生成したスコアラーの識別子
///
/// スコアラーの構築ごとに一意な値が割り当てられます。スコアラーの複製は
/// 同じ識別子を共有します。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Lineage(u64);

impl Lineage {
    /// 新しい識別子を割り当てます。
    pub(crate) fn fresh() -> Self {
        Self(NEXT_LINEAGE.fetch_add(1, Ordering::Relaxed))
    }

    /// 識別子の数値を返します。
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// n-gram履歴を表す不変の状態
///
/// 仮説が分岐するときは複製され、各分岐は同じ親から派生した独立の状態を持ちます。
/// スコアラーは状態を書き換えず、遷移のたびに新しい状態を返します。
#[derive(Clone, PartialEq, Debug)]
pub struct ModelState<S> {
    lineage: Lineage,
    inner: S,
}

impl<S> ModelState<S> {
    #[inline(always)]
    pub(crate) const fn new(lineage: Lineage, inner: S) -> Self {
        Self { lineage, inner }
    }

    /// この状態を生成したスコアラーの識別子を返します。
    #[inline(always)]
    pub const fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// バックエンドの状態への参照を返します。
    #[inline(always)]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// バックエンドの状態を取り出します。
    pub fn into_inner(self) -> S {
        self.inner
    }
}
