//! エラー型の定義
//!
//! このモジュールは、fusionlmライブラリで使用されるすべてのエラー型を定義します。
//! 語彙サイズの警告などの設定診断はエラーではなく、[`Diagnostic`](crate::vocabulary::Diagnostic)
//! として報告されます。

use std::error::Error;
use std::fmt::{self, Debug};

/// fusionlm専用のResult型
///
/// エラー型としてデフォルトで[`FusionError`]を使用します。
pub type Result<T, E = FusionError> = std::result::Result<T, E>;

/// fusionlmのエラー型
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// 別のスコアラーが生成した状態が渡された場合に発生します。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 状態の型不一致エラー
    ///
    /// 受け取った状態の構造がスコアラーと一致しない場合に発生します。
    #[error(transparent)]
    TypeMismatch(TypeMismatchError),

    /// バックエンドが利用できないエラー
    ///
    /// 構築時にのみ発生し、スコア計算中には発生しません。
    #[error("language-model backend unavailable: {0}")]
    BackendUnavailable(String),

    /// 標準I/Oエラー
    #[error(transparent)]
    StdIo(#[from] std::io::Error),
}

impl FusionError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// 型不一致エラーを生成します
    ///
    /// # 引数
    ///
    /// * `expected` - 期待された状態の説明
    /// * `found` - 実際に渡された状態の説明
    pub(crate) fn type_mismatch<S, M>(expected: S, found: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::TypeMismatch(TypeMismatchError {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// バックエンド利用不可エラーを生成します
    pub(crate) fn backend_unavailable<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::BackendUnavailable(msg.into())
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

/// 状態の構造が一致しない場合に使用されるエラー
#[derive(Debug)]
pub struct TypeMismatchError {
    pub(crate) expected: String,
    pub(crate) found: String,
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TypeMismatchError: expected {}, got {}",
            self.expected, self.found
        )
    }
}

impl Error for TypeMismatchError {}
