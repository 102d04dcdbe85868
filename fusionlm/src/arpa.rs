//! ARPA形式ファイルからのユニグラム読み込み
//!
//! n-gramモデル本体の読み込みは行いません。デコーダーの語彙として使うために、
//! `\1-grams:`セクションの単語だけを取り出します。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashSet;

use crate::errors::{FusionError, Result};

const UNIGRAM_HEADER: &str = "\\1-grams:";
const BIGRAM_HEADER: &str = "\\2-grams:";

/// ARPA形式のテキストからユニグラムを読み込みます。
///
/// `\1-grams:`から`\2-grams:`までの行のうち、タブ区切りで
/// `対数確率`、`単語`、`バックオフ重み`の3項目を持つ行の単語を集めます。
///
/// # 引数
///
/// * `rdr` - ARPA形式のテキストを読み込むリーダー
///
/// # エラー
///
/// ユニグラムが1つも見つからない場合、[`FusionError`]が返されます。
pub fn read_unigrams<R>(rdr: R) -> Result<HashSet<String>>
where
    R: BufRead,
{
    let mut unigrams = HashSet::new();
    let mut in_unigrams = false;
    for line in rdr.lines() {
        let line = line?;
        let line = line.trim();
        if line == UNIGRAM_HEADER {
            in_unigrams = true;
        } else if line == BIGRAM_HEADER {
            break;
        }
        if in_unigrams && !line.is_empty() {
            let mut fields = line.split('\t');
            if let (Some(_), Some(word), Some(_), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            {
                unigrams.insert(word.to_string());
            }
        }
    }
    if unigrams.is_empty() {
        return Err(FusionError::invalid_format(
            "arpa",
            "No unigrams found in arpa file. Something is wrong with the file.",
        ));
    }
    Ok(unigrams)
}

/// ARPA形式のファイルからユニグラムを読み込みます。
///
/// # 引数
///
/// * `path` - ARPA形式のファイルのパス
pub fn unigrams_from_path<P>(path: P) -> Result<HashSet<String>>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_unigrams(BufReader::new(file))
}

/// 1行に1単語が書かれた単語リストを読み込みます。空行は無視されます。
pub fn read_word_list<R>(rdr: R) -> Result<Vec<String>>
where
    R: BufRead,
{
    let mut words = vec![];
    for line in rdr.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const ARPA: &str = "\\data\\
ngram 1=5
ngram 2=2

\\1-grams:
-1.0\t<s>\t-0.3
-1.2\t</s>\t0.0
-2.0\tcat\t-0.2
-2.1\tdog\t-0.1
-3.0\tbroken

\\2-grams:
-0.5\t<s> cat\t0.0
-0.6\tcat dog\t0.0

\\end\\
";

    #[test]
    fn test_read_unigrams() {
        let unigrams = read_unigrams(ARPA.as_bytes()).unwrap();
        assert_eq!(unigrams.len(), 4);
        assert!(unigrams.contains("cat"));
        assert!(unigrams.contains("</s>"));
        assert!(!unigrams.contains("broken"));
        assert!(!unigrams.contains("<s> cat"));
    }

    #[test]
    fn test_no_unigrams() {
        let result = read_unigrams("\\data\\\nngram 1=0\n\\end\\\n".as_bytes());
        assert!(matches!(result, Err(FusionError::InvalidFormat(_))));
    }

    #[test]
    fn test_unigrams_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARPA.as_bytes()).unwrap();
        let unigrams = unigrams_from_path(file.path()).unwrap();
        assert!(unigrams.contains("dog"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = unigrams_from_path(dir.path().join("missing.arpa"));
        assert!(matches!(result, Err(FusionError::StdIo(_))));
    }

    #[test]
    fn test_read_word_list() {
        let words = read_word_list("cat\n\n  dog \nbird\n".as_bytes()).unwrap();
        assert_eq!(words, vec!["cat", "dog", "bird"]);
    }
}
