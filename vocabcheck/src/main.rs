//! デコーダー語彙と言語モデルの整合性を確認するユーティリティ
//!
//! このバイナリは、ARPA形式のファイルからユニグラムを読み込み、デコーダーの語彙を
//! それで絞り込んだ結果と診断を出力します。

use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use fusionlm::arpa;
use fusionlm::vocabulary::{PrefixIndex, VocabularySet};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "vocabcheck", about = "Checks a decoder vocabulary against an ARPA language model")]
struct Args {
    /// Language model in the ARPA format.
    #[clap(short = 'a', long)]
    arpa: PathBuf,

    /// Decoder vocabulary, one word per line.
    #[clap(short = 'v', long)]
    vocab: PathBuf,

    /// Partial tokens to look up in the prefix index.
    #[clap(short = 'p', long)]
    prefix: Vec<String>,
}

/// メイン関数
///
/// ユニグラムと語彙を読み込み、保持率と診断を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the unigrams...");
    let unigrams = arpa::unigrams_from_path(&args.arpa)?;

    eprintln!("Loading the vocabulary...");
    let words = arpa::read_word_list(BufReader::new(File::open(&args.vocab)?))?;

    let (vocab, report) = VocabularySet::build(words, &unigrams);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    writeln!(&mut out, "unigrams\t{}", unigrams.len())?;
    writeln!(&mut out, "vocabulary\t{}", report.input_len())?;
    writeln!(&mut out, "retained\t{}", report.retained_len())?;
    writeln!(
        &mut out,
        "retained_percent\t{:.1}",
        report.retained_fraction() * 100.0
    )?;
    for diagnostic in report.diagnostics() {
        writeln!(&mut out, "warning\t{diagnostic}")?;
    }

    if !args.prefix.is_empty() {
        let index = (!vocab.is_empty()).then(|| PrefixIndex::build(&vocab));
        for prefix in &args.prefix {
            let found = index.as_ref().is_some_and(|index| index.has_prefix(prefix));
            writeln!(&mut out, "prefix\t{prefix}\t{found}")?;
        }
    }

    out.flush()?;
    Ok(())
}
