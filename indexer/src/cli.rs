use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Directory containing date-stamped benchmark data.
    #[arg(long, env = "BENCH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Output path for index.json.
    #[arg(long, env = "BENCH_INDEX_OUTPUT", default_value = "data/index.json")]
    pub output: PathBuf,

    /// Only index date directories named `YYYY-MM-DD` and commits that are lowercase hex.
    #[arg(long, env = "BENCH_INDEX_STRICT", default_value = "false")]
    pub strict: bool,
}
