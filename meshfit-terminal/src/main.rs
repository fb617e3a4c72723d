/// meshfit - Model statistics and normalization in the terminal
///
/// Usage: meshfit [OPTIONS] <PATH>
///   --format <obj|stl|gltf>    Override format detection
///   --low / --high <RADIUS>    Radius range that needs no rescale
///   --radius-mode <MODE>       half-max-dimension | bounding-sphere
///   -v, -vv                    More logging (RUST_LOG also works)

use clap::Parser;
use meshfit_terminal::{run_stdout, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    run_stdout(&args)?;
    Ok(())
}
