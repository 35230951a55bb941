use anyhow::Result;
use clap::Parser;

use coolnet_infer::data::mean_blob::convert_mean_file;
use coolnet_infer::data::ConvertMeanCli;

fn main() {
    let cli = ConvertMeanCli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: ConvertMeanCli) -> Result<()> {
    let out_path = convert_mean_file(&cli.mean_blob)?;
    println!("Wrote {}", out_path.display());
    Ok(())
}
