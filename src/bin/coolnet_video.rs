use anyhow::Result;
use clap::Parser;

use coolnet_infer::data::{DriverCli, InferConfig, InferenceDevice, MeanProfile, OutputMode};
use coolnet_infer::{load_network, process_video, PipelineError};

fn main() {
    let cli = DriverCli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: DriverCli) -> Result<()> {
    let mode = OutputMode::from_str(&cli.mode).ok_or_else(|| {
        PipelineError::Usage(format!(
            "unknown output mode '{}', expected `classify` or `features`",
            cli.mode
        ))
    })?;

    let mean = if cli.mean == "default" {
        MeanProfile::default()
    } else {
        MeanProfile::from_file(&cli.mean)?
    };

    let device = if cli.gpu {
        InferenceDevice::CUDA(cli.device_id)
    } else {
        InferenceDevice::CPU
    };

    let mut config = InferConfig::new()
        .with_model(&cli.weights.to_string_lossy())
        .with_deploy(&cli.deploy.to_string_lossy())
        .with_device(device)
        .with_mean(mean)
        .with_output_mode(mode)
        .with_profile(cli.profile);
    if let Some(layer) = &cli.layer {
        config = config.with_feature_layer(layer);
    }

    let mut network = load_network(&config)?;
    let (out_path, summary) = process_video(&mut network, &config, &cli.video)?;

    println!(
        "Wrote {} records to {}",
        summary.frames,
        out_path.display()
    );
    Ok(())
}
