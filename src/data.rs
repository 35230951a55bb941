mod cli;
mod deploy_config;
mod infer_config;
mod inference_device;
mod inference_result;
pub mod mean_blob;
mod mean_profile;
mod output_mode;

pub use cli::{ConvertMeanCli, DriverCli};
pub use deploy_config::DeployConfig;
pub use infer_config::InferConfig;
pub use inference_device::InferenceDevice;
pub use inference_result::InferenceResult;
pub use mean_profile::{MeanArray, MeanProfile, DEFAULT_CHANNEL_MEANS};
pub use output_mode::OutputMode;

pub(crate) const CROSS_MARK: &str = "❌";
