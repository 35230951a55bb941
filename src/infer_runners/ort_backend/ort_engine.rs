//! ONNXRuntime backend.

use std::collections::HashSet;
use std::time::Instant;

use ndarray::{Array4, ArrayD};
use ort::inputs;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::value::TensorRef;
use prost::Message;

use crate::data::{DeployConfig, InferConfig, InferenceDevice, OutputMode, CROSS_MARK};
use crate::error::PipelineError;
use crate::infer_runners::ort_backend::onnx;

/// Static tensor attributes read from the graph: names and per-tensor
/// dimensions, with 0 marking a dynamic axis.
#[derive(Debug, Clone, Default)]
pub struct TensorAttr {
    pub names: Vec<String>,
    pub dimss: Vec<Vec<usize>>,
}

impl TensorAttr {
    pub fn dims_of(&self, name: &str) -> Option<&[usize]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.dimss[i].as_slice())
    }
}

/// Loaded network bound to a fixed execution device. The input buffer
/// is single-slot (batch 1); `run_fetch` takes `&mut self` and a call
/// replaces the previous input wholesale.
pub struct OrtEngine {
    session: Session,
    device: InferenceDevice,
    input_name: String,
    outputs_attrs: TensorAttr,
    profile: bool,
}

impl OrtEngine {
    pub fn new(config: &InferConfig, deploy: &DeployConfig) -> Result<Self, PipelineError> {
        let model_proto = Self::load_onnx(&config.model_path)?;
        let graph = model_proto.graph.as_ref().ok_or_else(|| {
            PipelineError::ModelLoad(format!(
                "no graph found in {}, failed to parse model",
                config.model_path
            ))
        })?;

        let initializer_names: HashSet<&str> =
            graph.initializer.iter().map(|t| t.name.as_str()).collect();
        let inputs_attrs = Self::io_from_value_info(&initializer_names, &graph.input);
        let outputs_attrs = Self::io_from_value_info(&initializer_names, &graph.output);

        Self::validate_deploy(config, deploy, &inputs_attrs, &outputs_attrs)?;

        let builder = Session::builder()
            .map_err(|e| PipelineError::ModelLoad(format!("failed to create session builder: {e}")))?;
        let (builder, device) = Self::select_device(builder, config.device)?;

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::ModelLoad(e.to_string()))?
            .commit_from_file(&config.model_path)
            .map_err(|e| {
                PipelineError::ModelLoad(format!(
                    "{CROSS_MARK} failed to load model {}: {e}",
                    config.model_path
                ))
            })?;

        log::info!(
            "Backend: ONNXRuntime | Opset: {} | Device: {} | Input: {} ({}x{})",
            model_proto.opset_import.first().map(|o| o.version).unwrap_or(0),
            device.str(),
            deploy.input_name,
            deploy.crop_size,
            deploy.crop_size,
        );

        Ok(Self {
            session,
            device,
            input_name: deploy.input_name.clone(),
            outputs_attrs,
            profile: config.profile,
        })
    }

    /// Forward pass returning the named output tensor as f32.
    pub fn run_fetch(
        &mut self,
        input: Array4<f32>,
        fetch: &str,
    ) -> Result<ArrayD<f32>, PipelineError> {
        if !self.outputs_attrs.names.iter().any(|n| n == fetch) {
            return Err(PipelineError::Runtime(format!(
                "layer '{fetch}' is not among the graph outputs: {:?}",
                self.outputs_attrs.names
            )));
        }

        let t_run = Instant::now();
        let input = input.into_dyn();
        let tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| PipelineError::Runtime(format!("failed to bind input tensor: {e}")))?;
        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => tensor])
            .map_err(|e| PipelineError::Runtime(format!("forward pass failed: {e}")))?;

        let y = outputs[fetch]
            .try_extract_array::<f32>()
            .map_err(|e| {
                PipelineError::Runtime(format!("output '{fetch}' is not extractable as f32: {e}"))
            })?
            .to_owned();

        if self.profile {
            log::info!("TIME | forward={:.2?} | layer={fetch}", t_run.elapsed());
        }
        Ok(y)
    }

    fn select_device(
        builder: SessionBuilder,
        requested: InferenceDevice,
    ) -> Result<(SessionBuilder, InferenceDevice), PipelineError> {
        match requested {
            InferenceDevice::CPU => Ok((builder, requested)),
            InferenceDevice::CUDA(device_id) => {
                #[cfg(feature = "cuda")]
                {
                    use ort::ep::ExecutionProvider;
                    use ort::execution_providers::CUDAExecutionProvider;

                    let ep = CUDAExecutionProvider::default().with_device_id(device_id as i32);
                    if ep.is_available().unwrap_or(false) {
                        let builder =
                            builder.with_execution_providers([ep.build()]).map_err(|e| {
                                PipelineError::ModelLoad(format!(
                                    "{CROSS_MARK} CUDA initialization failed: {e}"
                                ))
                            })?;
                        return Ok((builder, requested));
                    }
                    log::warn!("{CROSS_MARK} CUDA execution provider not available, using CPU");
                }
                #[cfg(not(feature = "cuda"))]
                {
                    let _ = device_id;
                    log::warn!("CUDA support not compiled in, using CPU");
                }
                Ok((builder, InferenceDevice::CPU))
            }
        }
    }

    fn validate_deploy(
        config: &InferConfig,
        deploy: &DeployConfig,
        inputs_attrs: &TensorAttr,
        outputs_attrs: &TensorAttr,
    ) -> Result<(), PipelineError> {
        let dims = inputs_attrs.dims_of(&deploy.input_name).ok_or_else(|| {
            PipelineError::ModelLoad(format!(
                "input '{}' not found in graph, available inputs: {:?}",
                deploy.input_name, inputs_attrs.names
            ))
        })?;

        if !dims.is_empty() {
            if dims.len() != 4 {
                return Err(PipelineError::ModelLoad(format!(
                    "input '{}' is {}-dimensional, expected an NCHW image input",
                    deploy.input_name,
                    dims.len()
                )));
            }
            // 0 marks a dynamic axis, which accepts any extent.
            if dims[1] != 0 && dims[1] != deploy.channels as usize {
                return Err(PipelineError::ModelLoad(format!(
                    "graph expects {} input channels, deploy descriptor declares {}",
                    dims[1], deploy.channels
                )));
            }
            let crop = deploy.crop_size as usize;
            if (dims[2] != 0 && dims[2] != crop) || (dims[3] != 0 && dims[3] != crop) {
                return Err(PipelineError::ModelLoad(format!(
                    "graph input resolution is {}x{}, deploy descriptor declares {}x{}",
                    dims[2], dims[3], crop, crop
                )));
            }
        }

        let wanted_layer = match config.output_mode {
            OutputMode::Classify => deploy.prob_layer.as_str(),
            OutputMode::ExtractFeatures => config
                .feature_layer
                .as_deref()
                .unwrap_or(deploy.feature_layer.as_str()),
        };
        let out_dims = outputs_attrs.dims_of(wanted_layer).ok_or_else(|| {
            PipelineError::ModelLoad(format!(
                "layer '{wanted_layer}' not found in graph outputs: {:?}",
                outputs_attrs.names
            ))
        })?;

        if config.output_mode == OutputMode::Classify {
            if let (Some(nc), Some(&last)) = (deploy.num_classes, out_dims.last()) {
                if last != 0 && last != nc {
                    return Err(PipelineError::ModelLoad(format!(
                        "probability layer '{wanted_layer}' has {last} classes, deploy descriptor declares {nc}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn io_from_value_info(
        initializer_names: &HashSet<&str>,
        value_info: &[onnx::ValueInfoProto],
    ) -> TensorAttr {
        let mut names: Vec<String> = Vec::new();
        let mut dimss: Vec<Vec<usize>> = Vec::new();
        for v in value_info.iter() {
            if initializer_names.contains(v.name.as_str()) {
                continue;
            }
            names.push(v.name.clone());

            let mut dims: Vec<usize> = Vec::new();
            if let Some(onnx::type_proto::Value::TensorType(tensor)) =
                v.r#type.as_ref().and_then(|t| t.value.as_ref())
            {
                if let Some(shape) = &tensor.shape {
                    for d in shape.dim.iter() {
                        match &d.value {
                            Some(onnx::tensor_shape_proto::dimension::Value::DimValue(x))
                                if *x > 0 =>
                            {
                                dims.push(*x as usize)
                            }
                            _ => dims.push(0),
                        }
                    }
                }
            }
            dimss.push(dims);
        }
        TensorAttr { names, dimss }
    }

    pub fn load_onnx<P: AsRef<std::path::Path>>(p: P) -> Result<onnx::ModelProto, PipelineError> {
        let f = std::fs::read(p.as_ref())?;
        onnx::ModelProto::decode(f.as_slice()).map_err(|e| {
            PipelineError::ModelLoad(format!(
                "failed to decode model {}: {e}",
                p.as_ref().display()
            ))
        })
    }

    pub fn device(&self) -> InferenceDevice {
        self.device
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_names(&self) -> &[String] {
        &self.outputs_attrs.names
    }
}
