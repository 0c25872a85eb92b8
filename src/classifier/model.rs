use std::collections::HashMap;

use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::error::{InferenceError, LoadError};

/// Owns the loaded ONNX session and exposes the single `predict` operation.
///
/// Constructed only after the session has been committed and structurally
/// validated; the orchestrator hands out a gateway only once loading
/// succeeded, so an existing gateway is ready by definition.
#[derive(Debug)]
pub struct ModelGateway {
    session: Session,
    input_len: usize,
}

impl ModelGateway {
    /// Wraps a committed session expecting encoded inputs of `input_len`
    /// entries.
    ///
    /// Fails if the model does not have the single-input / single-output
    /// structure the pipeline relies on.
    pub(crate) fn new(session: Session, input_len: usize) -> Result<Self, LoadError> {
        if session.inputs.is_empty() {
            return Err(LoadError::InvalidMetadata(
                "model has no input tensor".into(),
            ));
        }
        if session.outputs.is_empty() {
            return Err(LoadError::InvalidMetadata(
                "model has no output tensor".into(),
            ));
        }
        Ok(Self { session, input_len })
    }

    /// Runs one inference over an encoded input of exactly `input_len`
    /// entries and returns the scalar sentiment score.
    ///
    /// Pure given the loaded model: the same input always yields the same
    /// score and the input buffer is never modified. The output tensor is
    /// a scratch resource scoped to this call; it is dropped before the
    /// function returns on success and failure paths alike.
    pub fn predict(&self, input: &[i64]) -> Result<f32, InferenceError> {
        if input.len() != self.input_len {
            return Err(InferenceError::InputShape {
                expected: self.input_len,
                actual: input.len(),
            });
        }

        let input_array = Array2::from_shape_vec((1, input.len()), input.to_vec())
            .map_err(|e| InferenceError::Tensor(format!("failed to create input array: {}", e)))?;
        let input_dyn = input_array.into_dyn();
        let input_ids = input_dyn.as_standard_layout();

        let input_name = self.session.inputs[0].name.clone();
        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            input_name.as_str(),
            Tensor::from_array(&input_ids)
                .map_err(|e| InferenceError::Tensor(format!("failed to create input tensor: {}", e)))?,
        );

        let score = {
            let outputs = self.session.run(input_tensors)?;
            let output_tensor = outputs[0].try_extract_tensor::<f32>()?;
            output_tensor
                .iter()
                .next()
                .copied()
                .ok_or(InferenceError::EmptyOutput)?
        };

        Ok(score)
    }

    /// Input length this gateway accepts (the model's `max_len`).
    pub fn input_len(&self) -> usize {
        self.input_len
    }
}
