use crate::error::TensorLiteError;
use crate::tensor::Tensor;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(TensorLiteError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(TensorLiteError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(TensorLiteError),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
}

impl From<TensorLiteError> for GradCheckError {
    fn from(err: TensorLiteError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Step size and tolerances for [`check_grad`].
///
/// The defaults are sized for `f32` forward values: a smaller `epsilon`
/// drowns the finite difference in rounding noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Half-width of the central difference.
    pub epsilon: f64,
    /// Absolute difference always accepted.
    pub abs_tolerance: f64,
    /// Relative difference accepted beyond `abs_tolerance`.
    pub rel_tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-3,
            abs_tolerance: 1e-2,
            rel_tolerance: 1e-2,
        }
    }
}

/// Checks analytical gradients against numerical gradients using central
/// finite differences.
///
/// The scalar loss is `sum(func(inputs) * output_grad)`, so the analytical
/// side is `func(inputs).backward(Some(output_grad))`. Every input that
/// requires grad must be a leaf; its gradient is reset before the check and
/// holds the analytical gradient afterwards.
pub fn check_grad<F>(
    func: F,
    inputs: &[Tensor],
    output_grad: &Tensor,
    config: &GradCheckConfig,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, TensorLiteError>,
{
    // --- Initial Checks ---
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
        input.zero_grad();
    }

    // --- 1. Analytical gradients ---
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.shape() != output_grad.shape() {
        return Err(TensorLiteError::ShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape(),
            operation: "check_grad".to_string(),
        }
        .into());
    }

    let any_input_requires_grad = inputs.iter().any(Tensor::requires_grad);
    if any_input_requires_grad && !output.requires_grad() {
        return Err(GradCheckError::RequiresGradPropagationError);
    }
    output
        .backward(Some(output_grad))
        .map_err(GradCheckError::BackwardPassError)?;

    let weights: Vec<f64> = output_grad.data_vec().iter().map(|&w| w as f64).collect();

    // --- 2. Numerical gradients, input by input ---
    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }

        let analytical_grad_data = original_input
            .grad_vec()
            .map_err(|_| GradCheckError::MissingAnalyticalGrad { input_index: i })?;
        let original_data = original_input.data_vec();
        let shape = original_input.shape();

        for elem_idx in 0..original_data.len() {
            let x = original_data[elem_idx] as f64;
            let x_plus = (x + config.epsilon) as f32;
            let x_minus = (x - config.epsilon) as f32;

            let loss_plus = perturbed_loss(
                &func,
                inputs,
                i,
                &original_data,
                &shape,
                elem_idx,
                x_plus,
                &weights,
            )?;
            let loss_minus = perturbed_loss(
                &func,
                inputs,
                i,
                &original_data,
                &shape,
                elem_idx,
                x_minus,
                &weights,
            )?;

            // Divide by the step actually taken after rounding to f32.
            let numerical_grad = (loss_plus - loss_minus) / (x_plus as f64 - x_minus as f64);
            let analytical_grad = analytical_grad_data[elem_idx] as f64;

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            if !relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = config.abs_tolerance,
                max_relative = config.rel_tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
        log::debug!("check_grad: input {} matches ({} elements)", i, original_data.len());
    }

    Ok(())
}

/// Runs `func` with element `elem_idx` of input `input_index` replaced by
/// `value` and returns the weighted loss.
#[allow(clippy::too_many_arguments)]
fn perturbed_loss<F>(
    func: &F,
    inputs: &[Tensor],
    input_index: usize,
    original_data: &[f32],
    shape: &[usize],
    elem_idx: usize,
    value: f32,
    weights: &[f64],
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Tensor]) -> Result<Tensor, TensorLiteError>,
{
    let mut data = original_data.to_vec();
    data[elem_idx] = value;
    let perturbed_tensor = Tensor::new_with_grad(data, shape.to_vec(), true)?;

    let mut perturbed_inputs = inputs.to_vec();
    perturbed_inputs[input_index] = perturbed_tensor;

    let output = func(&perturbed_inputs).map_err(GradCheckError::ForwardPassError)?;
    Ok(output
        .data_vec()
        .iter()
        .zip(weights.iter())
        .map(|(&y, &w)| y as f64 * w)
        .sum())
}
