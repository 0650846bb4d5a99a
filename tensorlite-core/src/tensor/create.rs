// src/tensor/create.rs

use crate::error::TensorLiteError;
use crate::tensor::Tensor;
use crate::tensor_data::checked_numel;
use num_traits::ToPrimitive;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, TensorLiteError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, TensorLiteError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, TensorLiteError> {
    let numel = checked_numel(shape)?;
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Zeros with the same shape as `tensor`. The result never tracks gradients.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, TensorLiteError> {
    zeros(&tensor.shape())
}

/// Ones with the same shape as `tensor`. The result never tracks gradients.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, TensorLiteError> {
    ones(&tensor.shape())
}

/// Creates a zero-rank tensor holding a single value.
pub fn scalar(value: f32, requires_grad: bool) -> Result<Tensor, TensorLiteError> {
    Tensor::new_with_grad(vec![value], vec![], requires_grad)
}

/// Creates a tensor from any primitive numeric slice, coercing every element
/// to `f32`.
///
/// # Errors
/// `InvalidTensorData` if an element has no `f32` representation (including
/// finite values beyond the `f32` range) or if the number of elements does
/// not match `shape`.
pub fn from_values<T: ToPrimitive>(
    values: &[T],
    shape: Vec<usize>,
    requires_grad: bool,
) -> Result<Tensor, TensorLiteError> {
    let data_vec = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let source_finite = v.to_f64().map_or(false, f64::is_finite);
            match v.to_f32() {
                Some(x) if x.is_finite() || !source_finite => Ok(x),
                _ => Err(TensorLiteError::InvalidTensorData {
                    reason: format!("element {} cannot be represented as f32", i),
                }),
            }
        })
        .collect::<Result<Vec<f32>, _>>()?;
    Tensor::new_with_grad(data_vec, shape, requires_grad)
}

/// Creates a 2-D tensor of shape `[rows.len(), row_len]` from nested rows.
///
/// # Errors
/// `InvalidTensorData` if the rows do not all have the same length.
pub fn from_rows(rows: &[Vec<f32>], requires_grad: bool) -> Result<Tensor, TensorLiteError> {
    let row_len = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != row_len) {
        return Err(TensorLiteError::InvalidTensorData {
            reason: format!(
                "ragged rows: row {} has {} elements, expected {}",
                i,
                row.len(),
                row_len
            ),
        });
    }
    let data_vec = rows.iter().flatten().copied().collect();
    Tensor::new_with_grad(data_vec, vec![rows.len(), row_len], requires_grad)
}

/// Uniform samples in `[0, 1)` from the thread-local RNG.
pub fn rand(shape: &[usize], requires_grad: bool) -> Result<Tensor, TensorLiteError> {
    sample_with(&mut rand::thread_rng(), shape, requires_grad, |rng| rng.gen::<f32>())
}

/// Standard normal samples from the thread-local RNG.
pub fn randn(shape: &[usize], requires_grad: bool) -> Result<Tensor, TensorLiteError> {
    sample_with(&mut rand::thread_rng(), shape, requires_grad, |rng| {
        StandardNormal.sample(rng)
    })
}

/// Reproducible variant of [`rand`].
pub fn rand_seeded(shape: &[usize], requires_grad: bool, seed: u64) -> Result<Tensor, TensorLiteError> {
    sample_with(&mut StdRng::seed_from_u64(seed), shape, requires_grad, |rng| rng.gen::<f32>())
}

/// Reproducible variant of [`randn`].
pub fn randn_seeded(shape: &[usize], requires_grad: bool, seed: u64) -> Result<Tensor, TensorLiteError> {
    sample_with(&mut StdRng::seed_from_u64(seed), shape, requires_grad, |rng| {
        StandardNormal.sample(rng)
    })
}

fn sample_with<R, F>(
    rng: &mut R,
    shape: &[usize],
    requires_grad: bool,
    mut sample: F,
) -> Result<Tensor, TensorLiteError>
where
    R: Rng,
    F: FnMut(&mut R) -> f32,
{
    let numel = checked_numel(shape)?;
    let data_vec: Vec<f32> = (0..numel).map(|_| sample(rng)).collect();
    Tensor::new_with_grad(data_vec, shape.to_vec(), requires_grad)
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
