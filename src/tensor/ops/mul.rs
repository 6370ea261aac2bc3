/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:35:40
 * @Description  : 张量的乘法，实现了张量与纯数的数乘以及两个形状一致的张量“逐元素”相乘（哈达玛积）。
 *                 注意：这里的乘法与线性代数中的矩阵乘法不同，矩阵乘法请用`mat_mul`。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::Mul;

fn mul_within_tensors(a: &Tensor, b: &Tensor) -> Tensor {
    assert!(
        a.is_same_shape(b),
        "{}",
        TensorError::OperatorError {
            operator: Operator::Mul,
            tensor1_shape: a.shape().to_vec(),
            tensor2_shape: b.shape().to_vec(),
        }
    );
    Tensor {
        data: &a.data * &b.data,
    }
}

impl Mul for Tensor {
    type Output = Tensor;
    fn mul(self, other: Tensor) -> Tensor {
        mul_within_tensors(&self, &other)
    }
}

impl<'a> Mul<&'a Tensor> for Tensor {
    type Output = Tensor;
    fn mul(self, other: &'a Tensor) -> Tensor {
        mul_within_tensors(&self, other)
    }
}

impl<'a> Mul<Tensor> for &'a Tensor {
    type Output = Tensor;
    fn mul(self, other: Tensor) -> Tensor {
        mul_within_tensors(self, &other)
    }
}

impl<'a, 'b> Mul<&'b Tensor> for &'a Tensor {
    type Output = Tensor;
    fn mul(self, other: &'b Tensor) -> Tensor {
        mul_within_tensors(self, other)
    }
}

impl Mul<f64> for Tensor {
    type Output = Tensor;
    fn mul(self, scalar: f64) -> Tensor {
        Tensor {
            data: self.data * scalar,
        }
    }
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;
    fn mul(self, scalar: f64) -> Tensor {
        Tensor {
            data: &self.data * scalar,
        }
    }
}

impl Mul<Tensor> for f64 {
    type Output = Tensor;
    fn mul(self, tensor: Tensor) -> Tensor {
        tensor * self
    }
}

impl<'a> Mul<&'a Tensor> for f64 {
    type Output = Tensor;
    fn mul(self, tensor: &'a Tensor) -> Tensor {
        tensor * self
    }
}
