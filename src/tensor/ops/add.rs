/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:31:47
 * @Description  : 张量的加法（及加等），两个张量必须形状严格一致；
 *                 另支持张量与纯数相加（纯数会广播到每个元素）。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{Add, AddAssign};

fn add_within_tensors(a: &Tensor, b: &Tensor) -> Tensor {
    assert!(
        a.is_same_shape(b),
        "{}",
        TensorError::OperatorError {
            operator: Operator::Add,
            tensor1_shape: a.shape().to_vec(),
            tensor2_shape: b.shape().to_vec(),
        }
    );
    Tensor {
        data: &a.data + &b.data,
    }
}

impl Add for Tensor {
    type Output = Tensor;
    fn add(self, other: Tensor) -> Tensor {
        add_within_tensors(&self, &other)
    }
}

impl<'a> Add<&'a Tensor> for Tensor {
    type Output = Tensor;
    fn add(self, other: &'a Tensor) -> Tensor {
        add_within_tensors(&self, other)
    }
}

impl<'a> Add<Tensor> for &'a Tensor {
    type Output = Tensor;
    fn add(self, other: Tensor) -> Tensor {
        add_within_tensors(self, &other)
    }
}

impl<'a, 'b> Add<&'b Tensor> for &'a Tensor {
    type Output = Tensor;
    fn add(self, other: &'b Tensor) -> Tensor {
        add_within_tensors(self, other)
    }
}

impl Add<f64> for &Tensor {
    type Output = Tensor;
    fn add(self, scalar: f64) -> Tensor {
        Tensor {
            data: &self.data + scalar,
        }
    }
}

impl<'a> AddAssign<&'a Tensor> for Tensor {
    fn add_assign(&mut self, other: &'a Tensor) {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator: Operator::AddAssign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        self.data += &other.data;
    }
}

impl AddAssign for Tensor {
    fn add_assign(&mut self, other: Tensor) {
        *self += &other;
    }
}
