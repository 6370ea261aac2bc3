/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:33:02
 * @Description  : 张量的减法（及减等），两个张量必须形状严格一致
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{Sub, SubAssign};

fn sub_within_tensors(a: &Tensor, b: &Tensor) -> Tensor {
    assert!(
        a.is_same_shape(b),
        "{}",
        TensorError::OperatorError {
            operator: Operator::Sub,
            tensor1_shape: a.shape().to_vec(),
            tensor2_shape: b.shape().to_vec(),
        }
    );
    Tensor {
        data: &a.data - &b.data,
    }
}

impl Sub for Tensor {
    type Output = Tensor;
    fn sub(self, other: Tensor) -> Tensor {
        sub_within_tensors(&self, &other)
    }
}

impl<'a> Sub<&'a Tensor> for Tensor {
    type Output = Tensor;
    fn sub(self, other: &'a Tensor) -> Tensor {
        sub_within_tensors(&self, other)
    }
}

impl<'a> Sub<Tensor> for &'a Tensor {
    type Output = Tensor;
    fn sub(self, other: Tensor) -> Tensor {
        sub_within_tensors(self, &other)
    }
}

impl<'a, 'b> Sub<&'b Tensor> for &'a Tensor {
    type Output = Tensor;
    fn sub(self, other: &'b Tensor) -> Tensor {
        sub_within_tensors(self, other)
    }
}

impl<'a> SubAssign<&'a Tensor> for Tensor {
    fn sub_assign(&mut self, other: &'a Tensor) {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator: Operator::SubAssign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        self.data -= &other.data;
    }
}

impl SubAssign for Tensor {
    fn sub_assign(&mut self, other: Tensor) {
        *self -= &other;
    }
}
