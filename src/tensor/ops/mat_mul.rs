use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Ix2;

impl Tensor {
    /// 矩阵乘法，两个张量都须为2阶，且前者的列数等于后者的行数
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        self.assert_dimension(2);
        other.assert_dimension(2);
        assert!(
            self.shape()[1] == other.shape()[0],
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        // 将动态维度数组转换为常量维度数组
        let self_data = self.data.view().into_dimensionality::<Ix2>().unwrap();
        let other_data = other.data.view().into_dimensionality::<Ix2>().unwrap();
        Tensor {
            data: self_data.dot(&other_data).into_dyn(),
        }
    }
}
