use super::Tensor;
use crate::errors::TensorError;
use ndarray::IxDyn;

impl Tensor {
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.data.len();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            }
        );
        // 先转为标准布局，保证按行优先顺序重排
        let data = self.data.as_standard_layout().to_owned();
        Self {
            data: data.into_shape(IxDyn(shape)).unwrap(),
        }
    }

    /// 展平为列向量`[size, 1]`
    pub fn to_column(&self) -> Self {
        self.reshape(&[self.size(), 1])
    }

    /// 矩阵转置，仅适用于2阶张量
    pub fn transpose(&self) -> Self {
        self.assert_dimension(2);
        Self {
            data: self.data.t().as_standard_layout().to_owned(),
        }
    }
}
