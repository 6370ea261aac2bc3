use crate::tensor::Tensor;
use ndarray::{Array, Dimension, IxDyn, Zip};
use std::cmp::PartialEq;

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Tensor {
    /// 对张量中的所有元素求和
    pub fn sum(&self) -> f64 {
        let mut value = 0.0;
        Zip::from(&self.data).for_each(|a| value += a);
        value
    }

    /// 对两个形状一致的张量逐元素相乘后求和
    pub fn dot_sum(&self, other: &Tensor) -> f64 {
        (self * other).sum()
    }

    /// 逐元素应用函数`f`，返回新张量
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor {
            data: self.data.mapv(f),
        }
    }

    /// 返回（按行优先展平后）最大元素的下标；若有多个最大值，取第一个。
    /// 空张量返回`None`。
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, best_v)) if v <= best_v => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// 克罗内克（Kronecker）块扩张：把最后两个维度上的每个元素复制成`block × block`的块。
    /// 如形状`[c, h, w]`扩张为`[c, h*block, w*block]`。
    pub fn kron_blocks(&self, block: usize) -> Tensor {
        let shape = self.shape();
        let ndim = shape.len();
        assert!(ndim >= 2, "克罗内克块扩张要求张量至少为2阶");

        let mut new_shape = shape.to_vec();
        new_shape[ndim - 2] *= block;
        new_shape[ndim - 1] *= block;

        let data = Array::from_shape_fn(IxDyn(&new_shape), |index| {
            let mut src = index.slice().to_vec();
            src[ndim - 2] /= block;
            src[ndim - 1] /= block;
            self.data[src.as_slice()]
        });
        Tensor { data }
    }
}
