/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 10:12:31
 * @Description  : 张量（双精度），网络中所有的激活值、误差、权重和偏置都以张量表示
 */

use ndarray::{Array, IxDyn};
use rand::Rng;

use crate::errors::{ComparisonOperator, TensorError};

mod ops {
    pub mod add;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod property;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：列向量统一用形状`[n, 1]`表示，全连接层的输入输出都遵循这一约定。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f64, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。
    /// 注：除了`data`长度为1且shape为`[]`的情况（标量），`data`的长度必须和`shape`中所有元素的乘积相等。
    pub fn new(data: &[f64], shape: &[usize]) -> Tensor {
        let expected_len = shape.iter().product::<usize>();
        assert!(
            data.len() == expected_len,
            "{}",
            TensorError::DataLengthMismatch {
                shape: shape.to_vec(),
                data_len: data.len(),
            }
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).unwrap();
        Tensor { data }
    }

    /// 创建一个元素全为0的张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 创建一个元素全为1的张量
    pub fn ones(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 创建一个不含任何元素的张量（形状为`[0]`），用于无参数的层（如池化层）
    pub fn empty() -> Tensor {
        Tensor::zeros(&[0])
    }

    /// 创建一个1-of-k（one-hot）编码的列向量，形状为`[num_classes, 1]`
    pub fn one_hot(class_index: usize, num_classes: usize) -> Tensor {
        assert!(
            class_index < num_classes,
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "class_index".to_string(),
                operator: ComparisonOperator::LessThan,
                threshold: num_classes,
            }
        );
        let mut tensor = Tensor::zeros(&[num_classes, 1]);
        tensor[[class_index, 0]] = 1.0;
        tensor
    }

    /// 用给定的随机数生成器创建一个服从正态分布的随机张量。
    /// 采用Box-Muller变换，一次生成两个样本。
    pub fn new_normal_with_rng<R: Rng + ?Sized>(
        mean: f64,
        std_dev: f64,
        shape: &[usize],
        rng: &mut R,
    ) -> Tensor {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f64 = rng.r#gen();
            let u2: f64 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f64::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Tensor::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（使用线程随机数生成器，不可复现）
    pub fn new_normal(mean: f64, std_dev: f64, shape: &[usize]) -> Tensor {
        Tensor::new_normal_with_rng(mean, std_dev, shape, &mut rand::thread_rng())
    }

    /// 直接由`ndarray`数组构造
    pub fn from_array(data: Array<f64, IxDyn>) -> Tensor {
        Tensor { data }
    }
}
