/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 函数库：激活函数、代价函数与池化函数。
 *                 每个枚举值都同时给出前向函数与其解析导数，二者均为纯函数、双精度、逐元素
 *                 （代价函数按输出向量与标签向量逐元素计算，池化函数按窗口计算）。
 */

use crate::tensor::Tensor;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 激活函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Identity,
    Sigmoid,
    Tanh,
    ReLU,
}

fn identity(x: f64) -> f64 {
    x
}

fn der_identity(_x: f64) -> f64 {
    1.0
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn der_sigmoid(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

fn tanh(x: f64) -> f64 {
    x.tanh()
}

fn der_tanh(x: f64) -> f64 {
    1.0 - x.tanh().powi(2)
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

// 0处取0
fn der_relu(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

impl Activation {
    pub fn function(self) -> fn(f64) -> f64 {
        match self {
            Activation::Identity => identity,
            Activation::Sigmoid => sigmoid,
            Activation::Tanh => tanh,
            Activation::ReLU => relu,
        }
    }

    /// 返回激活函数的导数（以预激活值`z`为自变量）
    pub fn derivative_of(self) -> fn(f64) -> f64 {
        match self {
            Activation::Identity => der_identity,
            Activation::Sigmoid => der_sigmoid,
            Activation::Tanh => der_tanh,
            Activation::ReLU => der_relu,
        }
    }

    pub fn apply(self, z: &Tensor) -> Tensor {
        z.map(self.function())
    }

    pub fn derivative(self, z: &Tensor) -> Tensor {
        z.map(self.derivative_of())
    }

    pub fn name(self) -> &'static str {
        match self {
            Activation::Identity => "identity",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 代价函数，`a`为输出层激活值，`y`为1-of-k编码的标签，二者形状须一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cost {
    /// C = ½·Σ(a − y)²
    MeanSquared,
    /// C = −Σ[y·ln(a) + (1 − y)·ln(1 − a)]，要求 a ∈ (0, 1)
    CrossEntropy,
}

// 防止ln(0)
const CROSS_ENTROPY_EPSILON: f64 = 1e-12;

fn mean_squared(a: &Tensor, y: &Tensor) -> f64 {
    0.5 * (a - y).map(|d| d * d).sum()
}

fn der_mean_squared(a: &Tensor, y: &Tensor) -> Tensor {
    a - y
}

fn clamp_probability(p: f64) -> f64 {
    p.clamp(CROSS_ENTROPY_EPSILON, 1.0 - CROSS_ENTROPY_EPSILON)
}

fn cross_entropy(a: &Tensor, y: &Tensor) -> f64 {
    let a = a.map(clamp_probability);
    let positive = y * &a.map(f64::ln);
    let negative = y.map(|v| 1.0 - v) * a.map(|v| (1.0 - v).ln());
    -(positive + negative).sum()
}

fn der_cross_entropy(a: &Tensor, y: &Tensor) -> Tensor {
    let a = a.map(clamp_probability);
    let denominator = a.map(|v| v * (1.0 - v));
    let numerator = &a - y;
    let mut result = numerator;
    result
        .view_mut()
        .zip_mut_with(&denominator.view(), |n, &d| *n /= d);
    result
}

impl Cost {
    pub fn function(self) -> fn(&Tensor, &Tensor) -> f64 {
        match self {
            Cost::MeanSquared => mean_squared,
            Cost::CrossEntropy => cross_entropy,
        }
    }

    /// 返回代价函数关于输出激活值`a`的导数 ∂C/∂a
    pub fn derivative_of(self) -> fn(&Tensor, &Tensor) -> Tensor {
        match self {
            Cost::MeanSquared => der_mean_squared,
            Cost::CrossEntropy => der_cross_entropy,
        }
    }

    pub fn value(self, a: &Tensor, y: &Tensor) -> f64 {
        a.assert_shape(y.shape(), "代价函数的输出激活值");
        (self.function())(a, y)
    }

    pub fn derivative(self, a: &Tensor, y: &Tensor) -> Tensor {
        a.assert_shape(y.shape(), "代价函数的输出激活值");
        (self.derivative_of())(a, y)
    }

    pub fn name(self) -> &'static str {
        match self {
            Cost::MeanSquared => "mean_squared",
            Cost::CrossEntropy => "cross_entropy",
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 池化函数：把一个窗口归约为一个标量；其导数给出窗口内每个元素对结果的偏导
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pooling {
    Max,
    Average,
}

fn max_pool(window: ArrayView2<f64>) -> f64 {
    window.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

// 掩码：窗口内（按行优先）第一个最大值处为1，其余为0
fn der_max_pool(window: ArrayView2<f64>) -> Array2<f64> {
    let mut mask = Array2::zeros(window.raw_dim());
    let mut best: Option<((usize, usize), f64)> = None;
    for ((i, j), &v) in window.indexed_iter() {
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some(((i, j), v)),
        }
    }
    if let Some(((i, j), _)) = best {
        mask[[i, j]] = 1.0;
    }
    mask
}

fn average_pool(window: ArrayView2<f64>) -> f64 {
    window.mean().unwrap_or(0.0)
}

fn der_average_pool(window: ArrayView2<f64>) -> Array2<f64> {
    let n = window.len().max(1) as f64;
    Array2::from_elem(window.raw_dim(), 1.0 / n)
}

impl Pooling {
    pub fn function(self) -> fn(ArrayView2<f64>) -> f64 {
        match self {
            Pooling::Max => max_pool,
            Pooling::Average => average_pool,
        }
    }

    pub fn derivative_of(self) -> fn(ArrayView2<f64>) -> Array2<f64> {
        match self {
            Pooling::Max => der_max_pool,
            Pooling::Average => der_average_pool,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pooling::Max => "max",
            Pooling::Average => "average",
        }
    }
}

impl fmt::Display for Pooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
