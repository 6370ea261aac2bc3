/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14
 * @Description  : 优化器基础trait
 */

use crate::nn::BatchGradients;
use crate::tensor::Tensor;

/// 优化器核心 trait
pub trait Optimizer {
    /// 参数更新（使用一个批次内累加的梯度）
    ///
    /// `weights`/`biases`与`gradients`中的各项按层一一对应；
    /// 无参数的层对应空张量，更新时自然跳过。
    fn step(&mut self, weights: &mut [Tensor], biases: &mut [Tensor], gradients: &BatchGradients);

    /// 获取学习率
    fn learning_rate(&self) -> f64;

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f64);
}
