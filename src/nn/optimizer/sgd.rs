/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14
 * @Description  : 梯度下降优化器实现
 */

use super::base::Optimizer;
use crate::nn::BatchGradients;
use crate::tensor::Tensor;

/// SGD (随机梯度下降) 优化器：θ = θ - η / batch_size · Σ∇θ
#[derive(Debug, Clone)]
pub struct SGD {
    learning_rate: f64,
}

impl SGD {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, weights: &mut [Tensor], biases: &mut [Tensor], gradients: &BatchGradients) {
        if gradients.batch_len == 0 {
            return;
        }
        // 梯度对批次求平均，而非求和
        let scale = self.learning_rate / gradients.batch_len as f64;

        for (w, der_w) in weights.iter_mut().zip(&gradients.der_weights) {
            *w -= der_w * scale;
        }
        for (b, der_b) in biases.iter_mut().zip(&gradients.der_biases) {
            *b -= der_b * scale;
        }
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, lr: f64) {
        self.learning_rate = lr;
    }
}
