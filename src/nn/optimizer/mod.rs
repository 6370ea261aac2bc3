/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14
 * @Description  : 优化器模块：用一个批次累积的梯度更新网络参数
 */

mod base;
mod sgd;

pub use base::Optimizer;
pub use sgd::SGD;
