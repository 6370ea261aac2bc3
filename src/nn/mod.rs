/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-10-14 11:40:12
 * @Description  : 负责神经网络（neural network）的构建、训练与评估
 */

mod config;
mod error;
mod evaluator;
pub mod functions;
pub mod layer;
mod network;
pub mod optimizer;
mod trainer;

pub use config::TrainConfig;
pub use error::NetworkError;
pub use evaluator::{test, Evaluation};
pub use functions::{Activation, Cost, Pooling};
pub use layer::{
    ConvolutionalLayer, ForwardRecord, FullyConnectedLayer, InputLayer, Layer, LayerGradients,
    PoolingLayer, TraitLayer,
};
pub use network::{validate_chain, BatchGradients, Network, Observation};
pub use optimizer::{Optimizer, SGD};
pub use trainer::{train, EpochReport, LogObserver, TrainObserver, Trainer};

#[cfg(test)]
mod tests;
