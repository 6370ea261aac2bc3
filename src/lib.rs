//! # Only Net
//!
//! `only_net`用纯rust从第一性原理实现全连接/卷积神经网络的前向传播与反向传播（不依赖自动微分），
//! 并以小批量随机梯度下降（SGD）训练网络。
//!
//! ```ignore
//! use only_net::nn::{Activation, Cost, FullyConnectedLayer, InputLayer, Network, TrainConfig, Trainer};
//!
//! let mut net = Network::new_with_seed(
//!     InputLayer::new(4, 1),
//!     vec![
//!         FullyConnectedLayer::new(3, Activation::Sigmoid).into(),
//!         FullyConnectedLayer::new(2, Activation::Sigmoid).into(),
//!     ],
//!     Cost::MeanSquared,
//!     42,
//! )?;
//! Trainer::new(TrainConfig::new().num_epochs(30).batch_size(10).learning_rate(3.0))
//!     .train(&mut net, &mut observations)?;
//! let evaluation = only_net::nn::test(&net, &tests);
//! ```

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
