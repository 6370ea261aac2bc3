/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 全连接层
 *
 * forward:  z = W·a_prev + b,  a = act(z)
 * backward: ∂W = δ·a_prevᵀ,  ∂b = δ,  δ_prev = (Wᵀ·δ) ⊙ act_prev'(z_prev)
 *
 * 形状约定：
 * - 上一层的激活值被展平为列向量 [n_in, 1]
 * - 权重 [n_out, n_in]，偏置 [n_out, 1]，z/a 均为 [n_out, 1]
 */

use super::{delta_for_prev_layer, ForwardRecord, Layer, LayerGradients, TraitLayer};
use crate::nn::functions::Activation;
use crate::tensor::Tensor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullyConnectedLayer {
    num_neurons: usize,
    activation: Activation,
}

impl FullyConnectedLayer {
    pub fn new(num_neurons: usize, activation: Activation) -> Self {
        Self {
            num_neurons,
            activation,
        }
    }

    pub fn activation_function(&self) -> Activation {
        self.activation
    }

    fn assert_input_size(&self, prev_layer: &Layer, prev_record: &ForwardRecord) {
        assert!(
            prev_record.a.size() == prev_layer.num_neurons_out(),
            "全连接层的输入元素数{}与上一层的神经元数{}不符",
            prev_record.a.size(),
            prev_layer.num_neurons_out()
        );
    }
}

impl TraitLayer for FullyConnectedLayer {
    fn depth(&self) -> usize {
        1
    }

    fn height(&self) -> usize {
        self.num_neurons
    }

    fn width(&self) -> usize {
        1
    }

    fn activation(&self) -> Option<Activation> {
        Some(self.activation)
    }

    fn supports_param_init(&self) -> bool {
        true
    }

    fn param_shapes(&self, prev_layer: &Layer) -> Option<(Vec<usize>, Vec<usize>)> {
        let n_out = self.num_neurons_out();
        Some((
            vec![n_out, prev_layer.num_neurons_out()],
            vec![n_out, 1],
        ))
    }

    fn feedforward(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        biases: &Tensor,
    ) -> ForwardRecord {
        self.assert_input_size(prev_layer, prev_record);
        let n_out = self.num_neurons_out();
        let input_a = prev_record.a.to_column();
        weights.assert_shape(&[n_out, input_a.size()], "全连接层的权重");
        biases.assert_shape(&[n_out, 1], "全连接层的偏置");

        let z = weights.mat_mul(&input_a) + biases;
        let a = self.activation.apply(&z);
        ForwardRecord::new(z, a)
    }

    fn backpropagate(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        delta_z: &Tensor,
    ) -> LayerGradients {
        self.assert_input_size(prev_layer, prev_record);
        let n_out = self.num_neurons_out();
        let input_a = prev_record.a.to_column();
        weights.assert_shape(&[n_out, input_a.size()], "全连接层的权重");
        delta_z.assert_shape(&[n_out, 1], "全连接层的误差");

        // 权重与偏置的导数
        let der_weights = delta_z.mat_mul(&input_a.transpose());
        let der_biases = delta_z.clone();

        // 误差反传到上一层，并恢复为上一层激活值的形状
        let delta_a_prev = weights
            .transpose()
            .mat_mul(delta_z)
            .reshape(prev_record.a.shape());
        let delta_z_prev = delta_for_prev_layer(prev_layer, prev_record, delta_a_prev);

        LayerGradients {
            der_weights,
            der_biases,
            delta_z_prev,
        }
    }
}
