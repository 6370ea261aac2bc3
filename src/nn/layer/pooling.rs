/*
 * @Author       : 老董
 * @Date         : 2026-10-14
 * @Description  : 池化层（窗口不重叠，步长 = window_size）
 *
 * 约束：
 * - 上一层必须是深度相同的卷积层，其输出为 [depth, 1, H, W]
 * - 没有权重与偏置，传入的二者必须是空张量
 * - H、W 须能被 window_size 整除
 *
 * forward:  每个 window×window 窗口经池化函数归约为一个标量，a == z，形状 [depth, height, width]
 * backward: δ 经克罗内克块扩张回到 [depth, 1, H, W]，每个窗口再乘以池化函数在原窗口上的导数
 *           （最大池化即最大值位置的掩码），最后乘以卷积层激活函数的导数
 */

use super::{delta_for_prev_layer, ConvolutionalLayer, ForwardRecord, Layer, LayerGradients, TraitLayer};
use crate::errors::ComparisonOperator;
use crate::nn::functions::Pooling;
use crate::nn::NetworkError;
use crate::tensor::Tensor;
use ndarray::{s, Ix4};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolingLayer {
    depth: usize,
    height: usize,
    width: usize,
    window_size: usize,
    stride_length: usize,
    pooling: Pooling,
}

impl PoolingLayer {
    pub fn new(
        depth: usize,
        height: usize,
        width: usize,
        window_size: usize,
        pooling: Pooling,
    ) -> Result<Self, NetworkError> {
        if window_size == 0 {
            return Err(NetworkError::ValueMustSatisfyComparison {
                value_name: "window_size".to_string(),
                operator: ComparisonOperator::GreaterThan,
                threshold: 0.0,
            });
        }
        Ok(Self {
            depth,
            height,
            width,
            window_size,
            stride_length: window_size,
            pooling,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn stride_length(&self) -> usize {
        self.stride_length
    }

    pub fn pooling(&self) -> Pooling {
        self.pooling
    }

    /// 校验上一层并返回之
    fn conv_prev_layer<'a>(&self, prev_layer: &'a Layer) -> &'a ConvolutionalLayer {
        let Layer::Convolutional(conv) = prev_layer else {
            panic!(
                "池化层的上一层必须是卷积层，实际为{}",
                prev_layer.kind_name()
            );
        };
        assert!(
            conv.depth() == self.depth,
            "池化层的深度{}须与上一卷积层的深度{}一致",
            self.depth,
            conv.depth()
        );
        assert!(
            conv.height() == self.height * self.window_size
                && conv.width() == self.width * self.window_size,
            "卷积层的输出{}x{}须恰好被window_size={}划分为{}x{}个窗口",
            conv.height(),
            conv.width(),
            self.window_size,
            self.height,
            self.width
        );
        conv
    }

    fn assert_no_params(tensor: &Tensor, what: &str) {
        assert!(tensor.is_empty(), "池化层没有{what}，传入的{what}必须为空");
    }
}

impl TraitLayer for PoolingLayer {
    fn depth(&self) -> usize {
        self.depth
    }

    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn feedforward(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        biases: &Tensor,
    ) -> ForwardRecord {
        let conv = self.conv_prev_layer(prev_layer);
        prev_record.a.assert_dimension(4);
        prev_record
            .a
            .assert_shape(&[self.depth, 1, conv.height(), conv.width()], "池化层的输入");
        Self::assert_no_params(weights, "权重");
        Self::assert_no_params(biases, "偏置");

        let ws = self.window_size;
        let pool = self.pooling.function();
        let input = prev_record.a.view().into_dimensionality::<Ix4>().unwrap();

        let mut z = Tensor::zeros(&[self.depth, self.height, self.width]);
        for r in 0..self.depth {
            for i in 0..self.height {
                for j in 0..self.width {
                    let (m, n) = (i * ws, j * ws);
                    let window = input.slice(s![r, 0, m..m + ws, n..n + ws]);
                    z[[r, i, j]] = pool(window);
                }
            }
        }

        let a = z.clone();
        ForwardRecord::new(z, a)
    }

    fn backpropagate(
        &self,
        prev_layer: &Layer,
        prev_record: &ForwardRecord,
        weights: &Tensor,
        delta_z: &Tensor,
    ) -> LayerGradients {
        let conv = self.conv_prev_layer(prev_layer);
        prev_record.a.assert_dimension(4);
        Self::assert_no_params(weights, "权重");
        delta_z.assert_shape(&[self.depth, self.height, self.width], "池化层的误差");

        let ws = self.window_size;
        let der_pool = self.pooling.derivative_of();
        let input = prev_record.a.view().into_dimensionality::<Ix4>().unwrap();

        // 克罗内克块扩张：[depth, height, width] -> [depth, 1, H, W]
        let mut delta_a_prev = delta_z
            .kron_blocks(ws)
            .reshape(&[self.depth, 1, conv.height(), conv.width()]);
        {
            let mut expanded = delta_a_prev.view_mut().into_dimensionality::<Ix4>().unwrap();
            for r in 0..self.depth {
                for m in (0..conv.height()).step_by(ws) {
                    for n in (0..conv.width()).step_by(ws) {
                        let window_der = der_pool(input.slice(s![r, 0, m..m + ws, n..n + ws]));
                        let mut dst = expanded.slice_mut(s![r, 0, m..m + ws, n..n + ws]);
                        dst *= &window_der;
                    }
                }
            }
        }
        let delta_z_prev = delta_for_prev_layer(prev_layer, prev_record, delta_a_prev);

        LayerGradients {
            der_weights: Tensor::empty(),
            der_biases: Tensor::empty(),
            delta_z_prev,
        }
    }
}
