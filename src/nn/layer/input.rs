use super::{ForwardRecord, Layer, LayerGradients, TraitLayer};
use crate::tensor::Tensor;

/// 输入层：纯粹的数据占位，没有参数。
/// 其激活值由 Network 直接设为观测值，因此前向/反向传播都不应被调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayer {
    depth: usize,
    height: usize,
    width: usize,
}

impl InputLayer {
    pub fn new(height: usize, width: usize) -> Self {
        Self::new_with_depth(1, height, width)
    }

    /// 多通道输入（如供卷积层使用的`[depth, height, width]`观测值）
    pub fn new_with_depth(depth: usize, height: usize, width: usize) -> Self {
        Self {
            depth,
            height,
            width,
        }
    }
}

impl TraitLayer for InputLayer {
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
        _prev_layer: &Layer,
        _prev_record: &ForwardRecord,
        _weights: &Tensor,
        _biases: &Tensor,
    ) -> ForwardRecord {
        panic!("输入层不参与前向传播，其激活值应由网络直接设置")
    }

    fn backpropagate(
        &self,
        _prev_layer: &Layer,
        _prev_record: &ForwardRecord,
        _weights: &Tensor,
        _delta_z: &Tensor,
    ) -> LayerGradients {
        panic!("输入层不参与反向传播")
    }
}
