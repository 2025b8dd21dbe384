use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        pool::{MaxPool1d, MaxPool1dConfig},
        Linear, LinearConfig, Lstm, LstmConfig, PaddingConfig1d,
    },
    prelude::*,
    tensor::activation::relu,
};
use serde::{Deserialize, Serialize};

/// Architecture selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Lstm,
    Cnn,
}

/// Shared capability of both sentiment architectures.
///
/// Returns one raw logit per review; the sigmoid is applied by
/// the loss and by the evaluator.
pub trait SentimentClassifier<B: Backend>: Module<B> {
    /// embeddings: [batch, seq_len, dim], lengths: [batch] → logits: [batch]
    fn score(&self, embeddings: Tensor<B, 3>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 1>;
}

// ─── Recurrent variant ────────────────────────────────────────────────────────

#[derive(Config, Debug)]
pub struct LstmClassifierConfig {
    #[config(default = 50)]
    pub embedding_dim: usize,
    #[config(default = 100)]
    pub hidden_size:   usize,
    #[config(default = 64)]
    pub head_size:     usize,
}

impl LstmClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LstmClassifier<B> {
        LstmClassifier {
            lstm:        LstmConfig::new(self.embedding_dim, self.hidden_size, true).init(device),
            fc1:         LinearConfig::new(self.hidden_size, self.head_size).init(device),
            fc2:         LinearConfig::new(self.head_size, 1).init(device),
            hidden_size: self.hidden_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct LstmClassifier<B: Backend> {
    pub lstm:        Lstm<B>,
    pub fc1:         Linear<B>,
    pub fc2:         Linear<B>,
    pub hidden_size: usize,
}

impl<B: Backend> SentimentClassifier<B> for LstmClassifier<B> {
    fn score(&self, embeddings: Tensor<B, 3>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let [batch_size, _, _] = embeddings.dims();

        // Zero initial hidden and cell state
        let (output, _) = self.lstm.forward(embeddings, None); // [batch, seq_len, hidden]

        // Hidden output at the last valid step of each sequence,
        // so trailing padding is never read.
        let last = (lengths - 1)
            .reshape([batch_size, 1, 1])
            .expand([batch_size, 1, self.hidden_size]);
        let last_hidden = output.gather(1, last).reshape([batch_size, self.hidden_size]);

        let x = relu(self.fc1.forward(last_hidden));
        self.fc2.forward(x).reshape([batch_size])
    }
}

// ─── Convolutional variant ────────────────────────────────────────────────────

#[derive(Config, Debug)]
pub struct CnnClassifierConfig {
    /// Embedding dimension, used as the channel count throughout
    #[config(default = 50)]
    pub channels:    usize,
    #[config(default = 8)]
    pub kernel_size: usize,
    #[config(default = 5)]
    pub padding:     usize,
    #[config(default = 4)]
    pub pool_size:   usize,
}

impl CnnClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> CnnClassifier<B> {
        let conv = || {
            Conv1dConfig::new(self.channels, self.channels, self.kernel_size)
                .with_padding(PaddingConfig1d::Explicit(self.padding))
                .init(device)
        };
        let pool = || {
            MaxPool1dConfig::new(self.pool_size)
                .with_stride(self.pool_size)
                .init()
        };
        CnnClassifier {
            conv1:    conv(),
            conv2:    conv(),
            conv3:    conv(),
            pool1:    pool(),
            pool2:    pool(),
            fc:       LinearConfig::new(self.channels, 1).init(device),
            channels: self.channels,
        }
    }
}

/// Padding positions are NOT masked: their zero embeddings go
/// through the convolutions like real tokens and the max-pools
/// are relied on to ignore them. This is an approximation.
#[derive(Module, Debug)]
pub struct CnnClassifier<B: Backend> {
    pub conv1:    Conv1d<B>,
    pub conv2:    Conv1d<B>,
    pub conv3:    Conv1d<B>,
    pub pool1:    MaxPool1d,
    pub pool2:    MaxPool1d,
    pub fc:       Linear<B>,
    pub channels: usize,
}

impl<B: Backend> SentimentClassifier<B> for CnnClassifier<B> {
    fn score(&self, embeddings: Tensor<B, 3>, _lengths: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        let [batch_size, _, _] = embeddings.dims();

        // [batch, seq_len, dim] → [batch, channels, seq_len]
        let x = embeddings.swap_dims(1, 2);

        let x = self.pool1.forward(relu(self.conv1.forward(x)));
        let x = self.pool2.forward(relu(self.conv2.forward(x)));
        // Adaptive max-pool to width 1
        let x = relu(self.conv3.forward(x)).max_dim(2);

        self.fc
            .forward(x.reshape([batch_size, self.channels]))
            .reshape([batch_size])
    }
}
