//! URL 特征提取组件
//! 把任意 URL 字符串归一为固定形状的特征向量（提取永不失败）

pub mod extractor;
pub mod vector;

pub use extractor::UrlFeatureExtractor;
pub use vector::{Feature, FeatureVector};
