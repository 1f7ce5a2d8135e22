//! 服务模块
//!
//! - [`image_store`] - 菜谱图片存储
//! - [`seed`] - 食材批量导入与固定标签

pub mod image_store;
pub mod seed;
