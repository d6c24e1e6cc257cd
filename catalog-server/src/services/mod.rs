//! 业务服务
//!
//! - [`FeaturedSpecsService`] - 分类 featured spec 配置

pub mod featured_specs;

pub use featured_specs::FeaturedSpecsService;
