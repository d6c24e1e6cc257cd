//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品列表与 facet 接口 (公共)
//! - [`admin`] - 分类 featured spec 配置 (管理员)

pub mod convert;

pub mod admin;
pub mod health;
pub mod products;
