//! HTTP API
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /categories | GET, POST | 分类列表 / 创建 |
//! | /categories/{id} | PUT, DELETE | 重命名 / 删除 (可转移商品) |
//! | /products | GET, POST | 商品列表 / 创建 |
//! | /products/{id} | GET, PUT, DELETE | 查询 / 更新 / 删除 |
//! | /health | GET | 健康检查 |
//!
//! 所有错误响应体为 `{"error": "..."}`。

pub mod categories;
pub mod extract;
pub mod health;
pub mod products;
