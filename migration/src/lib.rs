// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_tenancy;
mod m20260101_000002_create_conversations;
mod m20260101_000003_create_billing;
mod m20260101_000004_create_indexes;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回按执行顺序排列的迁移列表
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_tenancy::Migration),
            Box::new(m20260101_000002_create_conversations::Migration),
            Box::new(m20260101_000003_create_billing::Migration),
            Box::new(m20260101_000004_create_indexes::Migration),
        ]
    }
}
