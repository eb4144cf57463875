use sea_orm::{DbErr, EntityTrait, TransactionTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{data::item::ItemRepository, model::item::CreateItemParam};

mod create;
mod get_all;
mod get_by_id;
