//! Test support: a Postgres container shared by every test, with one fresh
//! migrated database per test.

mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
