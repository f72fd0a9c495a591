#![allow(dead_code)]

use std::sync::Arc;

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) url: &'static str,
}

#[derive(Debug)]
pub(crate) struct Pool {
    pub(crate) config: Arc<Config>,
}

#[derive(Debug)]
pub(crate) struct Connection {
    pub(crate) pool: Arc<Pool>,
}

impl Config {
    pub(crate) fn localhost() -> Self {
        Self { url: "localhost" }
    }
}

impl Pool {
    pub(crate) fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Connection {
    pub(crate) fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }
}
